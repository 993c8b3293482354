mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{delete, get, post, put, request, seed_and_login, test_app};

fn client_payload(number: &str, first: &str, last: &str) -> serde_json::Value {
    json!({
        "client_number": number,
        "first_name": first,
        "last_name": last,
        "email": format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase()),
    })
}

#[tokio::test]
async fn client_crud_round_trip() {
    let (app, _) = test_app();
    let token = seed_and_login(&app).await;

    let (status, created) = post(
        &app,
        "/api/clients",
        &token,
        client_payload("CL-001", "Ada", "Lovelace"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["status"], "prospect");
    assert_eq!(created["risk_tolerance"], "moderate");
    let id = created["id"].as_str().unwrap();

    let (status, fetched) = get(&app, &format!("/api/clients/{id}"), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["client_number"], "CL-001");

    let (status, updated) = put(
        &app,
        &format!("/api/clients/{id}"),
        &token,
        json!({ "status": "active", "notes": "onboarded" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "active");
    assert_eq!(updated["notes"], "onboarded");
    assert!(updated["updated_at"].is_string());

    let (status, list) = get(&app, "/api/clients", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn deleting_a_client_retires_it_but_keeps_it_readable() {
    let (app, _) = test_app();
    let token = seed_and_login(&app).await;

    let (_, created) = post(
        &app,
        "/api/clients",
        &token,
        client_payload("CL-001", "Ada", "Lovelace"),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = delete(&app, &format!("/api/clients/{id}"), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Client deleted successfully");

    let (status, fetched) = get(&app, &format!("/api/clients/{id}"), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["status"], "former");
}

#[tokio::test]
async fn duplicate_client_number_in_same_org_conflicts() {
    let (app, _) = test_app();
    let token = seed_and_login(&app).await;

    let (status, _) = post(
        &app,
        "/api/clients",
        &token,
        client_payload("CL-001", "Ada", "Lovelace"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post(
        &app,
        "/api/clients",
        &token,
        client_payload("CL-001", "Grace", "Hopper"),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], true);
}

#[tokio::test]
async fn list_supports_search_and_status_filters() {
    let (app, _) = test_app();
    let token = seed_and_login(&app).await;

    post(&app, "/api/clients", &token, client_payload("CL-001", "Ada", "Lovelace")).await;
    post(&app, "/api/clients", &token, client_payload("CL-002", "Grace", "Hopper")).await;
    let (_, third) = post(
        &app,
        "/api/clients",
        &token,
        client_payload("CL-003", "Alan", "Turing"),
    )
    .await;
    let third_id = third["id"].as_str().unwrap();
    put(
        &app,
        &format!("/api/clients/{third_id}"),
        &token,
        json!({ "status": "active" }),
    )
    .await;

    // Case-insensitive name search
    let (status, list) = get(&app, "/api/clients?search=grace", &token).await;
    assert_eq!(status, StatusCode::OK);
    let rows = list.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["first_name"], "Grace");

    // Search also matches client_number
    let (_, list) = get(&app, "/api/clients?search=CL-001", &token).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (_, list) = get(&app, "/api/clients?status=active", &token).await;
    let rows = list.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["last_name"], "Turing");
}

#[tokio::test]
async fn pagination_is_validated_before_any_data_access() {
    let (app, _) = test_app();
    let token = seed_and_login(&app).await;

    for (uri, field) in [
        ("/api/clients?skip=-1", "skip"),
        ("/api/clients?limit=0", "limit"),
        ("/api/clients?limit=1001", "limit"),
    ] {
        let (status, body) = get(&app, uri, &token).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(body["field_errors"].get(field).is_some(), "{uri}");
    }

    post(&app, "/api/clients", &token, client_payload("CL-001", "Ada", "Lovelace")).await;
    post(&app, "/api/clients", &token, client_payload("CL-002", "Grace", "Hopper")).await;

    let (status, list) = get(&app, "/api/clients?skip=1&limit=1", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn goals_nest_under_their_client() {
    let (app, _) = test_app();
    let token = seed_and_login(&app).await;

    let (_, created) = post(
        &app,
        "/api/clients",
        &token,
        client_payload("CL-001", "Ada", "Lovelace"),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let (status, goal) = post(
        &app,
        &format!("/api/clients/{id}/goals"),
        &token,
        json!({
            "name": "Retirement pot",
            "target_amount": "500000",
            "target_date": "2045-06-01T00:00:00Z",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(goal["priority"], "medium");
    assert_eq!(goal["status"], "active");
    assert_eq!(goal["client_id"], created["id"]);

    let (status, goals) = get(&app, &format!("/api/clients/{id}/goals"), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(goals.as_array().unwrap().len(), 1);

    // Goals for a nonexistent client are a 404, not an empty list
    let missing = uuid::Uuid::new_v4();
    let (status, _) = request(
        &app,
        "GET",
        &format!("/api/clients/{missing}/goals"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
