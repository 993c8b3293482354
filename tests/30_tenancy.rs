mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{get, post, register_org, test_app};

/// Two organizations with one client each; returns (token_a, token_b,
/// client_a_id, client_b_id).
async fn two_orgs_with_clients(app: &axum::Router) -> (String, String, String, String) {
    let (token_a, _) = register_org(app, "Alpha Advisers", "admin@alpha.com").await;
    let (token_b, _) = register_org(app, "Beta Wealth", "admin@beta.com").await;

    let (status, client_a) = post(
        app,
        "/api/clients",
        &token_a,
        json!({ "client_number": "CL-001", "first_name": "Ada", "last_name": "Lovelace" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, client_b) = post(
        app,
        "/api/clients",
        &token_b,
        json!({ "client_number": "CL-900", "first_name": "Grace", "last_name": "Hopper" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    (
        token_a,
        token_b,
        client_a["id"].as_str().unwrap().to_string(),
        client_b["id"].as_str().unwrap().to_string(),
    )
}

#[tokio::test]
async fn cross_tenant_reads_are_not_found() {
    let (app, _) = test_app();
    let (token_a, token_b, client_a, client_b) = two_orgs_with_clients(&app).await;

    // Each org sees only its own client in listings
    let (_, list_a) = get(&app, "/api/clients", &token_a).await;
    assert_eq!(list_a.as_array().unwrap().len(), 1);
    assert_eq!(list_a[0]["client_number"], "CL-001");

    // A's client by id is a 404 for B, indistinguishable from nonexistence
    let (status, body) = get(&app, &format!("/api/clients/{client_a}"), &token_b).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], true);

    let (status, _) = get(&app, &format!("/api/clients/{client_b}"), &token_a).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Within the owning org the same id resolves fine
    let (status, _) = get(&app, &format!("/api/clients/{client_a}"), &token_a).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn cross_tenant_writes_are_not_found() {
    let (app, _) = test_app();
    let (_, token_b, client_a, _) = two_orgs_with_clients(&app).await;

    let (status, _) = common::put(
        &app,
        &format!("/api/clients/{client_a}"),
        &token_b,
        json!({ "notes": "hijacked" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = common::delete(&app, &format!("/api/clients/{client_a}"), &token_b).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = post(
        &app,
        &format!("/api/clients/{client_a}/goals"),
        &token_b,
        json!({
            "name": "Not yours",
            "target_amount": "1",
            "target_date": "2030-01-01T00:00:00Z",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn portfolio_cannot_reference_another_orgs_client() {
    let (app, _) = test_app();
    let (token_a, token_b, client_a, _) = two_orgs_with_clients(&app).await;

    let payload = json!({
        "client_id": client_a,
        "name": "General Investment",
        "account_type": "gia",
    });

    // B naming A's client reads as a missing client
    let (status, _) = post(&app, "/api/portfolios", &token_b, payload.clone()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // A, the rightful owner, succeeds
    let (status, portfolio) = post(&app, "/api/portfolios", &token_a, payload).await;
    assert_eq!(status, StatusCode::OK);
    let portfolio_id = portfolio["id"].as_str().unwrap();

    // And the created portfolio is invisible to B
    let (status, _) = get(&app, &format!("/api/portfolios/{portfolio_id}"), &token_b).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list_b) = get(&app, "/api/portfolios", &token_b).await;
    assert!(list_b.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn client_numbers_are_unique_per_org_not_globally() {
    let (app, _) = test_app();
    let (token_a, token_b, _, _) = two_orgs_with_clients(&app).await;

    let payload = json!({ "client_number": "SHARED-1", "first_name": "Alan", "last_name": "Turing" });

    let (status, _) = post(&app, "/api/clients", &token_a, payload.clone()).await;
    assert_eq!(status, StatusCode::OK);

    // Same number in a different org is fine
    let (status, _) = post(&app, "/api/clients", &token_b, payload.clone()).await;
    assert_eq!(status, StatusCode::OK);

    // But a second use within org A conflicts
    let (status, _) = post(&app, "/api/clients", &token_a, payload).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn payload_organization_id_is_ignored() {
    let (app, _) = test_app();
    let (token_a, _, _, _) = two_orgs_with_clients(&app).await;
    let (_, reg_b) = register_org(&app, "Gamma Planning", "admin@gamma.com").await;
    let org_b = reg_b["user"]["organization_id"].as_str().unwrap();

    // A tries to plant a client inside B's org; the id is overwritten
    let (status, created) = post(
        &app,
        "/api/clients",
        &token_a,
        json!({
            "client_number": "CL-777",
            "first_name": "Eve",
            "last_name": "Smith",
            "organization_id": org_b,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_ne!(created["organization_id"].as_str().unwrap(), org_b);
}

#[tokio::test]
async fn scenarios_are_tenant_scoped() {
    let (app, _) = test_app();
    let (token_a, token_b, client_a, _) = two_orgs_with_clients(&app).await;

    let (status, scenario) = post(
        &app,
        "/api/scenarios",
        &token_a,
        json!({
            "client_id": client_a,
            "name": "Base case",
            "type": "retirement",
            "current_age": 40,
            "target_age": 67,
            "monthly_contribution": "750",
            "expected_return": "5.0",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let scenario_id = scenario["id"].as_str().unwrap();

    let (status, _) = get(&app, &format!("/api/scenarios/{scenario_id}"), &token_b).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list_a) = get(&app, &format!("/api/scenarios?client_id={client_a}"), &token_a).await;
    assert_eq!(list_a.as_array().unwrap().len(), 1);
}
