//! /api/clients - client records and their nested financial goals.
//!
//! Every operation is scoped to the caller's organization; client-supplied
//! organization ids are overwritten on create.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    Extension,
};
use serde_json::{json, Value};
use uuid::Uuid;

use super::ListQuery;
use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::store::models::{Client, ClientCreate, ClientUpdate, FinancialGoal, FinancialGoalCreate};
use crate::store::ClientFilter;
use crate::AppState;

/// GET /api/clients - List the organization's clients with optional
/// search/status filtering
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Client>>, ApiError> {
    user.require(&["clients:view"])?;
    let page = query.page()?;

    let filter = ClientFilter {
        search: query.search,
        status: query.status,
    };
    let clients = state
        .store
        .list_clients(user.organization_id, filter, page)
        .await;
    Ok(Json(clients))
}

/// GET /api/clients/:id
pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(client_id): Path<Uuid>,
) -> Result<Json<Client>, ApiError> {
    user.require(&["clients:view"])?;
    let client = state.store.get_client(user.organization_id, client_id).await?;
    Ok(Json(client))
}

/// POST /api/clients
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<ClientCreate>,
) -> Result<Json<Client>, ApiError> {
    user.require(&["clients:create"])?;
    let client = state.store.create_client(user.organization_id, payload).await?;
    Ok(Json(client))
}

/// PUT /api/clients/:id
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(client_id): Path<Uuid>,
    Json(payload): Json<ClientUpdate>,
) -> Result<Json<Client>, ApiError> {
    user.require(&["clients:edit"])?;
    let client = state
        .store
        .update_client(user.organization_id, client_id, payload)
        .await?;
    Ok(Json(client))
}

/// DELETE /api/clients/:id - Soft delete: the record stays readable with
/// status "former"
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(client_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    user.require(&["clients:delete"])?;
    state.store.retire_client(user.organization_id, client_id).await?;
    Ok(Json(json!({ "message": "Client deleted successfully" })))
}

/// GET /api/clients/:id/goals
pub async fn list_goals(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(client_id): Path<Uuid>,
) -> Result<Json<Vec<FinancialGoal>>, ApiError> {
    user.require(&["clients:view"])?;
    let goals = state.store.list_goals(user.organization_id, client_id).await?;
    Ok(Json(goals))
}

/// POST /api/clients/:id/goals
pub async fn create_goal(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(client_id): Path<Uuid>,
    Json(payload): Json<FinancialGoalCreate>,
) -> Result<Json<FinancialGoal>, ApiError> {
    user.require(&["planning:create"])?;
    let goal = state
        .store
        .create_goal(user.organization_id, client_id, payload)
        .await?;
    Ok(Json(goal))
}
