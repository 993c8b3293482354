//! /api/scenarios - financial planning scenarios.

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
use crate::store::models::{Scenario, ScenarioCreate, ScenarioUpdate};
use crate::AppState;

/// GET /api/scenarios - List scenarios, optionally filtered to one client
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Scenario>>, ApiError> {
    user.require(&["planning:view"])?;
    let page = query.page()?;
    let scenarios = state
        .store
        .list_scenarios(user.organization_id, query.client_id, page)
        .await;
    Ok(Json(scenarios))
}

/// GET /api/scenarios/:id
pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(scenario_id): Path<Uuid>,
) -> Result<Json<Scenario>, ApiError> {
    user.require(&["planning:view"])?;
    let scenario = state
        .store
        .get_scenario(user.organization_id, scenario_id)
        .await?;
    Ok(Json(scenario))
}

/// POST /api/scenarios
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<ScenarioCreate>,
) -> Result<Json<Scenario>, ApiError> {
    user.require(&["planning:create"])?;
    let scenario = state
        .store
        .create_scenario(user.organization_id, payload)
        .await?;
    Ok(Json(scenario))
}

/// PUT /api/scenarios/:id
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(scenario_id): Path<Uuid>,
    Json(payload): Json<ScenarioUpdate>,
) -> Result<Json<Scenario>, ApiError> {
    user.require(&["planning:edit"])?;
    let scenario = state
        .store
        .update_scenario(user.organization_id, scenario_id, payload)
        .await?;
    Ok(Json(scenario))
}

/// DELETE /api/scenarios/:id - Soft delete; requires the edit permission,
/// there is no separate planning delete
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(scenario_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    user.require(&["planning:edit"])?;
    state
        .store
        .deactivate_scenario(user.organization_id, scenario_id)
        .await?;
    Ok(Json(json!({ "message": "Scenario deleted successfully" })))
}
