//! /api/households - household groupings.
//!
//! Household is the one entity with a hard delete; see DESIGN.md for why
//! the asymmetry with Client/Portfolio/Scenario is kept.

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
use crate::store::models::{Household, HouseholdCreate, HouseholdUpdate};
use crate::AppState;

/// GET /api/households
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Household>>, ApiError> {
    user.require(&["clients:view"])?;
    let page = query.page()?;
    let households = state.store.list_households(user.organization_id, page).await;
    Ok(Json(households))
}

/// GET /api/households/:id
pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(household_id): Path<Uuid>,
) -> Result<Json<Household>, ApiError> {
    user.require(&["clients:view"])?;
    let household = state
        .store
        .get_household(user.organization_id, household_id)
        .await?;
    Ok(Json(household))
}

/// POST /api/households
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<HouseholdCreate>,
) -> Result<Json<Household>, ApiError> {
    user.require(&["clients:create"])?;
    let household = state
        .store
        .create_household(user.organization_id, payload)
        .await?;
    Ok(Json(household))
}

/// PUT /api/households/:id
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(household_id): Path<Uuid>,
    Json(payload): Json<HouseholdUpdate>,
) -> Result<Json<Household>, ApiError> {
    user.require(&["clients:edit"])?;
    let household = state
        .store
        .update_household(user.organization_id, household_id, payload)
        .await?;
    Ok(Json(household))
}

/// DELETE /api/households/:id - Hard delete
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(household_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    user.require(&["clients:delete"])?;
    state
        .store
        .delete_household(user.organization_id, household_id)
        .await?;
    Ok(Json(json!({ "message": "Household deleted successfully" })))
}
