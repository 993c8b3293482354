//! /api/portfolios - portfolios plus their nested holdings and
//! transactions.
//!
//! A portfolio must name a client that belongs to the caller's
//! organization; a client id from another tenant reads as 404.

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
use crate::store::models::{
    Holding, HoldingCreate, Portfolio, PortfolioCreate, PortfolioTransaction,
    PortfolioTransactionCreate, PortfolioUpdate,
};
use crate::AppState;

/// GET /api/portfolios - List portfolios, optionally filtered to one client
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Portfolio>>, ApiError> {
    user.require(&["portfolios:view"])?;
    let page = query.page()?;
    let portfolios = state
        .store
        .list_portfolios(user.organization_id, query.client_id, page)
        .await;
    Ok(Json(portfolios))
}

/// GET /api/portfolios/:id
pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(portfolio_id): Path<Uuid>,
) -> Result<Json<Portfolio>, ApiError> {
    user.require(&["portfolios:view"])?;
    let portfolio = state
        .store
        .get_portfolio(user.organization_id, portfolio_id)
        .await?;
    Ok(Json(portfolio))
}

/// POST /api/portfolios
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<PortfolioCreate>,
) -> Result<Json<Portfolio>, ApiError> {
    user.require(&["portfolios:create"])?;
    let portfolio = state
        .store
        .create_portfolio(user.organization_id, payload)
        .await?;
    Ok(Json(portfolio))
}

/// PUT /api/portfolios/:id
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(portfolio_id): Path<Uuid>,
    Json(payload): Json<PortfolioUpdate>,
) -> Result<Json<Portfolio>, ApiError> {
    user.require(&["portfolios:edit"])?;
    let portfolio = state
        .store
        .update_portfolio(user.organization_id, portfolio_id, payload)
        .await?;
    Ok(Json(portfolio))
}

/// DELETE /api/portfolios/:id - Soft delete: the portfolio is marked
/// inactive, never removed
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(portfolio_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    user.require(&["portfolios:delete"])?;
    state
        .store
        .deactivate_portfolio(user.organization_id, portfolio_id)
        .await?;
    Ok(Json(json!({ "message": "Portfolio deleted successfully" })))
}

/// GET /api/portfolios/:id/holdings
pub async fn list_holdings(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(portfolio_id): Path<Uuid>,
) -> Result<Json<Vec<Holding>>, ApiError> {
    user.require(&["portfolios:view"])?;
    let holdings = state
        .store
        .list_holdings(user.organization_id, portfolio_id)
        .await?;
    Ok(Json(holdings))
}

/// POST /api/portfolios/:id/holdings
pub async fn create_holding(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(portfolio_id): Path<Uuid>,
    Json(payload): Json<HoldingCreate>,
) -> Result<Json<Holding>, ApiError> {
    user.require(&["portfolios:edit"])?;
    let holding = state
        .store
        .create_holding(user.organization_id, portfolio_id, payload)
        .await?;
    Ok(Json(holding))
}

/// GET /api/portfolios/:id/transactions
pub async fn list_transactions(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(portfolio_id): Path<Uuid>,
) -> Result<Json<Vec<PortfolioTransaction>>, ApiError> {
    user.require(&["portfolios:view"])?;
    let transactions = state
        .store
        .list_transactions(user.organization_id, portfolio_id)
        .await?;
    Ok(Json(transactions))
}

/// POST /api/portfolios/:id/transactions
pub async fn create_transaction(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(portfolio_id): Path<Uuid>,
    Json(payload): Json<PortfolioTransactionCreate>,
) -> Result<Json<PortfolioTransaction>, ApiError> {
    user.require(&["portfolios:edit"])?;
    let transaction = state
        .store
        .create_transaction(user.organization_id, portfolio_id, payload)
        .await?;
    Ok(Json(transaction))
}
