//! Multi-tenant practice management API for financial planning firms.
//!
//! Organizations are tenants; every protected route resolves the caller
//! through the auth middleware and scopes all reads and writes to the
//! caller's organization.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod store;

use store::Store;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

/// Build the full router: public routes plus the authenticated API
/// subtree behind the bearer-token guard.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_public_routes(state.clone()))
        .merge(protected_routes(state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn auth_public_routes(state: AppState) -> Router {
    use handlers::auth;

    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/seed-admin", post(auth::seed_admin))
        .with_state(state)
}

fn protected_routes(state: AppState) -> Router {
    use handlers::{auth, clients, households, portfolios, scenarios};

    Router::new()
        .route("/api/auth/user", get(auth::current_user))
        .route("/api/clients", get(clients::list).post(clients::create))
        .route(
            "/api/clients/:id",
            get(clients::get).put(clients::update).delete(clients::delete),
        )
        .route(
            "/api/clients/:id/goals",
            get(clients::list_goals).post(clients::create_goal),
        )
        .route(
            "/api/households",
            get(households::list).post(households::create),
        )
        .route(
            "/api/households/:id",
            get(households::get)
                .put(households::update)
                .delete(households::delete),
        )
        .route(
            "/api/portfolios",
            get(portfolios::list).post(portfolios::create),
        )
        .route(
            "/api/portfolios/:id",
            get(portfolios::get)
                .put(portfolios::update)
                .delete(portfolios::delete),
        )
        .route(
            "/api/portfolios/:id/holdings",
            get(portfolios::list_holdings).post(portfolios::create_holding),
        )
        .route(
            "/api/portfolios/:id/transactions",
            get(portfolios::list_transactions).post(portfolios::create_transaction),
        )
        .route(
            "/api/scenarios",
            get(scenarios::list).post(scenarios::create),
        )
        .route(
            "/api/scenarios/:id",
            get(scenarios::get)
                .put(scenarios::update)
                .delete(scenarios::delete),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth_middleware,
        ))
        .with_state(state)
}

async fn root() -> axum::response::Json<Value> {
    axum::response::Json(json!({
        "name": "Practice API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Multi-tenant practice management API for financial planning firms",
    }))
}

async fn health() -> axum::response::Json<Value> {
    axum::response::Json(json!({
        "status": "healthy",
        "environment": format!("{:?}", config::config().environment),
    }))
}
