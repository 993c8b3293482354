//! Authentication endpoints: login, registration, admin seeding, and the
//! current-user lookup.

use axum::{extract::State, response::Json, Extension};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::auth::{password, token};
use crate::config;
use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::store::models::{Organization, User};
use crate::store::StoreError;
use crate::AppState;

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@financeplatform.com";
pub const DEFAULT_ADMIN_PASSWORD: &str = "SecureAdmin2024!";

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub organization_name: String,
    pub domain: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SeedAdminRequest {
    pub organization_name: Option<String>,
    pub domain: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /api/auth/login - Exchange credentials for a bearer token
///
/// Bad email, bad password and deactivated account all produce the same 401
/// so none of them can be used to probe for accounts.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let invalid = || ApiError::unauthorized("Invalid email or password");

    let user = state
        .store
        .find_user_by_email(&payload.email)
        .await
        .filter(|u| u.is_active)
        .ok_or_else(invalid)?;

    if !password::verify_password(&payload.password, &user.password_hash)? {
        tracing::warn!(email = %payload.email, "failed login attempt");
        return Err(invalid());
    }

    state.store.record_login(user.id).await;

    let access_token = token::mint_default(user.id)
        .map_err(|e| ApiError::internal_server_error(e.to_string()))?;

    tracing::info!(user = %user.email, "login successful");
    Ok(Json(LoginResponse {
        access_token,
        token_type: "bearer",
        expires_in: config::config().security.token_ttl_secs,
        user,
    }))
}

/// GET /api/auth/user - The user resolved from the presented token
pub async fn current_user(Extension(user): Extension<CurrentUser>) -> Json<Value> {
    Json(json!({
        "id": user.id,
        "organization_id": user.organization_id,
        "email": user.email,
        "role": user.role,
        "permissions": user.permissions,
    }))
}

/// POST /api/auth/register - Create an organization and its admin user
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let password_hash = password::hash_password(&payload.password)?;

    let org = Organization::new(payload.organization_name, payload.domain);
    let admin = User::new(
        org.id,
        payload.email,
        password_hash,
        payload.first_name,
        payload.last_name,
        "admin",
    );

    // One atomic store call: a rejected registration (duplicate email or
    // domain) must not leave a half-created organization behind
    let (org, user) = state
        .store
        .create_organization_with_admin(org, admin)
        .await?;

    let access_token = token::mint_default(user.id)
        .map_err(|e| ApiError::internal_server_error(e.to_string()))?;

    tracing::info!(org = %org.name, admin = %user.email, "organization registered");
    Ok(Json(LoginResponse {
        access_token,
        token_type: "bearer",
        expires_in: config::config().security.token_ttl_secs,
        user,
    }))
}

/// POST /api/auth/seed-admin - Idempotently create a default organization
/// and admin account (bootstrap/demo convenience; login afterwards).
pub async fn seed_admin(
    State(state): State<AppState>,
    payload: Option<Json<SeedAdminRequest>>,
) -> Result<Json<Value>, ApiError> {
    let req = payload.map(|Json(r)| r).unwrap_or_default();
    let email = req.email.unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.to_string());

    if let Some(existing) = state.store.find_user_by_email(&email).await {
        return Ok(Json(json!({
            "message": "Admin user already exists",
            "email": existing.email,
        })));
    }

    let password_hash = password::hash_password(
        &req.password
            .unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_string()),
    )?;

    let org = Organization::new(
        req.organization_name
            .unwrap_or_else(|| "Finance Platform".to_string()),
        req.domain.unwrap_or_else(|| "financeplatform.com".to_string()),
    );
    let admin = User::new(org.id, email, password_hash, "System", "Admin", "admin");

    match state.store.create_organization_with_admin(org, admin).await {
        Ok((org, user)) => {
            tracing::info!(admin = %user.email, "seeded admin user");
            Ok(Json(json!({
                "message": "Admin user created",
                "email": user.email,
                "organization_id": org.id,
            })))
        }
        // The email was free, so a conflict can only be the domain: an
        // earlier registration already claimed it and there is nothing
        // left to seed
        Err(StoreError::Conflict(_)) => Ok(Json(json!({
            "message": "Organization already seeded",
        }))),
        Err(e) => Err(e.into()),
    }
}
