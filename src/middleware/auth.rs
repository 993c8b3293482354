use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::auth::token;
use crate::error::ApiError;
use crate::store::models::User;
use crate::AppState;

/// The resolved caller, injected into request extensions by
/// [`auth_middleware`]. This is the only channel through which a request
/// acquires a tenant context: handlers scope every store call by
/// `organization_id` taken from here, never from the payload.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub email: String,
    pub role: String,
    pub permissions: Vec<String>,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            organization_id: user.organization_id,
            email: user.email,
            role: user.role,
            permissions: user.permissions,
        }
    }
}

impl CurrentUser {
    /// Enforce an endpoint's required permission set.
    ///
    /// Admins hold every permission implicitly, including strings no catalog
    /// lists. Everyone else is checked against their explicit permission
    /// overrides; the denial enumerates what is missing.
    pub fn require(&self, required: &[&str]) -> Result<(), ApiError> {
        if self.role == "admin" {
            return Ok(());
        }

        let missing: BTreeSet<&str> = required
            .iter()
            .copied()
            .filter(|p| !self.permissions.iter().any(|held| held == p))
            .collect();

        if missing.is_empty() {
            return Ok(());
        }

        tracing::warn!(
            user = %self.email,
            role = %self.role,
            missing = ?missing,
            "permission denied"
        );
        Err(ApiError::forbidden(format!(
            "Insufficient permissions. Missing: {}",
            missing.into_iter().collect::<Vec<_>>().join(", ")
        )))
    }
}

/// Authorization guard applied to every protected route.
///
/// Verifies the bearer token, resolves the subject to an existing active
/// user, and injects [`CurrentUser`] into the request. A missing or inactive
/// user fails with the same 401 status as a bad token so account existence
/// is not leaked.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(request.headers())?;

    let claims = token::verify(&token)
        .map_err(|_| ApiError::unauthorized("Invalid authentication credentials"))?;

    let user = state
        .store
        .find_active_user(claims.sub)
        .await
        .ok_or_else(|| {
            tracing::warn!(subject = %claims.sub, "token subject not found or inactive");
            ApiError::unauthorized("User not found or inactive")
        })?;

    request.extensions_mut().insert(CurrentUser::from(user));
    Ok(next.run(request).await)
}

/// Extract the token from an `Authorization: Bearer <token>` header.
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, ApiError> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::unauthorized("Invalid Authorization header format"))?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.to_string()),
        Some(_) => Err(ApiError::unauthorized("Empty bearer token")),
        None => Err(ApiError::unauthorized(
            "Authorization header must use Bearer token format",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with(role: &str, permissions: &[&str]) -> CurrentUser {
        CurrentUser {
            id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            email: "t@example.com".to_string(),
            role: role.to_string(),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn admin_holds_every_permission() {
        let admin = user_with("admin", &[]);
        assert!(admin.require(&["clients:view"]).is_ok());
        assert!(admin.require(&["made:up-permission"]).is_ok());
    }

    #[test]
    fn missing_permissions_are_enumerated() {
        let user = user_with("adviser", &["clients:view"]);
        let err = user
            .require(&["clients:view", "clients:delete", "org:billing"])
            .unwrap_err();
        assert_eq!(err.status_code(), 403);
        assert!(err.message().contains("clients:delete"));
        assert!(err.message().contains("org:billing"));
        assert!(!err.message().contains("clients:view,"));
    }

    #[test]
    fn exact_permission_set_passes() {
        let user = user_with("paraplanner", &["planning:view", "planning:create"]);
        assert!(user.require(&["planning:view"]).is_ok());
        assert!(user.require(&[]).is_ok());
    }

    #[test]
    fn bearer_extraction_rules() {
        let mut headers = HeaderMap::new();
        assert!(extract_bearer_token(&headers).is_err());

        headers.insert("authorization", "Token abc".parse().unwrap());
        assert!(extract_bearer_token(&headers).is_err());

        headers.insert("authorization", "Bearer ".parse().unwrap());
        assert!(extract_bearer_token(&headers).is_err());

        headers.insert("authorization", "Bearer abc.def.ghi".parse().unwrap());
        assert_eq!(extract_bearer_token(&headers).unwrap(), "abc.def.ghi");
    }
}
