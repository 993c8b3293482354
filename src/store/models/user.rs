use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::permissions_for_role;

/// An authenticated principal. Belongs to exactly one organization for its
/// lifetime; never hard-deleted (deactivation flips `is_active`).
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    /// One of "admin", "adviser", "paraplanner" (extensible).
    pub role: String,
    /// Explicit permission overrides; the guard checks these, not the role,
    /// except for the admin superset rule.
    pub permissions: Vec<String>,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// Build a user with the catalog permissions for `role` copied in as the
    /// initial overrides.
    pub fn new(
        organization_id: Uuid,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        let role = role.into();
        let permissions = permissions_for_role(&role)
            .iter()
            .map(|p| p.to_string())
            .collect();

        Self {
            id: Uuid::new_v4(),
            organization_id,
            email: email.into(),
            password_hash: password_hash.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            role,
            permissions,
            is_active: true,
            last_login: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_copies_catalog_permissions() {
        let user = User::new(Uuid::new_v4(), "a@b.com", "hash", "Ada", "Lovelace", "paraplanner");
        assert!(user.permissions.contains(&"clients:view".to_string()));
        assert!(!user.permissions.contains(&"clients:create".to_string()));
    }

    #[test]
    fn serialized_user_never_exposes_password_hash() {
        let user = User::new(Uuid::new_v4(), "a@b.com", "hash", "Ada", "Lovelace", "adviser");
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("password_hash").is_none());
        assert_eq!(value["email"], "a@b.com");
    }
}
