use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The tenant boundary. Every tenant-owned entity carries (directly or
/// through a parent) an organization id, and no entity may reference across
/// organizations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    pub domain: String,
    pub subscription_plan: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Organization {
    pub fn new(name: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            domain: domain.into(),
            subscription_plan: "starter".to_string(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}
