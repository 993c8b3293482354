use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A household grouping of clients. The only hard-deleted entity in the
/// system; everything else is deactivated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Household {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub primary_client_id: Option<Uuid>,
    pub joint_income: Option<Decimal>,
    pub joint_net_worth: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HouseholdCreate {
    pub name: String,
    pub primary_client_id: Option<Uuid>,
    pub joint_income: Option<Decimal>,
    pub joint_net_worth: Option<Decimal>,
    /// Always overwritten with the caller's organization.
    #[serde(default)]
    pub organization_id: Option<Uuid>,
}

impl HouseholdCreate {
    pub fn into_household(self, organization_id: Uuid) -> Household {
        Household {
            id: Uuid::new_v4(),
            organization_id,
            name: self.name,
            primary_client_id: self.primary_client_id,
            joint_income: self.joint_income,
            joint_net_worth: self.joint_net_worth,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HouseholdUpdate {
    pub name: Option<String>,
    pub primary_client_id: Option<Uuid>,
    pub joint_income: Option<Decimal>,
    pub joint_net_worth: Option<Decimal>,
}

impl HouseholdUpdate {
    pub fn apply(self, household: &mut Household) {
        if let Some(v) = self.name {
            household.name = v;
        }
        if let Some(v) = self.primary_client_id {
            household.primary_client_id = Some(v);
        }
        if let Some(v) = self.joint_income {
            household.joint_income = Some(v);
        }
        if let Some(v) = self.joint_net_worth {
            household.joint_net_worth = Some(v);
        }
        household.updated_at = Some(Utc::now());
    }
}
