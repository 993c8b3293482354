use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A client of the practice. Soft-deleted by flipping `status` to "former".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub adviser_id: Option<Uuid>,
    /// Unique within the owning organization, not globally.
    pub client_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<DateTime<Utc>>,
    pub risk_tolerance: String,
    pub annual_income: Option<Decimal>,
    pub net_worth: Option<Decimal>,
    pub objectives: Vec<Value>,
    pub dependents: Vec<Value>,
    /// "prospect", "active", "former", ...
    pub status: String,
    pub notes: Option<String>,
    pub next_review_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientCreate {
    pub client_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<DateTime<Utc>>,
    #[serde(default = "default_risk_tolerance")]
    pub risk_tolerance: String,
    pub annual_income: Option<Decimal>,
    pub net_worth: Option<Decimal>,
    #[serde(default)]
    pub objectives: Vec<Value>,
    #[serde(default)]
    pub dependents: Vec<Value>,
    #[serde(default = "default_status")]
    pub status: String,
    pub notes: Option<String>,
    pub next_review_date: Option<DateTime<Utc>>,
    pub adviser_id: Option<Uuid>,
    /// Accepted in the payload but always overwritten with the caller's own
    /// organization; client-supplied tenant ids are never trusted.
    #[serde(default)]
    pub organization_id: Option<Uuid>,
}

impl ClientCreate {
    pub fn into_client(self, organization_id: Uuid) -> Client {
        Client {
            id: Uuid::new_v4(),
            organization_id,
            adviser_id: self.adviser_id,
            client_number: self.client_number,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            date_of_birth: self.date_of_birth,
            risk_tolerance: self.risk_tolerance,
            annual_income: self.annual_income,
            net_worth: self.net_worth,
            objectives: self.objectives,
            dependents: self.dependents,
            status: self.status,
            notes: self.notes,
            next_review_date: self.next_review_date,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientUpdate {
    pub client_number: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<DateTime<Utc>>,
    pub risk_tolerance: Option<String>,
    pub annual_income: Option<Decimal>,
    pub net_worth: Option<Decimal>,
    pub objectives: Option<Vec<Value>>,
    pub dependents: Option<Vec<Value>>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub next_review_date: Option<DateTime<Utc>>,
    pub adviser_id: Option<Uuid>,
}

impl ClientUpdate {
    /// Apply the set fields onto an existing record.
    pub fn apply(self, client: &mut Client) {
        if let Some(v) = self.client_number {
            client.client_number = v;
        }
        if let Some(v) = self.first_name {
            client.first_name = v;
        }
        if let Some(v) = self.last_name {
            client.last_name = v;
        }
        if let Some(v) = self.email {
            client.email = Some(v);
        }
        if let Some(v) = self.phone {
            client.phone = Some(v);
        }
        if let Some(v) = self.date_of_birth {
            client.date_of_birth = Some(v);
        }
        if let Some(v) = self.risk_tolerance {
            client.risk_tolerance = v;
        }
        if let Some(v) = self.annual_income {
            client.annual_income = Some(v);
        }
        if let Some(v) = self.net_worth {
            client.net_worth = Some(v);
        }
        if let Some(v) = self.objectives {
            client.objectives = v;
        }
        if let Some(v) = self.dependents {
            client.dependents = v;
        }
        if let Some(v) = self.status {
            client.status = v;
        }
        if let Some(v) = self.notes {
            client.notes = Some(v);
        }
        if let Some(v) = self.next_review_date {
            client.next_review_date = Some(v);
        }
        if let Some(v) = self.adviser_id {
            client.adviser_id = Some(v);
        }
        client.updated_at = Some(Utc::now());
    }
}

fn default_risk_tolerance() -> String {
    "moderate".to_string()
}

fn default_status() -> String {
    "prospect".to_string()
}

/// A planning goal owned by a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialGoal {
    pub id: Uuid,
    pub client_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub target_date: DateTime<Utc>,
    pub priority: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FinancialGoalCreate {
    pub name: String,
    pub description: Option<String>,
    pub target_amount: Decimal,
    #[serde(default)]
    pub current_amount: Decimal,
    pub target_date: DateTime<Utc>,
    #[serde(default = "default_priority")]
    pub priority: String,
    #[serde(default = "default_goal_status")]
    pub status: String,
    /// Overwritten with the path client id; never trusted from the payload.
    #[serde(default)]
    pub client_id: Option<Uuid>,
}

impl FinancialGoalCreate {
    pub fn into_goal(self, client_id: Uuid) -> FinancialGoal {
        FinancialGoal {
            id: Uuid::new_v4(),
            client_id,
            name: self.name,
            description: self.description,
            target_amount: self.target_amount,
            current_amount: self.current_amount,
            target_date: self.target_date,
            priority: self.priority,
            status: self.status,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

fn default_priority() -> String {
    "medium".to_string()
}

fn default_goal_status() -> String {
    "active".to_string()
}
