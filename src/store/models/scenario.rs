use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A goal-planning projection for a client (retirement, education, house
/// purchase, ...). Soft-deleted via `is_active`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub id: Uuid,
    pub client_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub scenario_type: String,
    pub current_age: i32,
    pub target_age: i32,
    pub current_savings: Decimal,
    pub monthly_contribution: Decimal,
    pub expected_return: Decimal,
    pub inflation_rate: Decimal,
    pub target_amount: Option<Decimal>,
    pub projected_value: Option<Decimal>,
    pub projected_income: Option<Decimal>,
    pub assumptions: Value,
    pub results: Value,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioCreate {
    pub client_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub scenario_type: String,
    pub current_age: i32,
    pub target_age: i32,
    #[serde(default)]
    pub current_savings: Decimal,
    pub monthly_contribution: Decimal,
    pub expected_return: Decimal,
    #[serde(default = "default_inflation_rate")]
    pub inflation_rate: Decimal,
    pub target_amount: Option<Decimal>,
    pub projected_value: Option<Decimal>,
    pub projected_income: Option<Decimal>,
    #[serde(default = "empty_object")]
    pub assumptions: Value,
    #[serde(default = "empty_object")]
    pub results: Value,
}

impl ScenarioCreate {
    pub fn into_scenario(self) -> Scenario {
        Scenario {
            id: Uuid::new_v4(),
            client_id: self.client_id,
            name: self.name,
            description: self.description,
            scenario_type: self.scenario_type,
            current_age: self.current_age,
            target_age: self.target_age,
            current_savings: self.current_savings,
            monthly_contribution: self.monthly_contribution,
            expected_return: self.expected_return,
            inflation_rate: self.inflation_rate,
            target_amount: self.target_amount,
            projected_value: self.projected_value,
            projected_income: self.projected_income,
            assumptions: self.assumptions,
            results: self.results,
            is_active: true,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScenarioUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub scenario_type: Option<String>,
    pub current_age: Option<i32>,
    pub target_age: Option<i32>,
    pub current_savings: Option<Decimal>,
    pub monthly_contribution: Option<Decimal>,
    pub expected_return: Option<Decimal>,
    pub inflation_rate: Option<Decimal>,
    pub target_amount: Option<Decimal>,
    pub projected_value: Option<Decimal>,
    pub projected_income: Option<Decimal>,
    pub assumptions: Option<Value>,
    pub results: Option<Value>,
    pub is_active: Option<bool>,
}

impl ScenarioUpdate {
    pub fn apply(self, scenario: &mut Scenario) {
        if let Some(v) = self.name {
            scenario.name = v;
        }
        if let Some(v) = self.description {
            scenario.description = Some(v);
        }
        if let Some(v) = self.scenario_type {
            scenario.scenario_type = v;
        }
        if let Some(v) = self.current_age {
            scenario.current_age = v;
        }
        if let Some(v) = self.target_age {
            scenario.target_age = v;
        }
        if let Some(v) = self.current_savings {
            scenario.current_savings = v;
        }
        if let Some(v) = self.monthly_contribution {
            scenario.monthly_contribution = v;
        }
        if let Some(v) = self.expected_return {
            scenario.expected_return = v;
        }
        if let Some(v) = self.inflation_rate {
            scenario.inflation_rate = v;
        }
        if let Some(v) = self.target_amount {
            scenario.target_amount = Some(v);
        }
        if let Some(v) = self.projected_value {
            scenario.projected_value = Some(v);
        }
        if let Some(v) = self.projected_income {
            scenario.projected_income = Some(v);
        }
        if let Some(v) = self.assumptions {
            scenario.assumptions = v;
        }
        if let Some(v) = self.results {
            scenario.results = v;
        }
        if let Some(v) = self.is_active {
            scenario.is_active = v;
        }
        scenario.updated_at = Some(Utc::now());
    }
}

fn default_inflation_rate() -> Decimal {
    Decimal::new(25, 1) // 2.5
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}
