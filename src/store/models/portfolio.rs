use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// An investment account belonging to a client; tenant ownership is
/// transitive through the client. Soft-deleted via `is_active`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    pub id: Uuid,
    pub client_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub account_type: String,
    pub provider: Option<String>,
    pub account_number: Option<String>,
    pub total_value: Decimal,
    pub currency: String,
    pub asset_allocation: Value,
    pub benchmark_index: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PortfolioCreate {
    pub client_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub account_type: String,
    pub provider: Option<String>,
    pub account_number: Option<String>,
    #[serde(default)]
    pub total_value: Decimal,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "empty_object")]
    pub asset_allocation: Value,
    pub benchmark_index: Option<String>,
}

impl PortfolioCreate {
    pub fn into_portfolio(self) -> Portfolio {
        Portfolio {
            id: Uuid::new_v4(),
            client_id: self.client_id,
            name: self.name,
            description: self.description,
            account_type: self.account_type,
            provider: self.provider,
            account_number: self.account_number,
            total_value: self.total_value,
            currency: self.currency,
            asset_allocation: self.asset_allocation,
            benchmark_index: self.benchmark_index,
            is_active: true,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PortfolioUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub account_type: Option<String>,
    pub provider: Option<String>,
    pub account_number: Option<String>,
    pub total_value: Option<Decimal>,
    pub currency: Option<String>,
    pub asset_allocation: Option<Value>,
    pub benchmark_index: Option<String>,
    pub is_active: Option<bool>,
}

impl PortfolioUpdate {
    pub fn apply(self, portfolio: &mut Portfolio) {
        if let Some(v) = self.name {
            portfolio.name = v;
        }
        if let Some(v) = self.description {
            portfolio.description = Some(v);
        }
        if let Some(v) = self.account_type {
            portfolio.account_type = v;
        }
        if let Some(v) = self.provider {
            portfolio.provider = Some(v);
        }
        if let Some(v) = self.account_number {
            portfolio.account_number = Some(v);
        }
        if let Some(v) = self.total_value {
            portfolio.total_value = v;
        }
        if let Some(v) = self.currency {
            portfolio.currency = v;
        }
        if let Some(v) = self.asset_allocation {
            portfolio.asset_allocation = v;
        }
        if let Some(v) = self.benchmark_index {
            portfolio.benchmark_index = Some(v);
        }
        if let Some(v) = self.is_active {
            portfolio.is_active = v;
        }
        portfolio.updated_at = Some(Utc::now());
    }
}

fn default_currency() -> String {
    "GBP".to_string()
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

/// A position inside a portfolio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holding {
    pub id: Uuid,
    pub portfolio_id: Uuid,
    pub symbol: String,
    pub name: String,
    pub asset_class: String,
    pub sector: Option<String>,
    pub region: Option<String>,
    pub quantity: Decimal,
    pub average_cost: Option<Decimal>,
    pub current_price: Decimal,
    pub market_value: Decimal,
    pub unrealized_gain_loss: Option<Decimal>,
    pub weight: Option<Decimal>,
    pub last_updated: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HoldingCreate {
    pub symbol: String,
    pub name: String,
    pub asset_class: String,
    pub sector: Option<String>,
    pub region: Option<String>,
    pub quantity: Decimal,
    pub average_cost: Option<Decimal>,
    pub current_price: Decimal,
    pub market_value: Decimal,
    pub unrealized_gain_loss: Option<Decimal>,
    pub weight: Option<Decimal>,
    /// Overwritten with the path portfolio id.
    #[serde(default)]
    pub portfolio_id: Option<Uuid>,
}

impl HoldingCreate {
    pub fn into_holding(self, portfolio_id: Uuid) -> Holding {
        Holding {
            id: Uuid::new_v4(),
            portfolio_id,
            symbol: self.symbol,
            name: self.name,
            asset_class: self.asset_class,
            sector: self.sector,
            region: self.region,
            quantity: self.quantity,
            average_cost: self.average_cost,
            current_price: self.current_price,
            market_value: self.market_value,
            unrealized_gain_loss: self.unrealized_gain_loss,
            weight: self.weight,
            last_updated: None,
            created_at: Utc::now(),
        }
    }
}

/// A trade or cash movement recorded against a portfolio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioTransaction {
    pub id: Uuid,
    pub portfolio_id: Uuid,
    pub transaction_type: String,
    pub symbol: Option<String>,
    pub quantity: Option<Decimal>,
    pub price: Option<Decimal>,
    pub amount: Decimal,
    pub trade_date: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PortfolioTransactionCreate {
    pub transaction_type: String,
    pub symbol: Option<String>,
    pub quantity: Option<Decimal>,
    pub price: Option<Decimal>,
    pub amount: Decimal,
    pub trade_date: DateTime<Utc>,
    pub notes: Option<String>,
    /// Overwritten with the path portfolio id.
    #[serde(default)]
    pub portfolio_id: Option<Uuid>,
}

impl PortfolioTransactionCreate {
    pub fn into_transaction(self, portfolio_id: Uuid) -> PortfolioTransaction {
        PortfolioTransaction {
            id: Uuid::new_v4(),
            portfolio_id,
            transaction_type: self.transaction_type,
            symbol: self.symbol,
            quantity: self.quantity,
            price: self.price,
            amount: self.amount,
            trade_date: self.trade_date,
            notes: self.notes,
            created_at: Utc::now(),
        }
    }
}
