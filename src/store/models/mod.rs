pub mod client;
pub mod household;
pub mod organization;
pub mod portfolio;
pub mod scenario;
pub mod user;

pub use client::{Client, ClientCreate, ClientUpdate, FinancialGoal, FinancialGoalCreate};
pub use household::{Household, HouseholdCreate, HouseholdUpdate};
pub use organization::Organization;
pub use portfolio::{
    Holding, HoldingCreate, Portfolio, PortfolioCreate, PortfolioTransaction,
    PortfolioTransactionCreate, PortfolioUpdate,
};
pub use scenario::{Scenario, ScenarioCreate, ScenarioUpdate};
pub use user::User;
