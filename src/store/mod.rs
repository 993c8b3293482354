//! Tenant-scoped persistence seam.
//!
//! The query layer is an external collaborator: the core only needs the
//! operations below, every one of which is scoped by the caller's
//! organization id. Cross-tenant lookups come back as `NotFound` so that
//! record existence is never disclosed across tenants, and per-tenant
//! uniqueness violations come back as `Conflict`.

pub mod memory;
pub mod models;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

pub use memory::MemoryStore;
pub use models::*;

/// Errors from store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),
}

/// A page window, already validated by the HTTP layer.
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub skip: usize,
    pub limit: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self { skip: 0, limit: 100 }
    }
}

/// Optional filters for client listings.
#[derive(Debug, Clone, Default)]
pub struct ClientFilter {
    pub search: Option<String>,
    pub status: Option<String>,
}

/// Storage operations required by the resource handlers.
///
/// Methods that combine a check with a write (uniqueness check + insert,
/// parent ownership check + child write) must execute both under a single
/// logical transaction scope so a concurrent mutation cannot be observed as
/// a half-valid state.
#[async_trait]
pub trait Store: Send + Sync {
    // Organizations
    async fn create_organization(&self, org: Organization) -> Result<Organization, StoreError>;
    /// Create an organization together with its first admin user. Both
    /// uniqueness checks (domain, email) run before either insert, so a
    /// rejected registration leaves nothing behind.
    async fn create_organization_with_admin(
        &self,
        org: Organization,
        admin: User,
    ) -> Result<(Organization, User), StoreError>;

    // Users
    async fn create_user(&self, user: User) -> Result<User, StoreError>;
    async fn find_user_by_email(&self, email: &str) -> Option<User>;
    async fn find_active_user(&self, id: Uuid) -> Option<User>;
    async fn record_login(&self, id: Uuid);

    // Clients
    async fn list_clients(
        &self,
        org: Uuid,
        filter: ClientFilter,
        page: Page,
    ) -> Vec<Client>;
    async fn get_client(&self, org: Uuid, id: Uuid) -> Result<Client, StoreError>;
    async fn create_client(&self, org: Uuid, data: ClientCreate) -> Result<Client, StoreError>;
    async fn update_client(
        &self,
        org: Uuid,
        id: Uuid,
        data: ClientUpdate,
    ) -> Result<Client, StoreError>;
    /// Soft delete: flips the client's status to "former".
    async fn retire_client(&self, org: Uuid, id: Uuid) -> Result<Client, StoreError>;

    // Financial goals (client-owned)
    async fn list_goals(&self, org: Uuid, client_id: Uuid)
        -> Result<Vec<FinancialGoal>, StoreError>;
    async fn create_goal(
        &self,
        org: Uuid,
        client_id: Uuid,
        data: FinancialGoalCreate,
    ) -> Result<FinancialGoal, StoreError>;

    // Households
    async fn list_households(&self, org: Uuid, page: Page) -> Vec<Household>;
    async fn get_household(&self, org: Uuid, id: Uuid) -> Result<Household, StoreError>;
    async fn create_household(
        &self,
        org: Uuid,
        data: HouseholdCreate,
    ) -> Result<Household, StoreError>;
    async fn update_household(
        &self,
        org: Uuid,
        id: Uuid,
        data: HouseholdUpdate,
    ) -> Result<Household, StoreError>;
    /// Hard delete; the one entity removed outright.
    async fn delete_household(&self, org: Uuid, id: Uuid) -> Result<(), StoreError>;

    // Portfolios (client-owned)
    async fn list_portfolios(
        &self,
        org: Uuid,
        client_id: Option<Uuid>,
        page: Page,
    ) -> Vec<Portfolio>;
    async fn get_portfolio(&self, org: Uuid, id: Uuid) -> Result<Portfolio, StoreError>;
    async fn create_portfolio(
        &self,
        org: Uuid,
        data: PortfolioCreate,
    ) -> Result<Portfolio, StoreError>;
    async fn update_portfolio(
        &self,
        org: Uuid,
        id: Uuid,
        data: PortfolioUpdate,
    ) -> Result<Portfolio, StoreError>;
    /// Soft delete: flips `is_active` off.
    async fn deactivate_portfolio(&self, org: Uuid, id: Uuid) -> Result<Portfolio, StoreError>;

    // Holdings and transactions (portfolio-owned)
    async fn list_holdings(&self, org: Uuid, portfolio_id: Uuid)
        -> Result<Vec<Holding>, StoreError>;
    async fn create_holding(
        &self,
        org: Uuid,
        portfolio_id: Uuid,
        data: HoldingCreate,
    ) -> Result<Holding, StoreError>;
    async fn list_transactions(
        &self,
        org: Uuid,
        portfolio_id: Uuid,
    ) -> Result<Vec<PortfolioTransaction>, StoreError>;
    async fn create_transaction(
        &self,
        org: Uuid,
        portfolio_id: Uuid,
        data: PortfolioTransactionCreate,
    ) -> Result<PortfolioTransaction, StoreError>;

    // Scenarios (client-owned)
    async fn list_scenarios(
        &self,
        org: Uuid,
        client_id: Option<Uuid>,
        page: Page,
    ) -> Vec<Scenario>;
    async fn get_scenario(&self, org: Uuid, id: Uuid) -> Result<Scenario, StoreError>;
    async fn create_scenario(&self, org: Uuid, data: ScenarioCreate)
        -> Result<Scenario, StoreError>;
    async fn update_scenario(
        &self,
        org: Uuid,
        id: Uuid,
        data: ScenarioUpdate,
    ) -> Result<Scenario, StoreError>;
    /// Soft delete: flips `is_active` off.
    async fn deactivate_scenario(&self, org: Uuid, id: Uuid) -> Result<Scenario, StoreError>;
}
