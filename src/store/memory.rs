//! In-memory store.
//!
//! A single `RwLock` guards all tables, so each store call is one lock
//! acquisition: a check-then-write sequence (uniqueness check + insert,
//! parent ownership check + child write) cannot interleave with another
//! request, which is this store's equivalent of a database transaction.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::*;
use super::{ClientFilter, Page, Store, StoreError};

#[derive(Default)]
struct Tables {
    organizations: HashMap<Uuid, Organization>,
    users: HashMap<Uuid, User>,
    clients: HashMap<Uuid, Client>,
    goals: HashMap<Uuid, FinancialGoal>,
    households: HashMap<Uuid, Household>,
    portfolios: HashMap<Uuid, Portfolio>,
    holdings: HashMap<Uuid, Holding>,
    transactions: HashMap<Uuid, PortfolioTransaction>,
    scenarios: HashMap<Uuid, Scenario>,
}

impl Tables {
    fn client_in_org(&self, org: Uuid, client_id: Uuid) -> bool {
        self.clients
            .get(&client_id)
            .map(|c| c.organization_id == org)
            .unwrap_or(false)
    }

    /// Resolve a portfolio only when its client belongs to `org`.
    fn portfolio_in_org(&self, org: Uuid, portfolio_id: Uuid) -> Option<&Portfolio> {
        self.portfolios
            .get(&portfolio_id)
            .filter(|p| self.client_in_org(org, p.client_id))
    }
}

pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn page<T>(mut rows: Vec<T>, page: Page) -> Vec<T> {
    let end = page.skip.saturating_add(page.limit).min(rows.len());
    let start = page.skip.min(rows.len());
    rows.drain(..start);
    rows.truncate(end - start);
    rows
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_organization(&self, org: Organization) -> Result<Organization, StoreError> {
        let mut tables = self.tables.write().await;
        if tables
            .organizations
            .values()
            .any(|o| o.domain == org.domain)
        {
            return Err(StoreError::Conflict(format!(
                "Organization domain '{}' already registered",
                org.domain
            )));
        }
        tables.organizations.insert(org.id, org.clone());
        Ok(org)
    }

    async fn create_organization_with_admin(
        &self,
        org: Organization,
        admin: User,
    ) -> Result<(Organization, User), StoreError> {
        let mut tables = self.tables.write().await;
        if tables
            .organizations
            .values()
            .any(|o| o.domain == org.domain)
        {
            return Err(StoreError::Conflict(format!(
                "Organization domain '{}' already registered",
                org.domain
            )));
        }
        if tables
            .users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&admin.email))
        {
            return Err(StoreError::Conflict(format!(
                "Email '{}' already registered",
                admin.email
            )));
        }
        tables.organizations.insert(org.id, org.clone());
        tables.users.insert(admin.id, admin.clone());
        Ok((org, admin))
    }

    async fn create_user(&self, user: User) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        // Emails are unique across organizations, not per-tenant
        if tables
            .users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(StoreError::Conflict(format!(
                "Email '{}' already registered",
                user.email
            )));
        }
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Option<User> {
        let tables = self.tables.read().await;
        tables
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    async fn find_active_user(&self, id: Uuid) -> Option<User> {
        let tables = self.tables.read().await;
        tables.users.get(&id).filter(|u| u.is_active).cloned()
    }

    async fn record_login(&self, id: Uuid) {
        let mut tables = self.tables.write().await;
        if let Some(user) = tables.users.get_mut(&id) {
            user.last_login = Some(Utc::now());
        }
    }

    async fn list_clients(&self, org: Uuid, filter: ClientFilter, window: Page) -> Vec<Client> {
        let tables = self.tables.read().await;
        let needle = filter.search.as_ref().map(|s| s.to_lowercase());
        let mut rows: Vec<Client> = tables
            .clients
            .values()
            .filter(|c| c.organization_id == org)
            .filter(|c| match &needle {
                Some(q) => {
                    c.first_name.to_lowercase().contains(q)
                        || c.last_name.to_lowercase().contains(q)
                        || c.client_number.to_lowercase().contains(q)
                        || c.email
                            .as_ref()
                            .map(|e| e.to_lowercase().contains(q))
                            .unwrap_or(false)
                }
                None => true,
            })
            .filter(|c| match &filter.status {
                Some(status) => &c.status == status,
                None => true,
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        page(rows, window)
    }

    async fn get_client(&self, org: Uuid, id: Uuid) -> Result<Client, StoreError> {
        let tables = self.tables.read().await;
        tables
            .clients
            .get(&id)
            .filter(|c| c.organization_id == org)
            .cloned()
            .ok_or_else(|| StoreError::NotFound("Client not found".to_string()))
    }

    async fn create_client(&self, org: Uuid, data: ClientCreate) -> Result<Client, StoreError> {
        let mut tables = self.tables.write().await;
        // Client number is unique within the organization, not globally
        if tables
            .clients
            .values()
            .any(|c| c.organization_id == org && c.client_number == data.client_number)
        {
            return Err(StoreError::Conflict(
                "Client number already exists in organization".to_string(),
            ));
        }
        let client = data.into_client(org);
        tables.clients.insert(client.id, client.clone());
        Ok(client)
    }

    async fn update_client(
        &self,
        org: Uuid,
        id: Uuid,
        data: ClientUpdate,
    ) -> Result<Client, StoreError> {
        let mut tables = self.tables.write().await;
        let client = tables
            .clients
            .get_mut(&id)
            .filter(|c| c.organization_id == org)
            .ok_or_else(|| StoreError::NotFound("Client not found".to_string()))?;
        data.apply(client);
        Ok(client.clone())
    }

    async fn retire_client(&self, org: Uuid, id: Uuid) -> Result<Client, StoreError> {
        let mut tables = self.tables.write().await;
        let client = tables
            .clients
            .get_mut(&id)
            .filter(|c| c.organization_id == org)
            .ok_or_else(|| StoreError::NotFound("Client not found".to_string()))?;
        client.status = "former".to_string();
        client.updated_at = Some(Utc::now());
        Ok(client.clone())
    }

    async fn list_goals(
        &self,
        org: Uuid,
        client_id: Uuid,
    ) -> Result<Vec<FinancialGoal>, StoreError> {
        let tables = self.tables.read().await;
        if !tables.client_in_org(org, client_id) {
            return Err(StoreError::NotFound("Client not found".to_string()));
        }
        let mut rows: Vec<FinancialGoal> = tables
            .goals
            .values()
            .filter(|g| g.client_id == client_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(rows)
    }

    async fn create_goal(
        &self,
        org: Uuid,
        client_id: Uuid,
        data: FinancialGoalCreate,
    ) -> Result<FinancialGoal, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.client_in_org(org, client_id) {
            return Err(StoreError::NotFound("Client not found".to_string()));
        }
        let goal = data.into_goal(client_id);
        tables.goals.insert(goal.id, goal.clone());
        Ok(goal)
    }

    async fn list_households(&self, org: Uuid, window: Page) -> Vec<Household> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Household> = tables
            .households
            .values()
            .filter(|h| h.organization_id == org)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        page(rows, window)
    }

    async fn get_household(&self, org: Uuid, id: Uuid) -> Result<Household, StoreError> {
        let tables = self.tables.read().await;
        tables
            .households
            .get(&id)
            .filter(|h| h.organization_id == org)
            .cloned()
            .ok_or_else(|| StoreError::NotFound("Household not found".to_string()))
    }

    async fn create_household(
        &self,
        org: Uuid,
        data: HouseholdCreate,
    ) -> Result<Household, StoreError> {
        let mut tables = self.tables.write().await;
        let household = data.into_household(org);
        tables.households.insert(household.id, household.clone());
        Ok(household)
    }

    async fn update_household(
        &self,
        org: Uuid,
        id: Uuid,
        data: HouseholdUpdate,
    ) -> Result<Household, StoreError> {
        let mut tables = self.tables.write().await;
        let household = tables
            .households
            .get_mut(&id)
            .filter(|h| h.organization_id == org)
            .ok_or_else(|| StoreError::NotFound("Household not found".to_string()))?;
        data.apply(household);
        Ok(household.clone())
    }

    async fn delete_household(&self, org: Uuid, id: Uuid) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let owned = tables
            .households
            .get(&id)
            .map(|h| h.organization_id == org)
            .unwrap_or(false);
        if !owned {
            return Err(StoreError::NotFound("Household not found".to_string()));
        }
        tables.households.remove(&id);
        Ok(())
    }

    async fn list_portfolios(
        &self,
        org: Uuid,
        client_id: Option<Uuid>,
        window: Page,
    ) -> Vec<Portfolio> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Portfolio> = tables
            .portfolios
            .values()
            .filter(|p| tables.client_in_org(org, p.client_id))
            .filter(|p| match client_id {
                Some(id) => p.client_id == id,
                None => true,
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        page(rows, window)
    }

    async fn get_portfolio(&self, org: Uuid, id: Uuid) -> Result<Portfolio, StoreError> {
        let tables = self.tables.read().await;
        tables
            .portfolio_in_org(org, id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound("Portfolio not found".to_string()))
    }

    async fn create_portfolio(
        &self,
        org: Uuid,
        data: PortfolioCreate,
    ) -> Result<Portfolio, StoreError> {
        let mut tables = self.tables.write().await;
        // Parent ownership first: a client from another organization reads
        // as absent, not forbidden
        if !tables.client_in_org(org, data.client_id) {
            return Err(StoreError::NotFound("Client not found".to_string()));
        }
        let portfolio = data.into_portfolio();
        tables.portfolios.insert(portfolio.id, portfolio.clone());
        Ok(portfolio)
    }

    async fn update_portfolio(
        &self,
        org: Uuid,
        id: Uuid,
        data: PortfolioUpdate,
    ) -> Result<Portfolio, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.portfolio_in_org(org, id).is_none() {
            return Err(StoreError::NotFound("Portfolio not found".to_string()));
        }
        let portfolio = tables
            .portfolios
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound("Portfolio not found".to_string()))?;
        data.apply(portfolio);
        Ok(portfolio.clone())
    }

    async fn deactivate_portfolio(&self, org: Uuid, id: Uuid) -> Result<Portfolio, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.portfolio_in_org(org, id).is_none() {
            return Err(StoreError::NotFound("Portfolio not found".to_string()));
        }
        let portfolio = tables
            .portfolios
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound("Portfolio not found".to_string()))?;
        portfolio.is_active = false;
        portfolio.updated_at = Some(Utc::now());
        Ok(portfolio.clone())
    }

    async fn list_holdings(
        &self,
        org: Uuid,
        portfolio_id: Uuid,
    ) -> Result<Vec<Holding>, StoreError> {
        let tables = self.tables.read().await;
        if tables.portfolio_in_org(org, portfolio_id).is_none() {
            return Err(StoreError::NotFound("Portfolio not found".to_string()));
        }
        let mut rows: Vec<Holding> = tables
            .holdings
            .values()
            .filter(|h| h.portfolio_id == portfolio_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(rows)
    }

    async fn create_holding(
        &self,
        org: Uuid,
        portfolio_id: Uuid,
        data: HoldingCreate,
    ) -> Result<Holding, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.portfolio_in_org(org, portfolio_id).is_none() {
            return Err(StoreError::NotFound("Portfolio not found".to_string()));
        }
        let holding = data.into_holding(portfolio_id);
        tables.holdings.insert(holding.id, holding.clone());
        Ok(holding)
    }

    async fn list_transactions(
        &self,
        org: Uuid,
        portfolio_id: Uuid,
    ) -> Result<Vec<PortfolioTransaction>, StoreError> {
        let tables = self.tables.read().await;
        if tables.portfolio_in_org(org, portfolio_id).is_none() {
            return Err(StoreError::NotFound("Portfolio not found".to_string()));
        }
        let mut rows: Vec<PortfolioTransaction> = tables
            .transactions
            .values()
            .filter(|t| t.portfolio_id == portfolio_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.trade_date.cmp(&b.trade_date).then(a.id.cmp(&b.id)));
        Ok(rows)
    }

    async fn create_transaction(
        &self,
        org: Uuid,
        portfolio_id: Uuid,
        data: PortfolioTransactionCreate,
    ) -> Result<PortfolioTransaction, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.portfolio_in_org(org, portfolio_id).is_none() {
            return Err(StoreError::NotFound("Portfolio not found".to_string()));
        }
        let transaction = data.into_transaction(portfolio_id);
        tables
            .transactions
            .insert(transaction.id, transaction.clone());
        Ok(transaction)
    }

    async fn list_scenarios(
        &self,
        org: Uuid,
        client_id: Option<Uuid>,
        window: Page,
    ) -> Vec<Scenario> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Scenario> = tables
            .scenarios
            .values()
            .filter(|s| tables.client_in_org(org, s.client_id))
            .filter(|s| match client_id {
                Some(id) => s.client_id == id,
                None => true,
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        page(rows, window)
    }

    async fn get_scenario(&self, org: Uuid, id: Uuid) -> Result<Scenario, StoreError> {
        let tables = self.tables.read().await;
        tables
            .scenarios
            .get(&id)
            .filter(|s| tables.client_in_org(org, s.client_id))
            .cloned()
            .ok_or_else(|| StoreError::NotFound("Scenario not found".to_string()))
    }

    async fn create_scenario(
        &self,
        org: Uuid,
        data: ScenarioCreate,
    ) -> Result<Scenario, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.client_in_org(org, data.client_id) {
            return Err(StoreError::NotFound("Client not found".to_string()));
        }
        let scenario = data.into_scenario();
        tables.scenarios.insert(scenario.id, scenario.clone());
        Ok(scenario)
    }

    async fn update_scenario(
        &self,
        org: Uuid,
        id: Uuid,
        data: ScenarioUpdate,
    ) -> Result<Scenario, StoreError> {
        let mut tables = self.tables.write().await;
        let owned = tables
            .scenarios
            .get(&id)
            .map(|s| tables.client_in_org(org, s.client_id))
            .unwrap_or(false);
        if !owned {
            return Err(StoreError::NotFound("Scenario not found".to_string()));
        }
        let scenario = tables
            .scenarios
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound("Scenario not found".to_string()))?;
        data.apply(scenario);
        Ok(scenario.clone())
    }

    async fn deactivate_scenario(&self, org: Uuid, id: Uuid) -> Result<Scenario, StoreError> {
        let mut tables = self.tables.write().await;
        let owned = tables
            .scenarios
            .get(&id)
            .map(|s| tables.client_in_org(org, s.client_id))
            .unwrap_or(false);
        if !owned {
            return Err(StoreError::NotFound("Scenario not found".to_string()));
        }
        let scenario = tables
            .scenarios
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound("Scenario not found".to_string()))?;
        scenario.is_active = false;
        scenario.updated_at = Some(Utc::now());
        Ok(scenario.clone())
    }
}
