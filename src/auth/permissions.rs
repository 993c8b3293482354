//! Role to permission-string catalog.
//!
//! The catalog is a closed, immutable table initialized once at process
//! start. Roles are data: adding a role means adding an entry here, nothing
//! in the authorization guard changes. The `admin` role bypasses the catalog
//! entirely and holds every permission implicitly.

use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const ADMIN_PERMISSIONS: &[&str] = &[
    "clients:view",
    "clients:create",
    "clients:edit",
    "clients:delete",
    "portfolios:view",
    "portfolios:create",
    "portfolios:edit",
    "portfolios:delete",
    "planning:view",
    "planning:create",
    "planning:edit",
    "reports:view",
    "reports:create",
    "reports:export",
    "compliance:view",
    "compliance:manage",
    "compliance:audit",
    "org:settings",
    "org:users",
    "org:billing",
];

pub const ADVISER_PERMISSIONS: &[&str] = &[
    "clients:view",
    "clients:create",
    "clients:edit",
    "portfolios:view",
    "portfolios:create",
    "portfolios:edit",
    "planning:view",
    "planning:create",
    "planning:edit",
    "reports:view",
    "reports:create",
    "reports:export",
    "compliance:view",
];

pub const PARAPLANNER_PERMISSIONS: &[&str] = &[
    "clients:view",
    "portfolios:view",
    "planning:view",
    "planning:create",
    "planning:edit",
    "reports:view",
    "reports:create",
];

static CATALOG: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    let mut catalog: HashMap<&'static str, &'static [&'static str]> = HashMap::new();
    catalog.insert("admin", ADMIN_PERMISSIONS);
    catalog.insert("adviser", ADVISER_PERMISSIONS);
    catalog.insert("paraplanner", PARAPLANNER_PERMISSIONS);
    catalog
});

/// Permissions granted by a role. Unknown roles grant nothing; whatever a
/// user can do then comes only from their explicit permission overrides.
pub fn permissions_for_role(role: &str) -> &'static [&'static str] {
    CATALOG.get(role).copied().unwrap_or(&[])
}
