//! Admin console route table and sidebar navigation.

use crate::{AuthSession, AuthzResult, Permission, RouteRequirement};
use serde::Serialize;
use std::collections::BTreeMap;
use warden_common_config::RouteConfig;

/// Protected routes keyed by path. Paths not in the table are public.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: BTreeMap<String, RouteRequirement>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The admin console's protected routes.
    pub fn console() -> Self {
        let mut table = Self::new();
        for (path, resource) in [
            ("/admin/users", "users"),
            ("/admin/roles", "roles"),
            ("/admin/policies", "policies"),
            ("/admin/projects", "projects"),
            ("/admin/audit-logs", "audit-logs"),
            ("/admin/sessions", "sessions"),
            ("/admin/api-keys", "api-keys"),
        ] {
            table.protect(path, RouteRequirement::any([Permission::new(resource, "read")]));
        }
        table.protect(
            "/admin/billing",
            RouteRequirement::any([
                Permission::new("billing", "read"),
                Permission::new("billing", "manage"),
            ]),
        );
        table
    }

    /// Console routes with configured entries added or replacing defaults.
    pub fn with_overrides(mut self, routes: &[RouteConfig]) -> AuthzResult<Self> {
        for route in routes {
            let requirement = RouteRequirement::from_config(route)?;
            tracing::debug!(path = %route.path, mode = ?route.mode, "route requirement configured");
            self.protect(&route.path, requirement);
        }
        Ok(self)
    }

    pub fn protect(&mut self, path: impl Into<String>, requirement: RouteRequirement) {
        let path: String = path.into();
        self.routes.insert(normalize(&path), requirement);
    }

    /// Requirement for `path`, or `None` when the route is public.
    pub fn requirement_for(&self, path: &str) -> Option<&RouteRequirement> {
        self.routes.get(&normalize(path))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RouteRequirement)> {
        self.routes.iter().map(|(p, r)| (p.as_str(), r))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn normalize(path: &str) -> String {
    let trimmed = path.trim();
    match trimmed.trim_end_matches('/') {
        "" => "/".to_string(),
        p => p.to_string(),
    }
}

/// One sidebar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
    pub permissions: Vec<Permission>,
}

impl NavItem {
    fn new(label: &'static str, path: &'static str, permissions: Vec<Permission>) -> Self {
        Self {
            label,
            path,
            permissions,
        }
    }

    /// Entries without requirements are always visible; the rest need any one.
    pub fn is_visible_to(&self, session: &AuthSession) -> bool {
        self.permissions.is_empty() || session.has_any_permission(&self.permissions)
    }
}

/// Sidebar entries in display order.
pub fn navigation() -> Vec<NavItem> {
    let read = |resource: &str| vec![Permission::new(resource, "read")];
    vec![
        NavItem::new("Overview", "/admin", Vec::new()),
        NavItem::new("Users", "/admin/users", read("users")),
        NavItem::new("Roles", "/admin/roles", read("roles")),
        NavItem::new("Policies", "/admin/policies", read("policies")),
        NavItem::new("Projects", "/admin/projects", read("projects")),
        NavItem::new("Audit Logs", "/admin/audit-logs", read("audit-logs")),
        NavItem::new("Sessions", "/admin/sessions", read("sessions")),
        NavItem::new("API Keys", "/admin/api-keys", read("api-keys")),
        NavItem::new("Billing", "/admin/billing", read("billing")),
    ]
}

/// Sidebar entries the session may see.
pub fn visible_navigation(session: &AuthSession) -> Vec<NavItem> {
    navigation()
        .into_iter()
        .filter(|item| item.is_visible_to(session))
        .collect()
}
