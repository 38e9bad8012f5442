//! Console users and their flat permission tokens.

use crate::Permission;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A console user as held by the auth session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    /// Display label of the user's role, e.g. `Administrator`.
    #[serde(rename = "role")]
    pub role_label: String,
    pub permissions: BTreeSet<Permission>,
}

impl User {
    pub fn new(
        id: impl Into<String>,
        email: impl Into<String>,
        name: impl Into<String>,
        role_label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: name.into(),
            role_label: role_label.into(),
            permissions: BTreeSet::new(),
        }
    }

    pub fn with_permission(mut self, permission: Permission) -> Self {
        self.permissions.insert(permission);
        self
    }

    pub fn with_permissions(mut self, permissions: impl IntoIterator<Item = Permission>) -> Self {
        self.permissions.extend(permissions);
        self
    }

    /// Literal membership; `*` is not expanded.
    pub fn holds(&self, permission: &Permission) -> bool {
        self.permissions.contains(permission)
    }

    /// The signed-in administrator the console starts with.
    pub fn mock_admin() -> Self {
        let grants = [
            ("projects", "read"),
            ("projects", "write"),
            ("audit-logs", "read"),
            ("billing", "read"),
            ("billing", "manage"),
            ("users", "read"),
            ("users", "write"),
            ("roles", "read"),
            ("roles", "write"),
        ];
        Self::new("1", "admin@example.com", "Admin User", "Administrator").with_permissions(
            grants
                .iter()
                .map(|(resource, action)| Permission::new(*resource, *action)),
        )
    }
}
