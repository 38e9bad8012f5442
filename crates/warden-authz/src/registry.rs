//! Role registry with the built-in cloud roles.

use crate::{AuthzError, AuthzResult, Role};
use std::collections::BTreeMap;

/// Immutable lookup of roles by id.
#[derive(Debug, Clone, Default)]
pub struct RoleRegistry {
    roles: BTreeMap<String, Role>,
    order: Vec<String>,
}

impl RoleRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the Administrator, Developer and ReadOnly roles.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Self::admin_role());
        registry.register(Self::developer_role());
        registry.register(Self::readonly_role());
        registry
    }

    fn admin_role() -> Role {
        Role::new("admin", "Administrator", "Full access to all resources and actions")
            .with_actions("s3", &["read", "create", "upload", "delete"])
            .with_actions("dynamodb", &["read", "create", "update", "delete"])
            .with_actions("lambda", &["read", "create", "deploy", "delete", "logs"])
            .with_actions("apigateway", &["read", "create", "update", "delete"])
            .with_actions("cloudfront", &["read", "create", "invalidate", "delete"])
            .with_actions("route53", &["read", "create", "update", "delete"])
    }

    fn developer_role() -> Role {
        Role::new("developer", "Developer", "Development and deployment permissions")
            .with_actions("s3", &["read", "upload"])
            .with_actions("dynamodb", &["read", "create", "update"])
            .with_actions("lambda", &["read", "create", "deploy", "logs"])
            .with_actions("apigateway", &["read", "create", "update"])
            .with_actions("cloudfront", &["read"])
            .with_actions("route53", &["read"])
    }

    fn readonly_role() -> Role {
        Role::new("readonly", "ReadOnly", "Read-only access to resources")
            .with_actions("s3", &["read"])
            .with_actions("dynamodb", &["read"])
            .with_actions("lambda", &["read", "logs"])
            .with_actions("apigateway", &["read"])
            .with_actions("cloudfront", &["read"])
            .with_actions("route53", &["read"])
    }

    /// Add a role, replacing any role with the same id.
    pub fn register(&mut self, role: Role) {
        if !self.roles.contains_key(&role.id) {
            self.order.push(role.id.clone());
        }
        self.roles.insert(role.id.clone(), role);
    }

    pub fn get(&self, id: &str) -> Option<&Role> {
        self.roles.get(id)
    }

    /// Like [`RoleRegistry::get`] but reports unknown ids.
    pub fn require(&self, id: &str) -> AuthzResult<&Role> {
        self.get(id)
            .ok_or_else(|| AuthzError::UnknownRole(id.to_string()))
    }

    /// Roles in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Role> {
        self.order.iter().filter_map(|id| self.roles.get(id))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}
