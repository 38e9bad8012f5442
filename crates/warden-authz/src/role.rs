//! Cloud roles: named bundles of resource to allowed-action mappings.

use crate::Permission;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A role that can be assumed for the cloud resource pages.
///
/// Serializes to the stored layout
/// `{"id", "name", "description", "permissions": {"s3": ["read", ...]}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    pub name: String,
    pub description: String,
    pub permissions: BTreeMap<String, BTreeSet<String>>,
}

impl Role {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            permissions: BTreeMap::new(),
        }
    }

    /// Grant `actions` on `resource`, merging with any existing grant.
    pub fn with_actions(mut self, resource: &str, actions: &[&str]) -> Self {
        self.permissions
            .entry(resource.to_string())
            .or_default()
            .extend(actions.iter().map(|a| a.to_string()));
        self
    }

    /// True iff the role lists `action` for `resource`.
    pub fn allows(&self, resource: &str, action: &str) -> bool {
        self.permissions
            .get(resource)
            .map(|actions| actions.contains(action))
            .unwrap_or(false)
    }

    /// Same check as [`Role::allows`], phrased over a [`Permission`].
    pub fn grants(&self, permission: &Permission) -> bool {
        self.allows(permission.resource(), permission.action())
    }

    /// Flatten the resource map into permissions, sorted by resource.
    pub fn permissions(&self) -> impl Iterator<Item = Permission> + '_ {
        self.permissions.iter().flat_map(|(resource, actions)| {
            actions
                .iter()
                .map(move |action| Permission::new(resource.as_str(), action.as_str()))
        })
    }

    /// Resources this role has any grant on.
    pub fn resources(&self) -> impl Iterator<Item = &str> {
        self.permissions.keys().map(String::as_str)
    }

    /// Number of services the role touches.
    pub fn service_count(&self) -> usize {
        self.permissions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn developer() -> Role {
        Role::new("developer", "Developer", "Development and deployment permissions")
            .with_actions("s3", &["read", "upload"])
            .with_actions("lambda", &["read", "deploy"])
    }

    #[test]
    fn allows_listed_actions_only() {
        let role = developer();
        assert!(role.allows("s3", "upload"));
        assert!(!role.allows("s3", "delete"));
        assert!(!role.allows("route53", "read"));
    }

    #[test]
    fn with_actions_merges() {
        let role = developer().with_actions("s3", &["delete"]);
        assert_eq!(role.permissions["s3"].len(), 3);
    }

    #[test]
    fn flattened_permissions() {
        let tokens: Vec<String> = developer().permissions().map(|p| p.to_string()).collect();
        assert_eq!(
            tokens,
            vec!["deploy:lambda", "read:lambda", "read:s3", "upload:s3"]
        );
        assert!(developer().grants(&Permission::new("lambda", "deploy")));
        assert_eq!(developer().service_count(), 2);
    }

    #[test]
    fn json_layout_matches_stored_shape() {
        let json = serde_json::to_value(developer()).unwrap();
        assert_eq!(json["id"], "developer");
        assert_eq!(json["permissions"]["s3"], serde_json::json!(["read", "upload"]));

        let parsed: Role = serde_json::from_value(serde_json::json!({
            "id": "developer",
            "name": "Developer",
            "description": "Development and deployment permissions",
            "permissions": {"lambda": ["deploy", "read"], "s3": ["upload", "read"]}
        }))
        .unwrap();
        assert_eq!(parsed, developer());
    }
}
