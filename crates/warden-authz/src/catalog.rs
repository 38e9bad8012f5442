//! Cloud resource cards and their role-gated actions.

use crate::{evaluate, AuthzError, AuthzResult, GuardDecision, Permission, Role};
use serde::Serialize;
use thiserror::Error;
use warden_common_config::GuardConfig;

/// Notice shown when an action is attempted without permission.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("you do not have permission to {action} (current role: {current_role})")]
pub struct AccessDenied {
    /// Human description of the refused action, e.g. `create S3 bucket`.
    pub action: String,
    /// Display name of the assumed role, or `None` when no role is assumed.
    pub current_role: String,
}

/// One labelled headline number on a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceStat {
    pub label: &'static str,
    pub value: &'static str,
}

/// A button on a resource card bound to one `(resource, action)` check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceAction {
    pub label: &'static str,
    pub permission: Permission,
    /// Used in the access-denied notice.
    pub denial: &'static str,
    /// Shown when the action goes ahead.
    pub progress: &'static str,
}

impl ResourceAction {
    fn new(
        label: &'static str,
        resource: &str,
        action: &str,
        denial: &'static str,
        progress: &'static str,
    ) -> Self {
        Self {
            label,
            permission: Permission::new(resource, action),
            denial,
            progress,
        }
    }

    pub fn is_enabled(&self, role: Option<&Role>) -> bool {
        evaluate(role, self.permission.resource(), self.permission.action())
    }

    /// Run the action for `role`, or explain why it is refused.
    pub fn attempt(&self, role: Option<&Role>) -> Result<&'static str, AccessDenied> {
        if self.is_enabled(role) {
            tracing::debug!(action = self.label, permission = %self.permission, "resource action allowed");
            return Ok(self.progress);
        }
        Err(AccessDenied {
            action: self.denial.to_string(),
            current_role: role.map(|r| r.name.clone()).unwrap_or_else(|| "None".to_string()),
        })
    }
}

/// Resolved view of an action for a given role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionState {
    pub label: &'static str,
    pub permission: Permission,
    pub enabled: bool,
}

/// A cloud service card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceCard {
    pub title: &'static str,
    pub resource: &'static str,
    pub description: &'static str,
    pub actions: Vec<ResourceAction>,
    pub stats: Vec<ResourceStat>,
}

impl ResourceCard {
    pub fn action(&self, label: &str) -> Option<&ResourceAction> {
        self.actions
            .iter()
            .find(|a| a.label.eq_ignore_ascii_case(label))
    }

    pub fn action_states(&self, role: Option<&Role>) -> Vec<ActionState> {
        self.actions
            .iter()
            .map(|a| ActionState {
                label: a.label,
                permission: a.permission.clone(),
                enabled: a.is_enabled(role),
            })
            .collect()
    }
}

fn stats(pairs: [(&'static str, &'static str); 2]) -> Vec<ResourceStat> {
    pairs
        .into_iter()
        .map(|(label, value)| ResourceStat { label, value })
        .collect()
}

/// The six service cards, in page order.
pub fn cloud_resources() -> Vec<ResourceCard> {
    vec![
        ResourceCard {
            title: "S3 Buckets",
            resource: "s3",
            description: "Object storage for your applications",
            actions: vec![
                ResourceAction::new("Create Bucket", "s3", "create", "create S3 bucket", "Creating bucket..."),
                ResourceAction::new("Upload File", "s3", "upload", "upload to S3", "Uploading file..."),
                ResourceAction::new("Delete Files", "s3", "delete", "delete S3 files", "Deleting files..."),
            ],
            stats: stats([("Buckets", "12"), ("Objects", "1.2K")]),
        },
        ResourceCard {
            title: "DynamoDB",
            resource: "dynamodb",
            description: "NoSQL database service",
            actions: vec![
                ResourceAction::new("Create Table", "dynamodb", "create", "create DynamoDB table", "Creating table..."),
                ResourceAction::new("Insert Data", "dynamodb", "update", "insert data into DynamoDB", "Inserting data..."),
                ResourceAction::new("Delete Table", "dynamodb", "delete", "delete DynamoDB table", "Deleting table..."),
            ],
            stats: stats([("Tables", "8"), ("Items", "45K")]),
        },
        ResourceCard {
            title: "Lambda",
            resource: "lambda",
            description: "Serverless compute service",
            actions: vec![
                ResourceAction::new("Deploy Function", "lambda", "deploy", "deploy Lambda function", "Deploying function..."),
                ResourceAction::new("View Logs", "lambda", "logs", "view Lambda logs", "Opening logs..."),
                ResourceAction::new("Delete Function", "lambda", "delete", "delete Lambda function", "Deleting function..."),
            ],
            stats: stats([("Functions", "24"), ("Invocations", "1.8M")]),
        },
        ResourceCard {
            title: "API Gateway",
            resource: "apigateway",
            description: "Create and manage APIs",
            actions: vec![
                ResourceAction::new("Create API", "apigateway", "create", "create API Gateway", "Creating API..."),
                ResourceAction::new("Update Routes", "apigateway", "update", "update API routes", "Updating routes..."),
                ResourceAction::new("Delete API", "apigateway", "delete", "delete API", "Deleting API..."),
            ],
            stats: stats([("APIs", "6"), ("Requests", "850K")]),
        },
        ResourceCard {
            title: "CloudFront",
            resource: "cloudfront",
            description: "Content delivery network",
            actions: vec![
                ResourceAction::new("Create Distribution", "cloudfront", "create", "create CloudFront distribution", "Creating distribution..."),
                ResourceAction::new("Invalidate Cache", "cloudfront", "invalidate", "invalidate CloudFront cache", "Invalidating cache..."),
                ResourceAction::new("Delete Distribution", "cloudfront", "delete", "delete CloudFront distribution", "Deleting distribution..."),
            ],
            stats: stats([("Distributions", "4"), ("Edge Locations", "216")]),
        },
        ResourceCard {
            title: "Route 53",
            resource: "route53",
            description: "DNS web service",
            actions: vec![
                ResourceAction::new("Create Hosted Zone", "route53", "create", "create Route 53 hosted zone", "Creating hosted zone..."),
                ResourceAction::new("Edit DNS Records", "route53", "update", "edit DNS records", "Editing DNS records..."),
                ResourceAction::new("Delete Zone", "route53", "delete", "delete hosted zone", "Deleting hosted zone..."),
            ],
            stats: stats([("Hosted Zones", "3"), ("DNS Queries", "2.1M")]),
        },
    ]
}

/// Look up a card action by service key and button label.
///
/// # Errors
/// - [`AuthzError::UnknownAction`] when the service or label does not exist.
pub fn find_action<'a>(
    cards: &'a [ResourceCard],
    resource: &str,
    label: &str,
) -> AuthzResult<&'a ResourceAction> {
    cards
        .iter()
        .find(|card| card.resource == resource)
        .and_then(|card| card.action(label))
        .ok_or_else(|| AuthzError::UnknownAction {
            resource: resource.to_string(),
            action: label.to_string(),
        })
}

/// Resource pages need an assumed role; without one, send the visitor to
/// role assumption.
pub fn require_active_role<'a>(
    role: Option<&'a Role>,
    guard: &GuardConfig,
) -> Result<&'a Role, GuardDecision> {
    role.ok_or_else(|| GuardDecision::Redirect {
        to: guard.role_assumption_route.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RoleRegistry;

    #[test]
    fn six_cards_with_three_actions_each() {
        let cards = cloud_resources();
        assert_eq!(cards.len(), 6);
        for card in &cards {
            assert_eq!(card.actions.len(), 3, "{}", card.title);
            assert_eq!(card.stats.len(), 2, "{}", card.title);
            for action in &card.actions {
                assert_eq!(action.permission.resource(), card.resource);
            }
        }
    }

    #[test]
    fn developer_states_on_s3() {
        let registry = RoleRegistry::builtin();
        let s3 = &cloud_resources()[0];
        let enabled: Vec<bool> = s3
            .action_states(registry.get("developer"))
            .iter()
            .map(|s| s.enabled)
            .collect();
        assert_eq!(enabled, vec![false, true, false]);
    }

    #[test]
    fn attempt_reports_denial_with_role_name() {
        let registry = RoleRegistry::builtin();
        let route53 = &cloud_resources()[5];
        let edit = route53.action("edit dns records").unwrap();

        assert_eq!(edit.attempt(registry.get("admin")), Ok("Editing DNS records..."));

        let denied = edit.attempt(registry.get("readonly")).unwrap_err();
        assert_eq!(denied.action, "edit DNS records");
        assert_eq!(denied.current_role, "ReadOnly");
        assert_eq!(
            denied.to_string(),
            "you do not have permission to edit DNS records (current role: ReadOnly)"
        );
    }

    #[test]
    fn find_action_by_label() {
        let cards = cloud_resources();
        let logs = find_action(&cards, "lambda", "View Logs").unwrap();
        assert_eq!(logs.permission, Permission::new("lambda", "logs"));

        assert!(matches!(
            find_action(&cards, "lambda", "Format Disk"),
            Err(AuthzError::UnknownAction { .. })
        ));
        assert!(find_action(&cards, "ec2", "View Logs").is_err());
    }

    #[test]
    fn no_role_disables_everything() {
        for card in cloud_resources() {
            assert!(card.action_states(None).iter().all(|s| !s.enabled));
        }
    }

    #[test]
    fn missing_role_redirects_to_role_assumption() {
        let guard = GuardConfig::default();
        assert_eq!(
            require_active_role(None, &guard),
            Err(GuardDecision::Redirect { to: "/role-assumption".to_string() })
        );
        let registry = RoleRegistry::builtin();
        let role = require_active_role(registry.get("admin"), &guard).unwrap();
        assert_eq!(role.id, "admin");
    }
}
