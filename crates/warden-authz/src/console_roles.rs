//! Roles shown on the console's role-management page.
//!
//! These carry flat permission lists rather than the resource map used by
//! [`Role`](crate::Role). Membership is literal: the Super Admin `*` entry is
//! displayed as "All" but only ever matches the `*` token itself.

use crate::Permission;
use serde::Serialize;
use warden_common_core::Timestamp;

/// A role-management fixture entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleRole {
    pub id: String,
    pub name: String,
    pub description: String,
    pub permissions: Vec<Permission>,
    pub user_count: u32,
    pub created_at: Timestamp,
    pub is_system: bool,
}

impl ConsoleRole {
    pub fn grants(&self, permission: &Permission) -> bool {
        self.permissions.contains(permission)
    }

    pub fn has_opaque_all(&self) -> bool {
        self.permissions.iter().any(Permission::is_opaque_all)
    }

    /// "All" for the `*` entry, otherwise the number of permissions.
    pub fn permission_summary(&self) -> String {
        if self.has_opaque_all() {
            "All".to_string()
        } else {
            self.permissions.len().to_string()
        }
    }
}

const JAN_1: i64 = 1_704_067_200;
const JAN_2: i64 = 1_704_153_600;
const JAN_3: i64 = 1_704_240_000;

fn console_role(
    id: &str,
    name: &str,
    description: &str,
    grants: &[(&str, &str)],
    user_count: u32,
    created_at: i64,
    is_system: bool,
) -> ConsoleRole {
    ConsoleRole {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        permissions: grants
            .iter()
            .map(|(resource, action)| Permission::new(*resource, *action))
            .collect(),
        user_count,
        created_at: Timestamp::from_unix_secs(created_at),
        is_system,
    }
}

/// The five fixture roles in page order.
pub fn console_roles() -> Vec<ConsoleRole> {
    let mut super_admin = console_role(
        "1",
        "Super Admin",
        "Full system access with all administrative privileges",
        &[],
        2,
        JAN_1,
        true,
    );
    super_admin.permissions.push(Permission::opaque_all());

    vec![
        super_admin,
        console_role(
            "2",
            "Administrator",
            "Administrative access to most system features",
            &[
                ("users", "read"),
                ("users", "write"),
                ("users", "delete"),
                ("roles", "read"),
                ("roles", "write"),
                ("policies", "read"),
                ("policies", "write"),
                ("audit", "read"),
            ],
            5,
            JAN_1,
            true,
        ),
        console_role(
            "3",
            "Manager",
            "Team management and reporting capabilities",
            &[
                ("users", "read"),
                ("users", "write"),
                ("roles", "read"),
                ("policies", "read"),
                ("audit", "read"),
                ("reports", "read"),
            ],
            12,
            JAN_2,
            false,
        ),
        console_role(
            "4",
            "Developer",
            "Development team access to technical resources",
            &[
                ("api", "read"),
                ("api", "write"),
                ("keys", "read"),
                ("keys", "write"),
                ("logs", "read"),
            ],
            25,
            JAN_3,
            false,
        ),
        console_role(
            "5",
            "User",
            "Standard user access to basic features",
            &[("profile", "read"), ("profile", "write"), ("dashboard", "read")],
            1203,
            JAN_1,
            true,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_shape() {
        let roles = console_roles();
        let names: Vec<&str> = roles.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Super Admin", "Administrator", "Manager", "Developer", "User"]
        );
        let total: u32 = roles.iter().map(|r| r.user_count).sum();
        assert_eq!(total, 2 + 5 + 12 + 25 + 1203);
        assert_eq!(roles.iter().filter(|r| r.is_system).count(), 3);
        assert_eq!(roles[3].created_at.to_iso8601(), "2024-01-03T00:00:00+00:00");
    }

    #[test]
    fn star_is_not_expanded() {
        let super_admin = &console_roles()[0];
        assert_eq!(super_admin.permission_summary(), "All");
        assert!(super_admin.grants(&Permission::opaque_all()));
        assert!(!super_admin.grants(&Permission::new("users", "read")));
    }

    #[test]
    fn literal_membership() {
        let manager = &console_roles()[2];
        assert_eq!(manager.permission_summary(), "6");
        assert!(manager.grants(&Permission::new("reports", "read")));
        assert!(!manager.grants(&Permission::new("users", "delete")));
    }

    #[test]
    fn json_uses_camel_case() {
        let json = serde_json::to_value(&console_roles()[4]).unwrap();
        assert_eq!(json["userCount"], 1203);
        assert_eq!(json["isSystem"], true);
        assert_eq!(json["permissions"][2], "read:dashboard");
    }
}
