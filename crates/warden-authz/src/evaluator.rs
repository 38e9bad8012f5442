//! Permission evaluation against an assumed role.

use crate::Role;

/// Does `role` permit `action` on `resource`?
///
/// `None` (no assumed role) is always denied, and so is a resource missing
/// from the role's map. Never fails.
pub fn evaluate(role: Option<&Role>, resource: &str, action: &str) -> bool {
    role.map(|r| r.allows(resource, action)).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RoleRegistry;

    #[test]
    fn developer_scenario() {
        let registry = RoleRegistry::builtin();
        let developer = registry.get("developer");
        assert!(!evaluate(developer, "s3", "delete"));
        assert!(evaluate(developer, "s3", "upload"));
    }

    #[test]
    fn no_role_is_denied() {
        assert!(!evaluate(None, "s3", "read"));
        assert!(!evaluate(None, "", ""));
    }

    #[test]
    fn unknown_resource_is_denied() {
        let registry = RoleRegistry::builtin();
        assert!(!evaluate(registry.get("admin"), "ec2", "read"));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let registry = RoleRegistry::builtin();
        assert!(!evaluate(registry.get("admin"), "S3", "read"));
        assert!(!evaluate(registry.get("admin"), "s3", "Read"));
    }
}
