//! Configuration types for Warden.
//!
//! This crate provides the configuration types used by Warden
//! for `.warden/config.yaml` files.

pub mod env;
pub mod loader;
pub mod types;

pub use env::*;
pub use loader::*;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_sensible_values() {
        let config = WardenConfig::default();

        assert_eq!(config.session.data_dir, ".warden");
        assert_eq!(config.session.state_file, "state.json");

        assert_eq!(config.guard.login_route, "/login");
        assert_eq!(config.guard.access_denied_route, "/access-denied");
        assert_eq!(config.guard.role_assumption_route, "/role-assumption");

        assert!(config.routes.is_empty());
        assert!(config.audit.log_decisions);
    }

    #[test]
    fn test_config_serializes_to_yaml() {
        let config = WardenConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();

        assert!(yaml.contains("session:"));
        assert!(yaml.contains("guard:"));
        assert!(yaml.contains("audit:"));
        assert!(yaml.contains("login_route: /login"));
    }

    #[test]
    fn test_partial_configs_merge_with_defaults() {
        let partial_yaml = r#"
guard:
  access_denied_route: /forbidden
routes:
  - path: /admin/reports
    permissions: ["read:reports"]
"#;

        let config: WardenConfig = serde_yaml::from_str(partial_yaml).unwrap();

        assert_eq!(config.guard.access_denied_route, "/forbidden");
        assert_eq!(config.guard.login_route, "/login");
        assert_eq!(config.routes.len(), 1);
        assert_eq!(config.routes[0].mode, MatchMode::Any);
        assert_eq!(config.session.state_file, "state.json");
    }

    #[test]
    fn test_match_mode_parses_lowercase() {
        let route: RouteConfig =
            serde_yaml::from_str("path: /admin/billing\npermissions: [\"read:billing\"]\nmode: all\n").unwrap();
        assert_eq!(route.mode, MatchMode::All);
        assert_eq!(serde_yaml::to_string(&MatchMode::Any).unwrap().trim(), "any");
    }
}
