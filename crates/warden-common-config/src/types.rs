//! Configuration types.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WardenConfig {
    /// Persisted session state.
    pub session: SessionConfig,
    /// Route guard redirect targets.
    pub guard: GuardConfig,
    /// Extra or overriding route requirements.
    pub routes: Vec<RouteConfig>,
    /// Authorization audit settings.
    pub audit: AuditConfig,
}

/// Where the active role and auth token are kept between invocations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Directory holding the state file, relative to the project directory.
    pub data_dir: String,
    /// State file name inside `data_dir`.
    pub state_file: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            data_dir: ".warden".to_string(),
            state_file: "state.json".to_string(),
        }
    }
}

/// Fixed redirect targets used by the route guard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Where unauthenticated visitors are sent.
    pub login_route: String,
    /// Where authenticated but unauthorized visitors are sent.
    pub access_denied_route: String,
    /// Where resource pages send visitors without an active role.
    pub role_assumption_route: String,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            login_route: "/login".to_string(),
            access_denied_route: "/access-denied".to_string(),
            role_assumption_route: "/role-assumption".to_string(),
        }
    }
}

/// How a list of required permissions is combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// At least one permission must be held.
    #[default]
    Any,
    /// Every permission must be held.
    All,
}

/// A protected route declared in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Route path, e.g. `/admin/users`.
    pub path: String,
    /// Permission tokens in `verb:resource` form.
    pub permissions: Vec<String>,
    /// Combination mode for `permissions`.
    #[serde(default)]
    pub mode: MatchMode,
}

/// Authorization audit configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Emit an audit event for every evaluated decision.
    pub log_decisions: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            log_decisions: true,
        }
    }
}
