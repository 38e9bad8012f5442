//! Route guard: render, or redirect to login / access-denied.
//!
//! One synchronous check per navigation:
//!
//! ```text
//! no user ─────────────────────────────► Unauthenticated → redirect(login)
//! user, requirement met (any | all) ───► Authorized      → render
//! user, requirement not met ───────────► Unauthorized    → redirect(access denied)
//! ```

use crate::{AuthSession, AuthzResult, MatchMode, Permission};
use serde::Serialize;
use warden_common_config::{GuardConfig, RouteConfig};

/// Permissions a protected route needs, and how they combine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteRequirement {
    pub permissions: Vec<Permission>,
    pub mode: MatchMode,
}

impl RouteRequirement {
    /// Satisfied by any one of `permissions`.
    pub fn any(permissions: impl IntoIterator<Item = Permission>) -> Self {
        Self {
            permissions: permissions.into_iter().collect(),
            mode: MatchMode::Any,
        }
    }

    /// Satisfied only by all of `permissions`.
    pub fn all(permissions: impl IntoIterator<Item = Permission>) -> Self {
        Self {
            permissions: permissions.into_iter().collect(),
            mode: MatchMode::All,
        }
    }

    /// Build from configuration, parsing each token.
    pub fn from_config(route: &RouteConfig) -> AuthzResult<Self> {
        Ok(Self {
            permissions: Permission::parse_all(&route.permissions)?,
            mode: route.mode,
        })
    }

    /// Evaluate against the session's user.
    ///
    /// An empty list in `any` mode is never satisfied.
    pub fn is_met_by(&self, session: &AuthSession) -> bool {
        match self.mode {
            MatchMode::Any => session.has_any_permission(&self.permissions),
            MatchMode::All => session.has_all_permissions(&self.permissions),
        }
    }
}

/// Where a guarded navigation ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardState {
    Unauthenticated,
    Authorized,
    Unauthorized,
}

/// What the caller should do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum GuardDecision {
    Render,
    Redirect { to: String },
}

/// Guard with fixed redirect targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGuard {
    login_route: String,
    access_denied_route: String,
}

impl RouteGuard {
    pub fn new(login_route: impl Into<String>, access_denied_route: impl Into<String>) -> Self {
        Self {
            login_route: login_route.into(),
            access_denied_route: access_denied_route.into(),
        }
    }

    pub fn from_config(config: &GuardConfig) -> Self {
        Self::new(&config.login_route, &config.access_denied_route)
    }

    pub fn login_route(&self) -> &str {
        &self.login_route
    }

    pub fn access_denied_route(&self) -> &str {
        &self.access_denied_route
    }

    pub fn state(&self, session: &AuthSession, requirement: &RouteRequirement) -> GuardState {
        if !session.is_authenticated() {
            GuardState::Unauthenticated
        } else if requirement.is_met_by(session) {
            GuardState::Authorized
        } else {
            GuardState::Unauthorized
        }
    }

    pub fn decide(&self, state: GuardState) -> GuardDecision {
        match state {
            GuardState::Authorized => GuardDecision::Render,
            GuardState::Unauthenticated => GuardDecision::Redirect {
                to: self.login_route.clone(),
            },
            GuardState::Unauthorized => GuardDecision::Redirect {
                to: self.access_denied_route.clone(),
            },
        }
    }

    /// State and decision in one step.
    pub fn check(
        &self,
        session: &AuthSession,
        requirement: &RouteRequirement,
    ) -> (GuardState, GuardDecision) {
        let state = self.state(session, requirement);
        (state, self.decide(state))
    }
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::from_config(&GuardConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::User;

    fn perm(token: &str) -> Permission {
        Permission::parse(token).unwrap()
    }

    #[test]
    fn anonymous_goes_to_login() {
        let guard = RouteGuard::default();
        let (state, decision) = guard.check(
            &AuthSession::anonymous(),
            &RouteRequirement::any([perm("read:users")]),
        );
        assert_eq!(state, GuardState::Unauthenticated);
        assert_eq!(decision, GuardDecision::Redirect { to: "/login".to_string() });
    }

    #[test]
    fn missing_permission_goes_to_access_denied() {
        let guard = RouteGuard::default();
        let (state, decision) = guard.check(
            &AuthSession::mock(),
            &RouteRequirement::any([perm("read:sessions")]),
        );
        assert_eq!(state, GuardState::Unauthorized);
        assert_eq!(
            decision,
            GuardDecision::Redirect { to: "/access-denied".to_string() }
        );
    }

    #[test]
    fn all_mode_needs_every_permission() {
        let guard = RouteGuard::default();
        let user = User::new("2", "a@example.com", "A", "Billing").with_permission(perm("read:billing"));
        let session = AuthSession::new(Some(user));

        let any = RouteRequirement::any([perm("read:billing"), perm("manage:billing")]);
        let all = RouteRequirement::all([perm("read:billing"), perm("manage:billing")]);
        assert_eq!(guard.state(&session, &any), GuardState::Authorized);
        assert_eq!(guard.state(&session, &all), GuardState::Unauthorized);
    }

    #[test]
    fn empty_any_requirement_denies() {
        let guard = RouteGuard::default();
        let (state, _) = guard.check(&AuthSession::mock(), &RouteRequirement::any([]));
        assert_eq!(state, GuardState::Unauthorized);
    }

    #[test]
    fn configured_redirects() {
        let config = GuardConfig {
            login_route: "/signin".to_string(),
            access_denied_route: "/403".to_string(),
            ..GuardConfig::default()
        };
        let guard = RouteGuard::from_config(&config);
        assert_eq!(
            guard.decide(GuardState::Unauthenticated),
            GuardDecision::Redirect { to: "/signin".to_string() }
        );
        assert_eq!(
            guard.decide(GuardState::Unauthorized),
            GuardDecision::Redirect { to: "/403".to_string() }
        );
    }

    #[test]
    fn requirement_from_config() {
        let route = RouteConfig {
            path: "/admin/billing".to_string(),
            permissions: vec!["read:billing".to_string(), "manage:billing".to_string()],
            mode: MatchMode::All,
        };
        let req = RouteRequirement::from_config(&route).unwrap();
        assert_eq!(req.mode, MatchMode::All);
        assert_eq!(req.permissions[1], perm("manage:billing"));

        let bad = RouteConfig {
            permissions: vec!["billing".to_string()],
            ..route
        };
        assert!(RouteRequirement::from_config(&bad).is_err());
    }

    #[test]
    fn decision_json_shape() {
        let json = serde_json::to_value(GuardDecision::Redirect { to: "/login".to_string() }).unwrap();
        assert_eq!(json, serde_json::json!({"action": "redirect", "to": "/login"}));
        let json = serde_json::to_value(GuardDecision::Render).unwrap();
        assert_eq!(json, serde_json::json!({"action": "render"}));
    }
}
