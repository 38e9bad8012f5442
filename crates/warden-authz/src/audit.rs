//! Authorization audit logging.

use crate::{AuthSession, GuardState, Role};
use serde::Serialize;
use tracing::info;
use warden_common_core::Timestamp;

/// Who a decision was made for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Subject {
    /// An assumed cloud role, by id.
    Role(String),
    /// A signed-in console user, by id.
    User(String),
    Anonymous,
}

impl Subject {
    pub fn for_role(role: Option<&Role>) -> Self {
        role.map(|r| Self::Role(r.id.clone()))
            .unwrap_or(Self::Anonymous)
    }

    pub fn for_session(session: &AuthSession) -> Self {
        session
            .user()
            .map(|u| Self::User(u.id.clone()))
            .unwrap_or(Self::Anonymous)
    }

    fn label(&self) -> String {
        match self {
            Self::Role(id) => format!("role:{id}"),
            Self::User(id) => format!("user:{id}"),
            Self::Anonymous => "anonymous".to_string(),
        }
    }
}

/// Authorization audit event.
#[derive(Debug, Clone, Serialize)]
pub struct AuthzAuditEvent {
    pub timestamp: Timestamp,
    pub subject: Subject,
    pub action: String,
    pub resource: String,
    pub granted: bool,
    pub reason: Option<String>,
}

impl AuthzAuditEvent {
    pub fn new(
        subject: Subject,
        resource: impl Into<String>,
        action: impl Into<String>,
        granted: bool,
        reason: Option<String>,
    ) -> Self {
        Self {
            timestamp: Timestamp::now(),
            subject,
            action: action.into(),
            resource: resource.into(),
            granted,
            reason,
        }
    }

    pub fn log(&self) {
        if self.granted {
            info!(
                event = "authz_granted",
                subject = %self.subject.label(),
                action = %self.action,
                resource = %self.resource,
                "Authorization granted"
            );
        } else {
            info!(
                event = "authz_denied",
                subject = %self.subject.label(),
                action = %self.action,
                resource = %self.resource,
                reason = ?self.reason,
                "Authorization denied"
            );
        }
    }
}

/// Records decisions when auditing is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Auditor {
    enabled: bool,
}

impl Auditor {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn disabled() -> Self {
        Self::new(false)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record an evaluator decision for an assumed role.
    pub fn evaluation(
        &self,
        role: Option<&Role>,
        resource: &str,
        action: &str,
        granted: bool,
    ) -> Option<AuthzAuditEvent> {
        let reason = match (granted, role) {
            (true, _) => None,
            (false, None) => Some("no active role".to_string()),
            (false, Some(r)) if !r.permissions.contains_key(resource) => {
                Some(format!("no permissions for resource {resource}"))
            }
            (false, Some(_)) => Some(format!("action {action} not granted")),
        };
        self.emit(AuthzAuditEvent::new(
            Subject::for_role(role),
            resource,
            action,
            granted,
            reason,
        ))
    }

    /// Record a route guard outcome.
    pub fn route(
        &self,
        session: &AuthSession,
        path: &str,
        state: GuardState,
    ) -> Option<AuthzAuditEvent> {
        let reason = match state {
            GuardState::Authorized => None,
            GuardState::Unauthenticated => Some("not signed in".to_string()),
            GuardState::Unauthorized => Some("missing required permissions".to_string()),
        };
        self.emit(AuthzAuditEvent::new(
            Subject::for_session(session),
            path,
            "visit",
            state == GuardState::Authorized,
            reason,
        ))
    }

    fn emit(&self, event: AuthzAuditEvent) -> Option<AuthzAuditEvent> {
        if !self.enabled {
            return None;
        }
        event.log();
        Some(event)
    }
}

impl Default for Auditor {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RoleRegistry;

    #[test]
    fn denial_reasons() {
        let registry = RoleRegistry::builtin();
        let auditor = Auditor::default();

        let event = auditor.evaluation(None, "s3", "read", false).unwrap();
        assert_eq!(event.subject, Subject::Anonymous);
        assert_eq!(event.reason.as_deref(), Some("no active role"));

        let developer = registry.get("developer");
        let event = auditor.evaluation(developer, "s3", "delete", false).unwrap();
        assert_eq!(event.subject, Subject::Role("developer".to_string()));
        assert_eq!(event.reason.as_deref(), Some("action delete not granted"));

        let event = auditor.evaluation(developer, "ec2", "read", false).unwrap();
        assert_eq!(event.reason.as_deref(), Some("no permissions for resource ec2"));

        let event = auditor.evaluation(developer, "s3", "upload", true).unwrap();
        assert!(event.granted);
        assert!(event.reason.is_none());
    }

    #[test]
    fn disabled_auditor_records_nothing() {
        let auditor = Auditor::disabled();
        assert!(auditor.evaluation(None, "s3", "read", false).is_none());
        assert!(auditor
            .route(&AuthSession::anonymous(), "/admin/users", GuardState::Unauthenticated)
            .is_none());
    }

    #[test]
    fn route_event_uses_user_subject() {
        let event = Auditor::default()
            .route(&AuthSession::mock(), "/admin/users", GuardState::Authorized)
            .unwrap();
        assert_eq!(event.subject, Subject::User("1".to_string()));
        assert_eq!(event.resource, "/admin/users");
        assert!(event.granted);
    }

    #[test]
    fn subject_json() {
        let json = serde_json::to_value(Subject::Role("admin".to_string())).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "role", "id": "admin"}));
    }
}
