//! The auth session: who is signed in, and what they hold.

use crate::{Permission, User};
use tracing::debug;

/// Explicit holder of the current console user.
///
/// Replaces a process-wide context; callers create one per invocation and
/// pass it wherever checks are made.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthSession {
    user: Option<User>,
}

impl AuthSession {
    pub fn new(user: Option<User>) -> Self {
        Self { user }
    }

    /// A session with nobody signed in.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Session for [`User::mock_admin`].
    pub fn mock() -> Self {
        Self::new(Some(User::mock_admin()))
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn set_user(&mut self, user: Option<User>) {
        debug!(user = ?user.as_ref().map(|u| u.id.as_str()), "session user changed");
        self.user = user;
    }

    pub fn sign_out(&mut self) {
        self.set_user(None);
    }

    /// True iff a user is signed in and holds `permission`.
    pub fn has_permission(&self, permission: &Permission) -> bool {
        self.user
            .as_ref()
            .map(|u| u.holds(permission))
            .unwrap_or(false)
    }

    /// True iff at least one of `permissions` is held. Empty input is `false`.
    pub fn has_any_permission(&self, permissions: &[Permission]) -> bool {
        permissions.iter().any(|p| self.has_permission(p))
    }

    /// True iff every one of `permissions` is held. Empty input is `true`.
    pub fn has_all_permissions(&self, permissions: &[Permission]) -> bool {
        permissions.iter().all(|p| self.has_permission(p))
    }
}
