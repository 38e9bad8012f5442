//! The assumed-role holder.

use crate::{StateStore, StoreResult};
use tracing::{debug, info, warn};
use warden_authz::Role;

/// Key holding the JSON-serialized assumed role.
pub const ACTIVE_ROLE_KEY: &str = "activeRole";

/// Key holding the opaque auth token. Only logout touches it.
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// Reads and writes the assumed role through a [`StateStore`].
#[derive(Debug, Clone, Default)]
pub struct ActiveRoleStore<S> {
    store: S,
}

impl<S: StateStore> ActiveRoleStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The assumed role, if any.
    ///
    /// A stored value that does not decode as a role is treated as absent.
    /// Store failures are returned.
    pub fn load(&self) -> StoreResult<Option<Role>> {
        let Some(raw) = self.store.get(ACTIVE_ROLE_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str::<Role>(&raw) {
            Ok(role) => {
                debug!(role = %role.id, "active role loaded");
                Ok(Some(role))
            }
            Err(e) => {
                warn!(error = %e, "ignoring malformed stored role");
                Ok(None)
            }
        }
    }

    /// Persist `role` as the assumed role, replacing any previous one.
    pub fn store(&mut self, role: &Role) -> StoreResult<()> {
        let json = serde_json::to_string(role)?;
        self.store.set(ACTIVE_ROLE_KEY, &json)?;
        info!(role = %role.id, "role assumed");
        Ok(())
    }

    pub fn clear(&mut self) -> StoreResult<()> {
        self.store.remove(ACTIVE_ROLE_KEY)
    }

    pub fn auth_token(&self) -> StoreResult<Option<String>> {
        self.store.get(AUTH_TOKEN_KEY)
    }

    /// Drop the assumed role and the auth token.
    pub fn logout(&mut self) -> StoreResult<()> {
        self.clear()?;
        self.store.remove(AUTH_TOKEN_KEY)?;
        info!("logged out");
        Ok(())
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use warden_authz::RoleRegistry;

    fn holder() -> ActiveRoleStore<MemoryStore> {
        ActiveRoleStore::new(MemoryStore::new())
    }

    #[test]
    fn empty_store_has_no_role() {
        assert!(holder().load().unwrap().is_none());
    }

    #[test]
    fn store_then_load_is_deep_equal() {
        let registry = RoleRegistry::builtin();
        let mut holder = holder();
        for role in registry.iter() {
            holder.store(role).unwrap();
            assert_eq!(holder.load().unwrap().as_ref(), Some(role));
        }
    }

    #[test]
    fn switching_roles_replaces() {
        let registry = RoleRegistry::builtin();
        let mut holder = holder();
        holder.store(registry.get("admin").unwrap()).unwrap();
        holder.store(registry.get("readonly").unwrap()).unwrap();
        assert_eq!(holder.load().unwrap().unwrap().id, "readonly");
        assert_eq!(holder.inner().len(), 1);
    }

    #[test]
    fn malformed_value_degrades_to_none() {
        let mut holder = holder();
        holder
            .inner_mut()
            .set(ACTIVE_ROLE_KEY, r#"{"id": "admin"}"#)
            .unwrap();
        assert!(holder.load().unwrap().is_none());

        holder.inner_mut().set(ACTIVE_ROLE_KEY, "not json").unwrap();
        assert!(holder.load().unwrap().is_none());
    }

    #[test]
    fn clear_keeps_token_but_logout_removes_it() {
        let registry = RoleRegistry::builtin();
        let mut holder = holder();
        holder.inner_mut().set(AUTH_TOKEN_KEY, "token-123").unwrap();
        holder.store(registry.get("developer").unwrap()).unwrap();

        holder.clear().unwrap();
        assert!(holder.load().unwrap().is_none());
        assert_eq!(holder.auth_token().unwrap().as_deref(), Some("token-123"));

        holder.store(registry.get("developer").unwrap()).unwrap();
        holder.logout().unwrap();
        assert!(holder.load().unwrap().is_none());
        assert!(holder.auth_token().unwrap().is_none());
        assert!(holder.inner().is_empty());
    }
}
