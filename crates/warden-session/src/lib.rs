//! Persisted session state for Warden.
//!
//! The console keeps exactly two values between visits: the assumed role
//! (`activeRole`, a JSON-serialized [`Role`](warden_authz::Role)) and an opaque
//! auth token (`authToken`). [`StateStore`] abstracts where they live;
//! [`ActiveRoleStore`] gives them meaning.

pub mod active_role;
pub mod store;

pub use active_role::{ActiveRoleStore, ACTIVE_ROLE_KEY, AUTH_TOKEN_KEY};
pub use store::{FileStore, MemoryStore, StateStore};

/// Errors raised by state stores.
pub type StoreError = warden_common_core::Error;

/// Result type for state store operations.
pub type StoreResult<T> = warden_common_core::Result<T>;
