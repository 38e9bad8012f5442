//! Role-based permission model for the Warden console.
//!
//! Two permission shapes meet here. Cloud roles map a resource to a set of
//! allowed actions (`{"s3": ["read", "upload"]}`), while console users carry
//! flat `verb:resource` tokens (`read:users`). Both are expressed through the
//! single [`Permission`] value type.
//!
//! Every check in this crate is a pure lookup: a missing role, user, resource
//! or token yields `false`, never an error.
//!
//! ```rust
//! use warden_authz::{evaluate, RoleRegistry};
//!
//! let registry = RoleRegistry::builtin();
//! let developer = registry.get("developer");
//! assert!(evaluate(developer, "s3", "upload"));
//! assert!(!evaluate(developer, "s3", "delete"));
//! assert!(!evaluate(None, "s3", "read"));
//! ```

pub mod audit;
pub mod catalog;
pub mod console_roles;
pub mod error;
pub mod evaluator;
pub mod guard;
pub mod permission;
pub mod registry;
pub mod role;
pub mod routes;
pub mod session;
pub mod user;

pub use audit::{AuthzAuditEvent, Auditor, Subject};
pub use catalog::{
    cloud_resources, find_action, require_active_role, AccessDenied, ActionState, ResourceAction,
    ResourceCard, ResourceStat,
};
pub use console_roles::{console_roles, ConsoleRole};
pub use error::{AuthzError, AuthzResult};
pub use evaluator::evaluate;
pub use guard::{GuardDecision, GuardState, RouteGuard, RouteRequirement};
pub use permission::Permission;
pub use registry::RoleRegistry;
pub use role::Role;
pub use routes::{navigation, visible_navigation, NavItem, RouteTable};
pub use session::AuthSession;
pub use user::User;
pub use warden_common_config::MatchMode;
