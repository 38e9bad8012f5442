//! Command implementations.

mod check;
mod console;
mod resources;
mod roles;
mod session;

pub use check::CheckCommand;
pub use console::{ConsoleRolesCommand, NavCommand, RouteCommand};
pub use resources::ResourcesCommand;
pub use roles::{AssumeCommand, RolesCommand};
pub use session::{LogoutCommand, WhoamiCommand};
