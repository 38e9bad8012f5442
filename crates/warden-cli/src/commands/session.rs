//! The signed-in user and logout.

use clap::Parser;
use serde::Serialize;
use warden_authz::User;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput, StatusOutput};

/// Show the signed-in user and the active role
#[derive(Debug, Parser)]
pub struct WhoamiCommand {}

#[derive(Debug, Serialize)]
struct ActiveRoleRef {
    id: String,
    name: String,
}

#[derive(Debug, Serialize)]
struct WhoamiOutput {
    user: Option<User>,
    active_role: Option<ActiveRoleRef>,
    auth_token: bool,
}

impl FormattedOutput for WhoamiOutput {
    fn format_text(&self) -> String {
        let mut lines = Vec::new();
        match &self.user {
            Some(user) => {
                lines.push(format!("{} <{}> ({})", user.name, user.email, user.role_label));
                let tokens: Vec<String> = user.permissions.iter().map(|p| p.to_string()).collect();
                lines.push(format!("Permissions: {}", tokens.join(", ")));
            }
            None => lines.push("Not signed in".to_string()),
        }
        lines.push(match &self.active_role {
            Some(role) => format!("Active role: {} ({})", role.name, role.id),
            None => "Active role: none".to_string(),
        });
        if self.auth_token {
            lines.push("Auth token: present".to_string());
        }
        lines.join("\n")
    }
}

impl WhoamiCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let store = ctx.role_store();
        let session = ctx.session(false);
        let output = WhoamiOutput {
            user: session.user().cloned(),
            active_role: store.load()?.map(|r| ActiveRoleRef {
                id: r.id,
                name: r.name,
            }),
            auth_token: store.auth_token()?.is_some(),
        };
        print_output(ctx, &output)
    }
}

/// Drop the active role and auth token
#[derive(Debug, Parser)]
pub struct LogoutCommand {}

impl LogoutCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        ctx.role_store().logout()?;
        print_output(
            ctx,
            &StatusOutput::success(format!(
                "Logged out; redirecting to {}",
                ctx.config.guard.login_route
            )),
        )
    }
}
