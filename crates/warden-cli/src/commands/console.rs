//! Console pages: route guard, sidebar and the role-management list.

use clap::Parser;
use serde::Serialize;
use warden_authz::{
    console_roles, visible_navigation, ConsoleRole, GuardDecision, GuardState, MatchMode, NavItem,
    Permission,
};

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, table, FormattedOutput};

/// Run the route guard for a console path
#[derive(Debug, Parser)]
pub struct RouteCommand {
    /// Console path, e.g. `/admin/users`
    pub path: String,

    /// Evaluate as a visitor who is not signed in
    #[arg(long)]
    pub signed_out: bool,
}

#[derive(Debug, Serialize)]
struct RouteOutput {
    path: String,
    protected: bool,
    required: Vec<Permission>,
    mode: Option<MatchMode>,
    state: Option<GuardState>,
    decision: GuardDecision,
}

impl FormattedOutput for RouteOutput {
    fn format_text(&self) -> String {
        let outcome = match &self.decision {
            GuardDecision::Render => "render".to_string(),
            GuardDecision::Redirect { to } => format!("redirect to {to}"),
        };
        let reason = match self.state {
            None => "public",
            Some(GuardState::Authorized) => "authorized",
            Some(GuardState::Unauthorized) => "unauthorized",
            Some(GuardState::Unauthenticated) => "unauthenticated",
        };
        let mut lines = vec![format!("{}: {outcome} ({reason})", self.path)];
        if let Some(mode) = self.mode {
            let tokens: Vec<String> = self.required.iter().map(|p| p.to_string()).collect();
            let mode = match mode {
                MatchMode::Any => "any",
                MatchMode::All => "all",
            };
            lines.push(format!("  requires {mode} of: {}", tokens.join(", ")));
        }
        lines.join("\n")
    }
}

impl RouteCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let routes = ctx.route_table()?;
        let session = ctx.session(self.signed_out);

        let output = match routes.requirement_for(&self.path) {
            None => RouteOutput {
                path: self.path.clone(),
                protected: false,
                required: Vec::new(),
                mode: None,
                state: None,
                decision: GuardDecision::Render,
            },
            Some(requirement) => {
                let (state, decision) = ctx.guard().check(&session, requirement);
                ctx.auditor.route(&session, &self.path, state);
                RouteOutput {
                    path: self.path.clone(),
                    protected: true,
                    required: requirement.permissions.clone(),
                    mode: Some(requirement.mode),
                    state: Some(state),
                    decision,
                }
            }
        };
        print_output(ctx, &output)
    }
}

/// Show the sidebar entries visible to the signed-in user
#[derive(Debug, Parser)]
pub struct NavCommand {
    /// Evaluate as a visitor who is not signed in
    #[arg(long)]
    pub signed_out: bool,
}

#[derive(Debug, Serialize)]
struct NavOutput {
    items: Vec<NavItem>,
}

impl FormattedOutput for NavOutput {
    fn format_text(&self) -> String {
        let rows: Vec<Vec<String>> = self
            .items
            .iter()
            .map(|item| vec![item.label.to_string(), item.path.to_string()])
            .collect();
        table(&["ENTRY", "PATH"], &rows)
    }
}

impl NavCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let items = visible_navigation(&ctx.session(self.signed_out));
        print_output(ctx, &NavOutput { items })
    }
}

/// List the role-management page's roles
#[derive(Debug, Parser)]
pub struct ConsoleRolesCommand {}

#[derive(Debug, Serialize)]
struct ConsoleRolesOutput {
    roles: Vec<ConsoleRole>,
}

impl FormattedOutput for ConsoleRolesOutput {
    fn format_text(&self) -> String {
        let rows: Vec<Vec<String>> = self
            .roles
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.name.clone(),
                    r.user_count.to_string(),
                    r.permission_summary(),
                    if r.is_system { "system" } else { "custom" }.to_string(),
                    r.created_at.as_datetime().format("%Y-%m-%d").to_string(),
                ]
            })
            .collect();
        table(
            &["ID", "NAME", "USERS", "PERMISSIONS", "TYPE", "CREATED"],
            &rows,
        )
    }
}

impl ConsoleRolesCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        print_output(
            ctx,
            &ConsoleRolesOutput {
                roles: console_roles(),
            },
        )
    }
}
