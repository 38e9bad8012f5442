//! Listing and assuming cloud roles.

use clap::Parser;
use serde::Serialize;
use warden_authz::{Role, RoleRegistry};

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, table, FormattedOutput, StatusOutput};

/// List assumable roles, or show one role's permissions
#[derive(Debug, Parser)]
pub struct RolesCommand {
    /// Role to show in detail
    pub role_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct RoleRow {
    id: String,
    name: String,
    description: String,
    services: usize,
    active: bool,
}

#[derive(Debug, Serialize)]
struct RoleList {
    roles: Vec<RoleRow>,
}

impl FormattedOutput for RoleList {
    fn format_text(&self) -> String {
        let rows: Vec<Vec<String>> = self
            .roles
            .iter()
            .map(|r| {
                vec![
                    if r.active { "*".to_string() } else { String::new() },
                    r.id.clone(),
                    r.name.clone(),
                    r.services.to_string(),
                    r.description.clone(),
                ]
            })
            .collect();
        table(&["", "ID", "NAME", "SERVICES", "DESCRIPTION"], &rows)
    }
}

#[derive(Debug, Serialize)]
struct RoleDetail {
    #[serde(flatten)]
    role: Role,
    active: bool,
}

impl FormattedOutput for RoleDetail {
    fn format_text(&self) -> String {
        let mut lines = vec![
            format!(
                "{} ({}){}",
                self.role.name,
                self.role.id,
                if self.active { " [active]" } else { "" }
            ),
            self.role.description.clone(),
        ];
        for (resource, actions) in &self.role.permissions {
            let actions: Vec<&str> = actions.iter().map(String::as_str).collect();
            lines.push(format!("  {resource}: {}", actions.join(", ")));
        }
        lines.join("\n")
    }
}

impl RolesCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let active = ctx.role_store().load()?.map(|r| r.id);
        let is_active = |id: &str| active.as_deref() == Some(id);

        match &self.role_id {
            Some(id) => {
                let role = lookup(&ctx.registry, id)?;
                print_output(
                    ctx,
                    &RoleDetail {
                        role: role.clone(),
                        active: is_active(&role.id),
                    },
                )
            }
            None => {
                let roles = ctx
                    .registry
                    .iter()
                    .map(|r| RoleRow {
                        id: r.id.clone(),
                        name: r.name.clone(),
                        description: r.description.clone(),
                        services: r.service_count(),
                        active: is_active(&r.id),
                    })
                    .collect();
                print_output(ctx, &RoleList { roles })
            }
        }
    }
}

/// Assume a role for subsequent commands
#[derive(Debug, Parser)]
pub struct AssumeCommand {
    /// Role to assume (see `warden roles`)
    pub role_id: String,
}

impl AssumeCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let role = lookup(&ctx.registry, &self.role_id)?;
        ctx.role_store().store(role)?;
        print_output(
            ctx,
            &StatusOutput::success(format!("Assumed role {} ({})", role.name, role.id)),
        )
    }
}

fn lookup<'a>(registry: &'a RoleRegistry, id: &str) -> Result<&'a Role, CliError> {
    registry.require(id).map_err(|_| {
        CliError::not_found_with_suggestions(
            "role",
            id,
            registry.ids().map(str::to_string).collect(),
        )
    })
}
