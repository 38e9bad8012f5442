//! Permission checks against the active role.

use clap::Parser;
use serde::Serialize;
use warden_authz::{evaluate, Permission};
use warden_common_log::spans::decision_span;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput};

/// Check whether the active role permits an action on a resource
#[derive(Debug, Parser)]
pub struct CheckCommand {
    /// Resource key, e.g. `s3`
    pub resource: String,

    /// Action name, e.g. `upload`
    pub action: String,
}

#[derive(Debug, Serialize)]
struct CheckOutput {
    role: Option<String>,
    resource: String,
    action: String,
    allowed: bool,
}

impl FormattedOutput for CheckOutput {
    fn format_text(&self) -> String {
        format!(
            "{}: {} on {} ({})",
            if self.allowed { "allowed" } else { "denied" },
            self.action,
            self.resource,
            self.role.as_deref().unwrap_or("no active role")
        )
    }
}

impl CheckCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let role = ctx.role_store().load()?;
        let subject = role.as_ref().map(|r| r.id.as_str()).unwrap_or("none");
        let _span = decision_span(subject, &self.resource, &self.action).entered();

        let allowed = evaluate(role.as_ref(), &self.resource, &self.action);
        ctx.auditor
            .evaluation(role.as_ref(), &self.resource, &self.action, allowed);

        print_output(
            ctx,
            &CheckOutput {
                role: role.as_ref().map(|r| r.id.clone()),
                resource: self.resource.clone(),
                action: self.action.clone(),
                allowed,
            },
        )?;

        if allowed {
            Ok(())
        } else {
            Err(CliError::permission_denied(
                format!("{} on {} is not permitted", self.action, self.resource),
                Permission::new(self.resource.as_str(), self.action.as_str()).to_string(),
            ))
        }
    }
}
