//! The cloud resource page: cards, enabled actions, and attempts.

use clap::Parser;
use serde::Serialize;
use warden_authz::{
    cloud_resources, find_action, require_active_role, ActionState, GuardDecision, ResourceStat,
    Role,
};

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput, StatusOutput};

/// Show resource cards and which actions the active role enables
#[derive(Debug, Parser)]
pub struct ResourcesCommand {
    /// Service key of the card to act on, e.g. `s3`
    #[arg(long, value_name = "SERVICE", requires = "action")]
    pub service: Option<String>,

    /// Button label to press on that card, e.g. "Upload File"
    #[arg(long, value_name = "LABEL", requires = "service")]
    pub action: Option<String>,
}

#[derive(Debug, Serialize)]
struct CardView {
    title: &'static str,
    resource: &'static str,
    description: &'static str,
    stats: Vec<ResourceStat>,
    actions: Vec<ActionState>,
}

#[derive(Debug, Serialize)]
struct ResourcesOutput {
    role: String,
    cards: Vec<CardView>,
}

impl FormattedOutput for ResourcesOutput {
    fn format_text(&self) -> String {
        let mut lines = vec![format!("Active role: {}", self.role)];
        for card in &self.cards {
            lines.push(String::new());
            lines.push(format!("{} ({}) - {}", card.title, card.resource, card.description));
            let stats: Vec<String> = card
                .stats
                .iter()
                .map(|s| format!("{}: {}", s.label, s.value))
                .collect();
            lines.push(format!("  {}", stats.join("  ")));
            for action in &card.actions {
                let mark = if action.enabled { "✓" } else { "✗" };
                lines.push(format!("  {mark} {} [{}]", action.label, action.permission));
            }
        }
        lines.join("\n")
    }
}

impl ResourcesCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let stored = ctx.role_store().load()?;
        let role = require_active_role(stored.as_ref(), &ctx.config.guard).map_err(|decision| {
            let to = match decision {
                GuardDecision::Redirect { to } => to,
                GuardDecision::Render => ctx.config.guard.role_assumption_route.clone(),
            };
            CliError::user_with_hint(
                format!("No active role; redirecting to {to}"),
                "Assume a role first: warden assume <ROLE_ID>",
            )
        })?;

        match (&self.service, &self.action) {
            (Some(service), Some(label)) => self.attempt(ctx, role, service, label),
            _ => {
                let cards = cloud_resources()
                    .into_iter()
                    .map(|card| CardView {
                        actions: card.action_states(Some(role)),
                        title: card.title,
                        resource: card.resource,
                        description: card.description,
                        stats: card.stats,
                    })
                    .collect();
                print_output(
                    ctx,
                    &ResourcesOutput {
                        role: role.name.clone(),
                        cards,
                    },
                )
            }
        }
    }

    fn attempt(
        &self,
        ctx: &CommandContext,
        role: &Role,
        service: &str,
        label: &str,
    ) -> Result<(), CliError> {
        let cards = cloud_resources();
        let action = find_action(&cards, service, label)?;
        let outcome = action.attempt(Some(role));
        ctx.auditor.evaluation(
            Some(role),
            action.permission.resource(),
            action.permission.action(),
            outcome.is_ok(),
        );
        let progress = outcome?;
        print_output(ctx, &StatusOutput::success(progress))
    }
}
