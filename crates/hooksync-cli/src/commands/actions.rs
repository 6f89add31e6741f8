use super::context::CommandContext;
use super::progress::{is_interactive, GroupProgress};
use super::prompts::prompt_yes_no;
use crate::output::Output;
use crate::render;
use color_eyre::Result;
use serde_json::json;
use webhook_sync_client::{ClientError, NotificationApi};
use webhook_sync_config::Config;
use webhook_sync_core::{run_group_action, GroupAction, GroupActionReport};

/// What an action command operates on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Notification(String),
    Group(String),
}

impl Target {
    pub fn from_args(id: Option<String>, group: Option<String>) -> Result<Self> {
        match (id, group) {
            (Some(id), None) => Ok(Target::Notification(id)),
            (None, Some(key)) => Ok(Target::Group(key)),
            (Some(_), Some(_)) => Err(color_eyre::eyre::eyre!("Pass either a notification ID or --group, not both")),
            (None, None) => Err(color_eyre::eyre::eyre!("A notification ID or --group is required")),
        }
    }
}

pub async fn run_sync(config: Config, server: Option<&str>, target: Target, force: bool, output: &Output) -> Result<()> {
    let ctx = CommandContext::connect(config, server)?;
    match target {
        Target::Notification(id) => {
            let notification = ctx
                .client
                .get_notification(&id)
                .await
                .map_err(|e| not_found_or(&id, e))?;

            if !notification.status.is_syncable() && !force {
                return Err(color_eyre::eyre::eyre!(
                    "Notification '{}' is {}; use --force to sync it anyway",
                    id,
                    notification.status
                ));
            }

            ctx.client
                .sync_notification(&id)
                .await
                .map_err(|e| color_eyre::eyre::eyre!("Failed to sync '{}': {}", id, e))?;
            single_done(output, GroupAction::Sync, &id, &notification.display_title());
            Ok(())
        }
        Target::Group(key) => run_for_group(ctx, &key, GroupAction::Sync, output).await,
    }
}

pub async fn run_complete(config: Config, server: Option<&str>, target: Target, output: &Output) -> Result<()> {
    let ctx = CommandContext::connect(config, server)?;
    match target {
        Target::Notification(id) => {
            ctx.client
                .complete_notification(&id)
                .await
                .map_err(|e| not_found_or(&id, e))?;
            single_done(output, GroupAction::Complete, &id, &id);
            Ok(())
        }
        Target::Group(key) => run_for_group(ctx, &key, GroupAction::Complete, output).await,
    }
}

pub async fn run_delete(config: Config, server: Option<&str>, target: Target, yes: bool, output: &Output) -> Result<()> {
    let what = match &target {
        Target::Notification(id) => format!("notification '{}'", id),
        Target::Group(key) => format!("every notification in group '{}'", key),
    };
    if !yes {
        if !(output.is_human() && is_interactive()) {
            return Err(color_eyre::eyre::eyre!("Refusing to delete {} without --yes", what));
        }
        if !prompt_yes_no(&format!("Delete {}?", what), false)? {
            output.info("Cancelled");
            return Ok(());
        }
    }

    let ctx = CommandContext::connect(config, server)?;
    match target {
        Target::Notification(id) => {
            ctx.client
                .delete_notification(&id)
                .await
                .map_err(|e| not_found_or(&id, e))?;
            single_done(output, GroupAction::Delete, &id, &id);
            Ok(())
        }
        Target::Group(key) => run_for_group(ctx, &key, GroupAction::Delete, output).await,
    }
}

async fn run_for_group(mut ctx: CommandContext, key: &str, action: GroupAction, output: &Output) -> Result<()> {
    let board = ctx.load_board().await?;
    let group = board
        .group(key)
        .ok_or_else(|| color_eyre::eyre::eyre!("No group with key '{}'", key))?;

    let targets = group.notifications.iter().filter(|n| action.applies_to(n)).count();
    if targets == 0 {
        output.info(format!("Nothing to {} in {}", action.verb(), render::group_heading(&group)));
        if !output.is_human() {
            output.json(&render::report_json(&empty_report(action, key, &group)));
        }
        return Ok(());
    }

    let delay = ctx.config.sync.group_delay();
    let progress = GroupProgress::new(action.verb(), targets, output.is_human() && !output.is_quiet());
    let report = run_group_action(&ctx.client, &group, action, delay, |position, total, notification| {
        progress.step(position, total, notification)
    })
    .await;
    progress.finish();

    print_report(&report, output);

    if report.is_success() {
        Ok(())
    } else {
        Err(color_eyre::eyre::eyre!(
            "{} of {} {} call(s) failed for group '{}'",
            report.failed.len(),
            report.attempted(),
            action.verb(),
            key
        ))
    }
}

fn empty_report(action: GroupAction, key: &str, group: &webhook_sync_core::NotificationGroup) -> GroupActionReport {
    GroupActionReport {
        action,
        group_key: key.to_string(),
        succeeded: Vec::new(),
        failed: Vec::new(),
        skipped: group.notifications.iter().map(|n| n.notification_id.clone()).collect(),
    }
}

fn print_report(report: &GroupActionReport, output: &Output) {
    if !output.is_human() {
        output.json(&render::report_json(report));
        return;
    }

    if !report.succeeded.is_empty() {
        output.success(format!(
            "{}: {} notification(s) in {}",
            past_tense(report.action),
            report.succeeded.len(),
            report.group_key
        ));
    }
    for failed in &report.failed {
        output.error(format!("{}: {}", failed.notification_id, failed.error));
    }
    if !report.skipped.is_empty() {
        output.info(format!("Skipped {} notification(s) not in a state to {}", report.skipped.len(), report.action.verb()));
    }
}

fn single_done(output: &Output, action: GroupAction, id: &str, title: &str) {
    if output.is_human() {
        output.success(format!("{} {}", past_tense(action), title));
    } else {
        output.json(&json!({
            "type": "action",
            "action": action,
            "notification_id": id,
            "success": true,
        }));
    }
}

fn past_tense(action: GroupAction) -> &'static str {
    match action {
        GroupAction::Sync => "Sync triggered",
        GroupAction::Complete => "Completed",
        GroupAction::Delete => "Deleted",
    }
}

fn not_found_or(id: &str, e: ClientError) -> color_eyre::eyre::Report {
    if e.is_not_found() {
        color_eyre::eyre::eyre!("Notification '{}' not found", id)
    } else {
        color_eyre::eyre::eyre!("Request for '{}' failed: {}", id, e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_from_args() {
        assert_eq!(
            Target::from_args(Some("n1".to_string()), None).unwrap(),
            Target::Notification("n1".to_string())
        );
        assert_eq!(
            Target::from_args(None, Some("dune_S1".to_string())).unwrap(),
            Target::Group("dune_S1".to_string())
        );
        assert!(Target::from_args(None, None).is_err());
        assert!(Target::from_args(Some("n1".to_string()), Some("k".to_string())).is_err());
    }
}
