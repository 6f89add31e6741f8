use super::context::CommandContext;
use crate::output::Output;
use crate::render;
use chrono::Utc;
use color_eyre::Result;
use serde_json::json;
use webhook_sync_client::NotificationApi;
use webhook_sync_config::Config;

pub async fn run_show(config: Config, server: Option<&str>, id: &str, output: &Output) -> Result<()> {
    let ctx = CommandContext::connect(config, server)?;

    let notification = ctx.client.get_notification(id).await.map_err(|e| {
        if e.is_not_found() {
            color_eyre::eyre::eyre!("Notification '{}' not found", id)
        } else {
            color_eyre::eyre::eyre!("Failed to fetch notification '{}': {}", id, e)
        }
    })?;

    if output.is_human() {
        output.table(&render::notification_table(&notification, Utc::now()));
    } else {
        output.json(&json!({
            "type": "notification",
            "notification": notification,
        }));
    }
    Ok(())
}

pub async fn run_group(config: Config, server: Option<&str>, key: &str, output: &Output) -> Result<()> {
    let mut ctx = CommandContext::connect(config, server)?;
    let board = ctx.load_board().await?;

    let group = board
        .group(key)
        .ok_or_else(|| color_eyre::eyre::eyre!("No group with key '{}'", key))?;

    if output.is_human() {
        output.info(render::group_heading(&group));
        output.table(&render::group_table(&group, Utc::now()));
    } else {
        output.json(&json!({
            "type": "group",
            "group": group,
            "aggregate_status": group.aggregate_status(),
            "episode_count": group.len(),
            "total_release_size": group.total_release_size(),
        }));
    }
    Ok(())
}
