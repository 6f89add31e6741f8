use super::context::CommandContext;
use crate::output::Output;
use crate::render;
use chrono::Utc;
use color_eyre::Result;
use webhook_sync_config::Config;
use webhook_sync_core::{NotificationBoard, NotificationFilter};
use webhook_sync_models::{MediaType, NotificationStatus};

pub async fn run_list(
    config: Config,
    server: Option<&str>,
    status: Vec<NotificationStatus>,
    media_type: Vec<MediaType>,
    hide_completed: bool,
    output: &Output,
) -> Result<()> {
    tracing::debug!("List command started");

    let hide_completed = hide_completed || !config.display.show_completed;
    let mut ctx = CommandContext::connect(config, server)?;
    let board = ctx.load_board().await?;

    let filter = NotificationFilter {
        statuses: status,
        media_types: media_type,
        hide_completed,
    };
    print_board(&board, &filter, output);
    Ok(())
}

/// Render the filtered board; shared with `watch`
pub fn print_board(board: &NotificationBoard, filter: &NotificationFilter, output: &Output) {
    let items = board.filtered(filter);
    let summary = board.summary();

    if !output.is_human() {
        output.json(&render::items_json(&items, &summary));
        return;
    }

    if items.is_empty() {
        if board.is_empty() {
            output.info("No notifications");
        } else {
            output.info(format!("No notifications match the filter ({} in total)", board.notifications().len()));
        }
        return;
    }

    output.table(&render::items_table(&items, Utc::now()));
    output.info(render::summary_line(&summary));
}
