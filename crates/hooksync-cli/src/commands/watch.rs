use super::context::CommandContext;
use super::list::print_board;
use crate::output::Output;
use chrono::Local;
use color_eyre::Result;
use std::future::Future;
use std::time::Duration;
use tokio::time::Interval;
use webhook_sync_config::Config;
use webhook_sync_core::NotificationFilter;

#[derive(Debug, PartialEq, Eq)]
enum WatchEvent {
    Tick,
    Shutdown,
}

/// Wait for the next tick or for shutdown. Shutdown wins when both are ready.
///
/// `shutdown` is polled by reference so a signal that arrives while a refresh
/// is running is seen on the following call.
async fn next_event<S>(ticker: &mut Interval, shutdown: &mut S) -> WatchEvent
where
    S: Future + Unpin,
{
    tokio::select! {
        biased;
        _ = shutdown => WatchEvent::Shutdown,
        _ = ticker.tick() => WatchEvent::Tick,
    }
}

/// Re-fetch and re-render until interrupted. Fetch errors are reported and retried on the next tick.
pub async fn run_watch(
    config: Config,
    server: Option<&str>,
    interval: Option<u64>,
    hide_completed: bool,
    output: &Output,
) -> Result<()> {
    let seconds = interval.unwrap_or(config.display.watch_interval_seconds);
    if seconds == 0 {
        return Err(color_eyre::eyre::eyre!("--interval must be greater than zero"));
    }
    let filter = NotificationFilter {
        hide_completed: hide_completed || !config.display.show_completed,
        ..NotificationFilter::default()
    };

    let mut ctx = CommandContext::connect(config, server)?;
    let mut ticker = tokio::time::interval(Duration::from_secs(seconds));
    tracing::info!(operation = "watch", interval_seconds = seconds, "Watching notifications");

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    while next_event(&mut ticker, &mut ctrl_c).await == WatchEvent::Tick {
        match ctx.load_board().await {
            Ok(board) => {
                if output.is_human() {
                    // clear screen and home the cursor
                    print!("\x1B[2J\x1B[H");
                    output.info(format!(
                        "hooksync watch | every {}s | {} | Ctrl+C to stop",
                        seconds,
                        Local::now().format("%H:%M:%S")
                    ));
                }
                print_board(&board, &filter, output);
            }
            Err(e) => output.error(format!("Refresh failed: {:#}", e)),
        }
    }

    tracing::info!(operation = "watch", "Interrupted, stopping watch");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_event_is_an_immediate_tick() {
        let mut ticker = tokio::time::interval(Duration::from_secs(3600));
        let mut shutdown = Box::pin(std::future::pending::<()>());
        assert_eq!(next_event(&mut ticker, &mut shutdown).await, WatchEvent::Tick);
    }

    #[tokio::test]
    async fn test_shutdown_during_refresh_is_not_lost() {
        let mut ticker = tokio::time::interval(Duration::from_secs(3600));
        let mut shutdown = Box::pin(tokio::time::sleep(Duration::from_millis(20)));

        assert_eq!(next_event(&mut ticker, &mut shutdown).await, WatchEvent::Tick);
        // a slow refresh outlasts the signal
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(next_event(&mut ticker, &mut shutdown).await, WatchEvent::Shutdown);
    }

    #[tokio::test]
    async fn test_shutdown_wins_over_a_ready_tick() {
        let mut ticker = tokio::time::interval(Duration::from_secs(3600));
        let mut shutdown = Box::pin(std::future::ready(()));
        assert_eq!(next_event(&mut ticker, &mut shutdown).await, WatchEvent::Shutdown);
    }
}
