use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use webhook_sync_models::Notification;

/// Progress display for a group action: a bar on a terminal, log lines otherwise
pub struct GroupProgress {
    bar: Option<ProgressBar>,
    verb: &'static str,
}

impl GroupProgress {
    pub fn new(verb: &'static str, total: usize, enabled: bool) -> Self {
        let interactive = enabled && is_interactive() && total > 0;

        let bar = if interactive {
            let pb = ProgressBar::new(total as u64);
            let style = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▉▊▋▌▍▎▏  ");
            pb.set_style(style);
            Some(pb)
        } else {
            tracing::info!(
                operation = "ui_init",
                mode = "non_interactive",
                "Progress bar disabled, using structured logging"
            );
            None
        };

        Self { bar, verb }
    }

    /// Called before each member is sent, positions start at 1
    pub fn step(&self, position: usize, total: usize, notification: &Notification) {
        let title = notification.display_title();
        match &self.bar {
            Some(bar) => {
                bar.set_position(position.saturating_sub(1) as u64);
                bar.set_message(format!("{} {}", self.verb, title));
            }
            None => tracing::info!(
                operation = "progress",
                current = position,
                total = total,
                notification_id = %notification.notification_id,
                message = %title,
                "Group action progress"
            ),
        }
    }

    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

pub fn is_interactive() -> bool {
    std::io::stdout().is_terminal() && std::io::stderr().is_terminal()
}
