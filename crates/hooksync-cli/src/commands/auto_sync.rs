use super::context::CommandContext;
use crate::output::Output;
use crate::render;
use crate::AutoSyncCommands;
use color_eyre::Result;
use serde_json::json;
use webhook_sync_client::NotificationApi;
use webhook_sync_config::Config;
use webhook_sync_core::toggle_auto_sync;
use webhook_sync_models::{AutoSyncSettings, MediaType};

pub async fn run_auto_sync(config: Config, server: Option<&str>, cmd: AutoSyncCommands, output: &Output) -> Result<()> {
    let ctx = CommandContext::connect(config, server)?;

    let settings = match cmd {
        AutoSyncCommands::Show => ctx
            .client
            .get_auto_sync_settings()
            .await
            .map_err(|e| color_eyre::eyre::eyre!("Failed to load auto-sync settings: {}", e))?,
        AutoSyncCommands::Set { movies, series, anime } => {
            let changes = [
                (MediaType::Movie, movies),
                (MediaType::Series, series),
                (MediaType::Anime, anime),
            ];
            if changes.iter().all(|(_, value)| value.is_none()) {
                return Err(color_eyre::eyre::eyre!("Nothing to set; pass --movies, --series or --anime"));
            }

            let mut settings = ctx
                .client
                .get_auto_sync_settings()
                .await
                .map_err(|e| color_eyre::eyre::eyre!("Failed to load auto-sync settings: {}", e))?;
            apply_changes(&mut settings, &changes);

            let stored = ctx
                .client
                .update_auto_sync_settings(&settings)
                .await
                .map_err(|e| color_eyre::eyre::eyre!("Failed to update auto-sync settings: {}", e))?;
            output.success("Auto-sync settings updated");
            stored
        }
        AutoSyncCommands::Toggle { media_type } => {
            let stored = toggle_auto_sync(&ctx.client, media_type)
                .await
                .map_err(|e| color_eyre::eyre::eyre!("{:#}", e))?;
            let state = if stored.enabled_for(media_type) { "enabled" } else { "disabled" };
            output.success(format!("Auto-sync {} for {}", state, media_type));
            stored
        }
    };

    if output.is_human() {
        output.table(&render::settings_table(&settings));
    } else {
        output.json(&json!({
            "type": "auto_sync_settings",
            "settings": settings,
        }));
    }
    Ok(())
}

fn apply_changes(settings: &mut AutoSyncSettings, changes: &[(MediaType, Option<bool>)]) {
    for (media_type, value) in changes {
        if let Some(enabled) = value {
            settings.set(*media_type, *enabled);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_changes_only_touches_given_types() {
        let mut settings = AutoSyncSettings {
            auto_sync_movies: true,
            auto_sync_series: false,
            auto_sync_anime: true,
        };
        apply_changes(
            &mut settings,
            &[(MediaType::Movie, None), (MediaType::Series, Some(true)), (MediaType::Anime, Some(false))],
        );
        assert!(settings.auto_sync_movies);
        assert!(settings.auto_sync_series);
        assert!(!settings.auto_sync_anime);
    }
}
