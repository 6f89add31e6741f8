use super::progress::is_interactive;
use super::prompts;
use crate::output::Output;
use crate::ConfigCommands;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use serde_json::json;
use webhook_sync_client::client::normalize_base_url;
use webhook_sync_config::{Config, CredentialStore, PathManager};

pub async fn run_config(config: Config, path_manager: &PathManager, cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(&config, path_manager, full, output),
        ConfigCommands::Init {
            server_url,
            api_key,
            non_interactive,
        } => init_config(config, path_manager, server_url, api_key, non_interactive, output),
    }
}

fn load_credentials(path_manager: &PathManager) -> Result<CredentialStore> {
    let credentials_file = path_manager.credentials_file();
    let mut store = CredentialStore::new(credentials_file.clone());
    store
        .load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;
    Ok(store)
}

fn show_config(config: &Config, path_manager: &PathManager, full: bool, output: &Output) -> Result<()> {
    let config_file = path_manager.config_file();
    let credentials = load_credentials(path_manager)?;

    let api_key = credentials.get_api_key().map(|key| if full { key.clone() } else { mask_string(key) });
    let last_fetch = credentials.get_last_fetch().map(|at| at.to_rfc3339());

    if !output.is_human() {
        output.json(&json!({
            "type": "config",
            "config_file": config_file.display().to_string(),
            "config_file_exists": config_file.exists(),
            "server_url": config.server_url(),
            "timeout_seconds": config.server.timeout_seconds,
            "group_delay_ms": config.sync.group_delay_ms,
            "show_completed": config.display.show_completed,
            "watch_interval_seconds": config.display.watch_interval_seconds,
            "log_file": config.logging.file.as_ref().map(|p| p.display().to_string()),
            "api_key": api_key,
            "last_fetch": last_fetch,
        }));
        return Ok(());
    }

    if !config_file.exists() {
        output.warn(format!("Configuration file not found at: {} (using defaults)", config_file.display()));
        output.info("Run 'hooksync config init' to create one.");
    }
    if output.is_quiet() {
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec![
        Cell::new("Setting").fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new("Value").fg(Color::Cyan).add_attribute(Attribute::Bold),
    ]);
    let rows = [
        ("Config file", config_file.display().to_string()),
        ("Server URL", config.server_url()),
        ("Timeout", format!("{}s", config.server.timeout_seconds)),
        ("API key", api_key.unwrap_or_else(|| "<not set>".to_string())),
        ("Group action delay", format!("{}ms", config.sync.group_delay_ms)),
        ("Show completed", config.display.show_completed.to_string()),
        ("Watch interval", format!("{}s", config.display.watch_interval_seconds)),
        (
            "Log file",
            config
                .logging
                .file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "stderr".to_string()),
        ),
        ("Last fetch", last_fetch.unwrap_or_else(|| "never".to_string())),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    output.table(&table);
    Ok(())
}

fn init_config(
    mut config: Config,
    path_manager: &PathManager,
    server_url: Option<String>,
    api_key: Option<String>,
    non_interactive: bool,
    output: &Output,
) -> Result<()> {
    let interactive = !non_interactive && output.is_human() && is_interactive();
    let mut credentials = load_credentials(path_manager)?;

    if interactive {
        println!("{}", "hooksync configuration".bold().bright_cyan());
        println!("{}", "─".repeat(22).bright_cyan());
    }

    let server_url = match server_url {
        Some(url) => url,
        None if interactive => prompts::prompt_string("Backend URL", Some(&config.server.base_url))?,
        None => config.server.base_url.clone(),
    };
    config.server.base_url = normalize_base_url(&server_url)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let api_key = match api_key {
        Some(key) => Some(key),
        None if interactive => {
            let entered = prompts::prompt_secret("API key (leave empty to keep current / none)")?;
            Some(entered).filter(|key| !key.trim().is_empty())
        }
        None => None,
    };
    if let Some(key) = api_key {
        credentials.set_api_key(key.trim().to_string());
    }

    config.validate().map_err(|e| color_eyre::eyre::eyre!("{:#}", e))?;

    path_manager
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create directories: {}", e))?;
    let config_file = path_manager.config_file();
    config
        .save_to_file(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save config to {}: {}", config_file.display(), e))?;
    credentials
        .save()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save credentials: {}", e))?;

    tracing::info!(
        operation = "config_init",
        config_file = %config_file.display(),
        server_url = %config.server.base_url,
        "Configuration written"
    );

    if output.is_human() {
        output.success(format!("Configuration saved to {}", config_file.display()));
    } else {
        output.json(&json!({
            "type": "config_init",
            "success": true,
            "config_file": config_file.display().to_string(),
            "server_url": config.server.base_url,
            "api_key_set": credentials.get_api_key().is_some(),
        }));
    }
    Ok(())
}

fn mask_string(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.is_empty() {
        return "<not set>".to_string();
    }
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string(""), "<not set>");
        assert_eq!(mask_string("abc"), "***");
        assert_eq!(mask_string("secret-key"), "se***ey");
    }
}
