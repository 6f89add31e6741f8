use clap::{ArgAction, Parser, Subcommand};
use commands::{actions, auto_sync, config, list, show, watch};
use webhook_sync_config::{Config, PathManager};
use webhook_sync_models::{MediaType, NotificationStatus};

mod commands;
mod logging;
mod output;
mod render;

#[derive(Parser)]
#[command(name = "hooksync")]
#[command(about = "hooksync - Review and sync webhook media notifications")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Backend URL (overrides config file and HOOKSYNC_SERVER_URL)
    #[arg(long, global = true, value_name = "URL")]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List notifications, grouping episodes by series and season
    #[command(long_about = "Fetch all webhook notifications and list them most recent first. Movies are shown individually; series and anime episodes are grouped per season with a combined status.")]
    List {
        /// Only include notifications with these statuses (comma-separated)
        #[arg(long, value_delimiter = ',', value_name = "STATUS")]
        status: Vec<NotificationStatus>,

        /// Only include these media types (comma-separated: movie, series, anime)
        #[arg(long, value_delimiter = ',', value_name = "TYPE")]
        media_type: Vec<MediaType>,

        /// Hide rows whose status is completed
        #[arg(long, action = ArgAction::SetTrue)]
        hide_completed: bool,
    },
    /// Show details of one notification
    Show {
        /// Notification ID
        id: String,
    },
    /// Show the episodes of one series/season group
    Group {
        /// Group key as shown by `list` (e.g. the-expanse_S2)
        key: String,
    },
    /// Trigger a sync for a notification or a whole group
    #[command(long_about = "Trigger a sync for a single notification, or for every pending, waiting or failed episode of a group. Group syncs are sent one at a time with the configured delay between them.")]
    Sync {
        /// Notification ID
        #[arg(required_unless_present = "group")]
        id: Option<String>,

        /// Group key instead of a single notification
        #[arg(long, conflicts_with = "id", value_name = "KEY")]
        group: Option<String>,

        /// Sync even if the notification is not in a syncable state
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
    /// Mark a notification or a whole group as completed
    Complete {
        /// Notification ID
        #[arg(required_unless_present = "group")]
        id: Option<String>,

        /// Group key instead of a single notification
        #[arg(long, conflicts_with = "id", value_name = "KEY")]
        group: Option<String>,
    },
    /// Delete a notification or a whole group
    Delete {
        /// Notification ID
        #[arg(required_unless_present = "group")]
        id: Option<String>,

        /// Group key instead of a single notification
        #[arg(long, conflicts_with = "id", value_name = "KEY")]
        group: Option<String>,

        /// Do not ask for confirmation
        #[arg(short, long, action = ArgAction::SetTrue)]
        yes: bool,
    },
    /// View or change per-media-type auto-sync settings
    AutoSync {
        #[command(subcommand)]
        cmd: Option<AutoSyncCommands>,
    },
    /// Re-fetch and re-render the notification list periodically
    Watch {
        /// Seconds between refreshes (defaults to display.watch_interval_seconds)
        #[arg(long, value_name = "SECONDS")]
        interval: Option<u64>,

        /// Hide rows whose status is completed
        #[arg(long, action = ArgAction::SetTrue)]
        hide_completed: bool,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
pub enum AutoSyncCommands {
    /// Show current settings
    Show,
    /// Set one or more switches explicitly
    Set {
        #[arg(long)]
        movies: Option<bool>,
        #[arg(long)]
        series: Option<bool>,
        #[arg(long)]
        anime: Option<bool>,
    },
    /// Flip the switch for one media type
    Toggle {
        media_type: MediaType,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Write a config file, prompting for missing values
    Init {
        /// Backend URL
        #[arg(long)]
        server_url: Option<String>,

        /// API key sent as X-Api-Key (stored in credentials.toml)
        #[arg(long)]
        api_key: Option<String>,

        /// Do not prompt; use defaults for anything not given
        #[arg(long, action = ArgAction::SetTrue)]
        non_interactive: bool,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();
    let config = Config::load_or_default(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    logging::init_logging(cli.verbose, cli.quiet, &config.logging)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);
    let server = cli.server.as_deref();

    match cli.command {
        Commands::List { status, media_type, hide_completed } => {
            list::run_list(config, server, status, media_type, hide_completed, &output).await
        }
        Commands::Show { id } => show::run_show(config, server, &id, &output).await,
        Commands::Group { key } => show::run_group(config, server, &key, &output).await,
        Commands::Sync { id, group, force } => {
            actions::run_sync(config, server, actions::Target::from_args(id, group)?, force, &output).await
        }
        Commands::Complete { id, group } => {
            actions::run_complete(config, server, actions::Target::from_args(id, group)?, &output).await
        }
        Commands::Delete { id, group, yes } => {
            actions::run_delete(config, server, actions::Target::from_args(id, group)?, yes, &output).await
        }
        Commands::AutoSync { cmd } => {
            let cmd = cmd.unwrap_or(AutoSyncCommands::Show);
            auto_sync::run_auto_sync(config, server, cmd, &output).await
        }
        Commands::Watch { interval, hide_completed } => {
            watch::run_watch(config, server, interval, hide_completed, &output).await
        }
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(config, &path_manager, cmd, &output).await
        }
    }
}
