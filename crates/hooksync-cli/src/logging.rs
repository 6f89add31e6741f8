use anyhow::Result;
use std::io;
use std::io::IsTerminal;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{self, time::ChronoUtc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};
use webhook_sync_config::LoggingConfig;

pub fn init_logging(verbose_level: u8, quiet: bool, logging: &LoggingConfig) -> Result<()> {
    // 0 = warn (the CLI prints its own results), 1 = debug, 2+ = trace
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        let filter_str = match verbose_level {
            0 => "warn",
            // -v: debug level but suppress noisy hyper logs
            1 => "debug,hyper::proto::h1=warn,hyper::client::pool=warn",
            _ => "trace",
        };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str))
    };

    let json = std::env::var("RUST_LOG_JSON")
        .map(|v| v == "true")
        .ok()
        .or(logging.json)
        .unwrap_or_else(|| !io::stdout().is_terminal());

    let registry = Registry::default().with(filter);

    if let Some(log_path) = &logging.file {
        let log_dir = log_path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Log file path has no parent directory"))?;
        std::fs::create_dir_all(log_dir)?;

        let log_filename = log_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| anyhow::anyhow!("Invalid log filename"))?;

        // Rotation prefix without extension: hooksync.log -> hooksync.2026-01-17
        let log_prefix = log_filename.rsplitn(2, '.').nth(1).unwrap_or(log_filename);

        let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, log_prefix);

        if json {
            let json_layer = fmt::layer()
                .json()
                .with_timer(ChronoUtc::rfc_3339())
                .with_writer(file_appender);
            registry.with(json_layer).init();
        } else {
            let fmt_layer = fmt::layer()
                .with_timer(ChronoUtc::rfc_3339())
                .with_ansi(false)
                .with_writer(file_appender);
            registry.with(fmt_layer).init();
        }
    } else if json {
        let json_layer = fmt::layer()
            .json()
            .with_timer(ChronoUtc::rfc_3339())
            .with_writer(io::stderr);
        registry.with(json_layer).init();
    } else {
        let fmt_layer = fmt::layer()
            .with_timer(ChronoUtc::rfc_3339())
            .with_writer(io::stderr);
        registry.with(fmt_layer).init();
    }

    Ok(())
}
