use clap::ValueEnum;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        self.message("success", "✓".green().to_string(), msg.as_ref());
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => println!("{}", msg.as_ref()),
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({"type": "info", "message": msg.as_ref()}));
            }
        }
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        self.message("warning", "⚠".yellow().to_string(), msg.as_ref());
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        // Errors should always be shown, even in quiet mode
        match self.format {
            OutputFormat::Human => eprintln!("{} {}", "✗".red(), msg.as_ref()),
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({"type": "error", "message": msg.as_ref()}));
            }
        }
    }

    fn message(&self, kind: &str, symbol: String, msg: &str) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => println!("{} {}", symbol, msg),
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({"type": kind, "message": msg}));
            }
        }
    }

    /// Print a table in human mode; JSON modes print their own payloads instead
    pub fn table(&self, table: &Table) {
        if self.quiet || !self.is_human() {
            return;
        }
        println!("{}", table);
    }

    /// Print a JSON payload in JSON modes
    pub fn json(&self, data: &serde_json::Value) {
        if self.is_human() {
            return;
        }
        self.print_json(data);
    }

    fn print_json(&self, data: &serde_json::Value) {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string(data).unwrap_or_default()),
            OutputFormat::JsonPretty => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default())
            }
            OutputFormat::Human => println!("{}", data),
        }
    }
}
