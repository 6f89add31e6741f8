pub mod actions;
pub mod auto_sync;
pub mod config;
pub mod list;
pub mod show;
pub mod watch;

mod context;
mod progress;
mod prompts;
