pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{HttpSearchApi, LocalStorage, SystemClipboard};
pub use app::{Controller, Outcome, Repl};
pub use config::ClientSettings;
pub use crate::core::session::{SearchOptions, Session, View};
pub use utils::error::{ClientError, Result};
