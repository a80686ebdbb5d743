#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::http::DEFAULT_USER_AGENT;
use crate::core::session::SearchOptions;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_domains, validate_non_empty_string, validate_path, validate_positive_number,
    validate_range, validate_url, Validate,
};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://exa-fastapi-backend.onrender.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_OUTPUT_DIR: &str = "./output";
pub const MAX_NUM_RESULTS: u32 = 100;

/// Fully resolved client settings (file config overlaid with CLI flags).
#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
    pub output_dir: String,
    pub search: SearchOptions,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            search: SearchOptions::default(),
        }
    }
}

impl Validate for ClientSettings {
    fn validate(&self) -> Result<()> {
        validate_url("api.base_url", &self.base_url)?;
        validate_positive_number("api.timeout_seconds", self.timeout.as_secs(), 1)?;
        validate_non_empty_string("api.user_agent", &self.user_agent)?;
        validate_path("export.output_dir", &self.output_dir)?;
        validate_range(
            "search.num_results",
            self.search.num_results,
            1,
            MAX_NUM_RESULTS,
        )?;
        if let Some(domains) = &self.search.include_domains {
            validate_domains("search.include_domains", domains)?;
        }
        if let Some(domains) = &self.search.exclude_domains {
            validate_domains("search.exclude_domains", domains)?;
        }
        Ok(())
    }
}
