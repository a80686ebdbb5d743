use crate::config::toml_config::TomlConfig;
use crate::config::ClientSettings;
use crate::domain::model::{parse_domain_list, SearchType};
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "exa-search")]
#[command(version)]
#[command(about = "Search the web and get AI summaries of the pages you pick")]
pub struct CliConfig {
    /// Base URL of the search backend
    #[arg(long, env = "EXA_API_BASE_URL", global = true)]
    pub api_base_url: Option<String>,

    /// TOML config file; flags take precedence over its values
    #[arg(short, long, value_name = "FILE", env = "EXA_SEARCH_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, value_name = "SECS", global = true)]
    pub timeout_secs: Option<u64>,

    /// Directory for exported summaries
    #[arg(long, value_name = "DIR", global = true)]
    pub output_dir: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Check the backend status
    Health,

    /// Run one search and print the result cards
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        #[arg(short = 'n', long)]
        num_results: Option<u32>,

        #[arg(short = 't', long)]
        search_type: Option<SearchType>,

        /// Comma-separated domains to restrict results to
        #[arg(long)]
        include_domains: Option<String>,

        /// Comma-separated domains to leave out
        #[arg(long)]
        exclude_domains: Option<String>,

        /// Print the raw response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summarize 1 to 5 pages
    Summarize {
        #[arg(short, long)]
        query: String,

        #[arg(required = true, num_args = 1..=5, value_name = "URL")]
        urls: Vec<String>,

        /// Also write the summary to the output directory
        #[arg(long)]
        export: bool,

        #[arg(long)]
        json: bool,
    },

    /// Interactive session (default)
    Interactive,
}

impl CliConfig {
    /// Defaults, then the config file, then flags.
    pub fn settings(&self) -> Result<ClientSettings> {
        let mut settings = ClientSettings::default();

        if let Some(path) = &self.config {
            tracing::debug!("Loading config file {}", path.display());
            TomlConfig::from_file(path)?.apply_to(&mut settings);
        }

        if let Some(base_url) = &self.api_base_url {
            settings.base_url = base_url.clone();
        }
        if let Some(timeout) = self.timeout_secs {
            settings.timeout = Duration::from_secs(timeout);
        }
        if let Some(output_dir) = &self.output_dir {
            settings.output_dir = output_dir.clone();
        }

        if let Some(Command::Search {
            num_results,
            search_type,
            include_domains,
            exclude_domains,
            ..
        }) = &self.command
        {
            if let Some(n) = num_results {
                settings.search.num_results = *n;
            }
            if let Some(t) = search_type {
                settings.search.search_type = *t;
            }
            if let Some(raw) = include_domains {
                settings.search.include_domains = parse_domain_list(raw);
            }
            if let Some(raw) = exclude_domains {
                settings.search.exclude_domains = parse_domain_list(raw);
            }
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_no_subcommand_means_interactive() {
        let cli = CliConfig::try_parse_from(["exa-search", "--api-base-url", "http://localhost:8000"])
            .unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.settings().unwrap().base_url, "http://localhost:8000");
    }

    #[test]
    fn test_search_flags_override_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            b"[api]\nbase_url = \"http://file.example\"\n[search]\nnum_results = 3\nsearch_type = \"keyword\"\n",
        )
        .unwrap();
        let path = file.path().to_string_lossy().into_owned();

        let cli = CliConfig::try_parse_from([
            "exa-search",
            "--config",
            path.as_str(),
            "search",
            "rust",
            "borrow",
            "checker",
            "-n",
            "7",
            "--include-domains",
            "doc.rust-lang.org, ,github.com",
        ])
        .unwrap();
        let settings = cli.settings().unwrap();

        assert_eq!(settings.base_url, "http://file.example");
        assert_eq!(settings.search.num_results, 7);
        assert_eq!(settings.search.search_type, SearchType::Keyword);
        assert_eq!(
            settings.search.include_domains,
            Some(vec![
                "doc.rust-lang.org".to_string(),
                "github.com".to_string()
            ])
        );
        match cli.command {
            Some(Command::Search { query, .. }) => assert_eq!(query.join(" "), "rust borrow checker"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_summarize_accepts_at_most_five_urls() {
        let ok = CliConfig::try_parse_from([
            "exa-search",
            "summarize",
            "-q",
            "topic",
            "https://a.example",
            "https://b.example",
        ]);
        assert!(ok.is_ok());

        let too_many = CliConfig::try_parse_from([
            "exa-search",
            "summarize",
            "-q",
            "topic",
            "https://1.example",
            "https://2.example",
            "https://3.example",
            "https://4.example",
            "https://5.example",
            "https://6.example",
        ]);
        assert!(too_many.is_err());
    }
}
