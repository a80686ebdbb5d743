use crate::config::ClientSettings;
use crate::domain::model::{parse_domain_list, SearchType};
use crate::utils::error::{ClientError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub api: Option<ApiConfig>,
    pub search: Option<SearchConfig>,
    pub export: Option<ExportConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchConfig {
    pub num_results: Option<u32>,
    pub search_type: Option<SearchType>,
    pub include_domains: Option<DomainList>,
    pub exclude_domains: Option<DomainList>,
}

/// Domains may be written as a TOML array or a comma-separated string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DomainList {
    List(Vec<String>),
    Csv(String),
}

impl DomainList {
    pub fn normalized(&self) -> Option<Vec<String>> {
        match self {
            DomainList::List(items) => parse_domain_list(&items.join(",")),
            DomainList::Csv(raw) => parse_domain_list(raw),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    pub output_dir: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ClientError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ClientError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${EXA_API_BASE_URL})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ClientError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Overlays the values present in the file onto `settings`.
    pub fn apply_to(&self, settings: &mut ClientSettings) {
        if let Some(api) = &self.api {
            if let Some(base_url) = &api.base_url {
                settings.base_url = base_url.clone();
            }
            if let Some(timeout) = api.timeout_seconds {
                settings.timeout = Duration::from_secs(timeout);
            }
            if let Some(user_agent) = &api.user_agent {
                settings.user_agent = user_agent.clone();
            }
        }

        if let Some(search) = &self.search {
            if let Some(n) = search.num_results {
                settings.search.num_results = n;
            }
            if let Some(search_type) = search.search_type {
                settings.search.search_type = search_type;
            }
            if let Some(domains) = &search.include_domains {
                settings.search.include_domains = domains.normalized();
            }
            if let Some(domains) = &search.exclude_domains {
                settings.search.exclude_domains = domains.normalized();
            }
        }

        if let Some(output_dir) = self.export.as_ref().and_then(|e| e.output_dir.as_ref()) {
            settings.output_dir = output_dir.clone();
        }
    }
}
