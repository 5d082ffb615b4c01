use crate::utils::error::{Result, ScrapeError};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub watch: WatchConfig,
    #[serde(default)]
    pub load: LoadConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    pub api_base: Option<String>,
    pub user_agent: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub rate_limit_wait_seconds: Option<u64>,
    pub concurrent_requests: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatchConfig {
    pub teams: Option<Vec<String>>,
    pub refresh_minutes: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoadConfig {
    pub output_path: Option<String>,
    pub output_file: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScrapeError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| ScrapeError::ProcessingError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn verbose(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.verbose).unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[source]
api_base = "https://api-web.nhle.com/v1"
user_agent = "hockey-bot/1.0"
timeout_seconds = 15
rate_limit_wait_seconds = 10
concurrent_requests = 4

[watch]
teams = ["TOR", "MTL"]
refresh_minutes = 2

[load]
output_path = "./data"
output_file = "leaders.csv"

[logging]
verbose = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.source.concurrent_requests, Some(4));
        assert_eq!(
            config.watch.teams,
            Some(vec!["TOR".to_string(), "MTL".to_string()])
        );
        assert_eq!(config.load.output_file.as_deref(), Some("leaders.csv"));
        assert!(config.verbose());
        assert!(!config.json_logs());
    }

    #[test]
    fn test_empty_document_is_all_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.source.api_base.is_none());
        assert!(config.watch.teams.is_none());
        assert!(!config.verbose());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("NHL_SCRAPE_TEST_API_BASE", "http://localhost:9999");

        let toml_content = r#"
[source]
api_base = "${NHL_SCRAPE_TEST_API_BASE}"
user_agent = "${NHL_SCRAPE_TEST_UNSET_VAR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.source.api_base.as_deref(), Some("http://localhost:9999"));
        assert_eq!(
            config.source.user_agent.as_deref(),
            Some("${NHL_SCRAPE_TEST_UNSET_VAR}")
        );

        std::env::remove_var("NHL_SCRAPE_TEST_API_BASE");
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = TomlConfig::from_toml_str("[watch]\nteam = [\"TOR\"]\n").unwrap_err();
        assert!(matches!(err, ScrapeError::TomlError(_)));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[watch]\nrefresh_minutes = 10\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.watch.refresh_minutes, Some(10));
    }

    #[test]
    fn test_example_config_parses() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/nhl-scrape.example.toml");
        let config = TomlConfig::from_file(path).unwrap();

        assert_eq!(config.watch.refresh_minutes, Some(5));
        assert_eq!(config.load.output_path.as_deref(), Some("data"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = TomlConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ScrapeError::IoError(_)));
    }
}
