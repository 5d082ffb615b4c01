pub mod cli;
pub mod toml_config;

use crate::core::teams::{default_teams, normalize_teams};
use crate::core::ConfigProvider;
use crate::utils::error::{Result, ScrapeError};
use crate::utils::validation::{self, Validate};
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_API_BASE: &str = "https://api-web.nhle.com/v1";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_OUTPUT_PATH: &str = "data";
pub const DEFAULT_OUTPUT_FILE: &str = "nhl_leaders_live.csv";
pub const DEFAULT_REFRESH_MINUTES: u64 = 5;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_RATE_LIMIT_WAIT_SECONDS: u64 = 5;
pub const DEFAULT_CONCURRENT_REQUESTS: usize = 4;

/// Fully resolved scraper settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeSettings {
    pub api_base: String,
    pub teams: Vec<String>,
    pub output_path: String,
    pub output_file: String,
    pub refresh_minutes: u64,
    pub concurrent_requests: usize,
    pub timeout_seconds: u64,
    pub rate_limit_wait_seconds: u64,
    pub user_agent: String,
    pub verbose: bool,
    pub json_logs: bool,
}

impl Default for ScrapeSettings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            teams: default_teams(),
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            refresh_minutes: DEFAULT_REFRESH_MINUTES,
            concurrent_requests: DEFAULT_CONCURRENT_REQUESTS,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            rate_limit_wait_seconds: DEFAULT_RATE_LIMIT_WAIT_SECONDS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            verbose: false,
            json_logs: false,
        }
    }
}

impl ScrapeSettings {
    /// Layers a config file over the defaults.
    pub fn apply_toml(mut self, file: &TomlConfig) -> Self {
        if let Some(v) = &file.source.api_base {
            self.api_base = v.clone();
        }
        if let Some(v) = &file.source.user_agent {
            self.user_agent = v.clone();
        }
        if let Some(v) = file.source.timeout_seconds {
            self.timeout_seconds = v;
        }
        if let Some(v) = file.source.rate_limit_wait_seconds {
            self.rate_limit_wait_seconds = v;
        }
        if let Some(v) = file.source.concurrent_requests {
            self.concurrent_requests = v;
        }
        if let Some(v) = &file.watch.teams {
            self.teams = v.clone();
        }
        if let Some(v) = file.watch.refresh_minutes {
            self.refresh_minutes = v;
        }
        if let Some(v) = &file.load.output_path {
            self.output_path = v.clone();
        }
        if let Some(v) = &file.load.output_file {
            self.output_file = v.clone();
        }
        self.verbose |= file.verbose();
        self.json_logs |= file.json_logs();
        self
    }

    /// Validates every field and normalizes the team list.
    pub fn finalize(mut self) -> Result<Self> {
        self.teams = normalize_teams(self.teams.as_slice())?;
        self.validate()?;
        Ok(self)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_minutes * 60)
    }
}

impl Validate for ScrapeSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api_base", &self.api_base)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_file_name("output_file", &self.output_file)?;
        validation::validate_range("refresh_minutes", self.refresh_minutes, 1, 24 * 60)?;
        validation::validate_range("concurrent_requests", self.concurrent_requests, 1, 32)?;
        validation::validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
        validation::validate_non_empty_string("user_agent", &self.user_agent)?;

        if self.timeout_seconds >= self.refresh_minutes * 60 {
            return Err(ScrapeError::ConfigValidationError {
                field: "timeout_seconds".to_string(),
                message: format!(
                    "Request timeout ({}s) must be shorter than the refresh interval ({} min)",
                    self.timeout_seconds, self.refresh_minutes
                ),
            });
        }
        Ok(())
    }
}

impl ConfigProvider for ScrapeSettings {
    fn api_base(&self) -> &str {
        &self.api_base
    }

    fn teams(&self) -> &[String] {
        &self.teams
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_file(&self) -> &str {
        &self.output_file
    }

    fn concurrent_requests(&self) -> usize {
        self.concurrent_requests
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn rate_limit_wait(&self) -> Duration {
        Duration::from_secs(self.rate_limit_wait_seconds)
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

#[cfg(feature = "cli")]
pub use cli_args::CliConfig;

#[cfg(feature = "cli")]
mod cli_args {
    use super::{ScrapeSettings, TomlConfig};
    use crate::utils::error::Result;
    use clap::Parser;

    #[derive(Debug, Clone, Default, Parser)]
    #[command(name = "nhl-scrape")]
    #[command(about = "Keeps a live NHL skater leaderboard CSV up to date")]
    pub struct CliConfig {
        /// TOML configuration file; flags given on the command line take precedence
        #[arg(short, long)]
        pub config: Option<String>,

        /// Base URL of the NHL web API
        #[arg(long)]
        pub api_base: Option<String>,

        /// Comma-separated team abbreviations (default: all 32 clubs)
        #[arg(long, value_delimiter = ',')]
        pub teams: Option<Vec<String>>,

        /// Directory the CSV is written to
        #[arg(long)]
        pub output_path: Option<String>,

        /// CSV file name inside the output directory
        #[arg(long)]
        pub output_file: Option<String>,

        /// Minutes between refresh cycles
        #[arg(long)]
        pub refresh_minutes: Option<u64>,

        /// Teams fetched in parallel
        #[arg(long)]
        pub concurrent_requests: Option<usize>,

        /// Per-request timeout
        #[arg(long)]
        pub timeout_seconds: Option<u64>,

        /// Pause after a 429 when the API sends no Retry-After
        #[arg(long)]
        pub rate_limit_wait_seconds: Option<u64>,

        #[arg(long)]
        pub user_agent: Option<String>,

        /// Run a single cycle and exit
        #[arg(long)]
        pub once: bool,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON lines")]
        pub log_json: bool,
    }

    impl CliConfig {
        /// Defaults, then the config file, then explicit flags.
        pub fn resolve(&self) -> Result<ScrapeSettings> {
            let mut settings = ScrapeSettings::default();

            if let Some(path) = &self.config {
                settings = settings.apply_toml(&TomlConfig::from_file(path)?);
            }

            if let Some(v) = &self.api_base {
                settings.api_base = v.clone();
            }
            if let Some(v) = &self.teams {
                settings.teams = v.clone();
            }
            if let Some(v) = &self.output_path {
                settings.output_path = v.clone();
            }
            if let Some(v) = &self.output_file {
                settings.output_file = v.clone();
            }
            if let Some(v) = self.refresh_minutes {
                settings.refresh_minutes = v;
            }
            if let Some(v) = self.concurrent_requests {
                settings.concurrent_requests = v;
            }
            if let Some(v) = self.timeout_seconds {
                settings.timeout_seconds = v;
            }
            if let Some(v) = self.rate_limit_wait_seconds {
                settings.rate_limit_wait_seconds = v;
            }
            if let Some(v) = &self.user_agent {
                settings.user_agent = v.clone();
            }
            settings.verbose |= self.verbose;
            settings.json_logs |= self.log_json;

            settings.finalize()
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use std::io::Write;
        use tempfile::NamedTempFile;

        #[test]
        fn test_parse_flags() {
            let cli = CliConfig::parse_from([
                "nhl-scrape",
                "--teams",
                "tor,mtl",
                "--refresh-minutes",
                "1",
                "--once",
            ]);

            assert!(cli.once);
            let settings = cli.resolve().unwrap();
            assert_eq!(settings.teams, vec!["TOR", "MTL"]);
            assert_eq!(settings.refresh_minutes, 1);
            assert_eq!(settings.output_file, "nhl_leaders_live.csv");
        }

        #[test]
        fn test_flags_override_config_file() {
            let mut file = NamedTempFile::new().unwrap();
            file.write_all(
                b"[watch]\nteams = [\"BOS\", \"BUF\"]\nrefresh_minutes = 15\n\n[load]\noutput_file = \"file.csv\"\n",
            )
            .unwrap();

            let cli = CliConfig::parse_from([
                "nhl-scrape",
                "--config",
                file.path().to_str().unwrap(),
                "--output-file",
                "flag.csv",
            ]);
            let settings = cli.resolve().unwrap();

            assert_eq!(settings.teams, vec!["BOS", "BUF"]);
            assert_eq!(settings.refresh_minutes, 15);
            assert_eq!(settings.output_file, "flag.csv");
        }

        #[test]
        fn test_resolve_rejects_invalid_values() {
            let cli = CliConfig::parse_from(["nhl-scrape", "--concurrent-requests", "0"]);
            assert!(cli.resolve().is_err());

            let cli = CliConfig::parse_from(["nhl-scrape", "--api-base", "not a url"]);
            assert!(cli.resolve().is_err());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = ScrapeSettings::default().finalize().unwrap();

        assert_eq!(settings.teams.len(), 32);
        assert_eq!(settings.refresh_interval(), Duration::from_secs(300));
        assert_eq!(settings.request_timeout(), Duration::from_secs(10));
        assert_eq!(settings.rate_limit_wait(), Duration::from_secs(5));
        assert_eq!(settings.user_agent(), "Mozilla/5.0");
    }

    #[test]
    fn test_apply_toml_overrides_only_present_keys() {
        let file = TomlConfig::from_toml_str(
            "[source]\nconcurrent_requests = 8\n\n[logging]\njson = true\n",
        )
        .unwrap();

        let settings = ScrapeSettings::default().apply_toml(&file);

        assert_eq!(settings.concurrent_requests, 8);
        assert!(settings.json_logs);
        assert_eq!(settings.api_base, DEFAULT_API_BASE);
        assert_eq!(settings.output_path, DEFAULT_OUTPUT_PATH);
    }

    #[test]
    fn test_finalize_rejects_bad_team() {
        let settings = ScrapeSettings {
            teams: vec!["TOR".to_string(), "12".to_string()],
            ..Default::default()
        };
        assert!(settings.finalize().is_err());
    }

    #[test]
    fn test_timeout_must_fit_inside_refresh_interval() {
        let settings = ScrapeSettings {
            refresh_minutes: 1,
            timeout_seconds: 60,
            ..Default::default()
        };

        let err = settings.validate().unwrap_err();
        assert!(matches!(
            err,
            ScrapeError::ConfigValidationError { ref field, .. } if field == "timeout_seconds"
        ));

        let settings = ScrapeSettings {
            refresh_minutes: 1,
            timeout_seconds: 59,
            ..Default::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_refresh_upper_bound() {
        let settings = ScrapeSettings {
            refresh_minutes: 24 * 60 + 1,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }
}
