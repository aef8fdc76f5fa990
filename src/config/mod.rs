pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::{LeaderboardError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "leaderboard")]
#[command(about = "Live team standings with rank changes between refreshes")]
pub struct CliConfig {
    /// Backend URL returning {"teams": [...]}
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Local JSON file with the same payload shape
    #[arg(long, conflicts_with = "endpoint")]
    pub records_file: Option<String>,

    /// TOML configuration file; flags override its values
    #[arg(short, long)]
    pub config: Option<String>,

    /// Keep polling until Ctrl-C
    #[arg(short, long)]
    pub watch: bool,

    #[arg(long)]
    pub interval_secs: Option<u64>,

    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Stop polling after this many refresh attempts
    #[arg(long)]
    pub max_ticks: Option<u64>,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit log lines as JSON")]
    pub json_logs: bool,
}

/// Effective settings after merging the TOML file and command-line flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub endpoint: Option<String>,
    pub records_file: Option<String>,
    pub headers: HashMap<String, String>,
    pub request_timeout: Duration,
    pub refresh_interval: Duration,
    pub watch: bool,
    pub max_ticks: Option<u64>,
    pub format: OutputFormat,
    pub verbose: bool,
    pub json_logs: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: None,
            records_file: None,
            headers: HashMap::new(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_INTERVAL_SECS),
            watch: false,
            max_ticks: None,
            format: OutputFormat::Table,
            verbose: false,
            json_logs: false,
        }
    }
}

impl Settings {
    pub fn from_toml(config: &TomlConfig) -> Self {
        let defaults = Self::default();
        Self {
            endpoint: config.source.endpoint.clone(),
            records_file: config.source.records_file.clone(),
            headers: config.source.headers.clone().unwrap_or_default(),
            request_timeout: config
                .source
                .timeout_seconds
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            refresh_interval: config
                .refresh
                .interval_seconds
                .map(Duration::from_secs)
                .unwrap_or(defaults.refresh_interval),
            watch: config.refresh.watch.unwrap_or(false),
            max_ticks: config.refresh.max_ticks,
            format: config.output.format.unwrap_or_default(),
            verbose: config.logging.verbose.unwrap_or(false),
            json_logs: config.logging.json.unwrap_or(false),
        }
    }

    /// Loads the TOML file named by `--config` (if any) and layers the flags on top.
    #[cfg(feature = "cli")]
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let base = match &cli.config {
            Some(path) => {
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                Self::from_toml(&file)
            }
            None => Self::default(),
        };
        Ok(base.with_cli(cli))
    }

    #[cfg(feature = "cli")]
    pub fn with_cli(mut self, cli: &CliConfig) -> Self {
        // a source flag replaces whichever source the file chose
        if cli.endpoint.is_some() || cli.records_file.is_some() {
            self.endpoint = cli.endpoint.clone();
            self.records_file = cli.records_file.clone();
        }
        if let Some(secs) = cli.interval_secs {
            self.refresh_interval = Duration::from_secs(secs);
        }
        if let Some(secs) = cli.timeout_secs {
            self.request_timeout = Duration::from_secs(secs);
        }
        if cli.max_ticks.is_some() {
            self.max_ticks = cli.max_ticks;
        }
        if let Some(format) = cli.format {
            self.format = format;
        }
        self.watch |= cli.watch;
        self.verbose |= cli.verbose;
        self.json_logs |= cli.json_logs;
        self
    }
}

impl ConfigProvider for Settings {
    fn source_endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    fn records_file(&self) -> Option<&str> {
        self.records_file.as_deref()
    }

    fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        if let Some(endpoint) = &self.endpoint {
            validation::validate_url("endpoint", endpoint)?;
        }
        if let Some(path) = &self.records_file {
            validation::validate_path("records_file", path)?;
        }
        if self.endpoint.is_some() && self.records_file.is_some() {
            return Err(LeaderboardError::ConfigValidationError {
                field: "source".to_string(),
                message: "set either an endpoint or a records file, not both".to_string(),
            });
        }
        validation::validate_range("interval_secs", self.refresh_interval.as_secs(), 1, 86_400)?;
        validation::validate_range("timeout_secs", self.request_timeout.as_secs(), 1, 300)?;
        if let Some(max_ticks) = self.max_ticks {
            validation::validate_range("max_ticks", max_ticks, 1, u64::MAX)?;
        }
        Ok(())
    }
}
