use crate::config::OutputFormat;
use crate::utils::error::{LeaderboardError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    pub endpoint: Option<String>,
    pub records_file: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefreshConfig {
    pub interval_seconds: Option<u64>,
    pub watch: Option<bool>,
    pub max_ticks: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LeaderboardError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| LeaderboardError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${LEADERBOARD_URL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| LeaderboardError::ConfigError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(endpoint) = &self.source.endpoint {
            validation::validate_url("source.endpoint", endpoint)?;
        }

        if let Some(path) = &self.source.records_file {
            validation::validate_path("source.records_file", path)?;
        }

        if self.source.endpoint.is_some() && self.source.records_file.is_some() {
            return Err(LeaderboardError::ConfigValidationError {
                field: "source".to_string(),
                message: "set either 'endpoint' or 'records_file', not both".to_string(),
            });
        }

        if let Some(timeout) = self.source.timeout_seconds {
            validation::validate_range("source.timeout_seconds", timeout, 1, 300)?;
        }

        if let Some(headers) = &self.source.headers {
            for name in headers.keys() {
                validation::validate_non_empty_string("source.headers", name)?;
            }
        }

        if let Some(interval) = self.refresh.interval_seconds {
            validation::validate_range("refresh.interval_seconds", interval, 1, 86_400)?;
        }

        Ok(())
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
endpoint = "http://localhost:5000/user/get-all-teams"
timeout_seconds = 5

[source.headers]
x-event-key = "hunt"

[refresh]
interval_seconds = 15
watch = true

[output]
format = "json"

[logging]
json = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(
            config.source.endpoint.as_deref(),
            Some("http://localhost:5000/user/get-all-teams")
        );
        assert_eq!(config.refresh.interval_seconds, Some(15));
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert_eq!(config.logging.json, Some(true));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert!(config.source.endpoint.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("LEADERBOARD_TEST_ENDPOINT", "https://scores.example.com/teams");

        let toml_content = r#"
[source]
endpoint = "${LEADERBOARD_TEST_ENDPOINT}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.source.endpoint.as_deref(),
            Some("https://scores.example.com/teams")
        );

        std::env::remove_var("LEADERBOARD_TEST_ENDPOINT");
    }

    #[test]
    fn test_config_validation() {
        let bad_url = TomlConfig::from_toml_str("[source]\nendpoint = \"invalid-url\"\n").unwrap();
        assert!(bad_url.validate().is_err());

        let both = TomlConfig::from_toml_str(
            "[source]\nendpoint = \"http://a.test/\"\nrecords_file = \"teams.json\"\n",
        )
        .unwrap();
        assert!(both.validate().is_err());

        let zero_interval = TomlConfig::from_toml_str("[refresh]\ninterval_seconds = 0\n").unwrap();
        assert!(zero_interval.validate().is_err());
    }

    #[test]
    fn test_unknown_format_fails_to_parse() {
        assert!(TomlConfig::from_toml_str("[output]\nformat = \"xml\"\n").is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[source]\nrecords_file = \"teams.json\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.source.records_file.as_deref(), Some("teams.json"));
    }
}
