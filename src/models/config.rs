//! Configuration data model and validation

use crate::types::{AppError, FailurePolicy, OutputFormat, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Login endpoint receiving the form POST
    #[serde(default = "default_target_url")]
    pub target_url: String,

    /// Password sent with every username
    #[serde(default = "default_password")]
    pub password: String,

    /// Candidate usernames, probed in this order
    #[serde(default = "default_usernames")]
    pub usernames: Vec<String>,

    /// Per-request timeout in seconds, 0 waits indefinitely
    #[serde(default = "default_timeout_secs")]
    pub timeout_seconds: u64,

    /// What to do when a request fails
    #[serde(default)]
    pub failure_policy: FailurePolicy,

    /// Shape of the stdout lines
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Enable colored diagnostics on stderr
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_url: default_target_url(),
            password: default_password(),
            usernames: default_usernames(),
            timeout_seconds: default_timeout_secs(),
            failure_policy: FailurePolicy::default(),
            output_format: OutputFormat::default(),
            enable_color: default_enable_color(),
            verbose: false,
            debug: false,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Per-request timeout, `None` when disabled
    pub fn timeout(&self) -> Option<Duration> {
        if self.timeout_seconds == 0 {
            None
        } else {
            Some(Duration::from_secs(self.timeout_seconds))
        }
    }

    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Result<()> {
        if self.target_url.trim().is_empty() {
            return Err(AppError::config("Target URL cannot be empty"));
        }

        match url::Url::parse(&self.target_url) {
            Ok(parsed) => {
                if parsed.scheme() != "http" && parsed.scheme() != "https" {
                    return Err(AppError::config(format!(
                        "Target URL must use http or https: {}",
                        self.target_url
                    )));
                }
                if parsed.host_str().is_none() {
                    return Err(AppError::config(format!("Target URL has no host: {}", self.target_url)));
                }
            }
            Err(e) => {
                return Err(AppError::config(format!("Invalid target URL '{}': {}", self.target_url, e)));
            }
        }

        if self.usernames.is_empty() {
            return Err(AppError::config("At least one username is required"));
        }

        for (index, username) in self.usernames.iter().enumerate() {
            if username.is_empty() {
                return Err(AppError::config(format!("Username at position {} is empty", index + 1)));
            }
        }

        if self.timeout_seconds > crate::defaults::MAX_TIMEOUT_SECONDS {
            return Err(AppError::config(format!(
                "Timeout cannot exceed {} seconds",
                crate::defaults::MAX_TIMEOUT_SECONDS
            )));
        }

        Ok(())
    }

    /// Merge environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        if let Ok(url) = std::env::var("PROBE_URL") {
            self.target_url = url.trim().to_string();
        }

        if let Ok(password) = std::env::var("PROBE_PASSWORD") {
            self.password = password;
        }

        if let Ok(usernames) = std::env::var("PROBE_USERNAMES") {
            self.usernames = split_list(&usernames);
        }

        if let Ok(timeout) = std::env::var("PROBE_TIMEOUT_SECONDS") {
            self.timeout_seconds = timeout.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid PROBE_TIMEOUT_SECONDS value '{}': {}", timeout, e)))?;
        }

        if let Ok(policy) = std::env::var("PROBE_FAILURE_POLICY") {
            self.failure_policy = policy.parse()
                .map_err(|e: AppError| AppError::config(format!("Invalid PROBE_FAILURE_POLICY: {}", e)))?;
        }

        if let Ok(output) = std::env::var("PROBE_OUTPUT") {
            self.output_format = output.parse()
                .map_err(|e: AppError| AppError::config(format!("Invalid PROBE_OUTPUT: {}", e)))?;
        }

        if let Ok(enable_color) = std::env::var("ENABLE_COLOR") {
            self.enable_color = enable_color.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid ENABLE_COLOR value '{}': {}", enable_color, e)))?;
        }

        Ok(())
    }
}

/// Split a comma-separated list, dropping blanks
pub(crate) fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

// Default value functions for serde
fn default_target_url() -> String {
    crate::defaults::DEFAULT_TARGET_URL.to_string()
}

fn default_password() -> String {
    crate::defaults::DEFAULT_PASSWORD.to_string()
}

fn default_usernames() -> Vec<String> {
    crate::defaults::DEFAULT_USERNAMES
        .iter()
        .map(|&s| s.to_string())
        .collect()
}

fn default_timeout_secs() -> u64 {
    crate::defaults::DEFAULT_TIMEOUT_SECONDS
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_match_reference_probe() {
        let config = Config::default();
        assert_eq!(config.target_url, "http://185.143.102.102:8080/login");
        assert_eq!(config.password, "password");
        assert_eq!(config.usernames.len(), 8);
        assert_eq!(config.usernames[0], "michelle.obama");
        assert_eq!(config.usernames[4], "jane.doe");
        assert_eq!(config.usernames[7], "olivier.lemer");
        assert_eq!(config.timeout(), None);
        assert_eq!(config.failure_policy, FailurePolicy::FailFast);
        assert_eq!(config.output_format, OutputFormat::Plain);
    }

    #[test]
    fn test_empty_target_url_invalid() {
        let mut config = Config::default();
        config.target_url = "".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_target_url_format() {
        let mut config = Config::default();
        config.target_url = "not-a-url".to_string();
        assert!(config.validate().is_err());

        config.target_url = "ftp://example.com/login".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_https_target_is_valid() {
        let mut config = Config::default();
        config.target_url = "https://example.com/login".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_username_list_invalid() {
        let mut config = Config::default();
        config.usernames.clear();
        let error = config.validate().unwrap_err();
        assert!(error.to_string().contains("At least one username"));
    }

    #[test]
    fn test_empty_username_entry_invalid() {
        let mut config = Config::default();
        config.usernames = vec!["alice".to_string(), "".to_string()];
        let error = config.validate().unwrap_err();
        assert!(error.to_string().contains("position 2"));
    }

    #[test]
    fn test_timeout_bounds() {
        let mut config = Config::default();
        config.timeout_seconds = 300;
        assert!(config.validate().is_ok());
        assert_eq!(config.timeout(), Some(Duration::from_secs(300)));

        config.timeout_seconds = 301;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("a, b,,c ,"), vec!["a", "b", "c"]);
        assert!(split_list(" , ").is_empty());
    }

    #[test]
    fn test_serde_defaults_fill_missing_fields() {
        let config: Config = serde_json::from_str(r#"{"usernames": ["x"], "failure_policy": "continue"}"#).unwrap();
        assert_eq!(config.usernames, vec!["x"]);
        assert_eq!(config.failure_policy, FailurePolicy::Continue);
        assert_eq!(config.password, "password");
        assert_eq!(config.target_url, crate::defaults::DEFAULT_TARGET_URL);
    }
}
