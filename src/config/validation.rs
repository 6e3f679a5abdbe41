//! Configuration validation utilities and rules

use crate::{
    models::Config,
    error::Result,
};
use colored::Colorize;
use std::collections::HashSet;
use std::net::IpAddr;

/// Timeouts below this may turn slow but valid responses into failures
const SHORT_TIMEOUT_SECONDS: u64 = 2;

/// Configuration validator for advisory checks beyond hard validation
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate configuration, returning advisory warnings on success
    pub fn validate_comprehensive(config: &Config) -> Result<Vec<ValidationWarning>> {
        let mut warnings = Vec::new();

        // Hard failures first
        config.validate()?;

        warnings.extend(Self::validate_target_url(&config.target_url));
        warnings.extend(Self::validate_usernames(&config.usernames));
        warnings.extend(Self::validate_timeout(config.timeout_seconds));

        Ok(warnings)
    }

    fn validate_target_url(target_url: &str) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        let Ok(parsed) = url::Url::parse(target_url) else {
            return warnings;
        };

        if parsed.scheme() == "http" {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!("URL '{}' uses HTTP, credentials are sent in cleartext", target_url),
            ));
        }

        match parsed.host() {
            Some(url::Host::Ipv4(ip)) if Self::is_local_address(&IpAddr::V4(ip)) => {
                warnings.push(ValidationWarning::new(
                    ValidationLevel::Info,
                    format!("Target host {} is a local or private address", ip),
                ));
            }
            Some(url::Host::Ipv6(ip)) if Self::is_local_address(&IpAddr::V6(ip)) => {
                warnings.push(ValidationWarning::new(
                    ValidationLevel::Info,
                    format!("Target host {} is a local address", ip),
                ));
            }
            Some(url::Host::Domain(domain)) if domain.eq_ignore_ascii_case("localhost") => {
                warnings.push(ValidationWarning::new(
                    ValidationLevel::Info,
                    "Target host is localhost".to_string(),
                ));
            }
            _ => {}
        }

        warnings
    }

    fn validate_usernames(usernames: &[String]) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        for username in usernames {
            if !seen.insert(username.as_str()) && reported.insert(username.as_str()) {
                warnings.push(ValidationWarning::new(
                    ValidationLevel::Warning,
                    format!("Username '{}' appears more than once and will be probed repeatedly", username),
                ));
            }
        }

        if usernames.len() == 1 {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                "Only one username configured, there is nothing to compare its timing against".to_string(),
            ));
        }

        warnings
    }

    fn validate_timeout(timeout_seconds: u64) -> Vec<ValidationWarning> {
        if timeout_seconds == 0 {
            vec![ValidationWarning::new(
                ValidationLevel::Info,
                "No request timeout set, an unresponsive server will stall the run".to_string(),
            )]
        } else if timeout_seconds < SHORT_TIMEOUT_SECONDS {
            vec![ValidationWarning::new(
                ValidationLevel::Warning,
                format!("Timeout of {}s may cut off slow login responses", timeout_seconds),
            )]
        } else {
            Vec::new()
        }
    }

    fn is_local_address(ip: &IpAddr) -> bool {
        match ip {
            IpAddr::V4(ipv4) => ipv4.is_loopback() || ipv4.is_private() || ipv4.is_link_local(),
            IpAddr::V6(ipv6) => ipv6.is_loopback(),
        }
    }
}

/// Validation warning levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationLevel {
    Info,
    Warning,
}

impl ValidationLevel {
    /// Get display string for level
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
        }
    }
}

/// Configuration validation warning
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub level: ValidationLevel,
    pub message: String,
}

impl ValidationWarning {
    /// Create a new validation warning
    pub fn new(level: ValidationLevel, message: String) -> Self {
        Self { level, message }
    }

    /// Format warning for display
    pub fn format(&self, use_color: bool) -> String {
        let tag = format!("[{}]", self.level.as_str());
        if use_color {
            let tag = match self.level {
                ValidationLevel::Info => tag.blue(),
                ValidationLevel::Warning => tag.yellow(),
            };
            format!("{} {}", tag, self.message)
        } else {
            format!("{} {}", tag, self.message)
        }
    }
}

/// Convenience function for comprehensive configuration validation
pub fn validate_config(config: &Config) -> Result<Vec<ValidationWarning>> {
    ConfigValidator::validate_comprehensive(config)
}
