//! Command-line interface

use crate::types::{FailurePolicy, OutputFormat};
use clap::{ArgAction, Parser};

/// Login Timing Probe - time login responses per username to spot timing side channels
#[derive(Parser, Debug, Clone)]
#[command(name = "login-timing-probe")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Login endpoint that receives the form POST
    #[arg(long)]
    pub url: Option<String>,

    /// Password submitted with every username
    #[arg(long)]
    pub password: Option<String>,

    /// Username to probe (can be used multiple times, order is kept)
    #[arg(long = "username", action = ArgAction::Append)]
    pub usernames: Vec<String>,

    /// Usernames to probe (comma-separated), appended after --username values
    #[arg(long = "usernames", value_name = "LIST")]
    pub username_list: Option<String>,

    /// Per-request timeout in seconds (default: wait indefinitely)
    #[arg(short, long, value_parser = parse_duration)]
    pub timeout: Option<u64>,

    /// What to do when a request fails: fail-fast or continue
    #[arg(long, value_parser = parse_failure_policy)]
    pub failure_policy: Option<FailurePolicy>,

    /// Output format for result lines: plain or json
    #[arg(short, long, value_parser = parse_output_format)]
    pub output: Option<OutputFormat>,

    /// Force colored diagnostics
    #[arg(long, conflicts_with = "no_color")]
    pub color: bool,

    /// Disable colored diagnostics
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose diagnostics on stderr
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug diagnostics on stderr
    #[arg(long)]
    pub debug: bool,

    /// Print an example .env file and exit
    #[arg(long)]
    pub print_env_example: bool,
}

impl Cli {
    /// Validate CLI arguments for conflicts and requirements
    pub fn validate(&self) -> Result<(), String> {
        if self.color && self.no_color {
            return Err("Cannot specify both --color and --no-color".to_string());
        }

        if self.usernames.iter().any(|u| u.is_empty()) {
            return Err("--username cannot be empty".to_string());
        }

        if let Some(ref list) = self.username_list {
            if crate::models::config::split_list(list).is_empty() {
                return Err("--usernames must contain at least one name".to_string());
            }
        }

        if let Some(ref url) = self.url {
            url::Url::parse(url).map_err(|e| format!("Invalid --url '{}': {}", url, e))?;
        }

        Ok(())
    }

    /// Usernames given on the command line, `None` when there are none
    pub fn get_usernames(&self) -> Option<Vec<String>> {
        let mut usernames = self.usernames.clone();

        if let Some(ref list) = self.username_list {
            usernames.extend(crate::models::config::split_list(list));
        }

        if usernames.is_empty() {
            None
        } else {
            Some(usernames)
        }
    }

    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        if self.color {
            true
        } else if self.no_color {
            false
        } else {
            supports_color()
        }
    }
}

/// Parse timeout seconds
fn parse_duration(s: &str) -> Result<u64, String> {
    if s.starts_with('+') || s.starts_with("0x") || s.starts_with("0X") {
        return Err(format!("Invalid duration: {}", s));
    }

    s.parse::<u64>()
        .map_err(|_| format!("Invalid duration: {}", s))
        .and_then(|secs| {
            if secs == 0 {
                Err("Duration must be greater than 0".to_string())
            } else if secs > crate::defaults::MAX_TIMEOUT_SECONDS {
                Err(format!("Duration cannot exceed {} seconds", crate::defaults::MAX_TIMEOUT_SECONDS))
            } else {
                Ok(secs)
            }
        })
}

fn parse_failure_policy(s: &str) -> Result<FailurePolicy, String> {
    s.parse().map_err(|e: crate::error::AppError| e.to_string())
}

fn parse_output_format(s: &str) -> Result<OutputFormat, String> {
    s.parse().map_err(|e: crate::error::AppError| e.to_string())
}

/// Check if the terminal supports color output
fn supports_color() -> bool {
    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    #[cfg(target_os = "windows")]
    {
        if std::env::var("ANSICON").is_ok() || std::env::var("ConEmuANSI").is_ok() {
            return true;
        }
    }

    #[cfg(unix)]
    {
        true
    }
    #[cfg(not(unix))]
    {
        false
    }
}
