//! Environment variable handling and .env file management

use crate::error::{AppError, Result};
use std::path::Path;

/// A variable read by `Config::merge_from_env`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvVar {
    pub key: &'static str,
    pub description: &'static str,
    pub example: String,
}

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Load .env from the current directory if it exists
    pub fn load_env_file(debug: bool) -> Result<()> {
        Self::load_env_file_from(Path::new(".env"), debug).map(|_| ())
    }

    /// Load a specific env file if it exists; variables already set win
    ///
    /// Returns whether a file was loaded.
    pub fn load_env_file_from(path: &Path, debug: bool) -> Result<bool> {
        if !path.exists() {
            if debug {
                eprintln!("No {} file found, using defaults and CLI arguments", path.display());
            }
            return Ok(false);
        }

        dotenv::from_path(path)
            .map_err(|e| AppError::config(format!("Failed to load {}: {}", path.display(), e)))?;

        if debug {
            eprintln!("Loaded configuration from {}", path.display());
        }
        Ok(true)
    }

    /// Every supported variable with a description and an example value
    pub fn get_supported_env_vars() -> Vec<EnvVar> {
        let var = |key, description, example: String| EnvVar { key, description, example };

        vec![
            var("PROBE_URL", "Login endpoint receiving the form POST", crate::defaults::DEFAULT_TARGET_URL.to_string()),
            var("PROBE_PASSWORD", "Password submitted with every username", crate::defaults::DEFAULT_PASSWORD.to_string()),
            var("PROBE_USERNAMES", "Usernames to probe, in order (comma-separated)", crate::defaults::DEFAULT_USERNAMES.join(",")),
            var(
                "PROBE_TIMEOUT_SECONDS",
                "Per-request timeout in seconds (0 waits indefinitely)",
                crate::defaults::DEFAULT_TIMEOUT_SECONDS.to_string(),
            ),
            var("PROBE_FAILURE_POLICY", "What to do when a request fails: fail-fast or continue", "fail-fast".to_string()),
            var("PROBE_OUTPUT", "Result line format: plain or json", "plain".to_string()),
            var("ENABLE_COLOR", "Enable colored diagnostics (true/false)", crate::defaults::DEFAULT_ENABLE_COLOR.to_string()),
        ]
    }

    /// Example .env content, every variable commented out at its default
    pub fn create_example_env_content() -> String {
        let mut content = String::from(
            "# Login Timing Probe Configuration\n\
             #\n\
             # Values here are used as defaults and can be overridden by environment\n\
             # variables already set in the shell, and by command-line arguments.\n",
        );

        for var in Self::get_supported_env_vars() {
            content.push_str(&format!("\n# {}\n# {}={}\n", var.description, var.key, var.example));
        }

        content
    }
}
