//! Configuration parsing from CLI arguments and environment variables

use crate::{
    cli::Cli,
    models::Config,
    error::Result,
    config::env::EnvManager,
};

/// Configuration parser that layers CLI arguments over environment variables
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    /// Create a new configuration parser with CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parse and build the complete configuration
    ///
    /// Precedence, highest first: command line, process environment,
    /// `.env` file, built-in defaults.
    pub fn parse(&self) -> Result<Config> {
        let mut config = Config::default();

        // .env never overrides variables already present in the environment
        EnvManager::load_env_file(self.cli.debug)?;

        config.merge_from_env()?;
        self.apply_cli_overrides(&mut config);
        config.validate()?;

        Ok(config)
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(&self, config: &mut Config) {
        if let Some(ref url) = self.cli.url {
            config.target_url = url.trim().to_string();
        }

        if let Some(ref password) = self.cli.password {
            config.password = password.clone();
        }

        if let Some(usernames) = self.cli.get_usernames() {
            config.usernames = usernames;
        }

        if let Some(timeout) = self.cli.timeout {
            config.timeout_seconds = timeout;
        }

        if let Some(policy) = self.cli.failure_policy {
            config.failure_policy = policy;
        }

        if let Some(output) = self.cli.output {
            config.output_format = output;
        }

        if self.cli.no_color {
            config.enable_color = false;
        } else if self.cli.color {
            config.enable_color = true;
        }

        // CLI-only switches
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;

        if config.debug {
            eprintln!("Applied CLI overrides to configuration");
            eprintln!(
                "Final config: url={}, usernames={}, timeout={}s, policy={}, output={}",
                config.target_url,
                config.usernames.len(),
                config.timeout_seconds,
                config.failure_policy,
                config.output_format
            );
        }
    }
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<Config> {
    let parser = ConfigParser::new(cli);
    parser.parse()
}

/// Display configuration summary for debug purposes
///
/// The password is masked.
pub fn display_config_summary(config: &Config) -> String {
    let timeout = match config.timeout() {
        Some(timeout) => format!("{}s", timeout.as_secs()),
        None => "none".to_string(),
    };

    let summary = [
        format!("Target URL: {}", config.target_url),
        format!("Password: {}", "*".repeat(config.password.chars().count().min(8))),
        format!("Usernames ({}): {}", config.usernames.len(), config.usernames.join(", ")),
        format!("Timeout: {}", timeout),
        format!("Failure Policy: {}", config.failure_policy),
        format!("Output Format: {}", config.output_format),
        format!("Color Output: {}", config.enable_color),
        format!("Verbose: {}", config.verbose),
        format!("Debug: {}", config.debug),
    ];

    summary.join("\n")
}
