//! Main application orchestration and execution

use crate::{
    cli::Cli,
    client::HttpLoginClient,
    config::{display_config_summary, load_config, validate_config},
    error::{AppError, Result},
    logging::LoggerFactory,
    models::{Config, ProbeSummary},
    output::OutputFormatterFactory,
    prober::{ProbeTarget, Prober},
    types::FailurePolicy,
};
use std::io::Write;

/// Main application struct that coordinates all components
pub struct App {
    cli: Cli,
}

impl App {
    /// Create a new application instance with CLI configuration
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run against the process stdout and stderr
    pub async fn run(self) -> Result<ProbeSummary> {
        let mut stdout = std::io::stdout();
        let mut stderr = std::io::stderr();
        self.run_with(&mut stdout, &mut stderr).await
    }

    /// Run, writing result lines to `out` and diagnostics to `errors`
    pub async fn run_with<W, E>(self, out: &mut W, errors: &mut E) -> Result<ProbeSummary>
    where
        W: Write + ?Sized,
        E: Write + ?Sized,
    {
        let mut config = load_config(self.cli.clone())?;
        config.enable_color = self.effective_color(&config);

        let warnings = validate_config(&config)?;

        let factory = LoggerFactory::new(config.clone());
        let app_logger = factory.create_logger("APP");

        app_logger.debug(&format!("{} v{}", crate::PKG_NAME, crate::VERSION)).log();

        if config.debug {
            writeln!(errors, "Configuration Summary:\n{}", display_config_summary(&config))?;
        }

        if (config.verbose || config.debug) && !warnings.is_empty() {
            writeln!(errors, "Configuration Warnings:")?;
            for warning in &warnings {
                writeln!(errors, "  {}", warning.format(config.enable_color))?;
            }
        }

        let summary = Self::probe(&config, &factory, out, errors).await?;

        if config.failure_policy == FailurePolicy::Continue && !summary.all_completed() {
            return Err(AppError::probe_failed(format!(
                "{} of {} probes failed",
                summary.failed,
                summary.total()
            )));
        }

        Ok(summary)
    }

    async fn probe<W, E>(
        config: &Config,
        factory: &LoggerFactory,
        out: &mut W,
        errors: &mut E,
    ) -> Result<ProbeSummary>
    where
        W: Write + ?Sized,
        E: Write + ?Sized,
    {
        let client = HttpLoginClient::with_timeout(config.timeout())?;
        let prober = Prober::new(client, ProbeTarget::from_config(config))
            .with_logger(factory.create_probe_logger());
        let formatter = OutputFormatterFactory::create_formatter(config.output_format);

        prober.run(out, errors, formatter.as_ref(), config.failure_policy).await
    }

    /// `--color` forces color; otherwise config and terminal must both allow it
    fn effective_color(&self, config: &Config) -> bool {
        if self.cli.color {
            true
        } else {
            config.enable_color && self.cli.use_colors()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::clean_env;
    use clap::Parser;
    use wiremock::{matchers::{method, path}, Mock, MockServer, ResponseTemplate};

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["login-timing-probe", "--no-color"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    #[tokio::test]
    async fn test_run_prints_one_line_per_username() {
        let _guard = clean_env();
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(401))
            .expect(2)
            .mount(&server)
            .await;

        let url = format!("{}/login", server.uri());
        let app = App::new(cli(&["--url", &url, "--usernames", "alice,bob"]));

        let mut out = Vec::new();
        let mut errors = Vec::new();
        let summary = app.run_with(&mut out, &mut errors).await.unwrap();
        assert_eq!(summary.completed, 2);

        let out = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Username: alice, Response Time: "));
        assert!(lines[1].starts_with("Username: bob, Response Time: "));
        assert!(errors.is_empty());
    }

    #[tokio::test]
    async fn test_continue_with_failures_is_probe_failed() {
        let _guard = clean_env();
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let url = format!("http://127.0.0.1:{}/login", port);
        let app = App::new(cli(&[
            "--url", &url,
            "--usernames", "alice,bob",
            "--failure-policy", "continue",
            "--timeout", "5",
        ]));

        let mut out = Vec::new();
        let mut errors = Vec::new();
        let error = app.run_with(&mut out, &mut errors).await.unwrap_err();
        assert!(matches!(error, AppError::ProbeFailed(_)));
        assert_eq!(error.exit_code(), 6);

        assert!(out.is_empty());
        let errors = String::from_utf8(errors).unwrap();
        assert!(errors.contains("Username: alice, Error: "));
        assert!(errors.contains("Username: bob, Error: "));
    }

    #[tokio::test]
    async fn test_fail_fast_propagates_transport_error() {
        let _guard = clean_env();
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let url = format!("http://127.0.0.1:{}/login", port);
        let app = App::new(cli(&["--url", &url, "--usernames", "alice,bob"]));

        let mut out = Vec::new();
        let mut errors = Vec::new();
        let error = app.run_with(&mut out, &mut errors).await.unwrap_err();
        assert!(error.is_transport(), "unexpected error: {:?}", error);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_config_sends_nothing() {
        let _guard = clean_env();
        let app = App::new(cli(&["--url", "ftp://example.com/login"]));

        let mut out = Vec::new();
        let mut errors = Vec::new();
        let error = app.run_with(&mut out, &mut errors).await.unwrap_err();
        assert_eq!(error.exit_code(), 1);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_verbose_writes_warnings_to_errors_only() {
        let _guard = clean_env();
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let url = format!("{}/login", server.uri());
        let app = App::new(cli(&["--url", &url, "--username", "alice", "--verbose"]));

        let mut out = Vec::new();
        let mut errors = Vec::new();
        app.run_with(&mut out, &mut errors).await.unwrap();

        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.lines().count(), 1);

        let errors = String::from_utf8(errors).unwrap();
        assert!(errors.contains("Configuration Warnings:"));
        assert!(errors.contains("cleartext"));
    }
}
