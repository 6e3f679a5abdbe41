//! Error handling for the login timing probe
//!
//! Every failure the binary can hit maps onto one [`AppError`] variant, and
//! each variant owns a process exit code. Transport variants are the only ones
//! a single probe can produce; the rest stop the run before the first request
//! or after the last one.

use colored::{ColoredString, Colorize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Bad or contradictory settings from the CLI, environment or `.env`
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connect, DNS, TLS or reset while talking to the login endpoint
    #[error("Network error: {0}")]
    Network(String),

    /// The exchange started but the response could not be completed
    #[error("HTTP request error: {0}")]
    HttpRequest(String),

    #[error("Timeout error: {0}")]
    Timeout(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Writing result lines or reading the `.env` file failed
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Parsing error: {0}")]
    Parse(String),

    /// Raised after a continue-policy run in which some usernames failed
    #[error("Probe failed: {0}")]
    ProbeFailed(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

macro_rules! error_constructors {
    ($($name:ident => $variant:ident),* $(,)?) => {
        impl AppError {
            $(
                pub fn $name<S: Into<String>>(message: S) -> Self {
                    Self::$variant(message.into())
                }
            )*
        }
    };
}

error_constructors! {
    config => Config,
    network => Network,
    http_request => HttpRequest,
    timeout => Timeout,
    validation => Validation,
    io => Io,
    parse => Parse,
    probe_failed => ProbeFailed,
    internal => Internal,
}

impl AppError {
    /// Short tag used in console reports and log fields
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG",
            Self::Network(_) => "NETWORK",
            Self::HttpRequest(_) => "HTTP",
            Self::Timeout(_) => "TIMEOUT",
            Self::Validation(_) => "VALIDATION",
            Self::Io(_) => "IO",
            Self::Parse(_) => "PARSE",
            Self::ProbeFailed(_) => "PROBE",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Whether this error came from the transport of a single request
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_) | Self::HttpRequest(_) | Self::Timeout(_))
    }

    /// Running the same command again may succeed
    pub fn is_recoverable(&self) -> bool {
        self.is_transport() || matches!(self, Self::ProbeFailed(_))
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Validation(_) | Self::Parse(_) => 1,
            Self::Network(_) | Self::HttpRequest(_) => 2,
            Self::Timeout(_) => 3,
            Self::Io(_) => 5,
            Self::ProbeFailed(_) => 6,
            Self::Internal(_) => 99,
        }
    }

    /// What the user can do about it
    pub fn hint(&self) -> &'static str {
        match self {
            Self::Config(_) => "Check your .env file, PROBE_* variables or command line arguments.",
            Self::Network(_) => "Check that the target URL is reachable from this machine.",
            Self::HttpRequest(_) => "The server closed or corrupted the response. Try again or check the endpoint path.",
            Self::Timeout(_) => "Increase --timeout or remove it to wait indefinitely.",
            Self::Validation(_) => "Check the URL and the username list.",
            Self::Io(_) => "Check that stdout is writable, for example that the pipe reader is still running.",
            Self::Parse(_) => "Check the format of your input values.",
            Self::ProbeFailed(_) => "The failures are listed above. Use --failure-policy fail-fast to stop at the first one.",
            Self::Internal(_) => "This is likely a bug. Please report it with the error details.",
        }
    }

    fn paint(&self, text: &str) -> ColoredString {
        match self {
            Self::Config(_) | Self::Validation(_) | Self::Parse(_) => text.red(),
            Self::Network(_) | Self::HttpRequest(_) | Self::ProbeFailed(_) => text.yellow(),
            Self::Timeout(_) => text.blue(),
            Self::Io(_) => text.cyan(),
            Self::Internal(_) => text.bright_red(),
        }
    }

    /// `[CATEGORY] message`, colored by category when asked
    pub fn format_for_console(&self, use_color: bool) -> String {
        let message = self.to_string();
        if use_color {
            format!("[{}] {}", self.paint(self.category()).bold(), self.paint(&message))
        } else {
            format!("[{}] {}", self.category(), message)
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(error: url::ParseError) -> Self {
        Self::parse(format!("URL parse error: {}", error))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::parse(format!("JSON error: {}", error))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        let message = describe_chain(&error);
        if error.is_timeout() {
            Self::timeout(message)
        } else if error.is_connect() || error.is_request() {
            Self::network(message)
        } else {
            Self::http_request(message)
        }
    }
}

impl From<dotenv::Error> for AppError {
    fn from(error: dotenv::Error) -> Self {
        Self::config(format!("Environment file error: {}", error))
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(error: std::num::ParseIntError) -> Self {
        Self::parse(format!("Integer parse error: {}", error))
    }
}

impl From<std::str::ParseBoolError> for AppError {
    fn from(error: std::str::ParseBoolError) -> Self {
        Self::parse(format!("Boolean parse error: {}", error))
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::internal(format!("{:#}", error))
    }
}

/// Join an error with its sources, reqwest hides the useful part in the chain
fn describe_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Writes the final error of a run to stderr
pub struct ErrorReporter {
    pub use_color: bool,
    pub verbose: bool,
}

impl ErrorReporter {
    pub fn new(use_color: bool, verbose: bool) -> Self {
        Self { use_color, verbose }
    }

    /// One line normally; with `verbose`, the hint and a retry note follow
    pub fn render(&self, error: &AppError) -> String {
        let mut lines = vec![error.format_for_console(self.use_color)];

        if self.verbose {
            lines.push(format!("Suggestion: {}", error.hint()));

            if error.is_recoverable() {
                let note = "This error might be temporary. You can try running the command again.";
                lines.push(if self.use_color { note.green().to_string() } else { note.to_string() });
            }
        }

        lines.join("\n")
    }

    pub fn report_error(&self, error: &AppError) {
        eprintln!("{}", self.render(error));
    }
}
