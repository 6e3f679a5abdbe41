//! Diagnostic logging for probe runs
//!
//! Log lines always go to stderr so stdout carries nothing but result lines.
//! The level follows the CLI: `--debug` logs every probe as JSON, `--verbose`
//! logs run start and summary, and a plain run stays silent unless something
//! at warning level or above is reported.

use crate::error::AppError;
use crate::models::{Config, ProbeResult, ProbeSummary};
use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Log level, ordered from most to least detailed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    /// Threshold only: nothing is logged at this level
    Off,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Off => "OFF",
        }
    }

    fn paint(&self, text: &str) -> ColoredString {
        match self {
            LogLevel::Trace => text.white(),
            LogLevel::Debug => text.cyan(),
            LogLevel::Info => text.green(),
            LogLevel::Warn | LogLevel::Off => text.yellow(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `timestamp LEVEL [logger] message {k=v, ...}`
    Console,
    /// One JSON object per line
    Json,
}

/// A single structured log event
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub logger: String,
    pub message: String,
    /// Sorted so console output is stable
    pub fields: BTreeMap<String, serde_json::Value>,
}

/// Named stderr logger with a level threshold
#[derive(Debug, Clone)]
pub struct Logger {
    name: String,
    min_level: LogLevel,
    format: LogFormat,
    use_color: bool,
    session_id: Option<String>,
}

impl Logger {
    /// Level and format derived from the `verbose`/`debug` flags
    pub fn with_config(name: &str, config: &Config) -> Self {
        let min_level = if config.debug {
            LogLevel::Debug
        } else if config.verbose {
            LogLevel::Info
        } else {
            LogLevel::Warn
        };

        Self {
            name: name.to_string(),
            min_level,
            format: if config.debug { LogFormat::Json } else { LogFormat::Console },
            use_color: config.enable_color,
            session_id: None,
        }
    }

    /// A logger that never writes
    pub fn quiet(name: &str) -> Self {
        Self {
            name: name.to_string(),
            min_level: LogLevel::Off,
            format: LogFormat::Console,
            use_color: false,
            session_id: None,
        }
    }

    /// Tag every entry with a session id
    pub fn with_session(mut self, session_id: &str) -> Self {
        self.session_id = Some(session_id.to_string());
        self
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level != LogLevel::Off && level >= self.min_level
    }

    pub fn event(&self, level: LogLevel, message: &str) -> LogEntryBuilder<'_> {
        LogEntryBuilder {
            logger: self,
            entry: LogEntry {
                timestamp: Utc::now(),
                level,
                logger: self.name.clone(),
                message: message.to_string(),
                fields: BTreeMap::new(),
            },
        }
    }

    pub fn trace(&self, message: &str) -> LogEntryBuilder<'_> {
        self.event(LogLevel::Trace, message)
    }

    pub fn debug(&self, message: &str) -> LogEntryBuilder<'_> {
        self.event(LogLevel::Debug, message)
    }

    pub fn info(&self, message: &str) -> LogEntryBuilder<'_> {
        self.event(LogLevel::Info, message)
    }

    fn render(&self, mut entry: LogEntry) -> String {
        if let Some(session_id) = &self.session_id {
            entry.fields.insert("session_id".to_string(), session_id.clone().into());
        }

        match self.format {
            LogFormat::Json => serde_json::to_string(&entry).unwrap_or_else(|e| {
                format!("{{\"level\":\"WARN\",\"message\":\"unserializable log entry: {}\"}}", e)
            }),
            LogFormat::Console => {
                let level = format!("{:>5}", entry.level.as_str());
                let level = if self.use_color { entry.level.paint(&level).to_string() } else { level };

                let mut line = format!(
                    "{} {} [{}] {}",
                    entry.timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
                    level,
                    entry.logger,
                    entry.message
                );

                if !entry.fields.is_empty() {
                    let fields: Vec<String> = entry.fields.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
                    line.push_str(&format!(" {{{}}}", fields.join(", ")));
                }
                line
            }
        }
    }
}

/// Collects fields for one entry; nothing is serialized when the level is filtered out
pub struct LogEntryBuilder<'a> {
    logger: &'a Logger,
    entry: LogEntry,
}

impl LogEntryBuilder<'_> {
    pub fn field<T: Serialize>(mut self, key: &str, value: T) -> Self {
        if self.logger.enabled(self.entry.level) {
            if let Ok(value) = serde_json::to_value(value) {
                self.entry.fields.insert(key.to_string(), value);
            }
        }
        self
    }

    /// Add the figures of a completed probe
    pub fn probe(self, result: &ProbeResult) -> Self {
        self.field("username", &result.username)
            .field("elapsed_ms", result.elapsed_ms())
            .field("status_code", result.status_code)
    }

    pub fn error_info(self, error: &AppError) -> Self {
        self.field("error_category", error.category())
            .field("error_exit_code", error.exit_code())
    }

    /// The line that would be written, `None` below the threshold
    pub fn render(self) -> Option<String> {
        if self.logger.enabled(self.entry.level) {
            Some(self.logger.render(self.entry))
        } else {
            None
        }
    }

    pub fn log(self) {
        if let Some(line) = self.render() {
            eprintln!("{}", line);
        }
    }
}

/// Run and per-probe events emitted by the prober
#[derive(Debug, Clone)]
pub struct ProbeLogger {
    logger: Logger,
}

impl ProbeLogger {
    pub fn new(config: &Config) -> Self {
        Self::from_logger(Logger::with_config("PROBE", config))
    }

    pub fn from_logger(logger: Logger) -> Self {
        Self { logger }
    }

    pub fn quiet() -> Self {
        Self::from_logger(Logger::quiet("PROBE"))
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn log_run_start(&self, url: &str, username_count: usize, policy: &str) {
        self.logger.info(&format!("Probing {} with {} usernames", url, username_count))
            .field("url", url)
            .field("username_count", username_count)
            .field("failure_policy", policy)
            .log();
    }

    pub fn log_probe_start(&self, position: usize, username: &str) {
        self.logger.trace(&format!("POST for {}", username))
            .field("position", position)
            .field("username", username)
            .log();
    }

    pub fn log_probe_result(&self, result: &ProbeResult) {
        let message = format!("{} -> {} in {:.2}ms", result.username, result.status_code, result.elapsed_ms());
        self.logger.debug(&message).probe(result).log();
    }

    pub fn log_probe_failure(&self, username: &str, error: &AppError) {
        self.logger.debug(&format!("Probe for {} failed: {}", username, error))
            .field("username", username)
            .error_info(error)
            .log();
    }

    /// Counts only; failures themselves are reported by the caller
    pub fn run_summary(&self, summary: &ProbeSummary) -> LogEntryBuilder<'_> {
        self.logger.info(&format!("Run finished: {} completed, {} failed", summary.completed, summary.failed))
            .field("completed", summary.completed)
            .field("failed", summary.failed)
    }

    pub fn log_run_summary(&self, summary: &ProbeSummary) {
        self.run_summary(summary).log();
    }
}

/// Hands out loggers that share one session id
pub struct LoggerFactory {
    config: Config,
    session_id: String,
}

impl LoggerFactory {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            session_id: Uuid::new_v4().to_string(),
        }
    }

    pub fn create_logger(&self, name: &str) -> Logger {
        Logger::with_config(name, &self.config).with_session(&self.session_id)
    }

    pub fn create_probe_logger(&self) -> ProbeLogger {
        ProbeLogger::from_logger(self.create_logger("PROBE"))
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}
