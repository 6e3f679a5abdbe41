//! Login Timing Probe
//!
//! Measures how long a login endpoint takes to answer a POST for each
//! candidate username. A server that takes a different code path for known
//! and unknown usernames leaks that difference through its response time;
//! this tool prints the per-username latency so the difference can be seen.

pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod prober;
pub mod timing;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use models::{Config, ProbeFailure, ProbeResult, ProbeSummary};
pub use client::{HttpLoginClient, LoginClient, LoginResponse};
pub use prober::{ProbeTarget, Prober};
pub use timing::{Clock, ManualClock, MonotonicClock};
pub use output::{JsonFormatter, OutputFormatter, OutputFormatterFactory, PlainFormatter};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Default configuration values
pub mod defaults {
    pub const DEFAULT_TARGET_URL: &str = "http://185.143.102.102:8080/login";
    pub const DEFAULT_PASSWORD: &str = "password";
    pub const DEFAULT_USERNAMES: &[&str] = &[
        "michelle.obama",
        "barack.obama",
        "hillary.clinton",
        "george.w.bush",
        "jane.doe",
        "sam.altman",
        "mira.murati",
        "olivier.lemer",
    ];
    /// Zero disables the per-request timeout
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 0;
    pub const MAX_TIMEOUT_SECONDS: u64 = 300;
    pub const DEFAULT_ENABLE_COLOR: bool = true;
}
