//! Data models and structures for the login timing probe

pub mod config;
pub mod probe;

// Re-export main model types
pub use config::Config;
pub use probe::{ProbeFailure, ProbeResult, ProbeSummary};
