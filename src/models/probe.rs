//! Per-username probe results

use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One completed login probe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeResult {
    /// Username that was submitted
    pub username: String,

    /// Time from just before the POST until the response was fully read
    pub elapsed: Duration,

    /// Status code of the final response (after redirects)
    pub status_code: u16,

    /// Wall-clock time the probe started
    pub started_at: DateTime<Utc>,
}

impl ProbeResult {
    pub fn new(username: impl Into<String>, elapsed: Duration, status_code: u16, started_at: DateTime<Utc>) -> Self {
        Self {
            username: username.into(),
            elapsed,
            status_code,
            started_at,
        }
    }

    /// Elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

/// A probe whose request failed at the transport level
#[derive(Debug)]
pub struct ProbeFailure {
    pub username: String,
    pub error: AppError,
}

impl ProbeFailure {
    pub fn new(username: impl Into<String>, error: AppError) -> Self {
        Self {
            username: username.into(),
            error,
        }
    }
}

/// Counts for a finished run. Timings are never aggregated here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeSummary {
    pub completed: usize,
    pub failed: usize,
}

impl ProbeSummary {
    pub fn total(&self) -> usize {
        self.completed + self.failed
    }

    pub fn all_completed(&self) -> bool {
        self.failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_ms_conversion() {
        let result = ProbeResult::new("alice", Duration::from_micros(10_250), 200, Utc::now());
        assert!((result.elapsed_ms() - 10.25).abs() < 1e-9);
    }

    #[test]
    fn test_zero_elapsed() {
        let result = ProbeResult::new("alice", Duration::ZERO, 302, Utc::now());
        assert_eq!(result.elapsed_ms(), 0.0);
    }

    #[test]
    fn test_summary_counts() {
        let summary = ProbeSummary { completed: 5, failed: 2 };
        assert_eq!(summary.total(), 7);
        assert!(!summary.all_completed());
        assert!(ProbeSummary::default().all_completed());
    }

    #[test]
    fn test_failure_keeps_error() {
        let failure = ProbeFailure::new("jane.doe", AppError::network("connection refused"));
        assert_eq!(failure.username, "jane.doe");
        assert!(failure.error.is_transport());
    }
}
