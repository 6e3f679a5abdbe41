//! Line formatters for probe results

use crate::models::{ProbeFailure, ProbeResult};
use serde_json::json;

/// Turns probe outcomes into single output lines (no trailing newline)
pub trait OutputFormatter: Send + Sync {
    /// Format a completed probe
    fn format_result(&self, result: &ProbeResult) -> String;

    /// Format a failed probe
    fn format_failure(&self, failure: &ProbeFailure) -> String;
}

/// `Username: <username>, Response Time: <ms with 2 decimals> ms`
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFormatter;

impl OutputFormatter for PlainFormatter {
    fn format_result(&self, result: &ProbeResult) -> String {
        format!("Username: {}, Response Time: {:.2} ms", result.username, result.elapsed_ms())
    }

    fn format_failure(&self, failure: &ProbeFailure) -> String {
        format!("Username: {}, Error: {}", failure.username, failure.error)
    }
}

/// One JSON object per line
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_result(&self, result: &ProbeResult) -> String {
        json!({
            "username": result.username,
            "elapsed_ms": round_ms(result.elapsed_ms()),
            "status_code": result.status_code,
            "started_at": result.started_at.to_rfc3339(),
        })
        .to_string()
    }

    fn format_failure(&self, failure: &ProbeFailure) -> String {
        json!({
            "username": failure.username,
            "error": failure.error.to_string(),
            "category": failure.error.category(),
        })
        .to_string()
    }
}

/// Keep JSON figures at the same two-decimal precision as the plain line
fn round_ms(ms: f64) -> f64 {
    (ms * 100.0).round() / 100.0
}
