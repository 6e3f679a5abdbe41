//! The login timing prober
//!
//! Submits one login per candidate username, strictly one at a time and in
//! list order, and times each submission from just before the request is sent
//! until the response body has been read. Probes are produced lazily: nothing
//! is sent until the stream returned by [`Prober::probe_stream`] is polled.

use crate::{
    client::LoginClient,
    error::Result,
    logging::ProbeLogger,
    models::{Config, ProbeFailure, ProbeResult, ProbeSummary},
    output::OutputFormatter,
    timing::{Clock, MonotonicClock},
    types::FailurePolicy,
};
use chrono::Utc;
use futures::stream::{self, Stream, StreamExt};
use std::io::Write;

/// Where to probe and with what
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTarget {
    pub url: String,
    pub password: String,
    pub usernames: Vec<String>,
}

impl ProbeTarget {
    pub fn new(url: impl Into<String>, password: impl Into<String>, usernames: Vec<String>) -> Self {
        Self {
            url: url.into(),
            password: password.into(),
            usernames,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.target_url.clone(), config.password.clone(), config.usernames.clone())
    }
}

/// Outcome of a single probe as yielded by the stream
pub type ProbeOutcome = std::result::Result<ProbeResult, ProbeFailure>;

/// Sequential login timing prober
pub struct Prober<C, K = MonotonicClock> {
    client: C,
    clock: K,
    target: ProbeTarget,
    logger: ProbeLogger,
}

impl<C: LoginClient> Prober<C, MonotonicClock> {
    /// Create a prober timed by the monotonic clock
    pub fn new(client: C, target: ProbeTarget) -> Self {
        Self::with_clock(client, MonotonicClock, target)
    }
}

impl<C: LoginClient, K: Clock> Prober<C, K> {
    /// Create a prober with an explicit clock
    pub fn with_clock(client: C, clock: K, target: ProbeTarget) -> Self {
        Self {
            client,
            clock,
            target,
            logger: ProbeLogger::quiet(),
        }
    }

    /// Replace the diagnostic logger
    pub fn with_logger(mut self, logger: ProbeLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn target(&self) -> &ProbeTarget {
        &self.target
    }

    /// Submit one login and time it
    pub async fn probe_one(&self, username: &str) -> Result<ProbeResult> {
        let started_at = Utc::now();
        let start = self.clock.now();

        let response = self.client
            .submit_login(&self.target.url, username, &self.target.password)
            .await?;

        let elapsed = self.clock.elapsed_since(start);
        Ok(ProbeResult::new(username, elapsed, response.status_code, started_at))
    }

    /// Lazily probe every username in order
    ///
    /// Under [`FailurePolicy::FailFast`] the stream yields the first failure
    /// and then ends. Under [`FailurePolicy::Continue`] it yields one outcome
    /// per username. Each call starts a fresh sequence.
    pub fn probe_stream(&self, policy: FailurePolicy) -> impl Stream<Item = ProbeOutcome> + '_ {
        stream::unfold((0usize, false), move |(index, stopped)| async move {
            if stopped {
                return None;
            }

            let username = self.target.usernames.get(index)?;
            self.logger.log_probe_start(index + 1, username);

            match self.probe_one(username).await {
                Ok(result) => {
                    self.logger.log_probe_result(&result);
                    Some((Ok(result), (index + 1, false)))
                }
                Err(error) => {
                    self.logger.log_probe_failure(username, &error);
                    let stop = policy == FailurePolicy::FailFast;
                    Some((Err(ProbeFailure::new(username.clone(), error)), (index + 1, stop)))
                }
            }
        })
    }

    /// Probe every username, writing one line per completed probe to `out`
    ///
    /// Each line is flushed as soon as it is written. Failures are written to
    /// `errors` under the continue policy; under fail-fast the first failure is
    /// returned after the lines for earlier usernames have been written.
    pub async fn run<W, E>(
        &self,
        out: &mut W,
        errors: &mut E,
        formatter: &dyn OutputFormatter,
        policy: FailurePolicy,
    ) -> Result<ProbeSummary>
    where
        W: Write + ?Sized,
        E: Write + ?Sized,
    {
        self.logger.log_run_start(&self.target.url, self.target.usernames.len(), policy.as_str());

        let mut summary = ProbeSummary::default();
        let probes = self.probe_stream(policy);
        futures::pin_mut!(probes);

        while let Some(outcome) = probes.next().await {
            match outcome {
                Ok(result) => {
                    writeln!(out, "{}", formatter.format_result(&result))?;
                    out.flush()?;
                    summary.completed += 1;
                }
                Err(failure) => {
                    summary.failed += 1;
                    if policy == FailurePolicy::FailFast {
                        self.logger.log_run_summary(&summary);
                        return Err(failure.error);
                    }
                    writeln!(errors, "{}", formatter.format_failure(&failure))?;
                    errors.flush()?;
                }
            }
        }

        self.logger.log_run_summary(&summary);
        Ok(summary)
    }
}
