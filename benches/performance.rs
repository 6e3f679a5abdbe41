//! Performance benchmarks for the login timing probe
//!
//! The probe loop is measured with an in-memory client so the numbers show
//! the overhead the tool adds on top of each request, not network latency.

use async_trait::async_trait;
use chrono::Utc;
use clap::Parser;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use login_timing_probe::{
    cli::Cli,
    config::ConfigParser,
    error::Result,
    output::{JsonFormatter, OutputFormatter, PlainFormatter},
    types::FailurePolicy,
    LoginClient, LoginResponse, ManualClock, ProbeResult, ProbeTarget, Prober,
};
use std::hint::black_box;
use std::time::Duration;

/// Answers every login instantly
struct InstantClient;

#[async_trait]
impl LoginClient for InstantClient {
    async fn submit_login(&self, _url: &str, _username: &str, _password: &str) -> Result<LoginResponse> {
        Ok(LoginResponse::new(401, 28))
    }
}

fn usernames(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("user{:04}", i)).collect()
}

fn benchmark_formatters(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatters");
    let result = ProbeResult::new("michelle.obama", Duration::from_micros(123_456), 401, Utc::now());

    group.bench_function("plain", |b| {
        b.iter(|| black_box(PlainFormatter.format_result(black_box(&result))))
    });

    group.bench_function("json", |b| {
        b.iter(|| black_box(JsonFormatter.format_result(black_box(&result))))
    });

    group.finish();
}

fn benchmark_probe_loop(c: &mut Criterion) {
    let mut group = c.benchmark_group("probe_loop");
    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => panic!("failed to build runtime: {}", e),
    };

    for count in [8usize, 100, 1_000] {
        let target = ProbeTarget::new("http://localhost/login", "password", usernames(count));
        let prober = Prober::with_clock(InstantClient, ManualClock::new(), target);

        group.bench_with_input(BenchmarkId::new("run", count), &count, |b, _| {
            b.iter(|| {
                let mut out = Vec::with_capacity(count * 48);
                let mut errors = Vec::new();
                let summary = runtime
                    .block_on(prober.run(&mut out, &mut errors, &PlainFormatter, FailurePolicy::FailFast));
                black_box((summary.is_ok(), out.len()))
            })
        });
    }

    group.finish();
}

fn benchmark_config_parsing(c: &mut Criterion) {
    c.bench_function("config_parse", |b| {
        b.iter(|| {
            let cli = Cli::parse_from([
                "login-timing-probe",
                "--url", "https://example.com/login",
                "--usernames", "alice,bob,carol,dave",
                "--timeout", "10",
            ]);
            black_box(ConfigParser::new(cli).parse().is_ok())
        })
    });
}

criterion_group!(
    benches,
    benchmark_formatters,
    benchmark_probe_loop,
    benchmark_config_parsing
);
criterion_main!(benches);
