//! Login Timing Probe - command-line entry point
//!
//! Sends one login form per username and prints how long each took.

use clap::Parser;
use login_timing_probe::{
    app::App,
    cli::Cli,
    config::EnvManager,
    error::ErrorReporter,
};
use std::process;

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        process::exit(99);
    }));

    let cli = Cli::parse();

    if let Err(message) = cli.validate() {
        eprintln!("Error: {}", message);
        process::exit(1);
    }

    if cli.print_env_example {
        print!("{}", EnvManager::create_example_env_content());
        return;
    }

    let reporter = ErrorReporter::new(cli.use_colors(), cli.verbose || cli.debug);

    if let Err(e) = App::new(cli).run().await {
        reporter.report_error(&e);
        process::exit(e.exit_code());
    }
}
