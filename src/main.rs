use std::process::ExitCode;

use ai_conversation_analyzer::cli::commands::{Cli, run};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// `--verbose` wins over `RUST_LOG`; the default level is warn.
fn init_tracing(cli: &Cli) {
    let filter = if cli.verbose {
        EnvFilter::new("ai_conversation_analyzer=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
