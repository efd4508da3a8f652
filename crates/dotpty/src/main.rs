//! # dotpty
//!
//! Runs a command inside a pseudo-terminal, passes its output through, and
//! renders every DOT graph it prints (JSON-wrapped or raw `digraph` lines)
//! to image files with Graphviz.
//!
//! ## Architecture
//!
//! This is Layer 3 - the binary that ties together:
//! - dotpty-core: Errors, configuration, counters
//! - dotpty-terminal: PTY and record reassembly
//! - dotpty-detector: Graph detection and rendering

use clap::Parser;
use std::process::ExitCode;

use dotpty::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e:#}");
            return ExitCode::from(1);
        }
    };

    // Logs go to stderr; stdout carries the child's output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("dotpty v{} starting", env!("CARGO_PKG_VERSION"));

    match dotpty::run(&config, &cli.command) {
        Ok(report) => {
            tracing::info!("Child exited with code {}", report.exit_code);
            ExitCode::from(report.exit_code.clamp(0, 255) as u8)
        }
        Err(e) => {
            tracing::error!("Run failed: {:#}", e);
            eprintln!("{e:#}");
            ExitCode::from(1)
        }
    }
}
