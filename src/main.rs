//! Hoist CLI - deploy a git repository to a Linux host behind nginx
//!
//! Usage:
//!   hoist              interactive deployment
//!   hoist --teardown   remove a deployment
//!
//! Exit status: 0 on success or when the operator declines, 1-8 for the
//! failed deployment stage, 9 for a failed teardown, 130 on Ctrl-C.

mod commands;
mod ui;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;
use hoist::presentation::Cli;
use hoist::StageFailure;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let flag = Arc::clone(&interrupted);
        if let Err(err) = ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)) {
            tracing::warn!(%err, "cannot install the Ctrl-C handler");
        }
    }

    let result = if cli.teardown {
        commands::teardown::cmd_teardown(&cli, interrupted)
    } else {
        commands::deploy::cmd_deploy(&cli, interrupted)
    };

    std::process::exit(exit_code(&result));
}

/// Diagnostics go to stderr; `RUST_LOG` overrides `-v`
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "hoist=info",
        2 => "hoist=debug",
        _ => "hoist=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn exit_code(result: &anyhow::Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => match err.downcast_ref::<StageFailure>() {
            Some(failure) => failure.exit_code(),
            None => {
                eprintln!("Error: {:#}", err);
                1
            }
        },
    }
}
