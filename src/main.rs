//! `phrase-cycler` - typewriter-style phrase animation for the terminal

use std::sync::OnceLock;

use clap::Parser;
use tokio_util::sync::CancellationToken;

use phrase_cycler::cli::args::Cli;
use phrase_cycler::cli::commands;
use phrase_cycler::error::ExitCode;
use phrase_cycler::observability::init_logging;

/// Exit code of the signal that stopped the run, if any.
static STOPPED_BY: OnceLock<i32> = OnceLock::new();

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if !cli.quiet {
        init_logging(cli.log_format, cli.verbose, cli.color);
    }

    let cancel = CancellationToken::new();

    // First signal stops the animation cleanly, a second one forces exit.
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        let code = wait_for_signal().await;
        let _ = STOPPED_BY.set(code);
        shutdown.cancel();

        std::process::exit(wait_for_signal().await);
    });

    let result = commands::dispatch(cli, cancel).await;

    match result {
        Ok(()) => std::process::exit(STOPPED_BY.get().copied().unwrap_or(ExitCode::SUCCESS)),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}

/// Waits for SIGINT or SIGTERM and returns the matching exit code.
#[cfg(unix)]
async fn wait_for_signal() -> i32 {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            tokio::select! {
                Ok(()) = tokio::signal::ctrl_c() => ExitCode::INTERRUPTED,
                Some(()) = sigterm.recv() => ExitCode::TERMINATED,
                else => std::future::pending().await,
            }
        }
        Err(_) => ctrl_c().await,
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> i32 {
    ctrl_c().await
}

async fn ctrl_c() -> i32 {
    match tokio::signal::ctrl_c().await {
        Ok(()) => ExitCode::INTERRUPTED,
        Err(_) => std::future::pending().await,
    }
}
