//! netpol-gen - render a Kubernetes NetworkPolicy from a YAML config

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use netpol_gen::{Cli, Error};

fn main() -> ExitCode {
    // Logs go to stderr so stdout carries only the rendered document
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            if let Error::Render { source, .. } = &err {
                eprintln!("{}", source.display_debug_info());
            }
            ExitCode::from(err.exit_code())
        }
    }
}
