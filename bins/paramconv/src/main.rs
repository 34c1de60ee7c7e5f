mod cli;
mod cmd;
mod error;

use std::process::ExitCode;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Convert(args) => cmd::convert::run(cli.config.as_deref(), args),
        Commands::Chain => cmd::chain::run(cli.config.as_deref()),
        Commands::Kinds => cmd::chain::kinds(),
    };
    match result {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "paramconv failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
