use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;

mod cli_bin;

use cli_bin::args::{Cli, Commands};
use cli_bin::commands::{build_command, check_command};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every document was processed successfully
fn run(cli: Cli) -> Result<bool> {
    let config_path = cli.config.as_deref();

    let report = match cli.command {
        Commands::Build(args) => build_command(args, config_path).context("build failed")?,
        Commands::Check(args) => check_command(args, config_path).context("check failed")?,
    };

    Ok(!report.has_failures())
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "info"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}
