//! appsup CLI
//!
//! Installs bundled tools and external projects into the user's Application
//! Support directory, and removes them again.

mod cli;
mod commands;
mod error;

use std::io;
use std::process::ExitCode;

use appsup_core::{StreamTranscript, Transcript};
use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;

/// Some entries failed; the rest of the run completed.
const EXIT_ENTRY_FAILURES: u8 = 1;
/// The run could not start.
const EXIT_FATAL: u8 = 3;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(io::stderr)
            .finish();
        if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
            eprintln!("{}: {}", "warning".yellow().bold(), e);
        }
        tracing::debug!("Verbose mode enabled");
    }

    let mut transcript = StreamTranscript::stdio();
    match execute_command(&cli, &mut transcript) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            eprintln!("{}", "some errors were reported".red().bold());
            ExitCode::from(EXIT_ENTRY_FAILURES)
        }
        Err(e) => {
            for line in fatal_lines(&e, cli.debug) {
                eprintln!("{}", line);
            }
            ExitCode::from(EXIT_FATAL)
        }
    }
}

/// `ERROR:` line for a fatal error, followed by its full detail in debug mode.
fn fatal_lines(err: &error::CliError, debug: bool) -> Vec<String> {
    let mut lines = vec![format!("ERROR: {}", err)];
    if debug {
        lines.extend(format!("{:#?}", err).lines().map(str::to_string));
    }
    lines
}

fn execute_command(cli: &Cli, transcript: &mut dyn Transcript) -> Result<bool> {
    match &cli.command {
        Commands::Install {
            copy,
            locations,
            projects,
        } => commands::run_install(locations, *copy, projects, cli.debug, transcript),
        Commands::Uninstall {
            locations,
            projects,
        } => commands::run_uninstall(locations, projects, cli.debug, transcript),
        Commands::Paths { locations } => commands::run_paths(locations, transcript),
        Commands::Completions { shell } => {
            clap_complete::generate(*shell, &mut Cli::command(), "appsup", &mut io::stdout());
            Ok(true)
        }
    }
}
