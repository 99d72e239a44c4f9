mod catalog;
mod cli;
mod config;
mod loader;
mod ops;
mod paths;
mod platform;
mod prompt;
mod template;


use anyhow::Result;
use clap::Parser;
use crossterm::style::Stylize;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use config::Config;
use platform::{RealFs, RealPrompter, RealRunner};
use prompt::SelectError;

/// Conventional status for a run interrupted by the user.
const CANCELLED: u8 = 130;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => "monokit=info",
        1 => "monokit=debug",
        _ => "monokit=trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .without_time()
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if SelectError::is_cancellation(&err) => {
            eprintln!("{}", "Operation canceled".yellow());
            ExitCode::from(CANCELLED)
        }
        Err(err) => {
            eprintln!("{}", format!("❌ {err:#}").red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let fs = RealFs;
    let config_path = cli.config.unwrap_or_else(|| Config::default_path(&fs));
    let config = Config::load(&config_path, &fs)?;
    let runner = RealRunner;
    let prompter = RealPrompter::new(config.pointer.clone());

    match cli.command {
        Command::Create { name, path } => ops::create::run(
            &config,
            name.as_deref(),
            path.as_deref(),
            cli.dry_run,
            &fs,
            &runner,
            &prompter,
        ),
        Command::Add { app, env, path } => ops::add::run(
            &config,
            &app,
            env.as_deref(),
            path.as_deref(),
            cli.dry_run,
            &fs,
            &runner,
            &prompter,
        ),
    }
}
