use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "monokit", about = "Scaffold JavaScript monorepos", version)]
pub struct Cli {
    /// Override config file location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v = DEBUG, -vv = TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Ask everything, then print the plan without creating anything
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a new monorepo project
    Create {
        /// Project name (asked when omitted)
        name: Option<String>,

        /// Directory to create the project in
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Add an app to an existing project
    Add {
        /// App folder name
        app: String,

        /// Development environment: vite or none
        #[arg(short, long)]
        env: Option<String>,

        /// Project directory to add the app to
        #[arg(short, long)]
        path: Option<String>,
    },
}
