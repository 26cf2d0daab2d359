//! rnpm - recursive npm install
//!
//! Finds every directory under a tree that directly contains a package
//! manifest and runs the installer in each one, skipping node_modules
//! subtrees so already-installed sub-dependencies are never re-processed.

use clap::Parser;

mod cli;
mod commands;
mod discovery;
mod dispatch;
mod error;
mod progress;
mod runner;
mod ui;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Install(args) => commands::install::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
