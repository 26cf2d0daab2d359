//! CLI definitions using clap derive API
//!
//! `install` is the only subcommand; anything else is rejected by clap as a
//! usage error before any traversal begins.

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};

pub mod install;

pub use install::InstallArgs;

/// rnpm - recursive npm install
#[derive(Parser, Debug)]
#[command(
    name = "rnpm",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Run npm install in every package directory under a tree",
    long_about = "rnpm finds every directory under a tree that directly contains a package.json \
                  and runs npm install in each one, skipping node_modules subtrees so \
                  already-installed sub-dependencies are never re-processed."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install packages in every directory containing a manifest
    Install(InstallArgs),
}
