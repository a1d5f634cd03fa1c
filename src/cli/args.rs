//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Static HTML Timberman page generator: random tree, pre-rendered GIF frames, popover navigation
///
/// Without a subcommand, generates the page in the project directory.
#[derive(Parser, Debug)]
#[command(name = "timberman")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Project directory (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    /// Tree length, overrides config (page gets length - 1 steps)
    #[arg(short, long, global = true)]
    pub length: Option<usize>,

    /// Seed for a reproducible page, overrides config
    #[arg(short, long, global = true)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the page (default)
    Generate,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a commented timberman.toml
    Template,
}
