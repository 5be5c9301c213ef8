//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Browse a page-indexed REST collection
#[derive(Parser, Debug)]
#[command(name = "item-pager")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Override the preferences file
    #[arg(long, global = true)]
    pub preferences: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a single page
    Fetch {
        /// Page index (1-based)
        #[arg(short, long, default_value = "1")]
        page: u32,

        /// Records per page (defaults to the configured page size)
        #[arg(long)]
        per_page: Option<u32>,
    },

    /// Page through the collection
    Browse {
        /// Stop after this many pages
        #[arg(long, default_value = "5")]
        max_pages: usize,

        /// Page to start from
        #[arg(long)]
        start_key: Option<u32>,
    },

    /// Read or change preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
}

/// Preference subcommands
#[derive(Subcommand, Debug)]
pub enum PrefsAction {
    /// Print a preference value
    Get {
        /// Preference name
        #[arg(default_value = "show-description")]
        name: String,
    },

    /// Set a preference value
    Set {
        /// New value (true or false)
        #[arg(action = clap::ArgAction::Set)]
        value: bool,

        /// Preference name
        #[arg(long, default_value = "show-description")]
        name: String,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}
