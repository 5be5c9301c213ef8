//! CLI module
//!
//! Command-line interface for browsing an item collection.
//!
//! # Commands
//!
//! - `fetch` - Fetch one page directly
//! - `browse` - Page forward through the collection with a pager
//! - `prefs` - Read or change persisted preferences

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, PrefsAction};
pub use runner::Runner;
