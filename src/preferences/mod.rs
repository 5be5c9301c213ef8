//! Preference store module
//!
//! Persisted boolean toggles, read as a change stream and written with
//! explicit updates.
//!
//! # Overview
//!
//! A [`PreferenceStore`] is passed to whatever consumes it rather than being
//! reached through process-wide state.
//!
//! - [`BoolPreference`] - typed key with a default value
//! - [`FilePreferenceStore`] - JSON file on disk, or memory only for tests

mod store;
mod types;

pub use store::FilePreferenceStore;
pub use types::{lookup, BoolPreference, PreferenceStore, PreferenceStream, SHOW_DESCRIPTION};

#[cfg(test)]
mod tests;
