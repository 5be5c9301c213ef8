//! Preference types

use crate::error::Result;
use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;

/// Stream of preference values
pub type PreferenceStream = Pin<Box<dyn Stream<Item = bool> + Send>>;

/// A named boolean preference and the value it has until first set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoolPreference {
    key: &'static str,
    default: bool,
}

impl BoolPreference {
    /// Create a preference handle
    pub const fn new(key: &'static str, default: bool) -> Self {
        Self { key, default }
    }

    /// Storage key
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Value reported while unset
    pub fn default_value(&self) -> bool {
        self.default
    }
}

/// Whether record descriptions are shown
pub const SHOW_DESCRIPTION: BoolPreference = BoolPreference::new("show_description", true);

/// Find a known preference by its key; dashes are accepted for underscores
pub fn lookup(name: &str) -> Option<BoolPreference> {
    let key = name.replace('-', "_");
    [SHOW_DESCRIPTION]
        .into_iter()
        .find(|preference| preference.key() == key)
}

/// Read/write access to boolean preferences
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Current value, or the preference default when unset
    async fn get(&self, preference: BoolPreference) -> bool;

    /// Set and persist a value
    async fn update(&self, preference: BoolPreference, value: bool) -> Result<()>;

    /// Yield the current value, then each distinct change
    ///
    /// The stream ends when the store is dropped.
    fn subscribe(&self, preference: BoolPreference) -> PreferenceStream;
}
