//! File-backed preference store
//!
//! Values live in a JSON object on disk and are written with a temp file
//! followed by a rename.

use super::types::{BoolPreference, PreferenceStore, PreferenceStream};
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::{watch, Mutex};
use tracing::debug;

type Values = BTreeMap<String, bool>;

/// Preference store persisted to a JSON file
#[derive(Debug)]
pub struct FilePreferenceStore {
    /// Path to the preferences file; empty when in memory
    path: PathBuf,
    /// Current values; subscribers watch this channel
    values: watch::Sender<Values>,
    /// Serialises persist-then-publish
    write_lock: Mutex<()>,
}

impl FilePreferenceStore {
    fn with_values(path: PathBuf, values: Values) -> Self {
        let (values, _) = watch::channel(values);
        Self {
            path,
            values,
            write_lock: Mutex::new(()),
        }
    }

    /// Open the store at `path`, loading existing values if the file exists
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            let contents = std::fs::read_to_string(&path).map_err(|e| {
                Error::preference(format!("Failed to read preferences file: {e}"))
            })?;
            serde_json::from_str(&contents).map_err(|e| {
                Error::preference(format!("Failed to parse preferences file: {e}"))
            })?
        } else {
            Values::new()
        };

        debug!("Opened preferences at {} ({} set)", path.display(), values.len());
        Ok(Self::with_values(path, values))
    }

    /// Create a store that is never written to disk
    pub fn in_memory() -> Self {
        Self::with_values(PathBuf::new(), Values::new())
    }

    /// Path to the preferences file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if this store is memory only
    pub fn is_in_memory(&self) -> bool {
        self.path.as_os_str().is_empty()
    }

    async fn persist(&self, values: &Values) -> Result<()> {
        if self.is_in_memory() {
            return Ok(());
        }

        let contents = serde_json::to_string_pretty(values)
            .map_err(|e| Error::preference(format!("Failed to serialize preferences: {e}")))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                Error::preference(format!("Failed to create preferences directory: {e}"))
            })?;
        }

        let temp_path = self.path.with_extension("tmp");
        tokio::fs::write(&temp_path, &contents)
            .await
            .map_err(|e| Error::preference(format!("Failed to write preferences file: {e}")))?;

        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| Error::preference(format!("Failed to rename preferences file: {e}")))?;

        Ok(())
    }
}

#[async_trait]
impl PreferenceStore for FilePreferenceStore {
    async fn get(&self, preference: BoolPreference) -> bool {
        self.values
            .borrow()
            .get(preference.key())
            .copied()
            .unwrap_or(preference.default_value())
    }

    async fn update(&self, preference: BoolPreference, value: bool) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut next = self.values.borrow().clone();
        next.insert(preference.key().to_string(), value);
        self.persist(&next).await?;
        self.values.send_replace(next);

        debug!("Preference {} set to {}", preference.key(), value);
        Ok(())
    }

    fn subscribe(&self, preference: BoolPreference) -> PreferenceStream {
        let key = preference.key();
        let default = preference.default_value();
        let rx = self.values.subscribe();

        let stream = futures::stream::unfold((rx, None), move |(mut rx, last)| async move {
            loop {
                let current = rx
                    .borrow_and_update()
                    .get(key)
                    .copied()
                    .unwrap_or(default);
                if last != Some(current) {
                    return Some((current, (rx, Some(current))));
                }
                if rx.changed().await.is_err() {
                    return None;
                }
            }
        });
        Box::pin(stream)
    }
}
