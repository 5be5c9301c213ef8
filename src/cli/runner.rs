//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat, PrefsAction};
use crate::config::AppConfig;
use crate::decode::JsonRecordDecoder;
use crate::error::{Error, Result};
use crate::fetcher::{HttpItemFetcher, RemoteFetcher};
use crate::http::HttpClient;
use crate::pager::{LoadOutcome, Pager};
use crate::paging::{ItemPagingSource, Page};
use crate::preferences::{self, FilePreferenceStore, PreferenceStore, SHOW_DESCRIPTION};
use crate::types::{LoadDirection, LogLevel, PageKey, Record, FIRST_PAGE_KEY};
use serde_json::{json, Value};
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
    config: AppConfig,
}

impl Runner {
    /// Create a runner, loading the config file and applying flag overrides
    pub fn new(cli: Cli) -> Result<Self> {
        let config = Self::load_config(&cli)?;
        Ok(Self { cli, config })
    }

    fn load_config(cli: &Cli) -> Result<AppConfig> {
        let mut config = match &cli.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };

        if let Some(base_url) = &cli.base_url {
            config.base_url.clone_from(base_url);
        }
        if let Some(path) = &cli.preferences {
            config.preferences_path.clone_from(path);
        }

        config.validate()?;
        Ok(config)
    }

    /// Effective configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Log level to use when `RUST_LOG` does not say otherwise
    pub fn log_level(&self) -> LogLevel {
        if self.cli.verbose {
            LogLevel::Debug
        } else {
            self.config.log_level
        }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Fetch { page, per_page } => {
                self.fetch(*page, per_page.unwrap_or(self.config.page_size))
                    .await
            }
            Commands::Browse {
                max_pages,
                start_key,
            } => self.browse(*max_pages, *start_key).await,
            Commands::Prefs { action } => self.prefs(action).await,
        }
    }

    fn build_fetcher(&self) -> Result<HttpItemFetcher> {
        let client = HttpClient::with_config(self.config.http_client_config())?;
        let fetcher = HttpItemFetcher::new(client).with_resource(&self.config.resource);
        Ok(match &self.config.record_path {
            Some(path) => fetcher.with_decoder(JsonRecordDecoder::with_path(path)),
            None => fetcher,
        })
    }

    fn open_preferences(&self) -> Result<FilePreferenceStore> {
        FilePreferenceStore::open(&self.config.preferences_path)
    }

    /// Fetch one page directly
    async fn fetch(&self, page: PageKey, per_page: u32) -> Result<()> {
        let fetcher = self.build_fetcher()?;
        let show_description = self.open_preferences()?.get(SHOW_DESCRIPTION).await;

        let records = fetcher.fetch(per_page, page).await?;
        for record in &records {
            self.output_record(page, record, show_description);
        }
        self.output_message(&json!({
            "type": "PAGE",
            "page": {
                "key": page,
                "count": records.len(),
            }
        }));
        Ok(())
    }

    /// Drive a pager forward from `start_key`
    async fn browse(&self, max_pages: usize, start_key: Option<PageKey>) -> Result<()> {
        let source = ItemPagingSource::new(self.build_fetcher()?, self.config.page_size)?;
        let mut pager = Pager::new(source, self.config.paging_config());
        let show_description = self.open_preferences()?.get(SHOW_DESCRIPTION).await;

        let handle = pager.cancel_handle();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                handle.cancel();
            }
        });

        let mut key = start_key.unwrap_or(FIRST_PAGE_KEY);
        let mut outcome = pager.refresh_from(start_key).await;

        for loaded in 0..max_pages {
            match outcome {
                LoadOutcome::Loaded { .. } => {}
                LoadOutcome::EndOfPagination | LoadOutcome::Skipped => break,
                LoadOutcome::Failed(err) if err.is_cancelled() => {
                    info!("Browse cancelled after {} pages", loaded);
                    return Err(Error::Cancelled);
                }
                LoadOutcome::Failed(err) => {
                    return Err(Error::Other(format!("Failed to load page {key}: {err}")));
                }
            }

            let Some(page) = pager.pages().last() else {
                break;
            };
            self.output_page(key, page, show_description);

            match page.next_key {
                Some(next) if loaded + 1 < max_pages => key = next,
                _ => break,
            }
            outcome = pager.request_page(LoadDirection::Append).await;
        }

        debug!("{:?}", pager);
        self.output_message(&json!({
            "type": "SUMMARY",
            "summary": {
                "pages": pager.pages().len(),
                "items": pager.item_count(),
                "end_of_pagination": pager.load_states().append.is_end_of_pagination(),
            }
        }));
        Ok(())
    }

    async fn prefs(&self, action: &PrefsAction) -> Result<()> {
        let store = self.open_preferences()?;

        let (name, value) = match action {
            PrefsAction::Get { name } => {
                let preference = find_preference(name)?;
                (name, store.get(preference).await)
            }
            PrefsAction::Set { value, name } => {
                let preference = find_preference(name)?;
                store.update(preference, *value).await?;
                (name, *value)
            }
        };

        self.output_message(&json!({
            "type": "PREFERENCE",
            "preference": {
                "name": name,
                "value": value,
            }
        }));
        Ok(())
    }

    fn output_page(&self, key: PageKey, page: &Page<Record>, show_description: bool) {
        for record in &page.data {
            self.output_record(key, record, show_description);
        }
        self.output_message(&json!({
            "type": "PAGE",
            "page": {
                "key": key,
                "prev_key": page.prev_key,
                "next_key": page.next_key,
                "count": page.len(),
            }
        }));
    }

    fn output_record(&self, key: PageKey, record: &Record, show_description: bool) {
        let mut value = serde_json::to_value(record).unwrap_or(Value::Null);
        if !show_description {
            if let Value::Object(map) = &mut value {
                map.remove("description");
            }
        }
        self.output_message(&json!({
            "type": "RECORD",
            "page": key,
            "record": value,
        }));
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

fn find_preference(name: &str) -> Result<preferences::BoolPreference> {
    preferences::lookup(name)
        .ok_or_else(|| Error::preference(format!("Unknown preference '{name}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn test_flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url: \"https://api.example.com\"\npage_size: 7").unwrap();
        let path = file.path().to_str().unwrap();

        let cli = Cli::parse_from([
            "item-pager",
            "--config",
            path,
            "--base-url",
            "http://localhost:9000",
            "browse",
        ]);
        let runner = Runner::new(cli).unwrap();

        assert_eq!(runner.config().base_url, "http://localhost:9000");
        assert_eq!(runner.config().page_size, 7);
        assert_eq!(runner.log_level(), LogLevel::Info);
    }

    #[test]
    fn test_verbose_raises_log_level() {
        let cli = Cli::parse_from(["item-pager", "-v", "prefs", "get"]);
        let runner = Runner::new(cli).unwrap();
        assert_eq!(runner.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_invalid_base_url_override() {
        let cli = Cli::parse_from(["item-pager", "--base-url", "nope", "browse"]);
        assert!(Runner::new(cli).is_err());
    }

    #[tokio::test]
    async fn test_prefs_set_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let path = path.to_str().unwrap();

        let cli = Cli::parse_from(["item-pager", "--preferences", path, "prefs", "set", "false"]);
        Runner::new(cli).unwrap().run().await.unwrap();

        let store = FilePreferenceStore::open(path).unwrap();
        assert!(!store.get(SHOW_DESCRIPTION).await);

        let cli = Cli::parse_from(["item-pager", "--preferences", path, "prefs", "get", "dark-mode"]);
        let err = Runner::new(cli).unwrap().run().await.unwrap_err();
        assert!(err.to_string().contains("Unknown preference"));
    }
}
