//! HTTP-backed fetcher

use super::types::{validate_page_request, RemoteFetcher};
use crate::decode::{JsonRecordDecoder, RecordDecoder};
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use crate::types::{PageKey, Record};
use async_trait::async_trait;
use tracing::debug;

/// Default collection path under the base URL
pub const DEFAULT_RESOURCE: &str = "items";

/// Fetches pages with `GET {base}/{resource}?page={n}&per_page={k}`
pub struct HttpItemFetcher {
    client: HttpClient,
    resource: String,
    decoder: Box<dyn RecordDecoder>,
}

impl HttpItemFetcher {
    /// Create a fetcher for `{base}/items` decoding a top-level JSON array
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            resource: DEFAULT_RESOURCE.to_string(),
            decoder: Box::new(JsonRecordDecoder::new()),
        }
    }

    /// Use a different collection path
    #[must_use]
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = resource.into();
        self
    }

    /// Use a different decoder
    #[must_use]
    pub fn with_decoder(mut self, decoder: impl RecordDecoder + 'static) -> Self {
        self.decoder = Box::new(decoder);
        self
    }

    /// Get the collection path
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Get the underlying HTTP client
    pub fn client(&self) -> &HttpClient {
        &self.client
    }
}

#[async_trait]
impl RemoteFetcher for HttpItemFetcher {
    async fn fetch(&self, page_size: u32, page_index: PageKey) -> Result<Vec<Record>> {
        validate_page_request(page_size, page_index)?;

        let request = RequestConfig::new()
            .query("page", page_index)
            .query("per_page", page_size);

        let body = self.client.get_text(&self.resource, request).await?;
        let records = self.decoder.decode(&body)?;

        debug!(
            "Fetched page {} ({} records, page size {})",
            page_index,
            records.len(),
            page_size
        );
        Ok(records)
    }
}

impl std::fmt::Debug for HttpItemFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpItemFetcher")
            .field("client", &self.client)
            .field("resource", &self.resource)
            .finish_non_exhaustive()
    }
}
