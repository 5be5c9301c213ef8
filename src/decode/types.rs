//! Decoder traits
//!
//! Defines the core decoder abstraction.

use crate::error::Result;
use crate::types::Record;

/// Trait for decoding response bodies into records
pub trait RecordDecoder: Send + Sync {
    /// Decode the response body into a list of records
    fn decode(&self, body: &str) -> Result<Vec<Record>>;
}
