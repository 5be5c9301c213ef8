//! Response decoder module
//!
//! Turns a page response body into [`Record`](crate::types::Record)s.
//!
//! # Overview
//!
//! The body is expected to be a JSON array of record objects, optionally
//! wrapped in an object and reached through a dotted record path.
//! Decoding is lenient about fields but strict about shape: a body that is
//! not JSON, or does not contain an array of objects with an `id`, fails
//! the whole page with a decode error.

mod decoders;
mod types;

pub use decoders::JsonRecordDecoder;
pub use types::RecordDecoder;

#[cfg(test)]
mod tests;
