//! HTTP client module
//!
//! Provides the HTTP client used at the remote boundary.
//!
//! # Features
//!
//! - **Bounded Time**: Every request carries a whole-request timeout
//! - **Single Attempt**: No retries; failures surface to the caller
//! - **Rate Limiting**: Optional token bucket rate limiter using governor

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig, DEFAULT_TIMEOUT};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
