//! HTTP transport
//!
//! The SDK's only outward-facing I/O layer: request building, automatic
//! retries with backoff, token-bucket rate limiting, and auth
//! application. The pagination core above it never retries or logs;
//! both concerns live here.

mod client;
mod rate_limit;

pub use client::{BackoffType, HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
