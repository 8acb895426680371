//! # crmkit
//!
//! A Rust-native client SDK for CRM-style REST APIs that exist in two
//! generations: "v1" (offset-window paging via `fromIndex`/`toIndex`) and
//! "v2" (page-number paging with an optional record-modification-date
//! cutoff).
//!
//! ## Features
//!
//! - **Fluent queries**: build module queries with field selection,
//!   criteria, and sorting
//! - **Pagination engine**: sequential or concurrent page fetching with
//!   deterministic end-of-data detection
//! - **Atomic batches**: fan out N page requests, join on all, fail as one
//! - **Auth**: API key (v1) and OAuth2 refresh-token bearer (v2) flows
//! - **Transport**: retries with backoff and token-bucket rate limiting
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use crmkit::client::CrmClient;
//! use crmkit::config::FetchConfig;
//! use crmkit::query::QueryBuilder;
//! use crmkit::types::ApiVersion;
//! use crmkit::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = CrmClient::builder("https://crm.example.com/api")
//!         .fetch_config(FetchConfig::builder()
//!             .api_version(ApiVersion::V2)
//!             .concurrency(3)
//!             .build()?)
//!         .build()?;
//!
//!     let query = QueryBuilder::new("Leads").select(["id", "company"]).build();
//!     let response = client.fetch_all(query).await?;
//!     println!("fetched {} pages", response.pages_fetched);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                         CrmClient                             │
//! │   engine(query) → PageFetchEngine    fetch_all(query)         │
//! └───────────────────────────────────────────────────────────────┘
//!                               │
//! ┌──────────┬──────────┬───────┴────────┬───────────┬────────────┐
//! │  Query   │ Boundary │     Engine     │ Executor  │  Response  │
//! ├──────────┼──────────┼────────────────┼───────────┼────────────┤
//! │ Builder  │ Offset   │ fetch_one      │ Single    │ V1 / V2    │
//! │ Criteria │ Page+date│ fetch_batch    │ Batch     │ Records    │
//! │ Sorting  │  cutoff  │ fetch_all/upto │ (atomic)  │ Merge      │
//! └──────────┴──────────┴────────────────┴───────────┴────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the SDK
pub mod error;

/// Common types and type aliases
pub mod types;

/// Fetch configuration
pub mod config;

/// Authentication
pub mod auth;

/// HTTP transport with retry and rate limiting
pub mod http;

/// Query model and fluent builder
pub mod query;

/// Response parsing and merging
pub mod response;

/// Page execution (single and batch)
pub mod executor;

/// Pagination engine
pub mod pagination;

/// SDK facade
pub mod client;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::CrmClient;
pub use error::{Error, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
