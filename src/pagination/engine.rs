//! Page fetch engine
//!
//! One engine instance drives one logical pagination run: it derives page
//! descriptors from a base query, executes them (one at a time or as
//! concurrent batches), feeds each result through the boundary detector,
//! and accumulates pages in fetch order. The engine holds no locks and is
//! not meant to be driven from multiple tasks at once; it performs no
//! retries and no logging of its own.

use super::boundary::{boundary_for, PageBoundary};
use super::types::{PageRequest, PageResult, PaginationState};
use crate::config::FetchConfig;
use crate::error::{Error, Result};
use crate::executor::{BatchExecutor, ConcurrentBatchExecutor, PageExecutor};
use crate::query::Query;
use crate::response::{merge_pages, MergePages, PaginatedResponse};
use crate::types::ExecutionContext;
use std::sync::Arc;

/// How `fetch_all`/`fetch_up_to` advance through pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchStrategy {
    /// One request at a time
    Sequential,
    /// Batches of the given width, dispatched concurrently
    Concurrent(u64),
}

impl FetchStrategy {
    fn from_config(config: &FetchConfig) -> Self {
        match config.concurrency {
            Some(width) if width > 1 => FetchStrategy::Concurrent(width),
            _ => FetchStrategy::Sequential,
        }
    }
}

/// Drives one pagination run over a base query
pub struct PageFetchEngine {
    executor: Arc<dyn PageExecutor>,
    batch: Arc<dyn BatchExecutor>,
    boundary: Box<dyn PageBoundary>,
    strategy: FetchStrategy,
    context: ExecutionContext,
    query: Query,
    state: PaginationState,
}

impl PageFetchEngine {
    /// Create an engine for one run
    ///
    /// Validates the config up front; a fresh execution context is
    /// generated for the run. The default batch executor fans out over
    /// the same single-page executor.
    pub fn new(executor: Arc<dyn PageExecutor>, query: Query, config: &FetchConfig) -> Result<Self> {
        config.validate()?;
        let batch = Arc::new(ConcurrentBatchExecutor::new(executor.clone()));
        Ok(Self {
            executor,
            batch,
            boundary: boundary_for(config),
            strategy: FetchStrategy::from_config(config),
            context: ExecutionContext::new(config.api_version),
            query,
            state: PaginationState::new(),
        })
    }

    /// Substitute the batch executor
    #[must_use]
    pub fn with_batch_executor(mut self, batch: Arc<dyn BatchExecutor>) -> Self {
        self.batch = batch;
        self
    }

    /// Fetch the next page, if any
    ///
    /// Returns `None` once the boundary detector has declared the end of
    /// the result set; calling again is a no-op, not an error.
    pub async fn fetch_one(&mut self) -> Result<Option<PageResult>> {
        if !self.state.has_more {
            return Ok(None);
        }

        let request = self.next_request();
        let mut page = self.executor.execute(&self.context, &request).await?;

        if !self.boundary.inspect(&mut page) {
            self.state.has_more = false;
        }
        self.state.pages_fetched += 1;
        self.state.accumulated.push(page.clone());

        Ok(Some(page))
    }

    /// Fetch `batch_size` pages as one concurrent, atomic batch
    ///
    /// Descriptors are dispatched at consecutive cursors and the returned
    /// results are processed in cursor order, so the end-of-data rule is
    /// deterministic regardless of network timing: once a page is
    /// detected as last, later results in the batch are discarded. The
    /// cursor and the fetched-page counter advance by the full batch
    /// width either way. Returns the pages this call appended.
    pub async fn fetch_batch(&mut self, batch_size: u64) -> Result<&[PageResult]> {
        if batch_size == 0 {
            return Err(Error::invalid_value("batch_size", "must be positive"));
        }

        let start = self.state.accumulated.len();
        if !self.state.has_more {
            return Ok(&self.state.accumulated[start..]);
        }

        let requests: Vec<PageRequest> = (0..batch_size).map(|_| self.next_request()).collect();
        let pages = self.batch.execute_batch(&self.context, &requests).await?;
        self.state.pages_fetched += batch_size;

        for mut page in pages {
            if !self.state.has_more {
                break;
            }
            if !self.boundary.inspect(&mut page) {
                self.state.has_more = false;
            }
            self.state.accumulated.push(page);
        }

        Ok(&self.state.accumulated[start..])
    }

    /// Fetch every remaining page
    ///
    /// Repeats the configured strategy until the boundary detector stops
    /// the run. Returns the full accumulated sequence.
    pub async fn fetch_all(&mut self) -> Result<&[PageResult]> {
        while self.state.has_more {
            match self.strategy {
                FetchStrategy::Sequential => {
                    self.fetch_one().await?;
                }
                FetchStrategy::Concurrent(width) => {
                    self.fetch_batch(width).await?;
                }
            }
        }
        Ok(&self.state.accumulated)
    }

    /// Fetch until `limit` pages have been fetched in total
    ///
    /// The limit is checked against the engine's cumulative counter, not
    /// per call: once a previous call has reached it, calling again is a
    /// no-op. Concurrent batches are clamped to the remaining budget.
    pub async fn fetch_up_to(&mut self, limit: u64) -> Result<&[PageResult]> {
        if limit == 0 {
            return Err(Error::invalid_value("limit", "must be positive"));
        }

        while self.state.has_more && self.state.pages_fetched < limit {
            match self.strategy {
                FetchStrategy::Sequential => {
                    self.fetch_one().await?;
                }
                FetchStrategy::Concurrent(width) => {
                    let remaining = limit - self.state.pages_fetched;
                    self.fetch_batch(width.min(remaining)).await?;
                }
            }
        }
        Ok(&self.state.accumulated)
    }

    /// Finish the run: merge non-empty page contents into one response
    pub fn into_response(self, merger: &dyn MergePages) -> PaginatedResponse {
        let (content, raw_pages) = merge_pages(&self.state.accumulated, merger);
        PaginatedResponse {
            content,
            raw_pages,
            query: self.query,
            pages_fetched: self.state.pages_fetched,
        }
    }

    /// Run state, read-only
    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    /// Whether more pages may remain
    pub fn has_more(&self) -> bool {
        self.state.has_more
    }

    /// Pages dispatched and completed so far
    pub fn pages_fetched(&self) -> u64 {
        self.state.pages_fetched
    }

    /// Pages accumulated so far, in fetch order
    pub fn accumulated(&self) -> &[PageResult] {
        &self.state.accumulated
    }

    /// Execution context for this run
    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    /// The base query this run paginates
    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Build the next descriptor, advancing the cursor by exactly one
    fn next_request(&mut self) -> PageRequest {
        let cursor = self.state.next_cursor;
        self.state.next_cursor += 1;
        PageRequest::from_base(&self.query, cursor, self.boundary.selector(cursor))
    }
}

impl std::fmt::Debug for PageFetchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageFetchEngine")
            .field("strategy", &self.strategy)
            .field("query", &self.query)
            .field("pages_fetched", &self.state.pages_fetched)
            .field("has_more", &self.state.has_more)
            .finish_non_exhaustive()
    }
}
