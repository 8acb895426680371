//! Page execution
//!
//! The pagination engine consumes two collaborator contracts: execute one
//! page descriptor ([`PageExecutor`]), and execute N descriptors as one
//! atomic concurrent batch ([`BatchExecutor`]). The HTTP implementations
//! live here; tests substitute in-memory ones.

mod batch;
mod http;

pub use batch::ConcurrentBatchExecutor;
pub use http::HttpPageExecutor;

use crate::error::Result;
use crate::pagination::{PageRequest, PageResult};
use crate::types::ExecutionContext;
use async_trait::async_trait;

/// Executes one page-request descriptor
#[async_trait]
pub trait PageExecutor: Send + Sync {
    /// Fetch the single page the descriptor names
    async fn execute(&self, ctx: &ExecutionContext, request: &PageRequest) -> Result<PageResult>;
}

/// Executes an ordered batch of independent page-request descriptors
///
/// Results are indexed positionally by input order. If any member fails
/// the whole batch fails with an error naming the failing index; partial
/// success is never surfaced.
#[async_trait]
pub trait BatchExecutor: Send + Sync {
    /// Execute all descriptors concurrently and join
    async fn execute_batch(
        &self,
        ctx: &ExecutionContext,
        requests: &[PageRequest],
    ) -> Result<Vec<PageResult>>;
}

#[cfg(test)]
mod tests;
