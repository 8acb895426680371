//! Concurrent batch execution
//!
//! Fans out all member requests at once, joins on every response, and
//! fails atomically: either every member's result is returned in input
//! order, or the error names the first failing index and wraps its cause.

use super::{BatchExecutor, PageExecutor};
use crate::error::{Error, Result};
use crate::pagination::{PageRequest, PageResult};
use crate::types::ExecutionContext;
use async_trait::async_trait;
use futures::future::join_all;
use std::sync::Arc;

/// Default [`BatchExecutor`]: concurrent fan-out over a [`PageExecutor`]
pub struct ConcurrentBatchExecutor {
    executor: Arc<dyn PageExecutor>,
}

impl ConcurrentBatchExecutor {
    /// Wrap a single-page executor
    pub fn new(executor: Arc<dyn PageExecutor>) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl BatchExecutor for ConcurrentBatchExecutor {
    async fn execute_batch(
        &self,
        ctx: &ExecutionContext,
        requests: &[PageRequest],
    ) -> Result<Vec<PageResult>> {
        // Bad input is rejected before anything is dispatched: a member
        // that would itself paginate is not a single-page descriptor.
        for (index, request) in requests.iter().enumerate() {
            if request.query().is_auto_paginating() {
                return Err(Error::batch_composition(
                    index,
                    "auto-paginating query cannot be a batch member",
                ));
            }
        }

        let outcomes = join_all(
            requests
                .iter()
                .map(|request| self.executor.execute(ctx, request)),
        )
        .await;

        let mut results = Vec::with_capacity(outcomes.len());
        for (index, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                Ok(page) => results.push(page),
                Err(source) => return Err(Error::batch_member(index, source)),
            }
        }

        Ok(results)
    }
}

impl std::fmt::Debug for ConcurrentBatchExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConcurrentBatchExecutor").finish()
    }
}
