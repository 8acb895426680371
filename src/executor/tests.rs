//! Tests for page execution

use super::*;
use crate::error::Error;
use crate::pagination::{PageRequest, PageResult, PageSelector};
use crate::query::{Query, QueryBuilder};
use crate::response::Record;
use crate::types::{ApiVersion, ExecutionContext, JsonValue};
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn record(id: u64) -> Record {
    match json!({ "id": id }) {
        JsonValue::Object(map) => Record(map),
        _ => unreachable!(),
    }
}

fn selector(cursor: u64) -> PageSelector {
    PageSelector::PageNumber {
        page: cursor + 1,
        per_page: 2,
    }
}

fn request(cursor: u64) -> PageRequest {
    PageRequest::from_base(&Query::new("Leads"), cursor, selector(cursor))
}

/// Executor whose lower cursors respond slower, with one optional
/// failing cursor
struct SlowLowCursors {
    fail_at: Option<u64>,
}

#[async_trait]
impl PageExecutor for SlowLowCursors {
    async fn execute(
        &self,
        _ctx: &ExecutionContext,
        request: &PageRequest,
    ) -> crate::error::Result<PageResult> {
        let delay = 40u64.saturating_sub(request.cursor() * 10);
        tokio::time::sleep(Duration::from_millis(delay)).await;

        if self.fail_at == Some(request.cursor()) {
            return Err(Error::Timeout { timeout_ms: 5 });
        }

        Ok(PageResult::new(
            request,
            vec![record(request.cursor())],
            json!({ "cursor": request.cursor() }),
        ))
    }
}

#[tokio::test]
async fn test_batch_results_are_positional_despite_arrival_order() {
    let batch = ConcurrentBatchExecutor::new(Arc::new(SlowLowCursors { fail_at: None }));
    let ctx = ExecutionContext::new(ApiVersion::V2);
    let requests: Vec<_> = (0..4).map(request).collect();

    let results = batch.execute_batch(&ctx, &requests).await.unwrap();

    let cursors: Vec<_> = results.iter().map(PageResult::cursor).collect();
    assert_eq!(cursors, vec![0, 1, 2, 3]);
}

#[tokio::test]
async fn test_batch_fails_atomically_with_member_index() {
    let batch = ConcurrentBatchExecutor::new(Arc::new(SlowLowCursors { fail_at: Some(2) }));
    let ctx = ExecutionContext::new(ApiVersion::V2);
    let requests: Vec<_> = (0..4).map(request).collect();

    let err = batch.execute_batch(&ctx, &requests).await.unwrap_err();
    match err {
        Error::BatchMember { index, source } => {
            assert_eq!(index, 2);
            assert!(matches!(*source, Error::Timeout { .. }));
        }
        other => panic!("Expected BatchMember, got {other:?}"),
    }
}

#[tokio::test]
async fn test_batch_rejects_auto_paginating_member_before_dispatch() {
    let batch = ConcurrentBatchExecutor::new(Arc::new(SlowLowCursors { fail_at: None }));
    let ctx = ExecutionContext::new(ApiVersion::V2);

    let paginated = QueryBuilder::new("Leads").paginate_all().build();
    let requests = vec![
        request(0),
        PageRequest::new(paginated, 1, selector(1)),
    ];

    let err = batch.execute_batch(&ctx, &requests).await.unwrap_err();
    assert!(matches!(err, Error::BatchComposition { index: 1, .. }));
}

#[tokio::test]
async fn test_empty_batch_is_ok() {
    let batch = ConcurrentBatchExecutor::new(Arc::new(SlowLowCursors { fail_at: None }));
    let ctx = ExecutionContext::new(ApiVersion::V2);

    let results = batch.execute_batch(&ctx, &[]).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_engine_descriptors_pass_composition_check() {
    // Descriptors derived from an auto-paginating base query are
    // stripped and therefore batchable
    let batch = ConcurrentBatchExecutor::new(Arc::new(SlowLowCursors { fail_at: None }));
    let ctx = ExecutionContext::new(ApiVersion::V2);

    let base = QueryBuilder::new("Leads").paginate_all().build();
    let requests: Vec<_> = (0..2)
        .map(|cursor| PageRequest::from_base(&base, cursor, selector(cursor)))
        .collect();

    let results = batch.execute_batch(&ctx, &requests).await.unwrap();
    assert_eq!(results.len(), 2);
}
