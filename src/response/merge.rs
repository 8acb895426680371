//! Merge step: combine fetched pages into one logical response
//!
//! The shape of a page's content differs per query kind (a flat record
//! list for most queries, a structured object for some), so the caller
//! supplies the merge function. The core's contract: the merger is called
//! with every non-empty page's content, in the order pages were appended
//! during the run.

use crate::pagination::PageResult;
use crate::query::Query;
use crate::types::JsonValue;

/// Combines the contents of fetched pages into one value
pub trait MergePages: Send + Sync {
    /// Merge page contents, given in append order
    fn merge(&self, pages: Vec<JsonValue>) -> JsonValue;
}

impl<F> MergePages for F
where
    F: Fn(Vec<JsonValue>) -> JsonValue + Send + Sync,
{
    fn merge(&self, pages: Vec<JsonValue>) -> JsonValue {
        self(pages)
    }
}

/// Default merger: concatenates record arrays into one array
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordListMerger;

impl MergePages for RecordListMerger {
    fn merge(&self, pages: Vec<JsonValue>) -> JsonValue {
        let mut merged = Vec::new();
        for page in pages {
            match page {
                JsonValue::Array(records) => merged.extend(records),
                other => merged.push(other),
            }
        }
        JsonValue::Array(merged)
    }
}

/// One logical response assembled from a completed pagination run
#[derive(Debug, Clone)]
pub struct PaginatedResponse {
    /// Merged content across all non-empty pages
    pub content: JsonValue,
    /// Raw per-page payloads, in fetch order
    pub raw_pages: Vec<JsonValue>,
    /// The query that produced this response
    pub query: Query,
    /// Pages dispatched and completed during the run
    pub pages_fetched: u64,
}

impl PaginatedResponse {
    /// Number of raw page payloads in the response
    pub fn page_count(&self) -> usize {
        self.raw_pages.len()
    }
}

/// Apply the merge contract to an accumulated page sequence
///
/// Returns the merged content and the raw payloads of every fetched page
/// (empty pages included) in fetch order.
pub fn merge_pages(pages: &[PageResult], merger: &dyn MergePages) -> (JsonValue, Vec<JsonValue>) {
    let contents = pages
        .iter()
        .filter(|page| !page.records().is_empty())
        .map(PageResult::content)
        .collect();
    let merged = merger.merge(contents);
    let raw_pages = pages.iter().map(|page| page.raw().clone()).collect();
    (merged, raw_pages)
}
