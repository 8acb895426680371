//! Core pagination types
//!
//! Defines page selectors, immutable page-request descriptors, fetched
//! page results, and the engine-owned run state.

use crate::query::Query;
use crate::response::Record;
use crate::types::JsonValue;

// ============================================================================
// Page Selector
// ============================================================================

/// Wire form of one cursor value
///
/// The first generation selects records by an inclusive offset window,
/// the second by a page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSelector {
    /// Page-number selection: `page`/`per_page`
    PageNumber { page: u64, per_page: u64 },
    /// Offset-window selection: `fromIndex`/`toIndex`, 1-based inclusive
    OffsetWindow { from_index: u64, to_index: u64 },
}

impl PageSelector {
    /// Render the paging wire parameters
    pub fn query_params(&self) -> Vec<(String, String)> {
        match self {
            PageSelector::PageNumber { page, per_page } => vec![
                ("page".to_string(), page.to_string()),
                ("per_page".to_string(), per_page.to_string()),
            ],
            PageSelector::OffsetWindow {
                from_index,
                to_index,
            } => vec![
                ("fromIndex".to_string(), from_index.to_string()),
                ("toIndex".to_string(), to_index.to_string()),
            ],
        }
    }
}

// ============================================================================
// Page Request
// ============================================================================

/// Immutable descriptor for "fetch page N of query Q"
///
/// Derived by cloning the base query (auto-pagination stripped) and
/// attaching a selector; the base query is never mutated, so descriptors
/// are independent and safe to dispatch concurrently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    query: Query,
    cursor: u64,
    selector: PageSelector,
}

impl PageRequest {
    /// Build a descriptor carrying the query verbatim
    ///
    /// The batch executor rejects members whose query still asks for
    /// automatic pagination; prefer [`PageRequest::from_base`], which
    /// strips the flag.
    pub fn new(query: Query, cursor: u64, selector: PageSelector) -> Self {
        Self {
            query,
            cursor,
            selector,
        }
    }

    /// Derive a single-page descriptor from a base query
    pub fn from_base(base: &Query, cursor: u64, selector: PageSelector) -> Self {
        Self::new(base.as_single_page(), cursor, selector)
    }

    /// The single-page query this descriptor carries
    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Logical cursor value (0-based dispatch index)
    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    /// Wire form of the cursor
    pub fn selector(&self) -> PageSelector {
        self.selector
    }

    /// Full wire parameters: query constraints plus paging
    pub fn query_params(&self) -> Vec<(String, String)> {
        let mut params = self.query.query_params();
        params.extend(self.selector.query_params());
        params
    }
}

// ============================================================================
// Page Result
// ============================================================================

/// One fetched page: parsed records plus the raw payload
#[derive(Debug, Clone)]
pub struct PageResult {
    cursor: u64,
    selector: PageSelector,
    records: Vec<Record>,
    raw: JsonValue,
}

impl PageResult {
    /// Build a result for the descriptor that produced it
    pub fn new(request: &PageRequest, records: Vec<Record>, raw: JsonValue) -> Self {
        Self {
            cursor: request.cursor(),
            selector: request.selector(),
            records,
            raw,
        }
    }

    /// Cursor of the descriptor that produced this page
    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    /// Selector of the descriptor that produced this page
    pub fn selector(&self) -> PageSelector {
        self.selector
    }

    /// Records on this page, in server order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Page content for the merge step: the records as a JSON array
    pub fn content(&self) -> JsonValue {
        JsonValue::Array(self.records.iter().map(Record::to_value).collect())
    }

    /// Raw response payload
    pub fn raw(&self) -> &JsonValue {
        &self.raw
    }

    /// Drop records that fail the predicate, preserving order
    pub(crate) fn retain_records<F: FnMut(&Record) -> bool>(&mut self, keep: F) {
        self.records.retain(keep);
    }
}

// ============================================================================
// Pagination State
// ============================================================================

/// Run state owned exclusively by one engine instance
///
/// `has_more` only ever transitions true to false; `pages_fetched` and
/// `next_cursor` are monotonic. Created fresh per run and read back
/// through the engine's accessors only.
#[derive(Debug)]
pub struct PaginationState {
    pub(crate) accumulated: Vec<PageResult>,
    pub(crate) has_more: bool,
    pub(crate) pages_fetched: u64,
    pub(crate) next_cursor: u64,
}

impl PaginationState {
    /// Fresh state for a new run
    pub(crate) fn new() -> Self {
        Self {
            accumulated: Vec::new(),
            has_more: true,
            pages_fetched: 0,
            next_cursor: 0,
        }
    }

    /// Pages accumulated so far, in fetch order
    pub fn accumulated(&self) -> &[PageResult] {
        &self.accumulated
    }

    /// Whether more pages may remain
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Pages dispatched and completed so far
    pub fn pages_fetched(&self) -> u64 {
        self.pages_fetched
    }

    /// Cursor the next descriptor will carry
    pub fn next_cursor(&self) -> u64 {
        self.next_cursor
    }

    /// Total records across accumulated pages
    pub fn records_fetched(&self) -> usize {
        self.accumulated.iter().map(|page| page.records().len()).sum()
    }
}
