//! Page boundary detection
//!
//! Per-generation logic deciding how a cursor maps onto the wire and
//! whether a fetched page is the last one. A page is last when it is
//! empty or shorter than the configured page size; the second-generation
//! policy additionally stops at a record-modification-date cutoff.

use super::types::{PageResult, PageSelector};
use crate::config::FetchConfig;
use crate::types::ApiVersion;
use chrono::{DateTime, Utc};

/// Maps cursors to selectors and recognizes the last page
pub trait PageBoundary: Send + Sync {
    /// Wire selector for the given logical cursor
    fn selector(&self, cursor: u64) -> PageSelector;

    /// Inspect a fetched page, possibly truncating it
    ///
    /// Returns whether more pages may follow. Truncation only ever
    /// removes records; it never reorders the remainder.
    fn inspect(&self, page: &mut PageResult) -> bool;
}

/// Build the boundary policy for a validated fetch config
pub fn boundary_for(config: &FetchConfig) -> Box<dyn PageBoundary> {
    match config.api_version {
        ApiVersion::V1 => Box::new(OffsetWindowBoundary {
            page_size: config.page_size,
        }),
        ApiVersion::V2 => Box::new(PageNumberBoundary {
            page_size: config.page_size,
            cutoff: config.max_modified_time,
            modified_field: config.modified_field.clone(),
        }),
    }
}

// ============================================================================
// Offset Window (v1)
// ============================================================================

/// First-generation policy: a 1-based inclusive `fromIndex`/`toIndex`
/// window advanced by the page size each cursor
#[derive(Debug, Clone)]
pub struct OffsetWindowBoundary {
    pub page_size: u64,
}

impl PageBoundary for OffsetWindowBoundary {
    fn selector(&self, cursor: u64) -> PageSelector {
        let from_index = cursor * self.page_size + 1;
        PageSelector::OffsetWindow {
            from_index,
            to_index: from_index + self.page_size - 1,
        }
    }

    fn inspect(&self, page: &mut PageResult) -> bool {
        (page.records().len() as u64) >= self.page_size
    }
}

// ============================================================================
// Page Number (v2)
// ============================================================================

/// Second-generation policy: a 1-based page counter with an optional
/// modification-date cutoff
#[derive(Debug, Clone)]
pub struct PageNumberBoundary {
    pub page_size: u64,
    pub cutoff: Option<DateTime<Utc>>,
    pub modified_field: String,
}

impl PageBoundary for PageNumberBoundary {
    fn selector(&self, cursor: u64) -> PageSelector {
        PageSelector::PageNumber {
            page: cursor + 1,
            per_page: self.page_size,
        }
    }

    fn inspect(&self, page: &mut PageResult) -> bool {
        let mut more = (page.records().len() as u64) >= self.page_size;

        if let Some(cutoff) = self.cutoff {
            let last_crossed = page
                .records()
                .last()
                .and_then(|record| record.modified_at(&self.modified_field))
                .is_some_and(|ts| ts >= cutoff);

            if last_crossed {
                // A record modified exactly at the cutoff is excluded.
                // Records without a parseable timestamp are kept.
                page.retain_records(|record| {
                    record
                        .modified_at(&self.modified_field)
                        .map_or(true, |ts| ts < cutoff)
                });
                more = false;
            }
        }

        more
    }
}
