//! Common types used throughout crmkit
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// API Version
// ============================================================================

/// API generation of the CRM service
///
/// The two generations differ in paging style (offset window vs page
/// number), URL layout, and response body shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiVersion {
    /// First generation: `fromIndex`/`toIndex` offset windows
    V1,
    /// Second generation: `page`/`per_page` numbers, modification-date cutoff
    #[default]
    V2,
}

impl ApiVersion {
    /// URL path segment for this generation
    pub fn path_segment(&self) -> &'static str {
        match self {
            ApiVersion::V1 => "v1",
            ApiVersion::V2 => "v2",
        }
    }
}

impl std::fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path_segment())
    }
}

// ============================================================================
// Sort Order
// ============================================================================

/// Sort direction for query results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Wire value for the sort order parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

// ============================================================================
// Execution Context
// ============================================================================

/// Per-run execution context passed down through executor calls
///
/// Generated once per top-level fetch run and threaded explicitly through
/// every dispatch, so request logs from one pagination run can be
/// correlated without any process-global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionContext {
    /// Unique id for this run
    pub execution_id: Uuid,
    /// API generation the run targets
    pub api_version: ApiVersion,
}

impl ExecutionContext {
    /// Create a fresh context with a random execution id
    pub fn new(api_version: ApiVersion) -> Self {
        Self {
            execution_id: Uuid::new_v4(),
            api_version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_version_path_segment() {
        assert_eq!(ApiVersion::V1.path_segment(), "v1");
        assert_eq!(ApiVersion::V2.path_segment(), "v2");
        assert_eq!(ApiVersion::V2.to_string(), "v2");
    }

    #[test]
    fn test_api_version_serde() {
        let version: ApiVersion = serde_json::from_str("\"v1\"").unwrap();
        assert_eq!(version, ApiVersion::V1);

        let json = serde_json::to_string(&ApiVersion::V2).unwrap();
        assert_eq!(json, "\"v2\"");
    }

    #[test]
    fn test_sort_order_wire_value() {
        assert_eq!(SortOrder::Asc.as_str(), "asc");
        assert_eq!(SortOrder::Desc.as_str(), "desc");
        assert_eq!(SortOrder::default(), SortOrder::Asc);
    }

    #[test]
    fn test_execution_context_ids_are_unique() {
        let a = ExecutionContext::new(ApiVersion::V2);
        let b = ExecutionContext::new(ApiVersion::V2);
        assert_ne!(a.execution_id, b.execution_id);
    }
}
