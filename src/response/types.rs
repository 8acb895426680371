//! Record and per-version response body shapes

use crate::error::{Error, Result};
use crate::types::{ApiVersion, JsonObject, JsonValue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Record
// ============================================================================

/// One CRM record: a JSON object keyed by field name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(pub JsonObject);

impl Record {
    /// Get a field value
    pub fn get(&self, field: &str) -> Option<&JsonValue> {
        self.0.get(field)
    }

    /// Parse the record's modification timestamp from the given field
    ///
    /// Returns `None` when the field is absent or not an RFC 3339 string.
    pub fn modified_at(&self, field: &str) -> Option<DateTime<Utc>> {
        self.get(field)
            .and_then(JsonValue::as_str)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// The record as a JSON value
    pub fn to_value(&self) -> JsonValue {
        JsonValue::Object(self.0.clone())
    }
}

// ============================================================================
// V1 Body
// ============================================================================

/// First-generation response body: `{"result": {"rows": [...]}}`
///
/// A missing or null `result` means the window held no records.
#[derive(Debug, Clone, Deserialize)]
pub struct V1Body {
    pub result: Option<V1Result>,
}

/// Result section of a v1 body
#[derive(Debug, Clone, Deserialize)]
pub struct V1Result {
    #[serde(default)]
    pub rows: Vec<Record>,
}

// ============================================================================
// V2 Body
// ============================================================================

/// Second-generation response body: `{"data": [...], "info": {...}}`
#[derive(Debug, Clone, Deserialize)]
pub struct V2Body {
    #[serde(default)]
    pub data: Vec<Record>,
    pub info: Option<PageInfo>,
}

/// Paging bookkeeping the v2 service attaches to each body
///
/// Parsed for callers that want it; the pagination engine terminates on
/// page contents alone, so an absent `info` changes nothing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageInfo {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub count: Option<u64>,
    pub more_records: Option<bool>,
}

// ============================================================================
// ApiResponse
// ============================================================================

/// A parsed response body, tagged by API generation
#[derive(Debug, Clone)]
pub enum ApiResponse {
    V1(V1Body),
    V2(V2Body),
}

impl ApiResponse {
    /// Parse a raw JSON body according to the given generation's shape
    pub fn parse(version: ApiVersion, raw: &JsonValue) -> Result<Self> {
        if raw.is_null() {
            // 204-style empty body: an empty page in either generation
            return Ok(match version {
                ApiVersion::V1 => ApiResponse::V1(V1Body { result: None }),
                ApiVersion::V2 => ApiResponse::V2(V2Body {
                    data: Vec::new(),
                    info: None,
                }),
            });
        }

        match version {
            ApiVersion::V1 => serde_json::from_value(raw.clone())
                .map(ApiResponse::V1)
                .map_err(|e| Error::response_shape("v1", e.to_string())),
            ApiVersion::V2 => serde_json::from_value(raw.clone())
                .map(ApiResponse::V2)
                .map_err(|e| Error::response_shape("v2", e.to_string())),
        }
    }

    /// Extract the record sequence, consuming the response
    pub fn into_records(self) -> Vec<Record> {
        match self {
            ApiResponse::V1(body) => body.result.map(|r| r.rows).unwrap_or_default(),
            ApiResponse::V2(body) => body.data,
        }
    }

    /// Paging info, when the generation carries one
    pub fn info(&self) -> Option<&PageInfo> {
        match self {
            ApiResponse::V1(_) => None,
            ApiResponse::V2(body) => body.info.as_ref(),
        }
    }
}
