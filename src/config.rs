//! Fetch configuration
//!
//! Controls page size, the sequential/concurrent fetch strategy, and the
//! optional record-modification-date cutoff. Invalid values are rejected
//! when the config is built, before any fetch begins.

use crate::error::{Error, Result};
use crate::types::ApiVersion;
use chrono::{DateTime, Utc};

/// Default records per page
pub const DEFAULT_PAGE_SIZE: u64 = 200;

/// Default record field carrying the modification timestamp
pub const DEFAULT_MODIFIED_FIELD: &str = "modified_time";

/// Configuration for a pagination run
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// API generation to target
    pub api_version: ApiVersion,
    /// Records per page (positive)
    pub page_size: u64,
    /// Concurrent batch width; `None` means sequential fetching
    pub concurrency: Option<u64>,
    /// Stop fetching once records reach this modification date
    pub max_modified_time: Option<DateTime<Utc>>,
    /// Record field holding the RFC 3339 modification timestamp
    pub modified_field: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            api_version: ApiVersion::default(),
            page_size: DEFAULT_PAGE_SIZE,
            concurrency: None,
            max_modified_time: None,
            modified_field: DEFAULT_MODIFIED_FIELD.to_string(),
        }
    }
}

impl FetchConfig {
    /// Create a config builder
    pub fn builder() -> FetchConfigBuilder {
        FetchConfigBuilder::default()
    }

    /// Validate the configured values
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be positive"));
        }
        if self.concurrency == Some(0) {
            return Err(Error::invalid_value(
                "concurrency",
                "must be positive; use None for sequential fetching",
            ));
        }
        if self.modified_field.is_empty() {
            return Err(Error::invalid_value("modified_field", "must not be empty"));
        }
        Ok(())
    }
}

/// Builder for [`FetchConfig`]
#[derive(Debug, Default)]
pub struct FetchConfigBuilder {
    config: FetchConfig,
}

impl FetchConfigBuilder {
    /// Set the API generation
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.config.api_version = version;
        self
    }

    /// Set the page size
    pub fn page_size(mut self, page_size: u64) -> Self {
        self.config.page_size = page_size;
        self
    }

    /// Set the concurrent batch width
    pub fn concurrency(mut self, width: u64) -> Self {
        self.config.concurrency = Some(width);
        self
    }

    /// Force sequential fetching
    pub fn sequential(mut self) -> Self {
        self.config.concurrency = None;
        self
    }

    /// Set the modification-date cutoff
    pub fn max_modified_time(mut self, cutoff: DateTime<Utc>) -> Self {
        self.config.max_modified_time = Some(cutoff);
        self
    }

    /// Set the record field holding the modification timestamp
    pub fn modified_field(mut self, field: impl Into<String>) -> Self {
        self.config.modified_field = field.into();
        self
    }

    /// Validate and build the config
    pub fn build(self) -> Result<FetchConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_config() {
        let config = FetchConfig::default();
        assert_eq!(config.page_size, 200);
        assert!(config.concurrency.is_none());
        assert!(config.max_modified_time.is_none());
        assert_eq!(config.modified_field, "modified_time");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_sets_values() {
        let cutoff = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let config = FetchConfig::builder()
            .api_version(ApiVersion::V1)
            .page_size(50)
            .concurrency(4)
            .max_modified_time(cutoff)
            .modified_field("last_modified")
            .build()
            .unwrap();

        assert_eq!(config.api_version, ApiVersion::V1);
        assert_eq!(config.page_size, 50);
        assert_eq!(config.concurrency, Some(4));
        assert_eq!(config.max_modified_time, Some(cutoff));
        assert_eq!(config.modified_field, "last_modified");
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let err = FetchConfig::builder().page_size(0).build().unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::InvalidConfigValue { ref field, .. } if field == "page_size"
        ));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let err = FetchConfig::builder().concurrency(0).build().unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::InvalidConfigValue { ref field, .. } if field == "concurrency"
        ));
    }

    #[test]
    fn test_sequential_clears_concurrency() {
        let config = FetchConfig::builder()
            .concurrency(3)
            .sequential()
            .build()
            .unwrap();
        assert!(config.concurrency.is_none());
    }
}
