//! HTTP-backed page executor

use super::PageExecutor;
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use crate::pagination::{PageRequest, PageResult};
use crate::response::ApiResponse;
use crate::types::{ApiVersion, ExecutionContext, JsonValue};
use async_trait::async_trait;
use tracing::debug;

/// Fetches pages from the CRM's REST endpoints
///
/// Builds the per-generation URL path and wire parameters, issues the
/// request through the shared [`HttpClient`] (which owns retry, rate
/// limiting, and auth), and parses the body into a [`PageResult`].
pub struct HttpPageExecutor {
    http: HttpClient,
    version: ApiVersion,
}

impl HttpPageExecutor {
    /// Create an executor for the given generation
    pub fn new(http: HttpClient, version: ApiVersion) -> Self {
        Self { http, version }
    }

    fn path_for(&self, request: &PageRequest) -> String {
        format!(
            "{}/{}",
            self.version.path_segment(),
            request.query().module()
        )
    }
}

#[async_trait]
impl PageExecutor for HttpPageExecutor {
    async fn execute(&self, ctx: &ExecutionContext, request: &PageRequest) -> Result<PageResult> {
        let path = self.path_for(request);

        let mut config = RequestConfig::new();
        for (key, value) in request.query_params() {
            config = config.query(key, value);
        }

        debug!(
            execution_id = %ctx.execution_id,
            cursor = request.cursor(),
            module = request.query().module(),
            "dispatching page request"
        );

        let response = self.http.get_with_config(&path, config).await?;

        // A no-content reply is an empty page, not a parse failure
        let body = response.text().await?;
        let raw: JsonValue = if body.trim().is_empty() {
            JsonValue::Null
        } else {
            serde_json::from_str(&body)?
        };

        let parsed = ApiResponse::parse(self.version, &raw)?;
        Ok(PageResult::new(request, parsed.into_records(), raw))
    }
}

impl std::fmt::Debug for HttpPageExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpPageExecutor")
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}
