//! SDK facade
//!
//! [`CrmClient`] wires the configured auth, transport, and fetch settings
//! together and hands out pagination engines. One client serves many
//! runs; each run gets its own engine and execution context.

use crate::auth::AuthConfig;
use crate::config::FetchConfig;
use crate::error::Result;
use crate::executor::{HttpPageExecutor, PageExecutor};
use crate::http::{HttpClient, HttpClientConfig};
use crate::pagination::PageFetchEngine;
use crate::query::Query;
use crate::response::{MergePages, PaginatedResponse, RecordListMerger};
use std::sync::Arc;

/// Client for one CRM org
pub struct CrmClient {
    executor: Arc<dyn PageExecutor>,
    fetch: FetchConfig,
}

impl CrmClient {
    /// Create a client builder
    pub fn builder(base_url: impl Into<String>) -> CrmClientBuilder {
        CrmClientBuilder {
            base_url: base_url.into(),
            auth: AuthConfig::default(),
            http: None,
            fetch: FetchConfig::default(),
        }
    }

    /// Start a pagination engine for one run over the given query
    pub fn engine(&self, query: Query) -> Result<PageFetchEngine> {
        PageFetchEngine::new(self.executor.clone(), query, &self.fetch)
    }

    /// Fetch every page of the query and merge record lists
    pub async fn fetch_all(&self, query: Query) -> Result<PaginatedResponse> {
        self.fetch_all_with(query, &RecordListMerger).await
    }

    /// Fetch every page of the query and merge with a custom merger
    pub async fn fetch_all_with(
        &self,
        query: Query,
        merger: &dyn MergePages,
    ) -> Result<PaginatedResponse> {
        let mut engine = self.engine(query)?;
        engine.fetch_all().await?;
        Ok(engine.into_response(merger))
    }

    /// The fetch configuration this client hands to new engines
    pub fn fetch_config(&self) -> &FetchConfig {
        &self.fetch
    }
}

impl std::fmt::Debug for CrmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrmClient")
            .field("fetch", &self.fetch)
            .finish_non_exhaustive()
    }
}

/// Builder for [`CrmClient`]
pub struct CrmClientBuilder {
    base_url: String,
    auth: AuthConfig,
    http: Option<HttpClientConfig>,
    fetch: FetchConfig,
}

impl CrmClientBuilder {
    /// Set the auth scheme
    #[must_use]
    pub fn auth(mut self, auth: AuthConfig) -> Self {
        self.auth = auth;
        self
    }

    /// Override the transport configuration (base URL is kept)
    #[must_use]
    pub fn http_config(mut self, config: HttpClientConfig) -> Self {
        self.http = Some(config);
        self
    }

    /// Set the fetch configuration
    #[must_use]
    pub fn fetch_config(mut self, fetch: FetchConfig) -> Self {
        self.fetch = fetch;
        self
    }

    /// Validate and build the client
    pub fn build(self) -> Result<CrmClient> {
        self.fetch.validate()?;

        let mut http_config = self.http.unwrap_or_default();
        http_config.base_url = Some(self.base_url);

        let http = HttpClient::with_auth(http_config, self.auth);
        let executor = Arc::new(HttpPageExecutor::new(http, self.fetch.api_version));

        Ok(CrmClient {
            executor,
            fetch: self.fetch,
        })
    }
}
