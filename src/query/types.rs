//! Query representation and wire-parameter rendering

use crate::types::SortOrder;
use std::collections::BTreeMap;

/// A reusable query against one CRM module
///
/// Holds everything except the page cursor, which is supplied per request
/// by the pagination layer. `BTreeMap` keeps extra parameters in a
/// deterministic order on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub(crate) module: String,
    pub(crate) fields: Option<Vec<String>>,
    pub(crate) criteria: Option<String>,
    pub(crate) sort_by: Option<String>,
    pub(crate) sort_order: SortOrder,
    pub(crate) params: BTreeMap<String, String>,
    pub(crate) auto_paginate: bool,
}

impl Query {
    /// Create a query for the given module with no constraints
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            fields: None,
            criteria: None,
            sort_by: None,
            sort_order: SortOrder::default(),
            params: BTreeMap::new(),
            auto_paginate: false,
        }
    }

    /// Module (record type) this query targets
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Whether this query asks for automatic full pagination
    pub fn is_auto_paginating(&self) -> bool {
        self.auto_paginate
    }

    /// Copy of this query with auto-pagination cleared
    ///
    /// Page descriptors must describe exactly one page; the flag is
    /// stripped when a descriptor is derived from a base query.
    pub(crate) fn as_single_page(&self) -> Self {
        let mut query = self.clone();
        query.auto_paginate = false;
        query
    }

    /// Render the query's wire parameters, excluding paging
    pub fn query_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();

        if let Some(fields) = &self.fields {
            params.push(("fields".to_string(), fields.join(",")));
        }

        if let Some(criteria) = &self.criteria {
            params.push(("criteria".to_string(), criteria.clone()));
        }

        if let Some(sort_by) = &self.sort_by {
            params.push(("sort_by".to_string(), sort_by.clone()));
            params.push((
                "sort_order".to_string(),
                self.sort_order.as_str().to_string(),
            ));
        }

        for (key, value) in &self.params {
            params.push((key.clone(), value.clone()));
        }

        params
    }
}
