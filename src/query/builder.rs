//! Fluent builder for [`Query`]

use super::types::Query;
use crate::types::SortOrder;

/// Fluent builder for [`Query`]
///
/// ```rust
/// use crmkit::query::QueryBuilder;
/// use crmkit::types::SortOrder;
///
/// let query = QueryBuilder::new("Leads")
///     .select(["id", "company", "modified_time"])
///     .criteria("(status:equals:open)")
///     .sort("modified_time", SortOrder::Desc)
///     .build();
/// assert_eq!(query.module(), "Leads");
/// ```
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    query: Query,
}

impl QueryBuilder {
    /// Start a query against the given module
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            query: Query::new(module),
        }
    }

    /// Restrict the returned fields
    #[must_use]
    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.query.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Set the search criteria expression
    #[must_use]
    pub fn criteria(mut self, criteria: impl Into<String>) -> Self {
        self.query.criteria = Some(criteria.into());
        self
    }

    /// Sort by a field
    #[must_use]
    pub fn sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.query.sort_by = Some(field.into());
        self.query.sort_order = order;
        self
    }

    /// Add a raw wire parameter
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.params.insert(key.into(), value.into());
        self
    }

    /// Ask for all pages to be fetched automatically on execute
    #[must_use]
    pub fn paginate_all(mut self) -> Self {
        self.query.auto_paginate = true;
        self
    }

    /// Build the query
    pub fn build(self) -> Query {
        self.query
    }
}
