//! Query model and fluent builder
//!
//! A [`Query`] names a CRM module and the selection/filter/sort parameters
//! to send with each page request. Queries are plain values: deriving a
//! page descriptor clones the base query and never mutates it.

mod builder;
mod types;

pub use builder::QueryBuilder;
pub use types::Query;
