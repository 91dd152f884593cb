#![forbid(unsafe_code)]
//! shelf-planner: YAML query documents -> `QuerySpec`, plus EXPLAIN output.
//!
//! Documents refer to owners and categories by name; resolution against a
//! joined `Catalog` turns them into typed records or an `UnknownName` error.

pub mod dsl;
pub mod explain;

pub use dsl::yaml::{parse_yaml_query, PlanError, QueryConfig, QueryDocument, SortDef};
pub use explain::explain;
