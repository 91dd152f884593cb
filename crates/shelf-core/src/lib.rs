#![forbid(unsafe_code)]
//! shelf-core: records, ids, query specs, collation, and configuration.
//!
//! Pure data and total functions only. Joining, filtering, and sorting live
//! in `shelf-operators`; loading and rendering live in `shelf-io`.

pub mod collate;
pub mod config;
pub mod error;
pub mod id;
pub mod model;
pub mod prelude;
pub mod query;
