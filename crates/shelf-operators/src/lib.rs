#![forbid(unsafe_code)]
//! shelf-operators: the catalog join and the query pipeline.
//!
//! Design intent:
//! - Everything here is pure and synchronous; no IO, no shared state.
//! - The join runs once per process and is the only fallible step.
//! - `prepare_products` chains stages (owner -> text -> category -> sort),
//!   each consuming the previous stage's rows.

pub mod filter;
pub mod join;
pub mod pipeline;
pub mod sort;
pub mod traits;

pub use join::{join_products, Catalog};
pub use pipeline::{plan_stages, prepare_products};
pub use traits::Stage;
