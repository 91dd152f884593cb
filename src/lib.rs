#![forbid(unsafe_code)]
//! shelf: a filterable, sortable product catalog.
//!
//! Facade over the workspace crates; the integration tests and benches
//! drive the system through these re-exports.

pub use shelf_core;
pub use shelf_exec;
pub use shelf_io;
pub use shelf_operators;
pub use shelf_planner;

pub use shelf_core::prelude::*;
pub use shelf_exec::{Event, Session};
pub use shelf_operators::{prepare_products, Catalog};
