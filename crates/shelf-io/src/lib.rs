#![forbid(unsafe_code)]
//! shelf-io: dataset readers and result writers.
//!
//! Readers produce a raw `Dataset`; the join in `shelf-operators` validates
//! it. Writers render pipeline output as an aligned table, JSONL, or CSV.

pub mod error;
pub mod readers;
pub mod writers;

pub use error::{Error, Result};
pub use readers::json::{bundled_dataset, load_dataset, load_dataset_from};
pub use writers::{render, RenderOptions};
