//! Dataset readers.
//!
//! The catalog is small and static; readers load it whole in one call.

pub mod json;
