//! Convenient re-exports for downstream crates.

pub use crate::collate::{BinaryCollation, Collation, CollationKind, LocaleCollation};
pub use crate::config::{OutputFormat, ShelfConfig};
pub use crate::error::{Error, Result};
pub use crate::id::{CategoryId, ProductId, UserId};
pub use crate::model::{Category, Dataset, EnrichedProduct, Product, Sex, User};
pub use crate::query::{OwnerFilter, QuerySpec, SortField, SortMark, SortOrder, SortState};
