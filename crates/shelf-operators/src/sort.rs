//! Column sort stage.
//!
//! Uses a stable sort, so rows with equal keys keep their filtered order in
//! both directions.

use std::cmp::Ordering;

use shelf_core::collate::Collation;
use shelf_core::model::EnrichedProduct;
use shelf_core::query::{SortField, SortOrder};

use crate::traits::Stage;

/// Compare two rows on one column. `SortField::None` compares equal.
pub fn compare_by(
    field: SortField,
    a: &EnrichedProduct,
    b: &EnrichedProduct,
    collation: &dyn Collation,
) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Product => collation.compare(&a.name, &b.name),
        SortField::Category => collation.compare(&a.category.title, &b.category.title),
        SortField::User => collation.compare(&a.user.name, &b.user.name),
        SortField::None => Ordering::Equal,
    }
}

pub struct SortStage<'c> {
    pub field: SortField,
    pub order: SortOrder,
    pub collation: &'c dyn Collation,
}

impl Stage for SortStage<'_> {
    fn name(&self) -> &'static str {
        "sort"
    }

    fn describe(&self) -> String {
        let dir = match self.order {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
            SortOrder::None => "none",
        };
        format!("sort by {} {}", self.field, dir)
    }

    fn eval(&self, mut rows: Vec<EnrichedProduct>) -> Vec<EnrichedProduct> {
        let descending = match (self.field, self.order) {
            (SortField::None, _) | (_, SortOrder::None) => return rows,
            (_, SortOrder::Ascending) => false,
            (_, SortOrder::Descending) => true,
        };
        rows.sort_by(|a, b| {
            let ord = compare_by(self.field, a, b, self.collation);
            if descending {
                ord.reverse()
            } else {
                ord
            }
        });
        rows
    }
}
