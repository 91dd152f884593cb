//! `prepare_products`: the filter/sort pipeline run on every render.
//!
//! Stage order is fixed: owner, text, category, then sort. Inactive filters
//! are not planned at all, so an empty spec yields a plain copy.

use shelf_core::collate::Collation;
use shelf_core::model::EnrichedProduct;
use shelf_core::query::QuerySpec;

use crate::filter::{CategoryStage, OwnerStage, TextStage};
use crate::sort::SortStage;
use crate::traits::Stage;

/// Build the active stages for `spec`, in execution order.
pub fn plan_stages<'c>(spec: &QuerySpec, collation: &'c dyn Collation) -> Vec<Box<dyn Stage + 'c>> {
    let mut stages: Vec<Box<dyn Stage + 'c>> = Vec::new();

    if let Some(stage) = OwnerStage::from_filter(&spec.owner) {
        stages.push(Box::new(stage));
    }

    if let Some(needle) = spec.normalized_query() {
        stages.push(Box::new(TextStage { needle }));
    }

    if !spec.active_categories.is_empty() {
        stages.push(Box::new(CategoryStage::new(&spec.active_categories)));
    }

    if spec.is_sorted() {
        stages.push(Box::new(SortStage {
            field: spec.sort_field,
            order: spec.sort_order,
            collation,
        }));
    }

    stages
}

/// Filter and sort a copy of `products` according to `spec`.
///
/// Never fails and never touches the input slice.
pub fn prepare_products(
    products: &[EnrichedProduct],
    spec: &QuerySpec,
    collation: &dyn Collation,
) -> Vec<EnrichedProduct> {
    let mut rows = products.to_vec();
    for stage in plan_stages(spec, collation) {
        let before = rows.len();
        rows = stage.eval(rows);
        tracing::trace!(stage = stage.name(), before, after = rows.len(), "stage");
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_core::collate::BinaryCollation;
    use shelf_core::model::{Category, Sex, User};
    use shelf_core::query::{OwnerFilter, SortField, SortOrder};

    fn catalog() -> Vec<EnrichedProduct> {
        let alice = User::new(1, "Alice", Sex::F);
        let bob = User::new(2, "Bob", Sex::M);
        let dairy = Category::new(1, "Dairy", "🥛", 1);
        let bakery = Category::new(2, "Bakery", "🍞", 2);
        let mk = |id: u64, name: &str, c: &Category, u: &User| EnrichedProduct {
            id: shelf_core::id::ProductId::new(id),
            name: name.into(),
            category_id: c.id,
            category: c.clone(),
            user: u.clone(),
        };
        vec![
            mk(4, "Milk", &dairy, &alice),
            mk(2, "Bread", &bakery, &bob),
            mk(3, "Buttermilk", &dairy, &alice),
            mk(1, "Bagel", &bakery, &bob),
        ]
    }

    fn ids(rows: &[EnrichedProduct]) -> Vec<u64> {
        rows.iter().map(|p| p.id.get()).collect()
    }

    #[test]
    fn empty_spec_plans_nothing_and_copies() {
        let spec = QuerySpec::default();
        assert!(plan_stages(&spec, &BinaryCollation).is_empty());
        assert_eq!(prepare_products(&catalog(), &spec, &BinaryCollation), catalog());
    }

    #[test]
    fn stages_run_in_fixed_order() {
        let spec = QuerySpec::default()
            .with_sort(SortField::Product, SortOrder::Ascending)
            .with_category(Category::new(1, "Dairy", "🥛", 1))
            .with_search("milk")
            .with_owner(OwnerFilter::Owner(User::new(1, "Alice", Sex::F)));
        let names: Vec<&str> = plan_stages(&spec, &BinaryCollation)
            .iter()
            .map(|s| s.name())
            .collect();
        assert_eq!(names, vec!["owner", "text", "category", "sort"]);
    }

    #[test]
    fn filters_and_then_sorts() {
        let spec = QuerySpec::default()
            .with_search("milk")
            .with_sort(SortField::Id, SortOrder::Ascending);
        assert_eq!(ids(&prepare_products(&catalog(), &spec, &BinaryCollation)), vec![3, 4]);
    }

    #[test]
    fn unsorted_keeps_filtered_order() {
        let spec = QuerySpec::default().with_owner(OwnerFilter::Owner(User::new(2, "Bob", Sex::M)));
        assert_eq!(ids(&prepare_products(&catalog(), &spec, &BinaryCollation)), vec![2, 1]);
    }

    #[test]
    fn no_match_is_an_empty_result() {
        let spec = QuerySpec::default().with_search("cheese");
        assert!(prepare_products(&catalog(), &spec, &BinaryCollation).is_empty());
    }
}
