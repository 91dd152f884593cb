//! Filter stages. Each keeps a subsequence of its input in input order.

use shelf_core::id::CategoryId;
use shelf_core::model::{Category, EnrichedProduct, User};
use shelf_core::query::OwnerFilter;

use crate::traits::Stage;

fn retain(
    mut rows: Vec<EnrichedProduct>,
    keep: impl FnMut(&EnrichedProduct) -> bool,
) -> Vec<EnrichedProduct> {
    rows.retain(keep);
    rows
}

/// Keeps products whose category is owned by `owner`.
#[derive(Debug, Clone)]
pub struct OwnerStage {
    pub owner: User,
}

impl OwnerStage {
    /// `None` for `OwnerFilter::All`, which plans no stage.
    pub fn from_filter(filter: &OwnerFilter) -> Option<Self> {
        match filter {
            OwnerFilter::All => None,
            OwnerFilter::Owner(user) => Some(Self {
                owner: user.clone(),
            }),
        }
    }
}

impl Stage for OwnerStage {
    fn name(&self) -> &'static str {
        "owner"
    }

    fn describe(&self) -> String {
        format!("owner == {} ({})", self.owner.name, self.owner.id)
    }

    fn eval(&self, rows: Vec<EnrichedProduct>) -> Vec<EnrichedProduct> {
        let filter = OwnerFilter::Owner(self.owner.clone());
        retain(rows, |p| filter.matches(p))
    }
}

/// Case-insensitive substring match on the trimmed product name.
#[derive(Debug, Clone)]
pub struct TextStage {
    /// Already trimmed and lowercased.
    pub needle: String,
}

impl TextStage {
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.trim().to_lowercase(),
        }
    }
}

impl Stage for TextStage {
    fn name(&self) -> &'static str {
        "text"
    }

    fn describe(&self) -> String {
        format!("name contains {:?}", self.needle)
    }

    fn eval(&self, rows: Vec<EnrichedProduct>) -> Vec<EnrichedProduct> {
        retain(rows, |p| {
            p.name.trim().to_lowercase().contains(self.needle.as_str())
        })
    }
}

/// Keeps products in any of the active categories.
#[derive(Debug, Clone)]
pub struct CategoryStage {
    pub ids: Vec<CategoryId>,
}

impl CategoryStage {
    pub fn new(active: &[Category]) -> Self {
        Self {
            ids: active.iter().map(|c| c.id).collect(),
        }
    }
}

impl Stage for CategoryStage {
    fn name(&self) -> &'static str {
        "category"
    }

    fn describe(&self) -> String {
        let ids: Vec<String> = self.ids.iter().map(|id| id.get().to_string()).collect();
        format!("category in [{}]", ids.join(", "))
    }

    fn eval(&self, rows: Vec<EnrichedProduct>) -> Vec<EnrichedProduct> {
        retain(rows, |p| self.ids.contains(&p.category_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_core::model::Sex;

    fn row(id: u64, name: &str, category: &Category, user: &User) -> EnrichedProduct {
        EnrichedProduct {
            id: shelf_core::id::ProductId::new(id),
            name: name.to_string(),
            category_id: category.id,
            category: category.clone(),
            user: user.clone(),
        }
    }

    fn rows() -> Vec<EnrichedProduct> {
        let alice = User::new(1, "Alice", Sex::F);
        let bob = User::new(2, "Bob", Sex::M);
        let dairy = Category::new(1, "Dairy", "🥛", 1);
        let bakery = Category::new(2, "Bakery", "🍞", 2);
        vec![
            row(1, "  Milk ", &dairy, &alice),
            row(2, "Bread", &bakery, &bob),
            row(3, "Buttermilk", &dairy, &alice),
            row(4, "Bagel", &bakery, &bob),
        ]
    }

    fn ids(rows: &[EnrichedProduct]) -> Vec<u64> {
        rows.iter().map(|p| p.id.get()).collect()
    }

    #[test]
    fn owner_stage_matches_category_owner() {
        let stage = OwnerStage {
            owner: User::new(2, "Bob", Sex::M),
        };
        assert_eq!(ids(&stage.eval(rows())), vec![2, 4]);
    }

    #[test]
    fn text_stage_trims_and_folds_case() {
        let stage = TextStage::new("  MILK ");
        assert_eq!(ids(&stage.eval(rows())), vec![1, 3]);
    }

    #[test]
    fn category_stage_is_an_or_over_the_set() {
        let stage = CategoryStage::new(&[
            Category::new(2, "Bakery", "🍞", 2),
            Category::new(7, "Unused", "", 1),
        ]);
        assert_eq!(ids(&stage.eval(rows())), vec![2, 4]);
        assert_eq!(stage.describe(), "category in [2, 7]");
    }
}
