//! Catalog join: products -> category -> owning user.
//!
//! Precondition enforced here rather than assumed: every product's category
//! and every category's owner resolve to exactly one record. A dataset that
//! violates this never becomes a `Catalog`.

use std::collections::HashMap;
use std::hash::Hash;

use shelf_core::error::{Error, Result};
use shelf_core::id::{CategoryId, UserId};
use shelf_core::model::{Category, Dataset, EnrichedProduct, User};
use shelf_core::query::OwnerFilter;

/// Index records by primary key, rejecting duplicates.
fn index_by<'a, T, K>(
    items: &'a [T],
    entity: &'static str,
    key: impl Fn(&T) -> K,
) -> Result<HashMap<K, &'a T>>
where
    K: Copy + Eq + Hash + Into<u64>,
{
    let mut map = HashMap::with_capacity(items.len());
    for item in items {
        let k = key(item);
        if map.insert(k, item).is_some() {
            return Err(Error::DuplicateId {
                entity,
                id: k.into(),
            });
        }
    }
    Ok(map)
}

/// Resolve every product against the category and user tables.
///
/// Output has the same length and order as `dataset.products`.
pub fn join_products(dataset: &Dataset) -> Result<Vec<EnrichedProduct>> {
    let users: HashMap<UserId, &User> = index_by(&dataset.users, "user", |u| u.id)?;
    let categories: HashMap<CategoryId, &Category> =
        index_by(&dataset.categories, "category", |c| c.id)?;
    index_by(&dataset.products, "product", |p| p.id)?;

    for category in &dataset.categories {
        if !users.contains_key(&category.owner_id) {
            return Err(Error::ReferentialIntegrity {
                entity: "category",
                id: category.id.get(),
                target: "user",
                reference: category.owner_id.get(),
            });
        }
    }

    let mut out = Vec::with_capacity(dataset.products.len());
    for product in &dataset.products {
        let category = categories.get(&product.category_id).ok_or(
            Error::ReferentialIntegrity {
                entity: "product",
                id: product.id.get(),
                target: "category",
                reference: product.category_id.get(),
            },
        )?;
        // Owners were checked above for every category.
        let user = users
            .get(&category.owner_id)
            .ok_or(Error::ReferentialIntegrity {
                entity: "category",
                id: category.id.get(),
                target: "user",
                reference: category.owner_id.get(),
            })?;

        out.push(EnrichedProduct {
            id: product.id,
            name: product.name.clone(),
            category_id: product.category_id,
            category: (*category).clone(),
            user: (*user).clone(),
        });
    }

    tracing::debug!(
        users = dataset.users.len(),
        categories = dataset.categories.len(),
        products = out.len(),
        "joined catalog"
    );
    Ok(out)
}

/// Joined, validated catalog. Immutable once built.
#[derive(Debug, Clone)]
pub struct Catalog {
    users: Vec<User>,
    categories: Vec<Category>,
    products: Vec<EnrichedProduct>,
}

impl Catalog {
    pub fn from_dataset(dataset: Dataset) -> Result<Self> {
        let products = join_products(&dataset)?;
        Ok(Self {
            users: dataset.users,
            categories: dataset.categories,
            products,
        })
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn products(&self) -> &[EnrichedProduct] {
        &self.products
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Case-insensitive lookup by user name.
    pub fn user_by_name(&self, name: &str) -> Result<&User> {
        let needle = name.trim().to_lowercase();
        self.users
            .iter()
            .find(|u| u.name.to_lowercase() == needle)
            .ok_or_else(|| Error::UnknownName {
                kind: "owner",
                name: name.to_string(),
            })
    }

    /// Case-insensitive lookup by category title.
    pub fn category_by_title(&self, title: &str) -> Result<&Category> {
        let needle = title.trim().to_lowercase();
        self.categories
            .iter()
            .find(|c| c.title.to_lowercase() == needle)
            .ok_or_else(|| Error::UnknownName {
                kind: "category",
                name: title.to_string(),
            })
    }

    /// Resolve an owner tab name.
    ///
    /// A user whose name matches exactly wins; otherwise `"all"` (any case)
    /// selects every owner, and anything else is a case-insensitive user
    /// lookup.
    pub fn owner_filter(&self, name: &str) -> Result<OwnerFilter> {
        let trimmed = name.trim();
        if let Some(user) = self.users.iter().find(|u| u.name == trimmed) {
            return Ok(OwnerFilter::Owner(user.clone()));
        }
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(OwnerFilter::All);
        }
        self.user_by_name(name)
            .map(|u| OwnerFilter::Owner(u.clone()))
    }
}
