//! Catalog records as loaded from the data files, plus the joined row type.
//!
//! Field names serialize in camelCase so the JSON files keep the shape the
//! catalog data has always been published in (`ownerId`, `categoryId`).

use serde::{Deserialize, Serialize};

use crate::id::{CategoryId, ProductId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "m")]
    M,
    #[serde(rename = "f")]
    F,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub sex: Sex,
}

impl User {
    pub fn new(id: u64, name: impl Into<String>, sex: Sex) -> Self {
        Self {
            id: UserId::new(id),
            name: name.into(),
            sex,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub title: String,
    #[serde(default)]
    pub icon: String,
    pub owner_id: UserId,
}

impl Category {
    pub fn new(id: u64, title: impl Into<String>, icon: impl Into<String>, owner_id: u64) -> Self {
        Self {
            id: CategoryId::new(id),
            title: title.into(),
            icon: icon.into(),
            owner_id: UserId::new(owner_id),
        }
    }

    /// Cell text for the category column: `"<icon> - <title>"`.
    pub fn label(&self) -> String {
        format!("{} - {}", self.icon, self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category_id: CategoryId,
}

impl Product {
    pub fn new(id: u64, name: impl Into<String>, category_id: u64) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.into(),
            category_id: CategoryId::new(category_id),
        }
    }
}

/// A product with its category and the category's owner resolved.
///
/// Produced once by the join; every row in a catalog satisfies
/// `category.id == category_id` and `user.id == category.owner_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedProduct {
    pub id: ProductId,
    pub name: String,
    pub category_id: CategoryId,
    pub category: Category,
    pub user: User,
}

/// The three raw record sets, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub users: Vec<User>,
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
}
