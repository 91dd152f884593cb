//! Query handed to the pipeline on every render, and the
//! tri-state sort machine that produces its sort half.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::model::{Category, EnrichedProduct, User};

/// Owner filter: either every owner or one specific user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OwnerFilter {
    #[default]
    All,
    Owner(User),
}

impl OwnerFilter {
    pub fn is_all(&self) -> bool {
        matches!(self, OwnerFilter::All)
    }

    pub fn matches(&self, product: &EnrichedProduct) -> bool {
        match self {
            OwnerFilter::All => true,
            OwnerFilter::Owner(user) => product.category.owner_id == user.id,
        }
    }
}

/// Sortable columns. `None` means the filtered order is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortField {
    #[default]
    None,
    Id,
    Product,
    Category,
    User,
}

impl SortField {
    /// Table columns in display order.
    pub const COLUMNS: [SortField; 4] = [
        SortField::Id,
        SortField::Product,
        SortField::Category,
        SortField::User,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortField::None => "None",
            SortField::Id => "ID",
            SortField::Product => "Product",
            SortField::Category => "Category",
            SortField::User => "User",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(SortField::None),
            "id" => Ok(SortField::Id),
            "product" | "name" => Ok(SortField::Product),
            "category" => Ok(SortField::Category),
            "user" | "owner" => Ok(SortField::User),
            _ => Err(Error::UnknownName {
                kind: "column",
                name: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    Ascending,
    Descending,
    #[default]
    None,
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            "none" | "" => Ok(SortOrder::None),
            _ => Err(Error::UnknownName {
                kind: "sort order",
                name: s.to_string(),
            }),
        }
    }
}

/// Column header glyph for a given sort state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortMark {
    Unsorted,
    Ascending,
    Descending,
}

/// Current sort column and direction.
///
/// Cycle per column: unsorted -> ascending -> descending -> unsorted.
/// Clicking a different column always restarts at ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortState {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    pub fn click(self, column: SortField) -> SortState {
        if column == SortField::None {
            return self;
        }
        if self.field != column {
            return SortState::new(column, SortOrder::Ascending);
        }
        match self.order {
            SortOrder::Ascending => SortState::new(column, SortOrder::Descending),
            SortOrder::Descending | SortOrder::None => SortState::default(),
        }
    }

    pub fn mark(self, column: SortField) -> SortMark {
        if self.field != column {
            return SortMark::Unsorted;
        }
        match self.order {
            SortOrder::Ascending => SortMark::Ascending,
            SortOrder::Descending => SortMark::Descending,
            SortOrder::None => SortMark::Unsorted,
        }
    }
}

/// Everything the pipeline needs to turn the catalog into table rows.
///
/// Rebuilt from the shell state on every interaction and passed by value
/// or reference; the pipeline never holds on to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySpec {
    pub owner: OwnerFilter,
    pub search_text: String,
    /// Active category set; kept free of duplicate ids.
    pub active_categories: Vec<Category>,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
}

impl QuerySpec {
    pub fn with_owner(mut self, owner: OwnerFilter) -> Self {
        self.owner = owner;
        self
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        if !self.active_categories.iter().any(|c| c.id == category.id) {
            self.active_categories.push(category);
        }
        self
    }

    /// `SortField::None` and `SortOrder::None` only ever appear together;
    /// either one alone turns sorting off.
    pub fn with_sort(mut self, field: SortField, order: SortOrder) -> Self {
        if field == SortField::None || order == SortOrder::None {
            self.sort_field = SortField::None;
            self.sort_order = SortOrder::None;
        } else {
            self.sort_field = field;
            self.sort_order = order;
        }
        self
    }

    /// Whether the sort stage runs. Matches the header marks of `sort_state`.
    pub fn is_sorted(&self) -> bool {
        self.sort_field != SortField::None && self.sort_order != SortOrder::None
    }

    pub fn sort_state(&self) -> SortState {
        SortState::new(self.sort_field, self.sort_order)
    }

    /// Trimmed, case-folded search needle, or `None` when the text filter is off.
    pub fn normalized_query(&self) -> Option<String> {
        let q = self.search_text.trim();
        if q.is_empty() {
            None
        } else {
            Some(q.to_lowercase())
        }
    }

    pub fn has_filters(&self) -> bool {
        !self.owner.is_all()
            || self.normalized_query().is_some()
            || !self.active_categories.is_empty()
    }
}
