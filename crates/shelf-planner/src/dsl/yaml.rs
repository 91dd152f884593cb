//! YAML query documents.
//!
//! Example:
//! ```yaml
//! config: { collation: binary }
//! owner: Anna
//! search: "mi"
//! categories: [Drinks, Grocery]
//! sort: { field: Product, order: desc }
//! ```
//!
//! Every key is optional; an empty document selects the whole catalog in
//! file order. `sort` also accepts a bare column name (ascending).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use shelf_core::collate::CollationKind;
use shelf_core::config::{OutputFormat, ShelfConfig};
use shelf_core::query::{OwnerFilter, QuerySpec, SortField, SortOrder};
use shelf_operators::Catalog;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("invalid query document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Resolve(#[from] shelf_core::error::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryDocument {
    pub config: Option<QueryConfig>,
    /// User name, or `All`.
    pub owner: Option<String>,
    pub search: Option<String>,
    /// Category titles.
    pub categories: Vec<String>,
    pub sort: Option<SortDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SortDef {
    Column(String),
    Full {
        field: String,
        #[serde(default)]
        order: Option<String>,
    },
}

/// Config overrides a document may carry. Unset keys leave the base config alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryConfig {
    pub data_dir: Option<String>,
    pub locale: Option<String>,
    pub collation: Option<CollationKind>,
    pub output: Option<OutputFormat>,
    pub no_match_message: Option<String>,
}

impl QueryConfig {
    pub fn apply(&self, cfg: &mut ShelfConfig) {
        if let Some(dir) = &self.data_dir {
            cfg.data_dir = Some(dir.clone());
        }
        if let Some(locale) = &self.locale {
            cfg.locale = locale.clone();
        }
        if let Some(collation) = self.collation {
            cfg.collation = collation;
        }
        if let Some(output) = self.output {
            cfg.output = output;
        }
        if let Some(msg) = &self.no_match_message {
            cfg.no_match_message = msg.clone();
        }
    }
}

pub fn parse_yaml_query(yaml_src: &str) -> Result<QueryDocument, PlanError> {
    // An empty file deserializes as unit, not as an empty mapping.
    if yaml_src.trim().is_empty() {
        return Ok(QueryDocument::default());
    }
    Ok(serde_yaml::from_str(yaml_src)?)
}

impl QueryDocument {
    /// Resolve names against `catalog` into a pipeline-ready spec.
    pub fn resolve(&self, catalog: &Catalog) -> Result<QuerySpec, PlanError> {
        let owner = match &self.owner {
            Some(name) => catalog.owner_filter(name)?,
            None => OwnerFilter::All,
        };

        let mut spec = QuerySpec::default()
            .with_owner(owner)
            .with_search(self.search.clone().unwrap_or_default());

        for title in &self.categories {
            spec = spec.with_category(catalog.category_by_title(title)?.clone());
        }

        if let Some(sort) = &self.sort {
            let (field, order) = match sort {
                SortDef::Column(col) => (col.parse::<SortField>()?, SortOrder::Ascending),
                SortDef::Full { field, order } => {
                    let field = field.parse::<SortField>()?;
                    let order = match order {
                        Some(o) => o.parse::<SortOrder>()?,
                        None => SortOrder::Ascending,
                    };
                    (field, order)
                }
            };
            // `with_sort` collapses a lone `none` on either side to unsorted.
            spec = spec.with_sort(field, order);
        }

        Ok(spec)
    }
}
