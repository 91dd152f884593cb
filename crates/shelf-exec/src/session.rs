//! Session: view state + event handling + render.
//!
//! Starter behavior mirrors the catalog page:
//! - owner tabs ("All" plus one per user), single selection;
//! - a search box with a clear button that shows while the text is non-empty;
//! - category toggles plus an "All" button that clears the selection;
//! - "reset all filters" (owner, search, categories; sort is kept);
//! - header clicks driving the tri-state sort.

use thiserror::Error;

use shelf_core::collate::Collation;
use shelf_core::config::ShelfConfig;
use shelf_core::error::Error as CoreError;
use shelf_core::id::CategoryId;
use shelf_core::model::{Category, EnrichedProduct};
use shelf_core::query::{OwnerFilter, QuerySpec, SortField, SortMark, SortState};
use shelf_operators::{prepare_products, Catalog};

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("dataset: {0}")]
    Io(#[from] shelf_io::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// One user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    SelectOwner(OwnerFilter),
    SetQuery(String),
    ClearQuery,
    ToggleCategory(CategoryId),
    AllCategories,
    ResetAll,
    SortClick(SortField),
}

/// Everything the user has chosen so far. Owned by the session only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub owner: OwnerFilter,
    pub query: String,
    /// Selection order is preserved; no duplicates.
    pub active_categories: Vec<Category>,
    pub sort: SortState,
}

impl ViewState {
    pub fn to_spec(&self) -> QuerySpec {
        QuerySpec {
            owner: self.owner.clone(),
            search_text: self.query.clone(),
            active_categories: self.active_categories.clone(),
            sort_field: self.sort.field,
            sort_order: self.sort.order,
        }
    }

    pub fn is_category_active(&self, id: CategoryId) -> bool {
        self.active_categories.iter().any(|c| c.id == id)
    }

    fn toggle_category(&mut self, category: &Category) {
        match self
            .active_categories
            .iter()
            .position(|c| c.id == category.id)
        {
            Some(idx) => {
                self.active_categories.remove(idx);
            }
            None => self.active_categories.push(category.clone()),
        }
    }

    fn reset_filters(&mut self) {
        self.owner = OwnerFilter::All;
        self.query.clear();
        self.active_categories.clear();
    }
}

/// Filter panel as it should be drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    /// `("All", selected)` first, then one tab per user.
    pub owner_tabs: Vec<(String, bool)>,
    pub query: String,
    pub show_clear: bool,
    /// The "All" category button is outlined while any category is active.
    pub all_categories_outlined: bool,
    pub categories: Vec<(Category, bool)>,
    /// Whether "reset all filters" has anything to reset.
    pub filters_active: bool,
}

/// A fully computed frame: panel, header marks, and result rows.
#[derive(Debug, Clone)]
pub struct View {
    pub panel: PanelView,
    pub sort: SortState,
    pub columns: Vec<(SortField, SortMark)>,
    pub rows: Vec<EnrichedProduct>,
}

impl View {
    /// True when the no-match message replaces the table.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub struct Session {
    catalog: Catalog,
    collation: Box<dyn Collation>,
    state: ViewState,
}

impl Session {
    pub fn new(catalog: Catalog, collation: Box<dyn Collation>) -> Self {
        Self {
            catalog,
            collation,
            state: ViewState::default(),
        }
    }

    /// Load, join, and build the collation described by `cfg`.
    ///
    /// Integrity failures abort here; a session never holds a bad catalog.
    pub fn from_config(cfg: &ShelfConfig) -> Result<Self, ExecError> {
        let dataset = shelf_io::load_dataset_from(cfg)?;
        let catalog = Catalog::from_dataset(dataset)?;
        let collation = cfg.collation()?;
        tracing::info!(
            products = catalog.products().len(),
            collation = ?cfg.collation,
            "session ready"
        );
        Ok(Self::new(catalog, collation))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn collation(&self) -> &dyn Collation {
        self.collation.as_ref()
    }

    /// Apply one event. Events naming records outside the catalog are
    /// rejected and leave the state untouched.
    pub fn dispatch(&mut self, event: Event) -> Result<(), ExecError> {
        tracing::debug!(?event, "dispatch");
        match event {
            Event::SelectOwner(owner) => {
                if let OwnerFilter::Owner(user) = &owner {
                    if !self.catalog.users().iter().any(|u| u.id == user.id) {
                        return Err(CoreError::UnknownName {
                            kind: "owner",
                            name: user.name.clone(),
                        }
                        .into());
                    }
                }
                self.state.owner = owner;
            }
            Event::SetQuery(text) => self.state.query = text,
            Event::ClearQuery => self.state.query.clear(),
            Event::ToggleCategory(id) => {
                let category = self.catalog.category(id).ok_or(CoreError::UnknownName {
                    kind: "category",
                    name: id.to_string(),
                })?;
                self.state.toggle_category(category);
            }
            Event::AllCategories => self.state.active_categories.clear(),
            Event::ResetAll => self.state.reset_filters(),
            Event::SortClick(column) => self.state.sort = self.state.sort.click(column),
        }
        Ok(())
    }

    pub fn query(&self) -> QuerySpec {
        self.state.to_spec()
    }

    pub fn rows(&self) -> Vec<EnrichedProduct> {
        prepare_products(
            self.catalog.products(),
            &self.query(),
            self.collation.as_ref(),
        )
    }

    pub fn render(&self) -> View {
        let state = &self.state;

        let mut owner_tabs = vec![("All".to_string(), state.owner.is_all())];
        owner_tabs.extend(self.catalog.users().iter().map(|u| {
            let selected = matches!(&state.owner, OwnerFilter::Owner(o) if o.id == u.id);
            (u.name.clone(), selected)
        }));

        let categories = self
            .catalog
            .categories()
            .iter()
            .map(|c| (c.clone(), state.is_category_active(c.id)))
            .collect();

        let panel = PanelView {
            owner_tabs,
            query: state.query.clone(),
            show_clear: !state.query.is_empty(),
            all_categories_outlined: !state.active_categories.is_empty(),
            categories,
            filters_active: state.to_spec().has_filters(),
        };

        let columns = SortField::COLUMNS
            .iter()
            .map(|&col| (col, state.sort.mark(col)))
            .collect();

        let rows = self.rows();
        tracing::debug!(rows = rows.len(), "rendered");

        View {
            panel,
            sort: state.sort,
            columns,
            rows,
        }
    }
}
