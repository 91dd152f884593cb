//! Line-oriented shell for `shelf session`.
//!
//! Each input line maps to one session event (or a shell command such as
//! `show` or `quit`); the caller renders after every event.

use shelf_core::error::{Error, Result};
use shelf_core::query::SortField;
use shelf_exec::{Event, PanelView};
use shelf_operators::Catalog;

pub const HELP: &str = "\
commands:
  owner <name|all>     select an owner tab
  search <text>        set the search text
  clear                clear the search text
  category <title>     toggle a category
  categories all       clear the category selection
  reset                reset all filters
  sort <column>        click a column header (id, product, category, user)
  show                 render the current view
  help                 this text
  quit                 leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Event(Event),
    Show,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_line(line: &str, catalog: &Catalog) -> Result<Option<Command>> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match trimmed.split_once(' ') {
        Some((verb, rest)) => (verb, rest),
        None => (trimmed, ""),
    };

    let cmd = match verb.to_ascii_lowercase().as_str() {
        "owner" => Command::Event(Event::SelectOwner(catalog.owner_filter(rest)?)),
        // The search text is kept verbatim; trimming is the pipeline's job.
        "search" => Command::Event(Event::SetQuery(rest.to_string())),
        "clear" => Command::Event(Event::ClearQuery),
        "category" => {
            let category = catalog.category_by_title(rest)?;
            Command::Event(Event::ToggleCategory(category.id))
        }
        "categories" if rest.trim().eq_ignore_ascii_case("all") => {
            Command::Event(Event::AllCategories)
        }
        "reset" => Command::Event(Event::ResetAll),
        "sort" => {
            let column: SortField = rest.parse()?;
            if column == SortField::None {
                return Err(Error::UnknownName {
                    kind: "column",
                    name: rest.to_string(),
                });
            }
            Command::Event(Event::SortClick(column))
        }
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => {
            return Err(Error::UnknownName {
                kind: "command",
                name: trimmed.to_string(),
            })
        }
    };
    Ok(Some(cmd))
}

fn tab(label: &str, selected: bool) -> String {
    if selected {
        format!("[{}]", label)
    } else {
        label.to_string()
    }
}

/// Text rendering of the filter panel.
pub fn render_panel(panel: &PanelView) -> String {
    let owners: Vec<String> = panel
        .owner_tabs
        .iter()
        .map(|(name, selected)| tab(name, *selected))
        .collect();

    let search = if panel.show_clear {
        format!("{:?} (clear)", panel.query)
    } else {
        "-".to_string()
    };

    let mut categories = vec![tab("All", !panel.all_categories_outlined)];
    categories.extend(
        panel
            .categories
            .iter()
            .map(|(c, active)| tab(&format!("{} {}", c.icon, c.title), *active)),
    );

    let mut out = format!(
        "Owner:      {}\nSearch:     {}\nCategories: {}",
        owners.join(" "),
        search,
        categories.join(" ")
    );
    if panel.filters_active {
        out.push_str("\n(type `reset` to clear all filters)");
    }
    out
}
