//! Result writers. Every format renders the same flat row record.

pub mod csv;
pub mod jsonl;
pub mod table;

use std::io::Write;

use serde::Serialize;

use shelf_core::config::{OutputFormat, DEFAULT_NO_MATCH_MESSAGE};
use shelf_core::model::{EnrichedProduct, Sex};
use shelf_core::query::SortState;

use crate::error::Result;

/// One output row, flattened from an `EnrichedProduct`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowRecord<'a> {
    pub id: u64,
    pub product: &'a str,
    pub category: &'a str,
    pub icon: &'a str,
    pub user: &'a str,
    pub sex: Sex,
}

impl<'a> From<&'a EnrichedProduct> for RowRecord<'a> {
    fn from(p: &'a EnrichedProduct) -> Self {
        Self {
            id: p.id.get(),
            product: &p.name,
            category: &p.category.title,
            icon: &p.category.icon,
            user: &p.user.name,
            sex: p.user.sex,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub format: OutputFormat,
    /// Drives the header sort marks of the table format.
    pub sort: SortState,
    pub no_match_message: String,
    /// ANSI colors in the table format (user column by sex).
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            sort: SortState::default(),
            no_match_message: DEFAULT_NO_MATCH_MESSAGE.to_string(),
            color: false,
        }
    }
}

/// Render `rows` to `out` in the configured format.
pub fn render<W: Write>(out: W, rows: &[EnrichedProduct], opts: &RenderOptions) -> Result<()> {
    match opts.format {
        OutputFormat::Table => table::TableWriter::new(out, opts).write(rows),
        OutputFormat::Jsonl => jsonl::JsonlWriter::to_writer(out).write_rows(rows),
        OutputFormat::Csv => csv::CsvWriter::to_writer(out).write_rows(rows),
    }
}
