//! Aligned text table.
//!
//! Layout mirrors the catalog page: a header with a sort mark per column,
//! then one line per product. An empty result prints only the no-match
//! message, with no header.

use std::io::{BufWriter, Write};

use unicode_width::UnicodeWidthStr;

use shelf_core::model::{EnrichedProduct, Sex};
use shelf_core::query::{SortField, SortMark, SortState};

use crate::error::Result;
use crate::writers::RenderOptions;

const SEP: &str = " | ";

pub fn sort_glyph(mark: SortMark) -> &'static str {
    match mark {
        SortMark::Unsorted => "↕",
        SortMark::Ascending => "↑",
        SortMark::Descending => "↓",
    }
}

pub fn header_cells(sort: SortState) -> Vec<String> {
    SortField::COLUMNS
        .iter()
        .map(|&col| format!("{} {}", col.label(), sort_glyph(sort.mark(col))))
        .collect()
}

pub fn row_cells(p: &EnrichedProduct) -> Vec<String> {
    vec![
        p.id.get().to_string(),
        p.name.clone(),
        p.category.label(),
        p.user.name.clone(),
    ]
}

fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(cell.width());
    format!("{}{}", cell, " ".repeat(fill))
}

fn colorize(cell: String, sex: Sex) -> String {
    let code = match sex {
        Sex::M => "34",
        Sex::F => "31",
    };
    format!("\x1b[{}m{}\x1b[0m", code, cell)
}

pub struct TableWriter<'o, W: Write> {
    writer: BufWriter<W>,
    opts: &'o RenderOptions,
}

impl<'o, W: Write> TableWriter<'o, W> {
    pub fn new(writer: W, opts: &'o RenderOptions) -> Self {
        Self {
            writer: BufWriter::new(writer),
            opts,
        }
    }

    pub fn write(mut self, rows: &[EnrichedProduct]) -> Result<()> {
        if rows.is_empty() {
            writeln!(self.writer, "{}", self.opts.no_match_message)?;
            self.writer.flush()?;
            return Ok(());
        }

        let header = header_cells(self.opts.sort);
        let body: Vec<Vec<String>> = rows.iter().map(row_cells).collect();

        let mut widths: Vec<usize> = header.iter().map(|h| h.width()).collect();
        for cells in &body {
            for (w, cell) in widths.iter_mut().zip(cells) {
                *w = (*w).max(cell.width());
            }
        }

        let line: Vec<String> = header
            .iter()
            .zip(&widths)
            .map(|(h, &w)| pad(h, w))
            .collect();
        writeln!(self.writer, "{}", line.join(SEP).trim_end())?;

        let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
        writeln!(self.writer, "{}", rule.join("-+-"))?;

        for (cells, product) in body.iter().zip(rows) {
            let last = cells.len() - 1;
            let line: Vec<String> = cells
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(i, (cell, &w))| {
                    // The last column is never padded, so colors don't run into fill.
                    if i == last {
                        if self.opts.color {
                            colorize(cell.clone(), product.user.sex)
                        } else {
                            cell.clone()
                        }
                    } else {
                        pad(cell, w)
                    }
                })
                .collect();
            writeln!(self.writer, "{}", line.join(SEP))?;
        }

        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_core::model::{Category, User};
    use shelf_core::query::SortOrder;

    fn row(id: u64, name: &str) -> EnrichedProduct {
        EnrichedProduct {
            id: shelf_core::id::ProductId::new(id),
            name: name.into(),
            category_id: shelf_core::id::CategoryId::new(1),
            category: Category::new(1, "Dairy", "🥛", 1),
            user: User::new(1, "Alice", Sex::F),
        }
    }

    fn render(rows: &[EnrichedProduct], opts: &RenderOptions) -> String {
        let mut buf = Vec::new();
        TableWriter::new(&mut buf, opts).write(rows).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn empty_result_prints_only_the_message() {
        let out = render(&[], &RenderOptions::default());
        assert_eq!(out, "No products matching selected criteria\n");
    }

    #[test]
    fn header_carries_sort_marks() {
        let sort = SortState::new(SortField::Product, SortOrder::Descending);
        assert_eq!(
            header_cells(sort),
            vec!["ID ↕", "Product ↓", "Category ↕", "User ↕"]
        );
    }

    #[test]
    fn columns_align_on_display_width() {
        let out = render(&[row(1, "Milk"), row(10, "Buttermilk")], &RenderOptions::default());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[2], "1    | Milk       | 🥛 - Dairy | Alice");
        assert_eq!(lines[3], "10   | Buttermilk | 🥛 - Dairy | Alice");
    }

    #[test]
    fn color_wraps_user_cell() {
        let opts = RenderOptions {
            color: true,
            ..Default::default()
        };
        let out = render(&[row(1, "Milk")], &opts);
        assert!(out.contains("\x1b[31mAlice\x1b[0m"));
    }
}
