//! NDJSON writer.

use std::io::{BufWriter, Write};

use shelf_core::model::EnrichedProduct;

use crate::error::Result;
use crate::writers::RowRecord;

pub struct JsonlWriter<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> JsonlWriter<W> {
    pub fn to_writer(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }

    /// Write one JSON object per row. An empty result writes nothing.
    pub fn write_rows(mut self, rows: &[EnrichedProduct]) -> Result<()> {
        for row in rows {
            let line = serde_json::to_string(&RowRecord::from(row))?;
            writeln!(self.writer, "{}", line)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_core::model::{Category, Sex, User};

    #[test]
    fn one_object_per_line() {
        let row = EnrichedProduct {
            id: shelf_core::id::ProductId::new(1),
            name: "Milk".into(),
            category_id: shelf_core::id::CategoryId::new(1),
            category: Category::new(1, "Dairy", "🥛", 1),
            user: User::new(1, "Alice", Sex::F),
        };
        let mut buf = Vec::new();
        JsonlWriter::to_writer(&mut buf)
            .write_rows(&[row.clone(), row])
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let v: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(v["product"], "Milk");
        assert_eq!(v["category"], "Dairy");
        assert_eq!(v["user"], "Alice");
        assert_eq!(v["sex"], "f");
    }
}
