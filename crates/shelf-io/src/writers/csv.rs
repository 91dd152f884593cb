//! CSV writer with a header row.

use std::io::Write;

use shelf_core::model::EnrichedProduct;

use crate::error::Result;
use crate::writers::RowRecord;

pub struct CsvWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvWriter<W> {
    pub fn to_writer(writer: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer),
        }
    }

    /// The header is written even for an empty result.
    pub fn write_rows(mut self, rows: &[EnrichedProduct]) -> Result<()> {
        if rows.is_empty() {
            self.writer
                .write_record(["id", "product", "category", "icon", "user", "sex"])?;
        }
        for row in rows {
            self.writer.serialize(RowRecord::from(row))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
