//! CSV serializer.

use super::{ExportRow, ExportTable, HEADERS, TableSerializer};
use crate::errors::{Error, Result};
use csv::{QuoteStyle, WriterBuilder};

/// Writes the header, one record per day and the TOTAL record.
///
/// Fields are quoted only when they contain a delimiter, quote or newline;
/// amounts are plain numbers since the header names the currency.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvSerializer;

impl TableSerializer for CsvSerializer {
    fn serialize(&self, table: &ExportTable) -> Result<Vec<u8>> {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Necessary)
            .from_writer(Vec::new());

        writer.write_record(HEADERS)?;
        for row in table.rows.iter().chain(std::iter::once(&table.total)) {
            writer.write_record(record(row))?;
        }

        writer.into_inner().map_err(|e| Error::Export {
            message: format!("Failed to finish CSV: {e}"),
        })
    }
}

fn record(row: &ExportRow) -> [String; 5] {
    [
        row.date.clone(),
        row.description.clone(),
        row.minutes.to_string(),
        row.hours.clone(),
        format!("{:.2}", row.amount),
    ]
}
