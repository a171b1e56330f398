//! Document export.
//!
//! Every format walks the month exactly once through [`build_table`], which
//! produces a format-neutral [`ExportTable`]. Each format then only decides how
//! to serialize that table. Exports read the model and never modify it or the
//! persisted state.

mod delimited;
mod markup;
mod pdf;

pub use delimited::CsvSerializer;
pub use markup::{MarkupFlavor, MarkupSerializer};
pub use pdf::PdfSerializer;

use crate::{
    core::{pay::PaymentSettings, report::MonthTotals, timesheet::Timesheet},
    errors::{Error, Result},
};
use std::{fmt, str::FromStr};
use tracing::info;

/// Column headers shared by every format.
pub const HEADERS: [&str; 5] = [
    "Date",
    "Description",
    "Minutes",
    "Hours (Decimal)",
    "Amount (EUR)",
];

/// Supported download formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values
    Csv,
    /// Standalone HTML page
    Html,
    /// HTML table Word opens as a document
    Word,
    /// HTML table Excel opens as a worksheet
    Excel,
    /// Paginated PDF
    Pdf,
}

impl ExportFormat {
    /// Every format, in the order offered to users.
    pub const ALL: [Self; 5] = [Self::Csv, Self::Html, Self::Word, Self::Excel, Self::Pdf];

    /// Short name used in commands.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Html => "html",
            Self::Word => "word",
            Self::Excel => "excel",
            Self::Pdf => "pdf",
        }
    }

    /// File extension without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Html => "html",
            Self::Word => "doc",
            Self::Excel => "xls",
            Self::Pdf => "pdf",
        }
    }

    /// MIME type for the download.
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv;charset=utf-8",
            Self::Html => "text/html;charset=utf-8",
            Self::Word => "application/msword",
            Self::Excel => "application/vnd.ms-excel",
            Self::Pdf => "application/pdf",
        }
    }

    fn serializer(self) -> Box<dyn TableSerializer> {
        match self {
            Self::Csv => Box::new(CsvSerializer),
            Self::Html => Box::new(MarkupSerializer::new(MarkupFlavor::Html)),
            Self::Word => Box::new(MarkupSerializer::new(MarkupFlavor::Word)),
            Self::Excel => Box::new(MarkupSerializer::new(MarkupFlavor::Excel)),
            Self::Pdf => Box::new(PdfSerializer),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().trim_start_matches('.').to_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.name() == wanted || format.extension() == wanted)
            .ok_or_else(|| Error::UnknownExportFormat {
                value: s.to_string(),
            })
    }
}

/// How a row is shaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Monday to Friday
    Workday,
    /// Saturday or Sunday
    Weekend,
    /// The TOTAL row
    Total,
}

/// One table row with display-ready cells; amounts stay numeric so each
/// format can choose its own currency rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    /// Shading class
    pub kind: RowKind,
    /// Position among the day rows, 0-based; used for alternating shading
    pub index: usize,
    /// `DD.MM.YYYY`, or `TOTAL`
    pub date: String,
    /// Free text
    pub description: String,
    /// Minutes
    pub minutes: u64,
    /// Decimal hours, with the hour difference appended on the total row when shown
    pub hours: String,
    /// Amount in the single currency unit
    pub amount: f64,
}

/// A format-neutral table: title, body rows and totals.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportTable {
    /// Document title, e.g. "March 2024"
    pub title: String,
    /// One row per calendar day
    pub rows: Vec<ExportRow>,
    /// The TOTAL row
    pub total: ExportRow,
}

/// Serializes an [`ExportTable`] into file bytes.
pub trait TableSerializer {
    /// Produces the file contents.
    fn serialize(&self, table: &ExportTable) -> Result<Vec<u8>>;
}

/// A generated download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    /// Suggested file name
    pub filename: String,
    /// MIME type
    pub mime_type: &'static str,
    /// File contents
    pub bytes: Vec<u8>,
}

/// Walks the month once and produces the shared table structure.
///
/// Every format serializes the same table, so row order, shading and the
/// TOTAL line cannot drift between CSV, markup and PDF output. The total row
/// carries the hour difference in its hours cell when the settings show it.
///
/// # Arguments
/// * `sheet` - The month to export
/// * `settings` - Active settings; only used for the totals line
#[must_use]
pub fn build_table(sheet: &Timesheet, settings: &PaymentSettings) -> ExportTable {
    let rows = sheet
        .entries()
        .iter()
        .enumerate()
        .map(|(index, entry)| ExportRow {
            kind: if entry.is_weekend() {
                RowKind::Weekend
            } else {
                RowKind::Workday
            },
            index,
            date: entry.display_date(),
            description: entry.description().to_string(),
            minutes: u64::from(entry.minutes()),
            hours: format!("{:.2}", entry.hours()),
            amount: entry.amount(),
        })
        .collect();

    let totals = MonthTotals::compute(sheet, settings);
    let total = ExportRow {
        kind: RowKind::Total,
        index: sheet.entries().len(),
        date: "TOTAL".to_string(),
        description: String::new(),
        minutes: totals.total_minutes,
        hours: totals.hours_display(),
        amount: totals.total_amount,
    };

    ExportTable {
        title: sheet.month().label(),
        rows,
        total,
    }
}

/// File name derived from the month label, e.g. `timesheet_march_2024.csv`.
#[must_use]
pub fn export_filename(sheet: &Timesheet, format: ExportFormat) -> String {
    let label = sheet
        .month()
        .label()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    format!("timesheet_{label}.{}", format.extension())
}

/// Renders the current month in `format`.
pub fn export_timesheet(
    sheet: &Timesheet,
    settings: &PaymentSettings,
    format: ExportFormat,
) -> Result<ExportFile> {
    let table = build_table(sheet, settings);
    let bytes = format.serializer().serialize(&table)?;
    let filename = export_filename(sheet, format);
    info!("Exported {} ({} bytes)", filename, bytes.len());
    Ok(ExportFile {
        filename,
        mime_type: format.mime_type(),
        bytes,
    })
}
