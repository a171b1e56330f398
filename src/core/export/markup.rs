//! HTML table serializer shared by the HTML, Word and Excel downloads.
//!
//! Word and Excel both open an HTML table when it carries their Office
//! namespaces, so the three formats differ only in the document preamble.

use super::{ExportRow, ExportTable, HEADERS, RowKind, TableSerializer};
use crate::{core::report::format_currency, errors::Result};
use std::fmt::Write;

const HEADER_BACKGROUND: &str = "#C8C8C8";
const TOTAL_BACKGROUND: &str = "#e9ecef";
const WEEKEND_BACKGROUND: &str = "#f0f0f0";
const EVEN_BACKGROUND: &str = "#ffffff";
const ODD_BACKGROUND: &str = "#f9f9f9";

/// Which application the markup targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupFlavor {
    /// Plain browser page
    Html,
    /// Microsoft Word document
    Word,
    /// Microsoft Excel worksheet
    Excel,
}

/// Renders the table as a single HTML document.
#[derive(Debug, Clone, Copy)]
pub struct MarkupSerializer {
    flavor: MarkupFlavor,
}

impl MarkupSerializer {
    /// Serializer for `flavor`.
    #[must_use]
    pub const fn new(flavor: MarkupFlavor) -> Self {
        Self { flavor }
    }

    fn preamble(self, title: &str) -> String {
        match self.flavor {
            MarkupFlavor::Html => format!(
                "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{title}</title></head><body>"
            ),
            MarkupFlavor::Word => format!(
                "<html xmlns:o=\"urn:schemas-microsoft-com:office:office\" \
                 xmlns:w=\"urn:schemas-microsoft-com:office:word\" \
                 xmlns=\"http://www.w3.org/TR/REC-html40\">\
                 <head><meta charset=\"utf-8\"><title>{title}</title></head><body>"
            ),
            MarkupFlavor::Excel => format!(
                "<html xmlns:o=\"urn:schemas-microsoft-com:office:office\" \
                 xmlns:x=\"urn:schemas-microsoft-com:office:excel\" \
                 xmlns=\"http://www.w3.org/TR/REC-html40\">\
                 <head><meta charset=\"utf-8\"><title>{title}</title>\
                 <!--[if gte mso 9]><xml><x:ExcelWorkbook><x:ExcelWorksheets><x:ExcelWorksheet>\
                 <x:Name>{title}</x:Name><x:WorksheetOptions><x:DisplayGridlines/></x:WorksheetOptions>\
                 </x:ExcelWorksheet></x:ExcelWorksheets></x:ExcelWorkbook></xml><![endif]-->\
                 </head><body>"
            ),
        }
    }

    fn render(self, table: &ExportTable) -> std::result::Result<String, std::fmt::Error> {
        let title = escape(&table.title);
        let mut html = self.preamble(&title);

        write!(html, "<h2 style=\"text-align: center;\">{title}</h2>")?;
        html.push_str(
            "<table border=\"1\" cellspacing=\"0\" cellpadding=\"5\" \
             style=\"border-collapse: collapse; width: 100%;\">",
        );

        write!(
            html,
            "<tr style=\"background-color: {HEADER_BACKGROUND}; color: white;\">"
        )?;
        for header in HEADERS {
            write!(html, "<th>{header}</th>")?;
        }
        html.push_str("</tr>");

        for row in &table.rows {
            write_body_row(&mut html, row)?;
        }
        write_total_row(&mut html, &table.total)?;

        html.push_str("</table></body></html>");
        Ok(html)
    }
}

impl TableSerializer for MarkupSerializer {
    fn serialize(&self, table: &ExportTable) -> Result<Vec<u8>> {
        Ok(self.render(table)?.into_bytes())
    }
}

/// Background for a day row: weekends are grey, other days alternate.
#[must_use]
pub const fn row_background(row: &ExportRow) -> &'static str {
    match row.kind {
        RowKind::Weekend => WEEKEND_BACKGROUND,
        RowKind::Total => TOTAL_BACKGROUND,
        RowKind::Workday if row.index % 2 == 0 => EVEN_BACKGROUND,
        RowKind::Workday => ODD_BACKGROUND,
    }
}

fn write_body_row(html: &mut String, row: &ExportRow) -> std::fmt::Result {
    write!(
        html,
        "<tr style=\"background-color: {};\">\
         <td>{}</td><td>{}</td>\
         <td style=\"text-align: center;\">{}</td>\
         <td style=\"text-align: center;\">{}</td>\
         <td style=\"text-align: right;\">{}</td></tr>",
        row_background(row),
        escape(&row.date),
        escape(&row.description).replace('\n', "<br>"),
        row.minutes,
        escape(&row.hours),
        format_currency(row.amount),
    )
}

fn write_total_row(html: &mut String, row: &ExportRow) -> std::fmt::Result {
    let border = format!("border-top: 2px solid {HEADER_BACKGROUND};");
    write!(
        html,
        "<tr style=\"background-color: {}; font-weight: bold;\">\
         <td style=\"{border}\">{}</td><td style=\"{border}\"></td>\
         <td style=\"{border} text-align: center;\">{}</td>\
         <td style=\"{border} text-align: center;\">{}</td>\
         <td style=\"{border} text-align: right;\">{}</td></tr>",
        row_background(row),
        escape(&row.date),
        row.minutes,
        escape(&row.hours),
        format_currency(row.amount),
    )
}

/// Escapes text for HTML element content and attribute values.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::{
        calendar::MonthKey, export::build_table, pay::PaymentSettings, timesheet::Timesheet,
    };

    fn render(flavor: MarkupFlavor) -> String {
        let settings = PaymentSettings::default();
        let mut sheet = Timesheet::new(MonthKey::new(2024, 3).unwrap());
        sheet.set_minutes(1, "480", &settings).unwrap();
        sheet.set_description(1, "<b>Deploy</b> & verify").unwrap();
        let bytes = MarkupSerializer::new(flavor)
            .serialize(&build_table(&sheet, &settings))
            .unwrap();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_html_structure() {
        let html = render(MarkupFlavor::Html);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>March 2024</title>"));
        assert!(html.contains("<th>Hours (Decimal)</th>"));
        // header + 31 days + total
        assert_eq!(html.matches("<tr").count(), 33);
        assert!(html.contains("€120.00"));
        assert!(html.contains("font-weight: bold;\"><td style=\"border-top: 2px solid #C8C8C8;\">TOTAL"));
        assert!(html.ends_with("</table></body></html>"));
    }

    #[test]
    fn test_description_is_escaped() {
        let html = render(MarkupFlavor::Html);
        assert!(html.contains("&lt;b&gt;Deploy&lt;/b&gt; &amp; verify"));
        assert!(!html.contains("<b>Deploy"));
    }

    #[test]
    fn test_office_flavors_share_the_table() {
        let word = render(MarkupFlavor::Word);
        let excel = render(MarkupFlavor::Excel);
        assert!(word.contains("urn:schemas-microsoft-com:office:word"));
        assert!(excel.contains("urn:schemas-microsoft-com:office:excel"));
        assert!(excel.contains("<x:Name>March 2024</x:Name>"));

        let table_of = |doc: &str| doc[doc.find("<table").unwrap()..].to_string();
        assert_eq!(table_of(&word), table_of(&excel));
        assert_eq!(table_of(&word), table_of(&render(MarkupFlavor::Html)));
    }

    #[test]
    fn test_row_shading() {
        let settings = PaymentSettings::default();
        let sheet = Timesheet::new(MonthKey::new(2024, 3).unwrap());
        let table = build_table(&sheet, &settings);
        // 1 March 2024 is a Friday, 2 March a Saturday, 4 March a Monday
        assert_eq!(row_background(&table.rows[0]), EVEN_BACKGROUND);
        assert_eq!(row_background(&table.rows[1]), WEEKEND_BACKGROUND);
        assert_eq!(row_background(&table.rows[3]), ODD_BACKGROUND);
        assert_eq!(row_background(&table.total), TOTAL_BACKGROUND);
    }
}
