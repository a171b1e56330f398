//! PDF serializer: A4 pages with a title, column headers and one line per row.

use super::{ExportRow, ExportTable, HEADERS, RowKind, TableSerializer};
use crate::errors::{Error, Result};
use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point,
};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const LEFT: f32 = 15.0;
const RIGHT: f32 = 195.0;
const TOP: f32 = 280.0;
const BOTTOM: f32 = 20.0;
const ROW_HEIGHT: f32 = 6.0;
const FONT_SIZE: f32 = 9.0;
/// x positions of the five columns
const COLUMNS: [f32; 5] = [15.0, 42.0, 122.0, 142.0, 172.0];
const DESCRIPTION_CHARS: usize = 45;

/// Lays the table out over as many pages as it needs.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfSerializer;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

struct Cursor {
    layer: PdfLayerReference,
    y: f32,
    page: usize,
}

impl TableSerializer for PdfSerializer {
    fn serialize(&self, table: &ExportTable) -> Result<Vec<u8>> {
        let (doc, page1, layer1) =
            PdfDocument::new(table.title.as_str(), Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let fonts = Fonts {
            regular: doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(pdf_error)?,
            bold: doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(pdf_error)?,
        };

        let mut cursor = Cursor {
            layer: doc.get_page(page1).get_layer(layer1),
            y: TOP,
            page: 1,
        };
        cursor
            .layer
            .use_text(table.title.as_str(), 16.0, Mm(LEFT), Mm(cursor.y), &fonts.bold);
        cursor.y -= 10.0;
        write_headers(&mut cursor, &fonts);

        for row in &table.rows {
            ensure_room(&doc, &mut cursor, &fonts);
            write_row(&cursor, &fonts.regular, row);
            cursor.y -= ROW_HEIGHT;
        }

        ensure_room(&doc, &mut cursor, &fonts);
        rule(&cursor.layer, cursor.y + ROW_HEIGHT - 1.5);
        write_row(&cursor, &fonts.bold, &table.total);

        let mut writer = std::io::BufWriter::new(Vec::<u8>::new());
        doc.save(&mut writer).map_err(pdf_error)?;
        writer.into_inner().map_err(|e| Error::Export {
            message: format!("Failed to finish PDF: {e}"),
        })
    }
}

fn pdf_error(e: printpdf::Error) -> Error {
    Error::Export {
        message: format!("PDF generation failed: {e}"),
    }
}

/// Starts a new page when the next row would cross the bottom margin.
fn ensure_room(doc: &PdfDocumentReference, cursor: &mut Cursor, fonts: &Fonts) {
    if cursor.y >= BOTTOM {
        return;
    }
    cursor.page += 1;
    let (page, layer) = doc.add_page(
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        format!("Layer {}", cursor.page),
    );
    cursor.layer = doc.get_page(page).get_layer(layer);
    cursor.y = TOP;
    write_headers(cursor, fonts);
}

fn write_headers(cursor: &mut Cursor, fonts: &Fonts) {
    for (header, x) in HEADERS.iter().zip(COLUMNS) {
        cursor
            .layer
            .use_text(*header, FONT_SIZE, Mm(x), Mm(cursor.y), &fonts.bold);
    }
    rule(&cursor.layer, cursor.y - 2.0);
    cursor.y -= ROW_HEIGHT + 1.0;
}

fn write_row(cursor: &Cursor, font: &IndirectFontRef, row: &ExportRow) {
    let description = if row.kind == RowKind::Total {
        String::new()
    } else {
        clip(&row.description.replace(['\n', '\r'], " "), DESCRIPTION_CHARS)
    };
    let cells = [
        row.date.clone(),
        description,
        row.minutes.to_string(),
        row.hours.clone(),
        format!("{:.2}", row.amount),
    ];
    for (cell, x) in cells.into_iter().zip(COLUMNS) {
        if !cell.is_empty() {
            cursor.layer.use_text(cell, FONT_SIZE, Mm(x), Mm(cursor.y), font);
        }
    }
}

fn rule(layer: &PdfLayerReference, y: f32) {
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(LEFT), Mm(y)), false),
            (Point::new(Mm(RIGHT), Mm(y)), false),
        ],
        is_closed: false,
    });
}

fn clip(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    clipped.push_str("...");
    clipped
}
