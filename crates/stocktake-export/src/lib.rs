//! # stocktake-export
//!
//! Builds the XLSX workbook served by `POST /api/export`.
//!
//! One worksheet, `Products`, with a bold blue header row and one row per
//! product. Column order and widths are fixed by [`COLUMNS`].

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use chrono::{DateTime, Utc};
use rust_xlsxwriter::{Color, Format, FormatPattern, Workbook, Worksheet};
use stocktake_core::Product;

/// MIME type of the generated workbook.
pub const CONTENT_TYPE_XLSX: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Name of the single worksheet.
pub const SHEET_NAME: &str = "Products";

/// Header fill colour.
const HEADER_FILL: u32 = 0x4472C4;

/// Result type alias for export operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a workbook
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Spreadsheet writer failure
    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// A worksheet column: header text and width in characters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    /// Header cell text.
    pub header: &'static str,
    /// Column width.
    pub width: f64,
}

/// Columns in sheet order.
pub const COLUMNS: [Column; 7] = [
    Column { header: "ID", width: 25.0 },
    Column { header: "Product Name", width: 25.0 },
    Column { header: "Quantity", width: 12.0 },
    Column { header: "Price", width: 12.0 },
    Column { header: "Company", width: 20.0 },
    Column { header: "Product Type", width: 20.0 },
    Column { header: "Description", width: 35.0 },
];

/// Render products into XLSX bytes.
pub fn export_products(products: &[Product]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;
        write_header(sheet)?;
        for (index, product) in products.iter().enumerate() {
            write_product(sheet, (index + 1) as u32, product)?;
        }
    }
    let bytes = workbook.save_to_buffer()?;
    log::debug!(
        "Exported {} products ({} bytes)",
        products.len(),
        bytes.len()
    );
    Ok(bytes)
}

fn write_header(sheet: &mut Worksheet) -> Result<()> {
    let format = Format::new()
        .set_bold()
        .set_pattern(FormatPattern::Solid)
        .set_background_color(Color::RGB(HEADER_FILL));

    for (col, column) in COLUMNS.iter().enumerate() {
        let col = col as u16;
        sheet.set_column_width(col, column.width)?;
        sheet.write_string_with_format(0, col, column.header, &format)?;
    }
    Ok(())
}

fn write_product(sheet: &mut Worksheet, row: u32, product: &Product) -> Result<()> {
    sheet.write_string(row, 0, product.id.as_str())?;
    sheet.write_string(row, 1, &product.name)?;
    sheet.write_number(row, 2, product.quantity as f64)?;
    sheet.write_number(row, 3, product.price)?;
    sheet.write_string(row, 4, &product.company)?;
    sheet.write_string(row, 5, &product.kind)?;
    sheet.write_string(row, 6, &product.description)?;
    Ok(())
}

/// Download filename: `inventory_<company|all>_<unix-millis>.xlsx`.
///
/// Characters outside `[A-Za-z0-9._-]` in the company name become `_`.
pub fn export_filename(company: Option<&str>, now: DateTime<Utc>) -> String {
    let scope = company
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(sanitize)
        .unwrap_or_else(|| "all".to_string());
    format!("inventory_{scope}_{}.xlsx", now.timestamp_millis())
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
