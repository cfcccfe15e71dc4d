//! Inventory report generation.
//!
//! Renders the (filtered) product list as a paginated A4 PDF: a title block
//! with the generation date and total stock value, then a grid table with a
//! blue header band that is repeated on every page. Built-in PDF fonts cannot
//! render the Taka sign, so amounts are labelled with the currency code.

use crate::{
    core::{product::Product, stats::InventoryStats, table::format_amount},
    errors::{Error, Result},
};
use chrono::{DateTime, NaiveDate, Utc};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point,
    Polygon, Rgb,
    path::{PaintMode, WindingOrder},
};
use std::ops::Range;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_X: f32 = 14.0;
const MARGIN_BOTTOM: f32 = 15.0;
const MARGIN_TOP: f32 = 15.0;
const ROW_HEIGHT: f32 = 8.0;
const CELL_PADDING: f32 = 1.5;
const BODY_FONT_SIZE: f32 = 9.0;
/// Rough advance of one Helvetica glyph at [`BODY_FONT_SIZE`], used to clip cell text.
const APPROX_CHAR_WIDTH: f32 = 1.75;

/// Table top on the first page (below the title block).
const FIRST_TABLE_TOP: f32 = PAGE_HEIGHT - 44.0;
/// Table top on continuation pages.
const NEXT_TABLE_TOP: f32 = PAGE_HEIGHT - MARGIN_TOP;

/// Header band color, RGB 37/99/235.
const HEADER_RGB: (f32, f32, f32) = (37.0 / 255.0, 99.0 / 255.0, 235.0 / 255.0);

/// Column widths in millimetres; they add up to the printable width.
const COLUMN_WIDTHS: [f32; 5] = [45.0, 32.0, 15.0, 30.0, 60.0];

/// A generated file ready to be offered for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    /// Suggested file name
    pub filename: String,
    /// File contents
    pub bytes: Vec<u8>,
}

/// Everything printed in a report.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryReport {
    /// Report title
    pub title: String,
    /// "Generated: ..." line
    pub generated_line: String,
    /// "Total Value: ..." line
    pub total_line: String,
    /// Column headers
    pub header: [String; 5],
    /// One row per product
    pub rows: Vec<[String; 5]>,
}

impl InventoryReport {
    /// Assembles the report content for `products`.
    ///
    /// `stats` supplies the total value line; callers pass the stats of the
    /// whole inventory while `products` may be a filtered subset.
    #[must_use]
    pub fn new(
        products: &[&Product],
        stats: &InventoryStats,
        generated_on: NaiveDate,
        currency_code: &str,
    ) -> Self {
        Self {
            title: "Inventory Report".to_string(),
            generated_line: format!("Generated: {}", generated_on.format("%Y-%m-%d")),
            total_line: format!(
                "Total Value: {currency_code} {}",
                format_amount(stats.total_value)
            ),
            header: [
                "Name".to_string(),
                "Category".to_string(),
                "Qty".to_string(),
                format!("Price ({currency_code})"),
                "Description".to_string(),
            ],
            rows: products
                .iter()
                .map(|p| {
                    [
                        p.name.clone(),
                        p.category.clone(),
                        p.quantity.to_string(),
                        format_amount(p.price),
                        p.description.clone(),
                    ]
                })
                .collect(),
        }
    }

    /// Renders the report as PDF bytes.
    ///
    /// # Errors
    /// Returns `Error::Report` if the PDF library fails.
    pub fn to_pdf(&self) -> Result<Vec<u8>> {
        let (doc, first_page, first_layer) = PdfDocument::new(
            &self.title,
            Mm(PAGE_WIDTH),
            Mm(PAGE_HEIGHT),
            "Layer 1",
        );
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(pdf_error)?;

        let pages = paginate(
            self.rows.len(),
            rows_that_fit(FIRST_TABLE_TOP),
            rows_that_fit(NEXT_TABLE_TOP),
        );

        for (page_number, rows) in pages.into_iter().enumerate() {
            let layer = if page_number == 0 {
                let layer = doc.get_page(first_page).get_layer(first_layer);
                self.draw_title_block(&layer, &regular, &bold);
                layer
            } else {
                let (page, layer) = doc.add_page(
                    Mm(PAGE_WIDTH),
                    Mm(PAGE_HEIGHT),
                    format!("Layer {}", page_number + 1),
                );
                doc.get_page(page).get_layer(layer)
            };

            let top = if page_number == 0 {
                FIRST_TABLE_TOP
            } else {
                NEXT_TABLE_TOP
            };
            draw_header_row(&layer, &bold, &self.header, top);
            for (offset, row) in self.rows[rows].iter().enumerate() {
                #[allow(clippy::cast_precision_loss)] // a page holds a few dozen rows
                let row_top = top - ROW_HEIGHT * (offset as f32 + 1.0);
                draw_body_row(&layer, &regular, row, row_top);
            }
        }

        doc.save_to_bytes().map_err(pdf_error)
    }

    fn draw_title_block(
        &self,
        layer: &PdfLayerReference,
        regular: &IndirectFontRef,
        bold: &IndirectFontRef,
    ) {
        layer.set_fill_color(black());
        layer.use_text(&self.title, 18.0, Mm(MARGIN_X), Mm(PAGE_HEIGHT - 22.0), bold);
        layer.use_text(
            &self.generated_line,
            11.0,
            Mm(MARGIN_X),
            Mm(PAGE_HEIGHT - 30.0),
            regular,
        );
        layer.use_text(
            &self.total_line,
            11.0,
            Mm(MARGIN_X),
            Mm(PAGE_HEIGHT - 36.0),
            regular,
        );
    }
}

/// Builds the downloadable PDF for `products`.
///
/// # Errors
/// Returns `Error::Report` if rendering fails.
pub fn export_pdf(
    products: &[&Product],
    stats: &InventoryStats,
    now: DateTime<Utc>,
    currency_code: &str,
) -> Result<ExportedFile> {
    let report = InventoryReport::new(products, stats, now.date_naive(), currency_code);
    Ok(ExportedFile {
        filename: report_filename(now),
        bytes: report.to_pdf()?,
    })
}

/// `inventory_report_<unix millis>.pdf`
#[must_use]
pub fn report_filename(now: DateTime<Utc>) -> String {
    format!("inventory_report_{}.pdf", now.timestamp_millis())
}

/// Splits `row_count` rows into per-page ranges. There is always at least one
/// page so an empty report still gets its title and header.
#[must_use]
pub fn paginate(row_count: usize, first_capacity: usize, next_capacity: usize) -> Vec<Range<usize>> {
    let first_capacity = first_capacity.max(1);
    let next_capacity = next_capacity.max(1);

    let first_end = row_count.min(first_capacity);
    let mut pages = vec![0..first_end];
    let mut start = first_end;
    while start < row_count {
        let end = row_count.min(start + next_capacity);
        pages.push(start..end);
        start = end;
    }
    pages
}

/// Body rows that fit below a table whose header starts at `table_top`.
fn rows_that_fit(table_top: f32) -> usize {
    let usable = table_top - ROW_HEIGHT - MARGIN_BOTTOM;
    // Cast safety: usable is a few hundred millimetres at most and positive
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let rows = (usable / ROW_HEIGHT).floor().max(0.0) as usize;
    rows
}

/// Marks text cut off at a column edge.
const CLIP_MARK: &str = "...";

/// Clips `text` so it fits a column of `width` millimetres. The built-in
/// Helvetica fonts only cover Latin-1, so anything outside it becomes `?`.
fn fit_to_column(text: &str, width: f32) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let max_chars = ((width - 2.0 * CELL_PADDING) / APPROX_CHAR_WIDTH).floor().max(1.0) as usize;
    let printable: String = text
        .chars()
        .map(|c| if u32::from(c) <= 0xFF { c } else { '?' })
        .collect();
    if printable.chars().count() <= max_chars {
        return printable;
    }
    let cut: String = printable
        .chars()
        .take(max_chars.saturating_sub(CLIP_MARK.len()))
        .collect();
    format!("{}{CLIP_MARK}", cut.trim_end())
}

fn draw_header_row(layer: &PdfLayerReference, font: &IndirectFontRef, cells: &[String; 5], top: f32) {
    let (r, g, b) = HEADER_RGB;
    layer.set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));
    layer.add_polygon(Polygon {
        rings: vec![rectangle_points(MARGIN_X, top - ROW_HEIGHT, PAGE_WIDTH - 2.0 * MARGIN_X, ROW_HEIGHT)],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    });

    layer.set_fill_color(Color::Rgb(Rgb::new(1.0, 1.0, 1.0, None)));
    draw_cells(layer, font, cells, top);
}

fn draw_body_row(layer: &PdfLayerReference, font: &IndirectFontRef, cells: &[String; 5], top: f32) {
    layer.set_fill_color(black());
    draw_cells(layer, font, cells, top);
}

fn draw_cells(layer: &PdfLayerReference, font: &IndirectFontRef, cells: &[String; 5], top: f32) {
    layer.set_outline_color(Color::Rgb(Rgb::new(0.8, 0.8, 0.8, None)));
    layer.set_outline_thickness(0.3);

    let mut x = MARGIN_X;
    for (cell, width) in cells.iter().zip(COLUMN_WIDTHS) {
        layer.add_line(Line {
            points: rectangle_points(x, top - ROW_HEIGHT, width, ROW_HEIGHT),
            is_closed: true,
        });
        layer.use_text(
            fit_to_column(cell, width),
            BODY_FONT_SIZE,
            Mm(x + CELL_PADDING),
            Mm(top - ROW_HEIGHT + 2.8),
            font,
        );
        x += width;
    }
}

fn rectangle_points(x: f32, y: f32, width: f32, height: f32) -> Vec<(Point, bool)> {
    vec![
        (Point::new(Mm(x), Mm(y)), false),
        (Point::new(Mm(x + width), Mm(y)), false),
        (Point::new(Mm(x + width), Mm(y + height)), false),
        (Point::new(Mm(x), Mm(y + height)), false),
    ]
}

fn black() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

fn pdf_error<E: std::fmt::Debug>(e: E) -> Error {
    Error::Report {
        message: format!("{e:?}"),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::product_with;
    use chrono::TimeZone;

    fn sample() -> Vec<Product> {
        vec![
            product_with("Wireless Mouse", "Electronics", 45, 850.0),
            product_with("Office Chair", "Furniture", 3, 12000.0),
        ]
    }

    #[test]
    fn test_report_content() {
        let products = sample();
        let refs: Vec<&Product> = products.iter().collect();
        let stats = InventoryStats::from_products(&products);
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();

        let report = InventoryReport::new(&refs, &stats, date, "BDT");
        assert_eq!(report.title, "Inventory Report");
        assert_eq!(report.generated_line, "Generated: 2026-10-18");
        assert_eq!(report.total_line, "Total Value: BDT 74,250.00");
        assert_eq!(report.header[3], "Price (BDT)");
        assert_eq!(
            report.rows[1],
            ["Office Chair", "Furniture", "3", "12,000.00", "Test description"].map(String::from)
        );
    }

    #[test]
    fn test_report_is_deterministic_for_same_input() {
        let products = sample();
        let refs: Vec<&Product> = products.iter().collect();
        let stats = InventoryStats::from_products(&products);
        let date = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();

        assert_eq!(
            InventoryReport::new(&refs, &stats, date, "BDT"),
            InventoryReport::new(&refs, &stats, date, "BDT")
        );
    }

    #[test]
    fn test_to_pdf_produces_pdf_bytes() {
        let products = sample();
        let refs: Vec<&Product> = products.iter().collect();
        let stats = InventoryStats::from_products(&products);
        let report = InventoryReport::new(&refs, &stats, NaiveDate::default(), "BDT");

        let bytes = report.to_pdf().unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_to_pdf_handles_many_rows_and_empty_list() {
        let products: Vec<Product> = (0..120)
            .map(|i| product_with(&format!("Item {i}"), "Bulk", i, 1.0))
            .collect();
        let refs: Vec<&Product> = products.iter().collect();
        let stats = InventoryStats::from_products(&products);
        let report = InventoryReport::new(&refs, &stats, NaiveDate::default(), "BDT");
        assert!(report.to_pdf().unwrap().starts_with(b"%PDF"));

        let empty = InventoryReport::new(&[], &InventoryStats::default(), NaiveDate::default(), "BDT");
        assert!(empty.to_pdf().unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn test_paginate() {
        assert_eq!(paginate(0, 10, 20), vec![0..0]);
        assert_eq!(paginate(7, 10, 20), vec![0..7]);
        assert_eq!(paginate(10, 10, 20), vec![0..10]);
        assert_eq!(paginate(45, 10, 20), vec![0..10, 10..30, 30..45]);
    }

    #[test]
    fn test_first_page_holds_fewer_rows() {
        assert!(rows_that_fit(FIRST_TABLE_TOP) < rows_that_fit(NEXT_TABLE_TOP));
        assert!(rows_that_fit(FIRST_TABLE_TOP) > 0);
    }

    #[test]
    fn test_report_filename_uses_millis() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();
        assert_eq!(
            report_filename(now),
            format!("inventory_report_{}.pdf", now.timestamp_millis())
        );
    }

    #[test]
    fn test_fit_to_column_clips_long_text() {
        let long = "x".repeat(200);
        let clipped = fit_to_column(&long, 30.0);
        assert!(clipped.chars().count() < 20);
        assert!(clipped.ends_with("..."));
        assert!(clipped.is_ascii());
    }

    #[test]
    fn test_fit_to_column_replaces_glyphs_outside_latin1() {
        assert_eq!(fit_to_column("চা Café", 60.0), "?? Café");

        let clipped = fit_to_column(&"চ".repeat(200), 30.0);
        assert!(clipped.chars().all(|c| c == '?' || c == '.'));
        assert!(clipped.ends_with("..."));
    }
}
