//! Document renderer: printable bills and monthly reports.
//!
//! PDF generation via `printpdf` (A4, builtin Helvetica). Renderers return
//! the document bytes; saving or downloading them is the caller's concern -
//! nothing here touches a filesystem.

use crate::config::GarageProfile;
use crate::error::{Error, Result};
use crate::model::Bill;
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Polygon, Rgb,
};
use rust_decimal::Decimal;
use std::io::BufWriter;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 15.0;

/// Download filename for a rendered bill:
/// `<Business-Slug>-Bill-<LAST8>.pdf`.
pub fn bill_filename(profile: &GarageProfile, bill: &Bill) -> String {
    format!("{}-Bill-{}.pdf", profile.slug(), bill.short_number())
}

/// Download filename for a rendered monthly report:
/// `<Business-Slug>-Report-<Month>-<Year>.pdf`.
pub fn report_filename(profile: &GarageProfile, month: &str, year: i32) -> String {
    format!("{}-Report-{}-{}.pdf", profile.slug(), month, year)
}

/// Render a finalized bill as PDF bytes.
///
/// Layout: bordered business header, bill number/date box, customer and
/// vehicle box, line-item table with alternating row shading, totals block,
/// footer. Items overflowing the page continue on a fresh one.
///
/// # Errors
///
/// Returns `Error::Other` when the PDF library fails.
pub fn render_bill(profile: &GarageProfile, bill: &Bill) -> Result<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(
        format!("Bill {}", bill.short_number()),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );
    let mut layer = doc.get_page(page).get_layer(layer);
    let font = builtin(&doc, BuiltinFont::Helvetica)?;
    let bold = builtin(&doc, BuiltinFont::HelveticaBold)?;

    let mut y = header(&layer, &bold, &font, profile);

    // Bill details box
    text(&layer, &bold, "BILL DETAILS", 12.0, MARGIN, y);
    y -= 4.0;
    rect_outline(&layer, MARGIN, y, PAGE_WIDTH - 2.0 * MARGIN, 16.0);
    text(
        &layer,
        &font,
        &format!("Bill No: {}", bill.short_number()),
        10.0,
        MARGIN + 5.0,
        y - 6.0,
    );
    text(
        &layer,
        &font,
        &format!("Date: {}", bill.created_at.format("%d/%m/%Y")),
        10.0,
        MARGIN + 5.0,
        y - 12.0,
    );
    text(
        &layer,
        &font,
        &format!("Time: {}", bill.created_at.format("%H:%M:%S")),
        10.0,
        120.0,
        y - 6.0,
    );
    y -= 24.0;

    // Customer details box
    text(&layer, &bold, "CUSTOMER DETAILS", 12.0, MARGIN, y);
    y -= 4.0;
    rect_outline(&layer, MARGIN, y, PAGE_WIDTH - 2.0 * MARGIN, 16.0);
    text(
        &layer,
        &font,
        &format!("Name: {}", bill.customer_name),
        10.0,
        MARGIN + 5.0,
        y - 6.0,
    );
    text(
        &layer,
        &font,
        &format!("Phone: {}", bill.customer_phone),
        10.0,
        MARGIN + 5.0,
        y - 12.0,
    );
    text(
        &layer,
        &font,
        &format!("Car Number: {}", bill.car_number),
        10.0,
        120.0,
        y - 6.0,
    );
    text(
        &layer,
        &font,
        &format!("Car KM: {}", bill.car_km),
        10.0,
        120.0,
        y - 12.0,
    );
    y -= 26.0;

    // Line-item table
    text(&layer, &bold, "SERVICES & PRODUCTS", 12.0, MARGIN, y);
    y -= 7.0;
    item_table_header(&layer, &bold, y);
    y -= 7.0;

    for (index, item) in bill.items.iter().enumerate() {
        if y < 55.0 {
            layer = next_page(&doc);
            y = PAGE_HEIGHT - 20.0;
            item_table_header(&layer, &bold, y);
            y -= 7.0;
        }

        if index % 2 == 1 {
            rect_fill(&layer, MARGIN, y + 4.5, PAGE_WIDTH - 2.0 * MARGIN, 6.0, 0.97);
        }
        text(&layer, &font, &item.name, 10.0, MARGIN + 5.0, y);
        text(&layer, &font, &item.quantity.to_string(), 10.0, 122.0, y);
        text(&layer, &font, &money(item.price), 10.0, 142.0, y);
        text(&layer, &font, &money(item.total), 10.0, 168.0, y);
        y -= 6.0;
    }

    // Totals block
    y -= 4.0;
    hline(&layer, 120.0, PAGE_WIDTH - MARGIN, y);
    y -= 7.0;
    text(&layer, &font, "Subtotal:", 11.0, 125.0, y);
    text(&layer, &font, &money(bill.subtotal), 11.0, 168.0, y);
    y -= 6.0;
    text(&layer, &font, "GST (18%):", 11.0, 125.0, y);
    text(&layer, &font, &money(bill.tax), 11.0, 168.0, y);
    y -= 3.0;
    hline(&layer, 120.0, PAGE_WIDTH - MARGIN, y);
    y -= 7.0;
    text(&layer, &bold, "TOTAL:", 12.0, 125.0, y);
    text(&layer, &bold, &money(bill.total), 12.0, 168.0, y);
    y -= 3.0;
    hline(&layer, 120.0, PAGE_WIDTH - MARGIN, y);

    footer(
        &layer,
        &font,
        &format!(
            "Thank you for choosing {}!",
            profile.slug().replace('-', " ")
        ),
        &format!("For any queries, please contact: {}", profile.contact),
    );

    save(doc)
}

/// Render a monthly report as PDF bytes from an already-filtered bill list.
///
/// The caller supplies the bills of one calendar month (see
/// [`crate::reporting::bills_in_month`]) plus the month label and year for
/// the title. Summary figures are computed over exactly the bills given.
///
/// # Errors
///
/// Returns `Error::Other` when the PDF library fails.
pub fn render_monthly_report(
    profile: &GarageProfile,
    bills: &[Bill],
    month: &str,
    year: i32,
) -> Result<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(
        format!("Monthly Report {} {}", month, year),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );
    let mut layer = doc.get_page(page).get_layer(layer);
    let font = builtin(&doc, BuiltinFont::Helvetica)?;
    let bold = builtin(&doc, BuiltinFont::HelveticaBold)?;

    let mut y = header(&layer, &bold, &font, profile);

    text(&layer, &bold, "MONTHLY REPORT", 16.0, MARGIN, y);
    text(
        &layer,
        &bold,
        &format!("{} {}", month, year),
        13.0,
        150.0,
        y,
    );
    y -= 10.0;

    // Summary box
    let revenue: Decimal = bills.iter().map(|bill| bill.total).sum();
    let average = if bills.is_empty() {
        Decimal::ZERO
    } else {
        revenue / Decimal::from(bills.len() as u64)
    };

    rect_outline(&layer, MARGIN, y, PAGE_WIDTH - 2.0 * MARGIN, 22.0);
    text(&layer, &bold, "SUMMARY", 11.0, MARGIN + 5.0, y - 6.0);
    text(
        &layer,
        &font,
        &format!("Total Bills Generated: {}", bills.len()),
        10.0,
        MARGIN + 5.0,
        y - 12.0,
    );
    text(
        &layer,
        &font,
        &format!("Total Revenue: {}", money(revenue)),
        10.0,
        MARGIN + 5.0,
        y - 18.0,
    );
    text(
        &layer,
        &font,
        &format!("Average Bill Amount: {}", money(average)),
        10.0,
        115.0,
        y - 12.0,
    );
    y -= 30.0;

    if !bills.is_empty() {
        text(&layer, &bold, "BILL DETAILS", 12.0, MARGIN, y);
        y -= 7.0;
        report_table_header(&layer, &bold, y);
        y -= 7.0;

        for (index, bill) in bills.iter().enumerate() {
            if y < 35.0 {
                layer = next_page(&doc);
                y = PAGE_HEIGHT - 20.0;
                report_table_header(&layer, &bold, y);
                y -= 7.0;
            }

            if index % 2 == 1 {
                rect_fill(&layer, MARGIN, y + 4.5, PAGE_WIDTH - 2.0 * MARGIN, 6.0, 0.97);
            }
            text(
                &layer,
                &font,
                &bill.created_at.format("%d/%m/%Y").to_string(),
                9.0,
                MARGIN + 5.0,
                y,
            );
            text(
                &layer,
                &font,
                truncate(&bill.customer_name, 18),
                9.0,
                55.0,
                y,
            );
            text(&layer, &font, &bill.car_number, 9.0, 105.0, y);
            text(&layer, &font, &money(bill.total), 9.0, 160.0, y);
            y -= 6.0;
        }
    }

    footer(
        &layer,
        &font,
        &format!(
            "Generated by {} Management System",
            profile.slug().replace('-', " ")
        ),
        "",
    );

    save(doc)
}

// ─── Layout helpers ─────────────────────────────────────────────────────────

fn builtin(doc: &PdfDocumentReference, font: BuiltinFont) -> Result<IndirectFontRef> {
    doc.add_builtin_font(font)
        .map_err(|e| Error::Other(format!("PDF font error: {}", e)))
}

fn text(layer: &PdfLayerReference, font: &IndirectFontRef, s: &str, size: f32, x: f32, y: f32) {
    layer.use_text(s, size, Mm(x), Mm(y), font);
}

fn hline(layer: &PdfLayerReference, x1: f32, x2: f32, y: f32) {
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(x1), Mm(y)), false),
            (Point::new(Mm(x2), Mm(y)), false),
        ],
        is_closed: false,
    });
}

fn rect_outline(layer: &PdfLayerReference, x: f32, y_top: f32, width: f32, height: f32) {
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(x), Mm(y_top)), false),
            (Point::new(Mm(x + width), Mm(y_top)), false),
            (Point::new(Mm(x + width), Mm(y_top - height)), false),
            (Point::new(Mm(x), Mm(y_top - height)), false),
        ],
        is_closed: true,
    });
}

fn rect_fill(layer: &PdfLayerReference, x: f32, y_top: f32, width: f32, height: f32, gray: f32) {
    layer.set_fill_color(Color::Rgb(Rgb::new(gray, gray, gray, None)));
    layer.add_polygon(Polygon {
        rings: vec![vec![
            (Point::new(Mm(x), Mm(y_top)), false),
            (Point::new(Mm(x + width), Mm(y_top)), false),
            (Point::new(Mm(x + width), Mm(y_top - height)), false),
            (Point::new(Mm(x), Mm(y_top - height)), false),
        ]],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    });
    // Back to black for subsequent text
    layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
}

/// Bordered business header. Returns the y position content starts at.
fn header(
    layer: &PdfLayerReference,
    bold: &IndirectFontRef,
    font: &IndirectFontRef,
    profile: &GarageProfile,
) -> f32 {
    let top = PAGE_HEIGHT - 10.0;
    rect_outline(layer, MARGIN - 5.0, top, PAGE_WIDTH - 2.0 * (MARGIN - 5.0), 28.0);

    text(layer, bold, &profile.name, 18.0, MARGIN, top - 9.0);
    text(layer, font, &profile.location, 12.0, MARGIN, top - 17.0);
    text(
        layer,
        font,
        &format!("Contact: {}", profile.contact),
        10.0,
        MARGIN,
        top - 24.0,
    );

    hline(layer, MARGIN - 5.0, PAGE_WIDTH - (MARGIN - 5.0), top - 32.0);
    top - 42.0
}

fn footer(layer: &PdfLayerReference, font: &IndirectFontRef, line1: &str, line2: &str) {
    let y = 27.0;
    hline(layer, MARGIN - 5.0, PAGE_WIDTH - (MARGIN - 5.0), y);
    text(layer, font, line1, 10.0, MARGIN, y - 7.0);
    if !line2.is_empty() {
        text(layer, font, line2, 10.0, MARGIN, y - 13.0);
    }
}

fn item_table_header(layer: &PdfLayerReference, bold: &IndirectFontRef, y: f32) {
    rect_fill(layer, MARGIN, y + 4.5, PAGE_WIDTH - 2.0 * MARGIN, 6.5, 0.94);
    text(layer, bold, "Description", 10.0, MARGIN + 5.0, y);
    text(layer, bold, "Qty", 10.0, 122.0, y);
    text(layer, bold, "Rate", 10.0, 142.0, y);
    text(layer, bold, "Amount", 10.0, 168.0, y);
    hline(layer, MARGIN, PAGE_WIDTH - MARGIN, y - 2.0);
}

fn report_table_header(layer: &PdfLayerReference, bold: &IndirectFontRef, y: f32) {
    rect_fill(layer, MARGIN, y + 4.5, PAGE_WIDTH - 2.0 * MARGIN, 6.5, 0.94);
    text(layer, bold, "Date", 9.0, MARGIN + 5.0, y);
    text(layer, bold, "Customer", 9.0, 55.0, y);
    text(layer, bold, "Car No.", 9.0, 105.0, y);
    text(layer, bold, "Amount", 9.0, 160.0, y);
    hline(layer, MARGIN, PAGE_WIDTH - MARGIN, y - 2.0);
}

fn next_page(doc: &PdfDocumentReference) -> PdfLayerReference {
    let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    doc.get_page(page).get_layer(layer)
}

fn save(doc: PdfDocumentReference) -> Result<Vec<u8>> {
    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| Error::Other(format!("PDF save error: {}", e)))?;
    buf.into_inner()
        .map_err(|e| Error::Other(format!("PDF buffer error: {}", e)))
}

/// Monetary display: rounded to 2 fraction digits here and only here.
fn money(value: Decimal) -> String {
    format!("₹{:.2}", value.round_dp(2))
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((index, _)) => &s[..index],
        None => s,
    }
}
