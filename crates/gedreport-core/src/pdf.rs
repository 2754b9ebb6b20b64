//! PDF serialization of a paginated report
//!
//! Uses the standard Helvetica fonts by name (no embedding) with
//! WinAnsiEncoding, so text is written as single-byte strings. Characters
//! outside WinAnsi are dropped.

use crate::error::ExportError;
use crate::export::{export, Page, PaginatedDocument, REPORT_TITLE};
use crate::geometry::PageGeometry;
use crate::report::ReportDocument;
use chrono::NaiveDateTime;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, StringFormat};
use tracing::{info, instrument};
use unicode_normalization::UnicodeNormalization;

const BODY_FONT: &str = "Helvetica";
const HEADER_FONT: &str = "Helvetica-Bold";

/// Suggested file name for an export created at `timestamp`
///
/// `report_genealogique_YYYY-MM-DD_HH-MM.pdf`: sortable and filesystem safe.
pub fn export_filename(timestamp: NaiveDateTime) -> String {
    format!(
        "report_genealogique_{}.pdf",
        timestamp.format("%Y-%m-%d_%H-%M")
    )
}

/// Lay out and serialize a report in one step
pub fn export_pdf(
    document: &ReportDocument,
    geometry: &PageGeometry,
) -> Result<Vec<u8>, ExportError> {
    let paginated = export(document, geometry)?;
    render_pdf(&paginated, geometry)
}

/// Serialize a laid-out document to PDF bytes
#[instrument(skip_all, fields(pages = document.page_count()))]
pub fn render_pdf(
    document: &PaginatedDocument,
    geometry: &PageGeometry,
) -> Result<Vec<u8>, ExportError> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let body_font_id = doc.add_object(font_dictionary(BODY_FONT));
    let header_font_id = doc.add_object(font_dictionary(HEADER_FONT));
    let fonts = Dictionary::from_iter(vec![
        ("F1", Object::Reference(body_font_id)),
        ("F2", Object::Reference(header_font_id)),
    ]);
    let resources_id = doc.add_object(Dictionary::from_iter(vec![(
        "Font",
        Object::Dictionary(fonts),
    )]));

    let mut page_ids = Vec::with_capacity(document.page_count());
    for page in document.pages() {
        let content = page_content(page, geometry);
        let encoded = content
            .encode()
            .map_err(|e| ExportError::Pdf(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(Dictionary::new(), encoded));

        let page_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(geometry.page_width as f32),
                    Object::Real(geometry.page_height as f32),
                ]),
            ),
            ("Resources", Object::Reference(resources_id)),
            ("Contents", Object::Reference(content_id)),
        ]);
        page_ids.push(doc.add_object(page_dict));
    }

    let pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(page_ids.len() as i64)),
        (
            "Kids",
            Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect()),
        ),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]);
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let info = Dictionary::from_iter(vec![
        (
            "Title",
            Object::String(encode_win_ansi(REPORT_TITLE), StringFormat::Literal),
        ),
        (
            "Producer",
            Object::String(
                format!("gedreport {}", env!("CARGO_PKG_VERSION")).into_bytes(),
                StringFormat::Literal,
            ),
        ),
    ]);
    let info_id = doc.add_object(info);
    doc.trailer.set("Info", Object::Reference(info_id));

    doc.compress();

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    info!(bytes = output.len(), "PDF rendered");
    Ok(output)
}

fn font_dictionary(base_font: &str) -> Dictionary {
    Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(base_font.as_bytes().to_vec())),
        ("Encoding", Object::Name(b"WinAnsiEncoding".to_vec())),
    ])
}

fn page_content(page: &Page, geometry: &PageGeometry) -> Content {
    let mut operations = Vec::with_capacity(page.lines.len() * 5 + 5);
    push_text(
        &mut operations,
        "F2",
        geometry.header_font_size,
        page.header.x,
        geometry.page_height - page.header.y,
        &page.header.text,
    );
    for line in &page.lines {
        if line.text.trim().is_empty() {
            continue;
        }
        push_text(
            &mut operations,
            "F1",
            geometry.font_size,
            line.x,
            geometry.page_height - line.y,
            &line.text,
        );
    }
    Content { operations }
}

/// One BT/ET block per line; `y` is already flipped to PDF's bottom-up axis
fn push_text(
    operations: &mut Vec<Operation>,
    font: &str,
    size: f64,
    x: f64,
    y: f64,
    text: &str,
) {
    operations.push(Operation::new("BT", vec![]));
    operations.push(Operation::new(
        "Tf",
        vec![Object::Name(font.as_bytes().to_vec()), Object::Real(size as f32)],
    ));
    operations.push(Operation::new(
        "Td",
        vec![Object::Real(x as f32), Object::Real(y as f32)],
    ));
    operations.push(Operation::new(
        "Tj",
        vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
    ));
    operations.push(Operation::new("ET", vec![]));
}

/// Encode text as WinAnsi bytes
///
/// Letters outside WinAnsi fall back to their unaccented base letter
/// ("ř" becomes "r") or to `?`, so names never lose characters. Other
/// unencodable characters are dropped; when one was used as a prefix glyph
/// ("✅ Done") the space after it goes too.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if let Some(byte) = win_ansi_byte(c) {
            out.push(byte);
        } else if c.is_alphanumeric() {
            out.push(base_letter_byte(c).unwrap_or(b'?'));
        } else {
            let at_word_start = out.last().map_or(true, |b| *b == b' ');
            if at_word_start && chars.peek() == Some(&' ') {
                chars.next();
            }
        }
    }
    out
}

/// WinAnsi byte of the letter `c` is built on, if any
fn base_letter_byte(c: char) -> Option<u8> {
    // No canonical decomposition for these
    let base = match c {
        'Ł' => 'L',
        'ł' => 'l',
        'Đ' => 'D',
        'đ' => 'd',
        'Ħ' => 'H',
        'ħ' => 'h',
        'ı' => 'i',
        _ => c.nfd().next()?,
    };
    if base == c {
        return None;
    }
    win_ansi_byte(base)
}

fn win_ansi_byte(c: char) -> Option<u8> {
    let code = c as u32;
    match code {
        0x20..=0x7E => Some(code as u8),
        0xA0..=0xFF => Some(code as u8),
        _ => match c {
            '€' => Some(0x80),
            '‚' => Some(0x82),
            'ƒ' => Some(0x83),
            '„' => Some(0x84),
            '…' => Some(0x85),
            '†' => Some(0x86),
            '‡' => Some(0x87),
            'ˆ' => Some(0x88),
            '‰' => Some(0x89),
            'Š' => Some(0x8A),
            '‹' => Some(0x8B),
            'Œ' => Some(0x8C),
            'Ž' => Some(0x8E),
            '‘' => Some(0x91),
            '’' => Some(0x92),
            '“' => Some(0x93),
            '”' => Some(0x94),
            '•' => Some(0x95),
            '–' => Some(0x96),
            '—' => Some(0x97),
            '˜' => Some(0x98),
            '™' => Some(0x99),
            'š' => Some(0x9A),
            '›' => Some(0x9B),
            'œ' => Some(0x9C),
            'ž' => Some(0x9E),
            'Ÿ' => Some(0x9F),
            _ => None,
        },
    }
}
