//! Paginated export engine
//!
//! Lays the canonical report out on fixed-size pages:
//! 1. Join the report lines, normalize the text and swap the classification
//!    glyphs for bracketed labels
//! 2. Word-wrap against the usable page width
//! 3. Walk the wrapped lines with a vertical cursor, opening a new page when
//!    the next line would leave the usable height
//! 4. Emit the bold header on every page, above the top margin
//!
//! The result is a pure layout; [`crate::pdf::render_pdf`] serializes it.

use crate::error::ExportError;
use crate::geometry::PageGeometry;
use crate::metrics::{HelveticaMetrics, TextMeasure};
use crate::normalize::normalize_for_export;
use crate::report::ReportDocument;
use crate::wrap::wrap_text;
use serde::Serialize;
use tracing::{debug, instrument};

/// Title repeated at the top of every exported page
pub const REPORT_TITLE: &str = "Potential duplicates found";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedLine {
    pub text: String,
    pub x: f64,
    /// Baseline, measured downward from the top of the page
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    /// 1-based
    pub number: usize,
    pub header: PlacedLine,
    pub lines: Vec<PlacedLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginatedDocument {
    pages: Vec<Page>,
}

impl PaginatedDocument {
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Content lines of every page, in order, headers excluded
    pub fn content_lines(&self) -> impl Iterator<Item = &str> {
        self.pages
            .iter()
            .flat_map(|page| page.lines.iter().map(|line| line.text.as_str()))
    }
}

/// Lay out a report with the built-in Helvetica metrics
pub fn export(
    document: &ReportDocument,
    geometry: &PageGeometry,
) -> Result<PaginatedDocument, ExportError> {
    export_with(document, geometry, &HelveticaMetrics)
}

/// Lay out a report using the given text measurement
#[instrument(skip_all, fields(lines = document.len()))]
pub fn export_with<M>(
    document: &ReportDocument,
    geometry: &PageGeometry,
    measure: &M,
) -> Result<PaginatedDocument, ExportError>
where
    M: TextMeasure + ?Sized,
{
    geometry.validate()?;

    let wrapped = if document.is_empty() {
        Vec::new()
    } else {
        let text = normalize_for_export(&document.text());
        wrap_text(&text, geometry.usable_width(), geometry.font_size, measure)
    };

    let pages = paginate(wrapped, geometry);
    debug!(pages = pages.len(), "report laid out");
    Ok(PaginatedDocument { pages })
}

/// A line whose baseline would pass the usable height starts a new page.
fn paginate(wrapped: Vec<String>, geometry: &PageGeometry) -> Vec<Page> {
    let bottom = geometry.content_bottom();
    let mut pages = Vec::new();
    let mut page = new_page(1, geometry);
    let mut cursor = geometry.margin_top;

    for text in wrapped {
        // A page always takes at least one line, however tall.
        if !page.lines.is_empty() && cursor + geometry.line_height > bottom {
            let next = page.number + 1;
            pages.push(std::mem::replace(&mut page, new_page(next, geometry)));
            cursor = geometry.margin_top;
        }

        page.lines.push(PlacedLine {
            text,
            x: geometry.margin_left,
            y: cursor,
        });
        cursor += geometry.line_height;
    }

    pages.push(page);
    pages
}

fn new_page(number: usize, geometry: &PageGeometry) -> Page {
    Page {
        number,
        header: PlacedLine {
            text: REPORT_TITLE.to_string(),
            x: geometry.margin_left,
            y: geometry.header_y(),
        },
        lines: Vec::new(),
    }
}
