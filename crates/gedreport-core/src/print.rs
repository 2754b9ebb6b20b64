//! Printable HTML view of the report
//!
//! Produces a self-contained page that the host prints. Page breaking is
//! left entirely to the host print facility.

use crate::report::ReportDocument;
use chrono::NaiveDateTime;
use serde::Serialize;

pub const PRINT_TITLE: &str = "Genealogy report";
pub const PRINT_HEADING: &str = "Duplicate analysis of the family tree";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrintableView {
    pub title: String,
    pub html: String,
}

/// Render the printable page, stamped with `generated_at` (local time)
pub fn render_printable(document: &ReportDocument, generated_at: NaiveDateTime) -> PrintableView {
    let html = format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <title>{title}</title>
    <style>
      body {{
        font-family: system-ui, sans-serif;
        padding: 2rem;
        background: #fff;
        color: #222;
      }}
      h2 {{
        margin-bottom: 0.5rem;
      }}
      .generated {{
        font-size: 0.9rem;
        color: #555;
      }}
      pre {{
        background: #fafafa;
        border: 1px solid #ddd;
        border-radius: 0.5rem;
        padding: 1rem;
        font-family: monospace;
        white-space: pre-wrap;
        font-size: 0.9rem;
        line-height: 1.4;
      }}
    </style>
  </head>
  <body>
    <h2>{heading}</h2>
    <p class="generated">Report generated on {stamp}</p>
    <pre>{body}</pre>
  </body>
</html>
"#,
        title = PRINT_TITLE,
        heading = PRINT_HEADING,
        stamp = generated_at.format("%d/%m/%Y %H:%M:%S"),
        body = escape_html(&document.text()),
    );

    PrintableView {
        title: PRINT_TITLE.to_string(),
        html,
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
