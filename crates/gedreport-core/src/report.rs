//! Report formatter
//!
//! Turns an [`AnalysisResult`] into the canonical report: an ordered list of
//! text lines with no notion of page size. Both the PDF export and the print
//! view are derived from this text.

use crate::model::{AnalysisResult, CandidateDuplicate};
use serde::Serialize;

/// Marker in front of a same-parents (probable) duplicate
pub const PROBABLE_MARKER: char = '🔸';
/// Marker in front of a different/unknown-parents (possible) duplicate
pub const POSSIBLE_MARKER: char = '🔹';

pub const UNKNOWN_FIRST_NAME: &str = "(first name unknown)";
pub const UNKNOWN_LAST_NAME: &str = "(last name unknown)";
pub const UNKNOWN_DATE: &str = "(date unknown)";

pub const NO_DUPLICATES_MESSAGE: &str = "✅ No obvious duplicates found.";
pub const FOUND_HEADING: &str = "🔎 Potential duplicates found:";

pub const PROBABLE_TEXT: &str = "Probable duplicate (same parents)";
pub const POSSIBLE_TEXT: &str = "Possible duplicate (different or unknown parents)";

/// Canonical, geometry-independent report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportDocument {
    lines: Vec<String>,
}

impl ReportDocument {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Single-line document, used for status and failure messages
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            lines: vec![text.into()],
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines joined with `\n`
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Build the canonical report for an analysis result
pub fn format_report(result: &AnalysisResult) -> ReportDocument {
    match result {
        AnalysisResult::Empty => ReportDocument::message(NO_DUPLICATES_MESSAGE),
        AnalysisResult::Found(records) if records.is_empty() => {
            ReportDocument::message(NO_DUPLICATES_MESSAGE)
        }
        AnalysisResult::Found(records) => {
            let mut lines = Vec::with_capacity(2 + records.len() * 4);
            lines.push(FOUND_HEADING.to_string());
            lines.push(String::new());
            for record in records {
                push_record(&mut lines, record);
            }
            ReportDocument::new(lines)
        }
        AnalysisResult::Failure(failure) => ReportDocument::message(format!("⚠️ {}", failure)),
    }
}

fn push_record(lines: &mut Vec<String>, record: &CandidateDuplicate) {
    let first = record.first_name.as_deref().unwrap_or(UNKNOWN_FIRST_NAME);
    let last = record.last_name.as_deref().unwrap_or(UNKNOWN_LAST_NAME);
    let born = record.birth_date.as_deref().unwrap_or(UNKNOWN_DATE);

    lines.push(format!("- {} {}, born {}", first, last, born));
    lines.push(format!("  {}", classification(record.same_parents)));
    lines.push(format!("  (records {} and {})", record.a_id, record.b_id));
    lines.push(String::new());
}

/// Classification line body, marker included
pub fn classification(same_parents: bool) -> String {
    if same_parents {
        format!("{} {}", PROBABLE_MARKER, PROBABLE_TEXT)
    } else {
        format!("{} {}", POSSIBLE_MARKER, POSSIBLE_TEXT)
    }
}
