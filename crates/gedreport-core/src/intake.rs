//! File intake validation
//!
//! Checks a selected file against the size ceiling and, for drag and drop,
//! the GEDCOM extension. Pure: nothing here touches the file contents.

use crate::model::{FileHandle, FileSource};
use serde::{Deserialize, Serialize};

/// Default upload ceiling: 100 MB
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Extension expected on dropped files (compared case-insensitively)
pub const GEDCOM_EXTENSION: &str = ".ged";

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeLimits {
    pub max_bytes: u64,
}

impl Default for IntakeLimits {
    fn default() -> Self {
        Self {
            max_bytes: MAX_FILE_SIZE,
        }
    }
}

impl IntakeLimits {
    /// Limit as shown to the user ("100" rather than "100.0")
    pub fn display_limit_mb(&self) -> String {
        let mb = self.max_bytes as f64 / BYTES_PER_MB;
        if mb.fract() == 0.0 {
            format!("{}", mb as u64)
        } else {
            format!("{:.1}", mb)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    TooLarge,
    UnsupportedExtension,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ValidationOutcome {
    Accepted,
    Rejected {
        reason: RejectReason,
        message: String,
        /// File size in MB, one decimal; only set for `TooLarge`
        display_size_mb: Option<f64>,
    },
}

impl ValidationOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationOutcome::Accepted)
    }

    pub fn reason(&self) -> Option<RejectReason> {
        match self {
            ValidationOutcome::Accepted => None,
            ValidationOutcome::Rejected { reason, .. } => Some(*reason),
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ValidationOutcome::Accepted => None,
            ValidationOutcome::Rejected { message, .. } => Some(message),
        }
    }
}

/// Validate a selected file
///
/// Dropped files must carry the `.ged` extension; that check runs before the
/// size check. Picker selections are only size-checked.
pub fn validate(file: &FileHandle, source: FileSource, limits: &IntakeLimits) -> ValidationOutcome {
    if source == FileSource::Drop && !has_gedcom_extension(&file.name) {
        return ValidationOutcome::Rejected {
            reason: RejectReason::UnsupportedExtension,
            message: format!("Unrecognized format (expected {})", GEDCOM_EXTENSION),
            display_size_mb: None,
        };
    }

    if file.size_bytes > limits.max_bytes {
        let size_mb = size_in_mb(file.size_bytes);
        return ValidationOutcome::Rejected {
            reason: RejectReason::TooLarge,
            message: format!(
                "File too large ({:.1} MB). Maximum: {} MB",
                size_mb,
                limits.display_limit_mb()
            ),
            display_size_mb: Some(size_mb),
        };
    }

    ValidationOutcome::Accepted
}

pub fn has_gedcom_extension(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(GEDCOM_EXTENSION)
}

/// Binary megabytes rounded to one decimal
pub fn size_in_mb(size_bytes: u64) -> f64 {
    (size_bytes as f64 / BYTES_PER_MB * 10.0).round() / 10.0
}

/// Format bytes as human-readable string
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    }
}
