//! Text normalization applied before PDF export
//!
//! GEDCOM data often reaches the browser as UTF-8 that was decoded as
//! Latin-1 somewhere upstream ("JosÃ©" for "José"). Such text is repaired
//! when it round-trips cleanly; anything else passes through unchanged.
//! The result is always NFC.

use crate::report::{POSSIBLE_MARKER, PROBABLE_MARKER};
use unicode_normalization::UnicodeNormalization;

pub const PROBABLE_LABEL: &str = "[probable duplicate]";
pub const POSSIBLE_LABEL: &str = "[possible duplicate]";

/// Undo a UTF-8 → Latin-1 mis-decoding when the input looks like one
pub fn repair_encoding(text: &str) -> String {
    let looks_misdecoded =
        text.chars().all(|c| (c as u32) <= 0xFF) && text.chars().any(|c| (c as u32) >= 0x80);

    let repaired = if looks_misdecoded {
        let bytes: Vec<u8> = text.chars().map(|c| c as u32 as u8).collect();
        String::from_utf8(bytes).ok()
    } else {
        None
    };

    repaired.as_deref().unwrap_or(text).nfc().collect()
}

/// Swap the classification glyphs for their bracketed text labels
pub fn substitute_markers(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            PROBABLE_MARKER => out.push_str(PROBABLE_LABEL),
            POSSIBLE_MARKER => out.push_str(POSSIBLE_LABEL),
            other => out.push(other),
        }
    }
    out
}

/// Full pre-export pass: encoding repair, NFC, marker labels
pub fn normalize_for_export(text: &str) -> String {
    substitute_markers(&repair_encoding(text))
}
