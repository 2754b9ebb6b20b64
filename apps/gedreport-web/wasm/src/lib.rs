//! WASM bindings for the genealogy duplicate report
//!
//! All state lives in Rust behind `GedReportSession`; JavaScript only wires
//! DOM events to session calls and handles downloads.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { GedReportSession } from './pkg/gedreport_wasm.js';
//!
//! await init();
//!
//! const session = new GedReportSession();
//! // `file` comes straight from the input or the drop event; it is not read
//! const outcome = session.selectFile(file, /* fromDrop */ true);
//! label.textContent = session.fileLabel;
//!
//! const pending = session.submit();
//! result.textContent = session.statusText; // "Analysis in progress..."
//! submitButton.disabled = session.isSubmitting;
//! result.textContent = await pending;
//! submitButton.disabled = false;
//!
//! if (session.canExport()) {
//!   downloadBlob(session.exportPdf(), session.exportFilename());
//!   session.printReport();
//! }
//! ```

pub mod print_window;
pub mod session;
pub mod transport;

use chrono::{NaiveDate, NaiveDateTime};
use gedreport_core::{FileHandle, FileSource, IntakeLimits};
use wasm_bindgen::prelude::*;

pub use session::GedReportSession;
pub use transport::FetchTransport;

/// Initialize the WASM module
/// Called automatically by wasm-bindgen
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Get the library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Validate a file without creating a session
/// Returns the outcome as `{status, reason?, message?, display_size_mb?}`
#[wasm_bindgen(js_name = validateFile)]
pub fn validate_file(name: &str, size_bytes: f64, from_drop: bool) -> Result<JsValue, JsValue> {
    let source = if from_drop {
        FileSource::Drop
    } else {
        FileSource::Picker
    };
    let outcome = gedreport_core::validate(
        &FileHandle::new(name, size_bytes.max(0.0) as u64),
        source,
        &IntakeLimits::default(),
    );

    serde_wasm_bindgen::to_value(&outcome)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Format bytes as human-readable string
#[wasm_bindgen]
pub fn format_bytes(bytes: f64) -> String {
    gedreport_core::format_bytes(bytes.max(0.0) as u64)
}

/// Current local wall-clock time from the browser
pub(crate) fn local_now() -> NaiveDateTime {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
    .and_then(|date| date.and_hms_opt(now.get_hours(), now.get_minutes(), now.get_seconds()))
    .unwrap_or_default()
}
