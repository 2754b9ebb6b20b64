//! Browser tests, run with `wasm-pack test --headless --chrome`

#![cfg(target_arch = "wasm32")]

use gedreport_wasm::GedReportSession;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn file(contents: &str, name: &str) -> web_sys::File {
    let parts = js_sys::Array::of1(&JsValue::from_str(contents));
    web_sys::File::new_with_str_sequence(&parts, name).expect("File constructor")
}

#[wasm_bindgen_test]
fn test_new_session_starts_empty() {
    let session = GedReportSession::new(None, None);
    assert_eq!(session.file_label(), "No file chosen");
    assert!(!session.is_submitting());
    assert!(!session.can_export());
}

#[wasm_bindgen_test]
fn test_dropped_text_file_is_rejected() {
    let session = GedReportSession::new(None, None);
    session
        .select_file(file("hello", "notes.txt"), true)
        .expect("selection should not throw");
    assert!(session.file_label().contains("expected .ged"));
}

#[wasm_bindgen_test]
fn test_file_size_read_from_handle() {
    let session = GedReportSession::new(None, Some(4.0));
    session
        .select_file(file("0 HEAD\n0 TRLR\n", "tree.ged"), false)
        .expect("selection should not throw");
    assert!(session.file_label().contains("File too large"));
}

#[wasm_bindgen_test]
fn test_export_filename_is_stamped() {
    let session = GedReportSession::new(None, None);
    let name = session.export_filename();
    assert!(name.starts_with("report_genealogique_"));
    assert!(name.ends_with(".pdf"));
}
