//! Hand a printable view to the browser's print dialog

use gedreport_core::PrintableView;
use wasm_bindgen::prelude::*;

const PRINT_WINDOW_FEATURES: &str = "width=800,height=600";

/// Open a blank window, write the view into it and call `print()`
pub fn open_print_window(view: &PrintableView) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    let popup = window
        .open_with_url_and_target_and_features("", "_blank", PRINT_WINDOW_FEATURES)?
        .ok_or_else(|| JsValue::from_str("Print window was blocked"))?;

    let document = popup
        .document()
        .ok_or_else(|| JsValue::from_str("Print window has no document"))?;
    let root = document
        .document_element()
        .ok_or_else(|| JsValue::from_str("Print window has no root element"))?;
    root.set_inner_html(&view.html);
    document.set_title(&view.title);

    popup.focus()?;
    popup.print()
}
