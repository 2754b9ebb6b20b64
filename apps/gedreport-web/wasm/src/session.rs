//! Stateful report session for the browser
//!
//! Holds the selected file, the submission state and the last report in
//! Rust. JavaScript forwards DOM events (picker change, drop, submit, button
//! clicks) and renders the strings it gets back.
//!
//! Every method takes `&self` and borrows the state only for the duration of
//! the call, so getters keep working while `submit()` awaits the service.

use crate::local_now;
use crate::print_window::open_print_window;
use crate::transport::{BrowserFile, FetchTransport};
use gedreport_core::upload::{submit, Transport, DEFAULT_ENDPOINT};
use gedreport_core::{
    export_filename, export_pdf, render_printable, AnalysisResult, FileHandle, FileSource,
    IntakeLimits, PageGeometry, ReportDocument, SessionError, SubmissionSession, UploadFailure,
    ValidationOutcome,
};
use std::cell::RefCell;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct GedReportSession {
    inner: RefCell<SubmissionSession>,
    /// The accepted file, dropped together with the selection
    selected: RefCell<Option<BrowserFile>>,
    endpoint: String,
    geometry: RefCell<PageGeometry>,
}

impl Default for GedReportSession {
    fn default() -> Self {
        Self {
            inner: RefCell::new(SubmissionSession::default()),
            selected: RefCell::new(None),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            geometry: RefCell::new(PageGeometry::default()),
        }
    }
}

#[wasm_bindgen]
impl GedReportSession {
    /// Create a session posting to `endpoint` (defaults to `/check-duplicates`)
    #[wasm_bindgen(constructor)]
    pub fn new(endpoint: Option<String>, max_bytes: Option<f64>) -> Self {
        let limits = max_bytes
            .filter(|b| b.is_finite() && *b > 0.0)
            .map(|b| IntakeLimits {
                max_bytes: b as u64,
            })
            .unwrap_or_default();

        Self {
            inner: RefCell::new(SubmissionSession::new(limits)),
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            ..Self::default()
        }
    }

    /// Replace the PDF page geometry; missing keys keep their defaults
    #[wasm_bindgen(js_name = setGeometry)]
    pub fn set_geometry(&self, geometry: JsValue) -> Result<(), JsValue> {
        let geometry: PageGeometry = serde_wasm_bindgen::from_value(geometry)
            .map_err(|e| JsValue::from_str(&format!("Invalid geometry: {}", e)))?;
        geometry
            .validate()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        *self.geometry.borrow_mut() = geometry;
        Ok(())
    }

    /// Select a `File` from the picker or a drop
    ///
    /// Only the name and size are inspected; the contents are not read.
    /// Returns the validation outcome as `{status, reason?, message?, display_size_mb?}`
    #[wasm_bindgen(js_name = selectFile)]
    pub fn select_file(&self, file: web_sys::File, from_drop: bool) -> Result<JsValue, JsValue> {
        let file = BrowserFile::new(file);
        let outcome = self
            .select_file_internal(file.handle(), from_drop)
            .map_err(|e| JsValue::from_str(&e))?;
        if outcome.is_accepted() {
            *self.selected.borrow_mut() = Some(file);
        }

        serde_wasm_bindgen::to_value(&outcome)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    #[wasm_bindgen(js_name = clearSelection)]
    pub fn clear_selection(&self) -> Result<(), JsValue> {
        self.inner
            .borrow_mut()
            .clear()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        *self.selected.borrow_mut() = None;
        Ok(())
    }

    /// Upload the selected file and return the report text
    ///
    /// Failures are part of the report text; only misuse (no file, a
    /// submission already running) rejects the promise.
    pub async fn submit(&self) -> Result<String, JsValue> {
        let file = self.selected.borrow().clone();
        self.begin_submit_internal()
            .map_err(|e| JsValue::from_str(&e))?;

        let Some(file) = file else {
            let failure =
                UploadFailure::Transport("The selected file is no longer available".into());
            return self
                .finish(AnalysisResult::Failure(failure))
                .map_err(|e| JsValue::from_str(&e.to_string()));
        };

        let text = run_submission(&self.inner, &FetchTransport, &self.endpoint, &file)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        if let Some(failure) = self.inner.borrow().result().and_then(AnalysisResult::failure) {
            web_sys::console::warn_1(&format!("Analysis failed: {}", failure).into());
        }
        Ok(text)
    }

    #[wasm_bindgen(getter, js_name = fileLabel)]
    pub fn file_label(&self) -> String {
        self.inner.borrow().file_label()
    }

    #[wasm_bindgen(getter, js_name = statusText)]
    pub fn status_text(&self) -> String {
        self.inner.borrow().status_text()
    }

    #[wasm_bindgen(getter, js_name = isSubmitting)]
    pub fn is_submitting(&self) -> bool {
        self.inner.borrow().is_submitting()
    }

    /// Whether the print and PDF actions should be shown
    #[wasm_bindgen(js_name = canExport)]
    pub fn can_export(&self) -> bool {
        self.inner.borrow().can_export()
    }

    /// Render the current report as PDF bytes
    #[wasm_bindgen(js_name = exportPdf)]
    pub fn export_pdf(&self) -> Result<js_sys::Uint8Array, JsValue> {
        let bytes = self.export_pdf_internal().map_err(|e| JsValue::from_str(&e))?;

        let array = js_sys::Uint8Array::new_with_length(bytes.len() as u32);
        array.copy_from(&bytes);
        Ok(array)
    }

    /// Suggested download name for `exportPdf`, stamped with the local time
    #[wasm_bindgen(js_name = exportFilename)]
    pub fn export_filename(&self) -> String {
        export_filename(local_now())
    }

    /// Build the printable page for the current report
    #[wasm_bindgen(js_name = printableHtml)]
    pub fn printable_html(&self) -> Result<String, JsValue> {
        let report = self.current_report().map_err(|e| JsValue::from_str(&e))?;
        Ok(render_printable(&report, local_now()).html)
    }

    /// Open a print window with the current report and start printing
    #[wasm_bindgen(js_name = printReport)]
    pub fn print_report(&self) -> Result<(), JsValue> {
        let report = self.current_report().map_err(|e| JsValue::from_str(&e))?;
        open_print_window(&render_printable(&report, local_now()))
    }
}

// Internal methods, testable without JsValue
impl GedReportSession {
    fn select_file_internal(
        &self,
        file: FileHandle,
        from_drop: bool,
    ) -> Result<ValidationOutcome, String> {
        let source = if from_drop {
            FileSource::Drop
        } else {
            FileSource::Picker
        };

        let outcome = self
            .inner
            .borrow_mut()
            .select(file, source)
            .map_err(|e| e.to_string())?;

        // Accepted or not, the previous file is gone
        *self.selected.borrow_mut() = None;
        Ok(outcome)
    }

    fn begin_submit_internal(&self) -> Result<FileHandle, String> {
        let started = self.inner.borrow_mut().begin_submit();
        if let Err(SessionError::Rejected(_)) = &started {
            *self.selected.borrow_mut() = None;
        }
        started.map_err(|e| e.to_string())
    }

    fn finish(&self, result: AnalysisResult) -> Result<String, SessionError> {
        let mut inner = self.inner.borrow_mut();
        inner.resolve(result)?;
        Ok(inner.status_text())
    }

    fn current_report(&self) -> Result<ReportDocument, String> {
        self.inner
            .borrow()
            .report()
            .ok_or_else(|| "No report available yet".to_string())
    }

    fn export_pdf_internal(&self) -> Result<Vec<u8>, String> {
        let report = self.current_report()?;
        export_pdf(&report, &self.geometry.borrow()).map_err(|e| e.to_string())
    }
}

/// Await the upload, then record its outcome
///
/// No borrow of the session is held across the await.
async fn run_submission<T>(
    session: &RefCell<SubmissionSession>,
    transport: &T,
    endpoint: &str,
    file: &T::Body,
) -> Result<String, SessionError>
where
    T: Transport + ?Sized,
{
    let result = submit(transport, endpoint, file).await;
    let mut session = session.borrow_mut();
    session.resolve(result)?;
    Ok(session.status_text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use gedreport_core::session::IN_PROGRESS_LABEL;
    use gedreport_core::upload::{HttpReply, UploadFile};
    use gedreport_core::{RejectReason, TransportError};

    fn ged(size: u64) -> FileHandle {
        FileHandle::new("tree.ged", size)
    }

    /// Reads the session's public getters while the request is in flight
    struct ObservingTransport<'a> {
        session: &'a GedReportSession,
        seen: RefCell<Vec<(String, bool, Result<FileHandle, String>)>>,
    }

    #[async_trait(?Send)]
    impl<'a> Transport for ObservingTransport<'a> {
        type Body = UploadFile;

        async fn post_file(
            &self,
            _endpoint: &str,
            _field: &str,
            _file: &UploadFile,
        ) -> Result<HttpReply, TransportError> {
            self.seen.borrow_mut().push((
                self.session.status_text(),
                self.session.is_submitting(),
                self.session.begin_submit_internal(),
            ));
            Ok(HttpReply::new(200, "[]"))
        }
    }

    #[test]
    fn test_rejected_drop_discards_selection() {
        let session = GedReportSession::default();
        session.select_file_internal(ged(6), false).unwrap();

        let outcome = session
            .select_file_internal(FileHandle::new("photo.png", 4), true)
            .unwrap();
        assert_eq!(outcome.reason(), Some(RejectReason::UnsupportedExtension));
        assert!(session.selected.borrow().is_none());
        assert!(session.begin_submit_internal().is_err());
    }

    #[test]
    fn test_oversized_file_rejected_from_metadata_alone() {
        let session = GedReportSession::default();
        let outcome = session
            .select_file_internal(ged(8 * 1024 * 1024 * 1024), false)
            .unwrap();
        assert_eq!(outcome.reason(), Some(RejectReason::TooLarge));
        assert!(session.file_label().contains("File too large (8192.0 MB)"));
    }

    #[test]
    fn test_begin_submit_hands_back_selected_file() {
        let session = GedReportSession::default();
        session.select_file_internal(ged(13), true).unwrap();

        let file = session.begin_submit_internal().unwrap();
        assert_eq!(file, ged(13));
        assert_eq!(
            session.begin_submit_internal().unwrap_err(),
            "An analysis is already in progress"
        );
    }

    #[tokio::test]
    async fn test_status_readable_while_request_pending() {
        let session = GedReportSession::default();
        session.select_file_internal(ged(6), false).unwrap();
        session.begin_submit_internal().unwrap();

        let transport = ObservingTransport {
            session: &session,
            seen: RefCell::new(Vec::new()),
        };
        let upload = UploadFile::new("tree.ged", b"0 HEAD".to_vec());
        let text = run_submission(&session.inner, &transport, DEFAULT_ENDPOINT, &upload)
            .await
            .unwrap();

        let seen = transport.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, IN_PROGRESS_LABEL);
        assert!(seen[0].1);
        assert_eq!(
            seen[0].2,
            Err("An analysis is already in progress".to_string())
        );

        assert_eq!(text, "✅ No obvious duplicates found.");
        assert!(!session.is_submitting());
    }

    #[test]
    fn test_missing_file_data_resolves_instead_of_hanging() {
        let session = GedReportSession::default();
        session.select_file_internal(ged(6), false).unwrap();
        session.begin_submit_internal().unwrap();

        let failure = UploadFailure::Transport("gone".into());
        session.finish(AnalysisResult::Failure(failure)).unwrap();
        assert!(!session.is_submitting());
        assert_eq!(session.status_text(), "⚠️ gone");
    }

    #[test]
    fn test_export_requires_resolved_report() {
        let session = GedReportSession::default();
        assert!(session.export_pdf_internal().is_err());

        session.select_file_internal(ged(6), false).unwrap();
        session.begin_submit_internal().unwrap();
        session.finish(AnalysisResult::Empty).unwrap();

        let pdf = session.export_pdf_internal().unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }
}
