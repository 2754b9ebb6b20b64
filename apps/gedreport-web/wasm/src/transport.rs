//! Browser upload transport
//!
//! Posts the user's `File` as `multipart/form-data` through `window.fetch`.
//! The file is handed to `FormData` as a blob, so its contents are read by
//! the browser and never copied into wasm memory. The browser also sets the
//! multipart boundary itself.

use async_trait::async_trait;
use gedreport_core::upload::{HttpReply, Transport, UploadBody};
use gedreport_core::{FileHandle, TransportError};
use js_sys::Uint8Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, Response};

/// A file picked or dropped in the page, with its metadata read once
#[derive(Debug, Clone)]
pub struct BrowserFile {
    name: String,
    size_bytes: u64,
    file: File,
}

impl BrowserFile {
    pub fn new(file: File) -> Self {
        Self {
            name: file.name(),
            size_bytes: file.size().max(0.0) as u64,
            file,
        }
    }

    pub fn handle(&self) -> FileHandle {
        FileHandle::new(self.name.clone(), self.size_bytes)
    }
}

impl UploadBody for BrowserFile {
    fn file_name(&self) -> &str {
        &self.name
    }

    fn size_bytes(&self) -> u64 {
        self.size_bytes
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FetchTransport;

#[async_trait(?Send)]
impl Transport for FetchTransport {
    type Body = BrowserFile;

    async fn post_file(
        &self,
        endpoint: &str,
        field: &str,
        file: &BrowserFile,
    ) -> Result<HttpReply, TransportError> {
        post_multipart(endpoint, field, file)
            .await
            .map_err(|e| TransportError(describe_js_error(&e)))
    }
}

async fn post_multipart(
    endpoint: &str,
    field: &str,
    file: &BrowserFile,
) -> Result<HttpReply, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;

    let form = FormData::new()?;
    form.append_with_blob_and_filename(field, &file.file, &file.name)?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_body(&form);
    let request = Request::new_with_str_and_init(endpoint, &opts)?;

    let response = JsFuture::from(window.fetch_with_request(&request)).await?;
    let response: Response = response.dyn_into()?;

    let buffer = JsFuture::from(response.array_buffer()?).await?;
    let body = Uint8Array::new(&buffer).to_vec();

    Ok(HttpReply::new(response.status(), body))
}

/// Best-effort text for a rejected JS promise (TypeError, DOMException, string)
pub fn describe_js_error(error: &JsValue) -> String {
    if let Some(text) = error.as_string() {
        return text;
    }
    if let Some(err) = error.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{:?}", error)
}
