//! Upload coordinator
//!
//! Sends the selected file to the duplicate-detection service and maps the
//! reply onto an [`AnalysisResult`]. The HTTP layer sits behind the
//! [`Transport`] trait so the browser (fetch) and the CLI (reqwest) share
//! the same reply handling.

use crate::error::{TransportError, UploadFailure};
use crate::model::{AnalysisResult, CandidateDuplicate, FileHandle};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

/// Path of the analysis endpoint on the service
pub const DEFAULT_ENDPOINT: &str = "/check-duplicates";

/// Multipart field carrying the file
pub const UPLOAD_FIELD: &str = "file";

pub const DEFAULT_TOO_LARGE_MESSAGE: &str = "The file is too large. Maximum: 100 MB";

/// File contents ready to be posted
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn handle(&self) -> FileHandle {
        FileHandle::new(self.name.clone(), self.bytes.len() as u64)
    }
}

/// A file a transport knows how to post
///
/// In-memory bytes for the CLI, a browser `File` handle on the web so the
/// contents never have to be copied into wasm memory.
pub trait UploadBody {
    fn file_name(&self) -> &str;
    fn size_bytes(&self) -> u64;
}

impl UploadBody for UploadFile {
    fn file_name(&self) -> &str {
        &self.name
    }

    fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Status and raw body of the service reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Posts a single-part multipart body and returns whatever the server replied
///
/// Browser futures are not `Send`, hence `?Send`.
#[async_trait(?Send)]
pub trait Transport {
    type Body: UploadBody + ?Sized;

    async fn post_file(
        &self,
        endpoint: &str,
        field: &str,
        file: &Self::Body,
    ) -> Result<HttpReply, TransportError>;
}

/// Submit one file and interpret the reply
///
/// Exactly one request is issued; there is no retry and no queuing.
#[instrument(skip(transport, file), fields(file = %file.file_name(), size = file.size_bytes()))]
pub async fn submit<T>(transport: &T, endpoint: &str, file: &T::Body) -> AnalysisResult
where
    T: Transport + ?Sized,
{
    match transport.post_file(endpoint, UPLOAD_FIELD, file).await {
        Ok(reply) => {
            debug!(status = reply.status, bytes = reply.body.len(), "reply received");
            interpret_reply(&reply)
        }
        Err(e) => {
            warn!(error = %e, "upload failed before a reply was received");
            AnalysisResult::Failure(UploadFailure::Transport(e.to_string()))
        }
    }
}

/// Map a raw service reply onto an analysis result
pub fn interpret_reply(reply: &HttpReply) -> AnalysisResult {
    if reply.status == 413 {
        let message = detail_message(&reply.body)
            .unwrap_or_else(|| DEFAULT_TOO_LARGE_MESSAGE.to_string());
        return AnalysisResult::Failure(UploadFailure::PayloadTooLarge(message));
    }

    if !reply.is_success() {
        return AnalysisResult::Failure(UploadFailure::Server {
            status: reply.status,
        });
    }

    let value: Value = match serde_json::from_slice(&reply.body) {
        Ok(value) => value,
        Err(e) => {
            return AnalysisResult::Failure(UploadFailure::Transport(format!(
                "Malformed response body: {}",
                e
            )))
        }
    };

    match value {
        Value::Array(items) => {
            let records: Result<Vec<CandidateDuplicate>, _> =
                items.into_iter().map(serde_json::from_value).collect();
            match records {
                Ok(records) => {
                    info!(count = records.len(), "duplicate candidates received");
                    AnalysisResult::from_records(records)
                }
                Err(e) => AnalysisResult::Failure(UploadFailure::Transport(format!(
                    "Malformed response body: {}",
                    e
                ))),
            }
        }
        other => {
            // Kept lenient: a non-list success body reads as "nothing found".
            warn!(body = %other, "success reply is not a list; treating as no duplicates");
            AnalysisResult::Empty
        }
    }
}

/// `detail` string of an error body, if any
fn detail_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value
        .get("detail")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use std::cell::RefCell;

    struct MockTransport {
        reply: Result<HttpReply, TransportError>,
        calls: RefCell<Vec<(String, String, String)>>,
    }

    impl MockTransport {
        fn replying(status: u16, body: &str) -> Self {
            Self {
                reply: Ok(HttpReply::new(status, body.as_bytes())),
                calls: RefCell::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(TransportError(message.to_string())),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl Transport for MockTransport {
        type Body = UploadFile;

        async fn post_file(
            &self,
            endpoint: &str,
            field: &str,
            file: &UploadFile,
        ) -> Result<HttpReply, TransportError> {
            self.calls.borrow_mut().push((
                endpoint.to_string(),
                field.to_string(),
                file.name.clone(),
            ));
            self.reply.clone()
        }
    }

    fn ged() -> UploadFile {
        UploadFile::new("tree.ged", b"0 HEAD\n0 TRLR\n".to_vec())
    }

    #[tokio::test]
    async fn test_submit_posts_once_under_file_field() {
        let transport = MockTransport::replying(200, "[]");
        let result = submit(&transport, DEFAULT_ENDPOINT, &ged()).await;

        assert_eq!(result, AnalysisResult::Empty);
        let calls = transport.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0],
            (
                DEFAULT_ENDPOINT.to_string(),
                UPLOAD_FIELD.to_string(),
                "tree.ged".to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_submit_maps_transport_error() {
        let transport = MockTransport::failing("connection refused");
        let result = submit(&transport, DEFAULT_ENDPOINT, &ged()).await;
        let failure = result.failure().unwrap();
        assert_eq!(failure.kind(), FailureKind::Transport);
        assert_eq!(failure.message(), "Network error: connection refused");
    }

    #[tokio::test]
    async fn test_submit_preserves_record_order() {
        let body = r#"[
            {"first_name":"B","a_id":"I2","b_id":"I3","same_parents":false},
            {"first_name":"A","a_id":"I1","b_id":"I4","same_parents":true}
        ]"#;
        let transport = MockTransport::replying(200, body);
        match submit(&transport, DEFAULT_ENDPOINT, &ged()).await {
            AnalysisResult::Found(records) => {
                let ids: Vec<_> = records.iter().map(|r| r.a_id.as_str()).collect();
                assert_eq!(ids, vec!["I2", "I1"]);
            }
            other => panic!("expected records, got {:?}", other),
        }
    }

    #[test]
    fn test_413_uses_detail() {
        let result = interpret_reply(&HttpReply::new(413, r#"{"detail":"file too big"}"#));
        assert_eq!(
            result,
            AnalysisResult::Failure(UploadFailure::PayloadTooLarge("file too big".into()))
        );
    }

    #[test]
    fn test_413_without_detail_uses_default() {
        let result = interpret_reply(&HttpReply::new(413, "<html>Request Entity Too Large</html>"));
        assert_eq!(
            result,
            AnalysisResult::Failure(UploadFailure::PayloadTooLarge(
                DEFAULT_TOO_LARGE_MESSAGE.into()
            ))
        );
    }

    #[test]
    fn test_other_status_is_server_failure() {
        let result = interpret_reply(&HttpReply::new(500, r#"{"detail":"boom"}"#));
        let failure = result.failure().unwrap();
        assert_eq!(failure, &UploadFailure::Server { status: 500 });
        assert_eq!(failure.message(), "Server error (500).");
    }

    #[test]
    fn test_malformed_success_body_is_transport_failure() {
        let result = interpret_reply(&HttpReply::new(200, "not json"));
        assert_eq!(result.failure().map(|f| f.kind()), Some(FailureKind::Transport));
    }

    #[test]
    fn test_malformed_record_is_transport_failure() {
        let result = interpret_reply(&HttpReply::new(200, r#"[{"first_name":"x"}]"#));
        assert_eq!(result.failure().map(|f| f.kind()), Some(FailureKind::Transport));
    }

    #[test]
    fn test_non_list_success_body_reads_as_empty() {
        let result = interpret_reply(&HttpReply::new(200, r#"{"status":"ok"}"#));
        assert_eq!(result, AnalysisResult::Empty);
    }
}
