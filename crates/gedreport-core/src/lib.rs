//! Genealogy duplicate report pipeline
//!
//! Takes a GEDCOM file from selection to printable report:
//! - `intake`: size and extension checks on the selected file
//! - `upload`: one multipart POST to the duplicate-detection service
//! - `report`: canonical text report from the service reply
//! - `export` / `pdf`: word-wrapped, paginated PDF with a header on every page
//! - `print`: self-contained HTML for the host print dialog
//! - `session`: the state machine front-ends drive from user events
//!
//! Every stage after the upload is synchronous and pure.

pub mod error;
pub mod export;
pub mod geometry;
pub mod intake;
pub mod metrics;
pub mod model;
pub mod normalize;
pub mod pdf;
pub mod print;
pub mod report;
pub mod session;
pub mod upload;
pub mod wrap;

pub use error::{ExportError, FailureKind, SessionError, TransportError, UploadFailure};
pub use export::{export, export_with, Page, PaginatedDocument, PlacedLine, REPORT_TITLE};
pub use geometry::PageGeometry;
pub use intake::{format_bytes, validate, IntakeLimits, RejectReason, ValidationOutcome};
pub use metrics::{HelveticaMetrics, TextMeasure};
pub use model::{AnalysisResult, CandidateDuplicate, FileHandle, FileSource};
pub use pdf::{export_filename, export_pdf, render_pdf};
pub use print::{render_printable, PrintableView};
pub use report::{format_report, ReportDocument};
pub use session::{SessionState, SubmissionSession};
pub use upload::{interpret_reply, submit, HttpReply, Transport, UploadBody, UploadFile};
