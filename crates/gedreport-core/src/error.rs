use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Invalid page geometry: {0}")]
    InvalidGeometry(String),

    #[error("PDF serialization failed: {0}")]
    Pdf(String),
}

/// Why an upload did not produce a duplicate list.
///
/// The `Display` text is the message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadFailure {
    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("Server error ({status}).")]
    Server { status: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Transport,
    PayloadTooLarge,
    Server,
}

impl UploadFailure {
    pub fn kind(&self) -> FailureKind {
        match self {
            UploadFailure::Transport(_) => FailureKind::Transport,
            UploadFailure::PayloadTooLarge(_) => FailureKind::PayloadTooLarge,
            UploadFailure::Server { .. } => FailureKind::Server,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Raised by a transport when no HTTP reply could be obtained at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Network error: {0}")]
pub struct TransportError(pub String);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Please choose a .ged file first.")]
    NoFileSelected,

    #[error("An analysis is already in progress")]
    AlreadySubmitting,

    #[error("No analysis is in progress")]
    NotSubmitting,

    /// The selected file no longer passes intake; carries the intake message
    #[error("{0}")]
    Rejected(String),
}
