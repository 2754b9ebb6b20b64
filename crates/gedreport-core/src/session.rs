//! Submission session
//!
//! Explicit state for one intake-and-report cycle. Front-ends feed user
//! events (select, clear, submit, reply) into the session instead of
//! sharing mutable UI state between handlers.
//!
//! ```text
//! Idle ──select ok──▶ FileSelected ──begin_submit──▶ Submitting ──resolve──▶ Resolved
//!  ▲  ◀──select rejected / clear──┘                                            │
//!  └──────────────────────────────── select / clear ◀──────────────────────────┘
//! ```

use crate::error::SessionError;
use crate::intake::{validate, IntakeLimits, ValidationOutcome};
use crate::model::{AnalysisResult, FileHandle, FileSource};
use crate::report::{format_report, ReportDocument};
use tracing::debug;

pub const NO_FILE_LABEL: &str = "No file chosen";
pub const IN_PROGRESS_LABEL: &str = "Analysis in progress...";

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    FileSelected(FileHandle),
    Submitting(FileHandle),
    Resolved(AnalysisResult),
}

#[derive(Debug, Clone)]
pub struct SubmissionSession {
    state: SessionState,
    limits: IntakeLimits,
    last_rejection: Option<String>,
}

impl Default for SubmissionSession {
    fn default() -> Self {
        Self::new(IntakeLimits::default())
    }
}

impl SubmissionSession {
    pub fn new(limits: IntakeLimits) -> Self {
        Self {
            state: SessionState::Idle,
            limits,
            last_rejection: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn limits(&self) -> &IntakeLimits {
        &self.limits
    }

    /// Change the intake limits; an existing selection is re-checked on submit
    pub fn set_limits(&mut self, limits: IntakeLimits) {
        self.limits = limits;
    }

    pub fn selected_file(&self) -> Option<&FileHandle> {
        match &self.state {
            SessionState::FileSelected(file) | SessionState::Submitting(file) => Some(file),
            _ => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, SessionState::Submitting(_))
    }

    /// Validate and select a file
    ///
    /// A rejected file clears any previous selection so it can never be
    /// submitted later.
    pub fn select(
        &mut self,
        file: FileHandle,
        source: FileSource,
    ) -> Result<ValidationOutcome, SessionError> {
        if self.is_submitting() {
            return Err(SessionError::AlreadySubmitting);
        }

        let outcome = validate(&file, source, &self.limits);
        match &outcome {
            ValidationOutcome::Accepted => {
                debug!(file = %file.name, size = file.size_bytes, "file selected");
                self.last_rejection = None;
                self.state = SessionState::FileSelected(file);
            }
            ValidationOutcome::Rejected { message, .. } => {
                debug!(file = %file.name, reason = %message, "file rejected");
                self.last_rejection = Some(message.clone());
                self.state = SessionState::Idle;
            }
        }
        Ok(outcome)
    }

    pub fn clear(&mut self) -> Result<(), SessionError> {
        if self.is_submitting() {
            return Err(SessionError::AlreadySubmitting);
        }
        self.state = SessionState::Idle;
        self.last_rejection = None;
        Ok(())
    }

    /// Move to `Submitting` and hand back the file to upload
    ///
    /// The size limit is re-checked here; a file that fails it is dropped.
    pub fn begin_submit(&mut self) -> Result<FileHandle, SessionError> {
        let file = match &self.state {
            SessionState::Submitting(_) => return Err(SessionError::AlreadySubmitting),
            SessionState::FileSelected(file) => file.clone(),
            _ => return Err(SessionError::NoFileSelected),
        };

        if let ValidationOutcome::Rejected { message, .. } =
            validate(&file, FileSource::Picker, &self.limits)
        {
            self.last_rejection = Some(message.clone());
            self.state = SessionState::Idle;
            return Err(SessionError::Rejected(message));
        }

        self.state = SessionState::Submitting(file.clone());
        Ok(file)
    }

    /// Record the service outcome
    pub fn resolve(&mut self, result: AnalysisResult) -> Result<(), SessionError> {
        if !self.is_submitting() {
            return Err(SessionError::NotSubmitting);
        }
        self.state = SessionState::Resolved(result);
        Ok(())
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.state {
            SessionState::Resolved(result) => Some(result),
            _ => None,
        }
    }

    pub fn report(&self) -> Option<ReportDocument> {
        self.result().map(format_report)
    }

    /// Print and PDF actions only make sense once duplicates were found
    pub fn can_export(&self) -> bool {
        self.result().is_some_and(AnalysisResult::is_found)
    }

    /// Label for the file picker area
    pub fn file_label(&self) -> String {
        match (&self.state, &self.last_rejection) {
            (_, Some(rejection)) => format!("❌ {}", rejection),
            (SessionState::FileSelected(file), None) | (SessionState::Submitting(file), None) => {
                file.name.clone()
            }
            _ => NO_FILE_LABEL.to_string(),
        }
    }

    /// Text for the result area
    pub fn status_text(&self) -> String {
        match &self.state {
            SessionState::Submitting(_) => IN_PROGRESS_LABEL.to_string(),
            SessionState::Resolved(result) => format_report(result).text(),
            _ => match &self.last_rejection {
                Some(rejection) => format!("⚠️ {}", rejection),
                None => String::new(),
            },
        }
    }
}
