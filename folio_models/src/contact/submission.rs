use serde::{Deserialize, Serialize};

use super::{ContactMessageId, FieldErrors};

pub const SUBMISSION_SUCCESS_MESSAGE: &str = "Message sent successfully!";
pub const SUBMISSION_INVALID_MESSAGE: &str = "Invalid form data. Please check the details.";
pub const SUBMISSION_FAILED_MESSAGE: &str = "Failed to send message. Please try again later.";

/// Result of a single contact form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The message has been persisted.
    Success { contact_id: ContactMessageId },
    /// The form did not pass validation. Nothing has been stored.
    Rejected { errors: FieldErrors },
    /// The storage layer failed. Nothing has been stored.
    Failed { errors: FieldErrors },
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The fixed, user facing message for this outcome.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success { .. } => SUBMISSION_SUCCESS_MESSAGE,
            Self::Rejected { .. } => SUBMISSION_INVALID_MESSAGE,
            Self::Failed { .. } => SUBMISSION_FAILED_MESSAGE,
        }
    }

    pub fn errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Success { .. } => None,
            Self::Rejected { errors } | Self::Failed { errors } => Some(errors),
        }
    }
}

/// Result object exchanged between the submission endpoint and its callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<ContactMessageId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl From<SubmissionOutcome> for SubmissionResponse {
    fn from(value: SubmissionOutcome) -> Self {
        let message = value.message().into();
        match value {
            SubmissionOutcome::Success { contact_id } => Self {
                success: true,
                message,
                contact_id: Some(contact_id),
                errors: None,
            },
            SubmissionOutcome::Rejected { errors } | SubmissionOutcome::Failed { errors } => Self {
                success: false,
                message,
                contact_id: None,
                errors: Some(errors),
            },
        }
    }
}
