use chrono::{DateTime, Utc};

pub use self::{
    form::{ContactField, ContactFieldError, ContactForm, FieldErrors},
    submission::{
        SubmissionOutcome, SubmissionResponse, SUBMISSION_FAILED_MESSAGE,
        SUBMISSION_INVALID_MESSAGE, SUBMISSION_SUCCESS_MESSAGE,
    },
};
use crate::{
    email::EmailAddress,
    macros::{id, nutype_string},
};

mod form;
mod submission;

id!(
    /// Identifier assigned by the storage layer when a message is inserted.
    ContactMessageId(i64)
);

/// A contact message that passed validation and may be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub author: ContactMessageAuthor,
    pub subject: ContactMessageSubject,
    pub content: ContactMessageContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessageAuthor {
    pub name: ContactMessageAuthorName,
    pub email: EmailAddress,
}

/// A contact message as it was read back from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredContactMessage {
    pub id: ContactMessageId,
    pub message: ContactMessage,
    pub created_at: DateTime<Utc>,
}

nutype_string!(ContactMessageAuthorName(validate(
    len_char_min = 2,
    len_char_max = 100
)));

nutype_string!(ContactMessageSubject(validate(
    len_char_min = 3,
    len_char_max = 200
)));

nutype_string!(ContactMessageContent(validate(
    len_char_min = 10,
    len_char_max = 5000
)));

impl ContactMessageAuthorName {
    pub const MIN_LEN: usize = 2;
    pub const MAX_LEN: usize = 100;
}

impl ContactMessageSubject {
    pub const MIN_LEN: usize = 3;
    pub const MAX_LEN: usize = 200;
}

impl ContactMessageContent {
    pub const MIN_LEN: usize = 10;
    pub const MAX_LEN: usize = 5000;
}

/// Upper bound for the author's email address, matching the storage column.
pub const CONTACT_EMAIL_MAX_LEN: usize = 100;
