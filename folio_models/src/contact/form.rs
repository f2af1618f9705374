use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{
    ContactMessage, ContactMessageAuthor, ContactMessageAuthorName,
    ContactMessageAuthorNameError, ContactMessageContent, ContactMessageContentError,
    ContactMessageSubject, ContactMessageSubjectError, CONTACT_EMAIL_MAX_LEN,
};
use crate::email::EmailAddress;

/// Raw contact form fields as submitted by a caller.
///
/// Nothing in here has been checked yet. Call [`ContactForm::validate`] to
/// turn it into a [`ContactMessage`]. Unknown fields are ignored during
/// deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Key of an entry in [`FieldErrors`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
    /// Errors that cannot be attributed to a single field.
    #[serde(rename = "_")]
    General,
}

impl std::fmt::Display for ContactField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Subject => "Subject",
            Self::Message => "Message",
            Self::General => "Form",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactFieldError {
    #[error("{0} is required")]
    Missing(ContactField),
    #[error("{field} must be at least {min} characters")]
    TooShort { field: ContactField, min: usize },
    #[error("{field} cannot exceed {max} characters")]
    TooLong { field: ContactField, max: usize },
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("{0} must not contain null characters")]
    NullCharacter(ContactField),
}

/// Human readable error messages grouped by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<ContactField, Vec<String>>);

impl FieldErrors {
    /// Create an error map with a single entry under the general key.
    pub fn general(message: impl Into<String>) -> Self {
        [(ContactField::General, message.into())]
            .into_iter()
            .collect()
    }

    pub fn push(&mut self, field: ContactField, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn get(&self, field: ContactField) -> &[String] {
        self.0.get(&field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContactField, &[String])> {
        self.0.iter().map(|(&field, messages)| (field, messages.as_slice()))
    }

    fn absorb<T>(
        &mut self,
        field: ContactField,
        result: Result<T, Vec<ContactFieldError>>,
    ) -> Option<T> {
        result
            .map_err(|errors| {
                for err in errors {
                    self.push(field, err.to_string());
                }
            })
            .ok()
    }
}

impl FromIterator<(ContactField, String)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (ContactField, String)>>(iter: I) -> Self {
        let mut out = Self::default();
        for (field, message) in iter {
            out.push(field, message);
        }
        out
    }
}

impl ContactForm {
    /// Check every field and return either the validated message or all
    /// violations at once.
    ///
    /// This function is pure. Callers may run it as a pre-flight check, but
    /// the submission handler always runs it again before touching storage.
    pub fn validate(&self) -> Result<ContactMessage, FieldErrors> {
        let mut errors = FieldErrors::default();

        let name = errors.absorb(ContactField::Name, validate_name(self.name.as_deref()));
        let email = errors.absorb(ContactField::Email, validate_email(self.email.as_deref()));
        let subject = errors.absorb(
            ContactField::Subject,
            validate_subject(self.subject.as_deref()),
        );
        let content = errors.absorb(
            ContactField::Message,
            validate_content(self.message.as_deref()),
        );

        match (name, email, subject, content) {
            (Some(name), Some(email), Some(subject), Some(content)) => Ok(ContactMessage {
                author: ContactMessageAuthor { name, email },
                subject,
                content,
            }),
            _ => Err(errors),
        }
    }
}

impl From<&ContactMessage> for ContactForm {
    fn from(value: &ContactMessage) -> Self {
        Self {
            name: Some((*value.author.name).clone()),
            email: Some(value.author.email.to_string()),
            subject: Some((*value.subject).clone()),
            message: Some((*value.content).clone()),
        }
    }
}

/// Text columns cannot store U+0000, so it is rejected up front.
fn required(field: ContactField, value: Option<&str>) -> Result<&str, Vec<ContactFieldError>> {
    let value = value.ok_or_else(|| vec![ContactFieldError::Missing(field)])?;
    if value.contains('\0') {
        return Err(vec![ContactFieldError::NullCharacter(field)]);
    }
    Ok(value)
}

fn validate_name(value: Option<&str>) -> Result<ContactMessageAuthorName, Vec<ContactFieldError>> {
    let field = ContactField::Name;
    ContactMessageAuthorName::try_new(required(field, value)?).map_err(|err| {
        vec![match err {
            ContactMessageAuthorNameError::LenCharMinViolated => ContactFieldError::TooShort {
                field,
                min: ContactMessageAuthorName::MIN_LEN,
            },
            ContactMessageAuthorNameError::LenCharMaxViolated => ContactFieldError::TooLong {
                field,
                max: ContactMessageAuthorName::MAX_LEN,
            },
        }]
    })
}

fn validate_email(value: Option<&str>) -> Result<EmailAddress, Vec<ContactFieldError>> {
    let field = ContactField::Email;
    let value = required(field, value)?;

    let mut errors = Vec::new();
    let email = value.parse::<EmailAddress>().ok();
    if email.is_none() {
        errors.push(ContactFieldError::InvalidEmail);
    }
    if value.chars().count() > CONTACT_EMAIL_MAX_LEN {
        errors.push(ContactFieldError::TooLong {
            field,
            max: CONTACT_EMAIL_MAX_LEN,
        });
    }

    match email {
        Some(email) if errors.is_empty() => Ok(email),
        _ => Err(errors),
    }
}

fn validate_subject(value: Option<&str>) -> Result<ContactMessageSubject, Vec<ContactFieldError>> {
    let field = ContactField::Subject;
    ContactMessageSubject::try_new(required(field, value)?).map_err(|err| {
        vec![match err {
            ContactMessageSubjectError::LenCharMinViolated => ContactFieldError::TooShort {
                field,
                min: ContactMessageSubject::MIN_LEN,
            },
            ContactMessageSubjectError::LenCharMaxViolated => ContactFieldError::TooLong {
                field,
                max: ContactMessageSubject::MAX_LEN,
            },
        }]
    })
}

fn validate_content(value: Option<&str>) -> Result<ContactMessageContent, Vec<ContactFieldError>> {
    let field = ContactField::Message;
    ContactMessageContent::try_new(required(field, value)?).map_err(|err| {
        vec![match err {
            ContactMessageContentError::LenCharMinViolated => ContactFieldError::TooShort {
                field,
                min: ContactMessageContent::MIN_LEN,
            },
            ContactMessageContentError::LenCharMaxViolated => ContactFieldError::TooLong {
                field,
                max: ContactMessageContent::MAX_LEN,
            },
        }]
    })
}
