use std::time::Duration;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// How long the client keeps a failed-submission message on screen.
pub const CONTACT_ERROR_DISMISS_AFTER: Duration = Duration::from_secs(5);

/// Contact form as submitted by a visitor and relayed verbatim to the
/// third-party form endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ContactMeForm {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "A valid email address is required"))]
    pub email: String,

    #[validate(length(max = 150, message = "Subject is too long"))]
    pub subject: String,

    #[validate(length(min = 1, max = 5000, message = "Message is required"))]
    pub message: String,
}

impl ContactMeForm {
    pub fn trimmed(self) -> Self {
        ContactMeForm {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }
}

/// Outcome of relaying a contact message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactStatus {
    Sent,
    Failed { message: String, dismiss_after: Duration },
}

impl ContactStatus {
    pub fn failed(message: impl Into<String>) -> Self {
        ContactStatus::Failed {
            message: message.into(),
            dismiss_after: CONTACT_ERROR_DISMISS_AFTER,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ContactMeResponse {
    pub status: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dismiss_after_secs: Option<u64>,
}

impl From<ContactStatus> for ContactMeResponse {
    fn from(status: ContactStatus) -> Self {
        match status {
            ContactStatus::Sent => ContactMeResponse {
                status: "success",
                message: "Your message has been sent.".to_string(),
                dismiss_after_secs: None,
            },
            ContactStatus::Failed { message, dismiss_after } => ContactMeResponse {
                status: "error",
                message,
                dismiss_after_secs: Some(dismiss_after.as_secs()),
            },
        }
    }
}
