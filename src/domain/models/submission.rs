use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle of a contact-form submission. Archival is a status, not a removal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    New,
    Read,
    Replied,
    Archived,
}

impl SubmissionStatus {
    pub const ALL: [SubmissionStatus; 4] = [
        SubmissionStatus::New,
        SubmissionStatus::Read,
        SubmissionStatus::Replied,
        SubmissionStatus::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::New => "new",
            SubmissionStatus::Read => "read",
            SubmissionStatus::Replied => "replied",
            SubmissionStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(SubmissionStatus::New),
            "read" => Ok(SubmissionStatus::Read),
            "replied" => Ok(SubmissionStatus::Replied),
            "archived" => Ok(SubmissionStatus::Archived),
            other => Err(format!("unknown submission status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSubmission {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
    #[serde(default)]
    pub status: SubmissionStatus,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated contact-form payload, ready to persist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFormSubmission {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
}

/// Editor-side changes. Only `status` and `notes` can ever change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSubmissionPatch {
    #[serde(default)]
    pub status: Option<SubmissionStatus>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl FormSubmission {
    /// Server-assigned id, timestamps and `New` status
    pub fn create(input: NewFormSubmission) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            email: input.email,
            phone: input.phone,
            subject: input.subject,
            message: input.message,
            status: SubmissionStatus::New,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: FormSubmissionPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(notes) = patch.notes {
            self.notes = if notes.trim().is_empty() { None } else { Some(notes) };
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> NewFormSubmission {
        NewFormSubmission {
            name: "Ram Shrestha".to_string(),
            email: "ram@example.com".to_string(),
            phone: None,
            subject: Some("Website Quote".to_string()),
            message: "Please send a quote for a new company website.".to_string(),
        }
    }

    #[test]
    fn test_create_forces_new_status() {
        let submission = FormSubmission::create(input());
        assert_eq!(submission.status, SubmissionStatus::New);
        assert!(!submission.id.is_empty());
    }

    #[test]
    fn test_status_round_trips_as_lowercase() {
        let json = serde_json::to_value(SubmissionStatus::Archived).unwrap();
        assert_eq!(json, "archived");
        assert_eq!("replied".parse::<SubmissionStatus>(), Ok(SubmissionStatus::Replied));
        assert!("deleted".parse::<SubmissionStatus>().is_err());
    }

    #[test]
    fn test_apply_keeps_contact_fields() {
        let mut submission = FormSubmission::create(input());
        submission.apply(FormSubmissionPatch {
            status: Some(SubmissionStatus::Archived),
            notes: None,
        });
        assert_eq!(submission.status, SubmissionStatus::Archived);
        assert_eq!(submission.name, "Ram Shrestha");
        assert_eq!(submission.email, "ram@example.com");
    }
}
