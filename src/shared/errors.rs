use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Field-level validation messages, keyed by form field name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub fields: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields.entry(field.to_string()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// `Ok(value)` when no field failed
    pub fn into_result<T>(self, value: T) -> Result<T> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(AppError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Only ever logged; reads recover at the repository boundary
    #[error("Failed to read {collection}: {message}")]
    PersistenceRead {
        collection: &'static str,
        message: String,
    },

    #[error("Failed to update {collection}: {message}")]
    PersistenceWrite {
        collection: &'static str,
        message: String,
    },

    #[error("Not authenticated: {0}")]
    Authentication(String),

    #[error("Not authorized: {0}")]
    Authorization(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl AppError {
    /// Short message suitable for a toast
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(_) => "Please fix the highlighted fields".to_string(),
            AppError::PersistenceRead { collection, .. } => format!("Failed to load {}", collection),
            AppError::PersistenceWrite { collection, .. } => format!("Failed to update {}", collection),
            AppError::Authentication(_) => "Please sign in again".to_string(),
            AppError::Authorization(_) => "You do not have access to this action".to_string(),
            AppError::SerializationError(_) => "Unexpected data format".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_message_per_field_wins() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "too short");
        errors.add("name", "missing");
        assert_eq!(errors.get("name"), Some("too short"));
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationErrors::new().into_result(1).is_ok());

        let mut errors = ValidationErrors::new();
        errors.add("email", "invalid");
        let err = errors.into_result(()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.to_string(), "Validation failed: email: invalid");
    }

    #[test]
    fn test_user_message_names_collection() {
        let err = AppError::PersistenceWrite {
            collection: "services",
            message: "timeout".to_string(),
        };
        assert_eq!(err.user_message(), "Failed to update services");

        let err = AppError::PersistenceRead {
            collection: "partners",
            message: "offline".to_string(),
        };
        assert_eq!(err.user_message(), "Failed to load partners");
        assert_eq!(err.to_string(), "Failed to read partners: offline");
    }
}
