//! Form validation, run before anything reaches the repository
//!
//! The same rules run in the browser (inline field errors) and again in the
//! server functions / REST handlers.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::models::{NewFormSubmission, PortfolioItem, ServiceItem};
use crate::shared::errors::{Result, ValidationErrors};

static EMAIL_RE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

static URL_RE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^(https?://[^\s]+|/[^\s]*)$").ok());

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE
        .as_ref()
        .map(|re| re.is_match(email.trim()))
        .unwrap_or(false)
}

/// Absolute http(s) URL or a site-relative path
pub fn is_valid_url(url: &str) -> bool {
    URL_RE
        .as_ref()
        .map(|re| re.is_match(url.trim()))
        .unwrap_or(false)
}

fn digit_count(value: &str) -> usize {
    value.chars().filter(|c| c.is_ascii_digit()).count()
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Raw values typed into the public contact form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactFormInput {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub subject: String,
    pub message: String,
}

impl ContactFormInput {
    pub fn errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        if self.name.trim().chars().count() < 2 {
            errors.add("name", "Name must be at least 2 characters");
        }
        if !is_valid_email(&self.email) {
            errors.add("email", "Please enter a valid email address");
        }
        if !self.phone.trim().is_empty() && digit_count(&self.phone) < 10 {
            errors.add("phone", "Phone number must be at least 10 digits");
        }
        if self.subject.trim().chars().count() < 5 {
            errors.add("subject", "Subject must be at least 5 characters");
        }
        if self.message.trim().chars().count() < 10 {
            errors.add("message", "Message must be at least 10 characters");
        }

        errors
    }

    /// Validate and convert into a persistable submission
    pub fn validate(&self) -> Result<NewFormSubmission> {
        let submission = NewFormSubmission {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: non_empty(&self.phone),
            subject: non_empty(&self.subject),
            message: self.message.trim().to_string(),
        };
        self.errors().into_result(submission)
    }
}

pub fn validate_service(service: &ServiceItem) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if service.title.trim().is_empty() {
        errors.add("title", "Title is required");
    }
    if service.description.trim().chars().count() < 10 {
        errors.add("description", "Description must be at least 10 characters");
    }
    if service.display_order < 1 {
        errors.add("display_order", "Order must be 1 or greater");
    }
    errors
}

pub fn validate_portfolio_item(item: &PortfolioItem) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if item.title.trim().is_empty() {
        errors.add("title", "Title is required");
    }
    if let Some(url) = item.image_url.as_deref().filter(|u| !u.trim().is_empty()) {
        if !is_valid_url(url) {
            errors.add("image_url", "Please enter a valid URL");
        }
    }
    if let Some(link) = item.link.as_deref().filter(|u| !u.trim().is_empty()) {
        if !is_valid_url(link) {
            errors.add("link", "Please enter a valid URL");
        }
    }
    if item.display_order < 1 {
        errors.add("display_order", "Order must be 1 or greater");
    }
    errors
}
