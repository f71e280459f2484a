use serde::{Deserialize, Serialize};

use super::{ContactInfo, ContentSnippet, FormSubmission, PartnerItem, PortfolioItem, ServiceItem};
use crate::domain::defaults;

/// Everything the UI shows, pulled from the repository in one go
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSnapshot {
    pub snippets: Vec<ContentSnippet>,
    pub services: Vec<ServiceItem>,
    pub portfolio: Vec<PortfolioItem>,
    pub partners: Vec<PartnerItem>,
    pub contact: ContactInfo,
    /// Empty unless the caller is an editor
    pub form_submissions: Vec<FormSubmission>,
}

impl Default for ContentSnapshot {
    /// Empty lists and the default contact record
    fn default() -> Self {
        Self {
            snippets: Vec::new(),
            services: Vec::new(),
            portfolio: Vec::new(),
            partners: Vec::new(),
            contact: defaults::default_contact(),
            form_submissions: Vec::new(),
        }
    }
}

impl ContentSnapshot {
    pub fn snippet(&self, key: &str) -> Option<&ContentSnippet> {
        self.snippets.iter().find(|s| s.key == key)
    }

    /// Snippet value for `key`, or `default_value` when the key is absent
    pub fn resolve_text(&self, key: &str, default_value: &str) -> String {
        self.snippet(key)
            .map(|s| s.value.clone())
            .unwrap_or_else(|| default_value.to_string())
    }

    pub fn featured_portfolio(&self) -> impl Iterator<Item = &PortfolioItem> {
        self.portfolio.iter().filter(|p| p.featured)
    }
}
