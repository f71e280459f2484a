use serde::{Deserialize, Serialize};

use crate::domain::models::{ContentSnapshot, FormSubmission, SubmissionStatus};

/// How many submissions the dashboard lists
pub const RECENT_SUBMISSIONS: usize = 5;

/// Admin dashboard figures derived from a content snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub services: usize,
    pub portfolio: usize,
    pub partners: usize,
    pub submissions: usize,
    pub unread_submissions: usize,
    pub recent_submissions: Vec<FormSubmission>,
}

impl DashboardSummary {
    pub fn from_snapshot(snapshot: &ContentSnapshot) -> Self {
        let mut recent = snapshot.form_submissions.clone();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(RECENT_SUBMISSIONS);

        Self {
            services: snapshot.services.len(),
            portfolio: snapshot.portfolio.len(),
            partners: snapshot.partners.len(),
            submissions: snapshot.form_submissions.len(),
            unread_submissions: snapshot
                .form_submissions
                .iter()
                .filter(|s| s.status == SubmissionStatus::New)
                .count(),
            recent_submissions: recent,
        }
    }
}
