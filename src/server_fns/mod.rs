//! Server functions for Dioxus Fullstack
//! These functions run on the server and are callable from the client.
//!
//! Editor-only functions take the caller's session token explicitly; the
//! client keeps it in local storage (see `use_auth`).

use dioxus::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::models::{
    AuthSession, AuthUser, ContactInfo, ContactInfoPatch, ContentSnapshot, FormSubmission,
    FormSubmissionPatch, PartnerItem, PortfolioItem, Role, ServiceItem, UserProfile,
};
use crate::domain::services::ContactFormInput;
use crate::shared::errors::ValidationErrors;

/// Result of a public contact-form post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SubmitOutcome {
    Accepted(FormSubmission),
    Rejected(ValidationErrors),
}

// ============================================================
// Server-side helpers
// ============================================================
#[cfg(not(target_arch = "wasm32"))]
mod support {
    use dioxus::prelude::ServerFnError;

    use crate::domain::models::AuthUser;
    use crate::infrastructure::{cms_runtime, require_admin, require_editor, CmsRuntime};
    use crate::shared::errors::AppError;
    use std::sync::Arc;

    /// Client-facing message for an error
    pub fn server_error(e: AppError) -> ServerFnError {
        match &e {
            AppError::Validation(_) => ServerFnError::new(e.to_string()),
            _ => ServerFnError::new(e.user_message()),
        }
    }

    pub async fn editor(token: &Option<String>) -> Result<(Arc<CmsRuntime>, AuthUser), ServerFnError> {
        let runtime = cms_runtime().await;
        let user = require_editor(runtime.auth.as_ref(), token.as_deref())
            .await
            .map_err(server_error)?;
        Ok((runtime, user))
    }

    pub async fn admin(token: &Option<String>) -> Result<(Arc<CmsRuntime>, AuthUser), ServerFnError> {
        let runtime = cms_runtime().await;
        let user = require_admin(runtime.auth.as_ref(), token.as_deref())
            .await
            .map_err(server_error)?;
        Ok((runtime, user))
    }
}

// ============================================================
// Content
// ============================================================

/// Every collection in one call. Submissions are included only for editors.
#[server]
pub async fn get_content_snapshot(token: Option<String>) -> Result<ContentSnapshot, ServerFnError> {
    use crate::infrastructure::cms_runtime;

    let runtime = cms_runtime().await;
    let include_submissions = match token.as_deref() {
        Some(token) => runtime
            .auth
            .current_user(token)
            .await
            .is_some_and(|user| user.role.can_edit()),
        None => false,
    };

    Ok(runtime.repository.snapshot(include_submissions).await)
}

#[server]
pub async fn save_snippet(token: Option<String>, key: String, value: String) -> Result<(), ServerFnError> {
    let (runtime, user) = support::editor(&token).await?;
    tracing::info!(key = %key, editor = %user.email, "Saving content snippet");

    runtime
        .repository
        .set_snippet(&key, &value)
        .await
        .map_err(support::server_error)
}

#[server]
pub async fn save_services(token: Option<String>, services: Vec<ServiceItem>) -> Result<(), ServerFnError> {
    use crate::domain::services::validate_service;

    let (runtime, _) = support::editor(&token).await?;
    for service in &services {
        let errors = validate_service(service);
        if !errors.is_empty() {
            return Err(ServerFnError::new(format!("{}: {}", service.title, errors)));
        }
    }

    runtime
        .repository
        .set_services(&services)
        .await
        .map_err(support::server_error)
}

#[server]
pub async fn delete_service(token: Option<String>, id: String) -> Result<(), ServerFnError> {
    let (runtime, _) = support::editor(&token).await?;
    runtime
        .repository
        .delete_service(&id)
        .await
        .map_err(support::server_error)
}

#[server]
pub async fn save_portfolio(token: Option<String>, items: Vec<PortfolioItem>) -> Result<(), ServerFnError> {
    use crate::domain::services::validate_portfolio_item;

    let (runtime, _) = support::editor(&token).await?;
    for item in &items {
        let errors = validate_portfolio_item(item);
        if !errors.is_empty() {
            return Err(ServerFnError::new(format!("{}: {}", item.title, errors)));
        }
    }

    runtime
        .repository
        .set_portfolio(&items)
        .await
        .map_err(support::server_error)
}

#[server]
pub async fn delete_portfolio_item(token: Option<String>, id: String) -> Result<(), ServerFnError> {
    let (runtime, _) = support::editor(&token).await?;
    runtime
        .repository
        .delete_portfolio_item(&id)
        .await
        .map_err(support::server_error)
}

#[server]
pub async fn save_partners(token: Option<String>, partners: Vec<PartnerItem>) -> Result<(), ServerFnError> {
    let (runtime, _) = support::editor(&token).await?;
    if let Some(unnamed) = partners.iter().find(|p| p.name.trim().is_empty()) {
        return Err(ServerFnError::new(format!("Partner {} needs a name", unnamed.id)));
    }

    runtime
        .repository
        .set_partners(&partners)
        .await
        .map_err(support::server_error)
}

#[server]
pub async fn delete_partner(token: Option<String>, id: String) -> Result<(), ServerFnError> {
    let (runtime, _) = support::editor(&token).await?;
    runtime
        .repository
        .delete_partner(&id)
        .await
        .map_err(support::server_error)
}

#[server]
pub async fn save_contact_info(
    token: Option<String>,
    patch: ContactInfoPatch,
) -> Result<ContactInfo, ServerFnError> {
    let (runtime, _) = support::editor(&token).await?;
    runtime
        .repository
        .set_contact_info(patch)
        .await
        .map_err(support::server_error)
}

// ============================================================
// Form submissions
// ============================================================

/// Public contact form. Validation runs again here before anything is stored.
#[server]
pub async fn submit_contact_form(form: ContactFormInput) -> Result<SubmitOutcome, ServerFnError> {
    use crate::infrastructure::cms_runtime;
    use crate::shared::errors::AppError;

    let submission = match form.validate() {
        Ok(submission) => submission,
        Err(AppError::Validation(errors)) => return Ok(SubmitOutcome::Rejected(errors)),
        Err(e) => return Err(support::server_error(e)),
    };

    let runtime = cms_runtime().await;
    let stored = runtime
        .repository
        .add_form_submission(submission)
        .await
        .map_err(support::server_error)?;
    Ok(SubmitOutcome::Accepted(stored))
}

/// Change status/notes. `None` when the id is unknown.
#[server]
pub async fn update_form_submission(
    token: Option<String>,
    id: String,
    patch: FormSubmissionPatch,
) -> Result<Option<FormSubmission>, ServerFnError> {
    let (runtime, _) = support::editor(&token).await?;
    runtime
        .repository
        .update_form_submission(&id, patch)
        .await
        .map_err(support::server_error)
}

// ============================================================
// Auth
// ============================================================

#[server]
pub async fn sign_in(email: String, password: String) -> Result<AuthSession, ServerFnError> {
    use crate::infrastructure::cms_runtime;

    let runtime = cms_runtime().await;
    runtime
        .auth
        .sign_in(&email, &password)
        .await
        .map_err(support::server_error)
}

#[server]
pub async fn sign_up(email: String, password: String, full_name: Option<String>) -> Result<AuthUser, ServerFnError> {
    use crate::infrastructure::cms_runtime;

    let runtime = cms_runtime().await;
    runtime
        .auth
        .sign_up(&email, &password, full_name)
        .await
        .map_err(support::server_error)
}

#[server]
pub async fn sign_out(token: String) -> Result<(), ServerFnError> {
    use crate::infrastructure::cms_runtime;

    let runtime = cms_runtime().await;
    runtime.auth.sign_out(&token).await.map_err(support::server_error)
}

#[server]
pub async fn current_user(token: String) -> Result<Option<AuthUser>, ServerFnError> {
    use crate::infrastructure::cms_runtime;

    let runtime = cms_runtime().await;
    Ok(runtime.auth.current_user(&token).await)
}

#[server]
pub async fn reset_password(email: String) -> Result<(), ServerFnError> {
    use crate::infrastructure::cms_runtime;

    let runtime = cms_runtime().await;
    runtime
        .auth
        .reset_password(&email)
        .await
        .map_err(support::server_error)
}

#[server]
pub async fn update_password(token: String, new_password: String) -> Result<(), ServerFnError> {
    use crate::infrastructure::cms_runtime;

    let runtime = cms_runtime().await;
    runtime
        .auth
        .update_password(&token, &new_password)
        .await
        .map_err(support::server_error)
}

#[server]
pub async fn update_profile(token: String, profile: UserProfile) -> Result<AuthUser, ServerFnError> {
    use crate::infrastructure::cms_runtime;

    let runtime = cms_runtime().await;
    runtime
        .auth
        .update_profile(&token, profile)
        .await
        .map_err(support::server_error)
}

#[server]
pub async fn list_users(token: Option<String>) -> Result<Vec<AuthUser>, ServerFnError> {
    let (runtime, _) = support::admin(&token).await?;
    Ok(runtime.auth.list_users().await)
}

#[server]
pub async fn set_user_role(token: Option<String>, user_id: String, role: Role) -> Result<AuthUser, ServerFnError> {
    let (runtime, admin) = support::admin(&token).await?;
    if admin.id == user_id && role != Role::Admin {
        return Err(ServerFnError::new("You cannot remove your own admin role"));
    }

    runtime
        .auth
        .set_role(&user_id, role)
        .await
        .map_err(support::server_error)
}
