//! JSON REST API over the content runtime
//!
//! Served by the standalone `server` binary and merged into the fullstack
//! router. Sessions travel as `Authorization: Bearer <token>`.

pub mod auth;
pub mod content;
pub mod submissions;

use std::sync::Arc;

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
    Extension, Json, Router,
};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::domain::models::AuthUser;
use crate::infrastructure::{require_editor, CmsRuntime};
use crate::shared::errors::AppError;

pub use auth::{me_handler, sign_in_handler, sign_out_handler};
pub use content::{
    delete_item_handler, get_collection_handler, get_contact_handler, get_snapshot_handler,
    get_snippet_handler, put_collection_handler, put_contact_handler, put_snippet_handler,
};
pub use submissions::{list_submissions_handler, submit_contact_handler, update_submission_handler};

/// Shared handler state, injected as an `Extension`
pub type RuntimeState = Extension<Arc<CmsRuntime>>;

/// `AppError` rendered as a JSON response
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(e: AppError) -> Self {
        Self(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Authentication(_) => StatusCode::UNAUTHORIZED,
            AppError::Authorization(_) => StatusCode::FORBIDDEN,
            AppError::PersistenceRead { .. } | AppError::PersistenceWrite { .. } => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::SerializationError(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let fields = match &self.0 {
            AppError::Validation(errors) => json!(errors.fields),
            _ => serde_json::Value::Null,
        };
        let body = json!({
            "error": self.0.user_message(),
            "detail": self.0.to_string(),
            "fields": fields,
        });
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Token from `Authorization: Bearer <token>`
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

/// Editor gate for mutating handlers
pub async fn editor_from_headers(runtime: &CmsRuntime, headers: &HeaderMap) -> ApiResult<AuthUser> {
    let token = bearer_token(headers);
    Ok(require_editor(runtime.auth.as_ref(), token.as_deref()).await?)
}

/// Every REST route, with the runtime attached
/// NOTE: Axum 0.8 uses {param} syntax instead of :param
pub fn api_router(runtime: Arc<CmsRuntime>) -> Router {
    Router::new()
        // Content
        .route("/api/content", get(get_snapshot_handler))
        .route(
            "/api/content/snippets/{key}",
            get(get_snippet_handler).put(put_snippet_handler),
        )
        .route(
            "/api/content/contact",
            get(get_contact_handler).put(put_contact_handler),
        )
        .route(
            "/api/content/{collection}",
            get(get_collection_handler).put(put_collection_handler),
        )
        .route(
            "/api/content/{collection}/{id}",
            delete(delete_item_handler),
        )
        // Form submissions
        .route("/api/contact", post(submit_contact_handler))
        .route("/api/submissions", get(list_submissions_handler))
        .route("/api/submissions/{id}", patch(update_submission_handler))
        // Auth
        .route("/api/auth/sign-in", post(sign_in_handler))
        .route("/api/auth/sign-out", post(sign_out_handler))
        .route("/api/auth/me", get(me_handler))
        .layer(Extension(runtime))
        .layer(TraceLayer::new_for_http())
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::errors::ValidationErrors;

    #[test]
    fn test_error_status_mapping() {
        let mut fields = ValidationErrors::new();
        fields.add("email", "invalid");
        assert_eq!(ApiError(AppError::Validation(fields)).status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            ApiError(AppError::Authentication("x".into())).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError(AppError::Authorization("x".into())).status(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError(AppError::PersistenceWrite {
                collection: "services",
                message: "down".into()
            })
            .status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);
        headers.insert(header::AUTHORIZATION, "Bearer abc".parse().unwrap());
        assert_eq!(bearer_token(&headers).as_deref(), Some("abc"));
        headers.insert(header::AUTHORIZATION, "Basic abc".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);
    }
}
