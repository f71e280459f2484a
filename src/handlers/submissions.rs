//! Contact form and submission review handlers

use axum::{
    extract::Path,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};

use super::{editor_from_headers, ApiResult, RuntimeState};
use crate::domain::models::FormSubmissionPatch;
use crate::domain::services::ContactFormInput;

/// POST /api/contact
/// Public; validated before anything is stored
pub async fn submit_contact_handler(
    Extension(runtime): RuntimeState,
    Json(form): Json<ContactFormInput>,
) -> ApiResult<Response> {
    let submission = form.validate()?;
    let stored = runtime.repository.add_form_submission(submission).await?;
    Ok((StatusCode::CREATED, Json(stored)).into_response())
}

/// GET /api/submissions
/// Newest first
pub async fn list_submissions_handler(
    Extension(runtime): RuntimeState,
    headers: HeaderMap,
) -> ApiResult<Response> {
    editor_from_headers(&runtime, &headers).await?;
    Ok(Json(runtime.repository.get_form_submissions().await).into_response())
}

/// PATCH /api/submissions/{id}
pub async fn update_submission_handler(
    Extension(runtime): RuntimeState,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(patch): Json<FormSubmissionPatch>,
) -> ApiResult<Response> {
    editor_from_headers(&runtime, &headers).await?;

    match runtime.repository.update_form_submission(&id, patch).await? {
        Some(updated) => Ok(Json(updated).into_response()),
        None => Ok(StatusCode::NOT_FOUND.into_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{send, test_app};
    use axum::http::StatusCode;
    use serde_json::json;

    fn ram_form() -> serde_json::Value {
        json!({
            "name": "Ram Shrestha",
            "email": "ram@example.com",
            "subject": "Website Quote",
            "message": "Please send a quote for a company website."
        })
    }

    #[tokio::test]
    async fn test_contact_form_flow() {
        let (app, token) = test_app().await;

        let (status, created) = send(&app, "POST", "/api/contact", None, Some(ram_form())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["status"], "new");

        let (status, _) = send(&app, "GET", "/api/submissions", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, list) = send(&app, "GET", "/api/submissions", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list.as_array().unwrap().len(), 1);
        assert_eq!(list[0]["name"], "Ram Shrestha");

        let uri = format!("/api/submissions/{}", created["id"].as_str().unwrap());
        let (status, updated) = send(&app, "PATCH", &uri, Some(&token), Some(json!({"status": "read"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["status"], "read");
        assert_eq!(updated["message"], created["message"]);
    }

    #[tokio::test]
    async fn test_invalid_form_reports_fields() {
        let (app, _) = test_app().await;
        let mut form = ram_form();
        form["email"] = json!("not-an-email");
        form["message"] = json!("short");

        let (status, body) = send(&app, "POST", "/api/contact", None, Some(form)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["fields"]["email"].is_string());
        assert!(body["fields"]["message"].is_string());
    }

    #[tokio::test]
    async fn test_patch_unknown_submission() {
        let (app, token) = test_app().await;
        let (status, _) = send(
            &app,
            "PATCH",
            "/api/submissions/missing",
            Some(&token),
            Some(json!({"status": "archived"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
