//! Session handlers

use axum::{
    http::{HeaderMap, StatusCode},
    Extension, Json,
};
use serde::Deserialize;

use super::{bearer_token, ApiResult, RuntimeState};
use crate::domain::models::{AuthSession, AuthUser};
use crate::shared::errors::AppError;

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/auth/sign-in
pub async fn sign_in_handler(
    Extension(runtime): RuntimeState,
    Json(request): Json<SignInRequest>,
) -> ApiResult<Json<AuthSession>> {
    let session = runtime.auth.sign_in(&request.email, &request.password).await?;
    Ok(Json(session))
}

/// POST /api/auth/sign-out
pub async fn sign_out_handler(Extension(runtime): RuntimeState, headers: HeaderMap) -> ApiResult<StatusCode> {
    if let Some(token) = bearer_token(&headers) {
        runtime.auth.sign_out(&token).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/auth/me
pub async fn me_handler(Extension(runtime): RuntimeState, headers: HeaderMap) -> ApiResult<Json<AuthUser>> {
    let token = bearer_token(&headers)
        .ok_or_else(|| AppError::Authentication("Sign in required".to_string()))?;
    let user = runtime
        .auth
        .current_user(&token)
        .await
        .ok_or_else(|| AppError::Authentication("Session expired".to_string()))?;
    Ok(Json(user))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{send, test_app, EDITOR_EMAIL, EDITOR_PASSWORD};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_sign_in_me_sign_out() {
        let (app, _) = test_app().await;

        let (status, session) = send(
            &app,
            "POST",
            "/api/auth/sign-in",
            None,
            Some(json!({"email": EDITOR_EMAIL, "password": EDITOR_PASSWORD})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let token = session["token"].as_str().unwrap().to_string();

        let (status, me) = send(&app, "GET", "/api/auth/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["role"], "editor");

        let (status, _) = send(&app, "POST", "/api/auth/sign-out", Some(&token), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, "GET", "/api/auth/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_bad_credentials() {
        let (app, _) = test_app().await;
        let (status, body) = send(
            &app,
            "POST",
            "/api/auth/sign-in",
            None,
            Some(json!({"email": EDITOR_EMAIL, "password": "wrong"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Please sign in again");
    }
}
