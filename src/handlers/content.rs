//! Content handlers: snapshot, snippets, ordered lists and contact info

use axum::{
    extract::Path,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{bearer_token, editor_from_headers, ApiError, ApiResult, RuntimeState};
use crate::domain::models::{CollectionKind, ContactInfoPatch, PartnerItem, PortfolioItem, ServiceItem};
use crate::domain::services::{validate_portfolio_item, validate_service};
use crate::shared::errors::{AppError, ValidationErrors};

#[derive(Debug, Serialize, Deserialize)]
pub struct SnippetBody {
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct SnippetResponse {
    pub key: String,
    pub value: String,
}

fn not_found(what: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": format!("Unknown collection: {}", what) })),
    )
        .into_response()
}

/// Collections served by the generic list routes
fn list_collection(slug: &str) -> Option<CollectionKind> {
    CollectionKind::from_slug(slug).filter(|collection| {
        matches!(
            collection,
            CollectionKind::Services | CollectionKind::Portfolio | CollectionKind::Partners
        )
    })
}

/// Errors of every item, keyed `<index>.<field>`
fn validate_items<T>(items: &[T], validate: impl Fn(&T) -> ValidationErrors) -> Result<(), AppError> {
    let mut all = ValidationErrors::new();
    for (index, item) in items.iter().enumerate() {
        for (field, message) in validate(item).fields {
            all.add(&format!("{}.{}", index, field), message);
        }
    }
    all.into_result(())
}

/// GET /api/content
/// Whole snapshot; submissions only for an editor bearer
pub async fn get_snapshot_handler(
    Extension(runtime): RuntimeState,
    headers: HeaderMap,
) -> impl IntoResponse {
    let include_submissions = match bearer_token(&headers) {
        Some(token) => runtime
            .auth
            .current_user(&token)
            .await
            .is_some_and(|user| user.role.can_edit()),
        None => false,
    };

    Json(runtime.repository.snapshot(include_submissions).await)
}

/// GET /api/content/snippets/{key}
pub async fn get_snippet_handler(
    Extension(runtime): RuntimeState,
    Path(key): Path<String>,
) -> impl IntoResponse {
    let value = runtime.repository.get_snippet_value(&key).await;
    Json(SnippetResponse { key, value })
}

/// PUT /api/content/snippets/{key}
pub async fn put_snippet_handler(
    Extension(runtime): RuntimeState,
    headers: HeaderMap,
    Path(key): Path<String>,
    Json(body): Json<SnippetBody>,
) -> ApiResult<StatusCode> {
    let user = editor_from_headers(&runtime, &headers).await?;
    tracing::info!(key = %key, editor = %user.email, "Saving content snippet");

    runtime.repository.set_snippet(&key, &body.value).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/content/{collection}
pub async fn get_collection_handler(
    Extension(runtime): RuntimeState,
    Path(collection): Path<String>,
) -> Response {
    let repository = &runtime.repository;
    match list_collection(&collection) {
        Some(CollectionKind::Services) => Json(repository.get_services().await).into_response(),
        Some(CollectionKind::Portfolio) => Json(repository.get_portfolio().await).into_response(),
        Some(CollectionKind::Partners) => Json(repository.get_partners().await).into_response(),
        _ => not_found(&collection),
    }
}

/// PUT /api/content/{collection}
/// Replaces the whole list with the request body
pub async fn put_collection_handler(
    Extension(runtime): RuntimeState,
    headers: HeaderMap,
    Path(collection): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<Response> {
    let Some(kind) = list_collection(&collection) else {
        return Ok(not_found(&collection));
    };
    editor_from_headers(&runtime, &headers).await?;

    let repository = &runtime.repository;
    match kind {
        CollectionKind::Services => {
            let items: Vec<ServiceItem> = serde_json::from_value(body).map_err(AppError::from)?;
            validate_items(&items, validate_service)?;
            repository.set_services(&items).await?;
        }
        CollectionKind::Portfolio => {
            let items: Vec<PortfolioItem> = serde_json::from_value(body).map_err(AppError::from)?;
            validate_items(&items, validate_portfolio_item)?;
            repository.set_portfolio(&items).await?;
        }
        _ => {
            let items: Vec<PartnerItem> = serde_json::from_value(body).map_err(AppError::from)?;
            repository.set_partners(&items).await?;
        }
    }

    Ok(StatusCode::NO_CONTENT.into_response())
}

/// DELETE /api/content/{collection}/{id}
pub async fn delete_item_handler(
    Extension(runtime): RuntimeState,
    headers: HeaderMap,
    Path((collection, id)): Path<(String, String)>,
) -> ApiResult<Response> {
    let Some(kind) = list_collection(&collection) else {
        return Ok(not_found(&collection));
    };
    editor_from_headers(&runtime, &headers).await?;

    let repository = &runtime.repository;
    match kind {
        CollectionKind::Services => repository.delete_service(&id).await?,
        CollectionKind::Portfolio => repository.delete_portfolio_item(&id).await?,
        _ => repository.delete_partner(&id).await?,
    }

    Ok(StatusCode::NO_CONTENT.into_response())
}

/// GET /api/content/contact
pub async fn get_contact_handler(Extension(runtime): RuntimeState) -> impl IntoResponse {
    Json(runtime.repository.get_contact_info().await)
}

/// PUT /api/content/contact
pub async fn put_contact_handler(
    Extension(runtime): RuntimeState,
    headers: HeaderMap,
    Json(patch): Json<ContactInfoPatch>,
) -> Result<impl IntoResponse, ApiError> {
    editor_from_headers(&runtime, &headers).await?;
    let contact = runtime.repository.set_contact_info(patch).await?;
    Ok(Json(contact))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{send, test_app};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_public_snapshot_hides_submissions() {
        let (app, _) = test_app().await;
        let (status, body) = send(&app, "GET", "/api/content", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["services"].as_array().unwrap().len(), 4);
        assert!(body["form_submissions"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_snippet_requires_editor() {
        let (app, token) = test_app().await;
        let body = json!({"value": "Hello Kathmandu"});

        let (status, _) = send(&app, "PUT", "/api/content/snippets/hero.title", None, Some(body.clone())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, "PUT", "/api/content/snippets/hero.title", Some(&token), Some(body)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, snippet) = send(&app, "GET", "/api/content/snippets/hero.title", None, None).await;
        assert_eq!(snippet["value"], "Hello Kathmandu");
    }

    #[tokio::test]
    async fn test_replace_and_delete_services() {
        let (app, token) = test_app().await;
        let (_, services) = send(&app, "GET", "/api/content/services", None, None).await;
        let mut services = services.as_array().unwrap().clone();
        services.truncate(2);

        let (status, _) = send(&app, "PUT", "/api/content/services", Some(&token), Some(json!(services))).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, "DELETE", "/api/content/services/default-service-1", Some(&token), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, after) = send(&app, "GET", "/api/content/services", None, None).await;
        assert_eq!(after.as_array().unwrap().len(), 1);
        assert_eq!(after[0]["id"], "default-service-2");
    }

    #[tokio::test]
    async fn test_invalid_service_is_unprocessable() {
        let (app, token) = test_app().await;
        let bad = json!([{
            "id": "s1",
            "icon": "Code",
            "title": "",
            "description": "short",
            "display_order": 1,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        }]);
        let (status, body) = send(&app, "PUT", "/api/content/services", Some(&token), Some(bad)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["fields"]["0.title"].is_string());
    }

    #[tokio::test]
    async fn test_unknown_collection_is_not_found() {
        let (app, token) = test_app().await;
        let (status, _) = send(&app, "GET", "/api/content/blog", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, "DELETE", "/api/content/submissions/x", Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_contact_update_keeps_singleton() {
        let (app, token) = test_app().await;
        let (status, updated) = send(
            &app,
            "PUT",
            "/api/content/contact",
            Some(&token),
            Some(json!({"address": "Putalisadak, Kathmandu"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["id"], "default-contact");

        let (_, contact) = send(&app, "GET", "/api/content/contact", None, None).await;
        assert_eq!(contact["address"], "Putalisadak, Kathmandu");
    }
}
