use dioxus::prelude::*;

use super::use_auth::load_token;
use crate::domain::models::ContentSnapshot;
use crate::server_fns::get_content_snapshot;
use crate::shared::state::ContentCache;

/// Content cache and edit mode for the page session
#[derive(Clone, Copy)]
pub struct ContentContext {
    pub cache: Signal<ContentCache>,
}

impl ContentContext {
    pub fn snapshot(&self) -> ContentSnapshot {
        self.cache.read().snapshot.clone()
    }

    pub fn is_edit_mode(&self) -> bool {
        self.cache.read().is_edit_mode
    }

    pub fn set_edit_mode(mut self, on: bool) {
        self.cache.write().set_edit_mode(on);
    }

    pub fn resolve_text(&self, key: &str, default_value: &str) -> String {
        self.cache.read().resolve_text(key, default_value)
    }

    pub fn last_error(&self) -> Option<String> {
        self.cache.read().last_error.clone()
    }

    /// Re-fetch every collection and replace the cache
    pub async fn refresh(mut self) {
        let result = get_content_snapshot(load_token())
            .await
            .map_err(|e| e.to_string());
        if let Err(e) = &result {
            tracing::warn!("Content refresh failed: {}", e);
        }
        self.cache.write().apply_refresh(result);
    }
}

/// Provide the content context; the first refresh runs once on mount
pub fn use_content_provider() -> ContentContext {
    let cache = use_signal(ContentCache::default);
    let content = use_context_provider(|| ContentContext { cache });
    use_hook(|| spawn(async move { content.refresh().await }));
    content
}

pub fn use_content() -> ContentContext {
    use_context::<ContentContext>()
}
