use crate::domain::models::ContentSnapshot;
use crate::domain::services::DashboardSummary;

/// Session-scoped copy of every collection plus the edit-mode flag
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentCache {
    pub snapshot: ContentSnapshot,
    pub is_edit_mode: bool,
    /// Message from the last failed refresh
    pub last_error: Option<String>,
    /// A refresh has succeeded at least once
    pub loaded: bool,
}

impl ContentCache {
    /// Replace the snapshot wholesale on success; on failure keep what we had
    pub fn apply_refresh(&mut self, result: Result<ContentSnapshot, String>) {
        match result {
            Ok(snapshot) => {
                self.snapshot = snapshot;
                self.loaded = true;
                self.last_error = None;
            }
            Err(e) => self.last_error = Some(e),
        }
    }

    pub fn set_edit_mode(&mut self, on: bool) {
        self.is_edit_mode = on;
    }

    pub fn resolve_text(&self, key: &str, default_value: &str) -> String {
        self.snapshot.resolve_text(key, default_value)
    }

    pub fn dashboard(&self) -> DashboardSummary {
        DashboardSummary::from_snapshot(&self.snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::defaults;
    use crate::domain::models::ContentSnippet;

    #[test]
    fn test_failed_first_refresh_keeps_initial_value() {
        let mut cache = ContentCache::default();
        cache.apply_refresh(Err("network down".to_string()));

        assert!(!cache.loaded);
        assert!(cache.snapshot.services.is_empty());
        assert_eq!(cache.snapshot.contact, defaults::default_contact());
        assert_eq!(cache.last_error.as_deref(), Some("network down"));
        assert_eq!(cache.resolve_text("hero.title", "Fallback"), "Fallback");
    }

    #[test]
    fn test_refresh_replaces_snapshot_and_clears_error() {
        let mut cache = ContentCache::default();
        cache.apply_refresh(Err("first".to_string()));

        let mut snapshot = ContentSnapshot::default();
        snapshot.snippets.push(ContentSnippet::new("hero.title", "Live"));
        snapshot.services = defaults::default_services();
        cache.apply_refresh(Ok(snapshot.clone()));
        cache.apply_refresh(Ok(snapshot));

        assert!(cache.loaded);
        assert!(cache.last_error.is_none());
        assert_eq!(cache.resolve_text("hero.title", "Fallback"), "Live");
        assert_eq!(cache.dashboard().services, 4);
    }

    #[test]
    fn test_failed_refresh_after_success_keeps_data() {
        let mut cache = ContentCache::default();
        let mut snapshot = ContentSnapshot::default();
        snapshot.services = defaults::default_services();
        cache.apply_refresh(Ok(snapshot));
        cache.apply_refresh(Err("timeout".to_string()));

        assert_eq!(cache.snapshot.services.len(), 4);
        assert!(cache.loaded);
    }

    #[test]
    fn test_edit_mode_is_local() {
        let mut cache = ContentCache::default();
        cache.set_edit_mode(true);
        assert!(cache.is_edit_mode);
        cache.apply_refresh(Ok(ContentSnapshot::default()));
        assert!(cache.is_edit_mode);
    }
}
