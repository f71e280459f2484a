//! Process-wide content runtime
//!
//! Holds the repository and auth provider behind a `OnceCell`, initialised once
//! at startup and shared by the server functions and the REST router.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::OnceCell;

use super::auth::{AuthProvider, InMemoryAuthProvider};
use super::repository::{default_records, ContentRepository};
use super::storage::{LocalStore, SurrealStore};
use crate::config::{AppConfig, BackendKind};
use crate::domain::models::Role;

pub struct CmsRuntime {
    pub repository: ContentRepository,
    pub auth: Arc<dyn AuthProvider>,
}

impl CmsRuntime {
    pub fn new(repository: ContentRepository, auth: Arc<dyn AuthProvider>) -> Self {
        Self { repository, auth }
    }
}

/// Global runtime instance (singleton)
static RUNTIME: OnceCell<Arc<CmsRuntime>> = OnceCell::const_new();

/// File-backed local store, or an in-memory one if the directory is unusable
async fn open_local(dir: Option<&Path>) -> Arc<LocalStore> {
    let Some(dir) = dir else {
        tracing::info!("Local content store kept in memory");
        return Arc::new(LocalStore::in_memory(default_records));
    };

    match LocalStore::open(dir, default_records).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::warn!("Failed to open local store at {:?}: {}. Using memory.", dir, e);
            Arc::new(LocalStore::in_memory(default_records))
        }
    }
}

/// Build the repository selected by `config`. Never fails: an unreachable
/// remote store leaves the site running on the local one.
pub async fn build_runtime(config: &AppConfig) -> CmsRuntime {
    let local = open_local(config.data_dir.as_deref()).await;

    let repository = match (config.backend, &config.remote) {
        (BackendKind::Remote, Some(remote)) => {
            match SurrealStore::connect(
                &remote.url,
                &remote.namespace,
                &remote.database,
                remote.credentials.as_ref(),
            )
            .await
            {
                Ok(store) => {
                    let repository = ContentRepository::new(Arc::new(store), Some(local));
                    repository.seed_if_empty().await;
                    repository
                }
                Err(e) => {
                    tracing::error!("Remote content store unavailable: {}. Falling back to local store.", e);
                    ContentRepository::local(local)
                }
            }
        }
        _ => ContentRepository::local(local),
    };

    let auth = InMemoryAuthProvider::new();
    match &config.admin {
        Some(admin) => match auth.create_user(&admin.email, &admin.password, Role::Admin) {
            Ok(user) => tracing::info!("Admin account ready: {}", user.email),
            Err(e) => tracing::error!("Failed to create admin account: {}", e),
        },
        None => tracing::warn!("CMS_ADMIN_EMAIL not set; no account can edit content"),
    }

    tracing::info!("Content runtime ready (backend: {})", repository.backend_name());
    CmsRuntime::new(repository, Arc::new(auth))
}

/// Initialize the runtime from `config`.
/// Returns the existing instance if already initialized.
pub async fn init_runtime(config: &AppConfig) -> Arc<CmsRuntime> {
    RUNTIME
        .get_or_init(|| async { Arc::new(build_runtime(config).await) })
        .await
        .clone()
}

/// Get the runtime, initialising it from the environment on first use
pub async fn cms_runtime() -> Arc<CmsRuntime> {
    RUNTIME
        .get_or_init(|| async {
            let config = AppConfig::from_env().unwrap_or_else(|e| {
                tracing::error!("Configuration error: {}. Using defaults.", e);
                AppConfig::default()
            });
            Arc::new(build_runtime(&config).await)
        })
        .await
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AdminAccount;

    fn memory_config() -> AppConfig {
        AppConfig {
            data_dir: None,
            admin: Some(AdminAccount {
                email: "admin@nayacode.com.np".to_string(),
                password: "admin-pass".to_string(),
            }),
            ..AppConfig::default()
        }
    }

    #[tokio::test]
    async fn test_local_runtime_is_seeded_and_has_admin() {
        let runtime = build_runtime(&memory_config()).await;
        assert_eq!(runtime.repository.backend_name(), "local-memory");
        assert_eq!(runtime.repository.get_services().await.len(), 4);

        let session = runtime
            .auth
            .sign_in("admin@nayacode.com.np", "admin-pass")
            .await
            .unwrap();
        assert_eq!(session.user.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_unreachable_remote_falls_back_to_local() {
        let config = AppConfig {
            backend: BackendKind::Remote,
            remote: Some(crate::config::RemoteConfig {
                url: "bogus://nowhere".to_string(),
                namespace: "naya".to_string(),
                database: "cms".to_string(),
                credentials: None,
            }),
            ..memory_config()
        };
        let runtime = build_runtime(&config).await;
        assert_eq!(runtime.repository.backend_name(), "local-memory");
    }

    #[tokio::test]
    async fn test_embedded_surreal_backend() {
        let config = AppConfig {
            backend: BackendKind::Remote,
            remote: Some(crate::config::RemoteConfig {
                url: "mem://".to_string(),
                namespace: "naya".to_string(),
                database: "cms".to_string(),
                credentials: None,
            }),
            ..memory_config()
        };
        let runtime = build_runtime(&config).await;
        assert_eq!(runtime.repository.backend_name(), "surrealdb");
        // seeded on connect
        assert_eq!(runtime.repository.get_services().await.len(), 4);
        assert!(runtime.repository.get_form_submissions().await.is_empty());
    }
}
