//! Runtime configuration
//!
//! Read once at startup from the environment. The standalone API server
//! overrides individual values from its command-line flags.

use std::path::PathBuf;

use thiserror::Error;

use crate::infrastructure::storage::surreal::SurrealCredentials;

/// Value of `CMS_DATA_DIR` that keeps the local store in memory
pub const IN_MEMORY: &str = ":memory:";

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_NAMESPACE: &str = "naya";
const DEFAULT_DATABASE: &str = "cms";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Local,
    Remote,
}

impl std::str::FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(BackendKind::Local),
            "remote" | "surreal" | "surrealdb" => Ok(BackendKind::Remote),
            other => Err(ConfigError::Invalid {
                name: "CMS_BACKEND",
                value: other.to_string(),
            }),
        }
    }
}

/// SurrealDB connection settings
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub url: String,
    pub namespace: String,
    pub database: String,
    pub credentials: Option<SurrealCredentials>,
}

/// Account created at startup with the admin role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminAccount {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend: BackendKind,
    /// Local store directory; `None` keeps it in memory
    pub data_dir: Option<PathBuf>,
    /// Required when `backend` is `Remote`
    pub remote: Option<RemoteConfig>,
    pub port: u16,
    pub admin: Option<AdminAccount>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Local,
            data_dir: default_data_dir(),
            remote: None,
            port: DEFAULT_PORT,
            admin: None,
        }
    }
}

/// `<platform data dir>/naya-site`
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("naya-site"))
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; empty values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let backend = match var("CMS_BACKEND") {
            Some(value) => value.parse()?,
            None => BackendKind::Local,
        };

        let data_dir = match var("CMS_DATA_DIR") {
            Some(dir) if dir == IN_MEMORY => None,
            Some(dir) => Some(PathBuf::from(dir)),
            None => default_data_dir(),
        };

        let remote = match var("CMS_REMOTE_URL") {
            Some(url) => Some(RemoteConfig {
                url,
                namespace: var("CMS_REMOTE_NAMESPACE").unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
                database: var("CMS_REMOTE_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
                credentials: match (var("CMS_REMOTE_USER"), var("CMS_REMOTE_PASSWORD")) {
                    (Some(username), Some(password)) => Some(SurrealCredentials { username, password }),
                    _ => None,
                },
            }),
            None => None,
        };

        let port = match var("PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let admin = match (var("CMS_ADMIN_EMAIL"), var("CMS_ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(AdminAccount { email, password }),
            (Some(_), None) => return Err(ConfigError::Missing("CMS_ADMIN_PASSWORD")),
            _ => None,
        };

        let config = Self {
            backend,
            data_dir,
            remote,
            port,
            admin,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend == BackendKind::Remote && self.remote.is_none() {
            return Err(ConfigError::Missing("CMS_REMOTE_URL"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults_to_local_backend() {
        let config = config(&[]).unwrap();
        assert_eq!(config.backend, BackendKind::Local);
        assert_eq!(config.port, 3001);
        assert!(config.remote.is_none());
        assert!(config.admin.is_none());
    }

    #[test]
    fn test_remote_backend() {
        let config = config(&[
            ("CMS_BACKEND", "remote"),
            ("CMS_REMOTE_URL", "ws://db.internal:8000"),
            ("CMS_REMOTE_USER", "root"),
            ("CMS_REMOTE_PASSWORD", "secret"),
            ("CMS_DATA_DIR", IN_MEMORY),
        ])
        .unwrap();

        let remote = config.remote.unwrap();
        assert_eq!(config.backend, BackendKind::Remote);
        assert_eq!(remote.namespace, "naya");
        assert_eq!(remote.database, "cms");
        assert_eq!(remote.credentials.unwrap().username, "root");
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_remote_without_url_is_rejected() {
        assert_eq!(
            config(&[("CMS_BACKEND", "remote")]).unwrap_err(),
            ConfigError::Missing("CMS_REMOTE_URL")
        );
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            config(&[("CMS_BACKEND", "ftp")]),
            Err(ConfigError::Invalid { name: "CMS_BACKEND", .. })
        ));
        assert!(matches!(
            config(&[("PORT", "eighty")]),
            Err(ConfigError::Invalid { name: "PORT", .. })
        ));
        assert_eq!(
            config(&[("CMS_ADMIN_EMAIL", "admin@nayacode.com.np")]).unwrap_err(),
            ConfigError::Missing("CMS_ADMIN_PASSWORD")
        );
    }
}
