//! Standalone API server (without Dioxus frontend)
//! Use this for API-only testing or backend development.
//!
//! Run with: cargo run --bin server --features server -- --port 3003 --data-dir :memory:

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tower_http::cors::CorsLayer;

use naya_site::config::{AdminAccount, AppConfig, BackendKind, RemoteConfig, IN_MEMORY};
use naya_site::handlers::api_router;
use naya_site::infrastructure::init_runtime;

/// Flags override the matching CMS_* environment variables
#[derive(Parser, Debug)]
#[command(name = "naya-server")]
#[command(about = "Naya Code content API")]
struct Args {
    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,

    /// Storage backend: local or remote
    #[arg(long)]
    backend: Option<BackendKind>,

    /// Local store directory (":memory:" keeps everything in memory)
    #[arg(long)]
    data_dir: Option<String>,

    /// SurrealDB endpoint, e.g. ws://localhost:8000
    #[arg(long)]
    remote_url: Option<String>,

    /// SurrealDB namespace
    #[arg(long)]
    remote_namespace: Option<String>,

    /// SurrealDB database
    #[arg(long)]
    remote_database: Option<String>,

    /// Bootstrap admin email (password comes from CMS_ADMIN_PASSWORD or --admin-password)
    #[arg(long)]
    admin_email: Option<String>,

    #[arg(long)]
    admin_password: Option<String>,
}

impl Args {
    fn apply(self, mut config: AppConfig) -> anyhow::Result<AppConfig> {
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(backend) = self.backend {
            config.backend = backend;
        }
        if let Some(dir) = self.data_dir {
            config.data_dir = (dir != IN_MEMORY).then(|| PathBuf::from(dir));
        }

        if let Some(url) = self.remote_url {
            let mut remote = config.remote.take().unwrap_or(RemoteConfig {
                url: String::new(),
                namespace: "naya".to_string(),
                database: "cms".to_string(),
                credentials: None,
            });
            remote.url = url;
            config.remote = Some(remote);
        }
        if let Some(remote) = config.remote.as_mut() {
            if let Some(namespace) = self.remote_namespace {
                remote.namespace = namespace;
            }
            if let Some(database) = self.remote_database {
                remote.database = database;
            }
        }

        match (self.admin_email, self.admin_password) {
            (Some(email), Some(password)) => config.admin = Some(AdminAccount { email, password }),
            (Some(email), None) => {
                let password = config
                    .admin
                    .take()
                    .map(|admin| admin.password)
                    .context("--admin-email needs --admin-password or CMS_ADMIN_PASSWORD")?;
                config.admin = Some(AdminAccount { email, password });
            }
            (None, Some(password)) => {
                if let Some(admin) = config.admin.as_mut() {
                    admin.password = password;
                }
            }
            (None, None) => {}
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting Naya Code API server (standalone)...");

    let args = Args::parse();
    let config = args.apply(AppConfig::from_env()?)?;

    let runtime = init_runtime(&config).await;

    let app = api_router(runtime).layer(CorsLayer::permissive());

    // Run the server
    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    tracing::info!("Server running on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from([
            "naya-server",
            "--port",
            "4000",
            "--backend",
            "remote",
            "--remote-url",
            "mem://",
            "--data-dir",
            ":memory:",
        ]);
        let config = args.apply(AppConfig::default()).unwrap();
        assert_eq!(config.port, 4000);
        assert_eq!(config.backend, BackendKind::Remote);
        assert!(config.data_dir.is_none());
        assert_eq!(config.remote.map(|r| r.url).as_deref(), Some("mem://"));
    }

    #[test]
    fn test_remote_backend_without_url_is_rejected() {
        let args = Args::parse_from(["naya-server", "--backend", "remote"]);
        assert!(args.apply(AppConfig::default()).is_err());
    }
}
