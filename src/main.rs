//! Naya Code site - Main Entry Point
//!
//! Serves the Dioxus fullstack app with the REST API merged into its router.
//! Uses dioxus::serve() pattern for dx serve compatibility.

use naya_site::app::App;

// Server entry point - NO #[tokio::main], dioxus::serve() creates its own runtime
#[cfg(feature = "server")]
fn main() {
    use naya_site::config::AppConfig;
    use naya_site::handlers::api_router;
    use naya_site::infrastructure::init_runtime;

    // Initialize tracing BEFORE dioxus::serve
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting Naya Code site...");

    dioxus::serve(|| async move {
        let config = match AppConfig::from_env() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Invalid configuration ({}), using defaults", e);
                AppConfig::default()
            }
        };

        // Server functions and the REST API share this runtime
        let runtime = init_runtime(&config).await;

        Ok(dioxus::server::router(App).merge(api_router(runtime)))
    });
}

// WASM entry point (browser) - no server feature
#[cfg(all(not(feature = "server"), target_arch = "wasm32"))]
fn main() {
    web_sys::console::log_1(&"[WASM] Naya Code site - WASM initialized!".into());
    dioxus::launch(App);
}

// Native client (desktop) - no server feature, not WASM
#[cfg(all(not(feature = "server"), not(target_arch = "wasm32")))]
fn main() {
    dioxus::launch(App);
}
