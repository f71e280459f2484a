// Server-side persistence, auth and runtime wiring

pub mod auth;
pub mod repository;
pub mod runtime;
pub mod storage;

pub use auth::{require_admin, require_editor, AuthProvider, InMemoryAuthProvider};
pub use repository::ContentRepository;
pub use runtime::{cms_runtime, init_runtime, CmsRuntime};
