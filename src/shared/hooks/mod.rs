// Custom Dioxus hooks
pub mod use_auth;
pub mod use_content;

pub use use_auth::{use_auth, use_auth_provider, AuthContext, AuthState};
pub use use_content::{use_content, use_content_provider, ContentContext};
