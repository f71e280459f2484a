use dioxus::prelude::*;

use crate::domain::models::{AuthUser, Role};
use crate::server_fns;

/// Local storage key holding the session token
pub const SESSION_STORAGE_KEY: &str = "naya-cms-session";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub token: Option<String>,
    pub user: Option<AuthUser>,
    /// The stored session has been checked against the server
    pub checked: bool,
}

/// Session handle shared through context
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: Signal<AuthState>,
}

impl AuthContext {
    pub fn token(&self) -> Option<String> {
        self.state.read().token.clone()
    }

    pub fn user(&self) -> Option<AuthUser> {
        self.state.read().user.clone()
    }

    pub fn role(&self) -> Role {
        self.state
            .read()
            .user
            .as_ref()
            .map(|user| user.role)
            .unwrap_or_default()
    }

    pub fn can_edit(&self) -> bool {
        self.role().can_edit()
    }

    pub fn is_admin(&self) -> bool {
        self.role().can_manage_users()
    }

    pub async fn sign_in(mut self, email: String, password: String) -> Result<AuthUser, String> {
        let session = server_fns::sign_in(email, password)
            .await
            .map_err(|e| e.to_string())?;
        save_token(&session.token);
        self.state.set(AuthState {
            token: Some(session.token),
            user: Some(session.user.clone()),
            checked: true,
        });
        Ok(session.user)
    }

    pub async fn sign_out(mut self) {
        if let Some(token) = self.token() {
            if let Err(e) = server_fns::sign_out(token).await {
                tracing::warn!("Sign-out failed: {}", e);
            }
        }
        clear_token();
        self.state.set(AuthState {
            checked: true,
            ..Default::default()
        });
    }

    /// Replace the cached user after a profile change
    pub fn set_user(mut self, user: AuthUser) {
        self.state.write().user = Some(user);
    }

    /// Re-validate the stored token; a stale one is dropped
    pub async fn restore(mut self) {
        let Some(token) = load_token() else {
            self.state.write().checked = true;
            return;
        };

        let user = server_fns::current_user(token.clone()).await.ok().flatten();
        if user.is_none() {
            clear_token();
        }
        self.state.set(AuthState {
            token: user.as_ref().map(|_| token),
            user,
            checked: true,
        });
    }
}

/// Provide the auth context and restore any stored session, once
pub fn use_auth_provider() -> AuthContext {
    let state = use_signal(AuthState::default);
    let auth = use_context_provider(|| AuthContext { state });
    use_hook(|| spawn(async move { auth.restore().await }));
    auth
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>()
}

/// Stored session token
#[cfg(target_arch = "wasm32")]
pub fn load_token() -> Option<String> {
    web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(SESSION_STORAGE_KEY).ok().flatten())
        .filter(|token| !token.is_empty())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_token() -> Option<String> {
    None
}

#[cfg(target_arch = "wasm32")]
fn save_token(token: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(SESSION_STORAGE_KEY, token);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn save_token(_token: &str) {
    // No-op on server
}

#[cfg(target_arch = "wasm32")]
fn clear_token() {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.remove_item(SESSION_STORAGE_KEY);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn clear_token() {
    // No-op on server
}
