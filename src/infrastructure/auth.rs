//! Authentication provider
//!
//! The content layer only needs a narrow capability: who is behind a session
//! token and what role they hold. `InMemoryAuthProvider` backs development and
//! tests; an external identity service can implement the same trait.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::models::{AuthSession, AuthUser, Role, UserProfile};
use crate::domain::services::is_valid_email;
use crate::shared::errors::{AppError, Result, ValidationErrors};
use crate::shared::logging;

pub const MIN_PASSWORD_LEN: usize = 6;

#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Register a new account with the `User` role
    async fn sign_up(&self, email: &str, password: &str, full_name: Option<String>) -> Result<AuthUser>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession>;

    async fn sign_out(&self, token: &str) -> Result<()>;

    /// User behind a session token, if the session is live
    async fn current_user(&self, token: &str) -> Option<AuthUser>;

    /// Start a password reset. Succeeds for unknown emails too.
    async fn reset_password(&self, email: &str) -> Result<()>;

    async fn update_password(&self, token: &str, new_password: &str) -> Result<()>;

    async fn update_profile(&self, token: &str, profile: UserProfile) -> Result<AuthUser>;

    async fn list_users(&self) -> Vec<AuthUser>;

    async fn set_role(&self, user_id: &str, role: Role) -> Result<AuthUser>;
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn check_password(password: &str) -> Result<()> {
    let mut errors = ValidationErrors::new();
    if password.chars().count() < MIN_PASSWORD_LEN {
        errors.add(
            "password",
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        );
    }
    errors.into_result(())
}

struct Account {
    user: AuthUser,
    salt: String,
    password_hash: String,
}

impl Account {
    fn new(user: AuthUser, password: &str) -> Self {
        let salt = Uuid::new_v4().to_string();
        let password_hash = hash_password(&salt, password);
        Self { user, salt, password_hash }
    }

    fn verify(&self, password: &str) -> bool {
        hash_password(&self.salt, password) == self.password_hash
    }

    fn set_password(&mut self, password: &str) {
        self.salt = Uuid::new_v4().to_string();
        self.password_hash = hash_password(&self.salt, password);
    }
}

/// How long a sign-in session stays valid
pub const SESSION_TTL_HOURS: i64 = 24 * 7;

/// How long a password reset link stays valid
pub const RECOVERY_TTL_HOURS: i64 = 1;

struct Session {
    user_id: String,
    expires_at: DateTime<Utc>,
}

/// Process-local accounts and sessions
pub struct InMemoryAuthProvider {
    /// user id -> account
    accounts: DashMap<String, Account>,
    /// lowercased email -> user id; the entry API makes the uniqueness check atomic
    emails: DashMap<String, String>,
    /// session token -> session
    sessions: DashMap<String, Session>,
    /// email -> recovery session token awaiting use
    recovery: DashMap<String, String>,
    session_ttl: Duration,
    recovery_ttl: Duration,
}

impl Default for InMemoryAuthProvider {
    fn default() -> Self {
        Self {
            accounts: DashMap::new(),
            emails: DashMap::new(),
            sessions: DashMap::new(),
            recovery: DashMap::new(),
            session_ttl: Duration::hours(SESSION_TTL_HOURS),
            recovery_ttl: Duration::hours(RECOVERY_TTL_HOURS),
        }
    }
}

impl InMemoryAuthProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an account with an explicit role (used to bootstrap the admin)
    pub fn create_user(&self, email: &str, password: &str, role: Role) -> Result<AuthUser> {
        let email = email.trim().to_lowercase();
        let mut errors = ValidationErrors::new();
        if !is_valid_email(&email) {
            errors.add("email", "Please enter a valid email address");
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            errors.add(
                "password",
                format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
            );
        }
        errors.into_result(())?;

        let user = AuthUser {
            id: Uuid::new_v4().to_string(),
            email: email.clone(),
            role,
            profile: UserProfile::default(),
        };

        match self.emails.entry(email) {
            Entry::Occupied(_) => {
                let mut errors = ValidationErrors::new();
                errors.add("email", "An account with this email already exists");
                Err(AppError::Validation(errors))
            }
            Entry::Vacant(slot) => {
                // Account goes in while the email slot is still locked
                self.accounts
                    .insert(user.id.clone(), Account::new(user.clone(), password));
                slot.insert(user.id.clone());
                Ok(user)
            }
        }
    }

    fn find_by_email(&self, email: &str) -> Option<String> {
        self.emails.get(email).map(|entry| entry.value().clone())
    }

    /// Live session owner; expired sessions are dropped on lookup
    fn user_for_token(&self, token: &str) -> Option<String> {
        let now = Utc::now();
        let user_id = self
            .sessions
            .get(token)
            .filter(|session| session.expires_at > now)
            .map(|session| session.user_id.clone());
        if user_id.is_none() {
            self.sessions.remove_if(token, |_, session| session.expires_at <= now);
        }
        user_id
    }

    fn open_session(&self, user_id: &str, ttl: Duration) -> String {
        let now = Utc::now();
        self.sessions.retain(|_, session| session.expires_at > now);

        let token = Uuid::new_v4().to_string();
        self.sessions.insert(
            token.clone(),
            Session {
                user_id: user_id.to_string(),
                expires_at: now + ttl,
            },
        );
        token
    }
}

#[async_trait]
impl AuthProvider for InMemoryAuthProvider {
    async fn sign_up(&self, email: &str, password: &str, full_name: Option<String>) -> Result<AuthUser> {
        let user = self.create_user(email, password, Role::User)?;
        let user = match full_name.filter(|name| !name.trim().is_empty()) {
            Some(full_name) => {
                let mut entry = self
                    .accounts
                    .get_mut(&user.id)
                    .ok_or_else(|| AppError::Authentication("account vanished".to_string()))?;
                entry.user.profile.full_name = Some(full_name);
                entry.user.clone()
            }
            None => user,
        };
        logging::log_auth_event(&user.email, "sign_up");
        Ok(user)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
        let email = email.trim().to_lowercase();
        let user = self
            .find_by_email(&email)
            .and_then(|id| self.accounts.get(&id))
            .filter(|account| account.verify(password))
            .map(|account| account.user.clone());

        let Some(user) = user else {
            logging::log_auth_denied("sign_in", "invalid credentials");
            return Err(AppError::Authentication("Invalid email or password".to_string()));
        };

        let token = self.open_session(&user.id, self.session_ttl);
        logging::log_auth_event(&user.email, "sign_in");
        Ok(AuthSession { token, user })
    }

    async fn sign_out(&self, token: &str) -> Result<()> {
        if let Some((_, session)) = self.sessions.remove(token) {
            if let Some(account) = self.accounts.get(&session.user_id) {
                logging::log_auth_event(&account.user.email, "sign_out");
            }
        }
        Ok(())
    }

    async fn current_user(&self, token: &str) -> Option<AuthUser> {
        let user_id = self.user_for_token(token)?;
        self.accounts.get(&user_id).map(|account| account.user.clone())
    }

    /// Issues a short-lived recovery session. Without a mail transport the
    /// link is delivered through the log.
    async fn reset_password(&self, email: &str) -> Result<()> {
        let email = email.trim().to_lowercase();
        if let Some(user_id) = self.find_by_email(&email) {
            let token = self.open_session(&user_id, self.recovery_ttl);
            if let Some(previous) = self.recovery.insert(email.clone(), token.clone()) {
                self.sessions.remove(&previous);
            }
            logging::log_reset_link(&email, &format!("/login?reset={}", token));
        }
        Ok(())
    }

    async fn update_password(&self, token: &str, new_password: &str) -> Result<()> {
        check_password(new_password)?;
        let user_id = self
            .user_for_token(token)
            .ok_or_else(|| AppError::Authentication("Session expired".to_string()))?;

        let email = {
            let mut account = self
                .accounts
                .get_mut(&user_id)
                .ok_or_else(|| AppError::Authentication("Session expired".to_string()))?;
            account.set_password(new_password);
            account.user.email.clone()
        };
        // A reset link works once
        if let Some((_, recovery_token)) = self.recovery.remove(&email) {
            self.sessions.remove(&recovery_token);
        }
        logging::log_auth_event(&email, "update_password");
        Ok(())
    }

    async fn update_profile(&self, token: &str, profile: UserProfile) -> Result<AuthUser> {
        let user_id = self
            .user_for_token(token)
            .ok_or_else(|| AppError::Authentication("Session expired".to_string()))?;
        let mut account = self
            .accounts
            .get_mut(&user_id)
            .ok_or_else(|| AppError::Authentication("Session expired".to_string()))?;
        account.user.profile = UserProfile {
            full_name: profile.full_name.filter(|name| !name.trim().is_empty()),
            avatar_url: profile.avatar_url.filter(|url| !url.trim().is_empty()),
        };
        logging::log_auth_event(&account.user.email, "update_profile");
        Ok(account.user.clone())
    }

    async fn list_users(&self) -> Vec<AuthUser> {
        let mut users: Vec<AuthUser> = self
            .accounts
            .iter()
            .map(|entry| entry.value().user.clone())
            .collect();
        users.sort_by(|a, b| a.email.cmp(&b.email));
        users
    }

    async fn set_role(&self, user_id: &str, role: Role) -> Result<AuthUser> {
        let mut account = self
            .accounts
            .get_mut(user_id)
            .ok_or_else(|| AppError::Authorization(format!("Unknown user {}", user_id)))?;
        account.user.role = role;
        logging::log_auth_event(&account.user.email, role.as_str());
        Ok(account.user.clone())
    }
}

/// Resolve the session and check its role against `allowed`
pub async fn require_role(
    auth: &dyn AuthProvider,
    token: Option<&str>,
    allowed: fn(&Role) -> bool,
) -> Result<AuthUser> {
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        logging::log_auth_denied("require_role", "missing session");
        return Err(AppError::Authentication("Sign in required".to_string()));
    };

    let Some(user) = auth.current_user(token).await else {
        logging::log_auth_denied("require_role", "unknown session");
        return Err(AppError::Authentication("Session expired".to_string()));
    };

    if !allowed(&user.role) {
        logging::log_auth_denied("require_role", user.role.as_str());
        return Err(AppError::Authorization(format!(
            "{} may not perform this action",
            user.role.as_str()
        )));
    }

    Ok(user)
}

/// Admins and editors
pub async fn require_editor(auth: &dyn AuthProvider, token: Option<&str>) -> Result<AuthUser> {
    require_role(auth, token, Role::can_edit).await
}

pub async fn require_admin(auth: &dyn AuthProvider, token: Option<&str>) -> Result<AuthUser> {
    require_role(auth, token, Role::can_manage_users).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> InMemoryAuthProvider {
        let auth = InMemoryAuthProvider::new();
        auth.create_user("admin@nayacode.com.np", "admin-pass", Role::Admin).unwrap();
        auth.create_user("editor@nayacode.com.np", "editor-pass", Role::Editor).unwrap();
        auth.create_user("visitor@example.com", "visitor-pass", Role::User).unwrap();
        auth
    }

    #[tokio::test]
    async fn test_sign_in_and_current_user() {
        let auth = provider();
        let session = auth.sign_in("Editor@NayaCode.com.np", "editor-pass").await.unwrap();
        let user = auth.current_user(&session.token).await.unwrap();
        assert_eq!(user.role, Role::Editor);

        auth.sign_out(&session.token).await.unwrap();
        assert!(auth.current_user(&session.token).await.is_none());
    }

    #[tokio::test]
    async fn test_wrong_password_is_rejected() {
        let auth = provider();
        let result = auth.sign_in("editor@nayacode.com.np", "nope").await;
        assert!(matches!(result, Err(AppError::Authentication(_))));
    }

    #[tokio::test]
    async fn test_role_gates() {
        let auth = provider();
        let editor = auth.sign_in("editor@nayacode.com.np", "editor-pass").await.unwrap();
        let visitor = auth.sign_in("visitor@example.com", "visitor-pass").await.unwrap();
        let admin = auth.sign_in("admin@nayacode.com.np", "admin-pass").await.unwrap();

        assert!(require_editor(&auth, Some(&editor.token)).await.is_ok());
        assert!(require_editor(&auth, Some(&admin.token)).await.is_ok());
        assert!(matches!(
            require_editor(&auth, Some(&visitor.token)).await,
            Err(AppError::Authorization(_))
        ));
        assert!(matches!(
            require_admin(&auth, Some(&editor.token)).await,
            Err(AppError::Authorization(_))
        ));
        assert!(matches!(
            require_editor(&auth, None).await,
            Err(AppError::Authentication(_))
        ));
        assert!(matches!(
            require_editor(&auth, Some("stale")).await,
            Err(AppError::Authentication(_))
        ));
    }

    #[tokio::test]
    async fn test_set_role_promotes_user() {
        let auth = provider();
        let visitor = auth.sign_in("visitor@example.com", "visitor-pass").await.unwrap();
        auth.set_role(&visitor.user.id, Role::Editor).await.unwrap();
        assert!(require_editor(&auth, Some(&visitor.token)).await.is_ok());
        assert_eq!(auth.list_users().await.len(), 3);
    }

    fn pending_reset_token(auth: &InMemoryAuthProvider, email: &str) -> Option<String> {
        auth.recovery.get(email).map(|entry| entry.value().clone())
    }

    #[tokio::test]
    async fn test_reset_then_update_password() {
        let auth = provider();
        auth.reset_password("unknown@example.com").await.unwrap();
        auth.reset_password("visitor@example.com").await.unwrap();

        let token = pending_reset_token(&auth, "visitor@example.com").unwrap();
        assert!(matches!(
            auth.update_password(&token, "123").await,
            Err(AppError::Validation(_))
        ));
        auth.update_password(&token, "fresh-pass").await.unwrap();

        assert!(auth.sign_in("visitor@example.com", "visitor-pass").await.is_err());
        assert!(auth.sign_in("visitor@example.com", "fresh-pass").await.is_ok());
        assert!(pending_reset_token(&auth, "visitor@example.com").is_none());
        // The link cannot be reused
        assert!(auth.current_user(&token).await.is_none());
    }

    #[tokio::test]
    async fn test_second_reset_revokes_first_link() {
        let auth = provider();
        auth.reset_password("visitor@example.com").await.unwrap();
        let first = pending_reset_token(&auth, "visitor@example.com").unwrap();
        auth.reset_password("visitor@example.com").await.unwrap();

        assert!(auth.current_user(&first).await.is_none());
        assert!(matches!(
            auth.update_password(&first, "fresh-pass").await,
            Err(AppError::Authentication(_))
        ));
    }

    #[tokio::test]
    async fn test_expired_sessions_are_rejected_and_pruned() {
        let mut auth = InMemoryAuthProvider::new();
        auth.session_ttl = Duration::zero();
        auth.create_user("editor@nayacode.com.np", "editor-pass", Role::Editor).unwrap();

        let first = auth.sign_in("editor@nayacode.com.np", "editor-pass").await.unwrap();
        assert!(auth.current_user(&first.token).await.is_none());
        assert!(matches!(
            require_editor(&auth, Some(&first.token)).await,
            Err(AppError::Authentication(_))
        ));

        for _ in 0..5 {
            auth.sign_in("editor@nayacode.com.np", "editor-pass").await.unwrap();
        }
        // Each sign-in prunes the expired ones, so only the newest remains
        assert_eq!(auth.sessions.len(), 1);
    }

    #[tokio::test]
    async fn test_update_profile() {
        let auth = provider();
        let session = auth.sign_in("editor@nayacode.com.np", "editor-pass").await.unwrap();
        let user = auth
            .update_profile(
                &session.token,
                UserProfile {
                    full_name: Some("Sita Sharma".to_string()),
                    avatar_url: Some("  ".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(user.display_name(), "Sita Sharma");
        assert!(user.profile.avatar_url.is_none());
        assert!(matches!(
            auth.update_profile("stale", UserProfile::default()).await,
            Err(AppError::Authentication(_))
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_sign_ups_create_one_account() {
        let auth = std::sync::Arc::new(InMemoryAuthProvider::new());
        let attempts = (0..32).map(|_| {
            let auth = auth.clone();
            tokio::spawn(async move { auth.sign_up("same@example.com", "same-pass", None).await })
        });

        let created = futures::future::join_all(attempts)
            .await
            .into_iter()
            .filter(|result| matches!(result, Ok(Ok(_))))
            .count();
        assert_eq!(created, 1);
        assert_eq!(auth.list_users().await.len(), 1);
    }

    #[tokio::test]
    async fn test_sign_up_rejects_duplicates() {
        let auth = provider();
        let user = auth
            .sign_up("new@example.com", "new-pass", Some("New Person".to_string()))
            .await
            .unwrap();
        assert_eq!(user.role, Role::User);
        assert_eq!(user.display_name(), "New Person");
        assert!(matches!(
            auth.sign_up("new@example.com", "new-pass", None).await,
            Err(AppError::Validation(_))
        ));
    }
}
