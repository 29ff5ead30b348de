//! # Session context
//!
//! [`SessionContext`] owns the current user. Login, registration, restore and
//! logout all go through it, and it is the only writer of the persisted
//! `token` / `user` pair.
//!
//! ## Lifecycle
//!
//! | Step | Method |
//! |------|--------|
//! | Construct and restore | [`SessionContext::init`] |
//! | Adopt a user | private `set_user`, called by login, restore and refresh |
//! | Tear down | [`SessionContext::logout`] |
//!
//! Every change of user goes through `set_user`, which re-derives the
//! [`PermissionTable`]. The table is never mutated directly.
//!
//! ## Authentication check
//!
//! [`SessionContext::is_authenticated`] requires both an in-memory user and a
//! token in the store. The token half is read from the store on every call,
//! so clearing storage from elsewhere logs the session out on the next check.

use store::{SessionStore, StorageBackend};

use crate::auth::permissions::{derive_permissions, Permission, PermissionTable};
use crate::auth::registration::RegistrationForm;
use crate::client::InventoryApi;
use crate::error::ApiError;
use crate::models::{Credentials, RegisteredUser, Role, User, DEFAULT_DISPLAY_NAME};

#[derive(Clone, Debug)]
pub struct SessionContext<A, B> {
    api: A,
    store: SessionStore<B>,
    user: Option<User>,
    permissions: PermissionTable,
}

impl<A: InventoryApi, B: StorageBackend> SessionContext<A, B> {
    /// An empty session. Nothing is read from the store.
    pub fn new(api: A, store: SessionStore<B>) -> Self {
        Self {
            api,
            store,
            user: None,
            permissions: PermissionTable::default(),
        }
    }

    /// Construct and restore any persisted session.
    pub async fn init(api: A, store: SessionStore<B>) -> Self {
        let mut session = Self::new(api, store);
        session.restore_session().await;
        session
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn store(&self) -> &SessionStore<B> {
        &self.store
    }

    fn set_user(&mut self, user: Option<User>) {
        self.permissions = derive_permissions(user.as_ref());
        self.user = user;
    }

    /// Adopt the persisted user if the server still accepts its token.
    ///
    /// Returns whether a user was restored. Any failure, including an
    /// unreadable record or an unreachable server, clears the store.
    pub async fn restore_session(&mut self) -> bool {
        let stored = match self.store.load::<User>() {
            Ok(Some(stored)) => stored,
            Ok(None) => {
                self.set_user(None);
                return false;
            }
            Err(e) => {
                tracing::warn!("Discarding unreadable stored user: {}", e);
                self.store.clear();
                self.set_user(None);
                return false;
            }
        };

        match self.api.validate_token().await {
            Ok(()) => {
                tracing::info!("Restored session for {}", stored.user.username);
                self.set_user(Some(stored.user));
                true
            }
            Err(e) => {
                tracing::warn!("Stored token rejected: {}", e);
                self.store.clear();
                self.set_user(None);
                false
            }
        }
    }

    /// Sign in. On failure the current session is left as it was.
    pub async fn login(&mut self, credentials: &Credentials) -> Result<User, ApiError> {
        if credentials.username_or_email.trim().is_empty() {
            return Err(ApiError::validation(
                "usernameOrEmail",
                "Username or email is required",
            ));
        }
        if credentials.password.is_empty() {
            return Err(ApiError::validation("password", "Password is required"));
        }

        let response = self.api.login(credentials).await?;
        let user = response.user();
        if let Err(e) = self.store.save(&response.token, &user) {
            tracing::warn!("Failed to persist session: {}", e);
        }
        self.set_user(Some(user.clone()));
        tracing::info!("{}", welcome_message(&user));
        Ok(user)
    }

    /// Validate the form and create the account. The session is not touched;
    /// the new user still has to log in.
    pub async fn register(&self, form: &RegistrationForm) -> Result<RegisteredUser, ApiError> {
        let request = form.validate()?;
        let registered = self.api.register(&request).await?;
        tracing::info!("Registered account {}", request.username);
        Ok(registered)
    }

    /// Re-fetch the user record from the server and persist it.
    ///
    /// Does nothing unless authenticated. A server answer without a user
    /// keeps the current record.
    pub async fn refresh_current_user(&mut self) -> Result<Option<&User>, ApiError> {
        if !self.is_authenticated() {
            return Ok(None);
        }
        if let Some(user) = self.api.current_user().await? {
            if let Err(e) = self.store.replace_user(&user) {
                tracing::warn!("Failed to persist refreshed user: {}", e);
            }
            self.set_user(Some(user));
        }
        Ok(self.user.as_ref())
    }

    pub fn logout(&mut self) {
        if let Some(user) = &self.user {
            tracing::info!("Logging out {}", user.username);
        }
        self.store.clear();
        self.set_user(None);
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn permissions(&self) -> PermissionTable {
        self.permissions
    }

    /// Lookup by wire name, e.g. `"canDeleteProducts"`.
    pub fn has_permission(&self, key: &str) -> bool {
        self.permissions.has(key)
    }

    pub fn can(&self, permission: Permission) -> bool {
        self.permissions.get(permission)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.store.has_token()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }

    pub fn is_user(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_user)
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(User::effective_role)
    }

    pub fn display_name(&self) -> &str {
        self.user
            .as_ref()
            .map(User::display_name)
            .unwrap_or(DEFAULT_DISPLAY_NAME)
    }

    pub fn role_display_name(&self) -> &'static str {
        self.user
            .as_ref()
            .map(User::role_display_name)
            .unwrap_or(Role::User.display_name())
    }
}

/// Greeting shown after a successful login.
pub fn welcome_message(user: &User) -> String {
    if user.is_admin() {
        format!("Welcome, Administrator {}!", user.display_name())
    } else {
        format!("Welcome, {}!", user.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{user, FakeApi};
    use store::MemoryStore;

    fn api() -> FakeApi {
        FakeApi::new()
            .with_account("admin123", user("admin", "Administrador Sistema", "ADMIN"))
            .with_account("user123", user("jdoe", "John Doe", "USER"))
    }

    fn session(api: &FakeApi) -> SessionContext<FakeApi, MemoryStore> {
        SessionContext::new(api.clone(), SessionStore::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_admin_login() {
        let api = api();
        let mut ctx = session(&api);
        assert!(!ctx.is_authenticated());
        assert_eq!(ctx.permissions(), PermissionTable::default());

        let user = ctx
            .login(&Credentials::new("admin", "admin123"))
            .await
            .unwrap();
        assert_eq!(user.username, "admin");
        assert!(ctx.is_authenticated());
        assert!(ctx.is_admin());
        assert!(!ctx.is_user());
        assert_eq!(ctx.permissions().granted(), Permission::ALL.to_vec());
        assert!(ctx.has_permission("canDeleteProducts"));
        assert_eq!(ctx.display_name(), "Administrador Sistema");
        assert_eq!(ctx.role_display_name(), "Administrator");
        assert_eq!(ctx.store().token().as_deref(), Some("token-admin"));
    }

    #[tokio::test]
    async fn test_user_login_can_only_view() {
        let api = api();
        let mut ctx = session(&api);
        ctx.login(&Credentials::new("jdoe@example.com", "user123"))
            .await
            .unwrap();
        assert!(ctx.is_user());
        assert!(ctx.can(Permission::ViewProducts));
        assert!(!ctx.has_permission("canCreateProducts"));
        assert_eq!(ctx.role(), Some(Role::User));
    }

    #[tokio::test]
    async fn test_failed_login_leaves_session_untouched() {
        let api = api();
        let mut ctx = session(&api);
        ctx.login(&Credentials::new("jdoe", "user123")).await.unwrap();

        let err = ctx
            .login(&Credentials::new("admin", "wrong"))
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::Authentication("Invalid credentials".into()));
        assert_eq!(ctx.user().map(|u| u.username.as_str()), Some("jdoe"));
        assert_eq!(ctx.store().token().as_deref(), Some("token-jdoe"));
    }

    #[tokio::test]
    async fn test_empty_credentials_never_reach_the_network() {
        let api = api();
        let mut ctx = session(&api);
        let err = ctx.login(&Credentials::new("  ", "x")).await.unwrap_err();
        assert_eq!(err.field(), Some("usernameOrEmail"));
        let err = ctx.login(&Credentials::new("admin", "")).await.unwrap_err();
        assert_eq!(err.field(), Some("password"));
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn test_restore_with_valid_token() {
        let api = api();
        let store = SessionStore::new(MemoryStore::new());
        store
            .save("token-jdoe", &user("jdoe", "John Doe", "USER"))
            .unwrap();

        let ctx = SessionContext::init(api.clone(), store).await;
        assert!(ctx.is_authenticated());
        assert!(ctx.is_user());
        assert_eq!(api.calls(), vec!["validate_token"]);
    }

    #[tokio::test]
    async fn test_restore_with_rejected_token_clears_store() {
        let api = api();
        api.invalidate_tokens();
        let store = SessionStore::new(MemoryStore::new());
        store
            .save("stale", &user("admin", "Administrador Sistema", "ADMIN"))
            .unwrap();

        let ctx = SessionContext::init(api, store.clone()).await;
        assert!(ctx.user().is_none());
        assert!(!ctx.is_authenticated());
        assert!(store.token().is_none());
        assert!(store.backend().is_empty());
    }

    #[tokio::test]
    async fn test_restore_with_unreadable_user_clears_store() {
        let api = api();
        let backend = MemoryStore::new();
        backend.set(store::TOKEN_KEY, "token-jdoe");
        backend.set(store::USER_KEY, "{not json");

        let ctx = SessionContext::init(api.clone(), SessionStore::new(backend.clone())).await;
        assert!(ctx.user().is_none());
        assert!(backend.is_empty());
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn test_restore_without_stored_pair_skips_validation() {
        let api = api();
        let ctx = SessionContext::init(api.clone(), SessionStore::new(MemoryStore::new())).await;
        assert!(ctx.user().is_none());
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn test_external_clear_is_observed() {
        let api = api();
        let mut ctx = session(&api);
        ctx.login(&Credentials::new("admin", "admin123"))
            .await
            .unwrap();
        assert!(ctx.is_authenticated());

        ctx.store().clear();
        assert!(!ctx.is_authenticated());
        // The user record itself is still held
        assert!(ctx.is_admin());
    }

    #[tokio::test]
    async fn test_logout() {
        let api = api();
        let mut ctx = session(&api);
        ctx.login(&Credentials::new("admin", "admin123"))
            .await
            .unwrap();
        ctx.logout();
        assert!(ctx.user().is_none());
        assert!(ctx.store().backend().is_empty());
        assert_eq!(ctx.permissions(), PermissionTable::default());
        assert_eq!(ctx.display_name(), DEFAULT_DISPLAY_NAME);

        // Logging out twice is fine
        ctx.logout();
    }

    #[tokio::test]
    async fn test_register_does_not_log_in() {
        let api = api();
        let ctx = session(&api);
        let form = RegistrationForm {
            first_name: "Ana".into(),
            last_name: "Diaz".into(),
            username: "adiaz".into(),
            email: "ana@example.com".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
        };
        let registered = ctx.register(&form).await.unwrap();
        assert_eq!(registered.username.as_deref(), Some("adiaz"));
        assert!(ctx.user().is_none());
        assert!(ctx.store().backend().is_empty());

        let taken = RegistrationForm {
            username: "jdoe".into(),
            ..form
        };
        let err = ctx.register(&taken).await.unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Registration);
    }

    #[tokio::test]
    async fn test_register_validates_locally() {
        let api = api();
        let ctx = session(&api);
        let err = ctx
            .register(&RegistrationForm::default())
            .await
            .unwrap_err();
        assert_eq!(err.field(), Some("firstName"));
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn test_refresh_current_user() {
        let api = api();
        let mut ctx = session(&api);
        assert!(ctx.refresh_current_user().await.unwrap().is_none());
        assert_eq!(api.call_count(), 0);

        ctx.login(&Credentials::new("jdoe", "user123")).await.unwrap();
        api.set_current_user(user("jdoe", "John Doe", "ADMIN"));
        ctx.refresh_current_user().await.unwrap();
        assert!(ctx.is_admin());

        let stored = ctx.store().load::<User>().unwrap().unwrap();
        assert!(stored.user.is_admin());
        assert_eq!(stored.token, "token-jdoe");
    }

    #[test]
    fn test_welcome_message() {
        assert_eq!(
            welcome_message(&user("admin", "Ada", "ADMIN")),
            "Welcome, Administrator Ada!"
        );
        assert_eq!(welcome_message(&user("jdoe", "John", "USER")), "Welcome, John!");
    }
}
