//! Authentication context and hooks for the UI.

use api::{ApiError, PermissionTable, User};
use dioxus::prelude::*;

use crate::platform::{load_config, make_session, Session};

/// Authentication state for the application.
#[derive(Clone)]
pub struct AuthState {
    /// `None` until the provider has built the client, or when it could not.
    pub session: Option<Session>,
    pub loading: bool,
    /// Set when the client could not be constructed (bad base URL).
    pub error: Option<ApiError>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            session: None,
            loading: true,
            error: None,
        }
    }
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.session.as_ref().is_some_and(Session::is_authenticated)
    }

    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().and_then(Session::user)
    }

    pub fn permissions(&self) -> PermissionTable {
        self.session
            .as_ref()
            .map(Session::permissions)
            .unwrap_or_default()
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Provider component that builds the session and restores any stored login.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let mut auth_state = use_signal(AuthState::default);

    // Build the client and revalidate the stored token on mount
    let _ = use_resource(move || async move {
        let config = load_config();
        match make_session(&config) {
            Ok(mut session) => {
                if session.restore_session().await {
                    tracing::info!("Session restored for {}", session.display_name());
                }
                auth_state.set(AuthState {
                    session: Some(session),
                    loading: false,
                    error: None,
                });
            }
            Err(e) => {
                tracing::error!("Failed to set up the API client: {}", e);
                auth_state.set(AuthState {
                    session: None,
                    loading: false,
                    error: Some(e),
                });
            }
        }
    });

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
    #[props(default)] on_logout: EventHandler<()>,
) -> Element {
    let mut auth_state = use_auth();

    let onclick = move |_| {
        let mut state = auth_state();
        if let Some(session) = state.session.as_mut() {
            session.logout();
        }
        auth_state.set(state);
        on_logout.call(());
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
