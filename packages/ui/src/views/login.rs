use api::Credentials;
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant, Input, Label};
use crate::icons::{FaEye, FaEyeSlash, FaRightToBracket};
use crate::{use_auth, Icon};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Shared login form.
///
/// On success the logged-in session is committed to the auth signal and
/// `on_success` fires; the platform package decides where to navigate.
#[component]
pub fn LoginView(on_success: EventHandler<()>) -> Element {
    let mut auth = use_auth();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut show_password = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let Some(mut session) = auth.peek().session.clone() else {
            error.set(Some("The inventory service is not available".to_string()));
            return;
        };
        spawn(async move {
            error.set(None);
            loading.set(true);

            let credentials = Credentials::new(username().trim(), password());
            match session.login(&credentials).await {
                Ok(_) => {
                    let mut state = auth();
                    state.session = Some(session);
                    state.loading = false;
                    auth.set(state);
                    loading.set(false);
                    on_success.call(());
                }
                Err(e) => {
                    tracing::warn!("Login failed: {}", e);
                    loading.set(false);
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    let config_error = auth().error.map(|e| e.to_string());

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "auth-page",
            div {
                class: "auth-card",
                div {
                    class: "auth-card-icon",
                    Icon { icon: FaRightToBracket, width: 28, height: 28 }
                }
                h1 { "Welcome back" }
                p { class: "auth-subtitle", "Sign in to continue" }

                if let Some(err) = config_error {
                    div { class: "form-error", "{err}" }
                }
                if let Some(err) = error() {
                    div {
                        class: "form-error",
                        p { class: "form-error-title", "Authentication error" }
                        p { "{err}" }
                    }
                }

                form {
                    onsubmit: handle_login,
                    class: "auth-form",

                    Label { html_for: "login-username", "Username or email" }
                    Input {
                        id: "login-username",
                        placeholder: "admin or admin@example.com",
                        value: username(),
                        oninput: move |evt: FormEvent| {
                            username.set(evt.value());
                            error.set(None);
                        },
                    }

                    Label { html_for: "login-password", "Password" }
                    div {
                        class: "password-field",
                        Input {
                            id: "login-password",
                            r#type: if show_password() { "text" } else { "password" },
                            placeholder: "Password",
                            value: password(),
                            oninput: move |evt: FormEvent| {
                                password.set(evt.value());
                                error.set(None);
                            },
                        }
                        button {
                            r#type: "button",
                            class: "icon-btn",
                            title: if show_password() { "Hide password" } else { "Show password" },
                            onclick: move |_| show_password.toggle(),
                            if show_password() {
                                Icon { icon: FaEyeSlash, width: 14, height: 14 }
                            } else {
                                Icon { icon: FaEye, width: 14, height: 14 }
                            }
                        }
                    }

                    Button {
                        variant: ButtonVariant::Primary,
                        class: "w-full",
                        r#type: "submit",
                        disabled: loading(),
                        if loading() { "Signing in..." } else { "Sign in" }
                    }
                }

                p {
                    class: "auth-footer",
                    "No account yet? "
                    a { href: "/register", "Create one" }
                }
            }
        }
    }
}
