use api::RegistrationForm;
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant, Input, Label};
use crate::icons::FaUserPlus;
use crate::{use_auth, Icon};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Delay between the success message and `on_registered` (web only).
#[cfg(target_arch = "wasm32")]
const REDIRECT_DELAY_MS: u32 = 2_000;

/// Shared sign-up form.
///
/// Registration never logs the user in. After the server accepts the account
/// a confirmation is shown and `on_registered` fires so the platform can send
/// the user to the login page.
#[component]
pub fn RegisterView(on_registered: EventHandler<()>) -> Element {
    let auth = use_auth();
    let mut form = use_signal(RegistrationForm::default);
    let mut error = use_signal(|| Option::<String>::None);
    let mut success = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        let Some(session) = auth.peek().session.clone() else {
            error.set(Some("The inventory service is not available".to_string()));
            return;
        };
        spawn(async move {
            error.set(None);
            success.set(None);
            loading.set(true);

            let result = session.register(&form()).await;
            loading.set(false);
            match result {
                Ok(_) => {
                    success.set(Some(
                        "Account created. You can now sign in.".to_string(),
                    ));
                    form.set(RegistrationForm::default());
                    #[cfg(target_arch = "wasm32")]
                    gloo_timers::future::TimeoutFuture::new(REDIRECT_DELAY_MS).await;
                    on_registered.call(());
                }
                Err(e) => {
                    tracing::warn!("Registration failed: {}", e);
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "auth-page",
            div {
                class: "auth-card",
                div {
                    class: "auth-card-icon",
                    Icon { icon: FaUserPlus, width: 28, height: 28 }
                }
                h1 { "Create account" }
                p { class: "auth-subtitle", "Join the inventory workspace" }

                if let Some(err) = error() {
                    div { class: "form-error", "{err}" }
                }
                if let Some(msg) = success() {
                    div { class: "form-success", "{msg}" }
                }

                form {
                    onsubmit: handle_register,
                    class: "auth-form",

                    div {
                        class: "form-row",
                        div {
                            Label { html_for: "register-first-name", "First name" }
                            Input {
                                id: "register-first-name",
                                value: form().first_name,
                                oninput: move |evt: FormEvent| form.write().first_name = evt.value(),
                            }
                        }
                        div {
                            Label { html_for: "register-last-name", "Last name" }
                            Input {
                                id: "register-last-name",
                                value: form().last_name,
                                oninput: move |evt: FormEvent| form.write().last_name = evt.value(),
                            }
                        }
                    }

                    Label { html_for: "register-username", "Username" }
                    Input {
                        id: "register-username",
                        value: form().username,
                        oninput: move |evt: FormEvent| form.write().username = evt.value(),
                    }

                    Label { html_for: "register-email", "Email" }
                    Input {
                        id: "register-email",
                        r#type: "email",
                        value: form().email,
                        oninput: move |evt: FormEvent| form.write().email = evt.value(),
                    }

                    Label { html_for: "register-password", "Password" }
                    Input {
                        id: "register-password",
                        r#type: "password",
                        placeholder: "At least 6 characters",
                        value: form().password,
                        oninput: move |evt: FormEvent| form.write().password = evt.value(),
                    }

                    Label { html_for: "register-confirm", "Confirm password" }
                    Input {
                        id: "register-confirm",
                        r#type: "password",
                        value: form().confirm_password,
                        oninput: move |evt: FormEvent| form.write().confirm_password = evt.value(),
                    }

                    Button {
                        variant: ButtonVariant::Primary,
                        class: "w-full",
                        r#type: "submit",
                        disabled: loading(),
                        if loading() { "Creating account..." } else { "Sign up" }
                    }
                }

                p {
                    class: "auth-footer",
                    "Already have an account? "
                    a { href: "/login", "Sign in" }
                }
            }
        }
    }
}
