//! Login page.

use dioxus::prelude::*;
use ui::{use_auth, views::LoginView};

use crate::Route;

#[component]
pub fn Login() -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    // Already signed in (restored session): skip the form
    let state = auth();
    if !state.loading && state.is_authenticated() {
        nav.replace(Route::Dashboard {});
    }

    rsx! {
        LoginView {
            on_success: move |_| {
                nav.replace(Route::Dashboard {});
            },
        }
    }
}
