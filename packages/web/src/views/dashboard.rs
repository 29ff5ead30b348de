//! Dashboard page, guarded on an authenticated session.

use dioxus::prelude::*;
use ui::{use_auth, views::DashboardView};

use crate::Route;

#[component]
pub fn Dashboard() -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    let state = auth();
    if state.loading {
        return rsx! {
            div { class: "page-loading", "Loading..." }
        };
    }
    if !state.is_authenticated() {
        nav.replace(Route::Login {});
        return rsx! {};
    }

    rsx! {
        DashboardView {
            on_logout: move |_| {
                nav.replace(Route::Login {});
            },
        }
    }
}
