use dioxus::prelude::*;
use ui::{use_auth, views::RegisterView};

use crate::Route;

#[component]
pub fn Register() -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    let state = auth();
    if !state.loading && state.is_authenticated() {
        nav.replace(Route::Dashboard {});
    }

    rsx! {
        RegisterView {
            on_registered: move |_| {
                nav.push(Route::Login {});
            },
        }
    }
}
