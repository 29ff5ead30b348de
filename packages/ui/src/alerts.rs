use api::{ApiError, ErrorKind};
use dioxus::prelude::*;

use crate::icons::{FaCircleCheck, FaCircleInfo, FaCircleXmark, FaTriangleExclamation, FaXmark};
use crate::Icon;

/// Alerts close themselves after this long (web only).
const AUTO_DISMISS_MS: u32 = 5_000;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AlertLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl AlertLevel {
    fn class(self) -> &'static str {
        match self {
            AlertLevel::Info => "alert alert-info",
            AlertLevel::Success => "alert alert-success",
            AlertLevel::Warning => "alert alert-warning",
            AlertLevel::Error => "alert alert-error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Alert {
    pub id: u64,
    pub timestamp: String,
    pub level: AlertLevel,
    pub title: String,
    pub message: String,
}

#[derive(Clone, Debug, Default)]
pub struct Alerts {
    pub entries: Vec<Alert>,
    next_id: u64,
}

pub fn use_alerts() -> Signal<Alerts> {
    use_context::<Signal<Alerts>>()
}

pub fn push_alert(alerts: &mut Signal<Alerts>, level: AlertLevel, title: &str, message: &str) {
    let ts = current_time();
    let id = {
        let mut state = alerts.write();
        let id = state.next_id;
        state.next_id += 1;
        state.entries.push(Alert {
            id,
            timestamp: ts,
            level,
            title: title.to_string(),
            message: message.to_string(),
        });
        id
    };

    #[cfg(target_arch = "wasm32")]
    {
        let mut alerts = *alerts;
        spawn(async move {
            gloo_timers::future::TimeoutFuture::new(AUTO_DISMISS_MS).await;
            dismiss_alert(&mut alerts, id);
        });
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = (id, AUTO_DISMISS_MS);
}

pub fn dismiss_alert(alerts: &mut Signal<Alerts>, id: u64) {
    alerts.write().entries.retain(|a| a.id != id);
}

/// Push the alert matching an operation failure. `title` is used for
/// network and server failures.
pub fn alert_error(alerts: &mut Signal<Alerts>, title: &str, err: &ApiError) {
    match err.kind() {
        ErrorKind::PermissionDenied => {
            push_alert(alerts, AlertLevel::Error, api::error::ACCESS_DENIED, &err.to_string())
        }
        ErrorKind::Validation => {
            push_alert(alerts, AlertLevel::Warning, "Invalid input", &err.to_string())
        }
        _ => push_alert(alerts, AlertLevel::Error, title, &err.to_string()),
    }
}

#[cfg(target_arch = "wasm32")]
fn current_time() -> String {
    let date = js_sys::Date::new_0();
    let h = date.get_hours();
    let m = date.get_minutes();
    let s = date.get_seconds();
    format!("{h:02}:{m:02}:{s:02}")
}

#[cfg(not(target_arch = "wasm32"))]
fn current_time() -> String {
    "00:00:00".to_string()
}

fn level_icon(level: AlertLevel) -> Element {
    match level {
        AlertLevel::Info => rsx! { Icon { icon: FaCircleInfo, width: 16, height: 16 } },
        AlertLevel::Success => rsx! { Icon { icon: FaCircleCheck, width: 16, height: 16 } },
        AlertLevel::Warning => rsx! { Icon { icon: FaTriangleExclamation, width: 16, height: 16 } },
        AlertLevel::Error => rsx! { Icon { icon: FaCircleXmark, width: 16, height: 16 } },
    }
}

#[component]
pub fn AlertStack() -> Element {
    let mut alerts = use_alerts();
    let entries = alerts().entries.clone();

    rsx! {
        div {
            class: "alert-stack",
            for alert in entries {
                div {
                    key: "{alert.id}",
                    class: alert.level.class(),
                    span { class: "alert-icon", {level_icon(alert.level)} }
                    div {
                        class: "alert-body",
                        p { class: "alert-title", "{alert.title}" }
                        p { class: "alert-message", "{alert.message}" }
                    }
                    span { class: "alert-time", "{alert.timestamp}" }
                    button {
                        class: "alert-close",
                        title: "Dismiss",
                        onclick: move |_| dismiss_alert(&mut alerts, alert.id),
                        Icon { icon: FaXmark, width: 12, height: 12 }
                    }
                }
            }
        }
    }
}
