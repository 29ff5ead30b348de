use api::InventoryStats;
use dioxus::prelude::*;

use crate::icons::{FaBoxesStacked, FaDollarSign, FaTags, FaTriangleExclamation};
use crate::Icon;

/// Counts above 1000 are shortened to one decimal, e.g. `1.2K`.
pub fn format_count(value: usize) -> String {
    if value > 1000 {
        format!("{:.1}K", value as f64 / 1000.0)
    } else {
        value.to_string()
    }
}

/// Currency with two decimals and thousands separators: `$12,345.60`.
pub fn format_currency(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

#[component]
fn StatsCard(title: String, value: String, subtitle: String, tone: String, icon: Element) -> Element {
    rsx! {
        div {
            class: "stats-card stats-card--{tone}",
            div {
                class: "stats-card-text",
                p { class: "stats-card-title", "{title}" }
                p { class: "stats-card-value", "{value}" }
                p { class: "stats-card-subtitle", "{subtitle}" }
            }
            span { class: "stats-card-icon", {icon} }
        }
    }
}

/// Dashboard cards computed over the whole collection.
#[component]
pub fn StatsGrid(stats: InventoryStats) -> Element {
    let low_stock_note = if stats.low_stock > 0 {
        "Needs attention"
    } else {
        "All good"
    };

    rsx! {
        div {
            class: "stats-grid",
            StatsCard {
                title: "Total products",
                value: format_count(stats.total),
                subtitle: "Full inventory",
                tone: "blue",
                icon: rsx! { Icon { icon: FaBoxesStacked, width: 22, height: 22 } },
            }
            StatsCard {
                title: "Low stock",
                value: stats.low_stock.to_string(),
                subtitle: low_stock_note,
                tone: if stats.low_stock > 0 { "orange" } else { "green" },
                icon: rsx! { Icon { icon: FaTriangleExclamation, width: 22, height: 22 } },
            }
            StatsCard {
                title: "Categories",
                value: stats.categories.to_string(),
                subtitle: "Distinct types",
                tone: "purple",
                icon: rsx! { Icon { icon: FaTags, width: 22, height: 22 } },
            }
            StatsCard {
                title: "Total value",
                value: format_currency(stats.total_value),
                subtitle: "Inventory value",
                tone: "green",
                icon: rsx! { Icon { icon: FaDollarSign, width: 22, height: 22 } },
            }
        }
    }
}
