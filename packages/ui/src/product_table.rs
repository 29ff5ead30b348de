use api::{PermissionTable, Product};
use dioxus::prelude::*;

use crate::icons::{FaBoxOpen, FaEye, FaPen, FaTrash};
use crate::stats_grid::format_currency;
use crate::Icon;

/// The filtered product list. Edit and delete buttons only render when the
/// table grants them.
#[component]
pub fn ProductTable(
    products: Vec<Product>,
    permissions: PermissionTable,
    on_view: EventHandler<Product>,
    on_edit: EventHandler<Product>,
    on_delete: EventHandler<Product>,
    /// Shown instead of the table when `products` is empty.
    #[props(default = "No products found".to_string())]
    empty_message: String,
) -> Element {
    if products.is_empty() {
        return rsx! {
            div {
                class: "product-table-empty",
                Icon { icon: FaBoxOpen, width: 40, height: 40 }
                p { "{empty_message}" }
            }
        };
    }

    rsx! {
        table {
            class: "product-table",
            thead {
                tr {
                    th { "Product" }
                    th { "Category" }
                    th { "Brand" }
                    th { class: "numeric", "Price" }
                    th { class: "numeric", "Stock" }
                    th { "" }
                }
            }
            tbody {
                for product in products {
                    ProductRow {
                        key: "{product.id}",
                        product: product.clone(),
                        permissions,
                        on_view,
                        on_edit,
                        on_delete,
                    }
                }
            }
        }
    }
}

#[component]
fn ProductRow(
    product: Product,
    permissions: PermissionTable,
    on_view: EventHandler<Product>,
    on_edit: EventHandler<Product>,
    on_delete: EventHandler<Product>,
) -> Element {
    let level = product.stock_level();
    let badge_class = level.css_class();
    let badge_title = level.label();
    let price = format_currency(product.price);
    let view_target = product.clone();
    let edit_target = product.clone();
    let delete_target = product.clone();

    rsx! {
        tr {
            td {
                div { class: "product-name", "{product.name}" }
                if !product.description.is_empty() {
                    div { class: "product-description", "{product.description}" }
                }
            }
            td { "{product.category}" }
            td { "{product.brand}" }
            td { class: "numeric", "{price}" }
            td {
                class: "numeric",
                span {
                    class: "stock-badge {badge_class}",
                    title: badge_title,
                    "{product.stock}"
                }
            }
            td {
                class: "row-actions",
                button {
                    class: "icon-btn",
                    title: "View",
                    onclick: move |_| on_view.call(view_target.clone()),
                    Icon { icon: FaEye, width: 14, height: 14 }
                }
                if permissions.can_edit_products {
                    button {
                        class: "icon-btn",
                        title: "Edit",
                        onclick: move |_| on_edit.call(edit_target.clone()),
                        Icon { icon: FaPen, width: 14, height: 14 }
                    }
                }
                if permissions.can_delete_products {
                    button {
                        class: "icon-btn icon-btn--danger",
                        title: "Delete",
                        onclick: move |_| on_delete.call(delete_target.clone()),
                        Icon { icon: FaTrash, width: 14, height: 14 }
                    }
                }
            }
        }
    }
}
