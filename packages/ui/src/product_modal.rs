use api::{Product, ProductDraft, ProductForm};
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant, Input, Label};
use crate::icons::FaXmark;
use crate::stats_grid::format_currency;
use crate::views::ModalOverlay;
use crate::Icon;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ModalMode {
    View,
    Create,
    Edit,
}

impl ModalMode {
    fn title(self) -> &'static str {
        match self {
            ModalMode::View => "Product details",
            ModalMode::Create => "New product",
            ModalMode::Edit => "Edit product",
        }
    }
}

/// Create, edit or inspect one product.
///
/// The form is parsed and validated here; `on_submit` only ever receives a
/// valid draft. `error` shows a failure reported by the caller after submit.
#[component]
pub fn ProductModal(
    mode: ModalMode,
    product: Option<Product>,
    on_close: EventHandler<()>,
    on_submit: EventHandler<ProductDraft>,
    #[props(default)] saving: bool,
    #[props(default)] error: Option<String>,
) -> Element {
    let initial = product.as_ref().map(ProductForm::from_product).unwrap_or_default();
    let mut form = use_signal(|| initial);
    let mut local_error = use_signal(|| Option::<String>::None);
    let read_only = mode == ModalMode::View;

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if read_only {
            return;
        }
        match form().into_draft() {
            Ok(draft) => {
                local_error.set(None);
                on_submit.call(draft);
            }
            Err(e) => local_error.set(Some(e.to_string())),
        }
    };

    let shown_error = local_error().or(error);
    let title = mode.title();

    rsx! {
        ModalOverlay {
            on_close: move |_| on_close.call(()),
            div {
                class: "product-modal",
                div {
                    class: "product-modal-header",
                    h2 { "{title}" }
                    button {
                        class: "icon-btn",
                        title: "Close",
                        onclick: move |_| on_close.call(()),
                        Icon { icon: FaXmark, width: 14, height: 14 }
                    }
                }

                if let Some(err) = shown_error {
                    div { class: "form-error", "{err}" }
                }

                if read_only {
                    if let Some(p) = product.clone() {
                        ProductDetails { product: p }
                    }
                } else {
                    form {
                        class: "product-form",
                        onsubmit: handle_submit,

                        Label { html_for: "product-name", "Name" }
                        Input {
                            id: "product-name",
                            value: form().name,
                            oninput: move |evt: FormEvent| form.write().name = evt.value(),
                        }

                        Label { html_for: "product-description", "Description" }
                        Input {
                            id: "product-description",
                            value: form().description,
                            oninput: move |evt: FormEvent| form.write().description = evt.value(),
                        }

                        div {
                            class: "form-row",
                            div {
                                Label { html_for: "product-price", "Price" }
                                Input {
                                    id: "product-price",
                                    r#type: "number",
                                    step: "0.01",
                                    min: "0",
                                    value: form().price,
                                    oninput: move |evt: FormEvent| form.write().price = evt.value(),
                                }
                            }
                            div {
                                Label { html_for: "product-stock", "Stock" }
                                Input {
                                    id: "product-stock",
                                    r#type: "number",
                                    step: "1",
                                    min: "0",
                                    value: form().stock,
                                    oninput: move |evt: FormEvent| form.write().stock = evt.value(),
                                }
                            }
                        }

                        div {
                            class: "form-row",
                            div {
                                Label { html_for: "product-category", "Category" }
                                Input {
                                    id: "product-category",
                                    value: form().category,
                                    oninput: move |evt: FormEvent| form.write().category = evt.value(),
                                }
                            }
                            div {
                                Label { html_for: "product-brand", "Brand" }
                                Input {
                                    id: "product-brand",
                                    value: form().brand,
                                    oninput: move |evt: FormEvent| form.write().brand = evt.value(),
                                }
                            }
                        }

                        div {
                            class: "product-modal-actions",
                            Button {
                                variant: ButtonVariant::Outline,
                                onclick: move |_| on_close.call(()),
                                "Cancel"
                            }
                            Button {
                                variant: ButtonVariant::Primary,
                                r#type: "submit",
                                disabled: saving,
                                if saving { "Saving..." } else { "Save" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ProductDetails(product: Product) -> Element {
    let price = format_currency(product.price);
    let value = format_currency(product.value());
    let level = product.stock_level().label();

    rsx! {
        dl {
            class: "product-details",
            dt { "Name" }
            dd { "{product.name}" }
            dt { "Description" }
            dd { "{product.description}" }
            dt { "Category" }
            dd { "{product.category}" }
            dt { "Brand" }
            dd { "{product.brand}" }
            dt { "Price" }
            dd { "{price}" }
            dt { "Stock" }
            dd { "{product.stock} ({level})" }
            dt { "Value" }
            dd { "{value}" }
        }
    }
}
