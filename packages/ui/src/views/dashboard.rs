use api::{
    welcome_message, CategoryFilter, Deletion, Mutation, Permission, Product, ProductDraft,
    ProductFilter,
};
use dioxus::prelude::*;

use crate::alerts::{alert_error, push_alert, AlertLevel, AlertStack, Alerts};
use crate::components::{Button, ButtonVariant, Input};
use crate::icons::{FaArrowsRotate, FaMagnifyingGlass, FaPlus, FaTriangleExclamation};
use crate::inventory::Inventory;
use crate::product_modal::{ModalMode, ProductModal};
use crate::views::ModalOverlay;
use crate::{use_auth, Icon, LogoutButton, Navbar, PermissionsBadge, ProductTable, StatsGrid};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Shared dashboard view: stats, filters, product table and CRUD dialogs.
///
/// Expects an authenticated session; the platform package redirects away
/// before rendering it otherwise.
#[component]
pub fn DashboardView(on_logout: EventHandler<()>) -> Element {
    let auth = use_auth();
    let mut inventory: Signal<Inventory> = use_context_provider(|| {
        Signal::new(Inventory {
            directory: None,
            loading: true,
            revision: 0,
        })
    });
    let mut alerts: Signal<Alerts> = use_context_provider(|| Signal::new(Alerts::default()));

    let mut search = use_signal(String::new);
    let mut category = use_signal(|| CategoryFilter::All.as_selection().to_string());
    let mut modal = use_signal(|| Option::<(ModalMode, Option<Product>)>::None);
    let mut modal_error = use_signal(|| Option::<String>::None);
    let mut saving = use_signal(|| false);
    let mut pending_delete = use_signal(|| Option::<Product>::None);
    let mut remote_low_stock = use_signal(|| Option::<Vec<Product>>::None);

    // Load the collection on mount
    let _loader = use_resource(move || async move {
        let Some(session) = auth.peek().session.clone() else {
            return;
        };
        let (directory, error) = Inventory::load(&session).await;
        inventory.write().commit(directory);
        if let Some(e) = error {
            tracing::error!("Failed to load products: {}", e);
            alert_error(&mut alerts, "Could not load products", &e);
        }
    });

    // Server-side low-stock list, refetched after every commit
    let revision = use_memo(move || inventory.read().revision);
    let _low_stock_loader = use_resource(move || {
        let _ = revision();
        async move {
            let permissions = auth.peek().permissions();
            let Some(directory) = inventory.peek().snapshot() else {
                return;
            };
            if !permissions.can_view_low_stock || !directory.is_loaded() {
                return;
            }
            match directory.fetch_low_stock(&permissions).await {
                Ok(products) => remote_low_stock.set(Some(products)),
                Err(e) => {
                    tracing::warn!("Low-stock fetch failed, using local list: {}", e);
                    remote_low_stock.set(None);
                }
            }
        }
    });

    let mut apply_filter = move || {
        let filter = ProductFilter::new(search(), CategoryFilter::from_selection(&category()));
        let changed = inventory
            .peek()
            .directory
            .as_ref()
            .is_some_and(|d| *d.filter() != filter);
        if changed {
            if let Some(directory) = inventory.write().directory.as_mut() {
                directory.set_filter(filter);
            }
        }
    };

    let reload = move |_| {
        let Some(mut directory) = inventory.peek().snapshot() else {
            return;
        };
        spawn(async move {
            inventory.write().loading = true;
            match directory.refresh().await {
                Ok(()) => inventory.write().commit(directory),
                Err(e) => {
                    inventory.write().loading = false;
                    alert_error(&mut alerts, "Could not load products", &e);
                }
            }
        });
    };

    let open_create = move |_| {
        let permissions = auth.peek().permissions();
        match permissions.require(Permission::CreateProducts) {
            Ok(()) => {
                modal_error.set(None);
                modal.set(Some((ModalMode::Create, None)));
            }
            Err(e) => alert_error(&mut alerts, "Create failed", &e),
        }
    };

    let open_view = move |product: Product| {
        modal_error.set(None);
        modal.set(Some((ModalMode::View, Some(product.clone()))));
        let Some(directory) = inventory.peek().snapshot() else {
            return;
        };
        let permissions = auth.peek().permissions();
        spawn(async move {
            // Swap in the server's current record if the dialog is still on it
            match directory.fetch_product(&permissions, product.id).await {
                Ok(Some(fresh)) => {
                    let showing = matches!(
                        &*modal.peek(),
                        Some((ModalMode::View, Some(p))) if p.id == fresh.id
                    );
                    if showing {
                        modal.set(Some((ModalMode::View, Some(fresh))));
                    }
                }
                Ok(None) => tracing::warn!("Product {} no longer exists", product.id),
                Err(e) => tracing::warn!("Could not refetch product {}: {}", product.id, e),
            }
        });
    };

    let open_edit = move |product: Product| {
        let permissions = auth.peek().permissions();
        match permissions.require(Permission::EditProducts) {
            Ok(()) => {
                modal_error.set(None);
                modal.set(Some((ModalMode::Edit, Some(product))));
            }
            Err(e) => alert_error(&mut alerts, "Edit failed", &e),
        }
    };

    let ask_delete = move |product: Product| {
        let permissions = auth.peek().permissions();
        match permissions.require(Permission::DeleteProducts) {
            Ok(()) => pending_delete.set(Some(product)),
            Err(e) => alert_error(&mut alerts, "Delete failed", &e),
        }
    };

    let submit = move |draft: ProductDraft| {
        let Some(mut directory) = inventory.peek().snapshot() else {
            return;
        };
        let permissions = auth.peek().permissions();
        let editing = match &*modal.peek() {
            Some((ModalMode::Edit, Some(product))) => Some(product.id),
            _ => None,
        };
        saving.set(true);
        modal_error.set(None);
        spawn(async move {
            let result = match editing {
                Some(id) => directory
                    .update(&permissions, id, &draft)
                    .await
                    .map(|m| (format!("{} was updated", m.value.name), m)),
                None => directory
                    .create(&permissions, &draft)
                    .await
                    .map(|m| (format!("{} was added to the inventory", m.value.name), m)),
            };
            saving.set(false);
            match result {
                Ok((message, mutation)) => {
                    inventory.write().commit(directory);
                    modal.set(None);
                    report_saved(&mut alerts, "Product saved", &message, &mutation);
                }
                Err(e) if e.is_local() => alert_error(&mut alerts, "Save failed", &e),
                Err(e) => {
                    tracing::error!("Saving product failed: {}", e);
                    modal_error.set(Some(e.to_string()));
                }
            }
        });
    };

    let confirm_delete = move |_| {
        let Some(target) = pending_delete.take() else {
            return;
        };
        let Some(mut directory) = inventory.peek().snapshot() else {
            return;
        };
        let permissions = auth.peek().permissions();
        spawn(async move {
            // The user already confirmed; only go ahead if the row still exists
            let outcome = directory
                .delete(&permissions, target.id, |current| current.is_some())
                .await;
            match outcome {
                Ok(mutation) if mutation.value == Deletion::Deleted => {
                    inventory.write().commit(directory);
                    report_saved(
                        &mut alerts,
                        "Product deleted",
                        &format!("{} was removed from the inventory", target.name),
                        &mutation,
                    );
                }
                Ok(_) => push_alert(
                    &mut alerts,
                    AlertLevel::Warning,
                    "Nothing deleted",
                    "The product is no longer in the list",
                ),
                Err(e) => alert_error(&mut alerts, "Delete failed", &e),
            }
        });
    };

    // Snapshot everything the markup needs
    let state = auth();
    let permissions = state.permissions();
    let welcome = state.user().map(welcome_message).unwrap_or_default();
    let current = inventory();
    let loading = current.loading;
    let stale = current.directory.as_ref().is_some_and(|d| d.is_stale());
    let (rows, stats, categories, low_stock, filter_active) = match current.directory.as_ref() {
        Some(d) => (
            d.filtered().into_iter().cloned().collect::<Vec<_>>(),
            d.stats(),
            d.categories(),
            remote_low_stock()
                .unwrap_or_else(|| d.low_stock().into_iter().cloned().collect::<Vec<_>>()),
            !d.filter().is_empty(),
        ),
        None => Default::default(),
    };
    let empty_message = if filter_active {
        "No products match the current filters"
    } else if permissions.can_create_products {
        "No products yet. Create the first one."
    } else {
        "No products yet"
    };

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }

        Navbar {
            span { class: "navbar-welcome", "{welcome}" }
            PermissionsBadge { compact: true }
            LogoutButton {
                class: "btn btn-ghost",
                label: "Sign out",
                on_logout: move |_| on_logout.call(()),
            }
        }

        main {
            class: "dashboard",
            AlertStack {}

            StatsGrid { stats }

            div {
                class: "dashboard-columns",
                section {
                    class: "dashboard-products",
                    div {
                        class: "toolbar",
                        div {
                            class: "search-field",
                            Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
                            Input {
                                placeholder: "Search by name, description, brand or category",
                                value: search(),
                                oninput: move |evt: FormEvent| {
                                    search.set(evt.value());
                                    apply_filter();
                                },
                            }
                        }
                        select {
                            class: "category-select",
                            value: category(),
                            onchange: move |evt: FormEvent| {
                                category.set(evt.value());
                                apply_filter();
                            },
                            option { value: "all", "All categories" }
                            for name in categories {
                                option { key: "{name}", value: name.clone(), "{name}" }
                            }
                        }
                        if stale {
                            span { class: "stale-hint", "List may be out of date" }
                        }
                        Button {
                            variant: ButtonVariant::Outline,
                            title: "Reload",
                            disabled: loading,
                            onclick: reload,
                            Icon { icon: FaArrowsRotate, width: 14, height: 14 }
                        }
                        if permissions.can_create_products {
                            Button {
                                variant: ButtonVariant::Primary,
                                onclick: open_create,
                                Icon { icon: FaPlus, width: 14, height: 14 }
                                span { "New product" }
                            }
                        }
                    }

                    if loading {
                        div { class: "dashboard-loading", "Loading products..." }
                    } else {
                        ProductTable {
                            products: rows,
                            permissions,
                            on_view: open_view,
                            on_edit: open_edit,
                            on_delete: ask_delete,
                            empty_message: empty_message.to_string(),
                        }
                    }
                }

                aside {
                    class: "dashboard-side",
                    PermissionsBadge {}
                    if permissions.can_view_low_stock {
                        div {
                            class: "low-stock-card",
                            h3 {
                                Icon { icon: FaTriangleExclamation, width: 14, height: 14 }
                                " Low stock"
                            }
                            if low_stock.is_empty() {
                                p { class: "muted", "Every product is above the threshold" }
                            } else {
                                ul {
                                    for product in low_stock {
                                        li {
                                            key: "{product.id}",
                                            span { "{product.name}" }
                                            span { class: "stock-badge stock-low", "{product.stock}" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        if let Some((mode, product)) = modal() {
            ProductModal {
                mode,
                product,
                saving: saving(),
                error: modal_error(),
                on_close: move |_| modal.set(None),
                on_submit: submit,
            }
        }

        if let Some(target) = pending_delete() {
            ModalOverlay {
                on_close: move |_| pending_delete.set(None),
                div {
                    class: "confirm-dialog",
                    h2 { "Delete product?" }
                    p { "\"{target.name}\" will be removed permanently. This cannot be undone." }
                    div {
                        class: "product-modal-actions",
                        Button {
                            variant: ButtonVariant::Outline,
                            onclick: move |_| pending_delete.set(None),
                            "Cancel"
                        }
                        Button {
                            variant: ButtonVariant::Destructive,
                            onclick: confirm_delete,
                            "Delete"
                        }
                    }
                }
            }
        }
    }
}

/// Success alert for a mutation, or a warning when the list could not be
/// reloaded afterwards.
fn report_saved<T>(alerts: &mut Signal<Alerts>, title: &str, message: &str, mutation: &Mutation<T>) {
    match mutation.refresh_error() {
        None => push_alert(alerts, AlertLevel::Success, title, message),
        Some(e) => push_alert(
            alerts,
            AlertLevel::Warning,
            "Saved, but reload failed",
            &format!("{message}. The list may be out of date: {e}"),
        ),
    }
}
