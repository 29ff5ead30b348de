//! # Product directory
//!
//! [`ProductDirectory`] holds the whole product collection as last fetched,
//! plus the current [`ProductFilter`] and the views derived from them.
//!
//! ## State
//!
//! | Field | Recomputed when |
//! |-------|-----------------|
//! | collection | [`refresh`](ProductDirectory::refresh) succeeds (replaced wholesale) |
//! | stats | the collection is replaced |
//! | filtered view | the collection is replaced or the filter changes |
//!
//! Setting a filter equal to the current one does nothing.
//!
//! ## Mutations
//!
//! `create`, `update` and `delete` take the caller's [`PermissionTable`] and
//! run the same three steps:
//!
//! 1. Permission gate. A missing permission fails with
//!    [`ApiError::PermissionDenied`] and no request is made.
//! 2. Local checks: draft validation for create/update, the confirmation
//!    callback for delete. A declined confirmation returns
//!    [`Deletion::Cancelled`].
//! 3. The request, then a full [`refresh`](ProductDirectory::refresh).
//!
//! A failed request returns `Err` and leaves the collection exactly as it
//! was. Once the server has accepted the change the call returns `Ok`, even
//! if the refetch then fails; that failure is reported in the returned
//! [`Mutation`] and the directory is marked stale.

use crate::auth::{Permission, PermissionTable};
use crate::client::InventoryApi;
use crate::error::ApiError;
use crate::models::{Product, ProductDraft, ProductId};
use crate::products::filter::{matching_indices, ProductFilter};
use crate::products::stats::{distinct_categories, InventoryStats};

/// Outcome of [`ProductDirectory::delete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deletion {
    Deleted,
    Cancelled,
}

/// A change the server accepted, plus how the refetch after it went.
///
/// `refresh` is `Err` when the refetch failed. The change still happened on
/// the server; the local collection is stale until the next successful
/// [`refresh`](ProductDirectory::refresh).
#[derive(Debug, Clone, PartialEq)]
pub struct Mutation<T> {
    pub value: T,
    pub refresh: Result<(), ApiError>,
}

impl<T> Mutation<T> {
    fn unchanged(value: T) -> Self {
        Self {
            value,
            refresh: Ok(()),
        }
    }

    pub fn is_stale(&self) -> bool {
        self.refresh.is_err()
    }

    pub fn refresh_error(&self) -> Option<&ApiError> {
        self.refresh.as_ref().err()
    }
}

#[derive(Clone, Debug)]
pub struct ProductDirectory<A> {
    api: A,
    products: Vec<Product>,
    filter: ProductFilter,
    /// Indices into `products` that pass `filter`.
    visible: Vec<usize>,
    stats: InventoryStats,
    loaded: bool,
    stale: bool,
}

impl<A: InventoryApi> ProductDirectory<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            products: Vec::new(),
            filter: ProductFilter::default(),
            visible: Vec::new(),
            stats: InventoryStats::default(),
            loaded: false,
            stale: false,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Fetch the full collection and replace the local copy.
    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        let products = self.api.list_products().await?;
        tracing::debug!("Loaded {} products", products.len());
        self.products = products;
        self.stats = InventoryStats::from_products(&self.products);
        self.recompute_visible();
        self.loaded = true;
        self.stale = false;
        Ok(())
    }

    /// Take the collection from `other`, usually a copy an operation ran on,
    /// and keep this directory's filter.
    pub fn adopt_collection(&mut self, other: Self) {
        self.products = other.products;
        self.stats = other.stats;
        self.loaded = other.loaded;
        self.stale = other.stale;
        self.recompute_visible();
    }

    /// Replace the filter. Returns `false` when it was already in effect.
    pub fn set_filter(&mut self, filter: ProductFilter) -> bool {
        if filter == self.filter {
            return false;
        }
        self.filter = filter;
        self.recompute_visible();
        true
    }

    fn recompute_visible(&mut self) {
        self.visible = matching_indices(&self.products, &self.filter);
    }

    pub fn filter(&self) -> &ProductFilter {
        &self.filter
    }

    /// Products passing the current filter, in collection order.
    pub fn filtered(&self) -> Vec<&Product> {
        self.visible.iter().map(|&i| &self.products[i]).collect()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn stats(&self) -> InventoryStats {
        self.stats
    }

    pub fn categories(&self) -> Vec<String> {
        distinct_categories(&self.products)
    }

    pub fn low_stock(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_low_stock()).collect()
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Whether a refresh has succeeded at least once.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Whether a change was accepted but the refetch after it failed.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// The server's current record for `id`. Does not touch the collection.
    pub async fn fetch_product(
        &self,
        permissions: &PermissionTable,
        id: ProductId,
    ) -> Result<Option<Product>, ApiError> {
        permissions.require(Permission::ViewProducts)?;
        self.api.get_product(id).await
    }

    /// The server's low-stock list. Does not touch the collection.
    pub async fn fetch_low_stock(
        &self,
        permissions: &PermissionTable,
    ) -> Result<Vec<Product>, ApiError> {
        permissions.require(Permission::ViewLowStock)?;
        self.api.low_stock_products().await
    }

    async fn settle<T>(&mut self, value: T) -> Mutation<T> {
        let refresh = self.refresh().await;
        if let Err(e) = &refresh {
            tracing::warn!("Refetch after a change failed: {}", e);
            self.stale = true;
        }
        Mutation { value, refresh }
    }

    pub async fn create(
        &mut self,
        permissions: &PermissionTable,
        draft: &ProductDraft,
    ) -> Result<Mutation<Product>, ApiError> {
        permissions.require(Permission::CreateProducts)?;
        draft.validate()?;
        let created = self.api.create_product(draft).await?;
        tracing::info!("Created product {} ({})", created.id, created.name);
        Ok(self.settle(created).await)
    }

    /// Full record replace.
    pub async fn update(
        &mut self,
        permissions: &PermissionTable,
        id: ProductId,
        draft: &ProductDraft,
    ) -> Result<Mutation<Product>, ApiError> {
        permissions.require(Permission::EditProducts)?;
        draft.validate()?;
        let updated = self.api.update_product(id, draft).await?;
        tracing::info!("Updated product {}", id);
        Ok(self.settle(updated).await)
    }

    /// Delete after `confirm` approves. `confirm` receives the product when it
    /// is in the loaded collection.
    pub async fn delete(
        &mut self,
        permissions: &PermissionTable,
        id: ProductId,
        confirm: impl FnOnce(Option<&Product>) -> bool,
    ) -> Result<Mutation<Deletion>, ApiError> {
        permissions.require(Permission::DeleteProducts)?;
        if !confirm(self.get(id)) {
            tracing::debug!("Deletion of product {} cancelled", id);
            return Ok(Mutation::unchanged(Deletion::Cancelled));
        }
        self.api.delete_product(id).await?;
        tracing::info!("Deleted product {}", id);
        Ok(self.settle(Deletion::Deleted).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::products::CategoryFilter;
    use crate::test_support::{product, FakeApi};

    fn admin() -> PermissionTable {
        PermissionTable::for_role(Some(&Role::Admin))
    }

    fn viewer() -> PermissionTable {
        PermissionTable::for_role(Some(&Role::User))
    }

    fn widget_draft() -> ProductDraft {
        ProductDraft {
            name: "Widget".into(),
            description: String::new(),
            price: 10.0,
            stock: 5,
            category: "Tools".into(),
            brand: String::new(),
        }
    }

    async fn loaded(api: &FakeApi) -> ProductDirectory<FakeApi> {
        let mut dir = ProductDirectory::new(api.clone());
        dir.refresh().await.unwrap();
        dir
    }

    fn seeded() -> FakeApi {
        FakeApi::new().with_products(vec![
            product(1, "Hammer", 12.0, 30, "Tools"),
            product(2, "Lamp", 25.0, 60, "Home"),
        ])
    }

    #[tokio::test]
    async fn test_refresh_loads_collection_and_stats() {
        let api = seeded();
        let mut dir = ProductDirectory::new(api.clone());
        assert!(!dir.is_loaded());

        dir.refresh().await.unwrap();
        assert!(dir.is_loaded());
        assert_eq!(dir.products().len(), 2);
        assert_eq!(dir.filtered().len(), 2);
        assert_eq!(dir.stats().total, 2);
        assert_eq!(dir.stats().total_value, 360.0 + 1500.0);
        assert_eq!(dir.categories(), vec!["Tools", "Home"]);
    }

    #[tokio::test]
    async fn test_viewer_mutations_are_denied_without_requests() {
        let api = seeded();
        let mut dir = loaded(&api).await;
        let before = api.call_count();

        let err = dir.create(&viewer(), &widget_draft()).await.unwrap_err();
        assert_eq!(err, ApiError::PermissionDenied(Permission::CreateProducts));

        let err = dir.update(&viewer(), 1, &widget_draft()).await.unwrap_err();
        assert_eq!(err, ApiError::PermissionDenied(Permission::EditProducts));

        let mut asked = false;
        let err = dir
            .delete(&viewer(), 1, |_| {
                asked = true;
                true
            })
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::PermissionDenied(Permission::DeleteProducts));
        assert!(!asked);

        assert_eq!(api.call_count(), before);
        assert_eq!(dir.products().len(), 2);
    }

    #[tokio::test]
    async fn test_create_widget_updates_low_stock() {
        let api = seeded();
        let mut dir = loaded(&api).await;
        assert_eq!(dir.stats().low_stock, 0);

        let created = dir.create(&admin(), &widget_draft()).await.unwrap();
        assert_eq!(created.value.id, 3);
        assert!(!created.is_stale());
        assert_eq!(dir.stats().low_stock, 1);
        assert_eq!(dir.stats().total, 3);
        assert_eq!(dir.low_stock().len(), 1);
        assert_eq!(
            api.calls(),
            vec!["list_products", "create_product", "list_products"]
        );

        dir.set_filter(ProductFilter::new("widget", CategoryFilter::All));
        let visible: Vec<_> = dir.filtered().iter().map(|p| p.id).collect();
        assert_eq!(visible, vec![3]);
    }

    #[tokio::test]
    async fn test_invalid_draft_is_rejected_locally() {
        let api = seeded();
        let mut dir = loaded(&api).await;
        let before = api.call_count();

        let draft = ProductDraft {
            price: 0.0,
            ..widget_draft()
        };
        let err = dir.create(&admin(), &draft).await.unwrap_err();
        assert_eq!(err.field(), Some("price"));

        let draft = ProductDraft {
            name: "   ".into(),
            stock: -4,
            ..widget_draft()
        };
        let err = dir.update(&admin(), 1, &draft).await.unwrap_err();
        assert_eq!(err.field(), Some("name"));

        assert_eq!(api.call_count(), before);
    }

    #[tokio::test]
    async fn test_update_replaces_record() {
        let api = seeded();
        let mut dir = loaded(&api).await;
        let mut draft = dir.get(1).unwrap().to_draft();
        draft.stock = 2;
        dir.update(&admin(), 1, &draft).await.unwrap();
        assert_eq!(dir.get(1).unwrap().stock, 2);
        assert_eq!(dir.stats().low_stock, 1);
    }

    #[tokio::test]
    async fn test_declined_delete_makes_no_request() {
        let api = seeded();
        let mut dir = loaded(&api).await;
        let before = api.call_count();

        let outcome = dir
            .delete(&admin(), 2, |p| {
                assert_eq!(p.map(|p| p.name.as_str()), Some("Lamp"));
                false
            })
            .await
            .unwrap();
        assert_eq!(outcome.value, Deletion::Cancelled);
        assert_eq!(api.call_count(), before);
        assert_eq!(dir.products().len(), 2);
    }

    #[tokio::test]
    async fn test_confirmed_delete() {
        let api = seeded();
        let mut dir = loaded(&api).await;
        let outcome = dir.delete(&admin(), 2, |_| true).await.unwrap();
        assert_eq!(outcome.value, Deletion::Deleted);
        assert_eq!(outcome.refresh, Ok(()));
        assert!(dir.get(2).is_none());
        assert_eq!(api.stored_products().len(), 1);
    }

    #[tokio::test]
    async fn test_server_failure_keeps_collection() {
        let api = seeded();
        let mut dir = loaded(&api).await;
        let snapshot = dir.products().to_vec();

        api.fail_next(ApiError::Server {
            status: Some(500),
            message: "Database unavailable".into(),
        });
        let err = dir.create(&admin(), &widget_draft()).await.unwrap_err();
        assert_eq!(err.to_string(), "Database unavailable");
        assert_eq!(dir.products(), snapshot.as_slice());

        let err = dir.delete(&admin(), 99, |_| true).await.unwrap_err();
        assert_eq!(err.to_string(), "Product not found with id: 99");
        assert_eq!(dir.products(), snapshot.as_slice());

        api.fail_next(ApiError::Network("connection refused".into()));
        assert!(dir.refresh().await.is_err());
        assert_eq!(dir.products(), snapshot.as_slice());
    }

    #[tokio::test]
    async fn test_identical_filter_is_a_no_op() {
        let api = seeded();
        let mut dir = loaded(&api).await;
        let filter = ProductFilter::new("lamp", CategoryFilter::All);
        assert!(dir.set_filter(filter.clone()));
        assert!(!dir.set_filter(filter));
        assert_eq!(dir.filtered().len(), 1);

        // Stats ignore the filter
        assert_eq!(dir.stats().total, 2);
        assert_eq!(dir.stats().total_value, 360.0 + 1500.0);
        assert_eq!(dir.categories().len(), 2);

        dir.set_filter(ProductFilter::new("", CategoryFilter::Only("Home".into())));
        assert_eq!(dir.filtered().len(), 1);
        assert_eq!(dir.stats().total_value, 360.0 + 1500.0);
        assert_eq!(dir.stats().categories, 2);
    }

    #[tokio::test]
    async fn test_refetch_failure_after_create_still_reports_the_create() {
        let api = seeded();
        let mut dir = loaded(&api).await;

        api.fail_on("list_products", ApiError::Network("timeout".into()));
        let created = dir.create(&admin(), &widget_draft()).await.unwrap();
        assert_eq!(created.value.name, "Widget");
        assert!(created.is_stale());
        assert_eq!(
            created.refresh_error(),
            Some(&ApiError::Network("timeout".into()))
        );
        assert_eq!(api.stored_products().len(), 3);

        // Local copy is the pre-refetch one until the next refresh
        assert!(dir.is_stale());
        assert_eq!(dir.products().len(), 2);

        dir.refresh().await.unwrap();
        assert!(!dir.is_stale());
        assert_eq!(dir.products().len(), 3);
    }

    #[tokio::test]
    async fn test_refetch_failure_after_update_and_delete() {
        let api = seeded();
        let mut dir = loaded(&api).await;

        let mut draft = dir.get(1).unwrap().to_draft();
        draft.stock = 1;
        api.fail_on("list_products", ApiError::Network("timeout".into()));
        let updated = dir.update(&admin(), 1, &draft).await.unwrap();
        assert_eq!(updated.value.stock, 1);
        assert!(updated.is_stale());

        api.fail_on("list_products", ApiError::Network("timeout".into()));
        let deleted = dir.delete(&admin(), 2, |_| true).await.unwrap();
        assert_eq!(deleted.value, Deletion::Deleted);
        assert!(deleted.is_stale());
        assert_eq!(api.stored_products().len(), 1);
        assert!(dir.is_stale());
    }

    #[tokio::test]
    async fn test_adopt_collection_keeps_current_filter() {
        let api = seeded();
        let mut live = loaded(&api).await;
        let mut copy = live.clone();

        live.set_filter(ProductFilter::new("lamp", CategoryFilter::All));
        assert_eq!(live.filtered().len(), 1);

        copy.create(&admin(), &widget_draft()).await.unwrap();
        live.adopt_collection(copy);

        assert_eq!(live.filter().search_term, "lamp");
        assert_eq!(live.products().len(), 3);
        assert_eq!(live.stats().total, 3);
        let visible: Vec<_> = live.filtered().iter().map(|p| p.id).collect();
        assert_eq!(visible, vec![2]);
    }

    #[tokio::test]
    async fn test_fetches_are_gated_and_leave_collection_alone() {
        let api = seeded().with_products(vec![
            product(1, "Hammer", 12.0, 30, "Tools"),
            product(2, "Bolt", 0.5, 4, "Tools"),
        ]);
        let dir = loaded(&api).await;
        let before = api.call_count();

        let err = dir.fetch_low_stock(&viewer()).await.unwrap_err();
        assert_eq!(err, ApiError::PermissionDenied(Permission::ViewLowStock));
        assert_eq!(api.call_count(), before);

        let low: Vec<_> = dir
            .fetch_low_stock(&admin())
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(low, vec![2]);

        let fetched = dir.fetch_product(&viewer(), 1).await.unwrap();
        assert_eq!(fetched.map(|p| p.name), Some("Hammer".to_string()));
        assert_eq!(dir.fetch_product(&viewer(), 42).await.unwrap(), None);
        assert_eq!(
            api.calls()[before..],
            ["low_stock_products", "get_product", "get_product"]
        );
        assert_eq!(dir.products().len(), 2);
    }
}
