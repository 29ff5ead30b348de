//! In-memory [`InventoryApi`] for unit tests.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::client::InventoryApi;
use crate::error::ApiError;
use crate::models::{
    Credentials, LoginResponse, Product, ProductDraft, ProductId, RegisterRequest, RegisteredUser,
    Role, User,
};

struct Account {
    password: String,
    user: User,
}

#[derive(Default)]
struct State {
    accounts: Vec<Account>,
    products: Vec<Product>,
    token_invalid: bool,
    current_user: Option<User>,
    fail_next: Option<ApiError>,
    fail_on: Option<(&'static str, ApiError)>,
    calls: Vec<&'static str>,
}

/// Fake API server: accounts, a product table, call log and failure injection.
#[derive(Clone, Default)]
pub struct FakeApi {
    state: Arc<Mutex<State>>,
}

pub fn user(username: &str, full_name: &str, role: &str) -> User {
    User {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        full_name: Some(full_name.to_string()),
        name: None,
        role: Some(Role::from(role)),
        roles: Vec::new(),
    }
}

pub fn product(id: ProductId, name: &str, price: f64, stock: i64, category: &str) -> Product {
    Product {
        id,
        name: name.to_string(),
        description: String::new(),
        price,
        stock,
        category: category.to_string(),
        brand: String::new(),
        active: None,
        image_url: None,
        in_stock: None,
        created_at: None,
        updated_at: None,
    }
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn with_account(self, password: &str, user: User) -> Self {
        self.lock().accounts.push(Account {
            password: password.to_string(),
            user,
        });
        self
    }

    pub fn with_products(self, products: Vec<Product>) -> Self {
        self.lock().products = products;
        self
    }

    pub fn invalidate_tokens(&self) {
        self.lock().token_invalid = true;
    }

    pub fn set_current_user(&self, user: User) {
        self.lock().current_user = Some(user);
    }

    /// Make the next call fail with `err`.
    pub fn fail_next(&self, err: ApiError) {
        self.lock().fail_next = Some(err);
    }

    /// Make the next call to `call` fail with `err`; other calls go through.
    pub fn fail_on(&self, call: &'static str, err: ApiError) {
        self.lock().fail_on = Some((call, err));
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    pub fn stored_products(&self) -> Vec<Product> {
        self.lock().products.clone()
    }

    fn record(&self, call: &'static str) -> Result<MutexGuard<'_, State>, ApiError> {
        let mut state = self.lock();
        state.calls.push(call);
        if let Some(err) = state.fail_next.take() {
            return Err(err);
        }
        if state.fail_on.as_ref().is_some_and(|(name, _)| *name == call) {
            if let Some((_, err)) = state.fail_on.take() {
                return Err(err);
            }
        }
        Ok(state)
    }
}

fn not_found(id: ProductId) -> ApiError {
    ApiError::Server {
        status: Some(404),
        message: format!("Product not found with id: {id}"),
    }
}

fn apply(product: &mut Product, draft: &ProductDraft) {
    product.name = draft.name.clone();
    product.description = draft.description.clone();
    product.price = draft.price;
    product.stock = draft.stock;
    product.category = draft.category.clone();
    product.brand = draft.brand.clone();
}

impl InventoryApi for FakeApi {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let state = self.record("login")?;
        let account = state
            .accounts
            .iter()
            .find(|a| {
                (a.user.username == credentials.username_or_email
                    || a.user.email == credentials.username_or_email)
                    && a.password == credentials.password
            })
            .ok_or_else(|| ApiError::Authentication("Invalid credentials".to_string()))?;
        let user = &account.user;
        Ok(LoginResponse {
            token: format!("token-{}", user.username),
            token_type: Some("Bearer".to_string()),
            username: user.username.clone(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            role: user.role.clone(),
            roles: user.roles.clone(),
            expires_in: Some(86_400_000),
        })
    }

    async fn register(&self, request: &RegisterRequest) -> Result<RegisteredUser, ApiError> {
        let state = self.record("register")?;
        if state.accounts.iter().any(|a| a.user.username == request.username) {
            return Err(ApiError::Registration {
                message: "Username is already taken".to_string(),
                fields: Default::default(),
            });
        }
        Ok(RegisteredUser {
            id: Some(state.accounts.len() as i64 + 1),
            username: Some(request.username.clone()),
            email: Some(request.email.clone()),
            extra: Default::default(),
        })
    }

    async fn validate_token(&self) -> Result<(), ApiError> {
        let state = self.record("validate_token")?;
        if state.token_invalid {
            return Err(ApiError::Server {
                status: Some(401),
                message: "Invalid token".to_string(),
            });
        }
        Ok(())
    }

    async fn current_user(&self) -> Result<Option<User>, ApiError> {
        let state = self.record("current_user")?;
        Ok(state.current_user.clone())
    }

    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let state = self.record("list_products")?;
        Ok(state.products.clone())
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<Product>, ApiError> {
        let state = self.record("get_product")?;
        Ok(state.products.iter().find(|p| p.id == id).cloned())
    }

    async fn low_stock_products(&self) -> Result<Vec<Product>, ApiError> {
        let state = self.record("low_stock_products")?;
        Ok(state
            .products
            .iter()
            .filter(|p| p.is_low_stock())
            .cloned()
            .collect())
    }

    async fn create_product(&self, draft: &ProductDraft) -> Result<Product, ApiError> {
        let mut state = self.record("create_product")?;
        let id = state.products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let mut created = product(id, "", 0.0, 0, "");
        apply(&mut created, draft);
        state.products.push(created.clone());
        Ok(created)
    }

    async fn update_product(&self, id: ProductId, draft: &ProductDraft) -> Result<Product, ApiError> {
        let mut state = self.record("update_product")?;
        let existing = state
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| not_found(id))?;
        apply(existing, draft);
        Ok(existing.clone())
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), ApiError> {
        let mut state = self.record("delete_product")?;
        let before = state.products.len();
        state.products.retain(|p| p.id != id);
        if state.products.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }
}
