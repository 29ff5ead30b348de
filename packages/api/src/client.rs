//! # HTTP client for the inventory REST API
//!
//! [`InventoryApi`] is the seam between the client core and the network. The
//! session context and the product directory are generic over it, so tests
//! drive them with an in-memory fake and the app drives them with
//! [`ApiClient`].
//!
//! ## [`ApiClient`]
//!
//! A `reqwest` client plus the parsed base URL and a handle to the
//! [`SessionStore`]. Before every request it reads the token from the store
//! (live, never cached) and, when one is present, sends
//! `Authorization: Bearer <token>`.
//!
//! | Method | Endpoint |
//! |--------|----------|
//! | [`login`](InventoryApi::login) | `POST /auth/login` |
//! | [`register`](InventoryApi::register) | `POST /auth/register` |
//! | [`validate_token`](InventoryApi::validate_token) | `GET /auth/validate` |
//! | [`current_user`](InventoryApi::current_user) | `GET /auth/me` |
//! | [`list_products`](InventoryApi::list_products) | `GET /products` |
//! | [`get_product`](InventoryApi::get_product) | `GET /products/{id}` |
//! | [`low_stock_products`](InventoryApi::low_stock_products) | `GET /products/low-stock` |
//! | [`create_product`](InventoryApi::create_product) | `POST /products` |
//! | [`update_product`](InventoryApi::update_product) | `PUT /products/{id}` |
//! | [`delete_product`](InventoryApi::delete_product) | `DELETE /products/{id}` |
//!
//! ## Failure mapping
//!
//! A request that never gets a response becomes [`ApiError::Network`]. A
//! response is a failure when its status is not 2xx or its envelope says
//! `success: false`; [`classify_failure`] then turns it into the error the
//! caller expects for that endpoint (authentication for login, registration
//! for register, server for everything else; 5xx is always a server error).
//! The envelope `message` is passed through verbatim, otherwise the endpoint's
//! fallback message is used.

use std::future::Future;

use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use store::{SessionStore, StorageBackend};

use crate::config::ApiConfig;
use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::models::{
    Credentials, LoginResponse, Product, ProductDraft, ProductId, RegisterRequest, RegisteredUser,
    User,
};

/// Async interface to the remote inventory API.
pub trait InventoryApi {
    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<LoginResponse, ApiError>>;
    fn register(
        &self,
        request: &RegisterRequest,
    ) -> impl Future<Output = Result<RegisteredUser, ApiError>>;
    fn validate_token(&self) -> impl Future<Output = Result<(), ApiError>>;
    fn current_user(&self) -> impl Future<Output = Result<Option<User>, ApiError>>;
    fn list_products(&self) -> impl Future<Output = Result<Vec<Product>, ApiError>>;
    fn get_product(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Option<Product>, ApiError>>;
    fn low_stock_products(&self) -> impl Future<Output = Result<Vec<Product>, ApiError>>;
    fn create_product(
        &self,
        draft: &ProductDraft,
    ) -> impl Future<Output = Result<Product, ApiError>>;
    fn update_product(
        &self,
        id: ProductId,
        draft: &ProductDraft,
    ) -> impl Future<Output = Result<Product, ApiError>>;
    fn delete_product(&self, id: ProductId) -> impl Future<Output = Result<(), ApiError>>;
}

/// Which endpoint family a failure came from; selects the error variant and
/// the fallback message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Login,
    Register,
    ValidateToken,
    CurrentUser,
    ListProducts,
    GetProduct,
    SaveProduct,
    DeleteProduct,
}

impl Call {
    pub fn fallback_message(self) -> &'static str {
        match self {
            Call::Login => "Failed to sign in. Check your credentials.",
            Call::Register => "Failed to create the account. Please try again.",
            Call::ValidateToken => "Your session is no longer valid.",
            Call::CurrentUser => "Failed to load the current user.",
            Call::ListProducts => "Failed to load products.",
            Call::GetProduct => "Failed to load the product.",
            Call::SaveProduct => "Failed to save the product.",
            Call::DeleteProduct => "Failed to delete the product.",
        }
    }
}

/// Map a failed response to the error the caller of `call` expects.
///
/// `status` is `None` when the HTTP status was 2xx but the envelope reported
/// `success: false`.
pub fn classify_failure(call: Call, status: Option<u16>, body: &str) -> ApiError {
    let envelope: Option<Envelope<Value>> = serde_json::from_str(body).ok();
    let message = envelope
        .as_ref()
        .and_then(|e| e.message())
        .unwrap_or(call.fallback_message())
        .to_string();

    let server_fault = status.is_some_and(|s| s >= 500);
    match call {
        Call::Login if !server_fault => ApiError::Authentication(message),
        Call::Register if !server_fault => ApiError::Registration {
            message,
            fields: envelope.map(|e| e.field_errors()).unwrap_or_default(),
        },
        _ => ApiError::Server { status, message },
    }
}

/// Header value for a stored token. Tokens stored with their scheme are sent
/// unchanged.
pub fn bearer(token: &str) -> String {
    if token.starts_with("Bearer ") {
        token.to_string()
    } else {
        format!("Bearer {token}")
    }
}

/// `reqwest`-backed [`InventoryApi`].
#[derive(Clone, Debug)]
pub struct ApiClient<B> {
    http: reqwest::Client,
    base_url: Url,
    session: SessionStore<B>,
}

impl<B: StorageBackend> ApiClient<B> {
    pub fn new(config: &ApiConfig, session: SessionStore<B>) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| ApiError::Server {
            status: None,
            message: format!("Invalid API base URL '{}': {}", config.base_url, e),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Server {
                status: None,
                message: format!("Invalid API base URL '{}'", config.base_url),
            });
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            session,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore<B> {
        &self.session
    }

    /// Base URL with `segments` appended, each percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match self.session.token() {
            Some(token) => builder.header(reqwest::header::AUTHORIZATION, bearer(&token)),
            None => builder,
        }
    }

    /// Send a request and unwrap the envelope's `data`.
    async fn send<T: DeserializeOwned>(
        &self,
        call: Call,
        builder: RequestBuilder,
    ) -> Result<Option<T>, ApiError> {
        let response = builder.send().await.map_err(|e| {
            tracing::error!("{:?} request failed: {}", call, e);
            ApiError::Network(e.to_string())
        })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !status.is_success() {
            tracing::warn!("{:?} rejected with {}", call, status);
            return Err(classify_failure(call, Some(status.as_u16()), &body));
        }
        if body.trim().is_empty() || status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let envelope: Envelope<T> = serde_json::from_str(&body).map_err(|e| {
            tracing::error!("{:?} returned an unreadable body: {}", call, e);
            ApiError::Server {
                status: Some(status.as_u16()),
                message: call.fallback_message().to_string(),
            }
        })?;
        if !envelope.success {
            tracing::warn!("{:?} reported failure", call);
            return Err(classify_failure(call, None, &body));
        }
        Ok(envelope.data)
    }

    async fn send_json<T: DeserializeOwned, P: Serialize + ?Sized>(
        &self,
        call: Call,
        method: Method,
        url: Url,
        payload: &P,
    ) -> Result<Option<T>, ApiError> {
        self.send(call, self.request(method, url).json(payload)).await
    }

    fn missing_data(call: Call) -> ApiError {
        ApiError::Server {
            status: None,
            message: call.fallback_message().to_string(),
        }
    }
}

impl<B: StorageBackend> InventoryApi for ApiClient<B> {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let url = self.endpoint(&["auth", "login"]);
        let data: Option<LoginResponse> = self
            .send_json(Call::Login, Method::POST, url, credentials)
            .await?;
        match data {
            Some(resp) if !resp.token.is_empty() => Ok(resp),
            _ => Err(ApiError::Authentication("No token received".to_string())),
        }
    }

    async fn register(&self, request: &RegisterRequest) -> Result<RegisteredUser, ApiError> {
        let url = self.endpoint(&["auth", "register"]);
        let data: Option<RegisteredUser> = self
            .send_json(Call::Register, Method::POST, url, request)
            .await?;
        Ok(data.unwrap_or_default())
    }

    async fn validate_token(&self) -> Result<(), ApiError> {
        let url = self.endpoint(&["auth", "validate"]);
        self.send::<Value>(Call::ValidateToken, self.request(Method::GET, url))
            .await?;
        Ok(())
    }

    async fn current_user(&self) -> Result<Option<User>, ApiError> {
        let url = self.endpoint(&["auth", "me"]);
        self.send(Call::CurrentUser, self.request(Method::GET, url))
            .await
    }

    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let url = self.endpoint(&["products"]);
        let data: Option<Vec<Product>> = self
            .send(Call::ListProducts, self.request(Method::GET, url))
            .await?;
        Ok(data.unwrap_or_default())
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<Product>, ApiError> {
        let url = self.endpoint(&["products", &id.to_string()]);
        self.send(Call::GetProduct, self.request(Method::GET, url))
            .await
    }

    async fn low_stock_products(&self) -> Result<Vec<Product>, ApiError> {
        let url = self.endpoint(&["products", "low-stock"]);
        let data: Option<Vec<Product>> = self
            .send(Call::ListProducts, self.request(Method::GET, url))
            .await?;
        Ok(data.unwrap_or_default())
    }

    async fn create_product(&self, draft: &ProductDraft) -> Result<Product, ApiError> {
        let url = self.endpoint(&["products"]);
        let data: Option<Product> = self
            .send_json(Call::SaveProduct, Method::POST, url, draft)
            .await?;
        data.ok_or_else(|| Self::missing_data(Call::SaveProduct))
    }

    async fn update_product(&self, id: ProductId, draft: &ProductDraft) -> Result<Product, ApiError> {
        let url = self.endpoint(&["products", &id.to_string()]);
        let data: Option<Product> = self
            .send_json(Call::SaveProduct, Method::PUT, url, draft)
            .await?;
        data.ok_or_else(|| Self::missing_data(Call::SaveProduct))
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), ApiError> {
        let url = self.endpoint(&["products", &id.to_string()]);
        self.send::<Value>(Call::DeleteProduct, self.request(Method::DELETE, url))
            .await?;
        Ok(())
    }
}
