//! Wire models for the inventory API.

mod auth;
mod product;
mod user;

pub use auth::{Credentials, LoginResponse, RegisterRequest, RegisteredUser};
pub use product::{
    Product, ProductDraft, ProductForm, ProductId, StockLevel, LOW_STOCK_THRESHOLD,
    MEDIUM_STOCK_THRESHOLD,
};
pub use user::{Role, User, DEFAULT_DISPLAY_NAME};
