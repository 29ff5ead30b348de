//! # Product model
//!
//! [`Product`] is the server-owned record as it comes off the wire. The client
//! never assigns an `id`; it only sends [`ProductDraft`]s (create, and full
//! record replace on update).
//!
//! [`ProductForm`] is the raw text a user typed into the product modal.
//! [`ProductForm::into_draft`] parses and validates it in form order
//! (`name`, `price`, `stock`) and reports the first failing field.
//! [`ProductDraft::validate`] applies the same rules to an already-typed
//! draft so the directory can re-check before any request.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ApiError;

pub type ProductId = i64;

/// Stock strictly below this counts as low.
pub const LOW_STOCK_THRESHOLD: i64 = 10;
/// Stock strictly below this (and not low) counts as medium.
pub const MEDIUM_STOCK_THRESHOLD: i64 = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    pub price: f64,
    pub stock: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub brand: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Product {
    /// Inventory value of this line: price × stock.
    pub fn value(&self) -> f64 {
        self.price * self.stock as f64
    }

    pub fn is_low_stock(&self) -> bool {
        self.stock < LOW_STOCK_THRESHOLD
    }

    pub fn stock_level(&self) -> StockLevel {
        StockLevel::of(self.stock)
    }

    /// The editable fields, as the starting point for an update.
    pub fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            stock: self.stock,
            category: self.category.clone(),
            brand: self.brand.clone(),
        }
    }
}

/// Badge classification for a stock count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    Out,
    Low,
    Medium,
    High,
}

impl StockLevel {
    pub fn of(stock: i64) -> Self {
        if stock <= 0 {
            StockLevel::Out
        } else if stock < LOW_STOCK_THRESHOLD {
            StockLevel::Low
        } else if stock < MEDIUM_STOCK_THRESHOLD {
            StockLevel::Medium
        } else {
            StockLevel::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StockLevel::Out => "Out of stock",
            StockLevel::Low => "Low stock",
            StockLevel::Medium => "Medium stock",
            StockLevel::High => "In stock",
        }
    }

    /// CSS modifier used by the product table badge.
    pub fn css_class(self) -> &'static str {
        match self {
            StockLevel::Out => "stock-out",
            StockLevel::Low => "stock-low",
            StockLevel::Medium => "stock-medium",
            StockLevel::High => "stock-high",
        }
    }
}

/// A product without an id: the body of create and update requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub category: String,
    pub brand: String,
}

impl ProductDraft {
    /// Check `name`, `price`, `stock` in that order.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::validation("name", "Name is required"));
        }
        if self.price.is_nan() || self.price <= 0.0 {
            return Err(ApiError::validation("price", "Price must be greater than 0"));
        }
        if self.stock < 0 {
            return Err(ApiError::validation("stock", "Stock must be 0 or greater"));
        }
        Ok(())
    }
}

/// Raw text fields of the product modal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub stock: String,
    pub category: String,
    pub brand: String,
}

impl ProductForm {
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            stock: product.stock.to_string(),
            category: product.category.clone(),
            brand: product.brand.clone(),
        }
    }

    /// Parse into a validated draft, failing on the first bad field.
    pub fn into_draft(&self) -> Result<ProductDraft, ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::validation("name", "Name is required"));
        }
        let price = self
            .price
            .trim()
            .parse::<f64>()
            .map_err(|_| ApiError::validation("price", "Price must be greater than 0"))?;
        let stock = self
            .stock
            .trim()
            .parse::<i64>()
            .map_err(|_| ApiError::validation("stock", "Stock must be 0 or greater"))?;

        let draft = ProductDraft {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price,
            stock,
            category: self.category.trim().to_string(),
            brand: self.brand.trim().to_string(),
        };
        draft.validate()?;
        Ok(draft)
    }
}
