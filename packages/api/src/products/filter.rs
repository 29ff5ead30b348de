//! Search term and category filtering over the loaded collection.

use std::str::FromStr;

use crate::models::Product;

/// Selector value meaning "every category".
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Parse a selector value; `"all"` selects everything.
    pub fn from_selection(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }

    /// Selector value for this filter.
    pub fn as_selection(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Only(category) => category,
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => product.category == *category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_selection(s))
    }
}

/// Transient filter state of the product list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ProductFilter {
    pub search_term: String,
    pub category: CategoryFilter,
}

impl ProductFilter {
    pub fn new(search_term: impl Into<String>, category: CategoryFilter) -> Self {
        Self {
            search_term: search_term.into(),
            category,
        }
    }

    /// Category matches and, for a non-empty term, the lowercase term is a
    /// substring of the lowercase name, description, brand or category.
    pub fn matches(&self, product: &Product) -> bool {
        if !self.category.matches(product) {
            return false;
        }
        if self.search_term.is_empty() {
            return true;
        }
        let term = self.search_term.to_lowercase();
        [
            &product.name,
            &product.description,
            &product.brand,
            &product.category,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&term))
    }

    pub fn is_empty(&self) -> bool {
        self.search_term.is_empty() && self.category == CategoryFilter::All
    }
}

/// Indices of the products matching `filter`, in collection order.
pub fn matching_indices(products: &[Product], filter: &ProductFilter) -> Vec<usize> {
    products
        .iter()
        .enumerate()
        .filter(|(_, p)| filter.matches(p))
        .map(|(i, _)| i)
        .collect()
}
