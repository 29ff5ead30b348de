//! The product collection: filtering, statistics and CRUD round-trips.

mod directory;
mod filter;
mod stats;

pub use directory::{Deletion, Mutation, ProductDirectory};
pub use filter::{matching_indices, CategoryFilter, ProductFilter, ALL_CATEGORIES};
pub use stats::{distinct_categories, InventoryStats};
