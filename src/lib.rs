//! # Groceries
//!
//! Local grocery-list aggregation engine: turns recipe ingredients into
//! deduplicated, serving-scaled, persisted shopping lists that several recipes
//! can contribute to and that the user can edit freely.

pub mod aggregation;
pub mod grocery_model;
pub mod grocery_store;
pub mod ingredient_identity;
pub mod persistence;
pub mod presentation;
pub mod quantity_scaler;
pub mod recipe_model;
pub mod store_config;
pub mod store_errors;
