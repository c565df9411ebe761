//! # Ingredient Identity
//!
//! Composite keys that tie a grocery item back to the recipe ingredient it was
//! created from. The rendered `"name (quantity unit)"` string serves both as the
//! dedup key and as the text shown to the user.

use crate::recipe_model::Ingredient;

/// Render an ingredient as `"name (quantity unit)"`
///
/// Two ingredients of the same recipe with identical name, quantity and unit
/// collapse to the same identity.
///
/// # Examples
///
/// ```rust
/// use groceries::ingredient_identity::identity;
/// use groceries::recipe_model::Ingredient;
///
/// assert_eq!(identity(&Ingredient::new("Tomato", "200", "g")), "Tomato (200 g)");
/// ```
pub fn identity(ingredient: &Ingredient) -> String {
    format!(
        "{} ({} {})",
        ingredient.name, ingredient.quantity, ingredient.unit
    )
}

/// Composite grocery item id: `recipe_id + "_" + identity(ingredient)`
pub fn item_id(recipe_id: &str, ingredient: &Ingredient) -> String {
    format!("{}_{}", recipe_id, identity(ingredient))
}
