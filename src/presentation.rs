//! # Presentation View-Model
//!
//! Everything here is derived from the store's read API on demand. Scaled
//! quantities depend on the servings currently selected, so they are never
//! written back to the store.

use crate::grocery_model::GroceryList;
use crate::grocery_store::GroceryStore;
use crate::ingredient_identity::identity;
use crate::persistence::GroceryPersistence;
use crate::quantity_scaler::scale;
use crate::recipe_model::{Ingredient, RecipeMeta};

/// One ingredient row on the recipe screen
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientRow {
    /// Name of the section the ingredient belongs to
    pub section: String,
    /// Ingredient text with the quantity scaled to the selected servings
    pub display: String,
    /// Whether the ingredient is on the recipe's grocery list
    pub in_list: bool,
}

/// Grocery state of one recipe, as the recipe screen shows it
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeGroceryView {
    pub recipe_id: String,
    pub rows: Vec<IngredientRow>,
    pub list_exists: bool,
    /// Every ingredient is on the list (drives the "added" glyph)
    pub all_in_list: bool,
    /// At least one ingredient is on the list
    pub any_in_list: bool,
}

/// Counts shown for one list on the groceries overview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroceryListSummary {
    pub id: String,
    pub name: String,
    pub unchecked: usize,
    pub checked: usize,
    /// Non-empty and every item checked
    pub is_complete: bool,
}

impl RecipeGroceryView {
    /// Build the view for `recipe_meta` at `current_servings`
    pub fn build<P: GroceryPersistence>(
        store: &GroceryStore<P>,
        recipe_meta: &RecipeMeta,
        current_servings: Option<u32>,
    ) -> Self {
        let membership = store.ingredient_membership(recipe_meta);
        let recipe = &recipe_meta.recipe;

        let rows: Vec<IngredientRow> = recipe
            .sections
            .iter()
            .flat_map(|section| {
                section
                    .ingredients
                    .iter()
                    .map(move |ingredient| (section.name.as_str(), ingredient))
            })
            .zip(membership)
            .map(|((section, ingredient), in_list)| IngredientRow {
                section: section.to_string(),
                display: scaled_display(ingredient, recipe.servings, current_servings),
                in_list,
            })
            .collect();

        let all_in_list = !rows.is_empty() && rows.iter().all(|r| r.in_list);
        let any_in_list = rows.iter().any(|r| r.in_list);

        Self {
            recipe_id: recipe_meta.id.clone(),
            rows,
            list_exists: store.list_exists(&recipe_meta.id),
            all_in_list,
            any_in_list,
        }
    }
}

impl GroceryListSummary {
    pub fn from_list(list: &GroceryList) -> Self {
        let checked = list.checked_count();
        Self {
            id: list.id.clone(),
            name: list.name.clone(),
            unchecked: list.unchecked_count(),
            checked,
            is_complete: !list.is_empty() && checked == list.items.len(),
        }
    }
}

/// Ingredient identity text with its quantity scaled for display
pub fn scaled_display(
    ingredient: &Ingredient,
    recipe_servings: u32,
    current_servings: Option<u32>,
) -> String {
    let scaled = Ingredient {
        quantity: scale(&ingredient.quantity, recipe_servings, current_servings),
        ..ingredient.clone()
    };
    identity(&scaled)
}

/// Summaries of every list, in store order
pub fn summarize_lists<P: GroceryPersistence>(store: &GroceryStore<P>) -> Vec<GroceryListSummary> {
    store
        .lists()
        .iter()
        .map(GroceryListSummary::from_list)
        .collect()
}

/// Whether the "clear checked" command has anything to do
pub fn has_checked_items<P: GroceryPersistence>(store: &GroceryStore<P>) -> bool {
    store
        .lists()
        .iter()
        .any(|list| list.items.iter().any(|item| item.checked))
}

/// Format a list as plain text, one numbered line per item
pub fn format_grocery_list(list: &GroceryList) -> String {
    let mut result = format!("**{}**\n", list.name);

    for (i, item) in list.items.iter().enumerate() {
        let glyph = if item.checked { "✅" } else { "⬜" };
        result.push_str(&format!("{}. {} {}\n", i + 1, glyph, item.display));
    }

    result
}
