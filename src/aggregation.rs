//! # Aggregation Engine
//!
//! Imports a whole recipe into the grocery lists in one pass. The result is the
//! same invariant-satisfying list that inserting each ingredient one at a time
//! would converge to, except that re-importing resets already present items to
//! unchecked.

use tracing::{debug, info};

use crate::grocery_model::{GroceryList, GroceryListItem};
use crate::ingredient_identity::{identity, item_id};
use crate::recipe_model::RecipeMeta;

/// Map every ingredient of `recipe_meta` to an unchecked grocery item
///
/// Items come out in section order, then in-section order. Duplicate
/// ingredients are not collapsed here.
pub fn recipe_items(recipe_meta: &RecipeMeta) -> Vec<GroceryListItem> {
    recipe_meta
        .recipe
        .flattened_ingredients()
        .map(|ingredient| {
            GroceryListItem::new(&item_id(&recipe_meta.id, ingredient), &identity(ingredient))
        })
        .collect()
}

/// Merge a recipe's ingredients into `lists`
///
/// When the recipe's list exists, the new items are prepended to it and
/// duplicates are dropped keeping the first occurrence, so a re-imported item
/// replaces the stored one. Otherwise a new list named after the recipe is
/// appended. A recipe without ingredients never creates a list.
///
/// Returns `true` when `lists` changed.
pub fn merge_recipe(lists: &mut Vec<GroceryList>, recipe_meta: &RecipeMeta) -> bool {
    let new_items = recipe_items(recipe_meta);

    if let Some(list) = lists.iter_mut().find(|l| l.id == recipe_meta.id) {
        let before = list.items.clone();

        let mut merged = new_items;
        merged.append(&mut list.items);
        list.items = merged;
        list.dedup_keep_first();
        list.restore_invariant();

        let changed = list.items != before;
        debug!(
            list_id = %list.id,
            items = list.items.len(),
            changed,
            "Merged recipe into existing grocery list"
        );
        return changed;
    }

    if new_items.is_empty() {
        debug!(recipe_id = %recipe_meta.id, "Recipe has no ingredients, no list created");
        return false;
    }

    let mut list = GroceryList::new(&recipe_meta.id, &recipe_meta.recipe.name);
    list.items = new_items;
    list.dedup_keep_first();
    list.restore_invariant();

    info!(
        list_id = %list.id,
        name = %list.name,
        items = list.items.len(),
        "Created grocery list from recipe"
    );
    lists.push(list);
    true
}
