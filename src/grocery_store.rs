//! # Grocery Store
//!
//! The single owner of every grocery list. All reads and writes go through
//! [`GroceryStore`], which keeps each list deduplicated and in checked-sink
//! order and writes the full list sequence through to its persistence port
//! before any mutating call returns.
//!
//! Mutations run against a working copy that only replaces the in-memory lists
//! once the save succeeded, so a failed save leaves the store exactly as it was
//! and the caller may simply retry.
//!
//! ```rust
//! use groceries::grocery_store::GroceryStore;
//! use groceries::persistence::InMemoryPersistence;
//! use groceries::recipe_model::Ingredient;
//! use groceries::store_config::StoreConfig;
//!
//! let mut store = GroceryStore::open(InMemoryPersistence::new(), StoreConfig::default())?;
//! store.insert_ingredient("r1", "Pasta", &Ingredient::new("Tomato", "200", "g"))?;
//!
//! assert!(store.list_exists("r1"));
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{Context, Result};
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

use crate::aggregation::merge_recipe;
use crate::grocery_model::{GroceryList, GroceryListItem};
use crate::ingredient_identity::{identity, item_id};
use crate::persistence::GroceryPersistence;
use crate::recipe_model::{Ingredient, RecipeMeta};
use crate::store_config::{StoreConfig, MAX_ID_ATTEMPTS};
use crate::store_errors::StoreError;

/// Store handle for hosts that share one store across threads
pub type SharedGroceryStore<P> = Arc<Mutex<GroceryStore<P>>>;

/// Persisted collection of grocery lists
#[derive(Debug)]
pub struct GroceryStore<P: GroceryPersistence> {
    lists: Vec<GroceryList>,
    persistence: P,
    config: StoreConfig,
}

impl<P: GroceryPersistence> GroceryStore<P> {
    /// Open the store, loading every list from `persistence`
    ///
    /// Lists that were stored out of order or with duplicate item ids are
    /// repaired in memory; the repair is written out with the next mutation.
    pub fn open(persistence: P, config: StoreConfig) -> Result<Self> {
        let mut lists = persistence.load().context("Failed to open grocery store")?;
        repair_loaded(&mut lists);

        info!(lists = lists.len(), namespace = %config.namespace, "Opened grocery store");

        Ok(Self {
            lists,
            persistence,
            config,
        })
    }

    /// Wrap the store for sharing across threads
    pub fn into_shared(self) -> SharedGroceryStore<P> {
        Arc::new(Mutex::new(self))
    }

    /// Every list, in creation order
    pub fn lists(&self) -> &[GroceryList] {
        &self.lists
    }

    /// Find a list by id
    pub fn list(&self, list_id: &str) -> Option<&GroceryList> {
        self.lists.iter().find(|l| l.id == list_id)
    }

    /// Check whether a list with this id exists
    pub fn list_exists(&self, list_id: &str) -> bool {
        self.list(list_id).is_some()
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Discard in-memory state and read the lists again
    pub fn reload(&mut self) -> Result<()> {
        let mut lists = self
            .persistence
            .load()
            .context("Failed to reload grocery store")?;
        repair_loaded(&mut lists);

        debug!(lists = lists.len(), "Reloaded grocery store");
        self.lists = lists;
        Ok(())
    }

    /// Append a new, empty user-named list and return its generated id
    pub fn create_manual_list(&mut self, name: &str) -> Result<String> {
        let list_id = self
            .generate_list_id()
            .context("Failed to create manual grocery list")?;
        let list = GroceryList::new(&list_id, name);

        self.mutate("create manual list", |lists| {
            lists.push(list);
            ((), true)
        })?;

        info!(list_id = %list_id, name, "Created manual grocery list");
        Ok(list_id)
    }

    /// Delete a list; returns `false` if it did not exist
    pub fn remove_list(&mut self, list_id: &str) -> Result<bool> {
        let removed = self.mutate("remove list", |lists| {
            let before = lists.len();
            lists.retain(|l| l.id != list_id);
            let removed = lists.len() != before;
            (removed, removed)
        })?;

        if removed {
            info!(list_id, "Removed grocery list");
        } else {
            debug!(list_id, "Grocery list to remove not found");
        }
        Ok(removed)
    }

    /// Rename a list; returns `false` if it did not exist
    pub fn rename_list(&mut self, list_id: &str, name: &str) -> Result<bool> {
        self.mutate("rename list", |lists| {
            match lists.iter_mut().find(|l| l.id == list_id) {
                Some(list) if list.name != name => {
                    list.name = name.to_string();
                    (true, true)
                }
                Some(_) => (true, false),
                None => (false, false),
            }
        })
    }

    /// Add one recipe ingredient to the recipe's list
    ///
    /// Creates the list named `recipe_name` if needed. Inserting an ingredient
    /// that is already on the list does nothing. Returns `true` when the item
    /// was added.
    pub fn insert_ingredient(
        &mut self,
        recipe_id: &str,
        recipe_name: &str,
        ingredient: &Ingredient,
    ) -> Result<bool> {
        let item = GroceryListItem::new(&item_id(recipe_id, ingredient), &identity(ingredient));

        let inserted = self.mutate("insert ingredient", |lists| {
            let index = match lists.iter().position(|l| l.id == recipe_id) {
                Some(index) => index,
                None => {
                    lists.push(GroceryList::new(recipe_id, recipe_name));
                    lists.len() - 1
                }
            };

            let list = &mut lists[index];
            if list.contains_item(&item.id) {
                return (false, false);
            }

            list.items.push(item);
            list.restore_invariant();
            (true, true)
        })?;

        if inserted {
            debug!(recipe_id, ingredient = %ingredient.name, "Inserted ingredient");
        }
        Ok(inserted)
    }

    /// Remove one recipe ingredient from the recipe's list
    ///
    /// The list is deleted once its last item is gone. Returns `true` when an
    /// item was removed.
    pub fn remove_ingredient(&mut self, recipe_id: &str, ingredient: &Ingredient) -> Result<bool> {
        let target = item_id(recipe_id, ingredient);
        self.remove_item(recipe_id, &target)
    }

    /// Import every ingredient of a recipe in one pass
    ///
    /// See [`merge_recipe`] for the merge rules.
    pub fn bulk_insert(&mut self, recipe_meta: &RecipeMeta) -> Result<()> {
        self.mutate("bulk insert", |lists| {
            let changed = merge_recipe(lists, recipe_meta);
            ((), changed)
        })?;

        info!(
            recipe_id = %recipe_meta.id,
            ingredients = recipe_meta.recipe.ingredient_count(),
            "Added recipe to groceries"
        );
        Ok(())
    }

    /// Add a user-supplied item to an existing list
    ///
    /// Does nothing if the list does not exist or already holds an item with
    /// the same id. Returns `true` when the item was added.
    pub fn add_item(&mut self, list_id: &str, item: GroceryListItem) -> Result<bool> {
        self.mutate("add item", |lists| {
            let Some(list) = lists.iter_mut().find(|l| l.id == list_id) else {
                return (false, false);
            };
            if list.contains_item(&item.id) {
                return (false, false);
            }

            list.items.push(GroceryListItem {
                checked: false,
                ..item
            });
            list.restore_invariant();
            (true, true)
        })
    }

    /// Add a free-text item to an existing list
    ///
    /// The item id is `list_id + "_" + display`. Returns the id when the item
    /// was added.
    pub fn add_manual_item(&mut self, list_id: &str, display: &str) -> Result<Option<String>> {
        let display = display.trim();
        if display.is_empty() {
            return Ok(None);
        }

        let id = format!("{}_{}", list_id, display);
        let added = self.add_item(list_id, GroceryListItem::new(&id, display))?;
        Ok(added.then_some(id))
    }

    /// Remove one item by id
    ///
    /// The list is deleted once its last item is gone. Returns `true` when an
    /// item was removed.
    pub fn remove_item(&mut self, list_id: &str, item_id: &str) -> Result<bool> {
        let removed = self.mutate("remove item", |lists| {
            let Some(index) = lists.iter().position(|l| l.id == list_id) else {
                return (false, false);
            };

            let list = &mut lists[index];
            let before = list.items.len();
            list.items.retain(|item| item.id != item_id);
            if list.items.len() == before {
                return (false, false);
            }

            if list.is_empty() {
                lists.remove(index);
            }
            (true, true)
        })?;

        if removed && !self.list_exists(list_id) {
            info!(list_id, "Removed emptied grocery list");
        }
        Ok(removed)
    }

    /// Flip an item's checked state and move it into its sorted position
    ///
    /// Returns the new checked state, or `None` if the list or item is missing.
    pub fn toggle_checked(&mut self, list_id: &str, item_id: &str) -> Result<Option<bool>> {
        self.mutate("toggle checked", |lists| {
            let Some(list) = lists.iter_mut().find(|l| l.id == list_id) else {
                return (None, false);
            };
            let Some(item) = list.items.iter_mut().find(|i| i.id == item_id) else {
                return (None, false);
            };

            item.checked = !item.checked;
            let checked = item.checked;
            list.restore_invariant();
            (Some(checked), true)
        })
    }

    /// Remove every checked item from every list
    ///
    /// Lists emptied by this are removed. Returns the number of items removed.
    pub fn clear_checked(&mut self) -> Result<usize> {
        let removed = self.mutate("clear checked", |lists| {
            let mut removed = 0;
            lists.retain_mut(|list| {
                let before = list.items.len();
                list.items.retain(|item| !item.checked);
                let cleared = before - list.items.len();
                removed += cleared;
                !(cleared > 0 && list.is_empty())
            });
            (removed, removed > 0)
        })?;

        info!(removed, "Cleared checked grocery items");
        Ok(removed)
    }

    /// For each ingredient of the recipe, whether it is on the recipe's list
    ///
    /// Ingredients are reported in section order, then in-section order.
    pub fn ingredient_membership(&self, recipe_meta: &RecipeMeta) -> Vec<bool> {
        let list = self.list(&recipe_meta.id);
        recipe_meta
            .recipe
            .flattened_ingredients()
            .map(|ingredient| {
                list.map(|l| l.contains_item(&item_id(&recipe_meta.id, ingredient)))
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Apply `op` to a copy of the lists and commit it once persisted
    ///
    /// `op` returns its result plus whether it changed anything; unchanged
    /// copies are neither saved nor committed.
    fn mutate<T, F>(&mut self, action: &str, op: F) -> Result<T>
    where
        F: FnOnce(&mut Vec<GroceryList>) -> (T, bool),
    {
        let mut working = self.lists.clone();
        let (result, changed) = op(&mut working);

        if !changed {
            debug!(action, "No change to grocery lists");
            return Ok(result);
        }

        debug_assert!(working
            .iter()
            .all(|l| l.has_unique_ids() && l.satisfies_invariant()));

        self.persistence
            .save(&working)
            .with_context(|| format!("Failed to persist grocery lists after {}", action))?;
        self.lists = working;
        Ok(result)
    }

    fn generate_list_id(&self) -> std::result::Result<String, StoreError> {
        let mut rng = rand::thread_rng();
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate: String = (&mut rng)
                .sample_iter(&Alphanumeric)
                .take(self.config.manual_id_length.max(1))
                .map(char::from)
                .collect();
            if !self.list_exists(&candidate) {
                return Ok(candidate);
            }
        }

        warn!(attempts = MAX_ID_ATTEMPTS, "Manual list id space exhausted");
        Err(StoreError::IdSpaceExhausted(MAX_ID_ATTEMPTS))
    }
}

/// Put stored lists that were written out of order back into shape
fn repair_loaded(lists: &mut [GroceryList]) {
    for list in lists.iter_mut() {
        if !list.has_unique_ids() || !list.satisfies_invariant() {
            warn!(list_id = %list.id, "Repairing stored grocery list ordering");
            list.dedup_keep_first();
            list.restore_invariant();
        }
    }
}

/// Run `f` with exclusive access to a shared store
pub fn with_shared_store<P, T, F>(store: &SharedGroceryStore<P>, f: F) -> Result<T>
where
    P: GroceryPersistence,
    F: FnOnce(&mut GroceryStore<P>) -> Result<T>,
{
    let mut guard = store
        .lock()
        .map_err(|e| StoreError::Lock(e.to_string()))
        .context("Grocery store is unavailable")?;
    f(&mut guard)
}
