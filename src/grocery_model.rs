//! # Grocery List Data Model
//!
//! Grocery lists and their items, plus the ordering rule every list obeys:
//! unchecked items first, checked items last, each group sorted by display text.
//!
//! ```rust
//! use groceries::grocery_model::{GroceryList, GroceryListItem};
//!
//! let mut list = GroceryList::new("r1", "Pasta");
//! list.items.push(GroceryListItem::new("r1_b", "Tomato (200 g)"));
//! list.items.push(GroceryListItem::new("r1_a", "Salt (5 g)"));
//! list.restore_invariant();
//!
//! assert_eq!(list.displays(), vec!["Salt (5 g)", "Tomato (200 g)"]);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One line on a grocery list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroceryListItem {
    /// Composite id, unique within its list
    pub id: String,

    /// Text shown to the user
    pub display: String,

    pub checked: bool,
}

/// A named, ordered grocery list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroceryList {
    /// Recipe id for recipe-originated lists, a generated token for manual ones
    pub id: String,
    pub name: String,
    pub items: Vec<GroceryListItem>,
}

impl GroceryListItem {
    /// Create a new unchecked item
    pub fn new(id: &str, display: &str) -> Self {
        Self {
            id: id.to_string(),
            display: display.to_string(),
            checked: false,
        }
    }

    /// Mark this item as checked
    pub fn checked(mut self) -> Self {
        self.checked = true;
        self
    }
}

impl GroceryList {
    /// Create a new empty list
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            items: Vec::new(),
        }
    }

    /// Check whether an item with this id is on the list
    pub fn contains_item(&self, item_id: &str) -> bool {
        self.items.iter().any(|item| item.id == item_id)
    }

    /// Find an item by id
    pub fn item(&self, item_id: &str) -> Option<&GroceryListItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of checked items
    pub fn checked_count(&self) -> usize {
        self.items.iter().filter(|item| item.checked).count()
    }

    /// Number of unchecked items
    pub fn unchecked_count(&self) -> usize {
        self.items.len() - self.checked_count()
    }

    /// Display strings in list order
    pub fn displays(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.display.as_str()).collect()
    }

    /// Drop later items whose id already appeared earlier in the list
    pub fn dedup_keep_first(&mut self) {
        let mut seen = HashSet::new();
        self.items.retain(|item| seen.insert(item.id.clone()));
    }

    /// Re-establish checked-sink ordering
    ///
    /// Unchecked items precede checked items; within each group items are
    /// ordered by `display` (byte-wise, case-sensitive). The sort is stable, so
    /// items with equal display text keep their relative order.
    pub fn restore_invariant(&mut self) {
        self.items
            .sort_by(|a, b| (a.checked, &a.display).cmp(&(b.checked, &b.display)));
    }

    /// Check both the partition and the per-partition sort order
    pub fn satisfies_invariant(&self) -> bool {
        self.items.windows(2).all(|pair| {
            let (a, b) = (&pair[0], &pair[1]);
            (a.checked, &a.display) <= (b.checked, &b.display)
        })
    }

    /// Check that item ids are unique
    pub fn has_unique_ids(&self) -> bool {
        let mut seen = HashSet::new();
        self.items.iter().all(|item| seen.insert(item.id.as_str()))
    }
}
