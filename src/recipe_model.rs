//! # Recipe Data Model
//!
//! Read-only recipe values handed to the grocery engine by the recipe layer.
//! Ingredients are grouped into named sections; quantities and units are kept
//! as opaque strings exactly as the recipe author wrote them.
//!
//! ## Usage
//!
//! ```rust
//! use groceries::recipe_model::{Ingredient, IngredientsSection, Recipe, RecipeMeta};
//!
//! let recipe = Recipe::new("Pasta", 2).with_section(
//!     IngredientsSection::new("")
//!         .with_ingredient(Ingredient::new("Tomato", "200", "g"))
//!         .with_ingredient(Ingredient::new("Salt", "5", "g")),
//! );
//! let meta = RecipeMeta::new("r1", recipe);
//!
//! assert_eq!(meta.recipe.ingredient_count(), 2);
//! ```

use serde::{Deserialize, Serialize};

/// A single recipe ingredient line
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ingredient {
    /// The name of the ingredient (e.g., "flour", "olive oil")
    pub name: String,

    /// Free-form quantity as written by the author (e.g., "200", "1/2", "a pinch")
    pub quantity: String,

    /// Opaque unit string (e.g., "g", "cups", "")
    pub unit: String,
}

/// A named group of ingredients (e.g., "For the sauce")
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IngredientsSection {
    pub name: String,
    pub ingredients: Vec<Ingredient>,
}

/// The parts of a recipe the grocery engine reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,

    /// Baseline serving count that quantities are written for
    pub servings: u32,

    pub sections: Vec<IngredientsSection>,
}

/// A recipe together with its server-side metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeMeta {
    /// Stable, server-assigned recipe id; doubles as the grocery list id
    pub id: String,
    pub recipe: Recipe,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub favorited: bool,
}

impl Ingredient {
    /// Create a new ingredient
    pub fn new(name: &str, quantity: &str, unit: &str) -> Self {
        Self {
            name: name.to_string(),
            quantity: quantity.to_string(),
            unit: unit.to_string(),
        }
    }
}

impl IngredientsSection {
    /// Create a new empty section
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ingredients: Vec::new(),
        }
    }

    /// Append an ingredient to this section
    pub fn with_ingredient(mut self, ingredient: Ingredient) -> Self {
        self.ingredients.push(ingredient);
        self
    }
}

impl Recipe {
    /// Create a recipe with no sections
    pub fn new(name: &str, servings: u32) -> Self {
        Self {
            name: name.to_string(),
            servings,
            sections: Vec::new(),
        }
    }

    /// Append an ingredient section
    pub fn with_section(mut self, section: IngredientsSection) -> Self {
        self.sections.push(section);
        self
    }

    /// All ingredients in section order, then in-section order
    pub fn flattened_ingredients(&self) -> impl Iterator<Item = &Ingredient> + '_ {
        self.sections
            .iter()
            .flat_map(|section| section.ingredients.iter())
    }

    /// Total number of ingredient lines across sections
    pub fn ingredient_count(&self) -> usize {
        self.sections.iter().map(|s| s.ingredients.len()).sum()
    }
}

impl RecipeMeta {
    /// Wrap a recipe with its id and default metadata
    pub fn new(id: &str, recipe: Recipe) -> Self {
        Self {
            id: id.to_string(),
            recipe,
            author: None,
            rating: None,
            favorited: false,
        }
    }

    /// Set the author
    pub fn with_author(mut self, author: &str) -> Self {
        self.author = Some(author.to_string());
        self
    }

    /// Set the rating, clamped to 0-5
    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating = Some(rating.clamp(0.0, 5.0));
        self
    }

    /// Mark the recipe as favorited
    pub fn favorited(mut self) -> Self {
        self.favorited = true;
        self
    }
}
