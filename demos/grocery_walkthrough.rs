//! # Grocery Walkthrough
//!
//! Adds a recipe to a file-backed grocery store, ticks an item off, and prints
//! the result. Configure with `GROCERY_DATA_DIR` / `GROCERY_NAMESPACE` and set
//! `RUST_LOG=debug` to watch the store work.

use anyhow::Result;
use groceries::grocery_store::GroceryStore;
use groceries::ingredient_identity::item_id;
use groceries::persistence::JsonFilePersistence;
use groceries::presentation::{format_grocery_list, summarize_lists, RecipeGroceryView};
use groceries::recipe_model::{Ingredient, IngredientsSection, Recipe, RecipeMeta};
use groceries::store_config::StoreConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = StoreConfig::from_env();
    let persistence = JsonFilePersistence::new(&config);
    info!("Using snapshot at {}", persistence.path().display());

    let mut store = GroceryStore::open(persistence, config)?;

    let salt = Ingredient::new("Salt", "5", "g");
    let pasta = RecipeMeta::new(
        "r1",
        Recipe::new("Pasta", 2)
            .with_section(
                IngredientsSection::new("For the sauce")
                    .with_ingredient(Ingredient::new("Tomato", "200", "g"))
                    .with_ingredient(salt.clone()),
            )
            .with_section(
                IngredientsSection::new("To serve")
                    .with_ingredient(Ingredient::new("Parmesan", "a handful", "")),
            ),
    )
    .with_author("Nonna");

    println!("🛒 Adding '{}' to groceries\n", pasta.recipe.name);
    store.bulk_insert(&pasta)?;
    store.toggle_checked(&pasta.id, &item_id(&pasta.id, &salt))?;

    let party = store.create_manual_list("Party")?;
    store.add_manual_item(&party, "Chips")?;

    for list in store.lists() {
        println!("{}", format_grocery_list(list));
    }

    println!("📊 Overview");
    for summary in summarize_lists(&store) {
        println!(
            "  • {}: {} to buy, {} done",
            summary.name, summary.unchecked, summary.checked
        );
    }

    println!("\n🍝 Recipe screen for 4 servings");
    let view = RecipeGroceryView::build(&store, &pasta, Some(4));
    for row in &view.rows {
        let glyph = if row.in_list { "✓" } else { "+" };
        println!("  [{}] {} ({})", glyph, row.display, row.section);
    }

    Ok(())
}
