use anyhow::Result;
use groceries::grocery_store::GroceryStore;
use groceries::ingredient_identity::item_id;
use groceries::persistence::{GroceryPersistence, JsonFilePersistence};
use groceries::recipe_model::{Ingredient, IngredientsSection, Recipe, RecipeMeta};
use groceries::store_config::StoreConfig;
use std::fs;
use tempfile::TempDir;

fn setup_config() -> Result<(StoreConfig, TempDir)> {
    let temp_dir = TempDir::new()?;
    let config = StoreConfig::default().with_data_dir(temp_dir.path());
    Ok((config, temp_dir))
}

fn open_store(config: &StoreConfig) -> Result<GroceryStore<JsonFilePersistence>> {
    GroceryStore::open(JsonFilePersistence::new(config), config.clone())
}

fn curry() -> RecipeMeta {
    RecipeMeta::new(
        "c1",
        Recipe::new("Curry", 4)
            .with_section(
                IngredientsSection::new("Paste")
                    .with_ingredient(Ingredient::new("Chili", "3", ""))
                    .with_ingredient(Ingredient::new("Garlic", "4", "cloves")),
            )
            .with_section(
                IngredientsSection::new("Curry")
                    .with_ingredient(Ingredient::new("Coconut milk", "400", "ml")),
            ),
    )
}

#[test]
fn test_store_survives_reopen() -> Result<()> {
    let (config, _temp_dir) = setup_config()?;

    let party_id = {
        let mut store = open_store(&config)?;
        store.bulk_insert(&curry())?;
        store.toggle_checked("c1", &item_id("c1", &Ingredient::new("Chili", "3", "")))?;
        let party = store.create_manual_list("Party")?;
        store.add_manual_item(&party, "Chips")?;
        party
    };

    let store = open_store(&config)?;

    let curry_list = store.list("c1").unwrap();
    assert_eq!(
        curry_list.displays(),
        vec!["Coconut milk (400 ml)", "Garlic (4 cloves)", "Chili (3 )"]
    );
    assert!(curry_list.items[2].checked);
    assert_eq!(store.list(&party_id).unwrap().displays(), vec!["Chips"]);
    Ok(())
}

#[test]
fn test_removed_list_stays_removed_after_reopen() -> Result<()> {
    let (config, _temp_dir) = setup_config()?;

    {
        let mut store = open_store(&config)?;
        store.bulk_insert(&curry())?;
        store.remove_list("c1")?;
    }

    let store = open_store(&config)?;
    assert!(store.lists().is_empty());
    Ok(())
}

#[test]
fn test_noop_does_not_create_snapshot() -> Result<()> {
    let (config, _temp_dir) = setup_config()?;
    let mut store = open_store(&config)?;

    store.remove_list("nothing")?;
    store.toggle_checked("nothing", "nothing")?;

    assert!(!config.snapshot_path().exists());
    Ok(())
}

#[test]
fn test_namespaces_are_isolated() -> Result<()> {
    let (config, _temp_dir) = setup_config()?;
    let other = config.clone().with_namespace("otherLists");

    let mut store = open_store(&config)?;
    store.bulk_insert(&curry())?;

    let other_store = open_store(&other)?;
    assert!(other_store.lists().is_empty());
    Ok(())
}

#[test]
fn test_pretty_snapshot_is_readable() -> Result<()> {
    let (mut config, _temp_dir) = setup_config()?;
    config.pretty_json = true;

    let mut store = open_store(&config)?;
    store.bulk_insert(&curry())?;

    let content = fs::read_to_string(config.snapshot_path())?;
    assert!(content.contains('\n'));
    assert!(content.contains("\"groceryLists\""));

    let reloaded = JsonFilePersistence::new(&config).load()?;
    assert_eq!(reloaded, store.lists());
    Ok(())
}

#[test]
fn test_corrupt_snapshot_fails_to_open() -> Result<()> {
    let (config, _temp_dir) = setup_config()?;
    fs::write(config.snapshot_path(), "garbage")?;

    let result = open_store(&config);

    assert!(result.is_err());
    Ok(())
}
