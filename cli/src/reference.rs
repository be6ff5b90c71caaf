//! Reference data import.

use anyhow::{Context, Result};
use diesel::PgConnection;
use pantry_server::models::{NewIngredient, NewTag};
use pantry_server::repo::{ingredients, tags};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_records(&raw).with_context(|| format!("Malformed JSON in {}", path.display()))
}

fn parse_records<T: DeserializeOwned>(raw: &str) -> Result<Vec<T>> {
    Ok(serde_json::from_str(raw)?)
}

pub fn load_tags(conn: &mut PgConnection, path: &Path) -> Result<()> {
    let records: Vec<NewTag> = read_records(path)?;
    let loaded = tags::insert_tags(conn, &records).context("Failed to insert tags")?;
    let total = tags::count_tags(conn)?;

    tracing::info!(file = %path.display(), read = records.len(), loaded, "loaded tags");
    println!("Loaded {loaded} of {} tags ({total} in database)", records.len());
    Ok(())
}

pub fn load_ingredients(conn: &mut PgConnection, path: &Path) -> Result<()> {
    let records: Vec<NewIngredient> = read_records(path)?;
    let loaded =
        ingredients::insert_ingredients(conn, &records).context("Failed to insert ingredients")?;
    let total = ingredients::count_ingredients(conn)?;

    tracing::info!(file = %path.display(), read = records.len(), loaded, "loaded ingredients");
    println!(
        "Loaded {loaded} of {} ingredients ({total} in database)",
        records.len()
    );
    Ok(())
}
