use crate::models::{Ingredient, NewIngredient};
use crate::schema::ingredients;
use diesel::prelude::*;
use std::collections::HashSet;

/// All ingredients ordered by name, optionally restricted to a case-insensitive name prefix.
pub fn list_ingredients(
    conn: &mut PgConnection,
    name_prefix: Option<&str>,
) -> QueryResult<Vec<Ingredient>> {
    let mut query = ingredients::table
        .order((ingredients::name.asc(), ingredients::measurement_unit.asc()))
        .select(Ingredient::as_select())
        .into_boxed();

    if let Some(prefix) = name_prefix.filter(|p| !p.is_empty()) {
        query = query.filter(ingredients::name.ilike(prefix_pattern(prefix)));
    }

    query.load(conn)
}

/// LIKE pattern matching names that start with `prefix` literally.
fn prefix_pattern(prefix: &str) -> String {
    let escaped = prefix
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("{escaped}%")
}

pub fn get_ingredient(conn: &mut PgConnection, id: i32) -> QueryResult<Option<Ingredient>> {
    ingredients::table
        .find(id)
        .select(Ingredient::as_select())
        .first(conn)
        .optional()
}

/// Ids from `ids` that have no ingredient row, in ascending order.
pub fn missing_ingredient_ids(conn: &mut PgConnection, ids: &[i32]) -> QueryResult<Vec<i32>> {
    let found: HashSet<i32> = ingredients::table
        .filter(ingredients::id.eq_any(ids))
        .select(ingredients::id)
        .load::<i32>(conn)?
        .into_iter()
        .collect();

    let mut missing: Vec<i32> = ids.iter().copied().filter(|id| !found.contains(id)).collect();
    missing.sort_unstable();
    missing.dedup();
    Ok(missing)
}

/// Insert reference ingredients, skipping (name, unit) pairs that already exist.
pub fn insert_ingredients(
    conn: &mut PgConnection,
    new_ingredients: &[NewIngredient],
) -> QueryResult<usize> {
    diesel::insert_into(ingredients::table)
        .values(new_ingredients)
        .on_conflict_do_nothing()
        .execute(conn)
}

pub fn count_ingredients(conn: &mut PgConnection) -> QueryResult<i64> {
    ingredients::table.count().get_result(conn)
}
