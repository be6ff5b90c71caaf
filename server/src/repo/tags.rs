use crate::models::{NewTag, Tag};
use crate::schema::{recipe_tags, tags};
use diesel::prelude::*;
use std::collections::{HashMap, HashSet};

pub fn list_tags(conn: &mut PgConnection) -> QueryResult<Vec<Tag>> {
    tags::table
        .order(tags::name.asc())
        .select(Tag::as_select())
        .load(conn)
}

pub fn get_tag(conn: &mut PgConnection, id: i32) -> QueryResult<Option<Tag>> {
    tags::table
        .find(id)
        .select(Tag::as_select())
        .first(conn)
        .optional()
}

/// Ids from `ids` that have no tag row, in ascending order.
pub fn missing_tag_ids(conn: &mut PgConnection, ids: &[i32]) -> QueryResult<Vec<i32>> {
    let found: HashSet<i32> = tags::table
        .filter(tags::id.eq_any(ids))
        .select(tags::id)
        .load::<i32>(conn)?
        .into_iter()
        .collect();

    let mut missing: Vec<i32> = ids.iter().copied().filter(|id| !found.contains(id)).collect();
    missing.sort_unstable();
    missing.dedup();
    Ok(missing)
}

/// Tags of each recipe, ordered by name.
pub fn tags_for_recipes(
    conn: &mut PgConnection,
    recipe_ids: &[i32],
) -> QueryResult<HashMap<i32, Vec<Tag>>> {
    let rows: Vec<(i32, Tag)> = recipe_tags::table
        .inner_join(tags::table)
        .filter(recipe_tags::recipe_id.eq_any(recipe_ids))
        .order(tags::name.asc())
        .select((recipe_tags::recipe_id, Tag::as_select()))
        .load(conn)?;

    let mut by_recipe: HashMap<i32, Vec<Tag>> = HashMap::new();
    for (recipe_id, tag) in rows {
        by_recipe.entry(recipe_id).or_default().push(tag);
    }
    Ok(by_recipe)
}

/// Insert reference tags, skipping any that clash with existing names or slugs.
pub fn insert_tags(conn: &mut PgConnection, new_tags: &[NewTag]) -> QueryResult<usize> {
    diesel::insert_into(tags::table)
        .values(new_tags)
        .on_conflict_do_nothing()
        .execute(conn)
}

pub fn count_tags(conn: &mut PgConnection) -> QueryResult<i64> {
    tags::table.count().get_result(conn)
}
