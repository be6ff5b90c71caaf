//! Recipe aggregate persistence.
//!
//! A recipe owns its tag associations and its ingredient amounts. Writes
//! replace both sets inside one transaction; reads assemble whole pages of
//! aggregates with one query per related collection.

use crate::models::{
    NewRecipe, NewRecipeIngredient, NewRecipeTag, Recipe, RecipeChanges, Tag, User,
};
use crate::schema::{ingredients, recipe_ingredients, recipe_tags, recipes};
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use pantry_core::{join_ids, RecipeDraft, RecipeValidationError};
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

use super::ingredients::missing_ingredient_ids;
use super::tags::{missing_tag_ids, tags_for_recipes};
use super::users::users_by_ids;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error(transparent)]
    Invalid(#[from] RecipeValidationError),

    #[error("Unknown tags: {}", join_ids(.0))]
    UnknownTags(Vec<i32>),

    #[error("Unknown ingredients: {}", join_ids(.0))]
    UnknownIngredients(Vec<i32>),

    #[error("Recipe not found")]
    RecipeNotFound,

    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),
}

/// One ingredient line of a recipe, as shown to clients.
#[derive(Queryable, Debug, Clone, PartialEq, Eq)]
pub struct RecipeIngredientRow {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

/// A recipe together with everything it references.
#[derive(Debug, Clone)]
pub struct RecipeAggregate {
    pub recipe: Recipe,
    pub author: User,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<RecipeIngredientRow>,
}

/// Validate and store a new recipe written by `author_id`. Returns its id.
pub fn create_recipe(
    conn: &mut PgConnection,
    author_id: Uuid,
    draft: &RecipeDraft,
) -> Result<i32, WriteError> {
    draft.validate()?;

    conn.transaction(|conn| {
        ensure_references_exist(conn, draft)?;

        let recipe_id = diesel::insert_into(recipes::table)
            .values(NewRecipe {
                author_id,
                name: &draft.name,
                image: &draft.image,
                text: &draft.text,
                cooking_time: draft.cooking_time,
            })
            .returning(recipes::id)
            .get_result(conn)?;

        insert_ingredient_amounts(conn, recipe_id, draft)?;
        insert_tag_links(conn, recipe_id, draft)?;

        tracing::info!(recipe_id, %author_id, "created recipe");
        Ok(recipe_id)
    })
}

/// Replace the contents of an existing recipe. Author and creation time are kept.
pub fn update_recipe(
    conn: &mut PgConnection,
    recipe_id: i32,
    draft: &RecipeDraft,
) -> Result<(), WriteError> {
    draft.validate()?;

    conn.transaction(|conn| {
        ensure_references_exist(conn, draft)?;

        let updated = diesel::update(recipes::table.find(recipe_id))
            .set(RecipeChanges {
                name: &draft.name,
                image: &draft.image,
                text: &draft.text,
                cooking_time: draft.cooking_time,
            })
            .execute(conn)?;

        if updated == 0 {
            return Err(WriteError::RecipeNotFound);
        }

        diesel::delete(recipe_tags::table.filter(recipe_tags::recipe_id.eq(recipe_id)))
            .execute(conn)?;
        insert_tag_links(conn, recipe_id, draft)?;

        diesel::delete(
            recipe_ingredients::table.filter(recipe_ingredients::recipe_id.eq(recipe_id)),
        )
        .execute(conn)?;
        insert_ingredient_amounts(conn, recipe_id, draft)?;

        tracing::info!(recipe_id, "updated recipe");
        Ok(())
    })
}

/// Returns false when the recipe did not exist.
pub fn delete_recipe(conn: &mut PgConnection, recipe_id: i32) -> QueryResult<bool> {
    let deleted = diesel::delete(recipes::table.find(recipe_id)).execute(conn)?;
    Ok(deleted > 0)
}

fn ensure_references_exist(conn: &mut PgConnection, draft: &RecipeDraft) -> Result<(), WriteError> {
    let unknown_tags = missing_tag_ids(conn, &draft.tags)?;
    if !unknown_tags.is_empty() {
        return Err(WriteError::UnknownTags(unknown_tags));
    }

    let unknown_ingredients = missing_ingredient_ids(conn, &draft.ingredient_ids())?;
    if !unknown_ingredients.is_empty() {
        return Err(WriteError::UnknownIngredients(unknown_ingredients));
    }

    Ok(())
}

fn insert_ingredient_amounts(
    conn: &mut PgConnection,
    recipe_id: i32,
    draft: &RecipeDraft,
) -> QueryResult<usize> {
    let rows: Vec<NewRecipeIngredient> = draft
        .ingredients
        .iter()
        .map(|i| NewRecipeIngredient {
            recipe_id,
            ingredient_id: i.id,
            amount: i.amount,
        })
        .collect();

    diesel::insert_into(recipe_ingredients::table)
        .values(&rows)
        .execute(conn)
}

fn insert_tag_links(
    conn: &mut PgConnection,
    recipe_id: i32,
    draft: &RecipeDraft,
) -> QueryResult<usize> {
    let rows: Vec<NewRecipeTag> = draft
        .tags
        .iter()
        .map(|&tag_id| NewRecipeTag { recipe_id, tag_id })
        .collect();

    diesel::insert_into(recipe_tags::table)
        .values(&rows)
        .execute(conn)
}

pub fn get_recipe(conn: &mut PgConnection, recipe_id: i32) -> QueryResult<Option<Recipe>> {
    recipes::table
        .find(recipe_id)
        .select(Recipe::as_select())
        .first(conn)
        .optional()
}

/// A page of recipes, newest first, plus the total number of recipes.
pub fn list_recipes(
    conn: &mut PgConnection,
    limit: i64,
    offset: i64,
) -> QueryResult<(Vec<Recipe>, i64)> {
    let rows: Vec<(Recipe, i64)> = recipes::table
        .order((recipes::created_at.desc(), recipes::id.desc()))
        .select((Recipe::as_select(), sql::<BigInt>("COUNT(*) OVER()")))
        .limit(limit)
        .offset(offset)
        .load(conn)?;

    let total = match rows.first() {
        Some((_, total)) => *total,
        None => recipes::table.count().get_result(conn)?,
    };

    Ok((rows.into_iter().map(|(r, _)| r).collect(), total))
}

/// Recipes of each author, newest first.
pub fn recipes_by_authors(
    conn: &mut PgConnection,
    author_ids: &[Uuid],
) -> QueryResult<HashMap<Uuid, Vec<Recipe>>> {
    let rows: Vec<Recipe> = recipes::table
        .filter(recipes::author_id.eq_any(author_ids))
        .order((recipes::created_at.desc(), recipes::id.desc()))
        .select(Recipe::as_select())
        .load(conn)?;

    let mut by_author: HashMap<Uuid, Vec<Recipe>> = HashMap::new();
    for recipe in rows {
        by_author.entry(recipe.author_id).or_default().push(recipe);
    }
    Ok(by_author)
}

/// Ingredient lines of each recipe, in the order they were submitted.
pub fn ingredients_for_recipes(
    conn: &mut PgConnection,
    recipe_ids: &[i32],
) -> QueryResult<HashMap<i32, Vec<RecipeIngredientRow>>> {
    let rows: Vec<(i32, RecipeIngredientRow)> = recipe_ingredients::table
        .inner_join(ingredients::table)
        .filter(recipe_ingredients::recipe_id.eq_any(recipe_ids))
        .order(recipe_ingredients::id.asc())
        .select((
            recipe_ingredients::recipe_id,
            (
                ingredients::id,
                ingredients::name,
                ingredients::measurement_unit,
                recipe_ingredients::amount,
            ),
        ))
        .load(conn)?;

    let mut by_recipe: HashMap<i32, Vec<RecipeIngredientRow>> = HashMap::new();
    for (recipe_id, row) in rows {
        by_recipe.entry(recipe_id).or_default().push(row);
    }
    Ok(by_recipe)
}

/// Attach authors, tags and ingredients to a batch of recipes, keeping their order.
pub fn load_aggregates(
    conn: &mut PgConnection,
    recipes: Vec<Recipe>,
) -> QueryResult<Vec<RecipeAggregate>> {
    let recipe_ids: Vec<i32> = recipes.iter().map(|r| r.id).collect();
    let author_ids: Vec<Uuid> = recipes.iter().map(|r| r.author_id).collect();

    let mut tags = tags_for_recipes(conn, &recipe_ids)?;
    let mut ingredients = ingredients_for_recipes(conn, &recipe_ids)?;
    let authors = users_by_ids(conn, &author_ids)?;

    recipes
        .into_iter()
        .map(|recipe| {
            // Cascading deletes keep every recipe's author present.
            let author = authors
                .get(&recipe.author_id)
                .cloned()
                .ok_or(diesel::result::Error::NotFound)?;
            Ok(RecipeAggregate {
                tags: tags.remove(&recipe.id).unwrap_or_default(),
                ingredients: ingredients.remove(&recipe.id).unwrap_or_default(),
                author,
                recipe,
            })
        })
        .collect()
}

pub fn load_aggregate(
    conn: &mut PgConnection,
    recipe_id: i32,
) -> QueryResult<Option<RecipeAggregate>> {
    let Some(recipe) = get_recipe(conn, recipe_id)? else {
        return Ok(None);
    };
    Ok(load_aggregates(conn, vec![recipe])?.pop())
}

/// `(name, cooking_time)` of every recipe, quickest first.
pub fn cooking_times(conn: &mut PgConnection) -> QueryResult<Vec<(String, i32)>> {
    recipes::table
        .order((recipes::cooking_time.asc(), recipes::name.asc(), recipes::id.asc()))
        .select((recipes::name, recipes::cooking_time))
        .load(conn)
}
