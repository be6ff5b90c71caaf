use crate::schema::{ingredients, recipe_ingredients, recipes, shopping_cart, users};
use diesel::prelude::*;
use pantry_core::{CartRecipe, IngredientLine};
use std::collections::HashMap;
use uuid::Uuid;

/// The recipes in a user's cart, in the order they were added, with their ingredient lines.
pub fn cart_recipes(conn: &mut PgConnection, user_id: Uuid) -> QueryResult<Vec<CartRecipe>> {
    let entries: Vec<(i32, String, String)> = shopping_cart::table
        .inner_join(recipes::table.inner_join(users::table))
        .filter(shopping_cart::user_id.eq(user_id))
        .order(shopping_cart::id.asc())
        .select((recipes::id, recipes::name, users::username))
        .load(conn)?;

    let recipe_ids: Vec<i32> = entries.iter().map(|(id, _, _)| *id).collect();

    let lines: Vec<(i32, String, String, i32)> = recipe_ingredients::table
        .inner_join(ingredients::table)
        .filter(recipe_ingredients::recipe_id.eq_any(&recipe_ids))
        .order(recipe_ingredients::id.asc())
        .select((
            recipe_ingredients::recipe_id,
            ingredients::name,
            ingredients::measurement_unit,
            recipe_ingredients::amount,
        ))
        .load(conn)?;

    let mut by_recipe: HashMap<i32, Vec<IngredientLine>> = HashMap::new();
    for (recipe_id, name, measurement_unit, amount) in lines {
        by_recipe.entry(recipe_id).or_default().push(IngredientLine {
            name,
            measurement_unit,
            amount: i64::from(amount),
        });
    }

    Ok(entries
        .into_iter()
        .map(|(recipe_id, recipe_name, author_username)| CartRecipe {
            ingredients: by_recipe.get(&recipe_id).cloned().unwrap_or_default(),
            recipe_id,
            recipe_name,
            author_username,
        })
        .collect())
}
