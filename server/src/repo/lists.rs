//! Per-user recipe lists: favorites and the shopping cart.
//!
//! Both lists are plain (user, recipe) pairs with the same rules, so they
//! share one code path keyed by [`RecipeList`].

use crate::models::{NewCartItem, NewFavorite};
use crate::schema::{favorites, shopping_cart};
use diesel::prelude::*;
use std::collections::HashSet;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeList {
    Favorites,
    ShoppingCart,
}

impl RecipeList {
    /// Add the pair. Returns false when it was already present.
    pub fn add(self, conn: &mut PgConnection, user_id: Uuid, recipe_id: i32) -> QueryResult<bool> {
        let inserted = match self {
            Self::Favorites => diesel::insert_into(favorites::table)
                .values(NewFavorite { user_id, recipe_id })
                .on_conflict_do_nothing()
                .execute(conn)?,
            Self::ShoppingCart => diesel::insert_into(shopping_cart::table)
                .values(NewCartItem { user_id, recipe_id })
                .on_conflict_do_nothing()
                .execute(conn)?,
        };
        Ok(inserted > 0)
    }

    /// Remove the pair. Returns false when it was not present.
    pub fn remove(
        self,
        conn: &mut PgConnection,
        user_id: Uuid,
        recipe_id: i32,
    ) -> QueryResult<bool> {
        let deleted = match self {
            Self::Favorites => diesel::delete(
                favorites::table
                    .filter(favorites::user_id.eq(user_id))
                    .filter(favorites::recipe_id.eq(recipe_id)),
            )
            .execute(conn)?,
            Self::ShoppingCart => diesel::delete(
                shopping_cart::table
                    .filter(shopping_cart::user_id.eq(user_id))
                    .filter(shopping_cart::recipe_id.eq(recipe_id)),
            )
            .execute(conn)?,
        };
        Ok(deleted > 0)
    }

    /// Which of `recipe_ids` are on this user's list.
    pub fn recipe_ids_among(
        self,
        conn: &mut PgConnection,
        user_id: Uuid,
        recipe_ids: &[i32],
    ) -> QueryResult<HashSet<i32>> {
        let ids: Vec<i32> = match self {
            Self::Favorites => favorites::table
                .filter(favorites::user_id.eq(user_id))
                .filter(favorites::recipe_id.eq_any(recipe_ids))
                .select(favorites::recipe_id)
                .load(conn)?,
            Self::ShoppingCart => shopping_cart::table
                .filter(shopping_cart::user_id.eq(user_id))
                .filter(shopping_cart::recipe_id.eq_any(recipe_ids))
                .select(shopping_cart::recipe_id)
                .load(conn)?,
        };
        Ok(ids.into_iter().collect())
    }

    pub fn already_present_message(self) -> &'static str {
        match self {
            Self::Favorites => "Recipe is already in favorites",
            Self::ShoppingCart => "Recipe is already in the shopping cart",
        }
    }

    pub fn not_present_message(self) -> &'static str {
        match self {
            Self::Favorites => "Recipe is not in favorites",
            Self::ShoppingCart => "Recipe is not in the shopping cart",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::{create_user, test_connection};
    use crate::models::NewRecipe;
    use crate::schema::recipes;

    fn bare_recipe(conn: &mut PgConnection, author_id: Uuid) -> i32 {
        diesel::insert_into(recipes::table)
            .values(NewRecipe {
                author_id,
                name: "Toast",
                image: "toast.png",
                text: "Toast the bread.",
                cooking_time: 3,
            })
            .returning(recipes::id)
            .get_result(conn)
            .unwrap()
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            RecipeList::Favorites.already_present_message(),
            "Recipe is already in favorites"
        );
        assert_eq!(
            RecipeList::ShoppingCart.already_present_message(),
            "Recipe is already in the shopping cart"
        );
    }

    #[test]
    fn test_add_twice_then_remove_twice() {
        let Some(mut conn) = test_connection() else {
            return;
        };
        let user = create_user(&mut conn, "lister");
        let recipe_id = bare_recipe(&mut conn, user.id);

        for list in [RecipeList::Favorites, RecipeList::ShoppingCart] {
            assert!(list.add(&mut conn, user.id, recipe_id).unwrap());
            assert!(!list.add(&mut conn, user.id, recipe_id).unwrap());

            let on_list = list.recipe_ids_among(&mut conn, user.id, &[recipe_id]).unwrap();
            assert!(on_list.contains(&recipe_id));

            assert!(list.remove(&mut conn, user.id, recipe_id).unwrap());
            assert!(!list.remove(&mut conn, user.id, recipe_id).unwrap());
        }
    }

    #[test]
    fn test_lists_are_independent() {
        let Some(mut conn) = test_connection() else {
            return;
        };
        let user = create_user(&mut conn, "split");
        let recipe_id = bare_recipe(&mut conn, user.id);

        RecipeList::Favorites.add(&mut conn, user.id, recipe_id).unwrap();

        let in_cart = RecipeList::ShoppingCart
            .recipe_ids_among(&mut conn, user.id, &[recipe_id])
            .unwrap();
        assert!(in_cart.is_empty());
    }
}
