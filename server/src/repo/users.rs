use crate::models::{NewUser, User};
use crate::schema::{recipes, users};
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use std::collections::HashMap;
use uuid::Uuid;

pub fn get_user(conn: &mut PgConnection, id: Uuid) -> QueryResult<Option<User>> {
    users::table
        .find(id)
        .select(User::as_select())
        .first(conn)
        .optional()
}

pub fn users_by_ids(conn: &mut PgConnection, ids: &[Uuid]) -> QueryResult<HashMap<Uuid, User>> {
    let rows: Vec<User> = users::table
        .filter(users::id.eq_any(ids))
        .select(User::as_select())
        .load(conn)?;
    Ok(rows.into_iter().map(|u| (u.id, u)).collect())
}

/// A page of users ordered by username, plus the total number of users.
pub fn list_users(
    conn: &mut PgConnection,
    limit: i64,
    offset: i64,
) -> QueryResult<(Vec<User>, i64)> {
    let rows: Vec<(User, i64)> = users::table
        .order(users::username.asc())
        .select((User::as_select(), sql::<BigInt>("COUNT(*) OVER()")))
        .limit(limit)
        .offset(offset)
        .load(conn)?;

    // An offset past the end yields no rows and therefore no window total.
    let total = match rows.first() {
        Some((_, total)) => *total,
        None => users::table.count().get_result(conn)?,
    };

    Ok((rows.into_iter().map(|(u, _)| u).collect(), total))
}

pub fn create_user(conn: &mut PgConnection, new_user: &NewUser) -> QueryResult<User> {
    diesel::insert_into(users::table)
        .values(new_user)
        .returning(User::as_returning())
        .get_result(conn)
}

/// Number of recipes written by each author. Authors without recipes are absent.
pub fn recipe_counts(
    conn: &mut PgConnection,
    author_ids: &[Uuid],
) -> QueryResult<HashMap<Uuid, i64>> {
    let rows: Vec<(Uuid, i64)> = recipes::table
        .filter(recipes::author_id.eq_any(author_ids))
        .group_by(recipes::author_id)
        .select((recipes::author_id, diesel::dsl::count_star()))
        .load(conn)?;
    Ok(rows.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::{create_user as insert_user, test_connection};

    #[test]
    fn test_page_past_the_end_keeps_total() {
        let Some(mut conn) = test_connection() else {
            return;
        };
        insert_user(&mut conn, "paged");

        let (first, total) = list_users(&mut conn, 1, 0).unwrap();
        assert_eq!(first.len(), 1);

        let (rest, total_again) = list_users(&mut conn, 10, total).unwrap();
        assert!(rest.is_empty());
        assert_eq!(total, total_again);
    }

    #[test]
    fn test_users_by_ids() {
        let Some(mut conn) = test_connection() else {
            return;
        };
        let a = insert_user(&mut conn, "anna");
        let b = insert_user(&mut conn, "boris");

        let found = users_by_ids(&mut conn, &[a.id, b.id, Uuid::new_v4()]).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[&a.id].username, a.username);
    }
}
