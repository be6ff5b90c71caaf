use crate::models::{NewSubscription, User};
use crate::schema::{subscriptions, users};
use diesel::prelude::*;
use pantry_core::{ensure_distinct, SubscriptionError};
use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

use super::users::get_user;

#[derive(Error, Debug)]
pub enum SubscribeError {
    #[error(transparent)]
    Invalid(#[from] SubscriptionError),

    #[error("User not found")]
    AuthorNotFound,

    #[error("Already subscribed to {0}")]
    AlreadySubscribed(String),

    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),
}

/// Make `user_id` follow `author_id` and return the author.
pub fn subscribe(
    conn: &mut PgConnection,
    user_id: Uuid,
    author_id: Uuid,
) -> Result<User, SubscribeError> {
    ensure_distinct(&user_id, &author_id)?;

    let author = get_user(conn, author_id)?.ok_or(SubscribeError::AuthorNotFound)?;

    let inserted = diesel::insert_into(subscriptions::table)
        .values(NewSubscription { user_id, author_id })
        .on_conflict_do_nothing()
        .execute(conn)?;

    if inserted == 0 {
        return Err(SubscribeError::AlreadySubscribed(author.username));
    }

    Ok(author)
}

/// Returns false when no subscription existed.
pub fn unsubscribe(conn: &mut PgConnection, user_id: Uuid, author_id: Uuid) -> QueryResult<bool> {
    let deleted = diesel::delete(
        subscriptions::table
            .filter(subscriptions::user_id.eq(user_id))
            .filter(subscriptions::author_id.eq(author_id)),
    )
    .execute(conn)?;
    Ok(deleted > 0)
}

/// Which of `author_ids` the user follows.
pub fn followed_among(
    conn: &mut PgConnection,
    user_id: Uuid,
    author_ids: &[Uuid],
) -> QueryResult<HashSet<Uuid>> {
    let ids: Vec<Uuid> = subscriptions::table
        .filter(subscriptions::user_id.eq(user_id))
        .filter(subscriptions::author_id.eq_any(author_ids))
        .select(subscriptions::author_id)
        .load(conn)?;
    Ok(ids.into_iter().collect())
}

/// A page of the authors a user follows, in subscription order, plus the total.
pub fn list_followed(
    conn: &mut PgConnection,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> QueryResult<(Vec<User>, i64)> {
    let authors: Vec<User> = subscriptions::table
        .inner_join(users::table.on(users::id.eq(subscriptions::author_id)))
        .filter(subscriptions::user_id.eq(user_id))
        .order(subscriptions::id.asc())
        .select(User::as_select())
        .limit(limit)
        .offset(offset)
        .load(conn)?;

    let total = subscriptions::table
        .filter(subscriptions::user_id.eq(user_id))
        .count()
        .get_result(conn)?;

    Ok((authors, total))
}
