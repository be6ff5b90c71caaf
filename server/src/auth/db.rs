use crate::models::{NewSession, User};
use crate::schema::{sessions, users};
use chrono::{Duration, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::crypto::{generate_token, hash_token};

pub const SESSION_LIFETIME_DAYS: i64 = 30;

/// Open a session for the user and return its bearer token.
pub fn create_session(conn: &mut PgConnection, user_id: Uuid) -> QueryResult<String> {
    let token = generate_token();
    let token_hash = hash_token(&token);

    diesel::insert_into(sessions::table)
        .values(NewSession {
            user_id,
            token_hash: &token_hash,
            expires_at: Utc::now() + Duration::days(SESSION_LIFETIME_DAYS),
        })
        .execute(conn)?;

    Ok(token)
}

/// The owner of an unexpired session with this token.
pub fn get_user_from_token(conn: &mut PgConnection, token: &str) -> QueryResult<Option<User>> {
    let token_hash = hash_token(token);

    sessions::table
        .inner_join(users::table)
        .filter(sessions::token_hash.eq(&token_hash))
        .filter(sessions::expires_at.gt(Utc::now()))
        .select(User::as_select())
        .first(conn)
        .optional()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::{create_user, test_connection};

    #[test]
    fn test_session_round_trip() {
        let Some(mut conn) = test_connection() else {
            return;
        };
        let user = create_user(&mut conn, "sessioned");

        let token = create_session(&mut conn, user.id).unwrap();
        let found = get_user_from_token(&mut conn, &token).unwrap().unwrap();
        assert_eq!(found.id, user.id);

        assert!(get_user_from_token(&mut conn, "not-a-token").unwrap().is_none());
    }

    #[test]
    fn test_expired_session_rejected() {
        let Some(mut conn) = test_connection() else {
            return;
        };
        let user = create_user(&mut conn, "expired");
        let token = "expired-token";
        let token_hash = hash_token(token);

        diesel::insert_into(sessions::table)
            .values(NewSession {
                user_id: user.id,
                token_hash: &token_hash,
                expires_at: Utc::now() - Duration::minutes(1),
            })
            .execute(&mut conn)
            .unwrap();

        assert!(get_user_from_token(&mut conn, token).unwrap().is_none());
    }
}
