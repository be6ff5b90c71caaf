use anyhow::{Context, Result};
use diesel::{Connection, PgConnection};
use pantry_server::auth::create_session;
use pantry_server::models::NewUser;
use pantry_server::repo;

/// Create the user together with a session and print the session token.
pub fn create_user(
    conn: &mut PgConnection,
    email: &str,
    username: &str,
    first_name: &str,
    last_name: &str,
) -> Result<()> {
    let (user, token) = conn
        .transaction(|conn| {
            let user = repo::users::create_user(
                conn,
                &NewUser {
                    email,
                    username,
                    first_name,
                    last_name,
                },
            )?;
            let token = create_session(conn, user.id)?;
            Ok::<_, diesel::result::Error>((user, token))
        })
        .with_context(|| format!("Failed to create user {username}"))?;

    tracing::info!(user_id = %user.id, %username, "created user");
    println!("Created user {} ({})", user.username, user.id);
    println!("Token: {token}");
    Ok(())
}
