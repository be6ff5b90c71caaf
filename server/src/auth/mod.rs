mod crypto;
mod db;
mod extractor;

pub use crypto::{generate_token, hash_token};
pub use db::{create_session, get_user_from_token};
pub use extractor::{AuthError, AuthUser};
