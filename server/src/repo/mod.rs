//! Query functions over the relational schema.
//!
//! Each function takes a connection plus entity ids and returns plain rows or
//! collections. Related data is fetched with one query per collection, never
//! lazily per row.

pub mod ingredients;
pub mod lists;
pub mod recipes;
pub mod shopping_list;
pub mod subscriptions;
pub mod tags;
pub mod users;

use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// True when the error is a unique-constraint violation.
pub fn is_unique_violation(err: &DieselError) -> bool {
    matches!(
        err,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}
