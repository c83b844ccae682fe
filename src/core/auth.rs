//! Login business logic and explicit session context.
//!
//! Authentication is a record lookup: a user row matching the given
//! username and password. The result is a [`SessionUser`] value that the
//! caller passes explicitly into every operation needing to know who acted
//! (batch assignment, stock movements). There is no ambient session slot
//! anywhere in the crate.

use crate::{
    entities::{User, user},
    errors::{Error, Result},
};
use sea_orm::prelude::*;
use serde::{Deserialize, Serialize};

/// The logged-in user, carried explicitly by callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// The user's record id, recorded on batches and movements
    pub id: i64,
    /// Display name
    pub name: String,
    /// Role label
    pub role: String,
    /// Login name
    pub username: String,
}

impl From<user::Model> for SessionUser {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
            role: user.role,
            username: user.username,
        }
    }
}

/// Verifies credentials against the user collection.
///
/// Empty input fails before any store call; a store row matching both
/// columns is required, otherwise the credentials are invalid.
///
/// # Errors
/// Returns [`Error::Config`] for empty input, [`Error::InvalidCredentials`]
/// when no user matches, or the store fault unchanged.
pub async fn login(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> Result<SessionUser> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(Error::Config {
            message: "Username and password are required".to_string(),
        });
    }

    let user = User::find()
        .filter(user::Column::Username.eq(username))
        .filter(user::Column::Password.eq(password))
        .one(db)
        .await?
        .ok_or(Error::InvalidCredentials)?;

    Ok(SessionUser::from(user))
}
