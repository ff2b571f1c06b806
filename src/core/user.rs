//! User business logic - Creating and looking up the accounts everything else belongs to.

use crate::{
    entities::{User, user},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};
use tracing::info;

/// Creates a user account.
///
/// The username is trimmed and must not be empty. An empty email is stored as
/// `None`.
///
/// # Errors
/// Returns an error if:
/// - The username is empty or whitespace-only
/// - The username is already taken (`Error::UniqueViolation`)
/// - The database insert operation fails
pub async fn create_user(
    db: &DatabaseConnection,
    username: &str,
    email: Option<&str>,
    first_name: &str,
    last_name: &str,
) -> Result<user::Model> {
    let username = username.trim();
    if username.is_empty() {
        return Err(Error::validation("username", "cannot be empty"));
    }

    let email = email
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(ToString::to_string);

    let user = user::ActiveModel {
        username: Set(username.to_string()),
        email: Set(email),
        first_name: Set(first_name.trim().to_string()),
        last_name: Set(last_name.trim().to_string()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Created user {} ({})", user.username, user.id);
    Ok(user)
}

/// Retrieves a user by primary key.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_user_by_id(db: &DatabaseConnection, user_id: i64) -> Result<Option<user::Model>> {
    User::find_by_id(user_id).one(db).await.map_err(Into::into)
}

/// Finds a user by exact username.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_user_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<user::Model>> {
    User::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await
        .map_err(Into::into)
}
