//! Token lookup - Resolves a presented API key to the user it belongs to.
//!
//! A user may hold several tokens, one per client. Keys are produced by the
//! authentication framework; this module only stores and resolves them.

use crate::{
    entities::{AuthToken, User, auth_token, user},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};
use tracing::debug;

/// Stores a token key for a user.
///
/// # Errors
/// Returns an error if:
/// - The key is empty
/// - The key already exists (`Error::UniqueViolation`)
/// - The user does not exist (`Error::ForeignKeyViolation`)
pub async fn create_token(
    db: &DatabaseConnection,
    user_id: i64,
    key: &str,
    client_name: Option<String>,
) -> Result<auth_token::Model> {
    if key.trim().is_empty() {
        return Err(Error::validation("key", "cannot be empty"));
    }

    auth_token::ActiveModel {
        key: Set(key.to_string()),
        user_id: Set(user_id),
        client_name: Set(client_name),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Returns the user a token key stands for.
///
/// Revoked tokens (inactive or soft-deleted) and inactive or deleted users do
/// not authenticate.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn authenticate(db: &DatabaseConnection, key: &str) -> Result<Option<user::Model>> {
    let found = AuthToken::find()
        .filter(auth_token::Column::Key.eq(key))
        .filter(auth_token::Column::IsActive.eq(true))
        .filter(auth_token::Column::IsDelete.eq(false))
        .find_also_related(User)
        .one(db)
        .await?;

    let user = found
        .and_then(|(_, user)| user)
        .filter(|user| user.is_active && !user.is_delete);

    if user.is_none() {
        debug!("Token did not resolve to an active user");
    }
    Ok(user)
}
