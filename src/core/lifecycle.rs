//! Record lifecycle - Soft delete, restore and activation for any entity.
//!
//! Every table carries the `is_active` / `is_delete` flags, so these helpers are
//! generic over the entity and address the flag columns by name. Rows are never
//! physically removed here.

use crate::errors::{Error, Result};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, sea_query::Expr};
use std::str::FromStr;
use tracing::info;

/// Looks up a column by its database name.
pub(crate) fn column<E: EntityTrait>(name: &str) -> Result<E::Column> {
    E::Column::from_str(name).map_err(|_| Error::UnknownField {
        model: E::default().table_name().to_string(),
        field: name.to_string(),
    })
}

async fn set_flag<E: EntityTrait>(
    db: &impl ConnectionTrait,
    id: i64,
    flag: &str,
    value: bool,
) -> Result<()> {
    let flag_column = column::<E>(flag)?;
    let update_time = column::<E>("update_time")?;
    let id_column = column::<E>("id")?;

    let result = E::update_many()
        .col_expr(flag_column, Expr::value(value))
        .col_expr(update_time, Expr::value(chrono::Utc::now().naive_utc()))
        .filter(id_column.eq(id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::not_found(E::default().table_name(), id));
    }

    info!("{} {}: {} = {}", E::default().table_name(), id, flag, value);
    Ok(())
}

/// Marks a row as deleted while keeping it in the table.
///
/// Reviews feed a menu item's average rating; delete them through
/// [`crate::core::engagement::delete_review`] instead.
///
/// # Errors
/// Returns `Error::NotFound` if no row has this id.
pub async fn soft_delete<E: EntityTrait>(db: &impl ConnectionTrait, id: i64) -> Result<()> {
    set_flag::<E>(db, id, "is_delete", true).await
}

/// Clears the soft delete flag.
///
/// # Errors
/// Returns `Error::NotFound` if no row has this id.
pub async fn restore<E: EntityTrait>(db: &impl ConnectionTrait, id: i64) -> Result<()> {
    set_flag::<E>(db, id, "is_delete", false).await
}

/// Switches a row on or off without deleting it.
///
/// # Errors
/// Returns `Error::NotFound` if no row has this id.
pub async fn set_active<E: EntityTrait>(
    db: &impl ConnectionTrait,
    id: i64,
    active: bool,
) -> Result<()> {
    set_flag::<E>(db, id, "is_active", active).await
}
