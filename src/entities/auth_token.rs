//! Auth token entity - One of possibly many API tokens owned by a user.
//!
//! Issuing and rotating keys belongs to the authentication framework; this table
//! only records which user a presented key stands for.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::base::base_record;

/// Auth token database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "auth_tokens")]
pub struct Model {
    /// Unique identifier for the token
    #[sea_orm(primary_key)]
    pub id: i64,
    /// The opaque key a client presents
    #[sea_orm(unique)]
    pub key: String,
    /// User the key authenticates as
    pub user_id: i64,
    /// Optional label for the device or client holding the key
    pub client_name: Option<String>,
    /// When the row was inserted
    pub create_time: DateTime,
    /// When the row was last written
    pub update_time: DateTime,
    /// Whether the row is switched on
    #[sea_orm(default_value = true)]
    pub is_active: bool,
    /// Soft delete flag - if true, the row is hidden but data is preserved
    #[sea_orm(default_value = false)]
    pub is_delete: bool,
}

/// Defines relationships between the token and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each token belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

base_record!();
