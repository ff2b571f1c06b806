//! Search history entity - What a user searched for, kept to feed recommendations.
//!
//! The category reference is optional and is set to NULL when the category is
//! removed, so the history row survives.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::base::base_record;

/// Search history database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "search_history")]
pub struct Model {
    /// Unique identifier for the search
    #[sea_orm(primary_key)]
    pub id: i64,
    /// User who ran the search
    pub user_id: i64,
    /// Search text as typed, trimmed
    #[sea_orm(column_type = "String(StringLen::N(500))")]
    pub query: String,
    /// Category the search was narrowed to, cleared if the category is deleted
    pub category_id: Option<i64>,
    /// Location the search was run for
    #[sea_orm(column_type = "String(StringLen::N(200))", nullable)]
    pub location: Option<String>,
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

/// Defines relationships between the search and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each search belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    /// The category a search was narrowed to
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_delete = "SetNull"
    )]
    Category,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

base_record!();
