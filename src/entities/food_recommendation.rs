//! Food recommendation entity - A scored suggestion of a menu item for a user.
//!
//! The confidence score is produced by the recommender elsewhere and only stored
//! here. Each (user, menu item) pair appears at most once; listings are ordered by
//! descending confidence.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::base::base_record;

/// Food recommendation database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "food_recommendations")]
pub struct Model {
    /// Unique identifier for the recommendation
    #[sea_orm(primary_key)]
    pub id: i64,
    /// User the item is recommended to
    pub user_id: i64,
    /// The recommended menu item
    pub menu_item_id: i64,
    /// Confidence between 0 and 1
    #[sea_orm(column_type = "Decimal(Some((3, 2)))")]
    pub confidence_score: Decimal,
    /// Why this item was recommended
    #[sea_orm(column_type = "String(StringLen::N(200))", nullable)]
    pub reason: Option<String>,
    /// Whether the user has seen the recommendation
    pub is_viewed: bool,
    /// Whether the user opened the recommended item
    pub is_clicked: bool,
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

/// Defines relationships between the recommendation and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each recommendation targets one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    /// Each recommendation suggests one menu item
    #[sea_orm(
        belongs_to = "super::menu_item::Entity",
        from = "Column::MenuItemId",
        to = "super::menu_item::Column::Id",
        on_delete = "Cascade"
    )]
    MenuItem,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::menu_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MenuItem.def()
    }
}

base_record!();
