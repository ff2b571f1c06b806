//! User preference entity - Price, distance, rating and notification settings for a user.
//!
//! One row per user. `min_price <= max_price` is expected but deliberately not a
//! constraint here; see `core::customer::create_user_preference`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::base::base_record;

/// User preference database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_preferences")]
pub struct Model {
    /// Unique identifier for the preference
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning user, one preference row per user
    #[sea_orm(unique)]
    pub user_id: i64,
    /// Lowest price the user wants to see
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub min_price: Decimal,
    /// Highest price the user wants to see
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub max_price: Decimal,
    /// Maximum distance in kilometers
    pub max_distance: u32,
    /// Lowest average rating the user wants to see
    #[sea_orm(column_type = "Decimal(Some((3, 2)))")]
    pub min_rating: Decimal,
    /// Whether to send email notifications
    pub email_notifications: bool,
    /// Whether to send push notifications
    pub push_notifications: bool,
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

/// Defines relationships between the preference and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each preference row belongs to one user
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
