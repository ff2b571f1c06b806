//! Review entity - A user's 1 to 5 star rating and comment on a menu item.
//!
//! One review per (user, menu item). The rating range is checked before every
//! save so an out-of-range value never reaches the table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::base::{StringList, base_record, stamp};

/// Lowest accepted rating
pub const MIN_RATING: u8 = 1;
/// Highest accepted rating
pub const MAX_RATING: u8 = 5;

/// Review database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    /// Unique identifier for the review
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Author of the review
    pub user_id: i64,
    /// The reviewed menu item
    pub menu_item_id: i64,
    /// Rating from 1 to 5
    pub rating: u8,
    /// Optional review text
    #[sea_orm(column_type = "Text", nullable)]
    pub comment: Option<String>,
    /// Review image URLs
    pub images: StringList,
    /// Whether the author actually ordered the item
    pub is_verified_purchase: bool,
    /// Number of readers who found the review helpful
    pub helpful_votes: u32,
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

/// Whether `rating` is inside the accepted 1..=5 range.
#[must_use]
pub const fn is_valid_rating(rating: u8) -> bool {
    rating >= MIN_RATING && rating <= MAX_RATING
}

/// Defines relationships between the review and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each review is written by one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    /// Each review rates one menu item
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

base_record!(@record);

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: sea_orm::ConnectionTrait,
    {
        if let sea_orm::ActiveValue::Set(rating) = self.rating {
            if !is_valid_rating(rating) {
                return Err(DbErr::Custom(format!(
                    "rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
                )));
            }
        }
        stamp(
            &mut self.create_time,
            &mut self.update_time,
            &mut self.is_active,
            &mut self.is_delete,
            insert,
        );
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(!is_valid_rating(0));
        assert!(is_valid_rating(1));
        assert!(is_valid_rating(5));
        assert!(!is_valid_rating(6));
    }
}
