//! Menu item entity - A dish sold at one outlet under one category.
//!
//! Item names are unique within an outlet. `total_orders` and `average_rating`
//! are popularity counters maintained by the ordering and review flows.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::base::{StringList, base_record};

/// Menu item database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "menu_items")]
pub struct Model {
    /// Unique identifier for the menu item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Outlet that sells the item
    pub outlet_id: i64,
    /// Menu category the item is listed under
    pub category_id: i64,
    /// Dish name, unique within its outlet
    #[sea_orm(column_type = "String(StringLen::N(200))")]
    pub name: String,
    /// Free-form description
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    /// Price in rupees, two decimal places
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
    /// Path of the main photo
    pub primary_image: Option<String>,
    /// Additional image URLs
    pub images: StringList,
    /// Contains no meat or fish
    pub is_vegetarian: bool,
    /// Flagged as spicy on the menu
    pub is_spicy: bool,
    /// Contains no gluten
    pub is_gluten_free: bool,
    /// Whether the item can be ordered right now
    #[sea_orm(default_value = true)]
    pub is_available: bool,
    /// Energy per serving in kcal
    pub calories: Option<u32>,
    /// Preparation time in minutes
    pub preparation_time: Option<u32>,
    /// Number of times the item was ordered
    pub total_orders: u32,
    /// Average of the non-deleted review ratings, two decimal places
    #[sea_orm(column_type = "Decimal(Some((3, 2)))")]
    pub average_rating: Decimal,
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

/// Defines relationships between the menu item and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each menu item is sold by one outlet
    #[sea_orm(
        belongs_to = "super::outlet::Entity",
        from = "Column::OutletId",
        to = "super::outlet::Column::Id",
        on_delete = "Cascade"
    )]
    Outlet,
    /// Each menu item sits in one category
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_delete = "Cascade"
    )]
    Category,
    /// One menu item has many reviews
    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,
    /// Favorites pointing at this item
    #[sea_orm(has_many = "super::favorite_item::Entity")]
    FavoritedBy,
    /// Recommendations suggesting this item
    #[sea_orm(has_many = "super::food_recommendation::Entity")]
    Recommendations,
}

impl Related<super::outlet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Outlet.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl Related<super::favorite_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FavoritedBy.def()
    }
}

impl Related<super::food_recommendation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Recommendations.def()
    }
}

base_record!();
