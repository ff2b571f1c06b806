//! Category entity - Food categories like Pizza, Burger, Indian or Chinese.
//!
//! Menu items belong to exactly one category and are removed with it. Search
//! history rows only point at a category optionally and lose the reference
//! instead.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::base::base_record;

/// Colour used for categories created without one
pub const DEFAULT_COLOR: &str = "#FF6B6B";

/// Category database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    /// Unique identifier for the category
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name, unique (e.g., "Pizza")
    #[sea_orm(unique, column_type = "String(StringLen::N(100))")]
    pub name: String,
    /// Free-form description
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    /// Path of the uploaded icon image
    pub icon: Option<String>,
    /// Hex colour code, e.g. `#FF6B6B`
    #[sea_orm(column_type = "String(StringLen::N(7))")]
    pub color: String,
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

/// Defines relationships between the category and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One category groups many menu items
    #[sea_orm(has_many = "super::menu_item::Entity")]
    MenuItems,
    /// Searches that were narrowed to this category
    #[sea_orm(has_many = "super::search_history::Entity")]
    SearchHistory,
}

impl Related<super::menu_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MenuItems.def()
    }
}

impl Related<super::search_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SearchHistory.def()
    }
}

base_record!();
