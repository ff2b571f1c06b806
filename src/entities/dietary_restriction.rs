//! Dietary restriction entity - Named restrictions (halal, nut free, ...) used for filtering food.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::base::base_record;

/// Dietary restriction database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "dietary_restrictions")]
pub struct Model {
    /// Unique identifier for the dietary restriction
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name, unique (e.g., "Vegan")
    #[sea_orm(unique, column_type = "String(StringLen::N(100))")]
    pub name: String,
    /// Free-form description
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    /// Icon class or emoji
    #[sea_orm(column_type = "String(StringLen::N(50))", nullable)]
    pub icon: Option<String>,
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

/// Defines relationships between the dietary restriction and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

base_record!();
