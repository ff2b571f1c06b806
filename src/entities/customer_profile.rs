//! Customer profile entity - Dietary flags, spice tolerance and taste lists for a user.
//!
//! A user has at most one customer profile; the `user_id` column is unique.

use sea_orm::Iterable;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::base::{StringList, base_record};
use crate::errors::Error;

/// How much heat a customer is happy with.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum SpiceLevel {
    /// Little to no heat
    #[sea_orm(string_value = "mild")]
    Mild,
    /// The default heat level
    #[default]
    #[sea_orm(string_value = "medium")]
    Medium,
    /// Noticeably spicy
    #[sea_orm(string_value = "hot")]
    Hot,
    /// As hot as the kitchen goes
    #[sea_orm(string_value = "extra_hot")]
    ExtraHot,
}

impl SpiceLevel {
    /// Parses the stored choice value (`mild`, `medium`, `hot`, `extra_hot`).
    ///
    /// # Errors
    /// Returns `Error::InvalidChoice` for anything else.
    pub fn parse(value: &str) -> crate::errors::Result<Self> {
        Self::iter()
            .find(|level| level.to_value() == value)
            .ok_or_else(|| Error::InvalidChoice {
                field: "spice_tolerance",
                value: value.to_string(),
            })
    }

    /// Human readable label shown in the back office
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mild => "Mild",
            Self::Medium => "Medium",
            Self::Hot => "Hot",
            Self::ExtraHot => "Extra Hot",
        }
    }
}

/// Customer profile database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer_profiles")]
pub struct Model {
    /// Unique identifier for the profile
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning user, one profile per user
    #[sea_orm(unique)]
    pub user_id: i64,
    /// Eats no meat or fish
    pub is_vegetarian: bool,
    /// Eats no animal products
    pub is_vegan: bool,
    /// Avoids gluten
    pub is_gluten_free: bool,
    /// Avoids dairy
    pub is_dairy_free: bool,
    /// How spicy the food may be
    pub spice_tolerance: SpiceLevel,
    /// Cuisine names the customer likes
    pub preferred_cuisines: StringList,
    /// Food allergies
    pub allergies: StringList,
    /// Areas the customer searches for food in
    pub preferred_areas: StringList,
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

/// Defines relationships between the profile and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each profile belongs to one user
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spice_level_parse() {
        assert_eq!(SpiceLevel::parse("extra_hot").ok(), Some(SpiceLevel::ExtraHot));
        assert_eq!(SpiceLevel::parse("mild").ok(), Some(SpiceLevel::Mild));
        assert!(matches!(
            SpiceLevel::parse("volcanic"),
            Err(Error::InvalidChoice { field: "spice_tolerance", .. })
        ));
    }

    #[test]
    fn test_spice_level_default_is_medium() {
        assert_eq!(SpiceLevel::default(), SpiceLevel::Medium);
        assert_eq!(SpiceLevel::ExtraHot.label(), "Extra Hot");
    }
}
