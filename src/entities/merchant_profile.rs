//! Merchant profile entity - The business behind one or more outlets.
//!
//! A user owns at most one merchant profile. Opening and closing times are the
//! business-wide defaults; each outlet carries its own hours as well.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::base::base_record;

/// Merchant profile database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "merchant_profiles")]
pub struct Model {
    /// Unique identifier for the merchant
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning user, one merchant profile per user
    #[sea_orm(unique)]
    pub user_id: i64,
    /// Public trading name
    #[sea_orm(column_type = "String(StringLen::N(200))")]
    pub business_name: String,
    /// Free-form description of the business
    #[sea_orm(column_type = "Text", nullable)]
    pub business_description: Option<String>,
    /// Path of the uploaded logo image
    pub business_logo: Option<String>,
    /// License number
    pub business_license: Option<String>,
    /// Tax registration number
    pub tax_id: Option<String>,
    /// Daily opening time
    pub opening_time: Time,
    /// Daily closing time
    pub closing_time: Time,
    /// Contact phone number
    pub business_phone: Option<String>,
    /// Contact email address
    pub business_email: Option<String>,
    /// Public website URL
    pub website: Option<String>,
    /// Whether the back office verified the business
    pub is_verified: bool,
    /// Whether the merchant is promoted in listings
    pub is_featured: bool,
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

/// Defines relationships between the merchant and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each merchant profile belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    /// One merchant runs many outlets
    #[sea_orm(has_many = "super::outlet::Entity")]
    Outlets,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::outlet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Outlets.def()
    }
}

base_record!();
