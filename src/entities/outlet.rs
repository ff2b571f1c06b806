//! Outlet entity - A physical storefront belonging to a merchant.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::base::base_record;

/// Outlet database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "outlets")]
pub struct Model {
    /// Unique identifier for the outlet
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Merchant that runs the outlet
    pub merchant_id: i64,
    /// Outlet name
    #[sea_orm(column_type = "String(StringLen::N(200))")]
    pub name: String,
    /// Street address
    #[sea_orm(column_type = "Text")]
    pub address: String,
    /// Neighbourhood or locality
    pub area: String,
    /// City
    pub city: String,
    /// State
    pub state: String,
    /// Six digit postal code
    #[sea_orm(column_type = "String(StringLen::N(10))")]
    pub pin_code: String,
    /// Latitude in degrees
    #[sea_orm(column_type = "Decimal(Some((9, 6)))", nullable)]
    pub latitude: Option<Decimal>,
    /// Longitude in degrees
    #[sea_orm(column_type = "Decimal(Some((9, 6)))", nullable)]
    pub longitude: Option<Decimal>,
    /// Outlet phone number
    pub phone: Option<String>,
    /// Daily opening time
    pub opening_time: Time,
    /// Daily closing time
    pub closing_time: Time,
    /// Offers seating
    pub is_dine_in: bool,
    /// Offers takeaway
    pub is_takeaway: bool,
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

/// Defines relationships between the outlet and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each outlet belongs to one merchant
    #[sea_orm(
        belongs_to = "super::merchant_profile::Entity",
        from = "Column::MerchantId",
        to = "super::merchant_profile::Column::Id",
        on_delete = "Cascade"
    )]
    Merchant,
    /// One outlet sells many menu items
    #[sea_orm(has_many = "super::menu_item::Entity")]
    MenuItems,
}

impl Related<super::merchant_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Merchant.def()
    }
}

impl Related<super::menu_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MenuItems.def()
    }
}

base_record!();
