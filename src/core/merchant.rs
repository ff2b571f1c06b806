//! Merchant business logic - Merchant profiles and their outlets.

use crate::{
    entities::{MerchantProfile, Outlet, merchant_profile, outlet},
    errors::{Error, Result},
};
use sea_orm::{IntoActiveModel, QueryOrder, Set, prelude::*};
use tracing::info;

/// Input for [`create_merchant_profile`]
#[derive(Debug, Clone, Default)]
pub struct NewMerchantProfile {
    /// Public trading name, required
    pub business_name: String,
    /// Free-form description
    pub business_description: Option<String>,
    /// Path of the logo image
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
}

/// Creates the merchant profile for a user. New merchants start unverified and
/// not featured.
///
/// # Errors
/// Returns an error if:
/// - The business name is empty
/// - The user already has a merchant profile (`Error::UniqueViolation`)
/// - The user does not exist (`Error::ForeignKeyViolation`)
pub async fn create_merchant_profile(
    db: &DatabaseConnection,
    user_id: i64,
    input: NewMerchantProfile,
) -> Result<merchant_profile::Model> {
    let business_name = input.business_name.trim();
    if business_name.is_empty() {
        return Err(Error::validation("business_name", "cannot be empty"));
    }

    let merchant = merchant_profile::ActiveModel {
        user_id: Set(user_id),
        business_name: Set(business_name.to_string()),
        business_description: Set(input.business_description),
        business_logo: Set(input.business_logo),
        business_license: Set(input.business_license),
        tax_id: Set(input.tax_id),
        opening_time: Set(input.opening_time),
        closing_time: Set(input.closing_time),
        business_phone: Set(input.business_phone),
        business_email: Set(input.business_email),
        website: Set(input.website),
        is_verified: Set(false),
        is_featured: Set(false),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Created merchant {} ({})", merchant.business_name, merchant.id);
    Ok(merchant)
}

/// Retrieves a merchant profile by id.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_merchant_profile(
    db: &DatabaseConnection,
    merchant_id: i64,
) -> Result<Option<merchant_profile::Model>> {
    MerchantProfile::find_by_id(merchant_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Sets the verified flag on a merchant.
///
/// # Errors
/// Returns `Error::NotFound` if the merchant does not exist.
pub async fn set_verified(
    db: &DatabaseConnection,
    merchant_id: i64,
    verified: bool,
) -> Result<merchant_profile::Model> {
    let mut merchant = MerchantProfile::find_by_id(merchant_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("merchant profile", merchant_id))?
        .into_active_model();

    merchant.is_verified = Set(verified);
    merchant.update(db).await.map_err(Into::into)
}

/// Input for [`create_outlet`]
#[derive(Debug, Clone)]
pub struct NewOutlet {
    /// Outlet name
    pub name: String,
    /// Street address
    pub address: String,
    /// Neighbourhood or locality
    pub area: String,
    /// City
    pub city: String,
    /// State
    pub state: String,
    /// Six digits
    pub pin_code: String,
    /// Degrees
    pub latitude: Option<Decimal>,
    /// Degrees
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
}

impl Default for NewOutlet {
    fn default() -> Self {
        Self {
            name: String::new(),
            address: String::new(),
            area: String::new(),
            city: String::new(),
            state: String::new(),
            pin_code: String::new(),
            latitude: None,
            longitude: None,
            phone: None,
            opening_time: Time::default(),
            closing_time: Time::default(),
            is_dine_in: true,
            is_takeaway: true,
        }
    }
}

/// Creates an outlet for a merchant.
///
/// # Errors
/// Returns an error if:
/// - The outlet name is empty
/// - The pin code is longer than 10 characters
/// - The merchant does not exist (`Error::ForeignKeyViolation`)
pub async fn create_outlet(
    db: &DatabaseConnection,
    merchant_id: i64,
    input: NewOutlet,
) -> Result<outlet::Model> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(Error::validation("name", "cannot be empty"));
    }
    if input.pin_code.chars().count() > 10 {
        return Err(Error::validation("pin_code", "must be at most 10 characters"));
    }

    outlet::ActiveModel {
        merchant_id: Set(merchant_id),
        name: Set(name.to_string()),
        address: Set(input.address),
        area: Set(input.area),
        city: Set(input.city),
        state: Set(input.state),
        pin_code: Set(input.pin_code),
        latitude: Set(input.latitude),
        longitude: Set(input.longitude),
        phone: Set(input.phone),
        opening_time: Set(input.opening_time),
        closing_time: Set(input.closing_time),
        is_dine_in: Set(input.is_dine_in),
        is_takeaway: Set(input.is_takeaway),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Retrieves a merchant's non-deleted outlets, ordered by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_outlets_for_merchant(
    db: &DatabaseConnection,
    merchant_id: i64,
) -> Result<Vec<outlet::Model>> {
    Outlet::find()
        .filter(outlet::Column::MerchantId.eq(merchant_id))
        .filter(outlet::Column::IsDelete.eq(false))
        .order_by_asc(outlet::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}
