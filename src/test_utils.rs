//! Shared test utilities.
//!
//! Helpers for setting up an in-memory database and creating rows with
//! sensible defaults, so each test only spells out what it cares about.

use crate::{
    core::{menu, merchant, taxonomy, user},
    entities::{category, menu_item, merchant_profile, outlet, user as user_entity},
    errors::Result,
};
use sea_orm::{DatabaseConnection, prelude::Decimal, prelude::Time};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Builds a time of day, falling back to midnight for out-of-range input.
pub fn time_of_day(hour: u32, minute: u32) -> Time {
    Time::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

/// Creates a user with `<username>@example.com` as email and no real name.
pub async fn create_test_user(
    db: &DatabaseConnection,
    username: &str,
) -> Result<user_entity::Model> {
    let email = format!("{username}@example.com");
    user::create_user(db, username, Some(&email), "", "").await
}

/// Creates a category with the default color.
pub async fn create_test_category(db: &DatabaseConnection, name: &str) -> Result<category::Model> {
    taxonomy::create_category(db, name, None, None).await
}

/// Creates a merchant profile for `user_id`.
///
/// # Defaults
/// * hours: 09:00 - 22:00
/// * unverified, not featured
pub async fn create_test_merchant(
    db: &DatabaseConnection,
    user_id: i64,
    business_name: &str,
) -> Result<merchant_profile::Model> {
    merchant::create_merchant_profile(
        db,
        user_id,
        merchant::NewMerchantProfile {
            business_name: business_name.to_string(),
            opening_time: time_of_day(9, 0),
            closing_time: time_of_day(22, 0),
            ..Default::default()
        },
    )
    .await
}

/// Creates an outlet in Koramangala, Bengaluru with dine-in and takeaway.
pub async fn create_test_outlet(
    db: &DatabaseConnection,
    merchant_id: i64,
    name: &str,
) -> Result<outlet::Model> {
    merchant::create_outlet(
        db,
        merchant_id,
        merchant::NewOutlet {
            name: name.to_string(),
            address: "80 Feet Road".to_string(),
            area: "Koramangala".to_string(),
            city: "Bengaluru".to_string(),
            state: "Karnataka".to_string(),
            pin_code: "560034".to_string(),
            opening_time: time_of_day(9, 0),
            closing_time: time_of_day(22, 0),
            ..Default::default()
        },
    )
    .await
}

/// Creates an available menu item priced at 250.00.
pub async fn create_test_menu_item(
    db: &DatabaseConnection,
    outlet_id: i64,
    category_id: i64,
    name: &str,
) -> Result<menu_item::Model> {
    menu::create_menu_item(
        db,
        outlet_id,
        category_id,
        menu::NewMenuItem {
            name: name.to_string(),
            price: Decimal::new(25000, 2),
            ..Default::default()
        },
    )
    .await
}

/// A database holding one of everything needed to reach a menu item.
pub struct TestCatalog {
    pub db: DatabaseConnection,
    pub user: user_entity::Model,
    pub category: category::Model,
    pub merchant: merchant_profile::Model,
    pub outlet: outlet::Model,
    pub menu_item: menu_item::Model,
}

/// Sets up a database with a user who owns a merchant, an outlet and a menu
/// item named "Test Dish" in "Test Category".
pub async fn setup_with_menu_item() -> Result<TestCatalog> {
    let db = setup_test_db().await?;
    let user = create_test_user(&db, "owner").await?;
    let category = create_test_category(&db, "Test Category").await?;
    let merchant = create_test_merchant(&db, user.id, "Test Kitchen").await?;
    let outlet = create_test_outlet(&db, merchant.id, "Test Outlet").await?;
    let menu_item = create_test_menu_item(&db, outlet.id, category.id, "Test Dish").await?;

    Ok(TestCatalog {
        db,
        user,
        category,
        merchant,
        outlet,
        menu_item,
    })
}
