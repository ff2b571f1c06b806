//! Menu business logic - Menu items and their popularity counters.
//!
//! Item names are unique within an outlet. Catalog listings are ordered the way
//! the storefront shows them: by category name, then item name.

use crate::{
    entities::{Category, MenuItem, StringList, category, menu_item},
    errors::{Error, Result},
};
use sea_orm::{ConnectionTrait, IntoActiveModel, QueryOrder, Set, prelude::*};
use tracing::{debug, info};

/// Input for [`create_menu_item`]
#[derive(Debug, Clone)]
pub struct NewMenuItem {
    /// Unique within the outlet
    pub name: String,
    /// Free-form description
    pub description: Option<String>,
    /// Rupees, not negative
    pub price: Decimal,
    /// Path of the main photo
    pub primary_image: Option<String>,
    /// Additional image URLs
    pub images: Vec<String>,
    /// Contains no meat or fish
    pub is_vegetarian: bool,
    /// Flagged as spicy
    pub is_spicy: bool,
    /// Contains no gluten
    pub is_gluten_free: bool,
    /// Orderable right away
    pub is_available: bool,
    /// kcal per serving
    pub calories: Option<u32>,
    /// Minutes
    pub preparation_time: Option<u32>,
}

impl Default for NewMenuItem {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            price: Decimal::ZERO,
            primary_image: None,
            images: Vec::new(),
            is_vegetarian: false,
            is_spicy: false,
            is_gluten_free: false,
            is_available: true,
            calories: None,
            preparation_time: None,
        }
    }
}

/// Creates a menu item at an outlet under a category.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or whitespace-only
/// - The price is negative
/// - The outlet already has an item with this name (`Error::UniqueViolation`)
/// - The outlet or category does not exist (`Error::ForeignKeyViolation`)
pub async fn create_menu_item(
    db: &DatabaseConnection,
    outlet_id: i64,
    category_id: i64,
    input: NewMenuItem,
) -> Result<menu_item::Model> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(Error::validation("name", "cannot be empty"));
    }
    if input.price.is_sign_negative() {
        return Err(Error::validation("price", "cannot be negative"));
    }

    let item = menu_item::ActiveModel {
        outlet_id: Set(outlet_id),
        category_id: Set(category_id),
        name: Set(name.to_string()),
        description: Set(input.description),
        price: Set(input.price),
        primary_image: Set(input.primary_image),
        images: Set(StringList(input.images)),
        is_vegetarian: Set(input.is_vegetarian),
        is_spicy: Set(input.is_spicy),
        is_gluten_free: Set(input.is_gluten_free),
        is_available: Set(input.is_available),
        calories: Set(input.calories),
        preparation_time: Set(input.preparation_time),
        total_orders: Set(0),
        average_rating: Set(Decimal::ZERO),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Created menu item {} at outlet {}", item.name, outlet_id);
    Ok(item)
}

/// Retrieves a menu item by id.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_menu_item(
    db: &DatabaseConnection,
    menu_item_id: i64,
) -> Result<Option<menu_item::Model>> {
    MenuItem::find_by_id(menu_item_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves non-deleted menu items, optionally for one outlet, ordered by
/// category name then item name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_menu_items(
    db: &DatabaseConnection,
    outlet_id: Option<i64>,
) -> Result<Vec<menu_item::Model>> {
    let mut query = MenuItem::find()
        .inner_join(Category)
        .filter(menu_item::Column::IsDelete.eq(false));
    if let Some(outlet_id) = outlet_id {
        query = query.filter(menu_item::Column::OutletId.eq(outlet_id));
    }

    query
        .order_by_asc(category::Column::Name)
        .order_by_asc(menu_item::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Marks a menu item as available or sold out.
///
/// # Errors
/// Returns `Error::NotFound` if the item does not exist.
pub async fn set_available(
    db: &DatabaseConnection,
    menu_item_id: i64,
    available: bool,
) -> Result<menu_item::Model> {
    let mut item = MenuItem::find_by_id(menu_item_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("menu item", menu_item_id))?
        .into_active_model();

    item.is_available = Set(available);
    item.update(db).await.map_err(Into::into)
}

/// Adds `quantity` to an item's order counter in a single UPDATE.
///
/// # Errors
/// Returns `Error::NotFound` if the item does not exist.
pub async fn record_order<C>(db: &C, menu_item_id: i64, quantity: u32) -> Result<menu_item::Model>
where
    C: ConnectionTrait,
{
    use sea_orm::sea_query::Expr;

    let result = MenuItem::update_many()
        .col_expr(
            menu_item::Column::TotalOrders,
            Expr::col(menu_item::Column::TotalOrders).add(quantity),
        )
        .filter(menu_item::Column::Id.eq(menu_item_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::not_found("menu item", menu_item_id));
    }
    debug!("Recorded {} orders for menu item {}", quantity, menu_item_id);

    MenuItem::find_by_id(menu_item_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("menu item", menu_item_id))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_menu_item_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_menu_item(&db, 1, 1, NewMenuItem::default()).await;
        assert!(matches!(result, Err(Error::Validation { field: "name", .. })));

        let result = create_menu_item(
            &db,
            1,
            1,
            NewMenuItem {
                name: "Refund".to_string(),
                price: Decimal::new(-100, 2),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(result, Err(Error::Validation { field: "price", .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_menu_item_defaults() -> Result<()> {
        let catalog = setup_with_menu_item().await?;
        let item = &catalog.menu_item;
        assert!(item.is_available);
        assert_eq!(item.total_orders, 0);
        assert_eq!(item.average_rating, Decimal::ZERO);
        assert!(item.images.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_name_in_outlet_rejected() -> Result<()> {
        let catalog = setup_with_menu_item().await?;
        let db = &catalog.db;

        let result = create_test_menu_item(
            db,
            catalog.outlet.id,
            catalog.category.id,
            &catalog.menu_item.name,
        )
        .await;
        assert!(matches!(result, Err(Error::UniqueViolation { .. })));

        // The same name at another outlet is fine
        let other = create_test_outlet(db, catalog.merchant.id, "Second Outlet").await?;
        create_test_menu_item(db, other.id, catalog.category.id, &catalog.menu_item.name).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_list_menu_items_ordered_by_category_then_name() -> Result<()> {
        let catalog = setup_with_menu_item().await?;
        let db = &catalog.db;
        let outlet = catalog.outlet.id;
        let breads = create_test_category(db, "Breads").await?;
        let desserts = create_test_category(db, "Desserts").await?;

        create_test_menu_item(db, outlet, desserts.id, "Kulfi").await?;
        create_test_menu_item(db, outlet, breads.id, "Roti").await?;
        create_test_menu_item(db, outlet, breads.id, "Naan").await?;
        create_test_menu_item(db, outlet, desserts.id, "Gulab Jamun").await?;

        let names: Vec<String> = list_menu_items(db, Some(outlet))
            .await?
            .into_iter()
            .map(|item| item.name)
            .collect();

        // Breads < Desserts < Test Category
        assert_eq!(
            names,
            vec!["Naan", "Roti", "Gulab Jamun", "Kulfi", "Test Dish"]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_record_order_is_cumulative() -> Result<()> {
        let catalog = setup_with_menu_item().await?;
        let db = &catalog.db;

        record_order(db, catalog.menu_item.id, 2).await?;
        let item = record_order(db, catalog.menu_item.id, 3).await?;
        assert_eq!(item.total_orders, 5);

        let result = record_order(db, 999, 1).await;
        assert!(matches!(result, Err(Error::NotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_set_available() -> Result<()> {
        let catalog = setup_with_menu_item().await?;
        let db = &catalog.db;

        let item = set_available(db, catalog.menu_item.id, false).await?;
        assert!(!item.is_available);
        let item = get_menu_item(db, catalog.menu_item.id).await?.unwrap();
        assert!(!item.is_available);
        Ok(())
    }
}
