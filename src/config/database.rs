//! Database configuration module.
//!
//! Handles the `SQLite` connection and table creation using `SeaORM`. Tables are
//! generated from the entity definitions with `Schema::create_table_from_entity`,
//! so column types, single-column uniqueness and foreign keys (with their
//! cascade / set-null rules) come straight from the entity structs. Uniqueness
//! over column pairs is not expressible on an entity field and is added as
//! unique indexes afterwards.

use crate::entities::{
    AuthToken, Category, CuisineType, CustomerProfile, DietaryRestriction, FavoriteItem,
    FavoriteItemColumn, FoodRecommendation, FoodRecommendationColumn, MenuItem, MenuItemColumn,
    MerchantProfile, Outlet, Review, ReviewColumn, SearchHistory, User, UserPreference,
};
use crate::errors::Result;
use sea_orm::{
    ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema,
    sea_query::{Index, IndexCreateStatement},
};
use tracing::debug;

/// Database used when `DATABASE_URL` is not set
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/foodies.sqlite?mode=rwc";

/// Gets the database URL from the environment or returns the default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by `DATABASE_URL`.
///
/// Falls back to a local `SQLite` file if no environment variable is set.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    debug!("Connecting to {}", database_url);
    Database::connect(&database_url).await.map_err(Into::into)
}

async fn create_table<E>(db: &DatabaseConnection, schema: &Schema, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    Ok(())
}

/// Unique indexes over column pairs.
fn composite_unique_indexes() -> Vec<IndexCreateStatement> {
    vec![
        Index::create()
            .name("idx_menu_items_outlet_name")
            .table(MenuItem)
            .col(MenuItemColumn::OutletId)
            .col(MenuItemColumn::Name)
            .unique()
            .if_not_exists()
            .to_owned(),
        Index::create()
            .name("idx_reviews_user_menu_item")
            .table(Review)
            .col(ReviewColumn::UserId)
            .col(ReviewColumn::MenuItemId)
            .unique()
            .if_not_exists()
            .to_owned(),
        Index::create()
            .name("idx_favorite_items_user_menu_item")
            .table(FavoriteItem)
            .col(FavoriteItemColumn::UserId)
            .col(FavoriteItemColumn::MenuItemId)
            .unique()
            .if_not_exists()
            .to_owned(),
        Index::create()
            .name("idx_food_recommendations_user_menu_item")
            .table(FoodRecommendation)
            .col(FoodRecommendationColumn::UserId)
            .col(FoodRecommendationColumn::MenuItemId)
            .unique()
            .if_not_exists()
            .to_owned(),
    ]
}

/// Creates all tables and indexes, parents before children.
///
/// Safe to call on an existing database; every statement is `IF NOT EXISTS`.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    create_table(db, &schema, User).await?;
    create_table(db, &schema, AuthToken).await?;

    create_table(db, &schema, Category).await?;
    create_table(db, &schema, DietaryRestriction).await?;
    create_table(db, &schema, CuisineType).await?;

    create_table(db, &schema, CustomerProfile).await?;
    create_table(db, &schema, UserPreference).await?;

    create_table(db, &schema, MerchantProfile).await?;
    create_table(db, &schema, Outlet).await?;
    create_table(db, &schema, MenuItem).await?;

    create_table(db, &schema, FoodRecommendation).await?;
    create_table(db, &schema, Review).await?;
    create_table(db, &schema, SearchHistory).await?;
    create_table(db, &schema, FavoriteItem).await?;

    for index in composite_unique_indexes() {
        db.execute(builder.build(&index)).await?;
    }

    Ok(())
}
