//! Taxonomy business logic - Categories, dietary restrictions and cuisine types.
//!
//! These are the leaf tables the rest of the catalog points at. Names are unique
//! per table, listings are alphabetical and exclude soft-deleted rows.

use crate::{
    config::taxonomy::Config,
    entities::{
        Category, CuisineType, DietaryRestriction, category, cuisine_type, dietary_restriction,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{info, warn};

fn clean_name(field: &'static str, name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::validation(field, "cannot be empty"));
    }
    Ok(name.to_string())
}

/// Whether `color` looks like `#RRGGBB`.
#[must_use]
pub fn is_hex_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color.chars().skip(1).all(|c| c.is_ascii_hexdigit())
}

/// Creates a food category.
///
/// The colour defaults to [`category::DEFAULT_COLOR`] and must be a `#RRGGBB`
/// hex code when given.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or whitespace-only
/// - The colour is not a hex code
/// - A category with the same name exists (`Error::UniqueViolation`)
pub async fn create_category(
    db: &DatabaseConnection,
    name: &str,
    description: Option<String>,
    color: Option<&str>,
) -> Result<category::Model> {
    let name = clean_name("name", name)?;
    let color = color.unwrap_or(category::DEFAULT_COLOR);
    if !is_hex_color(color) {
        return Err(Error::validation("color", format!("'{color}' is not a hex colour code")));
    }

    category::ActiveModel {
        name: Set(name),
        description: Set(description),
        icon: Set(None),
        color: Set(color.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Retrieves all non-deleted categories, ordered alphabetically by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_categories(db: &DatabaseConnection) -> Result<Vec<category::Model>> {
    Category::find()
        .filter(category::Column::IsDelete.eq(false))
        .order_by_asc(category::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a category by exact name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_category_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<category::Model>> {
    Category::find()
        .filter(category::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Physically removes a category.
///
/// Menu items in the category are removed with it; search history rows that
/// referenced it keep existing with no category.
///
/// # Errors
/// Returns `Error::NotFound` if the category does not exist.
pub async fn delete_category(db: &DatabaseConnection, category_id: i64) -> Result<()> {
    let result = Category::delete_by_id(category_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::not_found("category", category_id));
    }
    warn!("Category {} physically deleted", category_id);
    Ok(())
}

/// Creates a dietary restriction.
///
/// # Errors
/// Returns an error if the name is empty or already taken.
pub async fn create_dietary_restriction(
    db: &DatabaseConnection,
    name: &str,
    description: Option<String>,
    icon: Option<String>,
) -> Result<dietary_restriction::Model> {
    dietary_restriction::ActiveModel {
        name: Set(clean_name("name", name)?),
        description: Set(description),
        icon: Set(icon),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Retrieves all non-deleted dietary restrictions ordered by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_dietary_restrictions(
    db: &DatabaseConnection,
) -> Result<Vec<dietary_restriction::Model>> {
    DietaryRestriction::find()
        .filter(dietary_restriction::Column::IsDelete.eq(false))
        .order_by_asc(dietary_restriction::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Creates a cuisine type.
///
/// # Errors
/// Returns an error if the name is empty or already taken.
pub async fn create_cuisine_type(
    db: &DatabaseConnection,
    name: &str,
    description: Option<String>,
    country_of_origin: Option<String>,
    icon: Option<String>,
) -> Result<cuisine_type::Model> {
    cuisine_type::ActiveModel {
        name: Set(clean_name("name", name)?),
        description: Set(description),
        country_of_origin: Set(country_of_origin),
        icon: Set(icon),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Retrieves all non-deleted cuisine types ordered by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_cuisine_types(db: &DatabaseConnection) -> Result<Vec<cuisine_type::Model>> {
    CuisineType::find()
        .filter(cuisine_type::Column::IsDelete.eq(false))
        .order_by_asc(cuisine_type::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Counts of rows inserted by [`seed_taxonomy`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    /// Categories inserted
    pub categories: usize,
    /// Dietary restrictions inserted
    pub dietary_restrictions: usize,
    /// Cuisine types inserted
    pub cuisine_types: usize,
}

/// Inserts the configured taxonomy rows that are not in the database yet.
///
/// Rows are matched by name, including soft-deleted ones, so running this on
/// every start is harmless.
///
/// # Errors
/// Returns an error if a configured entry is invalid or a query fails.
pub async fn seed_taxonomy(db: &DatabaseConnection, config: &Config) -> Result<SeedSummary> {
    let mut summary = SeedSummary::default();

    for entry in &config.categories {
        if get_category_by_name(db, entry.name.trim()).await?.is_none() {
            create_category(db, &entry.name, entry.description.clone(), entry.color.as_deref())
                .await?;
            summary.categories += 1;
        }
    }

    for entry in &config.dietary_restrictions {
        let existing = DietaryRestriction::find()
            .filter(dietary_restriction::Column::Name.eq(entry.name.trim()))
            .one(db)
            .await?;
        if existing.is_none() {
            let (description, icon) = (entry.description.clone(), entry.icon.clone());
            create_dietary_restriction(db, &entry.name, description, icon).await?;
            summary.dietary_restrictions += 1;
        }
    }

    for entry in &config.cuisine_types {
        let existing = CuisineType::find()
            .filter(cuisine_type::Column::Name.eq(entry.name.trim()))
            .one(db)
            .await?;
        if existing.is_none() {
            create_cuisine_type(
                db,
                &entry.name,
                entry.description.clone(),
                entry.country_of_origin.clone(),
                entry.icon.clone(),
            )
            .await?;
            summary.cuisine_types += 1;
        }
    }

    info!(
        "Seeded {} categories, {} dietary restrictions, {} cuisine types",
        summary.categories, summary.dietary_restrictions, summary.cuisine_types
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::config::taxonomy::{CategoryConfig, CuisineTypeConfig, DietaryRestrictionConfig};
    use crate::core::{engagement, lifecycle};
    use crate::entities::{MenuItem, SearchHistory};
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[test]
    fn test_is_hex_color() {
        assert!(is_hex_color("#FF6B6B"));
        assert!(is_hex_color("#00aa11"));
        assert!(!is_hex_color("FF6B6B"));
        assert!(!is_hex_color("#FF6B6"));
        assert!(!is_hex_color("#GGGGGG"));
    }

    #[tokio::test]
    async fn test_create_category_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_category(&db, "  ", None, None).await;
        assert!(matches!(result, Err(Error::Validation { field: "name", .. })));

        let result = create_category(&db, "Pizza", None, Some("red")).await;
        assert!(matches!(result, Err(Error::Validation { field: "color", .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_category_defaults_color() -> Result<()> {
        let db = setup_test_db().await?;
        let category = create_category(&db, " Burger ", None, None).await?;
        assert_eq!(category.name, "Burger");
        assert_eq!(category.color, category::DEFAULT_COLOR);
        Ok(())
    }

    #[tokio::test]
    async fn test_category_name_unique() -> Result<()> {
        let db = setup_test_db().await?;
        create_category(&db, "Pizza", None, None).await?;
        let result = create_category(&db, "Pizza", None, None).await;
        assert!(matches!(result, Err(Error::UniqueViolation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_taxonomy_names_unique() -> Result<()> {
        let db = setup_test_db().await?;
        create_dietary_restriction(&db, "Halal", None, None).await?;
        let result = create_dietary_restriction(&db, "Halal", None, None).await;
        assert!(matches!(result, Err(Error::UniqueViolation { .. })));

        create_cuisine_type(&db, "Thai", None, Some("Thailand".to_string()), None).await?;
        let result = create_cuisine_type(&db, "Thai", None, None, None).await;
        assert!(matches!(result, Err(Error::UniqueViolation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_lists_are_alphabetical_and_skip_deleted() -> Result<()> {
        let db = setup_test_db().await?;
        create_cuisine_type(&db, "Thai", None, None, None).await?;
        create_cuisine_type(&db, "Italian", None, None, None).await?;
        let gone = create_cuisine_type(&db, "Aztec", None, None, None).await?;
        lifecycle::soft_delete::<CuisineType>(&db, gone.id).await?;

        let names: Vec<String> = list_cuisine_types(&db)
            .await?
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Italian", "Thai"]);

        create_dietary_restriction(&db, "Vegan", None, None).await?;
        create_dietary_restriction(&db, "Halal", None, None).await?;
        let restrictions = list_dietary_restrictions(&db).await?;
        assert_eq!(restrictions[0].name, "Halal");
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_category_nulls_search_history() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "searcher").await?;
        let category = create_test_category(&db, "Pizza").await?;
        let search =
            engagement::record_search(&db, user.id, "margherita", Some(category.id), None).await?;

        delete_category(&db, category.id).await?;

        let survivor = SearchHistory::find_by_id(search.id).one(&db).await?.unwrap();
        assert_eq!(survivor.query, "margherita");
        assert!(survivor.category_id.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_category_cascades_to_menu_items() -> Result<()> {
        let catalog = setup_with_menu_item().await?;
        let db = &catalog.db;

        delete_category(db, catalog.category.id).await?;
        assert!(MenuItem::find_by_id(catalog.menu_item.id).one(db).await?.is_none());

        let result = delete_category(db, catalog.category.id).await;
        assert!(matches!(result, Err(Error::NotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_taxonomy_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let config = Config {
            categories: vec![CategoryConfig {
                name: "Pizza".to_string(),
                description: None,
                color: Some("#123456".to_string()),
            }],
            dietary_restrictions: vec![DietaryRestrictionConfig {
                name: "Halal".to_string(),
                description: None,
                icon: None,
            }],
            cuisine_types: vec![CuisineTypeConfig {
                name: "Thai".to_string(),
                description: None,
                country_of_origin: Some("Thailand".to_string()),
                icon: None,
            }],
        };

        let first = seed_taxonomy(&db, &config).await?;
        assert_eq!(
            first,
            SeedSummary {
                categories: 1,
                dietary_restrictions: 1,
                cuisine_types: 1
            }
        );

        let second = seed_taxonomy(&db, &config).await?;
        assert_eq!(second, SeedSummary::default());

        let pizza = get_category_by_name(&db, "Pizza").await?.unwrap();
        assert_eq!(pizza.color, "#123456");
        Ok(())
    }
}
