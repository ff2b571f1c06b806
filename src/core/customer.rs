//! Customer business logic - Profiles, preferences and stored recommendations.
//!
//! Profiles and preferences are one-per-user; the database rejects a second row
//! for the same user. Recommendations are unique per (user, menu item) and are
//! listed strongest first.

use crate::{
    entities::{
        CustomerProfile, FoodRecommendation, SpiceLevel, StringList, UserPreference,
        customer_profile, food_recommendation, user_preference,
    },
    errors::{Error, Result},
};
use sea_orm::{IntoActiveModel, QueryOrder, Set, prelude::*};
use tracing::{info, warn};

/// Input for [`create_customer_profile`]
#[derive(Debug, Clone, Default)]
pub struct NewCustomerProfile {
    /// Eats no meat or fish
    pub is_vegetarian: bool,
    /// Eats no animal products
    pub is_vegan: bool,
    /// Avoids gluten
    pub is_gluten_free: bool,
    /// Avoids dairy
    pub is_dairy_free: bool,
    /// Choice value such as `"hot"`; `None` means medium
    pub spice_tolerance: Option<String>,
    /// Cuisine names
    pub preferred_cuisines: Vec<String>,
    /// Food allergies
    pub allergies: Vec<String>,
    /// Areas to search in
    pub preferred_areas: Vec<String>,
}

/// Creates the customer profile for a user.
///
/// # Errors
/// Returns an error if:
/// - The spice tolerance is not one of the known choices (`Error::InvalidChoice`)
/// - The user already has a profile (`Error::UniqueViolation`)
/// - The user does not exist (`Error::ForeignKeyViolation`)
pub async fn create_customer_profile(
    db: &DatabaseConnection,
    user_id: i64,
    input: NewCustomerProfile,
) -> Result<customer_profile::Model> {
    let spice_tolerance = match input.spice_tolerance.as_deref() {
        Some(value) => SpiceLevel::parse(value)?,
        None => SpiceLevel::default(),
    };

    let profile = customer_profile::ActiveModel {
        user_id: Set(user_id),
        is_vegetarian: Set(input.is_vegetarian),
        is_vegan: Set(input.is_vegan),
        is_gluten_free: Set(input.is_gluten_free),
        is_dairy_free: Set(input.is_dairy_free),
        spice_tolerance: Set(spice_tolerance),
        preferred_cuisines: Set(StringList(input.preferred_cuisines)),
        allergies: Set(StringList(input.allergies)),
        preferred_areas: Set(StringList(input.preferred_areas)),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Created customer profile {} for user {}", profile.id, user_id);
    Ok(profile)
}

/// Retrieves the customer profile of a user.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_customer_profile(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Option<customer_profile::Model>> {
    CustomerProfile::find()
        .filter(customer_profile::Column::UserId.eq(user_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Changes a customer's spice tolerance from its choice value.
///
/// # Errors
/// Returns an error if the value is not a known choice or the profile is missing.
pub async fn update_spice_tolerance(
    db: &DatabaseConnection,
    profile_id: i64,
    value: &str,
) -> Result<customer_profile::Model> {
    let level = SpiceLevel::parse(value)?;
    let mut profile = CustomerProfile::find_by_id(profile_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("customer profile", profile_id))?
        .into_active_model();

    profile.spice_tolerance = Set(level);
    profile.update(db).await.map_err(Into::into)
}

/// Input for [`create_user_preference`]
#[derive(Debug, Clone)]
pub struct NewUserPreference {
    /// Lower price bound
    pub min_price: Decimal,
    /// Upper price bound
    pub max_price: Decimal,
    /// Kilometers
    pub max_distance: u32,
    /// 0 to 5
    pub min_rating: Decimal,
    /// Send email notifications
    pub email_notifications: bool,
    /// Send push notifications
    pub push_notifications: bool,
}

impl Default for NewUserPreference {
    fn default() -> Self {
        Self {
            min_price: Decimal::new(0, 2),
            max_price: Decimal::new(100_000, 2),
            max_distance: 10,
            min_rating: Decimal::new(0, 2),
            email_notifications: true,
            push_notifications: true,
        }
    }
}

fn check_prices(min_price: Decimal, max_price: Decimal) -> Result<()> {
    if min_price.is_sign_negative() || max_price.is_sign_negative() {
        return Err(Error::validation("min_price", "prices cannot be negative"));
    }
    if min_price > max_price {
        warn!(
            "Price range is inverted: min {} > max {}",
            min_price, max_price
        );
    }
    Ok(())
}

/// Creates the food preferences row for a user.
///
/// An inverted price range (`min_price > max_price`) is stored as given and
/// only logged.
///
/// # Errors
/// Returns an error if:
/// - A price is negative
/// - The user already has preferences (`Error::UniqueViolation`)
pub async fn create_user_preference(
    db: &DatabaseConnection,
    user_id: i64,
    input: NewUserPreference,
) -> Result<user_preference::Model> {
    check_prices(input.min_price, input.max_price)?;

    user_preference::ActiveModel {
        user_id: Set(user_id),
        min_price: Set(input.min_price),
        max_price: Set(input.max_price),
        max_distance: Set(input.max_distance),
        min_rating: Set(input.min_rating),
        email_notifications: Set(input.email_notifications),
        push_notifications: Set(input.push_notifications),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Retrieves a user's preferences.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_user_preference(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Option<user_preference::Model>> {
    UserPreference::find()
        .filter(user_preference::Column::UserId.eq(user_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Replaces the price range of existing preferences.
///
/// # Errors
/// Returns an error if a price is negative or the preferences do not exist.
pub async fn update_price_range(
    db: &DatabaseConnection,
    preference_id: i64,
    min_price: Decimal,
    max_price: Decimal,
) -> Result<user_preference::Model> {
    check_prices(min_price, max_price)?;

    let mut preference = UserPreference::find_by_id(preference_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("user preference", preference_id))?
        .into_active_model();

    preference.min_price = Set(min_price);
    preference.max_price = Set(max_price);
    preference.update(db).await.map_err(Into::into)
}

/// Stores a recommendation produced by the recommender.
///
/// # Errors
/// Returns an error if:
/// - The confidence score is outside 0..=1
/// - The user already has a recommendation for this item (`Error::UniqueViolation`)
/// - The user or menu item does not exist (`Error::ForeignKeyViolation`)
pub async fn create_recommendation(
    db: &DatabaseConnection,
    user_id: i64,
    menu_item_id: i64,
    confidence_score: Decimal,
    reason: Option<String>,
) -> Result<food_recommendation::Model> {
    if confidence_score < Decimal::ZERO || confidence_score > Decimal::ONE {
        return Err(Error::validation(
            "confidence_score",
            format!("{confidence_score} is outside 0 to 1"),
        ));
    }

    food_recommendation::ActiveModel {
        user_id: Set(user_id),
        menu_item_id: Set(menu_item_id),
        confidence_score: Set(confidence_score),
        reason: Set(reason),
        is_viewed: Set(false),
        is_clicked: Set(false),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Retrieves a user's live recommendations, highest confidence first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_recommendations_for_user(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Vec<food_recommendation::Model>> {
    FoodRecommendation::find()
        .filter(food_recommendation::Column::UserId.eq(user_id))
        .filter(food_recommendation::Column::IsDelete.eq(false))
        .order_by_desc(food_recommendation::Column::ConfidenceScore)
        .order_by_asc(food_recommendation::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

async fn find_recommendation(
    db: &DatabaseConnection,
    recommendation_id: i64,
) -> Result<food_recommendation::ActiveModel> {
    Ok(FoodRecommendation::find_by_id(recommendation_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("food recommendation", recommendation_id))?
        .into_active_model())
}

/// Records that the user has seen a recommendation.
///
/// # Errors
/// Returns an error if the recommendation does not exist.
pub async fn mark_viewed(
    db: &DatabaseConnection,
    recommendation_id: i64,
) -> Result<food_recommendation::Model> {
    let mut recommendation = find_recommendation(db, recommendation_id).await?;
    recommendation.is_viewed = Set(true);
    recommendation.update(db).await.map_err(Into::into)
}

/// Records that the user clicked a recommendation. A click implies a view.
///
/// # Errors
/// Returns an error if the recommendation does not exist.
pub async fn mark_clicked(
    db: &DatabaseConnection,
    recommendation_id: i64,
) -> Result<food_recommendation::Model> {
    let mut recommendation = find_recommendation(db, recommendation_id).await?;
    recommendation.is_viewed = Set(true);
    recommendation.is_clicked = Set(true);
    recommendation.update(db).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_customer_profile_integration() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "diner").await?;

        let profile = create_customer_profile(
            &db,
            user.id,
            NewCustomerProfile {
                is_vegan: true,
                spice_tolerance: Some("extra_hot".to_string()),
                preferred_cuisines: vec!["Thai".to_string(), "Ethiopian".to_string()],
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(profile.spice_tolerance, SpiceLevel::ExtraHot);
        assert_eq!(profile.preferred_cuisines.len(), 2);
        assert!(profile.allergies.is_empty());

        let found = get_customer_profile(&db, user.id).await?.unwrap();
        assert_eq!(found, profile);
        Ok(())
    }

    #[tokio::test]
    async fn test_default_spice_tolerance_is_medium() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "diner").await?;
        let profile = create_customer_profile(&db, user.id, NewCustomerProfile::default()).await?;
        assert_eq!(profile.spice_tolerance, SpiceLevel::Medium);
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_spice_tolerance_rejected() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let result = create_customer_profile(
            &db,
            1,
            NewCustomerProfile {
                spice_tolerance: Some("lava".to_string()),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(result, Err(Error::InvalidChoice { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_second_customer_profile_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "diner").await?;
        create_customer_profile(&db, user.id, NewCustomerProfile::default()).await?;

        let result = create_customer_profile(&db, user.id, NewCustomerProfile::default()).await;
        assert!(matches!(result, Err(Error::UniqueViolation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_spice_tolerance() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "diner").await?;
        let profile = create_customer_profile(&db, user.id, NewCustomerProfile::default()).await?;

        let updated = update_spice_tolerance(&db, profile.id, "mild").await?;
        assert_eq!(updated.spice_tolerance, SpiceLevel::Mild);

        let result = update_spice_tolerance(&db, profile.id, "nuclear").await;
        assert!(matches!(result, Err(Error::InvalidChoice { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_user_preference_defaults_and_uniqueness() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "diner").await?;

        let preference = create_user_preference(&db, user.id, NewUserPreference::default()).await?;
        assert_eq!(preference.max_distance, 10);
        assert_eq!(preference.max_price, Decimal::new(1000, 0));
        assert!(preference.email_notifications);

        let result = create_user_preference(&db, user.id, NewUserPreference::default()).await;
        assert!(matches!(result, Err(Error::UniqueViolation { .. })));

        assert!(get_user_preference(&db, user.id).await?.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_inverted_price_range_is_stored() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "diner").await?;
        let preference = create_user_preference(&db, user.id, NewUserPreference::default()).await?;

        let updated =
            update_price_range(&db, preference.id, Decimal::new(500, 0), Decimal::new(100, 0))
                .await?;
        assert_eq!(updated.min_price, Decimal::new(500, 0));
        assert_eq!(updated.max_price, Decimal::new(100, 0));

        let result =
            update_price_range(&db, preference.id, Decimal::new(-1, 0), Decimal::new(100, 0)).await;
        assert!(matches!(result, Err(Error::Validation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_recommendation_score_range() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let result = create_recommendation(&db, 1, 1, Decimal::new(101, 2), None).await;
        assert!(matches!(
            result,
            Err(Error::Validation { field: "confidence_score", .. })
        ));
        let result = create_recommendation(&db, 1, 1, Decimal::new(-1, 2), None).await;
        assert!(result.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_recommendations_ordered_by_confidence() -> Result<()> {
        let catalog = setup_with_menu_item().await?;
        let db = &catalog.db;
        let (outlet, category) = (catalog.outlet.id, catalog.category.id);
        let second = create_test_menu_item(db, outlet, category, "Naan").await?;
        let third = create_test_menu_item(db, outlet, category, "Lassi").await?;

        create_recommendation(db, catalog.user.id, catalog.menu_item.id, Decimal::new(40, 2), None)
            .await?;
        create_recommendation(db, catalog.user.id, second.id, Decimal::new(95, 2), None).await?;
        create_recommendation(db, catalog.user.id, third.id, Decimal::new(70, 2), None).await?;

        let scores: Vec<Decimal> = list_recommendations_for_user(db, catalog.user.id)
            .await?
            .into_iter()
            .map(|r| r.confidence_score)
            .collect();
        assert_eq!(
            scores,
            vec![Decimal::new(95, 2), Decimal::new(70, 2), Decimal::new(40, 2)]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_recommendation_rejected() -> Result<()> {
        let catalog = setup_with_menu_item().await?;
        let db = &catalog.db;
        create_recommendation(db, catalog.user.id, catalog.menu_item.id, Decimal::new(5, 1), None)
            .await?;

        let (user, item) = (catalog.user.id, catalog.menu_item.id);
        let result = create_recommendation(db, user, item, Decimal::new(6, 1), None).await;
        assert!(matches!(result, Err(Error::UniqueViolation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_click_implies_view() -> Result<()> {
        let catalog = setup_with_menu_item().await?;
        let db = &catalog.db;
        let recommendation = create_recommendation(
            db,
            catalog.user.id,
            catalog.menu_item.id,
            Decimal::new(5, 1),
            Some("You liked curries".to_string()),
        )
        .await?;
        assert!(!recommendation.is_viewed);

        let viewed = mark_viewed(db, recommendation.id).await?;
        assert!(viewed.is_viewed && !viewed.is_clicked);

        let clicked = mark_clicked(db, recommendation.id).await?;
        assert!(clicked.is_viewed && clicked.is_clicked);

        let result = mark_clicked(db, 999).await;
        assert!(matches!(result, Err(Error::NotFound { .. })));
        Ok(())
    }
}
