//! Engagement business logic - Reviews, search history and favorites.
//!
//! A user reviews and favorites a menu item at most once. Writing a review also
//! refreshes the item's average rating inside the same database transaction, and
//! so does deleting or restoring one.

use crate::{
    core::lifecycle,
    entities::{
        FavoriteItem, MenuItem, Review, SearchHistory, StringList, favorite_item, menu_item,
        review::{self, MAX_RATING, MIN_RATING, is_valid_rating},
        search_history,
    },
    errors::{Error, Result},
};
use sea_orm::{
    ConnectionTrait, IntoActiveModel, QueryOrder, Set, TransactionTrait, prelude::*,
    sea_query::Expr,
};
use tracing::{debug, info};

/// Input for [`create_review`]
#[derive(Debug, Clone, Default)]
pub struct NewReview {
    /// 1 to 5
    pub rating: u8,
    /// Optional review text
    pub comment: Option<String>,
    /// Image URLs
    pub images: Vec<String>,
    /// Author ordered the item
    pub is_verified_purchase: bool,
}

/// Recomputes a menu item's average rating from its non-deleted reviews.
///
/// The average is rounded to two decimal places; an item without reviews goes
/// back to zero.
///
/// # Errors
/// Returns an error if a query fails.
pub async fn refresh_average_rating<C>(db: &C, menu_item_id: i64) -> Result<Decimal>
where
    C: ConnectionTrait,
{
    let ratings: Vec<u32> = Review::find()
        .filter(review::Column::MenuItemId.eq(menu_item_id))
        .filter(review::Column::IsDelete.eq(false))
        .all(db)
        .await?
        .into_iter()
        .map(|r| u32::from(r.rating))
        .collect();

    let average = if ratings.is_empty() {
        Decimal::ZERO
    } else {
        let total: u32 = ratings.iter().sum();
        let count = u32::try_from(ratings.len())?;
        (Decimal::from(total) / Decimal::from(count)).round_dp(2)
    };

    MenuItem::update_many()
        .col_expr(menu_item::Column::AverageRating, Expr::value(average))
        .filter(menu_item::Column::Id.eq(menu_item_id))
        .exec(db)
        .await?;

    debug!("Menu item {} average rating is now {}", menu_item_id, average);
    Ok(average)
}

/// Writes a user's review of a menu item and refreshes the item's average.
///
/// Both writes happen in one transaction; a rejected review leaves the average
/// untouched.
///
/// # Errors
/// Returns an error if:
/// - The rating is outside 1 to 5
/// - The user already reviewed this item (`Error::UniqueViolation`)
/// - The user or item does not exist (`Error::ForeignKeyViolation`)
pub async fn create_review(
    db: &DatabaseConnection,
    user_id: i64,
    menu_item_id: i64,
    input: NewReview,
) -> Result<review::Model> {
    if !is_valid_rating(input.rating) {
        return Err(Error::validation(
            "rating",
            format!(
                "must be between {MIN_RATING} and {MAX_RATING}, got {}",
                input.rating
            ),
        ));
    }

    let txn = db.begin().await?;

    let review = review::ActiveModel {
        user_id: Set(user_id),
        menu_item_id: Set(menu_item_id),
        rating: Set(input.rating),
        comment: Set(input.comment),
        images: Set(StringList(input.images)),
        is_verified_purchase: Set(input.is_verified_purchase),
        helpful_votes: Set(0),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    refresh_average_rating(&txn, menu_item_id).await?;
    txn.commit().await?;

    info!(
        "User {} rated menu item {} with {} stars",
        user_id, menu_item_id, review.rating
    );
    Ok(review)
}

/// Soft-deletes a review and drops it from the item's average rating.
///
/// # Errors
/// Returns `Error::NotFound` if the review does not exist.
pub async fn delete_review(db: &DatabaseConnection, review_id: i64) -> Result<Decimal> {
    set_review_deleted(db, review_id, true).await
}

/// Brings back a soft-deleted review and counts it in the average again.
///
/// # Errors
/// Returns `Error::NotFound` if the review does not exist.
pub async fn restore_review(db: &DatabaseConnection, review_id: i64) -> Result<Decimal> {
    set_review_deleted(db, review_id, false).await
}

async fn set_review_deleted(
    db: &DatabaseConnection,
    review_id: i64,
    deleted: bool,
) -> Result<Decimal> {
    let txn = db.begin().await?;

    let review = Review::find_by_id(review_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::not_found("review", review_id))?;

    if deleted {
        lifecycle::soft_delete::<Review>(&txn, review_id).await?;
    } else {
        lifecycle::restore::<Review>(&txn, review_id).await?;
    }
    let average = refresh_average_rating(&txn, review.menu_item_id).await?;
    txn.commit().await?;

    Ok(average)
}

/// Retrieves the non-deleted reviews of a menu item, newest first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_reviews_for_item(
    db: &DatabaseConnection,
    menu_item_id: i64,
) -> Result<Vec<review::Model>> {
    Review::find()
        .filter(review::Column::MenuItemId.eq(menu_item_id))
        .filter(review::Column::IsDelete.eq(false))
        .order_by_desc(review::Column::CreateTime)
        .order_by_desc(review::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Adds one helpful vote to a review in a single UPDATE.
///
/// # Errors
/// Returns `Error::NotFound` if the review does not exist.
pub async fn mark_review_helpful(db: &DatabaseConnection, review_id: i64) -> Result<review::Model> {
    let result = Review::update_many()
        .col_expr(
            review::Column::HelpfulVotes,
            Expr::col(review::Column::HelpfulVotes).add(1),
        )
        .filter(review::Column::Id.eq(review_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::not_found("review", review_id));
    }

    Review::find_by_id(review_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("review", review_id))
}

/// Records a search a user ran.
///
/// # Errors
/// Returns an error if:
/// - The query is empty or longer than 500 characters
/// - The user or category does not exist (`Error::ForeignKeyViolation`)
pub async fn record_search(
    db: &DatabaseConnection,
    user_id: i64,
    query: &str,
    category_id: Option<i64>,
    location: Option<String>,
) -> Result<search_history::Model> {
    let query = query.trim();
    if query.is_empty() {
        return Err(Error::validation("query", "cannot be empty"));
    }
    if query.chars().count() > 500 {
        return Err(Error::validation("query", "must be at most 500 characters"));
    }

    search_history::ActiveModel {
        user_id: Set(user_id),
        query: Set(query.to_string()),
        category_id: Set(category_id),
        location: Set(location),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Retrieves a user's non-deleted searches, newest first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_search_history(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Vec<search_history::Model>> {
    SearchHistory::find()
        .filter(search_history::Column::UserId.eq(user_id))
        .filter(search_history::Column::IsDelete.eq(false))
        .order_by_desc(search_history::Column::CreateTime)
        .order_by_desc(search_history::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Hearts a menu item for a user.
///
/// A favorite that was removed earlier is brought back instead of inserting a
/// second row.
///
/// # Errors
/// Returns an error if:
/// - The item is already a live favorite (`Error::UniqueViolation`)
/// - The user or item does not exist (`Error::ForeignKeyViolation`)
pub async fn add_favorite(
    db: &DatabaseConnection,
    user_id: i64,
    menu_item_id: i64,
) -> Result<favorite_item::Model> {
    let existing = FavoriteItem::find()
        .filter(favorite_item::Column::UserId.eq(user_id))
        .filter(favorite_item::Column::MenuItemId.eq(menu_item_id))
        .filter(favorite_item::Column::IsDelete.eq(true))
        .one(db)
        .await?;

    if let Some(existing) = existing {
        let mut favorite = existing.into_active_model();
        favorite.is_delete = Set(false);
        return favorite.update(db).await.map_err(Into::into);
    }

    favorite_item::ActiveModel {
        user_id: Set(user_id),
        menu_item_id: Set(menu_item_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Removes a favorite by soft-deleting it.
///
/// Returns `false` when the user had no live favorite for the item.
///
/// # Errors
/// Returns an error if the database update fails.
pub async fn remove_favorite(
    db: &DatabaseConnection,
    user_id: i64,
    menu_item_id: i64,
) -> Result<bool> {
    let result = FavoriteItem::update_many()
        .col_expr(favorite_item::Column::IsDelete, Expr::value(true))
        .col_expr(
            favorite_item::Column::UpdateTime,
            Expr::value(chrono::Utc::now().naive_utc()),
        )
        .filter(favorite_item::Column::UserId.eq(user_id))
        .filter(favorite_item::Column::MenuItemId.eq(menu_item_id))
        .filter(favorite_item::Column::IsDelete.eq(false))
        .exec(db)
        .await?;

    Ok(result.rows_affected > 0)
}

/// Retrieves a user's live favorites.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_favorites(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Vec<favorite_item::Model>> {
    FavoriteItem::find()
        .filter(favorite_item::Column::UserId.eq(user_id))
        .filter(favorite_item::Column::IsDelete.eq(false))
        .order_by_desc(favorite_item::Column::CreateTime)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use chrono::{Duration, NaiveDate};
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn review(rating: u8) -> NewReview {
        NewReview {
            rating,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_rating_outside_range_rejected() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        for rating in [0, 6, 200] {
            let result = create_review(&db, 1, 1, review(rating)).await;
            assert!(matches!(result, Err(Error::Validation { field: "rating", .. })));
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_rating_inside_range_accepted() -> Result<()> {
        let catalog = setup_with_menu_item().await?;
        let db = &catalog.db;

        for rating in 1..=5 {
            let user = create_test_user(db, &format!("reviewer{rating}")).await?;
            let saved = create_review(db, user.id, catalog.menu_item.id, review(rating)).await?;
            assert_eq!(saved.rating, rating);
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_out_of_range_rating_rejected_at_save() -> Result<()> {
        let catalog = setup_with_menu_item().await?;
        let result = review::ActiveModel {
            user_id: Set(catalog.user.id),
            menu_item_id: Set(catalog.menu_item.id),
            rating: Set(9),
            images: Set(StringList::default()),
            is_verified_purchase: Set(false),
            helpful_votes: Set(0),
            ..Default::default()
        }
        .insert(&catalog.db)
        .await;
        assert!(result.is_err());
        assert!(Review::find().all(&catalog.db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_review_rejected_and_average_kept() -> Result<()> {
        let catalog = setup_with_menu_item().await?;
        let db = &catalog.db;

        create_review(db, catalog.user.id, catalog.menu_item.id, review(4)).await?;
        let result = create_review(db, catalog.user.id, catalog.menu_item.id, review(1)).await;
        assert!(matches!(result, Err(Error::UniqueViolation { .. })));

        let item = MenuItem::find_by_id(catalog.menu_item.id).one(db).await?.unwrap();
        assert_eq!(item.average_rating.round_dp(2), Decimal::new(4, 0));
        assert_eq!(list_reviews_for_item(db, catalog.menu_item.id).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_average_rating_refreshed() -> Result<()> {
        let catalog = setup_with_menu_item().await?;
        let db = &catalog.db;
        let other = create_test_user(db, "second").await?;
        let third = create_test_user(db, "third").await?;

        create_review(db, catalog.user.id, catalog.menu_item.id, review(5)).await?;
        create_review(db, other.id, catalog.menu_item.id, review(4)).await?;
        let last = create_review(db, third.id, catalog.menu_item.id, review(4)).await?;

        let item = MenuItem::find_by_id(catalog.menu_item.id).one(db).await?.unwrap();
        assert_eq!(item.average_rating.round_dp(2), Decimal::new(433, 2));

        let average = delete_review(db, last.id).await?;
        assert_eq!(average, Decimal::new(45, 1));
        Ok(())
    }

    #[tokio::test]
    async fn test_deleting_only_review_resets_average() -> Result<()> {
        let catalog = setup_with_menu_item().await?;
        let db = &catalog.db;
        let saved = create_review(db, catalog.user.id, catalog.menu_item.id, review(1)).await?;

        delete_review(db, saved.id).await?;
        let item = MenuItem::find_by_id(catalog.menu_item.id).one(db).await?.unwrap();
        assert_eq!(item.average_rating.round_dp(2), Decimal::ZERO);
        assert!(list_reviews_for_item(db, catalog.menu_item.id).await?.is_empty());

        restore_review(db, saved.id).await?;
        let item = MenuItem::find_by_id(catalog.menu_item.id).one(db).await?.unwrap();
        assert_eq!(item.average_rating.round_dp(2), Decimal::ONE);

        assert!(matches!(
            delete_review(db, 999).await,
            Err(Error::NotFound { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_reviews_newest_first() -> Result<()> {
        let catalog = setup_with_menu_item().await?;
        let db = &catalog.db;
        let base = NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();

        for (offset, name) in [(0, "old"), (2, "newest"), (1, "middle")] {
            let user = create_test_user(db, name).await?;
            review::ActiveModel {
                user_id: Set(user.id),
                menu_item_id: Set(catalog.menu_item.id),
                rating: Set(3),
                comment: Set(Some(name.to_string())),
                images: Set(StringList::default()),
                is_verified_purchase: Set(false),
                helpful_votes: Set(0),
                create_time: Set(base + Duration::days(offset)),
                ..Default::default()
            }
            .insert(db)
            .await?;
        }

        let comments: Vec<String> = list_reviews_for_item(db, catalog.menu_item.id)
            .await?
            .into_iter()
            .filter_map(|r| r.comment)
            .collect();
        assert_eq!(comments, vec!["newest", "middle", "old"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_mark_review_helpful() -> Result<()> {
        let catalog = setup_with_menu_item().await?;
        let db = &catalog.db;
        let saved = create_review(db, catalog.user.id, catalog.menu_item.id, review(5)).await?;

        mark_review_helpful(db, saved.id).await?;
        let updated = mark_review_helpful(db, saved.id).await?;
        assert_eq!(updated.helpful_votes, 2);

        assert!(matches!(
            mark_review_helpful(db, 999).await,
            Err(Error::NotFound { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_search_history_newest_first() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "searcher").await?;
        let base = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();

        for (offset, query) in [(0, "biryani"), (10, "dosa"), (5, "momos")] {
            search_history::ActiveModel {
                user_id: Set(user.id),
                query: Set(query.to_string()),
                create_time: Set(base + Duration::minutes(offset)),
                ..Default::default()
            }
            .insert(&db)
            .await?;
        }

        let queries: Vec<String> = list_search_history(&db, user.id)
            .await?
            .into_iter()
            .map(|s| s.query)
            .collect();
        assert_eq!(queries, vec!["dosa", "momos", "biryani"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_record_search_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        assert!(matches!(
            record_search(&db, 1, "  ", None, None).await,
            Err(Error::Validation { field: "query", .. })
        ));
        let long = "x".repeat(501);
        assert!(record_search(&db, 1, &long, None, None).await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_favorite_rejected() -> Result<()> {
        let catalog = setup_with_menu_item().await?;
        let db = &catalog.db;

        add_favorite(db, catalog.user.id, catalog.menu_item.id).await?;
        let result = add_favorite(db, catalog.user.id, catalog.menu_item.id).await;
        assert!(matches!(result, Err(Error::UniqueViolation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_and_re_add_favorite() -> Result<()> {
        let catalog = setup_with_menu_item().await?;
        let db = &catalog.db;

        let first = add_favorite(db, catalog.user.id, catalog.menu_item.id).await?;
        assert!(remove_favorite(db, catalog.user.id, catalog.menu_item.id).await?);
        assert!(!remove_favorite(db, catalog.user.id, catalog.menu_item.id).await?);
        assert!(list_favorites(db, catalog.user.id).await?.is_empty());

        let again = add_favorite(db, catalog.user.id, catalog.menu_item.id).await?;
        assert_eq!(again.id, first.id);
        assert!(!again.is_delete);
        assert_eq!(list_favorites(db, catalog.user.id).await?.len(), 1);
        Ok(())
    }
}
