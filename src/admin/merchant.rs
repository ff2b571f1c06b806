//! Admin units for the merchant side: categories, merchants, outlets and
//! menus, plus the reviews, searches and favorites customers leave on them.

use super::{
    AdminOptions, DEFAULT_PER_PAGE, Fieldset, ListColumn, ModelAdmin, STATUS_FIELDSET,
    TIMESTAMP_FIELDS, TIMESTAMPS_FIELDSET, UserItemRow, WithUser, attach_users,
    attach_users_and_items, display, load_by_id, local_column, menu_item_column, user_column,
};
use crate::{
    entities::{
        Category, CategoryModel, FavoriteItem, MenuItem, MerchantProfile, MerchantProfileModel,
        Outlet, OutletModel, Review, SearchHistory, UserModel, category, favorite_item, menu_item,
        merchant_profile, outlet, review, search_history,
    },
    errors::Result,
};
use async_trait::async_trait;
use sea_orm::{
    DatabaseConnection, EntityTrait, JoinType, QueryOrder, QuerySelect, RelationTrait, Select,
    sea_query::Expr,
};

fn merchant_name_column() -> Expr {
    Expr::col((MerchantProfile, merchant_profile::Column::BusinessName))
}

/// Menu categories
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryAdmin;

static CATEGORY_OPTIONS: AdminOptions = AdminOptions {
    model_name: "Category",
    list_display: &[
        ListColumn::new("name", "Name"),
        ListColumn::new("description", "Description"),
        ListColumn::new("icon_preview", "Icon"),
        ListColumn::new("color_preview", "Color"),
        ListColumn::new("status", "Status"),
    ],
    list_filter: &["is_active", "is_delete"],
    search_fields: &["name", "description"],
    readonly_fields: TIMESTAMP_FIELDS,
    fieldsets: &[
        Fieldset {
            name: "Basic Information",
            fields: &["name", "description"],
            collapsed: false,
        },
        Fieldset {
            name: "Visual Elements",
            fields: &["icon", "color"],
            collapsed: false,
        },
        STATUS_FIELDSET,
        TIMESTAMPS_FIELDSET,
    ],
    list_per_page: DEFAULT_PER_PAGE,
};

#[async_trait]
impl ModelAdmin for CategoryAdmin {
    type Entity = Category;
    type Row = CategoryModel;

    fn options(&self) -> &'static AdminOptions {
        &CATEGORY_OPTIONS
    }

    fn queryset(&self) -> Select<Category> {
        Category::find().order_by_asc(category::Column::Name)
    }

    async fn load_rows(
        &self,
        _db: &DatabaseConnection,
        models: Vec<CategoryModel>,
    ) -> Result<Vec<Self::Row>> {
        Ok(models)
    }

    fn display(&self, row: &Self::Row, field: &str) -> Option<String> {
        let value = match field {
            "name" => display::text(&row.name),
            "description" => display::optional(row.description.as_deref()),
            "icon_preview" => display::icon_preview(row.icon.as_deref()),
            "color_preview" => display::color_preview(&row.color),
            "status" => display::status(row.is_active, row.is_delete).html(),
            _ => return None,
        };
        Some(value)
    }
}

/// Merchant business profiles
#[derive(Debug, Clone, Copy, Default)]
pub struct MerchantProfileAdmin;

static MERCHANT_PROFILE_OPTIONS: AdminOptions = AdminOptions {
    model_name: "Merchant Profile",
    list_display: &[
        ListColumn::new("business_info", "Business Information"),
        ListColumn::new("contact_info", "Contact Information"),
        ListColumn::new("business_hours", "Business Hours"),
        ListColumn::new("verification_status", "Verification"),
        ListColumn::new("status", "Status"),
    ],
    list_filter: &["is_verified", "is_featured", "is_active", "is_delete"],
    search_fields: &[
        "business_name",
        "user__username",
        "user__email",
        "business_phone",
        "business_email",
    ],
    readonly_fields: TIMESTAMP_FIELDS,
    fieldsets: &[
        Fieldset {
            name: "Business Information",
            fields: &[
                "user_id",
                "business_name",
                "business_description",
                "business_logo",
            ],
            collapsed: false,
        },
        Fieldset {
            name: "Business Details",
            fields: &["business_license", "tax_id"],
            collapsed: false,
        },
        Fieldset {
            name: "Business Hours",
            fields: &["opening_time", "closing_time"],
            collapsed: false,
        },
        Fieldset {
            name: "Contact Information",
            fields: &["business_phone", "business_email", "website"],
            collapsed: false,
        },
        Fieldset {
            name: "Status",
            fields: &["is_verified", "is_featured", "is_active", "is_delete"],
            collapsed: false,
        },
        TIMESTAMPS_FIELDSET,
    ],
    list_per_page: DEFAULT_PER_PAGE,
};

#[async_trait]
impl ModelAdmin for MerchantProfileAdmin {
    type Entity = MerchantProfile;
    type Row = WithUser<MerchantProfileModel>;

    fn options(&self) -> &'static AdminOptions {
        &MERCHANT_PROFILE_OPTIONS
    }

    fn queryset(&self) -> Select<MerchantProfile> {
        MerchantProfile::find()
            .join(JoinType::LeftJoin, merchant_profile::Relation::User.def())
            .order_by_desc(merchant_profile::Column::Id)
    }

    fn search_column(&self, field: &str) -> Option<Expr> {
        user_column(field).or_else(|| local_column::<MerchantProfile>(field))
    }

    async fn load_rows(
        &self,
        db: &DatabaseConnection,
        models: Vec<MerchantProfileModel>,
    ) -> Result<Vec<Self::Row>> {
        attach_users(db, models, |m| m.user_id).await
    }

    fn display(&self, row: &Self::Row, field: &str) -> Option<String> {
        let merchant = &row.record;
        let value = match field {
            "business_info" => display::business_info(
                merchant.business_logo.as_deref(),
                &merchant.business_name,
                merchant.business_description.as_deref(),
            ),
            "contact_info" => display::contact_info(
                row.user.as_ref(),
                merchant.business_phone.as_deref(),
                merchant.business_email.as_deref(),
            ),
            "business_hours" => display::hours(merchant.opening_time, merchant.closing_time),
            "verification_status" => display::verification_status(merchant.is_verified).html(),
            "status" => display::status(merchant.is_active, merchant.is_delete).html(),
            _ => return None,
        };
        Some(value)
    }
}

/// An outlet with the merchant that runs it
#[derive(Debug, Clone)]
pub struct OutletRow {
    /// The listed outlet
    pub outlet: OutletModel,
    /// Merchant running the outlet
    pub merchant: Option<MerchantProfileModel>,
}

/// Physical outlets
#[derive(Debug, Clone, Copy, Default)]
pub struct OutletAdmin;

static OUTLET_OPTIONS: AdminOptions = AdminOptions {
    model_name: "Outlet",
    list_display: &[
        ListColumn::new("outlet_info", "Outlet Information"),
        ListColumn::new("location_info", "Location"),
        ListColumn::new("services", "Services"),
        ListColumn::new("business_hours", "Business Hours"),
        ListColumn::new("status", "Status"),
    ],
    list_filter: &[
        "city",
        "state",
        "is_active",
        "is_dine_in",
        "is_takeaway",
        "is_delete",
    ],
    search_fields: &[
        "name",
        "merchant__business_name",
        "address",
        "area",
        "city",
        "state",
    ],
    readonly_fields: TIMESTAMP_FIELDS,
    fieldsets: &[
        Fieldset {
            name: "Outlet Information",
            fields: &["merchant_id", "name", "address"],
            collapsed: false,
        },
        Fieldset {
            name: "Location",
            fields: &["area", "city", "state", "pin_code", "latitude", "longitude"],
            collapsed: false,
        },
        Fieldset {
            name: "Contact & Hours",
            fields: &["phone", "opening_time", "closing_time"],
            collapsed: false,
        },
        Fieldset {
            name: "Services",
            fields: &["is_dine_in", "is_takeaway"],
            collapsed: false,
        },
        STATUS_FIELDSET,
        TIMESTAMPS_FIELDSET,
    ],
    list_per_page: DEFAULT_PER_PAGE,
};

#[async_trait]
impl ModelAdmin for OutletAdmin {
    type Entity = Outlet;
    type Row = OutletRow;

    fn options(&self) -> &'static AdminOptions {
        &OUTLET_OPTIONS
    }

    fn queryset(&self) -> Select<Outlet> {
        Outlet::find()
            .join(JoinType::LeftJoin, outlet::Relation::Merchant.def())
            .order_by_asc(outlet::Column::Name)
            .order_by_asc(outlet::Column::Id)
    }

    fn search_column(&self, field: &str) -> Option<Expr> {
        if field == "merchant__business_name" {
            return Some(merchant_name_column());
        }
        local_column::<Outlet>(field)
    }

    async fn load_rows(
        &self,
        db: &DatabaseConnection,
        models: Vec<OutletModel>,
    ) -> Result<Vec<Self::Row>> {
        let merchant_ids: Vec<i64> = models.iter().map(|o| o.merchant_id).collect();
        let merchants = load_by_id::<MerchantProfile>(db, merchant_ids).await?;

        Ok(models
            .into_iter()
            .map(|outlet| OutletRow {
                merchant: merchants.get(&outlet.merchant_id).cloned(),
                outlet,
            })
            .collect())
    }

    fn display(&self, row: &Self::Row, field: &str) -> Option<String> {
        let outlet = &row.outlet;
        let value = match field {
            "outlet_info" => display::outlet_info(
                &outlet.name,
                row.merchant.as_ref().map(|m| m.business_name.as_str()),
            ),
            "location_info" => display::location_info(&outlet.area, &outlet.city, &outlet.state),
            "services" => display::services_label(outlet.is_dine_in, outlet.is_takeaway),
            "business_hours" => display::hours(outlet.opening_time, outlet.closing_time),
            "status" => display::status(outlet.is_active, outlet.is_delete).html(),
            _ => return None,
        };
        Some(value)
    }
}

/// A menu item with its outlet and category
#[derive(Debug, Clone)]
pub struct MenuItemRow {
    /// The listed menu item
    pub item: menu_item::Model,
    /// The listed outlet
    /// Outlet selling the item
    pub outlet: Option<OutletModel>,
    /// Category the item is listed under
    pub category: Option<CategoryModel>,
}

/// Menu items across all outlets
#[derive(Debug, Clone, Copy, Default)]
pub struct MenuItemAdmin;

static MENU_ITEM_OPTIONS: AdminOptions = AdminOptions {
    model_name: "Menu Item",
    list_display: &[
        ListColumn::new("item_info", "Item Information"),
        ListColumn::new("category", "Category"),
        ListColumn::new("price", "Price"),
        ListColumn::new("food_details", "Food Details"),
        ListColumn::new("popularity", "Popularity"),
        ListColumn::new("status", "Status"),
    ],
    list_filter: &[
        "category_id",
        "is_vegetarian",
        "is_spicy",
        "is_gluten_free",
        "is_available",
        "is_active",
        "is_delete",
    ],
    search_fields: &[
        "name",
        "description",
        "outlet__name",
        "outlet__merchant__business_name",
    ],
    readonly_fields: TIMESTAMP_FIELDS,
    fieldsets: &[
        Fieldset {
            name: "Basic Information",
            fields: &["outlet_id", "category_id", "name", "description", "price"],
            collapsed: false,
        },
        Fieldset {
            name: "Images",
            fields: &["primary_image", "images"],
            collapsed: false,
        },
        Fieldset {
            name: "Food Details",
            fields: &["is_vegetarian", "is_spicy", "is_gluten_free", "is_available"],
            collapsed: false,
        },
        Fieldset {
            name: "Additional Info",
            fields: &["calories", "preparation_time"],
            collapsed: false,
        },
        STATUS_FIELDSET,
        TIMESTAMPS_FIELDSET,
    ],
    list_per_page: DEFAULT_PER_PAGE,
};

#[async_trait]
impl ModelAdmin for MenuItemAdmin {
    type Entity = MenuItem;
    type Row = MenuItemRow;

    fn options(&self) -> &'static AdminOptions {
        &MENU_ITEM_OPTIONS
    }

    fn queryset(&self) -> Select<MenuItem> {
        MenuItem::find()
            .join(JoinType::LeftJoin, menu_item::Relation::Outlet.def())
            .join(JoinType::LeftJoin, outlet::Relation::Merchant.def())
            .join(JoinType::LeftJoin, menu_item::Relation::Category.def())
            .order_by_asc(category::Column::Name)
            .order_by_asc(menu_item::Column::Name)
            .order_by_asc(menu_item::Column::Id)
    }

    fn search_column(&self, field: &str) -> Option<Expr> {
        match field {
            "outlet__name" => Some(Expr::col((Outlet, outlet::Column::Name))),
            "outlet__merchant__business_name" => Some(merchant_name_column()),
            _ => local_column::<MenuItem>(field),
        }
    }

    async fn load_rows(
        &self,
        db: &DatabaseConnection,
        models: Vec<menu_item::Model>,
    ) -> Result<Vec<Self::Row>> {
        let outlet_ids: Vec<i64> = models.iter().map(|i| i.outlet_id).collect();
        let category_ids: Vec<i64> = models.iter().map(|i| i.category_id).collect();
        let outlets = load_by_id::<Outlet>(db, outlet_ids).await?;
        let categories = load_by_id::<Category>(db, category_ids).await?;

        Ok(models
            .into_iter()
            .map(|item| MenuItemRow {
                outlet: outlets.get(&item.outlet_id).cloned(),
                category: categories.get(&item.category_id).cloned(),
                item,
            })
            .collect())
    }

    fn display(&self, row: &Self::Row, field: &str) -> Option<String> {
        let item = &row.item;
        let value = match field {
            "item_info" => display::item_info(item, row.outlet.as_ref()),
            "category" => display::optional(row.category.as_ref().map(|c| c.name.as_str())),
            "price" => display::decimal(item.price),
            "food_details" => {
                display::food_details(item.is_vegetarian, item.is_spicy, item.is_gluten_free)
            }
            "popularity" => display::popularity(item.total_orders, item.average_rating),
            "status" => {
                display::menu_item_status(item.is_active, item.is_delete, item.is_available).html()
            }
            _ => return None,
        };
        Some(value)
    }
}

/// Customer reviews
#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewAdmin;

static REVIEW_OPTIONS: AdminOptions = AdminOptions {
    model_name: "Review",
    list_display: &[
        ListColumn::new("user_info", "User Information"),
        ListColumn::new("menu_item_info", "Menu Item"),
        ListColumn::new("rating_display", "Rating"),
        ListColumn::new("comment_preview", "Comment"),
        ListColumn::new("status", "Status"),
    ],
    list_filter: &["rating", "is_verified_purchase", "is_active", "is_delete"],
    search_fields: &["user__username", "user__email", "menu_item__name", "comment"],
    readonly_fields: TIMESTAMP_FIELDS,
    fieldsets: &[
        Fieldset {
            name: "Review Details",
            fields: &["user_id", "menu_item_id", "rating", "comment"],
            collapsed: false,
        },
        Fieldset {
            name: "Media",
            fields: &["images"],
            collapsed: false,
        },
        Fieldset {
            name: "Metadata",
            fields: &["is_verified_purchase", "helpful_votes"],
            collapsed: false,
        },
        STATUS_FIELDSET,
        TIMESTAMPS_FIELDSET,
    ],
    list_per_page: DEFAULT_PER_PAGE,
};

#[async_trait]
impl ModelAdmin for ReviewAdmin {
    type Entity = Review;
    type Row = UserItemRow<review::Model>;

    fn options(&self) -> &'static AdminOptions {
        &REVIEW_OPTIONS
    }

    fn queryset(&self) -> Select<Review> {
        Review::find()
            .join(JoinType::LeftJoin, review::Relation::User.def())
            .join(JoinType::LeftJoin, review::Relation::MenuItem.def())
            .order_by_desc(review::Column::CreateTime)
            .order_by_desc(review::Column::Id)
    }

    fn search_column(&self, field: &str) -> Option<Expr> {
        user_column(field)
            .or_else(|| menu_item_column(field))
            .or_else(|| local_column::<Review>(field))
    }

    async fn load_rows(
        &self,
        db: &DatabaseConnection,
        models: Vec<review::Model>,
    ) -> Result<Vec<Self::Row>> {
        attach_users_and_items(db, models, |r| (r.user_id, r.menu_item_id)).await
    }

    fn display(&self, row: &Self::Row, field: &str) -> Option<String> {
        let review = &row.record;
        let value = match field {
            "user_info" => display::user_info(row.user.as_ref()),
            "menu_item_info" => {
                display::menu_item_info(row.menu_item.as_ref(), row.outlet.as_ref(), false)
            }
            "rating_display" => display::rating_stars(review.rating),
            "comment_preview" => display::text(&display::preview(
                review.comment.as_deref(),
                "No comment",
            )),
            "status" => display::status(review.is_active, review.is_delete).html(),
            _ => return None,
        };
        Some(value)
    }
}

/// A search with the user who ran it and the category it was scoped to
#[derive(Debug, Clone)]
pub struct SearchRow {
    /// The listed search
    pub search: search_history::Model,
    /// User who searched
    pub user: Option<UserModel>,
    /// Category the search was narrowed to
    pub category: Option<CategoryModel>,
}

/// Customer search history
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchHistoryAdmin;

static SEARCH_HISTORY_OPTIONS: AdminOptions = AdminOptions {
    model_name: "Search History",
    list_display: &[
        ListColumn::new("user_info", "User Information"),
        ListColumn::new("query", "Query"),
        ListColumn::new("category", "Category"),
        ListColumn::new("location", "Location"),
        ListColumn::new("search_time", "Search Time"),
        ListColumn::new("status", "Status"),
    ],
    list_filter: &["category_id", "is_active", "is_delete"],
    search_fields: &["query", "location", "user__username", "user__email"],
    readonly_fields: TIMESTAMP_FIELDS,
    fieldsets: &[
        Fieldset {
            name: "Search Details",
            fields: &["user_id", "query", "category_id", "location"],
            collapsed: false,
        },
        STATUS_FIELDSET,
        TIMESTAMPS_FIELDSET,
    ],
    list_per_page: DEFAULT_PER_PAGE,
};

#[async_trait]
impl ModelAdmin for SearchHistoryAdmin {
    type Entity = SearchHistory;
    type Row = SearchRow;

    fn options(&self) -> &'static AdminOptions {
        &SEARCH_HISTORY_OPTIONS
    }

    fn queryset(&self) -> Select<SearchHistory> {
        SearchHistory::find()
            .join(JoinType::LeftJoin, search_history::Relation::User.def())
            .order_by_desc(search_history::Column::CreateTime)
            .order_by_desc(search_history::Column::Id)
    }

    fn search_column(&self, field: &str) -> Option<Expr> {
        user_column(field).or_else(|| local_column::<SearchHistory>(field))
    }

    async fn load_rows(
        &self,
        db: &DatabaseConnection,
        models: Vec<search_history::Model>,
    ) -> Result<Vec<Self::Row>> {
        let category_ids: Vec<i64> = models.iter().filter_map(|s| s.category_id).collect();
        let categories = load_by_id::<Category>(db, category_ids).await?;
        let with_users = attach_users(db, models, |s| s.user_id).await?;

        Ok(with_users
            .into_iter()
            .map(|row| SearchRow {
                category: row
                    .record
                    .category_id
                    .and_then(|id| categories.get(&id).cloned()),
                search: row.record,
                user: row.user,
            })
            .collect())
    }

    fn display(&self, row: &Self::Row, field: &str) -> Option<String> {
        let search = &row.search;
        let value = match field {
            "user_info" => display::user_info(row.user.as_ref()),
            "query" => display::text(&search.query),
            "category" => display::optional(row.category.as_ref().map(|c| c.name.as_str())),
            "location" => display::optional(search.location.as_deref()),
            "search_time" => display::timestamp(search.create_time),
            "status" => display::status(search.is_active, search.is_delete).html(),
            _ => return None,
        };
        Some(value)
    }
}

/// Favorited menu items
#[derive(Debug, Clone, Copy, Default)]
pub struct FavoriteItemAdmin;

static FAVORITE_ITEM_OPTIONS: AdminOptions = AdminOptions {
    model_name: "Favorite Item",
    list_display: &[
        ListColumn::new("user_info", "User Information"),
        ListColumn::new("menu_item_info", "Favorite Item"),
        ListColumn::new("favorite_time", "Favorited On"),
        ListColumn::new("status", "Status"),
    ],
    list_filter: &["is_active", "is_delete"],
    search_fields: &[
        "user__username",
        "user__email",
        "menu_item__name",
        "menu_item__outlet__name",
    ],
    readonly_fields: TIMESTAMP_FIELDS,
    fieldsets: &[
        Fieldset {
            name: "Favorite Details",
            fields: &["user_id", "menu_item_id"],
            collapsed: false,
        },
        STATUS_FIELDSET,
        TIMESTAMPS_FIELDSET,
    ],
    list_per_page: DEFAULT_PER_PAGE,
};

#[async_trait]
impl ModelAdmin for FavoriteItemAdmin {
    type Entity = FavoriteItem;
    type Row = UserItemRow<favorite_item::Model>;

    fn options(&self) -> &'static AdminOptions {
        &FAVORITE_ITEM_OPTIONS
    }

    fn queryset(&self) -> Select<FavoriteItem> {
        FavoriteItem::find()
            .join(JoinType::LeftJoin, favorite_item::Relation::User.def())
            .join(JoinType::LeftJoin, favorite_item::Relation::MenuItem.def())
            .join(JoinType::LeftJoin, menu_item::Relation::Outlet.def())
            .order_by_desc(favorite_item::Column::Id)
    }

    fn search_column(&self, field: &str) -> Option<Expr> {
        user_column(field)
            .or_else(|| menu_item_column(field))
            .or_else(|| local_column::<FavoriteItem>(field))
    }

    async fn load_rows(
        &self,
        db: &DatabaseConnection,
        models: Vec<favorite_item::Model>,
    ) -> Result<Vec<Self::Row>> {
        attach_users_and_items(db, models, |f| (f.user_id, f.menu_item_id)).await
    }

    fn display(&self, row: &Self::Row, field: &str) -> Option<String> {
        let favorite = &row.record;
        let value = match field {
            "user_info" => display::user_info(row.user.as_ref()),
            "menu_item_info" => {
                display::menu_item_info(row.menu_item.as_ref(), row.outlet.as_ref(), true)
            }
            "favorite_time" => display::timestamp(favorite.create_time),
            "status" => display::status(favorite.is_active, favorite.is_delete).html(),
            _ => return None,
        };
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::admin::{ChangeListQuery, changelist, tests::assert_options_consistent};
    use crate::core::{engagement, lifecycle, menu, merchant, taxonomy};
    use crate::test_utils::*;

    #[test]
    fn test_options_resolve() {
        assert_options_consistent(&CategoryAdmin);
        assert_options_consistent(&MerchantProfileAdmin);
        assert_options_consistent(&OutletAdmin);
        assert_options_consistent(&MenuItemAdmin);
        assert_options_consistent(&ReviewAdmin);
        assert_options_consistent(&SearchHistoryAdmin);
        assert_options_consistent(&FavoriteItemAdmin);
    }

    fn search(term: &str) -> ChangeListQuery {
        ChangeListQuery {
            search: Some(term.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_category_rows() -> Result<()> {
        let db = setup_test_db().await?;
        taxonomy::create_category(&db, "Pizza", Some("Wood fired".to_string()), None).await?;
        let page = changelist(&CategoryAdmin, &db, &ChangeListQuery::default()).await?;

        let row = &page.rows[0];
        assert_eq!(row[0], "Pizza");
        assert_eq!(row[1], "Wood fired");
        assert_eq!(row[2], "No icon");
        assert!(row[3].contains("background-color: #FF6B6B;"));
        Ok(())
    }

    #[tokio::test]
    async fn test_merchant_rows() -> Result<()> {
        let catalog = setup_with_menu_item().await?;
        let db = &catalog.db;
        merchant::set_verified(db, catalog.merchant.id, true).await?;

        let page = changelist(&MerchantProfileAdmin, db, &ChangeListQuery::default()).await?;
        let row = &page.rows[0];
        assert_eq!(
            row[0],
            "<strong>Test Kitchen</strong><br><small>No description</small>"
        );
        assert_eq!(
            row[1],
            "<strong>owner</strong><br><small>Phone: No phone | Email: No email</small>"
        );
        assert_eq!(row[2], "09:00 - 22:00");
        assert_eq!(row[3], r#"<span style="color: green;">✓ Verified</span>"#);

        let by_owner = changelist(&MerchantProfileAdmin, db, &search("owner@")).await?;
        assert_eq!(by_owner.total, 1);
        let none = changelist(&MerchantProfileAdmin, db, &search("biryani")).await?;
        assert_eq!(none.total, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_outlet_rows_and_filters() -> Result<()> {
        let catalog = setup_with_menu_item().await?;
        let db = &catalog.db;

        let page = changelist(&OutletAdmin, db, &ChangeListQuery::default()).await?;
        let row = &page.rows[0];
        assert_eq!(
            row[0],
            "<strong>Test Outlet</strong><br><small>Test Kitchen</small>"
        );
        assert_eq!(
            row[1],
            "<strong>Koramangala</strong><br><small>Bengaluru, Karnataka</small>"
        );
        assert_eq!(row[2], "Dine-in, Takeaway");

        let by_merchant = changelist(&OutletAdmin, db, &search("kitchen")).await?;
        assert_eq!(by_merchant.total, 1);

        let query = ChangeListQuery {
            filters: vec![("city".to_string(), "Mumbai".to_string())],
            ..Default::default()
        };
        assert_eq!(changelist(&OutletAdmin, db, &query).await?.total, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_menu_item_rows() -> Result<()> {
        let catalog = setup_with_menu_item().await?;
        let db = &catalog.db;
        let breads = create_test_category(db, "Breads").await?;
        let naan = create_test_menu_item(db, catalog.outlet.id, breads.id, "Naan").await?;
        menu::set_available(db, naan.id, false).await?;
        menu::record_order(db, catalog.menu_item.id, 3).await?;

        let page = changelist(&MenuItemAdmin, db, &ChangeListQuery::default()).await?;
        assert_eq!(page.rows.len(), 2);

        // Breads sorts before Test Category
        let naan_row = &page.rows[0];
        assert_eq!(
            naan_row[0],
            "<strong>Naan</strong><br><small>Test Outlet</small>"
        );
        assert_eq!(naan_row[1], "Breads");
        assert_eq!(naan_row[2], "250.00");
        assert_eq!(naan_row[3], "Standard");
        assert_eq!(naan_row[5], r#"<span style="color: gray;">Unavailable</span>"#);

        let dish_row = &page.rows[1];
        assert_eq!(
            dish_row[4],
            "<strong>Orders:</strong> 3 | <strong>Rating:</strong> 0.00★"
        );
        assert_eq!(dish_row[5], r#"<span style="color: green;">Available</span>"#);

        let by_merchant = changelist(&MenuItemAdmin, db, &search("test kitchen")).await?;
        assert_eq!(by_merchant.total, 2);

        let query = ChangeListQuery {
            filters: vec![("category_id".to_string(), breads.id.to_string())],
            ..Default::default()
        };
        assert_eq!(changelist(&MenuItemAdmin, db, &query).await?.total, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_review_rows() -> Result<()> {
        let catalog = setup_with_menu_item().await?;
        let db = &catalog.db;
        let comment = "Crispy base, generous toppings and a sauce worth coming back for.";
        engagement::create_review(
            db,
            catalog.user.id,
            catalog.menu_item.id,
            engagement::NewReview {
                rating: 4,
                comment: Some(comment.to_string()),
                ..Default::default()
            },
        )
        .await?;

        let page = changelist(&ReviewAdmin, db, &ChangeListQuery::default()).await?;
        let row = &page.rows[0];
        assert_eq!(
            row[1],
            "<strong>Test Dish</strong><br><small>Test Outlet</small>"
        );
        assert!(row[2].contains("★★★★☆</span> (4)"));
        assert_eq!(row[3], format!("{}...", &comment[..50]));

        let query = ChangeListQuery {
            filters: vec![("rating".to_string(), "5".to_string())],
            ..Default::default()
        };
        assert_eq!(changelist(&ReviewAdmin, db, &query).await?.total, 0);

        let by_dish = changelist(&ReviewAdmin, db, &search("dish")).await?;
        assert_eq!(by_dish.total, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_search_history_survives_category_delete() -> Result<()> {
        let catalog = setup_with_menu_item().await?;
        let db = &catalog.db;
        let desserts = create_test_category(db, "Desserts").await?;
        engagement::record_search(db, catalog.user.id, "kulfi", Some(desserts.id), None).await?;

        let page = changelist(&SearchHistoryAdmin, db, &ChangeListQuery::default()).await?;
        assert_eq!(page.rows[0][2], "Desserts");
        assert_eq!(page.rows[0][3], "-");

        taxonomy::delete_category(db, desserts.id).await?;
        let page = changelist(&SearchHistoryAdmin, db, &search("kulfi")).await?;
        assert_eq!(page.total, 1);
        assert_eq!(page.rows[0][1], "kulfi");
        assert_eq!(page.rows[0][2], "-");
        Ok(())
    }

    #[tokio::test]
    async fn test_favorite_rows() -> Result<()> {
        let catalog = setup_with_menu_item().await?;
        let db = &catalog.db;
        let favorite = engagement::add_favorite(db, catalog.user.id, catalog.menu_item.id).await?;

        let page = changelist(&FavoriteItemAdmin, db, &search("test outlet")).await?;
        assert_eq!(page.total, 1);
        assert_eq!(
            page.rows[0][1],
            "<strong>❤️ Test Dish</strong><br><small>Test Outlet</small>"
        );
        assert_eq!(page.rows[0][2], display::timestamp(favorite.create_time));

        lifecycle::soft_delete::<FavoriteItem>(db, favorite.id).await?;
        let query = ChangeListQuery {
            filters: vec![("is_delete".to_string(), "true".to_string())],
            ..Default::default()
        };
        let page = changelist(&FavoriteItemAdmin, db, &query).await?;
        assert_eq!(page.rows[0][3], r#"<span style="color: red;">Deleted</span>"#);
        Ok(())
    }
}
