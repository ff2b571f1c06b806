//! Admin units for the customer side: profiles, dietary and cuisine
//! taxonomies, price/notification preferences and recommendations.

use super::{
    AdminOptions, DEFAULT_PER_PAGE, Fieldset, ListColumn, ModelAdmin, STATUS_FIELDSET,
    TIMESTAMP_FIELDS, TIMESTAMPS_FIELDSET, UserItemRow, WithUser, attach_users,
    attach_users_and_items, display, local_column, menu_item_column, user_column,
};
use crate::{
    entities::{
        CuisineType, CustomerProfile, DietaryRestriction, FoodRecommendation, UserPreference,
        cuisine_type, customer_profile, dietary_restriction, food_recommendation, user_preference,
    },
    errors::Result,
};
use async_trait::async_trait;
use sea_orm::{
    DatabaseConnection, EntityTrait, JoinType, QueryOrder, QuerySelect, RelationTrait, Select,
    sea_query::Expr,
};

const USER_SEARCH: &[&str] = &[
    "user__username",
    "user__email",
    "user__first_name",
    "user__last_name",
];

/// Customer dietary profiles
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomerProfileAdmin;

static CUSTOMER_PROFILE_OPTIONS: AdminOptions = AdminOptions {
    model_name: "Customer Profile",
    list_display: &[
        ListColumn::new("user_info", "User Information"),
        ListColumn::new("dietary_preferences", "Dietary Preferences"),
        ListColumn::new("spice_tolerance", "Spice Tolerance"),
        ListColumn::new("preferred_cuisines_count", "Cuisine Preferences"),
        ListColumn::new("allergies_count", "Allergies Count"),
        ListColumn::new("status", "Status"),
    ],
    list_filter: &[
        "is_vegetarian",
        "is_vegan",
        "is_gluten_free",
        "is_dairy_free",
        "spice_tolerance",
        "is_active",
        "is_delete",
    ],
    search_fields: USER_SEARCH,
    readonly_fields: TIMESTAMP_FIELDS,
    fieldsets: &[
        Fieldset {
            name: "User Information",
            fields: &["user_id", "is_active", "is_delete"],
            collapsed: false,
        },
        Fieldset {
            name: "Dietary Preferences",
            fields: &[
                "is_vegetarian",
                "is_vegan",
                "is_gluten_free",
                "is_dairy_free",
                "spice_tolerance",
            ],
            collapsed: false,
        },
        Fieldset {
            name: "Preferences",
            fields: &["preferred_cuisines", "preferred_areas", "allergies"],
            collapsed: false,
        },
        TIMESTAMPS_FIELDSET,
    ],
    list_per_page: DEFAULT_PER_PAGE,
};

#[async_trait]
impl ModelAdmin for CustomerProfileAdmin {
    type Entity = CustomerProfile;
    type Row = WithUser<customer_profile::Model>;

    fn options(&self) -> &'static AdminOptions {
        &CUSTOMER_PROFILE_OPTIONS
    }

    fn queryset(&self) -> Select<CustomerProfile> {
        CustomerProfile::find()
            .join(JoinType::LeftJoin, customer_profile::Relation::User.def())
            .order_by_desc(customer_profile::Column::Id)
    }

    fn search_column(&self, field: &str) -> Option<Expr> {
        user_column(field).or_else(|| local_column::<CustomerProfile>(field))
    }

    async fn load_rows(
        &self,
        db: &DatabaseConnection,
        models: Vec<customer_profile::Model>,
    ) -> Result<Vec<Self::Row>> {
        attach_users(db, models, |p| p.user_id).await
    }

    fn display(&self, row: &Self::Row, field: &str) -> Option<String> {
        let profile = &row.record;
        let value = match field {
            "user_info" => display::user_info(row.user.as_ref()),
            "dietary_preferences" => display::dietary_label(
                profile.is_vegetarian,
                profile.is_vegan,
                profile.is_gluten_free,
                profile.is_dairy_free,
            ),
            "spice_tolerance" => profile.spice_tolerance.label().to_string(),
            "preferred_cuisines_count" => display::list_count(&profile.preferred_cuisines),
            "allergies_count" => display::list_count(&profile.allergies),
            "status" => display::status(profile.is_active, profile.is_delete).html(),
            _ => return None,
        };
        Some(value)
    }
}

/// Dietary restriction taxonomy
#[derive(Debug, Clone, Copy, Default)]
pub struct DietaryRestrictionAdmin;

static DIETARY_RESTRICTION_OPTIONS: AdminOptions = AdminOptions {
    model_name: "Dietary Restriction",
    list_display: &[
        ListColumn::new("name", "Name"),
        ListColumn::new("description", "Description"),
        ListColumn::new("icon", "Icon"),
        ListColumn::new("status", "Status"),
    ],
    list_filter: &["is_active", "is_delete"],
    search_fields: &["name", "description"],
    readonly_fields: TIMESTAMP_FIELDS,
    fieldsets: &[
        Fieldset {
            name: "Basic Information",
            fields: &["name", "description", "icon"],
            collapsed: false,
        },
        STATUS_FIELDSET,
        TIMESTAMPS_FIELDSET,
    ],
    list_per_page: DEFAULT_PER_PAGE,
};

#[async_trait]
impl ModelAdmin for DietaryRestrictionAdmin {
    type Entity = DietaryRestriction;
    type Row = dietary_restriction::Model;

    fn options(&self) -> &'static AdminOptions {
        &DIETARY_RESTRICTION_OPTIONS
    }

    fn queryset(&self) -> Select<DietaryRestriction> {
        DietaryRestriction::find().order_by_asc(dietary_restriction::Column::Name)
    }

    async fn load_rows(
        &self,
        _db: &DatabaseConnection,
        models: Vec<dietary_restriction::Model>,
    ) -> Result<Vec<Self::Row>> {
        Ok(models)
    }

    fn display(&self, row: &Self::Row, field: &str) -> Option<String> {
        let value = match field {
            "name" => display::text(&row.name),
            "description" => display::optional(row.description.as_deref()),
            "icon" => display::optional(row.icon.as_deref()),
            "status" => display::status(row.is_active, row.is_delete).html(),
            _ => return None,
        };
        Some(value)
    }
}

/// Cuisine taxonomy
#[derive(Debug, Clone, Copy, Default)]
pub struct CuisineTypeAdmin;

static CUISINE_TYPE_OPTIONS: AdminOptions = AdminOptions {
    model_name: "Cuisine Type",
    list_display: &[
        ListColumn::new("name", "Name"),
        ListColumn::new("country_of_origin", "Country of origin"),
        ListColumn::new("description", "Description"),
        ListColumn::new("icon", "Icon"),
        ListColumn::new("status", "Status"),
    ],
    list_filter: &["country_of_origin", "is_active", "is_delete"],
    search_fields: &["name", "description", "country_of_origin"],
    readonly_fields: TIMESTAMP_FIELDS,
    fieldsets: &[
        Fieldset {
            name: "Basic Information",
            fields: &["name", "description", "country_of_origin", "icon"],
            collapsed: false,
        },
        STATUS_FIELDSET,
        TIMESTAMPS_FIELDSET,
    ],
    list_per_page: DEFAULT_PER_PAGE,
};

#[async_trait]
impl ModelAdmin for CuisineTypeAdmin {
    type Entity = CuisineType;
    type Row = cuisine_type::Model;

    fn options(&self) -> &'static AdminOptions {
        &CUISINE_TYPE_OPTIONS
    }

    fn queryset(&self) -> Select<CuisineType> {
        CuisineType::find().order_by_asc(cuisine_type::Column::Name)
    }

    async fn load_rows(
        &self,
        _db: &DatabaseConnection,
        models: Vec<cuisine_type::Model>,
    ) -> Result<Vec<Self::Row>> {
        Ok(models)
    }

    fn display(&self, row: &Self::Row, field: &str) -> Option<String> {
        let value = match field {
            "name" => display::text(&row.name),
            "country_of_origin" => display::optional(row.country_of_origin.as_deref()),
            "description" => display::optional(row.description.as_deref()),
            "icon" => display::optional(row.icon.as_deref()),
            "status" => display::status(row.is_active, row.is_delete).html(),
            _ => return None,
        };
        Some(value)
    }
}

/// Price, distance and notification preferences
#[derive(Debug, Clone, Copy, Default)]
pub struct UserPreferenceAdmin;

static USER_PREFERENCE_OPTIONS: AdminOptions = AdminOptions {
    model_name: "User Preference",
    list_display: &[
        ListColumn::new("user_info", "User Information"),
        ListColumn::new("price_range", "Price Range"),
        ListColumn::new("max_distance", "Max distance"),
        ListColumn::new("min_rating", "Min rating"),
        ListColumn::new("notifications", "Notifications"),
        ListColumn::new("status", "Status"),
    ],
    list_filter: &[
        "email_notifications",
        "push_notifications",
        "is_active",
        "is_delete",
    ],
    search_fields: USER_SEARCH,
    readonly_fields: TIMESTAMP_FIELDS,
    fieldsets: &[
        Fieldset {
            name: "User Information",
            fields: &["user_id", "is_active", "is_delete"],
            collapsed: false,
        },
        Fieldset {
            name: "Price Preferences",
            fields: &["min_price", "max_price"],
            collapsed: false,
        },
        Fieldset {
            name: "Location & Rating",
            fields: &["max_distance", "min_rating"],
            collapsed: false,
        },
        Fieldset {
            name: "Notifications",
            fields: &["email_notifications", "push_notifications"],
            collapsed: false,
        },
        TIMESTAMPS_FIELDSET,
    ],
    list_per_page: DEFAULT_PER_PAGE,
};

#[async_trait]
impl ModelAdmin for UserPreferenceAdmin {
    type Entity = UserPreference;
    type Row = WithUser<user_preference::Model>;

    fn options(&self) -> &'static AdminOptions {
        &USER_PREFERENCE_OPTIONS
    }

    fn queryset(&self) -> Select<UserPreference> {
        UserPreference::find()
            .join(JoinType::LeftJoin, user_preference::Relation::User.def())
            .order_by_desc(user_preference::Column::Id)
    }

    fn search_column(&self, field: &str) -> Option<Expr> {
        user_column(field).or_else(|| local_column::<UserPreference>(field))
    }

    async fn load_rows(
        &self,
        db: &DatabaseConnection,
        models: Vec<user_preference::Model>,
    ) -> Result<Vec<Self::Row>> {
        attach_users(db, models, |p| p.user_id).await
    }

    fn display(&self, row: &Self::Row, field: &str) -> Option<String> {
        let preference = &row.record;
        let value = match field {
            "user_info" => display::user_info(row.user.as_ref()),
            "price_range" => display::price_range(preference.min_price, preference.max_price),
            "max_distance" => preference.max_distance.to_string(),
            "min_rating" => display::decimal(preference.min_rating),
            "notifications" => display::notifications_label(
                preference.email_notifications,
                preference.push_notifications,
            ),
            "status" => display::status(preference.is_active, preference.is_delete).html(),
            _ => return None,
        };
        Some(value)
    }
}

/// Stored recommendations and how users interacted with them
#[derive(Debug, Clone, Copy, Default)]
pub struct FoodRecommendationAdmin;

static FOOD_RECOMMENDATION_OPTIONS: AdminOptions = AdminOptions {
    model_name: "Food Recommendation",
    list_display: &[
        ListColumn::new("user_info", "User Information"),
        ListColumn::new("menu_item_info", "Menu Item"),
        ListColumn::new("confidence_score", "Confidence score"),
        ListColumn::new("interaction_status", "Interaction"),
        ListColumn::new("reason", "Reason"),
        ListColumn::new("status", "Status"),
    ],
    list_filter: &[
        "confidence_score",
        "is_viewed",
        "is_clicked",
        "is_active",
        "is_delete",
    ],
    search_fields: &["user__username", "user__email", "menu_item__name", "reason"],
    readonly_fields: TIMESTAMP_FIELDS,
    fieldsets: &[
        Fieldset {
            name: "Recommendation Details",
            fields: &["user_id", "menu_item_id", "confidence_score", "reason"],
            collapsed: false,
        },
        Fieldset {
            name: "User Interaction",
            fields: &["is_viewed", "is_clicked"],
            collapsed: false,
        },
        STATUS_FIELDSET,
        TIMESTAMPS_FIELDSET,
    ],
    list_per_page: DEFAULT_PER_PAGE,
};

#[async_trait]
impl ModelAdmin for FoodRecommendationAdmin {
    type Entity = FoodRecommendation;
    type Row = UserItemRow<food_recommendation::Model>;

    fn options(&self) -> &'static AdminOptions {
        &FOOD_RECOMMENDATION_OPTIONS
    }

    fn queryset(&self) -> Select<FoodRecommendation> {
        FoodRecommendation::find()
            .join(JoinType::LeftJoin, food_recommendation::Relation::User.def())
            .join(JoinType::LeftJoin, food_recommendation::Relation::MenuItem.def())
            .order_by_desc(food_recommendation::Column::ConfidenceScore)
            .order_by_desc(food_recommendation::Column::Id)
    }

    fn search_column(&self, field: &str) -> Option<Expr> {
        user_column(field)
            .or_else(|| menu_item_column(field))
            .or_else(|| local_column::<FoodRecommendation>(field))
    }

    async fn load_rows(
        &self,
        db: &DatabaseConnection,
        models: Vec<food_recommendation::Model>,
    ) -> Result<Vec<Self::Row>> {
        attach_users_and_items(db, models, |r| (r.user_id, r.menu_item_id)).await
    }

    fn display(&self, row: &Self::Row, field: &str) -> Option<String> {
        let recommendation = &row.record;
        let value = match field {
            "user_info" => display::user_info(row.user.as_ref()),
            "menu_item_info" => {
                display::menu_item_info(row.menu_item.as_ref(), row.outlet.as_ref(), false)
            }
            "confidence_score" => display::decimal(recommendation.confidence_score),
            "interaction_status" => {
                display::interaction_status(recommendation.is_viewed, recommendation.is_clicked)
                    .html()
            }
            "reason" => display::optional(recommendation.reason.as_deref()),
            "status" => display::status(recommendation.is_active, recommendation.is_delete).html(),
            _ => return None,
        };
        Some(value)
    }
}
