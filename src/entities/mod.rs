//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod base;

pub mod auth_token;
pub mod user;

pub mod cuisine_type;
pub mod customer_profile;
pub mod dietary_restriction;
pub mod food_recommendation;
pub mod user_preference;

pub mod category;
pub mod favorite_item;
pub mod menu_item;
pub mod merchant_profile;
pub mod outlet;
pub mod review;
pub mod search_history;

// Re-export specific types to avoid conflicts
pub use auth_token::{Column as AuthTokenColumn, Entity as AuthToken, Model as AuthTokenModel};
pub use base::{BaseRecord, StringList};
pub use category::{Column as CategoryColumn, Entity as Category, Model as CategoryModel};
pub use cuisine_type::{
    Column as CuisineTypeColumn, Entity as CuisineType, Model as CuisineTypeModel,
};
pub use customer_profile::{
    Column as CustomerProfileColumn, Entity as CustomerProfile, Model as CustomerProfileModel,
    SpiceLevel,
};
pub use dietary_restriction::{
    Column as DietaryRestrictionColumn, Entity as DietaryRestriction,
    Model as DietaryRestrictionModel,
};
pub use favorite_item::{
    Column as FavoriteItemColumn, Entity as FavoriteItem, Model as FavoriteItemModel,
};
pub use food_recommendation::{
    Column as FoodRecommendationColumn, Entity as FoodRecommendation,
    Model as FoodRecommendationModel,
};
pub use menu_item::{Column as MenuItemColumn, Entity as MenuItem, Model as MenuItemModel};
pub use merchant_profile::{
    Column as MerchantProfileColumn, Entity as MerchantProfile, Model as MerchantProfileModel,
};
pub use outlet::{Column as OutletColumn, Entity as Outlet, Model as OutletModel};
pub use review::{Column as ReviewColumn, Entity as Review, Model as ReviewModel};
pub use search_history::{
    Column as SearchHistoryColumn, Entity as SearchHistory, Model as SearchHistoryModel,
};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
pub use user_preference::{
    Column as UserPreferenceColumn, Entity as UserPreference, Model as UserPreferenceModel,
};
