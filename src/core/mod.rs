//! Core business logic, independent of any presentation layer.
//!
//! Each module groups the operations for one area of the marketplace and
//! works directly on a `DatabaseConnection`.

pub mod auth;
pub mod customer;
pub mod engagement;
pub mod lifecycle;
pub mod menu;
pub mod merchant;
pub mod taxonomy;
pub mod user;
