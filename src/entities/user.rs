//! User entity - The account identity every profile, review and token hangs off.
//!
//! Authentication itself happens elsewhere; this table only holds the fields the
//! back office needs to show and search people by.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::base::base_record;

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Login name, unique across the marketplace
    #[sea_orm(unique)]
    pub username: String,
    /// Contact email address
    pub email: Option<String>,
    /// Given name, may be empty
    pub first_name: String,
    /// Family name, may be empty
    pub last_name: String,
    /// When the row was inserted
    pub create_time: DateTime,
    /// When the row was last written
    pub update_time: DateTime,
    /// Whether the row is switched on
    #[sea_orm(default_value = true)]
    pub is_active: bool,
    /// Soft delete flag - if true, the row is hidden but data is preserved
    #[sea_orm(default_value = false)]
    pub is_delete: bool,
}

impl Model {
    /// First and last name joined by a space, trimmed. Empty when neither is set.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Full name, falling back to the username.
    #[must_use]
    pub fn display_name(&self) -> String {
        let full_name = self.full_name();
        if full_name.is_empty() {
            self.username.clone()
        } else {
            full_name
        }
    }
}

/// Defines relationships between the user and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

base_record!();
