//! Shared base-record shape carried by every table.
//!
//! Each entity has `id`, `create_time`, `update_time`, `is_active` and
//! `is_delete` columns. The [`base_record!`] macro wires the [`BaseRecord`]
//! accessors and the timestamp-stamping `ActiveModelBehavior` into an entity
//! module; entities that need extra save-time checks call [`stamp`] from their
//! own behavior instead.

use sea_orm::{ActiveValue, FromJsonQueryResult, Set, prelude::DateTime};
use serde::{Deserialize, Serialize};

/// Read access to the columns every entity shares.
pub trait BaseRecord {
    /// Primary key
    fn id(&self) -> i64;
    /// When the row was inserted
    fn create_time(&self) -> DateTime;
    /// When the row was last written
    fn update_time(&self) -> DateTime;
    /// Whether the row is switched on
    fn is_active(&self) -> bool;
    /// Soft delete flag - the row stays in the table but is treated as gone
    fn is_delete(&self) -> bool;
}

/// A list of strings persisted as a JSON array column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct StringList(pub Vec<String>);

impl StringList {
    /// Number of entries in the list
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for StringList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Fills in the base-record columns before a save.
///
/// On insert, `create_time` is set unless the caller chose one, and the
/// status flags default to active and not deleted. `update_time` is bumped on
/// every save.
pub fn stamp(
    create_time: &mut ActiveValue<DateTime>,
    update_time: &mut ActiveValue<DateTime>,
    is_active: &mut ActiveValue<bool>,
    is_delete: &mut ActiveValue<bool>,
    insert: bool,
) {
    let now = chrono::Utc::now().naive_utc();

    if insert {
        if matches!(create_time, ActiveValue::NotSet) {
            *create_time = Set(now);
        }
        if matches!(is_active, ActiveValue::NotSet) {
            *is_active = Set(true);
        }
        if matches!(is_delete, ActiveValue::NotSet) {
            *is_delete = Set(false);
        }
    }
    *update_time = Set(now);
}

/// Implements [`BaseRecord`] for the entity's `Model` and, unless called with
/// `@record`, the default timestamp-stamping `ActiveModelBehavior`.
macro_rules! base_record {
    () => {
        $crate::entities::base::base_record!(@record);

        #[async_trait::async_trait]
        impl ActiveModelBehavior for ActiveModel {
            async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
            where
                C: sea_orm::ConnectionTrait,
            {
                $crate::entities::base::stamp(
                    &mut self.create_time,
                    &mut self.update_time,
                    &mut self.is_active,
                    &mut self.is_delete,
                    insert,
                );
                Ok(self)
            }
        }
    };
    (@record) => {
        impl $crate::entities::base::BaseRecord for Model {
            fn id(&self) -> i64 {
                self.id
            }
            fn create_time(&self) -> sea_orm::prelude::DateTime {
                self.create_time
            }
            fn update_time(&self) -> sea_orm::prelude::DateTime {
                self.update_time
            }
            fn is_active(&self) -> bool {
                self.is_active
            }
            fn is_delete(&self) -> bool {
                self.is_delete
            }
        }
    };
}

pub(crate) use base_record;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_stamp_insert_defaults() {
        let mut create_time = ActiveValue::NotSet;
        let mut update_time = ActiveValue::NotSet;
        let mut is_active = ActiveValue::NotSet;
        let mut is_delete = ActiveValue::NotSet;

        stamp(
            &mut create_time,
            &mut update_time,
            &mut is_active,
            &mut is_delete,
            true,
        );

        assert!(create_time.is_set());
        assert!(update_time.is_set());
        assert_eq!(is_active, Set(true));
        assert_eq!(is_delete, Set(false));
    }

    #[test]
    fn test_stamp_keeps_explicit_create_time() {
        let earlier = NaiveDate::from_ymd_opt(2024, 1, 2)
            .and_then(|d| d.and_hms_opt(3, 4, 5))
            .unwrap_or_default();
        let mut create_time = Set(earlier);
        let mut update_time = ActiveValue::NotSet;
        let mut is_active = Set(false);
        let mut is_delete = ActiveValue::NotSet;

        stamp(
            &mut create_time,
            &mut update_time,
            &mut is_active,
            &mut is_delete,
            true,
        );

        assert_eq!(create_time, Set(earlier));
        assert_eq!(is_active, Set(false));
    }

    #[test]
    fn test_stamp_update_only_touches_update_time() {
        let mut create_time = ActiveValue::NotSet;
        let mut update_time = ActiveValue::NotSet;
        let mut is_active = ActiveValue::NotSet;
        let mut is_delete = ActiveValue::NotSet;

        stamp(
            &mut create_time,
            &mut update_time,
            &mut is_active,
            &mut is_delete,
            false,
        );

        assert!(matches!(create_time, ActiveValue::NotSet));
        assert!(update_time.is_set());
        assert!(matches!(is_active, ActiveValue::NotSet));
    }

    #[test]
    fn test_string_list_collects() {
        let list: StringList = ["thai", "mexican"].into_iter().collect();
        assert_eq!(list.len(), 2);
        assert!(StringList::default().is_empty());
    }

    #[test]
    fn test_string_list_is_a_json_array() {
        let list: StringList = ["thai", "mexican"].into_iter().collect();
        assert_eq!(
            serde_json::to_value(&list).unwrap_or_default(),
            serde_json::json!(["thai", "mexican"])
        );
    }
}
