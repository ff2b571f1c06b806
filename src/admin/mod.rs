//! Back office presentation layer.
//!
//! Each entity gets an admin unit: a static [`AdminOptions`] describing its list
//! columns, filters, search fields and edit-form fieldsets, plus a
//! [`ModelAdmin`] implementation that knows how to query, load relations for
//! and render its rows. [`changelist`] runs one list view end to end.
//!
//! Searching is a case-insensitive substring match (`LIKE`) OR-ed across the
//! search fields; `user__username` style fields reach through joined
//! relations. Filters are exact matches AND-ed together.

pub mod customer;
pub mod display;
pub mod merchant;

use crate::{
    core::lifecycle::column,
    entities::{
        BaseRecord, MenuItem, MenuItemColumn, MenuItemModel, Outlet, OutletColumn, OutletModel,
        User, UserColumn, UserModel,
    },
    errors::{Error, Result},
};
use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, ColumnType, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, Select, Value,
    prelude::Decimal,
    sea_query::{Expr, LikeExpr},
};
use std::{collections::HashMap, str::FromStr};
use tracing::debug;

pub use customer::{
    CuisineTypeAdmin, CustomerProfileAdmin, DietaryRestrictionAdmin, FoodRecommendationAdmin,
    UserPreferenceAdmin,
};
pub use merchant::{
    CategoryAdmin, FavoriteItemAdmin, MenuItemAdmin, MerchantProfileAdmin, OutletAdmin,
    ReviewAdmin, SearchHistoryAdmin,
};

/// Rows per changelist page unless an admin says otherwise.
pub const DEFAULT_PER_PAGE: u64 = 100;

/// Columns every admin treats as read-only.
pub const TIMESTAMP_FIELDS: &[&str] = &["create_time", "update_time"];

/// A list view column: the field (or computed display) name and its header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListColumn {
    /// Model field or computed display name
    pub field: &'static str,
    /// Column heading
    pub header: &'static str,
}

impl ListColumn {
    /// Pairs a field with its heading.
    #[must_use]
    pub const fn new(field: &'static str, header: &'static str) -> Self {
        Self { field, header }
    }
}

/// A named group of fields on the edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fieldset {
    /// Group heading
    pub name: &'static str,
    /// Field names in form order
    pub fields: &'static [&'static str],
    /// Rendered folded until expanded
    pub collapsed: bool,
}

/// The soft delete and activation flags.
pub const STATUS_FIELDSET: Fieldset = Fieldset {
    name: "Status",
    fields: &["is_active", "is_delete"],
    collapsed: false,
};

/// The timestamps group every admin ends its form with.
pub const TIMESTAMPS_FIELDSET: Fieldset = Fieldset {
    name: "Timestamps",
    fields: TIMESTAMP_FIELDS,
    collapsed: true,
};

/// Declarative configuration of one admin unit.
#[derive(Debug, Clone, Copy)]
pub struct AdminOptions {
    /// Human readable model name
    pub model_name: &'static str,
    /// Columns of the list view
    pub list_display: &'static [ListColumn],
    /// Column names that can be filtered on
    pub list_filter: &'static [&'static str],
    /// Fields searched, `relation__field` for joined columns
    pub search_fields: &'static [&'static str],
    /// Fields shown but not editable on the form
    pub readonly_fields: &'static [&'static str],
    /// Edit form layout
    pub fieldsets: &'static [Fieldset],
    /// Rows per changelist page
    pub list_per_page: u64,
}

impl AdminOptions {
    /// Headers of the list view, in display order.
    #[must_use]
    pub fn headers(&self) -> Vec<&'static str> {
        self.list_display.iter().map(|c| c.header).collect()
    }
}

/// How one entity is listed, searched and rendered in the back office.
#[async_trait]
pub trait ModelAdmin: Send + Sync {
    /// The entity listed
    type Entity: EntityTrait;
    /// A model together with the relations its list columns read from
    type Row: Send + Sync;

    /// Static configuration of this admin unit.
    fn options(&self) -> &'static AdminOptions;

    /// Base query: joins the relations searched through and applies the
    /// default ordering.
    fn queryset(&self) -> Select<Self::Entity>;

    /// Column expression a search field reads from.
    fn search_column(&self, field: &str) -> Option<Expr> {
        local_column::<Self::Entity>(field)
    }

    /// Loads the relations the list columns need for a page of models.
    async fn load_rows(
        &self,
        db: &DatabaseConnection,
        models: Vec<<Self::Entity as EntityTrait>::Model>,
    ) -> Result<Vec<Self::Row>>;

    /// Renders one list column. `None` when the admin has no such column.
    fn display(&self, row: &Self::Row, field: &str) -> Option<String>;
}

/// Expression for a column of the entity's own table.
pub fn local_column<E: EntityTrait>(field: &str) -> Option<Expr> {
    E::Column::from_str(field)
        .ok()
        .map(|c| Expr::col((E::default(), c)))
}

/// A list view request.
#[derive(Debug, Clone, Default)]
pub struct ChangeListQuery {
    /// Search text, blank means no search
    pub search: Option<String>,
    /// `(column, value)` pairs
    pub filters: Vec<(String, String)>,
    /// Zero-based
    pub page: u64,
}

/// A rendered page of a list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeList {
    /// Human readable model name
    pub model_name: &'static str,
    /// Column headings
    pub headers: Vec<&'static str>,
    /// Rendered cells, one inner vector per row
    pub rows: Vec<Vec<String>>,
    /// Matching rows across all pages
    pub total: u64,
    /// Zero-based page shown
    pub page: u64,
    /// Page count for the current search and filters
    pub num_pages: u64,
}

fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn search_condition<A: ModelAdmin + ?Sized>(admin: &A, term: &str) -> Result<Condition> {
    let options = admin.options();
    let pattern = format!("%{}%", escape_like(term));

    options
        .search_fields
        .iter()
        .try_fold(Condition::any(), |condition, field| {
            let expr = admin
                .search_column(field)
                .ok_or_else(|| Error::UnknownField {
                    model: options.model_name.to_string(),
                    field: (*field).to_string(),
                })?;
            Ok(condition.add(expr.like(LikeExpr::new(pattern.clone()).escape('\\'))))
        })
}

/// Parses a filter value according to the column's type.
fn filter_value<C: ColumnTrait>(column: &C, field: &'static str, raw: &str) -> Result<Value> {
    let invalid = || Error::InvalidChoice {
        field,
        value: raw.to_string(),
    };

    let value = match column.def().get_column_type() {
        ColumnType::Boolean => match raw.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Value::from(true),
            "false" | "0" | "no" => Value::from(false),
            _ => return Err(invalid()),
        },
        ColumnType::TinyInteger
        | ColumnType::SmallInteger
        | ColumnType::Integer
        | ColumnType::BigInteger
        | ColumnType::TinyUnsigned
        | ColumnType::SmallUnsigned
        | ColumnType::Unsigned
        | ColumnType::BigUnsigned => Value::from(raw.parse::<i64>().map_err(|_| invalid())?),
        ColumnType::Decimal(_) => Value::from(Decimal::from_str(raw).map_err(|_| invalid())?),
        _ => Value::from(raw.to_string()),
    };
    Ok(value)
}

fn apply_filters<A: ModelAdmin + ?Sized>(
    admin: &A,
    mut select: Select<A::Entity>,
    filters: &[(String, String)],
) -> Result<Select<A::Entity>> {
    let options = admin.options();
    for (field, raw) in filters {
        let Some(&allowed) = options.list_filter.iter().find(|f| **f == field.as_str()) else {
            return Err(Error::UnknownField {
                model: options.model_name.to_string(),
                field: field.clone(),
            });
        };
        let col = column::<A::Entity>(allowed)?;
        select = select.filter(col.eq(filter_value(&col, allowed, raw)?));
    }
    Ok(select)
}

/// Runs a list view: search, filters, default ordering and pagination, then
/// renders every list column of the requested page.
///
/// # Errors
/// Returns an error if:
/// - A filter names a column outside the admin's `list_filter`
/// - A filter value does not parse for its column type
/// - A query fails
pub async fn changelist<A>(
    admin: &A,
    db: &DatabaseConnection,
    query: &ChangeListQuery,
) -> Result<ChangeList>
where
    A: ModelAdmin + ?Sized,
    <A::Entity as EntityTrait>::Model: Sync,
{
    let options = admin.options();
    let mut select = admin.queryset();

    if let Some(term) = query.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        select = select.filter(search_condition(admin, term)?);
    }
    select = apply_filters(admin, select, &query.filters)?;

    let paginator = select.paginate(db, options.list_per_page);
    let total = paginator.num_items().await?;
    let num_pages = paginator.num_pages().await?;
    let models = paginator.fetch_page(query.page).await?;
    debug!(
        "{} changelist page {}: {} of {} rows",
        options.model_name,
        query.page,
        models.len(),
        total
    );

    let rows = admin.load_rows(db, models).await?;
    let rendered = rows
        .iter()
        .map(|row| {
            options
                .list_display
                .iter()
                .map(|c| {
                    admin.display(row, c.field).ok_or_else(|| Error::UnknownField {
                        model: options.model_name.to_string(),
                        field: c.field.to_string(),
                    })
                })
                .collect::<Result<Vec<_>>>()
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ChangeList {
        model_name: options.model_name,
        headers: options.headers(),
        rows: rendered,
        total,
        page: query.page,
        num_pages,
    })
}

/// Fetches the rows with the given ids, keyed by id.
pub(crate) async fn load_by_id<E>(
    db: &DatabaseConnection,
    ids: impl IntoIterator<Item = i64> + Send,
) -> Result<HashMap<i64, E::Model>>
where
    E: EntityTrait,
    E::Model: BaseRecord,
{
    let mut ids: Vec<i64> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let id_column = column::<E>("id")?;
    Ok(E::find()
        .filter(id_column.is_in(ids))
        .all(db)
        .await?
        .into_iter()
        .map(|m| (m.id(), m))
        .collect())
}

/// A model with the user it belongs to.
#[derive(Debug, Clone)]
pub struct WithUser<M> {
    /// The listed row
    pub record: M,
    /// Its owner, `None` if the user row is missing
    pub user: Option<UserModel>,
}

/// A model linking a user to a menu item, with both loaded and the item's
/// outlet.
#[derive(Debug, Clone)]
pub struct UserItemRow<M> {
    /// The listed row
    pub record: M,
    /// The user side of the link
    pub user: Option<UserModel>,
    /// The menu item side of the link
    pub menu_item: Option<MenuItemModel>,
    /// Outlet selling the menu item
    pub outlet: Option<OutletModel>,
}

/// Search expression for `user__*` fields.
pub(crate) fn user_column(field: &str) -> Option<Expr> {
    let column = match field {
        "user__username" => UserColumn::Username,
        "user__email" => UserColumn::Email,
        "user__first_name" => UserColumn::FirstName,
        "user__last_name" => UserColumn::LastName,
        _ => return None,
    };
    Some(Expr::col((User, column)))
}

/// Search expression for `menu_item__*` fields.
pub(crate) fn menu_item_column(field: &str) -> Option<Expr> {
    match field {
        "menu_item__name" => Some(Expr::col((MenuItem, MenuItemColumn::Name))),
        "menu_item__outlet__name" => Some(Expr::col((Outlet, OutletColumn::Name))),
        _ => None,
    }
}

pub(crate) async fn attach_users<M: Send>(
    db: &DatabaseConnection,
    models: Vec<M>,
    user_id: fn(&M) -> i64,
) -> Result<Vec<WithUser<M>>> {
    let users = load_by_id::<User>(db, models.iter().map(user_id).collect::<Vec<_>>()).await?;
    Ok(models
        .into_iter()
        .map(|record| {
            let user = users.get(&user_id(&record)).cloned();
            WithUser { record, user }
        })
        .collect())
}

pub(crate) async fn attach_users_and_items<M: Send>(
    db: &DatabaseConnection,
    models: Vec<M>,
    ids: fn(&M) -> (i64, i64),
) -> Result<Vec<UserItemRow<M>>> {
    let (user_ids, item_ids): (Vec<i64>, Vec<i64>) = models.iter().map(ids).unzip();
    let users = load_by_id::<User>(db, user_ids).await?;
    let items = load_by_id::<MenuItem>(db, item_ids).await?;
    let outlets =
        load_by_id::<Outlet>(db, items.values().map(|i| i.outlet_id).collect::<Vec<_>>()).await?;

    Ok(models
        .into_iter()
        .map(|record| {
            let (user_id, item_id) = ids(&record);
            let menu_item = items.get(&item_id).cloned();
            let outlet = menu_item
                .as_ref()
                .and_then(|i| outlets.get(&i.outlet_id))
                .cloned();
            UserItemRow {
                record,
                user: users.get(&user_id).cloned(),
                menu_item,
                outlet,
            }
        })
        .collect())
}

/// Names accepted by [`changelist_for`].
pub const MODEL_NAMES: &[&str] = &[
    "customer_profile",
    "dietary_restriction",
    "cuisine_type",
    "user_preference",
    "food_recommendation",
    "category",
    "merchant_profile",
    "outlet",
    "menu_item",
    "review",
    "search_history",
    "favorite_item",
];

/// Runs the changelist of the admin registered under `model`.
///
/// # Errors
/// Returns `Error::Config` for an unregistered model name, otherwise whatever
/// [`changelist`] returns.
pub async fn changelist_for(
    model: &str,
    db: &DatabaseConnection,
    query: &ChangeListQuery,
) -> Result<ChangeList> {
    match model {
        "customer_profile" => changelist(&CustomerProfileAdmin, db, query).await,
        "dietary_restriction" => changelist(&DietaryRestrictionAdmin, db, query).await,
        "cuisine_type" => changelist(&CuisineTypeAdmin, db, query).await,
        "user_preference" => changelist(&UserPreferenceAdmin, db, query).await,
        "food_recommendation" => changelist(&FoodRecommendationAdmin, db, query).await,
        "category" => changelist(&CategoryAdmin, db, query).await,
        "merchant_profile" => changelist(&MerchantProfileAdmin, db, query).await,
        "outlet" => changelist(&OutletAdmin, db, query).await,
        "menu_item" => changelist(&MenuItemAdmin, db, query).await,
        "review" => changelist(&ReviewAdmin, db, query).await,
        "search_history" => changelist(&SearchHistoryAdmin, db, query).await,
        "favorite_item" => changelist(&FavoriteItemAdmin, db, query).await,
        other => Err(Error::Config {
            message: format!(
                "no admin registered for '{other}' (expected one of: {})",
                MODEL_NAMES.join(", ")
            ),
        }),
    }
}
