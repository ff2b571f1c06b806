//! Display formatting for the back office list views.
//!
//! Every function here is pure: it takes a row (and whatever relations were
//! loaded with it) and returns the string the admin console shows. Missing
//! relations render as a placeholder instead of failing. Text coming from the
//! database is HTML-escaped before it is interpolated into markup.

use crate::entities::{MenuItemModel, OutletModel, StringList, UserModel};
use chrono::NaiveDateTime;
use html_escape::{encode_double_quoted_attribute, encode_text};
use sea_orm::prelude::{Decimal, Time};

/// Free text longer than this is cut in list views.
pub const PREVIEW_LENGTH: usize = 50;

/// Shown for empty optional columns.
pub const EMPTY_VALUE: &str = "-";

/// Label and CSS color of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    /// Text shown inside the badge
    pub label: &'static str,
    /// CSS colour of the text
    pub color: &'static str,
}

impl Badge {
    const fn new(label: &'static str, color: &'static str) -> Self {
        Self { label, color }
    }

    /// Renders the badge as a colored span.
    #[must_use]
    pub fn html(self) -> String {
        format!(r#"<span style="color: {};">{}</span>"#, self.color, self.label)
    }
}

/// Three-way record status: deleted wins over inactive.
#[must_use]
pub const fn status(is_active: bool, is_delete: bool) -> Badge {
    if is_delete {
        Badge::new("Deleted", "red")
    } else if !is_active {
        Badge::new("Inactive", "orange")
    } else {
        Badge::new("Active", "green")
    }
}

/// Menu item status, which also reflects availability.
#[must_use]
pub const fn menu_item_status(is_active: bool, is_delete: bool, is_available: bool) -> Badge {
    if is_delete {
        Badge::new("Deleted", "red")
    } else if !is_active {
        Badge::new("Inactive", "orange")
    } else if !is_available {
        Badge::new("Unavailable", "gray")
    } else {
        Badge::new("Available", "green")
    }
}

/// How far a user got with a recommendation.
#[must_use]
pub const fn interaction_status(is_viewed: bool, is_clicked: bool) -> Badge {
    if is_clicked {
        Badge::new("Clicked", "green")
    } else if is_viewed {
        Badge::new("Viewed", "blue")
    } else {
        Badge::new("Not Viewed", "gray")
    }
}

/// Verified or pending badge for a merchant.
#[must_use]
pub const fn verification_status(is_verified: bool) -> Badge {
    if is_verified {
        Badge::new("✓ Verified", "green")
    } else {
        Badge::new("✗ Not Verified", "orange")
    }
}

fn join_flags(flags: &[(bool, &str)], separator: &str, empty: &str) -> String {
    let labels: Vec<&str> = flags
        .iter()
        .filter(|(on, _)| *on)
        .map(|(_, label)| *label)
        .collect();
    if labels.is_empty() {
        empty.to_string()
    } else {
        labels.join(separator)
    }
}

/// Comma-joined dietary flags, or `None`.
#[must_use]
pub fn dietary_label(vegetarian: bool, vegan: bool, gluten_free: bool, dairy_free: bool) -> String {
    join_flags(
        &[
            (vegetarian, "Vegetarian"),
            (vegan, "Vegan"),
            (gluten_free, "Gluten-Free"),
            (dairy_free, "Dairy-Free"),
        ],
        ", ",
        "None",
    )
}

/// Enabled notification channels, or `None`.
#[must_use]
pub fn notifications_label(email: bool, push: bool) -> String {
    join_flags(&[(email, "Email"), (push, "Push")], ", ", "None")
}

/// Services an outlet offers, e.g. `Dine-in, Takeaway`.
#[must_use]
pub fn services_label(dine_in: bool, takeaway: bool) -> String {
    join_flags(&[(dine_in, "Dine-in"), (takeaway, "Takeaway")], ", ", "None")
}

/// Space-joined food markers, or `Standard`.
#[must_use]
pub fn food_details(vegetarian: bool, spicy: bool, gluten_free: bool) -> String {
    join_flags(
        &[
            (vegetarian, "🥬 Veg"),
            (spicy, "🌶️ Spicy"),
            (gluten_free, "🌾 GF"),
        ],
        " ",
        "Standard",
    )
}

/// Cuts text to [`PREVIEW_LENGTH`] characters followed by `...`.
#[must_use]
pub fn truncate(text: &str) -> String {
    if text.chars().count() > PREVIEW_LENGTH {
        let head: String = text.chars().take(PREVIEW_LENGTH).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

/// Truncated text, or `placeholder` when there is none.
#[must_use]
pub fn preview(text: Option<&str>, placeholder: &str) -> String {
    match text.filter(|t| !t.is_empty()) {
        Some(text) => truncate(text),
        None => placeholder.to_string(),
    }
}

/// Five stars, `rating` of them filled, followed by the number.
#[must_use]
pub fn rating_stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!(
        r#"<span style="color: gold; font-size: 16px;">{}{}</span> ({})"#,
        "★".repeat(filled),
        "☆".repeat(5 - filled),
        rating
    )
}

/// `HH:MM - HH:MM`
#[must_use]
pub fn hours(opening: Time, closing: Time) -> String {
    format!("{} - {}", opening.format("%H:%M"), closing.format("%H:%M"))
}

/// A preference price range in rupees.
#[must_use]
pub fn price_range(min_price: Decimal, max_price: Decimal) -> String {
    format!("₹{min_price:.2} - ₹{max_price:.2}")
}

/// `YYYY-MM-DD HH:MM`
#[must_use]
pub fn timestamp(time: NaiveDateTime) -> String {
    time.format("%Y-%m-%d %H:%M").to_string()
}

/// Two decimal places.
#[must_use]
pub fn decimal(value: Decimal) -> String {
    format!("{value:.2}")
}

/// Plain text, escaped.
#[must_use]
pub fn text(value: &str) -> String {
    encode_text(value).into_owned()
}

/// Escaped value, or the empty placeholder.
#[must_use]
pub fn optional(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .map_or_else(|| EMPTY_VALUE.to_string(), |v| encode_text(v).into_owned())
}

/// Number of entries in a JSON list column.
#[must_use]
pub fn list_count(list: &StringList) -> String {
    list.len().to_string()
}

fn two_line(title: &str, detail: &str) -> String {
    format!(
        "<strong>{}</strong><br><small>{}</small>",
        encode_text(title),
        encode_text(detail)
    )
}

fn thumbnail(src: Option<&str>) -> String {
    src.filter(|s| !s.is_empty())
        .map(|s| {
            format!(
                r#"<img src="{}" style="max-height: 30px; max-width: 30px; margin-right: 10px;" />"#,
                encode_double_quoted_attribute(s)
            )
        })
        .unwrap_or_default()
}

/// Display name and email of a user.
#[must_use]
pub fn user_info(user: Option<&UserModel>) -> String {
    user.map_or_else(
        || "No user".to_string(),
        |user| {
            two_line(
                &user.display_name(),
                user.email.as_deref().filter(|e| !e.is_empty()).unwrap_or("No email"),
            )
        },
    )
}

/// Name of a menu item and the outlet selling it. Favorites get a heart.
#[must_use]
pub fn menu_item_info(
    item: Option<&MenuItemModel>,
    outlet: Option<&OutletModel>,
    favorite: bool,
) -> String {
    item.map_or_else(
        || "No menu item".to_string(),
        |item| {
            let name = if favorite {
                format!("❤️ {}", item.name)
            } else {
                item.name.clone()
            };
            two_line(&name, outlet.map_or("No outlet", |o| o.name.as_str()))
        },
    )
}

/// Menu item with its thumbnail and outlet.
#[must_use]
pub fn item_info(item: &MenuItemModel, outlet: Option<&OutletModel>) -> String {
    format!(
        "{}{}",
        thumbnail(item.primary_image.as_deref()),
        two_line(&item.name, outlet.map_or("No outlet", |o| o.name.as_str()))
    )
}

/// Outlet name over the merchant running it.
#[must_use]
pub fn outlet_info(name: &str, merchant_name: Option<&str>) -> String {
    two_line(name, merchant_name.unwrap_or("No merchant"))
}

/// Area over city and state.
#[must_use]
pub fn location_info(area: &str, city: &str, state: &str) -> String {
    two_line(area, &format!("{city}, {state}"))
}

/// Logo, name and a short description of a business.
#[must_use]
pub fn business_info(logo: Option<&str>, name: &str, description: Option<&str>) -> String {
    format!(
        "{}{}",
        thumbnail(logo),
        two_line(name, &preview(description, "No description"))
    )
}

/// Merchant owner over phone and email.
#[must_use]
pub fn contact_info(user: Option<&UserModel>, phone: Option<&str>, email: Option<&str>) -> String {
    let name = user.map_or_else(|| "No user".to_string(), UserModel::display_name);
    two_line(
        &name,
        &format!(
            "Phone: {} | Email: {}",
            phone.filter(|p| !p.is_empty()).unwrap_or("No phone"),
            email.filter(|e| !e.is_empty()).unwrap_or("No email")
        ),
    )
}

/// Order count and average rating.
#[must_use]
pub fn popularity(total_orders: u32, average_rating: Decimal) -> String {
    format!(
        "<strong>Orders:</strong> {total_orders} | <strong>Rating:</strong> {average_rating:.2}★"
    )
}

/// Thumbnail of an uploaded icon.
#[must_use]
pub fn icon_preview(icon: Option<&str>) -> String {
    icon.filter(|i| !i.is_empty()).map_or_else(
        || "No icon".to_string(),
        |icon| {
            format!(
                r#"<img src="{}" style="max-height: 30px; max-width: 30px;" />"#,
                encode_double_quoted_attribute(icon)
            )
        },
    )
}

/// Swatch of a hex colour.
#[must_use]
pub fn color_preview(color: &str) -> String {
    if color.is_empty() {
        return "No color".to_string();
    }
    format!(
        r#"<div style="background-color: {}; width: 30px; height: 20px; border: 1px solid #ccc;"></div>"#,
        encode_double_quoted_attribute(color)
    )
}
