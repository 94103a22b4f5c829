//! Restaurant content records

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use crate::query::Ordered;

/// Order assigned to records that do not declare one; places them last.
pub const DEFAULT_ORDER: i64 = 999;

fn default_order() -> i64 {
    DEFAULT_ORDER
}

fn default_lunch_title() -> String {
    "Lunch Menu".to_string()
}

/// A menu section such as "Pizza" or "Desserts"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuCategory {
    #[serde(default, deserialize_with = "text")]
    pub id: String,
    #[serde(deserialize_with = "text")]
    pub name: String,
    #[serde(default, deserialize_with = "text")]
    pub description: String,
    #[serde(default = "default_order", deserialize_with = "lenient_order")]
    pub order: i64,
}

/// A dietary marker used to filter menu items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuTag {
    #[serde(default, deserialize_with = "text")]
    pub id: String,
    #[serde(deserialize_with = "text")]
    pub name: String,
    #[serde(default, deserialize_with = "text")]
    pub icon: String,
}

/// A dish on the regular menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[serde(default, deserialize_with = "text")]
    pub id: String,
    #[serde(deserialize_with = "text")]
    pub name: String,
    #[serde(default, deserialize_with = "text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: f64,
    /// Id of a [`MenuCategory`]; not checked against the category set
    #[serde(default, deserialize_with = "text")]
    pub category: String,
    /// Ids of [`MenuTag`]s
    #[serde(default, deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "non_empty_string"
    )]
    pub image: Option<String>,
    #[serde(default = "default_order", deserialize_with = "lenient_order")]
    pub order: i64,
}

/// A member of the restaurant team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    #[serde(default, deserialize_with = "text")]
    pub id: String,
    #[serde(deserialize_with = "text")]
    pub name: String,
    #[serde(default, deserialize_with = "text")]
    pub position: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "non_empty_string"
    )]
    pub bio: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "non_empty_string"
    )]
    pub image: Option<String>,
    #[serde(default = "default_order", deserialize_with = "lenient_order")]
    pub order: i64,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_socials"
    )]
    pub socials: Option<BTreeMap<String, String>>,

    /// Any further frontmatter fields, passed through untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One dish of a weekly lunch menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LunchMenuItem {
    #[serde(default, deserialize_with = "text")]
    pub day: String,
    #[serde(deserialize_with = "text")]
    pub name: String,
    #[serde(default, deserialize_with = "text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: f64,
    #[serde(default = "default_order", deserialize_with = "lenient_order")]
    pub order: i64,
}

/// A lunch menu valid for an inclusive range of calendar days
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LunchMenu {
    #[serde(default, deserialize_with = "text")]
    pub id: String,
    #[serde(default = "default_lunch_title", deserialize_with = "text")]
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Items that fail to convert are dropped on their own
    #[serde(default, deserialize_with = "lenient_lunch_items")]
    pub items: Vec<LunchMenuItem>,
}

impl LunchMenu {
    /// Whether `date` falls within `[start_date, end_date]`
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// The date range is well formed
    pub fn has_valid_range(&self) -> bool {
        self.start_date <= self.end_date
    }

    /// Items served on `day`, in their declared order
    pub fn items_for_day(&self, day: &str) -> Vec<&LunchMenuItem> {
        let mut items: Vec<_> = self
            .items
            .iter()
            .filter(|item| item.day.eq_ignore_ascii_case(day))
            .collect();
        items.sort_by_key(|item| item.order);
        items
    }
}

/// A requested display-order change, see
/// [`RestaurantContent::update_content_order`](crate::resolver::RestaurantContent::update_content_order)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub id: String,
    pub order: i64,
}

impl Ordered for MenuCategory {
    fn order(&self) -> i64 {
        self.order
    }
}

impl Ordered for MenuItem {
    fn order(&self) -> i64 {
        self.order
    }
}

impl Ordered for TeamMember {
    fn order(&self) -> i64 {
        self.order
    }
}

impl Ordered for LunchMenuItem {
    fn order(&self) -> i64 {
        self.order
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Accepts an integer, a float, or a numeric string. Blank means "not set".
fn lenient_order<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(DEFAULT_ORDER),
        Some(NumberOrString::Int(n)) => Ok(n),
        Some(NumberOrString::Float(f)) => Ok(f.round() as i64),
        Some(NumberOrString::Text(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(DEFAULT_ORDER);
            }
            s.parse::<i64>()
                .or_else(|_| s.parse::<f64>().map(|f| f.round() as i64))
                .map_err(|_| D::Error::custom(format!("invalid order: {s}")))
        }
    }
}

/// Accepts a non-negative number or numeric string. Blank means zero.
fn lenient_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let price = match Option::<NumberOrString>::deserialize(deserializer)? {
        None => 0.0,
        Some(NumberOrString::Int(n)) => n as f64,
        Some(NumberOrString::Float(f)) => f,
        Some(NumberOrString::Text(s)) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse::<f64>()
                    .map_err(|_| D::Error::custom(format!("invalid price: {s}")))?
            }
        }
    };

    if !price.is_finite() || price < 0.0 {
        return Err(D::Error::custom(format!("price must be non-negative, got {price}")));
    }
    Ok(price)
}

/// A scalar read as text: `name: 1984` is the string "1984"
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?
        .map(Scalar::into_string)
        .unwrap_or_default())
}

fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?
        .map(Scalar::into_string)
        .filter(|s| !s.trim().is_empty()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SocialsOrBlank {
    Map(BTreeMap<String, Scalar>),
    Blank(String),
}

fn optional_socials<'de, D>(deserializer: D) -> Result<Option<BTreeMap<String, String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<SocialsOrBlank>::deserialize(deserializer)? {
        Some(SocialsOrBlank::Map(map)) => Some(
            map.into_iter()
                .map(|(network, handle)| (network, handle.into_string()))
                .collect(),
        ),
        Some(SocialsOrBlank::Blank(_)) | None => None,
    })
}

/// Keep the convertible entries of an `items:` list, logging the rest
fn lenient_lunch_items<'de, D>(deserializer: D) -> Result<Vec<LunchMenuItem>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::Array(entries)) => entries,
        None | Some(serde_json::Value::Null) => return Ok(Vec::new()),
        Some(other) => {
            tracing::warn!("Ignoring lunch menu items: expected a list, got {}", other);
            return Ok(Vec::new());
        }
    };

    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!("Skipping lunch menu item {}: {}", index, e);
                None
            }
        })
        .collect())
}

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if value.trim().is_empty() {
                return Ok(Vec::new());
            }
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            self.visit_str(&value)
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_menu_item_defaults() {
        let item: MenuItem = serde_json::from_value(json!({
            "id": "bruschetta",
            "name": "Bruschetta",
        }))
        .unwrap();
        assert_eq!(item.price, 0.0);
        assert_eq!(item.order, DEFAULT_ORDER);
        assert!(item.tags.is_empty());
        assert_eq!(item.image, None);
    }

    #[test]
    fn test_menu_item_lenient_fields() {
        let item: MenuItem = serde_json::from_value(json!({
            "name": "Calzone",
            "price": "11.50",
            "tags": "spicy",
            "image": "",
            "order": "3",
        }))
        .unwrap();
        assert_eq!(item.price, 11.5);
        assert_eq!(item.tags, vec!["spicy"]);
        assert_eq!(item.image, None);
        assert_eq!(item.order, 3);
    }

    #[test]
    fn test_negative_price_rejected() {
        let result = serde_json::from_value::<MenuItem>(json!({
            "name": "Refund",
            "price": -2,
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_team_member_keeps_extra_fields() {
        let member: TeamMember = serde_json::from_value(json!({
            "id": "jane-doe",
            "name": "Jane Doe",
            "position": "Head Chef",
            "socials": { "instagram": "@janecooks" },
            "languages": ["Italian", "English"],
        }))
        .unwrap();
        assert_eq!(
            member.socials.unwrap().get("instagram").map(String::as_str),
            Some("@janecooks")
        );
        assert_eq!(member.extra["languages"], json!(["Italian", "English"]));

        let member: TeamMember =
            serde_json::from_value(json!({ "name": "Sam", "socials": "" })).unwrap();
        assert_eq!(member.socials, None);
    }

    #[test]
    fn test_lunch_menu_dates() {
        let menu: LunchMenu = serde_json::from_value(json!({
            "startDate": "2025-03-18",
            "endDate": "2025-03-22",
            "items": [
                { "day": "Monday", "name": "Tomato Soup", "price": 6.9, "order": 2 },
                { "day": "Monday", "name": "Mushroom Risotto", "price": 9.9, "order": 1 },
                { "day": "Tuesday", "name": "Chicken Curry", "price": 10.9 },
            ],
        }))
        .unwrap();

        assert_eq!(menu.title, "Lunch Menu");
        assert!(menu.has_valid_range());
        assert!(menu.contains(NaiveDate::from_ymd_opt(2025, 3, 18).unwrap()));
        assert!(menu.contains(NaiveDate::from_ymd_opt(2025, 3, 22).unwrap()));
        assert!(!menu.contains(NaiveDate::from_ymd_opt(2025, 3, 23).unwrap()));

        let monday: Vec<_> = menu
            .items_for_day("monday")
            .into_iter()
            .map(|item| item.name.as_str())
            .collect();
        assert_eq!(monday, vec!["Mushroom Risotto", "Tomato Soup"]);
    }

    #[test]
    fn test_lunch_menu_keeps_valid_items() {
        let menu: LunchMenu = serde_json::from_value(json!({
            "title": "Week 12",
            "startDate": "2025-03-18",
            "endDate": "2025-03-22",
            "items": [
                { "day": "Monday", "name": "Tomato Soup", "price": 6.9 },
                { "day": "Tuesday", "price": 10.9 },
                { "day": "Wednesday", "name": "Goulash", "price": -1 },
            ],
        }))
        .unwrap();
        assert_eq!(menu.items.len(), 1);
        assert_eq!(menu.items[0].name, "Tomato Soup");

        let menu: LunchMenu = serde_json::from_value(json!({
            "startDate": "2025-03-18",
            "endDate": "2025-03-22",
            "items": "",
        }))
        .unwrap();
        assert!(menu.items.is_empty());
    }

    #[test]
    fn test_text_fields_accept_scalars() {
        let item: MenuItem = serde_json::from_value(json!({
            "id": 7,
            "name": 1984,
            "category": 2,
            "description": true,
        }))
        .unwrap();
        assert_eq!(item.id, "7");
        assert_eq!(item.name, "1984");
        assert_eq!(item.category, "2");
        assert_eq!(item.description, "true");

        let member: TeamMember = serde_json::from_value(json!({
            "name": "Sam",
            "bio": 42,
            "socials": { "phone": 5550100 },
        }))
        .unwrap();
        assert_eq!(member.bio.as_deref(), Some("42"));
        assert_eq!(member.socials.unwrap()["phone"], "5550100");

        assert!(serde_json::from_value::<MenuItem>(json!({ "price": 3 })).is_err());
    }

    #[test]
    fn test_serializes_camel_case() {
        let menu = LunchMenu {
            id: "week-12".to_string(),
            title: "Week 12".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 3, 18).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 22).unwrap(),
            items: Vec::new(),
        };
        let value = serde_json::to_value(&menu).unwrap();
        assert_eq!(value["startDate"], json!("2025-03-18"));
        assert_eq!(value["endDate"], json!("2025-03-22"));
    }
}
