//! Fallback content served when a storage location is missing or a data
//! file cannot be read

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::content::{LunchMenu, LunchMenuItem, MenuCategory, MenuItem, MenuTag, TeamMember};

/// One fallback set per content kind.
///
/// Configured under `fallbacks:` in `_config.yml`; kinds left out keep the
/// built-in sample data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fallbacks {
    pub categories: Vec<MenuCategory>,
    pub tags: Vec<MenuTag>,
    pub items: Vec<MenuItem>,
    pub team: Vec<TeamMember>,
    pub lunch_menus: Vec<LunchMenu>,
}

impl Fallbacks {
    /// No fallback data for any kind
    pub fn empty() -> Self {
        Self {
            categories: Vec::new(),
            tags: Vec::new(),
            items: Vec::new(),
            team: Vec::new(),
            lunch_menus: Vec::new(),
        }
    }
}

impl Default for Fallbacks {
    fn default() -> Self {
        Self {
            categories: vec![
                category("pizza", "Pizza", "Our stone-baked pizzas", 1),
                category("pasta", "Pasta", "Homemade pasta dishes", 2),
                category("salads", "Salads", "Fresh seasonal salads", 3),
                category("desserts", "Desserts", "Sweet treats", 4),
            ],
            tags: vec![
                tag("vegetarian", "Vegetarian", "leaf"),
                tag("vegan", "Vegan", "plant"),
                tag("spicy", "Spicy", "fire"),
                tag("gluten-free", "Gluten-Free", "wheat-slash"),
            ],
            items: Vec::new(),
            team: vec![
                member(
                    "chef",
                    "Chef Michael Brown",
                    "Head Chef",
                    "With over 15 years of culinary experience, Chef Michael leads our kitchen with passion and creativity.",
                    1,
                ),
                member(
                    "sous-chef",
                    "Jane Doe",
                    "Sous Chef",
                    "Jane brings international flavors to our kitchen with her extensive training in French and Italian cuisine.",
                    2,
                ),
                member(
                    "pastry-chef",
                    "John Smith",
                    "Pastry Chef",
                    "John creates dessert masterpieces that are as beautiful as they are delicious.",
                    3,
                ),
            ],
            lunch_menus: vec![LunchMenu {
                id: "current-week".to_string(),
                title: "Current Week Lunch Menu".to_string(),
                start_date: ymd(2025, 3, 11),
                end_date: ymd(2025, 3, 15),
                items: vec![
                    lunch_item("Monday", "Grilled Salmon", "Served with roasted vegetables and quinoa", 14.95),
                    lunch_item("Tuesday", "Chicken Parmesan", "With fresh pasta and tomato sauce", 12.95),
                    lunch_item("Wednesday", "Vegetable Curry", "Served with basmati rice and naan bread", 11.95),
                    lunch_item("Thursday", "Beef Stroganoff", "With egg noodles and seasonal vegetables", 13.95),
                    lunch_item("Friday", "Fish Tacos", "With avocado, salsa, and cilantro-lime rice", 12.95),
                ],
            }],
        }
    }
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn category(id: &str, name: &str, description: &str, order: i64) -> MenuCategory {
    MenuCategory {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        order,
    }
}

fn tag(id: &str, name: &str, icon: &str) -> MenuTag {
    MenuTag {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
    }
}

fn member(id: &str, name: &str, position: &str, bio: &str, order: i64) -> TeamMember {
    TeamMember {
        id: id.to_string(),
        name: name.to_string(),
        position: position.to_string(),
        bio: Some(bio.to_string()),
        image: Some(format!("/images/team/{}.jpg", id)),
        order,
        socials: None,
        extra: serde_json::Map::new(),
    }
}

fn lunch_item(day: &str, name: &str, description: &str, price: f64) -> LunchMenuItem {
    LunchMenuItem {
        day: day.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price,
        order: 1,
    }
}
