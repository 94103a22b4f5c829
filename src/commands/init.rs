//! Initialize a new restaurant site

use anyhow::{bail, Result};
use std::fs;
use std::path::Path;

const CONFIG: &str = r#"# Menuboard Configuration

# Site
title: Trattoria
# IANA timezone used to pick the current lunch menu; empty = server local time
timezone: ''

# Base URL of the content API (used by `--remote`)
url: http://localhost:3000

# Directory
content_dir: content

# Fallback data served when a content directory or data file is missing
# or unreadable.
# Leave a kind out to keep the built-in sample data.
fallback_on_empty: false
# fallbacks:
#   tags:
#     - id: vegetarian
#       name: Vegetarian
#       icon: leaf
"#;

const CATEGORIES: &str = r#"categories:
  - id: pizza
    name: Pizza
    description: Our stone-baked pizzas
    order: 1
  - id: pasta
    name: Pasta
    description: Homemade pasta dishes
    order: 2
  - id: salads
    name: Salads
    description: Fresh seasonal salads
    order: 3
  - id: desserts
    name: Desserts
    description: Sweet treats
    order: 4
"#;

const TAGS: &str = r#"tags:
  - id: vegetarian
    name: Vegetarian
    icon: leaf
  - id: vegan
    name: Vegan
    icon: plant
  - id: spicy
    name: Spicy
    icon: fire
  - id: gluten-free
    name: Gluten-Free
    icon: wheat-slash
"#;

const ITEM_TEMPLATE: &str = r#"---
name:
description:
price: 0
category:
tags: []
image:
order:
---
"#;

const MENU_ITEMS: &[(&str, &str)] = &[
    (
        "margherita-pizza",
        r#"---
name: Margherita Pizza
description: Classic pizza with tomato sauce, mozzarella, and fresh basil
price: 13.40
category: pizza
tags: [vegetarian]
image: /images/menu/margherita-pizza.jpg
order: 1
---
"#,
    ),
    (
        "veggie-pizza",
        r#"---
name: Vegetable Supreme Pizza
description: Loaded with fresh seasonal vegetables, mushrooms, and our signature tomato sauce
price: 14.90
category: pizza
tags: [vegetarian, vegan]
image: /images/menu/veggie-pizza.jpg
order: 2
---
"#,
    ),
    (
        "carbonara-pasta",
        r#"---
name: Carbonara Pasta
description: Classic Italian pasta with pancetta, egg, pecorino romano, and black pepper
price: 12.90
category: pasta
tags: []
order: 1
---
"#,
    ),
    (
        "caesar-salad",
        r#"---
name: Caesar Salad
description: Romaine lettuce with Caesar dressing, croutons, and parmesan cheese
price: 9.90
category: salads
tags: [vegetarian]
order: 1
---
"#,
    ),
    (
        "tiramisu",
        r#"---
name: Tiramisu
description: Traditional Italian dessert with coffee-soaked ladyfingers and mascarpone cream
price: 6.90
category: desserts
tags: [vegetarian]
order: 1
---
"#,
    ),
];

const TEAM: &[(&str, &str)] = &[
    (
        "jane-doe",
        r#"---
name: Jane Doe
position: Head Chef
bio: Jane has 15 years of experience in the culinary world, specializing in Italian cuisine.
image: /images/team/jane-doe.jpg
order: 1
socials:
  instagram: "@janedoecooks"
---
"#,
    ),
    (
        "john-smith",
        r#"---
name: John Smith
position: Sous Chef
bio: John trained at the Culinary Institute of America and specializes in modern European cuisine.
image: /images/team/john-smith.jpg
order: 2
---
"#,
    ),
    (
        "maria-garcia",
        r#"---
name: Maria Garcia
position: Pastry Chef
bio: Maria is a master of sweet creations with a background in French pastry.
image: /images/team/maria-garcia.jpg
order: 3
---
"#,
    ),
];

const LUNCH_MENUS: &[(&str, &str)] = &[
    (
        "2025-03-11",
        r#"---
title: Current Week Lunch Menu
startDate: 2025-03-11
endDate: 2025-03-15
items:
  - day: Monday
    name: Grilled Salmon
    description: Served with roasted vegetables and quinoa
    price: 14.95
    order: 1
  - day: Wednesday
    name: Vegetable Curry
    description: Served with basmati rice and naan bread
    price: 11.95
    order: 1
---
"#,
    ),
    (
        "2025-03-18",
        r#"---
title: Spring Special Week
startDate: 2025-03-18
endDate: 2025-03-22
items:
  - day: Monday
    name: Mushroom Risotto
    description: Creamy arborio rice with seasonal mushrooms
    price: 9.90
    order: 1
  - day: Monday
    name: Tomato Soup
    description: Classic tomato soup with basil and croutons
    price: 6.90
    order: 2
  - day: Tuesday
    name: Chicken Curry
    description: Tender chicken pieces in a mild curry sauce with rice
    price: 10.90
    order: 1
  - day: Wednesday
    name: Beef Goulash
    description: Slow-cooked beef goulash with potatoes and vegetables
    price: 11.90
    order: 1
  - day: Thursday
    name: Fish & Chips
    description: Crispy fried fish with potato wedges and homemade tartar sauce
    price: 12.90
    order: 1
  - day: Friday
    name: Wiener Schnitzel
    description: Traditional breaded veal schnitzel with potato salad
    price: 13.90
    order: 1
---
"#,
    ),
];

/// Initialize a new site with sample content in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    if target_dir.join("_config.yml").exists() {
        bail!("{} already contains a _config.yml", target_dir.display());
    }

    let content = target_dir.join("content");
    for dir in [
        "menu/categories",
        "menu/tags",
        "menu/items",
        "team",
        "lunch-menus",
    ] {
        fs::create_dir_all(content.join(dir))?;
    }

    fs::write(target_dir.join("_config.yml"), CONFIG)?;
    fs::write(content.join("menu/categories/categories.yaml"), CATEGORIES)?;
    fs::write(content.join("menu/tags/tags.yaml"), TAGS)?;
    fs::write(content.join("menu/items/_template.md"), ITEM_TEMPLATE)?;

    for (dir, files) in [
        ("menu/items", MENU_ITEMS),
        ("team", TEAM),
        ("lunch-menus", LUNCH_MENUS),
    ] {
        for (name, text) in files {
            fs::write(content.join(dir).join(format!("{}.md", name)), text)?;
        }
    }

    tracing::debug!("Wrote sample content to {:?}", content);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Restaurant;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_site_content_resolves() {
        let temp = TempDir::new().unwrap();
        init_site(temp.path()).unwrap();

        let restaurant = Restaurant::new(temp.path()).unwrap();
        assert_eq!(restaurant.config.title, "Trattoria");
        let content = restaurant.local_content();

        assert_eq!(content.get_menu_categories().await.len(), 4);
        assert_eq!(content.get_menu_tags().await.len(), 4);
        // _template.md is not a menu item
        assert_eq!(content.get_menu_items(None, None).await.len(), 5);

        let team = content.get_team_members(None).await;
        assert_eq!(team[0].id, "jane-doe");
        assert_eq!(team[0].socials.as_ref().unwrap()["instagram"], "@janedoecooks");
        assert!(team.iter().all(|member| member.bio.is_some()));

        let spring = content
            .get_lunch_menu_on(NaiveDate::from_ymd_opt(2025, 3, 19).unwrap())
            .await
            .unwrap();
        assert_eq!(spring.title, "Spring Special Week");
        assert_eq!(spring.items_for_day("Monday").len(), 2);

        let later = content
            .get_lunch_menu_on(NaiveDate::from_ymd_opt(2027, 6, 1).unwrap())
            .await
            .unwrap();
        assert_eq!(later.id, "2025-03-18");
    }

    #[test]
    fn test_init_refuses_existing_site() {
        let temp = TempDir::new().unwrap();
        init_site(temp.path()).unwrap();
        assert!(init_site(temp.path()).is_err());
    }
}
