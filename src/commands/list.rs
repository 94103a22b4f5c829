//! List resolved content

use anyhow::Result;
use chrono::NaiveDate;

use crate::content::{ContentKind, LunchMenu};
use crate::{Restaurant, RestaurantContent};

/// Filters for `list`
#[derive(Debug, Default, Clone)]
pub struct ListOptions {
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub limit: Option<usize>,
    /// Resolve through the content API instead of the content directory
    pub remote: Option<String>,
}

fn content_for(restaurant: &Restaurant, remote: Option<&str>) -> RestaurantContent {
    match remote {
        Some(url) if url.is_empty() => restaurant.remote_content(None),
        Some(url) => restaurant.remote_content(Some(url)),
        None => restaurant.local_content(),
    }
}

/// List site content by type
pub async fn run(restaurant: &Restaurant, kind: ContentKind, options: &ListOptions) -> Result<()> {
    let content = content_for(restaurant, options.remote.as_deref());

    match kind {
        ContentKind::MenuCategories => {
            let categories = content.get_menu_categories().await;
            println!("Categories ({}):", categories.len());
            for category in categories {
                println!("  {:>3}  {} [{}]", category.order, category.name, category.id);
            }
        }
        ContentKind::MenuTags => {
            let tags = content.get_menu_tags().await;
            println!("Tags ({}):", tags.len());
            for tag in tags {
                println!("  {} [{}] {}", tag.name, tag.id, tag.icon);
            }
        }
        ContentKind::MenuItems => {
            let tags = (!options.tags.is_empty()).then_some(options.tags.as_slice());
            let items = content
                .get_menu_items(options.category.as_deref(), tags)
                .await;
            let items = crate::query::limit(items, options.limit);
            println!("Menu items ({}):", items.len());
            for item in items {
                println!(
                    "  {:>3}  {} - {:.2} [{}] {}",
                    item.order,
                    item.name,
                    item.price,
                    item.category,
                    item.tags.join(", ")
                );
            }
        }
        ContentKind::TeamMembers => {
            let members = content.get_team_members(options.limit).await;
            println!("Team members ({}):", members.len());
            for member in members {
                println!("  {:>3}  {} - {} [{}]", member.order, member.name, member.position, member.id);
            }
        }
        ContentKind::LunchMenus => {
            let menu = content.get_latest_lunch_menu().await;
            print_lunch_menu(menu.as_ref());
        }
    }

    Ok(())
}

/// Show the lunch menu active on `date` (today when `None`)
pub async fn lunch(
    restaurant: &Restaurant,
    date: Option<NaiveDate>,
    remote: Option<&str>,
) -> Result<()> {
    let content = content_for(restaurant, remote);
    let menu = match date {
        Some(date) => content.get_lunch_menu_on(date).await,
        None => content.get_latest_lunch_menu().await,
    };
    print_lunch_menu(menu.as_ref());
    Ok(())
}

fn print_lunch_menu(menu: Option<&LunchMenu>) {
    let Some(menu) = menu else {
        println!("No lunch menu available.");
        return;
    };

    println!("{} ({} - {})", menu.title, menu.start_date, menu.end_date);

    let mut days: Vec<&str> = Vec::new();
    for item in &menu.items {
        if !days.contains(&item.day.as_str()) {
            days.push(&item.day);
        }
    }

    for day in days {
        println!("  {}:", day);
        for item in menu.items_for_day(day) {
            println!("    {} - {:.2}", item.name, item.price);
            if !item.description.is_empty() {
                println!("      {}", item.description);
            }
        }
    }
}
