//! Query engine - filter, sort, limit and select over loaded records
//!
//! Every function here is pure: it takes a loaded set and returns a
//! projection of it, never failing.

mod date;

pub use date::{parse_timezone, today};

use chrono::NaiveDate;

use crate::content::{LunchMenu, MenuItem};

/// Records with an explicit display position
pub trait Ordered {
    fn order(&self) -> i64;
}

/// Keep items in `category_id`; `None` keeps everything.
pub fn filter_by_category(items: Vec<MenuItem>, category_id: Option<&str>) -> Vec<MenuItem> {
    match category_id {
        None => items,
        Some(category_id) => items
            .into_iter()
            .filter(|item| item.category == category_id)
            .collect(),
    }
}

/// Keep items carrying every tag in `tag_ids`; `None` or an empty slice
/// keeps everything.
pub fn filter_by_tags<S: AsRef<str>>(items: Vec<MenuItem>, tag_ids: Option<&[S]>) -> Vec<MenuItem> {
    let tag_ids = match tag_ids {
        Some(tag_ids) if !tag_ids.is_empty() => tag_ids,
        _ => return items,
    };

    items
        .into_iter()
        .filter(|item| {
            tag_ids
                .iter()
                .all(|tag| item.tags.iter().any(|t| t == tag.as_ref()))
        })
        .collect()
}

/// Stable ascending sort on the order field; equal orders keep their
/// original relative position.
pub fn sort_by_order<T: Ordered>(mut records: Vec<T>) -> Vec<T> {
    records.sort_by_key(|record| record.order());
    records
}

/// First `n` records; `None` or zero keeps everything.
pub fn limit<T>(mut records: Vec<T>, n: Option<usize>) -> Vec<T> {
    if let Some(n) = n.filter(|n| *n > 0) {
        records.truncate(n);
    }
    records
}

/// Among the menus whose range contains `as_of`, the one that started most
/// recently; without such a menu, the one that started most recently
/// overall. Equal start dates keep the first in `menus`. `None` only when
/// `menus` is empty.
///
/// The answer does not depend on the order of `menus` beyond that tie, so a
/// newest-first listing and a file-name-ordered one select the same menu.
pub fn select_active_lunch_menu(menus: &[LunchMenu], as_of: NaiveDate) -> Option<&LunchMenu> {
    latest_started(menus.iter().filter(|menu| menu.contains(as_of)))
        .or_else(|| latest_started(menus.iter()))
}

fn latest_started<'a>(menus: impl Iterator<Item = &'a LunchMenu>) -> Option<&'a LunchMenu> {
    menus.fold(None, |latest: Option<&LunchMenu>, menu| match latest {
        Some(current) if current.start_date >= menu.start_date => Some(current),
        _ => Some(menu),
    })
}

/// Lunch menus with the most recent start date first
pub fn sort_lunch_menus_newest_first(mut menus: Vec<LunchMenu>) -> Vec<LunchMenu> {
    menus.sort_by(|a, b| b.start_date.cmp(&a.start_date));
    menus
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::DEFAULT_ORDER;

    fn item(id: &str, category: &str, tags: &[&str], order: i64) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            price: 10.0,
            category: category.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            image: None,
            order,
        }
    }

    fn sample_items() -> Vec<MenuItem> {
        vec![
            item("margherita", "pizza", &["vegetarian"], 1),
            item("veggie", "pizza", &["vegetarian", "vegan"], 2),
            item("diavola", "pizza", &["spicy"], DEFAULT_ORDER),
            item("arrabbiata", "pasta", &["vegan", "spicy", "vegetarian"], 1),
            item("carbonara", "pasta", &[], 2),
        ]
    }

    fn ids(items: &[MenuItem]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    fn menu(title: &str, start: (i32, u32, u32), end: (i32, u32, u32)) -> LunchMenu {
        LunchMenu {
            id: title.to_lowercase().replace(' ', "-"),
            title: title.to_string(),
            start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
            items: Vec::new(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_filter_by_category() {
        let items = sample_items();
        assert_eq!(filter_by_category(items.clone(), None), items);
        assert_eq!(
            ids(&filter_by_category(items.clone(), Some("pasta"))),
            vec!["arrabbiata", "carbonara"]
        );
        assert!(filter_by_category(items, Some("Pasta")).is_empty());
    }

    #[test]
    fn test_filter_by_tags_requires_all_tags() {
        let items = sample_items();
        assert_eq!(filter_by_tags::<&str>(items.clone(), None), items);
        assert_eq!(filter_by_tags::<&str>(items.clone(), Some(&[][..])), items);
        assert_eq!(
            ids(&filter_by_tags(items.clone(), Some(&["vegan", "vegetarian"][..]))),
            vec!["veggie", "arrabbiata"]
        );
        assert_eq!(
            ids(&filter_by_tags(items, Some(&["vegan", "spicy"][..]))),
            vec!["arrabbiata"]
        );
    }

    #[test]
    fn test_more_tags_never_grow_the_result() {
        let items = sample_items();
        let requested = ["vegetarian", "vegan", "spicy", "gluten-free"];
        let mut previous = items.len();
        for n in 1..=requested.len() {
            let count = filter_by_tags(items.clone(), Some(&requested[..n])).len();
            assert!(count <= previous, "{} tags gave {} > {}", n, count, previous);
            previous = count;
        }
        assert_eq!(previous, 0);
    }

    #[test]
    fn test_sort_by_order_is_stable() {
        let sorted = sort_by_order(sample_items());
        assert_eq!(
            ids(&sorted),
            vec!["margherita", "arrabbiata", "veggie", "carbonara", "diavola"]
        );

        let same: Vec<_> = (0..20)
            .map(|i| item(&format!("dish-{i:02}"), "pizza", &[], i % 3))
            .collect();
        let sorted = sort_by_order(same);
        for pair in sorted.windows(2) {
            assert!(
                pair[0].order < pair[1].order
                    || (pair[0].order == pair[1].order && pair[0].id < pair[1].id)
            );
        }
    }

    #[test]
    fn test_limit() {
        let items = sample_items();
        assert_eq!(limit(items.clone(), None).len(), 5);
        assert_eq!(limit(items.clone(), Some(0)).len(), 5);
        assert_eq!(ids(&limit(items.clone(), Some(2))), vec!["margherita", "veggie"]);
        assert_eq!(limit(items, Some(50)).len(), 5);
    }

    #[test]
    fn test_select_active_lunch_menu() {
        let menus = vec![
            menu("Current Week", (2025, 3, 11), (2025, 3, 15)),
            menu("Spring Special Week", (2025, 3, 18), (2025, 3, 22)),
            menu("Easter Week", (2025, 4, 14), (2025, 4, 18)),
        ];

        for day in 18..=22 {
            let active = select_active_lunch_menu(&menus, date(2025, 3, day)).unwrap();
            assert_eq!(active.title, "Spring Special Week");
        }

        let after_all = select_active_lunch_menu(&menus, date(2026, 1, 1)).unwrap();
        assert_eq!(after_all.title, "Easter Week");

        // Gap between two weeks falls back to the latest start as well
        let gap = select_active_lunch_menu(&menus, date(2025, 3, 16)).unwrap();
        assert_eq!(gap.title, "Easter Week");

        assert!(select_active_lunch_menu(&[], date(2025, 3, 18)).is_none());
    }

    #[test]
    fn test_overlapping_ranges_pick_latest_start() {
        let menus = vec![
            menu("Week A", (2025, 3, 17), (2025, 3, 21)),
            menu("Week B", (2025, 3, 19), (2025, 3, 23)),
        ];
        let active = select_active_lunch_menu(&menus, date(2025, 3, 20)).unwrap();
        assert_eq!(active.title, "Week B");

        // Only Week A covers the 18th
        let active = select_active_lunch_menu(&menus, date(2025, 3, 18)).unwrap();
        assert_eq!(active.title, "Week A");

        let newest_first = sort_lunch_menus_newest_first(menus.clone());
        for day in 14..=26 {
            assert_eq!(
                select_active_lunch_menu(&menus, date(2025, 3, day)).map(|m| &m.id),
                select_active_lunch_menu(&newest_first, date(2025, 3, day)).map(|m| &m.id),
                "2025-03-{day}"
            );
        }
    }

    #[test]
    fn test_same_start_keeps_first() {
        let menus = vec![
            menu("Lunch", (2025, 3, 17), (2025, 3, 21)),
            menu("Dinner", (2025, 3, 17), (2025, 3, 23)),
        ];
        let active = select_active_lunch_menu(&menus, date(2025, 3, 20)).unwrap();
        assert_eq!(active.title, "Lunch");
        // sort_by is stable, so a newest-first listing keeps the tie too
        let sorted = sort_lunch_menus_newest_first(menus);
        assert_eq!(select_active_lunch_menu(&sorted, date(2025, 3, 20)).unwrap().title, "Lunch");
    }

    #[test]
    fn test_sort_lunch_menus_newest_first() {
        let menus = vec![
            menu("Old", (2025, 1, 6), (2025, 1, 10)),
            menu("New", (2025, 3, 18), (2025, 3, 22)),
        ];
        let sorted = sort_lunch_menus_newest_first(menus);
        assert_eq!(sorted[0].title, "New");
    }
}
