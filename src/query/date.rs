//! Calendar-date helpers for lunch menu selection

use chrono::{Local, NaiveDate, Utc};
use chrono_tz::Tz;

/// Parse an IANA timezone name such as `Europe/Vienna`.
///
/// Empty means "server local time" and returns `None` silently; an unknown
/// name is logged and also falls back to local time.
pub fn parse_timezone(name: &str) -> Option<Tz> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    match name.parse::<Tz>() {
        Ok(tz) => Some(tz),
        Err(e) => {
            tracing::warn!("Unknown timezone {:?} ({}), using server local time", name, e);
            None
        }
    }
}

/// Today's date in `tz`, or in the server's local timezone
pub fn today(tz: Option<Tz>) -> NaiveDate {
    match tz {
        Some(tz) => Utc::now().with_timezone(&tz).date_naive(),
        None => Local::now().date_naive(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timezone() {
        assert_eq!(parse_timezone("Europe/Vienna"), Some(chrono_tz::Europe::Vienna));
        assert_eq!(parse_timezone(""), None);
        assert_eq!(parse_timezone("Mars/Olympus_Mons"), None);
    }

    #[test]
    fn test_today_in_zones_is_within_a_day() {
        let east = today(Some(chrono_tz::Pacific::Kiritimati));
        let west = today(Some(chrono_tz::Pacific::Pago_Pago));
        let diff = (east - west).num_days();
        assert!((0..=2).contains(&diff));
    }
}
