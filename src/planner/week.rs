//! Current-week label (`dd.mm - dd.mm`, Monday to Sunday)

use chrono::{Datelike, Days, NaiveDate};

/// Monday and Sunday of the week containing `day`
pub fn week_bounds(day: NaiveDate) -> (NaiveDate, NaiveDate) {
    let from_monday = u64::from(day.weekday().num_days_from_monday());
    let monday = day - Days::new(from_monday);
    let sunday = monday + Days::new(6);
    (monday, sunday)
}

/// Label for the week containing `day`, e.g. `29.12 - 04.01`
pub fn week_label(day: NaiveDate) -> String {
    let (monday, sunday) = week_bounds(day);
    format!("{} - {}", monday.format("%d.%m"), sunday.format("%d.%m"))
}

/// Today's date in the user's local time zone
#[cfg(target_arch = "wasm32")]
pub fn today() -> Option<NaiveDate> {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn today() -> Option<NaiveDate> {
    Some(chrono::Local::now().date_naive())
}

/// Label for the current week, empty if the clock is unavailable
pub fn current_week_label() -> String {
    today().map(week_label).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_midweek() {
        // Thursday
        assert_eq!(week_label(date(2026, 10, 15)), "12.10 - 18.10");
    }

    #[test]
    fn test_monday_and_sunday_stay_in_their_week() {
        assert_eq!(week_label(date(2026, 10, 12)), "12.10 - 18.10");
        assert_eq!(week_label(date(2026, 10, 18)), "12.10 - 18.10");
        assert_eq!(week_label(date(2026, 10, 19)), "19.10 - 25.10");
    }

    #[test]
    fn test_crosses_year_boundary() {
        assert_eq!(week_label(date(2026, 1, 1)), "29.12 - 04.01");
    }

    #[test]
    fn test_current_week_label_shape() {
        let label = current_week_label();
        assert_eq!(label.len(), "dd.mm - dd.mm".len());
    }
}
