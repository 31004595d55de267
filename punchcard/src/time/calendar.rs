//! Pure calendar arithmetic on wall-clock instants.
//!
//! Weekdays are counted numerically from Sunday, never through locale names.

use chrono::{Datelike, Days, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Distance from Sunday: Sunday = 0 .. Saturday = 6.
pub fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

/// Truncate minutes, seconds and sub-seconds.
pub fn start_of_hour(instant: NaiveDateTime) -> NaiveDateTime {
    start_of_day(instant) + Duration::hours(i64::from(instant.hour()))
}

/// Local midnight of the same day.
pub fn start_of_day(instant: NaiveDateTime) -> NaiveDateTime {
    instant.date().and_time(NaiveTime::MIN)
}

/// Midnight of the most recent Sunday (the same day when it is a Sunday).
pub fn start_of_week(instant: NaiveDateTime) -> NaiveDateTime {
    let date = instant.date();
    let sunday = date
        .checked_sub_days(Days::new(u64::from(weekday_index(date))))
        .unwrap_or(NaiveDate::MIN);
    sunday.and_time(NaiveTime::MIN)
}

/// Midnight on day 1 of the month.
pub fn start_of_month(instant: NaiveDateTime) -> NaiveDateTime {
    first_of_month(instant.date()).and_time(NaiveTime::MIN)
}

/// Midnight on January 1st.
pub fn start_of_year(instant: NaiveDateTime) -> NaiveDateTime {
    let date = instant.date();
    // Ordinal 1 exists in every year.
    date.with_ordinal(1).unwrap_or(date).and_time(NaiveTime::MIN)
}

/// Calendar-aware month addition; day-of-month is clamped to the target
/// month's length.
pub fn add_months(instant: NaiveDateTime, months: u32) -> Option<NaiveDateTime> {
    instant.checked_add_months(Months::new(months))
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    // Day 1 exists in every month.
    date.with_day(1).unwrap_or(date)
}

/// The first Sunday falling on or after day 1 of the month.
pub fn first_sunday_of_month(date: NaiveDate) -> NaiveDate {
    let first = first_of_month(date);
    let offset = (7 - weekday_index(first)) % 7;
    first
        .checked_add_days(Days::new(u64::from(offset)))
        .unwrap_or(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekday_index() {
        // 2020-05-03 was a Sunday
        assert_eq!(weekday_index(date(2020, 5, 3)), 0);
        assert_eq!(weekday_index(date(2020, 5, 1)), 5);
        assert_eq!(weekday_index(date(2020, 5, 9)), 6);
    }

    #[test]
    fn test_start_of_hour_and_day() {
        let t = at(2020, 5, 1, 13, 45, 12);
        assert_eq!(start_of_hour(t), at(2020, 5, 1, 13, 0, 0));
        assert_eq!(start_of_day(t), at(2020, 5, 1, 0, 0, 0));
    }

    #[test]
    fn test_start_of_week_goes_back_to_sunday() {
        assert_eq!(start_of_week(at(2020, 5, 1, 9, 0, 0)), at(2020, 4, 26, 0, 0, 0));
        assert_eq!(start_of_week(at(2020, 5, 3, 23, 0, 0)), at(2020, 5, 3, 0, 0, 0));
    }

    #[test]
    fn test_start_of_month_and_year() {
        let t = at(2020, 5, 19, 8, 0, 0);
        assert_eq!(start_of_month(t), at(2020, 5, 1, 0, 0, 0));
        assert_eq!(start_of_year(t), at(2020, 1, 1, 0, 0, 0));
    }

    #[test]
    fn test_add_months_respects_month_length() {
        assert_eq!(
            add_months(at(2020, 1, 31, 0, 0, 0), 1),
            Some(at(2020, 2, 29, 0, 0, 0))
        );
        assert_eq!(
            add_months(at(2020, 12, 1, 0, 0, 0), 1),
            Some(at(2021, 1, 1, 0, 0, 0))
        );
        assert_eq!(
            add_months(at(2020, 2, 29, 0, 0, 0), 12),
            Some(at(2021, 2, 28, 0, 0, 0))
        );
    }

    #[test]
    fn test_first_sunday_of_month() {
        // May 2020 starts on a Friday
        assert_eq!(first_sunday_of_month(date(2020, 5, 19)), date(2020, 5, 3));
        // March 2020 starts on a Sunday
        assert_eq!(first_sunday_of_month(date(2020, 3, 20)), date(2020, 3, 1));
    }
}
