use chrono::{Datelike, Duration, NaiveDate};

/// Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

pub fn shift_weeks(start: NaiveDate, weeks: i64) -> NaiveDate {
    start + Duration::days(7 * weeks)
}

pub fn week_days(start: NaiveDate) -> Vec<NaiveDate> {
    (0..7).map(|offset| start + Duration::days(offset)).collect()
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn shift_months(first: NaiveDate, months: i32) -> NaiveDate {
    let index = first.year() * 12 + first.month0() as i32 + months;
    NaiveDate::from_ymd_opt(index.div_euclid(12), index.rem_euclid(12) as u32 + 1, 1)
        .unwrap_or(first)
}

pub fn days_in_month(first: NaiveDate) -> u32 {
    let first = month_start(first);
    (shift_months(first, 1) - first).num_days() as u32
}

/// Blank cells before the 1st in a Sunday-first grid.
pub fn leading_blanks(first: NaiveDate) -> u32 {
    month_start(first).weekday().num_days_from_sunday()
}
