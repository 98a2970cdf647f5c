use crate::calendar::{days_in_month, leading_blanks, month_start, week_days};
use crate::models::{PrayerLog, PrayerName};
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DayTally {
    pub completed: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStatus {
    Full,
    Partial,
    /// Entries exist but none of them is completed.
    Missed,
    /// No entries at all for the day.
    Empty,
}

impl DayStatus {
    pub fn classify(tally: DayTally) -> Self {
        if tally.total == 0 {
            DayStatus::Empty
        } else if tally.completed >= tally.total {
            DayStatus::Full
        } else if tally.completed == 0 {
            DayStatus::Missed
        } else {
            DayStatus::Partial
        }
    }

    pub fn css_name(self) -> &'static str {
        match self {
            DayStatus::Full => "full",
            DayStatus::Partial => "partial",
            DayStatus::Missed => "none",
            DayStatus::Empty => "empty",
        }
    }

    pub fn label_key(self) -> &'static str {
        match self {
            DayStatus::Full => "status_full",
            DayStatus::Partial => "status_partial",
            DayStatus::Missed => "status_none",
            DayStatus::Empty => "status_empty",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub tally: DayTally,
    pub status: DayStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub first: NaiveDate,
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekRow {
    pub date: NaiveDate,
    /// Indexed by [`PrayerName::index`]; `None` when the backend had no entry.
    pub marks: [Option<bool>; 5],
    pub tally: DayTally,
}

pub fn tally_by_day(entries: &[PrayerLog]) -> BTreeMap<NaiveDate, DayTally> {
    let mut days: BTreeMap<NaiveDate, DayTally> = BTreeMap::new();
    for entry in entries {
        let tally = days.entry(entry.prayer_date).or_default();
        tally.total += 1;
        if entry.completed {
            tally.completed += 1;
        }
    }
    days
}

pub fn build_month(first: NaiveDate, entries: &[PrayerLog]) -> MonthGrid {
    let first = month_start(first);
    let tallies = tally_by_day(entries);

    let days = (0..days_in_month(first))
        .map(|offset| {
            let date = first + Duration::days(offset as i64);
            let tally = tallies.get(&date).copied().unwrap_or_default();
            CalendarDay {
                date,
                tally,
                status: DayStatus::classify(tally),
            }
        })
        .collect();

    MonthGrid {
        first,
        leading_blanks: leading_blanks(first),
        days,
    }
}

pub fn build_week(start: NaiveDate, entries: &[PrayerLog]) -> Vec<WeekRow> {
    week_days(start)
        .into_iter()
        .map(|date| {
            let mut marks = [None; 5];
            let mut tally = DayTally::default();
            for entry in entries.iter().filter(|entry| entry.prayer_date == date) {
                marks[entry.prayer_name.index()] = Some(entry.completed);
                tally.total += 1;
                if entry.completed {
                    tally.completed += 1;
                }
            }
            WeekRow { date, marks, tally }
        })
        .collect()
}

/// Per-prayer completion for one day, in display order.
pub fn day_breakdown(date: NaiveDate, entries: &[PrayerLog]) -> Vec<(PrayerName, Option<bool>)> {
    PrayerName::ALL
        .iter()
        .map(|prayer| {
            let done = entries
                .iter()
                .find(|entry| entry.prayer_date == date && entry.prayer_name == *prayer)
                .map(|entry| entry.completed);
            (*prayer, done)
        })
        .collect()
}
