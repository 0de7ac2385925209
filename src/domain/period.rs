//! Calendar-relative windows used to scope aggregate queries.

use std::fmt;

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Enumerates the stat screens' reporting windows.
pub enum StatsPeriod {
    ThisMonth,
    Last3Months,
    ThisYear,
    All,
}

impl StatsPeriod {
    /// Lower bound of the window relative to `now`, `None` for `All`.
    ///
    /// Boundaries are calendar-based: start of the current month, `now`
    /// minus three calendar months, start of the current year.
    pub fn start(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            StatsPeriod::ThisMonth => {
                let first = now.date_naive().with_day(1).unwrap();
                Some(start_of_day(first))
            }
            StatsPeriod::Last3Months => {
                let shifted = shift_month(now.date_naive(), -3);
                Some(Utc.from_utc_datetime(&shifted.and_time(now.time())))
            }
            StatsPeriod::ThisYear => {
                let first = NaiveDate::from_ymd_opt(now.year(), 1, 1).unwrap();
                Some(start_of_day(first))
            }
            StatsPeriod::All => None,
        }
    }

    /// True when `date` falls inside the window anchored at `now`.
    pub fn contains(self, date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        self.start(now).map_or(true, |start| date >= start)
    }
}

impl fmt::Display for StatsPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StatsPeriod::ThisMonth => "This month",
            StatsPeriod::Last3Months => "Last 3 months",
            StatsPeriod::ThisYear => "This year",
            StatsPeriod::All => "All time",
        };
        f.write_str(label)
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap())
}

/// Shifts a date by whole calendar months, clamping the day to the target
/// month's length.
pub fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    let mut day = date.day();
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    day = day.min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap()
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    let last_current = first_next - Duration::days(1);
    last_current.day()
}
