//! Work-week labels
//!
//! Maintenance periods are labelled with the ISO-8601 week of the check
//! date, formatted as `YYYY-WWnn`. The year part is the ISO week-year, not
//! the calendar year, so a check on 30 December can land in week 1 of the
//! following year and one on 2 January in the last week of the previous
//! year. Every caller that needs a period label goes through here so the
//! dashboard, the weekly form and log creation all agree on week
//! boundaries.

use chrono::{Datelike, NaiveDate, Utc};

/// Work-week label for a given date, e.g. "2025-WW14"
pub fn work_week_label(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("{}-WW{:02}", iso.year(), iso.week())
}

/// Work-week label for today
pub fn current_work_week() -> String {
    work_week_label(Utc::now().date_naive())
}
