//! Calendar-month window construction.
//!
//! Months are represented as `NaiveDate`s pinned to day 1, so month
//! arithmetic is pure year/month math — no day counting, no drift
//! across months of different lengths.

use chrono::{Datelike, NaiveDate};

/// Build an ordered, contiguous window of calendar months around an
/// anchor date: from `months_back` months before the anchor's month
/// through `months_forward` months after it, inclusive.
///
/// `months_back` may be negative, which shifts the window's start past
/// the anchor (used for the forecast window). Year boundaries roll over
/// correctly in both directions.
#[must_use]
pub fn month_range(anchor: NaiveDate, months_back: i32, months_forward: i32) -> Vec<NaiveDate> {
    (-months_back..=months_forward)
        .map(|offset| shift_month(anchor, offset))
        .collect()
}

/// The first day of the month `offset` months away from `date`'s month.
#[must_use]
pub fn shift_month(date: NaiveDate, offset: i32) -> NaiveDate {
    let months = date.year() * 12 + date.month0() as i32 + offset;
    let year = months.div_euclid(12);
    let month = months.rem_euclid(12) as u32 + 1;
    // Day 1 exists in every month, so this cannot fail
    NaiveDate::from_ymd_opt(year, month, 1).unwrap()
}

/// `"YYYY-MM"` key for the month containing `date`.
#[must_use]
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Chart axis label for the month containing `date` (e.g., "Sep 2023").
#[must_use]
pub fn month_label(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}
