//! Calendar arithmetic for treatment planning.
//!
//! Date-only comparisons: whole-day spans, a calendar month/day
//! breakdown, and target-date addition.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Span between two dates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateSpan {
    /// Signed whole days from start to end
    pub total_days: i64,
    /// Calendar months in the breakdown (magnitude)
    pub months: u32,
    /// Remaining days in the breakdown (magnitude)
    pub days: u32,
    /// End precedes start
    pub negative: bool,
}

impl DateSpan {
    /// Breakdown as e.g. "2 months, 0 days", marked when negative.
    pub fn breakdown_label(&self) -> String {
        let label = format!(
            "{} month{}, {} day{}",
            self.months,
            if self.months == 1 { "" } else { "s" },
            self.days,
            if self.days == 1 { "" } else { "s" },
        );
        if self.negative {
            format!("negative duration ({})", label)
        } else {
            label
        }
    }
}

/// Whole-day and calendar breakdown between two dates.
///
/// The breakdown borrows days from the month preceding the end date when
/// the end day-of-month is smaller than the start's. A reversed pair
/// yields the magnitude breakdown with the negative flag set, never a
/// silently swapped result.
pub fn span_between(start: NaiveDate, end: NaiveDate) -> DateSpan {
    let total_days = (end - start).num_days();
    let negative = total_days < 0;
    let (from, to) = if negative { (end, start) } else { (start, end) };

    // Month count by calendar position, stepped back once when the
    // day-of-month deficit borrows from the month before the end date.
    // Adding months clamps to the end of a short month, so a 31st start
    // lands on Feb 29 rather than overshooting.
    let mut months =
        ((to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32)).max(0) as u32;
    let mut anchor = add_months(from, months);
    if anchor > to {
        months = months.saturating_sub(1);
        anchor = add_months(from, months);
    }
    let days = (to - anchor).num_days().max(0) as u32;

    DateSpan {
        total_days,
        months,
        days,
        negative,
    }
}

fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months)).unwrap_or(date)
}

/// Start date plus a whole number of days (may be negative).
pub fn target_date(start: NaiveDate, duration_days: i64) -> Option<NaiveDate> {
    if duration_days >= 0 {
        start.checked_add_days(Days::new(duration_days as u64))
    } else {
        start.checked_sub_days(Days::new(duration_days.unsigned_abs()))
    }
}

/// Render a target date as e.g. "Monday, March 4, 2024".
pub fn format_target_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_leap_year_span() {
        let span = span_between(date(2024, 1, 1), date(2024, 3, 1));
        assert_eq!(span.total_days, 60);
        assert_eq!(span.months, 2);
        assert_eq!(span.days, 0);
        assert!(!span.negative);
        assert_eq!(span.breakdown_label(), "2 months, 0 days");
    }

    #[test]
    fn test_breakdown_borrows_days() {
        // Jan 31 -> Mar 1: borrow from February (29 days in 2024)
        let span = span_between(date(2024, 1, 31), date(2024, 3, 1));
        assert_eq!(span.total_days, 30);
        assert_eq!(span.months, 1);
        assert_eq!(span.days, 1);
    }

    #[test]
    fn test_same_day_span() {
        let span = span_between(date(2024, 5, 10), date(2024, 5, 10));
        assert_eq!(span.total_days, 0);
        assert_eq!(span.breakdown_label(), "0 months, 0 days");
    }

    #[test]
    fn test_negative_span() {
        let span = span_between(date(2024, 3, 1), date(2024, 1, 1));
        assert_eq!(span.total_days, -60);
        assert!(span.negative);
        assert_eq!(span.months, 2);
        assert_eq!(span.days, 0);
        assert_eq!(span.breakdown_label(), "negative duration (2 months, 0 days)");
    }

    #[test]
    fn test_singular_label() {
        let span = span_between(date(2024, 1, 1), date(2024, 2, 2));
        assert_eq!(span.breakdown_label(), "1 month, 1 day");
    }

    #[test]
    fn test_target_date() {
        let target = target_date(date(2024, 2, 27), 3).unwrap();
        assert_eq!(target, date(2024, 3, 1));
        assert_eq!(format_target_date(target), "Friday, March 1, 2024");
    }

    #[test]
    fn test_target_date_negative_duration() {
        let target = target_date(date(2024, 3, 1), -3).unwrap();
        assert_eq!(target, date(2024, 2, 27));
    }
}
