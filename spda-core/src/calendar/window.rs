//! The 7-day `[after, before)` range shown by the calendar.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

use crate::client::EventFilter;

/// Number of day slots in a window.
pub const DAYS: usize = 7;

/// Day the calendar centres on, counted from `after`.
const FOCUS_OFFSET_DAYS: i64 = 3;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub after: DateTime<Utc>,
    pub before: DateTime<Utc>,
}

impl Window {
    /// A week starting at `after`.
    pub fn starting_at(after: DateTime<Utc>) -> Self {
        Window {
            after,
            before: after + Duration::days(DAYS as i64),
        }
    }

    /// Arbitrary bounds. `before = after + 7 days` is expected but not checked.
    pub fn new(after: DateTime<Utc>, before: DateTime<Utc>) -> Self {
        Window { after, before }
    }

    /// Both bounds moved by whole weeks (negative goes back in time).
    pub fn shifted(&self, weeks: i64) -> Self {
        let delta = Duration::days(DAYS as i64 * weeks);
        Window {
            after: self.after + delta,
            before: self.before + delta,
        }
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.after <= ts && ts < self.before
    }

    /// Slot for a timestamp: whole days elapsed since `after`, or `None` if
    /// that falls outside `0..7`.
    pub fn day_index(&self, ts: DateTime<Utc>) -> Option<usize> {
        let elapsed = (ts - self.after).num_milliseconds();
        let index = elapsed.div_euclid(MILLIS_PER_DAY);
        usize::try_from(index).ok().filter(|i| *i < DAYS)
    }

    /// Start of slot `index`.
    pub fn day_start(&self, index: usize) -> DateTime<Utc> {
        self.after + Duration::days(index as i64)
    }

    /// Day-of-month label for slot `index`, wrapping at the length of
    /// `after`'s month.
    pub fn day_number(&self, index: usize) -> u32 {
        let month_len = days_in_month(self.after.date_naive());
        ((index as u32 + self.after.day() - 1) % month_len) + 1
    }

    /// Middle of the window, used as the anchor when the calendar is
    /// reopened.
    pub fn focus(&self) -> DateTime<Utc> {
        self.after + Duration::days(FOCUS_OFFSET_DAYS)
    }

    /// Every event starting inside the window.
    pub fn filter(&self) -> EventFilter {
        EventFilter::between(self.after, self.before)
    }
}

pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn may_window() -> Window {
        Window::starting_at(at(2025, 5, 15, 8, 0))
    }

    #[test]
    fn week_bounds() {
        let window = may_window();
        assert_eq!(window.before, at(2025, 5, 22, 8, 0));
    }

    #[test]
    fn day_index_is_half_open() {
        let window = may_window();
        assert_eq!(window.day_index(window.after), Some(0));
        assert_eq!(window.day_index(at(2025, 5, 15, 9, 0)), Some(0));
        assert_eq!(window.day_index(at(2025, 5, 16, 7, 59)), Some(0));
        assert_eq!(window.day_index(at(2025, 5, 16, 8, 0)), Some(1));
        assert_eq!(window.day_index(at(2025, 5, 21, 23, 59)), Some(6));
        assert_eq!(window.day_index(window.before), None);
        assert!(!window.contains(window.before));
        assert!(window.contains(window.after));
    }

    #[test]
    fn events_before_the_window_have_no_slot() {
        let window = may_window();
        // Half a day early must not round towards zero into slot 0
        assert_eq!(window.day_index(at(2025, 5, 14, 20, 0)), None);
    }

    #[test]
    fn shifting_moves_both_bounds_by_a_week() {
        let window = may_window();
        let next = window.shifted(1);
        assert_eq!(next.after, at(2025, 5, 22, 8, 0));
        assert_eq!(next.before, at(2025, 5, 29, 8, 0));
        assert_eq!(next.shifted(-1), window);
    }

    #[test]
    fn day_numbers_inside_a_month() {
        let window = may_window();
        let numbers: Vec<u32> = (0..DAYS).map(|i| window.day_number(i)).collect();
        assert_eq!(numbers, vec![15, 16, 17, 18, 19, 20, 21]);
    }

    #[test]
    fn day_numbers_wrap_with_the_first_months_length() {
        let window = Window::starting_at(at(2025, 5, 29, 0, 0));
        let numbers: Vec<u32> = (0..DAYS).map(|i| window.day_number(i)).collect();
        assert_eq!(numbers, vec![29, 30, 31, 1, 2, 3, 4]);

        // February's 28 days are used even though the later slots are in March
        let window = Window::starting_at(at(2025, 2, 26, 0, 0));
        let numbers: Vec<u32> = (0..DAYS).map(|i| window.day_number(i)).collect();
        assert_eq!(numbers, vec![26, 27, 28, 1, 2, 3, 4]);

        // January has 31 days; the label keeps wrapping at 31 into February
        let window = Window::starting_at(at(2025, 1, 30, 0, 0));
        let numbers: Vec<u32> = (0..DAYS).map(|i| window.day_number(i)).collect();
        assert_eq!(numbers, vec![30, 31, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(NaiveDate::from_ymd_opt(2024, 2, 10).unwrap()), 29);
        assert_eq!(days_in_month(NaiveDate::from_ymd_opt(2025, 2, 10).unwrap()), 28);
        assert_eq!(days_in_month(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()), 31);
        assert_eq!(days_in_month(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()), 30);
    }

    #[test]
    fn focus_is_three_days_in() {
        assert_eq!(may_window().focus(), at(2025, 5, 18, 8, 0));
    }
}
