//! Calendar classification: seasons and festival windows
//!
//! Everything here is a pure function of a date.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Demand season derived from the calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    /// March to June
    Summer,
    /// July to September
    Monsoon,
    /// October to December
    Winter,
    /// January and February
    Spring,
}

impl Season {
    /// Classify a date
    pub fn for_date(date: NaiveDate) -> Self {
        match date.month() {
            3..=6 => Season::Summer,
            7..=9 => Season::Monsoon,
            10..=12 => Season::Winter,
            _ => Season::Spring,
        }
    }

    /// Lower-case label used in records and tables
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Summer => "summer",
            Season::Monsoon => "monsoon",
            Season::Winter => "winter",
            Season::Spring => "spring",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A month/day pair independent of year
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl MonthDay {
    pub const fn new(month: u32, day: u32) -> Self {
        Self { month, day }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self::new(date.month(), date.day())
    }
}

/// Inclusive calendar range during which demand is boosted
///
/// A window whose start falls after its end wraps over the new year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FestivalWindow {
    pub name: String,
    pub start: MonthDay,
    pub end: MonthDay,
}

impl FestivalWindow {
    pub fn new(name: &str, start: MonthDay, end: MonthDay) -> Self {
        Self {
            name: name.to_string(),
            start,
            end,
        }
    }

    /// Whether `date` falls inside the window
    pub fn contains(&self, date: NaiveDate) -> bool {
        let md = MonthDay::of(date);
        if self.start <= self.end {
            self.start <= md && md <= self.end
        } else {
            md >= self.start || md <= self.end
        }
    }
}

/// Festival windows of the Indian retail calendar
pub fn default_festival_windows() -> Vec<FestivalWindow> {
    vec![
        FestivalWindow::new("Holi", MonthDay::new(2, 25), MonthDay::new(3, 15)),
        FestivalWindow::new("Navratri", MonthDay::new(9, 25), MonthDay::new(10, 15)),
        FestivalWindow::new("Diwali", MonthDay::new(10, 15), MonthDay::new(11, 15)),
        FestivalWindow::new("Wedding season", MonthDay::new(11, 1), MonthDay::new(12, 31)),
    ]
}

/// Whether any of `windows` contains `date`
pub fn is_festival_period(date: NaiveDate, windows: &[FestivalWindow]) -> bool {
    windows.iter().any(|window| window.contains(date))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_season_boundaries() {
        assert_eq!(Season::for_date(date(2024, 2, 29)), Season::Spring);
        assert_eq!(Season::for_date(date(2024, 3, 1)), Season::Summer);
        assert_eq!(Season::for_date(date(2024, 6, 30)), Season::Summer);
        assert_eq!(Season::for_date(date(2024, 7, 1)), Season::Monsoon);
        assert_eq!(Season::for_date(date(2024, 10, 1)), Season::Winter);
        assert_eq!(Season::for_date(date(2024, 1, 1)), Season::Spring);
    }

    #[test]
    fn test_festival_windows() {
        let windows = default_festival_windows();
        assert!(is_festival_period(date(2024, 2, 25), &windows));
        assert!(!is_festival_period(date(2024, 2, 24), &windows));
        assert!(is_festival_period(date(2024, 3, 15), &windows));
        assert!(!is_festival_period(date(2024, 3, 16), &windows));
        assert!(is_festival_period(date(2024, 10, 20), &windows));
        assert!(is_festival_period(date(2024, 12, 31), &windows));
        assert!(!is_festival_period(date(2024, 7, 10), &windows));
    }

    #[test]
    fn test_window_wrapping_new_year() {
        let window = FestivalWindow::new("Year end", MonthDay::new(12, 20), MonthDay::new(1, 5));
        assert!(window.contains(date(2024, 12, 25)));
        assert!(window.contains(date(2025, 1, 3)));
        assert!(!window.contains(date(2025, 1, 6)));
        assert!(!window.contains(date(2024, 12, 19)));
    }

    #[test]
    fn test_season_serializes_lowercase() {
        let json = serde_json::to_string(&Season::Monsoon).unwrap();
        assert_eq!(json, "\"monsoon\"");
    }
}
