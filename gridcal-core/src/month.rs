//! The month currently shown in the grid.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{GridcalError, GridcalResult};

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A displayed month: year plus zero-based month index (0 = January).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthCursor {
    pub year: i32,
    pub month0: u32,
}

impl MonthCursor {
    /// Validates the month index and keeps the year within chrono's date range.
    pub fn new(year: i32, month0: u32) -> GridcalResult<Self> {
        if month0 > 11 {
            return Err(GridcalError::Validation(format!(
                "Month index {} out of range (expected 0-11)",
                month0
            )));
        }
        if !(NaiveDate::MIN.year()..=NaiveDate::MAX.year()).contains(&year) {
            return Err(GridcalError::Validation(format!("Year {} out of range", year)));
        }
        Ok(MonthCursor { year, month0 })
    }

    /// The month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        MonthCursor {
            year: date.year(),
            month0: date.month0(),
        }
    }

    /// The previous month, wrapping January back to December.
    pub fn prev(self) -> Self {
        if self.month0 == 0 {
            MonthCursor {
                year: self.year - 1,
                month0: 11,
            }
        } else {
            MonthCursor {
                year: self.year,
                month0: self.month0 - 1,
            }
        }
    }

    /// The next month, wrapping December forward to January.
    pub fn next(self) -> Self {
        if self.month0 == 11 {
            MonthCursor {
                year: self.year + 1,
                month0: 0,
            }
        } else {
            MonthCursor {
                year: self.year,
                month0: self.month0 + 1,
            }
        }
    }

    /// Move by a signed number of months.
    pub fn shift(self, months: i64) -> GridcalResult<Self> {
        let out_of_range =
            || GridcalError::Validation(format!("Cannot move {} by {} months", self, months));

        let total = (i64::from(self.year) * 12 + i64::from(self.month0))
            .checked_add(months)
            .ok_or_else(out_of_range)?;
        let year = i32::try_from(total.div_euclid(12)).map_err(|_| out_of_range())?;
        MonthCursor::new(year, total.rem_euclid(12) as u32).map_err(|_| out_of_range())
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, 1)
    }

    pub fn name(&self) -> &'static str {
        MONTH_NAMES[self.month0 as usize]
    }

    /// Header title, e.g. "March 2024".
    pub fn title(&self) -> String {
        format!("{} {}", self.name(), self.year)
    }
}

impl fmt::Display for MonthCursor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month0 + 1)
    }
}

impl FromStr for MonthCursor {
    type Err = GridcalError;

    /// Parse `YYYY-MM` (one-based month).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid =
            || GridcalError::Validation(format!("Invalid month '{}'. Expected YYYY-MM", s));

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        MonthCursor::new(year, month - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_wraps_year_boundaries() {
        let jan = MonthCursor::new(2024, 0).unwrap();
        assert_eq!(jan.prev(), MonthCursor::new(2023, 11).unwrap());
        assert_eq!(jan.prev().next(), jan);

        let dec = MonthCursor::new(2024, 11).unwrap();
        assert_eq!(dec.next(), MonthCursor::new(2025, 0).unwrap());
    }

    #[test]
    fn shift_matches_repeated_steps() {
        let start = MonthCursor::new(2024, 1).unwrap();
        let mut stepped = start;
        for _ in 0..14 {
            stepped = stepped.next();
        }
        assert_eq!(start.shift(14).unwrap(), stepped);
        assert_eq!(start.shift(-3).unwrap(), MonthCursor::new(2023, 10).unwrap());
        assert_eq!(start.shift(0).unwrap(), start);
    }

    #[test]
    fn shift_past_supported_years_is_an_error() {
        let last = MonthCursor::new(NaiveDate::MAX.year(), 11).unwrap();
        assert!(matches!(last.shift(1), Err(GridcalError::Validation(_))));
        assert!(matches!(last.shift(i64::MAX), Err(GridcalError::Validation(_))));
        assert_eq!(
            last.shift(-1).unwrap(),
            MonthCursor::new(NaiveDate::MAX.year(), 10).unwrap()
        );

        let first = MonthCursor::new(NaiveDate::MIN.year(), 0).unwrap();
        assert!(matches!(first.shift(i64::MIN), Err(GridcalError::Validation(_))));
        assert!(first.shift(3_000_000_000).is_err());
    }

    #[test]
    fn huge_years_are_rejected_when_parsing() {
        assert!(matches!(
            "2147483647-01".parse::<MonthCursor>(),
            Err(GridcalError::Validation(_))
        ));
        assert!("-2147483648-01".parse::<MonthCursor>().is_err());
    }

    #[test]
    fn title_uses_month_name() {
        assert_eq!(MonthCursor::new(2024, 2).unwrap().title(), "March 2024");
    }

    #[test]
    fn parses_year_month() {
        let cursor: MonthCursor = "2024-02".parse().unwrap();
        assert_eq!(cursor, MonthCursor::new(2024, 1).unwrap());
        assert_eq!(cursor.to_string(), "2024-02");
        assert!("2024-13".parse::<MonthCursor>().is_err());
        assert!("March".parse::<MonthCursor>().is_err());
    }

    #[test]
    fn rejects_out_of_range_index() {
        assert!(MonthCursor::new(2024, 12).is_err());
    }
}
