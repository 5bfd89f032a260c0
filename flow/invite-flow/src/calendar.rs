//! Month grid for the date picker
//!
//! Weeks start on Monday. Cells before the first and after the last day of
//! the month are blank so every row has exactly seven cells.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::error::{FlowError, Result};

/// Short month names as shown in the picker header
pub const MONTH_NAMES: [&str; 12] = [
    "Янв", "Фев", "Мар", "Апр", "Май", "Июн", "Июл", "Авг", "Сен", "Окт", "Ноя", "Дек",
];

/// Short weekday names, Monday first
pub const WEEKDAY_NAMES: [&str; 7] = ["Пн", "Вт", "Ср", "Чт", "Пт", "Сб", "Вс"];

/// One row of the grid; `None` cells are blank
pub type Week = [Option<u32>; 7];

/// The month currently displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthCursor {
    year: i32,
    month: u32,
}

impl MonthCursor {
    /// Cursor for `month` (1-12) of `year`
    pub fn new(year: i32, month: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|_| Self { year, month })
            .ok_or_else(|| FlowError::InvalidMonth(format!("{year:04}-{month:02}")))
    }

    /// Month containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Number of days in the month
    pub fn days(&self) -> u32 {
        self.next()
            .first_day()
            .pred_opt()
            .map_or(31, |last| last.day())
    }

    /// Blank cells before day 1 (Monday = 0)
    pub fn leading_blanks(&self) -> u32 {
        self.first_day().weekday().num_days_from_monday()
    }

    /// Rows of the month grid
    pub fn weeks(&self) -> Vec<Week> {
        let blanks = self.leading_blanks() as usize;
        let cells: Vec<Option<u32>> = std::iter::repeat_n(None, blanks)
            .chain((1..=self.days()).map(Some))
            .collect();

        cells
            .chunks(7)
            .map(|chunk| {
                let mut week = [None; 7];
                week[..chunk.len()].copy_from_slice(chunk);
                week
            })
            .collect()
    }

    /// Previous month, wrapping into the previous year
    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Next month, wrapping into the next year
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Date for a tapped cell; blank or out-of-range cells pick nothing
    pub fn pick(&self, day: Option<u32>) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day?)
    }

    /// Header text, e.g. "Фев 2026"
    pub fn title(&self) -> String {
        format!("{} {}", MONTH_NAMES[(self.month - 1) as usize], self.year)
    }
}

impl fmt::Display for MonthCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthCursor {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || FlowError::InvalidMonth(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse().map_err(|_| invalid())?;
        let month = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

/// Format a date as `YYYY-MM-DD`
pub fn format_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_iso(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| FlowError::InvalidDate(s.to_string()))
}
