//! Two-field `HH:MM` time entry

use chrono::NaiveTime;

use crate::error::{FlowError, Result};

/// Which field should hold input focus after an edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Hours,
    Minutes,
    /// Both fields are complete; the picker can be dismissed
    Released,
}

/// Hours and minutes typed separately, two digits each
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeEntry {
    hours: String,
    minutes: String,
}

impl TimeEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate both fields from a strict `HH:MM` value; anything else leaves
    /// the entry empty
    pub fn from_value(value: &str) -> Self {
        match parse_time(value) {
            Ok(time) => Self {
                hours: time.format("%H").to_string(),
                minutes: time.format("%M").to_string(),
            },
            Err(_) => Self::default(),
        }
    }

    /// Edit the hours field
    pub fn input_hours(&mut self, raw: &str) -> Focus {
        self.hours = filter_digits(raw);
        if self.hours.len() == 2 {
            self.hours = clamp_field(&self.hours, 23);
            Focus::Minutes
        } else {
            Focus::Hours
        }
    }

    /// Edit the minutes field
    pub fn input_minutes(&mut self, raw: &str) -> Focus {
        self.minutes = filter_digits(raw);
        if self.minutes.len() == 2 {
            self.minutes = clamp_field(&self.minutes, 59);
            Focus::Released
        } else {
            Focus::Minutes
        }
    }

    pub fn hours(&self) -> &str {
        &self.hours
    }

    pub fn minutes(&self) -> &str {
        &self.minutes
    }

    pub fn is_complete(&self) -> bool {
        self.hours.len() == 2 && self.minutes.len() == 2
    }

    /// Combined `HH:MM`, or an empty string while a field is incomplete
    pub fn value(&self) -> String {
        if self.is_complete() {
            format!("{}:{}", self.hours, self.minutes)
        } else {
            String::new()
        }
    }

    pub fn time(&self) -> Option<NaiveTime> {
        parse_time(&self.value()).ok()
    }
}

fn filter_digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).take(2).collect()
}

fn clamp_field(digits: &str, max: u32) -> String {
    let value = digits.parse::<u32>().unwrap_or(0).min(max);
    format!("{value:02}")
}

/// Parse a strict 24-hour `HH:MM` value
pub fn parse_time(value: &str) -> Result<NaiveTime> {
    let invalid = || FlowError::InvalidTime(value.to_string());
    let bytes = value.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return Err(invalid());
    }
    let (hh, mm) = (&value[..2], &value[3..]);
    if !hh.bytes().chain(mm.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let hours: u32 = hh.parse().map_err(|_| invalid())?;
    let minutes: u32 = mm.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    NaiveTime::from_hms_opt(hours, minutes, 0).ok_or_else(invalid)
}
