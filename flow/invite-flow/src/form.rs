//! The answer form and the message composed from it

use chrono::{NaiveDate, NaiveTime};

use crate::calendar::format_iso;
use crate::error::{Field, FormError};
use crate::place::PlaceInput;
use crate::time::TimeEntry;

/// Everything the user fills in before sending
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvitationForm {
    pub place: PlaceInput,
    pub date: Option<NaiveDate>,
    pub time: TimeEntry,
}

impl InvitationForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check every field, reporting all missing ones at once
    pub fn validate(&self) -> Result<Answer, FormError> {
        let place = self.place.resolve();
        let time = self.time.time();

        let mut missing = Vec::new();
        if place.is_none() {
            missing.push(Field::Place);
        }
        if self.date.is_none() {
            missing.push(Field::Date);
        }
        if time.is_none() {
            missing.push(Field::Time);
        }

        match (place, self.date, time) {
            (Some(place), Some(date), Some(time)) => Ok(Answer { place, date, time }),
            _ => Err(FormError { missing }),
        }
    }
}

/// A validated answer
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct Answer {
    pub place: String,
    pub date: NaiveDate,
    #[cfg_attr(feature = "serde-support", serde(with = "hh_mm"))]
    pub time: NaiveTime,
}

impl Answer {
    /// Text delivered to the bot chat
    pub fn to_message(&self) -> String {
        format!(
            "💌 Ответ на приглашение\nМесто: {}\nДата: {}\nВремя: {}",
            self.place,
            format_iso(self.date),
            self.time.format("%H:%M"),
        )
    }
}

#[cfg(feature = "serde-support")]
mod hh_mm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format("%H:%M"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let value = String::deserialize(deserializer)?;
        crate::time::parse_time(&value).map_err(serde::de::Error::custom)
    }
}
