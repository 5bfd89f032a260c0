use std::fmt;

use thiserror::Error;

/// A form field the user has to fill in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Place,
    Date,
    Time,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Place => "place",
            Self::Date => "date",
            Self::Time => "time",
        };
        f.write_str(name)
    }
}

/// Validation failure listing every incomplete field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Incomplete form: missing {}", join(.missing))]
pub struct FormError {
    pub missing: Vec<Field>,
}

impl FormError {
    pub fn contains(&self, field: Field) -> bool {
        self.missing.contains(&field)
    }
}

fn join(fields: &[Field]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Error types for the invitation flow
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// The event is not allowed in the current state
    #[error("Invalid transition: cannot {event} while {state}")]
    InvalidTransition { state: String, event: String },

    /// The form failed validation on submit
    #[error(transparent)]
    Form(#[from] FormError),

    /// A date literal could not be parsed
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    /// A time literal could not be parsed
    #[error("Invalid time '{0}': expected HH:MM")]
    InvalidTime(String),

    /// A month literal could not be parsed
    #[error("Invalid month '{0}': expected YYYY-MM")]
    InvalidMonth(String),
}

/// Result type using FlowError
pub type Result<T> = std::result::Result<T, FlowError>;
