use thiserror::Error;

/// Error types for starting and configuring particle effects
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EffectError {
    /// The drawing surface has no backing buffer yet
    #[error("Surface unavailable: the drawing surface is not attached")]
    SurfaceUnavailable,

    /// `start` was called on a driver that already left the idle state
    #[error("Driver already started (current state: {0})")]
    AlreadyStarted(String),

    /// A color literal could not be parsed
    #[error("Invalid color '{0}': expected #rgb or #rrggbb")]
    InvalidColor(String),

    /// A preset name was not recognised
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),
}

/// Result type using EffectError
pub type Result<T> = std::result::Result<T, EffectError>;
