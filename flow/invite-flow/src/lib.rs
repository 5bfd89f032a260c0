//! Invitation flow: envelope, letter, answer form and message composition.
//!
//! The flow is a small state machine driven by user events plus one timed
//! step (the letter slides out of the envelope 450 ms after opening).
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use invite_flow::{ChipSelection, Invitation, InvitationState, PlacePreset};
//!
//! let mut invitation = Invitation::new();
//! invitation.open(Duration::ZERO)?;
//! invitation.tick(Duration::from_millis(450));
//! invitation.open_form()?;
//!
//! let form = invitation.form_mut()?;
//! form.place.choose(ChipSelection::Preset(PlacePreset::Park));
//! form.date = invite_flow::calendar::parse_iso("2026-02-14").ok();
//! form.time.input_hours("18");
//! form.time.input_minutes("30");
//!
//! let answer = invitation.submit()?;
//! assert!(answer.to_message().contains("Парк"));
//! invitation.delivered()?;
//! assert_eq!(invitation.state(), &InvitationState::Sent);
//! # Ok::<(), invite_flow::FlowError>(())
//! ```

pub mod calendar;
pub mod error;
pub mod form;
pub mod place;
pub mod state;
pub mod time;

pub use calendar::{MONTH_NAMES, MonthCursor, WEEKDAY_NAMES, format_iso, parse_iso};
pub use error::{Field, FlowError, FormError, Result};
pub use form::{Answer, InvitationForm};
pub use place::{ChipSelection, PlaceInput, PlacePreset};
pub use state::{Event, Invitation, InvitationState, LETTER_SLIDE_DELAY};
pub use time::{Focus, TimeEntry, parse_time};
