//! Envelope → letter → form → delivery state machine

use std::fmt;
use std::time::Duration;

use log::{debug, warn};

use crate::error::{FlowError, Result};
use crate::form::{Answer, InvitationForm};

/// Delay between opening the envelope and the letter sliding out
pub const LETTER_SLIDE_DELAY: Duration = Duration::from_millis(450);

/// Where the invitation currently is
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum InvitationState {
    #[default]
    Closed,
    Opening,
    LetterRevealed,
    FormOpen,
    Submitting,
    Sent,
    Failed { reason: String },
}

impl InvitationState {
    /// Pure transition table
    pub fn next(&self, event: &Event) -> Result<Self> {
        use InvitationState as S;

        let next = match (self, event) {
            (S::Closed, Event::Open) => S::Opening,
            (S::Opening, Event::LetterOut) => S::LetterRevealed,
            (S::LetterRevealed, Event::OpenForm) => S::FormOpen,
            (S::FormOpen, Event::Submit) => S::Submitting,
            (S::Submitting, Event::Delivered) => S::Sent,
            (S::Submitting, Event::DeliveryFailed(reason)) => S::Failed {
                reason: reason.clone(),
            },
            (S::Failed { .. }, Event::Retry) => S::FormOpen,
            _ => {
                return Err(FlowError::InvalidTransition {
                    state: self.to_string(),
                    event: event.to_string(),
                });
            }
        };
        Ok(next)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Sent)
    }

    /// Whether form fields may be edited
    pub fn accepts_edits(&self) -> bool {
        matches!(self, Self::FormOpen | Self::Failed { .. })
    }
}

impl fmt::Display for InvitationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => f.write_str("closed"),
            Self::Opening => f.write_str("opening"),
            Self::LetterRevealed => f.write_str("letter revealed"),
            Self::FormOpen => f.write_str("form open"),
            Self::Submitting => f.write_str("submitting"),
            Self::Sent => f.write_str("sent"),
            Self::Failed { reason } => write!(f, "failed ({reason})"),
        }
    }
}

/// Inputs driving the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Open,
    LetterOut,
    OpenForm,
    Submit,
    Delivered,
    DeliveryFailed(String),
    Retry,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Open => "open",
            Self::LetterOut => "reveal letter",
            Self::OpenForm => "open form",
            Self::Submit => "submit",
            Self::Delivered => "mark delivered",
            Self::DeliveryFailed(_) => "mark failed",
            Self::Retry => "retry",
        };
        f.write_str(name)
    }
}

/// One invitation: its state, the form and the slide timer
#[derive(Debug, Clone, Default)]
pub struct Invitation {
    state: InvitationState,
    form: InvitationForm,
    opened_at: Option<Duration>,
    submitted: Option<Answer>,
}

impl Invitation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &InvitationState {
        &self.state
    }

    pub fn form(&self) -> &InvitationForm {
        &self.form
    }

    /// Mutable form access, only while the form is shown
    pub fn form_mut(&mut self) -> Result<&mut InvitationForm> {
        if self.state.accepts_edits() {
            Ok(&mut self.form)
        } else {
            Err(FlowError::InvalidTransition {
                state: self.state.to_string(),
                event: "edit form".to_string(),
            })
        }
    }

    /// The answer currently being delivered or already sent
    pub fn submitted(&self) -> Option<&Answer> {
        self.submitted.as_ref()
    }

    /// Apply a raw event
    pub fn apply(&mut self, event: Event) -> Result<&InvitationState> {
        let next = self.state.next(&event)?;
        debug!("Invitation: {} -> {} on {}", self.state, next, event);
        self.state = next;
        Ok(&self.state)
    }

    /// Open the envelope at clock time `now`
    pub fn open(&mut self, now: Duration) -> Result<&InvitationState> {
        self.apply(Event::Open)?;
        self.opened_at = Some(now);
        Ok(&self.state)
    }

    /// Advance time; reveals the letter once the slide delay has passed
    pub fn tick(&mut self, now: Duration) -> &InvitationState {
        if self.state == InvitationState::Opening
            && let Some(opened_at) = self.opened_at
            && now.saturating_sub(opened_at) >= LETTER_SLIDE_DELAY
        {
            self.state = InvitationState::LetterRevealed;
            debug!("Invitation: letter revealed after {:?}", now.saturating_sub(opened_at));
        }
        &self.state
    }

    pub fn open_form(&mut self) -> Result<&InvitationState> {
        self.apply(Event::OpenForm)
    }

    /// Validate the form and move to `Submitting`
    ///
    /// An incomplete form leaves the state untouched.
    pub fn submit(&mut self) -> Result<Answer> {
        // Check the transition first so a closed envelope reports that, not the form
        self.state.next(&Event::Submit)?;
        let answer = self.form.validate()?;
        self.apply(Event::Submit)?;
        self.submitted = Some(answer.clone());
        Ok(answer)
    }

    pub fn delivered(&mut self) -> Result<&InvitationState> {
        self.apply(Event::Delivered)
    }

    pub fn delivery_failed(&mut self, reason: impl Into<String>) -> Result<&InvitationState> {
        let reason = reason.into();
        warn!("Invitation delivery failed: {reason}");
        self.apply(Event::DeliveryFailed(reason))
    }

    /// Back to the form after a failed delivery, keeping what was typed
    pub fn retry(&mut self) -> Result<&InvitationState> {
        self.apply(Event::Retry)?;
        self.submitted = None;
        Ok(&self.state)
    }
}
