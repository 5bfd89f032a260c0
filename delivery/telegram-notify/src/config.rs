use std::fmt;
use std::time::Duration;

use crate::error::{NotifyError, Result};

/// Public Bot API endpoint
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where and as whom to deliver messages
#[derive(Clone, PartialEq, Eq)]
pub struct BotConfig {
    pub token: String,
    pub chat_id: String,
    /// Base URL, overridable for proxies and tests
    pub api_base: String,
    pub timeout: Duration,
}

impl BotConfig {
    pub fn new(token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            chat_id: chat_id.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reject settings that can never work
    pub fn validate(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            return Err(NotifyError::Config("bot token is empty".to_string()));
        }
        if self.token.contains(['/', '?', '#']) || self.token.chars().any(char::is_whitespace) {
            return Err(NotifyError::Config(
                "bot token contains characters not allowed in a URL path".to_string(),
            ));
        }
        if self.chat_id.trim().is_empty() {
            return Err(NotifyError::Config("chat id is empty".to_string()));
        }
        if !(self.api_base.starts_with("http://") || self.api_base.starts_with("https://")) {
            return Err(NotifyError::Config(format!(
                "API base '{}' is not an http(s) URL",
                self.api_base
            )));
        }
        Ok(())
    }

    /// `{base}/bot{token}/{method}`
    pub fn endpoint(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.api_base.trim_end_matches('/'),
            self.token,
            method
        )
    }
}

// Token is redacted
impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("api_base", &self.api_base)
            .field("timeout", &self.timeout)
            .finish()
    }
}
