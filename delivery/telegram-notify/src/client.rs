use log::{debug, warn};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::config::BotConfig;
use crate::error::{NotifyError, Result};

const USER_AGENT: &str = concat!("telegram-notify/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Envelope of every Bot API response
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

/// Chat a message was posted to
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// Message as echoed back by `sendMessage`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SentMessage {
    pub message_id: i64,
    /// Unix timestamp
    #[serde(default)]
    pub date: i64,
    #[serde(default)]
    pub chat: Option<Chat>,
    #[serde(default)]
    pub text: Option<String>,
}

/// Bot API client bound to one chat
#[derive(Debug, Clone)]
pub struct TelegramClient {
    config: BotConfig,
    http: reqwest::Client,
}

impl TelegramClient {
    /// Validate the settings and build the HTTP client
    pub fn new(config: BotConfig) -> Result<Self> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    /// Post `text` to the configured chat
    ///
    /// One request, no retries. Succeeds only on a 2xx status with
    /// `"ok": true` in the body.
    pub async fn send_message(&self, text: &str) -> Result<SentMessage> {
        let body = SendMessageRequest {
            chat_id: &self.config.chat_id,
            text,
        };
        debug!(
            "Sending {} chars to chat {} via {}",
            text.chars().count(),
            self.config.chat_id,
            self.config.api_base
        );

        let response = self
            .http
            .post(self.config.endpoint("sendMessage"))
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        let raw = response.text().await?;

        let parsed = serde_json::from_str::<ApiResponse<SentMessage>>(&raw);
        match parsed {
            Ok(ApiResponse {
                ok: true,
                result: Some(message),
                ..
            }) if status.is_success() => {
                debug!("Delivered message {}", message.message_id);
                Ok(message)
            }
            Ok(reply) => Err(api_error(status, reply.description, &raw)),
            Err(err) => {
                warn!("Unparseable Bot API response ({status}): {err}");
                Err(api_error(status, None, &raw))
            }
        }
    }
}

fn api_error(status: StatusCode, description: Option<String>, raw: &str) -> NotifyError {
    let description = description
        .filter(|d| !d.trim().is_empty())
        .or_else(|| {
            let raw = raw.trim();
            (!raw.is_empty()).then(|| raw.chars().take(200).collect())
        })
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| "unknown error".to_string());

    NotifyError::Api {
        status: status.as_u16(),
        description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = SendMessageRequest {
            chat_id: "42",
            text: "Привет",
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "chat_id": "42", "text": "Привет" })
        );
    }

    #[test]
    fn test_api_error_prefers_description() {
        let err = api_error(
            StatusCode::BAD_REQUEST,
            Some("Bad Request: message text is empty".to_string()),
            "{}",
        );
        assert!(matches!(
            err,
            NotifyError::Api { status: 400, ref description } if description == "Bad Request: message text is empty"
        ));
    }

    #[test]
    fn test_api_error_falls_back_to_reason() {
        let err = api_error(StatusCode::BAD_GATEWAY, None, "   ");
        assert!(matches!(
            err,
            NotifyError::Api { status: 502, ref description } if description == "Bad Gateway"
        ));
    }

    #[test]
    fn test_new_rejects_empty_token() {
        assert!(matches!(
            TelegramClient::new(BotConfig::new("", "42")),
            Err(NotifyError::Config(_))
        ));
    }
}
