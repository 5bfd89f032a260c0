//! Deliver a text message to one chat through the Telegram Bot API.
//!
//! ```no_run
//! use telegram_notify::{BotConfig, TelegramClient};
//!
//! # async fn run() -> telegram_notify::Result<()> {
//! let client = TelegramClient::new(BotConfig::new("123456:ABC", "987654321"))?;
//! let sent = client.send_message("Привет!").await?;
//! println!("delivered as #{}", sent.message_id);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;

pub use client::{Chat, SentMessage, TelegramClient};
pub use config::{BotConfig, DEFAULT_API_BASE, DEFAULT_TIMEOUT};
pub use error::{NotifyError, Result};
