//! # Notification Crate
//!
//! This crate provides functionality for sending notifications via various
//! channels. Currently supports chat messages via the Telegram Bot API.
//!
//! ## Features
//!
//! - Telegram `sendMessage` integration
//! - HTML formatted messages
//! - Provider diagnostics surfaced in errors
//! - Async/await support

mod error;
pub mod telegram;

use async_trait::async_trait;
pub use error::Error;

/// Represents different types of notifications that can be sent.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Notification {
    /// A message formatted with the HTML subset understood by chat clients.
    HtmlMessage {
        /// The rendered message body.
        text: String,
    },
}

impl Notification {
    /// Returns the message body of the notification.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::HtmlMessage { text } => text,
        }
    }
}

/// Trait for notification clients that can send notifications.
#[async_trait]
pub trait NotificationClient: Send + Sync {
    /// Sends a notification and returns the payload the provider answered with.
    ///
    /// # Errors
    ///
    /// Returns an error if the notification fails to send.
    async fn send_notification(
        &self,
        notification: &Notification,
    ) -> Result<serde_json::Value, Error>;
}
