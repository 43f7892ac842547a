//! Telegram Bot API client delivering notifications with `sendMessage`.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::{Error, Notification, NotificationClient};

/// Public Bot API endpoint.
pub const DEFAULT_API_ENDPOINT: &str = "https://api.telegram.org";

/// Configuration for the Telegram client.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the Bot API, without trailing slash.
    pub api_endpoint: String,
    /// Token issued by `@BotFather`.
    pub bot_token: String,
    /// Chat receiving the messages.
    pub chat_id: String,
    /// Upper bound for a single `sendMessage` call.
    pub timeout: Duration,
}

/// Request body of `sendMessage`.
#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
}

/// Telegram Bot API client for sending chat messages.
#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::Client,
    send_message_url: String,
    chat_id: String,
}

impl Client {
    /// Creates a new Telegram client.
    ///
    /// Missing credentials are not rejected here; every delivery attempt
    /// made with them fails on its own.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client can not be built.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::time::Duration;
    ///
    /// use notification::telegram::{Client, Config, DEFAULT_API_ENDPOINT};
    ///
    /// # fn example() -> Result<(), notification::Error> {
    /// let client = Client::new(Config {
    ///     api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
    ///     bot_token: "123456:ABC-DEF".to_string(),
    ///     chat_id: "-1001234567890".to_string(),
    ///     timeout: Duration::from_secs(5),
    /// })?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: Config) -> Result<Self, Error> {
        let Config { api_endpoint, bot_token, chat_id, timeout } = config;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| Error::BuildHttpClient { source })?;

        let send_message_url =
            format!("{}/bot{bot_token}/sendMessage", api_endpoint.trim_end_matches('/'));

        Ok(Self { http, send_message_url, chat_id })
    }
}

#[async_trait]
impl NotificationClient for Client {
    async fn send_notification(
        &self,
        notification: &Notification,
    ) -> Result<serde_json::Value, Error> {
        let Notification::HtmlMessage { text } = notification;

        let body = SendMessage { chat_id: &self.chat_id, text, parse_mode: "HTML" };

        // the URL embeds the bot token and must not reach the logs
        let response = self
            .http
            .post(&self.send_message_url)
            .json(&body)
            .send()
            .await
            .map_err(|source| Error::HttpRequest { source: source.without_url() })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Rejected { status: status.as_u16(), body });
        }

        let payload = response
            .json::<serde_json::Value>()
            .await
            .map_err(|source| Error::DecodeResponse { source: source.without_url() })?;

        tracing::debug!(chat_id = %self.chat_id, "Successfully sent Telegram message");
        Ok(payload)
    }
}
