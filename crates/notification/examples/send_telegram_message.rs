//! Example: Send a HTML message to a Telegram chat.
//!
//! # Prerequisites
//!
//! 1. Create a bot with `@BotFather` and note its token
//! 2. Add the bot to the chat and look up the chat identifier
//!
//! # Usage
//!
//! ```bash
//! export TELEGRAM_BOT_TOKEN="123456:ABC-DEF"
//! export CHAT_ID="-1001234567890"
//! cargo run --example send_telegram_message
//! ```

use std::time::Duration;

use notification::{
    telegram::{Client, Config, DEFAULT_API_ENDPOINT},
    Notification, NotificationClient,
};

#[tokio::main]
async fn main() -> Result<(), notification::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config {
        api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
        bot_token: std::env::var("TELEGRAM_BOT_TOKEN").unwrap_or_default(),
        chat_id: std::env::var("CHAT_ID").unwrap_or_default(),
        timeout: Duration::from_secs(5),
    };

    let client = Client::new(config)?;

    let notification = Notification::HtmlMessage {
        text: "<b>visitor-beacon</b> test message".to_string(),
    };

    tracing::info!("Sending Telegram message");
    let payload = client.send_notification(&notification).await?;

    tracing::info!("Telegram answered: {payload}");
    Ok(())
}
