use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TelegramConfig {
    #[serde(default = "TelegramConfig::default_api_endpoint")]
    pub api_endpoint: String,

    /// Also read from `TELEGRAM_BOT_TOKEN`.
    #[serde(default)]
    pub bot_token: String,

    /// Also read from `CHAT_ID`.
    #[serde(default)]
    pub chat_id: String,

    #[serde(default = "TelegramConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl TelegramConfig {
    #[inline]
    pub fn default_api_endpoint() -> String {
        notification::telegram::DEFAULT_API_ENDPOINT.to_string()
    }

    #[inline]
    pub const fn default_timeout_secs() -> u64 { visitor_beacon_core::DEFAULT_OUTBOUND_TIMEOUT_SECS }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_endpoint: Self::default_api_endpoint(),
            bot_token: String::new(),
            chat_id: String::new(),
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

impl From<TelegramConfig> for visitor_beacon_core::config::TelegramConfig {
    fn from(
        TelegramConfig { api_endpoint, bot_token, chat_id, timeout_secs }: TelegramConfig,
    ) -> Self {
        Self { api_endpoint, bot_token, chat_id, timeout: Duration::from_secs(timeout_secs) }
    }
}
