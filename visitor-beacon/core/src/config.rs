use std::{net::SocketAddr, path::PathBuf, time::Duration};

#[derive(Clone, Debug)]
pub struct Config {
    pub web: WebConfig,

    pub metrics: MetricsConfig,

    pub enrichment: EnrichmentConfig,

    pub telegram: TelegramConfig,
}

#[derive(Clone, Debug)]
pub struct WebConfig {
    pub listen_address: SocketAddr,

    /// Directory holding `index.html` and the other public assets.
    pub static_dir: PathBuf,

    pub redirect: RedirectConfig,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RedirectConfig {
    /// Target used when `/source` is called without a usable `redirect`.
    pub default_url: String,

    /// Hosts `/source` may redirect to; `None` accepts any host.
    pub allowed_hosts: Option<Vec<String>>,
}

#[derive(Clone, Debug)]
pub struct MetricsConfig {
    pub enable: bool,

    pub listen_address: SocketAddr,
}

#[derive(Clone, Debug)]
pub struct EnrichmentConfig {
    pub geo_endpoint: String,

    pub geo_token: String,

    pub risk_endpoint: String,

    pub risk_key: String,

    pub timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct TelegramConfig {
    pub api_endpoint: String,

    pub bot_token: String,

    pub chat_id: String,

    pub timeout: Duration,
}
