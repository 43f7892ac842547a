use std::{
    net::{IpAddr, SocketAddr},
    path::PathBuf,
};

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct WebConfig {
    #[serde(default = "WebConfig::default_host")]
    pub host: IpAddr,

    #[serde(default = "WebConfig::default_port")]
    pub port: u16,

    /// Directory holding `index.html` and the other public assets.
    #[serde(default = "WebConfig::default_static_dir")]
    pub static_dir: PathBuf,

    #[serde(default)]
    pub redirect: RedirectConfig,
}

impl WebConfig {
    #[inline]
    pub const fn socket_address(&self) -> SocketAddr { SocketAddr::new(self.host, self.port) }

    #[inline]
    pub const fn default_host() -> IpAddr { visitor_beacon_core::DEFAULT_WEB_HOST }

    #[inline]
    pub const fn default_port() -> u16 { visitor_beacon_core::DEFAULT_WEB_PORT }

    #[inline]
    pub fn default_static_dir() -> PathBuf { PathBuf::from(visitor_beacon_core::DEFAULT_STATIC_DIR) }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            static_dir: Self::default_static_dir(),
            redirect: RedirectConfig::default(),
        }
    }
}

impl From<WebConfig> for visitor_beacon_core::config::WebConfig {
    fn from(config: WebConfig) -> Self {
        Self {
            listen_address: config.socket_address(),
            static_dir: config.static_dir,
            redirect: config.redirect.into(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RedirectConfig {
    /// Target of `/source` when no usable `redirect` parameter is given.
    #[serde(default = "RedirectConfig::default_url")]
    pub default_url: String,

    /// Hosts `/source` may redirect to. Leave unset to accept any host.
    #[serde(default)]
    pub allowed_hosts: Option<Vec<String>>,
}

impl RedirectConfig {
    #[inline]
    pub fn default_url() -> String { visitor_beacon_core::DEFAULT_REDIRECT_URL.to_string() }
}

impl Default for RedirectConfig {
    fn default() -> Self { Self { default_url: Self::default_url(), allowed_hosts: None } }
}

impl From<RedirectConfig> for visitor_beacon_core::config::RedirectConfig {
    fn from(RedirectConfig { default_url, allowed_hosts }: RedirectConfig) -> Self {
        Self { default_url, allowed_hosts }
    }
}
