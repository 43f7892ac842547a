mod enrichment;
mod error;
mod metrics;
mod telegram;
mod web;

use std::path::{Path, PathBuf};

use beacon_cli_common::config::LogConfig;
use resolve_path::PathResolveExt;
use serde::{Deserialize, Serialize};
use snafu::ResultExt;

pub use self::{
    enrichment::EnrichmentConfig,
    error::Error,
    metrics::MetricsConfig,
    telegram::TelegramConfig,
    web::{RedirectConfig, WebConfig},
};

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub web: WebConfig,

    #[serde(default)]
    pub metrics: MetricsConfig,

    #[serde(default)]
    pub enrichment: EnrichmentConfig,

    #[serde(default)]
    pub telegram: TelegramConfig,
}

/// Credentials given on the command line or through the environment.
#[derive(Clone, Debug, Default)]
pub struct Secrets {
    pub geo_token: Option<String>,
    pub risk_key: Option<String>,
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
}

impl Config {
    #[inline]
    pub fn default_path() -> PathBuf {
        [
            visitor_beacon_core::PROJECT_CONFIG_DIR.to_path_buf(),
            PathBuf::from(visitor_beacon_core::CONFIG_NAME),
        ]
        .into_iter()
        .collect()
    }

    /// Loads `path` when given, otherwise the file at [`Config::default_path`]
    /// if it exists, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Self::default_path();
                if default_path.is_file() {
                    Self::load(default_path)
                } else {
                    let mut config = Self::default();
                    config.resolve_paths()?;
                    Ok(config)
                }
            }
        }
    }

    #[inline]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let mut config: Self = {
            let data = std::fs::read_to_string(&path)
                .context(error::OpenConfigSnafu { filename: path.as_ref().to_path_buf() })?;

            serde_yaml::from_str(&data)
                .context(error::ParseConfigSnafu { filename: path.as_ref().to_path_buf() })?
        };

        config.resolve_paths()?;

        Ok(config)
    }

    fn resolve_paths(&mut self) -> Result<(), Error> {
        self.log.resolve_file_path().context(error::ResolveLogFilePathSnafu)?;

        self.web.static_dir = self
            .web
            .static_dir
            .try_resolve()
            .map(|path| path.to_path_buf())
            .with_context(|_| error::ResolveStaticDirSnafu { path: self.web.static_dir.clone() })?;

        Ok(())
    }

    /// Non-empty secrets take precedence over the values of the file.
    pub fn apply_secrets(&mut self, Secrets { geo_token, risk_key, bot_token, chat_id }: Secrets) {
        let non_empty = |value: Option<String>| value.filter(|value| !value.trim().is_empty());

        if let Some(geo_token) = non_empty(geo_token) {
            self.enrichment.geo_token = geo_token;
        }
        if let Some(risk_key) = non_empty(risk_key) {
            self.enrichment.risk_key = risk_key;
        }
        if let Some(bot_token) = non_empty(bot_token) {
            self.telegram.bot_token = bot_token;
        }
        if let Some(chat_id) = non_empty(chat_id) {
            self.telegram.chat_id = chat_id;
        }
    }
}

#[inline]
pub fn load_server_config(
    Config { web, metrics, enrichment, telegram, .. }: Config,
) -> visitor_beacon_core::config::Config {
    visitor_beacon_core::config::Config {
        web: web.into(),
        metrics: metrics.into(),
        enrichment: enrichment.into(),
        telegram: telegram.into(),
    }
}
