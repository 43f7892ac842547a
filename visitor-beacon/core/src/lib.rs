pub mod config;
pub mod model;

use std::{
    net::{IpAddr, Ipv4Addr},
    path::PathBuf,
    sync::LazyLock,
};

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const PROJECT_NAME: &str = "visitor-beacon";

pub const PROGRAM_NAME: &str = "visitor-beacon";
pub const CONFIG_NAME: &str = "visitor-beacon.yaml";

pub const DEFAULT_WEB_PORT: u16 = 3000;
pub const DEFAULT_WEB_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

pub const DEFAULT_METRICS_PORT: u16 = 3001;
pub const DEFAULT_METRICS_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

pub const DEFAULT_STATIC_DIR: &str = "public";
pub const DEFAULT_REDIRECT_URL: &str = "https://www.google.com";

pub const DEFAULT_GEO_ENDPOINT: &str = "https://ipinfo.io";
pub const DEFAULT_RISK_ENDPOINT: &str = "https://ipqualityscore.com";

/// Upper bound, in seconds, of every outbound call.
pub const DEFAULT_OUTBOUND_TIMEOUT_SECS: u64 = 5;

pub static PROJECT_CONFIG_DIR: LazyLock<PathBuf> = LazyLock::new(|| {
    ProjectDirs::from("", PROJECT_NAME, PROJECT_NAME)
        .expect("Creating `ProjectDirs` should always success")
        .config_dir()
        .to_path_buf()
});

#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    pub version: String,
    pub branch: String,
    pub commit_hash: String,
    pub start_time: DateTime<Utc>,
}
