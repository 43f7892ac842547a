use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EnrichmentConfig {
    /// Base URL of the geolocation service.
    #[serde(default = "EnrichmentConfig::default_geo_endpoint")]
    pub geo_endpoint: String,

    /// Token of the geolocation service, also read from `IPINFO_TOKEN`.
    #[serde(default)]
    pub geo_token: String,

    /// Base URL of the proxy/VPN risk service.
    #[serde(default = "EnrichmentConfig::default_risk_endpoint")]
    pub risk_endpoint: String,

    /// Key of the risk service, also read from `IPQUALITYSCORE_KEY`.
    #[serde(default)]
    pub risk_key: String,

    #[serde(default = "EnrichmentConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl EnrichmentConfig {
    #[inline]
    pub fn default_geo_endpoint() -> String { visitor_beacon_core::DEFAULT_GEO_ENDPOINT.to_string() }

    #[inline]
    pub fn default_risk_endpoint() -> String {
        visitor_beacon_core::DEFAULT_RISK_ENDPOINT.to_string()
    }

    #[inline]
    pub const fn default_timeout_secs() -> u64 { visitor_beacon_core::DEFAULT_OUTBOUND_TIMEOUT_SECS }
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            geo_endpoint: Self::default_geo_endpoint(),
            geo_token: String::new(),
            risk_endpoint: Self::default_risk_endpoint(),
            risk_key: String::new(),
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

impl From<EnrichmentConfig> for visitor_beacon_core::config::EnrichmentConfig {
    fn from(
        EnrichmentConfig { geo_endpoint, geo_token, risk_endpoint, risk_key, timeout_secs }: EnrichmentConfig,
    ) -> Self {
        Self {
            geo_endpoint,
            geo_token,
            risk_endpoint,
            risk_key,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}
