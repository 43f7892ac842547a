use std::net::IpAddr;

use serde::de::DeserializeOwned;
use snafu::ResultExt;
use visitor_beacon_core::{
    config::EnrichmentConfig,
    model::{Enrichment, GeoInfo, Lookup, RiskInfo},
};

use crate::service::error::{self, LookupError, Result};

/// Client of the geolocation (`ipinfo.io`) and risk (`ipqualityscore.com`)
/// services.
#[derive(Clone, Debug)]
pub struct EnrichmentClient {
    http: reqwest::Client,
    geo_endpoint: String,
    geo_token: String,
    risk_endpoint: String,
    risk_key: String,
}

impl EnrichmentClient {
    /// # Errors
    /// Returns an error if the HTTP client can not be built.
    pub fn new(config: &EnrichmentConfig) -> Result<Self> {
        let EnrichmentConfig { geo_endpoint, geo_token, risk_endpoint, risk_key, timeout } = config;

        let http = reqwest::Client::builder()
            .timeout(*timeout)
            .build()
            .context(error::BuildEnrichmentClientSnafu)?;

        Ok(Self {
            http,
            geo_endpoint: geo_endpoint.trim_end_matches('/').to_string(),
            geo_token: geo_token.clone(),
            risk_endpoint: risk_endpoint.trim_end_matches('/').to_string(),
            risk_key: risk_key.clone(),
        })
    }

    /// Looks `address` up in both services concurrently.
    ///
    /// Never fails: each lookup degrades to [`Lookup::Failed`] on its own.
    pub async fn enrich(&self, address: &str) -> Enrichment {
        let ip = match address.parse::<IpAddr>() {
            Ok(ip) => ip,
            Err(_) => {
                let err = LookupError::NotAnIpAddress { address: address.to_string() };
                tracing::debug!("Skip enrichment: {err}");
                return Enrichment::unavailable(&err.to_string());
            }
        };

        let (geo, risk) = tokio::join!(self.lookup_geo(ip), self.lookup_risk(ip));

        let geo = geo.unwrap_or_else(|err| {
            tracing::warn!(%ip, "Error fetching IP info: {err}");
            Lookup::failed(err)
        });
        let risk = risk.unwrap_or_else(|err| {
            tracing::warn!(%ip, "Error fetching privacy info: {err}");
            Lookup::failed(err)
        });

        Enrichment { geo, risk }
    }

    async fn lookup_geo(&self, ip: IpAddr) -> std::result::Result<Lookup<GeoInfo>, LookupError> {
        let url = format!("{}/{ip}/json", self.geo_endpoint);
        let request = self.http.get(url).query(&[("token", self.geo_token.as_str())]);

        let geo: GeoInfo = fetch_json(request).await?;
        Ok(Lookup::Resolved(geo))
    }

    async fn lookup_risk(&self, ip: IpAddr) -> std::result::Result<Lookup<RiskInfo>, LookupError> {
        let url = format!("{}/api/json/ip/{}/{ip}", self.risk_endpoint, self.risk_key);

        let risk: RiskInfo = fetch_json(self.http.get(url)).await?;
        if let Some(message) = risk.provider_error() {
            return Err(LookupError::Refused { message: message.to_string() });
        }
        Ok(Lookup::Resolved(risk))
    }
}

// Both URLs carry credentials, so they are stripped from transport errors.
async fn fetch_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> std::result::Result<T, LookupError> {
    let response = request
        .send()
        .await
        .map_err(|source| LookupError::SendRequest { source: source.without_url() })?;

    let status = response.status();
    if !status.is_success() {
        return Err(LookupError::UnexpectedStatus { status: status.as_u16() });
    }

    response
        .json::<T>()
        .await
        .map_err(|source| LookupError::DecodeBody { source: source.without_url() })
}
