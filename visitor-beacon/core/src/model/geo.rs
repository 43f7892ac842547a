use serde::{Deserialize, Serialize};

/// Geolocation and network owner of an address, as returned by `ipinfo.io`.
///
/// Every field is optional; the service omits what it does not know.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct GeoInfo {
    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    pub region: Option<String>,

    #[serde(default)]
    pub country: Option<String>,

    /// `"<latitude>,<longitude>"`
    #[serde(default)]
    pub loc: Option<String>,

    #[serde(default)]
    pub org: Option<String>,

    #[serde(default)]
    pub postal: Option<String>,

    #[serde(default)]
    pub timezone: Option<String>,
}

impl GeoInfo {
    /// Splits `loc` into latitude and longitude.
    ///
    /// Returns `None` when `loc` is missing or has no comma. Either half may
    /// still be empty.
    #[must_use]
    pub fn coordinates(&self) -> Option<(&str, &str)> {
        let (latitude, longitude) = self.loc.as_deref()?.split_once(',')?;
        Some((latitude.trim(), longitude.trim()))
    }
}
