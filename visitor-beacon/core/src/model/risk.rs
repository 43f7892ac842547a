use serde::{Deserialize, Deserializer, Serialize};

/// Proxy and anonymizer signals of an address, as returned by
/// `ipqualityscore.com`.
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct RiskInfo {
    #[serde(default, deserialize_with = "truthy")]
    pub proxy: bool,

    #[serde(default, deserialize_with = "truthy")]
    pub vpn: bool,

    #[serde(default, deserialize_with = "truthy")]
    pub tor: bool,

    #[serde(default, deserialize_with = "truthy")]
    pub residential: bool,

    #[serde(default, deserialize_with = "truthy")]
    pub public_proxy: bool,

    #[serde(default, deserialize_with = "truthy")]
    pub hosting: bool,

    /// `false` when the service refused the request, e.g. for a bad key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RiskInfo {
    /// The service answers refused requests with HTTP 200 and
    /// `"success": false`; returns its explanation in that case.
    #[must_use]
    pub fn provider_error(&self) -> Option<&str> {
        (self.success == Some(false))
            .then(|| self.message.as_deref().unwrap_or("request was not successful"))
    }
}

fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    Ok(match Value::deserialize(deserializer)? {
        Value::Null => false,
        Value::Bool(flag) => flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => {
            !matches!(text.trim().to_ascii_lowercase().as_str(), "" | "0" | "false" | "no")
        }
        Value::Array(_) | Value::Object(_) => true,
    })
}
