use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Screen and browser properties reported by the landing page script.
///
/// The payload comes straight from the browser: fields are free-form JSON
/// values and any of them may be missing.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BrowserMetadata {
    #[serde(default)]
    #[schema(value_type = Object)]
    pub screen_width: Option<Value>,

    #[serde(default)]
    #[schema(value_type = Object)]
    pub screen_height: Option<Value>,

    #[serde(default)]
    #[schema(value_type = Object)]
    pub color_depth: Option<Value>,

    #[serde(default)]
    #[schema(value_type = Object)]
    pub pixel_depth: Option<Value>,

    #[serde(default)]
    #[schema(value_type = Object)]
    pub browser_language: Option<Value>,

    #[serde(default)]
    #[schema(value_type = Object)]
    pub platform: Option<Value>,

    #[serde(default)]
    #[schema(value_type = Object)]
    pub user_agent: Option<Value>,

    #[serde(default)]
    #[schema(value_type = Object)]
    pub cookie_enabled: Option<Value>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_deserialize_camel_case_payload() {
        let metadata: BrowserMetadata = serde_json::from_value(json!({
            "screenWidth": 1920,
            "screenHeight": 1080,
            "colorDepth": 24,
            "pixelDepth": 24,
            "browserLanguage": "en-US",
            "platform": "Win32",
            "userAgent": "Mozilla/5.0",
            "cookieEnabled": true,
            "somethingElse": "ignored"
        }))
        .unwrap();

        assert_eq!(metadata.screen_width, Some(json!(1920)));
        assert_eq!(metadata.browser_language, Some(json!("en-US")));
        assert_eq!(metadata.cookie_enabled, Some(json!(true)));
    }

    #[test]
    fn test_missing_fields() {
        let metadata: BrowserMetadata = serde_json::from_value(json!({})).unwrap();
        assert_eq!(metadata, BrowserMetadata::default());
    }
}
