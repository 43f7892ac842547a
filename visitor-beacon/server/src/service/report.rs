use std::{borrow::Cow, fmt::Write as _};

use beacon_axum::UNKNOWN;
use notification::Notification;
use serde_json::Value;
use visitor_beacon_core::model::{BrowserMetadata, Enrichment};
use woothee::parser::{Parser, WootheeResult};

/// Longest client-controlled value, in characters, rendered into a report.
const MAX_VALUE_CHARS: usize = 384;

/// A rendered chat message, using the HTML subset of the Bot API.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Report(String);

impl Report {
    #[must_use]
    pub fn as_str(&self) -> &str { &self.0 }

    #[must_use]
    pub fn into_notification(self) -> Notification { Notification::HtmlMessage { text: self.0 } }
}

/// Best-effort reading of a `User-Agent` header.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UserAgentInfo {
    pub operating_system: Option<String>,
    pub browser: Option<String>,
    pub device: Option<String>,
}

impl UserAgentInfo {
    #[must_use]
    pub fn parse(user_agent: Option<&str>) -> Self {
        let Some(user_agent) = user_agent.map(str::trim).filter(|ua| !ua.is_empty()) else {
            return Self::default();
        };

        Parser::new().parse(user_agent).map_or_else(Self::default, |result| Self::from_woothee(&result))
    }

    fn from_woothee(result: &WootheeResult<'_>) -> Self {
        let operating_system = known(result.os).map(|os| match known(&result.os_version) {
            Some(version) if !os.contains(version) => format!("{os} {version}"),
            _ => os.to_string(),
        });
        let browser = known(result.name).map(|name| match known(result.version) {
            Some(version) => format!("{name} {version}"),
            None => name.to_string(),
        });
        let device = match result.category {
            "pc" => Some("Desktop"),
            "smartphone" | "mobilephone" => Some("Mobile"),
            "tablet" => Some("Tablet"),
            "appliance" => Some("Smart TV"),
            "crawler" => Some("Bot"),
            "misc" => Some("Other"),
            _ => None,
        }
        .map(str::to_string);

        Self { operating_system, browser, device }
    }
}

fn known(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty() && value != "UNKNOWN").then_some(value)
}

/// Renders the report sent for every tracked request.
///
/// A failed lookup renders exactly like an empty payload.
#[must_use]
pub fn visit_report(address: &str, enrichment: Enrichment, user_agent: Option<&str>) -> Report {
    let Enrichment { geo, risk } = enrichment;
    let geo = geo.into_value_or_default();
    let risk = risk.into_value_or_default();
    let agent = UserAgentInfo::parse(user_agent);

    let (latitude, longitude) = geo.coordinates().unwrap_or_default();
    let latitude = render_text(Some(latitude));
    let longitude = render_text(Some(longitude));
    let map_link = format!("https://www.google.com/maps?q={latitude},{longitude}");

    let mut text = String::from("\n<b>Client Info:</b>\n");
    let lines = [
        ("🏷", "IP Address", render_text(Some(address))),
        (
            "📍",
            "Location",
            format!(
                "{}, {}, {}",
                render_text(geo.city.as_deref()),
                render_text(geo.region.as_deref()),
                render_text(geo.country.as_deref()),
            ),
        ),
        (
            "📍",
            "Coordinates",
            format!(
                "{} (Latitude: {latitude}, Longitude: {longitude})",
                render_text(geo.loc.as_deref()),
            ),
        ),
        ("🌐", "Google Maps", format!("<a href=\"{map_link}\">View Location</a>")),
        ("🏢", "Organization", render_text(geo.org.as_deref())),
        ("🏤", "Postal Code", render_text(geo.postal.as_deref())),
        ("🕒", "Timezone", render_text(geo.timezone.as_deref())),
        ("🖥", "User-Agent", render_text(user_agent)),
        ("📱", "Operating System", render_text(agent.operating_system.as_deref())),
        ("🌐", "Browser", render_text(agent.browser.as_deref())),
        ("📱", "Device", render_text(agent.device.as_deref())),
    ];
    push_lines(&mut text, &lines);

    text.push_str("\n<b>Privacy Info:</b>\n");
    let flags = [
        ("Is Proxy", risk.proxy),
        ("Is VPN", risk.vpn),
        ("Is TOR", risk.tor),
        ("Is Residential", risk.residential),
        ("Is Public Proxy", risk.public_proxy),
        ("Is Hosting Provider", risk.hosting),
    ];
    let flags = flags.map(|(label, flag)| ("🔒", label, yes_no(flag).to_string()));
    push_lines(&mut text, &flags);

    Report(text)
}

/// Renders the report for metadata submitted by the landing page.
#[must_use]
pub fn client_info_report(metadata: &BrowserMetadata) -> Report {
    let BrowserMetadata {
        screen_width,
        screen_height,
        color_depth,
        pixel_depth,
        browser_language,
        platform,
        user_agent,
        cookie_enabled,
    } = metadata;

    let mut text = String::from("\n<b>Client Screen &amp; Browser Info:</b>\n");
    let lines = [
        (
            "🖥",
            "Screen Resolution",
            format!("{}x{}", render_value(screen_width.as_ref()), render_value(screen_height.as_ref())),
        ),
        ("🎨", "Color Depth", render_value(color_depth.as_ref())),
        ("📏", "Pixel Depth", render_value(pixel_depth.as_ref())),
        ("🌐", "Browser Language", render_value(browser_language.as_ref())),
        ("📱", "Platform", render_value(platform.as_ref())),
        ("🖥", "User-Agent", render_value(user_agent.as_ref())),
        ("🍪", "Cookies Enabled", render_value(cookie_enabled.as_ref())),
    ];
    push_lines(&mut text, &lines);

    Report(text)
}

fn push_lines(text: &mut String, lines: &[(&str, &str, String)]) {
    for (icon, label, value) in lines {
        // writing into a `String` never fails
        let _ = writeln!(text, "- {icon} <b>{label}:</b> {value}");
    }
}

fn or_unknown(value: Option<&str>) -> &str {
    value.map(str::trim).filter(|value| !value.is_empty()).unwrap_or(UNKNOWN)
}

/// Trimmed, clipped and escaped text, or `Unknown`.
fn render_text(value: Option<&str>) -> String { escape_html(&clip(or_unknown(value))).into_owned() }

/// Keeps a single value from pushing a message past the provider's length limit.
fn clip(text: &str) -> Cow<'_, str> {
    match text.char_indices().nth(MAX_VALUE_CHARS) {
        Some((end, _)) => Cow::Owned(format!("{}…", &text[..end])),
        None => Cow::Borrowed(text),
    }
}

const fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// Client-submitted values: strings verbatim, other JSON values as JSON text.
fn render_value(value: Option<&Value>) -> String {
    let rendered = match value {
        None | Some(Value::Null) => Cow::Borrowed(UNKNOWN),
        Some(Value::String(text)) => Cow::Borrowed(text.as_str()),
        Some(other) => Cow::Owned(other.to_string()),
    };
    escape_html(&clip(&rendered)).into_owned()
}

fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
