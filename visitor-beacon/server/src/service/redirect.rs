use std::borrow::Cow;

use url::Url;
use visitor_beacon_core::config::RedirectConfig;

/// Decides where `/source` sends the visitor.
#[derive(Clone, Debug)]
pub struct RedirectPolicy {
    default_url: String,
    allowed_hosts: Option<Vec<String>>,
}

impl RedirectPolicy {
    #[must_use]
    pub fn new(config: &RedirectConfig) -> Self {
        let RedirectConfig { default_url, allowed_hosts } = config;
        let allowed_hosts = allowed_hosts.as_ref().map(|hosts| {
            hosts.iter().map(|host| host.trim().to_ascii_lowercase()).collect::<Vec<_>>()
        });

        Self { default_url: default_url.clone(), allowed_hosts }
    }

    /// `true` when any absolute `http(s)` target is accepted.
    #[must_use]
    pub const fn is_open(&self) -> bool { self.allowed_hosts.is_none() }

    #[must_use]
    pub fn default_url(&self) -> &str { &self.default_url }

    /// Returns the requested target, or the default when the target is
    /// missing, not an absolute `http(s)` URL or on a host outside the
    /// allow-list.
    #[must_use]
    pub fn resolve<'a>(&'a self, requested: Option<&'a str>) -> Cow<'a, str> {
        let Some(requested) = requested.map(str::trim).filter(|target| !target.is_empty()) else {
            return Cow::Borrowed(&self.default_url);
        };

        let url = match Url::parse(requested) {
            Ok(url) => url,
            Err(err) => {
                tracing::debug!("Reject redirect target `{requested}`: {err}");
                return Cow::Borrowed(&self.default_url);
            }
        };

        if !matches!(url.scheme(), "http" | "https") {
            tracing::debug!("Reject redirect target `{requested}`: unsupported scheme");
            return Cow::Borrowed(&self.default_url);
        }

        if let Some(allowed_hosts) = &self.allowed_hosts {
            let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
            if !allowed_hosts.contains(&host) {
                tracing::warn!("Reject redirect to host `{host}` outside the allow-list");
                return Cow::Borrowed(&self.default_url);
            }
        }

        // a `Location` header only carries visible ASCII
        if requested.bytes().all(|b| (0x20..0x7f).contains(&b)) {
            Cow::Borrowed(requested)
        } else {
            Cow::Owned(url.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(allowed_hosts: Option<&[&str]>) -> RedirectPolicy {
        RedirectPolicy::new(&RedirectConfig {
            default_url: "https://www.google.com".to_string(),
            allowed_hosts: allowed_hosts
                .map(|hosts| hosts.iter().map(ToString::to_string).collect()),
        })
    }

    #[test]
    fn test_missing_target_uses_default() {
        let policy = policy(None);
        assert_eq!(policy.resolve(None), "https://www.google.com");
        assert_eq!(policy.resolve(Some("")), "https://www.google.com");
        assert_eq!(policy.resolve(Some("   ")), "https://www.google.com");
    }

    #[test]
    fn test_open_policy_accepts_any_http_target() {
        let policy = policy(None);
        assert!(policy.is_open());
        assert_eq!(policy.resolve(Some("https://example.com")), "https://example.com");
        assert_eq!(
            policy.resolve(Some("http://example.org/path?q=1")),
            "http://example.org/path?q=1"
        );
    }

    #[test]
    fn test_rejects_non_http_targets() {
        let policy = policy(None);
        for target in ["javascript:alert(1)", "ftp://example.com", "/relative", "not a url"] {
            assert_eq!(policy.resolve(Some(target)), "https://www.google.com", "{target}");
        }
    }

    #[test]
    fn test_allow_list() {
        let policy = policy(Some(&["Example.com"]));
        assert!(!policy.is_open());
        assert_eq!(policy.resolve(Some("https://EXAMPLE.com/a")), "https://EXAMPLE.com/a");
        assert_eq!(policy.resolve(Some("https://evil.test/")), "https://www.google.com");
    }

    #[test]
    fn test_non_ascii_target_is_normalized() {
        let policy = policy(None);
        assert_eq!(
            policy.resolve(Some("https://example.com/caf\u{e9}")),
            "https://example.com/caf%C3%A9"
        );
    }
}
