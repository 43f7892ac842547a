use super::{GeoInfo, RiskInfo};

/// Outcome of one enrichment call.
///
/// A failed call is not an error for the pipeline: the report renders it
/// exactly like an empty payload.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Lookup<T> {
    Resolved(T),
    Failed { reason: String },
}

impl<T> Lookup<T> {
    pub fn failed(reason: impl ToString) -> Self { Self::Failed { reason: reason.to_string() } }

    #[must_use]
    pub const fn is_failed(&self) -> bool { matches!(self, Self::Failed { .. }) }
}

impl<T: Default> Lookup<T> {
    /// The resolved payload, or an empty one if the call failed.
    #[must_use]
    pub fn into_value_or_default(self) -> T {
        match self {
            Self::Resolved(value) => value,
            Self::Failed { .. } => T::default(),
        }
    }
}

/// Everything the third-party services told us about one address.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Enrichment {
    pub geo: Lookup<GeoInfo>,
    pub risk: Lookup<RiskInfo>,
}

impl Enrichment {
    /// Enrichment with both lookups failed for `reason`.
    #[must_use]
    pub fn unavailable(reason: &str) -> Self {
        Self { geo: Lookup::failed(reason), risk: Lookup::failed(reason) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_lookup_degrades_to_default() {
        let lookup = Lookup::<GeoInfo>::failed("timed out");
        assert!(lookup.is_failed());
        assert_eq!(lookup.into_value_or_default(), GeoInfo::default());
    }

    #[test]
    fn test_resolved_lookup() {
        let risk = RiskInfo { vpn: true, ..RiskInfo::default() };
        let lookup = Lookup::Resolved(risk.clone());
        assert!(!lookup.is_failed());
        assert_eq!(lookup.into_value_or_default(), risk);
    }
}
