pub mod error;
mod server;
mod traits;

use prometheus::{IntCounter, IntCounterVec, Opts, Registry};

pub use self::{error::Error, server::start_metrics_server, traits::Metrics};

const NAMESPACE: &str = "visitor_beacon";

/// Counters describing what the beacon has observed and delivered.
#[derive(Clone, Debug)]
pub struct DefaultMetrics {
    registry: Registry,
    visits: IntCounter,
    client_reports: IntCounter,
    lookup_failures: IntCounterVec,
    notifications: IntCounterVec,
}

impl DefaultMetrics {
    /// # Errors
    /// Returns an error if a collector can not be created or registered.
    pub fn new() -> Result<Self, Error> {
        let registry = Registry::new();

        let visits = IntCounter::with_opts(
            Opts::new("visits_total", "Requests which went through visit tracking")
                .namespace(NAMESPACE),
        )?;
        let client_reports = IntCounter::with_opts(
            Opts::new("client_reports_total", "Accepted client metadata submissions")
                .namespace(NAMESPACE),
        )?;
        let lookup_failures = IntCounterVec::new(
            Opts::new("lookup_failures_total", "Failed enrichment lookups").namespace(NAMESPACE),
            &["service"],
        )?;
        let notifications = IntCounterVec::new(
            Opts::new("notifications_total", "Notification deliveries by outcome")
                .namespace(NAMESPACE),
            &["outcome"],
        )?;

        registry.register(Box::new(visits.clone()))?;
        registry.register(Box::new(client_reports.clone()))?;
        registry.register(Box::new(lookup_failures.clone()))?;
        registry.register(Box::new(notifications.clone()))?;

        Ok(Self { registry, visits, client_reports, lookup_failures, notifications })
    }

    pub fn record_visit(&self) { self.visits.inc(); }

    pub fn record_client_report(&self) { self.client_reports.inc(); }

    pub fn record_lookup_failure(&self, service: &str) {
        self.lookup_failures.with_label_values(&[service]).inc();
    }

    pub fn record_notification(&self, delivered: bool) {
        let outcome = if delivered { "delivered" } else { "failed" };
        self.notifications.with_label_values(&[outcome]).inc();
    }
}

impl Metrics for DefaultMetrics {
    fn gather(&self) -> Vec<prometheus::proto::MetricFamily> { self.registry.gather() }
}

#[cfg(test)]
mod tests {
    use crate::{DefaultMetrics, Metrics};

    #[test]
    fn test_new() { drop(DefaultMetrics::new().unwrap()); }

    #[test]
    fn test_counters_are_exported() {
        let metrics = DefaultMetrics::new().unwrap();
        metrics.record_visit();
        metrics.record_visit();
        metrics.record_lookup_failure("geo");
        metrics.record_notification(false);

        let text = metrics.encode_text().unwrap();
        assert!(text.contains("visitor_beacon_visits_total 2"));
        assert!(text.contains("visitor_beacon_lookup_failures_total{service=\"geo\"} 1"));
        assert!(text.contains("visitor_beacon_notifications_total{outcome=\"failed\"} 1"));
        assert!(text.contains("visitor_beacon_client_reports_total 0"));
    }
}
