use prometheus::{Encoder, TextEncoder};

use crate::Error;

pub trait Metrics: Clone + Send + Sync {
    fn gather(&self) -> Vec<prometheus::proto::MetricFamily>;

    /// Renders every gathered family in the Prometheus text exposition format.
    ///
    /// # Errors
    /// Returns an error if the families can not be encoded.
    fn encode_text(&self) -> Result<String, Error> {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&self.gather(), &mut buffer)
            .map_err(|source| Error::EncodeMetrics { source })?;
        String::from_utf8(buffer).map_err(|source| Error::MetricsNotUtf8 { source })
    }
}
