use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Failed to create or register a metric, error: {source}"))]
    RegisterMetric { source: prometheus::Error },

    #[snafu(display("Failed to encode metrics, error: {source}"))]
    EncodeMetrics { source: prometheus::Error },

    #[snafu(display("Encoded metrics are not valid UTF-8, error: {source}"))]
    MetricsNotUtf8 { source: std::string::FromUtf8Error },

    #[snafu(display("Error occurs while binding metrics server, error: {source}"))]
    BindMetricsServer { source: std::io::Error },

    #[snafu(display("Error occurs while serving metrics server, error: {source}"))]
    ServeMetricsServer { source: std::io::Error },
}

impl From<prometheus::Error> for Error {
    fn from(source: prometheus::Error) -> Self { Self::RegisterMetric { source } }
}
