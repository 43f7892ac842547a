use snafu::Snafu;

/// Errors that can occur in the notification crate.
#[allow(variant_size_differences)]
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Failed to create the HTTP client.
    #[snafu(display("Failed to create HTTP client: {source}"))]
    BuildHttpClient {
        /// The underlying reqwest error.
        source: reqwest::Error,
    },

    /// HTTP request failed.
    #[snafu(display("HTTP request failed: {source}"))]
    HttpRequest {
        /// The underlying reqwest error, stripped of its URL.
        source: reqwest::Error,
    },

    /// The provider answered with a non-success status.
    #[snafu(display("Provider rejected the message with status {status}: {body}"))]
    Rejected {
        /// HTTP status code returned by the provider.
        status: u16,
        /// Diagnostic body returned by the provider, possibly empty.
        body: String,
    },

    /// The provider answered with a body which is not JSON.
    #[snafu(display("Failed to decode provider response: {source}"))]
    DecodeResponse {
        /// The underlying reqwest error.
        source: reqwest::Error,
    },
}
