use snafu::Snafu;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Failed to build HTTP client for enrichment lookups, error: {source}"))]
    BuildEnrichmentClient { source: reqwest::Error },
}

/// Why a single enrichment lookup produced no data.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum LookupError {
    #[snafu(display("`{address}` is not an IP address"))]
    NotAnIpAddress { address: String },

    #[snafu(display("request failed, error: {source}"))]
    SendRequest { source: reqwest::Error },

    #[snafu(display("service answered with status {status}"))]
    UnexpectedStatus { status: u16 },

    #[snafu(display("malformed response body, error: {source}"))]
    DecodeBody { source: reqwest::Error },

    #[snafu(display("service refused the request: {message}"))]
    Refused { message: String },
}
