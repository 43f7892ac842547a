use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use beacon_axum::{json_response, response};
use snafu::Snafu;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("No client info received"))]
    MissingClientInfo,

    #[snafu(display("Client info is not a JSON object, error: {source}"))]
    InvalidClientInfo { source: serde_json::Error },
}

impl IntoResponse for Error {
    // SAFETY: allow: high cognitive complexity caused by `tracing` macro
    #[allow(clippy::cognitive_complexity)]
    fn into_response(self) -> Response {
        match self {
            Self::MissingClientInfo => json_response! {
                reason: self,
                status: StatusCode::BAD_REQUEST,
                error: response::Error::new(
                    response::ErrorType::BadRequest,
                    "No client info received",
                )
            },
            Self::InvalidClientInfo { .. } => {
                let message = self.to_string();
                json_response! {
                    reason: self,
                    status: StatusCode::BAD_REQUEST,
                    error: response::Error::new(response::ErrorType::BadRequest, message)
                }
            }
        }
    }
}
