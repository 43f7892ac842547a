use snafu::Snafu;

use crate::{service, web};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("{source}"))]
    Metrics { source: beacon_metrics::Error },

    #[snafu(display("{source}"))]
    Service { source: service::error::Error },

    #[snafu(display("Failed to initialize Telegram client, error: {source}"))]
    InitializeTelegramClient { source: notification::Error },

    #[snafu(display("{source}"))]
    Web { source: web::Error },
}

impl From<beacon_metrics::Error> for Error {
    fn from(source: beacon_metrics::Error) -> Self { Self::Metrics { source } }
}

impl From<service::error::Error> for Error {
    fn from(source: service::error::Error) -> Self { Self::Service { source } }
}

impl From<web::Error> for Error {
    fn from(source: web::Error) -> Self { Self::Web { source } }
}
