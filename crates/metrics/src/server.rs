use std::{future::Future, net::SocketAddr};

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing, Router,
};
use bytes::Bytes;
use snafu::ResultExt;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{error, Error, Metrics};

/// Serves `GET /metrics` on `listen_address` until `shutdown_signal` resolves.
///
/// # Errors
/// Returns an error if the listener can not be bound or the server fails.
pub async fn start_metrics_server<M, ShutdownSignal>(
    listen_address: SocketAddr,
    metrics: M,
    shutdown_signal: ShutdownSignal,
) -> Result<(), Error>
where
    M: Metrics + 'static,
    ShutdownSignal: Future<Output = ()> + Send + 'static,
{
    let router = Router::new()
        .route("/metrics", routing::get(export::<M>))
        .layer(TraceLayer::new_for_http())
        .with_state(metrics);

    let listener =
        TcpListener::bind(&listen_address).await.context(error::BindMetricsServerSnafu)?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .context(error::ServeMetricsServerSnafu)
}

async fn export<M: Metrics>(State(metrics): State<M>) -> Response {
    match metrics.encode_text() {
        Ok(text) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, mime::TEXT_PLAIN_UTF_8.as_ref())],
            Bytes::from(text),
        )
            .into_response(),
        Err(err) => {
            tracing::error!("{err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
