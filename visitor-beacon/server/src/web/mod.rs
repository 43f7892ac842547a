pub mod controller;
pub mod error;
pub mod middleware;

use std::{any::Any, future::Future, net::SocketAddr, path::Path, sync::Arc};

use axum::{
    extract::Request,
    http::StatusCode,
    response::{IntoResponse, Response},
    Router, ServiceExt,
};
use beacon_axum::{json_response, response};
use beacon_metrics::DefaultMetrics;
use snafu::ResultExt;
use tokio::net::TcpListener;
use tower::{Layer, ServiceBuilder};
use tower_http::{
    catch_panic::CatchPanicLayer, compression::CompressionLayer,
    normalize_path::NormalizePathLayer, trace::TraceLayer,
};

pub use self::{controller::ApiDoc, error::Error};
use crate::service::{EnrichmentClient, Notifier, RedirectPolicy};

pub async fn new_api_server<ShutdownSignal>(
    socket_address: SocketAddr,
    service_state: ServiceState,
    static_dir: &Path,
    shutdown_signal: ShutdownSignal,
) -> Result<(), Error>
where
    ShutdownSignal: Future<Output = ()> + Send + 'static,
{
    let router = {
        let router = NormalizePathLayer::trim_trailing_slash().layer(app(&service_state, static_dir));
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(router)
    };

    let listener = TcpListener::bind(&socket_address).await.context(error::BindTcpServerSnafu)?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|err| Error::ServeHttpServer { message: err.to_string() })
}

/// Public routes wrapped with tracing, panic recovery and compression.
pub fn app(service_state: &ServiceState, static_dir: &Path) -> Router {
    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CompressionLayer::new());

    controller::router(service_state, static_dir).layer(middleware_stack)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let reason = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");

    json_response! {
        reason: reason,
        status: StatusCode::INTERNAL_SERVER_ERROR,
        error: response::Error::new(response::ErrorType::Internal, "Internal server error")
    }
}

#[derive(Clone, Debug)]
pub struct ServiceState {
    pub enrichment: EnrichmentClient,
    pub notifier: Notifier,
    pub metrics: DefaultMetrics,
    pub redirect_policy: Arc<RedirectPolicy>,
}

impl ServiceState {
    #[must_use]
    pub fn new(
        enrichment: EnrichmentClient,
        notifier: Notifier,
        metrics: DefaultMetrics,
        redirect_policy: RedirectPolicy,
    ) -> Self {
        Self { enrichment, notifier, metrics, redirect_policy: Arc::new(redirect_policy) }
    }
}
