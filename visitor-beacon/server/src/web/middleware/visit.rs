use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use beacon_axum::UNKNOWN;

use crate::{service::report, ServiceState};

/// Reports the visit to the operator chat, then runs the downstream handler.
///
/// Enrichment and delivery failures are logged and do not affect the
/// response.
pub async fn track_visit(
    State(service_state): State<ServiceState>,
    request: Request,
    next: Next,
) -> Response {
    let peer = request.extensions().get::<ConnectInfo<SocketAddr>>().map(|ConnectInfo(addr)| addr);
    let address = beacon_axum::resolve_client_address(request.headers(), peer);
    let user_agent = request
        .headers()
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string);

    tracing::info!(%address, path = %request.uri().path(), "Track visit");
    service_state.metrics.record_visit();

    let enrichment = service_state.enrichment.enrich(&address).await;
    if address != UNKNOWN {
        if enrichment.geo.is_failed() {
            service_state.metrics.record_lookup_failure("geo");
        }
        if enrichment.risk.is_failed() {
            service_state.metrics.record_lookup_failure("risk");
        }
    }

    let report = report::visit_report(&address, enrichment, user_agent.as_deref());
    let _payload = service_state.notifier.notify(report).await;

    next.run(request).await
}
