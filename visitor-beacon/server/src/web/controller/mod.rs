// FIXME: remove this after this utoipa issue is fixed: https://github.com/juhaku/utoipa/pull/1423
#![allow(clippy::needless_for_each)]
mod error;

use std::path::Path;

use axum::{
    extract::{Query, State},
    handler::HandlerWithoutStateExt,
    http::{header, HeaderValue, StatusCode, Uri},
    middleware,
    response::{IntoResponse, Response},
    routing, Router,
};
use beacon_axum::{json_response, response::EncapsulatedJson};
use bytes::Bytes;
use serde::Deserialize;
use snafu::ResultExt;
use tower_http::services::{ServeDir, ServeFile};
use utoipa::{IntoParams, OpenApi};
use visitor_beacon_core::{model::BrowserMetadata, DEFAULT_REDIRECT_URL};

pub use self::error::{Error, Result};
use crate::{
    service::{report, RedirectPolicy},
    web::middleware::track_visit,
    ServiceState,
};

/// Every public route.
///
/// All routes but `/log-client-info` report the visit before answering.
pub fn router(service_state: &ServiceState, static_dir: &Path) -> Router {
    let static_files = ServeDir::new(static_dir)
        .call_fallback_on_method_not_allowed(true)
        .fallback(not_found.into_service());

    let tracked_routes = Router::new()
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .route("/source", routing::get(source))
        .fallback_service(static_files)
        .layer(middleware::from_fn_with_state(service_state.clone(), track_visit));

    let untracked_routes = Router::new().route("/log-client-info", routing::post(log_client_info));

    untracked_routes.merge(tracked_routes).with_state(service_state.clone())
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SourceQuery {
    /// Absolute `http(s)` URL to send the visitor to.
    redirect: Option<String>,
}

/// Redirect the visitor
#[utoipa::path(
    get,
    operation_id = "redirect_visitor",
    path = "/source",
    params(SourceQuery),
    responses(
        (status = 302, description = "Redirect to the requested or the default target")
    )
)]
pub async fn source(
    State(service_state): State<ServiceState>,
    Query(SourceQuery { redirect }): Query<SourceQuery>,
) -> Response {
    let target = service_state.redirect_policy.resolve(redirect.as_deref());
    let location = location_header(&service_state.redirect_policy, &target);
    tracing::info!("Redirecting to: {target}");

    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

/// `target`, else the configured default, else the built-in default.
fn location_header(policy: &RedirectPolicy, target: &str) -> HeaderValue {
    HeaderValue::from_str(target)
        .or_else(|_| {
            tracing::warn!("Redirect target `{target}` is not a valid header value");
            HeaderValue::from_str(policy.default_url())
        })
        .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_REDIRECT_URL))
}

/// Report screen and browser properties
#[utoipa::path(
    post,
    operation_id = "log_client_info",
    path = "/log-client-info",
    request_body = BrowserMetadata,
    responses(
        (status = 200, description = "Client info received"),
        (status = 400, description = "Body missing or not a JSON object")
    )
)]
pub async fn log_client_info(
    State(service_state): State<ServiceState>,
    body: Bytes,
) -> Result<EncapsulatedJson<()>> {
    let metadata = parse_client_info(&body)?;
    service_state.metrics.record_client_report();

    let _payload = service_state.notifier.notify(report::client_info_report(&metadata)).await;

    Ok(EncapsulatedJson::<()>::acknowledged())
}

fn parse_client_info(body: &[u8]) -> Result<BrowserMetadata> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(Error::MissingClientInfo);
    }

    let value: serde_json::Value =
        serde_json::from_slice(body).context(error::InvalidClientInfoSnafu)?;
    if value.is_null() {
        return Err(Error::MissingClientInfo);
    }

    // arrays would otherwise fill the fields by position
    let object: serde_json::Map<String, serde_json::Value> =
        serde_json::from_value(value).context(error::InvalidClientInfoSnafu)?;
    serde_json::from_value(serde_json::Value::Object(object)).context(error::InvalidClientInfoSnafu)
}

// SAFETY: `axum` handler must be async
#[allow(clippy::unused_async)]
async fn not_found(uri: Uri) -> Response {
    json_response! {
        status: StatusCode::NOT_FOUND,
        error: beacon_axum::response::Error::new(
            beacon_axum::response::ErrorType::NotFound,
            format!("No route for {uri}"),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(source, log_client_info),
    components(schemas(BrowserMetadata)),
    tags(
        (name = "Visitor Beacon", description = "Visitor reporting endpoints")
    )
)]
pub struct ApiDoc;
