mod error;
pub mod service;
mod web;

use std::{future::Future, net::SocketAddr, path::PathBuf, pin::Pin, sync::Arc};

use beacon_metrics::DefaultMetrics;
use futures::{future::BoxFuture, FutureExt};
use notification::telegram;
use sigfinn::{ExitStatus, LifecycleManager, Shutdown};
use snafu::ResultExt;
use visitor_beacon_core::{
    config::{Config, EnrichmentConfig, RedirectConfig, TelegramConfig},
    ServerInfo,
};

pub use self::{
    error::{Error, Result},
    web::{app, ApiDoc, ServiceState},
};
use self::service::{EnrichmentClient, Notifier, RedirectPolicy};

/// # Errors
/// Returns errors when server fails to start
pub async fn serve_with_shutdown(config: Config, server_info: ServerInfo) -> Result<()> {
    let Config { web, metrics, enrichment, telegram } = config;

    tracing::info!(
        version = %server_info.version,
        branch = %server_info.branch,
        commit_hash = %server_info.commit_hash,
        "Starting server"
    );

    let default_metrics = DefaultMetrics::new()?;

    let enrichment_client = initialize_enrichment_client(&enrichment)?;

    let notifier = initialize_notifier(telegram, default_metrics.clone())?;

    let redirect_policy = initialize_redirect_policy(&web.redirect);

    let service_state =
        ServiceState::new(enrichment_client, notifier, default_metrics.clone(), redirect_policy);

    let lifecycle_manager = LifecycleManager::<Error>::new();

    let _handle = lifecycle_manager.spawn(
        "Http Server",
        create_web_http_server_future(web.listen_address, service_state, web.static_dir),
    );

    if metrics.enable {
        let _handle = lifecycle_manager.spawn(
            "Metrics server",
            create_metrics_server_future(metrics.listen_address, default_metrics),
        );
    }

    if let Ok(Err(err)) = lifecycle_manager.serve().await {
        tracing::error!("{err}");
        Err(err)
    } else {
        Ok(())
    }
}

#[tracing::instrument(
    skip_all,
    fields(geo_endpoint = %config.geo_endpoint, risk_endpoint = %config.risk_endpoint)
)]
fn initialize_enrichment_client(config: &EnrichmentConfig) -> Result<EnrichmentClient> {
    tracing::info!("Initializing enrichment client");

    if config.geo_token.is_empty() {
        tracing::warn!("Geolocation token is not configured, lookups are likely to be refused");
    }
    if config.risk_key.is_empty() {
        tracing::warn!("Risk service key is not configured, lookups are likely to be refused");
    }
    tracing::debug!("Outbound timeout: {:?}", config.timeout);

    Ok(EnrichmentClient::new(config)?)
}

#[tracing::instrument(skip_all, fields(api_endpoint = %config.api_endpoint))]
fn initialize_notifier(config: TelegramConfig, metrics: DefaultMetrics) -> Result<Notifier> {
    tracing::info!("Initializing Telegram client");

    let TelegramConfig { api_endpoint, bot_token, chat_id, timeout } = config;
    if bot_token.is_empty() || chat_id.is_empty() {
        tracing::warn!(
            "Telegram bot token or chat id is not configured, reports will not be delivered"
        );
    }

    let client =
        telegram::Client::new(telegram::Config { api_endpoint, bot_token, chat_id, timeout })
            .context(error::InitializeTelegramClientSnafu)?;

    Ok(Notifier::new(Arc::new(client), metrics))
}

#[tracing::instrument(skip_all, fields(default_url = %config.default_url))]
fn initialize_redirect_policy(config: &RedirectConfig) -> RedirectPolicy {
    let policy = RedirectPolicy::new(config);

    if policy.is_open() {
        tracing::warn!(
            "`web.redirect.allowed_hosts` is not set, `/source` redirects to any http(s) URL"
        );
    } else {
        tracing::info!("Redirect allow-list: {:?}", config.allowed_hosts);
    }

    policy
}

fn create_web_http_server_future(
    listen_address: SocketAddr,
    service_state: ServiceState,
    static_dir: PathBuf,
) -> impl FnOnce(Shutdown) -> BoxFuture<'static, ExitStatus<Error>> {
    move |shutdown_signal| {
        async move {
            tracing::info!("Listen Web HTTP server endpoint on {listen_address}");
            tracing::info!("Serve static files from {}", static_dir.display());

            let result =
                web::new_api_server(listen_address, service_state, &static_dir, shutdown_signal)
                    .await;

            match result {
                Ok(()) => {
                    tracing::info!("HTTP server is shut down gracefully");
                    ExitStatus::Success
                }
                Err(err) => ExitStatus::FatalError(Error::from(err)),
            }
        }
        .boxed()
    }
}

fn create_metrics_server_future<Metrics>(
    listen_address: SocketAddr,
    metrics: Metrics,
) -> impl FnOnce(Shutdown) -> Pin<Box<dyn Future<Output = ExitStatus<Error>> + Send>>
where
    Metrics: beacon_metrics::Metrics + 'static,
{
    move |signal| {
        async move {
            tracing::info!("Listen metrics endpoint on {listen_address}");
            let result = beacon_metrics::start_metrics_server(listen_address, metrics, signal).await;
            match result {
                Ok(()) => {
                    tracing::info!("Metrics server is shut down gracefully");
                    ExitStatus::Success
                }
                Err(err) => ExitStatus::FatalError(Error::from(err)),
            }
        }
        .boxed()
    }
}
