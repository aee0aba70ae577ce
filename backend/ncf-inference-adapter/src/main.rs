use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ncf_inference_adapter::handlers::{self, AdapterState};
use ncf_inference_adapter::middleware::RequestTracing;
use ncf_inference_adapter::{Config, HttpModelServer};

#[actix_web::main]
async fn main() -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,actix_web=info,ncf_inference_adapter=debug".into());
    if config.json_logs() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    config
        .validate()
        .context("Configuration validation failed")?;

    info!(
        "Starting ncf-inference-adapter v{}",
        env!("CARGO_PKG_VERSION")
    );
    info!(model_server_url = %config.model_server_url, "Forwarding invocations");

    let state = web::Data::new(AdapterState::new(
        Arc::new(HttpModelServer::new()),
        config.model_server_url.clone(),
    ));
    let payload_limit = config.max_payload_bytes;

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(RequestTracing)
            .app_data(state.clone())
            .app_data(web::PayloadConfig::new(payload_limit))
            .configure(handlers::configure)
    });
    if let Some(workers) = config.http_workers {
        server = server.workers(workers);
    }

    info!("Starting HTTP server on {}:{}", config.http_host, config.http_port);

    server
        .bind((config.http_host.as_str(), config.http_port))
        .context("Failed to bind HTTP server")?
        .run()
        .await
        .context("HTTP server error")
}
