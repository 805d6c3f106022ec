//! Server lifecycle management helpers.
//!
//! Bootstraps the sheet service from configuration, wires the HTTP server
//! and coordinates graceful shutdown.

use crate::middleware;
use actix_web::{web, App, HttpServer};
use anyhow::Result;
use log::{debug, info, warn};
use sheetful_configs::ServerConfig;
use sheetful_core::SheetsService;
use sheetful_gateway::{AccessGateway, GoogleSheetsGateway, GoogleSheetsOptions};
use std::sync::Arc;
use std::time::Duration;

/// Components shared by every HTTP worker.
#[derive(Clone)]
pub struct ApplicationComponents {
    pub service: Arc<SheetsService>,
}

/// Build the Google-backed service described by `config`.
pub fn bootstrap(config: &ServerConfig) -> Result<ApplicationComponents> {
    let google = &config.google;
    let options = GoogleSheetsOptions {
        api_base_url: google.api_base_url.clone(),
        request_timeout: Duration::from_secs(google.request_timeout_secs),
        value_input_option: google.value_input_option.clone(),
        value_render_option: google.value_render_option.clone(),
    };
    debug!(
        "Google Sheets gateway: base_url={} timeout={}s input={} render={}",
        options.api_base_url,
        google.request_timeout_secs,
        options.value_input_option,
        options.value_render_option
    );

    let gateway = GoogleSheetsGateway::new(options)?;

    if google.service_account_key.is_some() {
        warn!(
            "GOOGLE_SERVICE_ACCOUNT_KEY is set but service-account signing is not supported; \
             requests need an access token or an API key"
        );
    }

    Ok(bootstrap_with_gateway(config, Arc::new(gateway)))
}

/// Build components around an arbitrary gateway.
pub fn bootstrap_with_gateway(
    config: &ServerConfig,
    gateway: Arc<dyn AccessGateway>,
) -> ApplicationComponents {
    let service = SheetsService::new(gateway, config.google.api_key.clone())
        .with_page_limits(config.limits.default_page_limit, config.limits.max_page_limit);

    if !service.has_static_key() {
        warn!(
            "No GOOGLE_API_KEY configured: every request must carry an access token \
             (Authorization: Bearer or X-Google-Access-Token)"
        );
    }

    ApplicationComponents {
        service: Arc::new(service),
    }
}

/// Register shared state, body and query extractor configs, and routes.
pub fn configure_app(
    cfg: &mut web::ServiceConfig,
    components: &ApplicationComponents,
    config: &ServerConfig,
) {
    cfg.app_data(web::Data::new(components.service.clone()))
        .app_data(sheetful_api::json_config(config.limits.max_request_body_size))
        .app_data(sheetful_api::query_config())
        .configure(sheetful_api::configure_routes);
}

/// Start the HTTP server and block until it stops or Ctrl+C is received.
pub async fn run(config: &ServerConfig, components: ApplicationComponents) -> Result<()> {
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting HTTP server on {}", bind_addr);

    let app_config = config.clone();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::request_logger())
            .wrap(middleware::build_cors_from_config(&app_config))
            .configure(|cfg| configure_app(cfg, &components, &app_config))
    })
    .bind(&bind_addr)?
    .workers(if config.server.workers == 0 {
        num_cpus::get()
    } else {
        config.server.workers
    })
    // Per-worker max concurrent connections
    .max_connections(config.performance.max_connections)
    .keep_alive(Duration::from_secs(config.performance.keepalive_timeout))
    // Client must send request headers within this time
    .client_request_timeout(Duration::from_secs(config.performance.client_request_timeout))
    .client_disconnect_timeout(Duration::from_secs(config.performance.client_disconnect_timeout))
    .run();

    info!("Server listening on http://{}", bind_addr);

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    tokio::select! {
        result = server_task => {
            match result {
                Ok(Err(e)) => log::error!("Server error: {}", e),
                Err(e) => log::error!("Server task failed: {}", e),
                Ok(Ok(())) => {}
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
            server_handle.stop(true).await;
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
