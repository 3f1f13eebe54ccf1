//! Server mode
//!
//! Builds the actix-web application from the startup context and runs it
//! until a shutdown signal arrives.

use actix_cors::Cors;
use actix_web::{
    App, HttpServer,
    middleware::{Compress, Condition},
    web,
};
use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::api::app_routes;
use crate::api::middleware::RequestIdMiddleware;
use crate::config::{CorsConfig, StaticConfig};
use crate::runtime::lifetime::startup::prepare_server_startup;

/// Build CORS middleware from configuration
fn build_cors_middleware(cors_config: &CorsConfig) -> Cors {
    let is_any_origin = cors_config.allowed_origins.iter().any(|o| o == "*");

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
        .allow_any_header()
        .max_age(3600);

    if is_any_origin {
        cors = cors.allow_any_origin();
    } else {
        for origin in &cors_config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server(config: StaticConfig) -> Result<()> {
    let startup = prepare_server_startup(&config).await.map_err(|e| {
        tracing::error!("Server startup failed: {:#}", e);
        e
    })?;

    let link_service = startup.link_service.clone();
    let thumbnails = startup.thumbnails.clone();
    let cors_config = config.cors.clone();

    if cors_config.enabled && cors_config.allowed_origins.is_empty() {
        warn!("CORS enabled but allowed_origins is empty; cross-origin requests will be rejected");
    }

    let workers = config.server.workers.clamp(1, 32);
    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    info!("Using {} workers", workers);
    info!("Starting server at http://{}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(Condition::new(
                cors_config.enabled,
                build_cors_middleware(&cors_config),
            ))
            .wrap(Compress::default())
            .wrap(RequestIdMiddleware)
            .app_data(web::Data::new(link_service.clone()))
            .app_data(web::Data::new(thumbnails.clone()))
            .configure(app_routes)
    })
    .workers(workers)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run()
    .await
    .context("HTTP server error")?;

    info!(
        "Server stopped (storage was {})",
        if startup.guard.is_ready() { "ready" } else { "unavailable" }
    );
    Ok(())
}
