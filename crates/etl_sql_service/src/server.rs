use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use etl_llm::{LLMProvider, OpenAIProvider};
use log::{error, info, warn};

use crate::config::ServiceConfig;
use crate::controllers::{sql_controller, system_controller};
use crate::middleware::TracingMiddleware;

/// Process-wide state shared by every worker. Built once at startup and
/// never mutated.
pub struct AppState {
    pub llm_provider: Arc<dyn LLMProvider>,
}

impl AppState {
    pub fn from_config(config: &ServiceConfig) -> Self {
        if config.api_key.is_none() {
            warn!("API_KEY is not set; SQL generation requests will fail until it is configured");
        }

        let provider = OpenAIProvider::new(config.api_key.clone().unwrap_or_default())
            .with_base_url(config.base_url.clone())
            .with_model(config.model.clone());

        Self {
            llm_provider: Arc::new(provider),
        }
    }
}

pub fn app_config(cfg: &mut web::ServiceConfig) {
    cfg.configure(system_controller::config)
        .configure(sql_controller::config);
}

/// Request bodies above `limit` bytes are answered with 413 before any
/// handler runs.
pub fn payload_config(limit: usize) -> web::PayloadConfig {
    web::PayloadConfig::new(limit)
}

/// Any origin, any method, any header.
pub fn cors() -> Cors {
    Cors::permissive()
}

pub async fn run(config: ServiceConfig) -> anyhow::Result<()> {
    info!("Starting SQL generation service...");

    let app_state = web::Data::new(AppState::from_config(&config));
    let payload_limit = config.max_body_bytes;
    let bind_address = config.bind_address();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .app_data(payload_config(payload_limit))
            .wrap(cors())
            .wrap(TracingMiddleware)
            .configure(app_config)
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind server to {bind_address}"))?
    .run();

    info!(
        "Serving on http://{} (model: {})",
        bind_address, config.model
    );

    if let Err(e) = server.await {
        error!("Web server error: {}", e);
        return Err(e).context("Web server error");
    }

    Ok(())
}
