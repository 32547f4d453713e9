//! ReviewRag HTTP server
//!
//! Actix-web search form and JSON API over a `RetrievalEngine`

mod error;
mod render;
mod routes;
mod state;
#[cfg(test)]
mod test_support;
mod types;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use reviewrag_common::{AppConfig, Result};
use reviewrag_vector::RetrievalEngine;
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;

pub use error::ApiError;
pub use render::{HitView, IndexPage, Templates};
pub use state::AppState;
pub use types::{QueryForm, SearchParams, SearchResponse};

/// Register all routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(routes::home::index)
        .service(routes::home::submit)
        .service(routes::search::search)
        .service(routes::search::stats);
}

/// Serve `engine` on the configured address until shutdown
pub async fn start_server(config: AppConfig, engine: Arc<RetrievalEngine>) -> Result<()> {
    let state = web::Data::new(AppState::new(&config, engine)?);
    let bind_addr = config.server_bind_address();

    info!("Starting HTTP server on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    info!("HTTP server stopped");
    Ok(())
}
