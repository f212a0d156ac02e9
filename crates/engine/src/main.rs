//! CineMatch Service - Hybrid Movie Recommendations
//!
//! Serves personalized recommendations from precomputed artifacts: an
//! item-item similarity matrix plus a pretrained factor model.
//! Port: 8083

use actix_web::{web, App, HttpServer};
use cinematch_core::{load_dotenv, ArtifactConfig, ConfigLoader, ServiceConfig};
use cinematch_engine::{server, HybridRecommender, RecommenderContext};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    let service_config = ServiceConfig::from_env()?;
    service_config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(service_config.log_level.clone()))
        .json()
        .init();

    let artifact_config = ArtifactConfig::from_env()?;
    artifact_config.validate()?;

    info!(dir = %artifact_config.dir.display(), "Loading serving artifacts");
    let context = RecommenderContext::load(&artifact_config)?;
    let recommender = Arc::new(HybridRecommender::new(Arc::new(context)));

    let app_state = web::Data::new(server::AppState { recommender });

    let bind_addr = format!("{}:{}", service_config.host, service_config.port);
    info!("CineMatch service listening on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .route("/health", web::get().to(server::health))
            .configure(server::configure_routes)
            .wrap(actix_web::middleware::Logger::default())
    })
    .workers(service_config.workers)
    .bind(&bind_addr)?
    .run()
    .await?;

    Ok(())
}
