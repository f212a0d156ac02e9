//! HTTP surface for the recommendation engine
//!
//! All handlers run against `Arc`-shared read-only state; nothing is
//! mutated after startup.

use crate::recommend::HybridRecommender;
use actix_web::{web, HttpResponse, Responder};
use cinematch_core::{validate_count, validate_title, validate_user_id, CineMatchError};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

/// Application state shared across all handlers
pub struct AppState {
    pub recommender: Arc<HybridRecommender>,
}

/// Recommendation request body
#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub user_id: u32,
    pub title: String,
    /// Requested list length, defaults to 5
    pub count: Option<usize>,
}

/// Catalog listing: the selector values and the valid user-id range
#[derive(Debug, Serialize)]
pub struct TitlesResponse {
    pub titles: Vec<String>,
    pub count: usize,
    pub max_user_id: u32,
}

#[derive(Debug, Deserialize)]
pub struct SimilarQuery {
    pub title: String,
    pub count: Option<usize>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    service: String,
    version: String,
}

/// Health check endpoint
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        service: "cinematch-service".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Map an engine error to its HTTP response
fn error_response(err: &CineMatchError) -> HttpResponse {
    match err {
        CineMatchError::TitleNotFound { query, suggestions } => {
            HttpResponse::NotFound().json(json!({
                "error": "title_not_found",
                "query": query,
                "suggestions": suggestions,
            }))
        }
        CineMatchError::UserNotFound { user_id } => HttpResponse::NotFound().json(json!({
            "error": "user_not_found",
            "user_id": user_id,
        })),
        CineMatchError::Validation { message, field } => HttpResponse::BadRequest().json(json!({
            "error": "invalid_request",
            "message": message,
            "field": field,
        })),
        other => {
            tracing::error!("Recommendation request failed: {}", other);
            HttpResponse::InternalServerError().json(json!({
                "error": "internal",
                "message": other.to_string(),
            }))
        }
    }
}

async fn list_titles(data: web::Data<AppState>) -> impl Responder {
    let context = data.recommender.context();
    let titles = context.catalog.titles();

    HttpResponse::Ok().json(TitlesResponse {
        count: titles.len(),
        titles,
        max_user_id: context.max_user_id,
    })
}

async fn recommend(
    data: web::Data<AppState>,
    payload: web::Json<RecommendRequest>,
) -> impl Responder {
    let request = payload.into_inner();
    let context = data.recommender.context();

    if let Err(e) = validate_user_id(request.user_id, context.max_user_id) {
        return error_response(&e);
    }
    if let Err(e) = validate_title(&request.title) {
        return error_response(&e);
    }
    let count = match validate_count(request.count) {
        Ok(count) => count,
        Err(e) => return error_response(&e),
    };

    match data
        .recommender
        .recommend(request.user_id, &request.title, count)
    {
        Ok(set) => HttpResponse::Ok().json(set),
        Err(e) => error_response(&e),
    }
}

async fn similar_titles(
    data: web::Data<AppState>,
    query: web::Query<SimilarQuery>,
) -> impl Responder {
    if let Err(e) = validate_title(&query.title) {
        return error_response(&e);
    }
    let count = match validate_count(query.count) {
        Ok(count) => count,
        Err(e) => return error_response(&e),
    };

    match data.recommender.similar_titles(&query.title, count) {
        Ok(similar) => HttpResponse::Ok().json(similar),
        Err(e) => error_response(&e),
    }
}

/// Configure application routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health))
            .route("/titles", web::get().to(list_titles))
            .route("/titles/similar", web::get().to(similar_titles))
            .route("/recommendations", web::post().to(recommend)),
    );
}
