//! HTTP surface integration tests

mod common;

use actix_web::{test, web, App};
use cinematch_engine::server::{configure_routes, AppState};
use cinematch_engine::{HybridRecommender, RecommenderContext};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;

fn app_state(dir: &TempDir) -> web::Data<AppState> {
    let config = common::write_fixture_artifacts(dir.path());
    let context = RecommenderContext::load(&config).unwrap();
    let recommender = Arc::new(HybridRecommender::new(Arc::new(context)));
    web::Data::new(AppState { recommender })
}

#[actix_web::test]
async fn test_list_titles() {
    let dir = TempDir::new().unwrap();
    let app = test::init_service(
        App::new()
            .app_data(app_state(&dir))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/titles").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["count"], 6);
    assert_eq!(body["max_user_id"], 5);
    assert_eq!(body["titles"][0], "Toy Story (1995)");
}

#[actix_web::test]
async fn test_recommendations_happy_path() {
    let dir = TempDir::new().unwrap();
    let app = test::init_service(
        App::new()
            .app_data(app_state(&dir))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/recommendations")
        .set_json(json!({"user_id": 1, "title": "Toy Story (1995)", "count": 3}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user_id"], 1);
    assert_eq!(body["seed_title"], "Toy Story (1995)");
    let recommendations = body["recommendations"].as_array().unwrap();
    assert!(recommendations.len() <= 3);
    assert!(!recommendations.is_empty());
}

#[actix_web::test]
async fn test_recommendations_default_count_is_five() {
    let dir = TempDir::new().unwrap();
    let app = test::init_service(
        App::new()
            .app_data(app_state(&dir))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/recommendations")
        .set_json(json!({"user_id": 1, "title": "Toy Story (1995)"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert!(body["recommendations"].as_array().unwrap().len() <= 5);
}

#[actix_web::test]
async fn test_recommendations_untrained_user_is_404() {
    let dir = TempDir::new().unwrap();
    let app = test::init_service(
        App::new()
            .app_data(app_state(&dir))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/recommendations")
        .set_json(json!({"user_id": 4, "title": "Toy Story (1995)"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "user_not_found");
    assert_eq!(body["user_id"], 4);
}

#[actix_web::test]
async fn test_recommendations_out_of_range_user_is_400() {
    let dir = TempDir::new().unwrap();
    let app = test::init_service(
        App::new()
            .app_data(app_state(&dir))
            .configure(configure_routes),
    )
    .await;

    // Above the ratings-file maximum of 5
    let req = test::TestRequest::post()
        .uri("/api/v1/recommendations")
        .set_json(json!({"user_id": 99, "title": "Toy Story (1995)"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_request");
    assert_eq!(body["field"], "user_id");
}

#[actix_web::test]
async fn test_recommendations_zero_count_is_400() {
    let dir = TempDir::new().unwrap();
    let app = test::init_service(
        App::new()
            .app_data(app_state(&dir))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/recommendations")
        .set_json(json!({"user_id": 1, "title": "Toy Story (1995)", "count": 0}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_recommendations_unknown_title_is_404_with_suggestions() {
    let dir = TempDir::new().unwrap();
    let app = test::init_service(
        App::new()
            .app_data(app_state(&dir))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/recommendations")
        .set_json(json!({"user_id": 1, "title": "Grumpier Old Men"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "title_not_found");
    let suggestions = body["suggestions"].as_array().unwrap();
    assert!(!suggestions.is_empty());
    assert!(suggestions.len() <= 3);
    assert_eq!(suggestions[0], "Grumpier Old Men (1995)");
}

#[actix_web::test]
async fn test_similar_titles_endpoint() {
    let dir = TempDir::new().unwrap();
    let app = test::init_service(
        App::new()
            .app_data(app_state(&dir))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/v1/titles/similar?title=Heat%20(1995)&count=2")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["seed_title"], "Heat (1995)");
    assert_eq!(body["titles"].as_array().unwrap().len(), 2);
    assert_eq!(body["titles"][0]["title"], "Casino (1995)");
}
