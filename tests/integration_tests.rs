// Integration tests for Konnect Match

use actix_web::{http::StatusCode, test, web, App};
use konnect_match::core::Matcher;
use konnect_match::routes::{self, AppState};
use konnect_match::services::{CacheManager, SupabaseClient, SupabaseTables};
use mockito::Matcher as QueryMatcher;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

fn create_app_state(store_url: String) -> AppState {
    let store = SupabaseClient::new(
        store_url,
        "test_key".to_string(),
        SupabaseTables::default(),
        Duration::from_secs(5),
    )
    .expect("client");

    AppState {
        store: Arc::new(store),
        cache: Arc::new(CacheManager::in_memory(100, 60)),
        matcher: Matcher::with_default_weights(),
    }
}

fn business_row() -> Value {
    json!({
        "id": "biz-1",
        "business_name": "Atelier Nine",
        "website_url": "https://ateliernine.test",
        "social_media_links": { "Instagram": "@ateliernine", "TikTok": "@atelier9" },
        "estimated_revenue": "10000-100000",
        "product_categories": ["Fashion", "Beauty"]
    })
}

fn influencer_rows() -> Value {
    json!([
        {
            "id": "inf-gamer",
            "name": "Pixel Pete",
            "platforms": ["Twitter"],
            "follower_counts": { "Twitter": "0-10000" },
            "content_categories": ["Gaming"]
        },
        {
            "id": "inf-style",
            "name": "Noa",
            "platforms": ["Instagram", "TikTok"],
            "follower_counts": { "Instagram": "10000-100000", "TikTok": "0-10000" },
            "content_categories": ["Fashion", "Beauty"]
        },
        {
            "id": "inf-half",
            "name": "Sam",
            "platforms": ["Instagram"],
            "follower_counts": { "Instagram": "10000-100000" },
            "content_categories": ["Fashion"]
        }
    ])
}

fn profile_ids(body: &Value) -> Vec<String> {
    body["matches"]
        .as_array()
        .expect("matches array")
        .iter()
        .map(|m| m["profile"]["id"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[actix_web::test]
async fn test_integration_business_subject_ranking() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/rest/v1/business_profiles")
        .match_query(QueryMatcher::UrlEncoded("user_id".into(), "eq.biz-1".into()))
        .with_status(200)
        .with_body(json!([business_row()]).to_string())
        .create_async()
        .await;
    server
        .mock("GET", "/rest/v1/influencer_profiles")
        .match_query(QueryMatcher::UrlEncoded("select".into(), "*".into()))
        .with_status(200)
        .with_body(influencer_rows().to_string())
        .create_async()
        .await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(create_app_state(server.url())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/matches?subjectId=biz-1&subjectType=business")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;

    assert_eq!(profile_ids(&body), vec!["inf-style", "inf-half", "inf-gamer"]);

    let top = &body["matches"][0];
    assert_eq!(top["score"], json!(1.0));
    assert_eq!(top["profile"]["name"], "Noa");
    assert_eq!(top["matchReasons"][0], "100% category alignment");

    // All matches should be sorted by score
    let scores: Vec<f64> = body["matches"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["score"].as_f64().unwrap())
        .collect();
    for i in 1..scores.len() {
        assert!(scores[i - 1] >= scores[i], "Matches not sorted by score");
    }
}

#[actix_web::test]
async fn test_integration_influencer_subject_with_legacy_params() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/rest/v1/influencer_profiles")
        .match_query(QueryMatcher::UrlEncoded("user_id".into(), "eq.inf-style".into()))
        .with_status(200)
        .with_body(json!([influencer_rows()[1].clone()]).to_string())
        .create_async()
        .await;
    server
        .mock("GET", "/rest/v1/business_profiles")
        .match_query(QueryMatcher::UrlEncoded("select".into(), "*".into()))
        .with_status(200)
        .with_body(
            json!([
                { "id": "biz-tea", "business_name": "Tea House", "product_categories": ["Food"] },
                business_row()
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(create_app_state(server.url())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/matches?userId=inf-style&userType=influencer")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(profile_ids(&body), vec!["biz-1", "biz-tea"]);
    assert_eq!(body["matches"][1]["score"], json!(0.0));
    assert_eq!(body["matches"][1]["matchReasons"], json!([]));
}

#[actix_web::test]
async fn test_missing_parameters_rejected() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(create_app_state("http://127.0.0.1:9".to_string())))
            .configure(routes::configure_routes),
    )
    .await;

    for uri in [
        "/matches",
        "/matches?subjectId=biz-1",
        "/matches?subjectType=business",
        "/matches?subjectId=&subjectType=business",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "uri {}", uri);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status_code"], 400);
    }
}

#[actix_web::test]
async fn test_unknown_subject_type_rejected() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(create_app_state("http://127.0.0.1:9".to_string())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/matches?subjectId=biz-1&subjectType=agency")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid subjectType");
}

#[actix_web::test]
async fn test_subject_not_found() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/rest/v1/business_profiles")
        .match_query(QueryMatcher::Any)
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(create_app_state(server.url())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/matches?subjectId=ghost&subjectType=business")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Profile not found");
}

#[actix_web::test]
async fn test_candidate_storage_failure() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/rest/v1/business_profiles")
        .match_query(QueryMatcher::Any)
        .with_status(200)
        .with_body(json!([business_row()]).to_string())
        .create_async()
        .await;
    server
        .mock("GET", "/rest/v1/influencer_profiles")
        .match_query(QueryMatcher::Any)
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(create_app_state(server.url())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/matches?subjectId=biz-1&subjectType=business")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Failed to fetch potential matches");
}

#[actix_web::test]
async fn test_subject_looked_up_by_auth_user_id() {
    let mut server = mockito::Server::new_async().await;
    let subject = server
        .mock("GET", "/rest/v1/business_profiles")
        .match_query(QueryMatcher::UrlEncoded("user_id".into(), "eq.auth-uid-1".into()))
        .with_status(200)
        .with_body(json!([business_row()]).to_string())
        .create_async()
        .await;
    server
        .mock("GET", "/rest/v1/influencer_profiles")
        .match_query(QueryMatcher::Any)
        .with_status(200)
        .with_body(influencer_rows().to_string())
        .create_async()
        .await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(create_app_state(server.url())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/matches?userId=auth-uid-1&userType=business")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(profile_ids(&body).len(), 3);
    subject.assert_async().await;
}

#[actix_web::test]
async fn test_subject_storage_failure() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/rest/v1/business_profiles")
        .match_query(QueryMatcher::Any)
        .with_status(503)
        .with_body("unavailable")
        .create_async()
        .await;
    let candidates = server
        .mock("GET", "/rest/v1/influencer_profiles")
        .match_query(QueryMatcher::Any)
        .with_status(200)
        .with_body(influencer_rows().to_string())
        .expect(0)
        .create_async()
        .await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(create_app_state(server.url())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/matches?subjectId=biz-1&subjectType=business")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Failed to fetch subject profile");
    assert_eq!(body["status_code"], 500);
    candidates.assert_async().await;
}

#[actix_web::test]
async fn test_malformed_subject_row() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/rest/v1/business_profiles")
        .match_query(QueryMatcher::Any)
        .with_status(200)
        .with_body(json!([{ "id": "biz-1", "product_categories": 42 }]).to_string())
        .create_async()
        .await;
    server
        .mock("GET", "/rest/v1/influencer_profiles")
        .match_query(QueryMatcher::Any)
        .with_status(200)
        .with_body(influencer_rows().to_string())
        .create_async()
        .await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(create_app_state(server.url())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/matches?subjectId=biz-1&subjectType=business")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Malformed subject profile");
}

#[actix_web::test]
async fn test_no_candidates_returns_empty_list() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/rest/v1/business_profiles")
        .match_query(QueryMatcher::Any)
        .with_status(200)
        .with_body(json!([business_row()]).to_string())
        .create_async()
        .await;
    server
        .mock("GET", "/rest/v1/influencer_profiles")
        .match_query(QueryMatcher::Any)
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(create_app_state(server.url())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/matches?subjectId=biz-1&subjectType=business")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "matches": [] }));
}

#[actix_web::test]
async fn test_repeat_requests_served_from_cache() {
    let mut server = mockito::Server::new_async().await;
    let subject_mock = server
        .mock("GET", "/rest/v1/business_profiles")
        .match_query(QueryMatcher::Any)
        .with_status(200)
        .with_body(json!([business_row()]).to_string())
        .expect(1)
        .create_async()
        .await;
    let candidates_mock = server
        .mock("GET", "/rest/v1/influencer_profiles")
        .match_query(QueryMatcher::Any)
        .with_status(200)
        .with_body(influencer_rows().to_string())
        .expect(1)
        .create_async()
        .await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(create_app_state(server.url())))
            .configure(routes::configure_routes),
    )
    .await;

    for _ in 0..2 {
        let req = test::TestRequest::get()
            .uri("/matches?subjectId=biz-1&subjectType=business")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    subject_mock.assert_async().await;
    candidates_mock.assert_async().await;
}

#[actix_web::test]
async fn test_non_get_method_not_allowed() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(create_app_state("http://127.0.0.1:9".to_string())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/matches?subjectId=biz-1&subjectType=business")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[actix_web::test]
async fn test_health_reports_store_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/rest/v1/business_profiles")
        .match_query(QueryMatcher::UrlEncoded("select".into(), "user_id".into()))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(create_app_state(server.url())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[actix_web::test]
async fn test_health_degraded_when_store_unreachable() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(create_app_state("http://127.0.0.1:9".to_string())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "degraded");
}
