//! Integration tests for the listing endpoints

mod common;

use actix_web::{http::StatusCode, test};
use rentals_api::app::create_app;
use rentals_core::domain::entities::Role;
use rentals_core::repositories::ListingRepository;
use rentals_shared::{CorsConfig, Environment};
use serde_json::json;

use common::{access_cookie, TestContext};

fn listing_body(name: &str) -> serde_json::Value {
    json!({
        "name": name,
        "description": "Two rooms, quiet street",
        "floor_area": 55,
        "rent": 700,
        "rooms": 2,
        "address": "Oak Street 4",
        "location": { "lat": 44.8, "long": 20.4 }
    })
}

#[actix_web::test]
async fn test_browsing_is_public_and_paginated() {
    let ctx = TestContext::new();
    let realtor = ctx.seed_user("realtor@example.com", Role::Realtor).await;
    for i in 0..6 {
        ctx.seed_listing(realtor.id, &format!("Flat {}", i), 2, 500 + i * 100).await;
    }
    let app = test::init_service(create_app(
        ctx.state.clone(),
        &CorsConfig::default(),
        Environment::Development,
    ))
    .await;

    let req = test::TestRequest::get().uri("/api/v1/listings").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(4));
    assert_eq!(body["total"], 6);
    assert_eq!(body["total_pages"], 2);
}

#[actix_web::test]
async fn test_listing_filters() {
    let ctx = TestContext::new();
    let realtor = ctx.seed_user("realtor@example.com", Role::Realtor).await;
    ctx.seed_listing(realtor.id, "Studio", 1, 400).await;
    ctx.seed_listing(realtor.id, "Family house", 5, 1500).await;
    ctx.seed_listing(realtor.id, "Big flat", 4, 1100).await;
    ctx.seed_listing(realtor.id, "Two room flat", 2, 800).await;
    let app = test::init_service(create_app(
        ctx.state.clone(),
        &CorsConfig::default(),
        Environment::Development,
    ))
    .await;

    // Four or more rooms means "at least"
    let req = test::TestRequest::get()
        .uri("/api/v1/listings?rooms=4")
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 2);

    // Rent range with camelCase parameters, name is case-insensitive
    let req = test::TestRequest::get()
        .uri("/api/v1/listings?name=FLAT&rentMin=700&rentMax=1200")
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 2);

    // A single bound is ignored
    let req = test::TestRequest::get()
        .uri("/api/v1/listings?rent_min=1000&limit=10")
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 4);
}

#[actix_web::test]
async fn test_get_missing_listing() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(
        ctx.state.clone(),
        &CorsConfig::default(),
        Environment::Development,
    ))
    .await;

    let req = test::TestRequest::get().uri("/api/v1/listings/42").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_client_cannot_create_listing() {
    let ctx = TestContext::new();
    let client = ctx.seed_user("client@example.com", Role::Client).await;
    let tokens = ctx.sign_in(&client).await;
    let app = test::init_service(create_app(
        ctx.state.clone(),
        &CorsConfig::default(),
        Environment::Development,
    ))
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/listings")
        .cookie(access_cookie(&tokens))
        .set_json(listing_body("Loft"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Forbidden resource");
}

#[actix_web::test]
async fn test_create_requires_session() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(
        ctx.state.clone(),
        &CorsConfig::default(),
        Environment::Development,
    ))
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/listings")
        .set_json(listing_body("Loft"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_realtor_creates_listing_for_self() {
    let ctx = TestContext::new();
    let realtor = ctx.seed_user("realtor@example.com", Role::Realtor).await;
    let other = ctx.seed_user("other@example.com", Role::Realtor).await;
    let tokens = ctx.sign_in(&realtor).await;
    let app = test::init_service(create_app(
        ctx.state.clone(),
        &CorsConfig::default(),
        Environment::Development,
    ))
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/listings")
        .cookie(access_cookie(&tokens))
        .set_json(listing_body("Loft"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["owner_id"], realtor.id);
    assert_eq!(body["available"], true);

    // Picking another owner is reserved for administrators
    let mut foreign = listing_body("Not mine");
    foreign["owner_id"] = json!(other.id);
    let req = test::TestRequest::post()
        .uri("/api/v1/listings")
        .cookie(access_cookie(&tokens))
        .set_json(foreign)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_admin_assigns_owner() {
    let ctx = TestContext::new();
    let admin = ctx.seed_user("admin@example.com", Role::Admin).await;
    let realtor = ctx.seed_user("realtor@example.com", Role::Realtor).await;
    let tokens = ctx.sign_in(&admin).await;
    let app = test::init_service(create_app(
        ctx.state.clone(),
        &CorsConfig::default(),
        Environment::Development,
    ))
    .await;

    let mut body = listing_body("Assigned");
    body["realtorId"] = json!(realtor.id);
    let req = test::TestRequest::post()
        .uri("/api/v1/listings")
        .cookie(access_cookie(&tokens))
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["owner_id"], realtor.id);
}

#[actix_web::test]
async fn test_invalid_location_rejected() {
    let ctx = TestContext::new();
    let realtor = ctx.seed_user("realtor@example.com", Role::Realtor).await;
    let tokens = ctx.sign_in(&realtor).await;
    let app = test::init_service(create_app(
        ctx.state.clone(),
        &CorsConfig::default(),
        Environment::Development,
    ))
    .await;

    let mut body = listing_body("Nowhere");
    body["location"] = json!({ "lat": 95.0, "long": 0.0 });
    let req = test::TestRequest::post()
        .uri("/api/v1/listings")
        .cookie(access_cookie(&tokens))
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_realtor_updates_only_own_listings() {
    let ctx = TestContext::new();
    let owner = ctx.seed_user("owner@example.com", Role::Realtor).await;
    let intruder = ctx.seed_user("intruder@example.com", Role::Realtor).await;
    let listing = ctx.seed_listing(owner.id, "Loft", 2, 900).await;
    let owner_tokens = ctx.sign_in(&owner).await;
    let intruder_tokens = ctx.sign_in(&intruder).await;
    let app = test::init_service(create_app(
        ctx.state.clone(),
        &CorsConfig::default(),
        Environment::Development,
    ))
    .await;

    let uri = format!("/api/v1/listings/{}", listing.id);
    let req = test::TestRequest::patch()
        .uri(&uri)
        .cookie(access_cookie(&intruder_tokens))
        .set_json(json!({ "rent": 1 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::patch()
        .uri(&uri)
        .cookie(access_cookie(&owner_tokens))
        .set_json(json!({ "rent": 950, "available": false }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["rent"], 950);
    assert_eq!(body["available"], false);
    assert_eq!(body["owner_id"], owner.id);
}

#[actix_web::test]
async fn test_client_cannot_delete_realtor_listing() {
    let ctx = TestContext::new();
    let realtor = ctx.seed_user("realtor@example.com", Role::Realtor).await;
    let client = ctx.seed_user("client@example.com", Role::Client).await;
    assert_eq!((realtor.id, client.id), (1, 2));
    let listing = ctx.seed_listing(realtor.id, "Loft", 2, 900).await;
    let tokens = ctx.sign_in(&client).await;
    let app = test::init_service(create_app(
        ctx.state.clone(),
        &CorsConfig::default(),
        Environment::Development,
    ))
    .await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/listings/{}", listing.id))
        .cookie(access_cookie(&tokens))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert!(ctx.listings.find_by_id(listing.id).await.unwrap().is_some());
}

#[actix_web::test]
async fn test_owner_deletes_listing() {
    let ctx = TestContext::new();
    let realtor = ctx.seed_user("realtor@example.com", Role::Realtor).await;
    let listing = ctx.seed_listing(realtor.id, "Loft", 2, 900).await;
    let tokens = ctx.sign_in(&realtor).await;
    let app = test::init_service(create_app(
        ctx.state.clone(),
        &CorsConfig::default(),
        Environment::Development,
    ))
    .await;

    let uri = format!("/api/v1/listings/{}", listing.id);
    let req = test::TestRequest::delete()
        .uri(&uri)
        .cookie(access_cookie(&tokens))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .cookie(access_cookie(&tokens))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
