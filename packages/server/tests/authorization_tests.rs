//! Integration tests for the bearer-token guard and the routes behind it.
//!
//! - `/user/profile`: any authenticated role
//! - `/chef/menu-items`: role `chef` only
//! - Expired, malformed and foreign tokens

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use chrono::{Duration, Utc};
use common::{Part, TestApp};
use server_core::common::UserId;
use server_core::domains::identity::Role;

const CUSTOMER_PHONE: &str = "+15550001111";
const CHEF_PHONE: &str = "+15550002222";
const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];

fn menu_item_parts(with_image: bool) -> Vec<Part<'static>> {
    let mut parts = vec![
        Part::Text("itemName", "Paneer Tikka"),
        Part::Text("description", "Smoky, charred, served with mint chutney"),
        Part::Text("price", "249.50"),
    ];
    if with_image {
        parts.push(Part::File {
            name: "image",
            file_name: "tikka.jpg",
            content_type: "image/jpeg",
            bytes: JPEG,
        });
    }
    parts
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn profile_requires_a_token() {
    let app = TestApp::new();

    let response = app.get("/user/profile", None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.body["message"], "Invalid or expired token");
}

#[tokio::test]
async fn malformed_and_foreign_tokens_are_rejected() {
    let app = TestApp::new();
    app.register_and_login(CUSTOMER_PHONE, "customer").await;

    let garbage = app.get("/user/profile", Some("not-a-jwt")).await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);

    let foreign = server_core::domains::auth::JwtService::new("other", "test_issuer".to_string())
        .create_token(UserId::new(), Role::Customer, CUSTOMER_PHONE)
        .unwrap();
    let response = app.get("/user/profile", Some(&foreign)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Invalid or expired token");
}

#[tokio::test]
async fn lowercase_bearer_scheme_is_accepted() {
    let app = TestApp::new();
    let token = app.register_and_login(CUSTOMER_PHONE, "customer").await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/user/profile")
        .header(header::AUTHORIZATION, format!("bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn token_expires_after_seven_days() {
    let app = TestApp::new();
    let token = app.register_and_login(CUSTOMER_PHONE, "customer").await;
    let claims = app.jwt.verify_token(&token).unwrap();

    let almost = app
        .jwt
        .create_token_at(
            claims.user_id,
            Role::Customer,
            CUSTOMER_PHONE,
            Utc::now() - Duration::days(7) + Duration::minutes(1),
        )
        .unwrap();
    assert_eq!(app.get("/user/profile", Some(&almost)).await.status, StatusCode::OK);

    let expired = app
        .jwt
        .create_token_at(
            claims.user_id,
            Role::Customer,
            CUSTOMER_PHONE,
            Utc::now() - Duration::days(7),
        )
        .unwrap();
    assert_eq!(
        app.get("/user/profile", Some(&expired)).await.status,
        StatusCode::UNAUTHORIZED
    );
}

// ============================================================================
// Profile
// ============================================================================

#[tokio::test]
async fn customer_profile_has_no_extension() {
    let app = TestApp::new();
    let token = app.register_and_login(CUSTOMER_PHONE, "customer").await;

    let response = app.get("/user/profile", Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    let user = &response.body["data"]["user"];
    assert_eq!(user["phone"], CUSTOMER_PHONE);
    assert_eq!(user["role"], "customer");
    assert_eq!(user["isActive"], true);
    assert!(user["createdAt"].is_string());
    assert!(user.get("chef").is_none());
    assert!(user.get("deliveryPartner").is_none());
}

#[tokio::test]
async fn chef_profile_includes_chef_extension() {
    let app = TestApp::new();
    let token = app.register_and_login(CHEF_PHONE, "chef").await;

    let response = app.get("/user/profile", Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["user"]["chef"]["bio"], "Curries");
}

#[tokio::test]
async fn profile_for_missing_identity_is_not_found() {
    let app = TestApp::new();
    let token = app
        .jwt
        .create_token(UserId::new(), Role::Customer, CUSTOMER_PHONE)
        .unwrap();

    let response = app.get("/user/profile", Some(&token)).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Menu items (role = chef)
// ============================================================================

#[tokio::test]
async fn customer_cannot_create_menu_items() {
    let app = TestApp::new();
    let token = app.register_and_login(CUSTOMER_PHONE, "customer").await;

    let response = app
        .post_multipart("/chef/menu-items", Some(&token), &menu_item_parts(true))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["message"], "Unauthorized access");
    assert!(app.images.stored().is_empty());
    assert!(app.store.menu_items().is_empty());
}

#[tokio::test]
async fn menu_items_require_a_token() {
    let app = TestApp::new();

    let response = app
        .post_multipart("/chef/menu-items", None, &menu_item_parts(true))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn chef_creates_menu_item() {
    let app = TestApp::new();
    let token = app.register_and_login(CHEF_PHONE, "chef").await;
    let chef_id = app.jwt.verify_token(&token).unwrap().user_id;

    let response = app
        .post_multipart("/chef/menu-items", Some(&token), &menu_item_parts(true))
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    let data = &response.body["data"];
    assert_eq!(data["itemName"], "Paneer Tikka");
    assert_eq!(data["price"], "249.50");
    assert_eq!(data["chefId"], chef_id.to_string());

    let image_url = data["imageUrl"].as_str().unwrap();
    assert!(image_url.starts_with("https://images.test/menu-items/"));
    assert!(image_url.ends_with(".jpg"));

    let stored = app.images.stored();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].1, "image/jpeg");
    assert_eq!(stored[0].2, JPEG.len());

    let items = app.store.menu_items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].chef_id, chef_id);
}

#[tokio::test]
async fn menu_item_without_image_is_rejected() {
    let app = TestApp::new();
    let token = app.register_and_login(CHEF_PHONE, "chef").await;

    let response = app
        .post_multipart("/chef/menu-items", Some(&token), &menu_item_parts(false))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Image is required");
    assert!(app.store.menu_items().is_empty());
}

#[tokio::test]
async fn stored_extension_follows_content_type_not_file_name() {
    let app = TestApp::new();
    let token = app.register_and_login(CHEF_PHONE, "chef").await;

    let parts = [
        Part::Text("itemName", "Lassi"),
        Part::Text("price", "60"),
        Part::File {
            name: "image",
            file_name: "evil.html",
            content_type: "image/png",
            bytes: b"<script>alert(1)</script>",
        },
    ];
    let response = app
        .post_multipart("/chef/menu-items", Some(&token), &parts)
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    let image_url = response.body["data"]["imageUrl"].as_str().unwrap();
    assert!(image_url.ends_with(".png"));
    let stored = app.images.stored();
    assert!(stored[0].0.ends_with(".png"));
    assert!(!stored[0].0.contains("html"));
}

#[tokio::test]
async fn svg_upload_is_rejected() {
    let app = TestApp::new();
    let token = app.register_and_login(CHEF_PHONE, "chef").await;

    let parts = [
        Part::Text("itemName", "Lassi"),
        Part::Text("price", "60"),
        Part::File {
            name: "image",
            file_name: "logo.svg",
            content_type: "image/svg+xml",
            bytes: b"<svg xmlns=\"http://www.w3.org/2000/svg\"/>",
        },
    ];
    let response = app
        .post_multipart("/chef/menu-items", Some(&token), &parts)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(app.images.stored().is_empty());
    assert!(app.store.menu_items().is_empty());
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn health_without_database() {
    let app = TestApp::new();

    let response = app.get("/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "healthy");
    assert_eq!(response.body["database"]["status"], "not_configured");
}
