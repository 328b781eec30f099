//! Route-level tests for the storefront.
//!
//! These drive the real router through `tower::ServiceExt::oneshot` with an
//! in-memory session store. Only flows that never leave the process are
//! exercised here - pages backed by the backend API have their logic covered
//! by unit tests in the respective modules.

#![allow(clippy::unwrap_used)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use secrecy::SecretString;
use tower::ServiceExt;

use gadgetmart_storefront::config::{AssistantConfig, BackendConfig, StorefrontConfig};
use gadgetmart_storefront::middleware::create_session_layer;
use gadgetmart_storefront::routes;
use gadgetmart_storefront::state::AppState;

fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 3000,
        base_url: "http://localhost:3000".to_string(),
        session_secret: SecretString::from("x".repeat(32)),
        backend: BackendConfig {
            // Nothing in these tests reaches the backend
            api_url: "http://localhost:9".to_string(),
        },
        assistant: AssistantConfig {
            api_key: None,
            model: "gemini-1.5-flash".to_string(),
        },
        razorpay_key_id: "rzp_test_key".to_string(),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.1,
    }
}

fn app() -> Router {
    let config = test_config();
    let state = AppState::new(config.clone());

    Router::new()
        .merge(routes::routes())
        .layer(create_session_layer(&config))
        .with_state(state)
}

/// Request builder with the client IP header the rate limiter keys on.
fn request(method: &str, uri: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("x-forwarded-for", "10.0.0.1")
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn session_cookie(response: &axum::response::Response) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .unwrap()
        .to_string()
}

// =============================================================================
// Pages
// =============================================================================

#[tokio::test]
async fn home_page_renders_grid() {
    let response = app()
        .oneshot(request("GET", "/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Best Tech."));
    assert!(body.contains("Top Gadgets"));
    assert!(body.contains("Phase 1: testing only"));
    assert!(body.contains("iPhone 16 Pro Max"));
}

#[tokio::test]
async fn login_page_renders() {
    let response = app()
        .oneshot(request("GET", "/login").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Welcome Back"));
    assert!(body.contains("/login/send-otp"));
}

#[tokio::test]
async fn checkout_page_renders_amount_in_paise() {
    let response = app()
        .oneshot(
            request("GET", "/checkout?product=Test%20Gadget&amount=1999&email=a%40b.c")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Test Gadget"));
    assert!(body.contains("₹1,999"));
    assert!(body.contains("data-amount-paise=\"199900\""));
}

#[tokio::test]
async fn checkout_page_defaults() {
    let response = app()
        .oneshot(request("GET", "/checkout").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let body = body_string(response).await;
    assert!(body.contains("Elite Hardware"));
    assert!(body.contains("₹0"));
}

#[tokio::test]
async fn orders_requires_login() {
    let response = app()
        .oneshot(request("GET", "/orders").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/login"
    );
}

#[tokio::test]
async fn saved_requires_login() {
    let response = app()
        .oneshot(request("GET", "/saved").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

// =============================================================================
// Search suggestions
// =============================================================================

#[tokio::test]
async fn suggestions_match_catalog() {
    let response = app()
        .oneshot(
            request("GET", "/search/suggest?q=iphone")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("iPhone 16 Pro Max"));
}

#[tokio::test]
async fn short_queries_get_no_suggestions() {
    let response = app()
        .oneshot(
            request("GET", "/search/suggest?q=i")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = body_string(response).await;
    assert!(body.contains("hidden"));
    assert!(!body.contains("iPhone"));
}

// =============================================================================
// Cart flow
// =============================================================================

fn add_form(name: &str, platform: &str, paise: i64) -> String {
    format!(
        "id={name}{platform}&name={name}&platform={platform}&price={paise}",
        name = name,
        platform = platform,
        paise = paise
    )
}

async fn post_form(app: &Router, uri: &str, cookie: Option<&str>, body: String) -> axum::response::Response {
    let mut builder = request("POST", uri).header(
        header::CONTENT_TYPE,
        "application/x-www-form-urlencoded",
    );
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::from(body)).unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn cart_add_returns_badge_and_session() {
    let app = app();

    let response = post_form(&app, "/cart/add", None, add_form("Widget", "Amazon", 99900)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("HX-Trigger").unwrap(),
        "cart-updated"
    );

    let cookie = session_cookie(&response);
    let body = body_string(response).await;
    assert!(body.contains("cart-badge"));
    assert!(body.contains(">1<"));

    // Same (id, platform) again: quantity increments, no duplicate line
    let response = post_form(&app, "/cart/add", Some(&cookie), add_form("Widget", "Amazon", 99900)).await;
    let body = body_string(response).await;
    assert!(body.contains(">2<"));

    // Same product, different platform: second unit counted separately
    let response = post_form(&app, "/cart/add", Some(&cookie), add_form("Widget", "Flipkart", 94900)).await;
    let body = body_string(response).await;
    assert!(body.contains(">3<"));
}

#[tokio::test]
async fn cart_page_shows_lines_and_updates() {
    let app = app();

    let response = post_form(&app, "/cart/add", None, add_form("Widget", "Amazon", 99900)).await;
    let cookie = session_cookie(&response);

    // Cart page shows the line
    let response = app
        .clone()
        .oneshot(
            request("GET", "/cart")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_string(response).await;
    assert!(body.contains("Widget"));
    assert!(body.contains("Amazon"));
    assert!(body.contains("₹999"));

    // Update quantity
    let response = post_form(
        &app,
        "/cart/update",
        Some(&cookie),
        "id=WidgetAmazon&platform=Amazon&quantity=3".to_string(),
    )
    .await;
    let body = body_string(response).await;
    assert!(body.contains("₹2,997"));

    // Quantity zero clamps to one
    let response = post_form(
        &app,
        "/cart/update",
        Some(&cookie),
        "id=WidgetAmazon&platform=Amazon&quantity=0".to_string(),
    )
    .await;
    let body = body_string(response).await;
    assert!(body.contains("₹999"));

    // Remove empties the cart
    let response = post_form(
        &app,
        "/cart/remove",
        Some(&cookie),
        "id=WidgetAmazon&platform=Amazon".to_string(),
    )
    .await;
    let body = body_string(response).await;
    assert!(body.contains("Cart is empty."));
}

#[tokio::test]
async fn cart_checkout_redirects_with_total() {
    let app = app();

    let response = post_form(&app, "/cart/add", None, add_form("Widget", "Amazon", 150000)).await;
    let cookie = session_cookie(&response);

    let response = app
        .clone()
        .oneshot(
            request("GET", "/cart/checkout")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(location.starts_with("/checkout?product=Multiple%20Items&amount=1500"));
}

#[tokio::test]
async fn empty_cart_checkout_goes_back_to_cart() {
    let response = app()
        .oneshot(request("GET", "/cart/checkout").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/cart");
}

// =============================================================================
// Chat API
// =============================================================================

async fn post_chat(body: &str) -> axum::response::Response {
    app()
        .oneshot(
            request("POST", "/api/chat")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn chat_without_key_is_unavailable() {
    let response = post_chat("{\"message\":\"hello\"}").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_string(response).await;
    assert!(body.contains("GEMINI_API_KEY"));
}

#[tokio::test]
async fn unauthenticated_save_gets_login_redirect_header() {
    let response = post_form(
        &app(),
        "/saved",
        None,
        "name=Widget&brand=Amazon&category=Gadget&price=999".to_string(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers().get("HX-Redirect").unwrap(), "/login");
}
