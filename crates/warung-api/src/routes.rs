//! # Routes
//!
//! Axum router configuration for the site API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - Site:
///   - GET  /api/v1/site - Current site document
///   - GET  /api/v1/site/regions - Bound page regions
///   - GET  /api/v1/site/findings - Load-time validation findings
///
/// - Sessions (one cart each):
///   - POST   /api/v1/sessions - Start a session
///   - GET    /api/v1/sessions/{id} - Session view
///   - POST   /api/v1/sessions/{id}/items - Add one unit
///   - PUT    /api/v1/sessions/{id}/items/{label} - Set quantity
///   - DELETE /api/v1/sessions/{id}/items/{label} - Remove item
///   - POST   /api/v1/sessions/{id}/review - Open checkout view
///   - DELETE /api/v1/sessions/{id}/review - Close checkout view
///   - POST   /api/v1/sessions/{id}/checkout - Compose order message
///   - POST   /api/v1/sessions/{id}/handoff - Confirm or cancel the handoff
///
/// - Messages without a cart:
///   - POST /api/v1/inquiry - Contact form
///   - POST /api/v1/reservation - Table or experience booking
///   - POST /api/v1/direct-order - Single item order
///
/// - Admin (bearer token when `ADMIN_TOKEN` is set):
///   - PUT /admin/name, /admin/colors, /admin/handle, /admin/contact
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Site document
        .route("/site", get(handlers::get_site))
        .route("/site/regions", get(handlers::get_regions))
        .route("/site/findings", get(handlers::get_findings))
        // Sessions
        .route("/sessions", post(handlers::create_session))
        .route("/sessions/{session_id}", get(handlers::get_session))
        .route("/sessions/{session_id}/items", post(handlers::add_item))
        .route(
            "/sessions/{session_id}/items/{label}",
            put(handlers::set_quantity).delete(handlers::remove_item),
        )
        .route(
            "/sessions/{session_id}/review",
            post(handlers::open_review).delete(handlers::close_review),
        )
        .route("/sessions/{session_id}/checkout", post(handlers::checkout))
        .route("/sessions/{session_id}/handoff", post(handlers::handoff))
        // Messages without a cart
        .route("/inquiry", post(handlers::inquiry))
        .route("/reservation", post(handlers::reservation))
        .route("/direct-order", post(handlers::direct_order));

    let admin_routes = Router::new()
        .route("/name", put(handlers::rename))
        .route("/colors", put(handlers::recolor))
        .route("/handle", put(handlers::change_handle))
        .route("/contact", put(handlers::change_contact));

    Router::new()
        // Health check at root
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        // API v1
        .nest("/api/v1", api_routes)
        // Operator mutators
        .nest("/admin", admin_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppConfig;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use warung_core::SiteConfig;

    const SITE: &str = r##"
        [identity]
        name = "Warung Mak Sari"
        tagline = "Masakan Rumahan Terlezat"

        [contact]
        phone = "021-2345-6789"
        messaging_handle = "628123456789"

        [ordering]
        minimum_order = 25000
    "##;

    fn test_config(admin_token: Option<&str>) -> AppConfig {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: "test".to_string(),
            site_config: None,
            admin_token: admin_token.map(String::from),
            session_ttl_minutes: 30,
            max_sessions: 100,
        }
    }

    fn test_state(admin_token: Option<&str>) -> AppState {
        let document = SiteConfig::from_toml(SITE).unwrap();
        AppState::with_document(test_config(admin_token), document)
    }

    async fn send(
        router: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        send_with(router, method, uri, body, None).await
    }

    async fn send_with(
        router: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn new_session(router: &Router) -> String {
        let (status, body) = send(router, Method::POST, "/api/v1/sessions", None).await;
        assert_eq!(status, StatusCode::CREATED);
        body["session_id"].as_str().unwrap().to_string()
    }

    async fn add(router: &Router, id: &str, label: &str, unit_price: u64) -> (StatusCode, Value) {
        let uri = format!("/api/v1/sessions/{}/items", id);
        let item = json!({"label": label, "unit_price": unit_price});
        send(router, Method::POST, &uri, Some(item)).await
    }

    #[tokio::test]
    async fn test_health() {
        let router = create_router(test_state(None));
        let (status, body) = send(&router, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_regions_are_bound_at_load() {
        let router = create_router(test_state(None));
        let (status, body) = send(&router, Method::GET, "/api/v1/site/regions", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["regions"][".logo-text"]["content"]["value"],
            "Warung Mak Sari"
        );
    }

    #[tokio::test]
    async fn test_checkout_flow() {
        let router = create_router(test_state(None));
        let id = new_session(&router).await;

        add(&router, &id, "Nasi Goreng", 20000).await;

        let checkout = format!("/api/v1/sessions/{}/checkout", id);
        let (status, body) = send(&router, Method::POST, &checkout, None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "Minimum order Rp 25.000");

        let (status, body) = add(&router, &id, "Es Teh Manis", 10000).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["session"]["cart"]["total"], 30000);

        let (status, body) = send(&router, Method::POST, &checkout, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["event"]["event"], "checkout_composed");
        assert!(body["event"]["message"].as_str().unwrap().contains("30.000"));
        assert!(body["event"]["external_url"]
            .as_str()
            .unwrap()
            .starts_with("https://wa.me/628123456789?text="));
        assert_eq!(body["session"]["phase"], "awaiting_handoff");

        let handoff = format!("/api/v1/sessions/{}/handoff", id);
        let confirmed = Some(json!({"confirmed": true}));
        let (status, body) = send(&router, Method::POST, &handoff, confirmed).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["session"]["phase"], "idle");
        assert_eq!(body["session"]["cart"]["item_count"], 0);
    }

    #[tokio::test]
    async fn test_set_quantity_and_remove() {
        let router = create_router(test_state(None));
        let id = new_session(&router).await;

        add(&router, &id, "Sate", 15000).await;

        let item = format!("/api/v1/sessions/{}/items/Sate", id);
        let quantity = Some(json!({"quantity": 3}));
        let (_, body) = send(&router, Method::PUT, &item, quantity).await;
        assert_eq!(body["session"]["cart"]["total"], 45000);

        let (status, body) = send(&router, Method::DELETE, &item, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["session"]["phase"], "idle");

        // removing again is a no-op
        let (status, body) = send(&router, Method::DELETE, &item, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["event"]["event"], "cart_unchanged");
    }

    #[tokio::test]
    async fn test_stale_remove_keeps_pending_handoff() {
        let router = create_router(test_state(None));
        let id = new_session(&router).await;

        add(&router, &id, "Rendang", 30000).await;
        let checkout = format!("/api/v1/sessions/{}/checkout", id);
        let (status, _) = send(&router, Method::POST, &checkout, None).await;
        assert_eq!(status, StatusCode::OK);

        let stale = format!("/api/v1/sessions/{}/items/Soto", id);
        let (status, body) = send(&router, Method::DELETE, &stale, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["session"]["phase"], "awaiting_handoff");

        let handoff = format!("/api/v1/sessions/{}/handoff", id);
        let confirmed = Some(json!({"confirmed": true}));
        let (status, body) = send(&router, Method::POST, &handoff, confirmed).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["session"]["phase"], "idle");
    }

    #[tokio::test]
    async fn test_session_limit() {
        let mut config = test_config(None);
        config.max_sessions = 1;
        let state = AppState::with_document(config, SiteConfig::from_toml(SITE).unwrap());
        let router = create_router(state);

        new_session(&router).await;
        let (status, body) = send(&router, Method::POST, "/api/v1/sessions", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["code"], 503);
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let router = create_router(test_state(None));
        let uri = "/api/v1/sessions/00000000-0000-0000-0000-000000000000";
        let (status, body) = send(&router, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], 404);
    }

    #[tokio::test]
    async fn test_handoff_without_checkout_conflicts() {
        let router = create_router(test_state(None));
        let id = new_session(&router).await;
        let handoff = format!("/api/v1/sessions/{}/handoff", id);
        let cancelled = Some(json!({"confirmed": false}));
        let (status, _) = send(&router, Method::POST, &handoff, cancelled).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_inquiry() {
        let router = create_router(test_state(None));
        let form = json!({"name": "Budi", "phone": "0812345", "message": "Buka hari Minggu?"});
        let (status, body) = send(&router, Method::POST, "/api/v1/inquiry", Some(form)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["message"].as_str().unwrap().contains("*Nama:* Budi"));

        let form = json!({"name": "Budi", "phone": "", "message": "Halo"});
        let (status, _) = send(&router, Method::POST, "/api/v1/inquiry", Some(form)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_reservation() {
        let router = create_router(test_state(None));
        let form = json!({
            "name": "Budi",
            "phone": "0812345",
            "date": "2026-11-07",
            "time": "19:00",
            "guests": 6,
            "occasion": "Arisan"
        });
        let (status, body) = send(&router, Method::POST, "/api/v1/reservation", Some(form)).await;
        assert_eq!(status, StatusCode::OK);
        let message = body["message"].as_str().unwrap();
        assert!(message.starts_with("*RESERVASI - Warung Mak Sari*"));
        assert!(message.contains("*Jumlah Tamu:* 6\n*Acara:* Arisan"));

        let form = json!({
            "name": "Budi",
            "phone": "0812345",
            "date": "",
            "time": "19:00",
            "guests": 2
        });
        let (status, body) = send(&router, Method::POST, "/api/v1/reservation", Some(form)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Reservation is missing required field: date");
    }

    #[tokio::test]
    async fn test_rename_rebinds_regions() {
        let router = create_router(test_state(None));
        let rename = Some(json!({"name": "Warung Bu Tini"}));
        let (status, body) = send(&router, Method::PUT, "/admin/name", rename).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["dirty"].as_array().unwrap().contains(&json!("identity")));

        let (_, body) = send(&router, Method::GET, "/api/v1/site/regions", None).await;
        assert_eq!(
            body["regions"][".footer-business-name"]["content"]["value"],
            "Warung Bu Tini"
        );
    }

    #[tokio::test]
    async fn test_admin_requires_token_when_configured() {
        let router = create_router(test_state(Some("s3cret")));
        let colors = json!({"primary": "#112233", "secondary": "#445566", "accent": "#778899"});

        let (status, _) = send(&router, Method::PUT, "/admin/colors", Some(colors.clone())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let token = Some("s3cret");
        let (status, _) =
            send_with(&router, Method::PUT, "/admin/colors", Some(colors), token).await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(&router, Method::GET, "/api/v1/site/regions", None).await;
        assert_eq!(body["variables"]["--primary-dark"], "#000819");
    }
}
