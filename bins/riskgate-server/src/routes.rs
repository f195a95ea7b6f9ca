//! Axum router and HTTP handlers.

use std::net::SocketAddr;

use axum::extract::rejection::JsonRejection;
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use riskgate_core::error::ValidationError;
use riskgate_core::types::{RiskRequest, RiskResponse};

use crate::AppState;

// ---------------------------------------------------------------------------
// Error helper
// ---------------------------------------------------------------------------

/// Handler errors mapped to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Body is not JSON or does not match the request shape.
    Malformed(JsonRejection),
    Validation(ValidationError),
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        Self::Malformed(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match self {
            Self::Malformed(e) => e.body_text(),
            Self::Validation(e) => e.to_string(),
        };
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": message, "code": "validation_error" })),
        )
            .into_response()
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn router(state: AppState) -> Router {
    // Any origin may call the API. Tighten before exposing beyond a demo.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/risk/assess", post(assess))
        .route("/api/status", get(status))
        .with_state(state)
        .layer(cors)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `POST /api/risk/assess` — score one login or transaction attempt.
async fn assess(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    payload: Result<Json<RiskRequest>, JsonRejection>,
) -> Result<Json<RiskResponse>, ApiError> {
    let caller = caller_address(&headers, peer, state.trust_forwarded_for);
    let Json(req) = payload.map_err(|e| {
        warn!(%caller, error = %e.body_text(), "Malformed assessment request");
        ApiError::from(e)
    })?;

    match state.aggregator.assess(&req, &caller) {
        Ok(resp) => Ok(Json(resp)),
        Err(e) => {
            warn!(user = %req.user_id, %caller, error = %e, "Rejected assessment request");
            Err(e.into())
        }
    }
}

/// `GET /api/status` — active scoring policy and table sizes.
async fn status(State(state): State<AppState>) -> impl IntoResponse {
    let policy = state.aggregator.policy();
    (
        StatusCode::OK,
        Json(json!({
            "version": env!("CARGO_PKG_VERSION"),
            "scheme": policy.scheme,
            "weights": policy.weights,
            "thresholds": policy.thresholds,
            "unavailableNetworkRisk": policy.unavailable_network_risk,
            "profiles": state.aggregator.profiles().len(),
            "denylistSize": state.aggregator.reputation().entry_count(),
        })),
    )
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Caller address: the TCP peer, or the proxy-supplied client address when
/// forwarded headers are trusted.
fn caller_address(headers: &HeaderMap, peer: SocketAddr, trust_forwarded: bool) -> String {
    if trust_forwarded {
        if let Some(forwarded) = forwarded_address(headers) {
            return forwarded;
        }
    }
    peer.ip().to_string()
}

/// First `X-Forwarded-For` entry, falling back to `X-Real-IP`.
fn forwarded_address(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|s| !s.is_empty())
        })
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use serde_json::Value;
    use tower::ServiceExt;

    use riskgate_engine::{MemoryProfileStore, RiskAggregator, ScoringPolicy, StaticDenylist};

    use super::*;

    fn state(policy: ScoringPolicy, trust_forwarded_for: bool) -> AppState {
        AppState {
            aggregator: Arc::new(RiskAggregator::new(
                Arc::new(MemoryProfileStore::with_demo_seed()),
                Arc::new(StaticDenylist::demo()),
                policy,
            )),
            trust_forwarded_for,
        }
    }

    fn peer(ip: &str) -> SocketAddr {
        SocketAddr::new(ip.parse().unwrap(), 40000)
    }

    fn assess_request(body: Value, from: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/risk/assess")
            .header(header::CONTENT_TYPE, "application/json")
            .extension(ConnectInfo(peer(from)))
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn unknown_user_is_challenged_with_200() {
        let app = router(state(ScoringPolicy::extended(), false));
        let body = json!({ "userId": "nobody", "mouseScore": 10 });
        let (status, body) = send(app, assess_request(body, "203.0.113.1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "decision": "Challenge", "riskScore": 75.0 }));
    }

    #[tokio::test]
    async fn known_user_at_home_is_allowed() {
        let app = router(state(ScoringPolicy::extended(), false));
        let body = json!({
            "userId": "user123",
            "mouseScore": 0,
            "location": { "latitude": 17.3850, "longitude": 78.4867 },
            "deviceData": { "isVirtualDevice": false }
        });
        let (status, body) = send(app, assess_request(body, "203.0.113.1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["decision"], "Allow");
        assert_eq!(body["riskScore"], 0.0);
    }

    #[tokio::test]
    async fn loopback_peer_counts_as_denylisted() {
        // Home location, mouse 0, loopback caller: network 100 * 0.15.
        let app = router(state(ScoringPolicy::extended(), false));
        let body = json!({
            "userId": "user123",
            "mouseScore": 0,
            "location": { "latitude": 17.3850, "longitude": 78.4867 }
        });
        let (status, body) = send(app, assess_request(body, "127.0.0.1")).await;
        assert_eq!(status, StatusCode::OK);
        let score = body["riskScore"].as_f64().unwrap();
        assert!((score - 15.0).abs() < 1e-9, "got {score}");
        assert_eq!(body["decision"], "Allow");
    }

    #[tokio::test]
    async fn missing_location_for_known_user_is_400() {
        let app = router(state(ScoringPolicy::extended(), false));
        let body = json!({ "userId": "user123", "mouseScore": 50 });
        let (status, body) = send(app, assess_request(body, "203.0.113.1")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "validation_error");
        assert_eq!(body["error"], "location is required for known users");
    }

    #[tokio::test]
    async fn out_of_range_location_is_400() {
        let app = router(state(ScoringPolicy::extended(), false));
        let body = json!({
            "userId": "user123",
            "mouseScore": 50,
            "location": { "latitude": 95.0, "longitude": 0.0 }
        });
        let (status, _) = send(app, assess_request(body, "203.0.113.1")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_json_is_400() {
        let app = router(state(ScoringPolicy::extended(), false));
        let req = Request::builder()
            .method("POST")
            .uri("/api/risk/assess")
            .header(header::CONTENT_TYPE, "application/json")
            .extension(ConnectInfo(peer("203.0.113.1")))
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "validation_error");
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn missing_mouse_score_is_400() {
        let app = router(state(ScoringPolicy::extended(), false));
        let body = json!({
            "userId": "user123",
            "location": { "latitude": 17.3850, "longitude": 78.4867 }
        });
        let (status, body) = send(app, assess_request(body, "203.0.113.1")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "validation_error");
        assert!(body["error"].as_str().unwrap().contains("mouseScore"));
    }

    #[tokio::test]
    async fn missing_user_id_is_400() {
        let app = router(state(ScoringPolicy::extended(), false));
        let body = json!({ "mouseScore": 10 });
        let (status, body) = send(app, assess_request(body, "203.0.113.1")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "validation_error");
        assert!(body["error"].as_str().unwrap().contains("userId"));
    }

    #[tokio::test]
    async fn wrong_field_type_is_400() {
        let app = router(state(ScoringPolicy::extended(), false));
        let body = json!({ "userId": "user123", "mouseScore": "high" });
        let (status, body) = send(app, assess_request(body, "203.0.113.1")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "validation_error");
    }

    #[tokio::test]
    async fn forwarded_header_used_only_when_trusted() {
        let body = json!({
            "userId": "user123",
            "mouseScore": 0,
            "location": { "latitude": 17.3850, "longitude": 78.4867 }
        });
        let with_header = |body: &Value| {
            let mut req = assess_request(body.clone(), "203.0.113.1");
            req.headers_mut()
                .insert("x-forwarded-for", "198.51.100.23, 10.0.0.1".parse().unwrap());
            req
        };

        let trusted = router(state(ScoringPolicy::extended(), true));
        let (_, resp) = send(trusted, with_header(&body)).await;
        let score = resp["riskScore"].as_f64().unwrap();
        assert!((score - 15.0).abs() < 1e-9, "got {score}");

        let untrusted = router(state(ScoringPolicy::extended(), false));
        let (_, resp) = send(untrusted, with_header(&body)).await;
        assert_eq!(resp["riskScore"], 0.0);
    }

    #[tokio::test]
    async fn cors_allows_any_origin() {
        let app = router(state(ScoringPolicy::extended(), false));
        let mut req = assess_request(json!({ "userId": "x", "mouseScore": 0 }), "203.0.113.1");
        req.headers_mut()
            .insert(header::ORIGIN, "https://shop.example".parse().unwrap());
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn status_reports_policy() {
        let app = router(state(ScoringPolicy::baseline(), false));
        let req = Request::builder()
            .uri("/api/status")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["scheme"], "baseline");
        assert_eq!(body["thresholds"]["allowBelow"], 35.0);
        assert_eq!(body["profiles"], 1);
        assert_eq!(body["denylistSize"], 4);
    }

    #[test]
    fn forwarded_address_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(forwarded_address(&headers), None);

        headers.insert("x-real-ip", " 192.0.2.10 ".parse().unwrap());
        assert_eq!(forwarded_address(&headers).as_deref(), Some("192.0.2.10"));

        headers.insert("x-forwarded-for", "203.0.113.5, 10.0.0.1".parse().unwrap());
        assert_eq!(forwarded_address(&headers).as_deref(), Some("203.0.113.5"));
    }

    #[test]
    fn caller_falls_back_to_peer() {
        let headers = HeaderMap::new();
        assert_eq!(caller_address(&headers, peer("::1"), true), "::1");
        assert_eq!(caller_address(&headers, peer("192.0.2.1"), false), "192.0.2.1");
    }
}
