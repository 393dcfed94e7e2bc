//! HTTP surface: generate schedules from JSON requests.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::request::ScheduleRequest;
use crate::summary::{DaySummary, summarize};

/// Shared server state.
///
/// Each request gets its own allocator seeded from `seed` plus a running
/// request counter, so a given server start replays deterministically.
#[derive(Clone)]
pub struct AppState {
    seed: u64,
    requests: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            requests: Arc::new(AtomicU64::new(0)),
        }
    }

    fn next_seed(&self) -> u64 {
        self.seed
            .wrapping_add(self.requests.fetch_add(1, Ordering::Relaxed))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/generate-schedule", post(generate_schedule))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    message: &'static str,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    error: String,
    message: &'static str,
}

impl ApiError {
    fn bad_request(error: impl ToString) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: error.to_string(),
            message: "invalid schedule configuration",
        }
    }

    fn internal(error: impl ToString) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: error.to_string(),
            message: "schedule generation failed",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.error,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

async fn generate_schedule(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Vec<DaySummary>>, ApiError> {
    // An absent body means "all defaults".
    let request: ScheduleRequest = if body.iter().all(u8::is_ascii_whitespace) {
        ScheduleRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| {
            warn!(error = %e, "Rejected malformed request body");
            ApiError::bad_request(e)
        })?
    };

    let config = request.into_config().map_err(|e| {
        warn!(error = %e, "Rejected schedule configuration");
        ApiError::bad_request(e)
    })?;

    let seed = state.next_seed();
    let days = tokio::task::spawn_blocking(move || {
        let schedule = crate::generate_seeded(&config, seed);
        summarize(&config, &schedule)
    })
    .await
    .map_err(ApiError::internal)?;

    info!(
        seed,
        days = days.len(),
        sessions = days.iter().map(|d| d.sessions.len()).sum::<usize>(),
        "Served schedule"
    );

    Ok(Json(days))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use tower::ServiceExt;

    async fn post_json(app: Router, body: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/generate-schedule")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let app = router(AppState::new(1));
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_generate_with_partial_payload() {
        let app = router(AppState::new(42));
        let (status, json) = post_json(
            app,
            r#"{"numAttendees": 20, "numDays": 2, "topics": ["A"], "sessionTypes": ["Test"],
                "rooms": [{"name": "Lab", "capacity": 8}]}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let days = json.as_array().unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0]["day"], 1);

        let first = &days[0]["sessions"][0];
        assert_eq!(first["time"], "08:00");
        assert_eq!(first["topic"], "A");
        assert_eq!(first["type"], "Test");
        assert_eq!(first["room"], "Lab");
        assert_eq!(first["attendees"], 8);
    }

    #[tokio::test]
    async fn test_empty_body_uses_defaults() {
        let app = router(AppState::new(7));
        let (status, json) = post_json(app, "").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_invalid_time_is_bad_request() {
        let app = router(AppState::new(7));
        let (status, json) = post_json(app, r#"{"startTime": "8am"}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("8am"));
        assert_eq!(json["message"], "invalid schedule configuration");
    }

    #[tokio::test]
    async fn test_empty_rooms_is_bad_request() {
        let app = router(AppState::new(7));
        let (status, json) = post_json(app, r#"{"rooms": []}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "no rooms configured");
    }

    #[tokio::test]
    async fn test_oversized_request_is_bad_request() {
        let app = router(AppState::new(7));
        let (status, json) = post_json(app.clone(), r#"{"numAttendees": 4000000000}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("4000000000 attendees"));

        let (status, json) = post_json(app, r#"{"numDays": 4000000000}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("4000000000 days"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let app = router(AppState::new(7));
        let (status, _) = post_json(app, r#"{"numDays": "five"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
