use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::stats::{PipelineStats, StatsSnapshot};

pub const SERVICE_NAME: &str = "meeting-note-bot";

#[derive(Debug, Serialize)]
struct StatusBody {
    service: &'static str,
    status: &'static str,
    #[serde(flatten)]
    stats: StatsSnapshot,
}

/// Status router: `GET /` reports liveness and counters, `GET /health` is the
/// bare probe used by the hosting platform and the self-ping job.
pub fn build_app(stats: Arc<PipelineStats>) -> Router {
    Router::new()
        .route("/", get(status))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(stats)
}

async fn status(State(stats): State<Arc<PipelineStats>>) -> Json<StatusBody> {
    Json(StatusBody {
        service: SERVICE_NAME,
        status: "running",
        stats: stats.snapshot(),
    })
}

async fn health() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use chrono::{TimeZone, Utc};
    use tower::ServiceExt;

    use super::*;

    async fn get_body(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn health_returns_plain_ok() {
        let (status, body) = get_body(build_app(Arc::new(PipelineStats::new())), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"OK");
    }

    #[tokio::test]
    async fn root_reports_service_and_counters() {
        let stats = Arc::new(PipelineStats::new());
        stats.mark_ready();
        stats.record_success(Utc.with_ymd_and_hms(2026, 2, 13, 9, 0, 0).unwrap());

        let (status, body) = get_body(build_app(stats), "/").await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        assert_eq!(json["service"], "meeting-note-bot");
        assert_eq!(json["status"], "running");
        assert_eq!(json["bot_ready"], true);
        assert_eq!(json["meetings_processed"], 1);
        assert!(json["uptime_seconds"].is_u64());
        assert_eq!(json["last_processed_at"], "2026-02-13T09:00:00Z");
    }

    #[tokio::test]
    async fn root_before_first_run_has_null_timestamp() {
        let (_, body) = get_body(build_app(Arc::new(PipelineStats::new())), "/").await;
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        assert_eq!(json["bot_ready"], false);
        assert_eq!(json["meetings_processed"], 0);
        assert!(json["last_processed_at"].is_null());
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let (status, _) = get_body(build_app(Arc::new(PipelineStats::new())), "/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
