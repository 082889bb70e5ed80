//! Route definitions for the Compliance Tracker API

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/categories", get(handlers::list_categories))
        .route("/dates/parse", post(handlers::parse_date))
        .nest("/expiration", expiration_routes())
}

/// Certificate evaluation routes
fn expiration_routes() -> Router<AppState> {
    Router::new()
        .route("/evaluate", post(handlers::evaluate_certificate))
        .route("/batch", post(handlers::evaluate_batch))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::Config;

    fn app() -> Router {
        api_routes().with_state(AppState {
            config: Arc::new(Config::default()),
        })
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_list_categories() {
        let request = Request::builder().uri("/categories").body(Body::empty()).unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 9);
        assert_eq!(body[0]["code"], "aso");
        assert_eq!(body[0]["validity"]["amount"], 1);
    }

    #[tokio::test]
    async fn test_evaluate_endpoint() {
        let request = post_json(
            "/expiration/evaluate",
            json!({"category": "aso", "issued_on": "15/03/2024", "today": "01/03/2025"}),
        );
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["row"]["due_on"], "15/03/2025");
        assert_eq!(body["row"]["remaining_days"], 14);
        assert_eq!(body["row"]["status"], "renew_soon");
        assert_eq!(body["row"]["color"], "orange");
    }

    #[tokio::test]
    async fn test_evaluate_rejects_impossible_date() {
        let request = post_json(
            "/expiration/evaluate",
            json!({"category": "aso", "issued_on": "31/02/2024", "today": "01/03/2025"}),
        );
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "INVALID_DATE");
        assert_eq!(body["error"]["field"], "issued_on");
    }

    #[tokio::test]
    async fn test_evaluate_rejects_due_year_past_9999() {
        let request = post_json(
            "/expiration/evaluate",
            json!({"category": "nr10", "issued_on": "01/01/9999", "today": "01/03/2025"}),
        );
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "DATE_OUT_OF_RANGE");
    }

    #[tokio::test]
    async fn test_batch_endpoint() {
        let request = post_json(
            "/expiration/batch",
            json!({
                "records": [
                    {"category": "epi", "issued_on": "2023-01-10"},
                    {"category": "nr10", "issued_on": "2024-06-01"}
                ],
                "today": "2025-06-01"
            }),
        );
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rows"]["data"].as_array().unwrap().len(), 2);
        assert_eq!(body["rows"]["data"][0]["status"], "expired");
        assert_eq!(body["summary"]["expired"], 1);
        assert_eq!(body["summary"]["ok"], 1);
        assert_eq!(body["attention_needed"], 1);
    }

    #[tokio::test]
    async fn test_parse_incomplete_date() {
        let (status, body) = send(post_json("/dates/parse", json!({"text": "15/03"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["state"], "incomplete");
    }
}
