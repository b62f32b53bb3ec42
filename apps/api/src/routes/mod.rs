pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::errors::AppError;
use crate::state::AppState;

async fn not_found() -> AppError {
    AppError::NotFound("No such route".to_string())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/analyze", post(handlers::handle_analyze))
        .route("/api/v1/score", post(handlers::handle_score))
        .route(
            "/api/v1/analyze/batch",
            post(handlers::handle_analyze_batch),
        )
        .route("/api/v1/skills/levels", post(handlers::handle_skill_levels))
        .route(
            "/api/v1/projects/relevance",
            post(handlers::handle_project_relevance),
        )
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::AtsScorer;
    use crate::config::{Config, ScoringConfig};
    use crate::embedding::ModelHandle;

    const JD: &str = "Backend engineer wanted: Python, AWS and Docker for data pipelines.";

    fn test_state() -> AppState {
        AppState {
            config: Config {
                port: 0,
                rust_log: "debug".into(),
                embedding_url: None,
                embedding_model: "all-MiniLM-L6-v2".into(),
                embedding_api_key: None,
                fuzzy_skill_match_threshold: 85.0,
                semantic_skill_match_threshold: 0.70,
                max_skills_to_match: 50,
            },
            scorer: Arc::new(AtsScorer::new(
                ModelHandle::unavailable(),
                ScoringConfig::default(),
            )),
        }
    }

    async fn send(method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                builder = builder.header("content-type", "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        let response = build_router(test_state())
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn resume() -> Value {
        json!({
            "skills": ["python", "Kubernetes"],
            "experience": [{
                "title": "Engineer",
                "company": "Acme",
                "start_date": "2021-01-01",
                "end_date": "Present",
                "description": "Python services",
                "technologies": ["Python"]
            }],
            "projects": [{"title": "CLI", "description": "tooling", "technologies": ["Python"]}],
            "full_text": "Experience\n- Built Python services handling 2000 requests per second"
        })
    }

    #[tokio::test]
    async fn test_health_reports_model_status() {
        let (status, body) = send("GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["model"]["healthy"], false);
        assert_eq!(body["model"]["backend"], "none");
    }

    #[tokio::test]
    async fn test_score_route_returns_result() {
        let (status, body) = send(
            "POST",
            "/api/v1/score",
            Some(json!({"resume": resume(), "job_description": JD})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["skill_gap"]["matched"], json!(["Python"]));
        assert_eq!(body["skill_gap"]["missing"], json!(["AWS", "Docker"]));
        assert!(body["total_score"].as_u64().unwrap() <= 100);
    }

    #[tokio::test]
    async fn test_short_job_description_is_400() {
        let (status, body) = send(
            "POST",
            "/api/v1/analyze",
            Some(json!({"resume": resume(), "job_description": "too short"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_analyze_route_full_report() {
        let (status, body) = send(
            "POST",
            "/api/v1/analyze",
            Some(json!({"resume": resume(), "job_description": JD})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["skill_levels"]["python"], "Expert");
        assert_eq!(body["skill_levels"]["Kubernetes"], "Beginner");
        assert!(body["projects"][0].get("relevance_score").is_none());
        assert!(body["seniority_level"].is_string());
    }

    #[tokio::test]
    async fn test_batch_route_validates_size() {
        let (status, _) = send(
            "POST",
            "/api/v1/analyze/batch",
            Some(json!({"resumes": [], "job_description": JD})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let too_many: Vec<Value> = (0..51)
            .map(|i| json!({"label": format!("r{i}"), "resume": resume()}))
            .collect();
        let (status, _) = send(
            "POST",
            "/api/v1/analyze/batch",
            Some(json!({"resumes": too_many, "job_description": JD})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_batch_route_ranks() {
        let (status, body) = send(
            "POST",
            "/api/v1/analyze/batch",
            Some(json!({
                "resumes": [
                    {"label": "empty", "resume": {}},
                    {"label": "python", "resume": resume()}
                ],
                "job_description": JD
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["processed_count"], 2);
        assert_eq!(body["results"][0]["label"], "python");
        assert_eq!(body["results"][0]["rank"], 1);
    }

    #[tokio::test]
    async fn test_skill_levels_route() {
        let (status, body) = send(
            "POST",
            "/api/v1/skills/levels",
            Some(json!({"resume": resume()})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["Kubernetes"], "Beginner");
    }

    #[tokio::test]
    async fn test_project_relevance_route_unscored_without_model() {
        let (status, body) = send(
            "POST",
            "/api/v1/projects/relevance",
            Some(json!({"resume": resume(), "job_description": JD})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["title"], "CLI");
        assert!(body[0].get("relevance_score").is_none());
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let (status, body) = send("GET", "/api/v1/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
