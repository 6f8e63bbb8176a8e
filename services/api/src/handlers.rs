//! Axum Handlers for the AI Endpoint
//!
//! This module contains the action dispatcher behind `POST /api/ai`.
//! It uses `utoipa` doc comments to generate OpenAPI documentation.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::Value;
use std::sync::Arc;
use tracing::error;

use tutor_core::generator::GenerateError;

use crate::{
    models::{ActionRequest, ErrorResponse},
    state::AppState,
};

pub enum ApiError {
    BadRequest(String),
    Internal {
        message: String,
        stack: Option<String>,
    },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: message,
                    message: None,
                    stack: None,
                }),
            )
                .into_response(),
            ApiError::Internal { message, stack } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal Server Error".to_string(),
                    message: Some(message),
                    stack,
                }),
            )
                .into_response(),
        }
    }
}

fn internal_error(state: &AppState, err: GenerateError) -> ApiError {
    error!("AI action failed: {:?}", err);
    let stack = state
        .config
        .environment
        .is_development()
        .then(|| format!("{:?}", err));
    ApiError::Internal {
        message: err.to_string(),
        stack,
    }
}

fn require_str<'a>(payload: &'a Value, field: &str) -> Result<&'a str, ApiError> {
    payload
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            ApiError::BadRequest(format!("Invalid or missing \"{}\" in payload.", field))
        })
}

/// Dispatch an AI generation action.
#[utoipa::path(
    post,
    path = "/api/ai",
    request_body = ActionRequest,
    responses(
        (status = 200, description = "Result of the requested action"),
        (status = 400, description = "Invalid request envelope or payload", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn dispatch(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ActionRequest>,
) -> Result<Response, ApiError> {
    let action = request
        .action
        .filter(|a| !a.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing \"action\" in request body.".to_string()))?;

    let payload = request
        .payload
        .filter(|p| !p.is_null())
        .ok_or_else(|| ApiError::BadRequest("Missing \"payload\" in request body.".to_string()))?;

    let response = match action.as_str() {
        "searchTopic" => {
            let topic = require_str(&payload, "topic")?;
            let result = state
                .generator
                .search_topic(topic)
                .await
                .map_err(|e| internal_error(&state, e))?;
            Json(result).into_response()
        }
        "generateLessonPlan" => {
            let topic = require_str(&payload, "topic")?;
            let summary = require_str(&payload, "summary")?;
            let plan = state
                .generator
                .generate_lesson_plan(topic, summary)
                .await
                .map_err(|e| internal_error(&state, e))?;
            Json(plan).into_response()
        }
        "generateLessonContent" => {
            let title = require_str(&payload, "title")?;
            let description = require_str(&payload, "description")?;
            let topic = require_str(&payload, "topic")?;
            let summary = require_str(&payload, "summary")?;
            let content = state
                .generator
                .generate_lesson_content(title, description, topic, summary)
                .await
                .map_err(|e| internal_error(&state, e))?;
            Json(content).into_response()
        }
        _ => return Err(ApiError::BadRequest("Invalid action".to_string())),
    };

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use async_trait::async_trait;
    use serde_json::json;
    use tracing::Level;
    use tutor_core::generator::LessonGenerator;
    use tutor_core::llm_client::{ChatClient, CompletionRequest, LlmError};

    struct ScriptedClient {
        reply: Result<String, ()>,
    }

    #[async_trait]
    impl ChatClient for ScriptedClient {
        async fn complete(&self, _request: CompletionRequest) -> Result<String, LlmError> {
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(()) => Err(LlmError::EmptyCompletion),
            }
        }
    }

    fn test_state(reply: Result<String, ()>, environment: Environment) -> Arc<AppState> {
        let config = Config {
            bind_address: "127.0.0.1:3000".parse().unwrap(),
            openai_api_key: "test-key".to_string(),
            openai_api_base: "https://api.openai.com/v1".to_string(),
            chat_model: "gpt-3.5-turbo".to_string(),
            log_level: Level::INFO,
            environment,
        };
        Arc::new(AppState {
            generator: LessonGenerator::new(Arc::new(ScriptedClient { reply })),
            config: Arc::new(config),
        })
    }

    async fn call(state: Arc<AppState>, body: Value) -> (StatusCode, Value) {
        let request: ActionRequest = serde_json::from_value(body).unwrap();
        let response = match dispatch(State(state), Json(request)).await {
            Ok(response) => response,
            Err(err) => err.into_response(),
        };
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        (status, value)
    }

    const PLAN_REPLY: &str = r#"```json
{
  "title": "Lesson Plan for Rust",
  "topic": "Rust",
  "summary": "A systems programming language.",
  "lessons": [
    { "title": "Ownership", "description": "How Rust manages memory." }
  ]
}
```"#;

    #[tokio::test]
    async fn missing_action_is_rejected() {
        let state = test_state(Ok("unused".to_string()), Environment::Production);
        let (status, body) = call(state, json!({ "payload": { "topic": "Rust" } })).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing \"action\" in request body.");
    }

    #[tokio::test]
    async fn missing_payload_is_rejected() {
        let state = test_state(Ok("unused".to_string()), Environment::Production);
        let (status, body) = call(state, json!({ "action": "searchTopic" })).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing \"payload\" in request body.");
    }

    #[tokio::test]
    async fn unknown_action_is_rejected() {
        let state = test_state(Ok("unused".to_string()), Environment::Production);
        let (status, body) = call(
            state,
            json!({ "action": "makeCoffee", "payload": { "topic": "Rust" } }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid action");
    }

    #[tokio::test]
    async fn search_topic_requires_topic_field() {
        let state = test_state(Ok("unused".to_string()), Environment::Production);
        let (status, body) =
            call(state, json!({ "action": "searchTopic", "payload": {} })).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid or missing \"topic\" in payload.");
    }

    #[tokio::test]
    async fn search_topic_rejects_non_string_topic() {
        let state = test_state(Ok("unused".to_string()), Environment::Production);
        let (status, body) = call(
            state,
            json!({ "action": "searchTopic", "payload": { "topic": 42 } }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid or missing \"topic\" in payload.");
    }

    #[tokio::test]
    async fn search_topic_returns_topic_and_summary() {
        let state = test_state(
            Ok("A systems programming language.".to_string()),
            Environment::Production,
        );
        let (status, body) = call(
            state,
            json!({ "action": "searchTopic", "payload": { "topic": "Rust" } }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "topic": "Rust", "summary": "A systems programming language." })
        );
    }

    #[tokio::test]
    async fn lesson_plan_requires_summary_field() {
        let state = test_state(Ok("unused".to_string()), Environment::Production);
        let (status, body) = call(
            state,
            json!({ "action": "generateLessonPlan", "payload": { "topic": "Rust" } }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid or missing \"summary\" in payload.");
    }

    #[tokio::test]
    async fn lesson_plan_happy_path() {
        let state = test_state(Ok(PLAN_REPLY.to_string()), Environment::Production);
        let (status, body) = call(
            state,
            json!({
                "action": "generateLessonPlan",
                "payload": { "topic": "Rust", "summary": "A systems programming language." }
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Lesson Plan for Rust");
        assert_eq!(body["lessons"][0]["title"], "Ownership");
    }

    #[tokio::test]
    async fn unfenced_plan_reply_maps_to_500_envelope() {
        let state = test_state(
            Ok("here is your plan without a fence".to_string()),
            Environment::Production,
        );
        let (status, body) = call(
            state,
            json!({
                "action": "generateLessonPlan",
                "payload": { "topic": "Rust", "summary": "A summary." }
            }),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal Server Error");
        assert_eq!(body["message"], "Lesson plan is not in JSON format.");
        assert!(body.get("stack").is_none());
    }

    #[tokio::test]
    async fn stack_is_exposed_only_in_development() {
        let state = test_state(
            Ok("no fence here either".to_string()),
            Environment::Development,
        );
        let (status, body) = call(
            state,
            json!({
                "action": "generateLessonPlan",
                "payload": { "topic": "Rust", "summary": "A summary." }
            }),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["stack"].as_str().is_some_and(|s| !s.is_empty()));
    }

    #[tokio::test]
    async fn empty_completion_maps_to_500_envelope() {
        let state = test_state(Err(()), Environment::Production);
        let (status, body) = call(
            state,
            json!({ "action": "searchTopic", "payload": { "topic": "Rust" } }),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal Server Error");
        assert_eq!(body["message"], "LLM response contained no content.");
    }

    #[tokio::test]
    async fn lesson_content_validates_fields_in_order() {
        let state = test_state(Ok("unused".to_string()), Environment::Production);
        let (status, body) = call(
            state,
            json!({
                "action": "generateLessonContent",
                "payload": { "description": "D", "topic": "T", "summary": "S" }
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid or missing \"title\" in payload.");
    }

    #[tokio::test]
    async fn lesson_content_happy_path() {
        let reply = r#"```json
{
  "content": "Ownership moves values between bindings.",
  "quiz": [
    {
      "question": "What happens when a value is moved?",
      "options": ["It is copied", "The old binding is invalid", "Nothing", "It is dropped"],
      "correctAnswer": "The old binding is invalid"
    }
  ]
}
```"#;
        let state = test_state(Ok(reply.to_string()), Environment::Production);
        let (status, body) = call(
            state,
            json!({
                "action": "generateLessonContent",
                "payload": {
                    "title": "Ownership",
                    "description": "How Rust manages memory.",
                    "topic": "Rust",
                    "summary": "A systems programming language."
                }
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["quiz"][0]["correctAnswer"], "The old binding is invalid");
    }
}
