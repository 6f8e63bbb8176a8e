//! Generation use cases: topic search, lesson plans, lesson content.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::extract::{ExtractError, extract_json};
use crate::lesson::{LessonContent, LessonPlan, SchemaError, SearchResult};
use crate::llm_client::{ChatClient, CompletionRequest, LlmError};
use crate::prompt;

const SUMMARY_MAX_TOKENS: u32 = 150;
const PLAN_MAX_TOKENS: u32 = 500;
const CONTENT_MAX_TOKENS: u32 = 1000;
const GENERATION_TEMPERATURE: f32 = 0.7;

/// The two generated entities that go through the fenced-JSON contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    LessonPlan,
    LessonContent,
}

impl Entity {
    fn title_case(self) -> &'static str {
        match self {
            Entity::LessonPlan => "Lesson plan",
            Entity::LessonContent => "Lesson content",
        }
    }

    fn lower_case(self) -> &'static str {
        match self {
            Entity::LessonPlan => "lesson plan",
            Entity::LessonContent => "lesson content",
        }
    }
}

/// Errors surfaced by the generation operations.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The upstream completion call failed or returned nothing usable.
    #[error(transparent)]
    Llm(#[from] LlmError),
    /// The model reply carried no ```json fenced block.
    #[error("{} is not in JSON format.", .entity.title_case())]
    NotFenced { entity: Entity },
    /// The fenced block did not parse as JSON.
    #[error("Invalid {} JSON received from OpenAI.", .entity.lower_case())]
    MalformedJson { entity: Entity, detail: String },
    /// The parsed document lacked required top-level fields.
    #[error("{} is missing required fields.", .entity.title_case())]
    MissingFields { entity: Entity, fields: Vec<String> },
    /// The document parsed but violated an entity invariant.
    #[error("{} failed validation: {source}", .entity.title_case())]
    SchemaViolation { entity: Entity, source: SchemaError },
}

fn contract_error(entity: Entity, err: ExtractError) -> GenerateError {
    match err {
        ExtractError::NotFenced => GenerateError::NotFenced { entity },
        ExtractError::MalformedJson(detail) => GenerateError::MalformedJson { entity, detail },
        ExtractError::MissingFields(fields) => GenerateError::MissingFields { entity, fields },
    }
}

fn schema_error(entity: Entity, source: SchemaError) -> GenerateError {
    GenerateError::SchemaViolation { entity, source }
}

/// Generates learning material through an injected chat-completion client.
///
/// Every operation performs exactly one upstream call and surfaces the
/// first failure; there is no retry or repair step.
#[derive(Clone)]
pub struct LessonGenerator {
    client: Arc<dyn ChatClient>,
}

impl LessonGenerator {
    pub fn new(client: Arc<dyn ChatClient>) -> Self {
        Self { client }
    }

    /// Produces a brief plain-text summary of `topic`.
    pub async fn search_topic(&self, topic: &str) -> Result<SearchResult, GenerateError> {
        info!(topic, "searching topic");

        let summary = self
            .client
            .complete(CompletionRequest {
                system: prompt::SUMMARY_SYSTEM.to_owned(),
                user: prompt::summary_prompt(topic),
                max_tokens: SUMMARY_MAX_TOKENS,
                temperature: None,
            })
            .await?;

        debug!(topic, summary_len = summary.len(), "summary generated");
        Ok(SearchResult {
            topic: topic.to_owned(),
            summary,
        })
    }

    /// Produces a structured lesson plan for `topic` grounded in `summary`.
    pub async fn generate_lesson_plan(
        &self,
        topic: &str,
        summary: &str,
    ) -> Result<LessonPlan, GenerateError> {
        info!(topic, "generating lesson plan");

        let reply = self
            .client
            .complete(CompletionRequest {
                system: prompt::LESSON_PLAN_SYSTEM.to_owned(),
                user: prompt::lesson_plan_prompt(topic, summary),
                max_tokens: PLAN_MAX_TOKENS,
                temperature: Some(GENERATION_TEMPERATURE),
            })
            .await?;

        let value = extract_json(&reply, &["title", "topic", "summary", "lessons"])
            .map_err(|e| contract_error(Entity::LessonPlan, e))?;
        let plan =
            LessonPlan::from_value(value).map_err(|e| schema_error(Entity::LessonPlan, e))?;

        debug!(topic, lessons = plan.lessons.len(), "lesson plan generated");
        Ok(plan)
    }

    /// Produces the content and quiz for one lesson of a plan.
    pub async fn generate_lesson_content(
        &self,
        title: &str,
        description: &str,
        topic: &str,
        summary: &str,
    ) -> Result<LessonContent, GenerateError> {
        info!(topic, lesson = title, "generating lesson content");

        let reply = self
            .client
            .complete(CompletionRequest {
                system: prompt::LESSON_CONTENT_SYSTEM.to_owned(),
                user: prompt::lesson_content_prompt(title, description, topic, summary),
                max_tokens: CONTENT_MAX_TOKENS,
                temperature: Some(GENERATION_TEMPERATURE),
            })
            .await?;

        let value = extract_json(&reply, &["content", "quiz"])
            .map_err(|e| contract_error(Entity::LessonContent, e))?;
        let content = LessonContent::from_value(value)
            .map_err(|e| schema_error(Entity::LessonContent, e))?;

        debug!(
            topic,
            lesson = title,
            questions = content.quiz.len(),
            "lesson content generated"
        );
        Ok(content)
    }
}
