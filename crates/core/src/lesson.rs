use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Every quiz question carries exactly this many answer options.
pub const QUIZ_OPTION_COUNT: usize = 4;

/// A plain-text summary of a topic, as returned by the `searchTopic` action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    pub topic: String,
    pub summary: String,
}

/// A single entry in a lesson plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lesson {
    pub title: String,
    pub description: String,
}

/// A structured plan of lessons for a topic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LessonPlan {
    pub title: String,
    pub topic: String,
    pub summary: String,
    pub lessons: Vec<Lesson>,
}

/// A multiple-choice quiz question attached to lesson content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    #[serde(rename = "correctAnswer")]
    pub correct_answer: String,
}

/// The teaching material for a single lesson, with its quiz.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LessonContent {
    pub content: String,
    pub quiz: Vec<QuizQuestion>,
}

/// Errors raised when a JSON document does not form a valid entity.
#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    /// The document could not be deserialized into the expected shape.
    #[error("{0}")]
    Shape(String),
    /// A quiz question did not carry exactly `QUIZ_OPTION_COUNT` options.
    #[error("quiz question {index} has {found} options, expected {QUIZ_OPTION_COUNT}")]
    OptionCount { index: usize, found: usize },
    /// A quiz question's correct answer is not one of its options.
    #[error("quiz question {index} has a correct answer that is not among its options")]
    AnswerNotInOptions { index: usize },
}

impl LessonPlan {
    /// Converts an already-parsed JSON document into a typed lesson plan.
    pub fn from_value(value: Value) -> Result<Self, SchemaError> {
        serde_json::from_value(value).map_err(|e| SchemaError::Shape(e.to_string()))
    }
}

impl LessonContent {
    /// Converts an already-parsed JSON document into typed lesson content,
    /// enforcing the quiz invariants.
    pub fn from_value(value: Value) -> Result<Self, SchemaError> {
        let content: LessonContent =
            serde_json::from_value(value).map_err(|e| SchemaError::Shape(e.to_string()))?;

        for (index, question) in content.quiz.iter().enumerate() {
            if question.options.len() != QUIZ_OPTION_COUNT {
                return Err(SchemaError::OptionCount {
                    index,
                    found: question.options.len(),
                });
            }
            if !question.options.contains(&question.correct_answer) {
                return Err(SchemaError::AnswerNotInOptions { index });
            }
        }
        Ok(content)
    }
}
