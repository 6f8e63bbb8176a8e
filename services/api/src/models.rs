//! API Models
//!
//! This module defines the request envelope and error body for the AI
//! endpoint, shared between the handlers and the OpenAPI documentation
//! generated with `utoipa`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// The request envelope accepted by `POST /api/ai`.
///
/// Both fields are optional at the serde level so that the handler can
/// report their absence with a precise message instead of a generic
/// deserialization failure.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ActionRequest {
    #[schema(example = "searchTopic")]
    pub action: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub payload: Option<Value>,
}

/// The error body returned for every non-success response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Internal Server Error")]
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Debug detail, only populated in the development environment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}
