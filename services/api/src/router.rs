//! Axum Router Configuration
//!
//! This module defines the HTTP routing for the application, including
//! the AI endpoint and OpenAPI documentation.

use crate::{
    handlers,
    models::{ActionRequest, ErrorResponse},
    state::AppState,
};

use axum::{Router, routing::post};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(handlers::dispatch),
    components(schemas(ActionRequest, ErrorResponse)),
    tags(
        (name = "Tutor API", description = "LLM-backed generation of topic summaries, lesson plans, and lesson content")
    )
)]
pub struct ApiDoc;

/// Creates the main Axum router for the application.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    // Group all routes that require AppState into their own router.
    let api_router = Router::new()
        .route("/api/ai", post(handlers::dispatch))
        // Apply the state ONLY to this group of routes.
        .with_state(app_state);

    // Create the final router that merges the stateful routes
    // with the stateless routes (like Swagger UI).
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_router)
}
