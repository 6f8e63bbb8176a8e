//! Shared Application State
//!
//! This module defines the `AppState` struct, which holds the shared,
//! clonable resources built once at startup.

use crate::config::Config;
use std::sync::Arc;
use tutor_core::generator::LessonGenerator;

/// The shared application state, created once at startup and passed to all handlers.
/// All fields are public to be accessible from other modules.
#[derive(Clone)]
pub struct AppState {
    pub generator: LessonGenerator,
    pub config: Arc<Config>,
}
