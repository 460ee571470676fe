//! Playcall assistant: an HTTP service that turns a football game situation
//! into a prompt for a hosted language model and relays its recommendation,
//! plus a terminal client for it.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod prompt;
pub mod types;

pub use api::{router, AppState};
pub use model::{InferenceClient, InferenceError, InferenceOutput, WorkersAiClient};
pub use prompt::build_prompt;
pub use types::GameState;
