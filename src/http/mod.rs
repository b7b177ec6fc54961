//! HTTP boundary for the transcription service
//!
//! - POST /transcribe - Transcribe an uploaded WAV buffer
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
