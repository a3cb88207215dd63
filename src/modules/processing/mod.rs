use crate::state::AppState;
use axum::Router;
use axum::routing::post;

pub mod dto;
pub mod error;
pub mod handler;
pub mod job;
pub mod locks;
pub mod pipeline;
pub mod service;
#[cfg(test)]
pub mod testing;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/process-video", post(handler::process_video))
        .route("/process-video/local", post(handler::process_local_video))
}
