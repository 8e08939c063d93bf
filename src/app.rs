use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/tracker", get(handlers::get_tracker))
        .route("/api/toggle", post(handlers::toggle))
        .route("/api/note", post(handlers::set_note))
        .route("/api/reset", post(handlers::reset))
        .route("/api/export", get(handlers::export_summary))
        .with_state(state)
}
