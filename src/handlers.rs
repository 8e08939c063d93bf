use crate::clock::Clock;
use crate::engine::StreakEngine;
use crate::errors::AppError;
use crate::export;
use crate::models::{NoteRequest, ToggleRequest, TrackerResponse};
use crate::state::AppState;
use crate::storage::sanitize_key;
use crate::ui::render_index;
use axum::{
    Json,
    extract::State,
    http::header,
    response::{Html, IntoResponse},
};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let engine = state.engine.lock().await;
    Html(render_index(engine.config()))
}

pub async fn get_tracker(State(state): State<AppState>) -> Result<Json<TrackerResponse>, AppError> {
    let engine = state.engine.lock().await;
    Ok(Json(to_response(&engine, state.clock.as_ref())))
}

pub async fn toggle(
    State(state): State<AppState>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<TrackerResponse>, AppError> {
    let mut engine = state.engine.lock().await;
    engine.toggle_day(payload.day, state.clock.as_ref())?;
    Ok(Json(to_response(&engine, state.clock.as_ref())))
}

pub async fn set_note(
    State(state): State<AppState>,
    Json(payload): Json<NoteRequest>,
) -> Result<Json<TrackerResponse>, AppError> {
    let mut engine = state.engine.lock().await;
    engine.set_note(payload.day, &payload.text)?;
    Ok(Json(to_response(&engine, state.clock.as_ref())))
}

pub async fn reset(State(state): State<AppState>) -> Result<Json<TrackerResponse>, AppError> {
    let mut engine = state.engine.lock().await;
    engine.reset(state.clock.as_ref());
    Ok(Json(to_response(&engine, state.clock.as_ref())))
}

pub async fn export_summary(State(state): State<AppState>) -> impl IntoResponse {
    let engine = state.engine.lock().await;
    let text = export::summary(&engine, state.clock.as_ref());
    let filename = format!("{}-summary.txt", sanitize_key(&engine.config().key));

    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        text,
    )
}

fn to_response(engine: &StreakEngine, clock: &dyn Clock) -> TrackerResponse {
    let config = engine.config();

    TrackerResponse {
        name: config.name.clone(),
        key: config.key.clone(),
        total_days: config.total_days,
        start_date: engine.start_date().to_string(),
        current_day: engine.current_day_number(clock),
        current_streak: engine.current_streak(clock),
        longest_streak: engine.longest_streak(),
        percent_complete: engine.percent_complete(),
        completed_count: engine.completed().len() as u32,
        completed: engine.completed().iter().copied().collect(),
        missed: engine.missed().iter().copied().collect(),
        notes: engine.notes().clone(),
    }
}
