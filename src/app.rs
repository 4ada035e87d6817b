use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/tabs/:slug", post(handlers::set_tab))
        .route("/cgpa/rows/add", post(handlers::add_row))
        .route("/cgpa/rows/:id/remove", post(handlers::remove_row))
        .route("/cgpa/calculate", post(handlers::calculate_cgpa))
        .route("/cgpa/reset", post(handlers::reset_cgpa))
        .route("/attendance/calculate", post(handlers::calculate_attendance))
        .route("/attendance/save", post(handlers::save_attendance))
        .route("/attendance/reset", post(handlers::reset_attendance))
        .route("/notes/:id/dismiss", post(handlers::dismiss_note))
        .with_state(state)
}
