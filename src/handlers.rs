use crate::models::{AttendanceRequest, CgpaRequest};
use crate::state::{AppState, NoteKind, Tab};
use crate::ui;
use axum::{
    Form,
    extract::{Path, State},
    response::{Html, Redirect},
};
use serde::Deserialize;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, warn};

/// Activating the holidays or history tab refreshes the panel after this
/// short delay, matching the page's original deferred loads.
const LOAD_DELAY: Duration = Duration::from_millis(100);

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let mut view = state.view.lock().await;
    view.prune_notes();
    Html(ui::render_page(&view))
}

pub async fn set_tab(State(state): State<AppState>, Path(slug): Path<String>) -> Redirect {
    let Some(tab) = Tab::from_slug(&slug) else {
        // No such panel; leave the page as it was.
        warn!("ignoring unknown tab {slug:?}");
        return Redirect::to("/");
    };

    let mut view = state.view.lock().await;
    view.activate(tab);
    match tab {
        Tab::Holidays => {
            let generation = view.begin_holidays_load();
            drop(view);
            spawn_holidays_load(state, generation);
        }
        Tab::History => {
            let generation = view.begin_history_load();
            drop(view);
            spawn_history_load(state, generation);
        }
        Tab::Cgpa | Tab::Attendance => {}
    }
    Redirect::to("/")
}

fn spawn_holidays_load(state: AppState, generation: u64) {
    tokio::spawn(async move {
        sleep(LOAD_DELAY).await;
        let data = match state.backend.holidays().await {
            Ok(list) => Some(list),
            Err(err) => {
                error!("failed to load holidays: {err}");
                None
            }
        };
        let mut view = state.view.lock().await;
        if !view.apply_holidays(generation, data) {
            info!("discarding stale holidays response (generation {generation})");
        }
    });
}

fn spawn_history_load(state: AppState, generation: u64) {
    tokio::spawn(async move {
        sleep(LOAD_DELAY).await;
        let data = match state.backend.history().await {
            Ok(payload) => Some(payload),
            Err(err) => {
                error!("failed to load history: {err}");
                None
            }
        };
        let mut view = state.view.lock().await;
        if !view.apply_history(generation, data) {
            info!("discarding stale history response (generation {generation})");
        }
    });
}

pub async fn add_row(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Redirect {
    let mut view = state.view.lock().await;
    view.sync_rows(&fields);
    view.add_row();
    Redirect::to("/")
}

pub async fn remove_row(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Redirect {
    let mut view = state.view.lock().await;
    view.sync_rows(&fields);
    if !view.remove_row(id) {
        // Either the id is gone or it is the last remaining row.
        warn!("not removing semester row {id}");
    }
    Redirect::to("/")
}

pub async fn calculate_cgpa(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Redirect {
    let semesters = {
        let mut view = state.view.lock().await;
        view.sync_rows(&fields);
        let semesters = view.collect_semesters();
        if semesters.is_empty() {
            view.push_note(
                "Please enter valid SGPA and Credits for at least one semester",
                NoteKind::Error,
            );
            return Redirect::to("/");
        }
        semesters
    };

    // Lock released while the request is in flight.
    let outcome = state.backend.calculate_cgpa(&CgpaRequest { semesters }).await;

    let mut view = state.view.lock().await;
    match outcome {
        Ok(result) => {
            view.cgpa_result = Some(result);
            view.push_note("CGPA calculated successfully!", NoteKind::Success);
        }
        Err(err) => {
            error!("cgpa calculation failed: {err}");
            view.push_note(
                err.user_message("Error calculating CGPA. Please try again."),
                NoteKind::Error,
            );
        }
    }
    Redirect::to("/")
}

pub async fn reset_cgpa(State(state): State<AppState>) -> Redirect {
    let mut view = state.view.lock().await;
    view.reset_cgpa();
    Redirect::to("/")
}

#[derive(Debug, Deserialize)]
pub struct AttendanceFormBody {
    #[serde(default)]
    pub subject_name: String,
    #[serde(default)]
    pub attended: String,
    #[serde(default)]
    pub total: String,
    #[serde(default)]
    pub min_required: String,
}

impl AttendanceFormBody {
    /// Applies the page's input defaults: blank subject becomes "Subject",
    /// counts truncate to whole non-negative numbers, minimum falls back
    /// to 75.
    fn to_request(&self) -> AttendanceRequest {
        AttendanceRequest {
            subject_name: if self.subject_name.trim().is_empty() {
                "Subject".to_string()
            } else {
                self.subject_name.trim().to_string()
            },
            attended: parse_count(&self.attended),
            total: parse_count(&self.total),
            min_required: self.min_required.trim().parse().unwrap_or(75.0),
        }
    }
}

fn parse_count(raw: &str) -> u32 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|v| v.trunc() as u32)
        .unwrap_or(0)
}

pub async fn calculate_attendance(
    State(state): State<AppState>,
    Form(body): Form<AttendanceFormBody>,
) -> Redirect {
    run_attendance_calculation(&state, body).await;
    Redirect::to("/")
}

pub async fn save_attendance(
    State(state): State<AppState>,
    Form(body): Form<AttendanceFormBody>,
) -> Redirect {
    if body.subject_name.trim().is_empty() || parse_count(&body.total) == 0 {
        let mut view = state.view.lock().await;
        remember_attendance_form(&mut view, &body);
        view.push_note("Please enter valid attendance data", NoteKind::Error);
        return Redirect::to("/");
    }

    // Saving is the same calculation; the backend records it as a side
    // effect. The saved banner only fires when that call actually worked.
    if run_attendance_calculation(&state, body).await {
        let mut view = state.view.lock().await;
        view.push_note("Attendance record saved successfully!", NoteKind::Success);
        view.attendance_form.subject.clear();
    }
    Redirect::to("/")
}

/// Shared calculate flow. Returns true when a result was stored.
async fn run_attendance_calculation(state: &AppState, body: AttendanceFormBody) -> bool {
    let request = body.to_request();
    {
        let mut view = state.view.lock().await;
        remember_attendance_form(&mut view, &body);
        if request.total == 0 {
            view.push_note("Please enter valid attendance data", NoteKind::Error);
            return false;
        }
    }

    let outcome = state.backend.calculate_attendance(&request).await;

    let mut view = state.view.lock().await;
    match outcome {
        Ok(result) => {
            view.attendance_result = Some(result);
            true
        }
        Err(err) => {
            error!("attendance calculation failed: {err}");
            view.push_note(
                err.user_message("Error calculating attendance. Please try again."),
                NoteKind::Error,
            );
            false
        }
    }
}

fn remember_attendance_form(view: &mut crate::state::ViewState, body: &AttendanceFormBody) {
    view.attendance_form.subject = body.subject_name.clone();
    view.attendance_form.attended = body.attended.clone();
    view.attendance_form.total = body.total.clone();
    view.attendance_form.min_required = if body.min_required.trim().is_empty() {
        "75".to_string()
    } else {
        body.min_required.clone()
    };
}

pub async fn reset_attendance(State(state): State<AppState>) -> Redirect {
    let mut view = state.view.lock().await;
    view.attendance_form = Default::default();
    view.attendance_result = None;
    Redirect::to("/")
}

pub async fn dismiss_note(State(state): State<AppState>, Path(id): Path<u64>) -> Redirect {
    let mut view = state.view.lock().await;
    view.dismiss_note(id);
    Redirect::to("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_count_truncates_and_floors_at_zero() {
        assert_eq!(parse_count("12"), 12);
        assert_eq!(parse_count("12.9"), 12);
        assert_eq!(parse_count("-3"), 0);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("abc"), 0);
    }

    #[test]
    fn attendance_defaults_match_the_form() {
        let body = AttendanceFormBody {
            subject_name: "  ".to_string(),
            attended: String::new(),
            total: "40".to_string(),
            min_required: String::new(),
        };
        let request = body.to_request();
        assert_eq!(request.subject_name, "Subject");
        assert_eq!(request.attended, 0);
        assert_eq!(request.total, 40);
        assert_eq!(request.min_required, 75.0);
    }
}
