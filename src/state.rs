use crate::api::BackendClient;
use crate::models::{AttendanceResponse, CgpaResponse, HistoryResponse, Holiday, SemesterEntry};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// How long a notification stays up unless dismissed first.
pub const NOTE_TTL: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct AppState {
    pub backend: BackendClient,
    pub view: Arc<Mutex<ViewState>>,
}

impl AppState {
    pub fn new(backend: BackendClient) -> Self {
        Self {
            backend,
            view: Arc::new(Mutex::new(ViewState::new())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Cgpa,
    Attendance,
    Holidays,
    History,
}

impl Tab {
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "cgpa" => Some(Tab::Cgpa),
            "attendance" => Some(Tab::Attendance),
            "holidays" => Some(Tab::Holidays),
            "history" => Some(Tab::History),
            _ => None,
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Tab::Cgpa => "cgpa",
            Tab::Attendance => "attendance",
            Tab::Holidays => "holidays",
            Tab::History => "history",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub kind: NoteKind,
    created_at: Instant,
}

/// One semester input row. The id is the row's identity: form fields and
/// the remove action key on it, and it is never reused while the row set
/// lives. The ordinal is a display label only: it is never renumbered, and
/// after removals it is neither contiguous nor guaranteed unique.
#[derive(Debug, Clone)]
pub struct SemesterRow {
    pub id: u64,
    pub ordinal: u32,
    pub sgpa_input: String,
    pub credits_input: String,
}

impl SemesterRow {
    fn blank(id: u64, ordinal: u32) -> Self {
        Self {
            id,
            ordinal,
            sgpa_input: String::new(),
            credits_input: String::new(),
        }
    }
}

/// Contents of a panel that loads from the backend on activation.
#[derive(Debug, Clone)]
pub enum PanelData<T> {
    Loading,
    Ready(T),
    Failed,
}

/// Raw attendance form values, echoed back so the form round-trips.
#[derive(Debug, Clone)]
pub struct AttendanceForm {
    pub subject: String,
    pub attended: String,
    pub total: String,
    pub min_required: String,
}

impl Default for AttendanceForm {
    fn default() -> Self {
        Self {
            subject: String::new(),
            attended: String::new(),
            total: String::new(),
            min_required: "75".to_string(),
        }
    }
}

/// Everything the page shows, held for the lifetime of the process. All
/// mutation goes through named methods; handlers hold the lock only long
/// enough to read or apply one action.
pub struct ViewState {
    pub active_tab: Tab,
    pub rows: Vec<SemesterRow>,
    counter: u32,
    next_row_id: u64,
    pub cgpa_result: Option<CgpaResponse>,
    pub attendance_form: AttendanceForm,
    pub attendance_result: Option<AttendanceResponse>,
    pub holidays: PanelData<Vec<Holiday>>,
    holidays_generation: u64,
    pub history: PanelData<HistoryResponse>,
    history_generation: u64,
    pub notes: Vec<Notification>,
    next_note_id: u64,
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            active_tab: Tab::Cgpa,
            rows: vec![SemesterRow::blank(1, 1)],
            counter: 1,
            next_row_id: 2,
            cgpa_result: None,
            attendance_form: AttendanceForm::default(),
            attendance_result: None,
            holidays: PanelData::Loading,
            holidays_generation: 0,
            history: PanelData::Loading,
            history_generation: 0,
            notes: Vec::new(),
            next_note_id: 0,
        }
    }

    pub fn activate(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    /// Appends a fresh row labeled with the incremented counter.
    pub fn add_row(&mut self) {
        self.counter += 1;
        let id = self.next_row_id;
        self.next_row_id += 1;
        self.rows.push(SemesterRow::blank(id, self.counter));
    }

    /// Removes the row with the given id. The last remaining row can never
    /// be removed, and the counter only moves when a row actually went
    /// away, so a repeat of the same removal is a no-op.
    pub fn remove_row(&mut self, id: u64) -> bool {
        if self.rows.len() <= 1 {
            return false;
        }
        let Some(position) = self.rows.iter().position(|row| row.id == id) else {
            return false;
        };
        self.rows.remove(position);
        self.counter = self.counter.saturating_sub(1);
        true
    }

    /// Back to a single blank row and no rendered result. With every other
    /// row gone the id space restarts too.
    pub fn reset_cgpa(&mut self) {
        self.rows = vec![SemesterRow::blank(1, 1)];
        self.counter = 1;
        self.next_row_id = 2;
        self.cgpa_result = None;
    }

    /// The remove control only renders while more than one row exists.
    pub fn removable(&self) -> bool {
        self.rows.len() > 1
    }

    /// Copies posted input values back into the matching rows, so row edits
    /// survive add/remove/calculate round trips.
    pub fn sync_rows(&mut self, fields: &[(String, String)]) {
        for row in &mut self.rows {
            let sgpa_key = format!("sgpa-{}", row.id);
            let credits_key = format!("credits-{}", row.id);
            for (name, value) in fields {
                if *name == sgpa_key {
                    row.sgpa_input = value.clone();
                } else if *name == credits_key {
                    row.credits_input = value.clone();
                }
            }
        }
    }

    /// Rows ready for submission: blank or invalid numbers parse as zero,
    /// and only rows with both values positive survive, in display order.
    pub fn collect_semesters(&self) -> Vec<SemesterEntry> {
        self.rows
            .iter()
            .map(|row| SemesterEntry {
                sgpa: row.sgpa_input.trim().parse().unwrap_or(0.0),
                credits: row.credits_input.trim().parse().unwrap_or(0.0),
            })
            .filter(|entry| entry.sgpa > 0.0 && entry.credits > 0.0)
            .collect()
    }

    pub fn push_note(&mut self, message: impl Into<String>, kind: NoteKind) -> u64 {
        self.push_note_at(message, kind, Instant::now())
    }

    pub fn push_note_at(&mut self, message: impl Into<String>, kind: NoteKind, now: Instant) -> u64 {
        let id = self.next_note_id;
        self.next_note_id += 1;
        self.notes.push(Notification {
            id,
            message: message.into(),
            kind,
            created_at: now,
        });
        id
    }

    /// Removes a note by id. Dismissing twice, or after expiry already
    /// pruned it, does nothing.
    pub fn dismiss_note(&mut self, id: u64) {
        self.notes.retain(|note| note.id != id);
    }

    pub fn prune_notes(&mut self) {
        self.prune_notes_at(Instant::now());
    }

    pub fn prune_notes_at(&mut self, now: Instant) {
        self.notes
            .retain(|note| now.duration_since(note.created_at) < NOTE_TTL);
    }

    /// Marks the holidays panel as loading and hands out the generation the
    /// caller must present when applying the response.
    pub fn begin_holidays_load(&mut self) -> u64 {
        self.holidays = PanelData::Loading;
        self.holidays_generation += 1;
        self.holidays_generation
    }

    /// Applies a holidays response, unless a newer load has started since.
    /// Returns false for stale responses, which are dropped on the floor.
    pub fn apply_holidays(&mut self, generation: u64, data: Option<Vec<Holiday>>) -> bool {
        if generation != self.holidays_generation {
            return false;
        }
        self.holidays = match data {
            Some(list) => PanelData::Ready(list),
            None => PanelData::Failed,
        };
        true
    }

    pub fn begin_history_load(&mut self) -> u64 {
        self.history = PanelData::Loading;
        self.history_generation += 1;
        self.history_generation
    }

    pub fn apply_history(&mut self, generation: u64, data: Option<HistoryResponse>) -> bool {
        if generation != self.history_generation {
            return false;
        }
        self.history = match data {
            Some(payload) => PanelData::Ready(payload),
            None => PanelData::Failed,
        };
        true
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_then_remove_restores_row_count() {
        let mut view = ViewState::new();
        assert_eq!(view.rows.len(), 1);
        assert!(!view.removable());

        view.add_row();
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[1].ordinal, 2);
        assert!(view.removable());

        let added = view.rows[1].id;
        assert!(view.remove_row(added));
        assert_eq!(view.rows.len(), 1);
        assert!(!view.removable());
    }

    #[test]
    fn last_row_cannot_be_removed() {
        let mut view = ViewState::new();
        let only = view.rows[0].id;
        assert!(!view.remove_row(only));
        assert_eq!(view.rows.len(), 1);

        // The counter did not move either, so labels stay in step.
        view.add_row();
        assert_eq!(view.rows[1].ordinal, 2);
    }

    #[test]
    fn duplicate_display_labels_keep_distinct_values() {
        let mut view = ViewState::new();
        view.add_row();
        let first = view.rows[0].id;
        assert!(view.remove_row(first));
        view.add_row();

        // Both rows now carry the label "Semester 2"; only the ids differ.
        assert_eq!(view.rows[0].ordinal, view.rows[1].ordinal);
        let (left, right) = (view.rows[0].id, view.rows[1].id);
        assert_ne!(left, right);

        view.sync_rows(&[
            (format!("sgpa-{left}"), "9.9".to_string()),
            (format!("sgpa-{right}"), "1.1".to_string()),
        ]);
        assert_eq!(view.rows[0].sgpa_input, "9.9");
        assert_eq!(view.rows[1].sgpa_input, "1.1");
    }

    #[test]
    fn remove_of_unknown_row_leaves_counter_alone() {
        let mut view = ViewState::new();
        view.add_row();
        assert!(!view.remove_row(99));
        assert_eq!(view.rows.len(), 2);

        // The counter did not drift, so the next label is still fresh.
        view.add_row();
        assert_eq!(view.rows.last().unwrap().ordinal, 3);
    }

    #[test]
    fn reset_returns_to_single_blank_row() {
        let mut view = ViewState::new();
        view.add_row();
        view.add_row();
        view.rows[0].sgpa_input = "8.4".to_string();
        view.cgpa_result = Some(CgpaResponse::default());

        view.reset_cgpa();
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].ordinal, 1);
        assert!(view.rows[0].sgpa_input.is_empty());
        assert!(view.cgpa_result.is_none());

        // Counter restarts from 1 as well.
        view.add_row();
        assert_eq!(view.rows.last().unwrap().ordinal, 2);
    }

    #[test]
    fn collect_drops_non_positive_rows_in_order() {
        let mut view = ViewState::new();
        view.add_row();
        view.add_row();
        view.rows[0].sgpa_input = "8.37".to_string();
        view.rows[0].credits_input = "23".to_string();
        view.rows[1].sgpa_input = "0".to_string();
        view.rows[1].credits_input = "20".to_string();
        view.rows[2].sgpa_input = "7.1".to_string();
        view.rows[2].credits_input = "21".to_string();

        let entries = view.collect_semesters();
        assert_eq!(
            entries,
            vec![
                SemesterEntry {
                    sgpa: 8.37,
                    credits: 23.0
                },
                SemesterEntry {
                    sgpa: 7.1,
                    credits: 21.0
                },
            ]
        );
    }

    #[test]
    fn collect_treats_garbage_as_zero() {
        let mut view = ViewState::new();
        view.rows[0].sgpa_input = "eight".to_string();
        view.rows[0].credits_input = "23".to_string();
        assert!(view.collect_semesters().is_empty());
    }

    #[test]
    fn stale_holiday_response_is_discarded() {
        let mut view = ViewState::new();
        let first = view.begin_holidays_load();
        let second = view.begin_holidays_load();

        // The newer load resolves first.
        assert!(view.apply_holidays(second, Some(Vec::new())));
        assert!(matches!(view.holidays, PanelData::Ready(_)));

        // The older response arrives late and must not overwrite it.
        assert!(!view.apply_holidays(first, None));
        assert!(matches!(view.holidays, PanelData::Ready(_)));
    }

    #[test]
    fn history_failure_applies_to_current_generation() {
        let mut view = ViewState::new();
        let generation = view.begin_history_load();
        assert!(matches!(view.history, PanelData::Loading));
        assert!(view.apply_history(generation, None));
        assert!(matches!(view.history, PanelData::Failed));
    }

    #[test]
    fn notes_expire_after_ttl_and_dismiss_is_idempotent() {
        let mut view = ViewState::new();
        let start = Instant::now();
        let id = view.push_note_at("saved", NoteKind::Success, start);

        view.prune_notes_at(start + Duration::from_secs(4));
        assert_eq!(view.notes.len(), 1);

        view.prune_notes_at(start + Duration::from_secs(6));
        assert!(view.notes.is_empty());

        // Dismissing an already-pruned note is a no-op.
        view.dismiss_note(id);
        assert!(view.notes.is_empty());
    }

    #[test]
    fn sync_rows_copies_posted_values_by_id() {
        let mut view = ViewState::new();
        view.add_row();
        view.sync_rows(&[
            ("sgpa-1".to_string(), "9.1".to_string()),
            ("credits-1".to_string(), "22".to_string()),
            ("sgpa-2".to_string(), "7.8".to_string()),
            ("credits-2".to_string(), "20".to_string()),
            ("unrelated".to_string(), "x".to_string()),
        ]);
        assert_eq!(view.rows[0].sgpa_input, "9.1");
        assert_eq!(view.rows[1].credits_input, "20");
    }

    #[test]
    fn tab_slugs_round_trip() {
        for tab in [Tab::Cgpa, Tab::Attendance, Tab::Holidays, Tab::History] {
            assert_eq!(Tab::from_slug(tab.slug()), Some(tab));
        }
        assert_eq!(Tab::from_slug("timetable"), None);
    }
}
