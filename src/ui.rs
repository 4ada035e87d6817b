use crate::format::format_date;
use crate::models::{AttendanceResponse, CgpaResponse, HistoryRecord, HistoryResponse, Holiday};
use crate::state::{NoteKind, Notification, PanelData, SemesterRow, Tab, ViewState};

/// Escapes backend-supplied text before it lands in markup. Everything the
/// renderers interpolate goes through here, including class-name fragments.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn capitalize(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// "N/A" stands in for absent values and for zero, matching the page's
/// original falsy-fallback behavior.
fn number_or_na(value: Option<f64>) -> String {
    match value {
        Some(v) if v != 0.0 => format!("{v}"),
        _ => "N/A".to_string(),
    }
}

fn json_number_or_na(value: Option<&serde_json::Value>) -> String {
    match value {
        Some(serde_json::Value::Number(n)) if n.as_f64().is_some_and(|v| v != 0.0) => n.to_string(),
        Some(serde_json::Value::String(s)) if !s.is_empty() => escape_html(s),
        _ => "N/A".to_string(),
    }
}

fn json_count(value: Option<&serde_json::Value>) -> String {
    match value {
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => "0".to_string(),
    }
}

fn json_string_or(value: Option<&serde_json::Value>, fallback: &str) -> String {
    match value {
        Some(serde_json::Value::String(s)) if !s.is_empty() => escape_html(s),
        _ => fallback.to_string(),
    }
}

pub fn render_page(view: &ViewState) -> String {
    let active = |tab: Tab| if view.active_tab == tab { " active" } else { "" };

    PAGE_HTML
        .replace("{{TAB_CGPA}}", active(Tab::Cgpa))
        .replace("{{TAB_ATTENDANCE}}", active(Tab::Attendance))
        .replace("{{TAB_HOLIDAYS}}", active(Tab::Holidays))
        .replace("{{TAB_HISTORY}}", active(Tab::History))
        .replace(
            "{{SEMESTER_ROWS}}",
            &render_semester_rows(&view.rows, view.removable()),
        )
        .replace("{{CGPA_RESULTS}}", &render_cgpa_result(&view.cgpa_result))
        .replace("{{SUBJECT}}", &escape_html(&view.attendance_form.subject))
        .replace("{{ATTENDED}}", &escape_html(&view.attendance_form.attended))
        .replace("{{TOTAL}}", &escape_html(&view.attendance_form.total))
        .replace(
            "{{MIN_REQUIRED}}",
            &escape_html(&view.attendance_form.min_required),
        )
        .replace(
            "{{ATTENDANCE_RESULTS}}",
            &render_attendance_result(&view.attendance_result),
        )
        .replace("{{HOLIDAYS}}", &render_holidays_panel(&view.holidays))
        .replace("{{CGPA_HISTORY}}", &render_cgpa_history(&view.history))
        .replace(
            "{{ATTENDANCE_HISTORY}}",
            &render_attendance_history(&view.history),
        )
        .replace("{{NOTES}}", &render_notes(&view.notes))
}

pub fn render_semester_rows(rows: &[SemesterRow], removable: bool) -> String {
    rows.iter()
        .map(|row| {
            let remove = if removable {
                format!(
                    "<button class=\"remove-semester\" type=\"submit\" \
                     formaction=\"/cgpa/rows/{}/remove\">Remove</button>",
                    row.id
                )
            } else {
                String::new()
            };
            // Fields key on the row id; the ordinal is only the title.
            format!(
                "<div class=\"semester-item\">\n\
                 <div class=\"semester-header\">\
                 <span class=\"semester-title\">Semester {ordinal}</span>{remove}</div>\n\
                 <div class=\"semester-inputs\">\n\
                 <label>SGPA <input type=\"number\" step=\"0.01\" min=\"0\" max=\"10\" \
                 name=\"sgpa-{id}\" value=\"{sgpa}\" placeholder=\"e.g., 8.37\"></label>\n\
                 <label>Credits <input type=\"number\" min=\"0\" \
                 name=\"credits-{id}\" value=\"{credits}\" placeholder=\"e.g., 23\"></label>\n\
                 </div>\n</div>",
                id = row.id,
                ordinal = row.ordinal,
                sgpa = escape_html(&row.sgpa_input),
                credits = escape_html(&row.credits_input),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_cgpa_result(result: &Option<CgpaResponse>) -> String {
    let Some(data) = result else {
        return empty_state("Enter your semester details and click \"Calculate CGPA\" to see your results");
    };
    format!(
        "<div class=\"cgpa-result-card\">\n\
         <h3>Your CGPA</h3>\n\
         <div class=\"cgpa-value\">{cgpa}</div>\n\
         <div class=\"cgpa-scale\">Out of 10.00</div>\n\
         </div>\n\
         <div class=\"gpa-scales\">\n\
         <div class=\"gpa-scale-card\">\n\
         <div class=\"scale-value\">{gpa4}</div>\n\
         <div class=\"scale-label\">4.0 Scale (US)</div>\n\
         <div class=\"scale-formula\">Formula: (CGPA - 5) &times; 4 / 5</div>\n\
         </div>\n\
         <div class=\"gpa-scale-card\">\n\
         <div class=\"scale-value\">{gpa5}</div>\n\
         <div class=\"scale-label\">5.0 Scale</div>\n\
         <div class=\"scale-formula\">Formula: CGPA / 2</div>\n\
         </div>\n\
         </div>",
        cgpa = number_or_na(data.cgpa),
        gpa4 = number_or_na(data.gpa_4_scale),
        gpa5 = number_or_na(data.gpa_5_scale),
    )
}

pub fn render_attendance_result(result: &Option<AttendanceResponse>) -> String {
    let Some(data) = result else {
        return empty_state("Enter your attendance details to see your status and recommendations");
    };
    let status_class = if data.status.as_deref() == Some("safe") {
        "safe"
    } else {
        "at-risk"
    };
    format!(
        "<div class=\"attendance-result-card {status_class}\">\n\
         <h3>Current Attendance</h3>\n\
         <div class=\"attendance-percentage\">{percent}%</div>\n\
         <div class=\"attendance-info\">{attended} out of {total} classes</div>\n\
         </div>\n\
         <div class=\"recommendation-card {status_class}\">\n\
         <div class=\"recommendation-message\"><strong>{message}</strong></div>\n\
         <div class=\"recommendation-text\">{recommendation}</div>\n\
         </div>",
        percent = data.current_percent.unwrap_or(0.0),
        attended = data.attended.unwrap_or(0),
        total = data.total.unwrap_or(0),
        message = data
            .message
            .as_deref()
            .filter(|m| !m.is_empty())
            .map(escape_html)
            .unwrap_or_else(|| "No message".to_string()),
        recommendation = data
            .recommendation
            .as_deref()
            .filter(|r| !r.is_empty())
            .map(escape_html)
            .unwrap_or_else(|| "No recommendation".to_string()),
    )
}

pub fn render_holidays_panel(panel: &PanelData<Vec<Holiday>>) -> String {
    match panel {
        PanelData::Loading => loading_state("Loading holidays..."),
        PanelData::Failed => empty_state("Error loading holidays. Please try again later."),
        PanelData::Ready(list) if list.is_empty() => empty_state("No holidays found"),
        PanelData::Ready(list) => list
            .iter()
            .map(render_holiday_card)
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn render_holiday_card(holiday: &Holiday) -> String {
    let status = escape_html(holiday.status.as_deref().unwrap_or("upcoming"));
    let kind = holiday.kind.as_deref().unwrap_or("");
    let countdown = holiday
        .countdown
        .as_deref()
        .filter(|c| !c.is_empty())
        .map(|c| {
            format!(
                "\n<div class=\"holiday-countdown {status}\">{}</div>",
                escape_html(c)
            )
        })
        .unwrap_or_default();
    format!(
        "<div class=\"holiday-card {status}\">\n\
         <div class=\"holiday-header\">\
         <div class=\"holiday-date\">{date}</div>\
         <div class=\"holiday-type {kind_class}\">{kind_label}</div></div>\n\
         <div class=\"holiday-name\">{name}</div>\n\
         <div class=\"holiday-description\">{description}</div>{countdown}\n\
         </div>",
        date = format_date(holiday.date.as_deref()),
        kind_class = escape_html(kind),
        kind_label = escape_html(&capitalize(kind)),
        name = escape_html(holiday.name.as_deref().unwrap_or("")),
        description = escape_html(holiday.description.as_deref().unwrap_or("")),
    )
}

pub fn render_cgpa_history(panel: &PanelData<HistoryResponse>) -> String {
    match panel {
        PanelData::Loading => loading_state("Loading CGPA history..."),
        PanelData::Failed => empty_state("No CGPA calculations yet"),
        PanelData::Ready(history) if history.cgpa.is_empty() => {
            empty_state("No CGPA calculations yet")
        }
        PanelData::Ready(history) => history
            .cgpa
            .iter()
            .map(render_cgpa_history_card)
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn render_cgpa_history_card(record: &HistoryRecord) -> String {
    let semesters = record
        .result
        .get("semesters")
        .and_then(|v| v.as_array())
        .map(|a| a.len())
        .unwrap_or(0);
    format!(
        "<div class=\"history-card cgpa\">\n\
         <div class=\"history-date\">{date}</div>\n\
         <div class=\"history-value\">CGPA: {cgpa}</div>\n\
         <div class=\"history-details\">{credits} credits &bull; {semesters} semesters</div>\n\
         </div>",
        date = format_date(record.timestamp.as_deref()),
        cgpa = json_number_or_na(record.result.get("cgpa")),
        credits = json_count(record.result.get("total_credits")),
    )
}

pub fn render_attendance_history(panel: &PanelData<HistoryResponse>) -> String {
    match panel {
        PanelData::Loading => loading_state("Loading attendance history..."),
        PanelData::Failed => empty_state("No attendance records yet"),
        PanelData::Ready(history) if history.attendance.is_empty() => {
            empty_state("No attendance records yet")
        }
        PanelData::Ready(history) => history
            .attendance
            .iter()
            .map(render_attendance_history_card)
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn render_attendance_history_card(record: &HistoryRecord) -> String {
    format!(
        "<div class=\"history-card attendance\">\n\
         <div class=\"history-date\">{date}</div>\n\
         <div class=\"history-value\">{percent}%</div>\n\
         <div class=\"history-details\">{subject} &bull; {attended}/{total} classes</div>\n\
         </div>",
        date = format_date(record.timestamp.as_deref()),
        percent = json_number_or_na(record.result.get("current_percent")),
        subject = json_string_or(record.result.get("subject_name"), "Unknown"),
        attended = json_count(record.result.get("attended")),
        total = json_count(record.result.get("total")),
    )
}

pub fn render_notes(notes: &[Notification]) -> String {
    notes
        .iter()
        .map(|note| {
            let class = match note.kind {
                NoteKind::Success => "flash-success",
                NoteKind::Error => "flash-error",
            };
            format!(
                "<div class=\"flash-message {class}\">\
                 <span>{message}</span>\
                 <form method=\"post\" action=\"/notes/{id}/dismiss\">\
                 <button class=\"flash-close\" type=\"submit\">&times;</button>\
                 </form></div>",
                message = escape_html(&note.message),
                id = note.id,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn empty_state(text: &str) -> String {
    format!("<div class=\"empty-state\"><p>{text}</p></div>")
}

fn loading_state(text: &str) -> String {
    format!("<div class=\"loading-state\"><p>{text}</p></div>")
}

const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Student Hub</title>
  <style>
    :root {
      --bg-1: #f4f6fb;
      --bg-2: #dfe8fa;
      --ink: #26303f;
      --accent: #3f6ae0;
      --accent-2: #2f4858;
      --danger: #c63b2b;
      --ok: #2d7a4b;
      --card: #ffffff;
      --shadow: 0 18px 44px rgba(47, 72, 88, 0.14);
    }

    * { box-sizing: border-box; }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(150deg, var(--bg-1), var(--bg-2));
      color: var(--ink);
      font-family: "Segoe UI", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: start center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(900px, 100%);
      background: var(--card);
      border-radius: 22px;
      box-shadow: var(--shadow);
      padding: 32px;
      display: grid;
      gap: 22px;
    }

    h1 { margin: 0; font-size: 1.9rem; }
    .subtitle { margin: 0; color: #5f6b7c; }

    .tabs { display: flex; gap: 6px; padding: 6px; background: rgba(47, 72, 88, 0.08); border-radius: 999px; }
    .tabs form { flex: 1; display: flex; }
    .tab-btn {
      flex: 1;
      background: transparent;
      border: none;
      border-radius: 999px;
      padding: 10px 14px;
      font-size: 0.95rem;
      font-weight: 600;
      color: #5d6878;
      cursor: pointer;
    }
    .tab-btn.active { background: white; color: var(--accent-2); box-shadow: 0 8px 16px rgba(47, 72, 88, 0.12); }

    .tab-pane { display: none; }
    .tab-pane.active { display: grid; gap: 18px; }

    .semester-item { border: 1px solid rgba(47, 72, 88, 0.12); border-radius: 14px; padding: 14px; display: grid; gap: 10px; }
    .semester-header { display: flex; justify-content: space-between; align-items: center; }
    .semester-title { font-weight: 600; }
    .semester-inputs { display: grid; grid-template-columns: 1fr 1fr; gap: 12px; }
    .semester-inputs label { display: grid; gap: 4px; font-size: 0.85rem; color: #5f6b7c; }

    input[type="number"], input[type="text"] {
      border: 1px solid rgba(47, 72, 88, 0.2);
      border-radius: 10px;
      padding: 9px 11px;
      font-size: 1rem;
    }

    button { cursor: pointer; font-weight: 600; }
    .actions { display: flex; gap: 10px; flex-wrap: wrap; }
    .btn-primary { background: var(--accent); color: white; border: none; border-radius: 10px; padding: 11px 18px; }
    .btn-secondary { background: rgba(47, 72, 88, 0.08); color: var(--accent-2); border: none; border-radius: 10px; padding: 11px 18px; }
    .remove-semester { background: none; border: none; color: var(--danger); font-size: 0.85rem; }

    .empty-state, .loading-state { text-align: center; color: #77808e; padding: 26px 10px; border: 1px dashed rgba(47, 72, 88, 0.18); border-radius: 14px; }

    .cgpa-result-card, .attendance-result-card { text-align: center; border-radius: 16px; padding: 20px; background: rgba(63, 106, 224, 0.08); }
    .cgpa-value, .attendance-percentage { font-size: 2.4rem; font-weight: 700; color: var(--accent); }
    .cgpa-scale, .attendance-info { color: #5f6b7c; }
    .gpa-scales { display: grid; grid-template-columns: 1fr 1fr; gap: 14px; }
    .gpa-scale-card { border: 1px solid rgba(47, 72, 88, 0.12); border-radius: 14px; padding: 14px; text-align: center; }
    .scale-value { font-size: 1.5rem; font-weight: 700; color: var(--accent-2); }
    .scale-formula { font-size: 0.8rem; color: #77808e; }

    .attendance-result-card.safe .attendance-percentage { color: var(--ok); }
    .attendance-result-card.at-risk .attendance-percentage { color: var(--danger); }
    .recommendation-card { border-radius: 14px; padding: 14px; border-left: 5px solid var(--accent); background: rgba(47, 72, 88, 0.05); display: grid; gap: 6px; }
    .recommendation-card.safe { border-left-color: var(--ok); }
    .recommendation-card.at-risk { border-left-color: var(--danger); }

    .attendance-form { display: grid; grid-template-columns: repeat(auto-fit, minmax(160px, 1fr)); gap: 12px; }
    .attendance-form label { display: grid; gap: 4px; font-size: 0.85rem; color: #5f6b7c; }

    .holiday-card { border: 1px solid rgba(47, 72, 88, 0.12); border-radius: 14px; padding: 14px; display: grid; gap: 6px; }
    .holiday-card.past { opacity: 0.6; }
    .holiday-header { display: flex; justify-content: space-between; align-items: center; }
    .holiday-date { font-size: 0.85rem; color: #5f6b7c; }
    .holiday-type { font-size: 0.75rem; text-transform: uppercase; letter-spacing: 0.08em; background: rgba(63, 106, 224, 0.12); color: var(--accent); border-radius: 999px; padding: 3px 10px; }
    .holiday-name { font-weight: 700; }
    .holiday-countdown { font-size: 0.85rem; color: var(--accent); }

    .history-columns { display: grid; grid-template-columns: 1fr 1fr; gap: 18px; }
    .history-card { border: 1px solid rgba(47, 72, 88, 0.12); border-radius: 14px; padding: 12px; display: grid; gap: 4px; margin-bottom: 10px; }
    .history-date { font-size: 0.8rem; color: #77808e; }
    .history-value { font-weight: 700; color: var(--accent-2); }
    .history-details { font-size: 0.85rem; color: #5f6b7c; }

    #flashMessages { position: fixed; top: 18px; right: 18px; display: grid; gap: 8px; z-index: 10; }
    .flash-message { display: flex; align-items: center; gap: 10px; border-radius: 12px; padding: 10px 14px; color: white; box-shadow: var(--shadow); }
    .flash-success { background: var(--ok); }
    .flash-error { background: var(--danger); }
    .flash-close { background: none; border: none; color: inherit; font-size: 1.1rem; }

    @media (max-width: 640px) {
      .gpa-scales, .history-columns, .semester-inputs { grid-template-columns: 1fr; }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Student Hub</h1>
      <p class="subtitle">CGPA calculator, attendance tracker, holidays and history.</p>
    </header>

    <nav class="tabs">
      <form method="post" action="/tabs/cgpa"><button class="tab-btn{{TAB_CGPA}}" data-tab="cgpa" type="submit">CGPA</button></form>
      <form method="post" action="/tabs/attendance"><button class="tab-btn{{TAB_ATTENDANCE}}" data-tab="attendance" type="submit">Attendance</button></form>
      <form method="post" action="/tabs/holidays"><button class="tab-btn{{TAB_HOLIDAYS}}" data-tab="holidays" type="submit">Holidays</button></form>
      <form method="post" action="/tabs/history"><button class="tab-btn{{TAB_HISTORY}}" data-tab="history" type="submit">History</button></form>
    </nav>

    <section id="cgpa" class="tab-pane{{TAB_CGPA}}">
      <form method="post" action="/cgpa/calculate">
        <div id="semesterContainer">
{{SEMESTER_ROWS}}
        </div>
        <div class="actions">
          <button class="btn-secondary" type="submit" formaction="/cgpa/rows/add">Add Semester</button>
          <button class="btn-primary" type="submit">Calculate CGPA</button>
          <button class="btn-secondary" type="submit" formaction="/cgpa/reset">Reset</button>
        </div>
      </form>
      <div id="cgpaResults">
{{CGPA_RESULTS}}
      </div>
    </section>

    <section id="attendance" class="tab-pane{{TAB_ATTENDANCE}}">
      <form method="post" action="/attendance/calculate">
        <div class="attendance-form">
          <label>Subject Name <input type="text" name="subject_name" value="{{SUBJECT}}" placeholder="e.g., Mathematics"></label>
          <label>Classes Attended <input type="number" min="0" name="attended" value="{{ATTENDED}}"></label>
          <label>Total Classes <input type="number" min="0" name="total" value="{{TOTAL}}"></label>
          <label>Minimum Required % <input type="number" min="0" max="100" name="min_required" value="{{MIN_REQUIRED}}"></label>
        </div>
        <div class="actions">
          <button class="btn-primary" type="submit">Calculate Attendance</button>
          <button class="btn-secondary" type="submit" formaction="/attendance/save">Save Record</button>
          <button class="btn-secondary" type="submit" formaction="/attendance/reset">Reset</button>
        </div>
      </form>
      <div id="attendanceResults">
{{ATTENDANCE_RESULTS}}
      </div>
    </section>

    <section id="holidays" class="tab-pane{{TAB_HOLIDAYS}}">
      <div id="holidaysContainer">
{{HOLIDAYS}}
      </div>
    </section>

    <section id="history" class="tab-pane{{TAB_HISTORY}}">
      <div class="history-columns">
        <div>
          <h3>CGPA History</h3>
          <div id="cgpaHistory">
{{CGPA_HISTORY}}
          </div>
        </div>
        <div>
          <h3>Attendance History</h3>
          <div id="attendanceHistory">
{{ATTENDANCE_HISTORY}}
          </div>
        </div>
      </div>
    </section>
  </main>

  <div id="flashMessages">
{{NOTES}}
  </div>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HistoryRecord;
    use serde_json::json;

    fn holiday(name: &str) -> Holiday {
        Holiday {
            date: Some("2025-01-26".to_string()),
            kind: Some("national".to_string()),
            name: Some(name.to_string()),
            description: Some("desc".to_string()),
            status: None,
            countdown: Some("In 3 days".to_string()),
        }
    }

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(
            escape_html("<img src=x onerror=\"a&b\">"),
            "&lt;img src=x onerror=&quot;a&amp;b&quot;&gt;"
        );
    }

    #[test]
    fn holiday_card_escapes_server_text_and_capitalizes_type() {
        let mut h = holiday("<b>Onam</b>");
        h.status = Some("upcoming".to_string());
        let html = render_holiday_card(&h);
        assert!(html.contains("&lt;b&gt;Onam&lt;/b&gt;"));
        assert!(html.contains(">National<"));
        assert!(html.contains("holiday-card upcoming"));
        assert!(html.contains("In 3 days"));
    }

    #[test]
    fn holiday_status_defaults_to_upcoming() {
        let html = render_holiday_card(&holiday("Republic Day"));
        assert!(html.contains("holiday-card upcoming"));
    }

    #[test]
    fn holidays_panel_states() {
        assert!(render_holidays_panel(&PanelData::Loading).contains("Loading holidays"));
        assert!(render_holidays_panel(&PanelData::Failed).contains("Error loading holidays"));
        assert!(render_holidays_panel(&PanelData::Ready(Vec::new())).contains("No holidays found"));
    }

    #[test]
    fn cgpa_result_falls_back_to_na_for_missing_and_zero() {
        let html = render_cgpa_result(&Some(CgpaResponse {
            cgpa: Some(8.37),
            gpa_4_scale: Some(0.0),
            gpa_5_scale: None,
            error: None,
        }));
        assert!(html.contains(">8.37<"));
        assert_eq!(html.matches("N/A").count(), 2);
    }

    #[test]
    fn attendance_status_picks_css_class() {
        let safe = render_attendance_result(&Some(AttendanceResponse {
            current_percent: Some(82.5),
            attended: Some(33),
            total: Some(40),
            status: Some("safe".to_string()),
            message: None,
            recommendation: None,
            error: None,
        }));
        assert!(safe.contains("attendance-result-card safe"));
        assert!(safe.contains("82.5%"));
        assert!(safe.contains("No message"));
        assert!(safe.contains("No recommendation"));

        let risky = render_attendance_result(&Some(AttendanceResponse {
            status: Some("at_risk".to_string()),
            ..Default::default()
        }));
        assert!(risky.contains("attendance-result-card at-risk"));
    }

    #[test]
    fn cgpa_history_card_reads_opaque_result_fields() {
        let record = HistoryRecord {
            timestamp: Some("2025-01-26T10:00:00".to_string()),
            result: json!({"cgpa": 8.1, "total_credits": 43, "semesters": [{}, {}]}),
        };
        let html = render_cgpa_history_card(&record);
        assert!(html.contains("CGPA: 8.1"));
        assert!(html.contains("43 credits"));
        assert!(html.contains("2 semesters"));
        assert!(html.contains("Sun, 26 Jan 2025"));
    }

    #[test]
    fn attendance_history_card_uses_fallbacks() {
        let record = HistoryRecord {
            timestamp: None,
            result: json!({}),
        };
        let html = render_attendance_history_card(&record);
        assert!(html.contains("N/A%"));
        assert!(html.contains("Unknown"));
        assert!(html.contains("0/0 classes"));
        assert!(html.contains("Invalid Date"));
    }

    fn row(id: u64, ordinal: u32) -> SemesterRow {
        SemesterRow {
            id,
            ordinal,
            sgpa_input: String::new(),
            credits_input: String::new(),
        }
    }

    #[test]
    fn remove_control_renders_only_when_removable() {
        let rows = vec![row(1, 1)];
        assert!(!render_semester_rows(&rows, false).contains("remove-semester"));

        let two = vec![row(1, 1), row(2, 2)];
        let html = render_semester_rows(&two, true);
        assert!(html.contains("/cgpa/rows/1/remove"));
        assert!(html.contains("/cgpa/rows/2/remove"));
    }

    #[test]
    fn row_fields_key_on_id_even_when_labels_collide() {
        // Two rows can end up sharing the "Semester 2" label after a
        // removal; their inputs must still post under distinct names.
        let rows = vec![row(2, 2), row(3, 2)];
        let html = render_semester_rows(&rows, true);
        assert_eq!(html.matches("Semester 2").count(), 2);
        assert!(html.contains("name=\"sgpa-2\""));
        assert!(html.contains("name=\"sgpa-3\""));
        assert!(html.contains("/cgpa/rows/3/remove"));
    }

    #[test]
    fn page_marks_exactly_one_tab_active() {
        let mut view = ViewState::new();
        view.activate(Tab::Holidays);
        let html = render_page(&view);
        assert_eq!(html.matches("tab-btn active").count(), 1);
        assert!(html.contains("<section id=\"holidays\" class=\"tab-pane active\""));
    }
}
