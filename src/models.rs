use serde::{Deserialize, Serialize};

/// One semester as submitted to the backend. Rows only make it into a
/// request when both fields are positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterEntry {
    pub sgpa: f64,
    pub credits: f64,
}

#[derive(Debug, Serialize)]
pub struct CgpaRequest {
    pub semesters: Vec<SemesterEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CgpaResponse {
    pub cgpa: Option<f64>,
    pub gpa_4_scale: Option<f64>,
    pub gpa_5_scale: Option<f64>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AttendanceRequest {
    pub subject_name: String,
    pub attended: u32,
    pub total: u32,
    pub min_required: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttendanceResponse {
    pub current_percent: Option<f64>,
    pub attended: Option<u32>,
    pub total: Option<u32>,
    pub status: Option<String>,
    pub message: Option<String>,
    pub recommendation: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Holiday {
    pub date: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub countdown: Option<String>,
}

/// A saved calculation as the backend returns it. The result payload is
/// opaque; renderers pick out the handful of fields they show.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryRecord {
    pub timestamp: Option<String>,
    #[serde(default)]
    pub result: serde_json::Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub cgpa: Vec<HistoryRecord>,
    #[serde(default)]
    pub attendance: Vec<HistoryRecord>,
}
