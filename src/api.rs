use crate::errors::ApiError;
use crate::models::{
    AttendanceRequest, AttendanceResponse, CgpaRequest, CgpaResponse, HistoryResponse, Holiday,
};
use reqwest::Client;

/// Thin gateway to the calculation backend. One method per endpoint; no
/// retries, no caching, no request cancellation.
#[derive(Clone)]
pub struct BackendClient {
    base_url: String,
    http: Client,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            http: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn calculate_cgpa(&self, request: &CgpaRequest) -> Result<CgpaResponse, ApiError> {
        let response = self
            .http
            .post(self.url("/api/calculate_cgpa"))
            .json(request)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        let body: CgpaResponse = response.json().await?;
        if let Some(message) = &body.error {
            return Err(ApiError::Backend(message.clone()));
        }
        Ok(body)
    }

    pub async fn calculate_attendance(
        &self,
        request: &AttendanceRequest,
    ) -> Result<AttendanceResponse, ApiError> {
        let response = self
            .http
            .post(self.url("/api/calculate_attendance"))
            .json(request)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        let body: AttendanceResponse = response.json().await?;
        if let Some(message) = &body.error {
            return Err(ApiError::Backend(message.clone()));
        }
        Ok(body)
    }

    pub async fn holidays(&self) -> Result<Vec<Holiday>, ApiError> {
        let response = self.http.get(self.url("/api/holidays")).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        Ok(response.json().await?)
    }

    pub async fn history(&self) -> Result<HistoryResponse, ApiError> {
        let response = self.http.get(self.url("/api/history")).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        Ok(response.json().await?)
    }
}
