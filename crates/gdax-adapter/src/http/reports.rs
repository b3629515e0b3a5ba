/*
[INPUT]:  Report parameters and job identifiers
[OUTPUT]: Report generation jobs and their status
[POS]:    HTTP layer - report endpoints (signed)
[UPDATE]: When adding new report kinds or status fields
*/

use reqwest::Method;
use uuid::Uuid;

use crate::http::{GdaxClient, Result};
use crate::types::{Report, ReportRequest};

impl GdaxClient {
    /// Start generating a report
    ///
    /// POST /reports
    pub async fn create_report(&self, request: &ReportRequest) -> Result<Report> {
        let body = serde_json::to_string(request)?;
        self.request(Method::POST, "/reports", &body).await
    }

    /// Poll the status of a report job
    ///
    /// GET /reports/{report_id}
    pub async fn get_report_status(&self, report_id: Uuid) -> Result<Report> {
        self.request(Method::GET, &format!("/reports/{report_id}"), "")
            .await
    }
}
