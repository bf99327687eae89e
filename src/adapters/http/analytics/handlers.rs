//! HTTP handlers for analytics endpoints.

use std::sync::Arc;

use axum::extract::{Json, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::application::handlers::{
    ExportCsvError, ExportQuestionCsvHandler, ExportQuestionCsvQuery, ProbeError,
    RunAnalyticsHandler, RunAnalyticsQuery, SchemaProber,
};
use crate::domain::analytics::{BatchReport, BatchRunner};
use crate::ports::TableSource;

use crate::adapters::http::dto::ErrorResponse;

// ════════════════════════════════════════════════════════════════════════════════
// Error Type
// ════════════════════════════════════════════════════════════════════════════════

/// Analytics API error that implements IntoResponse.
#[derive(Debug)]
pub enum AnalyticsApiError {
    NotFound(String),
    StoreUnavailable(String),
    Internal(String),
}

impl IntoResponse for AnalyticsApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AnalyticsApiError::NotFound(ordinal) => {
                (StatusCode::NOT_FOUND, ErrorResponse::not_found("Question", &ordinal))
            }
            AnalyticsApiError::StoreUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorResponse::service_unavailable(msg),
            ),
            AnalyticsApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::internal(msg))
            }
        };
        (status, Json(error)).into_response()
    }
}

impl From<ProbeError> for AnalyticsApiError {
    fn from(error: ProbeError) -> Self {
        AnalyticsApiError::StoreUnavailable(error.to_string())
    }
}

impl From<ExportCsvError> for AnalyticsApiError {
    fn from(error: ExportCsvError) -> Self {
        match error {
            ExportCsvError::UnknownQuestion(ordinal) => {
                AnalyticsApiError::NotFound(ordinal.to_string())
            }
            ExportCsvError::Probe(err) => err.into(),
            ExportCsvError::Export(err) => AnalyticsApiError::Internal(err.to_string()),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for analytics endpoints.
#[derive(Clone)]
pub struct AnalyticsAppState {
    pub table_source: Arc<dyn TableSource>,
    pub runner: Arc<BatchRunner>,
    pub row_cap: usize,
    pub probe_concurrency: usize,
}

impl AnalyticsAppState {
    fn prober(&self) -> SchemaProber {
        SchemaProber::new(self.table_source.clone())
            .with_row_cap(self.row_cap)
            .with_concurrency(self.probe_concurrency)
    }

    pub fn run_analytics_handler(&self) -> RunAnalyticsHandler {
        RunAnalyticsHandler::new(self.prober(), self.runner.clone())
    }

    pub fn export_csv_handler(&self) -> ExportQuestionCsvHandler {
        ExportQuestionCsvHandler::new(self.prober(), self.runner.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Parameters
// ════════════════════════════════════════════════════════════════════════════════

/// Optional reference date, `?as_of=2024-06-01`.
#[derive(Debug, Default, Deserialize)]
pub struct AsOfParams {
    pub as_of: Option<NaiveDate>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/analytics
///
/// Runs every question and returns the ordered report.
pub async fn run_analytics(
    State(state): State<AnalyticsAppState>,
    Query(params): Query<AsOfParams>,
) -> Result<Json<BatchReport>, AnalyticsApiError> {
    let report = state
        .run_analytics_handler()
        .handle(RunAnalyticsQuery { as_of: params.as_of })
        .await?;
    Ok(Json(report))
}

/// GET /api/analytics/:ordinal/csv
pub async fn export_question_csv(
    State(state): State<AnalyticsAppState>,
    Path(ordinal): Path<String>,
    Query(params): Query<AsOfParams>,
) -> Result<Response, AnalyticsApiError> {
    let ordinal: u8 = ordinal
        .parse()
        .map_err(|_| AnalyticsApiError::NotFound(ordinal.clone()))?;

    let export = state
        .export_csv_handler()
        .handle(ExportQuestionCsvQuery { ordinal, as_of: params.as_of })
        .await?;

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", export.file_name),
        ),
    ];
    Ok((headers, export.body).into_response())
}
