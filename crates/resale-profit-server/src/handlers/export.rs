use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query,
    },
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Local;
use serde::Deserialize;

use resale_profit_core::export::{self, ExportFormat};
use resale_profit_core::scenarios::expander;

use super::ScenarioRequest;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub format: ExportFormat,
}

/// Expand the scenarios and return them as a file download. The workbook is
/// built in memory and dropped once the response is written.
pub async fn export_scenarios(
    query: Result<Query<ExportQuery>, QueryRejection>,
    body: Result<Json<ScenarioRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Query(query) = query?;
    let Json(req) = body?;
    let rows = expander::expand(&req.base, &req.toggles)?.result.results;

    let generated_at = Local::now().naive_local();
    let bytes = export::export_at(&rows, query.format, generated_at)?;
    let file_name = export::export_file_name(query.format, generated_at);

    tracing::info!(
        format = %query.format,
        rows = rows.len(),
        bytes = bytes.len(),
        file = %file_name,
        "scenario export"
    );

    let headers = [
        (header::CONTENT_TYPE, query.format.content_type().to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{file_name}\""),
        ),
    ];
    Ok((headers, bytes).into_response())
}
