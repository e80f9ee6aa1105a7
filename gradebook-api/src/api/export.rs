//! CSV export endpoint

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use gradebook_common::export::{export_file_name, to_csv_bytes};
use tracing::info;

use super::ApiError;
use crate::AppState;

/// GET /exportar_csv
///
/// Downloads the compiled view as a semicolon separated, BOM-prefixed CSV.
pub async fn export_csv(State(state): State<AppState>) -> Result<Response, ApiError> {
    let courses = state.gradebook.compiled_view()?;
    let file_name = export_file_name(Utc::now());
    info!("Exporting {} courses as {}", courses.len(), file_name);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        to_csv_bytes(&courses),
    )
        .into_response())
}
