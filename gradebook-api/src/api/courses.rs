//! Compiled course view and grade updates
//!
//! GET /api/dados returns every curriculum course with its grades, average
//! and status. POST /api/atualizar changes one grade of one course.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use gradebook_common::CompiledCourseView;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ApiError;
use crate::AppState;

/// Body of POST /api/atualizar
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    /// Course code (`codigo`)
    #[serde(default)]
    pub code: String,

    /// `n1`, `n2`, `n3`, `rec` (or `term1`, `term2`, `term3`, `makeup`)
    #[serde(default)]
    pub field: String,

    /// Number, numeric string (decimal comma allowed), empty string or null
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub success: bool,
    pub data: CompiledCourseView,
}

/// GET /api/dados
pub async fn get_courses(
    State(state): State<AppState>,
) -> Result<Json<Vec<CompiledCourseView>>, ApiError> {
    Ok(Json(state.gradebook.compiled_view()?))
}

/// POST /api/atualizar
///
/// 404 for an unknown course, 400 for a value or field that cannot be used.
/// The grade store is only written on success.
pub async fn update_course(
    State(state): State<AppState>,
    payload: Result<Json<UpdateRequest>, JsonRejection>,
) -> Result<Json<UpdateResponse>, ApiError> {
    let Json(request) = payload?;
    let data = state
        .gradebook
        .update(&request.code, &request.field, &request.value)?;

    Ok(Json(UpdateResponse {
        success: true,
        data,
    }))
}
