//! Read and update operations over the two stores

use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::grades::GradeField;
use crate::reconcile::{compile, CompiledCourseView};
use crate::store::{CurriculumSource, GradeStore, JsonCurriculumFile, JsonGradeFile};
use crate::{Error, Result};

/// Curriculum plus grade store, compiled on demand
///
/// Nothing is cached: every call reloads both stores.
#[derive(Clone)]
pub struct Gradebook {
    curriculum: Arc<dyn CurriculumSource>,
    grades: Arc<dyn GradeStore>,
}

impl Gradebook {
    pub fn new(curriculum: Arc<dyn CurriculumSource>, grades: Arc<dyn GradeStore>) -> Self {
        Self { curriculum, grades }
    }

    /// JSON file backends at the given paths
    pub fn from_paths(curriculum_path: impl Into<PathBuf>, grades_path: impl Into<PathBuf>) -> Self {
        Self::new(
            Arc::new(JsonCurriculumFile::new(curriculum_path)),
            Arc::new(JsonGradeFile::new(grades_path)),
        )
    }

    /// Every curriculum course with grades, average and status
    pub fn compiled_view(&self) -> Result<Vec<CompiledCourseView>> {
        let curriculum = self.curriculum.load()?;
        let grades = self.grades.load()?;
        Ok(compile(&curriculum, &grades))
    }

    /// Set one grade of one course and persist the whole grade store
    ///
    /// `field` accepts `n1|n2|n3|rec` or `term1|term2|term3|makeup`.
    /// Nothing is written unless the course exists and both `field` and
    /// `raw_value` are valid.
    pub fn update(&self, code: &str, field: &str, raw_value: &Value) -> Result<CompiledCourseView> {
        let curriculum = self.curriculum.load()?;
        let mut grades = self.grades.load()?;

        let mut view = compile(&curriculum, &grades)
            .into_iter()
            .find(|view| view.code() == code)
            .ok_or_else(|| Error::NotFound(code.to_string()))?;

        let value = coerce_grade_input(raw_value)?;
        let field: GradeField = field.parse()?;

        view.set_grade(field, value);
        grades.insert(code.to_string(), view.grades().to_json());
        self.grades.save(&grades)?;

        info!(
            "Updated {} {} = {} (media {}, {})",
            code,
            field,
            value,
            view.average(),
            view.status()
        );
        Ok(view)
    }
}

/// Convert a user-entered grade to a number
///
/// `null` and blank strings mean `0.0`. Strings may use a decimal comma.
/// Anything else that is not a finite number is rejected.
pub fn coerce_grade_input(raw: &Value) -> Result<f64> {
    let value = match raw {
        Value::Null => return Ok(0.0),
        Value::Number(n) => n.as_f64(),
        Value::String(s) if s.trim().is_empty() => return Ok(0.0),
        Value::String(s) => s.replace(',', ".").trim().parse::<f64>().ok(),
        _ => None,
    };

    value
        .filter(|v| v.is_finite())
        .ok_or_else(|| Error::InvalidValue(raw.to_string()))
}
