//! Merge of curriculum entries with stored grade records
//!
//! The compiled view is rebuilt on every read and never persisted.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::curriculum::CourseDefinition;
use crate::grades::{GradeField, GradeSummary, GradeTuple, Status};
use crate::store::GradeMap;

/// One curriculum course with its normalized grades, average and status
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledCourseView {
    course: CourseDefinition,
    grades: GradeTuple,
    summary: GradeSummary,
}

impl CompiledCourseView {
    pub fn new(course: CourseDefinition, grades: GradeTuple) -> Self {
        let summary = grades.summary();
        Self {
            course,
            grades,
            summary,
        }
    }

    pub fn code(&self) -> &str {
        self.course.code()
    }

    pub fn course(&self) -> &CourseDefinition {
        &self.course
    }

    pub fn grades(&self) -> GradeTuple {
        self.grades
    }

    pub fn average(&self) -> f64 {
        self.summary.average
    }

    pub fn status(&self) -> Status {
        self.summary.status
    }

    /// Replace one grade and recompute average and status
    pub fn set_grade(&mut self, field: GradeField, value: f64) {
        self.grades.set(field, value);
        self.summary = self.grades.summary();
    }

    /// Curriculum fields followed by `n1`, `n2`, `n3`, `rec`, `media`, `status`
    ///
    /// Derived keys overwrite curriculum fields with the same name.
    pub fn to_json_map(&self) -> Map<String, Value> {
        let mut map = self.course.fields().clone();
        for field in GradeField::ALL {
            map.insert(field.wire_name().to_string(), Value::from(self.grades.get(field)));
        }
        map.insert("media".to_string(), Value::from(self.summary.average));
        map.insert(
            "status".to_string(),
            Value::from(self.summary.status.as_str()),
        );
        map
    }
}

impl Serialize for CompiledCourseView {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json_map().serialize(serializer)
    }
}

/// Left join of the curriculum with the grade map, in curriculum order
///
/// Courses without a grade record get zero grades; records for codes not
/// in the curriculum are ignored.
pub fn compile(curriculum: &[CourseDefinition], grades: &GradeMap) -> Vec<CompiledCourseView> {
    curriculum
        .iter()
        .map(|course| {
            let tuple = GradeTuple::normalize(grades.get(course.code()));
            CompiledCourseView::new(course.clone(), tuple)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn grade_map(value: Value) -> GradeMap {
        match value {
            Value::Object(map) => map,
            _ => panic!("grade map must be an object"),
        }
    }

    #[test]
    fn test_course_without_grades_is_pending() {
        let curriculum = vec![CourseDefinition::new("BSI101", "Calc I", 1)];
        let compiled = compile(&curriculum, &GradeMap::new());

        assert_eq!(compiled.len(), 1);
        let json = serde_json::to_value(&compiled[0]).unwrap();
        assert_eq!(json["codigo"], "BSI101");
        assert_eq!(json["nome"], "Calc I");
        assert_eq!(json["semestre"], 1);
        assert_eq!(json["n1"], 0.0);
        assert_eq!(json["n2"], 0.0);
        assert_eq!(json["n3"], 0.0);
        assert_eq!(json["rec"], 0.0);
        assert_eq!(json["media"], 0.0);
        assert_eq!(json["status"], "PENDING");
    }

    #[test]
    fn test_compile_follows_curriculum_order_and_ignores_orphans() {
        let curriculum = vec![
            CourseDefinition::new("BSI201", "Redes", 2),
            CourseDefinition::new("BSI101", "Calc I", 1),
        ];
        let grades = grade_map(json!({
            "BSI101": [5, 6, 4, 0],
            "OLD999": [10, 10, 10, 0]
        }));

        let compiled = compile(&curriculum, &grades);
        let codes: Vec<&str> = compiled.iter().map(|c| c.code()).collect();
        assert_eq!(codes, vec!["BSI201", "BSI101"]);
        assert_eq!(compiled[1].average(), 5.0);
        assert_eq!(compiled[1].status(), Status::Failed);
    }

    #[test]
    fn test_malformed_record_compiles_to_zero() {
        let curriculum = vec![CourseDefinition::new("BSI101", "Calc I", 1)];
        let grades = grade_map(json!({"BSI101": "dez"}));

        let compiled = compile(&curriculum, &grades);
        assert_eq!(compiled[0].grades(), GradeTuple::ZERO);
        assert_eq!(compiled[0].status(), Status::Pending);
    }

    #[test]
    fn test_makeup_keeps_stored_terms() {
        let curriculum = vec![CourseDefinition::new("BSI101", "Calc I", 1)];
        let grades = grade_map(json!({"BSI101": [4, 5, 6, 7]}));

        let compiled = compile(&curriculum, &grades);
        let json = serde_json::to_value(&compiled[0]).unwrap();
        assert_eq!(json["n1"], 4.0);
        assert_eq!(json["rec"], 7.0);
        assert_eq!(json["media"], 6.0);
        assert_eq!(json["status"], "APPROVED");
    }

    #[test]
    fn test_set_grade_recomputes_status() {
        let mut view = CompiledCourseView::new(
            CourseDefinition::new("BSI101", "Calc I", 1),
            GradeTuple::new(5.0, 6.0, 0.0, 0.0),
        );
        assert_eq!(view.status(), Status::InProgress);

        view.set_grade(GradeField::Term3, 8.0);
        assert_eq!(view.average(), 6.33);
        assert_eq!(view.status(), Status::Approved);
    }

    #[test]
    fn test_serialized_keys_follow_curriculum_then_grades() {
        let course = CourseDefinition::from_fields(
            grade_map(json!({"codigo": "BSI101", "semestre": 1, "status": "legacy"})),
        )
        .unwrap();
        let view = CompiledCourseView::new(course, GradeTuple::ZERO);

        let map = view.to_json_map();
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["codigo", "semestre", "status", "n1", "n2", "n3", "rec", "media"]);
        assert_eq!(map["status"], "PENDING");
    }
}
