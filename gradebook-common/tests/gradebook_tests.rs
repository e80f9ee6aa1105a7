//! End-to-end behavior over JSON files on disk

use gradebook_common::{Error, Gradebook, Status};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Fixture {
    _dir: TempDir,
    curriculum: PathBuf,
    grades: PathBuf,
}

impl Fixture {
    fn new(curriculum: Value, grades: Option<&str>) -> Self {
        let dir = TempDir::new().unwrap();
        let curriculum_path = dir.path().join("disciplinas.json");
        let grades_path = dir.path().join("notas.json");
        std::fs::write(&curriculum_path, curriculum.to_string()).unwrap();
        if let Some(grades) = grades {
            std::fs::write(&grades_path, grades).unwrap();
        }
        Self {
            _dir: dir,
            curriculum: curriculum_path,
            grades: grades_path,
        }
    }

    fn gradebook(&self) -> Gradebook {
        Gradebook::from_paths(&self.curriculum, &self.grades)
    }
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

fn calc_i() -> Value {
    json!([{"codigo": "BSI101", "nome": "Calc I", "semestre": 1}])
}

#[test]
fn test_empty_grade_store_compiles_pending_course() {
    let fixture = Fixture::new(calc_i(), None);

    let compiled = fixture.gradebook().compiled_view().unwrap();
    assert_eq!(compiled.len(), 1);

    let course = serde_json::to_value(&compiled[0]).unwrap();
    assert_eq!(
        course,
        json!({
            "codigo": "BSI101", "nome": "Calc I", "semestre": 1,
            "n1": 0.0, "n2": 0.0, "n3": 0.0, "rec": 0.0,
            "media": 0.0, "status": "PENDING"
        })
    );
}

#[test]
fn test_complete_below_passing_is_failed() {
    let fixture = Fixture::new(calc_i(), Some(r#"{"BSI101": [5, 6, 4, 0]}"#));

    let compiled = fixture.gradebook().compiled_view().unwrap();
    assert_eq!(compiled[0].average(), 5.0);
    assert_eq!(compiled[0].status(), Status::Failed);
}

#[test]
fn test_partial_below_passing_is_in_progress() {
    let fixture = Fixture::new(calc_i(), Some(r#"{"BSI101": [5, 6, 0, 0]}"#));

    let compiled = fixture.gradebook().compiled_view().unwrap();
    assert_eq!(compiled[0].average(), 3.67);
    assert_eq!(compiled[0].status(), Status::InProgress);
}

#[test]
fn test_missing_curriculum_is_empty_view() {
    let dir = TempDir::new().unwrap();
    let gradebook = Gradebook::from_paths(dir.path().join("nope.json"), dir.path().join("notas.json"));
    assert!(gradebook.compiled_view().unwrap().is_empty());
}

#[test]
fn test_corrupt_grade_store_reads_as_zero() {
    let fixture = Fixture::new(calc_i(), Some("{ this is not json"));

    let compiled = fixture.gradebook().compiled_view().unwrap();
    assert_eq!(compiled[0].status(), Status::Pending);
}

#[test]
fn test_update_round_trip_changes_only_target_field() {
    let fixture = Fixture::new(calc_i(), Some(r#"{"BSI101": [4, 5, 6, 0]}"#));
    let gradebook = fixture.gradebook();

    let updated = gradebook.update("BSI101", "rec", &json!("7")).unwrap();
    assert_eq!(updated.average(), 6.0);
    assert_eq!(updated.status(), Status::Approved);

    let reloaded = gradebook.compiled_view().unwrap();
    assert_eq!(reloaded[0].grades().as_array(), [4.0, 5.0, 6.0, 7.0]);
    assert_eq!(read_json(&fixture.grades), json!({"BSI101": [4.0, 5.0, 6.0, 7.0]}));
}

#[test]
fn test_update_rewrites_whole_store_keeping_orphans() {
    let fixture = Fixture::new(
        calc_i(),
        Some(r#"{"ZZZ900": [9, 9, 9, 0], "BSI101": [1, 2, 3, 0]}"#),
    );

    fixture.gradebook().update("BSI101", "n1", &json!(8)).unwrap();

    let written = std::fs::read_to_string(&fixture.grades).unwrap();
    assert!(written.contains("\n  \"ZZZ900\": [\n    9,"));
    assert_eq!(
        read_json(&fixture.grades),
        json!({"ZZZ900": [9, 9, 9, 0], "BSI101": [8.0, 2.0, 3.0, 0.0]})
    );
}

#[test]
fn test_update_unknown_course_leaves_file_byte_identical() {
    let original = "{\"BSI101\":[5,6,4,0]}";
    let fixture = Fixture::new(calc_i(), Some(original));

    let err = fixture.gradebook().update("NOPE01", "n1", &json!(10)).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    assert_eq!(std::fs::read_to_string(&fixture.grades).unwrap(), original);
}

#[test]
fn test_update_invalid_value_leaves_file_byte_identical() {
    let original = "{\"BSI101\":[5,6,4,0]}";
    let fixture = Fixture::new(calc_i(), Some(original));

    let err = fixture.gradebook().update("BSI101", "n1", &json!("seis")).unwrap_err();
    assert!(matches!(err, Error::InvalidValue(_)));
    assert_eq!(std::fs::read_to_string(&fixture.grades).unwrap(), original);
}

#[test]
fn test_update_creates_grade_store_when_missing() {
    let fixture = Fixture::new(calc_i(), None);
    assert!(!fixture.grades.exists());

    fixture.gradebook().update("BSI101", "n2", &Value::Null).unwrap();
    assert_eq!(read_json(&fixture.grades), json!({"BSI101": [0.0, 0.0, 0.0, 0.0]}));
}
