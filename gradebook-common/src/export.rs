//! CSV export of the compiled view
//!
//! Semicolon separated, UTF-8 with byte-order mark so spreadsheet tools
//! pick the right encoding.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::grades::GradeField;
use crate::reconcile::CompiledCourseView;

/// UTF-8 byte-order mark
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub const CSV_DELIMITER: &str = ";";

pub const CSV_COLUMNS: [&str; 9] = [
    "Semester", "Code", "Name", "Term1", "Term2", "Term3", "Makeup", "Average", "Status",
];

/// Render the header plus one row per course, without BOM
pub fn to_csv(courses: &[CompiledCourseView]) -> String {
    let mut out = CSV_COLUMNS.join(CSV_DELIMITER);
    out.push('\n');

    for course in courses {
        let grades = course.grades();
        let mut cells = vec![
            course
                .course()
                .semester()
                .map(value_cell)
                .unwrap_or_default(),
            csv_escape(course.code()),
            csv_escape(course.course().name().unwrap_or_default()),
        ];
        cells.extend(GradeField::ALL.iter().map(|&f| format_number(grades.get(f))));
        cells.push(format_number(course.average()));
        cells.push(course.status().as_str().to_string());

        out.push_str(&cells.join(CSV_DELIMITER));
        out.push('\n');
    }
    out
}

/// BOM followed by [`to_csv`]
pub fn to_csv_bytes(courses: &[CompiledCourseView]) -> Vec<u8> {
    let csv = to_csv(courses);
    let mut bytes = Vec::with_capacity(UTF8_BOM.len() + csv.len());
    bytes.extend_from_slice(UTF8_BOM);
    bytes.extend_from_slice(csv.as_bytes());
    bytes
}

/// Download name, e.g. `Boletim_BSI_1730000000.csv`
pub fn export_file_name(now: DateTime<Utc>) -> String {
    format!("Boletim_BSI_{}.csv", now.timestamp())
}

/// Integral values keep one decimal (`7.0`), others print as-is (`5.33`)
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

fn value_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => csv_escape(s),
        Value::Number(n) => n.to_string(),
        other => csv_escape(&other.to_string()),
    }
}

fn csv_escape(value: &str) -> String {
    let safe = neutralize_formula(value);
    if safe.contains(CSV_DELIMITER)
        || safe.contains('"')
        || safe.contains('\n')
        || safe.contains('\r')
    {
        format!("\"{}\"", safe.replace('"', "\"\""))
    } else {
        safe
    }
}

/// Prefix text cells that a spreadsheet would evaluate as a formula
fn neutralize_formula(value: &str) -> String {
    let starts_with_trigger = matches!(
        value.trim_start().chars().next(),
        Some('=') | Some('+') | Some('-') | Some('@')
    );
    if starts_with_trigger && value.trim().parse::<f64>().is_err() {
        format!("'{}", value)
    } else {
        value.to_string()
    }
}
