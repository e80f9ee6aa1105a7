//! Curriculum entries
//!
//! The curriculum store is a JSON array of objects. Only `codigo` is
//! required; every other field passes through to the compiled view.

use serde_json::{Map, Value};
use tracing::warn;

/// Key holding the course code in curriculum entries
pub const CODE_KEY: &str = "codigo";
/// Key holding the course display name
pub const NAME_KEY: &str = "nome";
/// Key holding the semester label
pub const SEMESTER_KEY: &str = "semestre";

/// One immutable curriculum entry
#[derive(Debug, Clone, PartialEq)]
pub struct CourseDefinition {
    code: String,
    fields: Map<String, Value>,
}

impl CourseDefinition {
    /// Build from a curriculum object; `None` without a string `codigo`
    pub fn from_fields(fields: Map<String, Value>) -> Option<Self> {
        let code = fields.get(CODE_KEY)?.as_str()?.to_string();
        Some(Self { code, fields })
    }

    /// Convenience constructor for the three common fields
    pub fn new(code: &str, name: &str, semester: impl Into<Value>) -> Self {
        let mut fields = Map::new();
        fields.insert(CODE_KEY.to_string(), Value::from(code));
        fields.insert(NAME_KEY.to_string(), Value::from(name));
        fields.insert(SEMESTER_KEY.to_string(), semester.into());
        Self {
            code: code.to_string(),
            fields,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> Option<&str> {
        self.fields.get(NAME_KEY).and_then(Value::as_str)
    }

    /// Semester label, kept as stored (number or string)
    pub fn semester(&self) -> Option<&Value> {
        self.fields.get(SEMESTER_KEY)
    }

    /// All fields of the original entry, `codigo` included
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

/// Parse a curriculum document
///
/// Anything other than an array yields an empty curriculum. Entries that
/// are not objects or lack a string `codigo` are skipped.
pub fn parse_curriculum(document: Value) -> Vec<CourseDefinition> {
    let entries = match document {
        Value::Array(entries) => entries,
        other => {
            warn!("Curriculum is not a list ({}), treating as empty", type_name(&other));
            return Vec::new();
        }
    };

    entries
        .into_iter()
        .enumerate()
        .filter_map(|(idx, entry)| {
            let course = match entry {
                Value::Object(fields) => CourseDefinition::from_fields(fields),
                _ => None,
            };
            if course.is_none() {
                warn!("Skipping curriculum entry {} without a course code", idx);
            }
            course
        })
        .collect()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
