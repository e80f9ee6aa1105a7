//! Storage interfaces
//!
//! Core logic only talks to [`GradeStore`] and [`CurriculumSource`]. The
//! JSON file backends are used by the service binary; the in-memory
//! backends stand in for them in tests.

use serde_json::{Map, Value};

use crate::curriculum::CourseDefinition;
use crate::Result;

mod json_file;
mod memory;

pub use json_file::{JsonCurriculumFile, JsonGradeFile};
pub use memory::{MemoryCurriculum, MemoryGradeStore};

/// Raw grade store contents: course code to stored record
///
/// Values are kept raw so records for unknown codes, and malformed
/// records, survive a rewrite unchanged.
pub type GradeMap = Map<String, Value>;

/// Keyed collection of grade records
pub trait GradeStore: Send + Sync {
    /// Load the whole collection
    ///
    /// A missing or unparsable store yields an empty map, not an error.
    fn load(&self) -> Result<GradeMap>;

    /// Replace the whole collection
    fn save(&self, grades: &GradeMap) -> Result<()>;
}

/// Read-only curriculum
pub trait CurriculumSource: Send + Sync {
    /// Load all courses in curriculum order
    ///
    /// A missing or unparsable curriculum yields an empty list.
    fn load(&self) -> Result<Vec<CourseDefinition>>;
}
