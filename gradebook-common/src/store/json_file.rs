//! JSON file backends

use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::{CurriculumSource, GradeMap, GradeStore};
use crate::curriculum::{parse_curriculum, CourseDefinition};
use crate::Result;

/// Grade store kept as a pretty-printed JSON object on disk
#[derive(Debug, Clone)]
pub struct JsonGradeFile {
    path: PathBuf,
}

impl JsonGradeFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GradeStore for JsonGradeFile {
    fn load(&self) -> Result<GradeMap> {
        let Some(document) = read_document(&self.path)? else {
            return Ok(GradeMap::new());
        };
        match document {
            Value::Object(map) => {
                debug!("Loaded {} grade records from {}", map.len(), self.path.display());
                Ok(map)
            }
            _ => {
                warn!(
                    "Grade store {} is not a JSON object, treating as empty",
                    self.path.display()
                );
                Ok(GradeMap::new())
            }
        }
    }

    fn save(&self, grades: &GradeMap) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(grades)?;
        std::fs::write(&self.path, json)?;
        debug!("Wrote {} grade records to {}", grades.len(), self.path.display());
        Ok(())
    }
}

/// Curriculum read from a JSON array on disk
#[derive(Debug, Clone)]
pub struct JsonCurriculumFile {
    path: PathBuf,
}

impl JsonCurriculumFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CurriculumSource for JsonCurriculumFile {
    fn load(&self) -> Result<Vec<CourseDefinition>> {
        let courses = read_document(&self.path)?
            .map(parse_curriculum)
            .unwrap_or_default();
        debug!("Loaded {} courses from {}", courses.len(), self.path.display());
        Ok(courses)
    }
}

/// Read and parse a JSON file
///
/// Missing file and invalid JSON both give `Ok(None)`; other I/O failures
/// (permissions, path is a directory) propagate.
fn read_document(path: &Path) -> Result<Option<Value>> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("{} not found, treating as empty", path.display());
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    match serde_json::from_slice(&bytes) {
        Ok(document) => Ok(Some(document)),
        Err(e) => {
            warn!("Failed to parse {}: {}, treating as empty", path.display(), e);
            Ok(None)
        }
    }
}
