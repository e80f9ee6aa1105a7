//! In-memory backends

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{CurriculumSource, GradeMap, GradeStore};
use crate::curriculum::CourseDefinition;
use crate::{Error, Result};

/// Grade store held in memory, counting saves
#[derive(Debug, Default)]
pub struct MemoryGradeStore {
    grades: Mutex<GradeMap>,
    saves: AtomicUsize,
}

impl MemoryGradeStore {
    pub fn new(grades: GradeMap) -> Self {
        Self {
            grades: Mutex::new(grades),
            saves: AtomicUsize::new(0),
        }
    }

    /// Current contents
    pub fn snapshot(&self) -> GradeMap {
        self.grades
            .lock()
            .map(|grades| grades.clone())
            .unwrap_or_default()
    }

    /// Number of successful `save` calls
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl GradeStore for MemoryGradeStore {
    fn load(&self) -> Result<GradeMap> {
        self.grades
            .lock()
            .map(|grades| grades.clone())
            .map_err(|_| Error::Internal("grade store lock poisoned".to_string()))
    }

    fn save(&self, grades: &GradeMap) -> Result<()> {
        let mut guard = self
            .grades
            .lock()
            .map_err(|_| Error::Internal("grade store lock poisoned".to_string()))?;
        *guard = grades.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Fixed curriculum held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryCurriculum {
    courses: Vec<CourseDefinition>,
}

impl MemoryCurriculum {
    pub fn new(courses: Vec<CourseDefinition>) -> Self {
        Self { courses }
    }
}

impl CurriculumSource for MemoryCurriculum {
    fn load(&self) -> Result<Vec<CourseDefinition>> {
        Ok(self.courses.clone())
    }
}
