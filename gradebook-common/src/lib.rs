//! # Gradebook Common Library
//!
//! Shared code for the gradebook service including:
//! - Curriculum and grade record models
//! - Status calculation (average, makeup substitution, pass/fail)
//! - Reconciliation of curriculum with stored grades
//! - Storage interfaces with JSON file and in-memory backends
//! - CSV export of the compiled view
//! - Configuration loading

pub mod config;
pub mod curriculum;
pub mod error;
pub mod export;
pub mod grades;
pub mod reconcile;
pub mod service;
pub mod store;

pub use curriculum::CourseDefinition;
pub use error::{Error, Result};
pub use grades::{calculate, GradeField, GradeSummary, GradeTuple, Status};
pub use reconcile::{compile, CompiledCourseView};
pub use service::Gradebook;
pub use store::{CurriculumSource, GradeMap, GradeStore};
