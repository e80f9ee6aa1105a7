//! HTTP API handlers for gradebook-api

pub mod buildinfo;
pub mod courses;
pub mod error;
pub mod export;
pub mod health;
pub mod ui;

pub use buildinfo::get_build_info;
pub use courses::{get_courses, update_course};
pub use error::ApiError;
pub use export::export_csv;
pub use health::health_routes;
pub use ui::serve_index;
