//! sea-orm entities for the users service.
//!
//! `courses`, `course_modules` and `lessons` belong to the course catalogue and
//! are only read here; `user_courses` is the enrollment join table.

pub mod course_modules;
pub mod courses;
pub mod lessons;
pub mod user_courses;
pub mod users;
