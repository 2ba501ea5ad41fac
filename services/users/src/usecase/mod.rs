pub mod enrollment;
pub mod user;
