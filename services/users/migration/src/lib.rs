use sea_orm_migration::prelude::*;

mod m20260301_000001_create_courses;
mod m20260301_000002_create_course_modules;
mod m20260301_000003_create_lessons;
mod m20260301_000004_create_users;
mod m20260301_000005_create_user_courses;
mod m20260301_000006_add_curriculum_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_courses::Migration),
            Box::new(m20260301_000002_create_course_modules::Migration),
            Box::new(m20260301_000003_create_lessons::Migration),
            Box::new(m20260301_000004_create_users::Migration),
            Box::new(m20260301_000005_create_user_courses::Migration),
            Box::new(m20260301_000006_add_curriculum_indexes::Migration),
        ]
    }
}
