use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .table(UserCourses::Table)
                    .col(UserCourses::CourseId)
                    .name("idx_user_courses_course_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(CourseModules::Table)
                    .col(CourseModules::CourseId)
                    .col(CourseModules::Position)
                    .name("idx_course_modules_course_id_position")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Lessons::Table)
                    .col(Lessons::ModuleId)
                    .col(Lessons::Position)
                    .name("idx_lessons_module_id_position")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_lessons_module_id_position").to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_course_modules_course_id_position")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(Index::drop().name("idx_user_courses_course_id").to_owned())
            .await
    }
}

#[derive(Iden)]
enum UserCourses {
    Table,
    CourseId,
}

#[derive(Iden)]
enum CourseModules {
    Table,
    CourseId,
    Position,
}

#[derive(Iden)]
enum Lessons {
    Table,
    ModuleId,
    Position,
}
