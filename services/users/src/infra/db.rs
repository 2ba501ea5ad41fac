use std::collections::HashMap;

use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, IntoActiveModel as _, QueryFilter, QueryOrder, QuerySelect, SqlErr,
    TransactionError, TransactionTrait, sea_query::OnConflict,
};
use uuid::Uuid;

use academy_domain::user::{UserRole, UserStatus};
use academy_users_schema::{course_modules, courses, lessons, user_courses, users};

use crate::domain::repository::{EnrollmentRepository, UserRepository};
use crate::domain::types::{Course, CourseModule, CourseSummary, Lesson, User, UserPatch};
use crate::error::UsersServiceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn list(&self) -> Result<Vec<User>, UsersServiceError> {
        let models = users::Entity::find()
            .order_by_asc(users::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list users")?;
        models.into_iter().map(user_from_model).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UsersServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UsersServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        model.map(user_from_model).transpose()
    }

    async fn create(&self, user: &User, course_ids: &[Uuid]) -> Result<(), UsersServiceError> {
        let model = users::ActiveModel {
            id: Set(user.id),
            name: Set(user.name.clone()),
            email: Set(user.email.clone()),
            password: Set(user.password_hash.clone()),
            role: Set(user.role.as_str().to_owned()),
            status: Set(user.status.as_str().to_owned()),
            created_at: Set(user.created_at),
        };
        let user_id = user.id;
        let course_ids = course_ids.to_vec();
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    model.insert(txn).await?;
                    connect_courses(txn, user_id, &course_ids).await
                })
            })
            .await
            .map_err(|e| classify_txn_error(e, "create user"))
    }

    async fn update(&self, id: Uuid, patch: &UserPatch) -> Result<Option<User>, UsersServiceError> {
        let patch = patch.clone();
        let model = self
            .db
            .transaction::<_, Option<users::Model>, DbErr>(|txn| {
                Box::pin(async move {
                    // Row lock: a concurrent delete either waits for us or wins and we see None.
                    let Some(current) = users::Entity::find_by_id(id)
                        .lock_exclusive()
                        .one(txn)
                        .await?
                    else {
                        return Ok(None);
                    };

                    let mut user = current.clone().into_active_model();
                    if let Some(name) = patch.name {
                        user.name = Set(name);
                    }
                    if let Some(email) = patch.email {
                        user.email = Set(email);
                    }
                    if let Some(password_hash) = patch.password_hash {
                        user.password = Set(password_hash);
                    }
                    if let Some(role) = patch.role {
                        user.role = Set(role.as_str().to_owned());
                    }
                    if let Some(status) = patch.status {
                        user.status = Set(status.as_str().to_owned());
                    }
                    let updated = if user.is_changed() {
                        user.update(txn).await?
                    } else {
                        current
                    };

                    if let Some(course_ids) = patch.courses.replacement() {
                        replace_courses(txn, id, course_ids).await?;
                    }
                    Ok(Some(updated))
                })
            })
            .await
            .map_err(|e| classify_txn_error(e, "update user"))?;
        model.map(user_from_model).transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<Option<User>, UsersServiceError> {
        let model = self
            .db
            .transaction::<_, Option<users::Model>, DbErr>(|txn| {
                Box::pin(async move {
                    let Some(current) = users::Entity::find_by_id(id)
                        .lock_exclusive()
                        .one(txn)
                        .await?
                    else {
                        return Ok(None);
                    };
                    user_courses::Entity::delete_many()
                        .filter(user_courses::Column::UserId.eq(id))
                        .exec(txn)
                        .await?;
                    users::Entity::delete_by_id(id).exec(txn).await?;
                    Ok(Some(current))
                })
            })
            .await
            .map_err(|e| classify_txn_error(e, "delete user"))?;
        model.map(user_from_model).transpose()
    }
}

fn user_from_model(model: users::Model) -> Result<User, UsersServiceError> {
    let role = model.role.parse::<UserRole>().context("decode stored user role")?;
    let status = model.status.parse::<UserStatus>().context("decode stored user status")?;
    Ok(User {
        id: model.id,
        name: model.name,
        email: model.email,
        password_hash: model.password,
        role,
        status,
        created_at: model.created_at,
    })
}

// ── Enrollment repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbEnrollmentRepository {
    pub db: DatabaseConnection,
}

impl EnrollmentRepository for DbEnrollmentRepository {
    async fn connect(&self, user_id: Uuid, course_ids: &[Uuid]) -> Result<bool, UsersServiceError> {
        let course_ids = course_ids.to_vec();
        self.db
            .transaction::<_, bool, DbErr>(|txn| {
                Box::pin(async move {
                    let exists = users::Entity::find_by_id(user_id)
                        .lock_exclusive()
                        .one(txn)
                        .await?
                        .is_some();
                    if exists {
                        connect_courses(txn, user_id, &course_ids).await?;
                    }
                    Ok(exists)
                })
            })
            .await
            .map_err(|e| classify_txn_error(e, "connect courses"))
    }

    async fn assigned_courses(
        &self,
        user_ids: &[Uuid],
    ) -> Result<Vec<(Uuid, CourseSummary)>, UsersServiceError> {
        if user_ids.is_empty() {
            return Ok(vec![]);
        }
        let rows = user_courses::Entity::find()
            .filter(user_courses::Column::UserId.is_in(user_ids.iter().copied()))
            .find_also_related(courses::Entity)
            .order_by_desc(courses::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list assigned courses")?;
        Ok(rows
            .into_iter()
            .filter_map(|(link, course)| {
                course.map(|course| {
                    (
                        link.user_id,
                        CourseSummary {
                            id: course.id,
                            title: course.title,
                        },
                    )
                })
            })
            .collect())
    }

    async fn curriculum(&self, user_id: Uuid) -> Result<Vec<Course>, UsersServiceError> {
        let course_ids: Vec<Uuid> = user_courses::Entity::find()
            .filter(user_courses::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .context("list user course links")?
            .into_iter()
            .map(|link| link.course_id)
            .collect();
        if course_ids.is_empty() {
            return Ok(vec![]);
        }

        let course_models = courses::Entity::find()
            .filter(courses::Column::Id.is_in(course_ids.iter().copied()))
            .order_by_desc(courses::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list enrolled courses")?;
        let module_models = course_modules::Entity::find()
            .filter(course_modules::Column::CourseId.is_in(course_ids))
            .order_by_asc(course_modules::Column::Position)
            .all(&self.db)
            .await
            .context("list course modules")?;
        let module_ids: Vec<Uuid> = module_models.iter().map(|m| m.id).collect();
        let lesson_models = if module_ids.is_empty() {
            vec![]
        } else {
            lessons::Entity::find()
                .filter(lessons::Column::ModuleId.is_in(module_ids))
                .order_by_asc(lessons::Column::Position)
                .all(&self.db)
                .await
                .context("list module lessons")?
        };

        Ok(assemble_curriculum(course_models, module_models, lesson_models))
    }
}

/// Nest already-ordered rows; relative order inside each parent is preserved.
fn assemble_curriculum(
    course_models: Vec<courses::Model>,
    module_models: Vec<course_modules::Model>,
    lesson_models: Vec<lessons::Model>,
) -> Vec<Course> {
    let mut lessons_by_module: HashMap<Uuid, Vec<Lesson>> = HashMap::new();
    for lesson in lesson_models {
        lessons_by_module
            .entry(lesson.module_id)
            .or_default()
            .push(Lesson {
                id: lesson.id,
                title: lesson.title,
                duration: lesson.duration,
                order: lesson.position,
            });
    }

    let mut modules_by_course: HashMap<Uuid, Vec<CourseModule>> = HashMap::new();
    for module in module_models {
        let lessons = lessons_by_module.remove(&module.id).unwrap_or_default();
        modules_by_course
            .entry(module.course_id)
            .or_default()
            .push(CourseModule {
                id: module.id,
                title: module.title,
                order: module.position,
                lessons,
            });
    }

    course_models
        .into_iter()
        .map(|course| Course {
            modules: modules_by_course.remove(&course.id).unwrap_or_default(),
            id: course.id,
            title: course.title,
            description: course.description,
            created_at: course.created_at,
        })
        .collect()
}

// ── Join-relation helpers ────────────────────────────────────────────────────

/// Add links from `user_id` to each course. Existing links are kept.
async fn connect_courses<C>(conn: &C, user_id: Uuid, course_ids: &[Uuid]) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    if course_ids.is_empty() {
        return Ok(());
    }
    let links = course_ids
        .iter()
        .map(|&course_id| user_courses::ActiveModel {
            user_id: Set(user_id),
            course_id: Set(course_id),
        });
    user_courses::Entity::insert_many(links)
        .on_conflict(
            OnConflict::columns([user_courses::Column::UserId, user_courses::Column::CourseId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

/// Make the user's links exactly `course_ids`.
async fn replace_courses<C>(conn: &C, user_id: Uuid, course_ids: &[Uuid]) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    user_courses::Entity::delete_many()
        .filter(user_courses::Column::UserId.eq(user_id))
        .exec(conn)
        .await?;
    connect_courses(conn, user_id, course_ids).await
}

// ── Error classification ─────────────────────────────────────────────────────

/// The only unique column is `users.email` and the only foreign keys written
/// here point at `users` and `courses`.
fn classify_db_error(err: DbErr, context: &'static str) -> UsersServiceError {
    constraint_violation(err.sql_err())
        .unwrap_or_else(|| UsersServiceError::Internal(anyhow::Error::new(err).context(context)))
}

fn constraint_violation(sql_err: Option<SqlErr>) -> Option<UsersServiceError> {
    match sql_err? {
        SqlErr::UniqueConstraintViolation(_) => Some(UsersServiceError::EmailAlreadyExists),
        SqlErr::ForeignKeyConstraintViolation(_) => Some(UsersServiceError::InvalidCourseReference),
        _ => None,
    }
}

fn classify_txn_error(err: TransactionError<DbErr>, context: &'static str) -> UsersServiceError {
    match err {
        TransactionError::Connection(err) | TransactionError::Transaction(err) => {
            classify_db_error(err, context)
        }
    }
}
