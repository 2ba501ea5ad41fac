use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::{Course, CourseModule, Lesson};
use crate::domain::validation::has_duplicate_ids;
use crate::error::UsersServiceError;
use crate::handlers::user::UserResponse;
use crate::state::AppState;
use crate::usecase::enrollment::{AssignCoursesUseCase, GetUserCoursesUseCase};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct LessonResponse {
    pub id: Uuid,
    pub title: String,
    pub duration: i32,
    pub order: i32,
}

#[derive(Serialize)]
pub struct ModuleResponse {
    pub id: Uuid,
    pub title: String,
    pub order: i32,
    pub lessons: Vec<LessonResponse>,
}

#[derive(Serialize)]
pub struct CourseResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub modules: Vec<ModuleResponse>,
}

impl From<Lesson> for LessonResponse {
    fn from(lesson: Lesson) -> Self {
        Self {
            id: lesson.id,
            title: lesson.title,
            duration: lesson.duration,
            order: lesson.order,
        }
    }
}

impl From<CourseModule> for ModuleResponse {
    fn from(module: CourseModule) -> Self {
        Self {
            id: module.id,
            title: module.title,
            order: module.order,
            lessons: module.lessons.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id,
            title: course.title,
            description: course.description,
            modules: course.modules.into_iter().map(Into::into).collect(),
        }
    }
}

// ── GET /users/{id}/courses ──────────────────────────────────────────────────

pub async fn get_user_courses(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<CourseResponse>>, UsersServiceError> {
    let usecase = GetUserCoursesUseCase {
        users: state.user_repo(),
        enrollments: state.enrollment_repo(),
    };
    let courses = usecase.execute(id).await?;
    Ok(Json(courses.into_iter().map(Into::into).collect()))
}

// ── POST /users/{id}/courses ─────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignCoursesRequest {
    pub course_ids: Vec<Uuid>,
}

pub async fn assign_courses(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<AssignCoursesRequest>,
) -> Result<Json<UserResponse>, UsersServiceError> {
    if body.course_ids.is_empty() {
        return Err(UsersServiceError::MissingData);
    }
    if has_duplicate_ids(&body.course_ids) {
        return Err(UsersServiceError::DuplicateCourseIds);
    }
    let usecase = AssignCoursesUseCase {
        users: state.user_repo(),
        enrollments: state.enrollment_repo(),
    };
    Ok(Json(usecase.execute(id, &body.course_ids).await?.into()))
}
