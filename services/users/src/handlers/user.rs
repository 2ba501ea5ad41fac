use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use academy_domain::user::{UserRole, UserStatus};

use crate::domain::types::{CourseSummary, UserProfile, UserWithCourses};
use crate::domain::validation::{
    has_duplicate_ids, validate_email, validate_name, validate_password,
};
use crate::error::UsersServiceError;
use crate::state::AppState;
use crate::usecase::user::{
    CreateUserInput, CreateUserUseCase, DeleteUserUseCase, GetUserUseCase, ListUsersUseCase,
    UpdateUserInput, UpdateUserStatusUseCase, UpdateUserUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummaryResponse {
    pub id: Uuid,
    pub title: String,
}

impl From<CourseSummary> for CourseSummaryResponse {
    fn from(course: CourseSummary) -> Self {
        Self {
            id: course.id,
            title: course.title,
        }
    }
}

/// User projection without assigned courses.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub status: UserStatus,
    #[serde(serialize_with = "academy_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub role: UserRole,
}

impl From<UserProfile> for UserProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
            email: profile.email,
            status: profile.status,
            created_at: profile.created_at,
            role: profile.role,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[serde(flatten)]
    pub profile: UserProfileResponse,
    pub assigned_courses: Vec<CourseSummaryResponse>,
}

impl From<UserWithCourses> for UserResponse {
    fn from(user: UserWithCourses) -> Self {
        Self {
            profile: user.profile.into(),
            assigned_courses: user.assigned_courses.into_iter().map(Into::into).collect(),
        }
    }
}

// ── POST /users ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<UserRole>,
    #[serde(default)]
    pub assigned_course_ids: Vec<Uuid>,
}

impl CreateUserRequest {
    fn validate(&self) -> Result<(), UsersServiceError> {
        if !validate_name(&self.name) {
            return Err(UsersServiceError::InvalidName);
        }
        if !validate_email(&self.email) {
            return Err(UsersServiceError::InvalidEmail);
        }
        if !validate_password(&self.password) {
            return Err(UsersServiceError::InvalidPassword);
        }
        if has_duplicate_ids(&self.assigned_course_ids) {
            return Err(UsersServiceError::DuplicateCourseIds);
        }
        Ok(())
    }
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), UsersServiceError> {
    body.validate()?;
    let usecase = CreateUserUseCase {
        users: state.user_repo(),
        enrollments: state.enrollment_repo(),
        hasher: state.password_hasher(),
    };
    let user = usecase
        .execute(CreateUserInput {
            name: body.name,
            email: body.email,
            password: body.password,
            role: body.role,
            assigned_course_ids: body.assigned_course_ids,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── GET /users ───────────────────────────────────────────────────────────────

pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, UsersServiceError> {
    let usecase = ListUsersUseCase {
        users: state.user_repo(),
        enrollments: state.enrollment_repo(),
    };
    let users = usecase.execute().await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

// ── GET /users/{id} ──────────────────────────────────────────────────────────

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, UsersServiceError> {
    let usecase = GetUserUseCase {
        users: state.user_repo(),
        enrollments: state.enrollment_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── PATCH /users/{id} ────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
    /// Omitted leaves assignments untouched; `[]` clears them.
    pub assigned_course_ids: Option<Vec<Uuid>>,
}

impl UpdateUserRequest {
    fn validate(&self) -> Result<(), UsersServiceError> {
        if self.name.as_deref().is_some_and(|name| !validate_name(name)) {
            return Err(UsersServiceError::InvalidName);
        }
        if self.email.as_deref().is_some_and(|email| !validate_email(email)) {
            return Err(UsersServiceError::InvalidEmail);
        }
        if self
            .password
            .as_deref()
            .is_some_and(|password| !validate_password(password))
        {
            return Err(UsersServiceError::InvalidPassword);
        }
        if self
            .assigned_course_ids
            .as_deref()
            .is_some_and(has_duplicate_ids)
        {
            return Err(UsersServiceError::DuplicateCourseIds);
        }
        Ok(())
    }
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, UsersServiceError> {
    body.validate()?;
    let usecase = UpdateUserUseCase {
        users: state.user_repo(),
        enrollments: state.enrollment_repo(),
        hasher: state.password_hasher(),
    };
    let user = usecase
        .execute(
            id,
            UpdateUserInput {
                name: body.name,
                email: body.email,
                password: body.password,
                role: body.role,
                status: body.status,
                courses: body.assigned_course_ids.into(),
            },
        )
        .await?;
    Ok(Json(user.into()))
}

// ── PATCH /users/{id}/status ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: UserStatus,
}

pub async fn update_user_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<UserProfileResponse>, UsersServiceError> {
    let usecase = UpdateUserStatusUseCase {
        users: state.user_repo(),
    };
    Ok(Json(usecase.execute(id, body.status).await?.into()))
}

// ── DELETE /users/{id} ───────────────────────────────────────────────────────

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserProfileResponse>, UsersServiceError> {
    let usecase = DeleteUserUseCase {
        users: state.user_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}
