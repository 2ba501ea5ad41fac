use std::collections::HashMap;

use chrono::{SubsecRound as _, Utc};
use tracing::info;
use uuid::Uuid;

use academy_domain::user::{UserRole, UserStatus};

use crate::domain::repository::{EnrollmentRepository, PasswordHasher, UserRepository};
use crate::domain::types::{
    CourseAssignment, CourseSummary, User, UserPatch, UserProfile, UserWithCourses,
};
use crate::error::UsersServiceError;

/// Attach the user's assigned courses to its public projection.
pub(crate) async fn with_assigned_courses<E: EnrollmentRepository>(
    enrollments: &E,
    user: User,
) -> Result<UserWithCourses, UsersServiceError> {
    let assigned_courses = enrollments
        .assigned_courses(&[user.id])
        .await?
        .into_iter()
        .map(|(_, course)| course)
        .collect();
    Ok(UserWithCourses {
        profile: user.into(),
        assigned_courses,
    })
}

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<UserRole>,
    pub assigned_course_ids: Vec<Uuid>,
}

pub struct CreateUserUseCase<U: UserRepository, E: EnrollmentRepository, H: PasswordHasher> {
    pub users: U,
    pub enrollments: E,
    pub hasher: H,
}

impl<U: UserRepository, E: EnrollmentRepository, H: PasswordHasher> CreateUserUseCase<U, E, H> {
    pub async fn execute(&self, input: CreateUserInput) -> Result<UserWithCourses, UsersServiceError> {
        let password_hash = self.hasher.hash(&input.password).await?;
        let user = User {
            id: Uuid::now_v7(),
            name: input.name,
            email: input.email,
            password_hash,
            role: input.role.unwrap_or_default(),
            status: UserStatus::default(),
            // timestamptz keeps microseconds.
            created_at: Utc::now().trunc_subsecs(6),
        };
        self.users.create(&user, &input.assigned_course_ids).await?;
        info!(
            user_id = %user.id,
            role = %user.role,
            courses = input.assigned_course_ids.len(),
            "user created"
        );
        with_assigned_courses(&self.enrollments, user).await
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<U: UserRepository, E: EnrollmentRepository> {
    pub users: U,
    pub enrollments: E,
}

impl<U: UserRepository, E: EnrollmentRepository> ListUsersUseCase<U, E> {
    pub async fn execute(&self) -> Result<Vec<UserWithCourses>, UsersServiceError> {
        let users = self.users.list().await?;
        let ids: Vec<Uuid> = users.iter().map(|u| u.id).collect();
        let mut courses_by_user: HashMap<Uuid, Vec<CourseSummary>> = HashMap::new();
        for (user_id, course) in self.enrollments.assigned_courses(&ids).await? {
            courses_by_user.entry(user_id).or_default().push(course);
        }
        Ok(users
            .into_iter()
            .map(|user| UserWithCourses {
                assigned_courses: courses_by_user.remove(&user.id).unwrap_or_default(),
                profile: user.into(),
            })
            .collect())
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<U: UserRepository, E: EnrollmentRepository> {
    pub users: U,
    pub enrollments: E,
}

impl<U: UserRepository, E: EnrollmentRepository> GetUserUseCase<U, E> {
    pub async fn execute(&self, user_id: Uuid) -> Result<UserWithCourses, UsersServiceError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(UsersServiceError::UserNotFound)?;
        with_assigned_courses(&self.enrollments, user).await
    }
}

// ── FindUserCredentials ──────────────────────────────────────────────────────

/// Lookup for credential verification. The result carries the password hash
/// and must not be forwarded to clients.
pub struct FindUserCredentialsUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> FindUserCredentialsUseCase<U> {
    pub async fn execute(&self, email: &str) -> Result<User, UsersServiceError> {
        self.users
            .find_by_email(email)
            .await?
            .ok_or(UsersServiceError::UserNotFound)
    }
}

// ── UpdateUser ───────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct UpdateUserInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
    pub courses: CourseAssignment,
}

pub struct UpdateUserUseCase<U: UserRepository, E: EnrollmentRepository, H: PasswordHasher> {
    pub users: U,
    pub enrollments: E,
    pub hasher: H,
}

impl<U: UserRepository, E: EnrollmentRepository, H: PasswordHasher> UpdateUserUseCase<U, E, H> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: UpdateUserInput,
    ) -> Result<UserWithCourses, UsersServiceError> {
        let password_hash = match input.password {
            Some(ref password) => {
                // Unknown ids fail before paying the hashing cost.
                if self.users.find_by_id(user_id).await?.is_none() {
                    return Err(UsersServiceError::UserNotFound);
                }
                Some(self.hasher.hash(password).await?)
            }
            None => None,
        };
        let patch = UserPatch {
            name: input.name,
            email: input.email,
            password_hash,
            role: input.role,
            status: input.status,
            courses: input.courses,
        };
        let user = self
            .users
            .update(user_id, &patch)
            .await?
            .ok_or(UsersServiceError::UserNotFound)?;
        info!(
            user_id = %user_id,
            password_changed = patch.password_hash.is_some(),
            courses_replaced = patch.courses.replacement().is_some(),
            "user updated"
        );
        with_assigned_courses(&self.enrollments, user).await
    }
}

// ── UpdateUserStatus ─────────────────────────────────────────────────────────

pub struct UpdateUserStatusUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> UpdateUserStatusUseCase<U> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        status: UserStatus,
    ) -> Result<UserProfile, UsersServiceError> {
        let user = self
            .users
            .update(user_id, &UserPatch::status(status))
            .await?
            .ok_or(UsersServiceError::UserNotFound)?;
        info!(user_id = %user_id, status = %status, "user status updated");
        Ok(user.into())
    }
}

// ── DeleteUser ───────────────────────────────────────────────────────────────

pub struct DeleteUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> DeleteUserUseCase<U> {
    pub async fn execute(&self, user_id: Uuid) -> Result<UserProfile, UsersServiceError> {
        let user = self
            .users
            .delete(user_id)
            .await?
            .ok_or(UsersServiceError::UserNotFound)?;
        info!(user_id = %user_id, "user deleted");
        Ok(user.into())
    }
}
