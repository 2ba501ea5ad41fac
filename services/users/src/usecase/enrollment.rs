use tracing::info;
use uuid::Uuid;

use crate::domain::repository::{EnrollmentRepository, UserRepository};
use crate::domain::types::{Course, UserWithCourses, order_curriculum};
use crate::error::UsersServiceError;
use crate::usecase::user::with_assigned_courses;

// ── GetUserCourses ───────────────────────────────────────────────────────────

pub struct GetUserCoursesUseCase<U: UserRepository, E: EnrollmentRepository> {
    pub users: U,
    pub enrollments: E,
}

impl<U: UserRepository, E: EnrollmentRepository> GetUserCoursesUseCase<U, E> {
    pub async fn execute(&self, user_id: Uuid) -> Result<Vec<Course>, UsersServiceError> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(UsersServiceError::UserNotFound);
        }
        let mut courses = self.enrollments.curriculum(user_id).await?;
        order_curriculum(&mut courses);
        Ok(courses)
    }
}

// ── AssignCourses ────────────────────────────────────────────────────────────

/// Adds courses to a user; existing assignments are kept.
pub struct AssignCoursesUseCase<U: UserRepository, E: EnrollmentRepository> {
    pub users: U,
    pub enrollments: E,
}

impl<U: UserRepository, E: EnrollmentRepository> AssignCoursesUseCase<U, E> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        course_ids: &[Uuid],
    ) -> Result<UserWithCourses, UsersServiceError> {
        if !self.enrollments.connect(user_id, course_ids).await? {
            return Err(UsersServiceError::UserNotFound);
        }
        info!(user_id = %user_id, courses = course_ids.len(), "courses assigned");
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(UsersServiceError::UserNotFound)?;
        with_assigned_courses(&self.enrollments, user).await
    }
}
