#![allow(async_fn_in_trait)]

use uuid::Uuid;

use crate::domain::types::{Course, CourseSummary, User, UserPatch};
use crate::error::UsersServiceError;

/// Repository for user identity records.
pub trait UserRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<User>, UsersServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UsersServiceError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UsersServiceError>;

    /// Insert a user and connect it to `course_ids` in one transaction.
    ///
    /// Fails with `EmailAlreadyExists` or `InvalidCourseReference`; nothing is
    /// persisted in either case.
    async fn create(&self, user: &User, course_ids: &[Uuid]) -> Result<(), UsersServiceError>;

    /// Apply `patch` atomically. Returns `None` if the user does not exist.
    async fn update(&self, id: Uuid, patch: &UserPatch) -> Result<Option<User>, UsersServiceError>;

    /// Delete a user and detach its courses. Returns the deleted record, or
    /// `None` if the user does not exist.
    async fn delete(&self, id: Uuid) -> Result<Option<User>, UsersServiceError>;
}

/// Many-to-many relation between users and courses.
pub trait EnrollmentRepository: Send + Sync {
    /// Link `course_ids` to the user, keeping existing links.
    /// Returns `false` if the user does not exist.
    async fn connect(&self, user_id: Uuid, course_ids: &[Uuid]) -> Result<bool, UsersServiceError>;

    /// `(user_id, course)` pairs for every course linked to one of `user_ids`.
    async fn assigned_courses(
        &self,
        user_ids: &[Uuid],
    ) -> Result<Vec<(Uuid, CourseSummary)>, UsersServiceError>;

    /// Courses linked to the user, expanded with modules and lessons.
    async fn curriculum(&self, user_id: Uuid) -> Result<Vec<Course>, UsersServiceError>;
}

/// One-way password hashing.
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, plaintext: &str) -> Result<String, UsersServiceError>;
}
