use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use academy_domain::user::{UserRole, UserStatus};

/// Full user record, including the password hash.
///
/// Only the credential lookup hands this out; every other read goes through
/// [`UserProfile`].
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
}

/// Public projection of a user. Carries no password field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            status: user.status,
            created_at: user.created_at,
        }
    }
}

/// Minimal course shape attached to a user projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseSummary {
    pub id: Uuid,
    pub title: String,
}

/// A user projection together with its assigned courses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserWithCourses {
    pub profile: UserProfile,
    pub assigned_courses: Vec<CourseSummary>,
}

/// What a partial update does to the course association set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CourseAssignment {
    /// Field omitted: associations are left as they are.
    #[default]
    Unchanged,
    /// Field given as an empty list: every association is removed.
    Clear,
    /// Field given with ids: associations become exactly these courses.
    Replace(Vec<Uuid>),
}

impl CourseAssignment {
    /// The new association set, or `None` when associations stay untouched.
    pub fn replacement(&self) -> Option<&[Uuid]> {
        match self {
            Self::Unchanged => None,
            Self::Clear => Some(&[]),
            Self::Replace(ids) => Some(ids),
        }
    }
}

impl From<Option<Vec<Uuid>>> for CourseAssignment {
    fn from(ids: Option<Vec<Uuid>>) -> Self {
        match ids {
            None => Self::Unchanged,
            Some(ids) if ids.is_empty() => Self::Clear,
            Some(ids) => Self::Replace(ids),
        }
    }
}

/// Changes applied by an update. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
    pub courses: CourseAssignment,
}

impl UserPatch {
    pub fn status(status: UserStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

/// A course expanded with its modules and lessons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub modules: Vec<CourseModule>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseModule {
    pub id: Uuid,
    pub title: String,
    pub order: i32,
    pub lessons: Vec<Lesson>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    pub id: Uuid,
    pub title: String,
    /// Minutes.
    pub duration: i32,
    pub order: i32,
}

/// Sort a curriculum for display: newest course first, modules and lessons by
/// ascending order value. Ties keep their incoming order.
pub fn order_curriculum(courses: &mut [Course]) {
    courses.sort_by_key(|course| Reverse(course.created_at));
    for course in courses.iter_mut() {
        course.modules.sort_by_key(|module| module.order);
        for module in &mut course.modules {
            module.lessons.sort_by_key(|lesson| lesson.order);
        }
    }
}
