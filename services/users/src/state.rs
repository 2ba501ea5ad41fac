use sea_orm::DatabaseConnection;

use crate::infra::db::{DbEnrollmentRepository, DbUserRepository};
use crate::infra::hasher::BcryptPasswordHasher;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn enrollment_repo(&self) -> DbEnrollmentRepository {
        DbEnrollmentRepository {
            db: self.db.clone(),
        }
    }

    pub fn password_hasher(&self) -> BcryptPasswordHasher {
        BcryptPasswordHasher::default()
    }
}
