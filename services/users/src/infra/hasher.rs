use anyhow::Context as _;

use crate::domain::repository::PasswordHasher;
use crate::error::UsersServiceError;

/// Work factor used for every stored password.
pub const PASSWORD_HASH_COST: u32 = 10;

/// bcrypt-backed [`PasswordHasher`]. Hashing runs on the blocking pool.
#[derive(Clone, Copy, Debug)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(PASSWORD_HASH_COST)
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, plaintext: &str) -> Result<String, UsersServiceError> {
        let plaintext = plaintext.to_owned();
        let cost = self.cost;
        let hash = tokio::task::spawn_blocking(move || bcrypt::hash(plaintext, cost))
            .await
            .context("join password hashing task")?
            .context("hash password")?;
        Ok(hash)
    }
}
