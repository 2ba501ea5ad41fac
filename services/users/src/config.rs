use anyhow::Context as _;

/// Users service configuration loaded from environment variables.
#[derive(Debug)]
pub struct UsersConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3113). Env var: `USERS_PORT`.
    pub users_port: u16,
    /// Connection pool size (default 10). Env var: `DATABASE_MAX_CONNECTIONS`.
    pub database_max_connections: u32,
}

impl UsersConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup. Unparseable optional values fall
    /// back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        Ok(Self {
            database_url: lookup("DATABASE_URL").context("DATABASE_URL is not set")?,
            users_port: lookup("USERS_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(3113),
            database_max_connections: lookup("DATABASE_MAX_CONNECTIONS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        })
    }
}
