//! Shared database types for FluffyTeams
//!
//! The plugin runs against an embedded SQLite file by default and against
//! PostgreSQL when a server network shares one database. Both go through the
//! sqlx `Any` driver; repositories use `$N` placeholders, which both backends
//! accept.

use crate::error::Error;
use sqlx::any::AnyPoolOptions;
use sqlx::AnyPool;
use thiserror::Error;

/// Database-specific error types
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Record already exists")]
    AlreadyExists,

    #[error("Database connection error: {0}")]
    Connection(#[from] sqlx::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<RepositoryError> for Error {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Error::InvalidArgument("Record not found".to_string()),
            RepositoryError::AlreadyExists => {
                Error::InvalidArgument("Record already exists".to_string())
            }
            RepositoryError::Connection(e) => Error::Database(e),
            RepositoryError::InvalidData(msg) => Error::Internal(msg),
        }
    }
}

/// SQL dialect behind a connection URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackend {
    Sqlite,
    Postgres,
}

impl DatabaseBackend {
    /// Detect the backend from a connection URL scheme
    pub fn from_url(url: &str) -> Result<Self, Error> {
        let scheme = url.split(':').next().unwrap_or_default();
        match scheme {
            "sqlite" => Ok(DatabaseBackend::Sqlite),
            "postgres" | "postgresql" => Ok(DatabaseBackend::Postgres),
            other => Err(Error::Configuration(format!(
                "Unsupported database scheme '{}'. Supported schemes: sqlite, postgres",
                other
            ))),
        }
    }

    /// Column definition for an auto-increment primary key
    pub fn primary_key_column(&self) -> &'static str {
        match self {
            DatabaseBackend::Sqlite => "INTEGER PRIMARY KEY AUTOINCREMENT",
            DatabaseBackend::Postgres => "BIGSERIAL PRIMARY KEY",
        }
    }
}

impl std::fmt::Display for DatabaseBackend {
    #[mutants::skip] // Only used in log output
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatabaseBackend::Sqlite => write!(f, "sqlite"),
            DatabaseBackend::Postgres => write!(f, "postgres"),
        }
    }
}

/// Connection pool together with the dialect it speaks
#[derive(Clone, Debug)]
pub struct Database {
    pool: AnyPool,
    backend: DatabaseBackend,
}

impl Database {
    /// Open a pool for `url`.
    ///
    /// In-memory SQLite databases live per connection, so callers using
    /// `sqlite::memory:` must pass `max_connections = 1`.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, Error> {
        let backend = DatabaseBackend::from_url(url)?;
        sqlx::any::install_default_drivers();

        let pool = AnyPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;

        tracing::info!(backend = %backend, "Connected to database");

        Ok(Self { pool, backend })
    }

    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    pub fn backend(&self) -> DatabaseBackend {
        self.backend
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
