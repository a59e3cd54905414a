pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("Missing version for update")]
    MissingVersion,

    #[error("Failed to update record {id} with version {version}")]
    FailedUpdate { id: i64, version: i64 },
}

impl Error {
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Error::DatabaseError(sqlx::Error::Database(e)) => e.is_unique_violation(),
            _ => false,
        }
    }
}
