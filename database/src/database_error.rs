use sqlx::Error as SqlxError;
use sqlx::migrate::MigrateError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database error: {0}")]
    SqlxError(#[from] SqlxError),

    #[error("Migration error: {0}")]
    MigrateError(#[from] MigrateError),

    #[error("Node with id {0} not found")]
    NodeNotFound(i64),

    #[error("User with id {0} not found")]
    UserNotFound(i64),

    #[error("Transition of node {node_id} was rejected: {reason}")]
    TransitionConflict { node_id: i64, reason: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl PartialEq for DatabaseError {
    fn eq(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl DatabaseError {
    /// Classifies an error raised while writing a node's publication state.
    ///
    /// SQLite reports contention on the database or a table as BUSY (5) or LOCKED (6), possibly
    /// carried in an extended result code, and those are surfaced as conflicts.
    pub(crate) fn from_transition(err: SqlxError, node_id: i64) -> Self {
        if let SqlxError::Database(db_err) = &err
            && let Some(code) = db_err.code()
            && let Ok(code) = code.parse::<i32>()
            && matches!(code & 0xff, 5 | 6)
        {
            return DatabaseError::TransitionConflict {
                node_id,
                reason: db_err.message().to_string(),
            };
        }
        DatabaseError::SqlxError(err)
    }
}

impl From<core_types::CoreTypeError> for DatabaseError {
    fn from(err: core_types::CoreTypeError) -> Self {
        DatabaseError::ValidationError(err.to_string())
    }
}
