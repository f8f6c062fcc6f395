use std::fmt::{Display, Formatter, Result};

use database::database_error::DatabaseError;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    DbError(String),
    NodeNotFound(i64),
    UserNotFound(i64),
    TransitionConflict { node_id: i64, reason: String },
    InvalidInput(String),
    LocaleError(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Error::DbError(message) => write!(f, "Database error: {}", message),
            Error::NodeNotFound(id) => write!(f, "Node with id {} not found", id),
            Error::UserNotFound(id) => write!(f, "User with id {} not found", id),
            Error::TransitionConflict { node_id, reason } => {
                write!(f, "Unpublishing node {} was rejected: {}", node_id, reason)
            }
            Error::InvalidInput(message) => write!(f, "Invalid input: {}", message),
            Error::LocaleError(message) => write!(f, "Locale error: {}", message),
        }
    }
}

impl std::error::Error for Error {}

impl From<DatabaseError> for Error {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NodeNotFound(id) => Error::NodeNotFound(id),
            DatabaseError::UserNotFound(id) => Error::UserNotFound(id),
            DatabaseError::TransitionConflict { node_id, reason } => {
                Error::TransitionConflict { node_id, reason }
            }
            other => Error::DbError(other.to_string()),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::LocaleError(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::LocaleError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_errors_keep_their_kind() {
        assert_eq!(
            Error::from(DatabaseError::NodeNotFound(3)),
            Error::NodeNotFound(3)
        );
        assert_eq!(
            Error::from(DatabaseError::UserNotFound(4)),
            Error::UserNotFound(4)
        );
        assert_eq!(
            Error::from(DatabaseError::TransitionConflict {
                node_id: 5,
                reason: "database is locked".to_string()
            }),
            Error::TransitionConflict {
                node_id: 5,
                reason: "database is locked".to_string()
            }
        );
        assert!(matches!(
            Error::from(DatabaseError::ValidationError("bad path".to_string())),
            Error::DbError(_)
        ));
    }
}
