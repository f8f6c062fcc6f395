use file_system::get_database_path;
use std::env;

use crate::database_error::DatabaseError;

/// Returns the database URL in the format sqlite:///absolute/path/to/db.sqlite
///
/// `DATABASE_URL` wins when set, either in the environment or in a `.env` file.
pub fn get_database_url() -> Result<String, DatabaseError> {
    if let Err(e) = dotenvy::dotenv()
        && !e.not_found()
    {
        tracing::warn!("Failed to read .env file: {}", e);
    }

    if let Ok(env_url) = env::var("DATABASE_URL") {
        return Ok(env_url);
    }

    let db_path = get_database_path().map_err(|e| {
        DatabaseError::ConfigurationError(format!("Failed to resolve database path: {}", e))
    })?;

    Ok(format!("sqlite://{}", db_path.display()))
}
