pub mod database_error;
pub mod database_path;
pub mod models;
pub mod repository;
pub mod repository_manager;

use std::{str::FromStr, sync::Arc};

use sqlx::{
    migrate,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite, SqlitePool,
};

use crate::database_error::DatabaseError;

pub async fn get_db_pool() -> Result<Arc<Pool<Sqlite>>, DatabaseError> {
    let db_url = database_path::get_database_url()?;
    tracing::info!("Connecting to database {}", db_url);
    let options = SqliteConnectOptions::from_str(&db_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    migrate!("./migrations").run(&pool).await?;
    Ok(Arc::new(pool))
}

pub async fn setup_test_db() -> SqlitePool {
    // Create an in-memory database connection
    let pool = SqlitePool::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to the in-memory SQLite database");

    // Run migrations
    migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}
