use std::sync::Arc;

use sqlx::{Pool, Sqlite};

use crate::{database_error::DatabaseError, models::NodeLogEntry};

/// Read access to the audit log. Entries are written by `NodeRepository` in the same
/// transaction as the state change they describe.
#[derive(Debug)]
pub struct NodeLogRepository {
    pool: Arc<Pool<Sqlite>>,
}

impl NodeLogRepository {
    pub fn new(pool: Arc<Pool<Sqlite>>) -> Self {
        Self { pool }
    }

    pub async fn get_entries_for_node(
        &self,
        node_id: i64,
    ) -> Result<Vec<NodeLogEntry>, DatabaseError> {
        let entries = sqlx::query_as::<_, NodeLogEntry>(
            "SELECT id, node_id, action, user_id, created_at
             FROM node_log
             WHERE node_id = ?
             ORDER BY id",
        )
        .bind(node_id)
        .fetch_all(&*self.pool)
        .await?;
        Ok(entries)
    }

    pub async fn get_entries(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<NodeLogEntry>, DatabaseError> {
        let entries = sqlx::query_as::<_, NodeLogEntry>(
            "SELECT id, node_id, action, user_id, created_at
             FROM node_log
             ORDER BY id
             LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&*self.pool)
        .await?;
        Ok(entries)
    }
}
