use std::sync::Arc;

use chrono::Utc;
use core_types::tree_path;
use sqlx::{Pool, Sqlite};

use crate::{
    database_error::DatabaseError,
    models::{Node, UNPUBLISH_ACTION},
};

const NODE_COLUMNS: &str =
    "id, title, path, depth, parent_id, live, has_unpublished_changes, locked, locked_by";

#[derive(Debug)]
pub struct NodeRepository {
    pool: Arc<Pool<Sqlite>>,
}

impl NodeRepository {
    pub fn new(pool: Arc<Pool<Sqlite>>) -> Self {
        Self { pool }
    }

    pub async fn get_node(&self, id: i64) -> Result<Node, DatabaseError> {
        let node = sqlx::query_as::<_, Node>(&format!(
            "SELECT {NODE_COLUMNS} FROM node WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&*self.pool)
        .await?;
        node.ok_or(DatabaseError::NodeNotFound(id))
    }

    pub async fn add_root(&self, title: &str) -> Result<i64, DatabaseError> {
        self.insert_node(None, title).await
    }

    pub async fn add_child(&self, parent_id: i64, title: &str) -> Result<i64, DatabaseError> {
        self.insert_node(Some(parent_id), title).await
    }

    async fn insert_node(&self, parent_id: Option<i64>, title: &str) -> Result<i64, DatabaseError> {
        let mut transaction = self.pool.begin().await?;

        let parent_path = match parent_id {
            Some(parent_id) => Some(
                sqlx::query_scalar::<_, String>("SELECT path FROM node WHERE id = ?")
                    .bind(parent_id)
                    .fetch_optional(&mut *transaction)
                    .await?
                    .ok_or(DatabaseError::NodeNotFound(parent_id))?,
            ),
            None => None,
        };

        let last_sibling_path = sqlx::query_scalar::<_, Option<String>>(
            "SELECT MAX(path) FROM node WHERE parent_id IS ?",
        )
        .bind(parent_id)
        .fetch_one(&mut *transaction)
        .await?;

        let path = tree_path::next_child_path(parent_path.as_deref(), last_sibling_path.as_deref())?;
        let depth = tree_path::depth_of(&path) as i64;

        let result = sqlx::query(
            "INSERT INTO node (title, path, depth, parent_id, live) VALUES (?, ?, ?, ?, 1)",
        )
        .bind(title)
        .bind(&path)
        .bind(depth)
        .bind(parent_id)
        .execute(&mut *transaction)
        .await?;

        transaction.commit().await?;
        Ok(result.last_insert_rowid())
    }

    /// Fetches at most `limit` live descendants of the node at `ancestor_path` whose path sorts
    /// after `after_path`, in pre-order. Passing the last path of the previous page as
    /// `after_path` continues the traversal.
    pub async fn get_live_descendants_page(
        &self,
        ancestor_path: &str,
        after_path: &str,
        limit: i64,
    ) -> Result<Vec<Node>, DatabaseError> {
        let nodes = sqlx::query_as::<_, Node>(&format!(
            "SELECT {NODE_COLUMNS} FROM node
             WHERE live = 1 AND path > ? AND substr(path, 1, ?) = ?
             ORDER BY path
             LIMIT ?"
        ))
        .bind(after_path)
        .bind(ancestor_path.len() as i64)
        .bind(ancestor_path)
        .bind(limit)
        .fetch_all(&*self.pool)
        .await?;
        Ok(nodes)
    }

    /// Counts live descendants. A node that no longer exists has none.
    pub async fn count_live_descendants(&self, node_id: i64) -> Result<i64, DatabaseError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM node d, node a
             WHERE a.id = ?
               AND d.live = 1
               AND d.path > a.path
               AND substr(d.path, 1, length(a.path)) = a.path",
        )
        .bind(node_id)
        .fetch_one(&*self.pool)
        .await?;
        Ok(count)
    }

    /// Moves a node from live to unpublished and records an audit entry attributed to `user_id`.
    ///
    /// Returns `false` when the node exists but was already unpublished, in which case nothing
    /// is written.
    pub async fn set_unpublished(
        &self,
        node_id: i64,
        user_id: Option<i64>,
    ) -> Result<bool, DatabaseError> {
        let conflict = |e: sqlx::Error| DatabaseError::from_transition(e, node_id);
        let mut transaction = self.pool.begin().await.map_err(conflict)?;

        let result = sqlx::query(
            "UPDATE node SET live = 0, has_unpublished_changes = 1 WHERE id = ? AND live = 1",
        )
        .bind(node_id)
        .execute(&mut *transaction)
        .await
        .map_err(conflict)?;

        if result.rows_affected() == 0 {
            let exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM node WHERE id = ?")
                .bind(node_id)
                .fetch_one(&mut *transaction)
                .await
                .map_err(conflict)?;
            transaction.rollback().await.map_err(conflict)?;
            return if exists == 0 {
                Err(DatabaseError::NodeNotFound(node_id))
            } else {
                Ok(false)
            };
        }

        sqlx::query("INSERT INTO node_log (node_id, action, user_id, created_at) VALUES (?, ?, ?, ?)")
            .bind(node_id)
            .bind(UNPUBLISH_ACTION)
            .bind(user_id)
            .bind(Utc::now())
            .execute(&mut *transaction)
            .await
            .map_err(conflict)?;

        transaction.commit().await.map_err(conflict)?;
        Ok(true)
    }

    pub async fn lock_node(&self, node_id: i64, user_id: i64) -> Result<(), DatabaseError> {
        let result = sqlx::query("UPDATE node SET locked = 1, locked_by = ? WHERE id = ?")
            .bind(user_id)
            .bind(node_id)
            .execute(&*self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::NodeNotFound(node_id));
        }
        Ok(())
    }

    /// Deletes a node together with its whole subtree.
    pub async fn delete_node(&self, node_id: i64) -> Result<(), DatabaseError> {
        let node = self.get_node(node_id).await?;
        sqlx::query("DELETE FROM node WHERE substr(path, 1, ?) = ?")
            .bind(node.path.len() as i64)
            .bind(&node.path)
            .execute(&*self.pool)
            .await?;
        Ok(())
    }
}
