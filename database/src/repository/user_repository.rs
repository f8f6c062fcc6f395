use std::sync::Arc;

use core_types::permission_type::PermissionType;
use sqlx::{Pool, Sqlite};

use crate::{
    database_error::DatabaseError,
    models::User,
};

#[derive(Debug)]
pub struct UserRepository {
    pool: Arc<Pool<Sqlite>>,
}

impl UserRepository {
    pub fn new(pool: Arc<Pool<Sqlite>>) -> Self {
        Self { pool }
    }

    pub async fn get_user(&self, id: i64) -> Result<User, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, is_active, is_superuser FROM app_user WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await?;
        user.ok_or(DatabaseError::UserNotFound(id))
    }

    pub async fn add_user(&self, username: &str, is_superuser: bool) -> Result<i64, DatabaseError> {
        let result = sqlx::query("INSERT INTO app_user (username, is_superuser) VALUES (?, ?)")
            .bind(username)
            .bind(is_superuser)
            .execute(&*self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn set_active(&self, id: i64, is_active: bool) -> Result<(), DatabaseError> {
        let result = sqlx::query("UPDATE app_user SET is_active = ? WHERE id = ?")
            .bind(is_active)
            .bind(id)
            .execute(&*self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::UserNotFound(id));
        }
        Ok(())
    }

    /// Grants `permission_type` on a node and, implicitly, on its whole subtree.
    /// Granting the same permission twice is a no-op.
    pub async fn grant_permission(
        &self,
        user_id: i64,
        node_id: i64,
        permission_type: PermissionType,
    ) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT OR IGNORE INTO node_permission (user_id, node_id, permission_type)
             VALUES (?, ?, ?)",
        )
        .bind(user_id)
        .bind(node_id)
        .bind(permission_type.as_str())
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    /// Whether the user holds `permission_type` on the node at `node_path` or on any of its
    /// ancestors.
    pub async fn has_permission_on_path(
        &self,
        user_id: i64,
        permission_type: PermissionType,
        node_path: &str,
    ) -> Result<bool, DatabaseError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)
             FROM node_permission np
             INNER JOIN node n ON n.id = np.node_id
             WHERE np.user_id = ?
               AND np.permission_type = ?
               AND substr(?, 1, length(n.path)) = n.path",
        )
        .bind(user_id)
        .bind(permission_type.as_str())
        .bind(node_path)
        .fetch_one(&*self.pool)
        .await?;
        Ok(count > 0)
    }
}
