use chrono::{DateTime, Utc};
use core_types::{NodeId, PublicationState, UserId};
use sqlx::FromRow;

/// A content node in the tree.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Node {
    pub id: NodeId,
    pub title: String,
    pub path: String,
    pub depth: i64,
    pub parent_id: Option<NodeId>,
    pub live: bool,
    pub has_unpublished_changes: bool,
    pub locked: bool,
    pub locked_by: Option<UserId>,
}

impl Node {
    pub fn publication_state(&self) -> PublicationState {
        PublicationState::from(self.live)
    }

    /// Tree roots have no parent. They are structural and never unpublished by users.
    pub fn is_tree_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn is_locked_for(&self, user_id: UserId) -> bool {
        self.locked && self.locked_by != Some(user_id)
    }
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub is_active: bool,
    pub is_superuser: bool,
}

pub const UNPUBLISH_ACTION: &str = "unpublish";

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct NodeLogEntry {
    pub id: i64,
    pub node_id: NodeId,
    pub action: String,
    pub user_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
}
