use std::sync::Arc;

use sqlx::{Pool, Sqlite};

use crate::repository::{
    node_log_repository::NodeLogRepository, node_repository::NodeRepository,
    user_repository::UserRepository,
};

#[derive(Debug)]
pub struct RepositoryManager {
    node_repository: NodeRepository,
    user_repository: UserRepository,
    node_log_repository: NodeLogRepository,
}

impl RepositoryManager {
    pub fn new(pool: Arc<Pool<Sqlite>>) -> Self {
        let node_repository = NodeRepository::new(pool.clone());
        let user_repository = UserRepository::new(pool.clone());
        let node_log_repository = NodeLogRepository::new(pool);

        Self {
            node_repository,
            user_repository,
            node_log_repository,
        }
    }

    pub fn get_node_repository(&self) -> &NodeRepository {
        &self.node_repository
    }

    pub fn get_user_repository(&self) -> &UserRepository {
        &self.user_repository
    }

    pub fn get_node_log_repository(&self) -> &NodeLogRepository {
        &self.node_log_repository
    }
}
