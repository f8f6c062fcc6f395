use std::sync::Arc;

use async_trait::async_trait;
use core_types::UserId;
use database::{models::User, repository_manager::RepositoryManager};

use crate::error::Error;

/// Resolves the acting user of a bulk action.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn get_user(&self, id: UserId) -> Result<User, Error>;
}

#[derive(Debug)]
pub struct DbUserDirectory {
    repository_manager: Arc<RepositoryManager>,
}

impl DbUserDirectory {
    pub fn new(repository_manager: Arc<RepositoryManager>) -> Self {
        Self { repository_manager }
    }
}

#[async_trait]
impl UserDirectory for DbUserDirectory {
    async fn get_user(&self, id: UserId) -> Result<User, Error> {
        Ok(self
            .repository_manager
            .get_user_repository()
            .get_user(id)
            .await?)
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    pub struct MockUserDirectory {
        users: Arc<Mutex<HashMap<UserId, User>>>,
    }

    impl MockUserDirectory {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn add_user(&self, id: UserId, username: &str, is_superuser: bool) -> User {
            let user = User {
                id,
                username: username.to_string(),
                is_active: true,
                is_superuser,
            };
            self.users.lock().unwrap().insert(id, user.clone());
            user
        }
    }

    #[async_trait]
    impl UserDirectory for MockUserDirectory {
        async fn get_user(&self, id: UserId) -> Result<User, Error> {
            self.users
                .lock()
                .unwrap()
                .get(&id)
                .cloned()
                .ok_or(Error::UserNotFound(id))
        }
    }
}
