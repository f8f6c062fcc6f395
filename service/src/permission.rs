//! Unpublish authorization.
//!
//! The bulk action asks a [`PermissionOracle`] whether the acting user may unpublish a node.
//! The oracle is consulted for every selected node before execution and for every descendant
//! reached by a cascade. Implementations must not modify any state.

use std::sync::Arc;

use async_trait::async_trait;
use core_types::permission_type::PermissionType;
use database::{
    models::{Node, User},
    repository_manager::RepositoryManager,
};

use crate::error::Error;

#[async_trait]
pub trait PermissionOracle: Send + Sync {
    /// A storage failure while answering is returned as an error, never as a denial.
    async fn can_unpublish(&self, user: &User, node: &Node) -> Result<bool, Error>;
}

/// Permission policy backed by the node permission grants stored in the database.
///
/// A user may unpublish a node when all of the following hold:
/// - the user is active
/// - the node is live and is not a tree root
/// - the node is not locked by another user
/// - the user is a superuser, or holds the `publish` permission on the node or an ancestor
#[derive(Debug)]
pub struct NodePermissionPolicy {
    repository_manager: Arc<RepositoryManager>,
}

impl NodePermissionPolicy {
    pub fn new(repository_manager: Arc<RepositoryManager>) -> Self {
        Self { repository_manager }
    }
}

#[async_trait]
impl PermissionOracle for NodePermissionPolicy {
    async fn can_unpublish(&self, user: &User, node: &Node) -> Result<bool, Error> {
        if !user.is_active {
            return Ok(false);
        }
        if !node.live || node.is_tree_root() {
            return Ok(false);
        }
        if node.is_locked_for(user.id) {
            tracing::debug!(
                "Node {} is locked by user {:?}, user {} may not unpublish it",
                node.id,
                node.locked_by,
                user.id
            );
            return Ok(false);
        }
        if user.is_superuser {
            return Ok(true);
        }
        Ok(self
            .repository_manager
            .get_user_repository()
            .has_permission_on_path(user.id, PermissionType::Publish, &node.path)
            .await?)
    }
}


#[cfg(test)]
mod tests {
    use database::setup_test_db;

    use super::*;

    struct TestSetup {
        repository_manager: Arc<RepositoryManager>,
        policy: NodePermissionPolicy,
        home: Node,
        blog: Node,
        post: Node,
        events: Node,
    }

    // home
    // ├── blog
    // │   └── post
    // └── events
    async fn prepare_test() -> TestSetup {
        let pool = Arc::new(setup_test_db().await);
        let repository_manager = Arc::new(RepositoryManager::new(pool));
        let repo = repository_manager.get_node_repository();
        let home = repo.add_root("Home").await.unwrap();
        let blog = repo.add_child(home, "Blog").await.unwrap();
        let post = repo.add_child(blog, "Post").await.unwrap();
        let events = repo.add_child(home, "Events").await.unwrap();

        TestSetup {
            policy: NodePermissionPolicy::new(repository_manager.clone()),
            home: repo.get_node(home).await.unwrap(),
            blog: repo.get_node(blog).await.unwrap(),
            post: repo.get_node(post).await.unwrap(),
            events: repo.get_node(events).await.unwrap(),
            repository_manager,
        }
    }

    async fn add_user(setup: &TestSetup, username: &str, is_superuser: bool) -> User {
        let users = setup.repository_manager.get_user_repository();
        let id = users.add_user(username, is_superuser).await.unwrap();
        users.get_user(id).await.unwrap()
    }

    #[async_std::test]
    async fn test_publish_grant_covers_subtree() {
        let setup = prepare_test().await;
        let editor = add_user(&setup, "editor", false).await;
        setup
            .repository_manager
            .get_user_repository()
            .grant_permission(editor.id, setup.blog.id, PermissionType::Publish)
            .await
            .unwrap();

        let policy = &setup.policy;
        assert!(policy.can_unpublish(&editor, &setup.blog).await.unwrap());
        assert!(policy.can_unpublish(&editor, &setup.post).await.unwrap());
        assert!(!policy.can_unpublish(&editor, &setup.events).await.unwrap());
    }

    #[async_std::test]
    async fn test_edit_grant_is_not_enough() {
        let setup = prepare_test().await;
        let editor = add_user(&setup, "editor", false).await;
        setup
            .repository_manager
            .get_user_repository()
            .grant_permission(editor.id, setup.events.id, PermissionType::Edit)
            .await
            .unwrap();

        assert!(
            !setup
                .policy
                .can_unpublish(&editor, &setup.events)
                .await
                .unwrap()
        );
    }

    #[async_std::test]
    async fn test_superuser_may_unpublish_anything_but_tree_root() {
        let setup = prepare_test().await;
        let admin = add_user(&setup, "admin", true).await;

        let policy = &setup.policy;
        assert!(policy.can_unpublish(&admin, &setup.post).await.unwrap());
        assert!(policy.can_unpublish(&admin, &setup.events).await.unwrap());
        assert!(!policy.can_unpublish(&admin, &setup.home).await.unwrap());
    }

    #[async_std::test]
    async fn test_inactive_user_may_not_unpublish() {
        let setup = prepare_test().await;
        let admin = add_user(&setup, "admin", true).await;
        setup
            .repository_manager
            .get_user_repository()
            .set_active(admin.id, false)
            .await
            .unwrap();
        let admin = setup
            .repository_manager
            .get_user_repository()
            .get_user(admin.id)
            .await
            .unwrap();

        assert!(!setup.policy.can_unpublish(&admin, &setup.post).await.unwrap());
    }

    #[async_std::test]
    async fn test_unpublished_node_may_not_be_unpublished() {
        let setup = prepare_test().await;
        let admin = add_user(&setup, "admin", true).await;
        let repo = setup.repository_manager.get_node_repository();
        repo.set_unpublished(setup.post.id, None).await.unwrap();
        let post = repo.get_node(setup.post.id).await.unwrap();

        assert!(!setup.policy.can_unpublish(&admin, &post).await.unwrap());
    }

    #[async_std::test]
    async fn test_lock_held_by_other_user_blocks_unpublish() {
        let setup = prepare_test().await;
        let admin = add_user(&setup, "admin", true).await;
        let editor = add_user(&setup, "editor", false).await;
        setup
            .repository_manager
            .get_user_repository()
            .grant_permission(editor.id, setup.blog.id, PermissionType::Publish)
            .await
            .unwrap();

        let repo = setup.repository_manager.get_node_repository();
        repo.lock_node(setup.post.id, editor.id).await.unwrap();
        let post = repo.get_node(setup.post.id).await.unwrap();

        assert!(!setup.policy.can_unpublish(&admin, &post).await.unwrap());
        assert!(setup.policy.can_unpublish(&editor, &post).await.unwrap());
    }
}
