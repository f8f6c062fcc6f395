use std::sync::Arc;

use database::models::{Node, User};

use crate::{
    bulk_unpublish::model::{BulkActionContext, ConfirmationItem},
    error::Error,
    node_ops::NodeRepositoryOps,
    permission::PermissionOracle,
};

/// Prepares what the confirmation screen shows before a bulk unpublish. Never modifies nodes.
pub struct BulkActionContextBuilder {
    repository: Arc<dyn NodeRepositoryOps>,
    permission_oracle: Arc<dyn PermissionOracle>,
}

impl BulkActionContextBuilder {
    pub fn new(
        repository: Arc<dyn NodeRepositoryOps>,
        permission_oracle: Arc<dyn PermissionOracle>,
    ) -> Self {
        Self {
            repository,
            permission_oracle,
        }
    }

    /// Splits the selection by what `acting_user` may unpublish and counts the live
    /// descendants of every node that may be unpublished.
    ///
    /// Without an acting user every selected node is an item.
    pub async fn build(
        &self,
        selection: Vec<Node>,
        acting_user: Option<&User>,
    ) -> Result<BulkActionContext, Error> {
        let mut context = BulkActionContext::default();

        for node in selection {
            if let Some(user) = acting_user
                && !self.permission_oracle.can_unpublish(user, &node).await?
            {
                tracing::debug!("User {} may not unpublish node {}", user.id, node.id);
                context.items_with_no_access.push(node);
                continue;
            }

            let live_descendant_count = self.repository.count_live_descendants(&node).await?;
            context.has_live_descendants |= live_descendant_count > 0;
            context.items.push(ConfirmationItem {
                node,
                live_descendant_count,
            });
        }

        Ok(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{node_ops::mock::MockNodeRepository, permission::mock::MockPermissionOracle};

    fn editor() -> User {
        User {
            id: 3,
            username: "editor".to_string(),
            is_active: true,
            is_superuser: false,
        }
    }

    fn builder(
        repo: &MockNodeRepository,
        oracle: &MockPermissionOracle,
    ) -> BulkActionContextBuilder {
        BulkActionContextBuilder::new(Arc::new(repo.clone()), Arc::new(oracle.clone()))
    }

    #[async_std::test]
    async fn test_counts_live_descendants() {
        let repo = MockNodeRepository::new();
        let home = repo.add_root("Home");
        let blog = repo.add_child(home, "Blog");
        let post_1 = repo.add_child(blog, "Post 1");
        let post_2 = repo.add_child(blog, "Post 2");
        let _comment = repo.add_child(post_1, "Comment");
        let about = repo.add_child(home, "About");
        repo.set_live(post_2, false);
        let oracle = MockPermissionOracle::new();

        let context = builder(&repo, &oracle)
            .build(vec![repo.node(blog), repo.node(about)], None)
            .await
            .unwrap();

        assert_eq!(context.items.len(), 2);
        assert_eq!(context.items[0].node.id, blog);
        assert_eq!(context.items[0].live_descendant_count, 2);
        assert_eq!(context.items[1].node.id, about);
        assert_eq!(context.items[1].live_descendant_count, 0);
        assert!(context.has_live_descendants);
        assert!(context.items_with_no_access.is_empty());
        assert!(oracle.checked().is_empty());
    }

    #[async_std::test]
    async fn test_no_live_descendants() {
        let repo = MockNodeRepository::new();
        let home = repo.add_root("Home");
        let blog = repo.add_child(home, "Blog");
        let post = repo.add_child(blog, "Post");
        repo.set_live(post, false);
        let oracle = MockPermissionOracle::new();

        let context = builder(&repo, &oracle)
            .build(vec![repo.node(blog)], Some(&editor()))
            .await
            .unwrap();

        assert_eq!(context.items[0].live_descendant_count, 0);
        assert!(!context.has_live_descendants);
    }

    #[async_std::test]
    async fn test_nodes_without_access_are_separated() {
        let repo = MockNodeRepository::new();
        let home = repo.add_root("Home");
        let blog = repo.add_child(home, "Blog");
        let _post = repo.add_child(blog, "Post");
        let about = repo.add_child(home, "About");
        let oracle = MockPermissionOracle::new();
        oracle.deny(blog);

        let context = builder(&repo, &oracle)
            .build(vec![repo.node(blog), repo.node(about)], Some(&editor()))
            .await
            .unwrap();

        assert_eq!(context.items.len(), 1);
        assert_eq!(context.items[0].node.id, about);
        assert_eq!(context.items_with_no_access, vec![repo.node(blog)]);
        // blog has a live child but is not an item
        assert!(!context.has_live_descendants);
    }

    #[async_std::test]
    async fn test_deleted_node_has_zero_count() {
        let repo = MockNodeRepository::new();
        let home = repo.add_root("Home");
        let blog = repo.add_child(home, "Blog");
        let _post = repo.add_child(blog, "Post");
        let oracle = MockPermissionOracle::new();
        let stale = repo.node(blog);
        repo.remove_node(blog);

        let context = builder(&repo, &oracle)
            .build(vec![stale], None)
            .await
            .unwrap();

        assert_eq!(context.items[0].live_descendant_count, 0);
        assert!(!context.has_live_descendants);
    }

    #[async_std::test]
    async fn test_builder_does_not_modify_nodes() {
        let repo = MockNodeRepository::new();
        let home = repo.add_root("Home");
        let blog = repo.add_child(home, "Blog");
        let oracle = MockPermissionOracle::new();

        builder(&repo, &oracle)
            .build(vec![repo.node(blog)], Some(&editor()))
            .await
            .unwrap();

        assert!(repo.transitions().is_empty());
        assert!(repo.is_live(blog));
    }
}
