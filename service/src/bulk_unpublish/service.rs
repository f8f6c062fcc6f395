use std::sync::Arc;

use core_types::{NodeId, UserId};
use database::repository_manager::RepositoryManager;

use crate::{
    bulk_unpublish::{
        confirmation::BulkActionContextBuilder,
        context::UnpublishContext,
        model::{BulkActionContext, UnpublishOutcome, UnpublishRequest, dedupe_node_ids},
    },
    error::Error,
    locale::UnpublishMessages,
    node_ops::{DbNodeRepositoryOps, NodeRepositoryOps},
    permission::{NodePermissionPolicy, PermissionOracle},
    pipeline::Pipeline,
    user_ops::{DbUserDirectory, UserDirectory},
};

pub struct BulkUnpublishService {
    node_ops: Arc<dyn NodeRepositoryOps>,
    user_directory: Arc<dyn UserDirectory>,
    permission_oracle: Arc<dyn PermissionOracle>,
    messages: Arc<UnpublishMessages>,
}

impl BulkUnpublishService {
    /// Service backed by the database, with English messages.
    pub fn new(repository_manager: Arc<RepositoryManager>) -> Self {
        Self::new_with_ops(
            Arc::new(DbNodeRepositoryOps::new(repository_manager.clone())),
            Arc::new(DbUserDirectory::new(repository_manager.clone())),
            Arc::new(NodePermissionPolicy::new(repository_manager)),
        )
    }

    pub fn new_with_ops(
        node_ops: Arc<dyn NodeRepositoryOps>,
        user_directory: Arc<dyn UserDirectory>,
        permission_oracle: Arc<dyn PermissionOracle>,
    ) -> Self {
        Self {
            node_ops,
            user_directory,
            permission_oracle,
            messages: Arc::new(UnpublishMessages::english()),
        }
    }

    pub fn with_messages(mut self, messages: UnpublishMessages) -> Self {
        self.messages = Arc::new(messages);
        self
    }

    /// Builds the context shown to the user before confirming the bulk action.
    ///
    /// Selected ids that no longer exist are left out of the context.
    pub async fn prepare_confirmation(
        &self,
        node_ids: &[NodeId],
        acting_user_id: Option<UserId>,
    ) -> Result<BulkActionContext, Error> {
        if node_ids.is_empty() {
            return Err(Error::InvalidInput("No nodes selected".to_string()));
        }

        let acting_user = match acting_user_id {
            Some(user_id) => Some(self.user_directory.get_user(user_id).await?),
            None => None,
        };

        let mut selection = Vec::new();
        for node_id in dedupe_node_ids(node_ids) {
            match self.node_ops.get_node(node_id).await {
                Ok(node) => selection.push(node),
                Err(Error::NodeNotFound(_)) => {
                    tracing::debug!("Selected node {} no longer exists, leaving it out", node_id);
                }
                Err(e) => return Err(e),
            }
        }

        let builder =
            BulkActionContextBuilder::new(self.node_ops.clone(), self.permission_oracle.clone());
        let context = builder.build(selection, acting_user.as_ref()).await?;

        tracing::info!(
            items = context.items.len(),
            items_with_no_access = context.items_with_no_access.len(),
            has_live_descendants = context.has_live_descendants,
            "Prepared bulk unpublish confirmation"
        );
        Ok(context)
    }

    /// Unpublishes the selected nodes the acting user may unpublish, and their live
    /// descendants when `include_descendants` is set.
    pub async fn unpublish(&self, request: UnpublishRequest) -> Result<UnpublishOutcome, Error> {
        let mut context = UnpublishContext::new(
            request,
            self.node_ops.clone(),
            self.user_directory.clone(),
            self.permission_oracle.clone(),
            self.messages.clone(),
        );

        let pipeline = Pipeline::<UnpublishContext>::new();
        pipeline.execute(&mut context).await?;

        tracing::info!(
            parent_count = context.counts.parent_count,
            child_count = context.counts.child_count,
            skipped = context.skipped_nodes.len(),
            "Bulk unpublish complete"
        );

        Ok(UnpublishOutcome {
            parent_count: context.counts.parent_count,
            child_count: context.counts.child_count,
            message: context.message,
            skipped_node_ids: context.skipped_nodes.iter().map(|node| node.id).collect(),
        })
    }
}
