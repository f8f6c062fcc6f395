use std::sync::Arc;

use futures::TryStreamExt;

use crate::{
    bulk_unpublish::model::{ExecutionContext, TransitionCounts},
    error::Error,
    node_ops::NodeRepositoryOps,
};
use database::models::Node;

/// Unpublishes a set of nodes and, when requested, their live descendants.
///
/// Selected nodes are unpublished without a permission check; callers authorize them before
/// execution. Each descendant is checked on its own against the permission oracle when an
/// acting user is present, and descendants the user may not unpublish stay live.
///
/// The first failing transition aborts the run. Nodes unpublished before the failure stay
/// unpublished.
pub struct BulkUnpublishExecutor {
    repository: Arc<dyn NodeRepositoryOps>,
}

impl BulkUnpublishExecutor {
    pub fn new(repository: Arc<dyn NodeRepositoryOps>) -> Self {
        Self { repository }
    }

    pub async fn execute(
        &self,
        roots: &[Node],
        ctx: &ExecutionContext,
    ) -> Result<TransitionCounts, Error> {
        let mut counts = TransitionCounts::default();
        let actor = ctx.acting_user.as_ref().map(|user| user.id);

        for root in roots {
            self.repository.set_unpublished(root, actor).await?;
            counts.parent_count += 1;
            tracing::debug!("Unpublished selected node {}", root.id);

            if ctx.include_descendants {
                counts.child_count += self.unpublish_descendants(root, ctx).await?;
            }
        }

        tracing::info!(
            "Unpublished {} selected nodes and {} descendants",
            counts.parent_count,
            counts.child_count
        );
        Ok(counts)
    }

    async fn unpublish_descendants(
        &self,
        root: &Node,
        ctx: &ExecutionContext,
    ) -> Result<u64, Error> {
        let mut unpublished = 0;
        let mut descendants = self.repository.live_descendants(root);

        while let Some(descendant) = descendants.try_next().await? {
            let allowed = match &ctx.acting_user {
                Some(user) => {
                    ctx.permission_oracle
                        .can_unpublish(user, &descendant)
                        .await?
                }
                None => true,
            };
            if !allowed {
                tracing::debug!(
                    "Skipping descendant {} of node {}, not permitted",
                    descendant.id,
                    root.id
                );
                continue;
            }
            if self.repository.set_unpublished(&descendant, None).await? {
                unpublished += 1;
                tracing::debug!("Unpublished descendant {} of node {}", descendant.id, root.id);
            }
        }

        Ok(unpublished)
    }
}
