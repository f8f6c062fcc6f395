use crate::{
    bulk_unpublish::{
        context::UnpublishContext, executor::BulkUnpublishExecutor, model::dedupe_node_ids,
        reporter::OutcomeReporter,
    },
    error::Error,
    pipeline::pipeline_step::{PipelineStep, StepAction},
};

/// Step 1: Reject an empty selection
pub struct ValidateSelectionStep;

#[async_trait::async_trait]
impl PipelineStep<UnpublishContext> for ValidateSelectionStep {
    fn name(&self) -> &'static str {
        "validate_selection"
    }

    async fn execute(&self, context: &mut UnpublishContext) -> StepAction {
        if context.request.selected_node_ids.is_empty() {
            tracing::warn!("Bulk unpublish requested without selected nodes");
            return StepAction::Abort(Error::InvalidInput("No nodes selected".to_string()));
        }
        StepAction::Continue
    }
}

/// Step 2: Load the acting user, if one was given
pub struct ResolveActingUserStep;

#[async_trait::async_trait]
impl PipelineStep<UnpublishContext> for ResolveActingUserStep {
    fn name(&self) -> &'static str {
        "resolve_acting_user"
    }

    fn should_execute(&self, context: &UnpublishContext) -> bool {
        context.request.acting_user_id.is_some()
    }

    async fn execute(&self, context: &mut UnpublishContext) -> StepAction {
        let Some(user_id) = context.request.acting_user_id else {
            return StepAction::Continue;
        };

        match context.user_directory.get_user(user_id).await {
            Ok(user) => {
                tracing::info!("Acting user is {} ({})", user.username, user.id);
                context.acting_user = Some(user);
                StepAction::Continue
            }
            Err(e) => {
                tracing::error!("Failed to load acting user {}: {}", user_id, e);
                StepAction::Abort(e)
            }
        }
    }
}

/// Step 3: Fetch the selected nodes, ignoring repeated ids
pub struct FetchSelectedNodesStep;

#[async_trait::async_trait]
impl PipelineStep<UnpublishContext> for FetchSelectedNodesStep {
    fn name(&self) -> &'static str {
        "fetch_selected_nodes"
    }

    async fn execute(&self, context: &mut UnpublishContext) -> StepAction {
        let node_ids = dedupe_node_ids(&context.request.selected_node_ids);
        let mut nodes = Vec::with_capacity(node_ids.len());

        for node_id in node_ids {
            match context.node_ops.get_node(node_id).await {
                Ok(node) => nodes.push(node),
                Err(e) => {
                    tracing::error!("Failed to fetch selected node {}: {}", node_id, e);
                    return StepAction::Abort(e);
                }
            }
        }

        tracing::info!("Fetched {} selected nodes", nodes.len());
        context.root_nodes = nodes;
        StepAction::Continue
    }
}

/// Step 4: Leave out selected nodes the acting user may not unpublish
pub struct AuthorizeSelectionStep;

#[async_trait::async_trait]
impl PipelineStep<UnpublishContext> for AuthorizeSelectionStep {
    fn name(&self) -> &'static str {
        "authorize_selection"
    }

    fn should_execute(&self, context: &UnpublishContext) -> bool {
        context.acting_user.is_some()
    }

    async fn execute(&self, context: &mut UnpublishContext) -> StepAction {
        let Some(user) = context.acting_user.clone() else {
            return StepAction::Continue;
        };

        let candidates = std::mem::take(&mut context.root_nodes);
        for node in candidates {
            match context.permission_oracle.can_unpublish(&user, &node).await {
                Ok(true) => context.root_nodes.push(node),
                Ok(false) => {
                    tracing::info!(
                        "User {} may not unpublish node {}, skipping it",
                        user.id,
                        node.id
                    );
                    context.skipped_nodes.push(node);
                }
                Err(e) => {
                    tracing::error!("Permission check for node {} failed: {}", node.id, e);
                    return StepAction::Abort(e);
                }
            }
        }

        StepAction::Continue
    }
}

/// Step 5: Unpublish the authorized nodes and, if requested, their descendants
pub struct UnpublishNodesStep;

#[async_trait::async_trait]
impl PipelineStep<UnpublishContext> for UnpublishNodesStep {
    fn name(&self) -> &'static str {
        "unpublish_nodes"
    }

    async fn execute(&self, context: &mut UnpublishContext) -> StepAction {
        let executor = BulkUnpublishExecutor::new(context.node_ops.clone());
        let execution_context = context.execution_context();

        match executor
            .execute(&context.root_nodes, &execution_context)
            .await
        {
            Ok(counts) => {
                context.counts = counts;
                StepAction::Continue
            }
            Err(e) => {
                tracing::error!("Bulk unpublish failed: {}", e);
                StepAction::Abort(e)
            }
        }
    }
}

/// Step 6: Render the outcome message
pub struct RenderOutcomeStep;

#[async_trait::async_trait]
impl PipelineStep<UnpublishContext> for RenderOutcomeStep {
    fn name(&self) -> &'static str {
        "render_outcome"
    }

    async fn execute(&self, context: &mut UnpublishContext) -> StepAction {
        let reporter = OutcomeReporter::new(context.messages.clone());
        context.message = reporter.render(context.counts, context.request.include_descendants);
        StepAction::Continue
    }
}
