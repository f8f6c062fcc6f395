use std::sync::Arc;

use database::models::{Node, User};

use crate::{
    bulk_unpublish::model::{ExecutionContext, TransitionCounts, UnpublishRequest},
    locale::UnpublishMessages,
    node_ops::NodeRepositoryOps,
    permission::PermissionOracle,
    user_ops::UserDirectory,
};

/// Context object that flows through the unpublish pipeline, accumulating state
pub struct UnpublishContext {
    pub request: UnpublishRequest,
    pub node_ops: Arc<dyn NodeRepositoryOps>,
    pub user_directory: Arc<dyn UserDirectory>,
    pub permission_oracle: Arc<dyn PermissionOracle>,
    pub messages: Arc<UnpublishMessages>,

    // Accumulated state as pipeline progresses
    pub acting_user: Option<User>,
    /// Selected nodes that will be unpublished, in selection order
    pub root_nodes: Vec<Node>,
    /// Selected nodes the acting user may not unpublish
    pub skipped_nodes: Vec<Node>,
    pub counts: TransitionCounts,
    pub message: String,
}

impl UnpublishContext {
    pub fn new(
        request: UnpublishRequest,
        node_ops: Arc<dyn NodeRepositoryOps>,
        user_directory: Arc<dyn UserDirectory>,
        permission_oracle: Arc<dyn PermissionOracle>,
        messages: Arc<UnpublishMessages>,
    ) -> Self {
        Self {
            request,
            node_ops,
            user_directory,
            permission_oracle,
            messages,
            acting_user: None,
            root_nodes: Vec::new(),
            skipped_nodes: Vec::new(),
            counts: TransitionCounts::default(),
            message: String::new(),
        }
    }

    pub fn execution_context(&self) -> ExecutionContext {
        ExecutionContext {
            acting_user: self.acting_user.clone(),
            include_descendants: self.request.include_descendants,
            permission_oracle: self.permission_oracle.clone(),
        }
    }
}
