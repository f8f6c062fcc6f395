use std::{collections::HashSet, sync::Arc};

use core_types::{NodeId, UserId};
use database::models::{Node, User};

use crate::permission::PermissionOracle;

/// Number of nodes moved to unpublished during one execution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransitionCounts {
    /// Selected nodes
    pub parent_count: u64,
    /// Descendants unpublished by the cascade
    pub child_count: u64,
}

/// Fixed inputs of one executor run.
#[derive(Clone)]
pub struct ExecutionContext {
    /// When absent, descendants are unpublished without a permission check
    pub acting_user: Option<User>,
    pub include_descendants: bool,
    pub permission_oracle: Arc<dyn PermissionOracle>,
}

/// A selected node as shown on the confirmation screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmationItem {
    pub node: Node,
    pub live_descendant_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkActionContext {
    /// Nodes the acting user may unpublish
    pub items: Vec<ConfirmationItem>,
    pub items_with_no_access: Vec<Node>,
    /// Whether the confirmation screen should offer to include descendants
    pub has_live_descendants: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnpublishRequest {
    pub selected_node_ids: Vec<NodeId>,
    pub include_descendants: bool,
    pub acting_user_id: Option<UserId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnpublishOutcome {
    pub parent_count: u64,
    pub child_count: u64,
    pub message: String,
    /// Selected nodes left untouched because the acting user may not unpublish them
    pub skipped_node_ids: Vec<NodeId>,
}

/// Removes repeated ids, keeping the first occurrence of each.
pub fn dedupe_node_ids(ids: &[NodeId]) -> Vec<NodeId> {
    let mut seen = HashSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}
