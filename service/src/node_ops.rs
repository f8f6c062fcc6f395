//! Node repository abstraction.
//!
//! Services reach node storage only through [`NodeRepositoryOps`], so the bulk action can be
//! driven by the SQLite repository in production and by [`mock::MockNodeRepository`] in tests.
//!
//! # Usage in Production
//!
//! ```rust,ignore
//! use service::node_ops::DbNodeRepositoryOps;
//!
//! let node_ops = Arc::new(DbNodeRepositoryOps::new(repository_manager));
//! ```
//!
//! # Usage in Tests
//!
//! ```rust,ignore
//! use service::node_ops::mock::MockNodeRepository;
//!
//! let repo = MockNodeRepository::new();
//! let home = repo.add_root("Home");
//! let about = repo.add_child(home, "About");
//!
//! // run the executor...
//!
//! assert!(!repo.is_live(about));
//! ```

use std::{collections::VecDeque, sync::Arc};

use async_trait::async_trait;
use core_types::{NodeId, UserId};
use database::{models::Node, repository_manager::RepositoryManager};
use futures::{
    StreamExt,
    stream::{self, BoxStream},
};

use crate::error::Error;

pub const DEFAULT_DESCENDANT_PAGE_SIZE: i64 = 100;

#[async_trait]
pub trait NodeRepositoryOps: Send + Sync {
    async fn get_node(&self, id: NodeId) -> Result<Node, Error>;

    /// Live descendants of `node` in pre-order.
    ///
    /// The stream is consumed incrementally and never holds the whole subtree in memory.
    /// Node state is read while the stream is being pulled, but an implementation may read a
    /// batch of descendants at once, so a yielded node can already have been unpublished by
    /// the time it is handled. [`NodeRepositoryOps::set_unpublished`] reports that case.
    fn live_descendants<'a>(&'a self, node: &Node) -> BoxStream<'a, Result<Node, Error>>;

    /// Counts live descendants. Nodes that no longer exist have none.
    async fn count_live_descendants(&self, node: &Node) -> Result<u64, Error>;

    /// Moves `node` to the unpublished state, attributing the change to `actor`.
    ///
    /// Returns whether the state actually changed. A node that is already unpublished is left
    /// as is. Fails with `NodeNotFound` when the node no longer exists and with
    /// `TransitionConflict` when storage rejects the write.
    async fn set_unpublished(&self, node: &Node, actor: Option<UserId>) -> Result<bool, Error>;
}

/// SQLite backed implementation. Descendants are fetched one page at a time using the tree
/// path of the last node seen as the cursor, so node state is as fresh as the page it came in.
#[derive(Debug)]
pub struct DbNodeRepositoryOps {
    repository_manager: Arc<RepositoryManager>,
    page_size: i64,
}

impl DbNodeRepositoryOps {
    pub fn new(repository_manager: Arc<RepositoryManager>) -> Self {
        Self::with_page_size(repository_manager, DEFAULT_DESCENDANT_PAGE_SIZE)
    }

    pub fn with_page_size(repository_manager: Arc<RepositoryManager>, page_size: i64) -> Self {
        Self {
            repository_manager,
            page_size: page_size.max(1),
        }
    }
}

struct DescendantCursor {
    ancestor_path: String,
    after_path: String,
    buffer: VecDeque<Node>,
    exhausted: bool,
}

#[async_trait]
impl NodeRepositoryOps for DbNodeRepositoryOps {
    async fn get_node(&self, id: NodeId) -> Result<Node, Error> {
        Ok(self
            .repository_manager
            .get_node_repository()
            .get_node(id)
            .await?)
    }

    fn live_descendants<'a>(&'a self, node: &Node) -> BoxStream<'a, Result<Node, Error>> {
        let cursor = DescendantCursor {
            ancestor_path: node.path.clone(),
            after_path: node.path.clone(),
            buffer: VecDeque::new(),
            exhausted: false,
        };

        stream::try_unfold(cursor, move |mut cursor| async move {
            if cursor.buffer.is_empty() && !cursor.exhausted {
                let page = self
                    .repository_manager
                    .get_node_repository()
                    .get_live_descendants_page(
                        &cursor.ancestor_path,
                        &cursor.after_path,
                        self.page_size,
                    )
                    .await?;
                tracing::debug!(
                    "Fetched {} live descendants of path {} after {}",
                    page.len(),
                    cursor.ancestor_path,
                    cursor.after_path
                );
                cursor.exhausted = (page.len() as i64) < self.page_size;
                if let Some(last) = page.last() {
                    cursor.after_path = last.path.clone();
                }
                cursor.buffer.extend(page);
            }
            Ok::<_, Error>(cursor.buffer.pop_front().map(|node| (node, cursor)))
        })
        .boxed()
    }

    async fn count_live_descendants(&self, node: &Node) -> Result<u64, Error> {
        let count = self
            .repository_manager
            .get_node_repository()
            .count_live_descendants(node.id)
            .await?;
        Ok(count.max(0) as u64)
    }

    async fn set_unpublished(&self, node: &Node, actor: Option<UserId>) -> Result<bool, Error> {
        let changed = self
            .repository_manager
            .get_node_repository()
            .set_unpublished(node.id, actor)
            .await?;
        if !changed {
            tracing::debug!("Node {} was already unpublished", node.id);
        }
        Ok(changed)
    }
}
