mod logging;

use std::{path::PathBuf, sync::Arc};

use async_std::task;
use clap::{Parser, Subcommand};
use core_types::{NodeId, UserId};
use database::{get_db_pool, repository_manager::RepositoryManager};
use service::{
    bulk_unpublish::{model::UnpublishRequest, service::BulkUnpublishService},
    locale::UnpublishMessages,
    node_ops::{DEFAULT_DESCENDANT_PAGE_SIZE, DbNodeRepositoryOps},
    permission::NodePermissionPolicy,
    user_ops::DbUserDirectory,
};

#[derive(Parser, Debug)]
#[command(about = "Unpublish content nodes in bulk")]
struct Cli {
    /// Number of descendants fetched from the database at a time
    #[arg(long, global = true, default_value_t = DEFAULT_DESCENDANT_PAGE_SIZE)]
    page_size: i64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show what a bulk unpublish of the given nodes would affect
    Confirm {
        #[arg(required = true)]
        node_ids: Vec<NodeId>,

        /// Id of the user performing the action
        #[arg(long)]
        user: Option<UserId>,
    },
    /// Unpublish the given nodes
    Unpublish {
        #[arg(required = true)]
        node_ids: Vec<NodeId>,

        /// Also unpublish all live descendants of the given nodes
        #[arg(long)]
        include_descendants: bool,

        /// Id of the user performing the action
        #[arg(long)]
        user: Option<UserId>,

        /// JSON file with translated outcome messages
        #[arg(long)]
        locale_file: Option<PathBuf>,
    },
    /// List unpublish audit entries in the order they were recorded
    Log {
        #[arg(long, default_value_t = 20)]
        limit: i64,

        #[arg(long, default_value_t = 0)]
        offset: i64,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _log_guard = logging::init_logging();
    let args = Cli::parse();

    task::block_on(async {
        if let Err(e) = run(args).await {
            tracing::error!("Operation failed: {}", e);
            eprintln!("Operation failed: {}", e);
            return Err(e);
        }
        Ok(())
    })
}

async fn run(args: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let pool = get_db_pool().await?;
    let repository_manager = Arc::new(RepositoryManager::new(pool));
    match args.command {
        Command::Confirm { node_ids, user } => {
            let service = build_service(repository_manager, args.page_size);
            let context = service.prepare_confirmation(&node_ids, user).await?;
            for item in &context.items {
                println!(
                    "{}\t{}\t{}\t{} live descendants",
                    item.node.id,
                    item.node.title,
                    item.node.publication_state(),
                    item.live_descendant_count
                );
            }
            for node in &context.items_with_no_access {
                println!("{}\t{}\tno permission to unpublish", node.id, node.title);
            }
            if context.has_live_descendants {
                println!("Use --include-descendants to also unpublish live descendants");
            }
        }
        Command::Unpublish {
            node_ids,
            include_descendants,
            user,
            locale_file,
        } => {
            let messages = match locale_file {
                Some(path) => UnpublishMessages::from_file(&path)?,
                None => UnpublishMessages::english(),
            };
            let outcome = build_service(repository_manager, args.page_size)
                .with_messages(messages)
                .unpublish(UnpublishRequest {
                    selected_node_ids: node_ids,
                    include_descendants,
                    acting_user_id: user,
                })
                .await?;

            println!("{}", outcome.message);
            if !outcome.skipped_node_ids.is_empty() {
                let skipped: Vec<String> = outcome
                    .skipped_node_ids
                    .iter()
                    .map(|id| id.to_string())
                    .collect();
                println!("Skipped without permission: {}", skipped.join(", "));
            }
        }
        Command::Log { limit, offset } => {
            let entries = repository_manager
                .get_node_log_repository()
                .get_entries(limit, offset)
                .await?;
            for entry in entries {
                let user = entry
                    .user_id
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{}\t{}\tnode {}\tuser {}",
                    entry.created_at.to_rfc3339(),
                    entry.action,
                    entry.node_id,
                    user
                );
            }
        }
    }

    Ok(())
}

fn build_service(
    repository_manager: Arc<RepositoryManager>,
    page_size: i64,
) -> BulkUnpublishService {
    BulkUnpublishService::new_with_ops(
        Arc::new(DbNodeRepositoryOps::with_page_size(
            repository_manager.clone(),
            page_size,
        )),
        Arc::new(DbUserDirectory::new(repository_manager.clone())),
        Arc::new(NodePermissionPolicy::new(repository_manager)),
    )
}
