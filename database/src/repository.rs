pub mod node_log_repository;
pub mod node_repository;
pub mod user_repository;
