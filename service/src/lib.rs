pub mod bulk_unpublish;
pub mod error;
pub mod locale;
pub mod node_ops;
pub mod permission;
pub mod pipeline;
pub mod user_ops;
