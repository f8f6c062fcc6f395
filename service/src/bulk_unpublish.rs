//! Bulk unpublish of selected nodes, optionally cascading to their live descendants.
//!
//! [`service::BulkUnpublishService`] is the entry point. It prepares the confirmation context
//! with [`confirmation::BulkActionContextBuilder`] and runs the unpublish pipeline, whose core
//! is [`executor::BulkUnpublishExecutor`] followed by [`reporter::OutcomeReporter`].

pub mod confirmation;
pub mod context;
pub mod executor;
pub mod model;
pub mod pipeline;
pub mod reporter;
pub mod service;
pub mod steps;
