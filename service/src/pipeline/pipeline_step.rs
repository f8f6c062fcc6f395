use crate::error::Error;

/// Outcome of a single step.
#[derive(Debug, Clone, PartialEq)]
pub enum StepAction {
    Continue,
    /// Stops the pipeline. No later step runs and the error is returned to the caller.
    Abort(Error),
}

/// A single stage of a bulk action.
///
/// A step reads its inputs from the context, stores what it produced back into it and
/// returns a [`StepAction`] telling the pipeline how to proceed.
///
/// # Example
///
/// ```ignore
/// struct ValidateSelectionStep;
///
/// #[async_trait::async_trait]
/// impl PipelineStep<UnpublishContext> for ValidateSelectionStep {
///     fn name(&self) -> &'static str {
///         "validate_selection"
///     }
///
///     async fn execute(&self, context: &mut UnpublishContext) -> StepAction {
///         if context.request.selected_node_ids.is_empty() {
///             return StepAction::Abort(Error::InvalidInput("No nodes selected".into()));
///         }
///         StepAction::Continue
///     }
/// }
/// ```
#[async_trait::async_trait]
pub trait PipelineStep<T>: Send + Sync {
    /// Returns the name of this step for logging.
    fn name(&self) -> &'static str;

    /// Called before `execute()`. Returning `false` skips only this step.
    fn should_execute(&self, _context: &T) -> bool {
        true
    }

    async fn execute(&self, context: &mut T) -> StepAction;
}
