use super::pipeline_step::{PipelineStep, StepAction};
use crate::error::Error;

/// Runs a series of steps in sequence over a shared context.
///
/// The context carries the request, the collaborators the steps need and everything the
/// steps produce, so each step can be tested on its own with a hand-built context.
pub struct Pipeline<T> {
    pub steps: Vec<Box<dyn PipelineStep<T>>>,
}

impl<T> Pipeline<T> {
    pub fn with_steps(steps: Vec<Box<dyn PipelineStep<T>>>) -> Self {
        Self { steps }
    }

    /// Executes the steps in order.
    ///
    /// Returns the error of the first step that returned `Abort`. Steps after an abort never run.
    pub async fn execute(&self, context: &mut T) -> Result<(), Error> {
        for step in &self.steps {
            if !step.should_execute(context) {
                tracing::debug!("Step {} will be skipped based on context", step.name());
                continue;
            }

            tracing::info!("Executing step: {}", step.name());

            match step.execute(context).await {
                StepAction::Continue => continue,
                StepAction::Abort(error) => {
                    tracing::error!("Step {} aborted the pipeline: {}", step.name(), error);
                    return Err(error);
                }
            }
        }

        Ok(())
    }
}
