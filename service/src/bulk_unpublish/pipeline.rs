use crate::{
    bulk_unpublish::{
        context::UnpublishContext,
        steps::{
            AuthorizeSelectionStep, FetchSelectedNodesStep, RenderOutcomeStep,
            ResolveActingUserStep, UnpublishNodesStep, ValidateSelectionStep,
        },
    },
    pipeline::Pipeline,
};

impl Pipeline<UnpublishContext> {
    pub fn new() -> Self {
        Self::with_steps(vec![
            Box::new(ValidateSelectionStep),
            Box::new(ResolveActingUserStep),
            Box::new(FetchSelectedNodesStep),
            Box::new(AuthorizeSelectionStep),
            Box::new(UnpublishNodesStep),
            Box::new(RenderOutcomeStep),
        ])
    }
}

impl Default for Pipeline<UnpublishContext> {
    fn default() -> Self {
        Self::new()
    }
}
