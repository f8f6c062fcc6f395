use std::sync::Arc;

use crate::{
    bulk_unpublish::model::TransitionCounts,
    locale::{CHILD_PAGES_PLACEHOLDER, PARENT_PAGES_PLACEHOLDER, UnpublishMessages},
};

/// Renders the message shown after a bulk unpublish.
pub struct OutcomeReporter {
    messages: Arc<UnpublishMessages>,
}

impl OutcomeReporter {
    pub fn new(messages: Arc<UnpublishMessages>) -> Self {
        Self { messages }
    }

    /// Descendants are only mentioned when the cascade was requested and unpublished at
    /// least one of them. Each count is pluralized on its own.
    pub fn render(&self, counts: TransitionCounts, include_descendants: bool) -> String {
        let rule = self.messages.plural_rule;

        if include_descendants && counts.child_count > 0 {
            let parent_pages = self.messages.parent_pages.format(rule, counts.parent_count);
            let child_pages = self.messages.child_pages.format(rule, counts.child_count);
            self.messages
                .parent_and_child_unpublished
                .replace(PARENT_PAGES_PLACEHOLDER, &parent_pages)
                .replace(CHILD_PAGES_PLACEHOLDER, &child_pages)
        } else {
            self.messages
                .pages_unpublished
                .format(rule, counts.parent_count)
        }
    }
}

impl Default for OutcomeReporter {
    fn default() -> Self {
        Self::new(Arc::new(UnpublishMessages::english()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::{PluralForms, PluralRule};

    fn counts(parent_count: u64, child_count: u64) -> TransitionCounts {
        TransitionCounts {
            parent_count,
            child_count,
        }
    }

    #[test]
    fn test_parent_only_messages() {
        let reporter = OutcomeReporter::default();
        assert_eq!(
            reporter.render(counts(1, 0), false),
            "1 page has been unpublished"
        );
        assert_eq!(
            reporter.render(counts(3, 0), false),
            "3 pages have been unpublished"
        );
        assert_eq!(
            reporter.render(counts(0, 0), false),
            "0 pages have been unpublished"
        );
    }

    #[test]
    fn test_parent_and_child_message() {
        let reporter = OutcomeReporter::default();
        assert_eq!(
            reporter.render(counts(1, 2), true),
            "1 page and 2 child pages have been unpublished"
        );
        assert_eq!(
            reporter.render(counts(2, 1), true),
            "2 pages and 1 child page have been unpublished"
        );
    }

    #[test]
    fn test_cascade_without_children_uses_parent_only_message() {
        let reporter = OutcomeReporter::default();
        assert_eq!(
            reporter.render(counts(2, 0), true),
            "2 pages have been unpublished"
        );
    }

    #[test]
    fn test_children_ignored_when_cascade_not_requested() {
        let reporter = OutcomeReporter::default();
        assert_eq!(
            reporter.render(counts(1, 4), false),
            "1 page has been unpublished"
        );
    }

    #[test]
    fn test_plural_rule_of_messages_is_used() {
        let messages = UnpublishMessages {
            plural_rule: PluralRule::OneIncludesZero,
            pages_unpublished: PluralForms::new(
                "{count} page a été dépubliée",
                "{count} pages ont été dépubliées",
            ),
            parent_pages: PluralForms::new("{count} page", "{count} pages"),
            child_pages: PluralForms::new("{count} page enfant", "{count} pages enfants"),
            parent_and_child_unpublished: "{parent_pages} et {child_pages} ont été dépubliées"
                .to_string(),
        };
        let reporter = OutcomeReporter::new(Arc::new(messages));

        assert_eq!(
            reporter.render(counts(0, 0), false),
            "0 page a été dépubliée"
        );
        assert_eq!(
            reporter.render(counts(1, 3), true),
            "1 page et 3 pages enfants ont été dépubliées"
        );
    }
}
