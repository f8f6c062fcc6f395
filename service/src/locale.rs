//! Translatable texts of the unpublish outcome message.
//!
//! Messages are plain data so callers can ship them as JSON next to the binary. A message
//! file looks like this:
//!
//! ```json
//! {
//!     "plural_rule": "one_includes_zero",
//!     "pages_unpublished": {
//!         "one": "{count} page a été dépubliée",
//!         "other": "{count} pages ont été dépubliées"
//!     },
//!     "parent_pages": { "one": "{count} page", "other": "{count} pages" },
//!     "child_pages": { "one": "{count} page enfant", "other": "{count} pages enfants" },
//!     "parent_and_child_unpublished": "{parent_pages} et {child_pages} ont été dépubliées"
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;

pub const COUNT_PLACEHOLDER: &str = "{count}";
pub const PARENT_PAGES_PLACEHOLDER: &str = "{parent_pages}";
pub const CHILD_PAGES_PLACEHOLDER: &str = "{child_pages}";

/// Selects between the singular and the plural form of a message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PluralRule {
    /// Singular only for exactly one (English, German)
    #[default]
    OneOther,
    /// Singular for zero and one (French)
    OneIncludesZero,
    /// No plural distinction, always uses the `other` form
    Invariant,
}

impl PluralRule {
    pub fn is_singular(&self, count: u64) -> bool {
        match self {
            PluralRule::OneOther => count == 1,
            PluralRule::OneIncludesZero => count <= 1,
            PluralRule::Invariant => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluralForms {
    pub one: String,
    pub other: String,
}

impl PluralForms {
    pub fn new(one: &str, other: &str) -> Self {
        Self {
            one: one.to_string(),
            other: other.to_string(),
        }
    }

    pub fn format(&self, rule: PluralRule, count: u64) -> String {
        let template = if rule.is_singular(count) {
            &self.one
        } else {
            &self.other
        };
        template.replace(COUNT_PLACEHOLDER, &count.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnpublishMessages {
    #[serde(default)]
    pub plural_rule: PluralRule,
    /// Message used when no child pages were unpublished
    pub pages_unpublished: PluralForms,
    pub parent_pages: PluralForms,
    pub child_pages: PluralForms,
    /// Combines the rendered `parent_pages` and `child_pages` fragments
    pub parent_and_child_unpublished: String,
}

impl UnpublishMessages {
    pub fn english() -> Self {
        Self {
            plural_rule: PluralRule::OneOther,
            pages_unpublished: PluralForms::new(
                "{count} page has been unpublished",
                "{count} pages have been unpublished",
            ),
            parent_pages: PluralForms::new("{count} page", "{count} pages"),
            child_pages: PluralForms::new("{count} child page", "{count} child pages"),
            parent_and_child_unpublished: "{parent_pages} and {child_pages} have been unpublished"
                .to_string(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        let messages: UnpublishMessages = serde_json::from_str(json)?;
        messages.validate()?;
        Ok(messages)
    }

    pub fn from_file(path: &Path) -> Result<Self, Error> {
        tracing::info!("Loading unpublish messages from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Checks that the plural forms show their count and that the combined message has a
    /// slot for both fragments.
    pub fn validate(&self) -> Result<(), Error> {
        let forms = [
            ("pages_unpublished", &self.pages_unpublished),
            ("parent_pages", &self.parent_pages),
            ("child_pages", &self.child_pages),
        ];
        for (name, forms) in forms {
            if !forms.other.contains(COUNT_PLACEHOLDER) {
                return Err(Error::LocaleError(format!(
                    "{}.other is missing the {} placeholder",
                    name, COUNT_PLACEHOLDER
                )));
            }
        }
        for placeholder in [PARENT_PAGES_PLACEHOLDER, CHILD_PAGES_PLACEHOLDER] {
            if !self.parent_and_child_unpublished.contains(placeholder) {
                return Err(Error::LocaleError(format!(
                    "parent_and_child_unpublished is missing the {} placeholder",
                    placeholder
                )));
            }
        }
        Ok(())
    }
}

impl Default for UnpublishMessages {
    fn default() -> Self {
        Self::english()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRENCH: &str = r#"{
        "plural_rule": "one_includes_zero",
        "pages_unpublished": {
            "one": "{count} page a été dépubliée",
            "other": "{count} pages ont été dépubliées"
        },
        "parent_pages": { "one": "{count} page", "other": "{count} pages" },
        "child_pages": { "one": "{count} page enfant", "other": "{count} pages enfants" },
        "parent_and_child_unpublished": "{parent_pages} et {child_pages} ont été dépubliées"
    }"#;

    #[test]
    fn test_plural_rules() {
        assert!(PluralRule::OneOther.is_singular(1));
        assert!(!PluralRule::OneOther.is_singular(0));
        assert!(!PluralRule::OneOther.is_singular(2));

        assert!(PluralRule::OneIncludesZero.is_singular(0));
        assert!(PluralRule::OneIncludesZero.is_singular(1));
        assert!(!PluralRule::OneIncludesZero.is_singular(2));

        assert!(!PluralRule::Invariant.is_singular(1));
    }

    #[test]
    fn test_format_replaces_count() {
        let forms = PluralForms::new("{count} child page", "{count} child pages");
        assert_eq!(forms.format(PluralRule::OneOther, 1), "1 child page");
        assert_eq!(forms.format(PluralRule::OneOther, 0), "0 child pages");
        assert_eq!(forms.format(PluralRule::OneOther, 12), "12 child pages");
    }

    #[test]
    fn test_english_is_default_and_valid() {
        let messages = UnpublishMessages::default();
        assert_eq!(messages, UnpublishMessages::english());
        assert!(messages.validate().is_ok());
    }

    #[test]
    fn test_from_json_str() {
        let messages = UnpublishMessages::from_json_str(FRENCH).unwrap();
        assert_eq!(messages.plural_rule, PluralRule::OneIncludesZero);
        assert_eq!(
            messages.child_pages.format(messages.plural_rule, 0),
            "0 page enfant"
        );
    }

    #[test]
    fn test_plural_rule_defaults_when_missing() {
        let json = r#"{
            "pages_unpublished": { "one": "{count} page gone", "other": "{count} pages gone" },
            "parent_pages": { "one": "{count} page", "other": "{count} pages" },
            "child_pages": { "one": "{count} subpage", "other": "{count} subpages" },
            "parent_and_child_unpublished": "{parent_pages} and {child_pages} gone"
        }"#;
        let messages = UnpublishMessages::from_json_str(json).unwrap();
        assert_eq!(messages.plural_rule, PluralRule::OneOther);
    }

    #[test]
    fn test_missing_placeholder_is_rejected() {
        let mut messages = UnpublishMessages::english();
        messages.parent_and_child_unpublished = "{parent_pages} have been unpublished".to_string();
        assert!(matches!(messages.validate(), Err(Error::LocaleError(_))));

        let mut messages = UnpublishMessages::english();
        messages.child_pages.other = "child pages".to_string();
        assert!(matches!(messages.validate(), Err(Error::LocaleError(_))));
    }

    #[test]
    fn test_malformed_json_is_locale_error() {
        let result = UnpublishMessages::from_json_str("{ \"plural_rule\": 3 }");
        assert!(matches!(result, Err(Error::LocaleError(_))));
    }

    #[test]
    fn test_missing_file_is_locale_error() {
        let result = UnpublishMessages::from_file(Path::new("/nonexistent/messages.json"));
        assert!(matches!(result, Err(Error::LocaleError(_))));
    }
}
