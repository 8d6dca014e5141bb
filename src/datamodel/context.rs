//! NGSI-LD `@context` checks
use serde_json::Value;

use crate::datamodel::core::{CONTEXT_URL_PREFIX, CONTEXT_VALID, Verdict};
use crate::datamodel::errors::Violation;

#[derive(Debug, Clone, Copy, Default)]
pub struct ContextValidator;

impl ContextValidator {
    pub fn validate(&self, context: &Value) -> Verdict {
        Verdict::from_check(self.check(context), CONTEXT_VALID)
    }

    /// Only the first entry is inspected.
    pub fn check(&self, context: &Value) -> Result<(), Violation> {
        let first = context
            .as_array()
            .and_then(|entries| entries.first())
            .ok_or(Violation::ContextNotList)?;

        match first.as_str() {
            Some(url) if url.starts_with(CONTEXT_URL_PREFIX) => Ok(()),
            Some(url) => Err(Violation::ContextPrefix {
                url: url.to_string(),
            }),
            None => Err(Violation::ContextPrefix {
                url: first.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datamodel::errors::ViolationKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn smart_data_models_url_is_accepted() {
        let verdict = ContextValidator.validate(&json!([
            "https://raw.githubusercontent.com/smart-data-models/foo"
        ]));
        assert!(verdict.is_valid());
        assert_eq!(verdict.message(), "Context format is valid.");
    }

    #[test]
    fn other_prefix_is_rejected() {
        let verdict = ContextValidator.validate(&json!(["http://other.org/x"]));
        assert!(!verdict.is_valid());
        assert_eq!(verdict.violation_kind(), Some(ViolationKind::PrefixMismatch));
        assert_eq!(verdict.message(), "Invalid @context URL: http://other.org/x.");
    }

    #[test]
    fn must_be_non_empty_list() {
        for context in [
            json!([]),
            json!("https://raw.githubusercontent.com/smart-data-models/foo"),
            json!({"@vocab": "https://schema.org/"}),
        ] {
            assert_eq!(
                ContextValidator.check(&context),
                Err(Violation::ContextNotList)
            );
        }
    }

    #[test]
    fn non_string_entry_is_rendered() {
        assert_eq!(
            ContextValidator.check(&json!([42])),
            Err(Violation::ContextPrefix {
                url: "42".to_string()
            })
        );
    }

    #[test]
    fn later_entries_are_not_inspected() {
        assert!(
            ContextValidator
                .check(&json!([
                    "https://raw.githubusercontent.com/smart-data-models/dataModel.Water/master/context.jsonld",
                    "http://anything.example/",
                    17
                ]))
                .is_ok()
        );
    }
}
