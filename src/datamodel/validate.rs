//! Validation logic for Smart Data Model documents
use serde_json::Value;
use std::path::Path;
use tracing::debug;

use crate::datamodel::context::ContextValidator;
use crate::datamodel::core::{DATA_MODEL_VALID, Verdict};
use crate::datamodel::errors::{Error, Result, Violation};
use crate::datamodel::geometry::GeometryValidator;

/// A rule applied to one top-level attribute of a document.
pub trait FieldCheck: Send + Sync {
    /// Attribute the check reads.
    fn field(&self) -> &'static str;

    /// Checks the attribute's value once it is known to be present.
    fn check_value(&self, value: &Value) -> std::result::Result<(), Violation>;

    fn check(&self, document: &Value) -> std::result::Result<(), Violation> {
        let value = document.get(self.field()).ok_or(Violation::MissingField {
            field: self.field(),
        })?;
        self.check_value(value)
    }
}

pub struct LocationCheck;

impl FieldCheck for LocationCheck {
    fn field(&self) -> &'static str {
        "location"
    }

    fn check_value(&self, value: &Value) -> std::result::Result<(), Violation> {
        GeometryValidator.check(value)
    }
}

pub struct ContextCheck;

impl FieldCheck for ContextCheck {
    fn field(&self) -> &'static str {
        "@context"
    }

    fn check_value(&self, value: &Value) -> std::result::Result<(), Violation> {
        ContextValidator.check(value)
    }
}

/// Runs its field checks in order and reports the first failure.
pub struct DocumentValidator {
    checks: Vec<Box<dyn FieldCheck>>,
}

impl Default for DocumentValidator {
    fn default() -> Self {
        Self::empty()
            .with_check(LocationCheck)
            .with_check(ContextCheck)
    }
}

impl DocumentValidator {
    /// A validator with no checks; every object passes.
    pub fn empty() -> Self {
        Self { checks: Vec::new() }
    }

    /// Appends a check after the existing ones.
    pub fn with_check(mut self, check: impl FieldCheck + 'static) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    pub fn fields(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.field()).collect()
    }

    pub fn check(&self, document: &Value) -> std::result::Result<(), Violation> {
        if !document.is_object() {
            return Err(Violation::NotAnObject);
        }
        for check in &self.checks {
            if let Err(violation) = check.check(document) {
                debug!(field = check.field(), %violation, "[Validator] check failed");
                return Err(violation);
            }
        }
        Ok(())
    }

    pub fn validate(&self, document: &Value) -> Verdict {
        Verdict::from_check(self.check(document), DATA_MODEL_VALID)
    }
}

/// Validate a document with the default checks.
pub fn validate_document(document: &Value) -> Verdict {
    DocumentValidator::default().validate(document)
}

/// Validate a data model file
pub fn validate_file(file_path: &Path) -> Result<Verdict> {
    let bytes = std::fs::read(file_path).map_err(|_| Error::file_not_found(file_path))?;
    let content = String::from_utf8(bytes).map_err(|e| {
        Error::invalid_format(format!("{} is not UTF-8 text: {e}", file_path.display()))
    })?;

    let document: Value = serde_json::from_str(&content)?;
    Ok(validate_document(&document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datamodel::errors::ViolationKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const CONTEXT: &str = "https://raw.githubusercontent.com/smart-data-models/dataModel.WaterQuality/master/context.jsonld";

    fn valid_document() -> Value {
        json!({
            "id": "urn:ngsi-ld:WaterQualityObserved:1",
            "type": "WaterQualityObserved",
            "location": {"type": "Point", "coordinates": [-3.7, 40.4]},
            "@context": [CONTEXT]
        })
    }

    #[test]
    fn full_document_is_valid() {
        let verdict = validate_document(&valid_document());
        assert!(verdict.is_valid());
        assert_eq!(verdict.message(), "Data model is valid.");
    }

    #[test]
    fn missing_location() {
        let verdict = validate_document(&json!({"@context": [CONTEXT]}));
        assert!(!verdict.is_valid());
        assert_eq!(verdict.message(), "The 'location' attribute is missing.");
        assert_eq!(verdict.violation_kind(), Some(ViolationKind::MissingField));
    }

    #[test]
    fn missing_context_after_valid_location() {
        let verdict =
            validate_document(&json!({"location": {"type": "Point", "coordinates": [1, 2]}}));
        assert_eq!(verdict.message(), "The '@context' attribute is missing.");
    }

    #[test]
    fn location_failure_wins_over_context_failure() {
        let verdict = validate_document(&json!({
            "location": {"type": "Point", "coordinates": [200, 10]},
            "@context": ["http://other.org/x"]
        }));
        assert_eq!(
            verdict.violation(),
            Some(&Violation::PositionOutOfRange {
                kind: crate::datamodel::core::GeometryKind::Point
            })
        );
    }

    #[test]
    fn missing_location_hides_missing_context() {
        let verdict = validate_document(&json!({}));
        assert_eq!(verdict.message(), "The 'location' attribute is missing.");
    }

    #[test]
    fn sub_validator_message_passes_through_unmodified() {
        let mut document = valid_document();
        document["@context"] = json!(["http://other.org/x"]);
        assert_eq!(
            validate_document(&document).message(),
            "Invalid @context URL: http://other.org/x."
        );
    }

    #[test]
    fn non_object_roots_do_not_fault() {
        for document in [json!([1, 2]), json!("location"), json!(null), json!(3.5)] {
            let verdict = validate_document(&document);
            assert_eq!(verdict.violation(), Some(&Violation::NotAnObject));
            assert_eq!(
                verdict.violation_kind(),
                Some(ViolationKind::StructuralMismatch)
            );
        }
    }

    struct RequireId;

    impl FieldCheck for RequireId {
        fn field(&self) -> &'static str {
            "id"
        }

        fn check_value(&self, value: &Value) -> std::result::Result<(), Violation> {
            if value.is_string() {
                Ok(())
            } else {
                Err(Violation::MissingField { field: "id" })
            }
        }
    }

    #[test]
    fn checks_can_be_appended() {
        let validator = DocumentValidator::default().with_check(RequireId);
        assert_eq!(validator.fields(), vec!["location", "@context", "id"]);

        let mut document = valid_document();
        assert!(validator.validate(&document).is_valid());

        document.as_object_mut().unwrap().remove("id");
        assert_eq!(
            validator.validate(&document).message(),
            "The 'id' attribute is missing."
        );
    }

    #[test]
    fn empty_validator_accepts_any_object() {
        assert!(DocumentValidator::empty().validate(&json!({})).is_valid());
    }

    #[test]
    fn repeated_validation_is_identical() {
        let document = json!({"location": {"type": "Polygon", "coordinates": [[[0, 0], [0, 1], [1, 1], [1, 0]]]}});
        assert_eq!(validate_document(&document), validate_document(&document));
    }

    #[test]
    fn validate_file_reads_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, valid_document().to_string()).unwrap();
        assert!(validate_file(&path).unwrap().is_valid());
    }

    #[test]
    fn validate_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            validate_file(&dir.path().join("absent.json")),
            Err(Error::FileNotFound(_))
        ));

        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(validate_file(&path), Err(Error::Json(_))));
    }

    #[test]
    fn validate_file_rejects_non_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.json");
        std::fs::write(&path, b"{\"name\": \"caf\xe9\"}").unwrap();
        assert!(matches!(
            validate_file(&path),
            Err(Error::InvalidFormat(msg)) if msg.contains("not UTF-8")
        ));
    }
}
