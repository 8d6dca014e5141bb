//! Transport-facing adapter around the document validator
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::datamodel::{DocumentValidator, Verdict, ViolationKind};

pub const NO_FILE_PROVIDED: &str = "No file provided";
pub const NO_FILE_SELECTED: &str = "No file selected";
pub const NO_JSON_PROVIDED: &str = "No JSON provided";
pub const PAYLOAD_TOO_LARGE: &str = "Payload too large.";

/// Where a payload came from; selects the malformed-input message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadSource {
    Upload,
    Body,
}

impl PayloadSource {
    fn invalid_json_message(self) -> &'static str {
        match self {
            Self::Upload => "Invalid JSON file.",
            Self::Body => "Invalid JSON data.",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Valid(Verdict),
    Invalid(Verdict),
    /// The payload never reached the validator.
    Malformed(PayloadSource),
    /// Nothing usable was submitted.
    Rejected(&'static str),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    pub fn kind(&self) -> Option<ViolationKind> {
        match self {
            Self::Valid(_) | Self::Rejected(_) => None,
            Self::Invalid(verdict) => verdict.violation_kind(),
            Self::Malformed(_) => Some(ViolationKind::MalformedInput),
        }
    }

    /// Client-facing message.
    pub fn message(&self) -> String {
        match self {
            Self::Valid(verdict) => verdict.message().to_string(),
            Self::Invalid(verdict) => format!("Validation failed: {}", verdict.message()),
            Self::Malformed(source) => source.invalid_json_message().to_string(),
            Self::Rejected(reason) => reason.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct ValidationService {
    validator: Arc<DocumentValidator>,
}

impl Default for ValidationService {
    fn default() -> Self {
        Self::new(DocumentValidator::default())
    }
}

impl ValidationService {
    pub fn new(validator: DocumentValidator) -> Self {
        Self {
            validator: Arc::new(validator),
        }
    }

    pub fn evaluate(&self, document: &Value) -> Outcome {
        let verdict = self.validator.validate(document);
        if verdict.is_valid() {
            Outcome::Valid(verdict)
        } else {
            Outcome::Invalid(verdict)
        }
    }

    /// Parse then validate. A parse failure never reaches the validator.
    pub fn evaluate_bytes(&self, bytes: &[u8], source: PayloadSource) -> Outcome {
        if source == PayloadSource::Body && bytes.iter().all(u8::is_ascii_whitespace) {
            return Outcome::Rejected(NO_JSON_PROVIDED);
        }
        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Null) if source == PayloadSource::Body => {
                Outcome::Rejected(NO_JSON_PROVIDED)
            }
            Ok(document) => self.evaluate(&document),
            Err(err) => {
                debug!(?source, error = %err, "[Service] payload is not JSON");
                Outcome::Malformed(source)
            }
        }
    }
}
