//! Error types for data model evaluation
use std::path::Path;

use thiserror::Error;

use crate::datamodel::core::{ALLOWED_GEOMETRY_TYPES, GeometryKind};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised outside the validation core: reading input, parsing it,
/// building configuration.
#[derive(Debug, Error)]
pub enum Error {
    #[error("file not found: {0}")]
    FileNotFound(String),
    #[error("invalid format: {0}")]
    InvalidFormat(String),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("builder error: {0}")]
    Builder(String),
    #[error("invalid configuration: {0}")]
    Config(#[from] garde::Report),
}

impl Error {
    pub fn file_not_found(path: &Path) -> Self {
        Self::FileNotFound(path.display().to_string())
    }

    pub fn invalid_format(msg: impl ToString) -> Self {
        Self::InvalidFormat(msg.to_string())
    }
}

/// Coarse classification of a [`Violation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// Payload could not be parsed; only the transport produces this.
    MalformedInput,
    MissingField,
    StructuralMismatch,
    RangeViolation,
    PrefixMismatch,
}

/// The first rule a document broke.
///
/// Kept as data so callers can match on it; [`Display`](std::fmt::Display)
/// renders the human readable message carried by a verdict.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Violation {
    #[error("The data model must be a JSON object.")]
    NotAnObject,
    #[error("The '{field}' attribute is missing.")]
    MissingField { field: &'static str },

    #[error("Missing 'type' or 'coordinates' in location.")]
    MissingGeometryMembers,
    #[error("Invalid type: {found}. Allowed types are: {}.", ALLOWED_GEOMETRY_TYPES.join(", "))]
    UnsupportedGeometryType { found: String },
    #[error("{kind} coordinates must be an array.")]
    CoordinatesNotArray { kind: GeometryKind },
    #[error("Coordinates in {kind} must be numbers.")]
    NonNumericCoordinate { kind: GeometryKind },
    #[error("{}", arity_message(.kind))]
    PositionArity { kind: GeometryKind },
    #[error("{}", range_message(.kind))]
    PositionOutOfRange { kind: GeometryKind },
    #[error("LineString must have at least two points (each point is a pair of coordinates).")]
    TooFewLineStringPoints,
    #[error("Polygon must have at least one linear ring (an array of arrays of coordinates).")]
    EmptyPolygon,
    #[error("Each linear ring in Polygon must have at least four points (coordinate pairs).")]
    RingTooShort,
    #[error("The first and last point in each linear ring must be the same to close the Polygon.")]
    RingNotClosed,

    #[error("The '@context' attribute should be a non-empty list")]
    ContextNotList,
    #[error("Invalid @context URL: {url}.")]
    ContextPrefix { url: String },
}

impl Violation {
    pub fn kind(&self) -> ViolationKind {
        match self {
            Self::MissingField { .. } => ViolationKind::MissingField,
            Self::PositionOutOfRange { .. } => ViolationKind::RangeViolation,
            Self::ContextPrefix { .. } => ViolationKind::PrefixMismatch,
            Self::NotAnObject
            | Self::MissingGeometryMembers
            | Self::UnsupportedGeometryType { .. }
            | Self::CoordinatesNotArray { .. }
            | Self::NonNumericCoordinate { .. }
            | Self::PositionArity { .. }
            | Self::TooFewLineStringPoints
            | Self::EmptyPolygon
            | Self::RingTooShort
            | Self::RingNotClosed
            | Self::ContextNotList => ViolationKind::StructuralMismatch,
        }
    }
}

fn arity_message(kind: &GeometryKind) -> &'static str {
    match kind {
        GeometryKind::Point => {
            "Point coordinates must contain exactly two elements (longitude, latitude)."
        }
        GeometryKind::LineString => {
            "Each point in LineString must have exactly two elements (longitude, latitude)."
        }
        GeometryKind::Polygon => {
            "Each point in a Polygon ring must have exactly two elements (longitude, latitude)."
        }
    }
}

fn range_message(kind: &GeometryKind) -> &'static str {
    match kind {
        GeometryKind::Point => {
            "Invalid coordinates for 'Point'. Longitude must be in [-180, 180] and latitude in [-90, 90]."
        }
        GeometryKind::LineString => {
            "Invalid point in LineString. Longitude must be in [-180, 180] and latitude in [-90, 90]."
        }
        GeometryKind::Polygon => {
            "Invalid point in Polygon. Longitude must be in [-180, 180] and latitude in [-90, 90]."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn unsupported_type_lists_allowed_kinds() {
        let violation = Violation::UnsupportedGeometryType {
            found: "MultiPoint".to_string(),
        };
        assert_eq!(
            violation.to_string(),
            "Invalid type: MultiPoint. Allowed types are: Point, Polygon, LineString."
        );
        assert_eq!(violation.kind(), ViolationKind::StructuralMismatch);
    }

    #[test]
    fn missing_field_names_the_field() {
        let violation = Violation::MissingField { field: "@context" };
        assert_eq!(violation.to_string(), "The '@context' attribute is missing.");
        assert_eq!(violation.kind(), ViolationKind::MissingField);
    }

    #[test]
    fn range_messages_differ_per_geometry() {
        let point = Violation::PositionOutOfRange {
            kind: GeometryKind::Point,
        };
        let polygon = Violation::PositionOutOfRange {
            kind: GeometryKind::Polygon,
        };
        assert!(point.to_string().starts_with("Invalid coordinates for 'Point'"));
        assert!(polygon.to_string().starts_with("Invalid point in Polygon"));
        assert_eq!(polygon.kind(), ViolationKind::RangeViolation);
    }
}
