use garde::Validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::datamodel::errors::{Violation, ViolationKind};

pub const CONTEXT_URL_PREFIX: &str = "https://raw.githubusercontent.com/smart-data-models/";

pub const ALLOWED_GEOMETRY_TYPES: [&str; 3] = ["Point", "Polygon", "LineString"];

pub const LOCATION_VALID: &str = "Location format is valid.";
pub const CONTEXT_VALID: &str = "Context format is valid.";
pub const DATA_MODEL_VALID: &str = "Data model is valid.";

/// Outcome of a validation: a flag and exactly one message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    valid: bool,
    message: String,
    #[serde(skip)]
    violation: Option<Violation>,
}

impl Verdict {
    pub fn valid(message: impl ToString) -> Self {
        Self {
            valid: true,
            message: message.to_string(),
            violation: None,
        }
    }

    pub fn invalid(violation: Violation) -> Self {
        Self {
            valid: false,
            message: violation.to_string(),
            violation: Some(violation),
        }
    }

    /// Render a check result, using `success` as the message when it passed.
    pub fn from_check(result: Result<(), Violation>, success: &str) -> Self {
        match result {
            Ok(()) => Self::valid(success),
            Err(violation) => Self::invalid(violation),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn violation(&self) -> Option<&Violation> {
        self.violation.as_ref()
    }

    pub fn violation_kind(&self) -> Option<ViolationKind> {
        self.violation.as_ref().map(Violation::kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
}

impl GeometryKind {
    /// Reads a GeoJSON `type` member; anything that is not one of the
    /// supported names yields `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        Self::deserialize(value).ok()
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self {
            Self::Point => "Point",
            Self::LineString => "LineString",
            Self::Polygon => "Polygon",
        };
        write!(f, "{}", key)
    }
}

/// A GeoJSON position reduced to the two members this service accepts.
#[derive(Debug, Clone, Copy, PartialEq, Validate)]
pub struct CoordinatePair {
    #[garde(range(min = -180.0, max = 180.0))]
    longitude: f64,
    #[garde(range(min = -90.0, max = 90.0))]
    latitude: f64,
}

impl CoordinatePair {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Builds a pair from a JSON position, failing on anything other than
    /// an array of exactly two numbers. `kind` selects the message.
    pub fn from_value(value: &Value, kind: GeometryKind) -> Result<Self, Violation> {
        let members = match value.as_array() {
            Some(members) if members.len() == 2 => members,
            _ => return Err(Violation::PositionArity { kind }),
        };
        match (members[0].as_f64(), members[1].as_f64()) {
            (Some(longitude), Some(latitude)) => Ok(Self::new(longitude, latitude)),
            _ => Err(Violation::NonNumericCoordinate { kind }),
        }
    }

    /// Parses the position and checks both bounds (inclusive).
    pub fn parse_in_range(value: &Value, kind: GeometryKind) -> Result<Self, Violation> {
        let pair = Self::from_value(value, kind)?;
        pair.validate()
            .map_err(|_| Violation::PositionOutOfRange { kind })?;
        Ok(pair)
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }
}

/// Exact equality of two positions. Numbers compare by value so `0` and
/// `0.0` match; no tolerance is applied.
pub fn same_position(a: &Value, b: &Value) -> bool {
    match (a.as_array(), b.as_array()) {
        (Some(a), Some(b)) if a.len() == b.len() => a.iter().zip(b).all(|(x, y)| {
            match (x.as_f64(), y.as_f64()) {
                (Some(x), Some(y)) => x == y,
                _ => x == y,
            }
        }),
        _ => a == b,
    }
}
