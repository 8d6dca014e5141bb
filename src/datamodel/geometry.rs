//! GeoJSON geometry checks for the `location` attribute
use serde_json::Value;

use crate::datamodel::core::{CoordinatePair, GeometryKind, LOCATION_VALID, Verdict, same_position};
use crate::datamodel::errors::Violation;

const MIN_LINESTRING_POINTS: usize = 2;
const MIN_RING_POINTS: usize = 4;

#[derive(Debug, Clone, Copy, Default)]
pub struct GeometryValidator;

impl GeometryValidator {
    pub fn validate(&self, geometry: &Value) -> Verdict {
        Verdict::from_check(self.check(geometry), LOCATION_VALID)
    }

    /// Applies the geometry rules in order and stops at the first failure.
    pub fn check(&self, geometry: &Value) -> Result<(), Violation> {
        let (type_value, coordinates) = match geometry.as_object() {
            Some(map) => match (map.get("type"), map.get("coordinates")) {
                (Some(t), Some(c)) => (t, c),
                _ => return Err(Violation::MissingGeometryMembers),
            },
            None => return Err(Violation::MissingGeometryMembers),
        };

        let kind = GeometryKind::from_value(type_value).ok_or_else(|| {
            Violation::UnsupportedGeometryType {
                found: render_type(type_value),
            }
        })?;

        let positions = coordinates
            .as_array()
            .ok_or(Violation::CoordinatesNotArray { kind })?;

        match kind {
            // a Point's coordinates array is itself the position
            GeometryKind::Point => CoordinatePair::parse_in_range(coordinates, kind).map(|_| ()),
            GeometryKind::LineString => check_line_string(positions),
            GeometryKind::Polygon => check_polygon(positions),
        }
    }
}

fn render_type(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn check_line_string(coordinates: &[Value]) -> Result<(), Violation> {
    if coordinates.len() < MIN_LINESTRING_POINTS {
        return Err(Violation::TooFewLineStringPoints);
    }
    for position in coordinates {
        CoordinatePair::parse_in_range(position, GeometryKind::LineString)?;
    }
    Ok(())
}

fn check_polygon(rings: &[Value]) -> Result<(), Violation> {
    if rings.is_empty() {
        return Err(Violation::EmptyPolygon);
    }
    for ring in rings {
        check_ring(ring)?;
    }
    Ok(())
}

fn check_ring(ring: &Value) -> Result<(), Violation> {
    let positions = match ring.as_array() {
        Some(positions) if positions.len() >= MIN_RING_POINTS => positions,
        _ => return Err(Violation::RingTooShort),
    };
    if let (Some(first), Some(last)) = (positions.first(), positions.last())
        && !same_position(first, last)
    {
        return Err(Violation::RingNotClosed);
    }
    for position in positions {
        CoordinatePair::parse_in_range(position, GeometryKind::Polygon)?;
    }
    Ok(())
}
