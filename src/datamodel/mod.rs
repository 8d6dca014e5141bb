pub mod context;
pub mod core;
pub mod errors;
pub mod geometry;
pub mod validate;

pub use context::ContextValidator;
pub use self::core::{CoordinatePair, GeometryKind, Verdict};
pub use errors::{Error, Result, Violation, ViolationKind};
pub use geometry::GeometryValidator;
pub use validate::{DocumentValidator, FieldCheck, validate_document, validate_file};
