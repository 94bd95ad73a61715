//! The one class of error this engine surfaces: construction-parameter
//! violations (spec §7). Every other failure mode (unknown nuid, duplicate
//! sensor_id) is a silent no-op and does not get an error type.

use thiserror::Error;

/// A fatal precondition was violated while constructing an index.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConstraintError {
    #[error("beacon bounds invalid: xmax ({xmax}) must exceed xmin ({xmin})")]
    InvalidXBounds { xmin: f32, xmax: f32 },
    #[error("beacon bounds invalid: zmax ({zmax}) must exceed zmin ({zmin})")]
    InvalidZBounds { zmin: f32, zmax: f32 },
}
