//! Errors raised while building or validating road records.
//!
//! Evaluation itself never fails; these only guard construction.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("geometry at s={s0} has non-positive length {length}")]
    NonPositiveLength { s0: f64, length: f64 },
    #[error("arc at s={s0} has zero curvature")]
    ZeroCurvature { s0: f64 },
    #[error("geometry at s={s0} has a non-finite parameter")]
    NonFinite { s0: f64 },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoadError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error("reference line has no geometry")]
    EmptyRefLine,
    #[error("reference line piece ends at s={s_end} but the next one starts at s={s_next}")]
    RefLineGap { s_end: f64, s_next: f64 },
    #[error("reference line covers {actual} m but the road is {expected} m long")]
    RefLineLength { expected: f64, actual: f64 },
    #[error("lane section at s={s0} has no center lane")]
    MissingCenterLane { s0: f64 },
}
