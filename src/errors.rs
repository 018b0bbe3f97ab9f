//! Validation, cut and fragmentation errors

use crate::float_types::Real;
use crate::fragment::FragmentId;
use nalgebra::{Point3, Vector3};
use std::fmt::Display;

/// All the reasons a source mesh can be rejected before fragmentation starts
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// (NoPolygons) The mesh holds no renderable geometry
    NoPolygons,
    /// (TooFewPoints) A polygon has fewer than three vertices
    TooFewPoints(Point3<Real>),
    /// (InvalidCoordinate) The coordinate has a NaN or infinite
    InvalidCoordinate(Point3<Real>),
    /// (DegenerateScale) The pose scale has a zero or non-finite component
    DegenerateScale(Vector3<Real>),
    /// In general, anything else
    Other(String, Option<Point3<Real>>),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::NoPolygons => write!(f, "(NoPolygons) The mesh holds no renderable geometry"),
            ValidationError::TooFewPoints(opoint) => write!(f, "(TooFewPoints) A polygon has fewer than three vertices at: {}", opoint),
            ValidationError::InvalidCoordinate(opoint) => write!(f, "(InvalidCoordinate) The coordinate ({}) has a NaN or infinite", opoint),
            ValidationError::DegenerateScale(scale) => write!(f, "(DegenerateScale) The pose scale ({}) cannot be inverted", scale),
            ValidationError::Other(str, opoint) => {
                if let Some(opoint) = opoint {
                    write!(f, "{} at: {}", str, opoint)
                } else {
                    write!(f, "{}", str)
                }
            },
        }
    }
}

/// Why a single plane cut could not produce a usable result.
///
/// These never reach the caller of a fragmentation: the controller keeps the
/// fragment as an unresolved leaf instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CutError {
    #[error("cut normal has zero length")]
    DegenerateNormal,
    #[error("mesh extent {0} is below the cutting tolerance")]
    TooSmall(Real),
    #[error("cut plane does not intersect the mesh")]
    PlaneMissed,
    #[error("{0}")]
    Other(String),
}

/// Errors surfaced by [`MeshBreaker`](crate::breaker::MeshBreaker) and the explosion dispatcher
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BreakError {
    #[error("invalid source mesh: {0}")]
    InvalidSource(#[from] ValidationError),
    #[error("fragment {0} already has a physics body attached")]
    AlreadyAttached(FragmentId),
    #[error("physics backend rejected fragment {0}: {1}")]
    Physics(FragmentId, #[source] PhysicsError),
}

/// Why a [`PhysicsBody`](crate::explode::PhysicsBody) could not take a fragment.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PhysicsError {
    #[error("no convex hull spans the {0} fragment vertices")]
    NoConvexHull(usize),
    #[error("{0}")]
    Other(String),
}
