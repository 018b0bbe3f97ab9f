//! The plane-cut capability consumed by the fragmentation controller.

use crate::errors::CutError;
use crate::float_types::Real;
use crate::mesh::Mesh;
use crate::pose::Pose;
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;

pub mod plane_cutter;
pub mod section;

pub use plane_cutter::PlaneCutter;

/// Splits one mesh along one plane.
///
/// `mesh` is expressed in the local frame described by `pose`; `point` and
/// `normal` are in world space. Returned children are expressed in the same
/// local frame as `mesh` and inherit its pose. `None` entries are degenerate
/// children and are skipped by the caller.
///
/// Implementations must be deterministic for a fixed mesh and plane, and must
/// return an error (never panic) when no valid cut exists.
pub trait CutPrimitive<S: Clone + Send + Sync + Debug> {
    fn cut(
        &self,
        mesh: &Mesh<S>,
        pose: &Pose,
        point: &Point3<Real>,
        normal: &Vector3<Real>,
        cap: Option<&S>,
    ) -> Result<Vec<Option<Mesh<S>>>, CutError>;
}

impl<S, C> CutPrimitive<S> for &C
where
    S: Clone + Send + Sync + Debug,
    C: CutPrimitive<S> + ?Sized,
{
    fn cut(
        &self,
        mesh: &Mesh<S>,
        pose: &Pose,
        point: &Point3<Real>,
        normal: &Vector3<Real>,
        cap: Option<&S>,
    ) -> Result<Vec<Option<Mesh<S>>>, CutError> {
        (**self).cut(mesh, pose, point, normal, cap)
    }
}
