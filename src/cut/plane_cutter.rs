//! Default [`CutPrimitive`]: split along a plane, then close both halves with caps.

use crate::cut::CutPrimitive;
use crate::cut::section::{boundary_edges, cap_polygons, chain_loops, triangulate_loops};
use crate::errors::CutError;
use crate::float_types::{EPSILON, Real, tolerance};
use crate::mesh::Mesh;
use crate::mesh::plane::Plane;
use crate::pose::Pose;
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;

/// Planar cutter for closed polygon meshes.
///
/// Polygons straddling the plane are split, polygons lying on it go to the
/// piece they bound, and the open rim left on each piece is triangulated into
/// a cap carrying the cap material. Front is the side the normal points to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneCutter {
    /// Pieces whose largest world-space extent is below this are not cut.
    pub min_extent: Real,
}

impl Default for PlaneCutter {
    fn default() -> Self {
        PlaneCutter {
            min_extent: tolerance() * 100.0,
        }
    }
}

impl PlaneCutter {
    pub const fn new(min_extent: Real) -> Self {
        PlaneCutter { min_extent }
    }

    /// Largest edge of the local bounds after applying the pose scale.
    fn scaled_extent<S: Clone + Send + Sync + Debug>(mesh: &Mesh<S>, pose: &Pose) -> Real {
        let bb = mesh.bounding_box();
        (bb.maxs - bb.mins).component_mul(&pose.scale).abs().max()
    }
}

impl<S: Clone + Send + Sync + Debug> CutPrimitive<S> for PlaneCutter {
    fn cut(
        &self,
        mesh: &Mesh<S>,
        pose: &Pose,
        point: &Point3<Real>,
        normal: &Vector3<Real>,
        cap: Option<&S>,
    ) -> Result<Vec<Option<Mesh<S>>>, CutError> {
        if normal.norm() < EPSILON {
            return Err(CutError::DegenerateNormal);
        }
        let extent = Self::scaled_extent(mesh, pose);
        if extent < self.min_extent {
            return Err(CutError::TooSmall(extent));
        }

        let local_point = pose.inverse_transform_point(point);
        let local_normal = pose.inverse_transform_normal(normal);
        let plane =
            Plane::from_point_normal(&local_point, &local_normal).ok_or(CutError::DegenerateNormal)?;

        let mut front = Vec::new();
        let mut back = Vec::new();
        for poly in &mesh.polygons {
            let split = plane.split_polygon(poly);
            front.extend(split.front);
            front.extend(split.coplanar_back);
            back.extend(split.back);
            back.extend(split.coplanar_front);
        }

        if front.is_empty() || back.is_empty() {
            return Err(CutError::PlaneMissed);
        }

        let loops = chain_loops(boundary_edges(&front, &plane));
        let triangles = triangulate_loops(&loops);
        if triangles.is_empty() {
            log::trace!("cut left no closed section; pieces stay open");
        }

        let material = cap.or_else(|| mesh.default_cap_material());
        let n = plane.normal();
        front.extend(cap_polygons(&triangles, &plane, &-n, material));
        back.extend(cap_polygons(&triangles, &plane, &n, material));

        log::trace!(
            "plane cut: {} loops, {} front polygons, {} back polygons",
            loops.len(),
            front.len(),
            back.len()
        );

        Ok(vec![
            Some(Mesh::from_polygons(front, mesh.metadata.clone())),
            Some(Mesh::from_polygons(back, mesh.metadata.clone())),
        ])
    }
}
