//! A piece of geometry with its own placement and recursion depth.

use crate::errors::ValidationError;
use crate::float_types::{Real, parry3d::bounding_volume::Aabb};
use crate::mesh::Mesh;
use crate::pose::Pose;
use nalgebra::Point3;
use std::fmt::{self, Debug, Display};
use std::sync::atomic::{AtomicU64, Ordering};

/// Stable identity of a fragment within one fragmentation: its cut-tree node index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FragmentId(pub u32);

impl FragmentId {
    /// The source fragment is always the root of the cut tree.
    pub const ROOT: FragmentId = FragmentId(0);

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl Display for FragmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The source object a fragment descends from.
///
/// Every [`Fragment::source`] call starts a new lineage; cut pieces inherit
/// their parent's, and clones keep it. Together with the [`FragmentId`] it
/// names a piece uniquely across fragmentations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Lineage(u64);

impl Lineage {
    pub fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Lineage(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone)]
pub struct Fragment<S: Clone + Send + Sync + Debug> {
    pub id: FragmentId,
    pub lineage: Lineage,
    /// Geometry in the fragment's local frame
    pub mesh: Mesh<S>,
    pub pose: Pose,
    /// Number of cuts between the source and this fragment
    pub generation: u32,
}

impl<S: Clone + Send + Sync + Debug> Fragment<S> {
    /// Wrap a source mesh as the root fragment (generation 0).
    pub fn source(mesh: Mesh<S>, pose: Pose) -> Self {
        Fragment {
            id: FragmentId::ROOT,
            lineage: Lineage::fresh(),
            mesh,
            pose,
            generation: 0,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.mesh.validate()?;
        self.pose.validate()
    }

    /// World-space positions of every vertex, in polygon order.
    pub fn world_points(&self) -> Vec<Point3<Real>> {
        self.mesh
            .points()
            .iter()
            .map(|p| self.pose.transform_point(p))
            .collect()
    }

    /// Tight world-space bounds of the transformed vertices.
    pub fn world_bounds(&self) -> Aabb {
        if self.mesh.is_empty() {
            return Aabb::new(self.pose.position, self.pose.position);
        }
        let mut aabb = Aabb::new_invalid();
        for p in self.world_points() {
            aabb.take_point(p);
        }
        aabb
    }

    /// Center of [`Fragment::world_bounds`]; cut planes pass through it and pivots move to it.
    pub fn world_bounds_center(&self) -> Point3<Real> {
        self.world_bounds().center()
    }
}
