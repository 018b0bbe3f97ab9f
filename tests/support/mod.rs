//! Test support library
//! Shared fixtures, fake collaborators and geometric checks for the integration tests.
#![allow(dead_code)]

use meshbreak::{
    CutError, CutPrimitive, Fragment, FragmentId, Mesh, PhysicsBody, PhysicsError, Pose,
    explode::explosion_impulse,
    float_types::Real,
    mesh::{polygon::Polygon, vertex::Vertex},
};
use nalgebra::{Point3, Vector3};

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Helper to make a simple Polygon in 3D with given vertices.
pub fn make_polygon_3d(points: &[[Real; 3]]) -> Polygon<()> {
    let verts = points
        .iter()
        .map(|p| Vertex::new(Point3::new(p[0], p[1], p[2]), Vector3::z()))
        .collect();
    Polygon::new(verts, None)
}

/// Sum of the oriented polygon area vectors. Zero (up to rounding) for a closed surface.
pub fn vector_area<S: Clone + Send + Sync + std::fmt::Debug>(mesh: &Mesh<S>) -> Vector3<Real> {
    let mut total = Vector3::zeros();
    for poly in &mesh.polygons {
        let count = poly.vertices.len();
        for i in 0..count {
            let a = poly.vertices[i].pos.coords;
            let b = poly.vertices[(i + 1) % count].pos.coords;
            total += a.cross(&b) * 0.5;
        }
    }
    total
}

/// A source cube of edge 2 carrying material `1`, placed with a non-trivial pose.
pub fn posed_cube() -> Fragment<u8> {
    let pose = Pose::from_position(Point3::new(2.0, -1.0, 0.5))
        .with_rotation_degrees(20.0, 40.0, -10.0)
        .with_scale(Vector3::new(1.0, 1.5, 0.75));
    Fragment::source(Mesh::cube(2.0, Some(1)), pose)
}

/// Returns two untouched copies of its input.
pub struct Duplicate;

impl CutPrimitive<u8> for Duplicate {
    fn cut(
        &self,
        mesh: &Mesh<u8>,
        _: &Pose,
        _: &Point3<Real>,
        _: &Vector3<Real>,
        _: Option<&u8>,
    ) -> Result<Vec<Option<Mesh<u8>>>, CutError> {
        Ok(vec![Some(mesh.clone()), Some(mesh.clone())])
    }
}

/// Never manages a cut.
pub struct AlwaysFail;

impl CutPrimitive<u8> for AlwaysFail {
    fn cut(
        &self,
        _: &Mesh<u8>,
        _: &Pose,
        _: &Point3<Real>,
        _: &Vector3<Real>,
        _: Option<&u8>,
    ) -> Result<Vec<Option<Mesh<u8>>>, CutError> {
        Err(CutError::Other("refusing to cut".to_string()))
    }
}

/// Succeeds but never yields a child.
pub struct Vanish;

impl CutPrimitive<u8> for Vanish {
    fn cut(
        &self,
        _: &Mesh<u8>,
        _: &Pose,
        _: &Point3<Real>,
        _: &Vector3<Real>,
        _: Option<&u8>,
    ) -> Result<Vec<Option<Mesh<u8>>>, CutError> {
        Ok(vec![None])
    }
}

/// Physics stand-in that records what it was asked to do.
///
/// Handles index `attached`. With `refuse_at: Some(n)` the attach that would
/// get handle `n` is rejected, once.
#[derive(Debug, Default)]
pub struct RecordingPhysics {
    pub attached: Vec<FragmentId>,
    pub positions: Vec<Point3<Real>>,
    pub impulses: Vec<Option<Vector3<Real>>>,
    pub detached: Vec<usize>,
    pub refuse_at: Option<usize>,
}

impl RecordingPhysics {
    /// Ids of the bodies that were attached and not detached again.
    pub fn live(&self) -> Vec<FragmentId> {
        self.attached
            .iter()
            .enumerate()
            .filter(|(handle, _)| !self.detached.contains(handle))
            .map(|(_, id)| *id)
            .collect()
    }
}

impl PhysicsBody<u8> for RecordingPhysics {
    type Handle = usize;

    fn attach(&mut self, fragment: &Fragment<u8>, _density: Real) -> Result<usize, PhysicsError> {
        if self.refuse_at == Some(self.attached.len()) {
            self.refuse_at = None;
            return Err(PhysicsError::Other("refused".to_string()));
        }
        self.attached.push(fragment.id);
        self.positions.push(fragment.pose.position);
        self.impulses.push(None);
        Ok(self.attached.len() - 1)
    }

    fn detach(&mut self, handle: &usize) {
        self.detached.push(*handle);
    }

    fn apply_explosion(&mut self, handle: &usize, point: &Point3<Real>, force: Real, radius: Real) {
        self.impulses[*handle] = explosion_impulse(&self.positions[*handle], point, force, radius);
    }
}
