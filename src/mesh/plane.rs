//! Oriented planes: side classification, polygon splitting and 2D projection.

use crate::float_types::{EPSILON, Real, tolerance};
use crate::mesh::polygon::Polygon;
use crate::mesh::vertex::Vertex;
use nalgebra::{Point2, Point3, Vector3};
use std::fmt::Debug;

// Plane classification bits
pub const COPLANAR: i8 = 0;
pub const FRONT: i8 = 1;
pub const BACK: i8 = 2;
pub const SPANNING: i8 = 3;

/// Polygons produced by [`Plane::split_polygon`].
#[derive(Debug, Clone)]
pub struct SplitPolygons<S: Clone> {
    /// Lies on the plane, facing the same way as the plane
    pub coplanar_front: Vec<Polygon<S>>,
    /// Lies on the plane, facing away from the plane
    pub coplanar_back: Vec<Polygon<S>>,
    pub front: Vec<Polygon<S>>,
    pub back: Vec<Polygon<S>>,
}

/// A plane `n · p = w` with unit normal `n`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: Vector3<Real>,
    w: Real,
}

impl Plane {
    /// Build a plane from a (not necessarily unit) normal and the offset of
    /// the *normalized* plane. A zero normal falls back to `+Z`.
    pub fn from_normal(normal: Vector3<Real>, w: Real) -> Self {
        let normal = normal.try_normalize(EPSILON).unwrap_or_else(Vector3::z);
        Plane { normal, w }
    }

    /// Plane through `point` with the given normal, or `None` when the normal is degenerate.
    pub fn from_point_normal(point: &Point3<Real>, normal: &Vector3<Real>) -> Option<Self> {
        let normal = normal.try_normalize(EPSILON)?;
        Some(Plane {
            normal,
            w: normal.dot(&point.coords),
        })
    }

    /// Plane of a polygon, oriented with its winding (Newell's method).
    pub fn from_vertices(vertices: &[Vertex]) -> Self {
        if vertices.len() < 3 {
            return Plane::from_normal(Vector3::z(), 0.0);
        }

        let newell = vertices
            .iter()
            .zip(vertices.iter().cycle().skip(1))
            .fold(Vector3::zeros(), |acc, (curr, next)| {
                acc + curr.pos.coords.cross(&next.pos.coords)
            });

        let centroid = vertices
            .iter()
            .fold(Vector3::zeros(), |acc, v| acc + v.pos.coords)
            / vertices.len() as Real;

        match newell.try_normalize(EPSILON * EPSILON) {
            Some(normal) => Plane {
                normal,
                w: normal.dot(&centroid),
            },
            // collinear or coincident vertices, keep the first vertex normal if usable
            None => {
                let normal = vertices[0]
                    .normal
                    .try_normalize(EPSILON)
                    .unwrap_or_else(Vector3::z);
                Plane {
                    normal,
                    w: normal.dot(&centroid),
                }
            },
        }
    }

    pub const fn normal(&self) -> Vector3<Real> {
        self.normal
    }

    pub const fn offset(&self) -> Real {
        self.w
    }

    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    pub fn flipped(&self) -> Self {
        Plane {
            normal: -self.normal,
            w: -self.w,
        }
    }

    /// Signed distance of `point` from the plane (positive in front).
    #[inline]
    pub fn signed_distance(&self, point: &Point3<Real>) -> Real {
        self.normal.dot(&point.coords) - self.w
    }

    /// Classify a point as [`FRONT`], [`BACK`] or [`COPLANAR`] using the crate tolerance.
    pub fn orient_point(&self, point: &Point3<Real>) -> i8 {
        let d = self.signed_distance(point);
        if d > tolerance() {
            FRONT
        } else if d < -tolerance() {
            BACK
        } else {
            COPLANAR
        }
    }

    /// Split a convex polygon by this plane.
    ///
    /// Spanning polygons are cut along the plane; the new vertices are placed
    /// exactly on the plane so both halves share them.
    pub fn split_polygon<S: Clone + Send + Sync + Debug>(
        &self,
        polygon: &Polygon<S>,
    ) -> SplitPolygons<S> {
        let mut out = SplitPolygons {
            coplanar_front: Vec::new(),
            coplanar_back: Vec::new(),
            front: Vec::new(),
            back: Vec::new(),
        };

        let types: Vec<i8> = polygon
            .vertices
            .iter()
            .map(|v| self.orient_point(&v.pos))
            .collect();
        let polygon_type = types.iter().fold(COPLANAR, |acc, &t| acc | t);

        match polygon_type {
            COPLANAR => {
                if self.normal.dot(&polygon.plane.normal()) > 0.0 {
                    out.coplanar_front.push(polygon.clone());
                } else {
                    out.coplanar_back.push(polygon.clone());
                }
            },
            FRONT => out.front.push(polygon.clone()),
            BACK => out.back.push(polygon.clone()),
            _ => {
                let count = polygon.vertices.len();
                let mut split_front = Vec::with_capacity(count + 1);
                let mut split_back = Vec::with_capacity(count + 1);

                for i in 0..count {
                    let j = (i + 1) % count;
                    let (type_i, type_j) = (types[i], types[j]);
                    let vertex_i = &polygon.vertices[i];
                    let vertex_j = &polygon.vertices[j];

                    if type_i != BACK {
                        split_front.push(*vertex_i);
                    }
                    if type_i != FRONT {
                        split_back.push(*vertex_i);
                    }

                    if (type_i | type_j) == SPANNING {
                        let denom = self.normal.dot(&(vertex_j.pos - vertex_i.pos));
                        if denom.abs() > EPSILON {
                            let t = (self.w - self.normal.dot(&vertex_i.pos.coords)) / denom;
                            let mut crossing = vertex_i.interpolate(vertex_j, t);
                            // snap onto the plane so both halves agree on the seam
                            crossing.pos -= self.normal * self.signed_distance(&crossing.pos);
                            split_front.push(crossing);
                            split_back.push(crossing);
                        }
                    }
                }

                if split_front.len() >= 3 {
                    out.front.push(Polygon::with_plane(
                        split_front,
                        polygon.plane,
                        polygon.metadata.clone(),
                    ));
                }
                if split_back.len() >= 3 {
                    out.back.push(Polygon::with_plane(
                        split_back,
                        polygon.plane,
                        polygon.metadata.clone(),
                    ));
                }
            },
        }

        out
    }

    /// Orthonormal `(u, v)` spanning the plane with `u × v = n`.
    pub fn basis(&self) -> (Vector3<Real>, Vector3<Real>) {
        let helper = if self.normal.x.abs() < 0.9 {
            Vector3::x()
        } else {
            Vector3::y()
        };
        let u = helper.cross(&self.normal).normalize();
        let v = self.normal.cross(&u);
        (u, v)
    }

    /// Point on the plane closest to the origin.
    pub fn origin(&self) -> Point3<Real> {
        Point3::from(self.normal * self.w)
    }

    /// Express a point in the plane's 2D `(u, v)` frame (the normal component is dropped).
    pub fn project(&self, point: &Point3<Real>) -> Point2<Real> {
        let (u, v) = self.basis();
        let d = point - self.origin();
        Point2::new(d.dot(&u), d.dot(&v))
    }

    /// Inverse of [`Plane::project`].
    pub fn unproject(&self, point: &Point2<Real>) -> Point3<Real> {
        let (u, v) = self.basis();
        self.origin() + u * point.x + v * point.y
    }
}
