//! Struct and functions for working with planar `Polygon`s

use crate::float_types::{Real, parry3d::bounding_volume::Aabb};
use crate::mesh::plane::Plane;
use crate::mesh::vertex::Vertex;
use nalgebra::Vector3;
use std::sync::OnceLock;

/// A convex planar polygon.
///
/// `metadata` is the polygon's material; cap polygons created by a cut carry
/// the cap material.
#[derive(Debug, Clone)]
pub struct Polygon<S: Clone> {
    pub vertices: Vec<Vertex>,

    /// The plane on which this polygon lies, used for splitting
    pub plane: Plane,

    /// Lazily‑computed axis‑aligned bounding box of the polygon
    pub bounding_box: OnceLock<Aabb>,

    /// Generic metadata
    pub metadata: Option<S>,
}

impl<S: Clone + PartialEq> PartialEq for Polygon<S> {
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices
            && self.plane == other.plane
            && self.metadata == other.metadata
    }
}

impl<S: Clone + Send + Sync> Polygon<S> {
    /// Create a polygon from vertices, deriving its plane from their winding.
    pub fn new(vertices: Vec<Vertex>, metadata: Option<S>) -> Self {
        let plane = Plane::from_vertices(&vertices);
        Polygon {
            vertices,
            plane,
            bounding_box: OnceLock::new(),
            metadata,
        }
    }

    /// Create a polygon that keeps an already known supporting plane.
    pub const fn with_plane(vertices: Vec<Vertex>, plane: Plane, metadata: Option<S>) -> Self {
        Polygon {
            vertices,
            plane,
            bounding_box: OnceLock::new(),
            metadata,
        }
    }

    pub fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            let mut aabb = Aabb::new_invalid();
            for v in &self.vertices {
                aabb.take_point(v.pos);
            }
            aabb
        })
    }

    /// Reverse winding order, flip vertex normals, and flip the plane normal
    pub fn flip(&mut self) {
        self.vertices.reverse();
        for v in &mut self.vertices {
            v.flip();
        }
        self.plane.flip();
    }

    /// Move every vertex by `offset`, keeping the cached plane and bounds consistent.
    pub fn translate(&mut self, offset: &Vector3<Real>) {
        for v in &mut self.vertices {
            v.pos += *offset;
        }
        self.plane = Plane::from_normal(
            self.plane.normal(),
            self.plane.offset() + self.plane.normal().dot(offset),
        );
        self.bounding_box = OnceLock::new();
    }

    /// Twice the polygon's area (length of the Newell normal).
    pub fn doubled_area(&self) -> Real {
        self.vertices
            .iter()
            .zip(self.vertices.iter().cycle().skip(1))
            .fold(Vector3::zeros(), |acc, (curr, next)| {
                acc + curr.pos.coords.cross(&next.pos.coords)
            })
            .norm()
    }

    pub const fn metadata(&self) -> Option<&S> {
        self.metadata.as_ref()
    }
}
