//! `Mesh` struct: the polygon soup owned by every fragment

use crate::errors::ValidationError;
use crate::float_types::{Real, parry3d::bounding_volume::Aabb};
use nalgebra::{Point3, Vector3};
use std::{fmt::Debug, sync::OnceLock};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub mod plane;
pub mod polygon;
pub mod shapes;
pub mod vertex;

use polygon::Polygon;
use vertex::Vertex;

#[derive(Clone, Debug)]
pub struct Mesh<S: Clone + Send + Sync + Debug> {
    /// 3D polygons in the owner's local frame
    pub polygons: Vec<Polygon<S>>,

    /// Lazily calculated local AABB that spans `polygons`.
    pub bounding_box: OnceLock<Aabb>,

    /// Mesh-wide material, used as the default cap material
    pub metadata: Option<S>,
}

impl<S: Clone + Send + Sync + Debug> Default for Mesh<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone + Send + Sync + Debug> Mesh<S> {
    /// Returns a new empty Mesh
    pub const fn new() -> Self {
        Mesh {
            polygons: Vec::new(),
            bounding_box: OnceLock::new(),
            metadata: None,
        }
    }

    /// Build a Mesh from an existing polygon list
    pub fn from_polygons(polygons: Vec<Polygon<S>>, metadata: Option<S>) -> Self {
        Mesh {
            polygons,
            bounding_box: OnceLock::new(),
            metadata,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Helper to collect all vertices from the mesh.
    #[cfg(not(feature = "parallel"))]
    pub fn vertices(&self) -> Vec<Vertex> {
        self.polygons
            .iter()
            .flat_map(|p| p.vertices.iter().copied())
            .collect()
    }

    /// Parallel helper to collect all vertices from the mesh.
    #[cfg(feature = "parallel")]
    pub fn vertices(&self) -> Vec<Vertex> {
        self.polygons
            .par_iter()
            .flat_map_iter(|p| p.vertices.iter().copied())
            .collect()
    }

    /// Local positions of every vertex (duplicates included).
    pub fn points(&self) -> Vec<Point3<Real>> {
        self.vertices().into_iter().map(|v| v.pos).collect()
    }

    /// Returns a [`parry3d::bounding_volume::Aabb`] indicating the local bounds of all `polygons`.
    ///
    /// An empty mesh yields a trivial box at the origin.
    pub fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            if self.polygons.is_empty() {
                return Aabb::new(Point3::origin(), Point3::origin());
            }
            let mut aabb = Aabb::new_invalid();
            for poly in &self.polygons {
                for v in &poly.vertices {
                    aabb.take_point(v.pos);
                }
            }
            aabb
        })
    }

    /// Invalidates the cached bounding box.
    pub fn invalidate_bounding_box(&mut self) {
        self.bounding_box = OnceLock::new();
    }

    /// Shift every vertex by `offset` in place.
    pub fn translate_mut(&mut self, offset: &Vector3<Real>) {
        #[cfg(feature = "parallel")]
        self.polygons
            .par_iter_mut()
            .for_each(|poly| poly.translate(offset));

        #[cfg(not(feature = "parallel"))]
        for poly in &mut self.polygons {
            poly.translate(offset);
        }

        self.invalidate_bounding_box();
    }

    /// Check that the mesh has renderable, finite geometry.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.polygons.is_empty() {
            return Err(ValidationError::NoPolygons);
        }
        for poly in &self.polygons {
            if poly.vertices.len() < 3 {
                let at = poly.vertices.first().map(|v| v.pos).unwrap_or_else(Point3::origin);
                return Err(ValidationError::TooFewPoints(at));
            }
            if let Some(bad) = poly.vertices.iter().find(|v| !v.is_finite()) {
                return Err(ValidationError::InvalidCoordinate(bad.pos));
            }
        }
        Ok(())
    }

    /// Material to put on cut faces when the caller gave none: the mesh
    /// material, else the first polygon's.
    pub fn default_cap_material(&self) -> Option<&S> {
        self.metadata
            .as_ref()
            .or_else(|| self.polygons.iter().find_map(|p| p.metadata.as_ref()))
    }
}
