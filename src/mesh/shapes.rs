//! Primitive solids used as fracture sources

use crate::float_types::{PI, Real, TAU};
use crate::mesh::Mesh;
use crate::mesh::polygon::Polygon;
use crate::mesh::vertex::Vertex;
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;

impl<S: Clone + Debug + Send + Sync> Mesh<S> {
    /// Axis-aligned box spanning `[0, width] × [0, length] × [0, height]`.
    ///
    /// ```text
    ///     4-------5
    ///    /|      /|
    ///   0-------1 |
    ///   | |     | |
    ///   | 7-----|-6
    ///   |/      |/
    ///   3-------2
    /// ```
    /// Faces wind counter-clockwise seen from outside.
    pub fn cuboid(width: Real, length: Real, height: Real, metadata: Option<S>) -> Mesh<S> {
        let corners = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(width, 0.0, 0.0),
            Point3::new(width, length, 0.0),
            Point3::new(0.0, length, 0.0),
            Point3::new(0.0, 0.0, height),
            Point3::new(width, 0.0, height),
            Point3::new(width, length, height),
            Point3::new(0.0, length, height),
        ];

        let faces: [([usize; 4], Vector3<Real>); 6] = [
            ([0, 3, 2, 1], -Vector3::z()),
            ([4, 5, 6, 7], Vector3::z()),
            ([0, 1, 5, 4], -Vector3::y()),
            ([3, 7, 6, 2], Vector3::y()),
            ([0, 4, 7, 3], -Vector3::x()),
            ([1, 2, 6, 5], Vector3::x()),
        ];

        let polygons = faces
            .iter()
            .map(|(indices, normal)| {
                let vertices = indices
                    .iter()
                    .map(|&i| Vertex::new(corners[i], *normal))
                    .collect();
                Polygon::new(vertices, metadata.clone())
            })
            .collect();

        Mesh::from_polygons(polygons, metadata)
    }

    pub fn cube(width: Real, metadata: Option<S>) -> Mesh<S> {
        Self::cuboid(width, width, width, metadata)
    }

    /// UV sphere centered on the origin, made of triangles.
    ///
    /// `segments` slices around the Y axis (≥ 3), `stacks` bands from pole to pole (≥ 2).
    pub fn sphere(radius: Real, segments: usize, stacks: usize, metadata: Option<S>) -> Mesh<S> {
        let segments = segments.max(3);
        let stacks = stacks.max(2);

        let point = |i: usize, j: usize| -> Point3<Real> {
            let theta = (i % segments) as Real / segments as Real * TAU;
            let phi = j as Real / stacks as Real * PI;
            Point3::new(
                radius * phi.sin() * theta.cos(),
                radius * phi.cos(),
                radius * phi.sin() * theta.sin(),
            )
        };

        let mut polygons = Vec::with_capacity(segments * stacks * 2);
        let mut push_triangle = |a: Point3<Real>, b: Point3<Real>, c: Point3<Real>| {
            let mut tri = Polygon::new(
                vec![
                    Vertex::new(a, a.coords.normalize()),
                    Vertex::new(b, b.coords.normalize()),
                    Vertex::new(c, c.coords.normalize()),
                ],
                metadata.clone(),
            );
            // keep faces pointing away from the center whatever the parameterization
            let centroid = (a.coords + b.coords + c.coords) / 3.0;
            if tri.plane.normal().dot(&centroid) < 0.0 {
                tri.flip();
                for v in &mut tri.vertices {
                    v.flip();
                }
            }
            polygons.push(tri);
        };

        for j in 0..stacks {
            for i in 0..segments {
                let p00 = point(i, j);
                let p10 = point(i + 1, j);
                let p01 = point(i, j + 1);
                let p11 = point(i + 1, j + 1);
                if j != 0 {
                    push_triangle(p00, p10, p11);
                }
                if j != stacks - 1 {
                    push_triangle(p00, p11, p01);
                }
            }
        }

        Mesh::from_polygons(polygons, metadata)
    }
}
