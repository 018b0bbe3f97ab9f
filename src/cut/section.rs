//! Cross-section of a cut piece: boundary loops on the cut plane and the cap
//! polygons that close them.

use crate::float_types::{Real, tolerance};
use crate::mesh::plane::{COPLANAR, Plane};
use crate::mesh::polygon::Polygon;
use crate::mesh::vertex::Vertex;
use geo::{Contains, Coord, LineString, Point, Polygon as GeoPolygon, TriangulateEarcut};
use nalgebra::{Point2, Vector3};
use std::fmt::Debug;

/// Distance under which two section vertices are treated as the same point.
fn weld_distance() -> Real {
    tolerance() * 10.0
}

fn same_point(a: &Point2<Real>, b: &Point2<Real>) -> bool {
    (a - b).norm_squared() <= weld_distance() * weld_distance()
}

/// Open boundary edges of `polygons` that lie on `plane`, projected into the plane.
///
/// Edges shared by two polygons of the piece appear once in each direction and
/// cancel out; what remains is the rim that a cap must close.
pub fn boundary_edges<S: Clone>(polygons: &[Polygon<S>], plane: &Plane) -> Vec<[Point2<Real>; 2]> {
    let mut edges: Vec<[Point2<Real>; 2]> = Vec::new();

    for poly in polygons {
        let count = poly.vertices.len();
        for i in 0..count {
            let a = &poly.vertices[i];
            let b = &poly.vertices[(i + 1) % count];
            if plane.orient_point(&a.pos) != COPLANAR || plane.orient_point(&b.pos) != COPLANAR {
                continue;
            }
            let edge = [plane.project(&a.pos), plane.project(&b.pos)];
            if same_point(&edge[0], &edge[1]) {
                continue;
            }
            match edges
                .iter()
                .position(|e| same_point(&e[0], &edge[1]) && same_point(&e[1], &edge[0]))
            {
                Some(twin) => {
                    edges.swap_remove(twin);
                },
                None => edges.push(edge),
            }
        }
    }

    edges
}

/// Chain edges end-to-start into closed loops. Chains that never close are discarded.
pub fn chain_loops(mut edges: Vec<[Point2<Real>; 2]>) -> Vec<Vec<Point2<Real>>> {
    let mut loops = Vec::new();

    while let Some(first) = edges.pop() {
        let start = first[0];
        let mut ring = vec![first[0]];
        let mut cursor = first[1];
        let mut closed = false;

        loop {
            if same_point(&cursor, &start) {
                closed = true;
                break;
            }
            ring.push(cursor);
            let Some(next) = edges.iter().position(|e| same_point(&e[0], &cursor)) else {
                break;
            };
            cursor = edges.swap_remove(next)[1];
        }

        if closed && ring.len() >= 3 {
            loops.push(ring);
        } else {
            log::trace!("discarding open section chain of {} points", ring.len());
        }
    }

    loops
}

fn signed_area(ring: &[Point2<Real>]) -> Real {
    ring.iter()
        .zip(ring.iter().cycle().skip(1))
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum::<Real>()
        * 0.5
}

fn to_geo(ring: &[Point2<Real>]) -> GeoPolygon<Real> {
    let coords: Vec<Coord<Real>> = ring.iter().map(|p| Coord { x: p.x, y: p.y }).collect();
    GeoPolygon::new(LineString::new(coords), Vec::new())
}

/// Triangulate nested loops: even nesting depth is solid, odd depth is a hole.
pub fn triangulate_loops(loops: &[Vec<Point2<Real>>]) -> Vec<[Point2<Real>; 3]> {
    let shapes: Vec<GeoPolygon<Real>> = loops.iter().map(|l| to_geo(l)).collect();
    let areas: Vec<Real> = loops.iter().map(|l| signed_area(l).abs()).collect();

    // containers[i] = loops strictly enclosing loop i
    let containers: Vec<Vec<usize>> = loops
        .iter()
        .enumerate()
        .map(|(i, ring)| {
            let probe = Point::new(ring[0].x, ring[0].y);
            (0..loops.len())
                .filter(|&j| j != i && areas[j] > areas[i] && shapes[j].contains(&probe))
                .collect()
        })
        .collect();

    let mut triangles = Vec::new();
    for (outer, enclosing) in containers.iter().enumerate() {
        if enclosing.len() % 2 == 1 {
            continue;
        }

        let holes: Vec<LineString<Real>> = containers
            .iter()
            .enumerate()
            .filter(|(_, c)| c.len() == enclosing.len() + 1 && c.iter().any(|&j| j == outer))
            .map(|(hole, _)| shapes[hole].exterior().clone())
            .collect();

        let polygon = GeoPolygon::new(shapes[outer].exterior().clone(), holes);
        let raw = polygon.earcut_triangles_raw();
        let at = |i: usize| Point2::new(raw.vertices[2 * i], raw.vertices[2 * i + 1]);
        triangles.extend(
            raw.triangle_indices
                .chunks_exact(3)
                .map(|tri| [at(tri[0]), at(tri[1]), at(tri[2])]),
        );
    }

    triangles
}

/// Lift 2D cap triangles back onto `plane` as polygons facing `facing`.
pub fn cap_polygons<S: Clone + Send + Sync + Debug>(
    triangles: &[[Point2<Real>; 3]],
    plane: &Plane,
    facing: &Vector3<Real>,
    material: Option<&S>,
) -> Vec<Polygon<S>> {
    let cap_plane = if plane.normal().dot(facing) >= 0.0 {
        *plane
    } else {
        plane.flipped()
    };

    triangles
        .iter()
        .filter_map(|tri| {
            let [a, b, c] = tri.map(|p| plane.unproject(&p));
            let winding = (b - a).cross(&(c - a));
            if winding.norm_squared() <= Real::EPSILON {
                return None;
            }
            let ordered = if winding.dot(facing) >= 0.0 {
                [a, b, c]
            } else {
                [a, c, b]
            };
            let vertices = ordered
                .iter()
                .map(|p| Vertex::new(*p, cap_plane.normal()))
                .collect();
            Some(Polygon::with_plane(vertices, cap_plane, material.cloned()))
        })
        .collect()
}
