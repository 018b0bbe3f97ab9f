use meshbreak::{CutError, CutPrimitive, Mesh, PlaneCutter, Pose, float_types::Real};
use nalgebra::{Point3, Vector3};

mod support;

use crate::support::vector_area;

fn cut(
    mesh: &Mesh<u8>,
    pose: &Pose,
    point: Point3<Real>,
    normal: Vector3<Real>,
    cap: Option<&u8>,
) -> Result<Vec<Mesh<u8>>, CutError> {
    PlaneCutter::default()
        .cut(mesh, pose, &point, &normal, cap)
        .map(|children| children.into_iter().flatten().collect())
}

#[test]
fn sphere_halves_are_closed() {
    let sphere: Mesh<u8> = Mesh::sphere(1.0, 24, 12, Some(1));
    let normal = Vector3::new(0.3, -0.8, 0.5);
    let pieces = cut(&sphere, &Pose::identity(), Point3::origin(), normal, Some(&2))
        .expect("plane through the center");
    assert_eq!(pieces.len(), 2);

    for piece in &pieces {
        assert!(vector_area(piece).norm() < 1e-6, "piece is not closed");
        let caps: Vec<_> = piece
            .polygons
            .iter()
            .filter(|p| p.metadata() == Some(&2))
            .collect();
        assert!(!caps.is_empty());
        for poly in caps {
            for v in &poly.vertices {
                assert!(v.pos.coords.dot(&normal.normalize()).abs() < 1e-6);
            }
        }
    }
}

#[test]
fn cap_area_matches_cross_section() {
    let cube: Mesh<u8> = Mesh::cube(2.0, Some(1));
    let pieces = cut(
        &cube,
        &Pose::identity(),
        Point3::new(1.0, 1.0, 1.0),
        Vector3::new(0.0, 1.0, 1.0),
        Some(&5),
    )
    .expect("diagonal cut");

    let cap_area = |mesh: &Mesh<u8>| -> Real {
        mesh.polygons
            .iter()
            .filter(|p| p.metadata() == Some(&5))
            .map(|p| p.doubled_area() * 0.5)
            .sum()
    };
    // section of a 2-cube through its center along a face diagonal: 2 x 2√2
    let expected = 2.0 * 2.0 * (2.0 as Real).sqrt();
    for piece in &pieces {
        assert!((cap_area(piece) - expected).abs() < 1e-9);
    }
}

#[test]
fn cap_falls_back_to_mesh_material() {
    let cube: Mesh<u8> = Mesh::cube(2.0, Some(4));
    let pieces = cut(
        &cube,
        &Pose::identity(),
        Point3::new(1.0, 1.0, 1.0),
        Vector3::z(),
        None,
    )
    .expect("plane through the center");
    for piece in &pieces {
        assert!(piece.polygons.iter().all(|p| p.metadata() == Some(&4)));
        // four split sides, one untouched face, at least one cap triangle
        assert!(piece.polygons.len() >= 6);
    }
}

#[test]
fn plane_on_a_face_misses() {
    let cube: Mesh<u8> = Mesh::cube(2.0, None);
    let result = cut(&cube, &Pose::identity(), Point3::origin(), Vector3::x(), None);
    assert!(matches!(result, Err(CutError::PlaneMissed)));
}

#[test]
fn children_stay_in_the_parent_frame() {
    let pose = Pose::from_position(Point3::new(0.0, 5.0, 0.0)).with_rotation_degrees(0.0, 90.0, 0.0);
    let cube: Mesh<u8> = Mesh::cube(2.0, None);
    let center = pose.transform_point(&Point3::new(1.0, 1.0, 1.0));
    let pieces = cut(&cube, &pose, center, Vector3::y(), None).expect("plane through the center");

    let source_bb = cube.bounding_box();
    for piece in &pieces {
        let bb = piece.bounding_box();
        assert!(bb.mins.coords.iter().zip(source_bb.mins.coords.iter()).all(|(a, b)| *a >= *b - 1e-9));
        assert!(bb.maxs.coords.iter().zip(source_bb.maxs.coords.iter()).all(|(a, b)| *a <= *b + 1e-9));
    }
    // world Y is local Y here, so the seam is at local y = 1
    let ys: Vec<Real> = pieces.iter().map(|p| p.bounding_box().mins.y).collect();
    assert!(ys.iter().any(|y| (y - 1.0).abs() < 1e-9));
}
