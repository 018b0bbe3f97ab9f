use meshbreak::{
    DegenerateCutPolicy, Fragment, FragmentId, Fragmenter, Mesh, NodeFate, PlaneCutter, Pose,
    float_types::Real,
};
use nalgebra::Point3;
use rand::SeedableRng;
use rand::rngs::StdRng;

mod support;

use crate::support::{AlwaysFail, Duplicate, Vanish, posed_cube};

fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

#[test]
fn depth_never_exceeds_max_generation() {
    for max_generation in 0..=4 {
        let result = Fragmenter::new(PlaneCutter::default())
            .with_max_generation(max_generation)
            .fragment(posed_cube(), None, &mut seeded(11))
            .expect("valid source");

        assert!(result.tree.max_depth() <= max_generation);
        for fragment in result.fragments() {
            assert!(fragment.generation <= max_generation);
            assert_eq!(
                result.tree.path_to_root(fragment.id).len() as u32,
                fragment.generation
            );
        }
    }
}

#[test]
fn zero_generation_returns_the_source_untouched() {
    let source = posed_cube();
    let result = Fragmenter::new(PlaneCutter::default())
        .with_max_generation(0)
        .fragment(source.clone(), None, &mut seeded(1))
        .expect("valid source");

    assert_eq!(result.len(), 1);
    let only = &result.fragments[0];
    assert_eq!(only.id, FragmentId::ROOT);
    assert_eq!(only.generation, 0);
    assert_eq!(only.pose, source.pose);
    assert_eq!(only.mesh.polygons, source.mesh.polygons);
    assert_eq!(result.tree.len(), 1);
}

#[test]
fn zero_children_drop_the_fragment() {
    let result = Fragmenter::new(Vanish)
        .fragment(posed_cube(), None, &mut seeded(1))
        .expect("valid source");
    assert!(result.is_empty());
    assert_eq!(
        result.tree.node(FragmentId::ROOT).map(|n| n.fate),
        Some(NodeFate::Dropped)
    );
}

#[test]
fn leaves_are_never_duplicated() {
    let result = Fragmenter::new(Duplicate)
        .with_max_generation(2)
        .fragment(posed_cube(), None, &mut seeded(1))
        .expect("valid source");
    assert_eq!(result.len(), 4);

    let mut ids: Vec<FragmentId> = result.fragments.iter().map(|f| f.id).collect();
    ids.dedup();
    assert_eq!(ids.len(), 4);
    assert_eq!(ids, result.tree.leaves());
}

#[test]
fn failed_cuts_leave_an_unresolved_leaf() {
    let result = Fragmenter::new(AlwaysFail)
        .with_degenerate_policy(DegenerateCutPolicy::Retry { attempts: 4 })
        .fragment(posed_cube(), None, &mut seeded(1))
        .expect("failures are absorbed");
    assert_eq!(result.len(), 1);
    assert_eq!(result.fragments[0].generation, 0);

    let root = result.tree.node(FragmentId::ROOT).expect("root");
    assert_eq!(root.fate, NodeFate::Unresolved);
    assert_eq!(root.attempts, 5);
}

#[test]
fn recentering_preserves_world_positions() {
    let source = posed_cube();
    let before = source.world_points();

    // the duplicating cutter leaves geometry alone, so every leaf must match the source in world space
    let result = Fragmenter::new(Duplicate)
        .with_max_generation(2)
        .fragment(source, None, &mut seeded(5))
        .expect("valid source");

    for fragment in result.fragments() {
        let after = fragment.world_points();
        assert_eq!(before.len(), after.len());
        for (a, b) in before.iter().zip(&after) {
            assert!((a - b).norm() < 1e-9);
        }
        assert!((fragment.pose.position - fragment.world_bounds_center()).norm() < 1e-9);
    }
}

#[test]
fn cube_two_generations_scenario() {
    let source: Fragment<u8> = Fragment::source(Mesh::cube(2.0, Some(1)), Pose::identity());
    let result = Fragmenter::new(PlaneCutter::default())
        .with_max_generation(2)
        .fragment(source, Some(&9), &mut seeded(2024))
        .expect("valid source");

    assert!(!result.is_empty());
    assert!(result.len() <= 4);

    for fragment in result.fragments() {
        let world = fragment.world_bounds();
        let p = fragment.pose.position;
        for axis in 0..3 {
            assert!(world.mins[axis] < p[axis] && p[axis] < world.maxs[axis]);
        }

        // identity rotation and scale: the local origin is the pivot
        let local = fragment.mesh.bounding_box();
        for axis in 0..3 {
            assert!(local.mins[axis] < 0.0 && 0.0 < local.maxs[axis]);
        }

        // cut pieces carry the cap material
        if fragment.generation > 0 {
            assert!(fragment.mesh.polygons.iter().any(|p| p.metadata() == Some(&9)));
        }
    }
}

#[test]
fn pieces_stay_inside_the_source() {
    let source = posed_cube();
    let bounds = source.world_bounds();
    let result = Fragmenter::new(PlaneCutter::default())
        .with_max_generation(3)
        .fragment(source, None, &mut seeded(77))
        .expect("valid source");

    for fragment in result.fragments() {
        for p in fragment.world_points() {
            for axis in 0..3 {
                assert!(p[axis] >= bounds.mins[axis] - 1e-9);
                assert!(p[axis] <= bounds.maxs[axis] + 1e-9);
            }
        }
    }
}

#[test]
fn same_seed_same_fragments() {
    let run = |seed: u64| {
        Fragmenter::new(PlaneCutter::default())
            .with_max_generation(3)
            .fragment(posed_cube(), None, &mut seeded(seed))
            .expect("valid source")
    };
    let (a, b) = (run(31), run(31));

    assert_eq!(a.len(), b.len());
    assert_eq!(a.tree, b.tree);
    for (x, y) in a.fragments().iter().zip(b.fragments()) {
        assert_eq!(x.id, y.id);
        assert_eq!(x.mesh.polygons.len(), y.mesh.polygons.len());
        assert!((x.pose.position - y.pose.position).norm() < 1e-12);
    }
}

#[test]
fn pieces_share_the_source_lineage() {
    let source = posed_cube();
    let lineage = source.lineage;
    assert_ne!(posed_cube().lineage, lineage);

    let result = Fragmenter::new(PlaneCutter::default())
        .with_max_generation(3)
        .fragment(source, None, &mut seeded(8))
        .expect("valid source");
    assert!(result.fragments().iter().all(|f| f.lineage == lineage));
}

#[test]
fn invalid_sources_are_rejected() {
    let empty: Fragment<u8> = Fragment::source(Mesh::new(), Pose::identity());
    assert!(Fragmenter::new(Duplicate).fragment(empty, None, &mut seeded(1)).is_err());

    let mut nan = posed_cube();
    nan.mesh.polygons[0].vertices[0].pos = Point3::new(Real::NAN, 0.0, 0.0);
    assert!(Fragmenter::new(Duplicate).fragment(nan, None, &mut seeded(1)).is_err());
}
