// main.rs
//
// Break a cube and a sphere, throw the pieces into a rapier world and watch them fly.
// Run with RUST_LOG=debug (or trace) to see the fragmentation as it happens.

use meshbreak::{BreakError, BreakerConfig, Mesh, MeshBreaker, Pose, RapierWorld};
use nalgebra::{Point3, Vector3};

// Materials are plain tags here
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Material {
    Stone,
    Glass,
    Rubble,
}

fn main() -> Result<(), BreakError> {
    env_logger::init();

    let mut world = RapierWorld::default();

    let cube = Mesh::cube(2.0, Some(Material::Stone));
    let mut cube_breaker = MeshBreaker::new(
        cube,
        Pose::from_position(Point3::new(-3.0, 1.0, 0.0)).with_rotation_degrees(0.0, 30.0, 0.0),
        BreakerConfig::default().with_seed(42).with_cap(Material::Rubble),
    )?;

    let sphere = Mesh::sphere(1.0, 16, 8, Some(Material::Glass));
    let mut sphere_breaker = MeshBreaker::new(
        sphere,
        Pose::from_position(Point3::new(3.0, 1.0, 0.0)).with_scale(Vector3::new(1.0, 2.0, 1.0)),
        BreakerConfig::default()
            .with_max_generation(2)
            .with_seed(7)
            .with_density(2.5),
    )?;

    let blast = Point3::new(0.0, 0.0, 0.0);

    let cube_pieces = cube_breaker.break_and_explode(&blast, 20.0, 10.0, &mut world)?;
    log::info!("cube broke into {} pieces", cube_pieces.len());
    for piece in cube_pieces {
        let caps = piece
            .mesh
            .polygons
            .iter()
            .filter(|p| p.metadata() == Some(&Material::Rubble))
            .count();
        log::info!(
            "  {} gen {} at {} ({} polygons, {} cap)",
            piece.id,
            piece.generation,
            piece.pose.position,
            piece.mesh.polygons.len(),
            caps
        );
    }

    let sphere_pieces = sphere_breaker.break_and_explode(&blast, 20.0, 10.0, &mut world)?;
    log::info!("sphere broke into {} pieces", sphere_pieces.len());

    if let Some(fragmentation) = cube_breaker.fragmentation() {
        let tree = fragmentation.tree();
        log::info!(
            "cube cut tree: {} nodes, {} leaves, depth {}",
            tree.len(),
            tree.leaves().len(),
            tree.max_depth()
        );
    }

    for _ in 0..60 {
        world.step();
    }
    log::info!("simulated one second with {} bodies", world.body_count());

    for (_, body) in world.bodies.iter() {
        log::debug!("body at {} moving {}", body.translation(), body.linvel());
    }

    Ok(())
}
