//! Handing finished fragments to a physics engine and blowing them apart.

use crate::errors::{BreakError, PhysicsError};
use crate::float_types::rapier3d::prelude::{
    CCDSolver, ColliderBuilder, ColliderSet, DefaultBroadPhase, ImpulseJointSet,
    IntegrationParameters, IslandManager, MultibodyJointSet, NarrowPhase, PhysicsPipeline,
    QueryPipeline, RigidBodyBuilder, RigidBodyHandle, RigidBodySet, SharedShape,
};
use crate::float_types::{EPSILON, Real};
use crate::fragment::{Fragment, FragmentId, Lineage};
use hashbrown::HashSet;
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;

/// Impulse a body at `body` receives from an explosion at `point`.
///
/// Bodies farther than `radius` get nothing; inside it the magnitude falls off
/// linearly from `force` at the center to zero at the rim. A non-positive
/// radius disables both the cutoff and the falloff. A body sitting on the
/// explosion point is pushed along +Y.
pub fn explosion_impulse(
    body: &Point3<Real>,
    point: &Point3<Real>,
    force: Real,
    radius: Real,
) -> Option<Vector3<Real>> {
    let delta = body - point;
    let distance = delta.norm();
    if radius > 0.0 && distance > radius {
        return None;
    }

    let falloff = if radius > 0.0 {
        1.0 - distance / radius
    } else {
        1.0
    };
    let direction = delta.try_normalize(EPSILON).unwrap_or_else(Vector3::y);
    Some(direction * force * falloff)
}

/// Physics capability consumed by [`ExplosionDispatcher`].
pub trait PhysicsBody<S: Clone + Send + Sync + Debug> {
    type Handle: Clone + Debug;

    /// Create a dynamic body with a convex collider matching `fragment`.
    fn attach(&mut self, fragment: &Fragment<S>, density: Real) -> Result<Self::Handle, PhysicsError>;

    /// Remove a body created by [`attach`](PhysicsBody::attach) together with its colliders.
    fn detach(&mut self, handle: &Self::Handle);

    /// Apply a point-explosion impulse to an attached body.
    fn apply_explosion(
        &mut self,
        handle: &Self::Handle,
        point: &Point3<Real>,
        force: Real,
        radius: Real,
    );
}

/// Attaches each fragment at most once, then applies the explosion.
///
/// Fragments are remembered by lineage and id, so one dispatcher can serve
/// the fragmentations of several source objects.
#[derive(Debug, Clone)]
pub struct ExplosionDispatcher {
    attached: HashSet<(Lineage, FragmentId)>,
    pub density: Real,
}

impl Default for ExplosionDispatcher {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl ExplosionDispatcher {
    pub fn new(density: Real) -> Self {
        ExplosionDispatcher {
            attached: HashSet::new(),
            density,
        }
    }

    pub fn is_attached<S: Clone + Send + Sync + Debug>(&self, fragment: &Fragment<S>) -> bool {
        self.attached.contains(&(fragment.lineage, fragment.id))
    }

    /// Attach every fragment and push it away from `point`.
    ///
    /// Either every fragment gets a body or none does. Fails with
    /// [`BreakError::AlreadyAttached`] before touching `physics` if any
    /// fragment was attached by an earlier call (or appears twice). When
    /// `physics` rejects a fragment, the bodies created so far are detached
    /// again and the call can be retried.
    pub fn explode<S, P>(
        &mut self,
        fragments: &[Fragment<S>],
        point: &Point3<Real>,
        force: Real,
        radius: Real,
        physics: &mut P,
    ) -> Result<Vec<P::Handle>, BreakError>
    where
        S: Clone + Send + Sync + Debug,
        P: PhysicsBody<S> + ?Sized,
    {
        let mut seen = HashSet::with_capacity(fragments.len());
        for fragment in fragments {
            let key = (fragment.lineage, fragment.id);
            if self.attached.contains(&key) || !seen.insert(key) {
                return Err(BreakError::AlreadyAttached(fragment.id));
            }
        }

        let mut handles = Vec::with_capacity(fragments.len());
        for fragment in fragments {
            match physics.attach(fragment, self.density) {
                Ok(handle) => handles.push(handle),
                Err(err) => {
                    log::debug!(
                        "attaching {} failed ({err}), detaching {} bodies",
                        fragment.id,
                        handles.len()
                    );
                    for handle in &handles {
                        physics.detach(handle);
                    }
                    return Err(BreakError::Physics(fragment.id, err));
                },
            }
        }

        for (fragment, handle) in fragments.iter().zip(&handles) {
            self.attached.insert((fragment.lineage, fragment.id));
            physics.apply_explosion(handle, point, force, radius);
        }

        log::debug!(
            "exploded {} fragments from {} (force {force}, radius {radius})",
            handles.len(),
            point
        );
        Ok(handles)
    }
}

/// A self-contained rapier world fragments can be dropped into.
pub struct RapierWorld {
    pub gravity: Vector3<Real>,
    pub integration_parameters: IntegrationParameters,
    pub bodies: RigidBodySet,
    pub colliders: ColliderSet,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
}

impl Default for RapierWorld {
    fn default() -> Self {
        Self::new(Vector3::new(0.0, -9.81, 0.0))
    }
}

impl RapierWorld {
    pub fn new(gravity: Vector3<Real>) -> Self {
        RapierWorld {
            gravity,
            integration_parameters: IntegrationParameters::default(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Advance the simulation by one `integration_parameters.dt`.
    pub fn step(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn body_translation(&self, handle: RigidBodyHandle) -> Option<Vector3<Real>> {
        self.bodies.get(handle).map(|rb| *rb.translation())
    }

    pub fn body_linvel(&self, handle: RigidBodyHandle) -> Option<Vector3<Real>> {
        self.bodies.get(handle).map(|rb| *rb.linvel())
    }
}

impl<S: Clone + Send + Sync + Debug> PhysicsBody<S> for RapierWorld {
    type Handle = RigidBodyHandle;

    /// Dynamic body at the fragment pose (translation plus axis-angle rotation)
    /// with a convex hull of the scale-baked local vertices.
    fn attach(
        &mut self,
        fragment: &Fragment<S>,
        density: Real,
    ) -> Result<RigidBodyHandle, PhysicsError> {
        let points: Vec<Point3<Real>> = fragment
            .mesh
            .points()
            .iter()
            .map(|p| Point3::from(p.coords.component_mul(&fragment.pose.scale)))
            .collect();
        let shape = SharedShape::convex_hull(&points)
            .ok_or(PhysicsError::NoConvexHull(points.len()))?;

        let rb = RigidBodyBuilder::dynamic()
            .translation(fragment.pose.position.coords)
            .rotation(fragment.pose.rotation.scaled_axis())
            .build();
        let handle = self.bodies.insert(rb);

        let collider = ColliderBuilder::new(shape).density(density).build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        if let Some(rb) = self.bodies.get_mut(handle) {
            rb.recompute_mass_properties_from_colliders(&self.colliders);
        }

        log::trace!("attached {} as {:?}", fragment.id, handle);
        Ok(handle)
    }

    fn detach(&mut self, handle: &RigidBodyHandle) {
        self.bodies.remove(
            *handle,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    fn apply_explosion(
        &mut self,
        handle: &RigidBodyHandle,
        point: &Point3<Real>,
        force: Real,
        radius: Real,
    ) {
        let Some(rb) = self.bodies.get_mut(*handle) else {
            return;
        };
        let at = Point3::from(*rb.translation());
        if let Some(impulse) = explosion_impulse(&at, point, force, radius) {
            rb.apply_impulse(impulse, true);
        }
    }
}
