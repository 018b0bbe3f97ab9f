//! The invocation surface: one breakable object, broken at most once.

use crate::config::BreakerConfig;
use crate::cut::{CutPrimitive, PlaneCutter};
use crate::errors::BreakError;
use crate::explode::{ExplosionDispatcher, PhysicsBody};
use crate::float_types::Real;
use crate::fragment::Fragment;
use crate::fragmenter::{Fragmentation, Fragmenter};
use crate::mesh::Mesh;
use crate::pose::Pose;
use nalgebra::Point3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt::Debug;

/// Owns a source fragment and caches its fragmentation.
///
/// The first [`break_apart`](MeshBreaker::break_apart) runs the fragmenter;
/// every later call returns the same fragments without cutting again.
///
/// ```
/// # use meshbreak::{BreakerConfig, MeshBreaker, Mesh, Pose};
/// let cube: Mesh<()> = Mesh::cube(2.0, None);
/// let config = BreakerConfig::default().with_max_generation(2).with_seed(1);
/// let mut breaker = MeshBreaker::new(cube, Pose::identity(), config).unwrap();
/// assert!(!breaker.is_broken());
///
/// let count = breaker.break_apart().unwrap().len();
/// assert!(breaker.is_broken());
/// assert!(count <= 4);
/// ```
#[derive(Debug)]
pub struct MeshBreaker<S: Clone + Send + Sync + Debug, C = PlaneCutter, R = StdRng> {
    source: Fragment<S>,
    config: BreakerConfig<S>,
    fragmenter: Fragmenter<C>,
    rng: R,
    fragmentation: Option<Fragmentation<S>>,
    dispatcher: ExplosionDispatcher,
}

impl<S: Clone + Send + Sync + Debug> MeshBreaker<S> {
    /// Breaker using the bundled [`PlaneCutter`] and a [`StdRng`] seeded from
    /// `config.seed`, or from OS entropy when no seed is set.
    pub fn new(mesh: Mesh<S>, pose: Pose, config: BreakerConfig<S>) -> Result<Self, BreakError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_parts(Fragment::source(mesh, pose), config, PlaneCutter::default(), rng)
    }
}

impl<S, C, R> MeshBreaker<S, C, R>
where
    S: Clone + Send + Sync + Debug,
    C: CutPrimitive<S>,
    R: Rng,
{
    /// Assemble a breaker from explicit parts. The source is validated here and
    /// broken immediately when `config.break_on_create` is set.
    pub fn with_parts(
        source: Fragment<S>,
        config: BreakerConfig<S>,
        cutter: C,
        rng: R,
    ) -> Result<Self, BreakError> {
        source.validate()?;
        let mut breaker = MeshBreaker {
            fragmenter: Fragmenter::from_config(cutter, &config),
            dispatcher: ExplosionDispatcher::new(config.density),
            source,
            config,
            rng,
            fragmentation: None,
        };
        if breaker.config.break_on_create {
            breaker.break_apart()?;
        }
        Ok(breaker)
    }

    /// Fragment the source once and return the cached leaves.
    pub fn break_apart(&mut self) -> Result<&[Fragment<S>], BreakError> {
        if self.fragmentation.is_none() {
            let fragmentation = self.fragmenter.fragment(
                self.source.clone(),
                self.config.cap.as_ref(),
                &mut self.rng,
            )?;
            self.fragmentation = Some(fragmentation);
        } else {
            log::trace!("already broken, returning cached fragments");
        }
        Ok(self.cached())
    }

    /// [`break_apart`](Self::break_apart), then give every fragment a body in
    /// `physics` and push it away from `point`.
    ///
    /// Fragments can only be attached once, so a second call fails with
    /// [`BreakError::AlreadyAttached`].
    pub fn break_and_explode<P>(
        &mut self,
        point: &Point3<Real>,
        force: Real,
        radius: Real,
        physics: &mut P,
    ) -> Result<&[Fragment<S>], BreakError>
    where
        P: PhysicsBody<S> + ?Sized,
    {
        self.break_apart()?;
        let fragments = self
            .fragmentation
            .as_ref()
            .map(|f| f.fragments.as_slice())
            .unwrap_or_default();
        self.dispatcher
            .explode(fragments, point, force, radius, physics)?;
        Ok(fragments)
    }

    /// `true` once a fragmentation has been cached, even an empty one.
    pub const fn is_broken(&self) -> bool {
        self.fragmentation.is_some()
    }

    pub const fn fragmentation(&self) -> Option<&Fragmentation<S>> {
        self.fragmentation.as_ref()
    }

    pub const fn source(&self) -> &Fragment<S> {
        &self.source
    }

    pub const fn config(&self) -> &BreakerConfig<S> {
        &self.config
    }

    fn cached(&self) -> &[Fragment<S>] {
        self.fragmentation
            .as_ref()
            .map(|f| f.fragments.as_slice())
            .unwrap_or_default()
    }
}
