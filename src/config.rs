//! Runtime knobs for a [`MeshBreaker`](crate::breaker::MeshBreaker).

use crate::float_types::Real;
use std::fmt::Debug;

/// What the fragmenter does when a cut attempt fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegenerateCutPolicy {
    /// The fragment stays a leaf at its current generation.
    #[default]
    Terminal,
    /// Draw a new random plane up to `attempts` more times before giving up.
    Retry { attempts: u32 },
}

impl DegenerateCutPolicy {
    /// Total number of cut attempts allowed for one fragment.
    pub const fn max_attempts(self) -> u32 {
        match self {
            DegenerateCutPolicy::Terminal => 1,
            DegenerateCutPolicy::Retry { attempts } => attempts.saturating_add(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreakerConfig<S: Clone + Send + Sync + Debug> {
    /// Number of cut levels; 0 leaves the source untouched
    pub max_generation: u32,
    pub degenerate: DegenerateCutPolicy,
    /// Seed for the cut-plane RNG; `None` seeds from OS entropy
    pub seed: Option<u64>,
    /// Material for cap faces; falls back to the source's own material
    pub cap: Option<S>,
    /// Collider density used when fragments are handed to physics
    pub density: Real,
    /// Break as soon as the breaker is constructed
    pub break_on_create: bool,
}

impl<S: Clone + Send + Sync + Debug> Default for BreakerConfig<S> {
    fn default() -> Self {
        BreakerConfig {
            max_generation: 3,
            degenerate: DegenerateCutPolicy::Terminal,
            seed: None,
            cap: None,
            density: 1.0,
            break_on_create: false,
        }
    }
}

impl<S: Clone + Send + Sync + Debug> BreakerConfig<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn with_max_generation(mut self, max_generation: u32) -> Self {
        self.max_generation = max_generation;
        self
    }

    pub const fn with_degenerate_policy(mut self, policy: DegenerateCutPolicy) -> Self {
        self.degenerate = policy;
        self
    }

    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_cap(mut self, cap: S) -> Self {
        self.cap = Some(cap);
        self
    }

    pub const fn with_density(mut self, density: Real) -> Self {
        self.density = density;
        self
    }

    pub const fn with_break_on_create(mut self, enabled: bool) -> Self {
        self.break_on_create = enabled;
        self
    }
}
