//! Recursive fragmentation: cut, replace, recurse, then recenter the leaves.

use crate::config::{BreakerConfig, DegenerateCutPolicy};
use crate::cut::CutPrimitive;
use crate::cut_tree::{CutTree, NodeFate};
use crate::errors::{BreakError, CutError};
use crate::float_types::{EPSILON, Real};
use crate::fragment::{Fragment, FragmentId};
use crate::mesh::Mesh;
use crate::pose::Pose;
use crate::recenter::recenter;
use hashbrown::HashSet;
use nalgebra::Vector3;
use rand::Rng;
use std::fmt::Debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Result of one fragmentation: the leaf fragments plus the tree that produced them.
#[derive(Debug, Clone)]
pub struct Fragmentation<S: Clone + Send + Sync + Debug> {
    /// Leaves in ascending id order, already recentered
    pub fragments: Vec<Fragment<S>>,
    pub tree: CutTree,
}

impl<S: Clone + Send + Sync + Debug> Fragmentation<S> {
    pub fn fragments(&self) -> &[Fragment<S>] {
        &self.fragments
    }

    pub const fn tree(&self) -> &CutTree {
        &self.tree
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn get(&self, id: FragmentId) -> Option<&Fragment<S>> {
        self.fragments
            .binary_search_by_key(&id, |f| f.id)
            .ok()
            .map(|i| &self.fragments[i])
    }
}

/// Working state of one `fragment` call.
///
/// `slots` is indexed like the cut tree; a slot is emptied once its fragment
/// has been replaced by children.
struct FragmentationState<S: Clone + Send + Sync + Debug> {
    slots: Vec<Option<Fragment<S>>>,
    live: HashSet<FragmentId>,
    tree: CutTree,
}

/// Drives a [`CutPrimitive`] depth-first until every branch hits the generation limit.
#[derive(Debug, Clone)]
pub struct Fragmenter<C> {
    pub cutter: C,
    pub max_generation: u32,
    pub degenerate: DegenerateCutPolicy,
}

impl<C> Fragmenter<C> {
    pub const fn new(cutter: C) -> Self {
        Fragmenter {
            cutter,
            max_generation: 3,
            degenerate: DegenerateCutPolicy::Terminal,
        }
    }

    /// Take the recursion settings from a breaker configuration.
    pub fn from_config<S: Clone + Send + Sync + Debug>(cutter: C, config: &BreakerConfig<S>) -> Self {
        Fragmenter {
            cutter,
            max_generation: config.max_generation,
            degenerate: config.degenerate,
        }
    }

    pub const fn with_max_generation(mut self, max_generation: u32) -> Self {
        self.max_generation = max_generation;
        self
    }

    pub const fn with_degenerate_policy(mut self, policy: DegenerateCutPolicy) -> Self {
        self.degenerate = policy;
        self
    }

    /// Fracture `source` into leaf fragments.
    ///
    /// The source is validated first and is the only thing that can fail;
    /// failed cuts are absorbed per branch. With `max_generation == 0` the
    /// source comes back as the single fragment, not recentered.
    ///
    /// `cap` defaults to the source's own material.
    pub fn fragment<S, R>(
        &self,
        mut source: Fragment<S>,
        cap: Option<&S>,
        rng: &mut R,
    ) -> Result<Fragmentation<S>, BreakError>
    where
        S: Clone + Send + Sync + Debug,
        C: CutPrimitive<S>,
        R: Rng + ?Sized,
    {
        source.validate()?;

        let mut tree = CutTree::new();
        source.id = tree.push_root();
        source.generation = 0;

        if self.max_generation == 0 {
            log::debug!("max generation is 0, returning the source as is");
            return Ok(Fragmentation {
                fragments: vec![source],
                tree,
            });
        }

        let cap = cap
            .cloned()
            .or_else(|| source.mesh.default_cap_material().cloned());

        let mut state = FragmentationState {
            slots: vec![Some(source)],
            live: HashSet::from([FragmentId::ROOT]),
            tree,
        };
        self.cut_once(&mut state, FragmentId::ROOT, cap.as_ref(), rng);

        let FragmentationState {
            mut slots,
            live,
            tree,
        } = state;

        let mut ids: Vec<FragmentId> = live.into_iter().collect();
        ids.sort_unstable();
        debug_assert_eq!(ids, tree.leaves());

        let mut fragments: Vec<Fragment<S>> = ids
            .into_iter()
            .filter_map(|id| slots[id.index()].take())
            .collect();

        #[cfg(feature = "parallel")]
        fragments.par_iter_mut().for_each(|f| recenter(f));

        #[cfg(not(feature = "parallel"))]
        fragments.iter_mut().for_each(|f| recenter(f));

        log::debug!(
            "fragmented into {} pieces over {} nodes (depth {})",
            fragments.len(),
            tree.len(),
            tree.max_depth()
        );

        Ok(Fragmentation { fragments, tree })
    }

    fn cut_once<S, R>(
        &self,
        state: &mut FragmentationState<S>,
        id: FragmentId,
        cap: Option<&S>,
        rng: &mut R,
    ) where
        S: Clone + Send + Sync + Debug,
        C: CutPrimitive<S>,
        R: Rng + ?Sized,
    {
        let Some(fragment) = state.slots[id.index()].as_ref() else {
            return;
        };
        if fragment.generation >= self.max_generation {
            return;
        }

        let point = fragment.world_bounds_center();
        let mut outcome = Err(CutError::Other("no cut attempted".to_string()));
        for attempt in 0..self.degenerate.max_attempts() {
            let normal = random_normal(&fragment.pose, rng);
            state.tree.record_attempt(id);
            outcome = self
                .cutter
                .cut(&fragment.mesh, &fragment.pose, &point, &normal, cap);
            match &outcome {
                Ok(_) => break,
                Err(err) => log::debug!("cut of {id} failed on attempt {}: {err}", attempt + 1),
            }
        }

        let children = match outcome {
            Ok(children) => children,
            Err(err) => {
                if id == FragmentId::ROOT {
                    log::warn!("source could not be cut ({err}), it stays whole");
                }
                state.tree.set_fate(id, NodeFate::Unresolved);
                return;
            },
        };

        let (lineage, pose, generation) = (fragment.lineage, fragment.pose, fragment.generation);
        state.live.remove(&id);
        state.slots[id.index()] = None;

        let usable: Vec<Mesh<S>> = children
            .into_iter()
            .flatten()
            .filter(|mesh| !mesh.is_empty())
            .collect();

        if usable.is_empty() {
            log::debug!("cut of {id} produced no usable children, dropping it");
            state.tree.set_fate(id, NodeFate::Dropped);
            return;
        }

        log::trace!("{id} split into {} children at generation {}", usable.len(), generation + 1);
        state.tree.set_fate(id, NodeFate::Split);

        for mesh in usable {
            let child = state.tree.push_child(id);
            debug_assert_eq!(child.index(), state.slots.len());
            state.slots.push(Some(Fragment {
                id: child,
                lineage,
                mesh,
                pose,
                generation: generation + 1,
            }));
            state.live.insert(child);
            self.cut_once(state, child, cap, rng);
        }
    }
}

/// Uniformly drawn direction in `[-1, 1]^3`, normalized and expressed in the
/// fragment's rotated frame. Zero-length draws are redrawn.
fn random_normal<R: Rng + ?Sized>(pose: &Pose, rng: &mut R) -> Vector3<Real> {
    loop {
        let draw: Vector3<Real> = Vector3::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        );
        if let Some(normal) = draw.try_normalize(EPSILON) {
            return pose.rotation * normal;
        }
    }
}
