//! Recursive plane-cut fracturing of polygon meshes into physics-ready fragments.
//!
//! A [`MeshBreaker`] owns a source [`Mesh`] and its [`Pose`]. Breaking it cuts
//! the mesh along a random plane through its bounds center, then cuts each
//! piece again, depth first, until every branch reaches
//! [`BreakerConfig::max_generation`]. The leaves are recentered so their pivots
//! sit on their own geometric centers and are cached, so a breaker only ever
//! breaks once. The recursion is recorded in a [`CutTree`].
//!
//! Cutting goes through the [`CutPrimitive`] trait ([`PlaneCutter`] is bundled)
//! and physics through [`PhysicsBody`] ([`RapierWorld`] is bundled), so both
//! can be swapped out or faked in tests.
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **parallel**: use rayon for vertex collection and leaf recentering

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod breaker;
pub mod config;
pub mod cut;
pub mod cut_tree;
pub mod errors;
pub mod explode;
pub mod float_types;
pub mod fragment;
pub mod fragmenter;
pub mod mesh;
pub mod pose;
pub mod recenter;

#[cfg(any(
    all(feature = "f64", feature = "f32"),
    not(any(feature = "f64", feature = "f32"))
))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use breaker::MeshBreaker;
pub use config::{BreakerConfig, DegenerateCutPolicy};
pub use cut::{CutPrimitive, PlaneCutter};
pub use cut_tree::{CutNode, CutTree, NodeFate};
pub use errors::{BreakError, CutError, PhysicsError, ValidationError};
pub use explode::{ExplosionDispatcher, PhysicsBody, RapierWorld};
pub use fragment::{Fragment, FragmentId, Lineage};
pub use fragmenter::{Fragmentation, Fragmenter};
pub use mesh::Mesh;
pub use pose::Pose;
pub use recenter::recenter;
