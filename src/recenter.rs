//! Pivot recentering: move a fragment's origin onto its geometric center.

use crate::fragment::Fragment;
use std::fmt::Debug;

/// Shift the local vertices of `fragment` so that `pose.position` sits on the
/// center of its world-space bounds. World-space vertex positions are kept.
///
/// Empty fragments are left alone.
pub fn recenter<S: Clone + Send + Sync + Debug>(fragment: &mut Fragment<S>) {
    if fragment.mesh.is_empty() {
        return;
    }

    let center = fragment.world_bounds_center();
    let offset = center - fragment.pose.position;
    let local_shift = fragment.pose.inverse_transform_vector(&offset);

    fragment.mesh.translate_mut(&-local_shift);
    fragment.pose.position = center;
}
