// parry and rapier builds matching the selected precision
#[cfg(feature = "f64")]
pub use parry3d_f64 as parry3d;
#[cfg(feature = "f64")]
pub use rapier3d_f64 as rapier3d;

#[cfg(feature = "f32")]
pub use parry3d;
#[cfg(feature = "f32")]
pub use rapier3d;

/// Scalar for every coordinate, pose and impulse in the crate.
#[cfg(feature = "f32")]
pub type Real = f32;
/// Scalar for every coordinate, pose and impulse in the crate.
#[cfg(feature = "f64")]
pub type Real = f64;

use core::str::FromStr;
use std::sync::OnceLock;

/// Below this a normal, cut direction or scale component counts as zero.
#[cfg(feature = "f32")]
pub const EPSILON: Real = 1e-4;
/// Below this a normal, cut direction or scale component counts as zero.
#[cfg(feature = "f64")]
pub const EPSILON: Real = 1e-8;

static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

#[inline]
const fn default_tolerance() -> Real {
    #[cfg(feature = "f32")]
    {
        1e-4
    }
    #[cfg(feature = "f64")]
    {
        1e-6
    }
}

/// Distance within which a vertex lies on a cut plane.
///
/// Seam vertices, cap loop chaining and the smallest cuttable fragment
/// (`PlaneCutter::default`) all scale from it. Taken from
/// `MESHBREAK_TOLERANCE` at build time when set, else the precision default.
pub fn tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        if let Some(environment_variable) = option_env!("MESHBREAK_TOLERANCE") {
            if let Ok(value) = Real::from_str(environment_variable) {
                return value.max(Real::EPSILON);
            }
        }
        default_tolerance()
    })
}

/// Fix the tolerance before the first cut; ignored once [`tolerance`] has been read.
pub fn set_tolerance(value: Real) {
    let _ = TOLERANCE_CELL.set(value.max(Real::EPSILON));
}

/// Half turn, for sphere stacks.
#[cfg(feature = "f32")]
pub const PI: Real = core::f32::consts::PI;
/// Half turn, for sphere stacks.
#[cfg(feature = "f64")]
pub const PI: Real = core::f64::consts::PI;

/// Full turn, for sphere segments.
#[cfg(feature = "f32")]
pub const TAU: Real = core::f32::consts::TAU;
/// Full turn, for sphere segments.
#[cfg(feature = "f64")]
pub const TAU: Real = core::f64::consts::TAU;
