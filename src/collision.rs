//! Boundary collision handling for the serve trajectory.
//!
//! Two boundaries exist: the net plane at x = 39 and the ground plane at
//! y = 0. Both are resolved within a single integrator step:
//!
//! ```text
//! x_old                     x_new
//!   ●------------●------------●
//!                |
//!            net plane (x = 39)
//! ```
//!
//! The net crossing is found by linear interpolation along the step segment,
//! which yields the exact intersection point regardless of step size. The
//! ground contact clamps the height to exactly 0 and applies restitution,
//! friction, and spin decay.

use crate::types::{constants, Vec3};

/// Normal-direction energy retention on a ground bounce.
pub const RESTITUTION: f64 = 0.7;

/// Horizontal velocity fraction lost to ground friction per bounce.
pub const GROUND_FRICTION: f64 = 0.3;

/// Spin retention factor per bounce.
pub const BOUNCE_SPIN_DECAY: f64 = 0.8;

/// Check whether the step segment `from -> to` crosses the net.
///
/// A hit requires crossing x = 39 from below with the arrival point at or
/// below net height and laterally within the net span. Returns the exact
/// intersection with the net plane, or `None`.
pub fn net_intersection(from: &Vec3, to: &Vec3) -> Option<Vec3> {
    let crosses = from.x < constants::NET_X && to.x >= constants::NET_X;
    if !crosses || to.y > constants::NET_HEIGHT || to.z.abs() > constants::COURT_WIDTH / 2.0 {
        return None;
    }

    let t = (constants::NET_X - from.x) / (to.x - from.x);
    Some(Vec3::new(
        constants::NET_X,
        from.y + t * (to.y - from.y),
        from.z + t * (to.z - from.z),
    ))
}

/// Resolve a ground contact in place and return the contact point.
///
/// Clamps the height to exactly 0, reflects the vertical velocity with
/// [`RESTITUTION`], scales both horizontal velocity components by
/// `1 - GROUND_FRICTION`, and decays each spin component by
/// [`BOUNCE_SPIN_DECAY`].
pub fn resolve_bounce(pos: &mut Vec3, vel: &mut Vec3, spin: &mut Vec3) -> Vec3 {
    pos.y = 0.0;
    let point = Vec3::new(pos.x, 0.0, pos.z);

    vel.y = -vel.y * RESTITUTION;
    vel.x *= 1.0 - GROUND_FRICTION;
    vel.z *= 1.0 - GROUND_FRICTION;

    *spin = *spin * BOUNCE_SPIN_DECAY;

    point
}

// =============================================================================
// Tests
// =============================================================================
