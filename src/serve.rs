//! Serve motion and initial-state derivation.
//!
//! The pre-contact serve is a scripted animation, not physics: for the
//! first [`SERVE_DURATION`] seconds the ball follows the racquet along a
//! sine arc with no forces applied. At completion the controller swaps in
//! a real initial state derived from the configuration (speed, launch
//! angles, spin) and the integrator takes over.

use crate::types::{constants, BallState, SimConfig, Vec3};
use std::f64::consts::PI;

/// Duration of the scripted serve motion (s).
pub const SERVE_DURATION: f64 = 0.3;

/// Height of the toss arc above the contact height (ft).
const TOSS_ARC_HEIGHT: f64 = 2.0;

/// Lateral offset of the server from the center line (ft).
const SERVE_LATERAL_OFFSET: f64 = 3.0;

/// Convert a speed in mph to ft/s. Exactly linear for all inputs.
pub fn mph_to_ft_per_sec(mph: f64) -> f64 {
    mph * constants::MPH_TO_FT_PER_SEC
}

/// Convert a spin rate in rpm to rad/s.
pub fn rpm_to_rad_per_sec(rpm: f64) -> f64 {
    rpm * 2.0 * PI / 60.0
}

/// Scripted ball pose at `serve_time` seconds into the serve motion.
///
/// Progress runs 0 -> 1 over [`SERVE_DURATION`]. The height follows
/// `contact_height + sin(progress·π) · 2`: it peaks mid-motion and returns
/// to exactly the bare contact height at completion (`sin(π) = 0`). The
/// ball slides from one foot behind the baseline to the baseline itself,
/// three feet right of center. Velocity and spin stay zero throughout;
/// no forces act during the scripted motion.
pub fn serving_state(config: &SimConfig, serve_time: f64) -> BallState {
    let progress = (serve_time / SERVE_DURATION).min(1.0);
    let height = config.server_height + (progress * PI).sin() * TOSS_ARC_HEIGHT;

    BallState {
        pos: Vec3::new(-1.0 + progress, height, SERVE_LATERAL_OFFSET),
        vel: Vec3::ZERO,
        spin: Vec3::ZERO,
        time: serve_time,
        has_served: progress >= 1.0,
    }
}

/// Derive the ball state at racquet contact from the configuration.
///
/// Speed decomposes by the vertical launch angle into a horizontal
/// component (split forward/lateral by the direction angle) and a vertical
/// component. Spin decomposes by the spin-plane angle into the X and Z
/// axes; there is no spin around the vertical axis at contact.
pub fn initial_state(config: &SimConfig) -> BallState {
    let speed = mph_to_ft_per_sec(config.initial_velocity);
    let direction = config.initial_direction.to_radians();
    let vertical = config.initial_vertical_angle.to_radians();
    let spin_rate = rpm_to_rad_per_sec(config.topspin_rpm);
    let spin_plane = config.topspin_plane.to_radians();

    let horizontal = speed * vertical.cos();

    BallState {
        pos: Vec3::new(0.0, config.server_height, SERVE_LATERAL_OFFSET),
        vel: Vec3::new(
            horizontal * direction.cos(),
            speed * vertical.sin(),
            -horizontal * direction.sin(),
        ),
        spin: Vec3::new(spin_rate * spin_plane.cos(), 0.0, spin_rate * spin_plane.sin()),
        time: 0.0,
        has_served: false,
    }
}

// =============================================================================
// Tests
// =============================================================================
