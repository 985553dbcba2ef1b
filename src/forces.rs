//! Accelerations acting on the ball in flight.
//!
//! Three independent contributions, each toggleable through [`SimConfig`]:
//!
//! - **Gravity**: constant downward acceleration
//! - **Drag**: air resistance opposing motion, proportional to v²
//! - **Magnus**: spin-induced lift, causes curved trajectories
//!
//! ## The Magnus Effect
//!
//! A spinning ball moving through air creates a pressure difference between
//! the side rotating with the airflow and the side rotating against it,
//! producing a force perpendicular to both the spin axis and the velocity:
//!
//! ```text
//! Topspin:  Magnus pushes the ball DOWN - it dives into the court
//! Backspin: Magnus pushes the ball UP  - it floats and carries long
//! ```
//!
//! Every function here is pure; disabled effects contribute the zero vector
//! and never alter the others' computation.

use crate::types::{constants, BallState, SimConfig, Vec3};
use std::f64::consts::PI;

/// Gravitational acceleration: constant `-g` on the vertical axis.
pub fn gravity_acceleration() -> Vec3 {
    Vec3::new(0.0, -constants::GRAVITY, 0.0)
}

/// Quadratic drag acceleration, opposing the velocity.
///
/// Drag force magnitude: `0.5 * ρ * Cd * π * r² * |v|²`, divided by the
/// ball mass to yield acceleration. Returns zero for a ball at rest (the
/// direction would be undefined).
pub fn drag_acceleration(vel: &Vec3, config: &SimConfig) -> Vec3 {
    let speed_sq = vel.magnitude_squared();
    if speed_sq == 0.0 {
        return Vec3::ZERO;
    }
    let speed = speed_sq.sqrt();

    let area = PI * constants::BALL_RADIUS * constants::BALL_RADIUS;
    let drag_force = 0.5 * config.air_density * config.drag_coefficient * area * speed_sq;

    // Acceleration = force / mass, opposite to the direction of motion
    *vel * (-drag_force / speed / constants::BALL_MASS)
}

/// Magnus acceleration: `k * (ω × v)` with
/// `k = 4π² r³ ρ Cm / m`.
///
/// Direction follows the right-hand rule, so topspin around +X combined
/// with forward velocity along +X produces no force, while spin with a
/// lateral component curves the flight path.
pub fn magnus_acceleration(vel: &Vec3, spin: &Vec3, config: &SimConfig) -> Vec3 {
    let magnus_factor = 4.0
        * PI
        * PI
        * constants::BALL_RADIUS.powi(3)
        * config.air_density
        * config.magnus_coefficient
        / constants::BALL_MASS;

    spin.cross(vel) * magnus_factor
}

/// Sum of all enabled contributions for the current state.
pub fn total_acceleration(state: &BallState, config: &SimConfig) -> Vec3 {
    let mut acc = Vec3::ZERO;

    if config.enable_gravity {
        acc += gravity_acceleration();
    }

    if config.enable_drag {
        acc += drag_acceleration(&state.vel, config);
    }

    if config.enable_magnus {
        acc += magnus_acceleration(&state.vel, &state.spin, config);
    }

    acc
}

// =============================================================================
// Tests
// =============================================================================
