//! Fixed-step numerical integration of the ball's flight.
//!
//! One call to [`step`] advances the simulation by exactly [`DT`] seconds,
//! independent of any real-time frame rate:
//!
//! 1. Sum the enabled accelerations ([`crate::forces`]).
//! 2. Semi-implicit Euler update: `v' = v + a·dt`, then `x' = x + v'·dt`.
//!    The position update uses the *new* velocity; this ordering is what
//!    keeps the scheme stable and must not be swapped.
//! 3. Net check, evaluated first: a crossing of the net plane stops the
//!    ball dead at the interpolated contact point.
//! 4. Ground check: a descent through y = 0 rebounds with restitution and
//!    friction ([`crate::collision`]).
//!
//! The function is pure and deterministic: identical `(state, config)`
//! inputs produce bit-identical outputs.

use crate::collision;
use crate::forces;
use crate::types::{BallState, SimConfig, StepEvent, Vec3};

/// Fixed integration time step (s).
pub const DT: f64 = 1.0 / 120.0;

/// Advance the ball by one fixed time step, resolving net and ground
/// boundaries within the step. Time always advances by exactly [`DT`],
/// whichever branch fires.
pub fn step(state: &BallState, config: &SimConfig) -> (BallState, StepEvent) {
    let acc = forces::total_acceleration(state, config);

    // Semi-implicit Euler: velocity first, position from the new velocity
    let mut new_vel = state.vel + acc * DT;
    let mut new_pos = state.pos + new_vel * DT;

    // Net check runs before the ground check and short-circuits it
    if let Some(point) = collision::net_intersection(&state.pos, &new_pos) {
        let stopped = BallState {
            pos: point,
            vel: Vec3::ZERO,
            spin: state.spin,
            time: state.time + DT,
            has_served: state.has_served,
        };
        return (stopped, StepEvent::NetHit { point });
    }

    // Ground check: descending through the ground plane
    if new_pos.y <= 0.0 && state.vel.y < 0.0 {
        let mut new_spin = state.spin;
        let point = collision::resolve_bounce(&mut new_pos, &mut new_vel, &mut new_spin);

        let bounced = BallState {
            pos: new_pos,
            vel: new_vel,
            spin: new_spin,
            time: state.time + DT,
            has_served: state.has_served,
        };
        return (bounced, StepEvent::Bounced { point });
    }

    let advanced = BallState {
        pos: new_pos,
        vel: new_vel,
        spin: state.spin,
        time: state.time + DT,
        has_served: state.has_served,
    };
    (advanced, StepEvent::Normal)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serve;
    use approx::assert_relative_eq;

    /// Config with every effect disabled: the step reduces to pure
    /// kinematics, which makes boundary tests exact.
    fn coasting() -> SimConfig {
        SimConfig {
            enable_gravity: false,
            enable_drag: false,
            enable_magnus: false,
            ..SimConfig::default()
        }
    }

    #[test]
    fn test_time_advances_by_dt_on_every_branch() {
        let config = coasting();

        // Normal
        let ball = BallState::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(10.0, 0.0, 0.0), Vec3::ZERO);
        let (next, event) = step(&ball, &config);
        assert_eq!(event, StepEvent::Normal);
        assert_relative_eq!(next.time, DT);

        // Net hit
        let ball = BallState::new(Vec3::new(38.0, 2.0, 0.0), Vec3::new(240.0, 0.0, 0.0), Vec3::ZERO);
        let (next, _) = step(&ball, &config);
        assert_relative_eq!(next.time, DT);

        // Bounce
        let ball = BallState::new(Vec3::new(10.0, 0.04, 0.0), Vec3::new(0.0, -5.0, 0.0), Vec3::ZERO);
        let (next, _) = step(&ball, &config);
        assert_relative_eq!(next.time, DT);
    }

    #[test]
    fn test_semi_implicit_ordering() {
        // With constant acceleration -g and zero initial velocity the
        // position must move by (a*dt)*dt in one step, not 0: the update
        // uses the new velocity.
        let config = SimConfig {
            enable_drag: false,
            enable_magnus: false,
            ..SimConfig::default()
        };
        let ball = BallState::at_rest(Vec3::new(0.0, 10.0, 0.0));

        let (next, _) = step(&ball, &config);

        let expected_vy = -crate::types::constants::GRAVITY * DT;
        assert_relative_eq!(next.vel.y, expected_vy);
        assert_relative_eq!(next.pos.y, 10.0 + expected_vy * DT);
    }

    #[test]
    fn test_net_hit_resolution() {
        // One step from x=38 to x=40 with y going 2 -> 1, inside the net span
        let config = coasting();
        let ball = BallState::new(
            Vec3::new(38.0, 2.0, 0.0),
            Vec3::new(2.0 / DT, -1.0 / DT, 0.0),
            Vec3::new(0.0, 0.0, 100.0),
        );

        let (next, event) = step(&ball, &config);

        match event {
            StepEvent::NetHit { point } => {
                assert_eq!(point.x, 39.0);
                assert_relative_eq!(point.y, 1.5, max_relative = 1e-12);
            }
            other => panic!("expected NetHit, got {:?}", other),
        }

        assert_eq!(next.pos.x, 39.0);
        assert_relative_eq!(next.pos.y, 1.5, max_relative = 1e-12);
        assert_eq!(next.vel, Vec3::ZERO);
        // Spin is left untouched by the net
        assert_eq!(next.spin, ball.spin);
    }

    #[test]
    fn test_net_takes_precedence_over_ground() {
        // A step that would cross both the net plane and the ground plane:
        // the net check fires first and the bounce never happens.
        let config = coasting();
        let ball = BallState::new(
            Vec3::new(38.0, 2.0, 0.0),
            Vec3::new(2.0 / DT, -3.0 / DT, 0.0),
            Vec3::ZERO,
        );

        let (next, event) = step(&ball, &config);

        assert!(matches!(event, StepEvent::NetHit { .. }));
        assert_eq!(next.vel, Vec3::ZERO);
    }

    #[test]
    fn test_bounce_resolution() {
        let config = coasting();
        let ball = BallState::new(
            Vec3::new(60.0, 0.04, 2.0),
            Vec3::new(80.0, -5.0, 10.0),
            Vec3::new(-200.0, 0.0, 100.0),
        );

        let (next, event) = step(&ball, &config);

        match event {
            StepEvent::Bounced { point } => {
                assert_eq!(point.y, 0.0);
            }
            other => panic!("expected Bounced, got {:?}", other),
        }

        assert_eq!(next.pos.y, 0.0);
        assert_relative_eq!(next.vel.y, 3.5, max_relative = 1e-12); // 5 * 0.7
        assert_relative_eq!(next.vel.x, 56.0, max_relative = 1e-12); // 80 * 0.7
        assert_relative_eq!(next.vel.z, 7.0, max_relative = 1e-12);
        assert_relative_eq!(next.spin.x, -160.0, max_relative = 1e-12); // * 0.8
        assert_relative_eq!(next.spin.z, 80.0, max_relative = 1e-12);
    }

    #[test]
    fn test_no_bounce_while_rising() {
        // Below-zero arrival but rising velocity: not a ground contact
        let config = coasting();
        let ball = BallState::new(
            Vec3::new(10.0, 0.001, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::ZERO,
        );
        let (_, event) = step(&ball, &config);
        assert_eq!(event, StepEvent::Normal);
    }

    #[test]
    fn test_determinism_bit_identical() {
        let config = SimConfig::default();
        let ball = BallState::new(
            Vec3::new(5.0, 8.0, 3.0),
            Vec3::new(130.0, -7.0, 2.0),
            Vec3::new(-180.0, 0.0, 104.0),
        );

        let (a, ea) = step(&ball, &config);
        let (b, eb) = step(&ball, &config);

        assert_eq!(a, b);
        assert_eq!(ea, eb);
    }

    #[test]
    fn test_full_serve_flight() {
        // 100 mph, straight, -3 degrees, no spin, all effects on: the ball
        // slows under drag early in flight and lands before leaving the
        // simulated region.
        let config = SimConfig {
            initial_velocity: 100.0,
            initial_direction: 0.0,
            initial_vertical_angle: -3.0,
            topspin_rpm: 0.0,
            ..SimConfig::default()
        };

        let mut ball = serve::initial_state(&config);
        assert_relative_eq!(ball.speed(), 146.7, max_relative = 1e-9);

        let mut bounced = false;
        for i in 0..2000 {
            let speed_before = ball.speed();
            let (next, event) = step(&ball, &config);
            ball = next;

            // Drag dominates early in flight
            if i < 30 {
                assert!(
                    ball.speed() < speed_before,
                    "speed should decay under drag, step {}",
                    i
                );
            }

            if let StepEvent::Bounced { point } = event {
                bounced = true;
                assert_eq!(point.y, 0.0);
                assert!(point.x < crate::types::constants::EXIT_X);
                break;
            }
            assert!(
                !matches!(event, StepEvent::NetHit { .. }),
                "a 100 mph flat serve from 8.5 ft should clear the net"
            );
        }

        assert!(bounced, "ball should return to the ground");
    }

    #[test]
    fn test_finite_across_speed_range() {
        // 50 to 150 mph, all effects on: one step never yields non-finite
        // position or velocity components.
        for mph in [50.0, 75.0, 100.0, 125.0, 150.0] {
            let config = SimConfig {
                initial_velocity: mph,
                ..SimConfig::default()
            };
            let ball = serve::initial_state(&config);
            let (next, _) = step(&ball, &config);

            assert!(next.pos.is_finite(), "non-finite position at {} mph", mph);
            assert!(next.vel.is_finite(), "non-finite velocity at {} mph", mph);
        }
    }
}
