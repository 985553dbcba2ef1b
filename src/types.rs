//! Core types for the serve simulation.
//!
//! All units are US customary, matching court dimensions:
//! - Position: feet (ft)
//! - Velocity: feet per second (ft/s)
//! - Angular velocity (spin): radians per second (rad/s)
//! - Mass: pounds (lb)
//! - Air density: lb/ft³

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

// =============================================================================
// Vec3 - 3D Vector
// =============================================================================

/// A 3D vector used for positions, velocities, accelerations, and spin.
///
/// Coordinate system:
/// - X: along the court length (0 at the server's baseline, positive toward
///   the opponent; the net sits at x = 39)
/// - Y: vertical (positive upward, 0 at the ground)
/// - Z: lateral (positive to the server's right of the center line)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Squared magnitude (avoids sqrt for comparisons)
    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Magnitude (length) of the vector
    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Returns a unit vector in the same direction, or zero if magnitude is zero
    pub fn normalized(&self) -> Self {
        let mag = self.magnitude();
        if mag < constants::EPSILON {
            Self::ZERO
        } else {
            *self * (1.0 / mag)
        }
    }

    /// Dot product
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product
    pub fn cross(&self, other: &Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Linear interpolation between two vectors
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        *self + (*other - *self) * t
    }

    /// True if all three components are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

// Operator overloads for Vec3
impl Add for Vec3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl Default for Vec3 {
    fn default() -> Self {
        Self::ZERO
    }
}

// =============================================================================
// Simulation Configuration
// =============================================================================

/// Parameters describing one serve. Immutable for the duration of a run:
/// the controller re-derives the initial state from the current config on
/// every start, so edits take effect on the next run, never mid-flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Player height in feet; contact height is derived from it
    pub player_height: f64,

    /// Racquet contact height in feet (see [`SimConfig::with_player_height`])
    pub server_height: f64,

    /// Initial ball speed in mph (supported range 50-150)
    pub initial_velocity: f64,

    /// Topspin rate in rpm (negative for backspin)
    pub topspin_rpm: f64,

    /// Spin-plane angle in degrees
    pub topspin_plane: f64,

    /// Launch direction in degrees (0 = straight down the court)
    pub initial_direction: f64,

    /// Vertical launch angle in degrees (positive = up)
    pub initial_vertical_angle: f64,

    /// Playback speed factor (1.0 = real time)
    pub animation_speed: f64,

    /// Air density in lb/ft³
    pub air_density: f64,

    /// Drag coefficient (dimensionless, ~0.47 for a sphere)
    pub drag_coefficient: f64,

    /// Magnus coefficient (dimensionless)
    pub magnus_coefficient: f64,

    pub enable_gravity: bool,
    pub enable_drag: bool,
    pub enable_magnus: bool,
}

impl SimConfig {
    /// Derive the racquet contact height from a player height and return
    /// the updated config. A 6 ft player reaches about 8.5 ft at contact.
    pub fn with_player_height(mut self, player_height: f64) -> Self {
        self.player_height = player_height;
        self.server_height = player_height * constants::CONTACT_HEIGHT_RATIO;
        self
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            player_height: 6.0,
            server_height: 6.0 * constants::CONTACT_HEIGHT_RATIO,
            initial_velocity: 90.0,
            topspin_rpm: -2000.0,
            topspin_plane: 30.0,
            initial_direction: 0.0,
            initial_vertical_angle: -3.0,
            animation_speed: 0.5,
            air_density: 0.0765,
            drag_coefficient: 0.47,
            magnus_coefficient: 0.1,
            enable_gravity: true,
            enable_drag: true,
            enable_magnus: true,
        }
    }
}

// =============================================================================
// Ball State
// =============================================================================

/// Complete state of the ball at a given instant.
///
/// The spin vector encodes both the axis and magnitude of rotation:
/// - Direction: axis of rotation (right-hand rule)
/// - Magnitude: angular velocity in rad/s
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallState {
    pub pos: Vec3,
    pub vel: Vec3,
    pub spin: Vec3,

    /// Elapsed simulation time in seconds
    pub time: f64,

    /// True once the scripted serve motion has completed
    pub has_served: bool,
}

impl BallState {
    pub fn new(pos: Vec3, vel: Vec3, spin: Vec3) -> Self {
        Self {
            pos,
            vel,
            spin,
            time: 0.0,
            has_served: false,
        }
    }

    /// Ball at rest at a given position
    pub fn at_rest(pos: Vec3) -> Self {
        Self::new(pos, Vec3::ZERO, Vec3::ZERO)
    }

    /// Current speed in ft/s
    pub fn speed(&self) -> f64 {
        self.vel.magnitude()
    }

    /// Current speed in mph, for display
    pub fn speed_mph(&self) -> f64 {
        self.vel.magnitude() * 3600.0 / 5280.0
    }
}

impl Default for BallState {
    fn default() -> Self {
        Self::at_rest(Vec3::ZERO)
    }
}

// =============================================================================
// Step Events
// =============================================================================

/// Outcome of one integrator call. Exactly one variant per step; the net
/// check runs before the ground check and short-circuits it, so the two
/// can never fire together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StepEvent {
    /// Plain advance, no boundary crossed
    Normal,
    /// Ball touched the ground and rebounded; `point` is the contact point
    Bounced { point: Vec3 },
    /// Ball struck the net; `point` is the exact net-plane intersection.
    /// Terminal: the returned state has zero velocity, pinned to the net.
    NetHit { point: Vec3 },
}

/// Record of a ground contact: where and when the ball bounced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BouncePoint {
    pub position: Vec3,
    pub time: f64,
}

/// Record of a net strike: where and when the ball was stopped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetHit {
    pub position: Vec3,
    pub time: f64,
}

// =============================================================================
// Physical Constants
// =============================================================================

/// Physical and court constants used in the simulation.
pub mod constants {
    /// Gravitational acceleration (ft/s²)
    pub const GRAVITY: f64 = 32.174;

    /// Tennis ball mass (lb)
    pub const BALL_MASS: f64 = 0.125;

    /// Tennis ball radius (ft)
    pub const BALL_RADIUS: f64 = 0.1067;

    /// mph to ft/s conversion factor
    pub const MPH_TO_FT_PER_SEC: f64 = 1.467;

    /// Racquet contact height as a multiple of player height (6 ft -> 8.5 ft)
    pub const CONTACT_HEIGHT_RATIO: f64 = 1.42;

    /// Court length, baseline to baseline (ft)
    pub const COURT_LENGTH: f64 = 78.0;

    /// Net plane position along the court (ft)
    pub const NET_X: f64 = COURT_LENGTH / 2.0;

    /// Net height (ft)
    pub const NET_HEIGHT: f64 = 3.0;

    /// Singles court width (ft)
    pub const COURT_WIDTH: f64 = 27.0;

    /// X beyond which the ball leaves the simulated region
    /// (25 ft past the far baseline)
    pub const EXIT_X: f64 = 103.0;

    /// Small value for floating-point comparisons
    pub const EPSILON: f64 = 1e-10;
}

// =============================================================================
// Tests
// =============================================================================
