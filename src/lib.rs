//! # Tennis Core
//!
//! Physics core for a tennis serve simulator: animates a served ball's
//! flight under gravity, aerodynamic drag, and spin-induced Magnus force,
//! resolving net and ground collisions, for a rendering layer to consume.
//!
//! ## Architecture
//!
//! - `types`: Core data structures (Vec3, config, ball state, events)
//! - `serve`: Scripted serve motion and initial-state derivation
//! - `forces`: Acceleration contributions (gravity, drag, Magnus effect)
//! - `integrator`: Fixed-step semi-implicit Euler integration
//! - `collision`: Net-plane and ground-plane boundary resolution
//! - `controller`: Phase machine, playback/manual stepping, undo history
//! - `config`: YAML-based serve preset loader

pub mod collision;
pub mod config;
pub mod controller;
pub mod forces;
pub mod integrator;
pub mod serve;
pub mod types;

pub use controller::{Controller, Phase, TerminalReason};
pub use integrator::{step, DT};
pub use serve::{initial_state, serving_state};
pub use types::{BallState, BouncePoint, NetHit, SimConfig, StepEvent, Vec3};
