//! Simulation controller: phase machine, playback, manual stepping, history.
//!
//! The controller owns the only mutable state in the crate: the current
//! [`BallState`], the flight trail, the bounce and net-hit records, and the
//! undo history. Everything below it ([`crate::serve`], [`crate::forces`],
//! [`crate::integrator`]) is pure.
//!
//! ## Phases
//!
//! ```text
//! Idle --start--> Serving --contact--> InFlight --net hit / x >= 103--> Terminal
//!   ^                                     |
//!   +------------- reset ----------------+   (bounces keep the ball InFlight)
//! ```
//!
//! ## Driving modes
//!
//! - **Real-time playback**: the caller invokes [`Controller::tick`] from
//!   its scheduling loop; an advance executes once the wall-clock gap since
//!   the last executed tick reaches `16.67 ms / animation_speed`. [`Controller::stop`]
//!   clears the running flag, so a tick already scheduled when the
//!   simulation stops is a no-op.
//! - **Manual stepping**: [`Controller::step_forward`] snapshots the full
//!   state and advances two integrator sub-steps (10 ms of simulated time);
//!   [`Controller::step_backward`] restores the most recent snapshot
//!   verbatim. Both are disabled while playback runs.
//!
//! Flight stepping is shared between the two modes, so they produce
//! identical trajectories from the contact point onward. The serve clock
//! advances by 1/60 s per playback tick but 1/120 s per manual sub-step,
//! a quirk kept from the original control scheme.

use log::{debug, trace};
use std::collections::VecDeque;
use std::time::Instant;

use crate::integrator::{self, DT};
use crate::serve;
use crate::types::{constants, BallState, BouncePoint, NetHit, SimConfig, StepEvent, Vec3};

/// Serve-clock increment used by real-time playback (s).
const PLAYBACK_SERVE_DT: f64 = 1.0 / 60.0;

/// Simulated time covered by one manual step-forward (s).
const MANUAL_STEP_SPAN: f64 = 0.01;

/// Base playback frame interval before the speed factor is applied (ms).
const FRAME_INTERVAL_MS: f64 = 16.67;

/// Maximum retained undo snapshots; the oldest is dropped beyond this.
const MAX_HISTORY: usize = 512;

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalReason {
    /// The ball struck the net and was stopped there
    NetHit,
    /// The ball crossed x = 103, leaving the simulated region
    OutOfBounds,
}

/// Controller phase. `Terminal` and `Idle` are absorbing until the next
/// `start` or `reset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Serving,
    InFlight,
    Terminal(TerminalReason),
}

/// Deep copy of the full controller state, taken before every manual
/// forward step and consumed by the matching backward step.
#[derive(Debug, Clone)]
struct Snapshot {
    ball: BallState,
    trail: Vec<Vec3>,
    bounces: Vec<BouncePoint>,
    net_hit: Option<NetHit>,
    phase: Phase,
}

/// Owns and advances one serve simulation.
pub struct Controller {
    config: SimConfig,
    phase: Phase,
    ball: Option<BallState>,
    trail: Vec<Vec3>,
    bounces: Vec<BouncePoint>,
    net_hit: Option<NetHit>,
    history: VecDeque<Snapshot>,
    running: bool,
    last_tick: Option<Instant>,
}

impl Controller {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            ball: None,
            trail: Vec::new(),
            bounces: Vec::new(),
            net_hit: None,
            history: VecDeque::new(),
            running: false,
            last_tick: None,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Replace the configuration. Takes effect on the next `start`; the
    /// current run, if any, keeps the parameters it started with baked
    /// into its already-computed states.
    pub fn set_config(&mut self, config: SimConfig) {
        self.config = config;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn ball(&self) -> Option<&BallState> {
        self.ball.as_ref()
    }

    /// Flight path since racquet contact. Empty while serving.
    pub fn trail(&self) -> &[Vec3] {
        &self.trail
    }

    pub fn bounce_points(&self) -> &[BouncePoint] {
        &self.bounces
    }

    pub fn net_hit(&self) -> Option<&NetHit> {
        self.net_hit.as_ref()
    }

    /// Number of undo snapshots currently held.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Begin a new run from the scripted serve motion. Clears the trail
    /// and event records and starts the playback clock; the undo history
    /// survives until `reset`.
    pub fn start(&mut self) {
        self.ball = Some(serve::serving_state(&self.config, 0.0));
        self.trail.clear();
        self.bounces.clear();
        self.net_hit = None;
        self.phase = Phase::Serving;
        self.running = true;
        self.last_tick = None;
        debug!("run started, serving");
    }

    /// Halt playback. Idempotent; once stopped, a tick that was already
    /// scheduled executes as a no-op.
    pub fn stop(&mut self) {
        if self.running {
            debug!("playback stopped at t={:.3}", self.ball.map_or(0.0, |b| b.time));
        }
        self.running = false;
        self.last_tick = None;
    }

    /// Return to `Idle`: clears the ball, trail, events, and the entire
    /// undo history.
    pub fn reset(&mut self) {
        self.stop();
        self.ball = None;
        self.trail.clear();
        self.bounces.clear();
        self.net_hit = None;
        self.history.clear();
        self.phase = Phase::Idle;
        debug!("reset to idle");
    }

    /// Playback driver. Executes at most one advance per call, and only
    /// once the wall-clock gap since the last executed tick reaches the
    /// target interval. Returns whether an advance ran.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.running {
            return false;
        }

        // Compared in f64 milliseconds: a zero or negative speed factor
        // gives a never-due or always-due clock, not a panic
        let target_ms = FRAME_INTERVAL_MS / self.config.animation_speed;
        let due = match self.last_tick {
            Some(last) => now.duration_since(last).as_secs_f64() * 1000.0 >= target_ms,
            None => true,
        };
        if !due {
            return false;
        }

        trace!("tick at phase {:?}", self.phase);
        match self.phase {
            Phase::Serving => self.advance_serving(PLAYBACK_SERVE_DT, None),
            Phase::InFlight => {
                self.flight_step();
            }
            Phase::Idle | Phase::Terminal(_) => {}
        }
        self.last_tick = Some(now);
        true
    }

    /// Manual single-step: push an undo snapshot, then advance two
    /// integrator sub-steps, transitioning out of the serve inline and
    /// stopping early on a terminal event. No-op while playback runs or
    /// outside the `Serving`/`InFlight` phases.
    pub fn step_forward(&mut self) {
        if self.running || !matches!(self.phase, Phase::Serving | Phase::InFlight) {
            return;
        }
        let base_time = match self.ball {
            Some(ball) => ball.time,
            None => return,
        };

        self.push_snapshot();

        let substeps = (MANUAL_STEP_SPAN / DT).ceil() as usize;
        for i in 0..substeps {
            match self.phase {
                Phase::Serving => {
                    let contact_time = base_time + (i + 1) as f64 * DT;
                    self.advance_serving(DT, Some(contact_time));
                }
                Phase::InFlight => {
                    self.flight_step();
                    if self.phase != Phase::InFlight {
                        break;
                    }
                }
                Phase::Idle | Phase::Terminal(_) => break,
            }
        }
    }

    /// Restore the most recent snapshot verbatim. No-op while playback
    /// runs or when no snapshot exists.
    pub fn step_backward(&mut self) {
        if self.running {
            return;
        }
        if let Some(snap) = self.history.pop_back() {
            self.ball = Some(snap.ball);
            self.trail = snap.trail;
            self.bounces = snap.bounces;
            self.net_hit = snap.net_hit;
            self.phase = snap.phase;
        }
    }

    /// Advance the serve clock by `serve_dt`. On completion, re-derive the
    /// initial flight state from the configuration and seed the trail with
    /// the contact point. `contact_time` overrides the flight start time
    /// (manual stepping stamps sub-step boundaries; playback keeps the
    /// last serve clock value).
    fn advance_serving(&mut self, serve_dt: f64, contact_time: Option<f64>) {
        let prev = match self.ball {
            Some(ball) => ball,
            None => return,
        };

        let next = serve::serving_state(&self.config, prev.time + serve_dt);
        if next.has_served {
            let mut contact = serve::initial_state(&self.config);
            contact.time = contact_time.unwrap_or(prev.time);
            contact.has_served = true;
            debug!(
                "serve contact at t={:.3}, |v|={:.1} ft/s",
                contact.time,
                contact.speed()
            );
            self.trail.clear();
            self.trail.push(contact.pos);
            self.ball = Some(contact);
            self.phase = Phase::InFlight;
        } else {
            self.ball = Some(next);
        }
    }

    /// One integrator step plus event bookkeeping; shared by both driving
    /// modes so they stay numerically identical in flight.
    fn flight_step(&mut self) {
        let ball = match self.ball {
            Some(ball) => ball,
            None => return,
        };

        let (next, event) = integrator::step(&ball, &self.config);
        self.ball = Some(next);

        match event {
            StepEvent::NetHit { point } => {
                debug!("net hit at ({:.2}, {:.2}, {:.2})", point.x, point.y, point.z);
                self.net_hit = Some(NetHit {
                    position: point,
                    time: next.time,
                });
                self.terminate(TerminalReason::NetHit);
            }
            StepEvent::Bounced { point } => {
                debug!("bounce {} at x={:.1}", self.bounces.len() + 1, point.x);
                self.bounces.push(BouncePoint {
                    position: point,
                    time: next.time,
                });
                self.commit_flight_position(next);
            }
            StepEvent::Normal => self.commit_flight_position(next),
        }
    }

    /// Extend the trail, or end the run if the ball left the region.
    fn commit_flight_position(&mut self, next: BallState) {
        if next.pos.x >= constants::EXIT_X {
            debug!("ball exited region at x={:.1}", next.pos.x);
            self.terminate(TerminalReason::OutOfBounds);
        } else {
            self.trail.push(next.pos);
        }
    }

    fn terminate(&mut self, reason: TerminalReason) {
        self.phase = Phase::Terminal(reason);
        self.running = false;
        self.last_tick = None;
    }

    fn push_snapshot(&mut self) {
        if let Some(ball) = self.ball {
            if self.history.len() == MAX_HISTORY {
                self.history.pop_front();
            }
            self.history.push_back(Snapshot {
                ball,
                trail: self.trail.clone(),
                bounces: self.bounces.clone(),
                net_hit: self.net_hit,
                phase: self.phase,
            });
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
