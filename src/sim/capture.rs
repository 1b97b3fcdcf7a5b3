//! Tractor-beam capture
//!
//! One routine drives all three boardings (docking ship, arrival ship,
//! rescue ship). Once the player drifts inside a beam's radius they are
//! captured: eased toward a ship-relative point with an accelerating step,
//! faded out, and trailed by sparkles. When the fade bottoms out the capture
//! resolves and the caller commits whatever boarding it was.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::collision::within_radius;
use super::particles::{ParticlePool, emit_beam_trail};
use super::scene::SceneKind;
use super::state::Player;
use crate::tuning::Tuning;

/// Pull accumulator step per tick
const PULL_STEP: f32 = 0.02;
/// Easing step ramps from this...
const MIN_MOVE_SPEED: f32 = 0.05;
/// ...toward this cap
const MAX_MOVE_SPEED: f32 = 0.15;
const MOVE_SPEED_RAMP: f32 = 0.02;
const TRAIL_CHANCE: f32 = 0.3;

/// Which ship is pulling the player in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boarding {
    /// The ship docked in the opening scene
    MainShip,
    /// The ship stationed by the outside gate
    ArrivalShip,
    /// The ship that answers the distress fire
    RescueShip,
}

impl Boarding {
    /// Scene the boarding ultimately leads to
    pub fn destination(self) -> SceneKind {
        match self {
            Boarding::MainShip => SceneKind::Cinematic,
            Boarding::ArrivalShip => SceneKind::InsideShip,
            Boarding::RescueShip => SceneKind::InsideRescueShip,
        }
    }
}

/// A beam that can capture the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Beam {
    pub origin: Vec2,
    pub radius: f32,
}

/// In-progress capture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capture {
    pub boarding: Boarding,
    /// Grows every tick; drives the easing ramp
    pub pull: f32,
}

impl Capture {
    /// Fraction of the remaining distance covered this tick
    pub fn move_speed(&self) -> f32 {
        (MIN_MOVE_SPEED + self.pull * MOVE_SPEED_RAMP).min(MAX_MOVE_SPEED)
    }
}

/// Outcome of one capture tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureStep {
    /// Player is not captured
    Free,
    Pulling,
    /// Fade finished this tick; the player is free again
    Resolved(Boarding),
}

/// Capture the player if they are inside the beam. No-op while already captured.
pub fn try_capture(player: &mut Player, beam: Beam, boarding: Boarding) -> bool {
    if player.captured() {
        return false;
    }
    if !within_radius(player.center(), beam.origin, beam.radius) {
        return false;
    }
    log::info!("Player captured by {:?} beam", boarding);
    player.capture = Some(Capture { boarding, pull: 0.0 });
    player.vel = Vec2::ZERO;
    true
}

/// Ease the captured player toward `target` (top-left of the avatar)
pub fn pull(
    player: &mut Player,
    target: Vec2,
    trail: &mut ParticlePool,
    rng: &mut Pcg32,
    tuning: &Tuning,
) -> CaptureStep {
    let Some(capture) = player.capture.as_mut() else {
        return CaptureStep::Free;
    };

    capture.pull += PULL_STEP;
    let move_speed = capture.move_speed();
    let boarding = capture.boarding;

    player.pos += (target - player.pos) * move_speed;
    player.alpha = (player.alpha - tuning.capture_alpha_decay).max(0.0);

    if rng.random::<f32>() < TRAIL_CHANCE {
        emit_beam_trail(trail, rng, player.center());
    }

    if player.alpha <= tuning.capture_resolve_alpha {
        player.capture = None;
        player.alpha = 1.0;
        log::info!("Capture by {:?} resolved", boarding);
        CaptureStep::Resolved(boarding)
    } else {
        CaptureStep::Pulling
    }
}
