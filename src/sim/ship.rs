//! Ships: approach, station, depart
//!
//! Every ship in the game (the docking ship in the opening scene, the
//! cinematic shuttle, the arrival ship and the rescue ship) is the same
//! small state machine. Position only changes while approaching or
//! departing, and always monotonically toward the current goal.

use glam::Vec2;

use super::collision::Rect;
use crate::consts::*;
use crate::{advance_phase, bob, step_toward};

/// Movement phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShipPhase {
    /// Flying toward `target` at `speed` units per tick
    Approaching { target: Vec2, speed: f32 },
    /// Arrived and holding position
    Stationed,
    /// Leaving with a constant velocity
    Departing { velocity: Vec2 },
}

/// A ship with a tractor beam
#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    pub pos: Vec2,
    /// Hull size before `scale`
    pub size: Vec2,
    pub scale: f32,
    pub phase: ShipPhase,
    pub beam_active: bool,
    pub beam_pulse: f32,
    pub float_phase: f32,
    /// Switch the beam on when the ship arrives
    pub beam_on_arrival: bool,
}

impl Ship {
    /// A ship flying from `start` to `target`
    pub fn approaching(start: Vec2, target: Vec2, speed: f32) -> Self {
        Self {
            pos: start,
            size: Vec2::new(SHIP_WIDTH, SHIP_HEIGHT),
            scale: 1.0,
            phase: ShipPhase::Approaching { target, speed },
            beam_active: false,
            beam_pulse: 0.0,
            float_phase: 0.0,
            beam_on_arrival: true,
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn without_beam(mut self) -> Self {
        self.beam_on_arrival = false;
        self
    }

    /// Advance one tick. Returns true on the tick the ship arrives.
    pub fn tick(&mut self) -> bool {
        self.float_phase = advance_phase(self.float_phase, SHIP_FLOAT_STEP);
        if self.beam_active {
            self.beam_pulse = advance_phase(self.beam_pulse, BEAM_PULSE_STEP);
        }
        match self.phase {
            ShipPhase::Approaching { target, speed } => {
                self.pos = step_toward(self.pos, target, speed);
                if self.pos.distance(target) <= ARRIVAL_EPSILON {
                    self.pos = target;
                    self.phase = ShipPhase::Stationed;
                    if self.beam_on_arrival {
                        self.beam_active = true;
                    }
                    return true;
                }
                false
            }
            ShipPhase::Stationed => false,
            ShipPhase::Departing { velocity } => {
                self.pos += velocity;
                false
            }
        }
    }

    /// Leave with the beam off
    pub fn depart(&mut self, velocity: Vec2) {
        self.beam_active = false;
        self.phase = ShipPhase::Departing { velocity };
    }

    pub fn is_stationed(&self) -> bool {
        matches!(self.phase, ShipPhase::Stationed)
    }

    pub fn is_departing(&self) -> bool {
        matches!(self.phase, ShipPhase::Departing { .. })
    }

    pub fn scaled_size(&self) -> Vec2 {
        self.size * self.scale
    }

    pub fn float_offset(&self) -> f32 {
        bob(self.float_phase, SHIP_FLOAT_AMPLITUDE)
    }

    /// Hull bounds including the floating bob
    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos + Vec2::new(0.0, self.float_offset()), self.scaled_size())
    }

    /// Where the beam leaves the hull
    pub fn beam_origin(&self) -> Vec2 {
        let size = self.scaled_size();
        self.pos + Vec2::new(size.x * BEAM_ORIGIN_X, self.float_offset() + size.y * BEAM_ORIGIN_Y)
    }

    /// Top-left position a captured player is pulled toward
    pub fn capture_target(&self) -> Vec2 {
        let origin = self.beam_origin();
        Vec2::new(origin.x - PLAYER_SIZE / 2.0, origin.y)
    }

    /// True once the hull is entirely past the left edge by `margin`
    pub fn off_left(&self, margin: f32) -> bool {
        self.pos.x + self.scaled_size().x < -margin
    }
}
