//! Astronaut Journey - a scene-driven 2D space adventure
//!
//! Core modules:
//! - `sim`: Deterministic simulation (scenes, transitions, capture, survival, quiz)
//! - `renderer`: Frame building and the WebGPU rendering pipeline
//! - `platform`: Frame throttling and input aggregation
//! - `assets`: Sprite readiness seam between the renderer and the browser
//! - `tuning`: Data-driven game balance

pub mod assets;
#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Logical world size; the renderer letterboxes this onto the canvas
    pub const WORLD_WIDTH: f32 = 1000.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Frame rate targets for the throttled loop
    pub const TARGET_FPS: f64 = 60.0;
    pub const LOW_POWER_FPS: f64 = 30.0;

    /// Player avatar (square sprite)
    pub const PLAYER_SIZE: f32 = 72.0;
    pub const PLAYER_START_X: f32 = 80.0;
    pub const PLAYER_START_Y: f32 = 460.0;
    /// Floating bob: phase step per tick and amplitude in world units
    pub const PLAYER_FLOAT_STEP: f32 = 0.05;
    pub const PLAYER_FLOAT_AMPLITUDE: f32 = 4.0;

    /// Ship hull defaults
    pub const SHIP_WIDTH: f32 = 200.0;
    pub const SHIP_HEIGHT: f32 = 120.0;
    pub const SHIP_FLOAT_STEP: f32 = 0.03;
    pub const SHIP_FLOAT_AMPLITUDE: f32 = 3.0;
    /// Beam origin as a fraction of the hull size
    pub const BEAM_ORIGIN_X: f32 = 0.62;
    pub const BEAM_ORIGIN_Y: f32 = 0.45;
    pub const BEAM_PULSE_STEP: f32 = 0.1;
    /// Distance at which an approaching ship counts as arrived
    pub const ARRIVAL_EPSILON: f32 = 5.0;

    /// Survival gate on the outside hull
    pub const GATE_WIDTH: f32 = 90.0;
    pub const GATE_HEIGHT: f32 = 180.0;
    pub const GATE_X: f32 = WORLD_WIDTH - GATE_WIDTH;
    pub const GATE_Y: f32 = (WORLD_HEIGHT - GATE_HEIGHT) / 2.0;
}

/// Advance an oscillator phase by `step`, wrapped to [0, 2π)
#[inline]
pub fn advance_phase(phase: f32, step: f32) -> f32 {
    (phase + step).rem_euclid(std::f32::consts::TAU)
}

/// Vertical bob offset for a phase accumulator
#[inline]
pub fn bob(phase: f32, amplitude: f32) -> f32 {
    phase.sin() * amplitude
}

/// Move `from` toward `to` by at most `step` units
#[inline]
pub fn step_toward(from: Vec2, to: Vec2, step: f32) -> Vec2 {
    let delta = to - from;
    let dist = delta.length();
    if dist <= step || dist == 0.0 {
        to
    } else {
        from + delta / dist * step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_phase_wraps() {
        let phase = advance_phase(std::f32::consts::TAU - 0.01, 0.05);
        assert!(phase >= 0.0 && phase < 0.05);
    }

    #[test]
    fn test_step_toward_snaps_when_close() {
        let p = step_toward(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), 2.5);
        assert_eq!(p, Vec2::new(1.0, 0.0));
        let p = step_toward(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), 2.5);
        assert_eq!(p, Vec2::new(2.5, 0.0));
    }
}
