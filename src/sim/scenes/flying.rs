//! Free flight
//!
//! The player jetpacks around a big, breathing ship. With the beam switched
//! on, drifting into it boards the ship on the spot; pressing interact near
//! the hull zooms inside instead.

use glam::Vec2;

use super::Ctx;
use crate::consts::*;
use crate::sim::collision::within_radius;
use crate::sim::particles::{emit_flames, emit_thrust};
use crate::sim::scene::{SceneKind, SceneRequest};
use crate::sim::state::Cue;
use crate::{advance_phase, bob};

const SHIP_POS: Vec2 = Vec2::new(WORLD_WIDTH - 300.0, 80.0);
const MIN_SCALE: f32 = 2.5;
const MAX_SCALE: f32 = 5.0;
const SCALE_STEP: f32 = 0.08;
const ENTRY_SCALE: f32 = 2.0;
const PARALLAX: f32 = 0.7;
const FADE_IN_STEP: f32 = 0.03;
const EDGE_MARGIN: f32 = 10.0;
/// Interact reaches a bit further than the beam
const INTERACT_RADIUS: f32 = 150.0;

/// State of the flight sequence
#[derive(Debug, Clone, PartialEq)]
pub struct FlyingScene {
    pub ship_pos: Vec2,
    pub ship_scale: f32,
    pub scale_direction: f32,
    pub beam_active: bool,
    pub beam_pulse: f32,
    pub ship_float: f32,
    /// Parallax offset of the starfield
    pub background: Vec2,
    pub fade_in: f32,
}

impl Default for FlyingScene {
    fn default() -> Self {
        Self::new()
    }
}

impl FlyingScene {
    pub fn new() -> Self {
        Self {
            ship_pos: SHIP_POS,
            ship_scale: ENTRY_SCALE,
            scale_direction: 1.0,
            beam_active: false,
            beam_pulse: 0.0,
            ship_float: 0.0,
            background: Vec2::ZERO,
            fade_in: 0.0,
        }
    }

    pub fn ship_float_offset(&self) -> f32 {
        bob(self.ship_float, SHIP_FLOAT_AMPLITUDE)
    }

    /// Beam origin; uses the unscaled hull like the docking ship
    pub fn beam_origin(&self) -> Vec2 {
        self.ship_pos
            + Vec2::new(
                SHIP_WIDTH * BEAM_ORIGIN_X,
                self.ship_float_offset() + SHIP_HEIGHT * BEAM_ORIGIN_Y,
            )
    }

    /// Close enough to the hull to go inside
    pub fn in_reach(&self, point: Vec2) -> bool {
        within_radius(point, self.beam_origin(), INTERACT_RADIUS)
    }

    fn breathe(&mut self) {
        self.ship_scale += SCALE_STEP * self.scale_direction;
        if self.ship_scale >= MAX_SCALE {
            self.ship_scale = MAX_SCALE;
            self.scale_direction = -1.0;
        } else if self.ship_scale <= MIN_SCALE {
            self.ship_scale = MIN_SCALE;
            self.scale_direction = 1.0;
        }
    }
}

/// Top-left spawn point for the player when the flight starts
pub fn entry_position() -> Vec2 {
    Vec2::new(WORLD_WIDTH - PLAYER_SIZE, WORLD_HEIGHT - PLAYER_SIZE) / 2.0
}

pub fn update(scene: &mut FlyingScene, ctx: &mut Ctx) -> Option<SceneRequest> {
    let input = ctx.input;
    if input.toggle_flying {
        return Some(SceneRequest::Fade(SceneKind::Main));
    }
    if input.toggle_beam {
        scene.beam_active = !scene.beam_active;
        log::info!("Flying beam {}", if scene.beam_active { "on" } else { "off" });
        if scene.beam_active {
            ctx.cue(Cue::Beam);
        }
    }

    ctx.player.steer(input.movement, ctx.tuning.player_speed);
    let margin = Vec2::splat(EDGE_MARGIN);
    ctx.player.clamp_to(
        margin,
        Vec2::new(WORLD_WIDTH, WORLD_HEIGHT) - Vec2::splat(PLAYER_SIZE) - margin,
    );
    scene.background -= input.movement * PARALLAX * Vec2::new(1.0, 0.3);
    scene.fade_in = (scene.fade_in + FADE_IN_STEP).min(1.0);
    ctx.player.animate();
    emit_flames(&mut ctx.pools.flames, ctx.rng, ctx.player.feet(), 4);

    scene.ship_float = advance_phase(scene.ship_float, SHIP_FLOAT_STEP);
    scene.breathe();
    let nozzle = scene.ship_pos + Vec2::new(0.0, SHIP_HEIGHT * 0.55 + scene.ship_float_offset());
    emit_thrust(&mut ctx.pools.thrusters, ctx.rng, nozzle, 1.0, 3);

    let origin = scene.beam_origin();
    if scene.beam_active {
        scene.beam_pulse = advance_phase(scene.beam_pulse, BEAM_PULSE_STEP);
        if within_radius(ctx.player.center(), origin, ctx.tuning.flying_beam_radius) {
            log::info!("Player flew into the beam");
            return Some(SceneRequest::BoardShip);
        }
    }
    if input.interact && scene.in_reach(ctx.player.center()) {
        return Some(SceneRequest::TransitionToInside);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::scenes::test_support::Harness;

    #[test]
    fn test_scale_breathes_within_limits() {
        let mut scene = FlyingScene::new();
        for _ in 0..500 {
            scene.breathe();
            assert!(scene.ship_scale >= ENTRY_SCALE && scene.ship_scale <= MAX_SCALE);
        }
        assert!(scene.ship_scale >= MIN_SCALE);
    }

    #[test]
    fn test_beam_boards_when_close() {
        let mut h = Harness::new();
        let mut scene = FlyingScene::new();
        h.player.pos = scene.beam_origin() - Vec2::splat(PLAYER_SIZE / 2.0);
        assert_eq!(update(&mut scene, &mut h.ctx()), None);

        h.input.toggle_beam = true;
        assert_eq!(update(&mut scene, &mut h.ctx()), Some(SceneRequest::BoardShip));
    }

    #[test]
    fn test_parallax_opposes_movement() {
        let mut h = Harness::new();
        h.player.pos = entry_position();
        h.input.movement = Vec2::new(1.0, 0.0);
        let mut scene = FlyingScene::new();
        update(&mut scene, &mut h.ctx());
        assert!(scene.background.x < 0.0);
        assert_eq!(scene.background.y, 0.0);
    }

    #[test]
    fn test_toggle_returns_to_main() {
        let mut h = Harness::new();
        h.input.toggle_flying = true;
        let mut scene = FlyingScene::new();
        assert_eq!(
            update(&mut scene, &mut h.ctx()),
            Some(SceneRequest::Fade(SceneKind::Main))
        );
    }
}
