//! Opening area
//!
//! A ship flies in from the left and docks. Debris drifts in from the right
//! on a fixed timer. Once the player floats into the docked ship's beam they
//! are pulled aboard and the ship leaves, which starts the cinematic.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::Ctx;
use crate::consts::*;
use crate::sim::capture::{self, Beam, Boarding, CaptureStep};
use crate::sim::collision::{Rect, within_radius};
use crate::sim::particles::{emit_flames, emit_thrust};
use crate::sim::scene::{SceneKind, SceneRequest};
use crate::sim::ship::Ship;
use crate::sim::state::Cue;

const SHIP_START: Vec2 = Vec2::new(-220.0, 80.0);
const SHIP_DOCK: Vec2 = Vec2::new(WORLD_WIDTH - SHIP_WIDTH - 50.0, 80.0);
const SHIP_SPEED: f32 = 1.5;
const DEPART_VELOCITY: Vec2 = Vec2::new(-12.0, 0.0);
/// The cinematic starts once the departing hull is this far past the edge
const DEPART_MARGIN: f32 = 40.0;
const THRUST_PER_TICK: usize = 6;
const FLAMES_PER_TICK: usize = 4;

/// A piece of debris drifting left
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

impl Obstacle {
    fn spawn(rng: &mut Pcg32) -> Self {
        let h = rng.random_range(20.0..45.0);
        let w = rng.random_range(20.0..55.0);
        Self {
            pos: Vec2::new(WORLD_WIDTH + w, rng.random_range(40.0..(WORLD_HEIGHT - 80.0 - h))),
            size: Vec2::new(w, h),
            speed: rng.random_range(0.9..2.0),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// State of the opening area
#[derive(Debug, Clone, PartialEq)]
pub struct MainScene {
    pub ship: Ship,
    pub obstacles: Vec<Obstacle>,
    pub spawn_timer: u32,
    /// The player is aboard and the ship is leaving
    pub boarded: bool,
}

impl Default for MainScene {
    fn default() -> Self {
        Self::new()
    }
}

impl MainScene {
    pub fn new() -> Self {
        Self {
            ship: Ship::approaching(SHIP_START, SHIP_DOCK, SHIP_SPEED),
            obstacles: Vec::new(),
            spawn_timer: 0,
            boarded: false,
        }
    }

    fn ship_nozzle(&self) -> Vec2 {
        let bounds = self.ship.bounds();
        if self.ship.is_departing() {
            Vec2::new(bounds.right(), bounds.top() + bounds.size.y * 0.55)
        } else {
            Vec2::new(bounds.left(), bounds.top() + bounds.size.y * 0.55)
        }
    }
}

pub fn update(scene: &mut MainScene, ctx: &mut Ctx) -> Option<SceneRequest> {
    let tuning = ctx.tuning;
    ctx.player.animate();

    if !scene.boarded && !ctx.player.captured() {
        if ctx.input.toggle_flying {
            return Some(SceneRequest::Fade(SceneKind::Flying));
        }
        ctx.player.steer(ctx.input.movement, tuning.player_speed);
        ctx.player.clamp_to_world();
        emit_flames(&mut ctx.pools.flames, ctx.rng, ctx.player.feet(), FLAMES_PER_TICK);
    }

    scene.ship.tick();
    let heading = if scene.ship.is_departing() { -1.0 } else { 1.0 };
    let nozzle = scene.ship_nozzle();
    emit_thrust(&mut ctx.pools.thrusters, ctx.rng, nozzle, heading, THRUST_PER_TICK);

    if scene.boarded {
        if scene.ship.off_left(DEPART_MARGIN) {
            return Some(SceneRequest::Cinematic);
        }
    } else if scene.ship.beam_active {
        let beam = Beam {
            origin: scene.ship.beam_origin(),
            radius: tuning.main_beam_radius,
        };
        if capture::try_capture(ctx.player, beam, Boarding::MainShip) {
            ctx.cue(Cue::Beam);
        }
        // Board on the spot instead of waiting out the pull
        if ctx.input.interact && within_radius(ctx.player.center(), beam.origin, beam.radius) {
            return Some(SceneRequest::BoardShip);
        }
    }

    let target = scene.ship.capture_target();
    if let CaptureStep::Resolved(Boarding::MainShip) =
        capture::pull(ctx.player, target, &mut ctx.pools.thrusters, ctx.rng, tuning)
    {
        scene.boarded = true;
        scene.ship.depart(DEPART_VELOCITY);
        ctx.cue(Cue::ShipEngine);
    }

    scene.spawn_timer = scene.spawn_timer.wrapping_add(1);
    if scene.spawn_timer % tuning.obstacle_spawn_interval.max(1) == 0 {
        scene.obstacles.push(Obstacle::spawn(ctx.rng));
    }
    for obstacle in &mut scene.obstacles {
        obstacle.pos.x -= obstacle.speed;
    }
    scene.obstacles.retain(|o| o.pos.x + o.size.x >= -50.0);

    if !scene.boarded && !ctx.player.captured() {
        let player = ctx.player.bounds();
        if scene.obstacles.iter().any(|o| o.bounds().intersects(&player)) {
            ctx.crash("an obstacle");
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::scenes::test_support::Harness;
    use crate::sim::state::Player;

    #[test]
    fn test_toggle_flying_requests_fade() {
        let mut h = Harness::new();
        h.input.toggle_flying = true;
        let mut scene = MainScene::new();
        assert_eq!(
            update(&mut scene, &mut h.ctx()),
            Some(SceneRequest::Fade(SceneKind::Flying))
        );
    }

    #[test]
    fn test_interact_in_docked_beam_boards_immediately() {
        let mut h = Harness::new();
        let mut scene = MainScene::new();
        while !scene.ship.is_stationed() {
            scene.ship.tick();
        }
        h.player.pos = scene.ship.beam_origin() - Player::size() / 2.0;
        h.input.interact = true;
        assert_eq!(update(&mut scene, &mut h.ctx()), Some(SceneRequest::BoardShip));
    }

    #[test]
    fn test_interact_outside_beam_does_nothing() {
        let mut h = Harness::new();
        h.input.interact = true;
        let mut scene = MainScene::new();
        while !scene.ship.is_stationed() {
            scene.ship.tick();
        }
        assert_eq!(update(&mut scene, &mut h.ctx()), None);
        assert!(!h.player.captured());
    }

    #[test]
    fn test_obstacle_hit_is_game_over() {
        let mut h = Harness::new();
        let mut scene = MainScene::new();
        scene.obstacles.push(Obstacle {
            pos: h.player.pos + Vec2::new(10.0, 10.0),
            size: Vec2::splat(30.0),
            speed: 0.0,
        });
        update(&mut scene, &mut h.ctx());
        assert!(h.game_over);
    }

    #[test]
    fn test_docked_beam_boards_then_ship_departs() {
        let mut h = Harness::new();
        let mut scene = MainScene::new();
        while !scene.ship.is_stationed() {
            scene.ship.tick();
        }
        h.player.pos = scene.ship.capture_target();

        let mut request = None;
        for _ in 0..400 {
            // Keep debris out of the way
            scene.obstacles.clear();
            request = update(&mut scene, &mut h.ctx());
            if request.is_some() {
                break;
            }
        }
        assert!(scene.boarded);
        assert!(scene.ship.is_departing());
        assert_eq!(request, Some(SceneRequest::Cinematic));
        assert!(!h.game_over);
    }

    #[test]
    fn test_obstacles_spawn_on_interval_and_leave() {
        let mut h = Harness::new();
        let mut scene = MainScene::new();
        h.player.pos = Vec2::new(0.0, 0.0);
        for _ in 0..120 {
            update(&mut scene, &mut h.ctx());
        }
        assert_eq!(scene.obstacles.len(), 1);
        assert!(scene.obstacles.iter().all(|o| o.pos.x + o.size.x >= -50.0));
    }
}
