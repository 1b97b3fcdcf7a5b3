//! Outside the hull: survive until help arrives
//!
//! Debris comes in from the left at a rate and speed that climb with the
//! survival clock. The arrival ship sits by the far edge and catches anyone
//! who floats into its beam after a short grace period. The hull catches
//! fire as time goes on; once the fire is bad enough a rescue ship flies in,
//! and its beam starts the rescue boarding.

use glam::Vec2;
use rand::Rng;

use super::Ctx;
use crate::consts::*;
use crate::settings::QualityPreset;
use crate::sim::capture::{self, Beam, Boarding, CaptureStep};
use crate::sim::celebration::{Celebration, CelebrationKind};
use crate::sim::collision::{Rect, within_radius};
use crate::sim::particles::{emit_fire, emit_flames};
use crate::sim::scene::SceneRequest;
use crate::sim::ship::Ship;
use crate::sim::state::Cue;
use crate::sim::survival::Survival;

const ARRIVAL_START: Vec2 = Vec2::new(WORLD_WIDTH + 50.0, 80.0);
const ARRIVAL_STATION: Vec2 = Vec2::new(50.0, 80.0);
const ARRIVAL_SPEED: f32 = 3.0;
const RESCUE_START: Vec2 = Vec2::new(WORLD_WIDTH + 100.0, 100.0);
const RESCUE_STATION: Vec2 = Vec2::new(WORLD_WIDTH - 250.0, 100.0);
const RESCUE_SPEED: f32 = 2.0;
const RESCUE_SCALE: f32 = 1.2;
/// Fire is cosmetic below this intensity
const FIRE_THRESHOLD: f32 = 0.1;
const GATE_REACH: f32 = 120.0;
/// Gap between the player and the gate on arrival
const GATE_GAP: f32 = 80.0;
/// Closest the player may float to a world edge
const EDGE_MARGIN: f32 = 5.0;

/// Banner text shown over the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    /// The rescue ship has been called
    RescueIncoming,
    /// The rescue ship is in position
    BoardRescue,
}

impl Banner {
    pub fn text(self) -> &'static str {
        match self {
            Banner::RescueIncoming => "The hull is burning! A rescue ship is on its way",
            Banner::BoardRescue => "Fly into the rescue beam to board",
        }
    }
}

/// State of the survival sequence
#[derive(Debug, Clone, PartialEq)]
pub struct OutsideScene {
    pub survival: Survival,
    pub arrival: Ship,
    pub rescue: Option<Ship>,
    pub banner: Option<(Banner, u32)>,
    /// The countdown ran out with the player alive
    pub survived: bool,
}

impl Default for OutsideScene {
    fn default() -> Self {
        Self::new()
    }
}

impl OutsideScene {
    pub fn new() -> Self {
        Self {
            survival: Survival::new(),
            arrival: Ship::approaching(ARRIVAL_START, ARRIVAL_STATION, ARRIVAL_SPEED),
            rescue: None,
            banner: None,
            survived: false,
        }
    }

    pub fn gate() -> Rect {
        Rect::new(GATE_X, GATE_Y, GATE_WIDTH, GATE_HEIGHT)
    }

    pub fn near_gate(&self, player_center: Vec2) -> bool {
        within_radius(player_center, Self::gate().center(), GATE_REACH)
    }

    /// Where the player appears after leaving through the airlock
    pub fn entry_position() -> Vec2 {
        let gate = Self::gate();
        Vec2::new(
            (gate.left() - PLAYER_SIZE - GATE_GAP).max(10.0),
            (gate.center().y - PLAYER_SIZE / 2.0).clamp(10.0, WORLD_HEIGHT - PLAYER_SIZE - 10.0),
        )
    }

    /// The rescue ship once it can take the player
    pub fn boardable_rescue(&self) -> Option<&Ship> {
        self.rescue.as_ref().filter(|r| r.beam_active)
    }

    fn show(&mut self, banner: Banner, ticks: u32) {
        self.banner = Some((banner, ticks));
    }
}

pub fn update(scene: &mut OutsideScene, ctx: &mut Ctx) -> Option<SceneRequest> {
    let tuning = ctx.tuning;
    let input = ctx.input;
    let frozen = ctx.player.captured() || ctx.boarding;

    ctx.player.animate();
    if !frozen {
        ctx.player.steer(input.movement, tuning.player_speed);
        ctx.player.clamp_inset(EDGE_MARGIN);
        emit_flames(&mut ctx.pools.flames, ctx.rng, ctx.player.feet(), 4);
    }

    scene.survival.tick(ctx.rng, tuning);
    if !scene.survived && scene.survival.remaining(tuning) == 0 {
        scene.survived = true;
        log::info!("Survival countdown complete");
        ctx.celebrations.push(Celebration::new(CelebrationKind::Survived, ctx.rng));
        ctx.cue(Cue::Fireworks);
    }

    scene.arrival.tick();

    // Burning hull
    let intensity = scene.survival.fire_intensity(tuning);
    if intensity > FIRE_THRESHOLD
        && !ctx.pools.fire.is_full()
        && ctx.rng.random::<f32>() < intensity * ctx.quality.fire_spawn_factor()
    {
        let hull = scene.arrival.bounds();
        let origin = Vec2::new(hull.left() + hull.size.x * 0.3, hull.top() + hull.size.y * 0.8);
        let low_power = ctx.quality == QualityPreset::LowPower;
        emit_fire(&mut ctx.pools.fire, ctx.rng, origin, hull.size.x * 0.4, low_power);
    }

    if scene.rescue.is_none() && intensity > tuning.rescue_intensity_threshold {
        log::info!("Fire intensity {:.2}: rescue ship dispatched", intensity);
        scene.rescue = Some(
            Ship::approaching(RESCUE_START, RESCUE_STATION, RESCUE_SPEED).with_scale(RESCUE_SCALE),
        );
        scene.show(Banner::RescueIncoming, tuning.message_ticks);
        ctx.cue(Cue::Alarm);
    }
    let rescue_arrived = scene.rescue.as_mut().is_some_and(|r| r.tick());
    if rescue_arrived {
        log::info!("Rescue ship in position");
        scene.show(Banner::BoardRescue, tuning.message_ticks);
        ctx.cue(Cue::Beam);
    }

    if let Some((_, ticks)) = scene.banner.as_mut() {
        *ticks = ticks.saturating_sub(1);
        if *ticks == 0 {
            scene.banner = None;
        }
    }

    if !frozen {
        if let Some(rescue) = scene.boardable_rescue() {
            let beam = Beam {
                origin: rescue.beam_origin(),
                radius: tuning.rescue_beam_radius,
            };
            if capture::try_capture(ctx.player, beam, Boarding::RescueShip) {
                ctx.cue(Cue::Beam);
            }
        }
        if scene.arrival.beam_active && scene.survival.elapsed > tuning.arrival_boarding_grace {
            let beam = Beam {
                origin: scene.arrival.beam_origin(),
                radius: tuning.arrival_beam_radius,
            };
            if capture::try_capture(ctx.player, beam, Boarding::ArrivalShip) {
                ctx.cue(Cue::Beam);
            }
        }
    }

    if let Some(capture) = ctx.player.capture {
        let target = match capture.boarding {
            Boarding::RescueShip => scene.rescue.as_ref().map(Ship::capture_target),
            Boarding::ArrivalShip => Some(scene.arrival.capture_target()),
            Boarding::MainShip => None,
        };
        let target = target.unwrap_or(ctx.player.pos);
        match capture::pull(ctx.player, target, &mut ctx.pools.thrusters, ctx.rng, tuning) {
            CaptureStep::Resolved(Boarding::ArrivalShip) => return Some(SceneRequest::BoardShip),
            CaptureStep::Resolved(Boarding::RescueShip) => {
                return Some(SceneRequest::RescueBoarding);
            }
            _ => {}
        }
    }

    if input.interact && !frozen && scene.near_gate(ctx.player.center()) {
        return Some(SceneRequest::TransitionToInside);
    }

    if !ctx.player.captured() && !ctx.boarding {
        let player = ctx.player.bounds();
        if scene.survival.hit(&player).is_some() {
            ctx.crash("debris");
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::survival::Hazard;
    use crate::sim::scenes::test_support::Harness;

    fn clear_hazards(scene: &mut OutsideScene) {
        scene.survival.hazards.clear();
    }

    #[test]
    fn test_entry_position_beside_gate() {
        let pos = OutsideScene::entry_position();
        assert_eq!(pos.x, GATE_X - PLAYER_SIZE - GATE_GAP);
        assert_eq!(pos.y, GATE_Y + GATE_HEIGHT / 2.0 - PLAYER_SIZE / 2.0);
    }

    #[test]
    fn test_player_kept_off_the_edges() {
        let mut h = Harness::new();
        let mut scene = OutsideScene::new();
        h.player.pos = Vec2::new(1.0, 1.0);
        h.input.movement = Vec2::new(-1.0, -1.0);
        clear_hazards(&mut scene);
        update(&mut scene, &mut h.ctx());
        assert_eq!(h.player.pos, Vec2::splat(EDGE_MARGIN));

        h.player.pos = Vec2::new(WORLD_WIDTH, WORLD_HEIGHT);
        h.input.movement = Vec2::new(1.0, 1.0);
        clear_hazards(&mut scene);
        update(&mut scene, &mut h.ctx());
        assert_eq!(
            h.player.pos,
            Vec2::new(WORLD_WIDTH, WORLD_HEIGHT) - Vec2::splat(PLAYER_SIZE + EDGE_MARGIN)
        );
    }

    #[test]
    fn test_hazard_hit_sets_game_over() {
        let mut h = Harness::new();
        h.player.pos = Vec2::new(400.0, 300.0);
        let mut scene = OutsideScene::new();
        scene
            .survival
            .hazards
            .push(Hazard::new(Vec2::new(390.0, 310.0), Vec2::splat(30.0), Vec2::ZERO));
        update(&mut scene, &mut h.ctx());
        assert!(h.game_over);
    }

    #[test]
    fn test_no_collision_while_boarding() {
        let mut h = Harness::new();
        h.boarding = true;
        h.player.pos = Vec2::new(400.0, 300.0);
        let mut scene = OutsideScene::new();
        scene
            .survival
            .hazards
            .push(Hazard::new(Vec2::new(390.0, 310.0), Vec2::splat(30.0), Vec2::ZERO));
        update(&mut scene, &mut h.ctx());
        assert!(!h.game_over);
    }

    #[test]
    fn test_arrival_ship_boards_after_grace() {
        let mut h = Harness::new();
        let mut scene = OutsideScene::new();
        while !scene.arrival.is_stationed() {
            scene.arrival.tick();
        }
        h.player.pos = scene.arrival.capture_target();

        for _ in 0..h.tuning.arrival_boarding_grace {
            clear_hazards(&mut scene);
            h.player.pos = scene.arrival.capture_target();
            assert_eq!(update(&mut scene, &mut h.ctx()), None);
        }
        assert!(!h.player.captured());

        let mut request = None;
        for _ in 0..60 {
            clear_hazards(&mut scene);
            request = update(&mut scene, &mut h.ctx());
            if request.is_some() {
                break;
            }
        }
        assert_eq!(request, Some(SceneRequest::BoardShip));
    }

    #[test]
    fn test_rescue_ship_spawns_once_and_arrives() {
        let mut h = Harness::new();
        h.player.pos = Vec2::new(450.0, 500.0);
        let mut scene = OutsideScene::new();
        // Just past the 0.8 intensity threshold (0.4 of the countdown)
        scene.survival.elapsed = 1441;
        clear_hazards(&mut scene);
        update(&mut scene, &mut h.ctx());
        assert!(scene.rescue.is_some());
        assert_eq!(scene.banner.map(|b| b.0), Some(Banner::RescueIncoming));

        for _ in 0..400 {
            clear_hazards(&mut scene);
            h.player.pos = Vec2::new(450.0, 500.0);
            update(&mut scene, &mut h.ctx());
        }
        let rescue = scene.boardable_rescue().expect("rescue ship stationed");
        assert_eq!(rescue.pos, RESCUE_STATION);
    }

    #[test]
    fn test_rescue_beam_requests_boarding() {
        let mut h = Harness::new();
        let mut scene = OutsideScene::new();
        let mut rescue =
            Ship::approaching(RESCUE_STATION, RESCUE_STATION, RESCUE_SPEED).with_scale(RESCUE_SCALE);
        rescue.tick();
        h.player.pos = rescue.capture_target();
        scene.rescue = Some(rescue);

        let mut request = None;
        for _ in 0..60 {
            clear_hazards(&mut scene);
            request = update(&mut scene, &mut h.ctx());
            if request.is_some() {
                break;
            }
        }
        assert_eq!(request, Some(SceneRequest::RescueBoarding));
    }

    #[test]
    fn test_countdown_end_celebrates_once() {
        let mut h = Harness::new();
        h.player.pos = Vec2::new(450.0, 500.0);
        let mut scene = OutsideScene::new();
        scene.rescue = Some(Ship::approaching(RESCUE_START, RESCUE_STATION, 0.0));
        scene.survival.elapsed = h.tuning.max_survival_ticks - 1;
        for _ in 0..5 {
            clear_hazards(&mut scene);
            update(&mut scene, &mut h.ctx());
        }
        assert!(scene.survived);
        assert_eq!(h.celebrations.len(), 1);
        assert!(!h.game_over);
    }

    #[test]
    fn test_interact_near_gate() {
        let mut h = Harness::new();
        h.player.pos = OutsideScene::entry_position() + Vec2::new(60.0, 0.0);
        h.input.interact = true;
        let mut scene = OutsideScene::new();
        assert_eq!(
            update(&mut scene, &mut h.ctx()),
            Some(SceneRequest::TransitionToInside)
        );
    }
}
