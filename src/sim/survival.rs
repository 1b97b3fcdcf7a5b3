//! Survival countdown and hazards on the outside hull
//!
//! Difficulty and fire intensity are pure functions of elapsed ticks, so
//! they can only ever rise during a run. Hazards lock in their speed at
//! spawn time and then move linearly until they leave the world.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use super::particles::Color;
use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::tuning::Tuning;

/// Extra difficulty reached at the end of the countdown
const DIFFICULTY_RAMP: f32 = 2.5;
/// Fire reaches full intensity halfway through
const FIRE_RAMP: f32 = 2.0;
/// Vertical velocity is applied at a quarter rate
pub const DRIFT_SCALE: f32 = 0.25;

/// `1.0 + elapsed / max * 2.5`, uncapped
pub fn difficulty_multiplier(elapsed: u32, max_ticks: u32) -> f32 {
    1.0 + (elapsed as f32 / max_ticks.max(1) as f32) * DIFFICULTY_RAMP
}

/// `min(1, 2 * elapsed / max)`
pub fn fire_intensity(elapsed: u32, max_ticks: u32) -> f32 {
    (FIRE_RAMP * elapsed as f32 / max_ticks.max(1) as f32).min(1.0)
}

/// Ticks between hazard spawns at a given difficulty, floored at `min_interval`
pub fn adjusted_spawn_rate(multiplier: f32, base_rate: f32, min_interval: u32) -> u32 {
    let rate = (base_rate / (multiplier * 0.8)).floor() as u32;
    rate.max(min_interval).max(1)
}

/// A drifting piece of debris
#[derive(Debug, Clone, PartialEq)]
pub struct Hazard {
    pub pos: Vec2,
    pub size: Vec2,
    /// Per-tick velocity fixed at spawn
    pub vel: Vec2,
    pub color: Color,
}

impl Hazard {
    pub fn new(pos: Vec2, size: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            size,
            vel,
            color: [0.55, 0.8, 0.85, 1.0],
        }
    }

    /// Enter from the left edge at a random height, heading right with a slight angle
    pub fn spawn(rng: &mut Pcg32, multiplier: f32) -> Self {
        let size = rng.random_range(25.0..60.0);
        let speed = rng.random_range(1.2..2.8) * multiplier;
        let angle: f32 = rng.random_range(-0.15..0.15);
        let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let y = rng.random_range(20.0..(WORLD_HEIGHT - 40.0 - size));
        let hue = rng.random_range(0.0..0.25);
        Self {
            color: [0.5 + hue, 0.75, 0.85 - hue, 1.0],
            ..Self::new(
                Vec2::new(-size, y),
                Vec2::splat(size),
                Vec2::new(speed, speed * angle.tan() * sign),
            )
        }
    }

    pub fn tick(&mut self) {
        self.pos.x += self.vel.x;
        self.pos.y += self.vel.y * DRIFT_SCALE;
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn off_world(&self) -> bool {
        self.pos.x > WORLD_WIDTH + 40.0 || self.pos.y < -60.0 || self.pos.y > WORLD_HEIGHT + 60.0
    }
}

/// Countdown and hazard field
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Survival {
    pub elapsed: u32,
    pub spawn_counter: u32,
    pub hazards: Vec<Hazard>,
}

impl Survival {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn multiplier(&self, tuning: &Tuning) -> f32 {
        difficulty_multiplier(self.elapsed, tuning.max_survival_ticks)
    }

    pub fn fire_intensity(&self, tuning: &Tuning) -> f32 {
        fire_intensity(self.elapsed, tuning.max_survival_ticks)
    }

    /// Ticks left on the countdown
    pub fn remaining(&self, tuning: &Tuning) -> u32 {
        tuning.max_survival_ticks.saturating_sub(self.elapsed)
    }

    /// Advance the clock, maybe spawn, move and cull hazards
    pub fn tick(&mut self, rng: &mut Pcg32, tuning: &Tuning) {
        self.elapsed = self.elapsed.saturating_add(1);
        self.spawn_counter = self.spawn_counter.wrapping_add(1);

        let multiplier = self.multiplier(tuning);
        let rate = adjusted_spawn_rate(
            multiplier,
            tuning.hazard_base_spawn_rate,
            tuning.hazard_min_spawn_interval,
        );
        if self.spawn_counter % rate == 0 {
            self.hazards.push(Hazard::spawn(rng, multiplier));
        }

        for hazard in &mut self.hazards {
            hazard.tick();
        }
        self.hazards.retain(|h| !h.off_world());
    }

    /// First hazard overlapping the player's box
    pub fn hit(&self, player: &Rect) -> Option<&Hazard> {
        self.hazards.iter().find(|h| h.bounds().intersects(player))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    #[test]
    fn test_difficulty_endpoints() {
        assert_eq!(difficulty_multiplier(0, 3600), 1.0);
        assert!((difficulty_multiplier(3600, 3600) - 3.5).abs() < 1e-6);
    }

    #[test]
    fn test_fire_intensity_saturates_halfway() {
        assert_eq!(fire_intensity(0, 3600), 0.0);
        assert!((fire_intensity(1800, 3600) - 1.0).abs() < 1e-6);
        assert_eq!(fire_intensity(3000, 3600), 1.0);
    }

    #[test]
    fn test_spawn_rate_floor() {
        assert_eq!(adjusted_spawn_rate(1.0, 150.0, 80), 187);
        assert_eq!(adjusted_spawn_rate(3.5, 150.0, 80), 80);
    }

    #[test]
    fn test_hazard_moves_linearly() {
        let start = Vec2::new(-30.0, 200.0);
        let mut hazard = Hazard::new(start, Vec2::splat(30.0), Vec2::new(1.5, 0.0));
        let mut last = hazard.pos.x;
        for _ in 0..100 {
            hazard.tick();
            assert!(hazard.pos.x > last);
            last = hazard.pos.x;
        }
        assert_eq!(hazard.pos, start + Vec2::new(1.5 * 100.0, 0.0));
    }

    #[test]
    fn test_spawned_speed_is_fixed_at_spawn() {
        let mut rng = Pcg32::seed_from_u64(11);
        let hazard = Hazard::spawn(&mut rng, 2.0);
        assert!(hazard.vel.x >= 2.4 && hazard.vel.x < 5.6);
        assert_eq!(hazard.pos.x, -hazard.size.x);
    }

    #[test]
    fn test_survival_spawns_and_culls() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(12);
        let mut survival = Survival::new();
        let mut spawned = false;
        for _ in 0..2000 {
            survival.tick(&mut rng, &tuning);
            spawned |= !survival.hazards.is_empty();
            assert!(survival.hazards.iter().all(|h| !h.off_world()));
        }
        assert!(spawned);
        assert_eq!(survival.elapsed, 2000);
    }

    #[test]
    fn test_hit_detects_overlap() {
        let mut survival = Survival::new();
        survival
            .hazards
            .push(Hazard::new(Vec2::new(100.0, 100.0), Vec2::splat(30.0), Vec2::X));
        assert!(survival.hit(&Rect::new(120.0, 120.0, 72.0, 72.0)).is_some());
        assert!(survival.hit(&Rect::new(400.0, 120.0, 72.0, 72.0)).is_none());
    }

    proptest! {
        #[test]
        fn prop_difficulty_never_decreases(a in 0u32..10_000, b in 0u32..10_000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(difficulty_multiplier(lo, 3600) <= difficulty_multiplier(hi, 3600));
            prop_assert!(fire_intensity(lo, 3600) <= fire_intensity(hi, 3600));
        }
    }
}
