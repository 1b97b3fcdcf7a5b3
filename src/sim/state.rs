//! World state and core simulation types
//!
//! One owned aggregate holds everything the orchestrator, the scene handlers
//! and the renderer look at. There are no globals: construct a `World`, feed
//! it ticks, inspect it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::capture::Capture;
use super::celebration::Celebration;
use super::collision::Rect;
use super::particles::Pools;
use super::quiz::{Question, QuizRecord, default_bank};
use super::scene::{Scene, SceneKind};
use super::transition::Transitions;
use crate::consts::*;
use crate::settings::QualityPreset;
use crate::tuning::Tuning;
use crate::{advance_phase, bob};

/// Which way the avatar faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// The astronaut in world space
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    /// Displacement applied last tick
    pub vel: Vec2,
    pub facing: Facing,
    /// 0..1, drops while a beam pulls the player in
    pub alpha: f32,
    pub capture: Option<Capture>,
    pub float_phase: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self::at(Vec2::new(PLAYER_START_X, PLAYER_START_Y))
    }
}

impl Player {
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            facing: Facing::Right,
            alpha: 1.0,
            capture: None,
            float_phase: 0.0,
        }
    }

    pub fn captured(&self) -> bool {
        self.capture.is_some()
    }

    pub fn size() -> Vec2 {
        Vec2::splat(PLAYER_SIZE)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Self::size() / 2.0
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, Self::size())
    }

    /// Where jetpack flames come out
    pub fn feet(&self) -> Vec2 {
        self.pos + Vec2::new(PLAYER_SIZE / 2.0, PLAYER_SIZE + self.float_offset())
    }

    pub fn float_offset(&self) -> f32 {
        bob(self.float_phase, PLAYER_FLOAT_AMPLITUDE)
    }

    /// Advance the floating bob
    pub fn animate(&mut self) {
        self.float_phase = advance_phase(self.float_phase, PLAYER_FLOAT_STEP);
    }

    /// Move along a normalised intent vector
    pub fn steer(&mut self, intent: Vec2, speed: f32) {
        self.vel = intent * speed;
        self.pos += self.vel;
        if self.vel.x < 0.0 {
            self.facing = Facing::Left;
        } else if self.vel.x > 0.0 {
            self.facing = Facing::Right;
        }
    }

    /// Keep the avatar inside `[min, max]` (top-left corner bounds)
    pub fn clamp_to(&mut self, min: Vec2, max: Vec2) {
        self.pos = self.pos.clamp(min, max);
    }

    /// Keep the whole avatar inside the world
    pub fn clamp_to_world(&mut self) {
        self.clamp_inset(0.0);
    }

    /// Keep the avatar at least `margin` away from every world edge
    pub fn clamp_inset(&mut self, margin: f32) {
        let min = Vec2::splat(margin);
        let max = Vec2::new(WORLD_WIDTH, WORLD_HEIGHT) - Self::size() - min;
        self.clamp_to(min, max);
    }

    /// Drop any capture and restore full visibility at `pos`
    pub fn place(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.alpha = 1.0;
        self.capture = None;
    }
}

/// Sound cues the simulation asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Beam,
    ShipEngine,
    ShipFlying,
    QuizCorrect,
    QuizWrong,
    Confetti,
    Fireworks,
    Victory,
    Alarm,
    Crash,
}

/// Background music tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Music {
    Ambient,
    Survival,
    Celebration,
}

/// Events produced during a tick, drained by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Cue(Cue),
    Music(Music),
    SceneChanged { from: SceneKind, to: SceneKind },
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct World {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub quality: QualityPreset,
    pub question_bank: Vec<Question>,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub scene: Scene,
    pub transitions: Transitions,
    pub player: Player,
    /// Visual particles (not gameplay-affecting)
    pub pools: Pools,
    pub celebrations: Vec<Celebration>,
    pub quiz_record: QuizRecord,
    /// Hit by an obstacle or hazard; frozen until restart
    pub game_over: bool,
    /// Boarded the rescue ship
    pub rescued: bool,
    pub events: Vec<GameEvent>,
}

impl World {
    /// Create a new world with default tuning and quality
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, Tuning::default(), QualityPreset::default(), default_bank())
    }

    pub fn with_config(
        seed: u64,
        tuning: Tuning,
        quality: QualityPreset,
        question_bank: Vec<Question>,
    ) -> Self {
        let transitions = Transitions::new(
            tuning.scene_fade_speed,
            tuning.to_inside_speed,
            tuning.rescue_boarding_speed(),
        );
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            quality,
            question_bank,
            time_ticks: 0,
            scene: Scene::default(),
            transitions,
            player: Player::default(),
            pools: Pools::new(quality.max_particles(), quality.max_fire_particles()),
            celebrations: Vec::new(),
            quiz_record: QuizRecord::default(),
            game_over: false,
            rescued: false,
            events: vec![GameEvent::Music(Music::Ambient)],
        }
    }

    /// Reinitialise every record to its launch default, keeping configuration
    pub fn restart(&mut self, seed: u64) {
        let tuning = self.tuning.clone();
        let bank = std::mem::take(&mut self.question_bank);
        *self = Self::with_config(seed, tuning, self.quality, bank);
        log::info!("World restarted with seed {}", seed);
    }

    pub fn scene_kind(&self) -> SceneKind {
        self.scene.kind()
    }

    /// Game over or rescued: only a restart moves things on
    pub fn is_terminal(&self) -> bool {
        self.game_over || self.rescued
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_steer_sets_facing() {
        let mut player = Player::default();
        player.steer(Vec2::new(-1.0, 0.0), 3.0);
        assert_eq!(player.facing, Facing::Left);
        assert_eq!(player.pos.x, PLAYER_START_X - 3.0);
        player.steer(Vec2::ZERO, 3.0);
        assert_eq!(player.facing, Facing::Left);
    }

    #[test]
    fn test_clamp_to_world() {
        let mut player = Player::at(Vec2::new(-50.0, 900.0));
        player.clamp_to_world();
        assert_eq!(player.pos, Vec2::new(0.0, WORLD_HEIGHT - PLAYER_SIZE));
    }

    #[test]
    fn test_new_world_defaults() {
        let world = World::new(42);
        assert_eq!(world.scene_kind(), SceneKind::Main);
        assert!(!world.game_over);
        assert!(!world.is_terminal());
        assert!(!world.question_bank.is_empty());
        assert_eq!(world.player, Player::default());
    }
}
