//! Confetti and ribbon celebrations
//!
//! Three flavours share one implementation: a full-marks quiz, surviving the
//! whole countdown, and the final rescue. Each runs for a fixed number of
//! ticks and fades out over its last stretch.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::particles::Color;
use crate::advance_phase;
use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};

const PALETTE: [Color; 6] = [
    [1.0, 0.42, 0.42, 1.0],
    [0.31, 0.8, 0.77, 1.0],
    [0.27, 0.72, 0.82, 1.0],
    [0.59, 0.81, 0.71, 1.0],
    [1.0, 0.92, 0.65, 1.0],
    [0.87, 0.63, 0.87, 1.0],
];

/// What is being celebrated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CelebrationKind {
    /// Every quiz question answered correctly
    QuizPerfect,
    /// The survival countdown ran out with the player alive
    Survived,
    /// Boarded the rescue ship
    Rescued,
}

impl CelebrationKind {
    fn confetti(self) -> usize {
        match self {
            CelebrationKind::QuizPerfect => 50,
            CelebrationKind::Survived => 100,
            CelebrationKind::Rescued => 50,
        }
    }

    fn ribbons(self) -> usize {
        match self {
            CelebrationKind::QuizPerfect => 0,
            CelebrationKind::Survived => 20,
            CelebrationKind::Rescued => 30,
        }
    }

    /// Total length in ticks
    pub fn duration(self) -> u32 {
        match self {
            CelebrationKind::QuizPerfect => 480,
            CelebrationKind::Survived => 600,
            CelebrationKind::Rescued => 1000,
        }
    }

    /// How long the headline banner stays up
    pub fn message_ticks(self) -> u32 {
        match self {
            CelebrationKind::QuizPerfect => 240,
            CelebrationKind::Survived => 300,
            CelebrationKind::Rescued => 300,
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            CelebrationKind::QuizPerfect => "Perfect score!",
            CelebrationKind::Survived => "You survived!",
            CelebrationKind::Rescued => "Rescued! Welcome aboard",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Confetti {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub rotation: f32,
    pub spin: f32,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ribbon {
    pub pos: Vec2,
    pub vel: Vec2,
    pub length: f32,
    pub wave_phase: f32,
    pub color: Color,
}

/// A running celebration
#[derive(Debug, Clone)]
pub struct Celebration {
    pub kind: CelebrationKind,
    pub confetti: Vec<Confetti>,
    pub ribbons: Vec<Ribbon>,
    pub elapsed: u32,
    gravity: f32,
}

impl Celebration {
    pub fn new(kind: CelebrationKind, rng: &mut Pcg32) -> Self {
        let confetti = (0..kind.confetti())
            .map(|_| Confetti {
                pos: Vec2::new(
                    rng.random_range(0.0..WORLD_WIDTH),
                    rng.random_range(-WORLD_HEIGHT * 0.5..0.0),
                ),
                vel: Vec2::new(rng.random_range(-2.0..2.0), rng.random_range(1.0..4.0)),
                size: Vec2::new(rng.random_range(6.0..12.0), rng.random_range(4.0..8.0)),
                rotation: rng.random_range(0.0..std::f32::consts::TAU),
                spin: rng.random_range(-0.2..0.2),
                color: PALETTE[rng.random_range(0..PALETTE.len())],
            })
            .collect();
        let ribbons = (0..kind.ribbons())
            .map(|_| Ribbon {
                pos: Vec2::new(
                    rng.random_range(0.0..WORLD_WIDTH),
                    rng.random_range(-WORLD_HEIGHT..0.0),
                ),
                vel: Vec2::new(rng.random_range(-1.0..1.0), rng.random_range(1.5..3.0)),
                length: rng.random_range(40.0..90.0),
                wave_phase: rng.random_range(0.0..std::f32::consts::TAU),
                color: PALETTE[rng.random_range(0..PALETTE.len())],
            })
            .collect();
        log::info!("Celebration started: {:?}", kind);
        Self {
            kind,
            confetti,
            ribbons,
            elapsed: 0,
            gravity: 0.1,
        }
    }

    /// Advance one tick; returns false once the celebration is over
    pub fn tick(&mut self) -> bool {
        self.elapsed += 1;
        for c in &mut self.confetti {
            c.vel.y = (c.vel.y + self.gravity).min(5.0);
            c.pos += c.vel;
            c.rotation += c.spin;
            if c.pos.y > WORLD_HEIGHT + 20.0 {
                c.pos.y = -20.0;
            }
        }
        for r in &mut self.ribbons {
            r.wave_phase = advance_phase(r.wave_phase, 0.1);
            r.pos += r.vel;
            if r.pos.y > WORLD_HEIGHT + r.length {
                r.pos.y = -r.length;
            }
        }
        !self.finished()
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= self.kind.duration()
    }

    /// 1 while running, fading to 0 over the last quarter
    pub fn opacity(&self) -> f32 {
        let duration = self.kind.duration() as f32;
        let left = 1.0 - self.elapsed as f32 / duration;
        (left * 4.0).clamp(0.0, 1.0)
    }

    pub fn show_message(&self) -> bool {
        self.elapsed < self.kind.message_ticks()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_quiz_celebration_counts() {
        let mut rng = Pcg32::seed_from_u64(1);
        let c = Celebration::new(CelebrationKind::QuizPerfect, &mut rng);
        assert_eq!(c.confetti.len(), 50);
        assert!(c.ribbons.is_empty());
        let c = Celebration::new(CelebrationKind::Survived, &mut rng);
        assert_eq!(c.confetti.len(), 100);
        assert_eq!(c.ribbons.len(), 20);
    }

    #[test]
    fn test_celebration_runs_for_its_duration() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut c = Celebration::new(CelebrationKind::QuizPerfect, &mut rng);
        let mut ticks = 0;
        while c.tick() {
            ticks += 1;
        }
        assert_eq!(ticks + 1, CelebrationKind::QuizPerfect.duration());
        assert_eq!(c.opacity(), 0.0);
        assert!(!c.show_message());
    }
}
