//! Per-scene update handlers
//!
//! Each handler gets its own scene state plus a [`Ctx`] borrowing the shared
//! parts of the world, and returns a [`SceneRequest`] when the scene wants
//! the orchestrator to move on. Handlers never switch scenes themselves.

pub mod cabin;
pub mod cinematic;
pub mod flying;
pub mod main_area;
pub mod outside;

use rand_pcg::Pcg32;

use super::celebration::Celebration;
use super::particles::Pools;
use super::state::{Cue, GameEvent, Player};
use super::tick::TickInput;
use crate::settings::QualityPreset;
use crate::tuning::Tuning;

/// Shared world state lent to the active scene handler for one tick
pub struct Ctx<'a> {
    pub input: &'a TickInput,
    pub player: &'a mut Player,
    pub pools: &'a mut Pools,
    pub rng: &'a mut Pcg32,
    pub celebrations: &'a mut Vec<Celebration>,
    pub events: &'a mut Vec<GameEvent>,
    pub game_over: &'a mut bool,
    pub tuning: &'a Tuning,
    pub quality: QualityPreset,
    /// The rescue boarding sequence is playing
    pub boarding: bool,
}

impl Ctx<'_> {
    pub fn cue(&mut self, cue: Cue) {
        self.events.push(GameEvent::Cue(cue));
    }

    /// Fatal hit; the orchestrator freezes from the next tick on
    pub fn crash(&mut self, what: &str) {
        if *self.game_over {
            return;
        }
        log::info!("Game over: player hit {}", what);
        *self.game_over = true;
        self.events.push(GameEvent::Cue(Cue::Crash));
        self.events.push(GameEvent::GameOver);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use rand::SeedableRng;

    use super::*;

    /// Owned backing storage for a [`Ctx`] in handler tests
    pub struct Harness {
        pub input: TickInput,
        pub player: Player,
        pub pools: Pools,
        pub rng: Pcg32,
        pub celebrations: Vec<Celebration>,
        pub events: Vec<GameEvent>,
        pub game_over: bool,
        pub tuning: Tuning,
        pub boarding: bool,
    }

    impl Harness {
        pub fn new() -> Self {
            Self {
                input: TickInput::default(),
                player: Player::default(),
                pools: Pools::new(400, 30),
                rng: Pcg32::seed_from_u64(77),
                celebrations: Vec::new(),
                events: Vec::new(),
                game_over: false,
                tuning: Tuning::default(),
                boarding: false,
            }
        }

        pub fn ctx(&mut self) -> Ctx<'_> {
            Ctx {
                input: &self.input,
                player: &mut self.player,
                pools: &mut self.pools,
                rng: &mut self.rng,
                celebrations: &mut self.celebrations,
                events: &mut self.events,
                game_over: &mut self.game_over,
                tuning: &self.tuning,
                quality: QualityPreset::Standard,
                boarding: self.boarding,
            }
        }
    }
}
