//! Ship interiors and the computer quiz
//!
//! Both cabins keep their own player position, separate from the world-space
//! player, seeded at scene entry. The mothership cabin has a computer that
//! starts the quiz and an airlock on the left wall that leads outside after
//! a confirmation dialog. The rescue cabin is the end of the road.

use glam::Vec2;

use super::Ctx;
use crate::consts::*;
use crate::sim::collision::{Rect, within_radius};
use crate::sim::quiz::{AnswerResult, Quiz, QuizStep};
use crate::sim::scene::SceneRequest;
use crate::sim::state::{Cue, Facing};
use crate::{advance_phase, bob};

const MARGIN: f32 = 5.0;
const FADE_IN_STEP: f32 = 0.02;
/// Background drift per unit of player movement
const PARALLAX: Vec2 = Vec2::new(0.4, 0.04);
const COMPUTER: Rect = Rect::new(WORLD_WIDTH / 2.0 - 80.0, WORLD_HEIGHT - 395.0, 160.0, 120.0);
const COMPUTER_FLOAT_AMPLITUDE: f32 = 3.0;
const INTERACT_RADIUS: f32 = 180.0;
/// The airlock control shows up when the player hugs the left wall
const EXIT_REACH: f32 = 10.0;

/// Which ship the cabin belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CabinKind {
    Mothership,
    RescueShip,
}

/// Interior scene state
#[derive(Debug, Clone, PartialEq)]
pub struct Cabin {
    pub kind: CabinKind,
    /// Player position in cabin space (top-left)
    pub player: Vec2,
    pub facing: Facing,
    pub background: Vec2,
    pub fade_in: f32,
    pub float_phase: f32,
    /// The "leave the ship?" dialog is open
    pub confirm_exit: bool,
}

impl Cabin {
    /// Fresh interior with the player in the middle
    pub fn enter(kind: CabinKind) -> Self {
        Self {
            kind,
            player: Vec2::new(WORLD_WIDTH - PLAYER_SIZE, WORLD_HEIGHT - PLAYER_SIZE) / 2.0,
            facing: Facing::Right,
            background: Vec2::ZERO,
            fade_in: 0.0,
            float_phase: 0.0,
            confirm_exit: false,
        }
    }

    pub fn player_center(&self) -> Vec2 {
        self.player + Vec2::splat(PLAYER_SIZE / 2.0)
    }

    pub fn float_offset(&self) -> f32 {
        bob(self.float_phase, PLAYER_FLOAT_AMPLITUDE)
    }

    /// The computer console, following the background parallax and bob
    pub fn computer(&self) -> Option<Rect> {
        if self.kind != CabinKind::Mothership {
            return None;
        }
        let offset = self.background
            + Vec2::new(0.0, bob(self.float_phase, COMPUTER_FLOAT_AMPLITUDE));
        Some(Rect::from_pos_size(COMPUTER.pos + offset, COMPUTER.size))
    }

    pub fn near_computer(&self) -> bool {
        self.computer()
            .is_some_and(|c| within_radius(self.player_center(), c.center(), INTERACT_RADIUS))
    }

    pub fn exit_available(&self) -> bool {
        self.kind == CabinKind::Mothership && self.player.x <= EXIT_REACH
    }

    fn walk(&mut self, intent: Vec2, speed: f32) {
        let delta = intent * speed;
        self.player += delta;
        self.player = self.player.clamp(
            Vec2::splat(MARGIN),
            Vec2::new(WORLD_WIDTH, WORLD_HEIGHT) - Vec2::splat(PLAYER_SIZE + MARGIN),
        );
        // The rescue cabin pans with the player, the mothership against
        match self.kind {
            CabinKind::Mothership => self.background -= delta * PARALLAX,
            CabinKind::RescueShip => self.background += delta * PARALLAX,
        }
        if delta.x < 0.0 {
            self.facing = Facing::Left;
        } else if delta.x > 0.0 {
            self.facing = Facing::Right;
        }
    }
}

pub fn update(cabin: &mut Cabin, ctx: &mut Ctx) -> Option<SceneRequest> {
    let input = ctx.input;
    cabin.fade_in = (cabin.fade_in + FADE_IN_STEP).min(1.0);
    cabin.float_phase = advance_phase(cabin.float_phase, PLAYER_FLOAT_STEP);
    cabin.walk(input.movement, ctx.tuning.cabin_speed);

    if cabin.kind != CabinKind::Mothership {
        return None;
    }

    if cabin.confirm_exit {
        if input.confirm_exit {
            cabin.confirm_exit = false;
            log::info!("Leaving the ship through the airlock");
            return Some(SceneRequest::ExitToOutside);
        }
        if input.cancel_exit {
            cabin.confirm_exit = false;
        }
        return None;
    }

    if input.exit && cabin.exit_available() {
        cabin.confirm_exit = true;
        return None;
    }
    if input.interact && cabin.near_computer() {
        return Some(SceneRequest::StartQuiz);
    }
    None
}

/// Quiz over the mothership cabin
pub fn update_quiz(quiz: &mut Quiz, ctx: &mut Ctx) -> Option<SceneRequest> {
    if let Some(index) = ctx.input.answer {
        match quiz.select_option(index) {
            Some(AnswerResult::Correct) => ctx.cue(Cue::QuizCorrect),
            Some(AnswerResult::Wrong) => ctx.cue(Cue::QuizWrong),
            None => {}
        }
    }
    match quiz.tick() {
        QuizStep::Finished => Some(SceneRequest::EndQuiz),
        QuizStep::Waiting | QuizStep::Advanced => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::quiz::Question;
    use crate::sim::scenes::test_support::Harness;
    use crate::sim::state::GameEvent;

    #[test]
    fn test_enter_centres_player() {
        let cabin = Cabin::enter(CabinKind::Mothership);
        assert_eq!(cabin.player_center(), Vec2::new(WORLD_WIDTH, WORLD_HEIGHT) / 2.0);
        assert!(!cabin.exit_available());
    }

    #[test]
    fn test_interact_near_computer_starts_quiz() {
        let mut h = Harness::new();
        let mut cabin = Cabin::enter(CabinKind::Mothership);
        assert!(cabin.near_computer());
        h.input.interact = true;
        assert_eq!(update(&mut cabin, &mut h.ctx()), Some(SceneRequest::StartQuiz));
    }

    #[test]
    fn test_interact_far_from_computer_does_nothing() {
        let mut h = Harness::new();
        let mut cabin = Cabin::enter(CabinKind::Mothership);
        cabin.player = Vec2::new(MARGIN, WORLD_HEIGHT - PLAYER_SIZE - MARGIN);
        h.input.interact = true;
        assert_eq!(update(&mut cabin, &mut h.ctx()), None);
    }

    #[test]
    fn test_exit_needs_confirmation() {
        let mut h = Harness::new();
        let mut cabin = Cabin::enter(CabinKind::Mothership);
        cabin.player.x = MARGIN;
        h.input.exit = true;
        assert_eq!(update(&mut cabin, &mut h.ctx()), None);
        assert!(cabin.confirm_exit);

        h.input = Default::default();
        h.input.cancel_exit = true;
        assert_eq!(update(&mut cabin, &mut h.ctx()), None);
        assert!(!cabin.confirm_exit);

        h.input = Default::default();
        h.input.exit = true;
        update(&mut cabin, &mut h.ctx());
        h.input = Default::default();
        h.input.confirm_exit = true;
        assert_eq!(update(&mut cabin, &mut h.ctx()), Some(SceneRequest::ExitToOutside));
    }

    #[test]
    fn test_confirm_without_dialog_is_ignored() {
        let mut h = Harness::new();
        let mut cabin = Cabin::enter(CabinKind::Mothership);
        h.input.confirm_exit = true;
        assert_eq!(update(&mut cabin, &mut h.ctx()), None);
    }

    #[test]
    fn test_rescue_cabin_has_no_controls() {
        let mut h = Harness::new();
        let mut cabin = Cabin::enter(CabinKind::RescueShip);
        cabin.player.x = MARGIN;
        h.input.exit = true;
        h.input.interact = true;
        assert_eq!(update(&mut cabin, &mut h.ctx()), None);
        assert!(cabin.computer().is_none());
    }

    #[test]
    fn test_quiz_answer_plays_cue_once() {
        let mut h = Harness::new();
        let mut quiz = Quiz::with_questions(vec![Question::new("A?", &["x", "y"], "x")], 2);
        h.input.answer = Some(0);
        update_quiz(&mut quiz, &mut h.ctx());
        update_quiz(&mut quiz, &mut h.ctx());
        let cues: Vec<_> = h
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::Cue(Cue::QuizCorrect)))
            .collect();
        assert_eq!(cues.len(), 1);
        assert_eq!(quiz.score, 1);
        h.input.answer = None;
        assert_eq!(update_quiz(&mut quiz, &mut h.ctx()), Some(SceneRequest::EndQuiz));
    }
}
