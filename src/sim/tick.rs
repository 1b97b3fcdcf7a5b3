//! Per-tick scene orchestration
//!
//! `tick` is called once per throttled frame. It advances the transition
//! records, ages the effect pools, and unless a fade or the zoom into the
//! ship is playing, hands control to exactly one scene handler. Scene
//! handlers only ask for changes; every scene switch happens here.

use glam::Vec2;
use rand::Rng;

use super::celebration::{Celebration, CelebrationKind};
use super::quiz::Quiz;
use super::scene::{Scene, SceneKind, SceneRequest};
use super::scenes::cabin::{Cabin, CabinKind};
use super::scenes::cinematic::CinematicScene;
use super::scenes::flying::{self, FlyingScene};
use super::scenes::outside::OutsideScene;
use super::scenes::{self, Ctx};
use super::state::{Cue, GameEvent, Music, World};
use super::transition::TransitionStep;

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Normalised movement intent (-1..1 per axis, length <= 1)
    pub movement: Vec2,
    /// Switch between the opening area and free flight
    pub toggle_flying: bool,
    /// Switch the flight ship's beam
    pub toggle_beam: bool,
    /// Use whatever is nearby (computer, gate, ship)
    pub interact: bool,
    /// Open the airlock dialog
    pub exit: bool,
    pub confirm_exit: bool,
    pub cancel_exit: bool,
    /// Quiz option picked by index
    pub answer: Option<usize>,
    /// Start over from a terminal screen
    pub restart: bool,
}

/// Advance the world by one tick
pub fn tick(world: &mut World, input: &TickInput) {
    if input.restart && world.is_terminal() {
        let seed = world.rng.random();
        world.restart(seed);
        return;
    }

    // Frozen until restart
    if world.game_over {
        return;
    }

    world.time_ticks += 1;

    let blocking = world.transitions.blocking();
    advance_transitions(world);

    world.pools.tick();
    world.celebrations.retain_mut(|c| c.tick());

    if blocking {
        return;
    }

    if let Some(request) = dispatch(world, input) {
        apply(world, request);
    }
}

/// Step every transition record and commit the ones that finished
fn advance_transitions(world: &mut World) {
    if world.transitions.fade.transition.advance() == TransitionStep::Completed {
        let to = world.transitions.fade.to;
        commit_fade(world, to);
    }

    if world.transitions.to_inside.advance() == TransitionStep::Completed {
        world.player.place(world.player.pos);
        switch_scene(world, Scene::InsideShip(Cabin::enter(CabinKind::Mothership)));
    }

    if world.transitions.rescue_boarding.advance() == TransitionStep::Completed {
        world.rescued = true;
        world.player.place(world.player.pos);
        switch_scene(world, Scene::InsideRescueShip(Cabin::enter(CabinKind::RescueShip)));
        world.emit(GameEvent::Music(Music::Celebration));
    }
}

/// Run the active scene's handler
fn dispatch(world: &mut World, input: &TickInput) -> Option<SceneRequest> {
    let World {
        scene,
        player,
        pools,
        rng,
        celebrations,
        events,
        game_over,
        tuning,
        quality,
        transitions,
        ..
    } = world;

    let mut ctx = Ctx {
        input,
        player,
        pools,
        rng,
        celebrations,
        events,
        game_over,
        tuning,
        quality: *quality,
        boarding: transitions.rescue_boarding.active,
    };

    match scene {
        Scene::Main(main) => scenes::main_area::update(main, &mut ctx),
        Scene::Flying { flying, .. } => scenes::flying::update(flying, &mut ctx),
        Scene::Cinematic(cinematic) => scenes::cinematic::update(cinematic, &mut ctx),
        Scene::TransitionToInside => None,
        Scene::InsideShip(cabin) | Scene::InsideRescueShip(cabin) => {
            scenes::cabin::update(cabin, &mut ctx)
        }
        Scene::QuizActive { quiz, .. } => scenes::cabin::update_quiz(quiz, &mut ctx),
        Scene::OutsideShip(outside) => scenes::outside::update(outside, &mut ctx),
    }
}

/// Carry out a scene handler's request
fn apply(world: &mut World, request: SceneRequest) {
    match request {
        SceneRequest::Fade(to) => {
            let from = world.scene_kind();
            if world.transitions.fade.start(from, to) {
                log::info!("Fading {} -> {}", from.as_str(), to.as_str());
                if to == SceneKind::Flying {
                    world.emit(GameEvent::Cue(Cue::ShipFlying));
                }
            }
        }
        SceneRequest::Cinematic => {
            world.player.place(world.player.pos);
            switch_scene(world, Scene::Cinematic(CinematicScene::new()));
            world.emit(GameEvent::Cue(Cue::ShipEngine));
        }
        SceneRequest::TransitionToInside => {
            if world.transitions.to_inside.start() {
                world.player.place(world.player.pos);
                switch_scene(world, Scene::TransitionToInside);
            } else {
                log::debug!("Transition to inside already running");
            }
        }
        SceneRequest::BoardShip => {
            world.player.place(world.player.pos);
            switch_scene(world, Scene::InsideShip(Cabin::enter(CabinKind::Mothership)));
            world.emit(GameEvent::Music(Music::Ambient));
        }
        SceneRequest::StartQuiz => {
            let quiz = Quiz::start(
                &world.question_bank,
                world.tuning.quiz_size,
                world.tuning.quiz_answer_delay_ticks,
                &mut world.rng,
            );
            if quiz.questions.is_empty() {
                log::warn!("No quiz questions available, staying in the cabin");
                return;
            }
            match std::mem::take(&mut world.scene) {
                Scene::InsideShip(cabin) => {
                    switch_scene(world, Scene::QuizActive { cabin, quiz });
                }
                other => world.scene = other,
            }
        }
        SceneRequest::EndQuiz => match std::mem::take(&mut world.scene) {
            Scene::QuizActive { cabin, mut quiz } => {
                let outcome = quiz.end();
                world.quiz_record.record(outcome);
                if outcome.won {
                    let celebration = Celebration::new(CelebrationKind::QuizPerfect, &mut world.rng);
                    world.celebrations.push(celebration);
                    world.emit(GameEvent::Cue(Cue::Confetti));
                }
                switch_scene(world, Scene::InsideShip(cabin));
            }
            other => world.scene = other,
        },
        SceneRequest::ExitToOutside => {
            world.player.place(OutsideScene::entry_position());
            switch_scene(world, Scene::OutsideShip(OutsideScene::new()));
            world.emit(GameEvent::Music(Music::Survival));
        }
        SceneRequest::RescueBoarding => {
            if !world.transitions.rescue_boarding.start() {
                log::debug!("Rescue boarding already running");
                return;
            }
            log::info!("Rescue boarding started");
            let celebration = Celebration::new(CelebrationKind::Rescued, &mut world.rng);
            world.celebrations.push(celebration);
            world.emit(GameEvent::Cue(Cue::Victory));
            world.emit(GameEvent::Cue(Cue::Fireworks));
        }
    }
}

/// Finish a main/flying cross fade
fn commit_fade(world: &mut World, to: SceneKind) {
    let next = match (std::mem::take(&mut world.scene), to) {
        (Scene::Main(main), SceneKind::Flying) => {
            world.player.place(flying::entry_position());
            Scene::Flying {
                flying: FlyingScene::new(),
                main: Box::new(main),
            }
        }
        (Scene::Flying { main, .. }, SceneKind::Main) => {
            world.player.clamp_to_world();
            Scene::Main(*main)
        }
        (current, to) => {
            log::warn!("No fade from {} to {}", current.kind().as_str(), to.as_str());
            world.scene = current;
            return;
        }
    };
    switch_scene(world, next);
}

/// Replace the active scene, dropping leftover particles
fn switch_scene(world: &mut World, next: Scene) {
    let from = world.scene_kind();
    let to = next.kind();
    world.scene = next;
    if from != to {
        world.pools.clear();
        log::info!("Scene {} -> {}", from.as_str(), to.as_str());
        world.emit(GameEvent::SceneChanged { from, to });
    }
}
