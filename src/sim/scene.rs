//! Scene tags and per-scene state
//!
//! Exactly one scene is active. Each variant carries only the state that
//! scene needs, so nothing can go stale behind an inactive scene. A scene
//! that pauses another (the quiz over the cabin, flying over the opening
//! area) owns the paused one until it hands it back.

use serde::{Deserialize, Serialize};

use super::quiz::Quiz;
use super::scenes::cabin::Cabin;
use super::scenes::cinematic::CinematicScene;
use super::scenes::flying::FlyingScene;
use super::scenes::main_area::MainScene;
use super::scenes::outside::OutsideScene;

/// Plain scene tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    Main,
    Flying,
    Cinematic,
    TransitionToInside,
    InsideShip,
    QuizActive,
    OutsideShip,
    InsideRescueShip,
}

impl SceneKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SceneKind::Main => "main",
            SceneKind::Flying => "flying",
            SceneKind::Cinematic => "cinematic",
            SceneKind::TransitionToInside => "transition_to_inside",
            SceneKind::InsideShip => "inside_ship",
            SceneKind::QuizActive => "quiz_active",
            SceneKind::OutsideShip => "outside_ship",
            SceneKind::InsideRescueShip => "inside_rescue_ship",
        }
    }
}

/// The active scene and its state
#[derive(Debug, Clone)]
pub enum Scene {
    /// Opening area with the docking ship
    Main(MainScene),
    /// Free flight; the opening area waits underneath
    Flying {
        flying: FlyingScene,
        main: Box<MainScene>,
    },
    Cinematic(CinematicScene),
    /// Zooming into the ship; driven entirely by its transition record
    TransitionToInside,
    InsideShip(Cabin),
    QuizActive { cabin: Cabin, quiz: Quiz },
    OutsideShip(OutsideScene),
    InsideRescueShip(Cabin),
}

impl Default for Scene {
    fn default() -> Self {
        Scene::Main(MainScene::new())
    }
}

impl Scene {
    pub fn kind(&self) -> SceneKind {
        match self {
            Scene::Main(_) => SceneKind::Main,
            Scene::Flying { .. } => SceneKind::Flying,
            Scene::Cinematic(_) => SceneKind::Cinematic,
            Scene::TransitionToInside => SceneKind::TransitionToInside,
            Scene::InsideShip(_) => SceneKind::InsideShip,
            Scene::QuizActive { .. } => SceneKind::QuizActive,
            Scene::OutsideShip(_) => SceneKind::OutsideShip,
            Scene::InsideRescueShip(_) => SceneKind::InsideRescueShip,
        }
    }
}

/// A scene handler asking the orchestrator to move on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneRequest {
    /// Cross fade to another scene (main and flying only)
    Fade(SceneKind),
    /// The docking ship has left with the player aboard
    Cinematic,
    /// Start zooming into the ship interior
    TransitionToInside,
    /// Cut straight into the ship interior
    BoardShip,
    StartQuiz,
    EndQuiz,
    /// Confirmed exit through the airlock; immediate, no fade
    ExitToOutside,
    /// Rescue beam finished pulling the player in
    RescueBoarding,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_match_serde() {
        for kind in [
            SceneKind::Main,
            SceneKind::TransitionToInside,
            SceneKind::InsideRescueShip,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn test_default_scene_is_main() {
        assert_eq!(Scene::default().kind(), SceneKind::Main);
    }
}
