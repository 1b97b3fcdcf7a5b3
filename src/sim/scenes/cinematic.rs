//! Cutscene: the shuttle crosses the screen toward the mothership
//!
//! No input is read. When the shuttle reaches its mark the orchestrator
//! starts zooming into the interior.

use glam::Vec2;

use super::Ctx;
use crate::consts::*;
use crate::sim::particles::emit_thrust;
use crate::sim::scene::SceneRequest;
use crate::sim::ship::Ship;

const START: Vec2 = Vec2::new(WORLD_WIDTH - 50.0, 50.0);
const TARGET: Vec2 = Vec2::new(50.0, WORLD_HEIGHT - 150.0);
const SPEED: f32 = 2.5;
/// Engine nozzles as fractions of the hull
const ENGINES: [Vec2; 3] = [
    Vec2::new(0.85, 0.35),
    Vec2::new(0.9, 0.55),
    Vec2::new(0.85, 0.75),
];
const PUFFS_PER_ENGINE: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct CinematicScene {
    pub ship: Ship,
}

impl Default for CinematicScene {
    fn default() -> Self {
        Self::new()
    }
}

impl CinematicScene {
    pub fn new() -> Self {
        Self {
            ship: Ship::approaching(START, TARGET, SPEED).without_beam(),
        }
    }

    /// Unit vector the shuttle is flying along
    pub fn heading(&self) -> Vec2 {
        (TARGET - START).normalize_or_zero()
    }
}

pub fn update(scene: &mut CinematicScene, ctx: &mut Ctx) -> Option<SceneRequest> {
    let arrived = scene.ship.tick();

    let bounds = scene.ship.bounds();
    for engine in ENGINES {
        let nozzle = bounds.pos + engine * bounds.size;
        emit_thrust(&mut ctx.pools.thrusters, ctx.rng, nozzle, -1.0, PUFFS_PER_ENGINE);
    }

    if arrived {
        log::info!("Cinematic shuttle reached its mark");
        return Some(SceneRequest::TransitionToInside);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::scenes::test_support::Harness;

    #[test]
    fn test_cinematic_reaches_target_once() {
        let mut h = Harness::new();
        let mut scene = CinematicScene::new();
        let mut requests = Vec::new();
        for _ in 0..1000 {
            if let Some(r) = update(&mut scene, &mut h.ctx()) {
                requests.push(r);
            }
        }
        assert_eq!(requests, vec![SceneRequest::TransitionToInside]);
        assert_eq!(scene.ship.pos, TARGET);
        assert!(!h.pools.thrusters.is_empty());
    }

    #[test]
    fn test_heading_points_down_left() {
        let heading = CinematicScene::new().heading();
        assert!(heading.x < 0.0 && heading.y > 0.0);
    }
}
