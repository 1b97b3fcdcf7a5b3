//! Progress-bearing transition records
//!
//! A transition advances by a fixed step per tick while active. Progress is
//! clamped to 1.0 and the record deactivates on the tick it gets there; the
//! caller is told exactly once so it can commit whatever the transition
//! was hiding.

use serde::{Deserialize, Serialize};

use super::scene::SceneKind;

/// Result of advancing a transition by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionStep {
    /// Not running
    Idle,
    /// Still running
    Running,
    /// Reached 1.0 this tick and deactivated
    Completed,
}

/// A timed visual handoff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub active: bool,
    /// 0..=1
    pub progress: f32,
    /// Progress added per tick
    pub speed: f32,
}

impl Transition {
    pub fn new(speed: f32) -> Self {
        Self {
            active: false,
            progress: 0.0,
            speed,
        }
    }

    /// Start from zero. Refused while already running.
    pub fn start(&mut self) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        self.progress = 0.0;
        true
    }

    pub fn advance(&mut self) -> TransitionStep {
        if !self.active {
            return TransitionStep::Idle;
        }
        self.progress = (self.progress + self.speed).min(1.0);
        if self.progress >= 1.0 {
            self.progress = 1.0;
            self.active = false;
            TransitionStep::Completed
        } else {
            TransitionStep::Running
        }
    }
}

/// Cross fade between two scenes (main and flying)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneFade {
    pub transition: Transition,
    pub from: SceneKind,
    pub to: SceneKind,
}

impl SceneFade {
    pub fn new(speed: f32) -> Self {
        Self {
            transition: Transition::new(speed),
            from: SceneKind::Main,
            to: SceneKind::Main,
        }
    }

    /// Begin fading `from` -> `to`; ignored if a fade is already running
    pub fn start(&mut self, from: SceneKind, to: SceneKind) -> bool {
        if !self.transition.start() {
            log::debug!("Scene fade {:?} -> {:?} ignored, fade already running", from, to);
            return false;
        }
        self.from = from;
        self.to = to;
        true
    }

    pub fn is_active(&self) -> bool {
        self.transition.active
    }

    /// Opacity of the black veil drawn over the scene (0 -> 1 -> 0)
    pub fn veil_alpha(&self) -> f32 {
        if !self.transition.active {
            return 0.0;
        }
        let p = self.transition.progress;
        if p < 0.5 { p * 2.0 } else { (1.0 - p) * 2.0 }
    }
}

/// All transition records driven by the orchestrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transitions {
    pub fade: SceneFade,
    pub to_inside: Transition,
    pub rescue_boarding: Transition,
}

impl Transitions {
    pub fn new(fade_speed: f32, to_inside_speed: f32, rescue_boarding_speed: f32) -> Self {
        Self {
            fade: SceneFade::new(fade_speed),
            to_inside: Transition::new(to_inside_speed),
            rescue_boarding: Transition::new(rescue_boarding_speed),
        }
    }

    /// Transitions that suspend the active scene's handler
    pub fn blocking(&self) -> bool {
        self.fade.is_active() || self.to_inside.active
    }
}

/// Visual parameters of the rescue boarding sequence at a given progress
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardingLook {
    /// Scale of the rescue cabin background zooming in
    pub background_scale: f32,
    pub background_opacity: f32,
    pub beam_intensity: f32,
    pub player_scale: f32,
    pub player_opacity: f32,
}

/// Two phases: the cabin grows in behind the beam, then the player shrinks away
pub fn boarding_look(progress: f32) -> BoardingLook {
    let progress = progress.clamp(0.0, 1.0);
    if progress < 0.5 {
        let phase = progress / 0.5;
        BoardingLook {
            background_scale: 0.1 + phase * 0.9,
            background_opacity: phase,
            beam_intensity: phase,
            player_scale: 1.0,
            player_opacity: 1.0,
        }
    } else {
        let phase = (progress - 0.5) / 0.5;
        BoardingLook {
            background_scale: 1.0,
            background_opacity: 1.0,
            beam_intensity: 1.0,
            player_scale: 1.0 - phase * 0.5,
            player_opacity: 1.0 - phase,
        }
    }
}
