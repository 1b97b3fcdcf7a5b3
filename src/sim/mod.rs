//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only, one call per throttled frame
//! - Seeded RNG only
//! - Scene switches happen in the orchestrator, never in a handler
//! - No rendering or platform dependencies

pub mod capture;
pub mod celebration;
pub mod collision;
pub mod particles;
pub mod quiz;
pub mod scene;
pub mod scenes;
pub mod ship;
pub mod state;
pub mod survival;
pub mod tick;
pub mod transition;

pub use capture::{Beam, Boarding, Capture, CaptureStep};
pub use celebration::{Celebration, CelebrationKind};
pub use collision::{Rect, within_radius};
pub use quiz::{Question, Quiz, QuizRecord};
pub use scene::{Scene, SceneKind, SceneRequest};
pub use state::{Cue, Facing, GameEvent, Music, Player, World};
pub use tick::{TickInput, tick};
pub use transition::{SceneFade, Transition, TransitionStep, Transitions};
