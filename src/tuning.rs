//! Data-driven game balance
//!
//! Every value is a per-tick quantity: motion is counted in fixed steps, not
//! scaled by wall-clock time. Defaults reproduce the shipped game; a JSON
//! document may override any subset of fields.

use serde::{Deserialize, Serialize};

/// Gameplay tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Player movement speed outside (units per tick)
    pub player_speed: f32,
    /// Player movement speed inside a cabin
    pub cabin_speed: f32,

    /// Progress step of the main/flying cross fade
    pub scene_fade_speed: f32,
    /// Progress step of the zoom into the ship interior
    pub to_inside_speed: f32,
    /// Length of the rescue boarding sequence in ticks
    pub rescue_boarding_ticks: u32,

    /// Alpha lost per tick while captured by a beam
    pub capture_alpha_decay: f32,
    /// Alpha at or below which a capture resolves
    pub capture_resolve_alpha: f32,
    pub main_beam_radius: f32,
    pub arrival_beam_radius: f32,
    pub rescue_beam_radius: f32,
    pub flying_beam_radius: f32,
    /// Survival ticks before the arrival ship accepts boarders
    pub arrival_boarding_grace: u32,

    /// Obstacle spawn period in the opening scene
    pub obstacle_spawn_interval: u32,
    /// Length of the survival countdown
    pub max_survival_ticks: u32,
    /// Hazard spawn period at difficulty 1.0
    pub hazard_base_spawn_rate: f32,
    /// Hazard spawn period floor
    pub hazard_min_spawn_interval: u32,
    /// Fire intensity that summons the rescue ship
    pub rescue_intensity_threshold: f32,
    /// How long in-world banners stay up
    pub message_ticks: u32,

    /// Questions drawn per quiz run
    pub quiz_size: usize,
    /// Pause between an answer and the next question
    pub quiz_answer_delay_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: 3.0,
            cabin_speed: 3.0,

            scene_fade_speed: 0.12,
            to_inside_speed: 0.08,
            rescue_boarding_ticks: 180,

            capture_alpha_decay: 0.04,
            capture_resolve_alpha: 0.02,
            main_beam_radius: 50.0,
            arrival_beam_radius: 60.0,
            rescue_beam_radius: 80.0,
            flying_beam_radius: 50.0,
            arrival_boarding_grace: 120,

            obstacle_spawn_interval: 120,
            max_survival_ticks: 3600,
            hazard_base_spawn_rate: 150.0,
            hazard_min_spawn_interval: 80,
            rescue_intensity_threshold: 0.8,
            message_ticks: 180,

            quiz_size: 5,
            // 200 ms at 60 Hz
            quiz_answer_delay_ticks: 12,
        }
    }
}

impl Tuning {
    /// Parse a tuning document; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Progress step that completes the rescue boarding in `rescue_boarding_ticks`
    pub fn rescue_boarding_speed(&self) -> f32 {
        1.0 / self.rescue_boarding_ticks.max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "max_survival_ticks": 1200, "quiz_size": 3 }"#)
            .expect("valid tuning");
        assert_eq!(tuning.max_survival_ticks, 1200);
        assert_eq!(tuning.quiz_size, 3);
        assert_eq!(tuning.player_speed, Tuning::default().player_speed);
    }

    #[test]
    fn test_malformed_tuning_is_an_error() {
        assert!(Tuning::from_json("{ \"quiz_size\": \"five\" }").is_err());
    }

    #[test]
    fn test_rescue_boarding_speed() {
        let tuning = Tuning::default();
        assert!((tuning.rescue_boarding_speed() * 180.0 - 1.0).abs() < 1e-6);
    }
}
