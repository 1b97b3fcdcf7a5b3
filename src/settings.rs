//! Game settings and preferences
//!
//! Kept in memory for the session only; a reload starts from defaults.

use serde::{Deserialize, Serialize};

use crate::consts::{LOW_POWER_FPS, TARGET_FPS};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    /// Tablets and other low-end devices: half frame rate, thinner effects
    LowPower,
    #[default]
    Standard,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::LowPower => "LowPower",
            QualityPreset::Standard => "Standard",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" | "lowpower" | "low-power" => Some(QualityPreset::LowPower),
            "standard" | "default" => Some(QualityPreset::Standard),
            _ => None,
        }
    }

    /// Pick a preset from a browser user agent string
    pub fn detect(user_agent: &str, touch_points: u32) -> Self {
        let ua = user_agent.to_lowercase();
        // iPadOS reports a desktop Safari UA, so touch support gives it away
        let ipad = ua.contains("ipad") || (ua.contains("macintosh") && touch_points > 1);
        let android_tablet = ua.contains("android") && !ua.contains("mobile");
        if ipad || android_tablet {
            QualityPreset::LowPower
        } else {
            QualityPreset::Standard
        }
    }

    /// Update/draw rate of the throttled loop
    pub fn target_fps(&self) -> f64 {
        match self {
            QualityPreset::LowPower => LOW_POWER_FPS,
            QualityPreset::Standard => TARGET_FPS,
        }
    }

    /// Cap for each ambient particle pool (thrusters, flames)
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::LowPower => 150,
            QualityPreset::Standard => 400,
        }
    }

    /// Cap for the burning-hull fire pool
    pub fn max_fire_particles(&self) -> usize {
        match self {
            QualityPreset::LowPower => 15,
            QualityPreset::Standard => 30,
        }
    }

    /// Multiplier on fire intensity when rolling for a new fire particle
    pub fn fire_spawn_factor(&self) -> f32 {
        match self {
            QualityPreset::LowPower => 0.3,
            QualityPreset::Standard => 0.5,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Standard,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.5,
            muted: false,
            show_fps: false,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Frame budget in milliseconds for the throttled loop
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / self.quality.target_fps()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_ipad_desktop_ua() {
        let ua = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15";
        assert_eq!(QualityPreset::detect(ua, 5), QualityPreset::LowPower);
        assert_eq!(QualityPreset::detect(ua, 0), QualityPreset::Standard);
    }

    #[test]
    fn test_low_power_halves_frame_rate() {
        let settings = Settings::from_preset(QualityPreset::LowPower);
        assert!((settings.frame_interval_ms() - 1000.0 / 30.0).abs() < 1e-9);
        assert_eq!(QualityPreset::LowPower.max_fire_particles(), 15);
    }

    #[test]
    fn test_parse_round_trips_names() {
        for preset in [QualityPreset::LowPower, QualityPreset::Standard] {
            assert_eq!(QualityPreset::parse(preset.as_str()), Some(preset));
        }
    }
}
