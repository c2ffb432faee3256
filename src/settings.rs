//! Game settings and preferences
//!
//! Loaded once at startup (JSON file on native, a `data-settings` attribute on
//! the canvas in the browser). Never written back.

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 60,
            QualityPreset::Medium => 250,
            QualityPreset::High => 1000,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Brick-hit sparks
    pub particles: bool,
    /// Reduced motion: clear the canvas fully each frame instead of leaving trails
    pub reduced_motion: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            reduced_motion: false,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.5,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.clamp_volumes();
        Ok(settings)
    }

    fn clamp_volumes(&mut self) {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Alpha of the per-frame clear; below 1.0 leaves motion trails
    pub fn clear_alpha(&self) -> f32 {
        if self.reduced_motion { 1.0 } else { 0.2 }
    }

    pub fn effective_sfx_volume(&self) -> f32 {
        self.master_volume * self.sfx_volume
    }

    pub fn effective_music_volume(&self) -> f32 {
        self.master_volume * self.music_volume
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particles_off_disables_cap() {
        let settings = Settings {
            particles: false,
            ..Settings::default()
        };
        assert_eq!(settings.max_particles(), 0);
        assert_eq!(Settings::from_preset(QualityPreset::Low).max_particles(), 60);
    }

    #[test]
    fn test_from_json_clamps_volume() {
        let json = r#"{ "master_volume": 3.0, "quality": "High" }"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.quality, QualityPreset::High);
        assert!(settings.particles);
    }

    #[test]
    fn test_reduced_motion_clears_fully() {
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        assert_eq!(settings.clear_alpha(), 1.0);
        assert!(Settings::default().clear_alpha() < 1.0);
    }
}
