//! Game settings and preferences

use serde::{Deserialize, Serialize};

use crate::audio::SoundEffect;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Paddle hit volume (0.0 - 1.0)
    pub paddle_volume: f32,
    /// Wall bounce volume (0.0 - 1.0)
    pub wall_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            // Both effects play at 10%
            paddle_volume: 0.1,
            wall_volume: 0.1,
            muted: false,
        }
    }
}

impl Settings {
    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Final gain for one effect, zero when muted
    pub fn effective_volume(&self, effect: SoundEffect) -> f32 {
        if self.muted {
            return 0.0;
        }
        let sfx = match effect {
            SoundEffect::PaddleHit => self.paddle_volume,
            SoundEffect::WallHit => self.wall_volume,
        };
        (self.master_volume * sfx).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_volumes() {
        let settings = Settings::default();
        assert_eq!(settings.effective_volume(SoundEffect::PaddleHit), 0.1);
        assert_eq!(settings.effective_volume(SoundEffect::WallHit), 0.1);
    }

    #[test]
    fn test_mute_silences_everything() {
        let settings = Settings {
            muted: true,
            ..Settings::default()
        };
        assert_eq!(settings.effective_volume(SoundEffect::PaddleHit), 0.0);
        assert_eq!(settings.effective_volume(SoundEffect::WallHit), 0.0);
    }

    #[test]
    fn test_master_volume_is_clamped() {
        let mut settings = Settings::default();
        settings.set_master_volume(3.0);
        assert_eq!(settings.master_volume, 1.0);
        settings.set_master_volume(0.5);
        assert_eq!(settings.effective_volume(SoundEffect::WallHit), 0.05);
    }
}
