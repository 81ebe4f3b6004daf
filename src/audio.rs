//! Audio system
//!
//! The simulation never touches audio. It reports `GameEvent`s, and the
//! frontend turns the bounce events into sound cues played from the WAV
//! files in the asset directory.

use serde::{Deserialize, Serialize};

use crate::consts::{PADDLE_SOUND_FILE, WALL_SOUND_FILE};
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Ball hits paddle
    PaddleHit,
    /// Ball hits wall
    WallHit,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 2] = [SoundEffect::PaddleHit, SoundEffect::WallHit];

    /// Cue for a simulation event, if it has one
    pub fn from_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::PaddleHit => Some(SoundEffect::PaddleHit),
            GameEvent::WallHit => Some(SoundEffect::WallHit),
            _ => None,
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            SoundEffect::PaddleHit => PADDLE_SOUND_FILE,
            SoundEffect::WallHit => WALL_SOUND_FILE,
        }
    }
}

/// Cues for one frame's events, in emission order
pub fn cues(events: &[GameEvent]) -> impl Iterator<Item = SoundEffect> + '_ {
    events.iter().filter_map(SoundEffect::from_event)
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::collections::HashMap;

    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{AudioBuffer, AudioContext, AudioContextState};

    use super::SoundEffect;
    use crate::Settings;
    use crate::assets::{AssetError, AssetKind, AssetManifest, fetch_bytes};

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        buffers: HashMap<SoundEffect, AudioBuffer>,
        settings: Settings,
    }

    impl AudioManager {
        /// Create the audio context and decode every effect.
        ///
        /// A sound that fails to load is logged and stays silent.
        pub async fn load(manifest: &AssetManifest, settings: Settings) -> Self {
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }

            let mut buffers = HashMap::new();
            if let Some(ctx) = &ctx {
                for effect in SoundEffect::ALL {
                    match decode(ctx, manifest, effect).await {
                        Ok(buffer) => {
                            buffers.insert(effect, buffer);
                        }
                        Err(e) => log::error!("{e}"),
                    }
                }
            }

            Self {
                ctx,
                buffers,
                settings,
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.settings.effective_volume(effect);
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };
            let Some(buffer) = self.buffers.get(&effect) else {
                return;
            };

            if ctx.state() == AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let Ok(source) = ctx.create_buffer_source() else {
                return;
            };
            let Ok(gain) = ctx.create_gain() else { return };
            source.set_buffer(Some(buffer));
            gain.gain().set_value(vol);
            if source.connect_with_audio_node(&gain).is_err()
                || gain.connect_with_audio_node(&ctx.destination()).is_err()
            {
                return;
            }
            source.start().ok();
        }
    }

    async fn decode(
        ctx: &AudioContext,
        manifest: &AssetManifest,
        effect: SoundEffect,
    ) -> Result<AudioBuffer, AssetError> {
        let url = manifest.sound_path(effect);
        let err = |e: wasm_bindgen::JsValue| AssetError::new(AssetKind::Sound(effect), &url, e);

        let bytes = fetch_bytes(&url).await.map_err(err)?;
        let promise = ctx.decode_audio_data(&bytes).map_err(err)?;
        let decoded = JsFuture::from(promise).await.map_err(err)?;
        decoded.dyn_into::<AudioBuffer>().map_err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Side;

    #[test]
    fn test_only_bounces_have_cues() {
        assert_eq!(
            SoundEffect::from_event(&GameEvent::PaddleHit),
            Some(SoundEffect::PaddleHit)
        );
        assert_eq!(
            SoundEffect::from_event(&GameEvent::WallHit),
            Some(SoundEffect::WallHit)
        );
        assert_eq!(SoundEffect::from_event(&GameEvent::Scored(Side::Left)), None);
        assert_eq!(SoundEffect::from_event(&GameEvent::MatchWon(Side::Right)), None);
        assert_eq!(SoundEffect::from_event(&GameEvent::PauseToggled(true)), None);
        assert_eq!(SoundEffect::from_event(&GameEvent::Replay), None);
    }

    #[test]
    fn test_cues_keep_event_order() {
        let events = [
            GameEvent::WallHit,
            GameEvent::Scored(Side::Right),
            GameEvent::PaddleHit,
        ];
        let played: Vec<_> = cues(&events).collect();
        assert_eq!(played, vec![SoundEffect::WallHit, SoundEffect::PaddleHit]);
    }

    #[test]
    fn test_file_names() {
        assert_eq!(SoundEffect::PaddleHit.file_name(), "PaddleSound.wav");
        assert_eq!(SoundEffect::WallHit.file_name(), "WallSound.wav");
    }
}
