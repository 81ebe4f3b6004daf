//! Asset loading
//!
//! Startup needs one font and two sounds. A missing font is fatal. A missing
//! sound is logged and that effect stays silent for the session.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::audio::SoundEffect;
use crate::consts::{ASSETS_DIR, FONT_FILE};

/// Which asset is being loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Font,
    Sound(SoundEffect),
}

/// Why a single read or decode failed
#[derive(Debug, Error)]
pub enum LoadFailure {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("file is empty")]
    Empty,
    #[error("no document to register the font with")]
    NoDocument,
    /// Rejection from a browser API
    #[error("{0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for LoadFailure {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        LoadFailure::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

/// An asset could not be read or decoded
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to load font '{path}': {source}")]
    Font {
        path: String,
        #[source]
        source: LoadFailure,
    },
    #[error("failed to load sound {effect:?} '{path}': {source}")]
    Sound {
        effect: SoundEffect,
        path: String,
        #[source]
        source: LoadFailure,
    },
}

impl AssetError {
    pub fn new(kind: AssetKind, path: impl Into<String>, source: impl Into<LoadFailure>) -> Self {
        let path = path.into();
        let source = source.into();
        match kind {
            AssetKind::Font => AssetError::Font { path, source },
            AssetKind::Sound(effect) => AssetError::Sound {
                effect,
                path,
                source,
            },
        }
    }

    pub fn kind(&self) -> AssetKind {
        match self {
            AssetError::Font { .. } => AssetKind::Font,
            AssetError::Sound { effect, .. } => AssetKind::Sound(*effect),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            AssetError::Font { path, .. } | AssetError::Sound { path, .. } => path,
        }
    }
}

/// Where the assets live, relative to the working directory or page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetManifest {
    pub dir: PathBuf,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self::new(ASSETS_DIR)
    }
}

impl AssetManifest {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn join(&self, file: &str) -> String {
        // Forward slashes so the same string works as a URL
        let dir = self.dir.to_string_lossy();
        let dir = dir.trim_end_matches(['/', '\\']);
        if dir.is_empty() {
            file.to_string()
        } else {
            format!("{dir}/{file}")
        }
    }

    pub fn font_path(&self) -> String {
        self.join(FONT_FILE)
    }

    pub fn sound_path(&self, effect: SoundEffect) -> String {
        self.join(effect.file_name())
    }
}

/// Raw asset bytes for the native build
#[derive(Debug, Clone)]
pub struct AssetBundle {
    pub font: Vec<u8>,
    pub paddle_sound: Option<Vec<u8>>,
    pub wall_sound: Option<Vec<u8>>,
}

impl AssetBundle {
    /// Read every asset from disk.
    ///
    /// Fails only when the font is unusable.
    pub fn load(manifest: &AssetManifest) -> Result<Self, AssetError> {
        let font = read_asset(AssetKind::Font, &manifest.font_path())?;
        log::info!("Loaded font {} ({} bytes)", manifest.font_path(), font.len());

        let load_sound = |effect: SoundEffect| {
            let path = manifest.sound_path(effect);
            match read_asset(AssetKind::Sound(effect), &path) {
                Ok(bytes) => {
                    log::debug!("Loaded {path} ({} bytes)", bytes.len());
                    Some(bytes)
                }
                Err(e) => {
                    log::error!("{e}");
                    None
                }
            }
        };

        Ok(Self {
            font,
            paddle_sound: load_sound(SoundEffect::PaddleHit),
            wall_sound: load_sound(SoundEffect::WallHit),
        })
    }

    pub fn sound(&self, effect: SoundEffect) -> Option<&[u8]> {
        match effect {
            SoundEffect::PaddleHit => self.paddle_sound.as_deref(),
            SoundEffect::WallHit => self.wall_sound.as_deref(),
        }
    }
}

fn read_asset(kind: AssetKind, path: &str) -> Result<Vec<u8>, AssetError> {
    let bytes = std::fs::read(Path::new(path)).map_err(|e| AssetError::new(kind, path, e))?;
    if bytes.is_empty() {
        return Err(AssetError::new(kind, path, LoadFailure::Empty));
    }
    Ok(bytes)
}

/// Fetch a file relative to the page
#[cfg(target_arch = "wasm32")]
pub async fn fetch_bytes(url: &str) -> Result<js_sys::ArrayBuffer, wasm_bindgen::JsValue> {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let response: web_sys::Response = JsFuture::from(window.fetch_with_str(url))
        .await?
        .dyn_into()?;
    if !response.ok() {
        return Err(JsValue::from_str(&format!("HTTP {}", response.status())));
    }
    JsFuture::from(response.array_buffer()?).await?.dyn_into()
}

/// Register the game font with the document and wait for it to load
#[cfg(target_arch = "wasm32")]
pub async fn load_font(manifest: &AssetManifest) -> Result<(), AssetError> {
    use wasm_bindgen_futures::JsFuture;

    use crate::consts::FONT_FAMILY;

    let path = manifest.font_path();
    let err = |e: wasm_bindgen::JsValue| AssetError::new(AssetKind::Font, &path, e);

    let face = web_sys::FontFace::new_with_str(FONT_FAMILY, &format!("url({path})")).map_err(err)?;
    JsFuture::from(face.load().map_err(err)?).await.map_err(err)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| AssetError::new(AssetKind::Font, &path, LoadFailure::NoDocument))?;
    document.fonts().add(&face).map_err(err)?;

    log::info!("Loaded font {path}");
    Ok(())
}
