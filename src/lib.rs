//! Duel Pong - classic two-player Pong
//!
//! Core modules:
//! - `sim`: Deterministic frame-stepped simulation (input, entities, collisions, match state)
//! - `renderer`: Scene snapshot for drawing, plus the Canvas 2D backend on the web
//! - `audio`: Sound cues derived from simulation events
//! - `assets`: Font and sound loading with the startup failure policy
//! - `settings`: Presentation preferences (volumes)

pub mod assets;
pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
///
/// The ruleset is fixed: nothing here is read at runtime.
pub mod consts {
    use crate::sim::{Color, Side};

    /// Simulation frames per second; all speeds are in pixels per frame
    pub const FRAME_RATE: u32 = 60;
    /// Duration of one simulation frame in seconds
    pub const FRAME_DT: f32 = 1.0 / FRAME_RATE as f32;
    /// Maximum frames simulated per animation frame before dropping time
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Playfield dimensions
    pub const WINDOW_WIDTH: f32 = 800.0;
    pub const WINDOW_HEIGHT: f32 = 600.0;
    pub const GAME_NAME: &str = "Pong";

    /// Paddles (both sides share the same geometry and speed)
    pub const PADDLE_WIDTH: f32 = 16.0;
    pub const PADDLE_HEIGHT: f32 = 80.0;
    pub const PADDLE_SPEED: f32 = 7.0;
    /// Gap between a paddle's outer edge and its side of the playfield
    pub const PADDLE_MARGIN: f32 = 32.0;
    pub const PADDLE_LEFT_X: f32 = PADDLE_MARGIN;
    pub const PADDLE_RIGHT_X: f32 = WINDOW_WIDTH - PADDLE_MARGIN - PADDLE_WIDTH;
    pub const PADDLE_START_Y: f32 = WINDOW_HEIGHT / 2.0 - PADDLE_HEIGHT / 2.0;
    pub const PADDLE_MIN_Y: f32 = 0.0;
    pub const PADDLE_MAX_Y: f32 = WINDOW_HEIGHT - PADDLE_HEIGHT;

    /// Ball
    pub const BALL_RADIUS: f32 = 12.0;
    /// Serve position of the ball's top-left corner, snapped to whole pixels
    pub const BALL_START_X: f32 = (WINDOW_WIDTH / 2.0 - BALL_RADIUS / 2.0) as u32 as f32;
    pub const BALL_START_Y: f32 = (WINDOW_HEIGHT / 2.0 - BALL_RADIUS) as u32 as f32;
    pub const BALL_BASE_SPEED: f32 = 7.0;
    /// Added to the ball speed on every paddle hit within a rally
    pub const BALL_SPEED_INCREMENT: f32 = 0.15;
    /// Vertical direction component after a paddle hit
    pub const BALL_DEFLECTION: f32 = 0.5;

    /// Match rules
    pub const MAX_SCORE: u32 = 10;
    pub const DEFAULT_SERVER: Side = Side::Right;
    /// Board freeze after a point (1.5 s)
    pub const SCORE_PAUSE_FRAMES: u32 = FRAME_RATE * 3 / 2;

    /// Colors
    pub const LEFT_COLOR: Color = Color::BLUE;
    pub const RIGHT_COLOR: Color = Color::RED;
    pub const BALL_COLOR: Color = Color::WHITE;
    pub const TEXT_COLOR: Color = Color::WHITE;

    /// HUD text
    pub const FONT_SIZE_SCORE: u32 = 30;
    pub const FONT_SIZE_WINNER: u32 = 54;
    pub const FONT_SIZE_REPLAY: u32 = 32;
    pub const FONT_SIZE_PAUSE: u32 = 24;
    pub const WINNER_LEFT_TEXT: &str = "The Blue player win";
    pub const WINNER_RIGHT_TEXT: &str = "The Red player win";
    pub const REPLAY_TEXT: &str = "Press SPACEBAR to replay";
    pub const PAUSE_TEXT: &str = "PAUSE";
    pub const WINNER_TEXT_Y: f32 = 24.0;
    pub const REPLAY_TEXT_Y: f32 = 96.0;

    /// Asset locations, relative to the working directory (native) or page (web)
    pub const ASSETS_DIR: &str = "assets";
    pub const FONT_FILE: &str = "CodeNewRoman.otf";
    pub const FONT_FAMILY: &str = "CodeNewRoman";
    pub const PADDLE_SOUND_FILE: &str = "PaddleSound.wav";
    pub const WALL_SOUND_FILE: &str = "WallSound.wav";
}

#[cfg(test)]
mod tests {
    use super::consts::*;

    #[test]
    fn test_start_geometry() {
        assert_eq!(PADDLE_LEFT_X, 32.0);
        assert_eq!(PADDLE_RIGHT_X, 752.0);
        assert_eq!(PADDLE_START_Y, 260.0);
        assert_eq!(PADDLE_MAX_Y, 520.0);
        assert_eq!(BALL_START_X, 394.0);
        assert_eq!(BALL_START_Y, 288.0);
    }

    #[test]
    fn test_score_pause_is_one_and_a_half_seconds() {
        assert_eq!(SCORE_PAUSE_FRAMES, 90);
        assert!((SCORE_PAUSE_FRAMES as f32 * FRAME_DT - 1.5).abs() < 1e-4);
    }
}
