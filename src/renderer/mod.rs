//! Rendering module
//!
//! `Scene` is the per-frame snapshot handed to a drawing backend: shapes,
//! colors and HUD strings, all derived from `GameState`. The Canvas 2D
//! backend in `canvas` is only built for the web.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{Color, GameState, Paddle, Side};

/// Filled rectangle, `pos` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectShape {
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Color,
}

impl From<&Paddle> for RectShape {
    fn from(paddle: &Paddle) -> Self {
        Self {
            pos: paddle.pos,
            size: paddle.size,
            color: paddle.color,
        }
    }
}

/// Filled circle, `pos` is the top-left corner of its bounding square
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleShape {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
}

impl CircleShape {
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.radius)
    }
}

/// Horizontal placement of a text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HAlign {
    Left,
    Center,
}

/// Vertical placement of a text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VAlign {
    Top,
    Middle,
}

/// A line of HUD text; the backend measures it and applies the alignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextItem {
    pub text: String,
    pub size: u32,
    pub color: Color,
    pub anchor: Vec2,
    pub h_align: HAlign,
    pub v_align: VAlign,
}

/// HUD strings; empty strings are not drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub score_left: String,
    pub score_right: String,
    /// Winner announcement, empty until someone wins
    pub winner: String,
    pub winner_color: Color,
    /// Replay prompt, empty until someone wins
    pub replay: String,
    /// Pause banner, empty unless paused
    pub pause: String,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        let winner = if state.win { state.winner() } else { None };
        Self {
            score_left: state.score_left.to_string(),
            score_right: state.score_right.to_string(),
            winner: match winner {
                Some(Side::Left) => WINNER_LEFT_TEXT.to_string(),
                Some(Side::Right) => WINNER_RIGHT_TEXT.to_string(),
                None => String::new(),
            },
            winner_color: winner.map(Side::color).unwrap_or(TEXT_COLOR),
            replay: if winner.is_some() {
                REPLAY_TEXT.to_string()
            } else {
                String::new()
            },
            pause: if state.paused {
                PAUSE_TEXT.to_string()
            } else {
                String::new()
            },
        }
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub size: Vec2,
    pub background: Color,
    pub paddles: [RectShape; 2],
    pub ball: CircleShape,
    pub hud: Hud,
}

impl Scene {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            size: Vec2::new(WINDOW_WIDTH, WINDOW_HEIGHT),
            background: Color::BLACK,
            paddles: [(&state.left).into(), (&state.right).into()],
            ball: CircleShape {
                pos: state.ball.pos,
                radius: state.ball.radius,
                color: state.ball.color,
            },
            hud: Hud::from_state(state),
        }
    }

    /// HUD laid out for drawing, skipping empty strings
    pub fn texts(&self) -> Vec<TextItem> {
        let hud = &self.hud;
        let mid_y = self.size.y / 2.0;
        let candidates = [
            TextItem {
                text: hud.score_left.clone(),
                size: FONT_SIZE_SCORE,
                color: LEFT_COLOR,
                anchor: Vec2::new(14.0, mid_y),
                h_align: HAlign::Center,
                v_align: VAlign::Middle,
            },
            TextItem {
                text: hud.score_right.clone(),
                size: FONT_SIZE_SCORE,
                color: RIGHT_COLOR,
                anchor: Vec2::new(self.size.x - 20.0, mid_y),
                h_align: HAlign::Center,
                v_align: VAlign::Middle,
            },
            TextItem {
                text: hud.winner.clone(),
                size: FONT_SIZE_WINNER,
                color: hud.winner_color,
                anchor: Vec2::new(self.size.x / 2.0, WINNER_TEXT_Y),
                h_align: HAlign::Center,
                v_align: VAlign::Top,
            },
            TextItem {
                text: hud.replay.clone(),
                size: FONT_SIZE_REPLAY,
                color: TEXT_COLOR,
                anchor: Vec2::new(self.size.x / 2.0, REPLAY_TEXT_Y),
                h_align: HAlign::Center,
                v_align: VAlign::Top,
            },
            TextItem {
                text: hud.pause.clone(),
                size: FONT_SIZE_PAUSE,
                color: TEXT_COLOR,
                anchor: Vec2::ZERO,
                h_align: HAlign::Left,
                v_align: VAlign::Top,
            },
        ];
        candidates
            .into_iter()
            .filter(|item| !item.text.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::update_score;

    #[test]
    fn test_scene_mirrors_entities() {
        let state = GameState::new();
        let scene = Scene::from_state(&state);
        assert_eq!(scene.paddles[0].pos, state.left.pos);
        assert_eq!(scene.paddles[0].color, Color::BLUE);
        assert_eq!(scene.paddles[1].color, Color::RED);
        assert_eq!(scene.paddles[1].size, Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT));
        assert_eq!(scene.ball.radius, BALL_RADIUS);
        assert_eq!(scene.ball.center(), state.ball.pos + Vec2::splat(BALL_RADIUS));
    }

    #[test]
    fn test_hud_during_play() {
        let hud = Hud::from_state(&GameState::new());
        assert_eq!(hud.score_left, "0");
        assert_eq!(hud.score_right, "0");
        assert!(hud.winner.is_empty());
        assert!(hud.replay.is_empty());
        assert!(hud.pause.is_empty());
    }

    #[test]
    fn test_hud_pause_banner() {
        let mut state = GameState::new();
        state.paused = true;
        let scene = Scene::from_state(&state);
        assert_eq!(scene.hud.pause, PAUSE_TEXT);
        assert!(scene.texts().iter().any(|t| t.text == PAUSE_TEXT));
    }

    #[test]
    fn test_hud_winner() {
        let mut state = GameState::new();
        state.score_right = MAX_SCORE - 1;
        update_score(&mut state, Side::Right);

        let hud = Hud::from_state(&state);
        assert_eq!(hud.score_right, "10");
        assert_eq!(hud.winner, WINNER_RIGHT_TEXT);
        assert_eq!(hud.winner_color, Color::RED);
        assert_eq!(hud.replay, REPLAY_TEXT);
    }

    #[test]
    fn test_texts_skip_empty_strings() {
        let scene = Scene::from_state(&GameState::new());
        let texts = scene.texts();
        // Only the two scores are visible at kick-off
        assert_eq!(texts.len(), 2);
        assert_eq!(texts[0].anchor, Vec2::new(14.0, WINDOW_HEIGHT / 2.0));
        assert_eq!(texts[1].anchor, Vec2::new(WINDOW_WIDTH - 20.0, WINDOW_HEIGHT / 2.0));
    }
}
