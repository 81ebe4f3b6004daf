//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives in one owned `GameState`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;

/// A player, identified by the side of the playfield they defend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Horizontal serve direction when this player receives the ball
    pub fn serve_direction(self) -> Vec2 {
        match self {
            Side::Left => Vec2::new(-1.0, 0.0),
            Side::Right => Vec2::new(1.0, 0.0),
        }
    }

    /// Paddle and HUD color for this player
    pub fn color(self) -> Color {
        match self {
            Side::Left => LEFT_COLOR,
            Side::Right => RIGHT_COLOR,
        }
    }
}

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// CSS color string, e.g. `rgba(255, 0, 0, 1)`
    pub fn to_css(self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            self.a as f32 / 255.0
        )
    }
}

/// A player's paddle; `pos` is the top-left corner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Color,
    pub min_y: f32,
    pub max_y: f32,
}

impl Paddle {
    pub fn new(side: Side) -> Self {
        let x = match side {
            Side::Left => PADDLE_LEFT_X,
            Side::Right => PADDLE_RIGHT_X,
        };
        Self {
            side,
            pos: Vec2::new(x, PADDLE_START_Y),
            size: Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
            color: side.color(),
            min_y: PADDLE_MIN_Y,
            max_y: PADDLE_MAX_Y,
        }
    }

    /// Move vertically; `direction` is +1 for up and -1 for down.
    ///
    /// No clamping happens here: callers check the bounds first.
    pub fn move_by(&mut self, direction: i32, speed: f32) {
        self.pos.y += speed * (direction * -1) as f32;
    }

    /// Back to the serve position
    pub fn reset(&mut self) {
        *self = Self::new(self.side);
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.pos + self.size)
    }

    /// Vertical midpoint
    pub fn mid_y(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }
}

/// The ball; `pos` is the top-left corner of its bounding square
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
    /// Cleared while `set_position` assigns, so a teleport never mixes with a move
    movable: bool,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Vec2::new(BALL_START_X, BALL_START_Y),
            radius: BALL_RADIUS,
            color: BALL_COLOR,
            movable: true,
        }
    }
}

impl Ball {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance along `direction`; positive y in `direction` means up
    pub fn move_by(&mut self, direction: Vec2, speed: f32) {
        if self.movable {
            self.pos.x += direction.x * speed;
            self.pos.y += direction.y * -1.0 * speed;
        }
    }

    /// Teleport, used to snap the ball against whatever it just hit
    pub fn set_position(&mut self, pos: Vec2) {
        self.movable = false;
        self.pos = pos;
        self.movable = true;
    }

    pub fn is_movable(&self) -> bool {
        self.movable
    }

    pub fn diameter(&self) -> f32 {
        self.radius * 2.0
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.pos + Vec2::splat(self.diameter()))
    }

    /// Back to the serve position
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Current phase of the match, derived from the state flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball in play
    Rallying,
    /// Play suspended by the pause toggle
    Paused,
    /// Board frozen after a point
    RallyEnding,
    /// A player reached the max score; waiting for replay
    Won,
}

/// Things that happened during the last frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PaddleHit,
    WallHit,
    /// A point for this side
    Scored(Side),
    MatchWon(Side),
    /// Pause toggled; carries the new paused state
    PauseToggled(bool),
    Replay,
}

/// Complete match state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub left: Paddle,
    pub right: Paddle,
    pub ball: Ball,
    pub score_left: u32,
    pub score_right: u32,
    /// Paddle hits in the current rally
    pub collision_count: u32,
    pub ball_speed: f32,
    /// x is always ±1; y is 0 or ±0.5 (positive is up)
    pub direction: Vec2,
    pub win: bool,
    pub paused: bool,
    /// Frames left in the post-point freeze
    pub cooldown_frames: u32,
    /// Simulation frame counter
    pub frame: u64,
    /// Events from the most recent `tick`
    pub events: Vec<GameEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            left: Paddle::new(Side::Left),
            right: Paddle::new(Side::Right),
            ball: Ball::new(),
            score_left: 0,
            score_right: 0,
            collision_count: 0,
            ball_speed: BALL_BASE_SPEED,
            direction: DEFAULT_SERVER.serve_direction(),
            win: false,
            paused: false,
            cooldown_frames: 0,
            frame: 0,
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        if self.cooldown_frames > 0 {
            GamePhase::RallyEnding
        } else if self.win {
            GamePhase::Won
        } else if self.paused {
            GamePhase::Paused
        } else {
            GamePhase::Rallying
        }
    }

    /// The player who reached the max score, if any
    pub fn winner(&self) -> Option<Side> {
        if self.score_left >= MAX_SCORE {
            Some(Side::Left)
        } else if self.score_right >= MAX_SCORE {
            Some(Side::Right)
        } else {
            None
        }
    }

    /// Ball speed for the current number of paddle hits
    pub fn ramped_speed(collision_count: u32) -> f32 {
        BALL_BASE_SPEED + collision_count as f32 * BALL_SPEED_INCREMENT
    }

    /// Serve direction for the current point total: even goes to the
    /// default server, odd to the other player
    pub fn serve_direction(&self) -> Vec2 {
        let server = if (self.score_left + self.score_right) % 2 == 0 {
            DEFAULT_SERVER
        } else {
            DEFAULT_SERVER.opponent()
        };
        server.serve_direction()
    }

    /// Put paddles, ball and the speed ramp back to the start of a rally
    pub fn reset_rally(&mut self) {
        self.left.reset();
        self.right.reset();
        self.ball.reset();
        self.collision_count = 0;
        self.ball_speed = BALL_BASE_SPEED;
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        if !self.events.contains(&event) {
            self.events.push(event);
        }
    }
}
