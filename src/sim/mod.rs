//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed frame step only (speeds are pixels per frame)
//! - One owned `GameState`, mutated only by `tick`
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Collision, detect};
pub use input::{Button, ButtonState, InputEvent, InputSampler, Key};
pub use state::{Ball, Color, GameEvent, GamePhase, GameState, Paddle, Side};
pub use tick::{replay, tick, toggle_pause, update_score};
