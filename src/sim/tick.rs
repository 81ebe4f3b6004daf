//! Fixed frame step
//!
//! Core game loop that advances the match by one frame.

use glam::Vec2;

use super::collision::{Collision, detect};
use super::input::ButtonState;
use super::state::{GameEvent, GameState, Paddle, Side};
use crate::consts::*;

/// Advance the game state by one frame.
///
/// Order: buttons, then ball motion (skipped once the ball is out), then
/// collision resolution. The caller draws afterwards and then clears the
/// edge-triggered buttons.
pub fn tick(state: &mut GameState, buttons: &ButtonState) {
    state.events.clear();
    state.frame += 1;

    // Board stays frozen after a point; input is dropped
    if state.cooldown_frames > 0 {
        state.cooldown_frames -= 1;
        if state.cooldown_frames == 0 {
            log::debug!("Serve ready at frame {}", state.frame);
        }
        return;
    }

    apply_buttons(state, buttons);

    if state.win || state.paused {
        return;
    }

    let field = Vec2::new(WINDOW_WIDTH, WINDOW_HEIGHT);

    // Once the ball is out it stays put until the point is resolved
    let before = detect(&state.ball, &state.left, &state.right, field);
    if !before.is_out() {
        let direction = state.direction;
        let speed = state.ball_speed;
        state.ball.move_by(direction, speed);
    }

    let hit = detect(&state.ball, &state.left, &state.right, field);
    resolve(state, hit);
}

/// Paddle steering, pause toggle and replay, in that order
fn apply_buttons(state: &mut GameState, buttons: &ButtonState) {
    if !state.paused && !state.win {
        let level = &buttons.level;
        steer(&mut state.left, level.move_up, level.move_down);
        steer(&mut state.right, level.move_up2, level.move_down2);
    }

    if buttons.edge.pause_toggle {
        toggle_pause(state);
    }

    if buttons.edge.confirm {
        replay(state);
    }
}

/// The bound check uses the position before the step, so the final step
/// can overshoot the bound by up to one step.
fn steer(paddle: &mut Paddle, up: bool, down: bool) {
    if up && paddle.pos.y > paddle.min_y {
        paddle.move_by(1, PADDLE_SPEED);
    }
    if down && paddle.pos.y < paddle.max_y {
        paddle.move_by(-1, PADDLE_SPEED);
    }
}

fn resolve(state: &mut GameState, hit: Collision) {
    if let Some(side) = hit.paddle() {
        state.collision_count += 1;
        state.emit(GameEvent::PaddleHit);

        // Snap onto the paddle face so the ball can't sink in further
        let x = match side {
            Side::Left => state.left.pos.x + state.left.size.x,
            Side::Right => state.right.pos.x - state.ball.diameter(),
        };
        let y = state.ball.pos.y;
        state.ball.set_position(Vec2::new(x, y));

        let dy = if hit.is_bottom_half() {
            BALL_DEFLECTION
        } else {
            -BALL_DEFLECTION
        };
        state.direction = Vec2::new(-state.direction.x, dy);
        state.ball_speed = GameState::ramped_speed(state.collision_count);
        log::trace!(
            "Paddle hit ({:?}) #{}, speed {:.2}",
            hit,
            state.collision_count,
            state.ball_speed
        );
    } else if hit.is_wall() {
        state.emit(GameEvent::WallHit);

        let y = if hit == Collision::TopWall {
            0.0
        } else {
            WINDOW_HEIGHT - state.ball.diameter()
        };
        let x = state.ball.pos.x;
        state.ball.set_position(Vec2::new(x, y));
        state.direction.y = -state.direction.y;
    } else if let Some(scorer) = hit.scorer() {
        update_score(state, scorer);
    }
}

/// Award a point, pick the next serve, check for a winner and reset the rally.
///
/// This is the only place scores increase.
pub fn update_score(state: &mut GameState, side: Side) {
    match side {
        Side::Left => state.score_left += 1,
        Side::Right => state.score_right += 1,
    }
    state.emit(GameEvent::Scored(side));
    log::info!(
        "Point to {:?}: {} - {}",
        side,
        state.score_left,
        state.score_right
    );

    state.direction = state.serve_direction();

    if let Some(winner) = state.winner() {
        if !state.win {
            state.win = true;
            state.emit(GameEvent::MatchWon(winner));
            log::info!("{:?} player wins the match", winner);
        }
    }

    state.reset_rally();
    state.cooldown_frames = SCORE_PAUSE_FRAMES;
}

/// Flip the pause flag
pub fn toggle_pause(state: &mut GameState) {
    state.paused = !state.paused;
    state.emit(GameEvent::PauseToggled(state.paused));
    log::info!("{}", if state.paused { "Paused" } else { "Resumed" });
}

/// Start a new match; only honoured once a player has won
pub fn replay(state: &mut GameState) {
    if !state.win {
        return;
    }
    state.win = false;
    state.score_left = 0;
    state.score_right = 0;
    state.reset_rally();
    state.direction = DEFAULT_SERVER.serve_direction();
    state.emit(GameEvent::Replay);
    log::info!("New match");
}
