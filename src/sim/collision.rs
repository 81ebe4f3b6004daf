//! Collision detection for the ball against paddles and playfield edges
//!
//! Classification is a pure function of the current rectangles: one result
//! per query, checked in a fixed priority order.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Ball, Paddle, Side};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box anchored on whole pixels: the corner is truncated toward zero
    /// and the size is kept.
    pub fn snapped(&self) -> Self {
        let min = self.min.trunc();
        Self {
            min,
            max: min + (self.max - self.min),
        }
    }

    /// Inclusive overlap on both axes
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    pub fn mid_y(&self) -> f32 {
        self.min.y + (self.max.y - self.min.y) / 2.0
    }
}

/// What the ball is touching this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collision {
    TopPaddleLeft,
    BottomPaddleLeft,
    TopPaddleRight,
    BottomPaddleRight,
    TopWall,
    BottomWall,
    /// Ball left past the left edge; the right player scores
    LeftOut,
    /// Ball left past the right edge; the left player scores
    RightOut,
    None,
}

impl Collision {
    /// Paddle that was hit, if any
    pub fn paddle(self) -> Option<Side> {
        match self {
            Collision::TopPaddleLeft | Collision::BottomPaddleLeft => Some(Side::Left),
            Collision::TopPaddleRight | Collision::BottomPaddleRight => Some(Side::Right),
            _ => None,
        }
    }

    /// Hit landed on the lower half of a paddle
    pub fn is_bottom_half(self) -> bool {
        matches!(
            self,
            Collision::BottomPaddleLeft | Collision::BottomPaddleRight
        )
    }

    pub fn is_wall(self) -> bool {
        matches!(self, Collision::TopWall | Collision::BottomWall)
    }

    /// Ball has left the playfield
    pub fn is_out(self) -> bool {
        matches!(self, Collision::LeftOut | Collision::RightOut)
    }

    /// Player awarded the point, for the out-of-bounds variants
    pub fn scorer(self) -> Option<Side> {
        match self {
            Collision::LeftOut => Some(Side::Right),
            Collision::RightOut => Some(Side::Left),
            _ => None,
        }
    }
}

/// Classify a ball against one paddle, splitting the hit at the paddle's midpoint
fn paddle_hit(ball: &Aabb, paddle: &Aabb, top: Collision, bottom: Collision) -> Option<Collision> {
    if !ball.overlaps(paddle) {
        return None;
    }
    // Equality counts as the lower half
    if ball.max.y >= paddle.mid_y() {
        Some(bottom)
    } else {
        Some(top)
    }
}

/// Classify the ball against both paddles and the playfield edges.
///
/// Priority: left paddle, right paddle, top wall, bottom wall, right edge,
/// left edge. Positions are sampled on whole pixels.
pub fn detect(ball: &Ball, left: &Paddle, right: &Paddle, field: Vec2) -> Collision {
    let ball_box = ball.bounds().snapped();

    if let Some(hit) = paddle_hit(
        &ball_box,
        &left.bounds().snapped(),
        Collision::TopPaddleLeft,
        Collision::BottomPaddleLeft,
    ) {
        return hit;
    }
    if let Some(hit) = paddle_hit(
        &ball_box,
        &right.bounds().snapped(),
        Collision::TopPaddleRight,
        Collision::BottomPaddleRight,
    ) {
        return hit;
    }

    if ball_box.min.y <= 0.0 {
        Collision::TopWall
    } else if ball_box.max.y >= field.y {
        Collision::BottomWall
    } else if ball_box.max.x >= field.x {
        Collision::RightOut
    } else if ball_box.min.x <= 0.0 {
        Collision::LeftOut
    } else {
        Collision::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use proptest::prelude::*;

    fn field() -> Vec2 {
        Vec2::new(WINDOW_WIDTH, WINDOW_HEIGHT)
    }

    fn ball_at(x: f32, y: f32) -> Ball {
        let mut ball = Ball::new();
        ball.set_position(Vec2::new(x, y));
        ball
    }

    fn classify(ball: &Ball) -> Collision {
        detect(
            ball,
            &Paddle::new(Side::Left),
            &Paddle::new(Side::Right),
            field(),
        )
    }

    #[test]
    fn test_no_collision_at_serve() {
        assert_eq!(classify(&Ball::new()), Collision::None);
    }

    #[test]
    fn test_top_wall() {
        assert_eq!(classify(&ball_at(390.0, 10.0)), Collision::None);
        assert_eq!(classify(&ball_at(390.0, -1.0)), Collision::TopWall);
        assert_eq!(classify(&ball_at(390.0, 0.0)), Collision::TopWall);
    }

    #[test]
    fn test_bottom_wall() {
        // 588 + 24 = 612 >= 600
        assert_eq!(classify(&ball_at(390.0, 588.0)), Collision::BottomWall);
        assert_eq!(classify(&ball_at(390.0, 576.0)), Collision::BottomWall);
        assert_eq!(classify(&ball_at(390.0, 575.0)), Collision::None);
    }

    #[test]
    fn test_out_of_bounds() {
        assert_eq!(classify(&ball_at(776.0, 100.0)), Collision::RightOut);
        assert_eq!(classify(&ball_at(0.0, 100.0)), Collision::LeftOut);
        assert_eq!(classify(&ball_at(-30.0, 100.0)), Collision::LeftOut);
        assert_eq!(Collision::LeftOut.scorer(), Some(Side::Right));
        assert_eq!(Collision::RightOut.scorer(), Some(Side::Left));
    }

    #[test]
    fn test_left_paddle_halves() {
        // Left paddle spans x 32..48, y 260..340, midpoint 300
        assert_eq!(classify(&ball_at(40.0, 262.0)), Collision::TopPaddleLeft);
        assert_eq!(classify(&ball_at(40.0, 300.0)), Collision::BottomPaddleLeft);
    }

    #[test]
    fn test_right_paddle_halves() {
        // Right paddle spans x 752..768
        assert_eq!(classify(&ball_at(740.0, 262.0)), Collision::TopPaddleRight);
        assert_eq!(classify(&ball_at(740.0, 320.0)), Collision::BottomPaddleRight);
    }

    #[test]
    fn test_midpoint_equality_is_bottom() {
        // Ball bottom edge 276 + 24 = 300 equals the paddle midpoint
        assert_eq!(classify(&ball_at(40.0, 276.0)), Collision::BottomPaddleLeft);
        assert_eq!(classify(&ball_at(40.0, 275.0)), Collision::TopPaddleLeft);
    }

    #[test]
    fn test_paddle_outranks_left_out() {
        // Paddle pulled to the edge so the ball overlaps it while past x = 0
        let mut left = Paddle::new(Side::Left);
        left.pos.x = 0.0;
        let ball = ball_at(-5.0, 270.0);
        let hit = detect(&ball, &left, &Paddle::new(Side::Right), field());
        assert_eq!(hit.paddle(), Some(Side::Left));
        assert!(!hit.is_out());
    }

    #[test]
    fn test_paddle_outranks_top_wall() {
        let mut left = Paddle::new(Side::Left);
        left.pos.y = 0.0;
        let hit = detect(&ball_at(40.0, -2.0), &left, &Paddle::new(Side::Right), field());
        assert_eq!(hit, Collision::TopPaddleLeft);
    }

    #[test]
    fn test_top_wall_outranks_out() {
        assert_eq!(classify(&ball_at(-10.0, -10.0)), Collision::TopWall);
    }

    #[test]
    fn test_positions_sample_whole_pixels() {
        // 0.9 truncates to 0, which touches the top edge
        assert_eq!(classify(&ball_at(390.0, 0.9)), Collision::TopWall);
        assert_eq!(classify(&ball_at(390.0, 1.0)), Collision::None);
    }

    #[test]
    fn test_edge_touch_counts_as_overlap() {
        // Ball's left edge exactly on the left paddle's right face
        assert_eq!(classify(&ball_at(48.0, 262.0)), Collision::TopPaddleLeft);
        assert_eq!(classify(&ball_at(49.0, 262.0)), Collision::None);
    }

    proptest! {
        #[test]
        fn prop_classification_is_consistent(x in -50.0f32..850.0, y in -50.0f32..650.0) {
            let ball = ball_at(x, y);
            let hit = classify(&ball);
            // Exactly one class, and every class predicate agrees with it
            let flags = [
                hit.paddle().is_some(),
                hit.is_wall(),
                hit.is_out(),
                hit == Collision::None,
            ];
            prop_assert_eq!(flags.iter().filter(|f| **f).count(), 1);
            // Pure: same inputs, same answer
            prop_assert_eq!(classify(&ball), hit);
        }
    }
}
