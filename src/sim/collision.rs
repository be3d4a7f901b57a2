//! Collision rules for the rectangular arena
//!
//! Three walls reflect, the floor does not: a ball crossing the floor is a
//! miss and is handled by the match engine, not here. All checks run on the
//! ball's post-move rect; there is no swept test, so a fast enough ball can
//! cross the paddle row between two ticks without registering a hit.

use super::rect::Rect;
use super::state::{Arena, Ball};

/// Reflect the ball off the side and top walls by negating the matching
/// velocity component. Position is left where it is; a slight overlap with
/// the wall is allowed and resolves itself on the next advance.
pub fn reflect_off_walls(ball: &mut Ball, arena: &Arena) {
    if ball.rect.left() <= 0.0 || ball.rect.right() >= arena.width {
        ball.vel.x = -ball.vel.x;
    }
    if ball.rect.top() <= 0.0 {
        ball.vel.y = -ball.vel.y;
    }
}

/// True when the ball should deflect off the paddle this tick: the rects
/// overlap and the ball is moving downward. The downward requirement stops a
/// second trigger on ticks where the ball is still passing back up through
/// the paddle.
pub fn hits_paddle(ball: &Ball, paddle: &Rect) -> bool {
    ball.vel.y > 0.0 && ball.rect.intersects(paddle)
}

/// True when the ball has reached or crossed the floor.
pub fn past_floor(ball: &Ball, arena: &Arena) -> bool {
    ball.rect.bottom() >= arena.height
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    const ARENA: Arena = Arena {
        width: 640.0,
        height: 480.0,
    };

    fn ball_at(x: f32, y: f32, vx: f32, vy: f32) -> Ball {
        Ball {
            rect: Rect::new(Vec2::new(x, y), Vec2::new(20.0, 20.0)),
            vel: Vec2::new(vx, vy),
        }
    }

    #[test]
    fn test_left_wall_flips_vx_positive() {
        let mut ball = ball_at(-2.0, 200.0, -4.0, 3.0);
        reflect_off_walls(&mut ball, &ARENA);
        assert_eq!(ball.vel, Vec2::new(4.0, 3.0));
    }

    #[test]
    fn test_right_wall_flips_vx_negative() {
        let mut ball = ball_at(625.0, 200.0, 4.0, 3.0);
        reflect_off_walls(&mut ball, &ARENA);
        assert_eq!(ball.vel, Vec2::new(-4.0, 3.0));
    }

    #[test]
    fn test_top_wall_flips_vy() {
        let mut ball = ball_at(300.0, -1.0, 4.0, -4.0);
        reflect_off_walls(&mut ball, &ARENA);
        assert_eq!(ball.vel, Vec2::new(4.0, 4.0));
    }

    #[test]
    fn test_corner_flips_both() {
        let mut ball = ball_at(0.0, 0.0, -4.0, -4.0);
        reflect_off_walls(&mut ball, &ARENA);
        assert_eq!(ball.vel, Vec2::new(4.0, 4.0));
    }

    #[test]
    fn test_position_not_corrected() {
        let mut ball = ball_at(-2.0, 200.0, -4.0, 3.0);
        reflect_off_walls(&mut ball, &ARENA);
        assert_eq!(ball.rect.min, Vec2::new(-2.0, 200.0));
    }

    #[test]
    fn test_floor_does_not_reflect() {
        let mut ball = ball_at(300.0, 470.0, 4.0, 4.0);
        reflect_off_walls(&mut ball, &ARENA);
        assert_eq!(ball.vel, Vec2::new(4.0, 4.0));
        assert!(past_floor(&ball, &ARENA));
    }

    #[test]
    fn test_interior_ball_untouched() {
        let mut ball = ball_at(300.0, 200.0, 4.0, -4.0);
        reflect_off_walls(&mut ball, &ARENA);
        assert_eq!(ball.vel, Vec2::new(4.0, -4.0));
    }

    #[test]
    fn test_paddle_hit_needs_downward_motion() {
        let paddle = Rect::new(Vec2::new(260.0, 450.0), Vec2::new(120.0, 10.0));
        let overlapping_down = ball_at(300.0, 445.0, 4.0, 4.0);
        let overlapping_up = ball_at(300.0, 445.0, 4.0, -4.0);
        assert!(hits_paddle(&overlapping_down, &paddle));
        assert!(!hits_paddle(&overlapping_up, &paddle));
    }

    #[test]
    fn test_paddle_hit_needs_overlap() {
        let paddle = Rect::new(Vec2::new(260.0, 450.0), Vec2::new(120.0, 10.0));
        let beside = ball_at(100.0, 445.0, 4.0, 4.0);
        assert!(!hits_paddle(&beside, &paddle));
        // Resting exactly on the paddle's top edge is contact, not overlap.
        let touching = ball_at(300.0, 430.0, 4.0, 4.0);
        assert!(!hits_paddle(&touching, &paddle));
    }

    #[test]
    fn test_zero_vy_is_not_a_hit() {
        let paddle = Rect::new(Vec2::new(260.0, 450.0), Vec2::new(120.0, 10.0));
        let drifting = ball_at(300.0, 445.0, 4.0, 0.0);
        assert!(!hits_paddle(&drifting, &paddle));
    }

    #[test]
    fn test_past_floor_boundary() {
        assert!(!past_floor(&ball_at(300.0, 459.0, 0.0, 4.0), &ARENA));
        assert!(past_floor(&ball_at(300.0, 460.0, 0.0, 4.0), &ARENA));
        assert!(past_floor(&ball_at(300.0, 500.0, 0.0, 4.0), &ARENA));
    }
}
