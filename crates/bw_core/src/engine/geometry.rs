//! Trajectory projection and centroid math.

use super::arena::{bounds, pace};
use super::types::{Position, Velocity};

/// Rounded arithmetic-mean center of a non-empty position set.
pub fn centroid(positions: &[Position]) -> Position {
    let n = positions.len().max(1) as f64;
    let (sx, sy) = positions
        .iter()
        .fold((0i64, 0i64), |(sx, sy), p| (sx + p.x as i64, sy + p.y as i64));
    Position::new(
        (sx as f64 / n).round() as i32,
        (sy as f64 / n).round() as i32,
    )
}

/// Strict interior check; a unit on the boundary counts as gone.
pub fn in_arena(p: Position) -> bool {
    p.x > 0 && p.x < bounds::MAX_X && p.y > 0 && p.y < bounds::MAX_Y
}

/// Turns until a unit moving with fixed velocity leaves the arena, capped
/// at `pace::MAX_PROJECTION_TURNS` (a stationary unit never leaves).
pub fn turns_to_leave(start: Position, v: Velocity) -> u32 {
    let mut p = start;
    let mut turns = 0;
    while in_arena(p) && turns < pace::MAX_PROJECTION_TURNS {
        p = p.translated(v);
        turns += 1;
    }
    turns
}
