//! Raw input to [`Direction`] decoding.
//!
//! Keys follow DOM `KeyboardEvent.code` names (`ArrowLeft`, ...) plus WASD.
//! Swipes are pointer displacements from press to release; `y` grows downwards.

use crate::engine::Direction;

/// Map a key name to a direction. Unknown keys yield `None`.
pub fn direction_from_key(code: &str) -> Option<Direction> {
    match code.trim().to_ascii_lowercase().as_str() {
        "arrowleft" | "left" | "a" | "keya" => Some(Direction::Left),
        "arrowright" | "right" | "d" | "keyd" => Some(Direction::Right),
        "arrowup" | "up" | "w" | "keyw" => Some(Direction::Up),
        "arrowdown" | "down" | "s" | "keys" => Some(Direction::Down),
        _ => None,
    }
}

/// Decode a swipe of `(dx, dy)`.
///
/// Displacements shorter than `threshold` on both axes are ignored. Otherwise
/// the dominant axis decides; an exact tie counts as vertical.
pub fn direction_from_swipe(dx: f32, dy: f32, threshold: f32) -> Option<Direction> {
    if !dx.is_finite() || !dy.is_finite() {
        return None;
    }
    if dx.abs() < threshold && dy.abs() < threshold {
        return None;
    }
    let dir = if dx.abs() > dy.abs() {
        if dx > 0.0 { Direction::Right } else { Direction::Left }
    } else if dy > 0.0 {
        Direction::Down
    } else {
        Direction::Up
    };
    Some(dir)
}
