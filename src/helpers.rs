//! Utility functions for slimefootball

use bevy::prelude::*;

/// Move a value toward a target by a maximum delta
pub fn move_toward(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}

/// Check whether a point lies inside an axis-aligned box given by center and size
pub fn point_in_aabb(point: Vec2, center: Vec2, size: Vec2) -> bool {
    let half = size / 2.0;
    point.x > center.x - half.x
        && point.x < center.x + half.x
        && point.y > center.y - half.y
        && point.y < center.y + half.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_toward_clamps_to_target() {
        assert_eq!(move_toward(0.0, 1.0, 0.25), 0.25);
        assert_eq!(move_toward(0.9, 1.0, 0.25), 1.0);
        assert_eq!(move_toward(-0.1, -1.0, 0.5), -0.6);
    }

    #[test]
    fn point_in_aabb_is_exclusive_at_edges() {
        let center = Vec2::ZERO;
        let size = Vec2::splat(2.0);
        assert!(point_in_aabb(Vec2::new(0.5, -0.5), center, size));
        assert!(!point_in_aabb(Vec2::new(1.0, 0.0), center, size));
        assert!(!point_in_aabb(Vec2::new(0.0, -1.5), center, size));
    }
}
