//! Distance, nearest-neighbor and steering helpers

use glam::Vec2;

use super::body::Body;

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Index of the body whose anchor is closest to `from`'s anchor.
///
/// Linear scan in slice order; on ties the first body found wins.
pub fn find_nearest(from: &Body, group: &[Body]) -> Option<usize> {
    let mut nearest = None;
    let mut nearest_d = f32::INFINITY;
    for (i, other) in group.iter().enumerate() {
        let d = distance(from.pos, other.pos);
        if d < nearest_d {
            nearest_d = d;
            nearest = Some(i);
        }
    }
    nearest
}

/// Round away from zero to the next whole number
#[inline]
fn ceil_magnitude(v: f32) -> f32 {
    v.abs().ceil().copysign(v)
}

/// Split `speed` into per-axis velocity heading from `pos` toward `goal`.
///
/// Components are rounded away from zero. A goal equal to `pos` yields zero.
pub fn velocity_toward(speed: f32, pos: Vec2, goal: Vec2) -> Vec2 {
    let delta = goal - pos;
    let dist = delta.length();
    if dist == 0.0 {
        return Vec2::ZERO;
    }
    let vel = delta / dist * speed;
    Vec2::new(ceil_magnitude(vel.x), ceil_magnitude(vel.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_at(x: f32, y: f32) -> Body {
        Body::new(Vec2::new(x, y), Vec2::splat(10.0), 0, -1)
    }

    #[test]
    fn test_distance() {
        assert_eq!(distance(Vec2::ZERO, Vec2::new(3.0, 4.0)), 5.0);
        assert_eq!(distance(Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0)), 0.0);
    }

    #[test]
    fn test_find_nearest() {
        let from = body_at(0.0, 0.0);
        let group = vec![body_at(100.0, 0.0), body_at(10.0, 10.0), body_at(-50.0, 0.0)];
        assert_eq!(find_nearest(&from, &group), Some(1));
    }

    #[test]
    fn test_find_nearest_tie_keeps_first() {
        let from = body_at(0.0, 0.0);
        let group = vec![body_at(10.0, 0.0), body_at(0.0, 10.0), body_at(-10.0, 0.0)];
        assert_eq!(find_nearest(&from, &group), Some(0));
    }

    #[test]
    fn test_find_nearest_empty() {
        assert_eq!(find_nearest(&body_at(0.0, 0.0), &[]), None);
    }

    #[test]
    fn test_velocity_toward_axis() {
        let v = velocity_toward(4.0, Vec2::ZERO, Vec2::new(100.0, 0.0));
        assert_eq!(v, Vec2::new(4.0, 0.0));
        let v = velocity_toward(4.0, Vec2::ZERO, Vec2::new(0.0, -100.0));
        assert_eq!(v, Vec2::new(0.0, -4.0));
    }

    #[test]
    fn test_velocity_toward_rounds_away_from_zero() {
        // 3-4-5 triangle: (0.6, 0.8) * 2.5 = (1.5, 2.0)
        let v = velocity_toward(2.5, Vec2::ZERO, Vec2::new(3.0, 4.0));
        assert_eq!(v, Vec2::new(2.0, 2.0));
        let v = velocity_toward(2.5, Vec2::ZERO, Vec2::new(-3.0, -4.0));
        assert_eq!(v, Vec2::new(-2.0, -2.0));
    }

    #[test]
    fn test_velocity_toward_same_point_is_zero() {
        let p = Vec2::new(42.0, 17.0);
        assert_eq!(velocity_toward(8.0, p, p), Vec2::ZERO);
    }
}
