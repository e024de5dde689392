//! Collision detection for axis-aligned sprite boxes
//!
//! Everything on the playfield is an upright rectangle in screen space
//! (y grows downward). Touching edges do not count as an overlap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Box of the given size centered on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    /// Strict overlap test
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x && other.min.x < a_max.x && self.min.y < b_max.y && other.min.y < a_max.y
    }

    /// True once the box has fully left the playfield through the left edge
    #[inline]
    pub fn exited_left(&self) -> bool {
        self.max().x < 0.0
    }

    /// True once the box has fully left the playfield through the right edge
    #[inline]
    pub fn exited_right(&self, width: f32) -> bool {
        self.min.x > width
    }
}

/// Something that occupies space on the playfield
pub trait Body {
    fn bounds(&self) -> Aabb;
}

/// Index of the first body in `targets` overlapping `probe` and accepted by `live`
pub fn first_hit<T: Body>(probe: &Aabb, targets: &[T], live: impl Fn(&T) -> bool) -> Option<usize> {
    targets
        .iter()
        .position(|t| live(t) && probe.intersects(&t.bounds()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Aabb {
        Aabb::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_overlap() {
        let a = rect(0.0, 0.0, 50.0, 50.0);
        assert!(a.intersects(&rect(40.0, 40.0, 10.0, 10.0)));
        assert!(rect(40.0, 40.0, 10.0, 10.0).intersects(&a));
        // Fully contained
        assert!(a.intersects(&rect(10.0, 10.0, 5.0, 5.0)));
    }

    #[test]
    fn test_touching_edges_miss() {
        let a = rect(0.0, 0.0, 50.0, 50.0);
        assert!(!a.intersects(&rect(50.0, 0.0, 10.0, 10.0)));
        assert!(!a.intersects(&rect(0.0, 50.0, 10.0, 10.0)));
        assert!(!a.intersects(&rect(200.0, 200.0, 10.0, 10.0)));
    }

    #[test]
    fn test_centered() {
        let b = Aabb::centered(Vec2::new(100.0, 100.0), Vec2::new(10.0, 4.0));
        assert_eq!(b.min, Vec2::new(95.0, 98.0));
        assert_eq!(b.center(), Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_exits() {
        assert!(rect(-51.0, 0.0, 50.0, 50.0).exited_left());
        assert!(!rect(-49.0, 0.0, 50.0, 50.0).exited_left());
        assert!(rect(801.0, 0.0, 10.0, 5.0).exited_right(800.0));
        assert!(!rect(800.0, 0.0, 10.0, 5.0).exited_right(800.0));
    }

    #[test]
    fn test_first_hit_respects_liveness() {
        struct B(Aabb, bool);
        impl Body for B {
            fn bounds(&self) -> Aabb {
                self.0
            }
        }
        let targets = [
            B(rect(0.0, 0.0, 20.0, 20.0), false),
            B(rect(5.0, 5.0, 20.0, 20.0), true),
            B(rect(8.0, 8.0, 20.0, 20.0), true),
        ];
        let probe = rect(10.0, 10.0, 2.0, 2.0);
        assert_eq!(first_hit(&probe, &targets, |b| b.1), Some(1));
        assert_eq!(first_hit(&probe, &targets, |_| false), None);
    }
}
