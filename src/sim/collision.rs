//! Axis-aligned rectangle geometry
//!
//! Every solid thing in the arena (tanks, bullets, obstacles, the screen and the
//! HUD strip) is an axis-aligned box, so all collision tests reduce to these.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Axis-aligned rectangle, `pos` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Square box centered on a point (used for bullets)
    pub fn centered(center: Vec2, half_extent: f32) -> Self {
        Self {
            pos: center - Vec2::splat(half_extent),
            size: Vec2::splat(half_extent * 2.0),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap test: boxes that only share an edge do not intersect
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Grow the box by `margin` on every side, keeping its center
    pub fn inflate(&self, margin: f32) -> Self {
        Self {
            pos: self.pos - Vec2::splat(margin),
            size: self.size + Vec2::splat(margin * 2.0),
        }
    }
}

/// Whether a tank box at `pos` stays on screen
///
/// The right and bottom limits are exclusive, matching the screen's pixel grid.
/// The HUD strip is checked separately via [`hud_rect`].
pub fn tank_in_bounds(pos: Vec2) -> bool {
    pos.x >= 0.0
        && pos.x < SCREEN_WIDTH - TANK_SIZE
        && pos.y >= 0.0
        && pos.y < SCREEN_HEIGHT - TANK_SIZE
}

/// Box covering the reserved HUD strip
pub fn hud_rect() -> Rect {
    Rect::new(0.0, 0.0, SCREEN_WIDTH, HUD_HEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersects_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        let c = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_inflate_keeps_center() {
        let r = Rect::new(100.0, 100.0, 30.0, 30.0);
        let grown = r.inflate(60.0);
        assert_eq!(grown.center(), r.center());
        assert_eq!(grown.size, Vec2::new(150.0, 150.0));
    }

    #[test]
    fn test_centered_box() {
        let r = Rect::centered(Vec2::new(50.0, 50.0), 4.0);
        assert_eq!(r.pos, Vec2::new(46.0, 46.0));
        assert_eq!(r.size, Vec2::new(8.0, 8.0));
        assert_eq!(r.center(), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_tank_bounds() {
        assert!(tank_in_bounds(Vec2::new(0.0, 0.0)));
        assert!(!tank_in_bounds(Vec2::new(-0.5, 200.0)));
        assert!(!tank_in_bounds(Vec2::new(SCREEN_WIDTH - TANK_SIZE, 200.0)));
        assert!(!tank_in_bounds(Vec2::new(200.0, SCREEN_HEIGHT - TANK_SIZE)));
    }

    #[test]
    fn test_hud_strip() {
        let tank_at = |y: f32| Rect::new(100.0, y, TANK_SIZE, TANK_SIZE);
        assert!(tank_at(HUD_HEIGHT - 1.0).intersects(&hud_rect()));
        assert!(!tank_at(HUD_HEIGHT).intersects(&hud_rect()));
    }
}
