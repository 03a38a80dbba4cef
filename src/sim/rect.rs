//! Axis-aligned rectangles and hitboxes

use glam::Vec2;

/// An axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Shrink by the given margins (left, top, right, bottom)
    pub fn inset(&self, left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::new(
            self.pos.x + left,
            self.pos.y + top,
            (self.size.x - left - right).max(0.0),
            (self.size.y - top - bottom).max(0.0),
        )
    }

    /// Strict overlap test: rectangles that only share an edge do not intersect,
    /// and empty rectangles never intersect anything.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.size.x <= 0.0 || self.size.y <= 0.0 || other.size.x <= 0.0 || other.size.y <= 0.0 {
            return false;
        }
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Collision bounds of an entity
///
/// Entities start out `NotComputed` and get a `Rect` on their first physics
/// update. Anything involving a `NotComputed` hitbox is "no collision".
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Hitbox {
    #[default]
    NotComputed,
    Rect(Rect),
}

impl Hitbox {
    pub fn rect(&self) -> Option<&Rect> {
        match self {
            Hitbox::NotComputed => None,
            Hitbox::Rect(rect) => Some(rect),
        }
    }

    pub fn collides(&self, other: &Hitbox) -> bool {
        match (self, other) {
            (Hitbox::Rect(a), Hitbox::Rect(b)) => a.intersects(b),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.intersects(&right));
        assert!(!a.intersects(&below));
    }

    #[test]
    fn test_containment_overlaps() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 5.0, 5.0);
        assert!(outer.intersects(&inner));
        assert!(inner.intersects(&outer));
    }

    #[test]
    fn test_empty_rect_never_overlaps() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let empty = Rect::new(5.0, 5.0, 0.0, 3.0);
        assert!(!a.intersects(&empty));
    }

    #[test]
    fn test_inset() {
        let r = Rect::new(10.0, 20.0, 40.0, 60.0);
        assert_eq!(r.inset(6.0, 0.0, 6.0, 0.0), Rect::new(16.0, 20.0, 28.0, 60.0));
    }

    #[test]
    fn test_uncomputed_hitbox_never_collides() {
        let rect = Hitbox::Rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(rect.collides(&rect));
        assert!(!Hitbox::NotComputed.collides(&rect));
        assert!(!rect.collides(&Hitbox::NotComputed));
        assert!(!Hitbox::NotComputed.collides(&Hitbox::NotComputed));
        assert!(Hitbox::NotComputed.rect().is_none());
    }
}
