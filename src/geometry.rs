//! # Geometry & Box Model
//!
//! Rectangle primitives plus the box-model resolver. Everything here is
//! target-agnostic: rectangles in, rectangles out, no draw calls. At the
//! layout stage all values are millimetres; render targets project them
//! to pixels or points through [`crate::units`].

use serde::{Deserialize, Serialize};

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle (origin top-left, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// Shrink by the given insets. Extent is clamped at zero, with the
    /// degenerate rect collapsing toward the inset midpoint.
    pub fn inset(&self, insets: Insets) -> Rect {
        let w = (self.w - insets.left - insets.right).max(0.0);
        let h = (self.h - insets.top - insets.bottom).max(0.0);
        let x = if w > 0.0 {
            self.x + insets.left
        } else {
            self.x + self.w / 2.0
        };
        let y = if h > 0.0 {
            self.y + insets.top
        } else {
            self.y + self.h / 2.0
        };
        Rect::new(x, y, w, h)
    }

    /// Scale all four components uniformly (mm → px/pt projection).
    pub fn scale(&self, factor: f32) -> Rect {
        Rect::new(
            self.x * factor,
            self.y * factor,
            self.w * factor,
            self.h * factor,
        )
    }
}

/// Four independent edge insets (padding).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Insets {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Insets {
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn uniform(v: f32) -> Self {
        Self::new(v, v, v, v)
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    /// Grow every edge by the same amount.
    pub fn grow(&self, v: f32) -> Insets {
        Insets::new(self.top + v, self.right + v, self.bottom + v, self.left + v)
    }
}

/// A resolved box: the declared outer rectangle plus the inner content
/// rectangle after padding and border.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedBox {
    pub outer: Rect,
    pub inner: Rect,
}

/// Resolve the box model for a declared rectangle.
///
/// The border is drawn centered on the outer edge, so the content loses
/// half the border width per side on top of the padding. Background fill
/// (when not transparent) paints the full `outer` rect before border and
/// content — that ordering is the scene builder's responsibility.
pub fn resolve_box(outer: Rect, padding: Insets, border_width: f32) -> ResolvedBox {
    let inner = outer.inset(padding.grow(border_width / 2.0));
    ResolvedBox { outer, inner }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(1.0, 2.0, 10.0, 20.0);
        assert_eq!(r.right(), 11.0);
        assert_eq!(r.bottom(), 22.0);
        assert_eq!(r.center(), Point::new(6.0, 12.0));
    }

    #[test]
    fn test_rect_contains() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(r.contains(Point::new(9.9, 9.9)));
        assert!(!r.contains(Point::new(10.0, 5.0)));
        assert!(!r.contains(Point::new(-0.1, 5.0)));
    }

    #[test]
    fn test_inset_basic() {
        let r = Rect::new(0.0, 0.0, 20.0, 10.0);
        let inner = r.inset(Insets::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(inner, Rect::new(4.0, 1.0, 14.0, 6.0));
    }

    #[test]
    fn test_inset_clamps_to_zero() {
        let r = Rect::new(0.0, 0.0, 4.0, 4.0);
        let inner = r.inset(Insets::uniform(3.0));
        assert_eq!(inner.w, 0.0);
        assert_eq!(inner.h, 0.0);
    }

    #[test]
    fn test_resolve_box_border_centered() {
        // 2mm border centered on the edge eats 1mm per side beyond padding
        let outer = Rect::new(0.0, 0.0, 20.0, 20.0);
        let resolved = resolve_box(outer, Insets::uniform(2.0), 2.0);
        assert_eq!(resolved.outer, outer);
        assert_eq!(resolved.inner, Rect::new(3.0, 3.0, 14.0, 14.0));
    }

    #[test]
    fn test_resolve_box_no_border() {
        let outer = Rect::new(5.0, 5.0, 10.0, 10.0);
        let resolved = resolve_box(outer, Insets::uniform(1.0), 0.0);
        assert_eq!(resolved.inner, Rect::new(6.0, 6.0, 8.0, 8.0));
    }

    #[test]
    fn test_scale() {
        let r = Rect::new(1.0, 2.0, 3.0, 4.0).scale(2.0);
        assert_eq!(r, Rect::new(2.0, 4.0, 6.0, 8.0));
    }
}
