//! Field caption placement.
//!
//! A field may carry a small caption (its `label_text`) anchored to one of
//! nine compass positions inside the field's content box. Top and bottom
//! rows reserve a horizontal strip so caption and content never overlap;
//! the center row draws the caption over the content, and when the column
//! is also `center` the content is dimmed so the caption stays legible.
//! Unknown anchor strings were already folded to `inside-top-left` at
//! deserialization time, so this module only sees the nine known values.

use crate::geometry::Rect;
use crate::template::{AnchorCol, AnchorRow, LabelAnchor, TextAlign};
use crate::units::points_to_mm;

/// Content opacity under a centered overlay caption.
pub const OVERLAY_CONTENT_OPACITY: f32 = 0.35;

/// Extra vertical margin around the caption strip, mm.
const CAPTION_MARGIN_MM: f32 = 1.0;

/// Where the caption goes and what happens to the content underneath.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionPlacement {
    pub caption_rect: Rect,
    /// The area left for the field's value. Equals the full inner rect
    /// when the caption overlays instead of reserving a strip.
    pub content_rect: Rect,
    /// 1.0 except for the `inside-center-center` overlay.
    pub content_opacity: f32,
    /// Horizontal alignment of the caption text inside its strip.
    pub text_align: TextAlign,
}

/// Height of the caption strip for a given caption font size.
pub fn caption_height_mm(label_font_size_pt: f32) -> f32 {
    points_to_mm(label_font_size_pt) * 1.2 + CAPTION_MARGIN_MM
}

/// Resolve the caption strip and remaining content area inside `inner`.
/// The strip is clamped to the field box, so a tiny field degrades to a
/// caption-only box rather than bleeding outside it.
pub fn resolve_caption(inner: Rect, anchor: LabelAnchor, caption_h: f32) -> CaptionPlacement {
    let h = caption_h.clamp(0.0, inner.h);
    let text_align = match anchor.col() {
        AnchorCol::Left => TextAlign::Left,
        AnchorCol::Center => TextAlign::Center,
        AnchorCol::Right => TextAlign::Right,
    };

    let (caption_rect, content_rect, content_opacity) = match anchor.row() {
        AnchorRow::Top => (
            Rect::new(inner.x, inner.y, inner.w, h),
            Rect::new(inner.x, inner.y + h, inner.w, inner.h - h),
            1.0,
        ),
        AnchorRow::Bottom => (
            Rect::new(inner.x, inner.bottom() - h, inner.w, h),
            Rect::new(inner.x, inner.y, inner.w, inner.h - h),
            1.0,
        ),
        AnchorRow::Center => {
            let opacity = if anchor.col() == AnchorCol::Center {
                OVERLAY_CONTENT_OPACITY
            } else {
                1.0
            };
            (
                Rect::new(inner.x, inner.y + (inner.h - h) / 2.0, inner.w, h),
                inner,
                opacity,
            )
        }
    };

    CaptionPlacement {
        caption_rect,
        content_rect,
        content_opacity,
        text_align,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn inner() -> Rect {
        Rect::new(10.0, 10.0, 30.0, 12.0)
    }

    #[test]
    fn test_all_nine_anchors_stay_in_bounds() {
        let inner = inner();
        for anchor in LabelAnchor::ALL {
            let placement = resolve_caption(inner, anchor, 3.0);
            let c = placement.caption_rect;
            assert!(c.x >= inner.x - 1e-4, "{anchor:?}");
            assert!(c.y >= inner.y - 1e-4, "{anchor:?}");
            assert!(c.right() <= inner.right() + 1e-4, "{anchor:?}");
            assert!(c.bottom() <= inner.bottom() + 1e-4, "{anchor:?}");
        }
    }

    #[test]
    fn test_top_row_reserves_strip() {
        let placement = resolve_caption(inner(), LabelAnchor::InsideTopLeft, 3.0);
        assert_eq!(placement.caption_rect.y, 10.0);
        assert_eq!(placement.content_rect.y, 13.0);
        assert_eq!(placement.content_rect.h, 9.0);
        assert_eq!(placement.content_opacity, 1.0);
        assert_eq!(placement.text_align, TextAlign::Left);
    }

    #[test]
    fn test_bottom_row_reserves_strip_from_below() {
        let placement = resolve_caption(inner(), LabelAnchor::InsideBottomRight, 3.0);
        assert_eq!(placement.caption_rect.bottom(), 22.0);
        assert_eq!(placement.content_rect.y, 10.0);
        assert_eq!(placement.content_rect.h, 9.0);
        assert_eq!(placement.text_align, TextAlign::Right);
    }

    #[test]
    fn test_center_center_overlays_and_dims_content() {
        let placement = resolve_caption(inner(), LabelAnchor::InsideCenterCenter, 3.0);
        assert_eq!(placement.content_rect, inner());
        assert_eq!(placement.content_opacity, OVERLAY_CONTENT_OPACITY);
        // caption vertically centered
        assert_eq!(placement.caption_rect.y, 10.0 + 4.5);
    }

    #[test]
    fn test_center_left_overlays_without_dimming() {
        let placement = resolve_caption(inner(), LabelAnchor::InsideCenterLeft, 3.0);
        assert_eq!(placement.content_rect, inner());
        assert_eq!(placement.content_opacity, 1.0);
        assert_eq!(placement.text_align, TextAlign::Left);
    }

    #[test]
    fn test_oversized_caption_clamps_to_field() {
        let placement = resolve_caption(inner(), LabelAnchor::InsideTopCenter, 50.0);
        assert_eq!(placement.caption_rect.h, 12.0);
        assert_eq!(placement.content_rect.h, 0.0);
    }

    #[test]
    fn test_caption_height_scales_with_font_size() {
        let small = caption_height_mm(6.0);
        let large = caption_height_mm(12.0);
        assert!(large > small);
        // 6pt ≈ 2.117mm → ×1.2 + 1 ≈ 3.54mm
        assert!((small - 3.54).abs() < 0.01);
    }
}
