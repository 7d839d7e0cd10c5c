//! # Render targets
//!
//! Three consumers of the same [`Scene`](crate::scene::Scene):
//!
//! - [`editor`]: interactive raster for the template designer, with
//!   hit-testing and live zoom.
//! - [`preview`]: one-shot raster preview, scaled to fit a pixel budget.
//! - [`document`]: print-resolution vector output in points, assembled
//!   into a PDF for batch runs.
//!
//! The editor and preview share the rasterizer in [`raster`]; the
//! document target serializes the same draw ops to SVG instead. Because
//! every target projects the same millimetre geometry, they agree on
//! where each rect lands to within one device unit.

pub mod document;
pub mod editor;
pub mod font;
pub mod preview;
pub mod raster;

pub use document::{LabelDocument, LabelPage};
pub use editor::EditorRenderer;
pub use preview::Preview;

use crate::layout::Layout;

/// Placeholder QR payload shown in the editor and preview before any
/// real label exists.
pub const SAMPLE_TOKEN: &str = "ETIQUETA-SAMPLE";

/// What a pointer position lands on, in draw-stack order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    Field(String),
    Qr,
    Label,
}

/// Topmost element at a point in label space (mm). Fields are checked in
/// reverse draw order so manually placed fields win over flow fields.
pub fn hit_test_mm(layout: &Layout, x_mm: f32, y_mm: f32) -> Option<HitTarget> {
    let p = crate::geometry::Point::new(x_mm, y_mm);
    for field in layout.field_rects.iter().rev() {
        if field.outer.contains(p) {
            return Some(HitTarget::Field(field.field_id.clone()));
        }
    }
    if layout.qr_rect.contains(p) {
        return Some(HitTarget::Qr);
    }
    if layout.label_rect.contains(p) {
        return Some(HitTarget::Label);
    }
    None
}
