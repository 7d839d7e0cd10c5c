//! # Layout Engine
//!
//! Turns a [`LabelTemplate`] into resolved rectangles: the QR block, the
//! field-stack container, and one box per field. Everything is computed in
//! millimetres with the label's top-left corner at the origin; render
//! targets project the result through [`crate::units`], which is what
//! makes the three targets agree on geometry by construction.
//!
//! Two mutually exclusive modes, selected by `show_additional_info`:
//!
//! - **QR-only**: the label collapses to a square around the QR symbol
//!   plus padding; `qr_position` places the symbol inside the padded area;
//!   the field list is ignored.
//! - **Composite**: the QR block and the field-stack container are two
//!   flow items along `layout_direction`'s main axis, separated by a
//!   fixed 2 mm gap, cross-aligned per `items_alignment`. The stack lays
//!   fields top-to-bottom in ascending `sort_order`. Reverse directions
//!   swap only the QR/container placement, never stack-internal order.
//!
//! The engine never reflows or shrinks content. When the QR block plus the
//! stack exceed the padded inner area, a [`LayoutWarning::Overflow`] is
//! pushed and rendering proceeds (targets clip at their discretion).

pub mod anchor;

use crate::geometry::{resolve_box, Rect};
use crate::template::{ItemsAlignment, LabelTemplate, LayoutDirection, QrPosition};

/// Fixed gap between the QR block and the field-stack container, mm.
pub const QR_FIELDS_GAP_MM: f32 = 2.0;

/// Non-fatal conditions detected during layout.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutWarning {
    /// Content needs more room than the padded inner area provides.
    /// Rendering continues; targets clip.
    Overflow { needed_mm: f32, available_mm: f32 },
}

/// Resolved box for one field: declared outer rect plus the content rect
/// after the field's own padding and border.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRect {
    pub field_id: String,
    pub outer: Rect,
    pub inner: Rect,
}

/// Output of [`resolve_layout`], in millimetres.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// The label's outer rectangle, origin (0, 0).
    pub label_rect: Rect,
    /// Label inner area after padding and border.
    pub content_rect: Rect,
    pub qr_rect: Rect,
    /// Zero-sized in QR-only mode.
    pub fields_container_rect: Rect,
    /// Flow fields first (ascending `sort_order`), then manually placed
    /// fields — manual overrides draw on top.
    pub field_rects: Vec<FieldRect>,
    pub warnings: Vec<LayoutWarning>,
}

impl Layout {
    pub fn field_rect(&self, field_id: &str) -> Option<&FieldRect> {
        self.field_rects.iter().find(|f| f.field_id == field_id)
    }

    pub fn has_overflow(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, LayoutWarning::Overflow { .. }))
    }
}

/// Resolve the full layout for a template. Pure computation, no I/O.
pub fn resolve_layout(template: &LabelTemplate) -> Layout {
    if template.show_additional_info {
        resolve_composite(template)
    } else {
        resolve_qr_only(template)
    }
}

/// QR-only mode: outer side = QR size + padding, forced square regardless
/// of the declared width/height. With asymmetric padding the square takes
/// the larger padding sum, so the symbol always fits.
fn resolve_qr_only(template: &LabelTemplate) -> Layout {
    let padding = template.padding();
    let border = template.effective_border_width();
    let pad_extent = padding.horizontal().max(padding.vertical());
    let side = template.qr_size_mm + pad_extent + border;

    let label_rect = Rect::new(0.0, 0.0, side, side);
    let content_rect = label_rect.inset(padding.grow(border / 2.0));
    let qr_rect = place_qr(content_rect, template.qr_size_mm, template.qr_position);

    Layout {
        label_rect,
        content_rect,
        qr_rect,
        fields_container_rect: Rect::default(),
        field_rects: Vec::new(),
        warnings: Vec::new(),
    }
}

fn resolve_composite(template: &LabelTemplate) -> Layout {
    let (width, height) = template.effective_size_mm();
    let label_rect = Rect::new(0.0, 0.0, width, height);
    let content_rect = label_rect.inset(template.padding().grow(template.effective_border_width() / 2.0));

    let direction = template.layout_direction;
    let qr = template.qr_size_mm;
    let mut warnings = Vec::new();

    let (main_extent, cross_extent) = if direction.is_row_like() {
        (content_rect.w, content_rect.h)
    } else {
        (content_rect.h, content_rect.w)
    };

    let container_main = main_extent - qr - QR_FIELDS_GAP_MM;
    if container_main < 0.0 {
        warnings.push(LayoutWarning::Overflow {
            needed_mm: qr + QR_FIELDS_GAP_MM,
            available_mm: main_extent,
        });
    }
    if qr > cross_extent {
        warnings.push(LayoutWarning::Overflow {
            needed_mm: qr,
            available_mm: cross_extent,
        });
    }
    let container_main = container_main.max(0.0);

    // Main-axis offsets: the QR block sits at the start and the container
    // takes the remainder; a reverse direction swaps the two.
    let (qr_main, container_main_start) = if direction.is_reversed() {
        (container_main + QR_FIELDS_GAP_MM, 0.0)
    } else {
        (0.0, qr + QR_FIELDS_GAP_MM)
    };

    let qr_cross = align_offset(template.items_alignment, cross_extent, qr);

    let (qr_rect, fields_container_rect) = if direction.is_row_like() {
        (
            Rect::new(content_rect.x + qr_main, content_rect.y + qr_cross, qr, qr),
            Rect::new(
                content_rect.x + container_main_start,
                content_rect.y,
                container_main,
                content_rect.h,
            ),
        )
    } else {
        (
            Rect::new(content_rect.x + qr_cross, content_rect.y + qr_main, qr, qr),
            Rect::new(
                content_rect.x,
                content_rect.y + container_main_start,
                content_rect.w,
                container_main,
            ),
        )
    };

    let mut field_rects = stack_fields(
        template,
        fields_container_rect,
        direction,
        &mut warnings,
    );

    // Manual overrides: absolute label-relative coordinates, same output
    // shape as the flow path.
    for field in template.manual_fields() {
        let outer = Rect::new(
            field.position_x_mm.unwrap_or(0.0),
            field.position_y_mm.unwrap_or(0.0),
            field.width_mm,
            field.height_mm,
        );
        let resolved = resolve_box(outer, field.padding(), field.effective_border_width());
        field_rects.push(FieldRect {
            field_id: field.id.clone(),
            outer: resolved.outer,
            inner: resolved.inner,
        });
    }

    Layout {
        label_rect,
        content_rect,
        qr_rect,
        fields_container_rect,
        field_rects,
        warnings,
    }
}

/// Lay the flow fields top-to-bottom inside the container.
///
/// Fields fill the container width; declared `width_mm` only matters on
/// the manual-override path. Row-like directions center the stack block
/// vertically in the container; column-like directions start at the top.
fn stack_fields(
    template: &LabelTemplate,
    container: Rect,
    direction: LayoutDirection,
    warnings: &mut Vec<LayoutWarning>,
) -> Vec<FieldRect> {
    let fields = template.flow_fields();
    if fields.is_empty() {
        return Vec::new();
    }

    let gap = template.field_vertical_gap_mm;
    let stack_h: f32 = fields.iter().map(|f| f.height_mm).sum::<f32>()
        + gap * (fields.len() as f32 - 1.0);

    if stack_h > container.h {
        warnings.push(LayoutWarning::Overflow {
            needed_mm: stack_h,
            available_mm: container.h,
        });
    }

    let mut y = if direction.is_row_like() {
        // Centered as a block; when the stack overflows, pin to the top
        // so clipping only eats the bottom.
        container.y + ((container.h - stack_h) / 2.0).max(0.0)
    } else {
        container.y
    };

    let mut out = Vec::with_capacity(fields.len());
    for field in fields {
        let outer = Rect::new(container.x, y, container.w, field.height_mm);
        let resolved = resolve_box(outer, field.padding(), field.effective_border_width());
        out.push(FieldRect {
            field_id: field.id.clone(),
            outer: resolved.outer,
            inner: resolved.inner,
        });
        y += field.height_mm + gap;
    }
    out
}

fn align_offset(alignment: ItemsAlignment, extent: f32, item: f32) -> f32 {
    match alignment {
        ItemsAlignment::Start => 0.0,
        ItemsAlignment::Center => (extent - item) / 2.0,
        ItemsAlignment::End => extent - item,
    }
}

/// Place the QR square inside the padded area per `qr_position`.
/// Degenerates to a single point when the area exactly fits the symbol.
fn place_qr(area: Rect, size: f32, position: QrPosition) -> Rect {
    let cx = area.x + (area.w - size) / 2.0;
    let cy = area.y + (area.h - size) / 2.0;
    let right = area.right() - size;
    let bottom = area.bottom() - size;
    let (x, y) = match position {
        QrPosition::Center => (cx, cy),
        QrPosition::TopLeft => (area.x, area.y),
        QrPosition::TopRight => (right, area.y),
        QrPosition::BottomLeft => (area.x, bottom),
        QrPosition::BottomRight => (right, bottom),
        QrPosition::Left => (area.x, cy),
        QrPosition::Right => (right, cy),
    };
    Rect::new(x, y, size, size)
}
