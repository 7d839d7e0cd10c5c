//! # Scene
//!
//! The shared drawing representation between layout and the render
//! targets. A scene is a flat list of draw ops in millimetres, built once
//! per label and consumed by every backend:
//!
//! ```text
//! ┌──────────┐     ┌─────────────┐     ┌────────────────────┐
//! │ Template │ ──► │    Scene    │ ──► │ editor / preview / │
//! │ + token  │     │(Vec<DrawOp>)│     │      document      │
//! └──────────┘     └─────────────┘     └────────────────────┘
//! ```
//!
//! Backends only project coordinates into their own unit space (device
//! pixels or points) and rasterize or serialize each op. Because all
//! geometry decisions happen here, the targets cannot disagree on where
//! anything goes.

use crate::color::{self, Rgba};
use crate::error::EtiquetaError;
use crate::layout::anchor::{caption_height_mm, resolve_caption};
use crate::layout::{resolve_layout, Layout};
use crate::qr::{self, QrMatrix};
use crate::template::{
    FieldType, FontWeight, LabelTemplate, LabelTemplateField, TextAlign, VerticalAlign,
};

/// Thickness of the write-on rule at the bottom of a blank field, mm.
const RULE_WIDTH_MM: f32 = 0.3;

/// A single drawing operation, coordinates in mm.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    // ========== Boxes ==========
    /// Fill a rectangle with a solid color.
    FillRect { rect: crate::geometry::Rect, color: Rgba },

    /// Stroke a rectangle outline. The stroke is centered on the edge.
    StrokeRect {
        rect: crate::geometry::Rect,
        width_mm: f32,
        color: Rgba,
    },

    // ========== Content ==========
    /// A run of text laid out inside `rect`.
    Text {
        rect: crate::geometry::Rect,
        content: String,
        font_size_pt: f32,
        weight: FontWeight,
        color: Rgba,
        align: TextAlign,
        valign: VerticalAlign,
        /// 1.0 except for content under an overlay caption.
        opacity: f32,
    },

    /// The QR symbol's dark modules, scaled to fill `rect`.
    QrModules {
        rect: crate::geometry::Rect,
        matrix: QrMatrix,
        dark: Rgba,
    },
}

/// A fully resolved label ready for rendering.
#[derive(Debug, Clone)]
pub struct Scene {
    pub ops: Vec<DrawOp>,
    pub layout: Layout,
}

impl Scene {
    /// Label dimensions in mm.
    pub fn size_mm(&self) -> (f32, f32) {
        (self.layout.label_rect.w, self.layout.label_rect.h)
    }
}

/// Build the scene for one label. Fails only when the QR payload cannot
/// be encoded; layout problems surface as warnings on the scene's layout.
pub fn build_scene(template: &LabelTemplate, token: &str) -> Result<Scene, EtiquetaError> {
    let layout = resolve_layout(template);
    let matrix = qr::encode(token)?;
    let mut ops = Vec::new();

    // Label background and border.
    let background = color::parse_fill(&template.background_color);
    if !color::is_transparent(background) {
        ops.push(DrawOp::FillRect {
            rect: layout.label_rect,
            color: background,
        });
    }
    if template.border_enabled && template.effective_border_width() > 0.0 {
        ops.push(DrawOp::StrokeRect {
            rect: layout.label_rect,
            width_mm: template.effective_border_width(),
            color: color::parse_ink(&template.border_color),
        });
    }

    // QR on a white backing so the symbol scans on any background.
    ops.push(DrawOp::FillRect {
        rect: layout.qr_rect,
        color: color::WHITE,
    });
    ops.push(DrawOp::QrModules {
        rect: layout.qr_rect,
        matrix,
        dark: color::BLACK,
    });

    for field_rect in &layout.field_rects {
        let Some(field) = template.field(&field_rect.field_id) else {
            continue;
        };
        push_field_ops(&mut ops, field, field_rect.outer, field_rect.inner);
    }

    Ok(Scene { ops, layout })
}

fn push_field_ops(
    ops: &mut Vec<DrawOp>,
    field: &LabelTemplateField,
    outer: crate::geometry::Rect,
    inner: crate::geometry::Rect,
) {
    let background = color::parse_fill(&field.background_color);
    if !color::is_transparent(background) {
        ops.push(DrawOp::FillRect {
            rect: outer,
            color: background,
        });
    }
    if field.border_enabled && field.effective_border_width() > 0.0 {
        ops.push(DrawOp::StrokeRect {
            rect: outer,
            width_mm: field.effective_border_width(),
            color: color::parse_ink(&field.border_color),
        });
    }

    let (content_rect, content_opacity) = if field.show_label {
        let caption_h = caption_height_mm(field.label_font_size_pt);
        let placement = resolve_caption(inner, field.label_position, caption_h);
        let caption = if field.label_text.is_empty() {
            &field.field_name
        } else {
            &field.label_text
        };
        if !caption.is_empty() {
            ops.push(DrawOp::Text {
                rect: placement.caption_rect,
                content: caption.clone(),
                font_size_pt: field.label_font_size_pt,
                weight: FontWeight::Normal,
                color: color::parse_ink(&field.label_color),
                align: placement.text_align,
                valign: VerticalAlign::Middle,
                opacity: 1.0,
            });
        }
        (placement.content_rect, placement.content_opacity)
    } else {
        (inner, 1.0)
    };

    match field.field_type {
        FieldType::Text => {
            if !field.field_value.is_empty() {
                ops.push(DrawOp::Text {
                    rect: content_rect,
                    content: field.field_value.clone(),
                    font_size_pt: field.font_size_pt,
                    weight: field.font_weight,
                    color: color::parse_ink(&field.text_color),
                    align: field.text_align,
                    valign: field.vertical_align,
                    opacity: content_opacity,
                });
            }
        }
        // Blank fields get a ruled line to write on; the value is ignored.
        FieldType::Blank => {
            ops.push(DrawOp::FillRect {
                rect: crate::geometry::Rect::new(
                    content_rect.x,
                    content_rect.bottom() - RULE_WIDTH_MM,
                    content_rect.w,
                    RULE_WIDTH_MM,
                ),
                color: color::parse_ink(&field.text_color),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::LabelAnchor;

    fn template() -> LabelTemplate {
        let mut t = LabelTemplate::new("scene test");
        let mut f = LabelTemplateField::new(FieldType::Text);
        f.field_name = "asset".into();
        f.field_value = "PUMP-7".into();
        t.fields.push(f);
        t
    }

    fn text_ops(scene: &Scene) -> Vec<&DrawOp> {
        scene
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Text { .. }))
            .collect()
    }

    #[test]
    fn test_scene_has_background_qr_and_text() {
        let scene = build_scene(&template(), "tok-1").unwrap();
        assert!(matches!(scene.ops[0], DrawOp::FillRect { .. }));
        assert!(scene
            .ops
            .iter()
            .any(|op| matches!(op, DrawOp::QrModules { .. })));
        assert_eq!(text_ops(&scene).len(), 1);
    }

    #[test]
    fn test_empty_token_rejected() {
        assert!(build_scene(&template(), "   ").is_err());
    }

    #[test]
    fn test_blank_field_draws_no_value() {
        let mut t = template();
        t.fields[0].field_type = FieldType::Blank;
        t.fields[0].border_enabled = true;
        t.fields[0].border_width_mm = 0.3;
        let scene = build_scene(&t, "tok-1").unwrap();
        assert!(text_ops(&scene).is_empty());
        assert!(scene.ops.iter().any(|op| matches!(
            op,
            DrawOp::StrokeRect { width_mm, .. } if (*width_mm - 0.3).abs() < 1e-6
        )));
        // the write-on rule sits at the bottom of the content rect
        let inner = scene.layout.field_rects[0].inner;
        assert!(scene.ops.iter().any(|op| matches!(
            op,
            DrawOp::FillRect { rect, color } if *color == crate::color::BLACK
                && (rect.bottom() - inner.bottom()).abs() < 1e-4
                && rect.h < 1.0
        )));
    }

    #[test]
    fn test_caption_falls_back_to_field_name() {
        let mut t = template();
        t.fields[0].show_label = true;
        t.fields[0].label_text = String::new();
        let scene = build_scene(&t, "tok-1").unwrap();
        let texts = text_ops(&scene);
        assert_eq!(texts.len(), 2);
        assert!(texts.iter().any(|op| matches!(
            op,
            DrawOp::Text { content, .. } if content == "asset"
        )));
    }

    #[test]
    fn test_overlay_caption_dims_value_text() {
        let mut t = template();
        t.fields[0].show_label = true;
        t.fields[0].label_text = "asset id".into();
        t.fields[0].label_position = LabelAnchor::InsideCenterCenter;
        let scene = build_scene(&t, "tok-1").unwrap();
        let value = scene.ops.iter().find(|op| matches!(
            op,
            DrawOp::Text { content, .. } if content == "PUMP-7"
        ));
        match value {
            Some(DrawOp::Text { opacity, .. }) => {
                assert!((opacity - 0.35).abs() < 1e-6)
            }
            _ => panic!("value text missing"),
        }
    }

    #[test]
    fn test_qr_only_scene_has_no_field_ops() {
        let mut t = template();
        t.show_additional_info = false;
        let scene = build_scene(&t, "tok-1").unwrap();
        assert!(text_ops(&scene).is_empty());
        let (w, h) = scene.size_mm();
        assert_eq!(w, h);
    }
}
