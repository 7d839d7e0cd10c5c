//! # Consistency Tests
//!
//! End-to-end checks across the whole pipeline: that the three render
//! targets agree on geometry, that layout invariants hold from the public
//! API, and that batch generation enforces its contract.

use etiqueta::batch;
use etiqueta::config::EngineConfig;
use etiqueta::layout::{resolve_layout, QR_FIELDS_GAP_MM};
use etiqueta::render::document::LabelPage;
use etiqueta::render::editor::EditorRenderer;
use etiqueta::render::preview::Preview;
use etiqueta::template::{
    FieldType, LabelAnchor, LabelTemplate, LabelTemplateField, LayoutDirection,
};
use etiqueta::units::{mm_to_points, points_to_mm, Resolution};
use etiqueta::EtiquetaError;

fn asset_template() -> LabelTemplate {
    let mut template = LabelTemplate::new("asset tag");
    let mut name = LabelTemplateField::new(FieldType::Text);
    name.field_name = "name".into();
    name.field_value = "Compressor 3".into();
    name.sort_order = 0;
    let mut serial = LabelTemplateField::new(FieldType::Text);
    serial.field_name = "serial".into();
    serial.field_value = "SN-1234".into();
    serial.sort_order = 1;
    template.fields.push(name);
    template.fields.push(serial);
    template
}

// ============================================================================
// Unit conversions
// ============================================================================

#[test]
fn conversion_roundtrips_through_public_api() {
    let res = Resolution::new(300.0, 2.5).unwrap();
    for mm in [0.0, 0.1, 7.3, 60.0, 210.0] {
        let back = res.px_to_mm(res.mm_to_px(mm));
        assert!((back - mm).abs() < 1e-3, "px roundtrip lost {mm}");
        let back = points_to_mm(mm_to_points(mm));
        assert!((back - mm).abs() < 1e-3, "pt roundtrip lost {mm}");
    }
}

// ============================================================================
// Cross-target geometry agreement
// ============================================================================

/// With zoom normalized, the raster targets and the document target must
/// place every rect edge at the same physical position, within one
/// device unit of their own resolution.
#[test]
fn targets_agree_on_qr_placement() {
    let template = asset_template();
    let layout = resolve_layout(&template);
    let res = Resolution::new(300.0, 1.0).unwrap();

    let px_per_mm = res.mm_to_px(1.0);
    let pt_per_mm = mm_to_points(1.0);

    for edge_mm in [
        layout.qr_rect.x,
        layout.qr_rect.y,
        layout.qr_rect.right(),
        layout.qr_rect.bottom(),
    ] {
        let via_px_mm = res.mm_to_px(edge_mm).round() / px_per_mm;
        let via_pt_mm = mm_to_points(edge_mm) / pt_per_mm;
        // one device pixel at 300 dpi is ~0.085 mm
        assert!(
            (via_px_mm - via_pt_mm).abs() <= 1.0 / px_per_mm,
            "edge {edge_mm}mm diverged: raster {via_px_mm} vs document {via_pt_mm}"
        );
    }
}

#[test]
fn editor_and_preview_share_geometry() {
    let template = asset_template();
    let config = EngineConfig::default();

    let editor = EditorRenderer::new(template.clone(), &config).unwrap();
    let preview = Preview::render(&template, "token-x", 4000, 4000, &config).unwrap();

    assert_eq!(editor.scene().layout.qr_rect, preview.layout().qr_rect);
    assert_eq!(
        editor.scene().layout.field_rects,
        preview.layout().field_rects
    );
}

// ============================================================================
// Layout invariants from the outside
// ============================================================================

#[test]
fn qr_only_label_is_square_everywhere() {
    let mut template = asset_template();
    template.show_additional_info = false;

    let layout = resolve_layout(&template);
    assert_eq!(layout.label_rect.w, layout.label_rect.h);

    let page = LabelPage::render(&template, "tok").unwrap();
    assert!((page.width_pt - page.height_pt).abs() < 1e-3);

    let preview = Preview::render(&template, "tok", 500, 500, &EngineConfig::default()).unwrap();
    assert_eq!(preview.image().width(), preview.image().height());
}

#[test]
fn row_reverse_swaps_blocks_not_field_order() {
    let mut template = asset_template();
    template.layout_direction = LayoutDirection::RowReverse;
    let layout = resolve_layout(&template);

    assert!(layout.fields_container_rect.x < layout.qr_rect.x);
    let name_rect = layout.field_rect(&template.fields[0].id).unwrap();
    let serial_rect = layout.field_rect(&template.fields[1].id).unwrap();
    assert!(name_rect.outer.y < serial_rect.outer.y);
}

#[test]
fn qr_and_fields_keep_their_gap() {
    let template = asset_template();
    let layout = resolve_layout(&template);
    let gap = layout.fields_container_rect.x - layout.qr_rect.right();
    assert!((gap - QR_FIELDS_GAP_MM).abs() < 1e-4);
}

#[test]
fn overflow_is_a_warning_not_an_error() {
    let mut template = asset_template();
    template.height_mm = 24.0;
    for field in &mut template.fields {
        field.height_mm = 30.0;
    }

    let layout = resolve_layout(&template);
    assert!(layout.has_overflow());

    // every target still renders
    let preview = Preview::render(&template, "tok", 400, 400, &EngineConfig::default());
    assert!(preview.is_ok());
    assert!(LabelPage::render(&template, "tok").is_ok());
}

// ============================================================================
// Caption anchors
// ============================================================================

#[test]
fn unknown_anchor_string_becomes_top_left() {
    let json = r#"{"field_type": "text", "label_position": "outside-somewhere"}"#;
    let field: LabelTemplateField = serde_json::from_str(json).unwrap();
    assert_eq!(field.label_position, LabelAnchor::InsideTopLeft);
}

#[test]
fn all_anchor_strings_roundtrip() {
    for anchor in LabelAnchor::ALL {
        let json = serde_json::to_string(&anchor).unwrap();
        let back: LabelAnchor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, anchor);
    }
}

// ============================================================================
// Batch generation
// ============================================================================

#[test]
fn batch_tokens_are_distinct() {
    let out = batch::generate(
        &asset_template(),
        100,
        &[],
        &EngineConfig::default(),
    )
    .unwrap();
    let unique: std::collections::BTreeSet<&str> =
        out.labels.iter().map(|l| l.token.as_str()).collect();
    assert_eq!(unique.len(), 100);
    assert_eq!(out.document.page_count(), 100);
}

#[test]
fn batch_quantity_limits() {
    let template = asset_template();
    let config = EngineConfig::default();

    assert!(matches!(
        batch::generate(&template, 0, &[], &config),
        Err(EtiquetaError::BatchQuantity { .. })
    ));
    assert!(matches!(
        batch::generate(&template, 1001, &[], &config),
        Err(EtiquetaError::BatchQuantity { .. })
    ));
    assert!(batch::generate(&template, 1, &[], &config).is_ok());
    assert!(batch::generate(&template, 1000, &[], &config).is_ok());
}

#[test]
fn batch_pdf_is_valid_header() {
    let out = batch::generate(
        &asset_template(),
        3,
        &[],
        &EngineConfig::default(),
    )
    .unwrap();
    let pdf = out.document.to_pdf().unwrap();
    assert_eq!(&pdf[..5], b"%PDF-");
}

// ============================================================================
// Template persistence
// ============================================================================

#[test]
fn template_json_roundtrip() {
    let template = asset_template();
    let json = serde_json::to_string(&template).unwrap();
    let back: LabelTemplate = serde_json::from_str(&json).unwrap();
    assert_eq!(back.id, template.id);
    assert_eq!(back.fields.len(), template.fields.len());
    assert_eq!(back.fields[1].field_value, "SN-1234");
}

#[test]
fn minimal_json_gets_defaults() {
    let template: LabelTemplate = serde_json::from_str(r#"{"name": "bare"}"#).unwrap();
    assert_eq!(template.width_mm, 60.0);
    assert_eq!(template.height_mm, 40.0);
    assert_eq!(template.qr_size_mm, 20.0);
    assert!(template.show_additional_info);
}
