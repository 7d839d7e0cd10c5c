//! Field types for the label template: the per-field struct, its styling
//! enums, and the nine-way caption anchor.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a field renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Printed text from `field_value`.
    #[default]
    Text,
    /// A ruled line for manual handwriting; `field_value` is ignored.
    Blank,
}

/// Horizontal text alignment inside a field's content rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical text alignment inside a field's content rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAlign {
    Top,
    #[default]
    Middle,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Vertical band of a compass anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorRow {
    Top,
    Center,
    Bottom,
}

/// Horizontal band of a compass anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorCol {
    Left,
    Center,
    Right,
}

/// One of nine fixed compass positions for a field's caption.
///
/// This is a closed enumeration. Unknown strings do not fail
/// deserialization: they fall back to `inside-top-left`, mirroring the
/// renderer-side recovery rule, so a template with a typo'd anchor still
/// lays out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelAnchor {
    #[default]
    InsideTopLeft,
    InsideTopCenter,
    InsideTopRight,
    InsideCenterLeft,
    InsideCenterCenter,
    InsideCenterRight,
    InsideBottomLeft,
    InsideBottomCenter,
    InsideBottomRight,
}

impl LabelAnchor {
    pub const ALL: [LabelAnchor; 9] = [
        LabelAnchor::InsideTopLeft,
        LabelAnchor::InsideTopCenter,
        LabelAnchor::InsideTopRight,
        LabelAnchor::InsideCenterLeft,
        LabelAnchor::InsideCenterCenter,
        LabelAnchor::InsideCenterRight,
        LabelAnchor::InsideBottomLeft,
        LabelAnchor::InsideBottomCenter,
        LabelAnchor::InsideBottomRight,
    ];

    /// Parse an anchor string, recovering unknown input to `inside-top-left`.
    pub fn parse(s: &str) -> Self {
        match s {
            "inside-top-left" => LabelAnchor::InsideTopLeft,
            "inside-top-center" => LabelAnchor::InsideTopCenter,
            "inside-top-right" => LabelAnchor::InsideTopRight,
            "inside-center-left" => LabelAnchor::InsideCenterLeft,
            "inside-center-center" => LabelAnchor::InsideCenterCenter,
            "inside-center-right" => LabelAnchor::InsideCenterRight,
            "inside-bottom-left" => LabelAnchor::InsideBottomLeft,
            "inside-bottom-center" => LabelAnchor::InsideBottomCenter,
            "inside-bottom-right" => LabelAnchor::InsideBottomRight,
            _ => LabelAnchor::InsideTopLeft,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LabelAnchor::InsideTopLeft => "inside-top-left",
            LabelAnchor::InsideTopCenter => "inside-top-center",
            LabelAnchor::InsideTopRight => "inside-top-right",
            LabelAnchor::InsideCenterLeft => "inside-center-left",
            LabelAnchor::InsideCenterCenter => "inside-center-center",
            LabelAnchor::InsideCenterRight => "inside-center-right",
            LabelAnchor::InsideBottomLeft => "inside-bottom-left",
            LabelAnchor::InsideBottomCenter => "inside-bottom-center",
            LabelAnchor::InsideBottomRight => "inside-bottom-right",
        }
    }

    pub fn row(&self) -> AnchorRow {
        match self {
            LabelAnchor::InsideTopLeft
            | LabelAnchor::InsideTopCenter
            | LabelAnchor::InsideTopRight => AnchorRow::Top,
            LabelAnchor::InsideCenterLeft
            | LabelAnchor::InsideCenterCenter
            | LabelAnchor::InsideCenterRight => AnchorRow::Center,
            LabelAnchor::InsideBottomLeft
            | LabelAnchor::InsideBottomCenter
            | LabelAnchor::InsideBottomRight => AnchorRow::Bottom,
        }
    }

    pub fn col(&self) -> AnchorCol {
        match self {
            LabelAnchor::InsideTopLeft
            | LabelAnchor::InsideCenterLeft
            | LabelAnchor::InsideBottomLeft => AnchorCol::Left,
            LabelAnchor::InsideTopCenter
            | LabelAnchor::InsideCenterCenter
            | LabelAnchor::InsideBottomCenter => AnchorCol::Center,
            LabelAnchor::InsideTopRight
            | LabelAnchor::InsideCenterRight
            | LabelAnchor::InsideBottomRight => AnchorCol::Right,
        }
    }
}

impl Serialize for LabelAnchor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LabelAnchor {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(LabelAnchor::parse(&s))
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn default_field_width() -> f32 {
    20.0
}

fn default_field_height() -> f32 {
    8.0
}

fn default_font_size() -> f32 {
    10.0
}

fn default_label_font_size() -> f32 {
    6.0
}

fn default_ink() -> String {
    "#000000".into()
}

fn default_fill() -> String {
    "transparent".into()
}

/// One content element inside the field stack.
///
/// Geometry is millimetres; font sizes are points. `position_x_mm` /
/// `position_y_mm` are a manual-override path: a field with **both** set is
/// placed at those label-relative coordinates and skipped by the flow
/// stack. All other fields flow in ascending `sort_order`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelTemplateField {
    #[serde(default = "new_id")]
    pub id: String,
    #[serde(default)]
    pub field_type: FieldType,
    /// Design-time name, not printed. Also the key for bound-data merge.
    #[serde(default)]
    pub field_name: String,
    /// Printed content for text fields; ignored for blank fields.
    #[serde(default)]
    pub field_value: String,

    #[serde(default)]
    pub position_x_mm: Option<f32>,
    #[serde(default)]
    pub position_y_mm: Option<f32>,
    #[serde(default = "default_field_width")]
    pub width_mm: f32,
    #[serde(default = "default_field_height")]
    pub height_mm: f32,

    #[serde(default = "default_font_size")]
    pub font_size_pt: f32,
    #[serde(default)]
    pub font_weight: FontWeight,
    #[serde(default = "default_ink")]
    pub text_color: String,
    #[serde(default)]
    pub text_align: TextAlign,
    #[serde(default)]
    pub vertical_align: VerticalAlign,

    #[serde(default = "default_fill")]
    pub background_color: String,
    #[serde(default)]
    pub border_enabled: bool,
    #[serde(default)]
    pub border_width_mm: f32,
    #[serde(default = "default_ink")]
    pub border_color: String,

    #[serde(default)]
    pub padding_top_mm: f32,
    #[serde(default)]
    pub padding_right_mm: f32,
    #[serde(default)]
    pub padding_bottom_mm: f32,
    #[serde(default)]
    pub padding_left_mm: f32,

    #[serde(default)]
    pub show_label: bool,
    #[serde(default)]
    pub label_text: String,
    #[serde(default)]
    pub label_position: LabelAnchor,
    #[serde(default = "default_label_font_size")]
    pub label_font_size_pt: f32,
    #[serde(default = "default_ink")]
    pub label_color: String,

    /// Unique within a template; determines stacking order in flow mode.
    #[serde(default)]
    pub sort_order: u32,
    /// Design-time hint only; the engine never enforces it.
    #[serde(default)]
    pub is_required: bool,
}

impl LabelTemplateField {
    /// Create a field with a generated id and default geometry/style.
    pub fn new(field_type: FieldType) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            field_type,
            field_name: String::new(),
            field_value: String::new(),
            position_x_mm: None,
            position_y_mm: None,
            width_mm: default_field_width(),
            height_mm: default_field_height(),
            font_size_pt: default_font_size(),
            font_weight: FontWeight::Normal,
            text_color: default_ink(),
            text_align: TextAlign::Left,
            vertical_align: VerticalAlign::Middle,
            background_color: default_fill(),
            border_enabled: false,
            border_width_mm: 0.0,
            border_color: default_ink(),
            padding_top_mm: 0.0,
            padding_right_mm: 0.0,
            padding_bottom_mm: 0.0,
            padding_left_mm: 0.0,
            show_label: false,
            label_text: String::new(),
            label_position: LabelAnchor::InsideTopLeft,
            label_font_size_pt: default_label_font_size(),
            label_color: default_ink(),
            sort_order: 0,
            is_required: false,
        }
    }

    pub fn padding(&self) -> crate::geometry::Insets {
        crate::geometry::Insets::new(
            self.padding_top_mm,
            self.padding_right_mm,
            self.padding_bottom_mm,
            self.padding_left_mm,
        )
    }

    /// Border width that actually draws (zero when the border is disabled).
    pub fn effective_border_width(&self) -> f32 {
        if self.border_enabled {
            self.border_width_mm
        } else {
            0.0
        }
    }

    /// True when this field opts out of the flow stack.
    pub fn is_manually_placed(&self) -> bool {
        self.position_x_mm.is_some() && self.position_y_mm.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_parse_all_nine() {
        for anchor in LabelAnchor::ALL {
            assert_eq!(LabelAnchor::parse(anchor.as_str()), anchor);
        }
    }

    #[test]
    fn test_anchor_unknown_falls_back() {
        assert_eq!(LabelAnchor::parse("outside-top-left"), LabelAnchor::InsideTopLeft);
        assert_eq!(LabelAnchor::parse(""), LabelAnchor::InsideTopLeft);
        assert_eq!(LabelAnchor::parse("inside-middle-left"), LabelAnchor::InsideTopLeft);
    }

    #[test]
    fn test_anchor_serde_roundtrip() {
        let json = serde_json::to_string(&LabelAnchor::InsideBottomRight).unwrap();
        assert_eq!(json, "\"inside-bottom-right\"");
        let back: LabelAnchor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, LabelAnchor::InsideBottomRight);
    }

    #[test]
    fn test_anchor_unknown_deserializes_to_top_left() {
        let anchor: LabelAnchor = serde_json::from_str("\"spinning-wildly\"").unwrap();
        assert_eq!(anchor, LabelAnchor::InsideTopLeft);
    }

    #[test]
    fn test_anchor_bands() {
        assert_eq!(LabelAnchor::InsideCenterRight.row(), AnchorRow::Center);
        assert_eq!(LabelAnchor::InsideCenterRight.col(), AnchorCol::Right);
        assert_eq!(LabelAnchor::InsideBottomCenter.row(), AnchorRow::Bottom);
        assert_eq!(LabelAnchor::InsideBottomCenter.col(), AnchorCol::Center);
    }

    #[test]
    fn test_new_field_has_id_and_defaults() {
        let a = LabelTemplateField::new(FieldType::Text);
        let b = LabelTemplateField::new(FieldType::Text);
        assert_ne!(a.id, b.id);
        assert!(!a.is_manually_placed());
        assert_eq!(a.width_mm, 20.0);
    }

    #[test]
    fn test_manual_placement_needs_both_coordinates() {
        let mut f = LabelTemplateField::new(FieldType::Text);
        f.position_x_mm = Some(5.0);
        assert!(!f.is_manually_placed());
        f.position_y_mm = Some(3.0);
        assert!(f.is_manually_placed());
    }

    #[test]
    fn test_effective_border_width() {
        let mut f = LabelTemplateField::new(FieldType::Text);
        f.border_width_mm = 0.5;
        assert_eq!(f.effective_border_width(), 0.0);
        f.border_enabled = true;
        assert_eq!(f.effective_border_width(), 0.5);
    }

    #[test]
    fn test_field_minimal_json() {
        let json = r#"{"id": "f1", "field_type": "blank"}"#;
        let f: LabelTemplateField = serde_json::from_str(json).unwrap();
        assert_eq!(f.field_type, FieldType::Blank);
        assert_eq!(f.vertical_align, VerticalAlign::Middle);
        assert_eq!(f.label_position, LabelAnchor::InsideTopLeft);
    }
}
