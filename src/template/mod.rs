//! # Label Template Model
//!
//! The design-time description of one label type: physical size, layout
//! direction, QR sizing, box styling, and the ordered field list. All
//! types derive `Serialize + Deserialize` so the same structs work for
//! Rust API construction and for the JSON persistence boundary.
//!
//! Templates are read-only inputs everywhere downstream: the layout
//! engine, the render targets, and the batch generator never mutate one.
//! Interactive mutation goes through [`TemplateEditSession`].

mod field;
mod session;

pub use field::{
    AnchorCol, AnchorRow, FieldType, FontWeight, LabelAnchor, LabelTemplateField, TextAlign,
    VerticalAlign,
};
pub use session::TemplateEditSession;

use crate::geometry::Insets;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Physical page orientation. Landscape swaps the declared width/height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Flow order of the QR block vs the field stack.
///
/// The reverse variants swap only which of the two items draws first on
/// the main axis; they never reorder the fields inside the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutDirection {
    #[default]
    Row,
    RowReverse,
    Column,
    ColumnReverse,
}

impl LayoutDirection {
    pub fn is_row_like(&self) -> bool {
        matches!(self, LayoutDirection::Row | LayoutDirection::RowReverse)
    }

    pub fn is_reversed(&self) -> bool {
        matches!(
            self,
            LayoutDirection::RowReverse | LayoutDirection::ColumnReverse
        )
    }
}

/// Cross-axis alignment of the QR block and the field stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemsAlignment {
    #[default]
    Start,
    Center,
    End,
}

/// QR placement inside the label — only meaningful in QR-only mode, where
/// padding may leave the inner area larger than the symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QrPosition {
    #[default]
    Center,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Left,
    Right,
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn default_width() -> f32 {
    60.0
}

fn default_height() -> f32 {
    40.0
}

fn default_dpi() -> f32 {
    300.0
}

fn default_qr_size() -> f32 {
    20.0
}

fn default_true() -> bool {
    true
}

fn default_fill() -> String {
    "#ffffff".into()
}

fn default_ink() -> String {
    "#000000".into()
}

fn default_padding() -> f32 {
    2.0
}

fn default_field_gap() -> f32 {
    1.5
}

/// The design-time description of one label type.
///
/// Invariant: when `show_additional_info` is false the label is forced
/// square around the QR symbol and the field list is ignored by layout
/// (but stays persisted for later re-enabling).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelTemplate {
    #[serde(default = "new_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,

    #[serde(default = "default_width")]
    pub width_mm: f32,
    #[serde(default = "default_height")]
    pub height_mm: f32,
    #[serde(default)]
    pub orientation: Orientation,
    /// Reference resolution for raster/print output.
    #[serde(default = "default_dpi")]
    pub dpi: f32,

    #[serde(default)]
    pub layout_direction: LayoutDirection,
    #[serde(default)]
    pub items_alignment: ItemsAlignment,
    #[serde(default)]
    pub qr_position: QrPosition,
    #[serde(default = "default_qr_size")]
    pub qr_size_mm: f32,
    /// False forces QR-only square mode.
    #[serde(default = "default_true")]
    pub show_additional_info: bool,

    #[serde(default = "default_fill")]
    pub background_color: String,
    #[serde(default)]
    pub border_enabled: bool,
    #[serde(default)]
    pub border_width_mm: f32,
    #[serde(default = "default_ink")]
    pub border_color: String,

    #[serde(default = "default_padding")]
    pub padding_top_mm: f32,
    #[serde(default = "default_padding")]
    pub padding_right_mm: f32,
    #[serde(default = "default_padding")]
    pub padding_bottom_mm: f32,
    #[serde(default = "default_padding")]
    pub padding_left_mm: f32,

    /// Spacing between stacked fields, mm.
    #[serde(default = "default_field_gap")]
    pub field_vertical_gap_mm: f32,

    #[serde(default)]
    pub fields: Vec<LabelTemplateField>,
}

impl Default for LabelTemplate {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: String::new(),
            width_mm: default_width(),
            height_mm: default_height(),
            orientation: Orientation::Portrait,
            dpi: default_dpi(),
            layout_direction: LayoutDirection::Row,
            items_alignment: ItemsAlignment::Start,
            qr_position: QrPosition::Center,
            qr_size_mm: default_qr_size(),
            show_additional_info: true,
            background_color: default_fill(),
            border_enabled: false,
            border_width_mm: 0.0,
            border_color: default_ink(),
            padding_top_mm: default_padding(),
            padding_right_mm: default_padding(),
            padding_bottom_mm: default_padding(),
            padding_left_mm: default_padding(),
            field_vertical_gap_mm: default_field_gap(),
            fields: Vec::new(),
        }
    }
}

impl LabelTemplate {
    /// Create an empty template with defaults and a generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn padding(&self) -> Insets {
        Insets::new(
            self.padding_top_mm,
            self.padding_right_mm,
            self.padding_bottom_mm,
            self.padding_left_mm,
        )
    }

    pub fn effective_border_width(&self) -> f32 {
        if self.border_enabled {
            self.border_width_mm
        } else {
            0.0
        }
    }

    /// Declared size with orientation applied (landscape swaps the axes).
    pub fn effective_size_mm(&self) -> (f32, f32) {
        match self.orientation {
            Orientation::Portrait => (self.width_mm, self.height_mm),
            Orientation::Landscape => (self.height_mm, self.width_mm),
        }
    }

    /// Fields participating in the flow stack, ascending `sort_order`.
    pub fn flow_fields(&self) -> Vec<&LabelTemplateField> {
        let mut fields: Vec<&LabelTemplateField> = self
            .fields
            .iter()
            .filter(|f| !f.is_manually_placed())
            .collect();
        fields.sort_by_key(|f| f.sort_order);
        fields
    }

    /// Manually placed fields (absolute override path), ascending `sort_order`.
    pub fn manual_fields(&self) -> Vec<&LabelTemplateField> {
        let mut fields: Vec<&LabelTemplateField> = self
            .fields
            .iter()
            .filter(|f| f.is_manually_placed())
            .collect();
        fields.sort_by_key(|f| f.sort_order);
        fields
    }

    pub fn field(&self, id: &str) -> Option<&LabelTemplateField> {
        self.fields.iter().find(|f| f.id == id)
    }
}
