//! # Etiqueta - QR Label Template Engine
//!
//! Etiqueta is a Rust library for designing and rendering QR code label
//! templates. A template declares a label's physical size, a QR block,
//! and a stack of data fields; one layout engine resolves everything in
//! millimetres and three targets render the result:
//!
//! - **Editor**: interactive raster with hit-testing and live zoom
//! - **Preview**: one-shot raster scaled to a pixel budget
//! - **Document**: print-resolution pages in points, batched into a PDF
//!
//! ## Quick Start
//!
//! ```
//! use etiqueta::batch;
//! use etiqueta::config::EngineConfig;
//! use etiqueta::template::{FieldType, LabelTemplate, LabelTemplateField};
//!
//! // Design a template
//! let mut template = LabelTemplate::new("Asset tag");
//! let mut field = LabelTemplateField::new(FieldType::Text);
//! field.field_name = "asset".into();
//! field.field_value = "Pump 7".into();
//! template.fields.push(field);
//!
//! // Generate a batch of 50 labels, each with its own QR token
//! let config = EngineConfig::default();
//! let output = batch::generate(&template, 50, &[], &config)?;
//! let pdf_bytes = output.document.to_pdf()?;
//! assert_eq!(output.labels.len(), 50);
//! # let _ = pdf_bytes;
//! # Ok::<(), etiqueta::error::EtiquetaError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`template`] | Template and field data model, edit sessions |
//! | [`layout`] | Millimetre layout resolution and caption anchoring |
//! | [`scene`] | Shared draw-op list consumed by all targets |
//! | [`render`] | Editor, preview, and document targets |
//! | [`batch`] | All-or-nothing batch generation |
//! | [`units`] | mm / pixel / point conversions |
//! | [`config`] | Engine-wide tunables |
//! | [`error`] | Error types |
//!
//! All geometry decisions happen once, in millimetres, before any target
//! runs; the targets only project units. That is what keeps the editor,
//! the preview, and the printed page in agreement.

pub mod batch;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod qr;
pub mod render;
pub mod scene;
pub mod template;
pub mod units;

// Re-exports for convenience
pub use config::EngineConfig;
pub use error::EtiquetaError;
pub use layout::{resolve_layout, Layout, LayoutWarning};
pub use template::{LabelTemplate, LabelTemplateField, TemplateEditSession};
