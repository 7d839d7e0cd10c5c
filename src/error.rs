//! # Error Types
//!
//! This module defines error types used throughout the etiqueta library.
//!
//! Only unrecoverable conditions are errors. A layout overflow is a
//! [`crate::layout::LayoutWarning`] carried in the layout output, and an
//! unknown label anchor string falls back to `inside-top-left` during
//! parsing — neither ever surfaces here.

use thiserror::Error;

/// Main error type for etiqueta operations
#[derive(Debug, Error)]
pub enum EtiquetaError {
    /// Invalid configuration (dpi, zoom) — rejected before layout runs
    #[error("Configuration error: {0}")]
    Config(String),

    /// Batch quantity outside the allowed range — rejected before any rendering
    #[error("quantity must be between 1 and {max}, got {requested}")]
    BatchQuantity { requested: usize, max: usize },

    /// A render target failed to draw — fatal to the entire batch
    #[error("Render error: {0}")]
    Render(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
