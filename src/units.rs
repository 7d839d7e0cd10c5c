//! # Unit Conversion
//!
//! The single conversion family between millimetres, device pixels, and
//! print points. Every rectangle any render target draws is projected
//! through this module — no target carries its own conversion constant.
//!
//! Raster targets (editor, preview) convert through a validated
//! [`Resolution`] (dpi + zoom). The document target converts through
//! [`mm_to_points`] and never sees a zoom factor: print output is
//! resolution-independent.

use crate::error::EtiquetaError;

/// Millimetres per inch.
pub const MM_PER_INCH: f32 = 25.4;

/// PostScript points per inch.
pub const POINTS_PER_INCH: f32 = 72.0;

/// A validated raster resolution: reference dpi plus a zoom factor.
///
/// Construction rejects non-positive or non-finite values, so layout code
/// downstream never has to re-check. Zoom is a pure multiplicative factor;
/// changing it re-projects existing millimetre geometry without touching
/// template data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    dpi: f32,
    zoom: f32,
}

impl Resolution {
    /// Create a resolution, validating both dpi and zoom.
    pub fn new(dpi: f32, zoom: f32) -> Result<Self, EtiquetaError> {
        if !dpi.is_finite() || dpi <= 0.0 {
            return Err(EtiquetaError::Config(format!(
                "dpi must be a positive finite number, got {dpi}"
            )));
        }
        if !zoom.is_finite() || zoom <= 0.0 {
            return Err(EtiquetaError::Config(format!(
                "zoom must be a positive finite number, got {zoom}"
            )));
        }
        Ok(Self { dpi, zoom })
    }

    pub fn dpi(&self) -> f32 {
        self.dpi
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Same dpi, different zoom. Re-validates.
    pub fn with_zoom(&self, zoom: f32) -> Result<Self, EtiquetaError> {
        Self::new(self.dpi, zoom)
    }

    /// Millimetres to device pixels: `mm * (dpi / 25.4) * zoom`.
    pub fn mm_to_px(&self, mm: f32) -> f32 {
        mm * (self.dpi / MM_PER_INCH) * self.zoom
    }

    /// Device pixels back to millimetres (inverse of [`Self::mm_to_px`]).
    pub fn px_to_mm(&self, px: f32) -> f32 {
        px / (self.dpi / MM_PER_INCH) / self.zoom
    }
}

/// Millimetres to print points: `mm * 72 / 25.4`. No zoom, ever.
pub fn mm_to_points(mm: f32) -> f32 {
    mm * POINTS_PER_INCH / MM_PER_INCH
}

/// Print points back to millimetres. Also how font sizes (specified in
/// points) enter millimetre layout space.
pub fn points_to_mm(pt: f32) -> f32 {
    pt * MM_PER_INCH / POINTS_PER_INCH
}
