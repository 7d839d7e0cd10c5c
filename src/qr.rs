//! QR encoder boundary.
//!
//! The rest of the engine treats QR encoding as a black box that turns a
//! token into a boolean module matrix. Only this module touches the
//! `qrcode` crate; renderers just read `module(x, y)` and scale the grid
//! into whatever rectangle layout assigned.

use crate::error::EtiquetaError;
use qrcode::{Color, QrCode};

/// A square boolean module matrix (true = dark module).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrMatrix {
    size: usize,
    modules: Vec<bool>,
}

impl QrMatrix {
    /// Side length in modules.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the module at (x, y) is dark. Out-of-range reads are light.
    pub fn module(&self, x: usize, y: usize) -> bool {
        if x >= self.size || y >= self.size {
            return false;
        }
        self.modules[y * self.size + x]
    }

    /// Build directly from a row-major module list (tests, fixtures).
    pub fn from_modules(size: usize, modules: Vec<bool>) -> Self {
        debug_assert_eq!(modules.len(), size * size);
        Self { size, modules }
    }
}

/// Encode a token into a module matrix.
///
/// An unencodable token (empty after trimming, or beyond QR capacity) is a
/// render failure — in a batch this aborts the whole run.
pub fn encode(token: &str) -> Result<QrMatrix, EtiquetaError> {
    if token.trim().is_empty() {
        return Err(EtiquetaError::Render("cannot encode an empty token".into()));
    }

    let code = QrCode::new(token.as_bytes())
        .map_err(|e| EtiquetaError::Render(format!("QR encode failed for token: {e}")))?;

    let size = code.width();
    let modules = code
        .to_colors()
        .into_iter()
        .map(|c| c == Color::Dark)
        .collect();

    Ok(QrMatrix { size, modules })
}
