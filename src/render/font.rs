//! Bitmap glyph generation for raster rendering.
//!
//! Uses the Spleen bitmap font family. Each glyph is taken from the
//! closest Spleen base size (6×12 or 12×24) and scaled to the requested
//! pixel cell with nearest neighbor, so text stays crisp at label DPI
//! without pulling in a full vector text stack.

use crate::template::FontWeight;
use spleen_font::{PSF2Font, FONT_12X24, FONT_6X12};

/// Pixel dimensions of one character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMetrics {
    pub width: usize,
    pub height: usize,
}

impl CellMetrics {
    /// Cell for a target glyph height in pixels. Spleen glyphs are half
    /// as wide as they are tall.
    pub fn for_px_height(px: f32) -> CellMetrics {
        let height = (px.round() as usize).max(4);
        CellMetrics {
            width: (height / 2).max(2),
            height,
        }
    }

    pub fn line_width(&self, text: &str) -> usize {
        self.width * text.chars().count()
    }
}

/// Generate a glyph bitmap for one character. Each byte is 0 (off) or
/// 1 (on), row-major, `cell.width * cell.height` long.
pub fn generate_glyph(ch: char, cell: CellMetrics, weight: FontWeight) -> Vec<u8> {
    let mut glyph = vec![0u8; cell.width * cell.height];

    // Pick the Spleen base closest to the target so small captions do
    // not alias away.
    let (data, base_w, base_h) = if cell.height <= 14 {
        (FONT_6X12, 6usize, 12usize)
    } else {
        (FONT_12X24, 12usize, 24usize)
    };

    // Font data is embedded and statically valid.
    let mut spleen = PSF2Font::new(data).unwrap();
    let utf8 = ch.to_string();

    if let Some(spleen_glyph) = spleen.glyph_for_utf8(utf8.as_bytes()) {
        let mut src = vec![0u8; base_w * base_h];
        for (row_y, row) in spleen_glyph.enumerate() {
            for (col_x, on) in row.enumerate() {
                if row_y < base_h && col_x < base_w {
                    src[row_y * base_w + col_x] = if on { 1 } else { 0 };
                }
            }
        }
        scale_bitmap(&src, base_w, base_h, &mut glyph, cell.width, cell.height);
    } else {
        // Unknown character: draw a box outline.
        draw_box(&mut glyph, cell.width, cell.height);
    }

    if weight == FontWeight::Bold {
        embolden(&mut glyph, cell.width, cell.height);
    }

    glyph
}

/// Scale a bitmap from src dimensions to dst dimensions using nearest neighbor.
fn scale_bitmap(src: &[u8], src_w: usize, src_h: usize, dst: &mut [u8], dst_w: usize, dst_h: usize) {
    for dy in 0..dst_h {
        for dx in 0..dst_w {
            let sx = dx * src_w / dst_w;
            let sy = dy * src_h / dst_h;
            let src_idx = sy * src_w + sx;
            let dst_idx = dy * dst_w + dx;
            if src_idx < src.len() && dst_idx < dst.len() {
                dst[dst_idx] = src[src_idx];
            }
        }
    }
}

/// Smear each on pixel one to the right. Standard bitmap-font bolding.
fn embolden(glyph: &mut [u8], width: usize, height: usize) {
    for y in 0..height {
        let row = y * width;
        for x in (1..width).rev() {
            if glyph[row + x - 1] != 0 {
                glyph[row + x] = 1;
            }
        }
    }
}

/// Draw a box outline in the glyph buffer.
fn draw_box(glyph: &mut [u8], width: usize, height: usize) {
    for x in 0..width {
        glyph[x] = 1;
        glyph[(height - 1) * width + x] = 1;
    }
    for y in 0..height {
        glyph[y * width] = 1;
        glyph[y * width + width - 1] = 1;
    }
}
