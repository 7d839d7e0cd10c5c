//! Scene rasterizer shared by the editor and preview targets.
//!
//! Projects millimetre draw ops into device pixels through a
//! [`Resolution`] and composites them onto an `image::RgbaImage` with
//! straight-alpha blending. Everything outside the canvas (overflowing
//! content, strokes at the label edge) is clipped per pixel.

use image::RgbaImage;

use crate::color::Rgba;
use crate::geometry::Rect;
use crate::render::font::{self, CellMetrics};
use crate::scene::DrawOp;
use crate::template::{FontWeight, TextAlign, VerticalAlign};
use crate::units::{points_to_mm, Resolution};

/// Rasterize draw ops onto a fresh white canvas sized for `size_mm`.
pub fn render_ops(ops: &[DrawOp], size_mm: (f32, f32), res: &Resolution) -> RgbaImage {
    let width = (res.mm_to_px(size_mm.0).ceil() as u32).max(1);
    let height = (res.mm_to_px(size_mm.1).ceil() as u32).max(1);
    let mut canvas = RgbaImage::from_pixel(width, height, image::Rgba([255, 255, 255, 255]));

    for op in ops {
        match op {
            DrawOp::FillRect { rect, color } => {
                fill_rect(&mut canvas, res, *rect, *color, 1.0);
            }
            DrawOp::StrokeRect {
                rect,
                width_mm,
                color,
            } => {
                // Stroke centered on the edge: four filled bands.
                let half = width_mm / 2.0;
                let w = *width_mm;
                let bands = [
                    Rect::new(rect.x - half, rect.y - half, rect.w + w, w),
                    Rect::new(rect.x - half, rect.bottom() - half, rect.w + w, w),
                    Rect::new(rect.x - half, rect.y - half, w, rect.h + w),
                    Rect::new(rect.right() - half, rect.y - half, w, rect.h + w),
                ];
                for band in bands {
                    fill_rect(&mut canvas, res, band, *color, 1.0);
                }
            }
            DrawOp::QrModules { rect, matrix, dark } => {
                let (x0, y0, x1, y1) = px_bounds(res, *rect);
                let n = matrix.size() as i64;
                if n == 0 || x1 <= x0 || y1 <= y0 {
                    continue;
                }
                let span_x = (x1 - x0) as i64;
                let span_y = (y1 - y0) as i64;
                // Pixel-driven mapping so module edges never leave gaps.
                for py in y0.max(0)..y1.min(canvas.height() as i64) {
                    for px in x0.max(0)..x1.min(canvas.width() as i64) {
                        let mx = ((px - x0) * n / span_x) as usize;
                        let my = ((py - y0) * n / span_y) as usize;
                        if matrix.module(mx, my) {
                            blend_px(&mut canvas, px, py, *dark, 1.0);
                        }
                    }
                }
            }
            DrawOp::Text {
                rect,
                content,
                font_size_pt,
                weight,
                color,
                align,
                valign,
                opacity,
            } => {
                draw_text(
                    &mut canvas,
                    res,
                    *rect,
                    content,
                    *font_size_pt,
                    *weight,
                    *color,
                    *align,
                    *valign,
                    *opacity,
                );
            }
        }
    }

    canvas
}

fn px_bounds(res: &Resolution, rect: Rect) -> (i64, i64, i64, i64) {
    (
        res.mm_to_px(rect.x).round() as i64,
        res.mm_to_px(rect.y).round() as i64,
        res.mm_to_px(rect.right()).round() as i64,
        res.mm_to_px(rect.bottom()).round() as i64,
    )
}

fn fill_rect(canvas: &mut RgbaImage, res: &Resolution, rect: Rect, color: Rgba, opacity: f32) {
    let (x0, y0, x1, y1) = px_bounds(res, rect);
    for py in y0.max(0)..y1.min(canvas.height() as i64) {
        for px in x0.max(0)..x1.min(canvas.width() as i64) {
            blend_px(canvas, px, py, color, opacity);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_text(
    canvas: &mut RgbaImage,
    res: &Resolution,
    rect: Rect,
    content: &str,
    font_size_pt: f32,
    weight: FontWeight,
    color: Rgba,
    align: TextAlign,
    valign: VerticalAlign,
    opacity: f32,
) {
    let cell = CellMetrics::for_px_height(res.mm_to_px(points_to_mm(font_size_pt)));
    let lines: Vec<&str> = content.lines().collect();
    if lines.is_empty() {
        return;
    }

    let (rx0, ry0, rx1, ry1) = px_bounds(res, rect);
    let total_h = (cell.height * lines.len()) as i64;
    let mut y = match valign {
        VerticalAlign::Top => ry0,
        VerticalAlign::Middle => ry0 + ((ry1 - ry0) - total_h) / 2,
        VerticalAlign::Bottom => ry1 - total_h,
    };

    for line in lines {
        let line_w = cell.line_width(line) as i64;
        let mut x = match align {
            TextAlign::Left => rx0,
            TextAlign::Center => rx0 + ((rx1 - rx0) - line_w) / 2,
            TextAlign::Right => rx1 - line_w,
        };
        for ch in line.chars() {
            let glyph = font::generate_glyph(ch, cell, weight);
            blit_glyph(canvas, &glyph, cell, x, y, color, opacity, (rx0, ry0, rx1, ry1));
            x += cell.width as i64;
        }
        y += cell.height as i64;
    }
}

#[allow(clippy::too_many_arguments)]
fn blit_glyph(
    canvas: &mut RgbaImage,
    glyph: &[u8],
    cell: CellMetrics,
    x0: i64,
    y0: i64,
    color: Rgba,
    opacity: f32,
    clip: (i64, i64, i64, i64),
) {
    for gy in 0..cell.height {
        for gx in 0..cell.width {
            if glyph[gy * cell.width + gx] == 0 {
                continue;
            }
            let px = x0 + gx as i64;
            let py = y0 + gy as i64;
            // Text outside its box is clipped, not reflowed.
            if px < clip.0 || px >= clip.2 || py < clip.1 || py >= clip.3 {
                continue;
            }
            blend_px(canvas, px, py, color, opacity);
        }
    }
}

/// Straight-alpha source-over blend of one pixel.
fn blend_px(canvas: &mut RgbaImage, x: i64, y: i64, color: Rgba, opacity: f32) {
    if x < 0 || y < 0 || x >= canvas.width() as i64 || y >= canvas.height() as i64 {
        return;
    }
    let alpha = (color[3] as f32 / 255.0) * opacity.clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return;
    }
    let dst = canvas.get_pixel_mut(x as u32, y as u32);
    for c in 0..3 {
        let src = color[c] as f32;
        let old = dst.0[c] as f32;
        dst.0[c] = (src * alpha + old * (1.0 - alpha)).round() as u8;
    }
    let old_a = dst.0[3] as f32 / 255.0;
    dst.0[3] = ((alpha + old_a * (1.0 - alpha)) * 255.0).round() as u8;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color;

    fn res() -> Resolution {
        // 25.4 dpi → 1 px per mm, keeps expectations exact
        Resolution::new(25.4, 1.0).unwrap()
    }

    #[test]
    fn test_canvas_size_from_mm() {
        let img = render_ops(&[], (10.0, 5.0), &res());
        assert_eq!((img.width(), img.height()), (10, 5));
    }

    #[test]
    fn test_fill_rect_paints_inside_only() {
        let ops = [DrawOp::FillRect {
            rect: Rect::new(2.0, 2.0, 4.0, 4.0),
            color: color::BLACK,
        }];
        let img = render_ops(&ops, (10.0, 10.0), &res());
        assert_eq!(img.get_pixel(3, 3).0, [0, 0, 0, 255]);
        assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(7, 7).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_opacity_blend_is_partial() {
        let ops = [DrawOp::Text {
            rect: Rect::new(0.0, 0.0, 40.0, 30.0),
            content: "█".into(),
            font_size_pt: 60.0,
            weight: FontWeight::Normal,
            color: color::BLACK,
            align: TextAlign::Left,
            valign: VerticalAlign::Top,
            opacity: 0.5,
        }];
        let img = render_ops(&ops, (40.0, 30.0), &res());
        // Somewhere a pixel is grey, neither pure black nor white
        let grey = img
            .pixels()
            .any(|p| p.0[0] > 50 && p.0[0] < 200);
        assert!(grey);
    }

    #[test]
    fn test_qr_modules_cover_rect() {
        let matrix = crate::qr::encode("raster test").unwrap();
        let ops = [DrawOp::QrModules {
            rect: Rect::new(0.0, 0.0, 20.0, 20.0),
            matrix,
            dark: color::BLACK,
        }];
        let img = render_ops(&ops, (20.0, 20.0), &res());
        // Finder pattern corner is dark
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
        let dark = img.pixels().filter(|p| p.0[0] == 0).count();
        let total = (img.width() * img.height()) as usize;
        assert!(dark * 10 > total * 2, "QR should darken a good share of the rect");
    }

    #[test]
    fn test_text_clipped_to_rect() {
        let ops = [DrawOp::Text {
            rect: Rect::new(5.0, 5.0, 3.0, 3.0),
            content: "WWWWWWWWWW".into(),
            font_size_pt: 30.0,
            weight: FontWeight::Normal,
            color: color::BLACK,
            align: TextAlign::Left,
            valign: VerticalAlign::Top,
            opacity: 1.0,
        }];
        let img = render_ops(&ops, (20.0, 20.0), &res());
        for (x, y, p) in img.enumerate_pixels() {
            let inside = (5..8).contains(&x) && (5..8).contains(&y);
            if !inside {
                assert_eq!(p.0, [255, 255, 255, 255], "ink leaked to ({x},{y})");
            }
        }
    }

    #[test]
    fn test_stroke_centered_on_edge() {
        let ops = [DrawOp::StrokeRect {
            rect: Rect::new(4.0, 4.0, 8.0, 8.0),
            width_mm: 2.0,
            color: color::BLACK,
        }];
        let img = render_ops(&ops, (16.0, 16.0), &res());
        // 2mm stroke on the x=4 edge spans x in [3, 5)
        assert_eq!(img.get_pixel(3, 8).0, [0, 0, 0, 255]);
        assert_eq!(img.get_pixel(4, 8).0, [0, 0, 0, 255]);
        assert_eq!(img.get_pixel(2, 8).0, [255, 255, 255, 255]);
        // interior stays clear
        assert_eq!(img.get_pixel(8, 8).0, [255, 255, 255, 255]);
    }
}
