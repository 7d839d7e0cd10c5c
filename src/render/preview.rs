//! Static raster preview.
//!
//! One-shot rendering of a template into an `image::RgbaImage` that fits
//! a caller-supplied pixel budget. The scale factor is whatever fits the
//! budget, capped at the configured maximum so tiny labels do not blow up
//! into megapixel previews.

use std::io::Cursor;

use image::RgbaImage;

use crate::config::EngineConfig;
use crate::error::EtiquetaError;
use crate::layout::Layout;
use crate::render::raster::render_ops;
use crate::render::{hit_test_mm, HitTarget};
use crate::scene::build_scene;
use crate::template::LabelTemplate;
use crate::units::Resolution;

/// A rendered preview plus the projection used to produce it, so pixel
/// coordinates can be mapped back onto the label.
pub struct Preview {
    image: RgbaImage,
    resolution: Resolution,
    layout: Layout,
}

impl Preview {
    /// Render `template` with `token` into at most `max_w_px` by
    /// `max_h_px` pixels at the configured DPI.
    pub fn render(
        template: &LabelTemplate,
        token: &str,
        max_w_px: u32,
        max_h_px: u32,
        config: &EngineConfig,
    ) -> Result<Preview, EtiquetaError> {
        config.validate()?;
        if max_w_px == 0 || max_h_px == 0 {
            return Err(EtiquetaError::Config(
                "preview pixel budget must be positive".into(),
            ));
        }

        let scene = build_scene(template, token)?;
        let (w_mm, h_mm) = scene.size_mm();

        let base = Resolution::new(config.dpi, 1.0)?;
        let base_w = base.mm_to_px(w_mm).max(1.0);
        let base_h = base.mm_to_px(h_mm).max(1.0);
        let fit = (max_w_px as f32 / base_w).min(max_h_px as f32 / base_h);
        let scale = fit.min(config.zoom_cap_max);
        let resolution = base.with_zoom(scale)?;

        let image = render_ops(&scene.ops, (w_mm, h_mm), &resolution);
        Ok(Preview {
            image,
            resolution,
            layout: scene.layout,
        })
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn scale(&self) -> f32 {
        self.resolution.zoom()
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Encode the preview as PNG.
    pub fn png_bytes(&self) -> Result<Vec<u8>, EtiquetaError> {
        let mut bytes = Cursor::new(Vec::new());
        self.image
            .write_to(&mut bytes, image::ImageFormat::Png)
            .map_err(|e| EtiquetaError::Render(format!("PNG encoding failed: {e}")))?;
        Ok(bytes.into_inner())
    }

    /// Topmost element under a preview pixel.
    pub fn hit_test(&self, x_px: f32, y_px: f32) -> Option<HitTarget> {
        hit_test_mm(
            &self.layout,
            self.resolution.px_to_mm(x_px),
            self.resolution.px_to_mm(y_px),
        )
    }
}
