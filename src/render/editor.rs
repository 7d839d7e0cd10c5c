//! Interactive editor target.
//!
//! Wraps a [`TemplateEditSession`] and keeps a resolved [`Scene`] in sync
//! with it. Mutations go through [`EditorRenderer::edit`], which re-runs
//! layout and scene building; zoom changes only re-project the existing
//! millimetre geometry, so panning and zooming never shift rect
//! boundaries relative to each other.

use image::RgbaImage;

use crate::color::Rgba;
use crate::config::EngineConfig;
use crate::error::EtiquetaError;
use crate::render::raster::render_ops;
use crate::render::{hit_test_mm, HitTarget, SAMPLE_TOKEN};
use crate::scene::{build_scene, DrawOp, Scene};
use crate::template::{LabelTemplate, TemplateEditSession};
use crate::units::Resolution;

/// Selection outline color.
const SELECTION_COLOR: Rgba = [59, 130, 246, 255];
const SELECTION_STROKE_MM: f32 = 0.4;

pub struct EditorRenderer {
    session: TemplateEditSession,
    resolution: Resolution,
    scene: Scene,
}

impl EditorRenderer {
    pub fn new(template: LabelTemplate, config: &EngineConfig) -> Result<Self, EtiquetaError> {
        config.validate()?;
        let session = TemplateEditSession::new(template);
        let resolution = Resolution::new(config.dpi, 1.0)?;
        let scene = build_scene(session.template(), SAMPLE_TOKEN)?;
        Ok(Self {
            session,
            resolution,
            scene,
        })
    }

    pub fn session(&self) -> &TemplateEditSession {
        &self.session
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn zoom(&self) -> f32 {
        self.resolution.zoom()
    }

    /// Change zoom. The scene is untouched; only projection changes.
    pub fn set_zoom(&mut self, zoom: f32) -> Result<(), EtiquetaError> {
        self.resolution = self.resolution.with_zoom(zoom)?;
        Ok(())
    }

    /// Mutate the template through the session and rebuild the scene.
    /// Every edit sees fresh layout, so stale geometry cannot be drawn.
    pub fn edit<F>(&mut self, f: F) -> Result<(), EtiquetaError>
    where
        F: FnOnce(&mut TemplateEditSession),
    {
        f(&mut self.session);
        self.scene = build_scene(self.session.template(), SAMPLE_TOKEN)?;
        Ok(())
    }

    /// Rasterize the current scene, with a highlight ring around the
    /// selected field.
    pub fn render(&self) -> RgbaImage {
        let mut ops = self.scene.ops.clone();
        if let Some(selected) = self.session.selection() {
            if let Some(field) = self.scene.layout.field_rect(selected) {
                ops.push(DrawOp::StrokeRect {
                    rect: field.outer,
                    width_mm: SELECTION_STROKE_MM,
                    color: SELECTION_COLOR,
                });
            }
        }
        render_ops(&ops, self.scene.size_mm(), &self.resolution)
    }

    /// Topmost element under a device-pixel position.
    pub fn hit_test(&self, x_px: f32, y_px: f32) -> Option<HitTarget> {
        hit_test_mm(
            &self.scene.layout,
            self.resolution.px_to_mm(x_px),
            self.resolution.px_to_mm(y_px),
        )
    }

    /// Click-to-select: selects the field under the pointer, clears the
    /// selection when the click lands anywhere else.
    pub fn select_at(&mut self, x_px: f32, y_px: f32) -> Option<String> {
        match self.hit_test(x_px, y_px) {
            Some(HitTarget::Field(id)) => {
                self.session.select(Some(&id));
                Some(id)
            }
            _ => {
                self.session.select(None);
                None
            }
        }
    }
}
