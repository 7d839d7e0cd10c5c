//! Print document target.
//!
//! Serializes scenes to SVG in typographic points (1 pt = 1/72 inch) and
//! assembles one page per label. Zoom never applies here; the page is the
//! label at its physical size, which is what print pipelines expect. PDF
//! output stacks the pages into a single SVG and converts it with
//! svg2pdf, with text kept as paths so the result renders the same on
//! viewers without the source fonts.

use std::fmt::Write as _;

use crate::color::{self, Rgba};
use crate::error::EtiquetaError;
use crate::scene::{build_scene, DrawOp, Scene};
use crate::template::{LabelTemplate, FontWeight, TextAlign, VerticalAlign};
use crate::units::mm_to_points;

/// One label rendered as a standalone SVG page, dimensions in points.
#[derive(Debug, Clone)]
pub struct LabelPage {
    pub token: String,
    pub svg: String,
    pub width_pt: f32,
    pub height_pt: f32,
}

impl LabelPage {
    /// Render one label for `token` at physical size.
    pub fn render(template: &LabelTemplate, token: &str) -> Result<LabelPage, EtiquetaError> {
        let scene = build_scene(template, token)?;
        let (w_mm, h_mm) = scene.size_mm();
        let width_pt = mm_to_points(w_mm);
        let height_pt = mm_to_points(h_mm);

        let mut svg = String::new();
        let _ = write!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width_pt}\" height=\"{height_pt}\" \
             viewBox=\"0 0 {width_pt} {height_pt}\">"
        );
        write_scene_ops(&mut svg, &scene);
        svg.push_str("</svg>");

        Ok(LabelPage {
            token: token.to_string(),
            svg,
            width_pt,
            height_pt,
        })
    }
}

/// An ordered set of label pages, all from the same template.
#[derive(Debug, Clone)]
pub struct LabelDocument {
    pages: Vec<LabelPage>,
}

impl LabelDocument {
    /// Render one page per token. Fails on the first bad page, producing
    /// no document at all.
    pub fn render(template: &LabelTemplate, tokens: &[String]) -> Result<LabelDocument, EtiquetaError> {
        let mut pages = Vec::with_capacity(tokens.len());
        for token in tokens {
            pages.push(LabelPage::render(template, token)?);
        }
        Ok(LabelDocument { pages })
    }

    /// Assemble a document from already rendered pages (batch path, where
    /// each page may carry different bound values).
    pub fn from_pages(pages: Vec<LabelPage>) -> LabelDocument {
        LabelDocument { pages }
    }

    pub fn pages(&self) -> &[LabelPage] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All pages stacked vertically in one SVG.
    pub fn to_svg(&self) -> String {
        let width = self
            .pages
            .iter()
            .map(|p| p.width_pt)
            .fold(0.0f32, f32::max);
        let height: f32 = self.pages.iter().map(|p| p.height_pt).sum();

        let mut svg = String::new();
        let _ = write!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" \
             viewBox=\"0 0 {width} {height}\">"
        );
        let mut y = 0.0f32;
        for page in &self.pages {
            let _ = write!(svg, "<g transform=\"translate(0 {y})\">");
            svg.push_str(inner_svg(&page.svg));
            svg.push_str("</g>");
            y += page.height_pt;
        }
        svg.push_str("</svg>");
        svg
    }

    /// Convert the stacked pages to a PDF.
    pub fn to_pdf(&self) -> Result<Vec<u8>, EtiquetaError> {
        if self.pages.is_empty() {
            return Err(EtiquetaError::Render("document has no pages".into()));
        }
        let svg = self.to_svg();

        // usvg resolves <text> at parse time; without a populated font
        // database every text element is dropped from the tree.
        let mut fontdb = svg2pdf::usvg::fontdb::Database::new();
        fontdb.load_system_fonts();
        configure_font_fallbacks(&mut fontdb);
        let mut opts = svg2pdf::usvg::Options::default();
        opts.fontdb = std::sync::Arc::new(fontdb);

        let tree = svg2pdf::usvg::Tree::from_str(&svg, &opts)
            .map_err(|e| EtiquetaError::Render(format!("SVG parse failed: {e}")))?;

        // Keep text as paths so the PDF never depends on viewer fonts.
        let mut options = svg2pdf::ConversionOptions::default();
        options.embed_text = false;
        let page_options = svg2pdf::PageOptions::default();

        svg2pdf::to_pdf(&tree, options, page_options)
            .map_err(|e| EtiquetaError::Render(format!("PDF conversion failed: {e}")))
    }
}

/// Map the generic `sans-serif` family to a face actually present on the
/// system, so text resolves on hosts whose font config lacks generics.
fn configure_font_fallbacks(fontdb: &mut svg2pdf::usvg::fontdb::Database) {
    let mut sans_family: Option<String> = None;
    let mut first_family: Option<String> = None;

    for face in fontdb.faces() {
        for (family, _) in &face.families {
            if first_family.is_none() {
                first_family = Some(family.clone());
            }
            if sans_family.is_none() && family.to_ascii_lowercase().contains("sans") {
                sans_family = Some(family.clone());
            }
        }
    }

    if let Some(family) = sans_family.as_deref().or(first_family.as_deref()) {
        fontdb.set_sans_serif_family(family);
    }
}

/// Strip the outer `<svg …>` wrapper, keeping the drawing elements.
fn inner_svg(svg: &str) -> &str {
    let start = svg.find('>').map(|i| i + 1).unwrap_or(0);
    let end = svg.rfind("</svg>").unwrap_or(svg.len());
    &svg[start..end]
}

fn write_scene_ops(svg: &mut String, scene: &Scene) {
    for op in &scene.ops {
        match op {
            DrawOp::FillRect { rect, color } => {
                let _ = write!(
                    svg,
                    "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"{}/>",
                    pt(rect.x),
                    pt(rect.y),
                    pt(rect.w),
                    pt(rect.h),
                    color::to_hex(*color),
                    alpha_attr("fill-opacity", *color, 1.0),
                );
            }
            DrawOp::StrokeRect {
                rect,
                width_mm,
                color,
            } => {
                let _ = write!(
                    svg,
                    "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"none\" \
                     stroke=\"{}\" stroke-width=\"{}\"{}/>",
                    pt(rect.x),
                    pt(rect.y),
                    pt(rect.w),
                    pt(rect.h),
                    color::to_hex(*color),
                    pt(*width_mm),
                    alpha_attr("stroke-opacity", *color, 1.0),
                );
            }
            DrawOp::QrModules { rect, matrix, dark } => {
                let n = matrix.size();
                if n == 0 {
                    continue;
                }
                let module = pt(rect.w) / n as f32;
                let x0 = pt(rect.x);
                let y0 = pt(rect.y);
                let mut path = String::new();
                for my in 0..n {
                    for mx in 0..n {
                        if matrix.module(mx, my) {
                            let _ = write!(
                                path,
                                "M{:.3} {:.3}h{module:.3}v{module:.3}h-{module:.3}z",
                                x0 + mx as f32 * module,
                                y0 + my as f32 * module,
                            );
                        }
                    }
                }
                let _ = write!(
                    svg,
                    "<path d=\"{path}\" fill=\"{}\"/>",
                    color::to_hex(*dark)
                );
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
                write_text(
                    svg,
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
}

#[allow(clippy::too_many_arguments)]
fn write_text(
    svg: &mut String,
    rect: crate::geometry::Rect,
    content: &str,
    font_size_pt: f32,
    weight: FontWeight,
    color: Rgba,
    align: TextAlign,
    valign: VerticalAlign,
    opacity: f32,
) {
    let lines: Vec<&str> = content.lines().collect();
    if lines.is_empty() {
        return;
    }
    let line_h = font_size_pt * 1.2;
    let total_h = line_h * lines.len() as f32;

    let (x, anchor) = match align {
        TextAlign::Left => (pt(rect.x), "start"),
        TextAlign::Center => (pt(rect.x + rect.w / 2.0), "middle"),
        TextAlign::Right => (pt(rect.right()), "end"),
    };
    // First baseline; ascent approximated as 0.8 em.
    let top = match valign {
        VerticalAlign::Top => pt(rect.y),
        VerticalAlign::Middle => pt(rect.y) + (pt(rect.h) - total_h) / 2.0,
        VerticalAlign::Bottom => pt(rect.bottom()) - total_h,
    };

    let bold = if weight == FontWeight::Bold {
        " font-weight=\"bold\""
    } else {
        ""
    };
    for (i, line) in lines.iter().enumerate() {
        let baseline = top + line_h * i as f32 + font_size_pt * 0.8;
        let _ = write!(
            svg,
            "<text x=\"{x}\" y=\"{baseline}\" font-family=\"sans-serif\" font-size=\"{font_size_pt}\" \
             text-anchor=\"{anchor}\" fill=\"{}\"{}{}>{}</text>",
            color::to_hex(color),
            alpha_attr("fill-opacity", color, opacity),
            bold,
            escape_xml(line),
        );
    }
}

fn pt(mm: f32) -> f32 {
    mm_to_points(mm)
}

/// Opacity attribute, omitted when fully opaque.
fn alpha_attr(name: &str, color: Rgba, opacity: f32) -> String {
    let a = (color[3] as f32 / 255.0) * opacity;
    if a >= 1.0 {
        String::new()
    } else {
        format!(" {name}=\"{a:.3}\"")
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
