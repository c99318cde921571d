use std::{path::Path, sync::Arc};

use anyhow::Context;
use image::RgbaImage;
use rusttype::{Font, Scale, point};

use crate::{
    foundation::{
        core::{Layer, Pos},
        error::{PassError, PassResult},
    },
    render::composite::{Rgba8, over},
};

/// Pixel bounding box of a measured string, anchored at its left/ascender-top corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBox {
    pub width: u32,
    pub height: u32,
}

/// Horizontal anchoring of a text origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    /// Origin is the left edge, ascender top.
    LeftTop,
    /// Origin is the horizontal middle, ascender top.
    MiddleTop,
}

/// Measuring and drawing over a single font face, parameterized only by pixel size.
pub trait TextMetrics: Send + Sync {
    /// `true` when the face maps `ch` to a real glyph.
    fn covers(&self, ch: char) -> bool;

    fn measure(&self, text: &str, size: f32) -> TextBox;

    /// Draw `text` with its ascender-top-left corner at `origin`.
    fn draw(&self, target: &mut RgbaImage, text: &str, size: f32, origin: Pos, color: Rgba8);
}

/// Fail fast on the first character the face cannot render.
pub fn validate_text(metrics: &dyn TextMetrics, text: &str) -> PassResult<()> {
    match text.chars().find(|&ch| !metrics.covers(ch)) {
        Some(ch) => Err(PassError::unsupported_character(ch)),
        None => Ok(()),
    }
}

/// Render `text` into a tight offscreen layer placed according to `anchor`.
pub fn text_layer(
    metrics: &dyn TextMetrics,
    text: &str,
    size: f32,
    origin: Pos,
    anchor: Anchor,
    color: Rgba8,
) -> Layer {
    let bbox = metrics.measure(text, size);
    let mut buf = RgbaImage::new(bbox.width.max(1), bbox.height.max(1));
    metrics.draw(&mut buf, text, size, Pos::ORIGIN, color);
    let pos = match anchor {
        Anchor::LeftTop => origin,
        Anchor::MiddleTop => origin.offset(-((bbox.width / 2) as i32), 0),
    };
    Layer::new(buf, pos)
}

/// TrueType/OpenType face loaded once and shared read-only across renders.
pub struct FontFace {
    font: Font<'static>,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("glyph_count", &self.font.glyph_count())
            .field("units_per_em", &self.font.units_per_em())
            .finish()
    }
}

impl FontFace {
    pub fn from_bytes(bytes: Vec<u8>) -> PassResult<Self> {
        let font = Font::try_from_vec(bytes)
            .ok_or_else(|| PassError::invalid_input("font data could not be parsed"))?;
        Ok(Self { font })
    }

    pub fn load(path: &Path) -> PassResult<Arc<Self>> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        let face = Self::from_bytes(bytes)?;
        tracing::debug!(font = %path.display(), ?face, "font face loaded");
        Ok(Arc::new(face))
    }

    /// Font sizes are em sizes in pixels; rusttype scales by ascent-to-descent height.
    fn scale(&self, size: f32) -> Scale {
        let vm = self.font.v_metrics_unscaled();
        let upem = f32::from(self.font.units_per_em().max(1));
        Scale::uniform(size * (vm.ascent - vm.descent) / upem)
    }
}

impl TextMetrics for FontFace {
    fn covers(&self, ch: char) -> bool {
        self.font.glyph(ch).id().0 != 0
    }

    fn measure(&self, text: &str, size: f32) -> TextBox {
        let scale = self.scale(size);
        let vm = self.font.v_metrics(scale);
        let mut right: f32 = 0.0;
        let mut bottom: f32 = vm.ascent - vm.descent;
        for glyph in self.font.layout(text, scale, point(0.0, vm.ascent)) {
            let advance_end = glyph.position().x + glyph.unpositioned().h_metrics().advance_width;
            right = right.max(advance_end);
            if let Some(bb) = glyph.pixel_bounding_box() {
                right = right.max(bb.max.x as f32);
                bottom = bottom.max(bb.max.y as f32);
            }
        }
        TextBox {
            width: right.ceil().max(0.0) as u32,
            height: bottom.ceil().max(0.0) as u32,
        }
    }

    fn draw(&self, target: &mut RgbaImage, text: &str, size: f32, origin: Pos, color: Rgba8) {
        let scale = self.scale(size);
        let vm = self.font.v_metrics(scale);
        let baseline = point(origin.x as f32, origin.y as f32 + vm.ascent);
        let (tw, th) = (i64::from(target.width()), i64::from(target.height()));

        for glyph in self.font.layout(text, scale, baseline) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, v| {
                let x = i64::from(bb.min.x) + i64::from(gx);
                let y = i64::from(bb.min.y) + i64::from(gy);
                if x < 0 || y < 0 || x >= tw || y >= th {
                    return;
                }
                let a = (v.clamp(0.0, 1.0) * f32::from(color[3])).round() as u8;
                if a == 0 {
                    return;
                }
                let dst = target.get_pixel_mut(x as u32, y as u32);
                dst.0 = over(dst.0, [color[0], color[1], color[2], a]);
            });
        }
    }
}
