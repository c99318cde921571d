use image::{RgbaImage, imageops::FilterType};

use crate::{
    foundation::{
        core::{Layer, Pos},
        error::{PassError, PassResult},
    },
    render::composite::Rgba8,
    text::face::TextMetrics,
};

/// Padding around offscreen text so anti-aliased edges survive resampling.
pub const SCALE_PAD: u32 = 4;

/// Outcome of fitting one text field into its slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FitResult {
    /// Fits the slot at native size.
    Direct,
    /// Wider than the slot but within the hard limit; compressed horizontally by `scale`.
    Scaled { scale: f32 },
    /// Wider than the hard limit by `overflow` pixels.
    Rejected { overflow: u32 },
}

/// Three-way decision for a measured width.
pub fn decide(width: u32, slot_px: u32, max_px: u32) -> FitResult {
    if width <= slot_px {
        FitResult::Direct
    } else if width > max_px {
        FitResult::Rejected {
            overflow: width - max_px,
        }
    } else {
        FitResult::Scaled {
            scale: slot_px as f32 / width as f32,
        }
    }
}

pub fn fit(
    metrics: &dyn TextMetrics,
    text: &str,
    size: f32,
    slot_px: u32,
    max_px: u32,
) -> FitResult {
    decide(metrics.measure(text, size).width, slot_px, max_px)
}

/// Direct-or-reject variant for fields that are never compressed.
pub fn validate_width<'a>(
    metrics: &dyn TextMetrics,
    text: &'a str,
    size: f32,
    max_px: u32,
) -> PassResult<&'a str> {
    let width = metrics.measure(text, size).width;
    match decide(width, max_px, max_px) {
        FitResult::Rejected { .. } => Err(PassError::width_overflow(text, width, max_px)),
        _ => Ok(text),
    }
}

/// Fit `text` into its slot and produce the layer to composite at `anchor`.
///
/// Scaled text is drawn into a padded offscreen buffer, resampled to exactly
/// `slot_px + 2 * SCALE_PAD` wide at unchanged height, and placed at `anchor - SCALE_PAD`.
pub fn fitted_layer(
    metrics: &dyn TextMetrics,
    text: &str,
    size: f32,
    slot_px: u32,
    max_px: u32,
    anchor: Pos,
    color: Rgba8,
) -> PassResult<Layer> {
    let bbox = metrics.measure(text, size);
    let decision = decide(bbox.width, slot_px, max_px);
    tracing::debug!(text, width = bbox.width, slot_px, max_px, ?decision, "text fit");

    match decision {
        FitResult::Direct => {
            let mut buf = RgbaImage::new(bbox.width.max(1), bbox.height.max(1));
            metrics.draw(&mut buf, text, size, Pos::ORIGIN, color);
            Ok(Layer::new(buf, anchor))
        }
        FitResult::Rejected { .. } => Err(PassError::width_overflow(text, bbox.width, max_px)),
        FitResult::Scaled { .. } => {
            let pad = SCALE_PAD;
            let tmp_w = bbox.width + pad * 2;
            let tmp_h = bbox.height + pad * 2;
            let mut tmp = RgbaImage::new(tmp_w.max(1), tmp_h.max(1));
            metrics.draw(
                &mut tmp,
                text,
                size,
                Pos::new(pad as i32, pad as i32),
                color,
            );

            let new_w = (slot_px + pad * 2).max(1);
            let scaled = image::imageops::resize(&tmp, new_w, tmp.height(), FilterType::Lanczos3);
            Ok(Layer::new(scaled, anchor.offset(-(pad as i32), -(pad as i32))))
        }
    }
}
