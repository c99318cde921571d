use image::{GrayImage, RgbaImage};

use crate::foundation::{
    core::{Layer, Pos},
    error::{PassError, PassResult},
};

/// Straight (non-premultiplied) RGBA8 pixel.
pub type Rgba8 = [u8; 4];

/// Source-over for straight alpha, matching the usual `alpha_composite` semantics.
pub fn over(dst: Rgba8, src: Rgba8) -> Rgba8 {
    let sa = u32::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let da = u32::from(dst[3]);
    let dst_weight = da * (255 - sa);
    let src_weight = sa * 255;
    let total = src_weight + dst_weight;
    if total == 0 {
        return [0, 0, 0, 0];
    }

    let mut out = [0u8; 4];
    for i in 0..3 {
        let c = u32::from(src[i]) * src_weight + u32::from(dst[i]) * dst_weight;
        out[i] = ((c + total / 2) / total).min(255) as u8;
    }
    out[3] = ((total + 127) / 255).min(255) as u8;
    out
}

/// Alpha-composite `src` onto `dst` with its top-left corner at `pos`.
///
/// Parts of `src` that fall outside `dst` are clipped.
pub fn composite_at(dst: &mut RgbaImage, src: &RgbaImage, pos: Pos) {
    let (dw, dh) = (i64::from(dst.width()), i64::from(dst.height()));
    for (sx, sy, px) in src.enumerate_pixels() {
        if px.0[3] == 0 {
            continue;
        }
        let x = i64::from(pos.x) + i64::from(sx);
        let y = i64::from(pos.y) + i64::from(sy);
        if x < 0 || y < 0 || x >= dw || y >= dh {
            continue;
        }
        let d = dst.get_pixel_mut(x as u32, y as u32);
        d.0 = over(d.0, px.0);
    }
}

pub fn composite_layer(canvas: &mut RgbaImage, layer: &Layer) {
    composite_at(canvas, &layer.image, layer.pos);
}

/// Replace the alpha channel of `img` with `mask`.
pub fn put_alpha(img: &mut RgbaImage, mask: &GrayImage) -> PassResult<()> {
    if img.dimensions() != mask.dimensions() {
        return Err(PassError::invalid_input(format!(
            "mask size {:?} does not match image size {:?}",
            mask.dimensions(),
            img.dimensions()
        )));
    }
    for (px, m) in img.pixels_mut().zip(mask.pixels()) {
        px.0[3] = m.0[0];
    }
    Ok(())
}

/// ITU-R 601-2 luma, the conversion used for single-channel masks.
pub fn luma(px: Rgba8) -> u8 {
    let l = u32::from(px[0]) * 299 + u32::from(px[1]) * 587 + u32::from(px[2]) * 114;
    ((l + 500) / 1000) as u8
}
