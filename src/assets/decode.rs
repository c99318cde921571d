use anyhow::Context;
use image::RgbaImage;

use crate::foundation::error::PassResult;

/// Decode any supported raster into straight-alpha RGBA8.
pub fn decode_image(bytes: &[u8]) -> PassResult<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(dyn_img.to_rgba8())
}

/// Encode an RGBA8 raster as PNG bytes.
pub fn encode_png(img: &RgbaImage) -> PassResult<Vec<u8>> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img.clone())
        .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}
