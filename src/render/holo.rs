//! Holographic sheen: one texture shown through three silhouette masks.
//!
//! Draw order inside the base stage is fixed: base holo, character art, character holo,
//! pass base art, frame holo, then the pass icon and serial plate.

use image::{GrayImage, Luma, Rgba, RgbaImage};

use crate::{
    assets::store::{AssetKey, AssetSource},
    foundation::{core::Layer, error::PassResult},
    render::composite::{composite_at, luma, put_alpha},
};

pub const HOLO_FRAME_ASSET: &str = "HoloFrame";
pub const HOLO_BASE_ASSET: &str = "HoloBase";

/// Texture copies masked for each silhouette, all placed at the card origin.
#[derive(Clone, Debug)]
pub struct HoloLayers {
    pub base: Layer,
    pub character: Layer,
    pub frame: Layer,
}

/// Opaque where the silhouette is, transparent elsewhere.
///
/// The silhouette is flattened onto opaque white, reduced to luma and inverted.
pub fn silhouette_mask(silhouette: &RgbaImage) -> GrayImage {
    let (w, h) = silhouette.dimensions();
    let mut flat = RgbaImage::from_pixel(w, h, Rgba([255, 255, 255, 255]));
    composite_at(&mut flat, silhouette, crate::Pos::ORIGIN);
    GrayImage::from_fn(w, h, |x, y| Luma([255 - luma(flat.get_pixel(x, y).0)]))
}

/// Copy of `texture` carrying `mask` as its alpha channel.
pub fn masked_texture(texture: &RgbaImage, mask: &GrayImage) -> PassResult<RgbaImage> {
    let mut out = texture.clone();
    put_alpha(&mut out, mask)?;
    Ok(out)
}

/// Load the three silhouettes and the texture, and build the masked layers.
///
/// Any missing asset is fatal; there is no silent fallback to a plain card.
pub fn prepare(
    assets: &dyn AssetSource,
    character: u32,
    texture: &AssetKey,
) -> PassResult<HoloLayers> {
    tracing::warn!("holographic rendering is experimental");

    let chara_mask = silhouette_mask(&assets.load(&AssetKey::CharacterMask(character))?);
    let frame_mask = silhouette_mask(&assets.load(&AssetKey::general(HOLO_FRAME_ASSET))?);
    let base_mask = silhouette_mask(&assets.load(&AssetKey::general(HOLO_BASE_ASSET))?);

    let texture = assets.load(texture)?;
    Ok(HoloLayers {
        base: Layer::at_origin(masked_texture(&texture, &base_mask)?),
        character: Layer::at_origin(masked_texture(&texture, &chara_mask)?),
        frame: Layer::at_origin(masked_texture(&texture, &frame_mask)?),
    })
}
