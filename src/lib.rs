//! dxpass renders fixed-layout rank/pass card images.
//!
//! A card is built by compositing pre-rendered raster assets with computed overlays in a fixed
//! ten-stage order (see [`Stage`]):
//!
//! 1. **Base**: background, character art, pass frame, optional holographic sheen, serial plate
//! 2. **Rating**: tier tile chosen from the rating thresholds, digits or placeholders
//! 3. **Text fields**: player name (compressed to fit), friend code, identifier, version
//! 4. **QR code**: smallest version 1..=6 at error correction level M
//! 5. **Icons, info plate, character name and expiry date**
//!
//! Constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No silent truncation**: text either fits, is compressed, or fails with
//!   [`PassError::WidthOverflow`].
//! - **No IO in layout**: rasters come from an [`AssetSource`], glyphs from a [`TextMetrics`].
#![forbid(unsafe_code)]

mod assets;
mod foundation;
mod layout;
mod model;
mod render;
mod text;

pub use assets::decode::{decode_image, encode_png};
pub use assets::store::{AssetKey, AssetSource, FsAssetStore, MemoryAssetStore, chara_index_key};
pub use foundation::core::{CARD_HEIGHT, CARD_WIDTH, Layer, Pos, blank_canvas};
pub use foundation::error::{PassError, PassResult};
pub use layout::fields::{
    DEFAULT_EXPIRY_DAYS, Identifier, format_identifier, normalize_date, to_full_width,
};
pub use layout::icons::{
    ICON_PITCH, ICON_START, IconKind, IconPreset, SLOTS_WITH_QR, SLOTS_WITHOUT_QR,
    layout as layout_icons, slot_limit,
};
pub use layout::pass::{PASS_ICON_POS, PassType, SERIAL_PLATE_POS};
pub use layout::qr::{
    QR_BASE_POS, QR_SLOT, QrContent, QrPlan, box_size_for, clear_white, encode as encode_qr,
    plan as plan_qr, render as render_qr,
};
pub use layout::rating::{
    DIGIT_PITCH, DIGIT_START, RATING_TILE_POS, RatingGlyph, RatingTier, digits_of,
    glyph_positions, tier_for,
};
pub use model::{DEFAULT_PLAYER_NAME, PassRequest};
pub use render::composite::{Rgba8, composite_at, composite_layer, luma, over, put_alpha};
pub use render::holo::{HoloLayers, masked_texture, prepare as prepare_holo, silhouette_mask};
pub use render::output::write_png;
pub use render::pipeline::{CardRenderer, Stage};
pub use text::face::{Anchor, FontFace, TextBox, TextMetrics, text_layer, validate_text};
pub use text::fit::{FitResult, SCALE_PAD, decide, fit, fitted_layer, validate_width};
