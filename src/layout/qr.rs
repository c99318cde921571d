use image::{Rgba, RgbaImage};
use qrcode::{Color, EcLevel, QrCode, Version, types::QrError};

use crate::foundation::{
    core::{Layer, Pos},
    error::{PassError, PassResult},
};

/// Top-left corner of the QR plate and of the square slot the code is centered in.
pub const QR_BASE_POS: Pos = Pos::new(556, 841);
/// Edge length of the QR slot.
pub const QR_SLOT: u32 = 158;
pub const DUMMY_QR_POS: Pos = Pos::new(581, 866);
/// Quiet-zone width in modules, on every side.
pub const QR_BORDER: u32 = 4;
/// Module size used while searching for the smallest version.
pub const PROBE_BOX_SIZE: u32 = 3;
pub const MIN_VERSION: u8 = 1;
pub const MAX_VERSION: u8 = 6;

/// What the QR stage draws.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QrContent {
    /// Encode this payload.
    Payload(String),
    /// Draw the dummy code image.
    #[default]
    Placeholder,
    /// Draw only the empty plate.
    Empty,
}

impl QrContent {
    pub fn from_option(payload: Option<String>) -> Self {
        match payload {
            Some(p) => QrContent::Payload(p),
            None => QrContent::Placeholder,
        }
    }
}

/// Encoding parameters derived from a payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QrPlan {
    pub version: u8,
    /// Modules per side, quiet zone included.
    pub module_count: u32,
    /// Final pixel edge length per module.
    pub box_size: u32,
    /// Offset from [`QR_BASE_POS`] on both axes that centers the code in the slot.
    pub offset: i32,
}

impl QrPlan {
    pub fn image_size(&self) -> u32 {
        self.module_count * self.box_size
    }

    pub fn position(&self) -> Pos {
        QR_BASE_POS.offset(self.offset, self.offset)
    }
}

/// Final module size for a version.
pub fn box_size_for(version: u8) -> u32 {
    match version {
        1 => 5,
        2 | 3 => 4,
        _ => 3,
    }
}

fn encode_at(payload: &str, version: u8) -> PassResult<Option<QrCode>> {
    match QrCode::with_version(payload.as_bytes(), Version::Normal(i16::from(version)), EcLevel::M)
    {
        Ok(code) => Ok(Some(code)),
        Err(QrError::DataTooLong) => Ok(None),
        Err(e) => Err(anyhow::anyhow!("encode qr code at version {version}: {e}").into()),
    }
}

/// Smallest version in `1..=6` that holds `payload` at error correction level M.
pub fn plan(payload: &str) -> PassResult<QrPlan> {
    for version in MIN_VERSION..=MAX_VERSION {
        let Some(code) = encode_at(payload, version)? else {
            continue;
        };
        let module_count = code.width() as u32 + QR_BORDER * 2;
        let box_size = box_size_for(version);
        let offset = (QR_SLOT as i32 - (module_count * box_size) as i32) / 2;
        tracing::debug!(
            version,
            module_count,
            probe_px = module_count * PROBE_BOX_SIZE,
            box_size,
            offset,
            "qr plan"
        );
        return Ok(QrPlan {
            version,
            module_count,
            box_size,
            offset,
        });
    }
    Err(PassError::PayloadTooLarge {
        bytes: payload.len(),
    })
}

/// Re-encode `payload` at the planned version and rasterize it at the final module size.
pub fn render(payload: &str, plan: &QrPlan) -> PassResult<RgbaImage> {
    let code = encode_at(payload, plan.version)?.ok_or(PassError::PayloadTooLarge {
        bytes: payload.len(),
    })?;
    let width = code.width() as u32;
    let size = plan.image_size();
    let mut img = RgbaImage::from_pixel(size, size, Rgba([255, 255, 255, 255]));

    for (i, color) in code.to_colors().into_iter().enumerate() {
        if color != Color::Dark {
            continue;
        }
        let mx = i as u32 % width + QR_BORDER;
        let my = i as u32 / width + QR_BORDER;
        for y in my * plan.box_size..(my + 1) * plan.box_size {
            for x in mx * plan.box_size..(mx + 1) * plan.box_size {
                img.put_pixel(x, y, Rgba([0, 0, 0, 255]));
            }
        }
    }

    clear_white(&mut img);
    Ok(img)
}

/// Make exactly-white pixels fully transparent; every other pixel is kept as-is.
pub fn clear_white(img: &mut RgbaImage) {
    for px in img.pixels_mut() {
        if px.0[0] == 255 && px.0[1] == 255 && px.0[2] == 255 {
            px.0 = [255, 255, 255, 0];
        }
    }
}

/// Plan, render and place a QR code for `payload`.
pub fn encode(payload: &str) -> PassResult<(QrPlan, Layer)> {
    let plan = plan(payload)?;
    let img = render(payload, &plan)?;
    Ok((plan, Layer::new(img, plan.position())))
}
