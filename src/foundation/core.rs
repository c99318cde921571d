use image::RgbaImage;

/// Output card width in pixels.
pub const CARD_WIDTH: u32 = 768;
/// Output card height in pixels.
pub const CARD_HEIGHT: u32 = 1052;

/// Top-left placement offset in canvas pixel space.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const ORIGIN: Pos = Pos { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Immutable raster plus its placement on the card.
///
/// Layers are produced by the asset source or by the text, QR and holo stages and are consumed
/// once by [`composite_layer`](crate::composite_layer).
#[derive(Clone, Debug)]
pub struct Layer {
    pub image: RgbaImage,
    pub pos: Pos,
}

impl Layer {
    pub fn new(image: RgbaImage, pos: Pos) -> Self {
        Self { image, pos }
    }

    pub fn at_origin(image: RgbaImage) -> Self {
        Self::new(image, Pos::ORIGIN)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Fresh fully transparent card canvas.
pub fn blank_canvas() -> RgbaImage {
    RgbaImage::new(CARD_WIDTH, CARD_HEIGHT)
}
