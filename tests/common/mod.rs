#![allow(dead_code)]

use dxpass::{
    AssetKey, CARD_HEIGHT, CARD_WIDTH, IconKind, MemoryAssetStore, PassType, Pos, Rgba8,
    TextBox, TextMetrics,
};
use image::{Rgba, RgbaImage};

pub const BACKGROUND_ID: u32 = 1;
pub const CHARACTER_ID: u32 = 101;
pub const CHARACTER_NAME: &str = "らいむっくま";

pub const BACKGROUND: Rgba8 = [10, 10, 80, 255];
pub const CHARACTER: Rgba8 = [0, 200, 0, 255];
pub const PLACEHOLDER: Rgba8 = [255, 0, 255, 255];
pub const DUMMY_QR: Rgba8 = [30, 30, 30, 255];
pub const HOLO: Rgba8 = [250, 20, 20, 255];

/// Character art is opaque only inside this square.
pub const CHARACTER_BOX: (u32, u32, u32) = (300, 300, 10);

/// Code point the test typeface has no glyph for.
pub const UNSUPPORTED: char = '\u{2603}';

pub fn digit_color(d: u8) -> Rgba8 {
    [100 + d * 10, 0, 0, 255]
}

pub fn tile_color(n: u32) -> Rgba8 {
    [0, 0, (n * 20) as u8, 255]
}

pub fn icon_color(i: usize) -> Rgba8 {
    [0, 50 + i as u8 * 20, 50, 255]
}

pub fn solid(w: u32, h: u32, c: Rgba8) -> RgbaImage {
    RgbaImage::from_pixel(w, h, Rgba(c))
}

/// Every glyph is a solid `size` x `size` block.
pub struct BlockFace;

impl TextMetrics for BlockFace {
    fn covers(&self, ch: char) -> bool {
        ch != UNSUPPORTED
    }

    fn measure(&self, text: &str, size: f32) -> TextBox {
        TextBox {
            width: text.chars().count() as u32 * size as u32,
            height: size as u32,
        }
    }

    fn draw(&self, target: &mut RgbaImage, text: &str, size: f32, origin: Pos, color: Rgba8) {
        let w = text.chars().count() as i32 * size as i32;
        for y in origin.y..origin.y + size as i32 {
            for x in origin.x..origin.x + w {
                if x >= 0 && y >= 0 && (x as u32) < target.width() && (y as u32) < target.height() {
                    target.put_pixel(x as u32, y as u32, Rgba(color));
                }
            }
        }
    }
}

/// Every asset a default render touches, each with a recognizable color.
pub fn store() -> MemoryAssetStore {
    let mut s = MemoryAssetStore::new();
    s.insert(
        AssetKey::Background(BACKGROUND_ID),
        solid(CARD_WIDTH, CARD_HEIGHT, BACKGROUND),
    );

    let mut chara = RgbaImage::new(CARD_WIDTH, CARD_HEIGHT);
    let (cx, cy, cs) = CHARACTER_BOX;
    for y in cy..cy + cs {
        for x in cx..cx + cs {
            chara.put_pixel(x, y, Rgba(CHARACTER));
        }
    }
    s.insert(AssetKey::Character(CHARACTER_ID), chara);
    s.insert_character_name(CHARACTER_ID, CHARACTER_NAME);

    for pass in [
        PassType::Bronze,
        PassType::Silver,
        PassType::Gold,
        PassType::Freedom,
    ] {
        s.insert(AssetKey::general(pass.base_asset()), RgbaImage::new(1, 1));
        s.insert(
            AssetKey::general(pass.icon_asset()),
            solid(2, 2, [200, 200, 0, 255]),
        );
    }
    s.insert(AssetKey::general("SerialCode"), solid(4, 4, [1, 1, 1, 255]));

    for n in 1..=11 {
        s.insert(AssetKey::general(format!("Ra{n}")), solid(4, 4, tile_color(n)));
    }
    for d in 0..=9u8 {
        s.insert(AssetKey::general(format!("Num{d}")), solid(4, 4, digit_color(d)));
    }
    s.insert(AssetKey::general("Num-"), solid(4, 4, PLACEHOLDER));

    s.insert(AssetKey::general("Player"), solid(4, 4, [2, 2, 2, 255]));
    s.insert(AssetKey::general("Friend"), solid(4, 4, [3, 3, 3, 255]));
    s.insert(AssetKey::general("NoFriendCode"), solid(4, 4, [4, 4, 4, 255]));
    s.insert(AssetKey::general("QRCodeBase"), solid(158, 158, [240, 240, 240, 255]));
    s.insert(AssetKey::general("DummyQRCode"), solid(4, 4, DUMMY_QR));
    s.insert(AssetKey::general("Name"), solid(4, 4, [5, 5, 5, 255]));

    for (i, icon) in [
        IconKind::Freedom,
        IconKind::Level,
        IconKind::Rating,
        IconKind::Master,
        IconKind::Power1,
        IconKind::Power2,
        IconKind::Power3,
        IconKind::Power4,
    ]
    .into_iter()
    .enumerate()
    {
        s.insert(AssetKey::general(icon.asset_name()), solid(4, 4, icon_color(i)));
    }
    s
}

pub fn px(img: &RgbaImage, x: u32, y: u32) -> Rgba8 {
    img.get_pixel(x, y).0
}
