use std::path::PathBuf;
use std::sync::Arc;

use dxpass::{
    Anchor, FitResult, FontFace, PassError, Pos, TextMetrics, fit, fitted_layer, text_layer,
    validate_text,
};
use image::RgbaImage;

const INK: [u8; 4] = [0, 0, 0, 255];

/// DejaVu Sans Mono: 2048 units per em, every advance 1233 units.
fn face() -> Arc<FontFace> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("DejaVuSansMono.ttf");
    FontFace::load(&path).unwrap()
}

fn inked(img: &RgbaImage) -> Vec<(u32, u32)> {
    img.enumerate_pixels()
        .filter(|(_, _, p)| p.0[3] > 0)
        .map(|(x, y, _)| (x, y))
        .collect()
}

#[test]
fn covers_latin_but_not_kana() {
    let face = face();
    assert!(face.covers('A'));
    assert!(face.covers('7'));
    assert!(!face.covers('あ'));

    assert!(validate_text(&*face, "maimai 2025").is_ok());
    let err = validate_text(&*face, "Aあ").unwrap_err();
    assert!(matches!(
        err,
        PassError::UnsupportedCharacter {
            ch: 'あ',
            code_point: 0x3042
        }
    ));
}

#[test]
fn sizes_are_em_sizes_in_pixels() {
    let face = face();
    // 10 advances of 1233/2048 em at 20 px is 120.4 px.
    let bbox = face.measure("ABCDEFGHIJ", 20.0);
    assert!((120..=122).contains(&bbox.width), "width {}", bbox.width);
    // Ascent to descent spans 2384/2048 em: 23.3 px.
    assert!((23..=25).contains(&bbox.height), "height {}", bbox.height);
}

#[test]
fn measure_grows_with_size_and_length() {
    let face = face();
    let one = face.measure("A", 20.0);
    let two = face.measure("AB", 20.0);
    let big = face.measure("A", 40.0);

    assert!(one.width > 0);
    assert!(two.width > one.width);
    assert!(big.width > one.width);
    assert!(big.height > one.height);
    assert_eq!(face.measure("", 20.0).width, 0);
}

#[test]
fn draw_stays_inside_the_measured_box() {
    let face = face();
    let bbox = face.measure("MAi", 28.0);
    let origin = Pos::new(10, 10);
    let mut canvas = RgbaImage::new(bbox.width + 20, bbox.height + 20);
    face.draw(&mut canvas, "MAi", 28.0, origin, INK);

    let ink = inked(&canvas);
    assert!(!ink.is_empty());
    for (x, y) in ink {
        assert!(x >= 9 && x < 10 + bbox.width, "x {x} outside box");
        assert!(y >= 10 && y < 10 + bbox.height, "y {y} outside box");
    }
}

#[test]
fn draw_keeps_the_requested_color() {
    let face = face();
    let layer = text_layer(
        &*face,
        "8",
        40.0,
        Pos::new(156, 1006),
        Anchor::LeftTop,
        [255, 255, 255, 255],
    );
    assert_eq!(layer.pos, Pos::new(156, 1006));
    assert!(
        layer
            .image
            .pixels()
            .any(|p| p.0[3] > 0 && p.0[..3] == [255, 255, 255])
    );
}

#[test]
fn player_name_fit_decisions_with_a_real_face() {
    let face = face();
    // At 28 px an advance is 16.9 px: 6 chars fit, 16 compress, 20 overflow.
    assert_eq!(fit(&*face, "maimai", 28.0, 182, 273), FitResult::Direct);
    assert!(matches!(
        fit(&*face, "MMMMMMMMMMMMMMMM", 28.0, 182, 273),
        FitResult::Scaled { .. }
    ));
    assert!(matches!(
        fit(&*face, "MMMMMMMMMMMMMMMMMMMM", 28.0, 182, 273),
        FitResult::Rejected { .. }
    ));

    let layer = fitted_layer(
        &*face,
        "MMMMMMMMMMMMMMMM",
        28.0,
        182,
        273,
        Pos::new(470, 118),
        INK,
    )
    .unwrap();
    assert_eq!(layer.width(), 182 + 8);
    assert_eq!(layer.pos, Pos::new(466, 114));
    assert!(!inked(&layer.image).is_empty());
}

#[test]
fn font_bytes_parse_without_a_path() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("DejaVuSansMono.ttf");
    let face = FontFace::from_bytes(std::fs::read(path).unwrap()).unwrap();
    assert!(face.covers('Q'));
}
