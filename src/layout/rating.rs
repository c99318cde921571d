use crate::foundation::{
    core::Pos,
    error::{PassError, PassResult},
};

/// Where the rating background tile is drawn.
pub const RATING_TILE_POS: Pos = Pos::new(461, 32);
/// Right-most digit slot; further digits move left by [`DIGIT_PITCH`].
pub const DIGIT_START: Pos = Pos::new(690, 52);
pub const DIGIT_PITCH: i32 = 29;
/// Number of placeholder glyphs drawn for an absent or zero rating.
pub const PLACEHOLDER_SLOTS: usize = 5;

/// Rating bracket selecting the background tile.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RatingTier {
    White,
    Blue,
    Green,
    Yellow,
    Red,
    Purple,
    Bronze,
    Silver,
    Gold,
    Platinum,
    Rainbow,
}

impl RatingTier {
    pub const ALL: [RatingTier; 11] = [
        RatingTier::White,
        RatingTier::Blue,
        RatingTier::Green,
        RatingTier::Yellow,
        RatingTier::Red,
        RatingTier::Purple,
        RatingTier::Bronze,
        RatingTier::Silver,
        RatingTier::Gold,
        RatingTier::Platinum,
        RatingTier::Rainbow,
    ];

    /// Lowest rating that lands in this tier.
    pub const fn threshold(self) -> u32 {
        match self {
            RatingTier::White => 0,
            RatingTier::Blue => 1000,
            RatingTier::Green => 2000,
            RatingTier::Yellow => 4000,
            RatingTier::Red => 7000,
            RatingTier::Purple => 10000,
            RatingTier::Bronze => 12000,
            RatingTier::Silver => 13000,
            RatingTier::Gold => 14000,
            RatingTier::Platinum => 14500,
            RatingTier::Rainbow => 15000,
        }
    }

    /// 1-based tile number, as in `general/Ra<n>`.
    pub fn index(self) -> u32 {
        self as u32 + 1
    }

    pub fn asset_name(self) -> String {
        format!("Ra{}", self.index())
    }
}

/// Greatest tier whose threshold does not exceed `rating`.
pub fn tier_for(rating: i64) -> PassResult<RatingTier> {
    if rating < 0 {
        return Err(PassError::invalid_input(format!(
            "rating must be non-negative, but got {rating}"
        )));
    }
    let tier = RatingTier::ALL
        .iter()
        .rev()
        .copied()
        .find(|t| i64::from(t.threshold()) <= rating)
        .unwrap_or(RatingTier::White);
    Ok(tier)
}

/// One glyph in the rating readout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RatingGlyph {
    Digit(u8),
    Placeholder,
}

impl RatingGlyph {
    pub fn asset_name(self) -> String {
        match self {
            RatingGlyph::Digit(d) => format!("Num{d}"),
            RatingGlyph::Placeholder => "Num-".to_string(),
        }
    }
}

/// Digits most-significant first; absent or zero ratings read as five placeholders.
pub fn digits_of(rating: Option<i64>) -> PassResult<Vec<RatingGlyph>> {
    let rating = match rating {
        None | Some(0) => return Ok(vec![RatingGlyph::Placeholder; PLACEHOLDER_SLOTS]),
        Some(r) if r < 0 => {
            return Err(PassError::invalid_input(format!(
                "rating must be non-negative, but got {r}"
            )));
        }
        Some(r) => r,
    };
    let digits = rating
        .to_string()
        .bytes()
        .map(|b| RatingGlyph::Digit(b - b'0'))
        .collect();
    Ok(digits)
}

/// Placement of each glyph: the last glyph sits at [`DIGIT_START`], earlier ones step left.
pub fn glyph_positions(glyphs: &[RatingGlyph]) -> Vec<(RatingGlyph, Pos)> {
    glyphs
        .iter()
        .rev()
        .enumerate()
        .map(|(i, g)| (*g, DIGIT_START.offset(-DIGIT_PITCH * i as i32, 0)))
        .collect()
}
