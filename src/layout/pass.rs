use std::str::FromStr;

use crate::foundation::{
    core::Pos,
    error::{PassError, PassResult},
};

/// Where the pass icon (the small badge of the pass frame) is drawn.
pub const PASS_ICON_POS: Pos = Pos::new(24, 28);
pub const SERIAL_PLATE_POS: Pos = Pos::new(141, 1000);

/// Pass artwork variant.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PassType {
    Bronze,
    Silver,
    #[default]
    Gold,
    Freedom,
}

impl PassType {
    pub fn base_asset(self) -> &'static str {
        match self {
            PassType::Bronze => "BronzeBase",
            PassType::Silver => "SilverBase",
            PassType::Gold => "GoldBase",
            PassType::Freedom => "FreedomBase",
        }
    }

    pub fn icon_asset(self) -> &'static str {
        match self {
            PassType::Bronze => "BronzeBaseIcon",
            PassType::Silver => "SilverBaseIcon",
            PassType::Gold => "GoldBaseIcon",
            PassType::Freedom => "FreedomBaseIcon",
        }
    }

    pub fn icon_offset(self) -> Pos {
        PASS_ICON_POS
    }
}

impl FromStr for PassType {
    type Err = PassError;

    fn from_str(s: &str) -> PassResult<Self> {
        match s.to_ascii_uppercase().as_str() {
            "BRONZE" => Ok(PassType::Bronze),
            "SILVER" => Ok(PassType::Silver),
            "GOLD" => Ok(PassType::Gold),
            "FREEDOM" => Ok(PassType::Freedom),
            _ => Err(PassError::invalid_input(format!("invalid pass type: {s}"))),
        }
    }
}
