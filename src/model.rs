use std::{collections::BTreeSet, path::PathBuf};

use crate::{
    foundation::error::{PassError, PassResult},
    layout::{
        fields::Identifier,
        icons::{IconKind, IconPreset},
        pass::PassType,
        qr::QrContent,
        rating::tier_for,
    },
    render::pipeline::Stage,
};

pub const DEFAULT_PLAYER_NAME: &str = "maimai";

/// Every input of one card render.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PassRequest {
    pub background: u32,
    pub character: u32,
    #[serde(default)]
    pub pass_type: PassType,
    /// Overrides the name looked up from the character index.
    #[serde(default)]
    pub character_name: Option<String>,
    #[serde(default = "default_player_name")]
    pub player_name: String,
    /// Convert half-width ASCII in the player name to full width.
    #[serde(default = "default_true")]
    pub full_width: bool,
    #[serde(default)]
    pub rating: Option<i64>,
    /// Picks the rating tile from this value instead of `rating`.
    #[serde(default)]
    pub rating_override: Option<i64>,
    #[serde(default)]
    pub friend_code: Option<String>,
    #[serde(default)]
    pub identifier: Identifier,
    /// Draw a numeric identifier without grouping.
    #[serde(default)]
    pub raw_identifier: bool,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub qr: QrContent,
    #[serde(default)]
    pub icons: Option<Vec<IconKind>>,
    #[serde(default)]
    pub icon_preset: Option<IconPreset>,
    /// Expiry date; `None` means two weeks from today.
    #[serde(default)]
    pub date: Option<String>,
    /// Holo texture; enables the holographic base stage.
    #[serde(default)]
    pub holo: Option<PathBuf>,
    #[serde(default)]
    pub info_plate: bool,
    #[serde(default)]
    pub skip: BTreeSet<Stage>,
}

fn default_player_name() -> String {
    DEFAULT_PLAYER_NAME.to_string()
}

fn default_true() -> bool {
    true
}

impl PassRequest {
    pub fn new(background: u32, character: u32) -> Self {
        Self {
            background,
            character,
            pass_type: PassType::default(),
            character_name: None,
            player_name: default_player_name(),
            full_width: true,
            rating: None,
            rating_override: None,
            friend_code: None,
            identifier: Identifier::default(),
            raw_identifier: false,
            version: String::new(),
            qr: QrContent::default(),
            icons: None,
            icon_preset: None,
            date: None,
            holo: None,
            info_plate: false,
            skip: BTreeSet::new(),
        }
    }

    /// Cheap checks that need no assets or fonts.
    pub fn validate(&self) -> PassResult<()> {
        if let Some(r) = self.rating {
            tier_for(r)?;
        }
        if let Some(r) = self.rating_override {
            tier_for(r)?;
        }
        if self.icons.is_some() && self.icon_preset.is_some() {
            return Err(PassError::invalid_input(
                "icons and icon_preset are mutually exclusive",
            ));
        }
        Ok(())
    }

    /// Icon row from explicit icons or the preset.
    pub fn icon_row(&self) -> Option<Vec<IconKind>> {
        match (&self.icons, self.icon_preset) {
            (Some(icons), _) => Some(icons.clone()),
            (None, Some(preset)) => Some(preset.icons()),
            (None, None) => None,
        }
    }

    pub fn skips(&self, stage: Stage) -> bool {
        self.skip.contains(&stage)
    }

    /// Whether a QR code (real or dummy) ends up on the card.
    pub fn draws_qr(&self) -> bool {
        !self.skips(Stage::QrCode) && self.qr != QrContent::Empty
    }
}
