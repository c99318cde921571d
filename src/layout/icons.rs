use std::str::FromStr;

use crate::foundation::{
    core::Pos,
    error::{PassError, PassResult},
};

pub const ICON_START: Pos = Pos::new(28, 870);
pub const ICON_PITCH: i32 = 107;

/// Slot limit when a QR code occupies the right side of the icon row.
pub const SLOTS_WITH_QR: usize = 4;
/// Slot limit when QR drawing is skipped.
pub const SLOTS_WITHOUT_QR: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IconKind {
    Freedom,
    Level,
    Rating,
    Master,
    Power1,
    Power2,
    Power3,
    Power4,
}

impl IconKind {
    pub fn asset_name(self) -> &'static str {
        match self {
            IconKind::Freedom => "IconFreedom",
            IconKind::Level => "IconLevel",
            IconKind::Rating => "IconRating",
            IconKind::Master => "IconMaster",
            IconKind::Power1 => "IconPower1",
            IconKind::Power2 => "IconPower2",
            IconKind::Power3 => "IconPower3",
            IconKind::Power4 => "IconPower4",
        }
    }
}

impl FromStr for IconKind {
    type Err = PassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "FREEDOM" => Ok(IconKind::Freedom),
            "LEVEL" => Ok(IconKind::Level),
            "RATING" => Ok(IconKind::Rating),
            "MASTER" => Ok(IconKind::Master),
            "POWER1" => Ok(IconKind::Power1),
            "POWER2" => Ok(IconKind::Power2),
            "POWER3" => Ok(IconKind::Power3),
            "POWER4" => Ok(IconKind::Power4),
            _ => Err(PassError::invalid_input(format!("invalid icon type: {s}"))),
        }
    }
}

/// Named icon rows; `Old*` presets are the rows used before the pass rework.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IconPreset {
    Gold,
    Freedom,
    OldBronze,
    OldSilver,
    OldGold,
    OldPlatinum,
}

impl IconPreset {
    pub fn icons(self) -> Vec<IconKind> {
        use IconKind::*;
        match self {
            IconPreset::Gold => vec![Level, Master, Rating],
            IconPreset::Freedom => vec![Freedom, Master, Rating],
            IconPreset::OldBronze => vec![Power1],
            IconPreset::OldSilver => vec![Power2],
            IconPreset::OldGold => vec![Power3, Master, Rating],
            IconPreset::OldPlatinum => vec![Power4, Master, Rating],
        }
    }
}

/// Slot limit for the icon row, depending on whether a QR code is drawn.
pub fn slot_limit(qr_drawn: bool) -> usize {
    if qr_drawn {
        SLOTS_WITH_QR
    } else {
        SLOTS_WITHOUT_QR
    }
}

/// Place icons left to right at a fixed pitch, in input order.
pub fn layout(icons: Option<&[IconKind]>, slot_limit: usize) -> PassResult<Vec<(IconKind, Pos)>> {
    let Some(icons) = icons else {
        return Ok(Vec::new());
    };
    if icons.len() > slot_limit {
        return Err(PassError::TooManyIcons {
            count: icons.len(),
            limit: slot_limit,
        });
    }
    Ok(icons
        .iter()
        .enumerate()
        .map(|(i, icon)| (*icon, ICON_START.offset(ICON_PITCH * i as i32, 0)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use IconKind::*;

    #[test]
    fn absent_icons_yield_empty_row() {
        assert!(layout(None, 4).unwrap().is_empty());
    }

    #[test]
    fn too_many_icons_fail_with_count() {
        let err = layout(Some(&[Level, Master, Rating, Power1, Power2]), 4).unwrap_err();
        assert!(matches!(err, PassError::TooManyIcons { count: 5, limit: 4 }));
    }

    #[test]
    fn two_icons_fit_without_qr() {
        let placed = layout(Some(&[Level, Master]), slot_limit(false)).unwrap();
        assert_eq!(
            placed,
            vec![(Level, Pos::new(28, 870)), (Master, Pos::new(135, 870))]
        );
        assert!(layout(Some(&[Level, Master, Rating]), slot_limit(false)).is_err());
    }

    #[test]
    fn duplicates_keep_input_order() {
        let placed = layout(Some(&[Rating, Rating, Level]), slot_limit(true)).unwrap();
        let kinds: Vec<_> = placed.iter().map(|(k, _)| *k).collect();
        assert_eq!(kinds, vec![Rating, Rating, Level]);
        assert_eq!(placed[2].1, Pos::new(242, 870));
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("power3".parse::<IconKind>().unwrap(), Power3);
        assert_eq!("Master".parse::<IconKind>().unwrap(), Master);
        assert!(matches!(
            "crown".parse::<IconKind>(),
            Err(PassError::InvalidInput(_))
        ));
    }

    #[test]
    fn presets_expand_in_order() {
        assert_eq!(IconPreset::Gold.icons(), vec![Level, Master, Rating]);
        assert_eq!(IconPreset::OldSilver.icons(), vec![Power2]);
    }
}
