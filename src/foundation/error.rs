pub type PassResult<T> = Result<T, PassError>;

#[derive(thiserror::Error, Debug)]
pub enum PassError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("text '{text}' is too wide (width: {width}, max: {max})")]
    WidthOverflow { text: String, width: u32, max: u32 },

    #[error("icons exceed the limit: {count} provided, at most {limit} allowed")]
    TooManyIcons { count: usize, limit: usize },

    #[error("qr payload overflows version 6 at error correction level M: {bytes} bytes received")]
    PayloadTooLarge { bytes: usize },

    #[error("asset '{key}' is missing: {detail}")]
    AssetMissing { key: String, detail: String },

    #[error("unsupported character '{ch}' (U+{code_point:04X}) found in text")]
    UnsupportedCharacter { ch: char, code_point: u32 },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PassError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn width_overflow(text: impl Into<String>, width: u32, max: u32) -> Self {
        Self::WidthOverflow {
            text: text.into(),
            width,
            max,
        }
    }

    pub fn asset_missing(key: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::AssetMissing {
            key: key.into(),
            detail: detail.into(),
        }
    }

    pub fn unsupported_character(ch: char) -> Self {
        Self::UnsupportedCharacter {
            ch,
            code_point: u32::from(ch),
        }
    }

    /// Excess pixels for a [`PassError::WidthOverflow`], `None` for every other variant.
    pub fn overflow_px(&self) -> Option<u32> {
        match self {
            Self::WidthOverflow { width, max, .. } => Some(width.saturating_sub(*max)),
            _ => None,
        }
    }
}
