use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    path::{Path, PathBuf},
};

use anyhow::Context;
use image::RgbaImage;

use crate::{
    assets::decode::decode_image,
    foundation::error::{PassError, PassResult},
};

/// Semantic address of a raster asset.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AssetKey {
    /// `background/CardBase<6-digit-id>`
    Background(u32),
    /// `character/CardChara<6-digit-id>`
    Character(u32),
    /// `holograph/CardCharaMask<6-digit-id>`
    CharacterMask(u32),
    /// `general/<name>`
    General(String),
    /// Caller-supplied file, resolved as given.
    File(PathBuf),
}

impl AssetKey {
    pub fn general(name: impl Into<String>) -> Self {
        Self::General(name.into())
    }

    /// Path of the asset relative to a resources root.
    pub fn rel_path(&self) -> PathBuf {
        match self {
            Self::Background(id) => PathBuf::from(format!("background/CardBase{id:06}.png")),
            Self::Character(id) => PathBuf::from(format!("character/CardChara{id:06}.png")),
            Self::CharacterMask(id) => {
                PathBuf::from(format!("holograph/CardCharaMask{id:06}.png"))
            }
            Self::General(name) => PathBuf::from(format!("general/{name}.png")),
            Self::File(path) => path.clone(),
        }
    }
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Background(id) => write!(f, "background/{id:06}"),
            Self::Character(id) => write!(f, "character/{id:06}"),
            Self::CharacterMask(id) => write!(f, "holograph/{id:06}"),
            Self::General(name) => write!(f, "general/{name}"),
            Self::File(path) => write!(f, "file:{}", path.display()),
        }
    }
}

/// Read-only keyed collection of rasters plus the character name index.
///
/// Implementations never substitute a fallback for a missing key.
pub trait AssetSource: Send + Sync {
    fn load(&self, key: &AssetKey) -> PassResult<RgbaImage>;

    /// Display name for a character id.
    fn character_name(&self, id: u32) -> PassResult<String>;
}

/// Index key used by `index/chara.json`: the character id zero-padded to 7 digits.
pub fn chara_index_key(id: u32) -> String {
    format!("{id:07}")
}

/// Asset store backed by a `resources/` style directory tree.
#[derive(Clone, Debug)]
pub struct FsAssetStore {
    root: PathBuf,
}

impl FsAssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, key: &AssetKey) -> PathBuf {
        match key {
            AssetKey::File(path) => path.clone(),
            other => self.root.join(other.rel_path()),
        }
    }

    fn read_bytes(&self, key: &AssetKey) -> PassResult<Vec<u8>> {
        let path = self.resolve(key);
        if !path.is_file() {
            return Err(PassError::asset_missing(
                key.to_string(),
                format!("no file at '{}'", path.display()),
            ));
        }
        std::fs::read(&path)
            .with_context(|| format!("read asset bytes from '{}'", path.display()))
            .map_err(PassError::from)
    }
}

impl AssetSource for FsAssetStore {
    fn load(&self, key: &AssetKey) -> PassResult<RgbaImage> {
        let bytes = self.read_bytes(key)?;
        decode_image(&bytes)
    }

    fn character_name(&self, id: u32) -> PassResult<String> {
        let path = self.root.join("index").join("chara.json");
        if !path.is_file() {
            return Err(PassError::asset_missing(
                "index/chara",
                format!("no file at '{}'", path.display()),
            ));
        }
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("read character index '{}'", path.display()))?;
        let index: BTreeMap<String, String> = serde_json::from_str(&text)
            .with_context(|| format!("parse character index '{}'", path.display()))?;
        index
            .get(&chara_index_key(id))
            .cloned()
            .ok_or_else(|| PassError::invalid_input(format!("character id '{id}' not found")))
    }
}

/// In-memory asset store, mainly for embedding and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryAssetStore {
    images: HashMap<AssetKey, RgbaImage>,
    names: HashMap<u32, String>,
}

impl MemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: AssetKey, image: RgbaImage) -> &mut Self {
        self.images.insert(key, image);
        self
    }

    pub fn insert_character_name(&mut self, id: u32, name: impl Into<String>) -> &mut Self {
        self.names.insert(id, name.into());
        self
    }

    pub fn contains(&self, key: &AssetKey) -> bool {
        self.images.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl AssetSource for MemoryAssetStore {
    fn load(&self, key: &AssetKey) -> PassResult<RgbaImage> {
        self.images
            .get(key)
            .cloned()
            .ok_or_else(|| PassError::asset_missing(key.to_string(), "not in memory store"))
    }

    fn character_name(&self, id: u32) -> PassResult<String> {
        self.names
            .get(&id)
            .cloned()
            .ok_or_else(|| PassError::invalid_input(format!("character id '{id}' not found")))
    }
}
