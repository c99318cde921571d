use chrono::NaiveDate;
use image::RgbaImage;
use rayon::prelude::*;

use crate::{
    assets::store::{AssetKey, AssetSource},
    foundation::{
        core::{Layer, Pos, blank_canvas},
        error::{PassError, PassResult},
    },
    layout::{
        fields::{normalize_date, to_full_width},
        icons, qr,
        qr::QrContent,
        rating::{self, RATING_TILE_POS},
        pass::SERIAL_PLATE_POS,
    },
    model::PassRequest,
    render::{
        composite::{Rgba8, composite_layer},
        holo,
    },
    text::{
        face::{Anchor, TextMetrics, text_layer, validate_text},
        fit::{fitted_layer, validate_width},
    },
};

const BLACK: Rgba8 = [0, 0, 0, 255];
const WHITE: Rgba8 = [255, 255, 255, 255];

const PLAYER_PLATE_POS: Pos = Pos::new(457, 107);
const PLAYER_NAME_POS: Pos = Pos::new(470, 118);
const PLAYER_NAME_SIZE: f32 = 28.0;
/// Six and a half full-width `Ａ`s.
const PLAYER_NAME_SLOT: u32 = 182;
const PLAYER_NAME_MAX: u32 = 273;

const FRIEND_PLATE_POS: Pos = Pos::new(457, 148);
const FRIEND_CODE_POS: Pos = Pos::new(628, 156);
const NO_FRIEND_CODE_POS: Pos = Pos::new(533, 160);
const FRIEND_CODE_SIZE: f32 = 20.0;
const FRIEND_CODE_MAX: u32 = 195;

const IDENTIFIER_POS: Pos = Pos::new(156, 1006);
const IDENTIFIER_MAX: u32 = 270;
const VERSION_POS: Pos = Pos::new(425, 1006);
const VERSION_MAX: u32 = 190;
const FOOTER_SIZE: f32 = 16.0;

const INFO_PLATE_POS: Pos = Pos::new(0, 790);

const CHARA_NAME_POS: Pos = Pos::new(145, 802);
const CHARA_NAME_SIZES: [f32; 4] = [15.0, 14.0, 13.0, 12.0];
const CHARA_NAME_MAX: u32 = 220;

const EXPIRY_LABEL: &str = "ブースト期限";
const EXPIRY_LABEL_POS: Pos = Pos::new(42, 832);
const EXPIRY_LABEL_SIZE: f32 = 15.0;
const EXPIRY_DATE_POS: Pos = Pos::new(156, 831);
const EXPIRY_DATE_SIZE: f32 = 20.0;

/// The ten drawing stages, in their fixed order.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Base,
    Rating,
    PlayerName,
    FriendCode,
    Identifier,
    Version,
    QrCode,
    Icons,
    InfoPlate,
    CharacterName,
}

impl Stage {
    pub const ALL: [Stage; 10] = [
        Stage::Base,
        Stage::Rating,
        Stage::PlayerName,
        Stage::FriendCode,
        Stage::Identifier,
        Stage::Version,
        Stage::QrCode,
        Stage::Icons,
        Stage::InfoPlate,
        Stage::CharacterName,
    ];

    /// 1-based position in the draw order.
    pub fn number(self) -> usize {
        self as usize + 1
    }

    pub fn label(self) -> String {
        format!("[{}/{}]", self.number(), Stage::ALL.len())
    }
}

/// Draws cards from requests over a shared asset source and font face.
///
/// The renderer holds only read-only state, so one instance can serve many renders, including
/// parallel ones through [`CardRenderer::render_batch`].
#[derive(Clone, Copy)]
pub struct CardRenderer<'a> {
    assets: &'a dyn AssetSource,
    text: &'a dyn TextMetrics,
    today: NaiveDate,
}

impl<'a> CardRenderer<'a> {
    pub fn new(assets: &'a dyn AssetSource, text: &'a dyn TextMetrics) -> Self {
        Self {
            assets,
            text,
            today: chrono::Local::now().date_naive(),
        }
    }

    /// Pin "today" for the default expiry date.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Run every stage not skipped by `req` and return the finished card.
    ///
    /// Any error aborts the render; no partially drawn card is returned.
    #[tracing::instrument(skip_all, fields(background = req.background, character = req.character))]
    pub fn render(&self, req: &PassRequest) -> PassResult<RgbaImage> {
        req.validate()?;
        let mut canvas = blank_canvas();
        for stage in Stage::ALL {
            if req.skips(stage) {
                tracing::info!(stage = %stage.label(), ?stage, "skipped");
                continue;
            }
            tracing::info!(stage = %stage.label(), ?stage, "drawing");
            canvas = self.draw_stage(stage, req, canvas)?;
        }
        Ok(canvas)
    }

    /// Render independent requests in parallel; results keep the input order.
    #[tracing::instrument(skip_all, fields(count = reqs.len()))]
    pub fn render_batch(&self, reqs: &[PassRequest]) -> Vec<PassResult<RgbaImage>> {
        reqs.par_iter().map(|req| self.render(req)).collect()
    }

    pub fn draw_stage(
        &self,
        stage: Stage,
        req: &PassRequest,
        canvas: RgbaImage,
    ) -> PassResult<RgbaImage> {
        match stage {
            Stage::Base => self.draw_base(req, canvas),
            Stage::Rating => self.draw_rating(req, canvas),
            Stage::PlayerName => self.draw_player_name(req, canvas),
            Stage::FriendCode => self.draw_friend_code(req, canvas),
            Stage::Identifier => self.draw_identifier(req, canvas),
            Stage::Version => self.draw_version(req, canvas),
            Stage::QrCode => self.draw_qr_code(req, canvas),
            Stage::Icons => self.draw_icons(req, canvas),
            Stage::InfoPlate => self.draw_info_plate(req, canvas),
            Stage::CharacterName => self.draw_character_name(req, canvas),
        }
    }

    fn general(&self, name: &str, pos: Pos) -> PassResult<Layer> {
        Ok(Layer::new(self.assets.load(&AssetKey::general(name))?, pos))
    }

    fn draw_base(&self, req: &PassRequest, mut canvas: RgbaImage) -> PassResult<RgbaImage> {
        let background = Layer::at_origin(self.assets.load(&AssetKey::Background(req.background))?);
        let character = Layer::at_origin(self.assets.load(&AssetKey::Character(req.character))?);
        let pass_base = self.general(req.pass_type.base_asset(), Pos::ORIGIN)?;
        let pass_icon = self.general(req.pass_type.icon_asset(), req.pass_type.icon_offset())?;
        let serial = self.general("SerialCode", SERIAL_PLATE_POS)?;
        let holo = req
            .holo
            .as_ref()
            .map(|path| holo::prepare(self.assets, req.character, &AssetKey::File(path.clone())))
            .transpose()?;

        composite_layer(&mut canvas, &background);
        if let Some(h) = &holo {
            composite_layer(&mut canvas, &h.base);
        }
        composite_layer(&mut canvas, &character);
        if let Some(h) = &holo {
            composite_layer(&mut canvas, &h.character);
        }
        composite_layer(&mut canvas, &pass_base);
        if let Some(h) = &holo {
            composite_layer(&mut canvas, &h.frame);
        }
        composite_layer(&mut canvas, &pass_icon);
        composite_layer(&mut canvas, &serial);
        Ok(canvas)
    }

    fn draw_rating(&self, req: &PassRequest, mut canvas: RgbaImage) -> PassResult<RgbaImage> {
        // An override of 0 counts as no override.
        let tier_source = req
            .rating_override
            .filter(|&r| r != 0)
            .or(req.rating)
            .unwrap_or(0);
        let tier = rating::tier_for(tier_source)?;
        let glyphs = rating::digits_of(req.rating)?;
        if req.rating.is_none() {
            tracing::info!("rating hidden");
        }

        let mut layers = vec![self.general(&tier.asset_name(), RATING_TILE_POS)?];
        for (glyph, pos) in rating::glyph_positions(&glyphs) {
            layers.push(self.general(&glyph.asset_name(), pos)?);
        }
        for layer in &layers {
            composite_layer(&mut canvas, layer);
        }
        Ok(canvas)
    }

    fn draw_player_name(&self, req: &PassRequest, mut canvas: RgbaImage) -> PassResult<RgbaImage> {
        let name = if req.full_width {
            to_full_width(&req.player_name)
        } else {
            req.player_name.clone()
        };
        validate_text(self.text, &name)?;

        let plate = self.general("Player", PLAYER_PLATE_POS)?;
        let text = fitted_layer(
            self.text,
            &name,
            PLAYER_NAME_SIZE,
            PLAYER_NAME_SLOT,
            PLAYER_NAME_MAX,
            PLAYER_NAME_POS,
            BLACK,
        )
        .inspect_err(|e| tracing::error!(overflow = ?e.overflow_px(), "player name too wide"))?;

        composite_layer(&mut canvas, &plate);
        composite_layer(&mut canvas, &text);
        Ok(canvas)
    }

    fn draw_friend_code(&self, req: &PassRequest, mut canvas: RgbaImage) -> PassResult<RgbaImage> {
        let plate = self.general("Friend", FRIEND_PLATE_POS)?;
        let overlay = match &req.friend_code {
            Some(code) => {
                validate_text(self.text, code)?;
                validate_width(self.text, code, FRIEND_CODE_SIZE, FRIEND_CODE_MAX)?;
                text_layer(
                    self.text,
                    code,
                    FRIEND_CODE_SIZE,
                    FRIEND_CODE_POS,
                    Anchor::MiddleTop,
                    BLACK,
                )
            }
            None => {
                tracing::info!("friend code hidden");
                self.general("NoFriendCode", NO_FRIEND_CODE_POS)?
            }
        };
        composite_layer(&mut canvas, &plate);
        composite_layer(&mut canvas, &overlay);
        Ok(canvas)
    }

    fn draw_footer_text(
        &self,
        mut canvas: RgbaImage,
        text: &str,
        max_px: u32,
        pos: Pos,
    ) -> PassResult<RgbaImage> {
        validate_text(self.text, text)?;
        validate_width(self.text, text, FOOTER_SIZE, max_px)?;
        let layer = text_layer(self.text, text, FOOTER_SIZE, pos, Anchor::LeftTop, WHITE);
        composite_layer(&mut canvas, &layer);
        Ok(canvas)
    }

    fn draw_identifier(&self, req: &PassRequest, canvas: RgbaImage) -> PassResult<RgbaImage> {
        let text = req.identifier.display(req.raw_identifier)?;
        self.draw_footer_text(canvas, &text, IDENTIFIER_MAX, IDENTIFIER_POS)
    }

    fn draw_version(&self, req: &PassRequest, canvas: RgbaImage) -> PassResult<RgbaImage> {
        self.draw_footer_text(canvas, &req.version, VERSION_MAX, VERSION_POS)
    }

    fn draw_qr_code(&self, req: &PassRequest, mut canvas: RgbaImage) -> PassResult<RgbaImage> {
        let plate = self.general("QRCodeBase", qr::QR_BASE_POS)?;
        let code = match &req.qr {
            QrContent::Empty => {
                tracing::info!("qr code left blank");
                None
            }
            QrContent::Placeholder => {
                tracing::info!("qr code uses the placeholder");
                Some(self.general("DummyQRCode", qr::DUMMY_QR_POS)?)
            }
            QrContent::Payload(payload) => {
                let (plan, layer) = qr::encode(payload)?;
                tracing::debug!(?plan, "qr code encoded");
                Some(layer)
            }
        };
        composite_layer(&mut canvas, &plate);
        if let Some(layer) = &code {
            composite_layer(&mut canvas, layer);
        }
        Ok(canvas)
    }

    fn draw_icons(&self, req: &PassRequest, mut canvas: RgbaImage) -> PassResult<RgbaImage> {
        let row = req.icon_row();
        let placed = icons::layout(row.as_deref(), icons::slot_limit(req.draws_qr()))?;
        if placed.is_empty() {
            tracing::info!("no icons");
        }
        let layers = placed
            .into_iter()
            .map(|(icon, pos)| self.general(icon.asset_name(), pos))
            .collect::<PassResult<Vec<_>>>()?;
        for layer in &layers {
            composite_layer(&mut canvas, layer);
        }
        Ok(canvas)
    }

    fn draw_info_plate(&self, req: &PassRequest, mut canvas: RgbaImage) -> PassResult<RgbaImage> {
        if !req.info_plate {
            return Ok(canvas);
        }
        composite_layer(&mut canvas, &self.general("Name", INFO_PLATE_POS)?);
        Ok(canvas)
    }

    fn draw_character_name(
        &self,
        req: &PassRequest,
        mut canvas: RgbaImage,
    ) -> PassResult<RgbaImage> {
        let name = match &req.character_name {
            Some(name) => {
                tracing::info!("using character name override");
                name.clone()
            }
            None => self.assets.character_name(req.character)?,
        };
        validate_text(self.text, &name)?;
        let (size, pos) = self.character_name_fit(&name)?;
        let date = normalize_date(req.date.as_deref(), self.today)?;

        let layers = [
            text_layer(self.text, &name, size, pos, Anchor::MiddleTop, BLACK),
            text_layer(
                self.text,
                EXPIRY_LABEL,
                EXPIRY_LABEL_SIZE,
                EXPIRY_LABEL_POS,
                Anchor::LeftTop,
                BLACK,
            ),
            text_layer(
                self.text,
                &date,
                EXPIRY_DATE_SIZE,
                EXPIRY_DATE_POS,
                Anchor::LeftTop,
                BLACK,
            ),
        ];
        for layer in &layers {
            composite_layer(&mut canvas, layer);
        }
        Ok(canvas)
    }

    /// Largest of the candidate sizes at which `name` fits; size 12 sits one pixel lower.
    fn character_name_fit(&self, name: &str) -> PassResult<(f32, Pos)> {
        let mut last_width = 0;
        for size in CHARA_NAME_SIZES {
            last_width = self.text.measure(name, size).width;
            if last_width <= CHARA_NAME_MAX {
                let dy = if size == 12.0 { 1 } else { 0 };
                return Ok((size, CHARA_NAME_POS.offset(0, dy)));
            }
        }
        tracing::error!(
            overflow = last_width - CHARA_NAME_MAX,
            "character name too wide"
        );
        Err(PassError::width_overflow(name, last_width, CHARA_NAME_MAX))
    }
}
