use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use dxpass::{
    CardRenderer, FontFace, FsAssetStore, IconKind, IconPreset, Identifier, PassRequest,
    PassType, QrContent, Stage,
};

const DEFAULT_FONT: &str = "font/SEGA_MARUGOTHICDB.ttf";

#[derive(Parser, Debug)]
#[command(name = "dxpass", version, about = "Generate a DX pass card image.")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single card as a PNG.
    Render(RenderArgs),
    /// Render every request of a JSON array into a directory.
    Batch(BatchArgs),
}

#[derive(Args, Debug)]
struct Resources {
    /// Resources root holding `background/`, `character/`, `general/`, `holograph/`, `index/`.
    #[arg(long, default_value = "resources")]
    assets: PathBuf,

    /// Font file; relative paths resolve against the resources root.
    #[arg(long, default_value = DEFAULT_FONT)]
    font: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    resources: Resources,

    /// Pass type: Bronze, Silver, Gold or Freedom, in any case.
    #[arg(short = 'l', long = "pass-level", value_parser = str::parse::<PassType>, default_value = "Gold")]
    pass_type: PassType,

    /// Character id.
    #[arg(short = 'c', long = "chara")]
    character: u32,

    /// Background id.
    #[arg(short = 'b', long)]
    background: u32,

    /// Override the displayed character name.
    #[arg(short = 'n', long = "name")]
    character_name: Option<String>,

    /// Player name; half-width characters become full-width unless --half-width is given.
    #[arg(short = 'p', long, default_value = dxpass::DEFAULT_PLAYER_NAME)]
    player_name: String,

    /// Convert half-width characters in the player name to full-width (default).
    #[arg(long, conflicts_with = "half_width")]
    full_width: bool,

    /// Keep the player name as given.
    #[arg(long)]
    half_width: bool,

    /// Rating; hidden as five dashes when omitted.
    #[arg(short = 'r', long, allow_negative_numbers = true)]
    rating: Option<i64>,

    /// Pick the rating tile from this value instead of --rating.
    #[arg(long, allow_negative_numbers = true)]
    rating_override: Option<i64>,

    /// Friend code; replaced by a placeholder when omitted.
    #[arg(short = 'f', long)]
    friend_code: Option<String>,

    /// Card identifier; integers are grouped every four digits unless --raw-aime is given.
    #[arg(short = 'a', long = "aime", default_value = "")]
    identifier: String,

    /// Draw the identifier as given.
    #[arg(long = "raw-aime")]
    raw_identifier: bool,

    /// Version text.
    #[arg(short = 'v', long = "version-text", default_value = "")]
    version_text: String,

    /// QR code payload; a dummy code is drawn when omitted.
    #[arg(short = 'q', long = "qr-code", conflicts_with = "qr_empty")]
    qr_code: Option<String>,

    /// Leave the QR plate blank.
    #[arg(long)]
    qr_empty: bool,

    /// Icons, in display order: Freedom, Level, Rating, Master, Power1..Power4, in any case.
    #[arg(
        short = 'i',
        long = "icon",
        value_parser = str::parse::<IconKind>,
        num_args = 0..,
        conflicts_with = "preset"
    )]
    icons: Option<Vec<IconKind>>,

    /// Named icon row.
    #[arg(long, value_enum, ignore_case = true)]
    preset: Option<IconPreset>,

    /// Expiry date (YYYYMMDD, YYYY-MM-DD or YYYY/MM/DD); defaults to 14 days from today.
    #[arg(short = 'd', long)]
    date: Option<String>,

    /// Holo texture; enables the experimental holographic effect.
    #[arg(long)]
    holo: Option<PathBuf>,

    /// Draw the info plate behind the character name.
    #[arg(long)]
    info_plate: bool,

    /// Stages to leave out.
    #[arg(long, value_enum, value_delimiter = ',')]
    skip: Vec<Stage>,

    /// Output PNG path.
    #[arg(short = 'o', long, default_value = "output.png")]
    out: PathBuf,

    /// Fail instead of replacing an existing output file.
    #[arg(long)]
    no_overwrite: bool,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    #[command(flatten)]
    resources: Resources,

    /// JSON array of requests.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory; cards are written as `card-<index>.png`.
    #[arg(long)]
    out_dir: PathBuf,

    /// Fail instead of replacing existing output files.
    #[arg(long)]
    no_overwrite: bool,
}

impl RenderArgs {
    fn to_request(&self) -> PassRequest {
        let qr = if self.qr_empty {
            QrContent::Empty
        } else {
            QrContent::from_option(self.qr_code.clone())
        };
        let mut req = PassRequest::new(self.background, self.character);
        req.pass_type = self.pass_type;
        req.character_name = self.character_name.clone();
        req.player_name = self.player_name.clone();
        req.full_width = self.full_width || !self.half_width;
        req.rating = self.rating;
        req.rating_override = self.rating_override;
        req.friend_code = self.friend_code.clone();
        req.identifier = Identifier::parse(&self.identifier);
        req.raw_identifier = self.raw_identifier;
        req.version = self.version_text.clone();
        req.qr = qr;
        req.icons = self.icons.clone();
        req.icon_preset = self.preset;
        req.date = self.date.clone();
        req.holo = self.holo.clone();
        req.info_plate = self.info_plate;
        req.skip = self.skip.iter().copied().collect();
        req
    }
}

impl Resources {
    fn open(&self) -> anyhow::Result<(FsAssetStore, Arc<FontFace>)> {
        let font_path = if self.font.is_absolute() {
            self.font.clone()
        } else {
            self.assets.join(&self.font)
        };
        let font = FontFace::load(&font_path)
            .with_context(|| format!("load font '{}'", font_path.display()))?;
        Ok((FsAssetStore::new(&self.assets), font))
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Batch(args) => cmd_batch(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let req = args.to_request();
    let (assets, font) = args.resources.open()?;
    let renderer = CardRenderer::new(&assets, &*font);

    let card = renderer.render(&req).context("render card")?;
    dxpass::write_png(&card, &args.out, !args.no_overwrite)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn read_requests(path: &Path) -> anyhow::Result<Vec<PassRequest>> {
    let f = File::open(path).with_context(|| format!("open requests '{}'", path.display()))?;
    let r = BufReader::new(f);
    let reqs: Vec<PassRequest> =
        serde_json::from_reader(r).with_context(|| "parse requests JSON")?;
    Ok(reqs)
}

fn cmd_batch(args: BatchArgs) -> anyhow::Result<()> {
    let reqs = read_requests(&args.in_path)?;
    let (assets, font) = args.resources.open()?;
    let renderer = CardRenderer::new(&assets, &*font);

    let mut failed = 0usize;
    for (i, result) in renderer.render_batch(&reqs).into_iter().enumerate() {
        let out = args.out_dir.join(format!("card-{i:03}.png"));
        match result {
            Ok(card) => {
                dxpass::write_png(&card, &out, !args.no_overwrite)?;
                eprintln!("wrote {}", out.display());
            }
            Err(e) => {
                failed += 1;
                tracing::error!(index = i, error = %e, "render failed");
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} cards failed to render", reqs.len());
    }
    Ok(())
}
