use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "thumbforge", version, about = "Render platform-sized thumbnails")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one thumbnail to `thumbnail-<platform>.png`.
    Render(RenderArgs),
    /// List known platforms and their sizes.
    Platforms(PlatformsArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Target platform (defaults to the config's, else youtube).
    #[arg(long)]
    platform: Option<String>,

    /// Visual style.
    #[arg(long, value_enum)]
    style: Option<StyleChoice>,

    #[arg(long, default_value = "")]
    title: String,

    #[arg(long, default_value = "")]
    subtitle: String,

    /// Background color (`#rrggbb`, `rgb(...)`, ...).
    #[arg(long = "bg-color")]
    bg_color: Option<String>,

    /// Background image, cover-fitted to the canvas.
    #[arg(long = "bg-image")]
    bg_image: Option<PathBuf>,

    /// Title font file; overrides the config.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Subtitle font file (defaults to the title font).
    #[arg(long = "subtitle-font", requires = "font")]
    subtitle_font: Option<PathBuf>,

    /// JSON config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output directory.
    #[arg(long = "out-dir", default_value = ".")]
    out_dir: PathBuf,

    /// Also print the PNG as a `data:` URI on stdout.
    #[arg(long = "data-uri")]
    data_uri: bool,
}

#[derive(Parser, Debug)]
struct PlatformsArgs {
    /// JSON config file with extra platforms.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StyleChoice {
    Clean,
    Bold,
    Dramatic,
}

impl From<StyleChoice> for thumbforge::Style {
    fn from(c: StyleChoice) -> Self {
        match c {
            StyleChoice::Clean => thumbforge::Style::Clean,
            StyleChoice::Bold => thumbforge::Style::Bold,
            StyleChoice::Dramatic => thumbforge::Style::Dramatic,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Platforms(args) => cmd_platforms(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<thumbforge::ThumbConfig> {
    match path {
        Some(p) => Ok(thumbforge::ThumbConfig::from_path(p)?),
        None => Ok(thumbforge::ThumbConfig::default()),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let table = cfg.platform_table();

    // Start the decode before font discovery so the two overlap.
    let loader = args.bg_image.clone().map(thumbforge::BackgroundLoader::spawn);

    let platform_id = args
        .platform
        .as_deref()
        .unwrap_or_else(|| cfg.default_platform());
    let platform = table.resolve(platform_id)?.clone();

    let style = args
        .style
        .map(thumbforge::Style::from)
        .unwrap_or_else(|| cfg.default_style());
    let background_color = match &args.bg_color {
        Some(c) => thumbforge::parse_color(c).with_context(|| format!("--bg-color '{c}'"))?,
        None => cfg.default_background(),
    };

    let fonts = match &args.font {
        Some(title) => thumbforge::FontBook::from_files(title, args.subtitle_font.as_deref())?,
        None => cfg.font_book().context("load fonts (pass --font to use a font file)")?,
    };
    let mut renderer = thumbforge::Renderer::new(&fonts)?;

    let background_image = loader.and_then(thumbforge::BackgroundLoader::wait);
    if args.bg_image.is_some() && background_image.is_none() {
        eprintln!("warning: background image could not be loaded; using the color only");
    }

    let params = thumbforge::RenderParams::new(platform)
        .with_style(style)
        .with_title(args.title)
        .with_subtitle(args.subtitle)
        .with_background_color(background_color)
        .with_background_image(background_image);

    let canvas = renderer.render_new(&params)?;
    let path = thumbforge::save_png(&canvas, &args.out_dir, &params.platform.id)?;
    eprintln!("wrote {}", path.display());

    if args.data_uri {
        println!("{}", thumbforge::png_data_uri(&canvas)?);
    }
    Ok(())
}

fn cmd_platforms(args: PlatformsArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    for spec in cfg.platform_table().iter() {
        println!("{:<12} {}", spec.id, spec.size);
    }
    Ok(())
}
