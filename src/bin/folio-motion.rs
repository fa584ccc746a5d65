use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use folio_motion::{
    BootSequencer, Millis, PageConfig, PageId, Point, Runtime, ScrollProgress, Viewport,
};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(name = "folio-motion", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the page variants in gallery order.
    Gallery,
    /// Dump a built-in page configuration as JSON.
    Preset(PresetArgs),
    /// Render a page backdrop at one instant as a PNG.
    Frame(FrameArgs),
    /// Play a page's boot sequence and print each transcript change.
    Boot(BootArgs),
}

#[derive(Parser, Debug)]
struct PresetArgs {
    /// Page id (`one`..`seven`, `1`..`7` or `portfolio-N`).
    #[arg(long)]
    page: PageId,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Built-in page to render; not needed (and ignored) with `--config`.
    #[arg(long, required_unless_present = "config")]
    page: Option<PageId>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Page configuration JSON; takes precedence over `--page`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Time since mount in milliseconds.
    #[arg(long, default_value_t = 0)]
    time_ms: u64,

    #[arg(long, default_value_t = 1280)]
    width: u32,

    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Pointer position in pixels, as `x,y`.
    #[arg(long, value_parser = parse_point)]
    pointer: Option<Point>,

    /// Scroll progress in `[0, 1]`.
    #[arg(long, default_value_t = 0.0)]
    scroll: f64,

    /// Field seed; falls back to the config's seed, then a random one.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct BootArgs {
    /// Built-in page whose boot sequence to play; not needed (and ignored) with `--config`.
    #[arg(long, required_unless_present = "config")]
    page: Option<PageId>,

    /// Page configuration JSON; takes precedence over `--page`.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got '{s}'"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x: {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y: {e}"))?;
    Ok(Point::new(x, y))
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Gallery => cmd_gallery(),
        Command::Preset(args) => cmd_preset(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Boot(args) => cmd_boot(args),
    }
}

/// A config file wins over `--page`; clap guarantees one of them is present.
fn load_config(page: Option<PageId>, path: Option<&Path>) -> anyhow::Result<PageConfig> {
    if let Some(path) = path {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read page config '{}'", path.display()))?;
        let config = PageConfig::from_json(&json)
            .with_context(|| format!("parse page config '{}'", path.display()))?;
        if let Some(page) = page
            && page != config.id
        {
            tracing::warn!(%page, config = %config.id, "--page ignored in favour of --config");
        }
        return Ok(config);
    }
    let page = page.context("either --page or --config is required")?;
    folio_motion::preset(page).with_context(|| format!("build preset '{page}'"))
}

fn cmd_gallery() -> anyhow::Result<()> {
    for entry in folio_motion::gallery() {
        println!(
            "{:<14} {:<24} {:<20} {}",
            entry.id.route(),
            entry.title,
            entry.theme,
            entry.description
        );
    }
    Ok(())
}

fn cmd_preset(args: PresetArgs) -> anyhow::Result<()> {
    let config = load_config(Some(args.page), None)?;
    let json = config.to_json_pretty()?;
    match args.out {
        Some(out) => {
            std::fs::write(&out, json + "\n")
                .with_context(|| format!("write preset '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let config = load_config(args.page, args.config.as_deref())?;
    let viewport = Viewport::new(args.width, args.height)?;
    let seed = args
        .seed
        .or(config.seed)
        .unwrap_or_else(|| fastrand::u64(..));
    tracing::info!(page = %config.id, seed, time_ms = args.time_ms, "rendering frame");

    let frame = folio_motion::render_still(
        &config,
        viewport,
        Millis(args.time_ms),
        args.pointer,
        ScrollProgress::new(args.scroll),
        seed,
    )?
    .to_straight();

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {} (seed {seed})", args.out.display());
    Ok(())
}

fn cmd_boot(args: BootArgs) -> anyhow::Result<()> {
    let config = load_config(args.page, args.config.as_deref())?;
    let boot = config
        .boot
        .with_context(|| format!("page '{}' has no boot sequence", config.id))?;

    let runtime = Runtime::new(Viewport::default());
    let sequencer = BootSequencer::mount(&runtime, boot.script, boot.timing)?;

    let mut last = String::new();
    loop {
        let text = sequencer.transcript().join(" | ");
        if text != last {
            println!("[{:>6}ms] {text}", runtime.now().0);
            last = text;
        }
        if !sequencer.is_pending() {
            break;
        }
        let Some(due) = runtime.next_due() else {
            break;
        };
        runtime.advance_to(due);
    }
    println!(
        "[{:>6}ms] booted ({} ticks)",
        runtime.now().0,
        sequencer.ticks()
    );
    Ok(())
}
