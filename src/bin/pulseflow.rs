use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "pulseflow", version)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate N frames and write the last one as a PNG.
    Frame(FrameArgs),
    /// Simulate N frames and write every one as a numbered PNG.
    Sequence(SequenceArgs),
    /// Write the reduced-motion fallback as SVG, or as PNG when `--out` ends in `.png`.
    Fallback(FallbackArgs),
    /// Print a preset as JSON.
    Preset {
        /// Preset name.
        name: String,
    },
}

#[derive(Args, Debug)]
struct Source {
    /// Built-in preset.
    #[arg(long, conflicts_with = "config", default_value = "ai-flow")]
    preset: String,

    /// Surface config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct Canvas {
    /// Logical width.
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    /// Logical height.
    #[arg(long, default_value_t = 400.0)]
    height: f64,

    /// Device pixel ratio (capped by the config's `max_dpr`).
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// Frames to simulate.
    #[arg(long, default_value_t = 120)]
    frames: u64,

    /// Simulated frame interval in milliseconds.
    #[arg(long, default_value_t = 16.0)]
    frame_ms: f64,

    /// Backend to use.
    #[arg(long, value_enum, default_value_t = BackendChoice::Cpu)]
    backend: BackendChoice,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    source: Source,

    #[command(flatten)]
    canvas: Canvas,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SequenceArgs {
    #[command(flatten)]
    source: Source,

    #[command(flatten)]
    canvas: Canvas,

    /// Output directory for `frame_00000.png` ...
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct FallbackArgs {
    #[command(flatten)]
    source: Source,

    /// Output `.svg` or `.png` path.
    #[arg(long)]
    out: PathBuf,

    /// Raster width for PNG output (defaults to the view box).
    #[arg(long)]
    width: Option<u32>,

    /// Raster height for PNG output (defaults to the view box).
    #[arg(long)]
    height: Option<u32>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackendChoice {
    Cpu,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Sequence(args) => cmd_sequence(args),
        Command::Fallback(args) => cmd_fallback(args),
        Command::Preset { name } => cmd_preset(&name),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(source: &Source) -> anyhow::Result<pulseflow::SurfaceConfig> {
    let cfg = match &source.config {
        Some(path) => pulseflow::SurfaceConfig::from_path(path)?,
        None => pulseflow::preset(&source.preset)?,
    };
    cfg.validate()?;
    Ok(cfg)
}

/// Mount a surface headlessly and fire `canvas.frames` frame callbacks, handing each rendered
/// frame to `sink`.
fn drive(
    cfg: pulseflow::SurfaceConfig,
    canvas: &Canvas,
    mut sink: impl FnMut(u64, &pulseflow::FrameRGBA) -> anyhow::Result<()>,
) -> anyhow::Result<()> {
    let backend = match canvas.backend {
        BackendChoice::Cpu => pulseflow::BackendKind::Cpu,
    };
    let mut env = pulseflow::HeadlessEnvironment::new(canvas.width, canvas.height, canvas.dpr);
    let mut sched = pulseflow::ManualScheduler::new();
    let mut surface = pulseflow::AnimationSurface::new(
        cfg,
        pulseflow::SurfaceOptions {
            enabled: true,
            backend,
        },
    )?;
    surface.mount(&mut env, &mut sched)?;

    let result = (|| -> anyhow::Result<()> {
        if surface.state() != pulseflow::SurfaceState::Running {
            anyhow::bail!(
                "surface did not start (state {:?}); check the canvas size",
                surface.state()
            );
        }
        let mut now = 0.0;
        for i in 0..canvas.frames {
            let handle = sched
                .take_next()
                .context("frame loop stopped without a pending request")?;
            surface.on_frame(handle, now, &mut sched)?;
            let frame = surface.last_frame().context("no frame rendered")?;
            sink(i, frame)?;
            now += canvas.frame_ms;
        }
        Ok(())
    })();

    surface.unmount(&mut env, &mut sched);
    debug_assert_eq!(env.subscriber_count(), 0);
    result
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.source)?;
    let mut last = None;
    drive(cfg, &args.canvas, |_, frame| {
        last = Some(frame.clone());
        Ok(())
    })?;
    let frame = last.context("no frames requested (use --frames >= 1)")?;
    write_png(&args.out, &frame)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sequence(args: SequenceArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.source)?;
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    drive(cfg, &args.canvas, |i, frame| {
        write_png(&args.out_dir.join(format!("frame_{i:05}.png")), frame)
    })?;
    eprintln!(
        "wrote {} frames to {}",
        args.canvas.frames,
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_fallback(args: FallbackArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.source)?;
    let fallback = pulseflow::StaticFallback::build(&cfg)?;
    create_parent(&args.out)?;

    let is_png = args
        .out
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("png"));
    if is_png {
        let [vw, vh] = fallback.view_box();
        let width = args.width.unwrap_or(vw.round() as u32);
        let height = args.height.unwrap_or(vh.round() as u32);
        let frame = fallback.rasterize(width, height)?;
        write_png(&args.out, &frame)?;
    } else {
        std::fs::write(&args.out, fallback.svg())
            .with_context(|| format!("write svg '{}'", args.out.display()))?;
    }
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_preset(name: &str) -> anyhow::Result<()> {
    let cfg = pulseflow::preset(name)?;
    println!("{}", cfg.to_json_pretty()?);
    Ok(())
}

fn create_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn write_png(path: &Path, frame: &pulseflow::FrameRGBA) -> anyhow::Result<()> {
    create_parent(path)?;
    image::save_buffer_with_format(
        path,
        &frame.to_straight_rgba(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}
