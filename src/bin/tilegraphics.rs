use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tilegraphics::{Color, Engine, FlushStats, ImageDisplay, SceneDocument};

#[derive(Parser, Debug)]
#[command(name = "tilegraphics", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a scene document as a PNG.
    Render(RenderArgs),
    /// Run a built-in animation and report how many tiles each frame sends.
    Demo(DemoArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct DemoArgs {
    /// Which animation to run.
    #[arg(long, value_enum)]
    name: DemoName,

    /// Number of animation frames after the initial one.
    #[arg(long, default_value_t = 60)]
    frames: u32,

    /// Output PNG path for the last frame.
    #[arg(long)]
    out: PathBuf,

    #[arg(long, default_value_t = 128)]
    width: u32,

    #[arg(long, default_value_t = 160)]
    height: u32,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum DemoName {
    /// A yellow square bouncing between the left and right edge.
    Bounce,
    /// A white layer rolling down and up over a red square.
    Reveal,
    /// A square moving diagonally inside a clipping layer.
    Layers,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Demo(args) => cmd_demo(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let doc = SceneDocument::from_path(&args.in_path)
        .with_context(|| format!("load scene '{}'", args.in_path.display()))?;
    let img = doc.render().context("render scene")?;
    save(&img, &args.out)
}

fn cmd_demo(args: DemoArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.width > 0 && args.height > 0,
        "demo size must be non-zero, got {}x{}",
        args.width,
        args.height
    );
    let w = i32::try_from(args.width).context("width out of range")?;
    let h = i32::try_from(args.height).context("height out of range")?;

    let mut engine = Engine::new(ImageDisplay::new(args.width, args.height));
    let mut step = demo_step(args.name, &mut engine, w, h)?;

    let first = engine.flush()?;
    report(0, first);

    let mut total = first.tiles_drawn;
    for frame in 1..=args.frames {
        step(&mut engine)?;
        let stats = engine.flush()?;
        report(frame, stats);
        total += stats.tiles_drawn;
    }

    eprintln!(
        "{} frames, {} tiles sent, {:.1} per frame",
        u64::from(args.frames) + 1,
        total,
        total as f64 / (f64::from(args.frames) + 1.0)
    );
    save(engine.display(), &args.out)
}

type Step = Box<dyn FnMut(&mut Engine<ImageDisplay>) -> anyhow::Result<()>>;

/// Build the demo scene and return the per-frame update.
fn demo_step(
    name: DemoName,
    engine: &mut Engine<ImageDisplay>,
    w: i32,
    h: i32,
) -> anyhow::Result<Step> {
    const YELLOW: Color = Color::rgb(255, 255, 0);

    match name {
        DemoName::Bounce => {
            let (mut x, y, size) = (30, 30, 40);
            let rect = engine.new_rectangle(x, y, size, size, YELLOW)?;
            let mut dir = 1;
            Ok(Box::new(move |engine: &mut Engine<ImageDisplay>| -> anyhow::Result<()> {
                if x + size >= w {
                    dir = -1;
                }
                if x <= 0 {
                    dir = 1;
                }
                x += dir;
                engine.rectangle(rect)?.move_to(x, y, size, size);
                Ok(())
            }))
        }
        DemoName::Reveal => {
            let layer = engine.new_layer(0, 0, w, 0, Color::WHITE)?;
            engine
                .layer(layer)?
                .new_rectangle(w / 2 - 10, h / 2 - 10, 20, 20, Color::rgb(255, 0, 0))?;
            let mut height = 0;
            let mut dir = 4;
            Ok(Box::new(move |engine: &mut Engine<ImageDisplay>| -> anyhow::Result<()> {
                if height >= h {
                    dir = -4;
                }
                if height <= 0 {
                    dir = 4;
                }
                height = (height + dir).clamp(0, h);
                engine.layer(layer)?.move_to(0, 0, w, height);
                Ok(())
            }))
        }
        DemoName::Layers => {
            let layer = engine.new_layer(21, 10, w - 38, 80, Color::rgb(0, 255, 0))?;
            let (mut x, mut y, size) = (10, 10, 40);
            let rect = engine.layer(layer)?.new_rectangle(x, y, size, size, YELLOW)?;
            let mut dir = 1;
            Ok(Box::new(move |engine: &mut Engine<ImageDisplay>| -> anyhow::Result<()> {
                // The square leaves the layer on purpose to show clipping.
                if x + size >= w - 20 {
                    dir = -1;
                }
                if x <= -20 {
                    dir = 1;
                }
                x += dir;
                y += dir;
                engine.rectangle(rect)?.move_to(x, y, size, size);
                Ok(())
            }))
        }
    }
}

fn report(frame: u32, stats: FlushStats) {
    println!("frame {frame}: {} tiles", stats.tiles_drawn);
}

fn save(img: &ImageDisplay, out: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    img.save_png(out)
        .with_context(|| format!("write png '{}'", out.display()))?;
    eprintln!("wrote {}", out.display());
    Ok(())
}
