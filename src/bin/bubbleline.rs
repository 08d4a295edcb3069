use std::path::{Path, PathBuf};

use anyhow::Context as _;
use bubbleline::{
    Frame, Projection, RenderSettings, Scene, SceneBuilder, Step, TimelineData, ViewMode,
    render_svg,
};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "bubbleline", version)]
struct Cli {
    /// Log layout decisions (skipped steps, fallbacks) to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lay out a dataset and dump the primitive list as JSON.
    Scene(SceneArgs),
    /// Lay out a dataset and write a static SVG.
    Svg(SvgArgs),
}

#[derive(Parser, Debug)]
struct SceneArgs {
    /// Input timeline JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Projection; defaults to curved when the settings enable it, else horizontal.
    #[arg(long, value_enum)]
    projection: Option<ProjectionChoice>,

    /// Lay out a stored version instead of the current steps.
    #[arg(long)]
    version: Option<String>,

    /// Output JSON path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SvgArgs {
    /// Input timeline JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    #[arg(long, value_enum)]
    projection: Option<ProjectionChoice>,

    #[arg(long)]
    version: Option<String>,

    /// Output SVG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ProjectionChoice {
    Horizontal,
    Vertical,
    Curved,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .init();

    match cli.cmd {
        Command::Scene(args) => cmd_scene(args),
        Command::Svg(args) => cmd_svg(args),
    }
}

fn cmd_scene(args: SceneArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args.in_path, args.projection, args.version.as_deref())?;
    let json = serde_json::to_string_pretty(&scene).context("serialize scene")?;
    match args.out {
        Some(out) => {
            write_output(&out, &json)?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_svg(args: SvgArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args.in_path, args.projection, args.version.as_deref())?;
    write_output(&args.out, &render_svg(&scene, &Frame::settled()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn load_scene(
    in_path: &Path,
    projection: Option<ProjectionChoice>,
    version: Option<&str>,
) -> anyhow::Result<Scene> {
    let data = TimelineData::from_path(in_path)?;
    let (steps, settings): (&[Step], &RenderSettings) = match version {
        Some(name) => data
            .version(name)
            .with_context(|| format!("no version named '{name}' in '{}'", in_path.display()))?,
        None => (data.steps.as_slice(), &data.settings),
    };
    let projection = match projection {
        Some(ProjectionChoice::Horizontal) => Projection::LinearHorizontal,
        Some(ProjectionChoice::Vertical) => Projection::LinearVertical,
        Some(ProjectionChoice::Curved) => Projection::CurvedHorizontal,
        None => Projection::resolve(ViewMode::Horizontal, settings),
    };
    let scene = SceneBuilder::build(steps, &data.phases, settings, projection)?;
    for skipped in &scene.skipped {
        tracing::warn!(
            step = %skipped.step_id,
            phase = %skipped.phase,
            "step skipped: unknown phase"
        );
    }
    Ok(scene)
}

fn write_output(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("write '{}'", path.display()))
}
