use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use std::time::Instant;

const RENDER_OUTPUT: &str = "target/x-render.png";

#[derive(Parser)]
#[command(name = "x")]
#[command(about = "Development automation for raster3d")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// fmt check, clippy, tests and a short headless render
    Ci,
    /// fmt check and clippy only
    Lint {
        /// Apply formatting and clippy suggestions instead of checking
        #[arg(long)]
        fix: bool,
    },
    /// Run tests, optionally limited to one area
    Test {
        #[arg(value_enum)]
        area: Option<Area>,
    },
    /// Run the criterion benches, optionally filtered by name
    Bench { filter: Option<String> },
    /// Render the demo scene and check an image came out
    Render {
        #[arg(default_value = RENDER_OUTPUT)]
        output: String,
        #[arg(short = 'n', long, default_value = "30")]
        frames: u32,
        #[arg(long)]
        release: bool,
    },
}

/// Test areas and the filters that select them
#[derive(Clone, Copy, ValueEnum)]
enum Area {
    /// Renderer, clipping, classification and rasterizers
    Pipeline,
    /// Meshes, textures, fonts, lights
    Resource,
    /// Float comparison, matrices, rectangles and segments
    Math,
    /// tests/ only: scenarios, properties, integration
    Scenes,
    /// Doc examples
    Doc,
}

impl Area {
    fn cargo_args(self) -> Vec<&'static str> {
        match self {
            Area::Pipeline => vec!["test", "--lib", "core::pipeline"],
            Area::Resource => vec!["test", "--lib", "core::resource"],
            Area::Math => vec!["test", "--lib", "--", "core::math", "core::geometry"],
            Area::Scenes => vec!["test", "--tests", "--", "--skip", "core::"],
            Area::Doc => vec!["test", "--doc"],
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let start = Instant::now();

    match cli.command {
        Commands::Ci => {
            step("fmt", || cargo(&["fmt", "--all", "--", "--check"]))?;
            step("clippy", clippy_check)?;
            step("test", || cargo(&["test", "--all-targets"]))?;
            step("doc test", || cargo(&Area::Doc.cargo_args()))?;
            step("render", || render(RENDER_OUTPUT, 3, false))?;
        }
        Commands::Lint { fix: true } => {
            cargo(&["fmt", "--all"])?;
            cargo(&["clippy", "--all-targets", "--fix", "--allow-dirty"])?;
        }
        Commands::Lint { fix: false } => {
            step("fmt", || cargo(&["fmt", "--all", "--", "--check"]))?;
            step("clippy", clippy_check)?;
        }
        Commands::Test { area: None } => cargo(&["test"])?,
        Commands::Test { area: Some(area) } => cargo(&area.cargo_args())?,
        Commands::Bench { filter } => match filter {
            Some(filter) => cargo(&["bench", "--bench", "raster_bench", "--", filter.as_str()])?,
            None => cargo(&["bench"])?,
        },
        Commands::Render {
            output,
            frames,
            release,
        } => render(&output, frames, release)?,
    }

    println!(
        "{} {}",
        "✓ done in".green().bold(),
        format!("{:.2}s", start.elapsed().as_secs_f64()).bold()
    );
    Ok(())
}

fn clippy_check() -> Result<()> {
    cargo(&["clippy", "--all-targets", "--", "-D", "warnings"])
}

/// Run one named stage of a multi-stage command
fn step(name: &str, task: impl FnOnce() -> Result<()>) -> Result<()> {
    println!("{} {}", "→".blue(), name.bold());
    task().inspect_err(|_| println!("{} {} failed", "✗".red().bold(), name))
}

fn render(output: &str, frames: u32, release: bool) -> Result<()> {
    let path = Path::new(output);
    if path.exists() {
        fs::remove_file(path)?;
    }

    let frames = frames.to_string();
    let mut args = vec!["run", "--bin", "raster3d"];
    if release {
        args.push("--release");
    }
    args.extend(["--", "--output", output, "--frames", &frames]);
    cargo(&args)?;

    let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    if size == 0 {
        bail!("no image written to {}", output);
    }
    println!("{} {} ({} bytes)", "✓".green(), output.cyan(), size);
    Ok(())
}

fn cargo(args: &[&str]) -> Result<()> {
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        bail!("cargo {} failed: {}", args.join(" "), status);
    }
    Ok(())
}
