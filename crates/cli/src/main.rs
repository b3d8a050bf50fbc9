#![deny(unsafe_code)]
//! CLI binary for the flowfield generative art system.
//!
//! Subcommands:
//! - `render [engine]`: paint an image and write a PNG, optionally saving its seed
//! - `replay <seed.json>`: repaint an image from a saved seed
//! - `list`: print available engines

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use flowfield_core::{Engine, Rgb, Seed};
use flowfield_engines::{EngineKind, PixelSurface};
use std::path::{Path, PathBuf};
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::Level;

#[derive(Parser)]
#[command(name = "flowfield", about = "Noise flow-field painter CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Paint an image and write it as a PNG.
    Render {
        /// Engine name.
        #[arg(default_value = "flow")]
        engine: String,

        /// Surface width in pixels.
        #[arg(short = 'W', long, default_value_t = 600)]
        width: usize,

        /// Surface height in pixels.
        #[arg(short = 'H', long, default_value_t = 600)]
        height: usize,

        /// PRNG seed; a time-based seed is used when omitted.
        #[arg(long)]
        seed: Option<u64>,

        /// Background color as hex.
        #[arg(short, long, default_value = "#000000")]
        background: String,

        /// Output file path.
        #[arg(short, long, default_value = "flow.png")]
        output: PathBuf,

        /// Engine parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Also write the reproducible seed as JSON to this path.
        #[arg(long)]
        save_seed: Option<PathBuf>,
    },
    /// Repaint an image from a saved seed file.
    Replay {
        /// Seed JSON written by `render --save-seed`.
        seed_file: PathBuf,

        /// Background color as hex.
        #[arg(short, long, default_value = "#000000")]
        background: String,

        /// Output file path.
        #[arg(short, long, default_value = "flow.png")]
        output: PathBuf,
    },
    /// List available engines.
    List,
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Paints `seed` onto a fresh surface and writes it to `output`.
///
/// Returns the number of engine steps that ran.
fn paint(seed: &Seed, background: Rgb, output: &Path) -> Result<usize, CliError> {
    let mut engine = EngineKind::from_seed(seed)?;
    let mut surface = PixelSurface::new(seed.width, seed.height, background)?;
    let steps = engine.render(&mut surface)?;
    flowfield_engines::snapshot::write_png(&surface, output)?;
    tracing::info!(
        engine = %seed.engine,
        steps,
        painted = surface.painted_pixels(),
        output = %output.display(),
        "image written"
    );
    Ok(steps)
}

fn report(json: bool, seed: &Seed, steps: usize, output: &Path) -> Result<(), CliError> {
    if json {
        let info = serde_json::json!({
            "engine": seed.engine,
            "width": seed.width,
            "height": seed.height,
            "seed": seed.seed,
            "params": seed.params,
            "steps": steps,
            "output": output.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        eprintln!(
            "rendered {} ({}x{}, {steps} steps, seed {}) -> {}",
            seed.engine,
            seed.width,
            seed.height,
            seed.seed,
            output.display()
        );
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let engines = EngineKind::list_engines();
            if cli.json {
                let info = serde_json::json!({ "engines": engines });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Engines:");
                for name in engines {
                    println!("  {name}");
                }
            }
        }
        Command::Render {
            engine,
            width,
            height,
            seed,
            background,
            output,
            params,
            save_seed,
        } => {
            let params: serde_json::Value = serde_json::from_str(&params)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
            let background = Rgb::from_hex(&background)?;
            let seed = Seed::new(&engine, width, height, seed.unwrap_or_else(time_seed))
                .with_params(params);

            let steps = paint(&seed, background, &output)?;

            if let Some(path) = save_seed {
                std::fs::write(&path, serde_json::to_string_pretty(&seed)?)?;
                tracing::info!(path = %path.display(), "seed saved");
            }
            report(cli.json, &seed, steps, &output)?;
        }
        Command::Replay {
            seed_file,
            background,
            output,
        } => {
            let text = std::fs::read_to_string(&seed_file)?;
            let seed: Seed = serde_json::from_str(&text)
                .map_err(|e| CliError::Input(format!("invalid seed file: {e}")))?;
            let background = Rgb::from_hex(&background)?;

            let steps = paint(&seed, background, &output)?;
            report(cli.json, &seed, steps, &output)?;
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(log_level(cli.verbose))
        .compact()
        .init();

    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
